//! Shared types for the payment processing service
//!
//! Contains the claim and payment-calculation domain types, the wire types
//! exchanged with the upstream gateway, and the tracing setup used by the
//! service binary. Component-internal types stay in the service crate.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
