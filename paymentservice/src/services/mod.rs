//! Real service implementations

pub mod claim_store;
pub mod gateway_client;

#[cfg(test)]
mod tests;

pub use claim_store::{FileClaimStore, InMemoryClaimStore};
pub use gateway_client::HttpGatewayClient;
