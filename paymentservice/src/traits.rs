//! Service trait definitions for dependency injection
//!
//! All I/O is abstracted behind these traits so the processing loop and the
//! confirmation path can be exercised against mocks.

use async_trait::async_trait;

use crate::error::PaymentResult;
use shared::{ClaimRecord, PaymentCalculation};

/// Upstream gateway communication.
///
/// Implementations own every transport concern, including which endpoint
/// shape the gateway actually serves; callers only see claims and acks.
#[mockall::automock]
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Fetch claims awaiting payment processing.
    ///
    /// Degrades to an empty list on any transport or protocol failure; the
    /// failure is logged inside the adapter and never reaches the caller.
    async fn fetch_pending_claims(&self) -> Vec<ClaimRecord>;

    /// Report a processed payment back to the gateway.
    async fn report_payment(&self, calc: &PaymentCalculation) -> PaymentResult<()>;
}

/// Key-value persistence of payment calculations, keyed by claim id.
#[mockall::automock]
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// True if a calculation is already stored for this claim id.
    async fn exists(&self, claim_id: &str) -> PaymentResult<bool>;

    /// Unconditional upsert keyed by `calc.claim_id`.
    async fn put(&self, calc: &PaymentCalculation) -> PaymentResult<()>;

    /// Fetch one stored calculation; `ClaimNotFound` when absent.
    async fn get(&self, claim_id: &str) -> PaymentResult<PaymentCalculation>;

    /// All stored calculations, order not guaranteed. Records that fail to
    /// deserialize are skipped.
    async fn get_all(&self) -> PaymentResult<Vec<PaymentCalculation>>;
}
