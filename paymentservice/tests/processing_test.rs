//! Processing loop integration tests
//!
//! Exercises one polling cycle at a time against a mocked gateway and the
//! real in-memory store.

mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;

use common::{default_calculator, sample_claim};
use paymentservice::traits::{ClaimStore, MockClaimStore, MockGatewayClient};
use paymentservice::{ClaimProcessor, InMemoryClaimStore, PaymentError, ServiceState};
use shared::PaymentStatus;

fn processor_with<G, S>(gateway: G, store: Arc<S>) -> ClaimProcessor<G, S>
where
    G: paymentservice::GatewayClient,
    S: ClaimStore,
{
    ClaimProcessor::new(Arc::new(gateway), store, default_calculator(), Arc::new(ServiceState::new()))
}

#[tokio::test]
async fn test_new_claim_is_calculated_and_stored() {
    let mut gateway = MockGatewayClient::new();
    gateway
        .expect_fetch_pending_claims()
        .times(1)
        .returning(|| vec![sample_claim("CLM-2025-001")]);

    let store = Arc::new(InMemoryClaimStore::new());
    let processor = processor_with(gateway, store.clone());

    assert_eq!(processor.process_pending().await, 1);

    let calc = store.get("CLM-2025-001").await.unwrap();
    assert_eq!(calc.claimant_name, "John Doe");
    assert_eq!(calc.weekly_benefit_amount, dec!(432.69));
    assert_eq!(calc.maximum_benefit, dec!(11249.94));
    assert_eq!(calc.first_payment_amount, dec!(395.19));
    assert_eq!(calc.status, PaymentStatus::PendingConfirmation);
}

#[tokio::test]
async fn test_processing_is_idempotent_per_claim() {
    let mut gateway = MockGatewayClient::new();
    gateway
        .expect_fetch_pending_claims()
        .times(2)
        .returning(|| vec![sample_claim("CLM-2025-001")]);

    let store = Arc::new(InMemoryClaimStore::new());
    let processor = processor_with(gateway, store.clone());

    assert_eq!(processor.process_pending().await, 1);
    let first = store.get("CLM-2025-001").await.unwrap();

    // Second cycle sees the same claim again and must not touch the record.
    assert_eq!(processor.process_pending().await, 0);
    let second = store.get("CLM-2025-001").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_confirmed_claim_is_never_recalculated() {
    let mut gateway = MockGatewayClient::new();
    gateway
        .expect_fetch_pending_claims()
        .times(1)
        .returning(|| vec![sample_claim("CLM-2025-001")]);
    gateway.expect_report_payment().times(1).returning(|_| Ok(()));

    let store = Arc::new(InMemoryClaimStore::new());
    let processor = processor_with(gateway, store.clone());

    processor.process_pending().await;
    processor.confirm("CLM-2025-001").await.unwrap();

    // Re-wire a fresh gateway still offering the confirmed claim.
    let mut gateway = MockGatewayClient::new();
    gateway
        .expect_fetch_pending_claims()
        .times(1)
        .returning(|| vec![sample_claim("CLM-2025-001")]);
    let processor = processor_with(gateway, store.clone());

    assert_eq!(processor.process_pending().await, 0);
    let calc = store.get("CLM-2025-001").await.unwrap();
    assert_eq!(calc.status, PaymentStatus::Paid);
}

#[tokio::test]
async fn test_empty_feed_is_a_noop_cycle() {
    let mut gateway = MockGatewayClient::new();
    gateway.expect_fetch_pending_claims().times(1).returning(Vec::new);

    let store = Arc::new(InMemoryClaimStore::new());
    let state = Arc::new(ServiceState::new());
    let processor =
        ClaimProcessor::new(Arc::new(gateway), store.clone(), default_calculator(), state.clone());

    assert_eq!(processor.process_pending().await, 0);
    assert!(store.get_all().await.unwrap().is_empty());

    // The cycle still counts as a poll.
    assert!(state.last_poll.read().await.is_some());
    assert_eq!(state.claims_processed(), 0);
}

#[tokio::test]
async fn test_multiple_claims_processed_in_one_cycle() {
    let mut gateway = MockGatewayClient::new();
    gateway.expect_fetch_pending_claims().times(1).returning(|| {
        vec![sample_claim("CLM-1"), sample_claim("CLM-2"), sample_claim("CLM-3")]
    });

    let store = Arc::new(InMemoryClaimStore::new());
    let state = Arc::new(ServiceState::new());
    let processor =
        ClaimProcessor::new(Arc::new(gateway), store.clone(), default_calculator(), state.clone());

    assert_eq!(processor.process_pending().await, 3);
    assert_eq!(store.get_all().await.unwrap().len(), 3);
    assert_eq!(state.claims_processed(), 3);
}

#[tokio::test]
async fn test_existence_check_outage_treats_claim_as_new() {
    let mut gateway = MockGatewayClient::new();
    gateway
        .expect_fetch_pending_claims()
        .times(1)
        .returning(|| vec![sample_claim("CLM-2025-001")]);

    let mut store = MockClaimStore::new();
    store
        .expect_exists()
        .times(1)
        .returning(|_| Err(PaymentError::storage("backend unreachable")));
    store
        .expect_put()
        .times(1)
        .withf(|calc| calc.claim_id == "CLM-2025-001")
        .returning(|_| Ok(()));

    let processor = processor_with(gateway, Arc::new(store));
    assert_eq!(processor.process_pending().await, 1);
}

#[tokio::test]
async fn test_store_write_failure_is_retried_next_cycle() {
    let mut gateway = MockGatewayClient::new();
    gateway
        .expect_fetch_pending_claims()
        .times(2)
        .returning(|| vec![sample_claim("CLM-2025-001")]);

    let mut store = MockClaimStore::new();
    store.expect_exists().times(2).returning(|_| Ok(false));

    let mut put_calls = 0;
    store.expect_put().times(2).returning(move |_| {
        put_calls += 1;
        if put_calls == 1 {
            Err(PaymentError::storage("disk full"))
        } else {
            Ok(())
        }
    });

    let processor = processor_with(gateway, Arc::new(store));

    // Failed write: nothing stored, claim never marked existing.
    assert_eq!(processor.process_pending().await, 0);
    // Next cycle retries the same claim and succeeds.
    assert_eq!(processor.process_pending().await, 1);
}
