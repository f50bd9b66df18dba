//! Claim store tests

use super::fixtures::sample_calculation;
use crate::error::PaymentError;
use crate::services::{FileClaimStore, InMemoryClaimStore};
use crate::traits::ClaimStore;
use shared::PaymentStatus;

#[tokio::test]
async fn test_in_memory_round_trip() {
    let store = InMemoryClaimStore::new();
    let calc = sample_calculation("CLM-1");

    assert!(!store.exists("CLM-1").await.unwrap());

    store.put(&calc).await.unwrap();
    assert!(store.exists("CLM-1").await.unwrap());

    let retrieved = store.get("CLM-1").await.unwrap();
    assert_eq!(retrieved, calc);
}

#[tokio::test]
async fn test_in_memory_get_missing_claim() {
    let store = InMemoryClaimStore::new();

    let err = store.get("CLM-404").await.unwrap_err();
    assert!(matches!(err, PaymentError::ClaimNotFound { claim_id } if claim_id == "CLM-404"));
}

#[tokio::test]
async fn test_in_memory_put_overwrites() {
    let store = InMemoryClaimStore::new();
    let mut calc = sample_calculation("CLM-1");

    store.put(&calc).await.unwrap();

    calc.status = PaymentStatus::Paid;
    store.put(&calc).await.unwrap();

    let retrieved = store.get("CLM-1").await.unwrap();
    assert_eq!(retrieved.status, PaymentStatus::Paid);
    assert_eq!(store.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_in_memory_get_all() {
    let store = InMemoryClaimStore::new();
    store.put(&sample_calculation("CLM-1")).await.unwrap();
    store.put(&sample_calculation("CLM-2")).await.unwrap();

    let mut ids: Vec<String> =
        store.get_all().await.unwrap().into_iter().map(|c| c.claim_id).collect();
    ids.sort();
    assert_eq!(ids, vec!["CLM-1", "CLM-2"]);
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileClaimStore::new(dir.path()).unwrap();
    let calc = sample_calculation("CLM-1");

    assert!(!store.exists("CLM-1").await.unwrap());

    store.put(&calc).await.unwrap();
    assert!(store.exists("CLM-1").await.unwrap());

    // Field-for-field equality, timestamp included.
    let retrieved = store.get("CLM-1").await.unwrap();
    assert_eq!(retrieved, calc);
}

#[tokio::test]
async fn test_file_store_missing_claim() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileClaimStore::new(dir.path()).unwrap();

    let err = store.get("CLM-404").await.unwrap_err();
    assert!(matches!(err, PaymentError::ClaimNotFound { .. }));
}

#[tokio::test]
async fn test_file_store_skips_corrupt_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileClaimStore::new(dir.path()).unwrap();

    store.put(&sample_calculation("CLM-1")).await.unwrap();
    std::fs::write(dir.path().join("payment-CLM-2.json"), b"{ not json").unwrap();

    let payments = store.get_all().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].claim_id, "CLM-1");

    // Direct reads of the corrupt record do surface the error.
    let err = store.get("CLM-2").await.unwrap_err();
    assert!(matches!(err, PaymentError::Deserialization { .. }));
}

#[tokio::test]
async fn test_file_store_ignores_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileClaimStore::new(dir.path()).unwrap();

    std::fs::write(dir.path().join("notes.txt"), b"operator scratchpad").unwrap();
    store.put(&sample_calculation("CLM-1")).await.unwrap();

    assert_eq!(store.get_all().await.unwrap().len(), 1);
}
