//! Claim store implementations
//!
//! `InMemoryClaimStore` is the default backend; `FileClaimStore` persists one
//! JSON document per claim under a data directory for deployments that need
//! calculations to survive a restart.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::{PaymentError, PaymentResult};
use crate::traits::ClaimStore;
use shared::PaymentCalculation;

/// A thread-safe in-memory store for payment calculations.
#[derive(Default, Clone)]
pub struct InMemoryClaimStore {
    payments: Arc<RwLock<HashMap<String, PaymentCalculation>>>,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn exists(&self, claim_id: &str) -> PaymentResult<bool> {
        let payments = self.payments.read().await;
        Ok(payments.contains_key(claim_id))
    }

    async fn put(&self, calc: &PaymentCalculation) -> PaymentResult<()> {
        let mut payments = self.payments.write().await;
        payments.insert(calc.claim_id.clone(), calc.clone());
        Ok(())
    }

    async fn get(&self, claim_id: &str) -> PaymentResult<PaymentCalculation> {
        let payments = self.payments.read().await;
        payments.get(claim_id).cloned().ok_or_else(|| PaymentError::not_found(claim_id))
    }

    async fn get_all(&self) -> PaymentResult<Vec<PaymentCalculation>> {
        let payments = self.payments.read().await;
        Ok(payments.values().cloned().collect())
    }
}

/// A store keeping one JSON document per claim under a data directory.
///
/// Reads are best-effort: a document that fails to parse is skipped by
/// `get_all` with a warning rather than failing the whole listing.
#[derive(Clone)]
pub struct FileClaimStore {
    root: PathBuf,
}

impl FileClaimStore {
    pub fn new(root: impl AsRef<Path>) -> PaymentResult<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)
            .map_err(|e| PaymentError::storage(format!("cannot create {}: {e}", root.display())))?;
        Ok(Self { root })
    }

    fn path_for(&self, claim_id: &str) -> PathBuf {
        self.root.join(format!("payment-{claim_id}.json"))
    }
}

#[async_trait]
impl ClaimStore for FileClaimStore {
    async fn exists(&self, claim_id: &str) -> PaymentResult<bool> {
        match tokio::fs::metadata(self.path_for(claim_id)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PaymentError::storage(e.to_string())),
        }
    }

    async fn put(&self, calc: &PaymentCalculation) -> PaymentResult<()> {
        let body = serde_json::to_vec_pretty(calc)?;
        tokio::fs::write(self.path_for(&calc.claim_id), body)
            .await
            .map_err(|e| PaymentError::storage(e.to_string()))
    }

    async fn get(&self, claim_id: &str) -> PaymentResult<PaymentCalculation> {
        let raw = match tokio::fs::read(self.path_for(claim_id)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PaymentError::not_found(claim_id));
            }
            Err(e) => return Err(PaymentError::storage(e.to_string())),
        };

        serde_json::from_slice(&raw)
            .map_err(|e| PaymentError::deserialization(format!("claim {claim_id}: {e}")))
    }

    async fn get_all(&self) -> PaymentResult<Vec<PaymentCalculation>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| PaymentError::storage(e.to_string()))?;

        let mut payments = Vec::new();
        while let Some(entry) =
            entries.next_entry().await.map_err(|e| PaymentError::storage(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let raw = match tokio::fs::read(&path).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping unreadable payment record {}: {}", path.display(), e);
                    continue;
                }
            };

            match serde_json::from_slice::<PaymentCalculation>(&raw) {
                Ok(calc) => payments.push(calc),
                Err(e) => {
                    warn!("Skipping corrupt payment record {}: {}", path.display(), e);
                }
            }
        }

        Ok(payments)
    }
}
