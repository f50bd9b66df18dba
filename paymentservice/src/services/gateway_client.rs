//! HTTP gateway adapter
//!
//! The upstream gateway's claim-feed path has varied across deployments, so
//! the adapter probes an ordered candidate list and remembers the first path
//! that answers with a well-formed success response. Probing stays entirely
//! inside this adapter; callers only ever see claims.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{PaymentError, PaymentResult};
use crate::traits::GatewayClient;
use shared::{
    parse_claims_payload, ClaimRecord, PaymentCalculation, PaymentStatus, PaymentUpdateRequest,
    UpdateAck,
};

/// Claim-feed paths probed in order until one answers.
pub const DEFAULT_CLAIM_ENDPOINTS: &[&str] = &[
    "/api/payment/claims?status=AWAITING_PAYMENT_PROCESSING",
    "/api/claims?status=AWAITING_PAYMENT_PROCESSING",
    "/api/payment/claims/pending",
];

const UPDATE_ENDPOINT: &str = "/api/payment/update";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpGatewayClient {
    client: reqwest::Client,
    base_url: String,
    updated_by: String,
    claim_endpoints: Vec<String>,
    /// Index of the endpoint that last answered successfully.
    active_endpoint: RwLock<Option<usize>>,
}

impl HttpGatewayClient {
    pub fn new(base_url: impl Into<String>, updated_by: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            updated_by: updated_by.into(),
            claim_endpoints: DEFAULT_CLAIM_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            active_endpoint: RwLock::new(None),
        }
    }

    /// Override the probed claim-feed paths.
    pub fn with_claim_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.claim_endpoints = endpoints;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn claim_endpoints(&self) -> &[String] {
        &self.claim_endpoints
    }

    pub(crate) fn build_update_request(&self, calc: &PaymentCalculation) -> PaymentUpdateRequest {
        PaymentUpdateRequest {
            claim_id: calc.claim_id.clone(),
            status: PaymentStatus::Paid,
            weekly_benefit_amount: calc.weekly_benefit_amount,
            maximum_benefit: calc.maximum_benefit,
            first_payment_amount: calc.first_payment_amount,
            updated_by: self.updated_by.clone(),
            notes: format!(
                "Payment processed. WBA: ${}, Max Benefit: ${}, First Payment: ${}",
                calc.weekly_benefit_amount, calc.maximum_benefit, calc.first_payment_amount
            ),
        }
    }

    async fn try_fetch(&self, path: &str) -> PaymentResult<Vec<ClaimRecord>> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| PaymentError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::gateway(format!("{} returned {}", path, response.status())));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PaymentError::transport(format!("unreadable claim feed: {e}")))?;

        Ok(parse_claims_payload(&body)?)
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn fetch_pending_claims(&self) -> Vec<ClaimRecord> {
        // Fast path: the endpoint that worked last time.
        let remembered = *self.active_endpoint.read().await;
        if let Some(idx) = remembered {
            match self.try_fetch(&self.claim_endpoints[idx]).await {
                Ok(claims) => {
                    debug!("📋 {} claim(s) from {}", claims.len(), self.claim_endpoints[idx]);
                    return claims;
                }
                Err(e) => {
                    warn!("⚠️ Claim feed at {} failed: {}", self.claim_endpoints[idx], e);
                    *self.active_endpoint.write().await = None;
                }
            }
        }

        for (idx, path) in self.claim_endpoints.iter().enumerate() {
            if remembered == Some(idx) {
                continue;
            }
            match self.try_fetch(path).await {
                Ok(claims) => {
                    info!("📋 Claim feed answering at {}", path);
                    *self.active_endpoint.write().await = Some(idx);
                    return claims;
                }
                Err(e) => {
                    debug!("Claim feed probe {} failed: {}", path, e);
                }
            }
        }

        warn!("⚠️ No claim feed endpoint reachable; continuing with empty claim set");
        Vec::new()
    }

    async fn report_payment(&self, calc: &PaymentCalculation) -> PaymentResult<()> {
        let request = self.build_update_request(calc);
        let url = format!("{}{}", self.base_url, UPDATE_ENDPOINT);

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| PaymentError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::gateway(format!(
                "payment update returned {}",
                response.status()
            )));
        }

        let ack: UpdateAck = response
            .json()
            .await
            .map_err(|e| PaymentError::transport(format!("unreadable update ack: {e}")))?;

        if !ack.success {
            return Err(PaymentError::gateway(ack.message));
        }

        info!("✅ Payment update acknowledged for claim {}: {}", calc.claim_id, ack.message);
        Ok(())
    }
}
