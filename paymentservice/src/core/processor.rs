//! Claim processing pipeline
//!
//! One periodic task polls the gateway and stores a payment calculation for
//! every claim not seen before; the confirmation path flips a stored record
//! to PAID and notifies the gateway best-effort. Per claim id the lifecycle
//! is UNSEEN -> PENDING_CONFIRMATION -> PAID, with PAID terminal.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::core::BenefitCalculator;
use crate::error::PaymentResult;
use crate::state::ServiceState;
use crate::traits::{ClaimStore, GatewayClient};
use shared::{PaymentCalculation, PaymentStatus};

pub struct ClaimProcessor<G, S> {
    gateway: Arc<G>,
    store: Arc<S>,
    calculator: BenefitCalculator,
    state: Arc<ServiceState>,
}

impl<G, S> Clone for ClaimProcessor<G, S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            store: self.store.clone(),
            calculator: self.calculator.clone(),
            state: self.state.clone(),
        }
    }
}

impl<G, S> ClaimProcessor<G, S>
where
    G: GatewayClient,
    S: ClaimStore,
{
    pub fn new(
        gateway: Arc<G>,
        store: Arc<S>,
        calculator: BenefitCalculator,
        state: Arc<ServiceState>,
    ) -> Self {
        Self { gateway, store, calculator, state }
    }

    /// Periodic polling loop. Returns when the service stops running.
    pub async fn run(&self, poll_interval: Duration) {
        let mut ticker = tokio::time::interval(poll_interval);

        while self.state.is_running() {
            ticker.tick().await;
            if !self.state.is_running() {
                break;
            }

            let stored = self.process_pending().await;
            if stored > 0 {
                info!("💰 Stored {} new payment calculation(s)", stored);
            }
        }

        info!("Processing loop stopped");
    }

    /// One polling cycle: fetch pending claims, skip the ones already stored,
    /// calculate and store the rest. Returns the number of newly stored
    /// calculations.
    pub async fn process_pending(&self) -> usize {
        let claims = self.gateway.fetch_pending_claims().await;
        self.state.record_poll().await;

        if claims.is_empty() {
            debug!("No claims awaiting payment processing");
            return 0;
        }

        info!("📋 Found {} claim(s) awaiting payment processing", claims.len());

        let mut stored = 0usize;
        for claim in &claims {
            let claim_id = claim.claim_reference_id.as_str();

            // Idempotence guard: a claim already stored (pending or paid) is
            // never recalculated. On a storage outage the claim is treated as
            // new; if the write below also fails it is retried next cycle.
            match self.store.exists(claim_id).await {
                Ok(true) => continue,
                Ok(false) => {}
                Err(e) => {
                    warn!("⚠️ Existence check failed for claim {}: {}", claim_id, e);
                }
            }

            let calc = self.calculator.calculate(claim);
            match self.store.put(&calc).await {
                Ok(()) => {
                    stored += 1;
                    info!(
                        "Prepared payment calculation for claim {}: WBA=${}, Max Benefit=${}",
                        calc.claim_id, calc.weekly_benefit_amount, calc.maximum_benefit
                    );
                }
                Err(e) => {
                    warn!("Failed to store payment calculation for claim {}: {}", claim_id, e);
                }
            }
        }

        self.state.add_claims_processed(stored as u64);
        stored
    }

    /// Confirm a stored payment: flip its status to PAID, refresh the
    /// processed timestamp, persist, then notify the gateway.
    ///
    /// The local commit always happens first; the gateway report is
    /// best-effort and its failure never rolls the commit back. Confirming an
    /// already-paid claim refreshes the timestamp again without error.
    pub async fn confirm(&self, claim_id: &str) -> PaymentResult<PaymentCalculation> {
        let mut calc = self.store.get(claim_id).await?;

        calc.status = PaymentStatus::Paid;
        calc.processed_at = Utc::now();
        self.store.put(&calc).await?;
        self.state.record_confirmation();

        if let Err(e) = self.gateway.report_payment(&calc).await {
            warn!("⚠️ Failed to report payment for claim {} to gateway: {}", claim_id, e);
        } else {
            info!("✅ Payment confirmed and reported for claim {}", claim_id);
        }

        Ok(calc)
    }
}
