//! Main payment service implementation
//!
//! Wires the injected gateway client and claim store into the processing
//! loop and the operator-facing HTTP surface: the payment listing, the
//! confirmation action, and the liveness check.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::core::{BenefitCalculator, ClaimProcessor};
use crate::error::{PaymentError, PaymentResult};
use crate::state::{ServiceState, Settings};
use crate::traits::{ClaimStore, GatewayClient};
use shared::PaymentStatus;

/// Payment service with injected dependencies.
pub struct PaymentService<G, S>
where
    G: GatewayClient,
    S: ClaimStore,
{
    settings: Arc<Settings>,
    state: Arc<ServiceState>,
    store: Arc<S>,
    processor: ClaimProcessor<G, S>,
}

impl<G, S> Clone for PaymentService<G, S>
where
    G: GatewayClient,
    S: ClaimStore,
{
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            state: self.state.clone(),
            store: self.store.clone(),
            processor: self.processor.clone(),
        }
    }
}

impl<G, S> PaymentService<G, S>
where
    G: GatewayClient + 'static,
    S: ClaimStore + 'static,
{
    pub fn new(settings: Settings, gateway: Arc<G>, store: Arc<S>) -> Self {
        let state = Arc::new(ServiceState::new());
        let calculator = BenefitCalculator::new(
            settings.max_weekly_benefit,
            settings.replacement_rate,
            settings.benefit_weeks,
        );
        let processor =
            ClaimProcessor::new(gateway, store.clone(), calculator, state.clone());

        Self { settings: Arc::new(settings), state, store, processor }
    }

    /// Build the Axum router with all routes.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(list_payments_handler))
            .route("/health", get(health_handler))
            .route("/confirm/:claim_id", post(confirm_handler))
            .layer(ServiceBuilder::new().layer(CorsLayer::permissive()).into_inner())
            .with_state(self.clone())
    }

    /// Start the processing loop and the HTTP server; returns after shutdown.
    pub async fn run(&self) -> PaymentResult<()> {
        let router = self.build_router();

        let loop_task = {
            let processor = self.processor.clone();
            let poll_interval = self.settings.poll_interval;
            tokio::spawn(async move {
                processor.run(poll_interval).await;
            })
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], self.settings.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| PaymentError::ServerStartup(format!("Failed to bind to {addr}: {e}")))?;

        info!("🌐 Payment service listening on http://{}", addr);
        info!("📊 Dashboard available at http://{}/", addr);

        let server_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!("Server error: {}", e);
            }
        });

        tokio::select! {
            _ = loop_task => {
                info!("Processing loop task completed");
            },
            _ = server_task => {
                info!("HTTP server task completed");
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                self.state.set_running(false);
            }
        }

        Ok(())
    }

    pub fn state(&self) -> &Arc<ServiceState> {
        &self.state
    }

    pub fn processor(&self) -> &ClaimProcessor<G, S> {
        &self.processor
    }
}

// HTTP handlers

/// List all stored payment calculations with pending/processed counts.
async fn list_payments_handler<G, S>(
    State(service): State<PaymentService<G, S>>,
) -> Json<Value>
where
    G: GatewayClient + 'static,
    S: ClaimStore + 'static,
{
    let payments = match service.store.get_all().await {
        Ok(payments) => payments,
        Err(e) => {
            error!("Error reading stored payments: {}", e);
            Vec::new()
        }
    };

    let pending_count =
        payments.iter().filter(|p| p.status == PaymentStatus::PendingConfirmation).count();
    let processed_count = payments.len() - pending_count;

    Json(json!({
        "payments": payments,
        "pendingCount": pending_count,
        "processedCount": processed_count,
        "totalPayments": payments.len(),
    }))
}

/// Confirm a pending payment by claim id.
async fn confirm_handler<G, S>(
    Path(claim_id): Path<String>,
    State(service): State<PaymentService<G, S>>,
) -> (StatusCode, Json<Value>)
where
    G: GatewayClient + 'static,
    S: ClaimStore + 'static,
{
    match service.processor.confirm(&claim_id).await {
        Ok(calc) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Payment confirmed",
                "claimId": calc.claim_id,
                "status": calc.status,
            })),
        ),
        Err(PaymentError::ClaimNotFound { .. }) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": "Payment not found" })))
        }
        Err(e) => {
            error!("Failed to confirm payment for claim {}: {}", claim_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Failed to update payment" })))
        }
    }
}

/// Liveness check.
async fn health_handler<G, S>(State(service): State<PaymentService<G, S>>) -> Json<Value>
where
    G: GatewayClient + 'static,
    S: ClaimStore + 'static,
{
    let last_poll = service.state.last_poll.read().await.as_ref().map(|ts| ts.to_rfc3339());

    Json(json!({
        "status": "UP",
        "service": service.settings.service_name,
        "timestamp": Utc::now().to_rfc3339(),
        "uptimeSeconds": service.state.uptime_seconds(),
        "claimsProcessed": service.state.claims_processed(),
        "confirmations": service.state.confirmations(),
        "lastPoll": last_poll,
    }))
}
