//! Service configuration and runtime state
//!
//! Both are explicit structs handed by `Arc` into the processing loop and the
//! request handlers; there are no package-level mutable globals.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::error::{PaymentError, PaymentResult};

/// Read an environment variable, falling back to a default when unset or empty.
pub fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Resolved service configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub service_name: String,
    pub port: u16,
    pub gateway_url: String,
    pub poll_interval: Duration,
    pub max_weekly_benefit: Decimal,
    pub replacement_rate: Decimal,
    pub benefit_weeks: u32,
    pub data_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from command-line values plus environment fallbacks.
    ///
    /// Benefit parameters and the gateway address honor `MAX_WEEKLY_BENEFIT`,
    /// `REPLACEMENT_RATE`, `BENEFIT_WEEKS` and `GATEWAY_URL` so deployments
    /// can tune them without a rebuild.
    pub fn resolve(
        port: u16,
        gateway_url: Option<String>,
        poll_interval_secs: u64,
        data_dir: Option<PathBuf>,
    ) -> PaymentResult<Self> {
        let gateway_url =
            gateway_url.unwrap_or_else(|| env_or("GATEWAY_URL", "http://localhost:8080"));

        let max_weekly_benefit = parse_decimal_env("MAX_WEEKLY_BENEFIT", "600.00")?;
        let replacement_rate = parse_decimal_env("REPLACEMENT_RATE", "0.60")?;
        let benefit_weeks: u32 = env_or("BENEFIT_WEEKS", "26")
            .parse()
            .map_err(|e| PaymentError::config(format!("BENEFIT_WEEKS: {e}")))?;

        if benefit_weeks == 0 {
            return Err(PaymentError::config("BENEFIT_WEEKS must be positive"));
        }

        Ok(Self {
            service_name: env_or("SERVICE_NAME", "paymentservice"),
            port,
            gateway_url,
            poll_interval: Duration::from_secs(poll_interval_secs),
            max_weekly_benefit,
            replacement_rate,
            benefit_weeks,
            data_dir,
        })
    }
}

fn parse_decimal_env(key: &str, default: &str) -> PaymentResult<Decimal> {
    env_or(key, default)
        .parse()
        .map_err(|e| PaymentError::config(format!("{key}: {e}")))
}

/// Shared runtime state: liveness flag plus processing counters.
#[derive(Debug)]
pub struct ServiceState {
    is_running: AtomicBool,
    claims_processed: AtomicU64,
    confirmations: AtomicU64,
    pub last_poll: RwLock<Option<DateTime<Utc>>>,
    started_at: Instant,
}

impl ServiceState {
    pub fn new() -> Self {
        Self {
            is_running: AtomicBool::new(true),
            claims_processed: AtomicU64::new(0),
            confirmations: AtomicU64::new(0),
            last_poll: RwLock::new(None),
            started_at: Instant::now(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    pub fn set_running(&self, running: bool) {
        self.is_running.store(running, Ordering::Relaxed);
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn claims_processed(&self) -> u64 {
        self.claims_processed.load(Ordering::Relaxed)
    }

    pub fn add_claims_processed(&self, count: u64) {
        self.claims_processed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn confirmations(&self) -> u64 {
        self.confirmations.load(Ordering::Relaxed)
    }

    pub fn record_confirmation(&self) {
        self.confirmations.fetch_add(1, Ordering::Relaxed);
    }

    pub async fn record_poll(&self) {
        let mut last_poll = self.last_poll.write().await;
        *last_poll = Some(Utc::now());
    }
}

impl Default for ServiceState {
    fn default() -> Self {
        Self::new()
    }
}
