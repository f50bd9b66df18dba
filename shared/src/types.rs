//! Claim and payment domain types plus the gateway wire contract
//!
//! Field names follow the upstream gateway's camelCase JSON convention.
//! Monetary values use `rust_decimal::Decimal`; final rounding policy lives
//! with the calculator, not here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::SharedError;

/// One unemployment claim as submitted by the external gateway.
///
/// Read-only to this service. Dates and timestamps arrive as strings and are
/// carried through unparsed. `total_tax_amount` is assumed to equal
/// `state_tax_amount + federal_tax_amount` by upstream convention; this is
/// not validated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimRecord {
    pub claim_reference_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
    pub employer_name: String,
    pub employer_id: String,
    pub employment_start_date: String,
    pub employment_end_date: String,
    pub total_annual_earnings: Decimal,
    pub separation_reason_code: String,
    pub separation_explanation: String,
    pub status_code: String,
    pub received_timestamp: String,
    pub state_tax_amount: Decimal,
    pub federal_tax_amount: Decimal,
    pub total_tax_amount: Decimal,
}

impl ClaimRecord {
    /// Claimant display name: first and last joined by a single space.
    pub fn claimant_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Processing status of a stored payment calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    PendingConfirmation,
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::PendingConfirmation => write!(f, "PENDING_CONFIRMATION"),
            PaymentStatus::Paid => write!(f, "PAID"),
        }
    }
}

/// The benefit formula's output for one claim; the persisted record.
///
/// `claim_id` doubles as the storage key. `base_wba` is kept unrounded; the
/// capped weekly amount and everything derived from it are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCalculation {
    pub claim_id: String,
    pub claimant_name: String,
    pub annual_wages: Decimal,
    pub highest_quarter: Decimal,
    #[serde(rename = "baseWBA")]
    pub base_wba: Decimal,
    pub weekly_benefit_amount: Decimal,
    pub maximum_benefit: Decimal,
    pub weekly_tax_withholding: Decimal,
    pub first_payment_amount: Decimal,
    pub processed_at: DateTime<Utc>,
    pub status: PaymentStatus,
}

/// Envelope form of the gateway claim feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub claims: Vec<ClaimRecord>,
}

/// Body of the payment-update call sent back to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdateRequest {
    pub claim_id: String,
    pub status: PaymentStatus,
    pub weekly_benefit_amount: Decimal,
    pub maximum_benefit: Decimal,
    pub first_payment_amount: Decimal,
    pub updated_by: String,
    pub notes: String,
}

/// Acknowledgement returned by the payment-update call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateAck {
    pub success: bool,
    pub message: String,
}

/// Normalize a claim feed payload into a list of claims.
///
/// The gateway has answered with both a `{success, message, claims}` envelope
/// and a bare JSON array across deployments; both shapes are accepted. An
/// envelope with `success == false` is a protocol error, not an empty feed.
pub fn parse_claims_payload(value: &serde_json::Value) -> Result<Vec<ClaimRecord>, SharedError> {
    if value.is_array() {
        return serde_json::from_value(value.clone())
            .map_err(|e| SharedError::deserialization(e.to_string()));
    }

    let envelope: GatewayResponse = serde_json::from_value(value.clone())
        .map_err(|e| SharedError::deserialization(e.to_string()))?;

    if !envelope.success {
        return Err(SharedError::protocol(envelope.message));
    }

    Ok(envelope.claims)
}
