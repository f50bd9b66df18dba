//! Shared fixtures for integration tests

use rust_decimal_macros::dec;

use paymentservice::BenefitCalculator;
use shared::{ClaimRecord, PaymentCalculation};

/// Default benefit parameters: cap 600.00, replacement rate 0.60, 26 weeks.
pub fn default_calculator() -> BenefitCalculator {
    BenefitCalculator::new(dec!(600.00), dec!(0.60), 26)
}

pub fn sample_claim(claim_id: &str) -> ClaimRecord {
    ClaimRecord {
        claim_reference_id: claim_id.to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email_address: "john.doe@email.com".to_string(),
        phone_number: "555-0123".to_string(),
        employer_name: "Tech Corp".to_string(),
        employer_id: "12-3456789".to_string(),
        employment_start_date: "2023-01-01".to_string(),
        employment_end_date: "2024-12-31".to_string(),
        total_annual_earnings: dec!(75000),
        separation_reason_code: "LAYOFF".to_string(),
        separation_explanation: "Company restructuring".to_string(),
        status_code: "AWAITING_PAYMENT_PROCESSING".to_string(),
        received_timestamp: "2025-01-15T10:30:00Z".to_string(),
        state_tax_amount: dec!(1500),
        federal_tax_amount: dec!(450),
        total_tax_amount: dec!(1950),
    }
}

pub fn calculation_for(claim_id: &str) -> PaymentCalculation {
    default_calculator().calculate(&sample_claim(claim_id))
}
