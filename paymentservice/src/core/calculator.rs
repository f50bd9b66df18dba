//! Weekly benefit calculation
//!
//! The formula approximates the highest-earning quarter as one quarter of
//! annual earnings, pays out `replacement_rate` of the quarterly weekly
//! average, and caps the result at the configured maximum.

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};

use shared::{ClaimRecord, PaymentCalculation, PaymentStatus};

const QUARTERS_PER_YEAR: Decimal = Decimal::from_parts(4, 0, 0, false, 0);
const WEEKS_PER_QUARTER: Decimal = Decimal::from_parts(26, 0, 0, false, 0);
const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Round a monetary amount to cents, half away from zero.
fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Pure mapping from a claim record to a payment calculation.
///
/// Never fails: zero earnings produce all-zero monetary fields and malformed
/// inputs flow through arithmetically. The only non-deterministic output is
/// the processed-at timestamp.
#[derive(Debug, Clone)]
pub struct BenefitCalculator {
    max_weekly_benefit: Decimal,
    replacement_rate: Decimal,
    benefit_weeks: u32,
}

impl BenefitCalculator {
    pub fn new(max_weekly_benefit: Decimal, replacement_rate: Decimal, benefit_weeks: u32) -> Self {
        Self { max_weekly_benefit, replacement_rate, benefit_weeks }
    }

    pub fn calculate(&self, claim: &ClaimRecord) -> PaymentCalculation {
        let highest_quarter = claim.total_annual_earnings / QUARTERS_PER_YEAR;
        let base_wba = highest_quarter / WEEKS_PER_QUARTER * self.replacement_rate;

        // Cap first, round once; everything downstream uses the rounded amount.
        let weekly_benefit_amount = round_cents(base_wba.min(self.max_weekly_benefit));
        let maximum_benefit =
            round_cents(weekly_benefit_amount * Decimal::from(self.benefit_weeks));
        let weekly_tax_withholding = round_cents(claim.total_tax_amount / WEEKS_PER_YEAR);
        let first_payment_amount = round_cents(weekly_benefit_amount - weekly_tax_withholding);

        PaymentCalculation {
            claim_id: claim.claim_reference_id.clone(),
            claimant_name: claim.claimant_name(),
            annual_wages: claim.total_annual_earnings,
            highest_quarter,
            base_wba,
            weekly_benefit_amount,
            maximum_benefit,
            weekly_tax_withholding,
            first_payment_amount,
            processed_at: Utc::now(),
            status: PaymentStatus::PendingConfirmation,
        }
    }
}
