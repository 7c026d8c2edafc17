use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::schedule::{compute_schedule, LoanResult};
use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

/// Down payments below this share of the price are flagged for home loans.
const MIN_HOME_DOWN_PAYMENT_PERCENT: Decimal = dec!(10);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A home or car bought with a down payment and the balance financed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancedPurchaseInput {
    #[serde(default = "default_category")]
    pub category: LoanCategory,
    pub purchase_price: Money,
    #[serde(default)]
    pub down_payment: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancedPurchaseOutput {
    pub purchase_price: Money,
    pub down_payment: Money,
    pub down_payment_percent: Percent,
    pub loan_to_value_percent: Percent,
    pub loan: LoanResult,
}

fn default_category() -> LoanCategory {
    LoanCategory::Home
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl FinancedPurchaseInput {
    /// Terms of the financed balance.
    pub fn loan_terms(&self) -> LoanTerms {
        LoanTerms::new(
            self.purchase_price - self.down_payment,
            self.annual_rate_percent,
            self.term_months,
        )
    }
}

/// Amortise the amount financed after the down payment.
pub fn finance_purchase(
    input: &FinancedPurchaseInput,
) -> LoanCalcResult<ComputationOutput<FinancedPurchaseOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let terms = input.loan_terms();
    let loan = compute_schedule(&terms)?;

    let down_payment_percent = input.down_payment / input.purchase_price * dec!(100);
    let loan_to_value_percent = terms.principal / input.purchase_price * dec!(100);

    if input.category == LoanCategory::Home && down_payment_percent < MIN_HOME_DOWN_PAYMENT_PERCENT
    {
        warnings.push(format!(
            "Down payment of {}% is below {MIN_HOME_DOWN_PAYMENT_PERCENT}% of the purchase price",
            down_payment_percent.round_dp(2)
        ));
    }
    if input.annual_rate_percent.is_zero() {
        warnings.push("Zero interest rate: principal is repaid in equal instalments".into());
    }

    let output = FinancedPurchaseOutput {
        purchase_price: input.purchase_price,
        down_payment: input.down_payment,
        down_payment_percent,
        loan_to_value_percent,
        loan,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "category": input.category,
        "amount_financed": terms.principal.to_string(),
    });

    Ok(with_metadata(
        "Financed purchase: price less down payment, level-payment amortisation",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &FinancedPurchaseInput) -> LoanCalcResult<()> {
    if input.purchase_price <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "purchase_price",
            "Purchase price must be positive",
        ));
    }
    if input.down_payment < Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "down_payment",
            "Down payment cannot be negative",
        ));
    }
    if input.down_payment >= input.purchase_price {
        return Err(LoanCalcError::invalid(
            "down_payment",
            "Down payment must be less than the purchase price",
        ));
    }
    Ok(())
}
