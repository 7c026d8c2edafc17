use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::policy::{AffordabilityPolicy, RiskTier};
use crate::error::LoanCalcError;
use crate::time_value::{annuity_present_value, monthly_rate};
use crate::types::*;
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Monthly household figures for an affordability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub monthly_income: Money,
    #[serde(default)]
    pub other_income: Money,
    pub monthly_expenses: Money,
    #[serde(default)]
    pub existing_debt_payments: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub total_income: Money,
    /// Living expenses plus existing debt service.
    pub total_fixed_outflow: Money,
    pub disposable_income: Money,
    /// Headroom under the debt-service cap. Non-positive means no new loan fits.
    pub max_monthly_payment: Money,
    pub max_loan_amount: Money,
    pub current_dsr: Percent,
    /// DSR once the maximum new payment is taken on.
    pub projected_dsr: Percent,
    pub risk_tier: RiskTier,
    pub advisory: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Largest serviceable loan, debt-service ratios and risk tier for a borrower.
pub fn assess_affordability(
    input: &AffordabilityInput,
    policy: &AffordabilityPolicy,
) -> LoanCalcResult<AffordabilityResult> {
    validate_input(input)?;
    policy.validate()?;

    let total_income = input
        .monthly_income
        .checked_add(input.other_income)
        .ok_or_else(|| overflow("other_income"))?;
    if total_income <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "monthly_income",
            "Total income must be positive",
        ));
    }

    let debts = input.existing_debt_payments;
    let total_fixed_outflow = input
        .monthly_expenses
        .checked_add(debts)
        .ok_or_else(|| overflow("existing_debt_payments"))?;
    let disposable_income = total_income - total_fixed_outflow;

    // Raw headroom; negative when existing debt already exceeds the cap.
    let max_monthly_payment = total_income
        .checked_mul(policy.max_debt_service_ratio)
        .ok_or_else(|| overflow("monthly_income"))?
        - debts;

    let max_loan_amount = if max_monthly_payment <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        let rate = monthly_rate(input.annual_rate_percent);
        annuity_present_value(rate, input.term_months, max_monthly_payment)?.max(Decimal::ZERO)
    };

    let current_dsr = percent_of_income(debts, total_income, "existing_debt_payments")?;
    let projected_dsr = percent_of_income(
        debts
            .checked_add(max_monthly_payment)
            .ok_or_else(|| overflow("existing_debt_payments"))?,
        total_income,
        "existing_debt_payments",
    )?;

    let risk_tier = RiskTier::classify(projected_dsr, policy);

    Ok(AffordabilityResult {
        total_income,
        total_fixed_outflow,
        disposable_income,
        max_monthly_payment,
        max_loan_amount,
        current_dsr,
        projected_dsr,
        risk_tier,
        advisory: risk_tier.advisory().to_string(),
    })
}

/// [`assess_affordability`] wrapped in the standard output envelope.
pub fn analyze_affordability(
    input: &AffordabilityInput,
    policy: &AffordabilityPolicy,
) -> LoanCalcResult<ComputationOutput<AffordabilityResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = assess_affordability(input, policy)?;

    if result.disposable_income < Decimal::ZERO {
        warnings.push("Expenses and existing debt exceed income".into());
    }
    if result.max_monthly_payment <= Decimal::ZERO {
        warnings.push(format!(
            "Existing debt service already uses the {}% cap; no new loan is affordable",
            (policy.max_debt_service_ratio * dec!(100)).normalize()
        ));
    }
    for w in &warnings {
        tracing::debug!(tier = ?result.risk_tier, "{w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "max_debt_service_ratio": policy.max_debt_service_ratio.to_string(),
        "medium_risk_dsr": policy.medium_risk_dsr.to_string(),
        "high_risk_dsr": policy.high_risk_dsr.to_string(),
    });

    Ok(with_metadata(
        "Debt-service-ratio affordability (inverse annuity)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn overflow(field: &str) -> LoanCalcError {
    LoanCalcError::invalid(field, "Value overflows decimal precision")
}

/// `amount / total_income × 100`, failing instead of overflowing.
fn percent_of_income(amount: Money, total_income: Money, field: &str) -> LoanCalcResult<Percent> {
    amount
        .checked_div(total_income)
        .and_then(|share| share.checked_mul(dec!(100)))
        .ok_or_else(|| overflow(field))
}

fn validate_input(input: &AffordabilityInput) -> LoanCalcResult<()> {
    let non_negative = [
        ("monthly_income", input.monthly_income),
        ("other_income", input.other_income),
        ("monthly_expenses", input.monthly_expenses),
        ("existing_debt_payments", input.existing_debt_payments),
        ("annual_rate_percent", input.annual_rate_percent),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(LoanCalcError::invalid(field, "Value cannot be negative"));
        }
    }
    if input.term_months == 0 {
        return Err(LoanCalcError::invalid(
            "term_months",
            "Term must be at least 1 month",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
