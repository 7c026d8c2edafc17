use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::time_value::{annuity_payment, monthly_rate};
use crate::types::*;
use crate::LoanCalcResult;

/// Terms beyond this many months are accepted but flagged.
const LONG_TERM_MONTHS: u32 = 600;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    #[serde(default)]
    pub category: LoanCategory,
    #[serde(flatten)]
    pub terms: LoanTerms,
}

/// One month of the amortisation schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month: u32,
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub principal: Money,
    pub schedule: Vec<ScheduleEntry>,
}

/// Twelve-month block of a schedule. The last block may be shorter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed monthly payment and full month-by-month schedule for a level-payment
/// loan. Zero-rate loans repay linearly.
pub fn compute_schedule(terms: &LoanTerms) -> LoanCalcResult<LoanResult> {
    validate_terms(terms)?;

    let rate = monthly_rate(terms.annual_rate_percent);
    let n = terms.term_months;
    let monthly_payment = annuity_payment(rate, n, terms.principal)?;

    let mut schedule = Vec::with_capacity(n as usize);
    let mut balance = terms.principal;

    for month in 1..=n {
        let interest = balance * rate;
        // The last month takes whatever is left so the loan closes at zero.
        let principal_portion = if month == n {
            balance
        } else {
            (monthly_payment - interest).min(balance)
        };
        balance = (balance - principal_portion).max(Decimal::ZERO);

        schedule.push(ScheduleEntry {
            month,
            payment: principal_portion + interest,
            principal_portion,
            interest_portion: interest,
            remaining_balance: balance,
        });
    }

    let (total_payment, total_interest) = if rate.is_zero() {
        (terms.principal, Decimal::ZERO)
    } else {
        let total = monthly_payment
            .checked_mul(Decimal::from(n))
            .ok_or_else(|| LoanCalcError::invalid("principal", "Total payment overflows"))?;
        (total, (total - terms.principal).max(Decimal::ZERO))
    };

    Ok(LoanResult {
        monthly_payment,
        total_payment,
        total_interest,
        principal: terms.principal,
        schedule,
    })
}

/// [`compute_schedule`] wrapped in the standard output envelope.
pub fn amortize(input: &LoanInput) -> LoanCalcResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = compute_schedule(&input.terms)?;

    if input.terms.annual_rate_percent.is_zero() {
        warnings.push("Zero interest rate: principal is repaid in equal instalments".into());
    }
    if result.total_interest > result.principal {
        warnings.push("Total interest exceeds the amount borrowed".into());
    }
    if input.terms.term_months > LONG_TERM_MONTHS {
        warnings.push(format!(
            "Term of {} months exceeds {LONG_TERM_MONTHS} months",
            input.terms.term_months
        ));
    }
    for w in &warnings {
        tracing::debug!(category = %input.category, "{w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "category": input.category,
        "monthly_rate": monthly_rate(input.terms.annual_rate_percent).to_string(),
        "compounding": "monthly",
    });

    Ok(with_metadata(
        "Level-payment annuity amortisation",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Collapse a schedule into 12-month blocks.
pub fn yearly_summary(schedule: &[ScheduleEntry]) -> Vec<YearSummary> {
    schedule
        .chunks(12)
        .enumerate()
        .map(|(i, months)| YearSummary {
            year: i as u32 + 1,
            principal_paid: months.iter().map(|e| e.principal_portion).sum(),
            interest_paid: months.iter().map(|e| e.interest_portion).sum(),
            closing_balance: months
                .last()
                .map(|e| e.remaining_balance)
                .unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Interest as a share of the total repaid, in percent.
pub fn interest_share_percent(result: &LoanResult) -> Percent {
    if result.total_payment.is_zero() {
        Decimal::ZERO
    } else {
        result.total_interest / result.total_payment * dec!(100)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

pub(crate) fn validate_terms(terms: &LoanTerms) -> LoanCalcResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "principal",
            "Loan principal must be positive",
        ));
    }
    if terms.term_months == 0 {
        return Err(LoanCalcError::invalid(
            "term_months",
            "Term must be at least 1 month",
        ));
    }
    if terms.annual_rate_percent < Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
