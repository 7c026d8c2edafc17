use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::{Money, Percent, Rate};
use crate::LoanCalcResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Nominal annual percentage to monthly periodic rate: `pct / 100 / 12`.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / PERCENT / MONTHS_PER_YEAR
}

/// Compound growth factor `(1 + r)^n`.
///
/// Fails instead of panicking when the factor does not fit in a Decimal,
/// which only happens for absurd rate/term combinations.
pub fn growth_factor(rate: Rate, nper: u32) -> LoanCalcResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| {
            LoanCalcError::invalid(
                "annual_rate_percent",
                format!("(1 + {rate})^{nper} overflows decimal precision"),
            )
        })
}

/// Level payment that amortises `principal` over `nper` periods:
/// `P·r·(1+r)^n / ((1+r)^n − 1)`, or `P / n` when `r = 0`.
pub fn annuity_payment(rate: Rate, nper: u32, principal: Money) -> LoanCalcResult<Money> {
    if nper == 0 {
        return Err(LoanCalcError::invalid(
            "term_months",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = growth_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        // (1 + r)^n rounded back to 1: the rate is below Decimal resolution.
        return Ok(principal / Decimal::from(nper));
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| LoanCalcError::invalid("principal", "Payment overflows decimal precision"))
}

/// Inverse of [`annuity_payment`]: the principal a level `payment` services
/// over `nper` periods, `M·((1+r)^n − 1) / (r·(1+r)^n)`, or `M·n` when `r = 0`.
pub fn annuity_present_value(rate: Rate, nper: u32, payment: Money) -> LoanCalcResult<Money> {
    if nper == 0 {
        return Err(LoanCalcError::invalid(
            "term_months",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return linear_total(payment, nper);
    }

    let factor = growth_factor(rate, nper)?;
    let discount = Decimal::ONE / factor;
    let annuity_factor = Decimal::ONE - discount;
    if annuity_factor.is_zero() {
        // (1 + r)^n rounded back to 1: the rate is below Decimal resolution.
        return linear_total(payment, nper);
    }

    payment
        .checked_mul(annuity_factor)
        .and_then(|v| v.checked_div(rate))
        .ok_or_else(|| LoanCalcError::invalid("payment", "Present value overflows decimal precision"))
}

/// `payment × nper`, the zero-rate present value.
fn linear_total(payment: Money, nper: u32) -> LoanCalcResult<Money> {
    payment
        .checked_mul(Decimal::from(nper))
        .ok_or_else(|| LoanCalcError::invalid("payment", "Present value overflows decimal precision"))
}
