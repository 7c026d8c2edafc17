use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::types::{Percent, Rate};
use crate::LoanCalcResult;

/// Share of gross monthly income lenders allow for total debt service.
pub const DEFAULT_MAX_DEBT_SERVICE_RATIO: Rate = dec!(0.40);
/// Projected DSR (percent) from which a borrower is classed medium risk.
pub const DEFAULT_MEDIUM_RISK_DSR: Percent = dec!(40);
/// Projected DSR (percent) above which a borrower is classed high risk.
pub const DEFAULT_HIGH_RISK_DSR: Percent = dec!(50);

pub const HIGH_RISK_ADVISORY: &str =
    "Reduce existing debt or increase income before taking on further borrowing.";
pub const MEDIUM_RISK_ADVISORY: &str =
    "Borrowing is possible, but manage repayments and spending carefully.";
pub const LOW_RISK_ADVISORY: &str = "Healthy financial profile for taking on a loan.";

/// Lending policy used by the affordability assessment. Every field can be
/// overridden from JSON; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffordabilityPolicy {
    /// Cap on total monthly debt service as a fraction of income (0.40 = 40%).
    pub max_debt_service_ratio: Rate,
    pub medium_risk_dsr: Percent,
    pub high_risk_dsr: Percent,
}

impl Default for AffordabilityPolicy {
    fn default() -> Self {
        Self {
            max_debt_service_ratio: DEFAULT_MAX_DEBT_SERVICE_RATIO,
            medium_risk_dsr: DEFAULT_MEDIUM_RISK_DSR,
            high_risk_dsr: DEFAULT_HIGH_RISK_DSR,
        }
    }
}

impl AffordabilityPolicy {
    pub fn validate(&self) -> LoanCalcResult<()> {
        if self.max_debt_service_ratio <= Decimal::ZERO || self.max_debt_service_ratio > Decimal::ONE
        {
            return Err(LoanCalcError::invalid(
                "max_debt_service_ratio",
                "Debt service cap must be in (0, 1]",
            ));
        }
        if self.medium_risk_dsr < Decimal::ZERO {
            return Err(LoanCalcError::invalid(
                "medium_risk_dsr",
                "Risk threshold cannot be negative",
            ));
        }
        if self.medium_risk_dsr > self.high_risk_dsr {
            return Err(LoanCalcError::invalid(
                "medium_risk_dsr",
                "Medium risk threshold must not exceed the high risk threshold",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Classify a projected debt-service ratio (percent).
    pub fn classify(projected_dsr: Percent, policy: &AffordabilityPolicy) -> Self {
        if projected_dsr > policy.high_risk_dsr {
            RiskTier::High
        } else if projected_dsr >= policy.medium_risk_dsr {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn advisory(&self) -> &'static str {
        match self {
            RiskTier::High => HIGH_RISK_ADVISORY,
            RiskTier::Medium => MEDIUM_RISK_ADVISORY,
            RiskTier::Low => LOW_RISK_ADVISORY,
        }
    }
}
