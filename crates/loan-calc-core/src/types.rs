use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Periodic rates expressed as decimals (0.01 = 1% per month).
pub type Rate = Decimal;

/// Percentages as entered by a borrower (12 = 12% p.a.) and DSR figures.
pub type Percent = Decimal;

/// Product line a calculation belongs to. The engine is the same for all
/// three; the category only labels results and saved records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanCategory {
    #[default]
    Personal,
    Home,
    Car,
}

impl LoanCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanCategory::Personal => "personal",
            LoanCategory::Home => "home",
            LoanCategory::Car => "car",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LoanCategory::Personal => "Personal",
            LoanCategory::Home => "Home",
            LoanCategory::Car => "Car",
        }
    }
}

impl std::fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Principal, nominal annual rate and term of a level-payment loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Nominal annual rate in percent (12 = 12% p.a.), compounded monthly.
    pub annual_rate_percent: Percent,
    pub term_months: u32,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
        }
    }
}

/// Envelope around every engine result: the figures plus how they were
/// produced and anything the caller should double-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub engine: String,
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Wrap a result in the envelope. `elapsed_us` is wall time spent computing.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            engine: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "decimal_96bit_mantissa".to_string(),
        },
    }
}
