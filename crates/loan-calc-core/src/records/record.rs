use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amortization::schedule::LoanResult;
use crate::types::*;

/// Summary of a calculated loan kept for later review.
///
/// Serialized as a flat JSON object with numeric fields written as numbers.
/// Records are write-once: the store only appends and deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLoanRecord {
    pub id: String,
    pub label: String,
    pub category: LoanCategory,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_payment: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payment: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Money,
    pub saved_at: DateTime<Utc>,
}

impl SavedLoanRecord {
    /// Snapshot a calculation under a fresh id. A blank label becomes
    /// "<Category> loan <date>".
    pub fn from_result(
        label: &str,
        category: LoanCategory,
        terms: &LoanTerms,
        result: &LoanResult,
    ) -> Self {
        let saved_at = Utc::now();
        let label = match label.trim() {
            "" => format!(
                "{} loan {}",
                category.display_name(),
                saved_at.format("%Y-%m-%d")
            ),
            given => given.to_string(),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            label,
            category,
            amount: result.principal,
            annual_rate_percent: terms.annual_rate_percent,
            term_months: terms.term_months,
            monthly_payment: result.monthly_payment,
            total_payment: result.total_payment,
            total_interest: result.total_interest,
            saved_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLoansSummary {
    pub count: usize,
    pub total_amount: Money,
    pub total_monthly_payment: Money,
    pub total_interest: Money,
}

/// Totals across saved loans.
pub fn summarize_records(records: &[SavedLoanRecord]) -> SavedLoansSummary {
    SavedLoansSummary {
        count: records.len(),
        total_amount: records.iter().map(|r| r.amount).sum(),
        total_monthly_payment: records.iter().map(|r| r.monthly_payment).sum(),
        total_interest: records.iter().map(|r| r.total_interest).sum(),
    }
}
