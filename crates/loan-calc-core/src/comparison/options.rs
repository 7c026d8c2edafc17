use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::{compute_schedule, LoanResult};
use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A loan offer with figures frozen at the time it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOption {
    pub id: String,
    pub label: String,
    pub terms: LoanTerms,
    pub result: LoanResult,
}

/// One line of the side-by-side comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub id: String,
    pub label: String,
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    /// Total repaid above the cheapest option.
    pub extra_cost_vs_best: Money,
    pub is_best: bool,
}

/// Set of loan offers under comparison in one session.
///
/// Mutation takes `&mut self`, so a comparison has exactly one writer.
#[derive(Debug, Clone, Default)]
pub struct LoanComparison {
    options: Vec<ComparisonOption>,
    next_id: u64,
}

impl LoanComparison {
    pub fn new() -> Self {
        Self::default()
    }

    /// Price an offer and append it. Ids are never reused within a session.
    pub fn add_option(
        &mut self,
        label: &str,
        terms: LoanTerms,
    ) -> LoanCalcResult<&ComparisonOption> {
        let label = label.trim();
        if label.is_empty() {
            return Err(LoanCalcError::invalid("label", "Option label cannot be empty"));
        }
        let result = compute_schedule(&terms)?;

        self.next_id += 1;
        let id = format!("opt-{}", self.next_id);
        tracing::debug!(%id, label, total_payment = %result.total_payment, "comparison option added");

        self.options.push(ComparisonOption {
            id,
            label: label.to_string(),
            terms,
            result,
        });
        Ok(&self.options[self.options.len() - 1])
    }

    /// Remove an option. Unknown ids are ignored.
    pub fn remove_option(&mut self, id: &str) -> Option<ComparisonOption> {
        let idx = self.options.iter().position(|o| o.id == id)?;
        tracing::debug!(id, "comparison option removed");
        Some(self.options.remove(idx))
    }

    /// Cheapest option by total repayment; the earliest added wins a tie.
    pub fn best_option(&self) -> Option<&ComparisonOption> {
        self.options.iter().fold(None, |best, current| match best {
            Some(b) if b.result.total_payment <= current.result.total_payment => Some(b),
            _ => Some(current),
        })
    }

    pub fn get(&self, id: &str) -> Option<&ComparisonOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Options in insertion order.
    pub fn options(&self) -> &[ComparisonOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn summary(&self) -> Vec<ComparisonRow> {
        let best = self.best_option();
        let best_total = best
            .map(|b| b.result.total_payment)
            .unwrap_or(Decimal::ZERO);
        let best_id = best.map(|b| b.id.as_str());

        self.options
            .iter()
            .map(|o| ComparisonRow {
                id: o.id.clone(),
                label: o.label.clone(),
                principal: o.terms.principal,
                annual_rate_percent: o.terms.annual_rate_percent,
                term_months: o.terms.term_months,
                monthly_payment: o.result.monthly_payment,
                total_interest: o.result.total_interest,
                total_payment: o.result.total_payment,
                extra_cost_vs_best: o.result.total_payment - best_total,
                is_best: Some(o.id.as_str()) == best_id,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Batch entry point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOptionInput {
    pub label: String,
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub options: Vec<ComparisonOptionInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub best_option_id: Option<String>,
    pub rows: Vec<ComparisonRow>,
}

/// Build a comparison from a list of offers and report the cheapest.
pub fn compare_loans(input: &ComparisonInput) -> LoanCalcResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.options.is_empty() {
        return Err(LoanCalcError::invalid(
            "options",
            "At least one loan option is required",
        ));
    }

    let mut comparison = LoanComparison::new();
    for opt in &input.options {
        comparison.add_option(
            &opt.label,
            LoanTerms::new(opt.principal, opt.annual_rate_percent, opt.term_months),
        )?;
    }

    if comparison.len() == 1 {
        warnings.push("Only one option supplied; nothing to compare against".into());
    }
    let principals: Vec<Money> = comparison.options().iter().map(|o| o.terms.principal).collect();
    if principals.windows(2).any(|w| w[0] != w[1]) {
        warnings.push(
            "Options borrow different amounts; total repayment favours the smaller loan".into(),
        );
    }

    let output = ComparisonOutput {
        best_option_id: comparison.best_option().map(|o| o.id.clone()),
        rows: comparison.summary(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "ranking": "lowest total repayment, earliest option wins ties",
        "option_count": comparison.len(),
    });

    Ok(with_metadata(
        "Loan offer comparison by total repayment",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
