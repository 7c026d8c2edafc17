use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use loan_calc_core::affordability::{dsr, AffordabilityInput, AffordabilityPolicy};
use loan_calc_core::amortization::purchase::{self, FinancedPurchaseInput};
use loan_calc_core::amortization::schedule::{self, LoanInput};
use loan_calc_core::comparison::{self, options::ComparisonInput};
use loan_calc_core::records::{summarize_records, SavedLoanRecord};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortisation
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::amortize(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn finance_purchase(input_json: String) -> NapiResult<String> {
    let input: FinancedPurchaseInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = purchase::finance_purchase(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Affordability
// ---------------------------------------------------------------------------

/// Household figures with an optional policy override alongside.
#[derive(Deserialize)]
struct AffordabilityRequest {
    #[serde(flatten)]
    input: AffordabilityInput,
    #[serde(default)]
    policy: AffordabilityPolicy,
}

#[napi]
pub fn assess_affordability(input_json: String) -> NapiResult<String> {
    let request: AffordabilityRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        dsr::analyze_affordability(&request.input, &request.policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Comparison and saved loans
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_loans(input_json: String) -> NapiResult<String> {
    let input: ComparisonInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = comparison::compare_loans(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Totals over a JSON array of saved loan records.
#[napi]
pub fn summarize_saved_loans(records_json: String) -> NapiResult<String> {
    let records: Vec<SavedLoanRecord> =
        serde_json::from_str(&records_json).map_err(to_napi_error)?;
    serde_json::to_string(&summarize_records(&records)).map_err(to_napi_error)
}
