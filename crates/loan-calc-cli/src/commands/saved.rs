use clap::{Args, Subcommand};
use serde_json::{json, Value};
use std::fs::File;
use std::io::Write;

use loan_calc_core::amortization::LoanResult;
use loan_calc_core::records::{
    summarize_records, JsonFileLoanStore, LoanRecordStore, SavedLoanRecord,
};
use loan_calc_core::{LoanCategory, LoanTerms};

pub const DEFAULT_STORE_PATH: &str = "saved_loans.json";

/// Column order of the saved-loans CSV export.
const EXPORT_HEADERS: [&str; 9] = [
    "label",
    "category",
    "amount",
    "rate",
    "term",
    "monthly_payment",
    "total_interest",
    "total_payment",
    "saved_at",
];

/// Save flags shared by the loan calculators
#[derive(Args, Debug, Clone)]
pub struct SaveArgs {
    /// Save a summary of this calculation to the store
    #[arg(long)]
    pub save: bool,

    /// Label for the saved record (defaults to "<Category> loan <date>")
    #[arg(long)]
    pub label: Option<String>,

    /// Path of the saved-loans JSON file
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    pub store: String,
}

#[derive(Args)]
pub struct SavedArgs {
    /// Path of the saved-loans JSON file
    #[arg(long, default_value = DEFAULT_STORE_PATH, global = true)]
    pub store: String,

    #[command(subcommand)]
    pub action: SavedAction,
}

#[derive(Subcommand)]
pub enum SavedAction {
    /// List saved loans
    List,
    /// Totals across saved loans
    Summary,
    /// Delete one saved loan
    Remove {
        /// Record id
        id: String,
    },
    /// Delete every saved loan
    Clear,
    /// Write saved loans to a CSV file
    Export {
        #[arg(long, default_value = "saved_loans.csv")]
        file: String,
    },
}

pub fn run_saved(args: SavedArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = JsonFileLoanStore::open(&args.store);
    tracing::debug!(backend = store.backend_name(), path = %args.store, "opened loan store");

    match args.action {
        SavedAction::List => Ok(serde_json::to_value(store.list()?)?),
        SavedAction::Summary => Ok(serde_json::to_value(summarize_records(&store.list()?))?),
        SavedAction::Remove { id } => {
            let removed = store.remove(&id)?;
            if !removed {
                tracing::warn!(%id, "no saved loan with that id");
            }
            Ok(json!({ "id": id, "removed": removed }))
        }
        SavedAction::Clear => {
            store.clear()?;
            Ok(json!({ "cleared": true }))
        }
        SavedAction::Export { file } => {
            let records = store.list()?;
            let out = File::create(&file)
                .map_err(|e| format!("Failed to create '{}': {}", file, e))?;
            write_export_csv(out, &records)?;
            Ok(json!({ "exported": records.len(), "file": file }))
        }
    }
}

/// Persist a calculation when `--save` was given; returns the new record id.
pub fn save_if_requested(
    save: &SaveArgs,
    category: LoanCategory,
    terms: &LoanTerms,
    result: &LoanResult,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if !save.save {
        return Ok(None);
    }
    let record = SavedLoanRecord::from_result(
        save.label.as_deref().unwrap_or(""),
        category,
        terms,
        result,
    );
    let id = record.id.clone();
    JsonFileLoanStore::open(&save.store).append(record)?;
    tracing::info!(%id, store = %save.store, "loan saved");
    Ok(Some(id))
}

/// Saved loans as CSV with a fixed column order. Money to 2 dp.
pub fn write_export_csv<W: Write>(
    writer: W,
    records: &[SavedLoanRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPORT_HEADERS)?;
    for r in records {
        wtr.write_record([
            r.label.clone(),
            r.category.to_string(),
            r.amount.round_dp(2).to_string(),
            r.annual_rate_percent.normalize().to_string(),
            r.term_months.to_string(),
            r.monthly_payment.round_dp(2).to_string(),
            r.total_interest.round_dp(2).to_string(),
            r.total_payment.round_dp(2).to_string(),
            r.saved_at.to_rfc3339(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_calc_core::amortization::compute_schedule;
    use rust_decimal_macros::dec;

    #[test]
    fn test_export_column_order() {
        let terms = LoanTerms::new(dec!(300_000), dec!(12), 36);
        let result = compute_schedule(&terms).unwrap();
        let record = SavedLoanRecord::from_result("Bank A, promo", LoanCategory::Personal, &terms, &result);

        let mut buf = Vec::new();
        write_export_csv(&mut buf, &[record]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "label,category,amount,rate,term,monthly_payment,total_interest,total_payment,saved_at"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"Bank A, promo\",personal,300000,12,36,9964.29,58714.55,358714.55,"));
    }

    #[test]
    fn test_save_if_requested_writes_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.json");
        let save = SaveArgs {
            save: true,
            label: Some("Car deal".into()),
            store: path.to_str().unwrap().to_string(),
        };
        let terms = LoanTerms::new(dec!(500_000), dec!(4.5), 60);
        let result = compute_schedule(&terms).unwrap();

        let id = save_if_requested(&save, LoanCategory::Car, &terms, &result)
            .unwrap()
            .unwrap();
        let listed = JsonFileLoanStore::open(&path).list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].label, "Car deal");
    }

    #[test]
    fn test_save_not_requested_is_noop() {
        let save = SaveArgs {
            save: false,
            label: None,
            store: "unused.json".into(),
        };
        let terms = LoanTerms::new(dec!(1000), dec!(5), 12);
        let result = compute_schedule(&terms).unwrap();
        assert!(save_if_requested(&save, LoanCategory::Personal, &terms, &result)
            .unwrap()
            .is_none());
    }
}
