pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch a command result to the chosen formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Round decimal strings to cents for display. Other strings pass through.
pub(crate) fn display_money(raw: &str) -> String {
    match raw.parse::<rust_decimal::Decimal>() {
        Ok(d) if d.scale() > 2 => d.round_dp(2).to_string(),
        _ => raw.to_string(),
    }
}
