use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::comparison::options::{ComparisonInput, ComparisonOptionInput};
use loan_calc_core::comparison::compare_loans;

use crate::input;

/// Arguments for side-by-side loan comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML input file with an `options` list
    #[arg(long)]
    pub input: Option<String>,

    /// Loan offer as LABEL:AMOUNT:RATE:TERM (repeatable)
    #[arg(long = "option", value_parser = parse_option)]
    pub options: Vec<ComparisonOptionInput>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: ComparisonInput = if !args.options.is_empty() {
        ComparisonInput {
            options: args.options,
        }
    } else {
        input::file::read_input_or_stdin(args.input.as_deref())?
            .ok_or("provide --option at least once, or --input")?
    };

    let output = compare_loans(&cmp_input)?;
    tracing::info!(
        options = output.result.rows.len(),
        best = ?output.result.best_option_id,
        "loans compared"
    );
    Ok(serde_json::to_value(output)?)
}

/// Parse `LABEL:AMOUNT:RATE:TERM`. The label may itself contain colons.
fn parse_option(raw: &str) -> Result<ComparisonOptionInput, String> {
    let mut parts = raw.rsplitn(4, ':');
    let term = parts.next();
    let rate = parts.next();
    let amount = parts.next();
    let label = parts.next();

    let (Some(label), Some(amount), Some(rate), Some(term)) = (label, amount, rate, term) else {
        return Err(format!("expected LABEL:AMOUNT:RATE:TERM, got '{raw}'"));
    };

    Ok(ComparisonOptionInput {
        label: label.trim().to_string(),
        principal: amount
            .trim()
            .parse::<Decimal>()
            .map_err(|e| format!("invalid amount '{amount}': {e}"))?,
        annual_rate_percent: rate
            .trim()
            .parse::<Decimal>()
            .map_err(|e| format!("invalid rate '{rate}': {e}"))?,
        term_months: term
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid term '{term}': {e}"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_option() {
        let opt = parse_option("Bank A: promo:500000:9.5:48").unwrap();
        assert_eq!(opt.label, "Bank A: promo");
        assert_eq!(opt.principal, dec!(500000));
        assert_eq!(opt.annual_rate_percent, dec!(9.5));
        assert_eq!(opt.term_months, 48);
    }

    #[test]
    fn test_parse_option_rejects_short_form() {
        assert!(parse_option("500000:9.5:48").is_err());
        assert!(parse_option("A:lots:9.5:48").is_err());
    }

    #[test]
    fn test_compare_from_flags_picks_cheapest() {
        let value = run_compare(CompareArgs {
            input: None,
            options: vec![
                parse_option("Bank A:500000:10:48").unwrap(),
                parse_option("Bank B:500000:8:48").unwrap(),
            ],
        })
        .unwrap();
        assert_eq!(value["result"]["best_option_id"], "opt-2");
        assert_eq!(value["result"]["rows"].as_array().unwrap().len(), 2);
    }
}
