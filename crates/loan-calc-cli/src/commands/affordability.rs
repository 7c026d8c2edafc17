use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::affordability::dsr::{self, AffordabilityInput};
use loan_calc_core::affordability::AffordabilityPolicy;

use crate::input;

/// Arguments for the affordability check
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AffordabilityArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON/YAML lending policy (debt-service cap, risk thresholds)
    #[arg(long)]
    pub policy: Option<String>,

    /// Gross monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Other monthly income
    #[arg(long, default_value = "0")]
    pub other_income: Decimal,

    /// Monthly living expenses
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Existing monthly debt repayments
    #[arg(long, default_value = "0")]
    pub debts: Decimal,

    /// Annual interest rate in percent for the prospective loan
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months for the prospective loan
    #[arg(long)]
    pub term: Option<u32>,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let policy: AffordabilityPolicy = match args.policy {
        Some(ref path) => input::file::read_input(path)?,
        None => AffordabilityPolicy::default(),
    };

    let afford_input: AffordabilityInput =
        match input::file::read_input_or_stdin(args.input.as_deref())? {
            Some(parsed) => parsed,
            None => AffordabilityInput {
                monthly_income: args
                    .income
                    .ok_or("--income is required (or provide --input)")?,
                other_income: args.other_income,
                monthly_expenses: args
                    .expenses
                    .ok_or("--expenses is required (or provide --input)")?,
                existing_debt_payments: args.debts,
                annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
                term_months: args.term.ok_or("--term is required (or provide --input)")?,
            },
        };

    let output = dsr::analyze_affordability(&afford_input, &policy)?;
    tracing::info!(
        tier = ?output.result.risk_tier,
        projected_dsr = %output.result.projected_dsr.round_dp(2),
        "affordability assessed"
    );
    Ok(serde_json::to_value(output)?)
}
