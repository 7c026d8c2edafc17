use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::amortization::purchase::{self, FinancedPurchaseInput};
use loan_calc_core::amortization::schedule::{self, yearly_summary, LoanInput, ScheduleEntry};
use loan_calc_core::{LoanCategory, LoanTerms};

use super::saved::{save_if_requested, SaveArgs};
use crate::input;

/// Arguments for a personal loan
#[derive(Args)]
pub struct PersonalArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent (12 = 12% p.a.)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Add a year-by-year breakdown of the schedule
    #[arg(long)]
    pub yearly: bool,

    #[command(flatten)]
    pub save: SaveArgs,
}

/// Arguments for a home or car purchase financed after a down payment
#[derive(Args)]
pub struct PurchaseArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price of the home or vehicle
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment paid up front
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Add a year-by-year breakdown of the schedule
    #[arg(long)]
    pub yearly: bool,

    #[command(flatten)]
    pub save: SaveArgs,
}

pub fn run_personal(args: PersonalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = match input::file::read_input_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => LoanInput {
            category: LoanCategory::Personal,
            terms: LoanTerms::new(
                args.amount.ok_or("--amount is required (or provide --input)")?,
                args.rate.ok_or("--rate is required (or provide --input)")?,
                args.term.ok_or("--term is required (or provide --input)")?,
            ),
        },
    };

    let output = schedule::amortize(&loan_input)?;
    tracing::info!(
        category = %loan_input.category,
        monthly_payment = %output.result.monthly_payment.round_dp(2),
        "loan computed"
    );

    let saved_id = save_if_requested(
        &args.save,
        loan_input.category,
        &loan_input.terms,
        &output.result,
    )?;

    let schedule = output.result.schedule.clone();
    let mut value = serde_json::to_value(output)?;
    decorate(&mut value, &schedule, args.yearly, saved_id);
    Ok(value)
}

pub fn run_home(args: PurchaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_purchase(args, LoanCategory::Home)
}

pub fn run_car(args: PurchaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_purchase(args, LoanCategory::Car)
}

fn run_purchase(
    args: PurchaseArgs,
    category: LoanCategory,
) -> Result<Value, Box<dyn std::error::Error>> {
    let purchase_input: FinancedPurchaseInput =
        match input::file::read_input_or_stdin::<FinancedPurchaseInput>(args.input.as_deref())? {
            // The subcommand decides the category, whatever the file says.
            Some(parsed) => FinancedPurchaseInput { category, ..parsed },
            None => FinancedPurchaseInput {
                category,
                purchase_price: args.price.ok_or("--price is required (or provide --input)")?,
                down_payment: args.down_payment,
                annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
                term_months: args.term.ok_or("--term is required (or provide --input)")?,
            },
        };

    let output = purchase::finance_purchase(&purchase_input)?;
    tracing::info!(
        %category,
        loan_to_value = %output.result.loan_to_value_percent.round_dp(2),
        monthly_payment = %output.result.loan.monthly_payment.round_dp(2),
        "purchase financed"
    );

    let saved_id = save_if_requested(
        &args.save,
        category,
        &purchase_input.loan_terms(),
        &output.result.loan,
    )?;

    let schedule = output.result.loan.schedule.clone();
    let mut value = serde_json::to_value(output)?;
    decorate(&mut value, &schedule, args.yearly, saved_id);
    Ok(value)
}

/// Attach the optional yearly breakdown and saved record id to an envelope.
fn decorate(value: &mut Value, schedule: &[ScheduleEntry], yearly: bool, saved_id: Option<String>) {
    let Value::Object(map) = value else {
        return;
    };
    if yearly {
        if let Ok(years) = serde_json::to_value(yearly_summary(schedule)) {
            map.insert("yearly_summary".into(), years);
        }
    }
    if let Some(id) = saved_id {
        map.insert("saved_id".into(), Value::String(id));
    }
}
