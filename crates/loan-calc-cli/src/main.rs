mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::affordability::AffordabilityArgs;
use commands::compare::CompareArgs;
use commands::loan::{PersonalArgs, PurchaseArgs};
use commands::saved::SavedArgs;

/// Personal, home and car loan calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Personal, home and car loan calculations",
    long_about = "A CLI for level-payment loan calculations with decimal precision. \
                  Produces amortisation schedules, financed purchases, affordability \
                  checks against a debt-service cap, offer comparisons, and keeps a \
                  local file of saved loans."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Amortise a personal loan
    Personal(PersonalArgs),
    /// Finance a home purchase after a down payment
    Home(PurchaseArgs),
    /// Finance a car purchase after a down payment
    Car(PurchaseArgs),
    /// Largest affordable loan and debt-service risk tier
    Affordability(AffordabilityArgs),
    /// Compare loan offers by total repayment
    Compare(CompareArgs),
    /// Manage saved loans
    Saved(SavedArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "loancalc=debug,loan_calc_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the result, so logs go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Personal(args) => commands::loan::run_personal(args),
        Commands::Home(args) => commands::loan::run_home(args),
        Commands::Car(args) => commands::loan::run_car(args),
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Saved(args) => commands::saved::run_saved(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
