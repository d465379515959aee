mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::fees::FeesArgs;
use commands::finance::FinanceArgs;
use commands::lease::LeaseArgs;

/// Vehicle lease and finance deal calculator
#[derive(Parser)]
#[command(
    name = "dealcalc",
    version,
    about = "Vehicle lease and finance deal calculator",
    long_about = "Prices vehicle leases (money factor, residual, tax policy, zero drive-off) \
                  and retail installment loans with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Fee schedule file (JSON or YAML) replacing the built-in make table
    #[arg(long, global = true)]
    fees: Option<String>,

    /// Log calculation steps to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a vehicle lease
    Lease(LeaseArgs),
    /// Price a retail installment loan
    Finance(FinanceArgs),
    /// Show lender acquisition and disposition fees
    Fees(FeesArgs),
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

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let schedule = match commands::fees::load_schedule(cli.fees.as_deref()) {
        Ok(schedule) => schedule,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Lease(args) => commands::lease::run_lease(args, &schedule),
        Commands::Finance(args) => commands::finance::run_finance(args),
        Commands::Fees(args) => commands::fees::run_fees(args, &schedule),
        Commands::Version => {
            println!("dealcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
