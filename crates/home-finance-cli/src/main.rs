mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::financing::{
    CompareDebtRatioArgs, CompareValueArgs, PrefillArgs, RecommendArgs, SimulateArgs,
};

/// Personal real-estate financing simulations
#[derive(Parser)]
#[command(
    name = "hfs",
    version,
    about = "Personal real-estate financing simulations",
    long_about = "A CLI for simulating personal real-estate financing with decimal \
                  precision. Computes amortized monthly payments, fee totals and \
                  debt-to-income ratios, recommends a purchase envelope from a \
                  target monthly payment, and generates the comparison series \
                  behind the payment charts."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a financing simulation (monthly payment, totals, debt-to-income)
    Simulate(SimulateArgs),
    /// Recommend a purchase envelope from a target monthly payment
    Recommend(RecommendArgs),
    /// Sweep payments against proportionally scaled property values
    CompareValue(CompareValueArgs),
    /// Sweep payments against the resulting debt-to-income ratios
    CompareDebtRatio(CompareDebtRatioArgs),
    /// Prefill a financing input from income, price, rate and term
    Prefill(PrefillArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::financing::run_simulate(args),
        Commands::Recommend(args) => commands::financing::run_recommend(args),
        Commands::CompareValue(args) => commands::financing::run_compare_value(args),
        Commands::CompareDebtRatio(args) => commands::financing::run_compare_debt_ratio(args),
        Commands::Prefill(args) => commands::financing::run_prefill(args),
        Commands::Version => {
            println!("hfs {}", env!("CARGO_PKG_VERSION"));
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
