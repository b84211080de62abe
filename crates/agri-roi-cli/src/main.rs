mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::CatalogArgs;
use commands::roi::{CalculateArgs, CompareArgs, SensitivityArgs};

/// Farm automation investment ROI calculations
#[derive(Parser)]
#[command(
    name = "aroi",
    version,
    about = "Farm automation investment ROI calculations",
    long_about = "A CLI for evaluating farm automation investments with decimal \
                  precision. Computes effective investment after grants, annual net \
                  benefit, simple payback, ROI, NPV, and cumulative cash flow, and \
                  supports multi-option comparison and one-way sensitivity analysis."
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
    /// Evaluate one automation investment
    Calculate(CalculateArgs),
    /// Evaluate several options and rank them by payback, ROI, and NPV
    Compare(CompareArgs),
    /// Run a low/base/high sensitivity analysis on one investment
    Sensitivity(SensitivityArgs),
    /// Browse the built-in catalog of automation investment options
    Catalog(CatalogArgs),
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
        Commands::Calculate(args) => commands::roi::run_calculate(args),
        Commands::Compare(args) => commands::roi::run_compare(args),
        Commands::Sensitivity(args) => commands::roi::run_sensitivity(args),
        Commands::Catalog(args) => commands::catalog::run_catalog(args),
        Commands::Version => {
            println!("aroi {}", env!("CARGO_PKG_VERSION"));
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
