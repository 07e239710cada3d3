//! globefin CLI - build normalized tables and query them
//!
//! ## Example Usage
//!
//! ```bash
//! # Build both tables from the raw World Bank exports
//! globefin build
//!
//! # Only rebuild the inflation table
//! globefin build --only inflation
//!
//! # Query the tables
//! globefin exchange-rate SGD INR
//! globefin inflation USD
//!
//! # Print tool definitions for an agent runtime
//! globefin tools
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use globefin::prelude::*;
use globefin::tools;
use std::path::PathBuf;
use std::process;

/// globefin: exchange rate and inflation history for USD, SGD and INR
#[derive(Parser)]
#[command(name = "globefin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Exchange rate and inflation history for USD, SGD and INR", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build normalized tables from the raw indicator exports
    Build {
        /// Build only one table
        #[arg(long, value_enum)]
        only: Option<Table>,
    },

    /// Print exchange rate history for a currency pair as JSON
    ExchangeRate {
        /// Currency to convert from (USD, SGD, INR)
        #[arg(value_name = "FROM")]
        from: String,

        /// Currency to convert to (USD, SGD, INR)
        #[arg(value_name = "TO")]
        to: String,
    },

    /// Print inflation history for a currency as JSON
    Inflation {
        /// Currency (USD, SGD, INR)
        #[arg(value_name = "CURRENCY")]
        currency: String,
    },

    /// Print the agent tool definitions as JSON
    Tools,
}

#[derive(Clone, Copy, ValueEnum)]
enum Table {
    Exchange,
    Inflation,
}

impl From<Table> for PipelineKind {
    fn from(table: Table) -> Self {
        match table {
            Table::Exchange => PipelineKind::ExchangeRate,
            Table::Inflation => PipelineKind::Inflation,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = GlobefinConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")
        .and_then(|config| {
            if cli.verbose {
                println!("{} v{}", "globefin".cyan().bold(), env!("CARGO_PKG_VERSION"));
                println!(
                    "Output dir: {}",
                    config.output_dir.display().to_string().dimmed()
                );
            }

            match cli.command {
                Commands::Build { only } => build(&config, only),
                Commands::ExchangeRate { from, to } => {
                    let service = QueryService::from_config(&config);
                    print_json(&service.exchange_rate_history(&from, &to)?)
                }
                Commands::Inflation { currency } => {
                    let service = QueryService::from_config(&config);
                    print_json(&service.inflation_rate_history(&currency)?)
                }
                Commands::Tools => print_json(&tools::definitions()),
            }
        });

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn build(config: &GlobefinConfig, only: Option<Table>) -> anyhow::Result<()> {
    let kinds: Vec<PipelineKind> = match only {
        Some(table) => vec![table.into()],
        None => PipelineKind::ALL.to_vec(),
    };

    let mut failures = 0;
    for kind in kinds {
        match kind.run(&kind.config(config)) {
            Ok(report) => println!(
                "{} {} table: {} years ({}-{}) -> {}",
                "✓".green().bold(),
                kind,
                report.rows,
                report.first_year,
                report.last_year,
                report.output.display()
            ),
            Err(e) => {
                failures += 1;
                eprintln!("{} {} table: {}", "✗".red().bold(), kind, e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} pipeline(s) failed", failures);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
