//! # cf
//!
//! Command-line front end for the fiscal code pipeline.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cf_cli::compute::{run_compute, ComputeArgs};
use cf_cli::import::{run_import, ImportArgs};
use cf_cli::lookup::{run_lookup, LookupArgs};

#[derive(Parser, Debug)]
#[command(name = "cf", version = "0.3.2", about = "Italian fiscal code tooling", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a fiscal code from personal details.
    Compute(ComputeArgs),
    /// Resolve a place name to its cadastral code.
    Lookup(LookupArgs),
    /// Load a place dataset into Postgres.
    Import(ImportArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let outcome = match &cli.command {
        Commands::Compute(args) => run_compute(args).await,
        Commands::Lookup(args) => run_lookup(args).await,
        Commands::Import(args) => run_import(args).await,
    };

    match outcome {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
