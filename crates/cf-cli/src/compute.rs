//! # Compute Subcommand
//!
//! Runs the full fiscal code pipeline from the command line against
//! either place backend and prints the 16-character code.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};

use cf_core::{ControlTables, FiscalCode, FiscalCodeService, PersonInput, Sex};

/// Arguments for the `cf compute` subcommand.
#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Family name.
    #[arg(long)]
    pub family_name: String,

    /// Given name.
    #[arg(long)]
    pub given_name: String,

    /// Birth date, ISO format (YYYY-MM-DD).
    #[arg(long)]
    pub birth_date: NaiveDate,

    /// Sex as registered at birth.
    #[arg(long)]
    pub sex: SexArg,

    /// Birth place name, matched case-insensitively.
    #[arg(long)]
    pub birth_place: String,

    /// Place lookup file (JSON array of {nome, codiceCatastale}).
    #[arg(long, conflicts_with = "database_url")]
    pub places_file: Option<PathBuf>,

    /// Postgres connection string; falls back to DATABASE_URL.
    #[arg(long)]
    pub database_url: Option<String>,

    /// Control-table definition overriding the compiled-in reference.
    #[arg(long)]
    pub control_tables_file: Option<PathBuf>,

    /// Print the result as a JSON object.
    #[arg(long)]
    pub json: bool,
}

/// Sex values accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SexArg {
    /// Encodes the day of birth unchanged.
    Male,
    /// Adds the 40-day offset to the day of birth.
    Female,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

/// Execute the compute subcommand.
pub async fn run_compute(args: &ComputeArgs) -> Result<u8> {
    let code = compute_code(args).await?;

    if args.json {
        println!("{}", serde_json::json!({ "fiscal_code": code.as_str() }));
    } else {
        println!("{code}");
    }
    Ok(0)
}

/// Assemble the service for the selected backend and run the pipeline.
async fn compute_code(args: &ComputeArgs) -> Result<FiscalCode> {
    let tables = match &args.control_tables_file {
        Some(path) => ControlTables::from_path(path)
            .with_context(|| format!("failed to load control tables: {}", path.display()))?,
        None => ControlTables::reference(),
    };

    let resolver =
        crate::build_resolver(args.places_file.as_deref(), args.database_url.as_deref()).await?;
    let service = FiscalCodeService::new(resolver, tables);

    let input = PersonInput {
        family_name: args.family_name.clone(),
        given_name: args.given_name.clone(),
        birth_date: args.birth_date,
        birth_place: args.birth_place.clone(),
        sex: args.sex.into(),
    };

    Ok(service.compute(&input).await?)
}
