//! # Import Subcommand
//!
//! Loads a place dataset file into Postgres, replacing whatever the
//! `places` table currently holds.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cf_places::{connect_pool, import_dataset};

/// Arguments for the `cf import` subcommand.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Dataset file (JSON array of place records).
    #[arg(long)]
    pub dataset: PathBuf,

    /// Postgres connection string; falls back to DATABASE_URL.
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Execute the import subcommand.
pub async fn run_import(args: &ImportArgs) -> Result<u8> {
    let url = match &args.database_url {
        Some(url) => url.clone(),
        None => std::env::var("DATABASE_URL")
            .context("no database selected: pass --database-url or set DATABASE_URL")?,
    };

    let pool = connect_pool(&url).await.context("database connection failed")?;
    let imported = import_dataset(&pool, &args.dataset)
        .await
        .with_context(|| format!("failed to import dataset: {}", args.dataset.display()))?;

    println!("imported {imported} places");
    Ok(0)
}
