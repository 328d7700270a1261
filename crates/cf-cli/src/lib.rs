//! # cf-cli — Command Line Interface for the Fiscal Code Stack
//!
//! Provides the `cf` binary.
//!
//! ## Subcommands
//!
//! - `cf compute` — Derive a fiscal code from personal details.
//! - `cf lookup` — Resolve a place name to its cadastral code.
//! - `cf import` — Load the national places dataset into Postgres.
//!
//! The `compute` and `lookup` subcommands share the backend flags: a
//! `--places-file` lookup file, or a Postgres connection via
//! `--database-url` / the `DATABASE_URL` variable.

pub mod compute;
pub mod import;
pub mod lookup;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use cf_core::PlaceCodeResolver;
use cf_places::{connect_pool, JsonPlaceResolver, PgPlaceResolver};

/// Build a place resolver from the shared backend flags.
///
/// A lookup file wins when given; otherwise `--database-url` or the
/// `DATABASE_URL` variable selects Postgres.
pub async fn build_resolver(
    places_file: Option<&Path>,
    database_url: Option<&str>,
) -> Result<Arc<dyn PlaceCodeResolver>> {
    if let Some(path) = places_file {
        let resolver = JsonPlaceResolver::from_path(path)
            .with_context(|| format!("failed to load place lookup file: {}", path.display()))?;
        return Ok(Arc::new(resolver));
    }

    let url = match database_url {
        Some(url) => url.to_string(),
        None => std::env::var("DATABASE_URL").context(
            "no place backend selected: pass --places-file or --database-url, or set DATABASE_URL",
        )?,
    };
    let pool = connect_pool(&url)
        .await
        .context("database connection failed")?;
    Ok(Arc::new(PgPlaceResolver::new(pool)))
}
