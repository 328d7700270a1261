//! # National Dataset Import
//!
//! Seeds the `places` table from the national places dataset (the full
//! per-municipality records parsed by [`crate::dataset`]).
//!
//! The import is a wholesale replacement: inside one transaction the
//! table is emptied and every record re-inserted, so readers never
//! observe a half-loaded dataset and a failed import leaves the previous
//! contents untouched.

use std::path::Path;

use sqlx::PgPool;
use thiserror::Error;

use crate::dataset::{parse_dataset, PlaceRecord};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

const CREATE_PLACES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS places (
    istat_code            TEXT PRIMARY KEY,
    name                  TEXT NOT NULL,
    zone_code             TEXT NOT NULL,
    zone_name             TEXT NOT NULL,
    region_code           TEXT NOT NULL,
    region_name           TEXT NOT NULL,
    province_code         TEXT NOT NULL,
    province_name         TEXT NOT NULL,
    province_abbreviation TEXT NOT NULL,
    cadastral_code        TEXT NOT NULL,
    postal_code           TEXT,
    population            BIGINT NOT NULL
)
"#;

const CREATE_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS places_lower_name_idx ON places (lower(name))";

/// Create the `places` table and its lookup index if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PLACES_TABLE).execute(pool).await?;
    sqlx::query(CREATE_NAME_INDEX).execute(pool).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Errors importing the national dataset.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The dataset file could not be read.
    #[error("dataset file could not be read from {path}: {source}")]
    Io {
        /// Path the dataset was expected at.
        path: String,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not a JSON array of place records.
    #[error("dataset file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The database rejected the schema or the rows.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Replace the contents of the `places` table with `records`.
///
/// Uses a transaction so the delete + insert is atomic. Returns the
/// number of rows inserted.
pub async fn reseed(pool: &PgPool, records: &[PlaceRecord]) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM places").execute(&mut *tx).await?;

    for record in records {
        sqlx::query(
            "INSERT INTO places (istat_code, name, zone_code, zone_name, region_code, \
             region_name, province_code, province_name, province_abbreviation, \
             cadastral_code, postal_code, population) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(&record.istat_code)
        .bind(&record.name)
        .bind(&record.zone.code)
        .bind(&record.zone.name)
        .bind(&record.region.code)
        .bind(&record.region.name)
        .bind(&record.province.code)
        .bind(&record.province.name)
        .bind(&record.province_abbreviation)
        .bind(&record.cadastral_code)
        .bind(record.primary_postal_code())
        .bind(record.population)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(records.len() as u64)
}

/// Read, parse, and load a dataset file end to end.
///
/// Creates the schema if needed, then atomically replaces the table
/// contents. Returns the number of places loaded.
///
/// # Errors
///
/// [`ImportError::Io`] if the file cannot be read,
/// [`ImportError::Malformed`] if it does not parse, and
/// [`ImportError::Database`] for schema or insert failures.
pub async fn import_dataset(pool: &PgPool, path: &Path) -> Result<u64, ImportError> {
    let json = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = parse_dataset(&json)?;
    tracing::info!(records = records.len(), "Parsed national places dataset");

    ensure_schema(pool).await?;
    let inserted = reseed(pool, &records).await?;
    tracing::info!(inserted, "Places table reseeded");

    Ok(inserted)
}
