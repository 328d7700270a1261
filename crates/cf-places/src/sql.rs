//! # Postgres Resolver
//!
//! Place resolution backed by the `places` table seeded by
//! [`crate::import`]. Matching is a case-insensitive exact comparison on
//! the place name, taking the first row when homonymous places exist.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use cf_core::{PlaceCode, PlaceCodeResolver, ResolveError};

/// Connect a pool with the service's standard sizing and timeouts.
///
/// # Errors
///
/// Returns the underlying [`sqlx::Error`] if no connection can be
/// established within the acquire timeout.
pub async fn connect_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Place resolver that queries the `places` table.
#[derive(Debug, Clone)]
pub struct PgPlaceResolver {
    pool: PgPool,
}

impl PgPlaceResolver {
    /// Wrap an already-connected pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for health checks and imports.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PlaceCodeResolver for PgPlaceResolver {
    async fn resolve(&self, place_name: &str) -> Result<Option<PlaceCode>, ResolveError> {
        let row: Option<String> = sqlx::query_scalar(
            "SELECT cadastral_code FROM places WHERE lower(name) = lower($1) LIMIT 1",
        )
        .bind(place_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ResolveError::Backend {
            reason: e.to_string(),
        })?;

        match row {
            None => Ok(None),
            Some(code) => {
                let code = PlaceCode::new(code).map_err(|e| ResolveError::CorruptRecord {
                    name: place_name.to_string(),
                    reason: e.to_string(),
                })?;
                Ok(Some(code))
            }
        }
    }
}
