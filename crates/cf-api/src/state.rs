//! # Application State & Configuration
//!
//! Deployment configuration read from the environment, and the shared
//! state handed to every route handler.
//!
//! Configuration errors are startup-fatal: the service refuses to boot
//! with an unknown provider or a provider whose required settings are
//! absent, rather than booting into a state where every request fails.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use cf_core::FiscalCodeService;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Errors reading deployment configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `CF_PLACES_PROVIDER` is absent.
    #[error("CF_PLACES_PROVIDER is not set (expected \"json\" or \"postgres\")")]
    MissingProvider,

    /// `CF_PLACES_PROVIDER` holds a value this service does not know.
    #[error("unknown places provider {0:?} (expected \"json\" or \"postgres\")")]
    UnknownProvider(String),

    /// The `json` provider is selected without a lookup file.
    #[error("CF_PLACES_FILE must be set when CF_PLACES_PROVIDER is \"json\"")]
    MissingPlacesFile,

    /// The `postgres` provider is selected without a connection string.
    #[error("DATABASE_URL must be set when CF_PLACES_PROVIDER is \"postgres\"")]
    MissingDatabaseUrl,

    /// `CF_PORT` is not a valid TCP port number.
    #[error("CF_PORT is not a valid port number: {0:?}")]
    InvalidPort(String),
}

/// Which place-resolution backend the deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacesProvider {
    /// Static lookup file (`CF_PLACES_FILE`).
    Json,
    /// Postgres `places` table (`DATABASE_URL`).
    Postgres,
}

impl FromStr for PlacesProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "postgres" => Ok(Self::Postgres),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

/// Deployment configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Selected place-resolution backend.
    pub provider: PlacesProvider,
    /// Lookup file path; required by the `json` provider.
    pub places_file: Option<PathBuf>,
    /// Postgres connection string; required by the `postgres` provider.
    pub database_url: Option<String>,
    /// National dataset to import at startup, when set.
    pub seed_dataset: Option<PathBuf>,
    /// Control-table definition overriding the compiled-in reference.
    pub control_tables_file: Option<PathBuf>,
    /// Listen port.
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Recognized variables: `CF_PLACES_PROVIDER` (required, `json` or
    /// `postgres`), `CF_PLACES_FILE`, `DATABASE_URL`, `CF_SEED_DATASET`,
    /// `CF_CONTROL_TABLES_FILE`, `CF_PORT` (default 8080).
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]; all of them should abort startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider: PlacesProvider = match std::env::var("CF_PLACES_PROVIDER") {
            Ok(raw) => raw.parse()?,
            Err(_) => return Err(ConfigError::MissingProvider),
        };

        let places_file = std::env::var("CF_PLACES_FILE").ok().map(PathBuf::from);
        let database_url = std::env::var("DATABASE_URL").ok();

        match provider {
            PlacesProvider::Json if places_file.is_none() => {
                return Err(ConfigError::MissingPlacesFile)
            }
            PlacesProvider::Postgres if database_url.is_none() => {
                return Err(ConfigError::MissingDatabaseUrl)
            }
            _ => {}
        }

        let port = match std::env::var("CF_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            provider,
            places_file,
            database_url,
            seed_dataset: std::env::var("CF_SEED_DATASET").ok().map(PathBuf::from),
            control_tables_file: std::env::var("CF_CONTROL_TABLES_FILE")
                .ok()
                .map(PathBuf::from),
            port,
        })
    }
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The fiscal code computation service.
    pub service: Arc<FiscalCodeService>,
    /// Postgres pool, present when the `postgres` provider is active.
    /// Used by the readiness probe.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Assemble state from a built service and an optional pool.
    pub fn new(service: FiscalCodeService, db_pool: Option<PgPool>) -> Self {
        Self {
            service: Arc::new(service),
            db_pool,
        }
    }
}
