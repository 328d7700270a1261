//! # Service Bootstrap
//!
//! Turns an [`AppConfig`] into a ready [`AppState`]: loads the control
//! tables, wires the configured place backend, and (for Postgres) runs
//! the optional dataset seed. Every failure here is a deployment problem
//! and aborts startup.

use std::sync::Arc;

use thiserror::Error;

use cf_core::{ControlTableError, ControlTables, FiscalCodeService};
use cf_places::{
    connect_pool, import_dataset, ImportError, JsonPlaceResolver, LookupFileError, PgPlaceResolver,
};

use crate::state::{AppConfig, AppState, ConfigError, PlacesProvider};

/// Errors assembling the service at startup.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// The configuration is incomplete for the selected provider.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The control-table definition override could not be loaded.
    #[error("control table definition could not be loaded: {0}")]
    ControlTables(#[from] ControlTableError),

    /// The place lookup file could not be loaded.
    #[error("place lookup file could not be loaded: {0}")]
    LookupFile(#[from] LookupFileError),

    /// Postgres connection failed.
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    /// The startup dataset seed failed.
    #[error("dataset seed failed: {0}")]
    Seed(#[from] ImportError),
}

/// Build the application state for a configuration.
///
/// # Errors
///
/// Any [`BootstrapError`]; callers should log it and exit.
pub async fn build_state(config: &AppConfig) -> Result<AppState, BootstrapError> {
    let tables = match &config.control_tables_file {
        Some(path) => {
            let tables = ControlTables::from_path(path)?;
            tracing::info!(path = %path.display(), "Loaded control table override");
            tables
        }
        None => ControlTables::reference(),
    };

    match config.provider {
        PlacesProvider::Json => {
            let path = config
                .places_file
                .as_ref()
                .ok_or(ConfigError::MissingPlacesFile)?;
            let resolver = JsonPlaceResolver::from_path(path)?;
            tracing::info!(places = resolver.len(), "Loaded place lookup file");

            let service = FiscalCodeService::new(Arc::new(resolver), tables);
            Ok(AppState::new(service, None))
        }
        PlacesProvider::Postgres => {
            let url = config
                .database_url
                .as_ref()
                .ok_or(ConfigError::MissingDatabaseUrl)?;
            let pool = connect_pool(url).await?;
            tracing::info!("Connected to PostgreSQL");

            if let Some(dataset) = &config.seed_dataset {
                let imported = import_dataset(&pool, dataset).await?;
                tracing::info!(imported, "Seeded places table from dataset");
            }

            let resolver = PgPlaceResolver::new(pool.clone());
            let service = FiscalCodeService::new(Arc::new(resolver), tables);
            Ok(AppState::new(service, Some(pool)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_config(places_file: std::path::PathBuf) -> AppConfig {
        AppConfig {
            provider: PlacesProvider::Json,
            places_file: Some(places_file),
            database_url: None,
            seed_dataset: None,
            control_tables_file: None,
            port: 8080,
        }
    }

    #[tokio::test]
    async fn builds_json_provider_state_from_a_lookup_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.json");
        std::fs::write(&path, r#"[{ "nome": "Roma", "codiceCatastale": "H501" }]"#).unwrap();

        let state = build_state(&json_config(path)).await.unwrap();
        assert!(state.db_pool.is_none());
    }

    #[tokio::test]
    async fn missing_lookup_file_fails_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_state(&json_config(dir.path().join("missing.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::LookupFile(_)));
    }

    #[tokio::test]
    async fn json_provider_without_a_file_path_fails_bootstrap() {
        let mut config = json_config(std::path::PathBuf::new());
        config.places_file = None;
        let err = build_state(&config).await.unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::Config(ConfigError::MissingPlacesFile)
        ));
    }

    #[tokio::test]
    async fn malformed_control_table_override_fails_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let places = dir.path().join("places.json");
        std::fs::write(&places, "[]").unwrap();
        let tables = dir.path().join("tables.json");
        std::fs::write(&tables, "{ not json }").unwrap();

        let mut config = json_config(places);
        config.control_tables_file = Some(tables);
        let err = build_state(&config).await.unwrap_err();
        assert!(matches!(err, BootstrapError::ControlTables(_)));
    }
}
