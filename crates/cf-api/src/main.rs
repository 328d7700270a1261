//! Binary entry point for the fiscal code API service.
//!
//! Reads configuration from the environment, bootstraps the configured
//! place backend, and serves the router. Any bootstrap failure is fatal.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cf_api::state::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid service configuration")?;
    let state = cf_api::bootstrap::build_state(&config)
        .await
        .context("service bootstrap failed")?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "cf-api listening");

    axum::serve(listener, cf_api::app(state))
        .await
        .context("server error")
}
