//! # cf-api — Axum API Service for Fiscal Code Computation
//!
//! HTTP front end over [`cf_core`]: one computation endpoint, pluggable
//! place resolution behind it, health probes, and a generated OpenAPI
//! document.
//!
//! ## API Surface
//!
//! | Route                  | Module                   | Purpose                 |
//! |------------------------|--------------------------|-------------------------|
//! | `POST /v1/fiscal-code` | [`routes::fiscal_code`]  | Compute a fiscal code   |
//! | `GET /openapi.json`    | [`openapi`]              | OpenAPI document        |
//! | `GET /health/liveness` | (this module)            | Process liveness        |
//! | `GET /health/readiness`| (this module)            | Dependency readiness    |
//!
//! ## Place backends
//!
//! Selected at startup via `CF_PLACES_PROVIDER` (see [`state::AppConfig`]
//! and [`bootstrap`]): a static JSON lookup file or a Postgres `places`
//! table, both implementing [`cf_core::PlaceCodeResolver`].

pub mod bootstrap;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router.
///
/// Health probes are mounted beside the API routes; everything shares
/// one [`AppState`] and the HTTP trace layer.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::fiscal_code::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .with_state(state);

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the application is ready to serve traffic.
///
/// Pings the database when the Postgres provider is active; the lookup
/// file backend is fully loaded at startup and has no runtime dependency
/// to check.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }
    (StatusCode::OK, "ready").into_response()
}
