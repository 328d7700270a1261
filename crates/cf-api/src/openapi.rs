//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
///
/// Registers the documented routes, schemas, and tags. Serves as the
/// single source of truth for integrators.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CF API — Fiscal Code Service",
        version = "0.3.2",
        description = "Computes the 16-character Italian fiscal code from personal details.\n\nThe code is derived deterministically from family name, given name, birth date, sex, and birth place; the birth place is resolved to its cadastral code by the configured backend (static lookup file or Postgres).\n\nHealth probes (`/health/*`) are unauthenticated.",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::fiscal_code::compute_fiscal_code,
    ),
    components(
        schemas(
            crate::routes::fiscal_code::ComputeRequest,
            crate::routes::fiscal_code::ComputeResponse,
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
        ),
    ),
    tags(
        (name = "fiscal-code", description = "Fiscal code computation from personal details"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
