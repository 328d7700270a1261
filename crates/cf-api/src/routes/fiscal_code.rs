//! # Fiscal Code Computation Route
//!
//! `POST /v1/fiscal-code` — the service's single write-shaped operation.
//! The handler validates presence of the free-text fields, hands the
//! typed input to [`cf_core::FiscalCodeService`], and maps pipeline
//! failures through [`AppError`] (unknown place stays a user-facing 422,
//! resolver failures collapse into an opaque 500).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use cf_core::{PersonInput, Sex};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Build the fiscal code router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/fiscal-code", post(compute_fiscal_code))
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request to compute a fiscal code from personal details.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ComputeRequest {
    /// Family name. Free text; non-letters are ignored by the encoding.
    pub family_name: String,
    /// Given name.
    pub given_name: String,
    /// Birth date, ISO `YYYY-MM-DD`.
    pub birth_date: NaiveDate,
    /// Birth place name, matched case-insensitively against the
    /// configured place backend.
    pub birth_place: String,
    /// Sex as registered at birth: `"male"` or `"female"`.
    #[schema(value_type = String, example = "male")]
    pub sex: Sex,
}

/// Computed fiscal code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComputeResponse {
    /// The 16-character fiscal code.
    pub fiscal_code: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl Validate for ComputeRequest {
    fn validate(&self) -> Result<(), String> {
        if self.family_name.trim().is_empty() {
            return Err("family_name must not be empty".into());
        }
        if self.family_name.len() > 200 {
            return Err("family_name must not exceed 200 characters".into());
        }
        if self.given_name.trim().is_empty() {
            return Err("given_name must not be empty".into());
        }
        if self.given_name.len() > 200 {
            return Err("given_name must not exceed 200 characters".into());
        }
        if self.birth_place.trim().is_empty() {
            return Err("birth_place must not be empty".into());
        }
        if self.birth_place.len() > 200 {
            return Err("birth_place must not exceed 200 characters".into());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /v1/fiscal-code — Compute the fiscal code for one person.
#[utoipa::path(
    post,
    path = "/v1/fiscal-code",
    request_body = ComputeRequest,
    responses(
        (status = 200, description = "Computed fiscal code", body = ComputeResponse),
        (status = 422, description = "Validation failure or unknown birth place", body = ErrorBody),
        (status = 500, description = "Place backend failure", body = ErrorBody),
    ),
    tag = "fiscal-code"
)]
async fn compute_fiscal_code(
    State(state): State<AppState>,
    body: Result<Json<ComputeRequest>, JsonRejection>,
) -> Result<Json<ComputeResponse>, AppError> {
    let req = extract_validated_json(body)?;

    let input = PersonInput {
        family_name: req.family_name,
        given_name: req.given_name,
        birth_date: req.birth_date,
        birth_place: req.birth_place,
        sex: req.sex,
    };

    let code = state.service.compute(&input).await?;
    tracing::debug!(birth_place = %input.birth_place, "Computed fiscal code");

    Ok(Json(ComputeResponse {
        fiscal_code: code.to_string(),
    }))
}
