//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from cf-core to HTTP status codes and returns JSON
//! error response bodies with error code, message, and details. Never
//! exposes internal error details in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use cf_core::FiscalCodeError;

/// Structured JSON error response body.
///
/// All error responses use this format. The `details` field carries
/// additional context for 422 validation errors but is omitted for
/// 500-class errors to prevent information leakage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "PLACE_NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`].
///
/// The place-not-found case is deliberately its own variant: it is the
/// one domain failure a caller can correct (fix the place name), so it
/// gets a distinct code and keeps its message, unlike system failures
/// which collapse into an opaque 500.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (422).
    ///
    /// Normalized with `Validation` to 422 Unprocessable Entity: the
    /// client sent syntactically valid HTTP but semantically invalid
    /// content. Only malformed HTTP framing is 400.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The birth place matched no known place (422).
    #[error("birth place {0:?} does not match any known place")]
    PlaceNotFound(String),

    /// Internal server error (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED"),
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::PlaceNotFound(_) => (StatusCode::UNPROCESSABLE_ENTITY, "PLACE_NOT_FOUND"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert pipeline errors to API errors.
///
/// `PlaceNotFound` stays user-facing; resolver backend failures and
/// internal validation breaches become opaque 500s.
impl From<FiscalCodeError> for AppError {
    fn from(err: FiscalCodeError) -> Self {
        match err {
            FiscalCodeError::PlaceNotFound(place) => Self::PlaceNotFound(place),
            FiscalCodeError::Resolve(e) => Self::Internal(e.to_string()),
            FiscalCodeError::Validation(e) => Self::Internal(e.to_string()),
        }
    }
}
