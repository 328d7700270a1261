//! # Request Extraction Helpers
//!
//! Validated JSON extraction. Handlers take the body as
//! `Result<Json<T>, JsonRejection>` and pass it through
//! [`extract_validated_json`], so a body that fails to parse and a body
//! that fails domain validation both surface as structured 422 responses
//! instead of axum's plain-text rejections.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request-body validation hook, run after deserialization and before
/// the handler body.
pub trait Validate {
    /// Check semantic validity, returning a client-facing message on
    /// failure.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON extraction result, then validate the payload.
///
/// # Errors
///
/// [`AppError::BadRequest`] when the body failed to parse as `T`;
/// [`AppError::Validation`] when [`Validate::validate`] rejects it.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Probe {
        value: u32,
    }

    impl Validate for Probe {
        fn validate(&self) -> Result<(), String> {
            if self.value == 0 {
                return Err("value must be positive".into());
            }
            Ok(())
        }
    }

    #[test]
    fn passes_valid_bodies_through() {
        let probe = extract_validated_json(Ok(Json(Probe { value: 3 }))).unwrap();
        assert_eq!(probe.value, 3);
    }

    #[test]
    fn failed_validation_becomes_a_validation_error() {
        let err = extract_validated_json(Ok(Json(Probe { value: 0 }))).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("positive")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
