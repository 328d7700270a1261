//! # Error Hierarchy
//!
//! Structured error types for the fiscal code core, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! The taxonomy keeps three failure families apart because callers present
//! them differently:
//!
//! - [`FiscalCodeError::PlaceNotFound`] — a user-correctable domain error
//!   (the birth place is not in the registry);
//! - [`ResolveError`] — system failures inside a resolver backend, opaque
//!   to end users;
//! - [`ControlTableError`] — startup-fatal configuration problems; a
//!   process with incomplete control tables must never compute a code.

use thiserror::Error;

/// Validation errors for the code-shaped newtypes.
///
/// Each newtype enforces its format at construction time. These errors
/// carry the rejected input and the expected shape so operators can
/// diagnose a bad dataset or caller without guesswork.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Place code does not match the cadastral shape.
    #[error("invalid place code: \"{0}\" (expected 1 letter followed by 3 digits)")]
    InvalidPlaceCode(String),

    /// Partial code is not exactly 15 characters from the code alphabet.
    #[error("invalid partial code: \"{0}\" (expected exactly 15 characters from 0-9, A-Z)")]
    InvalidPartialCode(String),

    /// Fiscal code is not 16 uppercase alphanumerics ending in a letter.
    #[error("invalid fiscal code: \"{0}\" (expected 16 uppercase alphanumeric characters, the last a letter)")]
    InvalidFiscalCode(String),
}

/// Errors loading or validating a control-table definition.
///
/// All of these are configuration errors: fatal, not retryable, and
/// expected to abort startup before any computation is attempted.
#[derive(Error, Debug)]
pub enum ControlTableError {
    /// The definition file could not be read.
    #[error("control table definition could not be read from {path}: {source}")]
    Io {
        /// Path the definition was expected at.
        path: String,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The definition document is not valid JSON for the expected shape.
    #[error("control table definition is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A table lacks a value for one of the 36 alphabet symbols.
    #[error("{group} control table is missing a value for symbol '{symbol}'")]
    MissingSymbol {
        /// Which table group is incomplete (`odd` or `even`).
        group: &'static str,
        /// The uncovered alphabet symbol.
        symbol: char,
    },

    /// A table maps a symbol outside the 36-character code alphabet.
    #[error("{group} control table contains unknown symbol \"{symbol}\" (alphabet is 0-9, A-Z)")]
    UnknownSymbol {
        /// Which table group carries the stray entry.
        group: &'static str,
        /// The offending key as it appeared in the definition.
        symbol: String,
    },
}

/// Failures inside a place-resolution backend.
///
/// Distinct from a clean miss: a resolver that finds no match returns
/// `Ok(None)`, not an error. These variants cover the backend itself
/// misbehaving, and are surfaced to callers as system failures.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The backing store could not be reached or queried.
    #[error("place lookup backend failure: {reason}")]
    Backend {
        /// Description of the underlying failure.
        reason: String,
    },

    /// The backing store returned a record that violates the data contract.
    #[error("corrupt place record for \"{name}\": {reason}")]
    CorruptRecord {
        /// The place name whose record is corrupt.
        name: String,
        /// What was wrong with the stored record.
        reason: String,
    },
}

/// Errors produced by the fiscal code pipeline.
///
/// The pipeline performs no local recovery: every failure propagates to
/// the caller with its kind preserved so the presentation layer can
/// distinguish "fix your input" from "the service is broken".
#[derive(Error, Debug)]
pub enum FiscalCodeError {
    /// The birth place is not present in the place registry.
    #[error("birth place not recognized: \"{0}\"")]
    PlaceNotFound(String),

    /// The resolver backend failed while looking up the birth place.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Segment assembly produced text outside the code alphabet.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
