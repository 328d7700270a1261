#![deny(missing_docs)]

//! # cf-core — Fiscal Code Computation Core
//!
//! Derives the 16-character national fiscal code from five biographical
//! facts: family name, given name, birth date, birth place, and sex. Each
//! fact is encoded into a fixed-width segment, the segments are
//! concatenated into a 15-character partial code, and a control character
//! computed from position-parity lookup tables is appended.
//!
//! ## Segment Layout
//!
//! | Positions | Source        | Encoding                                  |
//! |-----------|---------------|-------------------------------------------|
//! | 1–3       | family name   | consonant/vowel extraction, `X` padding   |
//! | 4–6       | given name    | same, plus the four-consonant rule        |
//! | 7–8       | birth year    | last two digits, zero-padded              |
//! | 9         | birth month   | fixed irregular letter table              |
//! | 10–11     | birth day     | day, +40 for female, zero-padded          |
//! | 12–15     | birth place   | cadastral code from a [`PlaceCodeResolver`] |
//! | 16        | checksum      | odd/even positional tables, mod 26        |
//!
//! ## Design Principles
//!
//! 1. **Validated newtypes.** [`FiscalCode`], [`PlaceCode`] and
//!    [`PartialCode`] reject malformed text at construction, so downstream
//!    code never re-checks shape.
//!
//! 2. **Control tables are a value, not ambient state.** [`ControlTables`]
//!    is constructed once (embedded reference or external definition),
//!    validated to cover the full 36-symbol alphabet, and owned by the
//!    [`FiscalCodeService`]. Nothing mutates it afterwards, so concurrent
//!    computations share it freely.
//!
//! 3. **Place resolution is a capability.** The pipeline consumes a
//!    [`PlaceCodeResolver`] trait object and never selects, retries, or
//!    falls back between backends; [`MemoryPlaceResolver`] is the
//!    deterministic implementation for tests and local development.

pub mod code;
pub mod control;
pub mod date;
pub mod error;
pub mod name;
pub mod person;
pub mod pipeline;
pub mod resolver;

// Re-export primary types at crate root for ergonomic imports.
pub use code::{FiscalCode, PartialCode, PlaceCode};
pub use control::ControlTables;
pub use error::{ControlTableError, FiscalCodeError, ResolveError, ValidationError};
pub use person::{PersonInput, Sex};
pub use pipeline::FiscalCodeService;
pub use resolver::{MemoryPlaceResolver, PlaceCodeResolver};
