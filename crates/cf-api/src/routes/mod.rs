//! # API Route Modules
//!
//! - `fiscal_code` — the computation endpoint: validated person details
//!   in, 16-character fiscal code out.

pub mod fiscal_code;
