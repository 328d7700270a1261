//! # cf-places — Place Resolution Backends
//!
//! Production implementations of the core's `PlaceCodeResolver`
//! capability, plus the administrative tooling that keeps their data
//! fresh.
//!
//! ## Backends
//!
//! | Backend                         | Source                          | Use |
//! |---------------------------------|---------------------------------|-----|
//! | [`json::JsonPlaceResolver`]     | static lookup file, loaded once | small deployments, no database |
//! | [`sql::PgPlaceResolver`]        | pre-seeded `places` table       | full deployments |
//!
//! Which backend a deployment runs is pure configuration — the core
//! consumes either through the same trait and cannot tell them apart.
//!
//! ## Data
//!
//! [`dataset`] models the national municipality dataset (Italian wire
//! keys preserved) and the trimmed lookup-file shape. [`import`] seeds
//! the Postgres table from the full dataset: create-if-missing schema,
//! then delete + re-insert inside one transaction.

pub mod dataset;
pub mod import;
pub mod json;
pub mod sql;

pub use dataset::{parse_dataset, CodedName, LookupEntry, PlaceRecord};
pub use import::{ensure_schema, import_dataset, reseed, ImportError};
pub use json::{JsonPlaceResolver, LookupFileError};
pub use sql::{connect_pool, PgPlaceResolver};
