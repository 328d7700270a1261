//! # Place Code Resolution
//!
//! The pipeline's single external dependency: turning a birth place name
//! into its cadastral code. The trait is a capability injected into the
//! [`crate::FiscalCodeService`] — the core never selects, retries, or
//! falls back between implementations.
//!
//! Production backends (lookup file, relational table) live in their own
//! crate; [`MemoryPlaceResolver`] here is the deterministic in-memory
//! implementation used by tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::code::PlaceCode;
use crate::error::{ResolveError, ValidationError};

/// Capability to resolve a place name to its cadastral code.
///
/// Lookup is case-insensitive exact match on the place name. A clean miss
/// is `Ok(None)` — only backend failures (store unreachable, record
/// corrupt) are `Err`.
#[async_trait]
pub trait PlaceCodeResolver: Send + Sync + std::fmt::Debug {
    /// Look up the cadastral code for a place name.
    async fn resolve(&self, place_name: &str) -> Result<Option<PlaceCode>, ResolveError>;
}

/// In-memory place resolver with a fixed set of entries.
///
/// Deterministic and infallible — it never returns `Err` — which makes it
/// the right collaborator for pipeline tests and for running the stack
/// without any backing store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlaceResolver {
    // Keyed by lowercased place name.
    entries: HashMap<String, PlaceCode>,
}

impl MemoryPlaceResolver {
    /// Create an empty resolver (every lookup misses).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resolver from `(name, code)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPlaceCode`] if any code fails
    /// shape validation.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut resolver = Self::new();
        for (name, code) in pairs {
            resolver.insert(name, PlaceCode::new(code)?);
        }
        Ok(resolver)
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: &str, code: PlaceCode) {
        self.entries.insert(name.to_lowercase(), code);
    }

    /// Number of known places.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the resolver knows no places at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PlaceCodeResolver for MemoryPlaceResolver {
    async fn resolve(&self, place_name: &str) -> Result<Option<PlaceCode>, ResolveError> {
        Ok(self.entries.get(&place_name.to_lowercase()).cloned())
    }
}
