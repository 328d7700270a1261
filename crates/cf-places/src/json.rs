//! # Lookup-File Resolver
//!
//! File-backed place resolution for deployments without a database: a
//! JSON array of `{nome, codiceCatastale}` entries, parsed once into an
//! in-memory index at construction.
//!
//! Construction is the configuration boundary, so it fails fast: a
//! missing or malformed file, or an entry carrying a malformed cadastral
//! code, is an error at startup — not a silent "no matches" at request
//! time. Entries missing their name or code entirely are skipped, as the
//! original lookup file tolerated such rows.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use cf_core::{PlaceCode, PlaceCodeResolver, ResolveError, ValidationError};

use crate::dataset::LookupEntry;

/// Errors constructing a [`JsonPlaceResolver`].
///
/// All of these are deployment configuration problems and should abort
/// startup.
#[derive(Error, Debug)]
pub enum LookupFileError {
    /// The lookup file could not be read.
    #[error("place lookup file could not be read from {path}: {source}")]
    Io {
        /// Path the file was expected at.
        path: String,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The lookup file is not a JSON array of entries.
    #[error("place lookup file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// An entry's cadastral code fails shape validation.
    #[error("place lookup entry \"{name}\" has an invalid cadastral code: {source}")]
    InvalidCode {
        /// The entry's place name.
        name: String,
        /// The shape violation.
        #[source]
        source: ValidationError,
    },
}

/// Place resolver backed by a static lookup file.
///
/// Lookup is case-insensitive exact match; when the file lists the same
/// name twice, the first entry wins. Resolution itself is infallible —
/// all failure modes are surfaced at construction.
#[derive(Debug, Clone)]
pub struct JsonPlaceResolver {
    // Keyed by lowercased place name.
    entries: HashMap<String, PlaceCode>,
}

impl JsonPlaceResolver {
    /// Load a lookup file from disk.
    ///
    /// # Errors
    ///
    /// [`LookupFileError::Io`] if the file cannot be read, plus
    /// everything [`JsonPlaceResolver::from_json_str`] reports.
    pub fn from_path(path: &Path) -> Result<Self, LookupFileError> {
        let json = std::fs::read_to_string(path).map_err(|source| LookupFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Build the index from the lookup document text.
    ///
    /// # Errors
    ///
    /// [`LookupFileError::Malformed`] if the document is not an entry
    /// array; [`LookupFileError::InvalidCode`] if an entry carries a
    /// code with the wrong shape.
    pub fn from_json_str(json: &str) -> Result<Self, LookupFileError> {
        let raw: Vec<LookupEntry> = serde_json::from_str(json)?;

        let mut entries: HashMap<String, PlaceCode> = HashMap::with_capacity(raw.len());
        for entry in raw {
            let (name, code) = match (entry.name, entry.cadastral_code) {
                (Some(name), Some(code)) if !name.is_empty() && !code.is_empty() => (name, code),
                // Rows without both fields are tolerated and skipped.
                _ => continue,
            };
            let code = PlaceCode::new(code).map_err(|source| LookupFileError::InvalidCode {
                name: name.clone(),
                source,
            })?;
            entries.entry(name.to_lowercase()).or_insert(code);
        }

        Ok(Self { entries })
    }

    /// Number of indexed places.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file contained no usable entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PlaceCodeResolver for JsonPlaceResolver {
    async fn resolve(&self, place_name: &str) -> Result<Option<PlaceCode>, ResolveError> {
        Ok(self.entries.get(&place_name.to_lowercase()).cloned())
    }
}
