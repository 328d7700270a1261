//! # Control Tables & Checksum
//!
//! The 16th character of a fiscal code is derived from the first 15 by
//! two positional lookup tables: one applied at odd 1-based positions,
//! one at even positions. The 15 looked-up values are summed, reduced
//! modulo 26, and mapped onto `A`–`Z`.
//!
//! ## Loading
//!
//! [`ControlTables`] is an explicitly constructed immutable value — never
//! process-global, never reloaded. The national reference tables are
//! compiled in ([`ControlTables::reference`]); deployments may instead
//! load a definition document with two named groups (`"odd"`, `"even"`)
//! mapping every one of the 36 alphabet symbols to a non-negative
//! integer. Loading validates full coverage: a missing symbol, a stray
//! key, or a malformed document is a [`ControlTableError`] and must abort
//! startup — a process with incomplete tables cannot compute checksums.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::code::{symbol_index, PartialCode};
use crate::error::ControlTableError;

/// The 36-symbol code alphabet in index order.
const SYMBOLS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[rustfmt::skip]
const REFERENCE_ODD: [u32; 36] = [
    // 0   1   2   3   4   5   6   7   8   9
       1,  0,  5,  7,  9, 13, 15, 17, 19, 21,
    // A   B   C   D   E   F   G   H   I   J
       1,  0,  5,  7,  9, 13, 15, 17, 19, 21,
    // K   L   M   N   O   P   Q   R   S   T
       2,  4, 18, 20, 11,  3,  6,  8, 12, 14,
    // U   V   W   X   Y   Z
      16, 10, 22, 25, 24, 23,
];

#[rustfmt::skip]
const REFERENCE_EVEN: [u32; 36] = [
    // 0   1   2   3   4   5   6   7   8   9
       0,  1,  2,  3,  4,  5,  6,  7,  8,  9,
    // A   B   C   D   E   F   G   H   I   J
       0,  1,  2,  3,  4,  5,  6,  7,  8,  9,
    // K   L   M   N   O   P   Q   R   S   T
      10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
    // U   V   W   X   Y   Z
      20, 21, 22, 23, 24, 25,
];

/// On-disk shape of a control-table definition: two named groups, each
/// mapping every alphabet symbol to a non-negative integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlTableDefinition {
    /// Values applied at odd 1-based positions.
    pub odd: BTreeMap<String, u32>,
    /// Values applied at even 1-based positions.
    pub even: BTreeMap<String, u32>,
}

/// Immutable odd/even position value tables covering the full alphabet.
///
/// Construction is the only place coverage is checked; afterwards
/// [`ControlTables::control_char`] is total over any [`PartialCode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlTables {
    odd: [u32; 36],
    even: [u32; 36],
}

impl ControlTables {
    /// The national reference tables, compiled in.
    pub fn reference() -> Self {
        Self {
            odd: REFERENCE_ODD,
            even: REFERENCE_EVEN,
        }
    }

    /// Build tables from a parsed definition, validating coverage.
    ///
    /// # Errors
    ///
    /// [`ControlTableError::UnknownSymbol`] for any key outside the
    /// alphabet, then [`ControlTableError::MissingSymbol`] for any of the
    /// 36 symbols without a value. Stray keys are reported first so a
    /// typoed symbol shows up as itself, not as a gap elsewhere.
    pub fn from_definition(def: &ControlTableDefinition) -> Result<Self, ControlTableError> {
        Ok(Self {
            odd: table_from_group(&def.odd, "odd")?,
            even: table_from_group(&def.even, "even")?,
        })
    }

    /// Parse a JSON definition document and build tables from it.
    ///
    /// # Errors
    ///
    /// [`ControlTableError::Malformed`] if the document is not the
    /// expected shape (including negative values), plus everything
    /// [`ControlTables::from_definition`] reports.
    pub fn from_json_str(json: &str) -> Result<Self, ControlTableError> {
        let def: ControlTableDefinition = serde_json::from_str(json)?;
        Self::from_definition(&def)
    }

    /// Read and parse a JSON definition file.
    ///
    /// # Errors
    ///
    /// [`ControlTableError::Io`] if the file cannot be read, plus
    /// everything [`ControlTables::from_json_str`] reports.
    pub fn from_path(path: &Path) -> Result<Self, ControlTableError> {
        let json = std::fs::read_to_string(path).map_err(|source| ControlTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Compute the control character for a partial code.
    ///
    /// Total and pure: the partial admits only alphabet symbols and the
    /// tables cover all of them, so there is no failure path. The result
    /// is always a letter `A`–`Z`.
    pub fn control_char(&self, partial: &PartialCode) -> char {
        // Definition values span the full u32 range, so the 15-term sum
        // needs 64 bits.
        let mut sum: u64 = 0;
        for (i, c) in partial.as_str().chars().enumerate() {
            let idx = symbol_index(c).expect("validated at construction");
            sum += u64::from(if (i + 1) % 2 == 0 {
                self.even[idx]
            } else {
                self.odd[idx]
            });
        }
        (b'A' + (sum % 26) as u8) as char
    }
}

fn table_from_group(
    group: &BTreeMap<String, u32>,
    name: &'static str,
) -> Result<[u32; 36], ControlTableError> {
    for key in group.keys() {
        let mut chars = key.chars();
        let valid = matches!(
            (chars.next(), chars.next()),
            (Some(c), None) if symbol_index(c).is_some()
        );
        if !valid {
            return Err(ControlTableError::UnknownSymbol {
                group: name,
                symbol: key.clone(),
            });
        }
    }

    let mut table = [0u32; 36];
    for (i, symbol) in SYMBOLS.chars().enumerate() {
        match group.get(symbol.to_string().as_str()) {
            Some(value) => table[i] = *value,
            None => {
                return Err(ControlTableError::MissingSymbol {
                    group: name,
                    symbol,
                })
            }
        }
    }
    Ok(table)
}
