//! # Code Newtypes
//!
//! Validated newtypes for the three code shapes in the pipeline. Each is a
//! distinct type — you cannot pass a [`PlaceCode`] where a [`FiscalCode`]
//! is expected — and each validates at construction, so anything holding
//! one of these values holds a well-formed one.
//!
//! ## Alphabet
//!
//! The code alphabet is the 36 symbols `0-9` and `A-Z`. [`PartialCode`]
//! admits exactly 15 of them; together with full-coverage validation on
//! [`crate::ControlTables`], this makes the checksum a total function.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Index of a character within the 36-symbol code alphabet.
///
/// Digits map to 0–9, uppercase letters to 10–35. Returns `None` for
/// anything else (lowercase, accents, punctuation).
pub(crate) fn symbol_index(c: char) -> Option<usize> {
    match c {
        '0'..='9' => Some((c as u8 - b'0') as usize),
        'A'..='Z' => Some((c as u8 - b'A') as usize + 10),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// PlaceCode
// ---------------------------------------------------------------------------

/// A 4-character cadastral code identifying a municipality or foreign
/// country of birth: one uppercase letter followed by three digits
/// (e.g. `H501`).
///
/// Produced by a place-resolution backend; the pipeline treats it as
/// opaque once obtained. Input is trimmed and uppercased before
/// validation so that dataset case variance does not leak into codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlaceCode(String);

impl_validating_deserialize!(PlaceCode);

impl PlaceCode {
    /// Create a place code, validating the letter + 3 digits shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPlaceCode`] if the (trimmed,
    /// uppercased) value is not one letter followed by three digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let upper = raw.trim().to_ascii_uppercase();

        let mut chars = upper.chars();
        let shape_ok = matches!(chars.next(), Some('A'..='Z'))
            && upper.len() == 4
            && chars.all(|c| c.is_ascii_digit());
        if !shape_ok {
            return Err(ValidationError::InvalidPlaceCode(raw));
        }

        Ok(Self(upper))
    }

    /// Access the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PartialCode
// ---------------------------------------------------------------------------

/// The first 15 characters of a fiscal code: family name (3) + given name
/// (3) + year (2) + month (1) + day/sex (2) + place code (4).
///
/// Transient — it exists only between segment assembly and checksum
/// computation. Every character is guaranteed to be one of the 36
/// alphabet symbols, which is what makes the checksum infallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialCode(String);

impl PartialCode {
    /// Create a partial code, validating length and alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPartialCode`] unless the value is
    /// exactly 15 characters, each a digit or uppercase letter.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.chars().count() != 15 || !s.chars().all(|c| symbol_index(c).is_some()) {
            return Err(ValidationError::InvalidPartialCode(s));
        }
        Ok(Self(s))
    }

    /// Access the partial code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartialCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// FiscalCode
// ---------------------------------------------------------------------------

/// A complete 16-character fiscal code: a [`PartialCode`] plus its control
/// character.
///
/// Invariant: exactly 16 uppercase alphanumeric characters, and the 16th
/// is always a letter A–Z (the checksum maps into the letter range, never
/// digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FiscalCode(String);

impl_validating_deserialize!(FiscalCode);

impl FiscalCode {
    /// Parse a fiscal code from text, validating the full shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFiscalCode`] unless the value is
    /// 16 characters, the first 15 from the code alphabet and the last an
    /// uppercase letter.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let chars: Vec<char> = s.chars().collect();
        let shape_ok = chars.len() == 16
            && chars[..15].iter().all(|c| symbol_index(*c).is_some())
            && chars[15].is_ascii_uppercase();
        if !shape_ok {
            return Err(ValidationError::InvalidFiscalCode(s));
        }
        Ok(Self(s))
    }

    /// Assemble a fiscal code from an already-validated partial code and
    /// its control character.
    ///
    /// The control character comes out of the checksum, which only
    /// produces A–Z, so no re-validation is needed.
    pub(crate) fn from_parts(partial: &PartialCode, control: char) -> Self {
        debug_assert!(control.is_ascii_uppercase());
        let mut s = String::with_capacity(16);
        s.push_str(partial.as_str());
        s.push(control);
        Self(s)
    }

    /// Access the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The control (checksum) character — always a letter.
    pub fn control_char(&self) -> char {
        // Always ASCII, validated at construction.
        self.0.as_bytes()[15] as char
    }
}

impl std::fmt::Display for FiscalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- symbol_index --

    #[test]
    fn symbol_index_covers_digits_and_letters() {
        assert_eq!(symbol_index('0'), Some(0));
        assert_eq!(symbol_index('9'), Some(9));
        assert_eq!(symbol_index('A'), Some(10));
        assert_eq!(symbol_index('Z'), Some(35));
    }

    #[test]
    fn symbol_index_rejects_everything_else() {
        assert_eq!(symbol_index('a'), None);
        assert_eq!(symbol_index('-'), None);
        assert_eq!(symbol_index(' '), None);
        assert_eq!(symbol_index('Ù'), None);
    }

    // -- PlaceCode --

    #[test]
    fn place_code_valid() {
        let code = PlaceCode::new("H501").unwrap();
        assert_eq!(code.as_str(), "H501");
        assert_eq!(format!("{code}"), "H501");
    }

    #[test]
    fn place_code_normalizes_case_and_whitespace() {
        let code = PlaceCode::new(" h501 ").unwrap();
        assert_eq!(code.as_str(), "H501");
    }

    #[test]
    fn place_code_rejects_invalid() {
        assert!(PlaceCode::new("").is_err());
        assert!(PlaceCode::new("H50").is_err()); // too short
        assert!(PlaceCode::new("H5011").is_err()); // too long
        assert!(PlaceCode::new("5H01").is_err()); // digit first
        assert!(PlaceCode::new("HH01").is_err()); // letter in digit slot
        assert!(PlaceCode::new("H5O1").is_err()); // letter O, not zero
    }

    #[test]
    fn place_code_deserialize_validates() {
        let ok: PlaceCode = serde_json::from_str("\"F205\"").unwrap();
        assert_eq!(ok.as_str(), "F205");
        assert!(serde_json::from_str::<PlaceCode>("\"F2O5\"").is_err());
    }

    // -- PartialCode --

    #[test]
    fn partial_code_valid() {
        let partial = PartialCode::new("RSSMRA85M01H501").unwrap();
        assert_eq!(partial.as_str(), "RSSMRA85M01H501");
    }

    #[test]
    fn partial_code_rejects_wrong_length() {
        assert!(PartialCode::new("").is_err());
        assert!(PartialCode::new("RSSMRA85M01H50").is_err()); // 14
        assert!(PartialCode::new("RSSMRA85M01H501Q").is_err()); // 16
    }

    #[test]
    fn partial_code_rejects_foreign_characters() {
        assert!(PartialCode::new("rssmra85m01h501").is_err()); // lowercase
        assert!(PartialCode::new("RSSMRA85M01H50-").is_err());
        assert!(PartialCode::new("RSSMRA85M01H50Ù").is_err());
    }

    // -- FiscalCode --

    #[test]
    fn fiscal_code_valid() {
        let code = FiscalCode::new("RSSMRA80A01H501U").unwrap();
        assert_eq!(code.as_str(), "RSSMRA80A01H501U");
        assert_eq!(code.control_char(), 'U');
        assert_eq!(format!("{code}"), "RSSMRA80A01H501U");
    }

    #[test]
    fn fiscal_code_rejects_invalid() {
        assert!(FiscalCode::new("").is_err());
        assert!(FiscalCode::new("RSSMRA80A01H501").is_err()); // 15 chars
        assert!(FiscalCode::new("RSSMRA80A01H501UU").is_err()); // 17 chars
        assert!(FiscalCode::new("RSSMRA80A01H5013").is_err()); // digit checksum
        assert!(FiscalCode::new("rssmra80a01h501u").is_err()); // lowercase
    }

    #[test]
    fn fiscal_code_from_parts_assembles() {
        let partial = PartialCode::new("RSSMRA80A01H501").unwrap();
        let code = FiscalCode::from_parts(&partial, 'U');
        assert_eq!(code.as_str(), "RSSMRA80A01H501U");
    }

    #[test]
    fn fiscal_code_serde_roundtrip() {
        let code = FiscalCode::new("MRTMTT91D08F205J").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"MRTMTT91D08F205J\"");
        let back: FiscalCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn fiscal_code_deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<FiscalCode>("\"BAD\"").is_err());
    }
}
