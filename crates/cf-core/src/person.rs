//! # Person Input
//!
//! The five biographical facts a fiscal code is derived from. The record
//! is immutable, constructed once per request, and never persisted; the
//! caller is responsible for presence and type validation before
//! construction (the pipeline does not second-guess biographical
//! plausibility).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Biological sex marker as recorded on the birth record.
///
/// Serializes as `"male"` / `"female"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male — birth day encoded as-is.
    Male,
    /// Female — birth day encoded with a +40 offset.
    Female,
}

impl Sex {
    /// Offset added to the day-of-month in the date segment.
    pub fn day_offset(self) -> u32 {
        match self {
            Sex::Male => 0,
            Sex::Female => 40,
        }
    }
}

/// Input record for one fiscal code computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInput {
    /// Family name, as written (case, accents and punctuation are
    /// handled by the encoder).
    pub family_name: String,
    /// Given name, as written.
    pub given_name: String,
    /// Birth date (no timezone; calendar fields only).
    pub birth_date: NaiveDate,
    /// Birth place name, matched case-insensitively by the resolver.
    pub birth_place: String,
    /// Sex marker driving the day-of-month offset.
    pub sex: Sex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_day_offset() {
        assert_eq!(Sex::Male.day_offset(), 0);
        assert_eq!(Sex::Female.day_offset(), 40);
    }

    #[test]
    fn sex_serde_names() {
        assert_eq!(serde_json::to_string(&Sex::Male).unwrap(), "\"male\"");
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"female\"");
        let parsed: Sex = serde_json::from_str("\"female\"").unwrap();
        assert_eq!(parsed, Sex::Female);
    }

    #[test]
    fn sex_rejects_unknown_name() {
        assert!(serde_json::from_str::<Sex>("\"other\"").is_err());
    }

    #[test]
    fn person_input_serde_roundtrip() {
        let input = PersonInput {
            family_name: "Rossi".to_string(),
            given_name: "Mario".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 8, 1).unwrap(),
            birth_place: "Roma".to_string(),
            sex: Sex::Male,
        };
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"1985-08-01\""));
        let back: PersonInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }
}
