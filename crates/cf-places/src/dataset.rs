//! # National Dataset Records
//!
//! Serde models for the two JSON shapes this crate consumes, with the
//! dataset's original Italian keys preserved on the wire:
//!
//! - the full national municipality dataset (one rich record per
//!   municipality), consumed by the bulk importer;
//! - the trimmed lookup file (name + cadastral code pairs), consumed by
//!   the file-backed resolver.

use serde::Deserialize;

/// A `{codice, nome}` pair as used for zones, regions and provinces in
/// the national dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodedName {
    /// Official code.
    #[serde(rename = "codice")]
    pub code: String,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
}

/// One municipality record of the full national dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaceRecord {
    /// Municipality name.
    #[serde(rename = "nome")]
    pub name: String,
    /// ISTAT municipality code — the dataset's primary key.
    #[serde(rename = "codice")]
    pub istat_code: String,
    /// Macro-area zone.
    #[serde(rename = "zona")]
    pub zone: CodedName,
    /// Region.
    #[serde(rename = "regione")]
    pub region: CodedName,
    /// Province.
    #[serde(rename = "provincia")]
    pub province: CodedName,
    /// Two-letter province abbreviation.
    #[serde(rename = "sigla")]
    pub province_abbreviation: String,
    /// Cadastral code used in fiscal codes.
    #[serde(rename = "codiceCatastale")]
    pub cadastral_code: String,
    /// Postal codes; municipalities spanning several keep them all here.
    #[serde(rename = "cap")]
    pub postal_codes: Vec<String>,
    /// Resident population.
    #[serde(rename = "popolazione")]
    pub population: i64,
}

impl PlaceRecord {
    /// The first postal code — the only one the store keeps, mirroring
    /// the original dataset bootstrap.
    pub fn primary_postal_code(&self) -> Option<&str> {
        self.postal_codes.first().map(String::as_str)
    }
}

/// One entry of the trimmed lookup file.
///
/// Both fields are optional on the wire: entries lacking either are
/// skipped by the loader rather than failing the whole file.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupEntry {
    /// Place name.
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    /// Cadastral code.
    #[serde(rename = "codiceCatastale", default)]
    pub cadastral_code: Option<String>,
}

/// Parse the full national dataset from its JSON document.
pub fn parse_dataset(json: &str) -> Result<Vec<PlaceRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROMA_RECORD: &str = r#"{
        "nome": "Roma",
        "codice": "058091",
        "zona": { "codice": "2", "nome": "Centro" },
        "regione": { "codice": "12", "nome": "Lazio" },
        "provincia": { "codice": "058", "nome": "Roma" },
        "sigla": "RM",
        "codiceCatastale": "H501",
        "cap": ["00118", "00119", "00120"],
        "popolazione": 2617175
    }"#;

    #[test]
    fn parses_a_full_record() {
        let record: PlaceRecord = serde_json::from_str(ROMA_RECORD).unwrap();
        assert_eq!(record.name, "Roma");
        assert_eq!(record.istat_code, "058091");
        assert_eq!(record.zone.name, "Centro");
        assert_eq!(record.region.code, "12");
        assert_eq!(record.province.name, "Roma");
        assert_eq!(record.province_abbreviation, "RM");
        assert_eq!(record.cadastral_code, "H501");
        assert_eq!(record.population, 2_617_175);
    }

    #[test]
    fn primary_postal_code_is_the_first() {
        let record: PlaceRecord = serde_json::from_str(ROMA_RECORD).unwrap();
        assert_eq!(record.primary_postal_code(), Some("00118"));
    }

    #[test]
    fn no_postal_codes_yields_none() {
        let json = ROMA_RECORD.replace(r#"["00118", "00119", "00120"]"#, "[]");
        let record: PlaceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.primary_postal_code(), None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = ROMA_RECORD.replace(
            "\"nome\": \"Roma\",",
            "\"nome\": \"Roma\", \"superficie\": 1287.36,",
        );
        assert!(serde_json::from_str::<PlaceRecord>(&json).is_ok());
    }

    #[test]
    fn missing_required_field_fails() {
        let json = ROMA_RECORD.replace("\"popolazione\": 2617175", "\"altro\": 1");
        assert!(serde_json::from_str::<PlaceRecord>(&json).is_err());
    }

    #[test]
    fn parse_dataset_reads_an_array() {
        let json = format!("[{ROMA_RECORD}]");
        let records = parse_dataset(&json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cadastral_code, "H501");
    }

    #[test]
    fn lookup_entry_fields_are_optional() {
        let entry: LookupEntry = serde_json::from_str(r#"{"nome": "Roma"}"#).unwrap();
        assert_eq!(entry.name.as_deref(), Some("Roma"));
        assert!(entry.cadastral_code.is_none());

        let empty: LookupEntry = serde_json::from_str("{}").unwrap();
        assert!(empty.name.is_none());
    }
}
