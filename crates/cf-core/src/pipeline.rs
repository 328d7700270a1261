//! # Fiscal Code Pipeline
//!
//! Composes the segment encoders, the place resolver, and the control
//! tables into the full 16-character code. The assembly order is
//! semantically significant — it fixes which positions each segment
//! occupies, and the checksum is position-dependent — so the pipeline is
//! the only place concatenation happens.
//!
//! The service is stateless per invocation: the only cross-invocation
//! state is the immutable [`ControlTables`] value and the injected
//! resolver, so one instance serves concurrent callers without locking.

use std::sync::Arc;

use crate::code::{FiscalCode, PartialCode};
use crate::control::ControlTables;
use crate::date;
use crate::error::FiscalCodeError;
use crate::name;
use crate::person::PersonInput;
use crate::resolver::PlaceCodeResolver;

/// The fiscal code computation service.
///
/// Owns its [`ControlTables`] and a shared resolver; both are fixed at
/// construction and never swapped or reloaded.
#[derive(Debug)]
pub struct FiscalCodeService {
    resolver: Arc<dyn PlaceCodeResolver>,
    tables: ControlTables,
}

impl FiscalCodeService {
    /// Create a service from a resolver and control tables.
    pub fn new(resolver: Arc<dyn PlaceCodeResolver>, tables: ControlTables) -> Self {
        Self { resolver, tables }
    }

    /// Derive the fiscal code for one person.
    ///
    /// Segments are assembled in fixed order: family name, given name,
    /// year, month, day+sex, place code; the control character is then
    /// computed over those 15 characters and appended. Deterministic
    /// given identical input and an identical resolver answer; no side
    /// effects beyond the single resolver call.
    ///
    /// # Errors
    ///
    /// - [`FiscalCodeError::PlaceNotFound`] when the resolver has no
    ///   match for the birth place;
    /// - [`FiscalCodeError::Resolve`] when the resolver backend fails.
    pub async fn compute(&self, input: &PersonInput) -> Result<FiscalCode, FiscalCodeError> {
        let mut partial = String::with_capacity(15);
        partial.push_str(&name::family_name_segment(&input.family_name));
        partial.push_str(&name::given_name_segment(&input.given_name));
        partial.push_str(&date::birth_date_segment(input.birth_date, input.sex));

        let place = self
            .resolver
            .resolve(&input.birth_place)
            .await?
            .ok_or_else(|| FiscalCodeError::PlaceNotFound(input.birth_place.clone()))?;
        partial.push_str(place.as_str());

        let partial = PartialCode::new(partial)?;
        let control = self.tables.control_char(&partial);
        Ok(FiscalCode::from_parts(&partial, control))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::code::PlaceCode;
    use crate::error::ResolveError;
    use crate::person::Sex;
    use crate::resolver::MemoryPlaceResolver;

    fn service() -> FiscalCodeService {
        let resolver = MemoryPlaceResolver::from_pairs([
            ("Roma", "H501"),
            ("Milano", "F205"),
            ("Bologna", "A944"),
        ])
        .unwrap();
        FiscalCodeService::new(Arc::new(resolver), ControlTables::reference())
    }

    fn input(
        family: &str,
        given: &str,
        ymd: (i32, u32, u32),
        sex: Sex,
        place: &str,
    ) -> PersonInput {
        PersonInput {
            family_name: family.to_string(),
            given_name: given.to_string(),
            birth_date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            birth_place: place.to_string(),
            sex,
        }
    }

    // -- end to end --

    #[tokio::test]
    async fn computes_the_canonical_example() {
        let svc = service();
        let code = svc
            .compute(&input("Rossi", "Mario", (1985, 8, 1), Sex::Male, "Roma"))
            .await
            .unwrap();
        assert_eq!(code.as_str(), "RSSMRA85M01H501Q");
    }

    #[tokio::test]
    async fn computes_further_known_codes() {
        let svc = service();
        let cases = [
            (
                input("Rossi", "Mario", (1980, 1, 1), Sex::Male, "Roma"),
                "RSSMRA80A01H501U",
            ),
            (
                input("Rossi", "Maria", (1985, 8, 1), Sex::Female, "Roma"),
                "RSSMRA85M41H501U",
            ),
            (
                input("Bianchi", "Carla", (1990, 12, 3), Sex::Female, "Milano"),
                "BNCCRL90T43F205E",
            ),
            (
                input("Verdi", "Giovanni", (1970, 5, 15), Sex::Male, "Bologna"),
                "VRDGNN70E15A944R",
            ),
        ];
        for (person, expected) in cases {
            let code = svc.compute(&person).await.unwrap();
            assert_eq!(code.as_str(), expected, "input {person:?}");
        }
    }

    #[tokio::test]
    async fn short_names_pad_and_still_check_out() {
        let svc = service();
        let code = svc
            .compute(&input("Bo", "Fo", (1985, 8, 1), Sex::Male, "Roma"))
            .await
            .unwrap();
        assert_eq!(code.as_str(), "BOXFOX85M01H501K");
    }

    #[tokio::test]
    async fn empty_names_encode_as_padding() {
        let svc = service();
        let code = svc
            .compute(&input("", "", (1985, 8, 1), Sex::Male, "Roma"))
            .await
            .unwrap();
        assert_eq!(code.as_str(), "XXXXXX85M01H501Y");
    }

    #[tokio::test]
    async fn output_shape_invariant_holds() {
        let svc = service();
        let code = svc
            .compute(&input("Rossi", "Mario", (2005, 2, 28), Sex::Female, "Milano"))
            .await
            .unwrap();
        assert_eq!(code.as_str().len(), 16);
        assert!(code.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(code.control_char().is_ascii_uppercase());
    }

    #[tokio::test]
    async fn computation_is_deterministic() {
        let svc = service();
        let person = input("Rossi", "Mario", (1985, 8, 1), Sex::Male, "Roma");
        let first = svc.compute(&person).await.unwrap();
        let second = svc.compute(&person).await.unwrap();
        assert_eq!(first, second);
    }

    // -- segment composition --

    #[tokio::test]
    async fn family_name_touches_only_its_segment_and_checksum() {
        let svc = service();
        let a = svc
            .compute(&input("Rossi", "Mario", (1985, 8, 1), Sex::Male, "Roma"))
            .await
            .unwrap();
        let b = svc
            .compute(&input("Bianchi", "Mario", (1985, 8, 1), Sex::Male, "Roma"))
            .await
            .unwrap();
        assert_eq!(b.as_str(), "BNCMRA85M01H501W");
        assert_ne!(&a.as_str()[0..3], &b.as_str()[0..3]);
        assert_eq!(&a.as_str()[3..15], &b.as_str()[3..15]);
    }

    #[tokio::test]
    async fn place_touches_only_its_segment_and_checksum() {
        let svc = service();
        let roma = svc
            .compute(&input("Rossi", "Mario", (1985, 8, 1), Sex::Male, "Roma"))
            .await
            .unwrap();
        let milano = svc
            .compute(&input("Rossi", "Mario", (1985, 8, 1), Sex::Male, "Milano"))
            .await
            .unwrap();
        assert_eq!(milano.as_str(), "RSSMRA85M01F205T");
        assert_eq!(&roma.as_str()[0..11], &milano.as_str()[0..11]);
        assert_ne!(&roma.as_str()[11..15], &milano.as_str()[11..15]);
    }

    #[tokio::test]
    async fn sex_touches_only_the_day_segment_and_checksum() {
        let svc = service();
        let male = svc
            .compute(&input("Rossi", "Mario", (1985, 8, 1), Sex::Male, "Roma"))
            .await
            .unwrap();
        let female = svc
            .compute(&input("Rossi", "Mario", (1985, 8, 1), Sex::Female, "Roma"))
            .await
            .unwrap();
        assert_eq!(&male.as_str()[0..9], &female.as_str()[0..9]);
        assert_eq!(&male.as_str()[9..11], "01");
        assert_eq!(&female.as_str()[9..11], "41");
        assert_eq!(&male.as_str()[11..15], &female.as_str()[11..15]);
    }

    // -- failure propagation --

    #[tokio::test]
    async fn unknown_place_is_a_domain_error() {
        let svc = service();
        let err = svc
            .compute(&input("Rossi", "Mario", (1985, 8, 1), Sex::Male, "Atlantide"))
            .await
            .unwrap_err();
        match err {
            FiscalCodeError::PlaceNotFound(name) => assert_eq!(name, "Atlantide"),
            other => panic!("expected PlaceNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn place_lookup_is_case_insensitive_end_to_end() {
        let svc = service();
        let code = svc
            .compute(&input("Rossi", "Mario", (1985, 8, 1), Sex::Male, "ROMA"))
            .await
            .unwrap();
        assert_eq!(code.as_str(), "RSSMRA85M01H501Q");
    }

    #[derive(Debug)]
    struct FailingResolver;

    #[async_trait]
    impl PlaceCodeResolver for FailingResolver {
        async fn resolve(&self, _place_name: &str) -> Result<Option<PlaceCode>, ResolveError> {
            Err(ResolveError::Backend {
                reason: "store offline".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn backend_failure_propagates_as_system_error() {
        let svc = FiscalCodeService::new(Arc::new(FailingResolver), ControlTables::reference());
        let err = svc
            .compute(&input("Rossi", "Mario", (1985, 8, 1), Sex::Male, "Roma"))
            .await
            .unwrap_err();
        assert!(matches!(err, FiscalCodeError::Resolve(_)));
    }
}
