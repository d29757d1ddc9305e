//! Identifier builder.
//!
//! An [`IdBuilder`] starts from an election type and a date. Optional
//! segments are added with the `with_*` methods, each of which consumes the
//! builder and returns the updated one, or the rule the new segment breaks.
//! The rendering methods re-check the current state every time they are
//! called.
//!
//! ```
//! use uk_election_ids::IdBuilder;
//!
//! let builder = IdBuilder::new("local", "2021-05-06")?
//!     .with_organisation("Gwynedd")?
//!     .with_division("Arfon")?;
//!
//! assert_eq!(builder.ballot_id()?, "local.gwynedd.arfon.2021-05-06");
//! assert_eq!(
//!     builder.ids(),
//!     vec![
//!         "local.2021-05-06",
//!         "local.gwynedd.2021-05-06",
//!         "local.gwynedd.arfon.2021-05-06",
//!     ]
//! );
//! # Ok::<(), uk_election_ids::IdError>(())
//! ```

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::checks;
use crate::error::IdError;
use crate::rules::ElectionTypeSpec;
use crate::types::{format_date, parse_date, ContestType, Division, ElectionType, Organisation};

/// Builder for election identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdBuilder {
    election_type: ElectionType,
    date: NaiveDate,
    subtype: Option<String>,
    organisation: Option<Organisation>,
    division: Option<Division>,
    contest_type: Option<ContestType>,
}

impl IdBuilder {
    /// Creates a builder from an election type segment and a `YYYY-MM-DD`
    /// date.
    pub fn new(election_type: &str, date: &str) -> Result<Self, IdError> {
        let election_type = ElectionType::parse(election_type)?;
        let date = parse_date(date)?;
        Self::from_parts(election_type, date)
    }

    /// Creates a builder from already-typed parts.
    ///
    /// The year must fit the four-digit date segment (0000 to 9999).
    pub fn from_parts(election_type: ElectionType, date: NaiveDate) -> Result<Self, IdError> {
        if !(0..=9999).contains(&date.year()) {
            return Err(IdError::InvalidDate {
                value: date.to_string(),
            });
        }
        Ok(Self {
            election_type,
            date,
            subtype: None,
            organisation: None,
            division: None,
            contest_type: None,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn election_type(&self) -> ElectionType {
        self.election_type
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    #[must_use]
    pub fn organisation(&self) -> Option<&str> {
        self.organisation.as_ref().map(Organisation::as_str)
    }

    #[must_use]
    pub fn division(&self) -> Option<&str> {
        self.division.as_ref().map(Division::as_str)
    }

    /// Returns the contest type. Only by-elections are recorded.
    #[must_use]
    pub fn contest_type(&self) -> Option<ContestType> {
        self.contest_type
    }

    /// Returns the rules for this builder's election type.
    #[must_use]
    pub fn spec(&self) -> &'static ElectionTypeSpec {
        self.election_type.spec()
    }

    // =========================================================================
    // Transformers
    // =========================================================================

    /// Sets the subtype.
    ///
    /// The subtype must be one of the codes the election type declares. An
    /// empty subtype is accepted, and ignored, for types without subtypes.
    pub fn with_subtype(self, subtype: &str) -> Result<Self, IdError> {
        if subtype.is_empty() && !self.spec().subtypes.is_enumerated() {
            return Ok(self);
        }
        let next = Self {
            subtype: Some(subtype.to_string()),
            ..self
        };
        checks::subtype_valid(&next)?;
        Ok(next)
    }

    /// Sets the organisation from its official name.
    ///
    /// The name is normalized to a slug. A name that normalizes to nothing
    /// clears the organisation. A name that normalizes to `by` is rejected.
    pub fn with_organisation(self, organisation: &str) -> Result<Self, IdError> {
        let next = Self {
            organisation: Organisation::new(organisation),
            ..self
        };
        checks::organisation_allowed(&next)?;
        checks::segments_not_reserved(&next)?;
        Ok(next)
    }

    /// Sets the division from its official name.
    ///
    /// The name is normalized to a slug. When the election type has
    /// organisations, the organisation must be set first. A name that
    /// normalizes to `by` is rejected.
    pub fn with_division(self, division: &str) -> Result<Self, IdError> {
        let next = Self {
            division: Division::new(division),
            ..self
        };
        checks::division_allowed(&next)?;
        checks::segments_not_reserved(&next)?;
        checks::division_has_organisation(&next)?;
        Ok(next)
    }

    /// Sets the contest type.
    ///
    /// `by`, `by-election` and `by election` (any case) mark a by-election
    /// and add a `by` segment to the ballot id. `election` and the empty
    /// string are accepted and change nothing.
    pub fn with_contest_type(self, contest_type: &str) -> Result<Self, IdError> {
        if contest_type.is_empty() {
            return Ok(self);
        }
        match ContestType::parse(contest_type)? {
            ContestType::Election => Ok(self),
            ContestType::ByElection => {
                let next = Self {
                    contest_type: Some(ContestType::ByElection),
                    ..self
                };
                checks::contest_type_allowed(&next)?;
                Ok(next)
            }
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// `type.date`
    pub fn election_group_id(&self) -> Result<String, IdError> {
        checks::base(self)?;
        Ok(self.assemble(&[]))
    }

    /// `type.subtype.date`
    pub fn subtype_group_id(&self) -> Result<String, IdError> {
        checks::base(self)?;
        checks::subtypes_supported(self)?;
        checks::subtype_present(self)?;
        checks::subtype_valid(self)?;
        Ok(self.assemble(&[self.subtype()]))
    }

    /// `type[.subtype].organisation.date`
    pub fn organisation_group_id(&self) -> Result<String, IdError> {
        checks::base(self)?;
        checks::subtype_present(self)?;
        checks::subtype_valid(self)?;
        checks::organisations_supported(self)?;
        checks::organisation_present(self)?;
        Ok(self.assemble(&[self.subtype(), self.organisation()]))
    }

    /// `type[.subtype][.organisation][.division][.by].date`
    pub fn ballot_id(&self) -> Result<String, IdError> {
        checks::base(self)?;
        checks::subtype_present(self)?;
        checks::subtype_valid(self)?;
        checks::organisation_present(self)?;
        checks::division_present(self)?;
        Ok(self.assemble(&[
            self.subtype(),
            self.organisation(),
            self.division(),
            self.contest_type.and_then(|c| c.marker()),
        ]))
    }

    /// Returns every identifier the current state fully determines, from
    /// least to most specific, without duplicates.
    ///
    /// Identifiers that can not be rendered yet are left out.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let spec = self.spec();
        let mut ids = Vec::with_capacity(4);

        ids.extend(self.election_group_id().ok());

        if spec.subtypes.is_enumerated() {
            ids.extend(self.subtype_group_id().ok());
        }

        if spec.can_have_orgs {
            ids.extend(self.organisation_group_id().ok());
        }

        // A ballot id with no optional segments is the same string as a
        // group id.
        if let Ok(ballot_id) = self.ballot_id() {
            if !ids.contains(&ballot_id) {
                ids.push(ballot_id);
            }
        }

        ids
    }

    fn assemble(&self, middle: &[Option<&str>]) -> String {
        let date = format_date(self.date);
        let mut parts = vec![self.election_type.as_str()];
        parts.extend(middle.iter().flatten().copied());
        parts.push(&date);
        parts.join(".")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DATE: &str = "2021-05-06";

    #[test]
    fn test_new_rejects_unknown_type() {
        assert!(matches!(
            IdBuilder::new("council", DATE).unwrap_err(),
            IdError::UnknownElectionType { .. }
        ));
    }

    #[test]
    fn test_new_rejects_bad_date() {
        assert!(matches!(
            IdBuilder::new("local", "2021-13-01").unwrap_err(),
            IdError::InvalidDate { .. }
        ));
    }

    #[test]
    fn test_from_parts_matches_new() {
        let date = NaiveDate::from_ymd_opt(2021, 5, 6).unwrap();
        assert_eq!(
            IdBuilder::from_parts(ElectionType::Local, date).unwrap(),
            IdBuilder::new("local", DATE).unwrap()
        );
    }

    #[test]
    fn test_from_parts_rejects_years_outside_date_segment() {
        let last = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        let builder = IdBuilder::from_parts(ElectionType::Parl, last).unwrap();
        assert_eq!(builder.election_group_id().unwrap(), "parl.9999-12-31");
        assert!(crate::validate("parl.9999-12-31"));

        let first = NaiveDate::from_ymd_opt(0, 1, 1).unwrap();
        let builder = IdBuilder::from_parts(ElectionType::Parl, first).unwrap();
        assert_eq!(builder.election_group_id().unwrap(), "parl.0000-01-01");

        for (year, month, day) in [(10000, 1, 1), (-1, 12, 31)] {
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            assert!(matches!(
                IdBuilder::from_parts(ElectionType::Parl, date).unwrap_err(),
                IdError::InvalidDate { .. }
            ));
        }
    }

    #[test]
    fn test_reserved_by_slug_never_renders() {
        let builder = IdBuilder::new("ref", DATE).unwrap();
        let err = builder.clone().with_organisation("By").unwrap_err();
        assert!(matches!(err, IdError::ReservedSegment { .. }));
        assert_eq!(builder.ids(), vec!["ref.2021-05-06"]);

        let builder = builder.with_organisation("Gwynedd").unwrap();
        assert!(matches!(
            builder.with_division(" by ").unwrap_err(),
            IdError::ReservedSegment { kind: "division", .. }
        ));
    }

    #[test]
    fn test_election_group_id() {
        let builder = IdBuilder::new("parl", DATE).unwrap();
        assert_eq!(builder.election_group_id().unwrap(), "parl.2021-05-06");
    }

    #[test]
    fn test_local_ballot() {
        let builder = IdBuilder::new("local", DATE)
            .unwrap()
            .with_organisation("Gwynedd")
            .unwrap()
            .with_division("Arfon")
            .unwrap();
        assert_eq!(builder.organisation(), Some("gwynedd"));
        assert_eq!(builder.division(), Some("arfon"));
        assert_eq!(
            builder.organisation_group_id().unwrap(),
            "local.gwynedd.2021-05-06"
        );
        assert_eq!(builder.ballot_id().unwrap(), "local.gwynedd.arfon.2021-05-06");
    }

    #[test]
    fn test_by_election_marker_precedes_date() {
        let builder = IdBuilder::new("parl", DATE)
            .unwrap()
            .with_division("Batley and Spen")
            .unwrap()
            .with_contest_type("by-election")
            .unwrap();
        assert_eq!(builder.contest_type(), Some(ContestType::ByElection));
        assert_eq!(builder.ballot_id().unwrap(), "parl.batley-and-spen.by.2021-05-06");
        assert_eq!(builder.election_group_id().unwrap(), "parl.2021-05-06");
    }

    #[test]
    fn test_contest_type_election_is_a_no_op() {
        let builder = IdBuilder::new("local", DATE).unwrap();
        let same = builder.clone().with_contest_type("Election").unwrap();
        assert_eq!(builder, same);
        let same = builder.clone().with_contest_type("").unwrap();
        assert_eq!(builder, same);
    }

    #[test]
    fn test_invalid_contest_type() {
        let err = IdBuilder::new("local", DATE)
            .unwrap()
            .with_contest_type("runoff")
            .unwrap_err();
        assert!(matches!(err, IdError::InvalidContestType { .. }));
    }

    #[test]
    fn test_referendum_rejects_by_election() {
        let err = IdBuilder::new("ref", DATE)
            .unwrap()
            .with_contest_type("by")
            .unwrap_err();
        assert!(matches!(
            err,
            IdError::ContestTypeNotAllowedForElectionType {
                election_type: ElectionType::Ref
            }
        ));
    }

    #[test]
    fn test_division_requires_organisation() {
        let err = IdBuilder::new("local", DATE)
            .unwrap()
            .with_division("arfon")
            .unwrap_err();
        assert!(matches!(err, IdError::DivisionRequiresOrganisation { .. }));
    }

    #[test]
    fn test_subtype_rules() {
        let err = IdBuilder::new("naw", DATE)
            .unwrap()
            .with_subtype("x")
            .unwrap_err();
        assert!(matches!(err, IdError::InvalidSubtype { .. }));

        let err = IdBuilder::new("local", DATE)
            .unwrap()
            .with_subtype("c")
            .unwrap_err();
        assert!(matches!(err, IdError::SubtypeNotAllowed { .. }));

        let builder = IdBuilder::new("local", DATE).unwrap().with_subtype("").unwrap();
        assert_eq!(builder.subtype(), None);
    }

    #[test]
    fn test_subtype_types_need_subtype() {
        let builder = IdBuilder::new("naw", DATE).unwrap();
        assert_eq!(builder.election_group_id().unwrap(), "naw.2021-05-06");
        assert!(matches!(
            builder.subtype_group_id().unwrap_err(),
            IdError::SubtypeRequired { .. }
        ));
        assert!(matches!(
            builder.organisation_group_id().unwrap_err(),
            IdError::SubtypeRequired { .. }
        ));
        assert!(matches!(
            builder.ballot_id().unwrap_err(),
            IdError::SubtypeRequired { .. }
        ));
        assert_eq!(builder.ids(), vec!["naw.2021-05-06"]);
    }

    #[test]
    fn test_division_needs_subtype_when_rule_is_per_subtype() {
        let err = IdBuilder::new("gla", DATE)
            .unwrap()
            .with_division("barnet and camden")
            .unwrap_err();
        assert!(matches!(err, IdError::DivisionRequiresPrecedingSubtype { .. }));
    }

    #[test]
    fn test_gla_additional_has_no_divisions() {
        let builder = IdBuilder::new("gla", DATE).unwrap().with_subtype("a").unwrap();
        let err = builder.clone().with_division("barnet").unwrap_err();
        assert!(matches!(err, IdError::DivisionNotAllowed { .. }));
        assert_eq!(builder.ballot_id().unwrap(), "gla.a.2021-05-06");
        assert_eq!(builder.ids(), vec!["gla.2021-05-06", "gla.a.2021-05-06"]);
    }

    #[test]
    fn test_gla_constituency_ballot() {
        let builder = IdBuilder::new("gla", DATE)
            .unwrap()
            .with_subtype("c")
            .unwrap()
            .with_division("Barnet and Camden")
            .unwrap();
        assert_eq!(
            builder.ids(),
            vec![
                "gla.2021-05-06",
                "gla.c.2021-05-06",
                "gla.c.barnet-and-camden.2021-05-06",
            ]
        );
    }

    #[test]
    fn test_group_ids_not_applicable() {
        let parl = IdBuilder::new("parl", DATE).unwrap();
        assert!(matches!(
            parl.subtype_group_id().unwrap_err(),
            IdError::SubtypeNotAllowed { .. }
        ));
        assert!(matches!(
            parl.organisation_group_id().unwrap_err(),
            IdError::OrganisationNotAllowed { .. }
        ));
        assert!(matches!(
            parl.with_organisation("Arfon").unwrap_err(),
            IdError::OrganisationNotAllowed { .. }
        ));
    }

    #[test]
    fn test_ballot_requires_division() {
        let builder = IdBuilder::new("local", DATE)
            .unwrap()
            .with_organisation("Gwynedd")
            .unwrap();
        let err = builder.ballot_id().unwrap_err();
        assert!(matches!(err, IdError::DivisionRequired { .. }));
        assert!(err.is_missing_segment());
        assert_eq!(builder.ids(), vec!["local.2021-05-06", "local.gwynedd.2021-05-06"]);
    }

    #[test]
    fn test_ballot_requires_organisation() {
        let builder = IdBuilder::new("mayor", DATE).unwrap();
        assert!(matches!(
            builder.ballot_id().unwrap_err(),
            IdError::OrganisationRequired { .. }
        ));
    }

    #[test]
    fn test_ballot_without_optional_segments_is_not_duplicated() {
        let builder = IdBuilder::new("europarl", DATE)
            .unwrap()
            .with_division("South East")
            .unwrap();
        assert_eq!(
            builder.ids(),
            vec!["europarl.2021-05-06", "europarl.south-east.2021-05-06"]
        );

        let builder = IdBuilder::new("mayor", DATE)
            .unwrap()
            .with_organisation("London")
            .unwrap();
        assert_eq!(builder.ids(), vec!["mayor.2021-05-06", "mayor.london.2021-05-06"]);
    }

    #[test]
    fn test_clearing_organisation_breaks_rendering() {
        let builder = IdBuilder::new("local", DATE)
            .unwrap()
            .with_organisation("Gwynedd")
            .unwrap()
            .with_division("Arfon")
            .unwrap()
            .with_organisation("")
            .unwrap();
        assert!(matches!(
            builder.election_group_id().unwrap_err(),
            IdError::DivisionRequiresOrganisation { .. }
        ));
        assert!(builder.ids().is_empty());
    }

    #[test]
    fn test_serializes_segments() {
        let builder = IdBuilder::new("local", DATE)
            .unwrap()
            .with_organisation("Gwynedd")
            .unwrap()
            .with_contest_type("by")
            .unwrap();
        let value = serde_json::to_value(&builder).unwrap();
        assert_eq!(value["election_type"], "local");
        assert_eq!(value["date"], "2021-05-06");
        assert_eq!(value["organisation"], "gwynedd");
        assert_eq!(value["contest_type"], "by");
        assert!(value["division"].is_null());
    }
}
