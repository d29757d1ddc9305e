//! Typed segment definitions for election identifiers.
//!
//! Each identifier is `type[.subtype][.organisation][.division][.by].date`.
//! The election type and contest type are closed sets; organisation and
//! division are free-text names normalized to slugs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::define_segment;
use crate::error::IdError;
use crate::rules::{self, ElectionTypeSpec};

// =============================================================================
// Election Type
// =============================================================================

/// Top-level category of an election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectionType {
    /// European Parliament (UK constituencies).
    Europarl,
    /// Greater London Assembly.
    Gla,
    /// Local authority elections.
    Local,
    /// Directly elected mayors.
    Mayor,
    /// National Assembly for Wales.
    Naw,
    /// Northern Ireland Assembly.
    Nia,
    /// UK Parliament.
    Parl,
    /// Police and Crime Commissioner.
    Pcc,
    /// Scottish Parliament.
    Sp,
    /// Senedd Cymru.
    Senedd,
    /// Referendum.
    Ref,
}

impl ElectionType {
    /// Every election type, in the order they are listed to users.
    pub const ALL: [ElectionType; 11] = [
        Self::Europarl,
        Self::Gla,
        Self::Local,
        Self::Mayor,
        Self::Naw,
        Self::Nia,
        Self::Parl,
        Self::Pcc,
        Self::Sp,
        Self::Senedd,
        Self::Ref,
    ];

    /// Returns the identifier segment for this election type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Europarl => "europarl",
            Self::Gla => "gla",
            Self::Local => "local",
            Self::Mayor => "mayor",
            Self::Naw => "naw",
            Self::Nia => "nia",
            Self::Parl => "parl",
            Self::Pcc => "pcc",
            Self::Sp => "sp",
            Self::Senedd => "senedd",
            Self::Ref => "ref",
        }
    }

    /// Parses an election type from its identifier segment.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        Self::ALL
            .into_iter()
            .find(|election_type| election_type.as_str() == s)
            .ok_or_else(|| IdError::UnknownElectionType {
                value: s.to_string(),
                allowed: Self::ALL.map(|t| t.as_str()).join(", "),
            })
    }

    /// Returns the rules for this election type from the installed table.
    #[must_use]
    pub fn spec(&self) -> &'static ElectionTypeSpec {
        rules::rules().get(*self)
    }
}

impl fmt::Display for ElectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElectionType {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Contest Type
// =============================================================================

/// Whether a contest is a scheduled election or a by-election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContestType {
    #[serde(rename = "election")]
    Election,
    #[serde(rename = "by")]
    ByElection,
}

impl ContestType {
    /// Accepted spellings, matched case-insensitively.
    pub const ACCEPTED: [&'static str; 4] = ["by", "by election", "by-election", "election"];

    /// Parses a contest type, ignoring case.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        match s.to_lowercase().as_str() {
            "by" | "by election" | "by-election" => Ok(Self::ByElection),
            "election" => Ok(Self::Election),
            _ => Err(IdError::InvalidContestType {
                value: s.to_string(),
            }),
        }
    }

    /// Returns the segment this contest type adds to a ballot id, if any.
    #[must_use]
    pub const fn marker(&self) -> Option<&'static str> {
        match self {
            Self::Election => None,
            Self::ByElection => Some("by"),
        }
    }
}

impl FromStr for ContestType {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Organisation and Division
// =============================================================================

define_segment!(Organisation, "organisation");
define_segment!(Division, "division");

// =============================================================================
// Dates
// =============================================================================

/// Canonical date format of the final segment.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the date segment of an identifier.
///
/// Only the zero-padded form is accepted, so `2021-5-6` is rejected.
pub fn parse_date(s: &str) -> Result<NaiveDate, IdError> {
    let invalid = || IdError::InvalidDate {
        value: s.to_string(),
    };
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid())?;
    if format_date(date) != s {
        return Err(invalid());
    }
    Ok(date)
}

/// Formats a date as an identifier segment.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_election_type_roundtrip() {
        for election_type in ElectionType::ALL {
            let parsed: ElectionType = election_type.as_str().parse().unwrap();
            assert_eq!(parsed, election_type);
        }
    }

    #[test]
    fn test_election_type_unknown() {
        let result: Result<ElectionType, _> = "council".parse();
        assert!(matches!(
            result.unwrap_err(),
            IdError::UnknownElectionType { .. }
        ));
    }

    #[test]
    fn test_election_type_is_case_sensitive() {
        assert!(ElectionType::parse("Local").is_err());
    }

    #[test]
    fn test_all_election_type_segments_unique() {
        let segments: std::collections::HashSet<_> =
            ElectionType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(segments.len(), ElectionType::ALL.len());
    }

    #[test]
    fn test_contest_type_spellings() {
        assert_eq!(ContestType::parse("by").unwrap(), ContestType::ByElection);
        assert_eq!(ContestType::parse("By-Election").unwrap(), ContestType::ByElection);
        assert_eq!(ContestType::parse("BY ELECTION").unwrap(), ContestType::ByElection);
        assert_eq!(ContestType::parse("election").unwrap(), ContestType::Election);
        for accepted in ContestType::ACCEPTED {
            assert!(ContestType::parse(accepted).is_ok());
        }
    }

    #[test]
    fn test_contest_type_invalid() {
        assert!(matches!(
            ContestType::parse("byelection").unwrap_err(),
            IdError::InvalidContestType { .. }
        ));
    }

    #[test]
    fn test_contest_type_marker() {
        assert_eq!(ContestType::ByElection.marker(), Some("by"));
        assert_eq!(ContestType::Election.marker(), None);
    }

    #[test]
    fn test_segment_normalizes_names() {
        let org = Organisation::new("Barnet and Camden").unwrap();
        assert_eq!(org.as_str(), "barnet-and-camden");
        assert!(Division::new("  ...  ").is_none());
    }

    #[test]
    fn test_segment_parse_requires_slug() {
        assert!(Organisation::parse("arfon").is_ok());
        let err = Division::parse("Arfon").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_segment_json_roundtrip() {
        let div = Division::new("Cardiff Central").unwrap();
        let json = serde_json::to_string(&div).unwrap();
        assert_eq!(json, "\"cardiff-central\"");
        let parsed: Division = serde_json::from_str(&json).unwrap();
        assert_eq!(div, parsed);
        assert!(serde_json::from_str::<Division>("\"Cardiff Central\"").is_err());
    }

    #[test]
    fn test_date_canonical() {
        let date = parse_date("2021-05-06").unwrap();
        assert_eq!(format_date(date), "2021-05-06");
    }

    #[test]
    fn test_date_invalid() {
        assert!(matches!(
            parse_date("2021-02-30").unwrap_err(),
            IdError::InvalidDate { .. }
        ));
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("2021-5-6").is_err());
    }
}
