//! Parsing and validating identifier strings.
//!
//! The grammar is positional. After the election type and the date are
//! taken from the two ends, the meaning of each middle segment depends on
//! which optional segments the election type supports, so they are consumed
//! in a fixed order:
//!
//! 1. a trailing `by` is the contest type,
//! 2. then the subtype, if the type has subtypes,
//! 3. then the organisation, if the type has organisations,
//! 4. then the division, if the type has divisions for that subtype.
//!
//! The contest type is the only segment recognised by its value. A trailing
//! `by` is always read as the contest type, even for election types where it
//! could also be an organisation or division slug.

use std::collections::VecDeque;
use std::str::FromStr;

use crate::builder::IdBuilder;
use crate::error::IdError;
use crate::slug::is_valid_token;

const CONTEST_TYPE_SEGMENT: &str = "by";

impl FromStr for IdBuilder {
    type Err = IdError;

    /// Parses an identifier, reporting the first rule it breaks.
    fn from_str(identifier: &str) -> Result<Self, Self::Err> {
        let mut segments: VecDeque<&str> = identifier.split('.').collect();

        if segments.len() < 2 {
            return Err(IdError::malformed(
                "expected at least an election type and a date",
            ));
        }

        if let Some(segment) = segments.iter().find(|s| !is_valid_token(s)) {
            return Err(IdError::malformed(format!(
                "segment '{segment}' contains invalid characters"
            )));
        }

        let (Some(election_type), Some(date)) = (segments.pop_front(), segments.pop_back()) else {
            return Err(IdError::malformed(
                "expected at least an election type and a date",
            ));
        };

        let mut builder = IdBuilder::new(election_type, date)?;
        if segments.is_empty() {
            return Ok(builder);
        }

        if segments.back() == Some(&CONTEST_TYPE_SEGMENT) {
            segments.pop_back();
            builder = builder.with_contest_type(CONTEST_TYPE_SEGMENT)?;
        }

        if builder.spec().subtypes.is_enumerated() {
            let subtype = segments
                .pop_front()
                .ok_or_else(|| IdError::malformed("missing subtype segment"))?;
            builder = builder.with_subtype(subtype)?;
        }

        if builder.spec().can_have_orgs {
            if let Some(organisation) = segments.pop_front() {
                builder = builder.with_organisation(organisation)?;
            }
        }

        if builder.spec().can_have_divs(builder.subtype())? {
            if let Some(division) = segments.pop_front() {
                builder = builder.with_division(division)?;
            }
        }

        if !segments.is_empty() {
            return Err(IdError::malformed(format!(
                "unexpected segments: {}",
                Vec::from(segments).join(".")
            )));
        }

        Ok(builder)
    }
}

/// Parses an identifier into a builder.
///
/// Returns `None` for any identifier that is not well formed. Use
/// `identifier.parse::<IdBuilder>()` to find out why.
///
/// ```
/// use uk_election_ids::parse;
///
/// let builder = parse("gla.c.barnet-and-camden.2021-05-06").unwrap();
/// assert_eq!(builder.subtype(), Some("c"));
/// assert_eq!(builder.division(), Some("barnet-and-camden"));
/// assert!(parse("gla.x.2021-05-06").is_none());
/// ```
#[must_use]
pub fn parse(identifier: &str) -> Option<IdBuilder> {
    match identifier.parse() {
        Ok(builder) => Some(builder),
        Err(err) => {
            tracing::debug!(identifier, error = %err, "Rejected election identifier");
            None
        }
    }
}

/// Returns true if `identifier` is a well-formed election identifier.
#[must_use]
pub fn validate(identifier: &str) -> bool {
    parse(identifier).is_some()
}

/// Validates an untyped value. Anything but a JSON string is rejected.
#[must_use]
pub fn validate_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::String(identifier) => validate(identifier),
        other => {
            tracing::debug!(value = %other, "Rejected non-string election identifier");
            false
        }
    }
}
