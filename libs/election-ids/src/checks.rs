//! Single-constraint checks against the rules for a builder's election type.
//!
//! Each check looks at one rule and fails with the violation for that rule.
//! The builder composes them; none of them mutate state.

use crate::builder::IdBuilder;
use crate::error::IdError;
use crate::rules::Subtypes;
use crate::types::{ContestType, Division, ElectionType, Organisation};

/// Checks shared by every rendered identifier.
pub(crate) fn base(builder: &IdBuilder) -> Result<(), IdError> {
    organisation_allowed(builder)?;
    division_has_organisation(builder)?;
    contest_type_allowed(builder)
}

/// A set subtype must be one the election type declares.
pub(crate) fn subtype_valid(builder: &IdBuilder) -> Result<(), IdError> {
    let Some(subtype) = builder.subtype() else {
        return Ok(());
    };
    let spec = builder.spec();

    match &spec.subtypes {
        Subtypes::Enumerated(_) if spec.subtypes.contains(subtype) => Ok(()),
        Subtypes::Enumerated(_) => Err(IdError::InvalidSubtype {
            election_type: spec.election_type,
            subtype: subtype.to_string(),
            allowed: spec.subtypes.codes().join(", "),
        }),
        Subtypes::NotApplicable => Err(IdError::SubtypeNotAllowed {
            election_type: spec.election_type,
        }),
    }
}

/// The election type must have subtypes at all.
pub(crate) fn subtypes_supported(builder: &IdBuilder) -> Result<(), IdError> {
    if builder.spec().subtypes.is_enumerated() {
        Ok(())
    } else {
        Err(IdError::SubtypeNotAllowed {
            election_type: builder.election_type(),
        })
    }
}

/// Election types with subtypes need one set.
pub(crate) fn subtype_present(builder: &IdBuilder) -> Result<(), IdError> {
    if builder.spec().subtypes.is_enumerated() && builder.subtype().is_none() {
        return Err(IdError::SubtypeRequired {
            election_type: builder.election_type(),
        });
    }
    Ok(())
}

pub(crate) fn organisation_allowed(builder: &IdBuilder) -> Result<(), IdError> {
    if builder.organisation().is_some() && !builder.spec().can_have_orgs {
        return Err(IdError::OrganisationNotAllowed {
            election_type: builder.election_type(),
        });
    }
    Ok(())
}

pub(crate) fn organisations_supported(builder: &IdBuilder) -> Result<(), IdError> {
    if builder.spec().can_have_orgs {
        Ok(())
    } else {
        Err(IdError::OrganisationNotAllowed {
            election_type: builder.election_type(),
        })
    }
}

/// Election types with organisations need one set.
pub(crate) fn organisation_present(builder: &IdBuilder) -> Result<(), IdError> {
    if builder.spec().can_have_orgs && builder.organisation().is_none() {
        return Err(IdError::OrganisationRequired {
            election_type: builder.election_type(),
        });
    }
    Ok(())
}

/// Resolves whether divisions are allowed for the current subtype, and
/// rejects a set division when they are not.
pub(crate) fn division_allowed(builder: &IdBuilder) -> Result<bool, IdError> {
    let allowed = builder.spec().can_have_divs(builder.subtype())?;
    if !allowed && builder.division().is_some() {
        return Err(IdError::DivisionNotAllowed {
            election_type: builder.election_type(),
        });
    }
    Ok(allowed)
}

pub(crate) fn division_present(builder: &IdBuilder) -> Result<(), IdError> {
    if division_allowed(builder)? && builder.division().is_none() {
        return Err(IdError::DivisionRequired {
            election_type: builder.election_type(),
        });
    }
    Ok(())
}

/// For types with organisations, a division sits under an organisation.
pub(crate) fn division_has_organisation(builder: &IdBuilder) -> Result<(), IdError> {
    let spec = builder.spec();
    if builder.division().is_none() || builder.organisation().is_some() || !spec.can_have_orgs {
        return Ok(());
    }
    if spec.can_have_divs(builder.subtype())? {
        return Err(IdError::DivisionRequiresOrganisation {
            election_type: spec.election_type,
        });
    }
    Ok(())
}

/// Organisation and division slugs may not be the by-election marker, or
/// the rendered identifier would not parse back.
pub(crate) fn segments_not_reserved(builder: &IdBuilder) -> Result<(), IdError> {
    let reserved = ContestType::ByElection.marker();
    let segments = [
        (Organisation::KIND, builder.organisation()),
        (Division::KIND, builder.division()),
    ];
    match segments
        .into_iter()
        .find(|(_, value)| value.is_some() && *value == reserved)
    {
        Some((kind, Some(value))) => Err(IdError::ReservedSegment {
            kind,
            value: value.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Referenda are never re-run as by-elections.
pub(crate) fn contest_type_allowed(builder: &IdBuilder) -> Result<(), IdError> {
    if builder.contest_type() == Some(ContestType::ByElection)
        && builder.election_type() == ElectionType::Ref
    {
        return Err(IdError::ContestTypeNotAllowedForElectionType {
            election_type: builder.election_type(),
        });
    }
    Ok(())
}
