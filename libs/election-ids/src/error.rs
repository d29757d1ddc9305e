//! Error types for identifier parsing, validation, and construction.

use thiserror::Error;

use crate::types::ElectionType;

/// Rule violations raised while building or parsing an identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The election type is not one of the known types.
    #[error("unknown election type '{value}': allowed values are {allowed}")]
    UnknownElectionType { value: String, allowed: String },

    /// The date segment is not a valid `YYYY-MM-DD` date.
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// The subtype is not one of the subtypes declared for the election type.
    #[error("invalid subtype '{subtype}' for {election_type}: allowed values are {allowed}")]
    InvalidSubtype {
        election_type: ElectionType,
        subtype: String,
        allowed: String,
    },

    /// The election type does not have subtypes.
    #[error("election type {election_type} may not have a subtype")]
    SubtypeNotAllowed { election_type: ElectionType },

    /// The election type has subtypes and one must be set.
    #[error("subtype must be specified for election type {election_type}")]
    SubtypeRequired { election_type: ElectionType },

    /// The election type does not have organisations.
    #[error("election type {election_type} may not have an organisation")]
    OrganisationNotAllowed { election_type: ElectionType },

    /// The identifier being rendered needs an organisation.
    #[error("election type {election_type} must have an organisation")]
    OrganisationRequired { election_type: ElectionType },

    /// Divisions are not allowed for the election type (and subtype).
    #[error("election type {election_type} may not have a division")]
    DivisionNotAllowed { election_type: ElectionType },

    /// A ballot id needs a division for the election type (and subtype).
    #[error("election type {election_type} must have a division in order to create a ballot id")]
    DivisionRequired { election_type: ElectionType },

    /// Division eligibility depends on the subtype, and none is set.
    #[error("election type {election_type} must have a valid subtype before setting a division")]
    DivisionRequiresPrecedingSubtype { election_type: ElectionType },

    /// A division was given without the organisation it belongs to.
    #[error("election type {election_type} must have an organisation in order to have a division")]
    DivisionRequiresOrganisation { election_type: ElectionType },

    /// The contest type is not a recognised value.
    #[error("invalid contest type '{value}': allowed values are by, by election, by-election, election")]
    InvalidContestType { value: String },

    /// Referenda can not be by-elections.
    #[error("election type {election_type} may not have a by-election")]
    ContestTypeNotAllowedForElectionType { election_type: ElectionType },

    /// An organisation or division slug would read back as the by-election
    /// marker.
    #[error("{kind} '{value}' is reserved for the by-election marker")]
    ReservedSegment { kind: &'static str, value: String },

    /// The identifier string does not have the expected shape.
    #[error("malformed identifier: {message}")]
    MalformedInput { message: String },
}

impl IdError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        IdError::MalformedInput {
            message: message.into(),
        }
    }

    /// Returns true if the input string itself was badly formed, as opposed
    /// to breaking an election type rule.
    pub fn is_malformed(&self) -> bool {
        matches!(self, IdError::MalformedInput { .. })
    }

    /// Returns true if the error only says a segment is still missing.
    ///
    /// These are the errors `IdBuilder::ids` skips over while a builder is
    /// partially filled in.
    pub fn is_missing_segment(&self) -> bool {
        matches!(
            self,
            IdError::SubtypeRequired { .. }
                | IdError::OrganisationRequired { .. }
                | IdError::DivisionRequired { .. }
                | IdError::DivisionRequiresPrecedingSubtype { .. }
        )
    }
}

/// Errors raised while loading an election type rule table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// The data package is not valid JSON or has the wrong shape.
    #[error("invalid rule data: {0}")]
    Parse(String),

    /// The data package has no entry for a known election type.
    #[error("rule data has no entry for election type {0}")]
    MissingElectionType(ElectionType),

    /// The data package names an election type that does not exist.
    #[error("rule data names unknown election type '{0}'")]
    UnknownElectionType(String),

    /// A per-subtype division rule was given for a type without subtypes.
    #[error("election type {0} has a per-subtype division rule but no subtypes")]
    DivisionRuleWithoutSubtypes(ElectionType),

    /// A per-subtype division rule names a subtype that is not declared.
    #[error("election type {election_type} has a division rule for undeclared subtype '{subtype}'")]
    UnknownSubtypeInDivisionRule {
        election_type: ElectionType,
        subtype: String,
    },

    /// A per-subtype division rule leaves out a declared subtype.
    #[error("election type {election_type} has no division rule for subtype '{subtype}'")]
    SubtypeMissingFromDivisionRule {
        election_type: ElectionType,
        subtype: String,
    },

    /// The process-wide rule table was already initialized.
    #[error("rule table is already installed")]
    AlreadyInstalled,
}

impl From<serde_json::Error> for RulesError {
    fn from(err: serde_json::Error) -> Self {
        RulesError::Parse(err.to_string())
    }
}
