//! Per-election-type rules.
//!
//! The rules say which optional segments an election type may carry. They
//! are loaded from a JSON data package; the default package is embedded in
//! the crate. The process-wide table is initialized once and never mutated
//! afterwards, so it can be read from any thread without locking.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{IdError, RulesError};
use crate::types::ElectionType;

/// The data package shipped with the crate.
pub const DEFAULT_RULES: &str = include_str!("../data/election_types.json");

static RULES: OnceLock<RuleTable> = OnceLock::new();

/// Returns the process-wide rule table, loading the embedded package on
/// first use unless another table was installed.
pub fn rules() -> &'static RuleTable {
    RULES.get_or_init(RuleTable::embedded)
}

// =============================================================================
// Rule Types
// =============================================================================

/// A subtype code and its human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subtype {
    pub code: String,
    pub name: String,
}

/// The subtypes an election type may have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Subtypes {
    /// The election type never has a subtype segment.
    NotApplicable,
    /// A subtype segment from this list is part of every ballot id.
    Enumerated(Vec<Subtype>),
}

impl Subtypes {
    #[must_use]
    pub fn is_enumerated(&self) -> bool {
        matches!(self, Subtypes::Enumerated(_))
    }

    /// Returns true if `code` is one of the enumerated subtypes.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        match self {
            Subtypes::NotApplicable => false,
            Subtypes::Enumerated(subtypes) => subtypes.iter().any(|s| s.code == code),
        }
    }

    /// Returns the enumerated subtype codes, in declaration order.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        match self {
            Subtypes::NotApplicable => Vec::new(),
            Subtypes::Enumerated(subtypes) => subtypes.iter().map(|s| s.code.as_str()).collect(),
        }
    }
}

/// Whether an election type may have a division segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DivisionRule {
    /// The same answer for every subtype.
    Fixed(bool),
    /// The answer depends on the subtype.
    BySubtype(BTreeMap<String, bool>),
}

impl DivisionRule {
    /// Resolves the rule for the given subtype.
    ///
    /// A per-subtype rule can only be resolved once a known subtype is set.
    pub fn resolve(
        &self,
        election_type: ElectionType,
        subtype: Option<&str>,
    ) -> Result<bool, IdError> {
        match self {
            DivisionRule::Fixed(allowed) => Ok(*allowed),
            DivisionRule::BySubtype(by_subtype) => subtype
                .and_then(|code| by_subtype.get(code).copied())
                .ok_or(IdError::DivisionRequiresPrecedingSubtype { election_type }),
        }
    }
}

/// The rules for one election type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectionTypeSpec {
    pub election_type: ElectionType,
    pub name: String,
    pub subtypes: Subtypes,
    pub can_have_orgs: bool,
    pub can_have_divs: DivisionRule,
}

impl ElectionTypeSpec {
    /// Resolves division eligibility for the given subtype.
    pub fn can_have_divs(&self, subtype: Option<&str>) -> Result<bool, IdError> {
        self.can_have_divs.resolve(self.election_type, subtype)
    }
}

// =============================================================================
// Rule Table
// =============================================================================

/// Rules for every election type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    // Indexed by `ElectionType` discriminant, in `ElectionType::ALL` order.
    specs: Vec<ElectionTypeSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DataPackage {
    election_types: BTreeMap<String, RawSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSpec {
    name: String,
    subtypes: Option<Vec<Subtype>>,
    can_have_orgs: bool,
    can_have_divs: DivisionRule,
}

impl RawSpec {
    fn into_spec(self, election_type: ElectionType) -> Result<ElectionTypeSpec, RulesError> {
        let subtypes = match self.subtypes {
            Some(subtypes) if !subtypes.is_empty() => Subtypes::Enumerated(subtypes),
            _ => Subtypes::NotApplicable,
        };

        if let DivisionRule::BySubtype(by_subtype) = &self.can_have_divs {
            if !subtypes.is_enumerated() {
                return Err(RulesError::DivisionRuleWithoutSubtypes(election_type));
            }
            if let Some(code) = by_subtype.keys().find(|code| !subtypes.contains(code)) {
                return Err(RulesError::UnknownSubtypeInDivisionRule {
                    election_type,
                    subtype: code.clone(),
                });
            }
            if let Some(code) = subtypes
                .codes()
                .into_iter()
                .find(|code| !by_subtype.contains_key(*code))
            {
                return Err(RulesError::SubtypeMissingFromDivisionRule {
                    election_type,
                    subtype: code.to_string(),
                });
            }
        }

        Ok(ElectionTypeSpec {
            election_type,
            name: self.name,
            subtypes,
            can_have_orgs: self.can_have_orgs,
            can_have_divs: self.can_have_divs,
        })
    }
}

impl RuleTable {
    /// Parses a rule table from a JSON data package.
    ///
    /// Every election type must be present exactly once.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let package: DataPackage = serde_json::from_str(json)?;

        let mut parsed = BTreeMap::new();
        for (key, raw) in package.election_types {
            let election_type = ElectionType::parse(&key)
                .map_err(|_| RulesError::UnknownElectionType(key.clone()))?;
            parsed.insert(election_type, raw.into_spec(election_type)?);
        }

        let specs = ElectionType::ALL
            .into_iter()
            .map(|election_type| {
                parsed
                    .remove(&election_type)
                    .ok_or(RulesError::MissingElectionType(election_type))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { specs })
    }

    /// Parses the embedded data package.
    fn embedded() -> Self {
        let table = Self::from_json(DEFAULT_RULES).expect("embedded election type rules are valid");
        tracing::debug!(election_types = table.specs.len(), "Loaded embedded election type rules");
        table
    }

    /// Installs this table as the process-wide rule table.
    ///
    /// Fails if the table was already installed or already read.
    pub fn install(self) -> Result<(), RulesError> {
        let count = self.specs.len();
        RULES.set(self).map_err(|_| RulesError::AlreadyInstalled)?;
        tracing::info!(election_types = count, "Installed custom election type rules");
        Ok(())
    }

    /// Returns the rules for an election type.
    #[must_use]
    pub fn get(&self, election_type: ElectionType) -> &ElectionTypeSpec {
        &self.specs[election_type as usize]
    }

    /// Iterates over every election type's rules.
    pub fn iter(&self) -> impl Iterator<Item = &ElectionTypeSpec> {
        self.specs.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
