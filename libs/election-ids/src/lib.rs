//! # uk-election-ids
//!
//! Parsing, validation, and construction of UK election identifiers in the
//! Democracy Club format.
//!
//! ## Identifier Format
//!
//! Identifiers are dot-separated slugs:
//!
//! `type[.subtype][.organisation][.division][.by].date`
//!
//! Examples:
//! - `local.2021-05-06` (election group)
//! - `gla.c.2021-05-06` (subtype group)
//! - `local.gwynedd.2021-05-06` (organisation group)
//! - `local.gwynedd.arfon.by.2021-05-06` (ballot)
//!
//! Which optional segments are allowed depends on the election type. The
//! rules live in a data package (see [`rules`]) and are enforced by
//! [`IdBuilder`] as segments are added and again whenever an identifier is
//! rendered.
//!
//! ## Entry Points
//!
//! - [`validate`] answers "is this string acceptable?"
//! - [`parse`] decomposes a string into an [`IdBuilder`]
//! - [`IdBuilder`] builds identifiers from known parts
//!
//! `parse` and `validate` never report why a string was rejected. Parse with
//! `str::parse::<IdBuilder>()` to get the specific [`IdError`].

mod builder;
mod checks;
mod error;
mod macros;
mod parser;
pub mod rules;
mod slug;
mod types;

pub use builder::IdBuilder;
pub use error::{IdError, RulesError};
pub use parser::{parse, validate, validate_value};
pub use rules::{DivisionRule, ElectionTypeSpec, RuleTable, Subtype, Subtypes};
pub use slug::{is_valid_token, slugify};
pub use types::*;

/// Re-export chrono's date type for callers building from typed dates
pub use chrono::NaiveDate;
