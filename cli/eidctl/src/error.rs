//! Error handling and display for the CLI.

use colored::Colorize;
use thiserror::Error;
use uk_election_ids::{IdError, RulesError};

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("'{identifier}' is not a valid election identifier: {reason}")]
    InvalidIdentifier { identifier: String, reason: IdError },

    #[error("{invalid} of {total} identifiers are invalid")]
    SomeInvalid { invalid: usize, total: usize },

    #[error(transparent)]
    Rule(#[from] IdError),

    #[error("could not load election type rules: {0}")]
    Rules(#[from] RulesError),
}

/// Returns a hint for a rule violation, if there is a useful one.
fn hint_for(err: &IdError) -> Option<&'static str> {
    match err {
        IdError::UnknownElectionType { .. } => {
            Some("Run `eid types` to list election types and their rules.")
        }
        IdError::InvalidSubtype { .. } | IdError::SubtypeRequired { .. } => {
            Some("Run `eid types` to see which subtypes each election type has.")
        }
        IdError::DivisionRequiresPrecedingSubtype { .. } => {
            Some("Pass --subtype: whether a division is allowed depends on it.")
        }
        IdError::DivisionRequiresOrganisation { .. } | IdError::OrganisationRequired { .. } => {
            Some("Pass --org with the name of the organisation holding the election.")
        }
        IdError::DivisionRequired { .. } => {
            Some("Pass --div with the name of the electoral division.")
        }
        IdError::ReservedSegment { .. } => {
            Some("Use --contest-type by for by-elections; `by` can not name a place.")
        }
        IdError::MalformedInput { .. } => Some(
            "Identifiers look like type[.subtype][.organisation][.division][.by].YYYY-MM-DD",
        ),
        _ => None,
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    // Check for specific error types and provide hints
    let hint = match err.downcast_ref::<CliError>() {
        Some(CliError::InvalidIdentifier { reason, .. }) => hint_for(reason),
        Some(CliError::Rule(reason)) => hint_for(reason),
        Some(CliError::Rules(_)) => {
            Some("Check the file named by EID_RULES_FILE, or unset it to use the built-in rules.")
        }
        _ => err.downcast_ref::<IdError>().and_then(hint_for),
    };

    if let Some(hint) = hint {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}
