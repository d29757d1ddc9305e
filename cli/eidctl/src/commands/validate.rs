//! Validate command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_failure, print_output, print_success, OutputFormat};

use super::CommandContext;

/// Check whether identifiers are well formed.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Identifiers to check.
    #[arg(required = true, value_name = "ID")]
    identifiers: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ValidationRow {
    #[tabled(rename = "Identifier")]
    identifier: String,

    #[tabled(rename = "Valid")]
    valid: bool,
}

impl ValidateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let rows = check_all(self.identifiers);

        match ctx.format {
            OutputFormat::Json => print_output(&rows, ctx.format),
            OutputFormat::Table => {
                for row in &rows {
                    if row.valid {
                        print_success(&row.identifier);
                    } else {
                        print_failure(&row.identifier);
                    }
                }
            }
        }

        let invalid = rows.iter().filter(|row| !row.valid).count();
        if invalid > 0 {
            return Err(CliError::SomeInvalid {
                invalid,
                total: rows.len(),
            }
            .into());
        }
        Ok(())
    }
}

fn check_all(identifiers: Vec<String>) -> Vec<ValidationRow> {
    identifiers
        .into_iter()
        .map(|identifier| ValidationRow {
            valid: uk_election_ids::validate(&identifier),
            identifier,
        })
        .collect()
}
