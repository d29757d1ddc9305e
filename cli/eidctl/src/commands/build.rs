//! Build command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use uk_election_ids::{IdBuilder, IdError};

use crate::error::CliError;
use crate::output::{print_info, print_single, OutputFormat};

use super::CommandContext;

/// Build identifiers from their parts.
///
/// Names are normalized, so `--org "Newcastle upon Tyne"` becomes
/// `newcastle-upon-tyne`.
#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Election type (see `eid types`).
    #[arg(long = "type", value_name = "TYPE")]
    election_type: String,

    /// Polling day (YYYY-MM-DD).
    #[arg(long)]
    date: String,

    /// Subtype code.
    #[arg(long)]
    subtype: Option<String>,

    /// Organisation name.
    #[arg(long = "org", value_name = "NAME")]
    organisation: Option<String>,

    /// Division name.
    #[arg(long = "div", value_name = "NAME")]
    division: Option<String>,

    /// Contest type (by, by-election, by election, election).
    #[arg(long)]
    contest_type: Option<String>,

    /// Fail unless the parts make a complete ballot id.
    #[arg(long)]
    ballot: bool,
}

#[derive(Debug, Serialize)]
struct BuildView {
    ids: Vec<String>,
    ballot_id: Option<String>,
}

impl BuildCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let builder = self.builder().map_err(CliError::from)?;

        let ballot_id = match builder.ballot_id() {
            Ok(ballot_id) => Some(ballot_id),
            Err(err) if self.ballot || !err.is_missing_segment() => {
                return Err(CliError::from(err).into())
            }
            Err(err) => {
                tracing::debug!(error = %err, "No ballot id for these parts");
                None
            }
        };

        let view = BuildView {
            ids: builder.ids(),
            ballot_id,
        };

        match ctx.format {
            OutputFormat::Json => print_single(&view),
            OutputFormat::Table => {
                for id in &view.ids {
                    println!("{}", id);
                }
                if view.ballot_id.is_none() {
                    print_info("not enough parts for a ballot id");
                }
            }
        }

        Ok(())
    }

    /// Applies the given parts in segment order.
    fn builder(&self) -> Result<IdBuilder, IdError> {
        let mut builder = IdBuilder::new(&self.election_type, &self.date)?;
        if let Some(subtype) = &self.subtype {
            builder = builder.with_subtype(subtype)?;
        }
        if let Some(organisation) = &self.organisation {
            builder = builder.with_organisation(organisation)?;
        }
        if let Some(division) = &self.division {
            builder = builder.with_division(division)?;
        }
        if let Some(contest_type) = &self.contest_type {
            builder = builder.with_contest_type(contest_type)?;
        }
        Ok(builder)
    }
}
