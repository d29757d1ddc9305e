//! Election type listing.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use uk_election_ids::{rules, DivisionRule, ElectionTypeSpec};

use crate::output::{print_output, print_single, OutputFormat};

use super::CommandContext;

/// List election types and the segments they allow.
#[derive(Debug, Args)]
pub struct TypesCommand {}

#[derive(Debug, Serialize, Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    election_type: String,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Subtypes")]
    subtypes: String,

    #[tabled(rename = "Organisations")]
    organisations: String,

    #[tabled(rename = "Divisions")]
    divisions: String,
}

impl From<&ElectionTypeSpec> for TypeRow {
    fn from(spec: &ElectionTypeSpec) -> Self {
        let codes = spec.subtypes.codes();
        let divisions = match &spec.can_have_divs {
            DivisionRule::Fixed(allowed) => yes_no(*allowed).to_string(),
            DivisionRule::BySubtype(by_subtype) => by_subtype
                .iter()
                .map(|(code, allowed)| format!("{code}: {}", yes_no(*allowed)))
                .collect::<Vec<_>>()
                .join(", "),
        };

        Self {
            election_type: spec.election_type.to_string(),
            name: spec.name.clone(),
            subtypes: if codes.is_empty() {
                "-".to_string()
            } else {
                codes.join(", ")
            },
            organisations: yes_no(spec.can_have_orgs).to_string(),
            divisions,
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl TypesCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let table = rules::rules();

        match ctx.format {
            OutputFormat::Json => {
                let specs: Vec<&ElectionTypeSpec> = table.iter().collect();
                print_single(&specs);
            }
            OutputFormat::Table => {
                let rows: Vec<TypeRow> = table.iter().map(TypeRow::from).collect();
                print_output(&rows, ctx.format);
            }
        }

        Ok(())
    }
}
