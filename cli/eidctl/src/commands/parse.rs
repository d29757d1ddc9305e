//! Parse command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use uk_election_ids::IdBuilder;

use crate::error::CliError;
use crate::output::{print_field, print_single, OutputFormat};

use super::CommandContext;

/// Break an identifier into its segments.
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Identifier to parse.
    #[arg(value_name = "ID")]
    identifier: String,
}

#[derive(Debug, Serialize)]
struct ParsedView {
    identifier: String,
    #[serde(flatten)]
    builder: IdBuilder,
    ids: Vec<String>,
}

impl ParseCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let view = parse_view(self.identifier)?;

        match ctx.format {
            OutputFormat::Json => print_single(&view),
            OutputFormat::Table => {
                let builder = &view.builder;
                let date = builder.date().to_string();
                print_field("election_type", Some(builder.election_type().as_str()));
                print_field("subtype", builder.subtype());
                print_field("organisation", builder.organisation());
                print_field("division", builder.division());
                print_field(
                    "contest_type",
                    builder.contest_type().and_then(|c| c.marker()),
                );
                print_field("date", Some(date.as_str()));
                for id in &view.ids {
                    print_field("id", Some(id.as_str()));
                }
            }
        }

        Ok(())
    }
}

fn parse_view(identifier: String) -> Result<ParsedView, CliError> {
    match identifier.parse::<IdBuilder>() {
        Ok(builder) => Ok(ParsedView {
            ids: builder.ids(),
            identifier,
            builder,
        }),
        Err(reason) => Err(CliError::InvalidIdentifier { identifier, reason }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uk_election_ids::IdError;

    #[test]
    fn parse_view_lists_derivable_ids() {
        let view = parse_view("gla.c.barnet-and-camden.2021-05-06".to_string()).unwrap();
        assert_eq!(view.builder.subtype(), Some("c"));
        assert_eq!(
            view.ids,
            vec![
                "gla.2021-05-06",
                "gla.c.2021-05-06",
                "gla.c.barnet-and-camden.2021-05-06",
            ]
        );
    }

    #[test]
    fn parse_view_json_flattens_segments() {
        let view = parse_view("local.gwynedd.arfon.by.2021-05-06".to_string()).unwrap();
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["organisation"], "gwynedd");
        assert_eq!(value["division"], "arfon");
        assert_eq!(value["contest_type"], "by");
        assert_eq!(value["ids"][2], "local.gwynedd.arfon.by.2021-05-06");
    }

    #[test]
    fn parse_view_reports_reason() {
        let err = parse_view("naw.x.2016-05-05".to_string()).unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidIdentifier {
                reason: IdError::InvalidSubtype { .. },
                ..
            }
        ));
    }
}
