//! CLI commands.

mod build;
mod parse;
mod types;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// eid - Validate, parse, and build UK election identifiers.
#[derive(Debug, Parser)]
#[command(name = "eid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, env = "EID_FORMAT", default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check whether identifiers are well formed.
    Validate(validate::ValidateCommand),

    /// Break an identifier into its segments.
    Parse(parse::ParseCommand),

    /// Build identifiers from their parts.
    Build(build::BuildCommand),

    /// List election types and the segments they allow.
    Types(types::TypesCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let ctx = CommandContext {
            format: OutputFormat::from_flag(&self.format),
        };

        match self.command {
            Commands::Validate(cmd) => cmd.run(ctx),
            Commands::Parse(cmd) => cmd.run(ctx),
            Commands::Build(cmd) => cmd.run(ctx),
            Commands::Types(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("eid {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
}
