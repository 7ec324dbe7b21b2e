//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::output::OutputContext;

/// Session status lines and plugin marketplace checks for AI coding agents
#[derive(Parser)]
#[command(
    name = "pulse",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Format session metrics into a one-line status
    Status(commands::status::StatusArgs),

    /// Validate a plugin marketplace catalog
    Validate(commands::validate::ValidateArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
        } = self;
        match command {
            Command::Status(args) => commands::status::run(&args, json),
            Command::Validate(args) => {
                let ctx = OutputContext::new(no_color, quiet);
                commands::validate::run(&args, &ctx, json)
            }
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
        }
    }
}
