//! `pulse status` — render session metrics as a one-line status.
//!
//! Metrics arrive as JSON on stdin (or from `--file`); the formatting itself
//! is the pure function in `domain::statusline`.

use std::fs;
use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::domain::error::MetricsError;
use crate::domain::metrics::SessionMetrics;
use crate::domain::statusline::{format_status, should_display};

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Read metrics JSON from a file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Print nothing when the metrics carry no meaningful activity
    #[arg(long)]
    pub if_relevant: bool,
}

/// Run the status command.
///
/// # Errors
///
/// Returns an error if the metrics input cannot be read or is not valid
/// JSON. Malformed *optional* fields are not an error — they suppress their
/// segment.
pub fn run(args: &StatusArgs, json: bool) -> Result<()> {
    let raw = read_input(args.file.as_deref())?;
    let metrics: SessionMetrics = serde_json::from_str(&raw).map_err(MetricsError::Parse)?;

    if args.if_relevant && !should_display(&metrics) {
        return Ok(());
    }

    let status = format_status(&metrics);
    if json {
        let rendered = serde_json::to_string(&status).context("JSON serialization failed")?;
        println!("{rendered}");
    } else {
        println!("{}", status.line);
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read metrics file {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read metrics from stdin")?;
            Ok(buf)
        }
    }
}
