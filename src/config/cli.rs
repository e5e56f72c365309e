//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// flatrent - accumulate rent over a fixed horizon and report the matching range
#[derive(Parser, Debug)]
#[command(name = "flatrent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input file (street;unit_number;monthly_rent per line)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Report file to write
    #[arg(short = 'o', long, value_name = "REPORT")]
    pub output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long, env = "FLATRENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of computation worker threads
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Intake buffer capacity (default: half the record count)
    #[arg(long)]
    pub buffer_capacity: Option<usize>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Write the JSON summary on a single line
    #[arg(long)]
    pub compact_json: bool,

    /// Load and validate the input, then exit without running
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == Some(0) {
            anyhow::bail!("workers must be at least 1");
        }

        if self.buffer_capacity == Some(0) {
            anyhow::bail!("buffer_capacity must be at least 1");
        }

        if self.compact_json && self.json_output.is_none() {
            anyhow::bail!("--compact-json requires --json-output");
        }

        Ok(())
    }
}
