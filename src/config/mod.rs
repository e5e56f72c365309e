//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! The fixed pipeline parameters (horizon and rent filter range) live in
//! [`PipelineConfig`] and are not exposed through the CLI or config file.

pub mod cli;
pub mod toml;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default number of computation workers
pub const DEFAULT_WORKERS: usize = 6;

/// Accumulation horizon in years
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

/// Inclusive lower bound of the monthly rent filter
pub const DEFAULT_MIN_RENT: f64 = 200.0;

/// Inclusive upper bound of the monthly rent filter
pub const DEFAULT_MAX_RENT: f64 = 300.0;

/// Complete run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Input and report file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Semicolon-delimited input file
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Fixed-width text report
    #[serde(default = "default_report")]
    pub report: PathBuf,
}

fn default_input() -> PathBuf {
    PathBuf::from("data.txt")
}

fn default_report() -> PathBuf {
    PathBuf::from("results.txt")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            report: default_report(),
        }
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of computation worker threads
    #[serde(default = "default_worker_count")]
    pub count: usize,
    /// Intake buffer capacity (defaults to half the record count)
    pub buffer_capacity: Option<usize>,
}

fn default_worker_count() -> usize {
    DEFAULT_WORKERS
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_WORKERS,
            buffer_capacity: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON summary file path
    pub json_output: Option<PathBuf>,
    /// Pretty-print the JSON summary
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_output: None,
            pretty: true,
        }
    }
}

/// Runtime flags (CLI only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Load and validate, then exit without running the pipeline
    #[serde(skip)]
    pub dry_run: bool,
    /// Log verbosity (number of -v flags)
    #[serde(skip)]
    pub verbosity: u8,
}

/// Inclusive monthly rent range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RentRange {
    pub min: f64,
    pub max: f64,
}

impl RentRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True if `rent` lies within `[min, max]`
    pub fn contains(&self, rent: f64) -> bool {
        rent >= self.min && rent <= self.max
    }
}

impl Default for RentRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RENT, DEFAULT_MAX_RENT)
    }
}

impl fmt::Display for RentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}, {:.2}]", self.min, self.max)
    }
}

/// Parameters handed to [`crate::pipeline::Pipeline::new`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineConfig {
    /// Number of computation workers
    pub workers: usize,
    /// Intake buffer capacity; `None` means half the record count (at least 1)
    pub buffer_capacity: Option<usize>,
    /// Accumulation horizon in years
    pub horizon_years: u32,
    /// Monthly rent filter
    pub rent_range: RentRange,
}

impl PipelineConfig {
    /// Horizon expressed in months
    pub fn horizon_months(&self) -> u32 {
        self.horizon_years * 12
    }

    /// Intake buffer capacity for a run over `total` records
    pub fn intake_capacity(&self, total: usize) -> usize {
        self.buffer_capacity.unwrap_or(total / 2).max(1)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            buffer_capacity: None,
            horizon_years: DEFAULT_HORIZON_YEARS,
            rent_range: RentRange::default(),
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            workers: config.workers.count,
            buffer_capacity: config.workers.buffer_capacity,
            ..Self::default()
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Input:   {}", self.paths.input.display())?;
        writeln!(f, "  Report:  {}", self.paths.report.display())?;
        writeln!(f, "  Workers: {}", self.workers)?;
        writeln!(f, "  Output:  {}", self.output)?;
        Ok(())
    }
}

impl fmt::Display for WorkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} thread(s)", self.count)?;
        match self.buffer_capacity {
            Some(cap) => write!(f, ", intake buffer {}", cap),
            None => write!(f, ", intake buffer n/2"),
        }
    }
}

impl fmt::Display for OutputConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.json_output {
            Some(path) => write!(f, "text + json ({})", path.display()),
            None => write!(f, "text"),
        }
    }
}
