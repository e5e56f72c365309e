//! flatrent - parallel rent accumulation pipeline
//!
//! Loads a semicolon-delimited list of rental properties, accumulates each
//! property's rent over a fixed horizon on a pool of worker threads, keeps the
//! properties whose monthly rent falls in the filter range, sorts them, and
//! writes a fixed-width text report.
//!
//! # Architecture
//!
//! - **Loader**: parses the input file, failing fast on any malformed line
//! - **Intake buffer**: bounded FIFO relay between the feeder and the workers
//! - **Worker pool**: accumulates and filters records concurrently
//! - **Aggregator**: ordered insertion into a fixed-size result set
//! - **Output**: fixed-width text report, optional JSON summary

pub mod config;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod util;

// Re-export commonly used types
pub use config::{Config, PipelineConfig};
pub use pipeline::Pipeline;
pub use record::Record;

/// Result type used throughout flatrent
pub type Result<T> = anyhow::Result<T>;
