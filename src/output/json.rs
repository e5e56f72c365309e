//! JSON output formatting
//!
//! Optional machine-readable summary of a run: configuration, totals,
//! per-worker counters, and the sorted results.

use crate::config::{PipelineConfig, RentRange};
use crate::pipeline::{PipelineOutcome, WorkerStats};
use crate::record::Record;
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pipeline parameters used for the run
#[derive(Debug, Clone, Serialize)]
pub struct JsonRunConfig {
    pub workers: usize,
    pub intake_capacity: usize,
    pub horizon_years: u32,
    pub rent_range: RentRange,
}

/// Record totals
#[derive(Debug, Clone, Serialize)]
pub struct JsonTotals {
    pub loaded: usize,
    pub matched: usize,
    pub elapsed_ms: u64,
}

/// Complete run summary
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub config: JsonRunConfig,
    pub totals: JsonTotals,
    pub workers: Vec<WorkerStats>,
    pub results: Vec<Record>,
}

/// Build the summary for a finished run
pub fn build_summary(outcome: &PipelineOutcome, config: &PipelineConfig, loaded: usize) -> JsonSummary {
    JsonSummary {
        generated_at: chrono::Local::now().to_rfc3339(),
        config: JsonRunConfig {
            workers: config.workers,
            intake_capacity: config.intake_capacity(loaded),
            horizon_years: config.horizon_years,
            rent_range: config.rent_range,
        },
        totals: JsonTotals {
            loaded,
            matched: outcome.matched(),
            elapsed_ms: outcome.elapsed.as_millis() as u64,
        },
        workers: outcome.workers.clone(),
        results: outcome.results.records().cloned().collect(),
    }
}

/// Write the summary to `output_path`
pub fn write_json_output(output_path: &Path, summary: &JsonSummary, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, summary)?;
    } else {
        serde_json::to_writer(&mut writer, summary)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;

    fn outcome() -> (PipelineOutcome, PipelineConfig) {
        let config = PipelineConfig {
            workers: 2,
            ..PipelineConfig::default()
        };
        let outcome = Pipeline::new(config)
            .run(vec![
                Record::new("Oak", 2, 250.0, 0),
                Record::new("Elm", 1, 120.0, 1),
                Record::new("Ash", 3, 200.0, 2),
            ])
            .unwrap();
        (outcome, config)
    }

    #[test]
    fn test_build_summary() {
        let (outcome, config) = outcome();
        let summary = build_summary(&outcome, &config, 3);

        assert_eq!(summary.totals.loaded, 3);
        assert_eq!(summary.totals.matched, 2);
        assert_eq!(summary.config.workers, 2);
        assert_eq!(summary.config.intake_capacity, 1);
        assert_eq!(summary.workers.len(), 2);
        assert_eq!(summary.results[0].street, "Ash");
        assert_eq!(summary.results[1].street, "Oak");
        assert!(chrono::DateTime::parse_from_rfc3339(&summary.generated_at).is_ok());
    }

    #[test]
    fn test_write_json_output() {
        let (outcome, config) = outcome();
        let summary = build_summary(&outcome, &config, 3);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        write_json_output(&path, &summary, true).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["totals"]["matched"], 2);
        assert_eq!(value["config"]["rent_range"]["min"], 200.0);
        assert_eq!(value["results"][0]["accumulated_rent"], 24000.0);
    }

    #[test]
    fn test_write_compact_json_is_single_line() {
        let (outcome, config) = outcome();
        let summary = build_summary(&outcome, &config, 3);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        write_json_output(&path, &summary, false).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
