//! Record processing pipeline
//!
//! Wires the stages together with crossbeam channels:
//!
//! ```text
//! feeder ──> IntakeBuffer ──> WorkerPool (N) ──> Aggregator ──> ResultSet
//!   (rendezvous)   (rendezvous)    (bounded N)      (bounded 1)
//! ```
//!
//! Every stage runs on its own thread and owns the records it holds; ownership
//! moves with each send. Completion flows downstream by dropping senders:
//! the feeder closes the intake, the intake closes the worker input, the
//! orchestrator closes the aggregator input once every worker has returned, and
//! the aggregator answers with a single [`ResultSet`].
//!
//! # Example
//!
//! ```
//! use flatrent::config::PipelineConfig;
//! use flatrent::pipeline::Pipeline;
//! use flatrent::record::Record;
//!
//! let records = vec![
//!     Record::new("Oak", 1, 250.0, 0),
//!     Record::new("Elm", 2, 250.0, 1),
//!     Record::new("Oak", 2, 150.0, 2),
//! ];
//!
//! let outcome = Pipeline::new(PipelineConfig::default()).run(records)?;
//! let streets: Vec<&str> = outcome.results.records().map(|r| r.street.as_str()).collect();
//! assert_eq!(streets, vec!["Elm", "Oak"]);
//! # Ok::<(), flatrent::pipeline::PipelineError>(())
//! ```

pub mod aggregator;
pub mod intake;
pub mod worker;

pub use aggregator::{Aggregator, ResultSet};
pub use intake::{IntakeBuffer, IntakeStats};
pub use worker::{Accumulator, WorkerPool, WorkerStats};

use crate::config::PipelineConfig;
use crate::record::Record;
use crossbeam::channel::bounded;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Failures inside the pipeline machinery itself
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to spawn {stage} thread")]
    Spawn {
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} thread panicked")]
    StagePanicked { stage: &'static str },

    #[error("aggregator finished without publishing results")]
    MissingResults,
}

/// Everything a completed run produces
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Filtered records in sorted order, padded with empty slots
    pub results: ResultSet,
    pub intake: IntakeStats,
    /// One entry per worker, ordered by worker id
    pub workers: Vec<WorkerStats>,
    pub elapsed: Duration,
}

impl PipelineOutcome {
    /// Number of records that passed the filter
    pub fn matched(&self) -> usize {
        self.results.len()
    }
}

/// Producer/consumer pipeline over a batch of records
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run every record through the pipeline and wait for all stages
    pub fn run(&self, records: Vec<Record>) -> Result<PipelineOutcome, PipelineError> {
        let start = Instant::now();
        let total = records.len();
        let capacity = self.config.intake_capacity(total);

        tracing::info!(
            records = total,
            workers = self.config.workers,
            intake_capacity = capacity,
            "starting pipeline"
        );

        let (feed_tx, feed_rx) = bounded::<Record>(0);
        let (work_tx, work_rx) = bounded::<Record>(0);
        let (result_tx, result_rx) = bounded::<Record>(self.config.workers.max(1));
        let (final_tx, final_rx) = bounded::<ResultSet>(1);

        let intake = IntakeBuffer::new(capacity)
            .spawn(feed_rx, work_tx)
            .map_err(|source| PipelineError::Spawn {
                stage: "intake",
                source,
            })?;
        let aggregator = Aggregator::new(total).spawn(result_rx, final_tx)?;
        let pool = WorkerPool::new(self.config.workers, Accumulator::from(&self.config))
            .spawn(work_rx, &result_tx)?;

        for record in records {
            if feed_tx.send(record).is_err() {
                tracing::warn!("intake buffer hung up while feeding");
                break;
            }
        }
        drop(feed_tx);

        let intake_stats = join_stage(intake, "intake")?;
        let worker_stats = pool.join()?;
        drop(result_tx);

        let results = final_rx.recv();
        join_stage(aggregator, "aggregator")?;
        let results = results.map_err(|_| PipelineError::MissingResults)?;

        let elapsed = start.elapsed();
        tracing::info!(
            matched = results.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "pipeline finished"
        );

        Ok(PipelineOutcome {
            results,
            intake: intake_stats,
            workers: worker_stats,
            elapsed,
        })
    }
}

fn join_stage<T>(handle: JoinHandle<T>, stage: &'static str) -> Result<T, PipelineError> {
    handle
        .join()
        .map_err(|_| PipelineError::StagePanicked { stage })
}
