//! Computation worker pool
//!
//! Each worker pulls records from the shared intake channel, accumulates rent over
//! the configured horizon, and forwards the record to the aggregator when its
//! monthly rent lies inside the filter range. Workers share nothing except the
//! channels; output order across workers is unspecified.

use crate::config::{PipelineConfig, RentRange};
use crate::pipeline::PipelineError;
use crate::record::Record;
use crossbeam::channel::{Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Per-worker counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct WorkerStats {
    pub worker_id: usize,
    /// Records pulled from the intake buffer
    pub processed: usize,
    /// Records passed on to the aggregator
    pub forwarded: usize,
}

/// The per-record computation: accumulate, then filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    horizon_months: u32,
    rent_range: RentRange,
}

impl Accumulator {
    pub fn new(horizon_months: u32, rent_range: RentRange) -> Self {
        Self {
            horizon_months,
            rent_range,
        }
    }

    /// Store `monthly_rent * horizon_months` as the record's accumulated rent
    pub fn accumulate(&self, record: &mut Record) {
        record.accumulated_rent = record.monthly_rent * f64::from(self.horizon_months);
    }

    /// Filter on monthly rent (not on the accumulated total)
    pub fn accepts(&self, record: &Record) -> bool {
        self.rent_range.contains(record.monthly_rent)
    }
}

impl From<&PipelineConfig> for Accumulator {
    fn from(config: &PipelineConfig) -> Self {
        Self::new(config.horizon_months(), config.rent_range)
    }
}

/// A single computation worker
struct Worker {
    id: usize,
    accumulator: Accumulator,
}

impl Worker {
    fn run(self, input: Receiver<Record>, output: Sender<Record>) -> WorkerStats {
        let mut stats = WorkerStats {
            worker_id: self.id,
            ..WorkerStats::default()
        };

        for mut record in input.iter() {
            stats.processed += 1;
            self.accumulator.accumulate(&mut record);

            if !self.accumulator.accepts(&record) {
                tracing::trace!(worker = self.id, street = %record.street, unit = record.unit_number, "filtered out");
                continue;
            }

            if output.send(record).is_err() {
                tracing::warn!(worker = self.id, "aggregator hung up, stopping worker");
                break;
            }
            stats.forwarded += 1;
        }

        tracing::debug!(
            worker = self.id,
            processed = stats.processed,
            forwarded = stats.forwarded,
            "worker finished"
        );
        stats
    }
}

/// Fixed-size pool of computation workers
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    size: usize,
    accumulator: Accumulator,
}

impl WorkerPool {
    /// Create a pool of `size` workers (minimum 1)
    pub fn new(size: usize, accumulator: Accumulator) -> Self {
        Self {
            size: size.max(1),
            accumulator,
        }
    }

    /// Start every worker on its own thread
    ///
    /// Each worker gets a clone of `output`; the caller keeps the original and
    /// closes the channel by dropping it after [`PoolHandle::join`] returns.
    pub fn spawn(
        &self,
        input: Receiver<Record>,
        output: &Sender<Record>,
    ) -> Result<PoolHandle, PipelineError> {
        let mut handles = Vec::with_capacity(self.size);

        for id in 0..self.size {
            let worker = Worker {
                id,
                accumulator: self.accumulator,
            };
            let input = input.clone();
            let output = output.clone();

            let handle = thread::Builder::new()
                .name(format!("rent-worker-{}", id))
                .spawn(move || worker.run(input, output))
                .map_err(|source| PipelineError::Spawn {
                    stage: "worker",
                    source,
                })?;
            handles.push(handle);
        }

        Ok(PoolHandle { handles })
    }
}

/// Join handle for a running worker pool
pub struct PoolHandle {
    handles: Vec<JoinHandle<WorkerStats>>,
}

impl PoolHandle {
    /// Wait for every worker to return
    pub fn join(self) -> Result<Vec<WorkerStats>, PipelineError> {
        let mut stats = Vec::with_capacity(self.handles.len());
        let mut panicked = false;

        for handle in self.handles {
            match handle.join() {
                Ok(s) => stats.push(s),
                Err(_) => panicked = true,
            }
        }

        if panicked {
            return Err(PipelineError::StagePanicked { stage: "worker" });
        }
        Ok(stats)
    }
}
