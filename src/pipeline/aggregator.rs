//! Aggregation stage
//!
//! Collects filtered records from the worker pool and keeps them sorted by
//! street, then unit number, using ordered insertion. When the input channel
//! closes, the complete [`ResultSet`] is sent downstream exactly once.

use crate::pipeline::PipelineError;
use crate::record::Record;
use crossbeam::channel::{Receiver, Sender};
use serde::Serialize;
use std::thread::{self, JoinHandle};

/// Fixed-size, sorted result slots
///
/// Sized to the total number of loaded records. Occupied slots form a sorted
/// prefix; the remaining slots are empty (`None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    slots: Vec<Option<Record>>,
    filled: usize,
}

impl ResultSet {
    /// Create a result set with `total` empty slots
    pub fn with_slots(total: usize) -> Self {
        Self {
            slots: vec![None; total],
            filled: 0,
        }
    }

    /// Insert `record` after every entry it sorts strictly after
    ///
    /// Scans the occupied prefix, moving the insertion point to `i + 1` for each
    /// entry the record is greater than, then shifts the tail one slot right.
    pub fn insert_sorted(&mut self, record: Record) {
        let mut at = 0;
        for (i, slot) in self.slots[..self.filled].iter().enumerate() {
            if let Some(existing) = slot {
                if record.sorts_after(existing) {
                    at = i + 1;
                }
            }
        }

        if self.filled == self.slots.len() {
            self.slots.push(None);
        }

        // The slot at `filled` is empty; rotating brings it to `at`.
        self.slots[at..=self.filled].rotate_right(1);
        self.slots[at] = Some(record);
        self.filled += 1;
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Total number of slots, occupied or not
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// All slots in order, including trailing empty ones
    pub fn slots(&self) -> &[Option<Record>] {
        &self.slots
    }

    /// Occupied records in sorted order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.slots.iter().flatten()
    }
}

/// Single consumer that orders the filtered records
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    total: usize,
}

impl Aggregator {
    /// `total` is the number of loaded records, used to size the result set
    pub fn new(total: usize) -> Self {
        Self { total }
    }

    pub fn spawn(
        self,
        input: Receiver<Record>,
        output: Sender<ResultSet>,
    ) -> Result<JoinHandle<()>, PipelineError> {
        thread::Builder::new()
            .name("rent-aggregator".to_string())
            .spawn(move || self.run(input, output))
            .map_err(|source| PipelineError::Spawn {
                stage: "aggregator",
                source,
            })
    }

    /// Consume until `input` closes, then emit the sorted result set once
    pub fn run(&self, input: Receiver<Record>, output: Sender<ResultSet>) {
        let results = self.collect(input);
        tracing::debug!(matched = results.len(), slots = results.capacity(), "aggregation complete");

        if output.send(results).is_err() {
            tracing::warn!("result receiver dropped before aggregation finished");
        }
    }

    /// Drain `input` into a sorted result set
    pub fn collect(&self, input: Receiver<Record>) -> ResultSet {
        let mut results = ResultSet::with_slots(self.total);
        for record in input.iter() {
            results.insert_sorted(record);
        }
        results
    }
}
