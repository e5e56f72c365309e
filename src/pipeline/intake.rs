//! Intake buffer
//!
//! Relays records from the feeder to the computation workers through a bounded
//! FIFO buffer. A single loop alternates between filling (while there is room and
//! the input is still open) and draining one record downstream. When the input is
//! closed and the buffer is empty the output sender is dropped, which is how the
//! workers learn that no more records are coming.

use crate::record::Record;
use crossbeam::channel::{Receiver, Sender};
use std::collections::VecDeque;
use std::thread::{self, JoinHandle};

/// Counters reported by the intake buffer when it finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntakeStats {
    /// Records accepted from the feeder
    pub received: usize,
    /// Records handed to the workers
    pub relayed: usize,
    /// Highest buffer occupancy observed
    pub peak_occupancy: usize,
}

/// Bounded FIFO relay between the feeder and the worker pool
#[derive(Debug, Clone, Copy)]
pub struct IntakeBuffer {
    capacity: usize,
}

impl IntakeBuffer {
    /// Create a buffer holding at most `capacity` records (minimum 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }

    /// Run the relay loop on a dedicated thread
    pub fn spawn(
        self,
        input: Receiver<Record>,
        output: Sender<Record>,
    ) -> std::io::Result<JoinHandle<IntakeStats>> {
        thread::Builder::new()
            .name("rent-intake".to_string())
            .spawn(move || self.run(input, output))
    }

    /// Relay every record from `input` to `output` in arrival order
    ///
    /// Returns once `input` is closed and every buffered record has been sent.
    /// Consumes `output` so the downstream channel closes on return.
    pub fn run(&self, input: Receiver<Record>, output: Sender<Record>) -> IntakeStats {
        let mut buffer: VecDeque<Record> = VecDeque::with_capacity(self.capacity);
        let mut stats = IntakeStats::default();
        let mut input_open = true;

        loop {
            if input_open && buffer.len() < self.capacity {
                match input.recv() {
                    Ok(record) => {
                        buffer.push_back(record);
                        stats.received += 1;
                        stats.peak_occupancy = stats.peak_occupancy.max(buffer.len());
                    }
                    Err(_) => {
                        tracing::trace!(received = stats.received, "intake input closed");
                        input_open = false;
                    }
                }
            } else if let Some(record) = buffer.pop_front() {
                if output.send(record).is_err() {
                    tracing::warn!(
                        pending = buffer.len(),
                        "worker pool hung up before intake drained"
                    );
                    break;
                }
                stats.relayed += 1;
            } else {
                break;
            }
        }

        tracing::debug!(
            received = stats.received,
            relayed = stats.relayed,
            peak = stats.peak_occupancy,
            capacity = self.capacity,
            "intake buffer drained"
        );
        stats
    }
}
