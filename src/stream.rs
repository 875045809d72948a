//! Bounded sample ingestion.
//!
//! [`StreamBuffer`] keeps the most recent `capacity` samples in arrival order.
//! [`IngestionTimer`] decides when the producer should be polled for the next
//! sample; it runs on its own cadence, independent of the redraw loop.

use crate::data_types::{Sample, Timestamp};
use crate::error::ConfigError;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Sliding window over the most recent samples. Oldest entries are evicted
/// first once the capacity is reached.
#[derive(Clone, Debug)]
pub struct StreamBuffer {
    data: VecDeque<Sample>,
    capacity: usize,
    evicted_total: u64,
}

impl StreamBuffer {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            // Large capacities are reached gradually; don't reserve them upfront.
            data: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
            evicted_total: 0,
        })
    }

    pub fn append(&mut self, sample: Sample) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
            self.evicted_total += 1;
            trace!(evicted_total = self.evicted_total, "stream buffer evicted oldest sample");
        }
        self.data.push_back(sample);
    }

    pub fn extend<I: IntoIterator<Item = Sample>>(&mut self, samples: I) {
        for sample in samples {
            self.append(sample);
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Current contents, oldest first.
    pub fn snapshot(&mut self) -> &[Sample] {
        self.data.make_contiguous()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator + '_ {
        self.data.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.data.back()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples dropped by eviction since construction.
    pub fn evicted_total(&self) -> u64 {
        self.evicted_total
    }

    /// Changes the capacity; shrinking below the current length evicts the
    /// oldest samples immediately.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let excess = self.data.len().saturating_sub(capacity);
        if excess > 0 {
            self.data.drain(..excess);
            self.evicted_total += excess as u64;
        }
        debug!(old = self.capacity, new = capacity, excess, "stream buffer capacity changed");
        self.capacity = capacity;
        Ok(())
    }
}

/// Fixed-cadence ingestion deadline tracker.
///
/// Time is supplied by the caller so the timer can be driven by any clock.
/// A stopped timer has no pending deadline and never reports a tick.
#[derive(Clone, Debug)]
pub struct IngestionTimer {
    interval_ms: i64,
    next_due: Option<Timestamp>,
    max_catch_up: usize,
}

impl IngestionTimer {
    pub fn new(interval_ms: i64) -> Result<Self, ConfigError> {
        if interval_ms <= 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Self {
            interval_ms,
            next_due: None,
            max_catch_up: 1,
        })
    }

    /// Upper bound on ticks reported by one `poll` after a stall.
    pub fn with_max_catch_up(mut self, ticks: usize) -> Self {
        self.max_catch_up = ticks.max(1);
        self
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Timestamp> {
        self.next_due
    }

    /// Arms the timer; the first tick falls one interval after `now`.
    /// Starting a running timer keeps its current deadline.
    pub fn start(&mut self, now: Timestamp) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval_ms);
        }
    }

    /// Cancels the pending tick.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Returns how many ticks are due at `now` and advances the deadline.
    pub fn poll(&mut self, now: Timestamp) -> usize {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }
        let elapsed = ((now - due) / self.interval_ms) as usize + 1;
        if elapsed > self.max_catch_up {
            // Too far behind: drop the backlog and re-anchor on `now`.
            trace!(elapsed, max = self.max_catch_up, "ingestion timer re-anchored");
            self.next_due = Some(now + self.interval_ms);
            self.max_catch_up
        } else {
            self.next_due = Some(due + elapsed as i64 * self.interval_ms);
            elapsed
        }
    }
}
