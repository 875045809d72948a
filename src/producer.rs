//! Sample sources feeding the stream buffer.

use crate::data_types::{Sample, Timestamp};
use crate::error::ProducerError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const CATEGORIES: [&str; 5] = ["CPU", "Memory", "Network", "Disk", "API"];

/// Base level for each category in initial batches.
pub fn base_value(category: &str) -> f64 {
    match category {
        "CPU" => 45.0,
        "Memory" => 60.0,
        "Network" => 30.0,
        "Disk" => 25.0,
        "API" => 40.0,
        _ => STREAM_BASE_VALUE,
    }
}

/// Base level for streamed samples, whatever their category.
pub const STREAM_BASE_VALUE: f64 = 50.0;

/// Spacing between samples of an initial batch.
pub const INITIAL_SPACING_MS: i64 = 100;

pub trait SampleProducer: Send {
    /// `count` samples in ascending time order, ending at the current time.
    fn generate_initial_batch(&mut self, count: usize) -> Result<Vec<Sample>, ProducerError>;

    /// One sample stamped with the current time.
    fn generate_one(&mut self) -> Result<Sample, ProducerError>;
}

pub fn system_now() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Synthetic sensor readings: a slow sine wave per category plus uniform
/// noise, clamped to `0..=100`.
pub struct SimulatedProducer {
    rng: StdRng,
    clock: fn() -> Timestamp,
}

impl Default for SimulatedProducer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedProducer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            clock: system_now,
        }
    }

    /// Deterministic producer for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clock: system_now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// One reading for `category` at `timestamp` around `base`.
    pub fn sample_at(&mut self, timestamp: Timestamp, category: &str, base: f64) -> Sample {
        let variation = (timestamp as f64 / 10_000.0).sin() * 20.0 + self.rng.random::<f64>() * 10.0;
        let value = (base + variation).clamp(0.0, 100.0);
        let quality = if self.rng.random::<f64>() > 0.1 { "good" } else { "degraded" };
        Sample::new(timestamp, value, category)
            .with_metadata("source", "sensor")
            .with_metadata("quality", quality)
    }
}

impl SampleProducer for SimulatedProducer {
    fn generate_initial_batch(&mut self, count: usize) -> Result<Vec<Sample>, ProducerError> {
        let now = (self.clock)();
        let samples = (1..=count)
            .rev()
            .map(|i| {
                let category = CATEGORIES[i % CATEGORIES.len()];
                let timestamp = now - i as i64 * INITIAL_SPACING_MS;
                self.sample_at(timestamp, category, base_value(category))
            })
            .collect();
        Ok(samples)
    }

    fn generate_one(&mut self) -> Result<Sample, ProducerError> {
        let category = CATEGORIES[self.rng.random_range(0..CATEGORIES.len())];
        let now = (self.clock)();
        Ok(self.sample_at(now, category, STREAM_BASE_VALUE))
    }
}
