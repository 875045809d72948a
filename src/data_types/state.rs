use super::filter::FilterOptions;
use super::range::TimeRange;
use super::sample::{Sample, Timestamp};
use crate::aggregation::{aggregate, filter_samples};
use crate::error::ConfigError;
use crate::stream::StreamBuffer;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, warn};

/// Quick time-range buttons, in minutes.
pub const TIME_RANGE_PRESETS: [i64; 4] = [5, 15, 30, 60];

/// Aggregation periods offered by the dashboard, in milliseconds.
pub const AGGREGATION_PRESETS: [i64; 4] = [1_000, 5_000, 10_000, 60_000];

#[derive(Clone, Debug, Default)]
struct ViewCache {
    generation: u64,
    filtered: Vec<Sample>,
    visible: Vec<Sample>,
}

/// Buffered samples plus the user's view settings.
///
/// Every mutator bumps a generation counter. The filtered and aggregated
/// views are recomputed lazily when read after a bump.
#[derive(Clone, Debug)]
pub struct DashboardState {
    buffer: StreamBuffer,
    filters: FilterOptions,
    /// Overrides `filters.time_range` when set.
    time_range: Option<TimeRange>,
    aggregation_period: Option<i64>,
    generation: u64,
    cache: Option<ViewCache>,
    data_processing_ms: f64,
}

impl DashboardState {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            buffer: StreamBuffer::new(capacity)?,
            filters: FilterOptions::default(),
            time_range: None,
            aggregation_period: None,
            generation: 0,
            cache: None,
            data_processing_ms: 0.0,
        })
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn buffer(&self) -> &StreamBuffer {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn time_range(&self) -> Option<TimeRange> {
        self.time_range
    }

    pub fn aggregation_period(&self) -> Option<i64> {
        self.aggregation_period
    }

    /// Milliseconds spent on the last filter/aggregate recomputation.
    pub fn data_processing_time_ms(&self) -> f64 {
        self.data_processing_ms
    }

    /// Distinct categories currently buffered.
    pub fn categories(&self) -> BTreeSet<String> {
        self.buffer.iter().map(|s| s.category.clone()).collect()
    }

    pub fn set_filters(&mut self, filters: FilterOptions) {
        debug!(?filters, "filters changed");
        self.filters = filters;
        self.invalidate();
    }

    /// Adds `category` to the filter set, or removes it when present.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.filters.categories.remove(category) {
            self.filters.categories.insert(category.to_owned());
        }
        debug!(category, selected = ?self.filters.categories, "category toggled");
        self.invalidate();
    }

    pub fn set_time_range(&mut self, range: Option<TimeRange>) {
        debug!(?range, "time range changed");
        self.time_range = range;
        self.invalidate();
    }

    /// Restricts the view to the last `minutes` before `now`.
    pub fn set_time_range_preset(&mut self, minutes: i64, now: Timestamp) {
        self.set_time_range(Some(TimeRange::last_minutes(minutes, now)));
    }

    /// `None` disables aggregation. Non-positive periods are rejected and
    /// leave the current setting untouched.
    pub fn set_aggregation_period(&mut self, period_ms: Option<i64>) -> Result<(), ConfigError> {
        if let Some(period) = period_ms {
            if period <= 0 {
                warn!(period, "rejected aggregation period");
                return Err(ConfigError::InvalidAggregationPeriod(period));
            }
        }
        debug!(?period_ms, "aggregation period changed");
        self.aggregation_period = period_ms;
        self.invalidate();
        Ok(())
    }

    pub fn add_sample(&mut self, sample: Sample) {
        self.buffer.append(sample);
        self.invalidate();
    }

    pub fn add_samples<I: IntoIterator<Item = Sample>>(&mut self, samples: I) {
        self.buffer.extend(samples);
        self.invalidate();
    }

    /// Replaces the buffered samples.
    pub fn set_data<I: IntoIterator<Item = Sample>>(&mut self, samples: I) {
        self.buffer.clear();
        self.add_samples(samples);
    }

    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), ConfigError> {
        self.buffer.set_capacity(capacity)?;
        self.invalidate();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.invalidate();
    }

    fn effective_filters(&self) -> FilterOptions {
        let mut filters = self.filters.clone();
        if self.time_range.is_some() {
            filters.time_range = self.time_range;
        }
        filters
    }

    fn refresh(&mut self) -> &ViewCache {
        let stale = self
            .cache
            .as_ref()
            .map_or(true, |c| c.generation != self.generation);
        if stale {
            let started = Instant::now();
            let filters = self.effective_filters();
            let filtered = filter_samples(self.buffer.snapshot(), &filters);
            let visible = match self.aggregation_period {
                Some(period) => match aggregate(&filtered, period) {
                    Ok(aggregated) => aggregated,
                    Err(err) => {
                        warn!(error = %err, "aggregation skipped");
                        filtered.clone()
                    }
                },
                None => filtered.clone(),
            };
            self.data_processing_ms = started.elapsed().as_secs_f64() * 1000.0;
            debug!(
                generation = self.generation,
                filtered = filtered.len(),
                visible = visible.len(),
                ms = self.data_processing_ms,
                "view cache recomputed"
            );
            self.cache = Some(ViewCache {
                generation: self.generation,
                filtered,
                visible,
            });
        }
        self.cache.get_or_insert_with(ViewCache::default)
    }

    /// Buffered samples passing the current filters, in arrival order.
    pub fn filtered(&mut self) -> &[Sample] {
        &self.refresh().filtered
    }

    /// The set every chart draws: filtered, then aggregated when a period is set.
    pub fn visible(&mut self) -> &[Sample] {
        &self.refresh().visible
    }

    /// Alias of [`visible`](Self::visible).
    pub fn aggregated(&mut self) -> &[Sample] {
        self.visible()
    }
}
