use super::sample::{Sample, Timestamp};
use serde::{Deserialize, Serialize};

/// Inclusive time interval in milliseconds. `start <= end` always holds,
/// including for deserialized values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTimeRange")]
pub struct TimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl From<RawTimeRange> for TimeRange {
    fn from(raw: RawTimeRange) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Builds a range from two bounds given in either order.
    pub fn new(a: Timestamp, b: Timestamp) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// The `minutes` leading up to `now`.
    pub fn last_minutes(minutes: i64, now: Timestamp) -> Self {
        Self::new(now.saturating_sub(minutes.saturating_mul(60_000)), now)
    }

    pub fn span(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, t: Timestamp) -> bool {
        t >= self.start && t <= self.end
    }
}

/// Value interval for the vertical axis. `min <= max` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawValueRange")]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Deserialize)]
struct RawValueRange {
    min: f64,
    max: f64,
}

impl From<RawValueRange> for ValueRange {
    fn from(raw: RawValueRange) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl ValueRange {
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.span().abs() < f64::EPSILON
    }
}

/// Placeholder ranges used when a batch carries no data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeDefaults {
    /// Width of the time window shown for an empty batch, ending at "now".
    pub time_span_ms: i64,
    pub value_range: ValueRange,
    /// Lower clamp for padded value ranges. `None` disables it. Ignored when
    /// every value lies at or below it. Values under the floor project below
    /// the baseline; bars clip to the plot area.
    pub value_floor: Option<f64>,
}

impl Default for RangeDefaults {
    fn default() -> Self {
        Self {
            time_span_ms: 60_000,
            value_range: ValueRange { min: 0.0, max: 100.0 },
            value_floor: Some(0.0),
        }
    }
}

pub const DEFAULT_VALUE_PADDING: f64 = 0.1;

/// Smallest and largest timestamp of the batch. An empty batch yields the
/// `defaults.time_span_ms` window ending at `now`.
pub fn compute_time_range(samples: &[Sample], defaults: &RangeDefaults, now: Timestamp) -> TimeRange {
    let mut iter = samples.iter().map(|s| s.timestamp);
    let Some(first) = iter.next() else {
        return TimeRange::new(now.saturating_sub(defaults.time_span_ms), now);
    };
    let (start, end) = iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    TimeRange { start, end }
}

/// Min/max of the batch values widened by `padding * span` on each side.
/// Non-finite values are skipped; a batch without finite values yields the
/// default range.
pub fn compute_value_range(samples: &[Sample], padding: f64, defaults: &RangeDefaults) -> ValueRange {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in samples.iter().map(|s| s.value).filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return defaults.value_range;
    }

    let pad = (max - min) * padding.max(0.0);
    let padded_max = max + pad;
    let mut padded_min = min - pad;
    if let Some(floor) = defaults.value_floor {
        // A floor at or above the padded max would flatten the batch.
        if floor < padded_max {
            padded_min = padded_min.max(floor);
        }
    }
    ValueRange {
        min: padded_min,
        max: padded_max,
    }
}
