//! Filter and time-bucket aggregation applied to the buffered samples before
//! anything is projected.

use crate::data_types::{FilterOptions, Metadata, Sample, Timestamp};
use crate::error::ConfigError;
use std::collections::HashMap;

/// Keeps the samples that satisfy every active constraint of `filters`,
/// preserving their relative order.
pub fn filter_samples(samples: &[Sample], filters: &FilterOptions) -> Vec<Sample> {
    if filters.is_unrestricted() {
        return samples.to_vec();
    }
    samples
        .iter()
        .filter(|s| filters.matches(s))
        .cloned()
        .collect()
}

/// Start of the bucket holding `timestamp`. Floors toward negative infinity so
/// pre-epoch timestamps land in the bucket below them. Buckets whose start lies
/// below `i64::MIN` saturate to it. A non-positive period leaves the timestamp
/// unbucketed.
#[inline]
pub fn bucket_key(timestamp: Timestamp, period_ms: i64) -> Timestamp {
    if period_ms <= 0 {
        return timestamp;
    }
    timestamp.div_euclid(period_ms).saturating_mul(period_ms)
}

struct Bucket<'a> {
    sum: f64,
    count: u64,
    category: &'a str,
}

/// Averages samples into fixed-width time buckets.
///
/// Each populated bucket yields one sample stamped with the bucket start,
/// carrying the mean value, the category of the first sample that arrived in
/// it and `{ "aggregated": true, "pointCount": n }` metadata. The result is
/// sorted by timestamp.
pub fn aggregate(samples: &[Sample], period_ms: i64) -> Result<Vec<Sample>, ConfigError> {
    if period_ms <= 0 {
        return Err(ConfigError::InvalidAggregationPeriod(period_ms));
    }
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let mut buckets: HashMap<Timestamp, Bucket<'_>> = HashMap::new();
    for sample in samples {
        let bucket = buckets
            .entry(bucket_key(sample.timestamp, period_ms))
            .or_insert_with(|| Bucket {
                sum: 0.0,
                count: 0,
                category: &sample.category,
            });
        bucket.sum += sample.value;
        bucket.count += 1;
    }

    let mut out: Vec<Sample> = buckets
        .into_iter()
        .map(|(timestamp, bucket)| {
            let mut metadata = Metadata::new();
            metadata.insert("aggregated".into(), true.into());
            metadata.insert("pointCount".into(), bucket.count.into());
            Sample {
                timestamp,
                value: bucket.sum / bucket.count as f64,
                category: bucket.category.to_owned(),
                metadata,
            }
        })
        .collect();

    // Map iteration order is arbitrary; renderers require ascending time.
    out.sort_unstable_by_key(|s| s.timestamp);
    Ok(out)
}

/// Filter, then optionally aggregate: the visible set every chart draws.
pub fn visible_samples(
    samples: &[Sample],
    filters: &FilterOptions,
    period_ms: Option<i64>,
) -> Result<Vec<Sample>, ConfigError> {
    let filtered = filter_samples(samples, filters);
    match period_ms {
        Some(period) => aggregate(&filtered, period),
        None => Ok(filtered),
    }
}
