use super::range::TimeRange;
use super::sample::Sample;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active constraints for the visible sample set. Absent fields impose no
/// restriction; present ones are AND-combined.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterOptions {
    /// Allowed categories. Empty means every category.
    pub categories: BTreeSet<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub time_range: Option<TimeRange>,
}

impl FilterOptions {
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_value_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    pub fn with_time_range(mut self, range: Option<TimeRange>) -> Self {
        self.time_range = range;
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.categories.is_empty()
            && self.min_value.is_none()
            && self.max_value.is_none()
            && self.time_range.is_none()
    }

    pub fn matches(&self, sample: &Sample) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&sample.category) {
            return false;
        }
        let bounded = self.min_value.is_some() || self.max_value.is_some();
        if bounded && !sample.value.is_finite() {
            return false;
        }
        if let Some(min) = self.min_value {
            if sample.value < min {
                return false;
            }
        }
        if let Some(max) = self.max_value {
            if sample.value > max {
                return false;
            }
        }
        if let Some(range) = self.time_range {
            if !range.contains(sample.timestamp) {
                return false;
            }
        }
        true
    }
}
