use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Opaque key-value annotations carried alongside a sample.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One timestamped, categorized numeric observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub timestamp: Timestamp,
    pub value: f64,
    pub category: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Sample {
    pub fn new(timestamp: Timestamp, value: f64, category: impl Into<String>) -> Self {
        Self {
            timestamp,
            value,
            category: category.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Number of raw samples folded into this one (1 for raw samples).
    pub fn point_count(&self) -> u64 {
        self.metadata
            .get("pointCount")
            .and_then(|v| v.as_u64())
            .unwrap_or(1)
    }

    pub fn is_aggregated(&self) -> bool {
        self.metadata
            .get("aggregated")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// Pixel-space projection of a sample. Recomputed every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

impl CanvasPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
