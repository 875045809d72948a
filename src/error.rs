//! Error types shared across the pipeline, render loop and endpoint.

use thiserror::Error;

/// Configuration rejected at the boundary, before it reaches the render loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("canvas must have a positive area, got {width}x{height}")]
    ZeroAreaCanvas { width: f32, height: f32 },
    #[error("padding leaves no plot area on a {width}x{height} canvas")]
    PaddingExceedsCanvas { width: f32, height: f32 },
    #[error("density grid resolution must be at least 1")]
    ZeroGridSize,
    #[error("axis tick steps must be at least 1")]
    ZeroTickSteps,
    #[error("aggregation period must be positive, got {0} ms")]
    InvalidAggregationPeriod(i64),
    #[error("stream buffer capacity must be at least 1")]
    ZeroCapacity,
    #[error("ingestion interval must be positive")]
    ZeroInterval,
    #[error("performance window must hold at least one frame")]
    ZeroMonitorWindow,
    #[error("row height must be positive and finite, got {0}")]
    InvalidRowHeight(f32),
    #[error("point budget must be at least 1")]
    ZeroPointBudget,
}

/// Failure reported by a sample producer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProducerError {
    #[error("producer is exhausted")]
    Exhausted,
    #[error("producer failed: {0}")]
    Failed(String),
}

/// Failure surfaced by the bulk data endpoint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EndpointError {
    #[error("Invalid type parameter")]
    InvalidType,
    #[error("Invalid count parameter")]
    InvalidCount,
    #[error("Failed to generate data")]
    Producer(#[from] ProducerError),
}

impl EndpointError {
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidType | Self::InvalidCount => 400,
            Self::Producer(_) => 500,
        }
    }
}
