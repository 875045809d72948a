//! Projection of samples onto the drawing surface.

use crate::data_types::{CanvasConfig, CanvasPoint, Sample, TimeRange, ValueRange};
use crate::scales::LinearScale;
use rayon::prelude::*;

/// Batches larger than this are projected on the rayon pool.
const PARALLEL_THRESHOLD: usize = 16_384;

#[derive(Clone, Copy, Debug)]
pub struct PlotTransform {
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
}

impl PlotTransform {
    /// Time maps onto `[padding.left, width - padding.right]`, value onto
    /// `[height - padding.bottom, padding.top]` so larger values sit higher.
    pub fn new(canvas: &CanvasConfig, time_range: TimeRange, value_range: ValueRange) -> Self {
        let p = &canvas.padding;
        Self {
            x_scale: LinearScale::new(
                (time_range.start as f64, time_range.end as f64),
                (p.left, canvas.width - p.right),
            ),
            y_scale: LinearScale::new(
                (value_range.min, value_range.max),
                (canvas.height - p.bottom, p.top),
            ),
        }
    }

    #[inline]
    pub fn project(&self, sample: &Sample) -> CanvasPoint {
        CanvasPoint {
            x: self.x_scale.map(sample.timestamp as f64),
            y: self.y_scale.map(sample.value),
        }
    }

    /// Projects a batch, preserving order.
    pub fn project_all(&self, samples: &[Sample]) -> Vec<CanvasPoint> {
        if samples.len() >= PARALLEL_THRESHOLD {
            samples.par_iter().map(|s| self.project(s)).collect()
        } else {
            samples.iter().map(|s| self.project(s)).collect()
        }
    }

    /// Value represented by a pixel row.
    pub fn value_at(&self, y: f32) -> f64 {
        self.y_scale.invert(y)
    }

    /// Timestamp represented by a pixel column.
    pub fn time_at(&self, x: f32) -> f64 {
        self.x_scale.invert(x)
    }
}

/// Convenience wrapper for one-off projections.
pub fn project(
    sample: &Sample,
    canvas: &CanvasConfig,
    time_range: TimeRange,
    value_range: ValueRange,
) -> CanvasPoint {
    PlotTransform::new(canvas, time_range, value_range).project(sample)
}
