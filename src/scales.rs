/// Linear mapping from a data domain onto a pixel range.
///
/// A degenerate domain (`min == max`) maps every input to the middle of the
/// range instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn is_degenerate(&self) -> bool {
        let span = self.domain.1 - self.domain.0;
        !span.is_finite() || span.abs() < f64::EPSILON
    }

    pub fn map(&self, value: f64) -> f32 {
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return r0 + (r1 - r0) / 2.0;
        }
        let t = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        let res = r0 as f64 + t * (r1 - r0) as f64;
        if res.is_finite() {
            res as f32
        } else {
            r0
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        let (r0, r1) = self.range;
        let span_px = (r1 - r0) as f64;
        if self.is_degenerate() || span_px.abs() < f64::EPSILON {
            return self.domain.0;
        }
        self.domain.0 + (pixel - r0) as f64 / span_px * (self.domain.1 - self.domain.0)
    }

    /// `steps + 1` evenly spaced domain values from `min` to `max`.
    pub fn even_ticks(&self, steps: usize) -> Vec<f64> {
        let steps = steps.max(1);
        let (d0, d1) = self.domain;
        (0..=steps)
            .map(|i| d0 + (d1 - d0) * i as f64 / steps as f64)
            .collect()
    }
}
