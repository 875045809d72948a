//! Frame-paced redraw loop.
//!
//! A [`RenderLoop`] keeps at most one frame request outstanding with its
//! [`FrameScheduler`]. Each delivered frame redraws the chart synchronously,
//! feeds the render time into the loop's [`PerformanceMonitor`] and asks for
//! the next frame. Tearing the loop down cancels the outstanding request.

use crate::axis_renderer::AxisRenderer;
use crate::data_types::{
    compute_time_range, compute_value_range, AxisConfig, CanvasConfig, RangeDefaults, Sample,
    DEFAULT_VALUE_PADDING,
};
use crate::error::ConfigError;
use crate::performance::{AdaptiveBudget, PerformanceMonitor};
use crate::plot_types::{PlotContext, PlotRenderer};
use crate::surface::DrawSurface;
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;
use std::time::Instant;
use tracing::trace;

/// Identifies one frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Returns `false` when the handle was not pending.
    fn cancel_frame(&mut self, handle: FrameHandle) -> bool;
}

/// Deterministic scheduler: requests queue up until [`take_ready`] drains them.
///
/// [`take_ready`]: ManualScheduler::take_ready
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out every pending frame, in request order.
    pub fn take_ready(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        self.pending.len() != before
    }
}

pub struct RenderLoop<R: PlotRenderer> {
    renderer: R,
    canvas: CanvasConfig,
    axis: AxisConfig,
    theme: ChartTheme,
    range_defaults: RangeDefaults,
    value_padding: f64,
    monitor: PerformanceMonitor,
    budget: AdaptiveBudget,
    pending: Option<FrameHandle>,
    torn_down: bool,
}

impl<R: PlotRenderer> RenderLoop<R> {
    pub fn new(
        renderer: R,
        canvas: CanvasConfig,
        monitor: PerformanceMonitor,
        budget: AdaptiveBudget,
    ) -> Result<Self, ConfigError> {
        canvas.validate()?;
        Ok(Self {
            renderer,
            canvas,
            axis: AxisConfig::default(),
            theme: ChartTheme::default(),
            range_defaults: RangeDefaults::default(),
            value_padding: DEFAULT_VALUE_PADDING,
            monitor,
            budget,
            pending: None,
            torn_down: false,
        })
    }

    pub fn with_axis(mut self, axis: AxisConfig) -> Result<Self, ConfigError> {
        if axis.tick_steps == 0 {
            return Err(ConfigError::ZeroTickSteps);
        }
        self.axis = axis;
        Ok(self)
    }

    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_range_defaults(mut self, defaults: RangeDefaults) -> Self {
        self.range_defaults = defaults;
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    pub fn set_canvas(&mut self, canvas: CanvasConfig) -> Result<(), ConfigError> {
        canvas.validate()?;
        self.canvas = canvas;
        Ok(())
    }

    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    pub fn budget(&self) -> &AdaptiveBudget {
        &self.budget
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Requests the first frame. No-op when a frame is already pending or the
    /// loop was torn down.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.torn_down || self.pending.is_some() {
            return;
        }
        self.pending = Some(scheduler.request_frame());
    }

    /// Frame callback. Returns whether the frame was drawn; stale handles and
    /// callbacks arriving after teardown are ignored.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        samples: &[Sample],
        surface: &mut dyn DrawSurface,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        if self.torn_down || self.pending != Some(handle) {
            trace!(?handle, "ignoring stale frame");
            return false;
        }
        self.pending = None;
        self.draw(samples, surface);
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Cancels the pending frame. The loop never draws again afterwards.
    pub fn teardown(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        self.torn_down = true;
    }

    /// Redraws once and records the frame. Returns the render time in ms.
    pub fn draw(&mut self, samples: &[Sample], surface: &mut dyn DrawSurface) -> f64 {
        if self.torn_down {
            return 0.0;
        }
        let started = Instant::now();
        self.paint(samples, surface);
        let render_ms = started.elapsed().as_secs_f64() * 1000.0;

        self.monitor.measure_frame(render_ms);
        self.budget.adjust(self.monitor.average_render_time());
        trace!(
            chart = self.renderer.kind().label(),
            samples = samples.len(),
            render_ms,
            "frame drawn"
        );
        render_ms
    }

    fn paint(&self, samples: &[Sample], surface: &mut dyn DrawSurface) {
        surface.clear(self.theme.background);
        let Some(last) = samples.last() else {
            return;
        };

        // `now` only matters for an empty batch, which returned above.
        let time_range = compute_time_range(samples, &self.range_defaults, last.timestamp);
        let value_range = compute_value_range(samples, self.value_padding, &self.range_defaults);
        let transform = PlotTransform::new(&self.canvas, time_range, value_range);

        AxisRenderer::paint(surface, &self.canvas, &transform, &self.axis, &self.theme);

        let ctx = PlotContext {
            canvas: &self.canvas,
            transform: &transform,
            point_budget: self.budget.current(),
        };
        self.renderer.render(surface, &ctx, samples);
    }
}
