use super::{ChartKind, PlotContext, PlotRenderer};
use crate::data_types::{BarPlotConfig, CanvasConfig, Sample};
use crate::surface::DrawSurface;

/// Bar plot type
#[derive(Clone, Debug, Default)]
pub struct BarPlot {
    pub config: BarPlotConfig,
}

impl BarPlot {
    pub fn new(config: BarPlotConfig) -> Self {
        Self { config }
    }

    /// Width shared by all bars when `n` samples are drawn.
    pub fn bar_width(&self, canvas: &CanvasConfig, n: usize) -> f32 {
        let slot = canvas.plot_width() / n.max(1) as f32;
        (slot * self.config.bar_width_pct).max(self.config.min_bar_width)
    }
}

impl PlotRenderer for BarPlot {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn render(&self, surface: &mut dyn DrawSurface, ctx: &PlotContext<'_>, samples: &[Sample]) {
        if samples.is_empty() {
            return;
        }
        let width = self.bar_width(ctx.canvas, samples.len());
        let baseline = ctx.canvas.baseline_y();
        let plot_top = ctx.canvas.padding.top;

        for sample in samples {
            let p = ctx.transform.project(sample);
            // Values under the floor project below the baseline and clip to an empty bar.
            let top = p.y.clamp(plot_top, baseline);
            surface.fill_rect(p.x - width / 2.0, top, width, baseline - top, self.config.color);
        }
    }
}
