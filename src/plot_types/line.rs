use super::{ChartKind, PlotContext, PlotRenderer};
use crate::data_types::{LinePlotConfig, Sample};
use crate::decimation::decimate;
use crate::surface::DrawSurface;
use tracing::trace;

/// Line plot type
#[derive(Clone, Debug, Default)]
pub struct LinePlot {
    pub config: LinePlotConfig,
}

impl LinePlot {
    pub fn new(config: LinePlotConfig) -> Self {
        Self { config }
    }
}

impl PlotRenderer for LinePlot {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn render(&self, surface: &mut dyn DrawSurface, ctx: &PlotContext<'_>, samples: &[Sample]) {
        let projected = ctx.transform.project_all(samples);
        let budget = ctx.point_budget.min(self.config.max_points);
        let points = decimate(&projected, budget);
        trace!(input = projected.len(), drawn = points.len(), budget, "line plot decimated");
        surface.stroke_polyline(&points, self.config.line_width, self.config.color);
    }
}
