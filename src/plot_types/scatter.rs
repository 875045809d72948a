use super::{ChartKind, PlotContext, PlotRenderer};
use crate::data_types::{Sample, ScatterPlotConfig};
use crate::surface::DrawSurface;

/// One filled circle per sample. Never decimated.
#[derive(Clone, Debug, Default)]
pub struct ScatterPlot {
    pub config: ScatterPlotConfig,
}

impl ScatterPlot {
    pub fn new(config: ScatterPlotConfig) -> Self {
        Self { config }
    }
}

impl PlotRenderer for ScatterPlot {
    fn kind(&self) -> ChartKind {
        ChartKind::Scatter
    }

    fn render(&self, surface: &mut dyn DrawSurface, ctx: &PlotContext<'_>, samples: &[Sample]) {
        for point in ctx.transform.project_all(samples) {
            surface.fill_circle(point, self.config.point_radius, self.config.color);
        }
    }
}
