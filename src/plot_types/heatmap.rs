// Density grid implementation

use super::{ChartKind, PlotContext, PlotRenderer};
use crate::data_types::{CanvasConfig, CanvasPoint, HeatmapConfig, Sample};
use crate::error::ConfigError;
use crate::surface::DrawSurface;
use crate::theme::Color;

/// Heatmap plot type: a `grid_size x grid_size` grid over the plot area,
/// each cell colored by how many projected points fall into it.
#[derive(Clone, Debug, Default)]
pub struct HeatmapPlot {
    config: HeatmapConfig,
}

impl HeatmapPlot {
    pub fn new(config: HeatmapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Color for a cell at normalized `intensity` in `0.0..=1.0`.
    pub fn intensity_color(&self, intensity: f32) -> Color {
        self.config.cold.lerp(self.config.hot, intensity)
    }
}

/// Row-major point counts per cell. Points on or past the far edge of the
/// plot area are clamped into the last row/column.
pub fn grid_counts(points: &[CanvasPoint], canvas: &CanvasConfig, grid_size: usize) -> Vec<u32> {
    let g = grid_size.max(1);
    let mut counts = vec![0u32; g * g];
    let cell_w = canvas.plot_width() / g as f32;
    let cell_h = canvas.plot_height() / g as f32;
    if !(cell_w > 0.0 && cell_h > 0.0) {
        return counts;
    }

    let cell_index = |offset: f32, cell: f32| -> usize {
        let i = (offset / cell).floor();
        if i.is_finite() && i > 0.0 {
            (i as usize).min(g - 1)
        } else {
            0
        }
    };

    for p in points {
        let col = cell_index(p.x - canvas.padding.left, cell_w);
        let row = cell_index(p.y - canvas.padding.top, cell_h);
        counts[row * g + col] += 1;
    }
    counts
}

impl PlotRenderer for HeatmapPlot {
    fn kind(&self) -> ChartKind {
        ChartKind::Heatmap
    }

    fn render(&self, surface: &mut dyn DrawSurface, ctx: &PlotContext<'_>, samples: &[Sample]) {
        let g = self.config.grid_size;
        let canvas = ctx.canvas;
        let points = ctx.transform.project_all(samples);
        let counts = grid_counts(&points, canvas, g);

        let max = counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return;
        }

        let cell_w = canvas.plot_width() / g as f32;
        let cell_h = canvas.plot_height() / g as f32;
        for (idx, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let (row, col) = (idx / g, idx % g);
            let color = self.intensity_color(count as f32 / max as f32);
            surface.fill_rect(
                canvas.padding.left + col as f32 * cell_w,
                canvas.padding.top + row as f32 * cell_h,
                cell_w,
                cell_h,
                color,
            );
        }
    }
}
