// Plot types module

pub mod bar;
pub mod heatmap;
pub mod line;
pub mod scatter;

pub use bar::BarPlot;
pub use heatmap::HeatmapPlot;
pub use line::LinePlot;
pub use scatter::ScatterPlot;

use crate::data_types::{CanvasConfig, Sample};
use crate::surface::DrawSurface;
use crate::transform::PlotTransform;
use serde::{Deserialize, Serialize};

/// The four chart variants hosted by the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Heatmap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [Self::Line, Self::Bar, Self::Scatter, Self::Heatmap];

    pub fn label(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Bar => "Bar",
            Self::Scatter => "Scatter",
            Self::Heatmap => "Heatmap",
        }
    }
}

/// Per-frame inputs shared by every plot renderer.
pub struct PlotContext<'a> {
    pub canvas: &'a CanvasConfig,
    pub transform: &'a PlotTransform,
    /// Vertex budget for renderers that decimate.
    pub point_budget: usize,
}

/// Trait for rendering plot types
pub trait PlotRenderer: Send + Sync {
    fn kind(&self) -> ChartKind;

    /// Draws the variant's marks for the visible samples. Axes and clearing
    /// are handled by the caller.
    fn render(&self, surface: &mut dyn DrawSurface, ctx: &PlotContext<'_>, samples: &[Sample]);
}
