use crate::error::ConfigError;
use crate::theme::Color;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 60.0,
        }
    }
}

/// Drawing surface dimensions and the padding box around the plot area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 300.0,
            padding: Padding::default(),
        }
    }
}

impl CanvasConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn plot_width(&self) -> f32 {
        self.width - self.padding.left - self.padding.right
    }

    pub fn plot_height(&self) -> f32 {
        self.height - self.padding.top - self.padding.bottom
    }

    /// y coordinate of the value axis baseline.
    pub fn baseline_y(&self) -> f32 {
        self.height - self.padding.bottom
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.width.is_finite() && self.height.is_finite();
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::ZeroAreaCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.plot_width() > 0.0 && self.plot_height() > 0.0) {
            return Err(ConfigError::PaddingExceedsCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub tick_steps: usize,
    pub tick_length: f32,
    pub show_axes: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            tick_steps: 5,
            tick_length: 4.0,
            show_axes: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinePlotConfig {
    pub color: Color,
    pub line_width: f32,
    /// Upper bound on drawn vertices before decimation kicks in.
    pub max_points: usize,
}

impl Default for LinePlotConfig {
    fn default() -> Self {
        Self {
            color: Color::hex(0x3b82f6),
            line_width: 2.0,
            max_points: 2000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarPlotConfig {
    pub color: Color,
    /// Fraction of the per-sample horizontal slot covered by a bar.
    pub bar_width_pct: f32,
    pub min_bar_width: f32,
}

impl Default for BarPlotConfig {
    fn default() -> Self {
        Self {
            color: Color::hex(0x10b981),
            bar_width_pct: 0.5,
            min_bar_width: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterPlotConfig {
    pub color: Color,
    pub point_radius: f32,
}

impl Default for ScatterPlotConfig {
    fn default() -> Self {
        Self {
            color: Color::hex(0xf59e0b),
            point_radius: 4.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub grid_size: usize,
    /// Color of the least populated non-empty cell.
    pub cold: Color,
    /// Color of the most populated cell.
    pub hot: Color,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cold: Color::BLUE,
            hot: Color::RED,
        }
    }
}

impl HeatmapConfig {
    pub fn new(grid_size: usize) -> Result<Self, ConfigError> {
        let config = Self {
            grid_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        Ok(())
    }
}
