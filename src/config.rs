//! Dashboard configuration: plain serde values, every field defaulted.

use crate::data_types::{
    AxisConfig, BarPlotConfig, CanvasConfig, FilterOptions, HeatmapConfig, LinePlotConfig,
    RangeDefaults, ScatterPlotConfig,
};
use crate::error::ConfigError;
use crate::performance::DEFAULT_MONITOR_WINDOW;
use crate::theme::ChartTheme;
use crate::virtualization::DEFAULT_OVERSCAN;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub row_height: f32,
    pub viewport_height: f32,
    pub overscan: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_height: crate::data_table::DEFAULT_ROW_HEIGHT,
            viewport_height: crate::data_table::DEFAULT_VIEWPORT_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Lowest line point budget the adaptive budget may fall to.
    pub floor: usize,
    /// Average render time above which the budget is halved.
    pub target_frame_ms: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            floor: 250,
            target_frame_ms: 8.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub canvas: CanvasConfig,
    pub axis: AxisConfig,
    pub theme: ChartTheme,
    /// `max_points` is the point budget ceiling.
    pub line: LinePlotConfig,
    pub bar: BarPlotConfig,
    pub scatter: ScatterPlotConfig,
    pub heatmap: HeatmapConfig,
    pub budget: BudgetConfig,
    /// `None` draws raw samples.
    pub aggregation_period_ms: Option<i64>,
    pub filters: FilterOptions,
    pub buffer_capacity: usize,
    pub ingestion_interval_ms: i64,
    /// Samples requested by the initial bulk load.
    pub initial_count: usize,
    pub table: TableConfig,
    pub monitor_window: usize,
    pub range_defaults: RangeDefaults,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            axis: AxisConfig::default(),
            theme: ChartTheme::default(),
            line: LinePlotConfig::default(),
            bar: BarPlotConfig::default(),
            scatter: ScatterPlotConfig::default(),
            heatmap: HeatmapConfig::default(),
            budget: BudgetConfig::default(),
            aggregation_period_ms: None,
            filters: FilterOptions::default(),
            buffer_capacity: 10_000,
            ingestion_interval_ms: 100,
            initial_count: 1000,
            table: TableConfig::default(),
            monitor_window: DEFAULT_MONITOR_WINDOW,
            range_defaults: RangeDefaults::default(),
        }
    }
}

impl DashboardConfig {
    /// Checks every field the render loop and pipeline rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.canvas.validate()?;
        self.heatmap.validate()?;
        if self.axis.tick_steps == 0 {
            return Err(ConfigError::ZeroTickSteps);
        }
        if let Some(period) = self.aggregation_period_ms {
            if period <= 0 {
                return Err(ConfigError::InvalidAggregationPeriod(period));
            }
        }
        if self.buffer_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.ingestion_interval_ms <= 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.monitor_window == 0 {
            return Err(ConfigError::ZeroMonitorWindow);
        }
        if self.line.max_points == 0 || self.budget.floor == 0 {
            return Err(ConfigError::ZeroPointBudget);
        }
        let row = self.table.row_height;
        if !(row.is_finite() && row > 0.0) {
            return Err(ConfigError::InvalidRowHeight(row));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).wrap_err("Failed to parse dashboard config")?;
        if let Err(err) = config.validate() {
            warn!(error = %err, "rejected dashboard config");
            return Err(err).wrap_err("Invalid dashboard config");
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read dashboard config {}", path.display()))?;
        let config = Self::from_json_str(&json)
            .wrap_err_with(|| format!("Failed to load dashboard config {}", path.display()))?;
        debug!(path = %path.display(), "dashboard config loaded");
        Ok(config)
    }
}
