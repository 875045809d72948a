//! Headless dashboard: state, ingestion, the four chart loops and the table.

use crate::config::DashboardConfig;
use crate::data_table::DataTable;
use crate::data_types::{CanvasConfig, DashboardState, Timestamp};
use crate::error::{ConfigError, ProducerError};
use crate::performance::{AdaptiveBudget, PerformanceMetrics, PerformanceMonitor, ProcStatmProbe};
use crate::plot_types::{BarPlot, ChartKind, HeatmapPlot, LinePlot, PlotRenderer, ScatterPlot};
use crate::producer::SampleProducer;
use crate::render_loop::{FrameHandle, FrameScheduler, RenderLoop};
use crate::stream::IngestionTimer;
use crate::surface::DrawSurface;
use eyre::{Result, WrapErr};
use tracing::{debug, info, warn};

pub struct Dashboard {
    config: DashboardConfig,
    state: DashboardState,
    producer: Box<dyn SampleProducer>,
    timer: IngestionTimer,
    line: RenderLoop<LinePlot>,
    bar: RenderLoop<BarPlot>,
    scatter: RenderLoop<ScatterPlot>,
    heatmap: RenderLoop<HeatmapPlot>,
    table: DataTable,
    /// State generation the table was last filled from.
    table_generation: Option<u64>,
}

fn build_loop<R: PlotRenderer>(
    renderer: R,
    config: &DashboardConfig,
    budget: AdaptiveBudget,
) -> Result<RenderLoop<R>, ConfigError> {
    let monitor = PerformanceMonitor::new(config.monitor_window)?.with_probe(ProcStatmProbe::default());
    Ok(RenderLoop::new(renderer, config.canvas, monitor, budget)?
        .with_axis(config.axis)?
        .with_theme(config.theme.clone())
        .with_range_defaults(config.range_defaults))
}

impl Dashboard {
    pub fn from_config(config: DashboardConfig, producer: impl SampleProducer + 'static) -> Result<Self> {
        config.validate().wrap_err("Invalid dashboard config")?;

        let mut state = DashboardState::new(config.buffer_capacity)?;
        state.set_filters(config.filters.clone());
        state.set_aggregation_period(config.aggregation_period_ms)?;

        let ceiling = config.line.max_points;
        let adaptive = AdaptiveBudget::new(ceiling, config.budget.floor, config.budget.target_frame_ms)?;
        let fixed = AdaptiveBudget::fixed(ceiling)?;

        let line = build_loop(LinePlot::new(config.line), &config, adaptive)
            .wrap_err("Failed to build line chart")?;
        let bar = build_loop(BarPlot::new(config.bar), &config, fixed)
            .wrap_err("Failed to build bar chart")?;
        let scatter = build_loop(ScatterPlot::new(config.scatter), &config, fixed)
            .wrap_err("Failed to build scatter chart")?;
        let heatmap = build_loop(HeatmapPlot::new(config.heatmap)?, &config, fixed)
            .wrap_err("Failed to build heatmap")?;

        let table = DataTable::new(
            config.table.row_height,
            config.table.viewport_height,
            config.table.overscan,
        )?;
        let timer = IngestionTimer::new(config.ingestion_interval_ms)?;

        info!(
            capacity = config.buffer_capacity,
            interval_ms = config.ingestion_interval_ms,
            point_budget = ceiling,
            "dashboard created"
        );

        Ok(Self {
            config,
            state,
            producer: Box::new(producer),
            timer,
            line,
            bar,
            scatter,
            heatmap,
            table,
            table_generation: None,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable {
        &mut self.table
    }

    pub fn monitor(&self, chart: ChartKind) -> &PerformanceMonitor {
        match chart {
            ChartKind::Line => self.line.monitor(),
            ChartKind::Bar => self.bar.monitor(),
            ChartKind::Scatter => self.scatter.monitor(),
            ChartKind::Heatmap => self.heatmap.monitor(),
        }
    }

    /// Fits `chart` to a surface of the given size. The previous canvas is
    /// kept when the new one leaves no plot area.
    pub fn resize_chart(&mut self, chart: ChartKind, width: f32, height: f32) -> Result<(), ConfigError> {
        let canvas = CanvasConfig {
            width,
            height,
            ..self.config.canvas
        };
        let current = match chart {
            ChartKind::Line => self.line.canvas(),
            ChartKind::Bar => self.bar.canvas(),
            ChartKind::Scatter => self.scatter.canvas(),
            ChartKind::Heatmap => self.heatmap.canvas(),
        };
        if *current == canvas {
            return Ok(());
        }
        match chart {
            ChartKind::Line => self.line.set_canvas(canvas),
            ChartKind::Bar => self.bar.set_canvas(canvas),
            ChartKind::Scatter => self.scatter.set_canvas(canvas),
            ChartKind::Heatmap => self.heatmap.set_canvas(canvas),
        }
    }

    /// Current line point budget.
    pub fn point_budget(&self) -> usize {
        self.line.budget().current()
    }

    /// Replaces the buffer contents with a fresh batch from the producer.
    pub fn load_initial(&mut self, count: usize) -> Result<usize, ProducerError> {
        match self.producer.generate_initial_batch(count) {
            Ok(batch) => {
                let n = batch.len();
                self.state.set_data(batch);
                info!(loaded = n, "initial batch loaded");
                Ok(n)
            }
            Err(err) => {
                warn!(error = %err, "initial batch failed");
                Err(err)
            }
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.timer.is_running()
    }

    pub fn start_stream(&mut self, now: Timestamp) {
        if !self.timer.is_running() {
            self.timer.start(now);
            info!(interval_ms = self.timer.interval_ms(), "stream started");
        }
    }

    pub fn stop_stream(&mut self) {
        if self.timer.is_running() {
            self.timer.stop();
            info!("stream stopped");
        }
    }

    /// Appends one produced sample per due ingestion tick. Returns how many
    /// samples were added.
    pub fn ingest(&mut self, now: Timestamp) -> usize {
        let due = self.timer.poll(now);
        let mut added = 0;
        for _ in 0..due {
            match self.producer.generate_one() {
                Ok(sample) => {
                    self.state.add_sample(sample);
                    added += 1;
                }
                Err(err) => warn!(error = %err, "producer failed, tick skipped"),
            }
        }
        added
    }

    /// Drops all samples and stops the stream.
    pub fn clear(&mut self) {
        self.state.clear();
        self.stop_stream();
        info!("dashboard cleared");
    }

    /// Redraws one chart from the current visible set. Returns the render time in ms.
    pub fn render_frame(&mut self, chart: ChartKind, surface: &mut dyn DrawSurface) -> f64 {
        let samples = self.state.visible();
        match chart {
            ChartKind::Line => self.line.draw(samples, surface),
            ChartKind::Bar => self.bar.draw(samples, surface),
            ChartKind::Scatter => self.scatter.draw(samples, surface),
            ChartKind::Heatmap => self.heatmap.draw(samples, surface),
        }
    }

    /// Requests the first frame of every chart.
    pub fn start_charts(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.line.start(scheduler);
        self.bar.start(scheduler);
        self.scatter.start(scheduler);
        self.heatmap.start(scheduler);
    }

    /// Routes a delivered frame to `chart`'s loop.
    pub fn on_frame(
        &mut self,
        chart: ChartKind,
        handle: FrameHandle,
        surface: &mut dyn DrawSurface,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        let samples = self.state.visible();
        match chart {
            ChartKind::Line => self.line.on_frame(handle, samples, surface, scheduler),
            ChartKind::Bar => self.bar.on_frame(handle, samples, surface, scheduler),
            ChartKind::Scatter => self.scatter.on_frame(handle, samples, surface, scheduler),
            ChartKind::Heatmap => self.heatmap.on_frame(handle, samples, surface, scheduler),
        }
    }

    pub fn pending_frame(&self, chart: ChartKind) -> Option<FrameHandle> {
        match chart {
            ChartKind::Line => self.line.pending_frame(),
            ChartKind::Bar => self.bar.pending_frame(),
            ChartKind::Scatter => self.scatter.pending_frame(),
            ChartKind::Heatmap => self.heatmap.pending_frame(),
        }
    }

    /// Cancels every pending frame and the ingestion timer.
    pub fn teardown(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.stop_stream();
        self.line.teardown(scheduler);
        self.bar.teardown(scheduler);
        self.scatter.teardown(scheduler);
        self.heatmap.teardown(scheduler);
        debug!("dashboard torn down");
    }

    /// Refills the table when the visible set changed since the last call.
    pub fn sync_table(&mut self) {
        let generation = self.state.generation();
        if self.table_generation == Some(generation) {
            return;
        }
        self.table.set_data(self.state.visible());
        self.table_generation = Some(generation);
    }

    pub fn render_table(&mut self, surface: &mut dyn DrawSurface) {
        self.sync_table();
        self.table.paint(surface, &self.config.theme);
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        let loops = [
            self.line.monitor(),
            self.bar.monitor(),
            self.scatter.monitor(),
            self.heatmap.monitor(),
        ];
        PerformanceMetrics {
            fps: self.line.monitor().fps(),
            memory_usage_mb: self.line.monitor().memory_usage_mb(),
            render_time_ms: loops.iter().map(|m| m.average_render_time()).sum(),
            data_processing_time_ms: self.state.data_processing_time_ms(),
            frame_count: self.line.monitor().frame_count(),
        }
    }
}
