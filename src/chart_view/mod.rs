pub mod actions;

use crate::dashboard::Dashboard;
use crate::performance::{FpsHealth, PerformanceMetrics};
use crate::plot_types::ChartKind;
use crate::producer::system_now;
use crate::rendering::{paint_commands, to_hsla};
use crate::surface::RecordingSurface;
use crate::theme::ChartTheme;
use crate::utils::PixelsExt;
use gpui::prelude::*;
use gpui::*;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub use actions::{
    ClearData, CycleAggregation, CycleTimeRange, ScrollTableDown, ScrollTableUp, ToggleStream,
};

/// Registers the dashboard key bindings.
pub fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("space", ToggleStream, None),
        KeyBinding::new("c", ClearData, None),
        KeyBinding::new("a", CycleAggregation, None),
        KeyBinding::new("t", CycleTimeRange, None),
        KeyBinding::new("up", ScrollTableUp, None),
        KeyBinding::new("down", ScrollTableDown, None),
    ]);
}

/// Window shell around a [`Dashboard`]: four charts in a 2x2 grid, a metrics
/// header and the data table.
///
/// Every frame requests the next animation frame, so gpui's frame callbacks
/// drive the chart redraws. Ingestion runs on a background-executor timer
/// task that is dropped, and thereby cancelled, when the stream stops.
pub struct DashboardView {
    dashboard: Arc<Mutex<Dashboard>>,
    ingest_task: Option<Task<()>>,
    aggregation_preset: Option<usize>,
    time_range_preset: Option<usize>,
    focus_handle: FocusHandle,
}

impl Focusable for DashboardView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl DashboardView {
    pub fn new(dashboard: Dashboard, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let focus_handle = cx.focus_handle();
        window.focus(&focus_handle);
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
            ingest_task: None,
            aggregation_preset: None,
            time_range_preset: None,
            focus_handle,
        }
    }

    pub fn dashboard(&self) -> &Arc<Mutex<Dashboard>> {
        &self.dashboard
    }

    pub fn is_streaming(&self) -> bool {
        self.ingest_task.is_some()
    }

    pub fn start_stream(&mut self, cx: &mut Context<Self>) {
        if self.ingest_task.is_some() {
            return;
        }
        let interval = {
            let mut dashboard = self.dashboard.lock();
            dashboard.start_stream(system_now());
            Duration::from_millis(dashboard.config().ingestion_interval_ms.max(1) as u64)
        };

        self.ingest_task = Some(cx.spawn(async move |this, cx| {
            loop {
                cx.background_executor().timer(interval).await;
                let alive = this.update(cx, |view, cx| {
                    if view.dashboard.lock().ingest(system_now()) > 0 {
                        cx.notify();
                    }
                });
                if alive.is_err() {
                    break;
                }
            }
        }));
        cx.notify();
    }

    pub fn stop_stream(&mut self, cx: &mut Context<Self>) {
        self.dashboard.lock().stop_stream();
        // Dropping the task cancels the pending timer.
        self.ingest_task = None;
        cx.notify();
    }

    fn render_metrics(&self, metrics: PerformanceMetrics, points: usize, theme: &ChartTheme) -> Div {
        let fps_color = match metrics.health() {
            FpsHealth::Good => theme.fps_good,
            FpsHealth::Fair => theme.fps_fair,
            FpsHealth::Poor => theme.fps_poor,
        };
        let status = if self.is_streaming() { "Streaming" } else { "Paused" };

        div()
            .flex()
            .flex_row()
            .gap(px(24.0))
            .px(px(16.0))
            .py(px(8.0))
            .text_size(px(theme.axis_label_size + 1.0))
            .text_color(to_hsla(theme.table_text))
            .child(
                div()
                    .text_color(to_hsla(fps_color))
                    .child(format!("FPS {:.0}", metrics.fps)),
            )
            .child(format!("Render {:.2} ms", metrics.render_time_ms))
            .child(format!("Processing {:.2} ms", metrics.data_processing_time_ms))
            .child(format!("Memory {:.1} MB", metrics.memory_usage_mb))
            .child(format!("Points {points}"))
            .child(status)
    }
}

fn chart_canvas(dashboard: Arc<Mutex<Dashboard>>, chart: ChartKind) -> impl IntoElement {
    canvas(
        move |bounds, _window, _cx| {
            let (width, height) = (bounds.size.width.as_f32(), bounds.size.height.as_f32());
            let mut surface = RecordingSurface::new(width, height);
            let mut dashboard = dashboard.lock();
            match dashboard.resize_chart(chart, width, height) {
                Ok(()) => {
                    dashboard.render_frame(chart, &mut surface);
                }
                Err(err) => debug!(chart = chart.label(), error = %err, "chart too small to draw"),
            }
            surface.take_commands()
        },
        move |bounds, commands, window, cx| {
            paint_commands(&commands, bounds, window, cx);
        },
    )
    .flex_1()
    .h_full()
}

fn table_canvas(dashboard: Arc<Mutex<Dashboard>>) -> impl IntoElement {
    canvas(
        move |bounds, _window, _cx| {
            let (width, height) = (bounds.size.width.as_f32(), bounds.size.height.as_f32());
            let mut surface = RecordingSurface::new(width, height);
            let mut dashboard = dashboard.lock();
            dashboard.table_mut().set_viewport_height(height);
            dashboard.render_table(&mut surface);
            surface.take_commands()
        },
        move |bounds, commands, window, cx| {
            paint_commands(&commands, bounds, window, cx);
        },
    )
    .size_full()
}

impl Render for DashboardView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        window.request_animation_frame();

        let (theme, metrics, points, table_height) = {
            let dashboard = self.dashboard.lock();
            (
                dashboard.config().theme.clone(),
                dashboard.metrics(),
                dashboard.state().len(),
                dashboard.config().table.viewport_height,
            )
        };

        let chart_row = |a: ChartKind, b: ChartKind| {
            div()
                .flex()
                .flex_row()
                .flex_1()
                .gap(px(8.0))
                .child(chart_canvas(self.dashboard.clone(), a))
                .child(chart_canvas(self.dashboard.clone(), b))
        };

        div()
            .id("telemetry-dashboard")
            .track_focus(&self.focus_handle)
            .size_full()
            .flex()
            .flex_col()
            .gap(px(8.0))
            .bg(to_hsla(theme.background))
            .child(self.render_metrics(metrics, points, &theme))
            .child(chart_row(ChartKind::Line, ChartKind::Bar))
            .child(chart_row(ChartKind::Scatter, ChartKind::Heatmap))
            .child(
                div()
                    .h(px(table_height))
                    .child(table_canvas(self.dashboard.clone()))
                    .on_scroll_wheel(cx.listener(|this, ev: &ScrollWheelEvent, _, cx| {
                        let dy = ev.delta.pixel_delta(px(20.0)).y.as_f32();
                        this.dashboard.lock().table_mut().scroll_by(-dy);
                        cx.notify();
                    })),
            )
            .on_action(cx.listener(Self::handle_toggle_stream))
            .on_action(cx.listener(Self::handle_clear_data))
            .on_action(cx.listener(Self::handle_cycle_aggregation))
            .on_action(cx.listener(Self::handle_cycle_time_range))
            .on_action(cx.listener(Self::handle_scroll_table_up))
            .on_action(cx.listener(Self::handle_scroll_table_down))
    }
}
