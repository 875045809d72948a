use telemetry_chart::data_types::{
    BarPlotConfig, CanvasConfig, HeatmapConfig, LinePlotConfig, Sample, ScatterPlotConfig,
};
use telemetry_chart::error::ConfigError;
use telemetry_chart::performance::{AdaptiveBudget, PerformanceMonitor};
use telemetry_chart::plot_types::heatmap::grid_counts;
use telemetry_chart::plot_types::{BarPlot, HeatmapPlot, LinePlot, PlotRenderer, ScatterPlot};
use telemetry_chart::render_loop::{FrameHandle, FrameScheduler, ManualScheduler, RenderLoop};
use telemetry_chart::surface::{DrawCommand, DrawSurface, RecordingSurface};
use telemetry_chart::theme::{ChartTheme, Color};
use telemetry_chart::data_types::CanvasPoint;

fn make_loop<R: PlotRenderer>(renderer: R) -> RenderLoop<R> {
    RenderLoop::new(
        renderer,
        CanvasConfig::default(),
        PerformanceMonitor::new(60).unwrap(),
        AdaptiveBudget::fixed(2_000).unwrap(),
    )
    .unwrap()
}

fn surface() -> RecordingSurface {
    RecordingSurface::new(800.0, 300.0)
}

fn is_polyline(c: &DrawCommand) -> bool {
    matches!(c, DrawCommand::Polyline { .. })
}

fn rects(surface: &RecordingSurface) -> Vec<(f32, f32, f32, f32, Color)> {
    surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Rect { x, y, width, height, color } => Some((*x, *y, *width, *height, *color)),
            _ => None,
        })
        .collect()
}

fn ramp(n: i64) -> Vec<Sample> {
    (0..n).map(|i| Sample::new(i, (i % 100) as f64, "CPU")).collect()
}

#[test]
fn test_empty_frame_clears_and_reschedules() {
    let mut chart = make_loop(LinePlot::default());
    let mut scheduler = ManualScheduler::new();
    let mut surface = surface();

    chart.start(&mut scheduler);
    assert_eq!(scheduler.pending_count(), 1);
    let handle = scheduler.take_ready()[0];

    assert!(chart.on_frame(handle, &[], &mut surface, &mut scheduler));
    assert_eq!(surface.commands(), &[DrawCommand::Clear(ChartTheme::default().background)]);
    assert_eq!(scheduler.pending_count(), 1, "empty data must not stop the cycle");
    assert_eq!(chart.monitor().frame_count(), 1);
}

#[test]
fn test_start_keeps_single_pending_frame() {
    let mut chart = make_loop(ScatterPlot::default());
    let mut scheduler = ManualScheduler::new();
    chart.start(&mut scheduler);
    chart.start(&mut scheduler);
    assert_eq!(scheduler.pending_count(), 1);
}

#[test]
fn test_stale_handle_is_ignored() {
    let mut chart = make_loop(LinePlot::default());
    let mut scheduler = ManualScheduler::new();
    let mut surface = surface();
    let data = ramp(10);

    chart.start(&mut scheduler);
    let first = scheduler.take_ready()[0];
    assert!(chart.on_frame(first, &data, &mut surface, &mut scheduler));
    // The same handle delivered twice draws only once.
    assert!(!chart.on_frame(first, &data, &mut surface, &mut scheduler));
    assert!(!chart.on_frame(FrameHandle(999), &data, &mut surface, &mut scheduler));
    assert_eq!(chart.monitor().frame_count(), 1);
}

#[test]
fn test_teardown_cancels_pending_frame() {
    let mut chart = make_loop(BarPlot::default());
    let mut scheduler = ManualScheduler::new();
    let mut surface = surface();

    chart.start(&mut scheduler);
    let handle = chart.pending_frame().unwrap();
    chart.teardown(&mut scheduler);

    assert_eq!(scheduler.pending_count(), 0);
    assert!(chart.is_torn_down());
    assert!(!chart.on_frame(handle, &ramp(5), &mut surface, &mut scheduler));
    assert_eq!(chart.draw(&ramp(5), &mut surface), 0.0);
    assert!(surface.commands().is_empty(), "torn-down loop must not draw");

    chart.start(&mut scheduler);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_manual_scheduler_cancel() {
    let mut scheduler = ManualScheduler::new();
    let a = scheduler.request_frame();
    let b = scheduler.request_frame();
    assert_ne!(a, b);
    assert!(scheduler.cancel_frame(a));
    assert!(!scheduler.cancel_frame(a));
    assert!(scheduler.is_pending(b));
    assert_eq!(scheduler.take_ready(), vec![b]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_axes_drawn_with_ticks_and_labels() {
    let mut chart = make_loop(ScatterPlot::default());
    let mut surface = surface();
    let data = vec![Sample::new(0, 0.0, "A"), Sample::new(1_000, 100.0, "A")];
    chart.draw(&data, &mut surface);

    let lines = surface.count(|c| matches!(c, DrawCommand::Line { .. }));
    // Two axis lines plus six ticks per axis.
    assert_eq!(lines, 2 + 6 + 6);

    let texts: Vec<&str> = surface.texts().collect();
    assert_eq!(texts.len(), 12);
    for label in ["0.0", "22.0", "44.0", "66.0", "88.0", "110.0"] {
        assert!(texts.contains(&label), "missing value label {label}");
    }
    assert_eq!(texts.iter().filter(|t| **t == "00:00:00").count(), 6);
}

#[test]
fn test_zero_tick_steps_rejected() {
    let chart = make_loop(LinePlot::default());
    let axis = telemetry_chart::data_types::AxisConfig {
        tick_steps: 0,
        ..Default::default()
    };
    assert_eq!(chart.with_axis(axis).err(), Some(ConfigError::ZeroTickSteps));
}

#[test]
fn test_line_plot_decimates_to_budget() {
    let mut chart = make_loop(LinePlot::new(LinePlotConfig::default()));
    let mut surface = surface();
    let data = ramp(5_000);
    chart.draw(&data, &mut surface);

    let polyline = surface
        .commands()
        .iter()
        .find_map(|c| match c {
            DrawCommand::Polyline { points, width, .. } => Some((points.clone(), *width)),
            _ => None,
        })
        .expect("line plot draws a polyline");
    assert!(polyline.0.len() <= 2_001);
    assert_eq!(polyline.1, 2.0);

    let last = polyline.0.last().copied().unwrap();
    assert!((last.x - 780.0).abs() < 1e-3, "last vertex is the newest sample");
}

#[test]
fn test_line_plot_respects_lower_budget() {
    let mut chart = RenderLoop::new(
        LinePlot::default(),
        CanvasConfig::default(),
        PerformanceMonitor::new(60).unwrap(),
        AdaptiveBudget::fixed(100).unwrap(),
    )
    .unwrap();
    let mut surface = surface();
    chart.draw(&ramp(1_000), &mut surface);
    assert_eq!(surface.count(is_polyline), 1);
    match surface.commands().iter().find(|c| is_polyline(c)) {
        Some(DrawCommand::Polyline { points, .. }) => assert!(points.len() <= 101),
        _ => unreachable!(),
    }
}

#[test]
fn test_bar_width_rule() {
    let bar = BarPlot::new(BarPlotConfig::default());
    let canvas = CanvasConfig::default();
    assert_eq!(bar.bar_width(&canvas, 10), 36.0);
    assert_eq!(bar.bar_width(&canvas, 1_000), 2.0);
}

#[test]
fn test_bars_stand_on_baseline() {
    let mut chart = make_loop(BarPlot::default());
    let mut surface = surface();
    let data = vec![Sample::new(0, 50.0, "A"), Sample::new(1_000, 100.0, "A")];
    chart.draw(&data, &mut surface);

    let bars = rects(&surface);
    assert_eq!(bars.len(), 2);
    for (_, y, width, height, _) in bars {
        assert_eq!(width, 180.0);
        assert!(height >= 0.0);
        assert!((y + height - 260.0).abs() < 1e-3);
    }
}

#[test]
fn test_bars_below_floor_clip_to_plot_area() {
    let mut chart = make_loop(BarPlot::default());
    let mut surface = surface();
    let data = vec![Sample::new(0, -50.0, "A"), Sample::new(1_000, 10.0, "A")];
    chart.draw(&data, &mut surface);

    let bars = rects(&surface);
    assert_eq!(bars.len(), 2);
    for (_, y, _, height, _) in &bars {
        assert!(*y >= 20.0 && y + height <= 260.0 + 1e-3);
        assert!(*height >= 0.0);
    }
    // The sample under the floor collapses onto the baseline.
    assert_eq!((bars[0].1, bars[0].3), (260.0, 0.0));
}

#[test]
fn test_scatter_draws_one_circle_per_sample() {
    let mut chart = make_loop(ScatterPlot::new(ScatterPlotConfig::default()));
    let mut surface = surface();
    chart.draw(&ramp(3_000), &mut surface);
    let circles = surface.count(|c| matches!(c, DrawCommand::Circle { radius, .. } if *radius == 4.0));
    assert_eq!(circles, 3_000);
}

#[test]
fn test_heatmap_grid_counts_clamp_far_edge() {
    let canvas = CanvasConfig::default();
    let points = [
        CanvasPoint::new(60.0, 20.0),
        CanvasPoint::new(780.0, 260.0),
        CanvasPoint::new(779.0, 259.0),
    ];
    let counts = grid_counts(&points, &canvas, 20);
    assert_eq!(counts.len(), 400);
    assert_eq!(counts[0], 1);
    assert_eq!(counts[399], 2);
    assert_eq!(counts.iter().sum::<u32>(), 3);
}

#[test]
fn test_heatmap_colors_by_normalized_density() {
    let mut chart = make_loop(HeatmapPlot::new(HeatmapConfig::default()).unwrap());
    let mut surface = surface();
    let data = vec![
        Sample::new(0, 0.0, "A"),
        Sample::new(0, 0.0, "A"),
        Sample::new(1_000, 100.0, "A"),
    ];
    chart.draw(&data, &mut surface);

    let cells = rects(&surface);
    assert_eq!(cells.len(), 2);
    // Row-major order: the sparse top-right cell first, the dense bottom-left last.
    assert_eq!(cells[0].4, Color::rgba(0.5, 0.0, 0.5, 1.0));
    assert_eq!(cells[1].4, Color::RED);
    assert_eq!((cells[1].2, cells[1].3), (36.0, 12.0));
}

#[test]
fn test_heatmap_rejects_zero_grid() {
    assert_eq!(HeatmapConfig::new(0).unwrap_err(), ConfigError::ZeroGridSize);
    let config = HeatmapConfig {
        grid_size: 0,
        ..Default::default()
    };
    assert!(HeatmapPlot::new(config).is_err());
}

#[test]
fn test_loop_rejects_invalid_canvas() {
    let result = RenderLoop::new(
        LinePlot::default(),
        CanvasConfig::new(50.0, 50.0),
        PerformanceMonitor::new(60).unwrap(),
        AdaptiveBudget::fixed(10).unwrap(),
    );
    assert!(result.is_err());
}

#[test]
fn test_recording_surface_clear_resets_commands() {
    let mut surface = surface();
    surface.fill_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE);
    surface.clear(Color::BLACK);
    assert_eq!(surface.commands(), &[DrawCommand::Clear(Color::BLACK)]);
    surface.stroke_polyline(&[], 1.0, Color::WHITE);
    assert_eq!(surface.commands().len(), 1);
}
