use telemetry_chart::data_types::{
    compute_time_range, compute_value_range, CanvasConfig, CanvasPoint, Padding, RangeDefaults,
    Sample, TimeRange, ValueRange, DEFAULT_VALUE_PADDING,
};
use telemetry_chart::scales::LinearScale;
use telemetry_chart::transform::{project, PlotTransform};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_linear_scale() {
    let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0));

    assert_eq!(scale.map(0.0), 0.0);
    assert_eq!(scale.map(50.0), 250.0);
    assert_eq!(scale.map(100.0), 500.0);

    assert_eq!(scale.invert(0.0), 0.0);
    assert_eq!(scale.invert(250.0), 50.0);
    assert_eq!(scale.invert(500.0), 100.0);
}

#[test]
fn test_degenerate_scale_maps_to_midpoint() {
    let scale = LinearScale::new((42.0, 42.0), (100.0, 300.0));
    assert!(scale.is_degenerate());
    assert_eq!(scale.map(42.0), 200.0);
    assert_eq!(scale.map(-1e9), 200.0);
    assert_eq!(scale.invert(250.0), 42.0);
}

#[test]
fn test_even_ticks() {
    let scale = LinearScale::new((0.0, 110.0), (0.0, 1.0));
    assert_eq!(scale.even_ticks(5), vec![0.0, 22.0, 44.0, 66.0, 88.0, 110.0]);
    assert_eq!(scale.even_ticks(0).len(), 2);
}

#[test]
fn test_projection_respects_padding_box() {
    let canvas = CanvasConfig::default();
    let transform = PlotTransform::new(&canvas, TimeRange::new(0, 1_000), ValueRange::new(0.0, 100.0));

    assert_eq!(transform.project(&Sample::new(0, 0.0, "A")), CanvasPoint::new(60.0, 260.0));
    assert_eq!(transform.project(&Sample::new(1_000, 100.0, "A")), CanvasPoint::new(780.0, 20.0));
    assert_eq!(transform.project(&Sample::new(500, 50.0, "A")), CanvasPoint::new(420.0, 140.0));

    assert!((transform.time_at(420.0) - 500.0).abs() < 1e-6);
    assert!((transform.value_at(140.0) - 50.0).abs() < 1e-6);
}

#[test]
fn test_projection_with_custom_padding() {
    let canvas = CanvasConfig::new(200.0, 100.0).with_padding(Padding {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    });
    let p = project(
        &Sample::new(5, 5.0, "A"),
        &canvas,
        TimeRange::new(0, 10),
        ValueRange::new(0.0, 10.0),
    );
    assert_eq!(p, CanvasPoint::new(100.0, 50.0));
}

#[test]
fn test_degenerate_ranges_project_to_plot_center() {
    let canvas = CanvasConfig::default();
    let transform = PlotTransform::new(&canvas, TimeRange::new(5, 5), ValueRange::new(7.0, 7.0));
    let p = transform.project(&Sample::new(5, 7.0, "A"));
    assert!(approx(p.x, 420.0));
    assert!(approx(p.y, 140.0));
    assert!(p.x.is_finite() && p.y.is_finite());
}

#[test]
fn test_time_range_orders_bounds() {
    let r = TimeRange::new(10, 3);
    assert_eq!((r.start, r.end), (3, 10));
    assert_eq!(r.span(), 7);
    assert_eq!(TimeRange::last_minutes(5, 600_000), TimeRange::new(300_000, 600_000));
}

#[test]
fn test_empty_batch_uses_default_ranges() {
    let defaults = RangeDefaults::default();
    let now = 1_700_000_000_000;
    assert_eq!(compute_time_range(&[], &defaults, now), TimeRange::new(now - 60_000, now));
    assert_eq!(compute_value_range(&[], DEFAULT_VALUE_PADDING, &defaults), ValueRange::new(0.0, 100.0));
}

#[test]
fn test_time_range_spans_batch() {
    let samples = vec![Sample::new(50, 1.0, "A"), Sample::new(10, 1.0, "A"), Sample::new(30, 1.0, "A")];
    assert_eq!(compute_time_range(&samples, &RangeDefaults::default(), 0), TimeRange::new(10, 50));
}

#[test]
fn test_value_range_padding_and_floor() {
    let defaults = RangeDefaults::default();
    let samples = vec![Sample::new(0, 10.0, "A"), Sample::new(1, 20.0, "A")];
    assert_eq!(compute_value_range(&samples, 0.1, &defaults), ValueRange::new(9.0, 21.0));

    let spanning_zero = vec![Sample::new(0, -10.0, "A"), Sample::new(1, 10.0, "A")];
    assert_eq!(compute_value_range(&spanning_zero, 0.1, &defaults), ValueRange::new(0.0, 12.0));

    let no_floor = RangeDefaults {
        value_floor: None,
        ..RangeDefaults::default()
    };
    assert_eq!(compute_value_range(&spanning_zero, 0.1, &no_floor), ValueRange::new(-12.0, 12.0));
}

#[test]
fn test_value_range_all_below_floor_keeps_shape() {
    let samples = vec![
        Sample::new(0, -10.0, "A"),
        Sample::new(1, -5.0, "A"),
        Sample::new(2, -1.0, "A"),
    ];
    let r = compute_value_range(&samples, 0.1, &RangeDefaults::default());
    assert!((r.min - -10.9).abs() < 1e-9);
    assert!((r.max - -0.1).abs() < 1e-9);

    let transform = PlotTransform::new(&CanvasConfig::default(), TimeRange::new(0, 2), r);
    let ys: Vec<f32> = transform.project_all(&samples).iter().map(|p| p.y).collect();
    assert!(ys.windows(2).all(|w| w[1] < w[0]), "larger values sit higher: {ys:?}");
    assert!(ys.iter().all(|y| (20.0..=260.0).contains(y)));
}

#[test]
fn test_range_deserialization_normalizes_bounds() {
    let t: TimeRange = serde_json::from_str(r#"{"start": 100, "end": 0}"#).unwrap();
    assert_eq!(t, TimeRange::new(0, 100));
    let v: ValueRange = serde_json::from_str(r#"{"min": 5.0, "max": -5.0}"#).unwrap();
    assert_eq!(v, ValueRange::new(-5.0, 5.0));
}

#[test]
fn test_value_range_ignores_non_finite() {
    let defaults = RangeDefaults::default();
    let samples = vec![
        Sample::new(0, f64::NAN, "A"),
        Sample::new(1, 40.0, "A"),
        Sample::new(2, f64::INFINITY, "A"),
    ];
    assert_eq!(compute_value_range(&samples, 0.1, &defaults), ValueRange::new(40.0, 40.0));

    let all_bad = vec![Sample::new(0, f64::NAN, "A")];
    assert_eq!(compute_value_range(&all_bad, 0.1, &defaults), defaults.value_range);
}

#[test]
fn test_project_all_matches_sequential_on_large_batches() {
    let canvas = CanvasConfig::default();
    let samples: Vec<Sample> = (0..20_000)
        .map(|i| Sample::new(i, (i as f64 * 0.01).sin() * 50.0 + 50.0, "A"))
        .collect();
    let transform = PlotTransform::new(&canvas, TimeRange::new(0, 19_999), ValueRange::new(0.0, 100.0));

    let parallel = transform.project_all(&samples);
    let sequential: Vec<CanvasPoint> = samples.iter().map(|s| transform.project(s)).collect();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_canvas_validation() {
    use telemetry_chart::error::ConfigError;

    assert!(CanvasConfig::default().validate().is_ok());
    assert!(matches!(
        CanvasConfig::new(0.0, 300.0).validate(),
        Err(ConfigError::ZeroAreaCanvas { .. })
    ));
    assert!(matches!(
        CanvasConfig::new(70.0, 300.0).validate(),
        Err(ConfigError::PaddingExceedsCanvas { .. })
    ));
}
