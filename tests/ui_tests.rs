use telemetry_chart::config::DashboardConfig;
use telemetry_chart::dashboard::Dashboard;
use telemetry_chart::producer::SimulatedProducer;
use telemetry_chart::DashboardView;
use gpui::TestAppContext;

fn dashboard(initial: usize) -> Dashboard {
    let mut dashboard =
        Dashboard::from_config(DashboardConfig::default(), SimulatedProducer::seeded(5)).unwrap();
    dashboard.load_initial(initial).unwrap();
    dashboard
}

#[gpui::test]
fn test_dashboard_view_holds_dashboard(cx: &mut TestAppContext) {
    let window = cx.add_window(|window, cx| DashboardView::new(dashboard(100), window, cx));

    window
        .update(cx, |view, _window, _cx| {
            assert_eq!(view.dashboard().lock().state().len(), 100);
            assert!(!view.is_streaming());
        })
        .unwrap();
}

#[gpui::test]
fn test_dashboard_view_stream_toggle(cx: &mut TestAppContext) {
    let window = cx.add_window(|window, cx| DashboardView::new(dashboard(0), window, cx));

    window
        .update(cx, |view, _window, cx| {
            view.start_stream(cx);
            assert!(view.is_streaming());
            assert!(view.dashboard().lock().is_streaming());

            // Starting twice keeps the single ingestion task.
            view.start_stream(cx);
            assert!(view.is_streaming());

            view.stop_stream(cx);
            assert!(!view.is_streaming());
            assert!(!view.dashboard().lock().is_streaming());
        })
        .unwrap();
}
