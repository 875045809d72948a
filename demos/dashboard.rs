use eyre::{Result, WrapErr};
use gpui::*;
use telemetry_chart::{Dashboard, DashboardConfig, DashboardView, SimulatedProducer};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Optional path to a JSON config as the first argument.
    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    let initial = config.initial_count;

    let mut dashboard =
        Dashboard::from_config(config, SimulatedProducer::new()).wrap_err("Failed to build dashboard")?;
    dashboard
        .load_initial(initial)
        .wrap_err("Failed to load initial data")?;

    Application::new().run(move |cx: &mut App| {
        telemetry_chart::init(cx);

        let opened = cx.open_window(WindowOptions::default(), move |window, cx| {
            cx.new(|cx| {
                let mut view = DashboardView::new(dashboard, window, cx);
                view.start_stream(cx);
                view
            })
        });
        if let Err(err) = opened {
            tracing::error!(error = %err, "failed to open window");
            cx.quit();
        }
    });
    Ok(())
}
