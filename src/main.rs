//! Pump Cell Dashboard - Main Entry Point
//!
//! This application polls a plant gateway for pump-cell telemetry and
//! renders it as live gauges and trend charts.

use cellmon_rs::{
    backend::GatewayBackend,
    config::{AppConfig, AppState},
    frontend::CellMonApp,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging (console always, rolling file when the data dir
    // is writable). The guard must outlive the UI loop.
    let _log_guard = init_logging();

    tracing::info!("Starting Pump Cell Dashboard");

    let config = AppConfig::load_or_default();
    let app_state = AppState::load_or_default();

    tracing::info!(
        "Gateway {} (poll every {:?}), restoring {}",
        config.gateway.base_url,
        config.gateway.poll_interval(),
        app_state.last_cell
    );

    // Create the backend and spawn the poll thread
    let (backend, frontend) = GatewayBackend::new(config.clone(), app_state.last_cell);
    let backend_handle = std::thread::spawn(move || {
        #[cfg(feature = "mock-gateway")]
        {
            if std::env::var_os("CELLMON_MOCK").is_some() {
                tracing::info!("CELLMON_MOCK set, using the mock gateway");
                backend.run_with(Box::new(cellmon_rs::backend::MockGateway::new()));
                return;
            }
        }
        backend.run();
    });

    // Configure eframe options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Pump Cell Dashboard"),
        ..Default::default()
    };

    // Run the eframe application
    let result = eframe::run_native(
        "Pump Cell Dashboard",
        native_options,
        Box::new(|cc| Ok(Box::new(CellMonApp::new(cc, frontend, &config, app_state)))),
    );

    // The app's on_exit already asked the worker to stop; don't block the
    // exit path on a slow in-flight request.
    tracing::info!("Shutting down...");
    drop(backend_handle);

    result.map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}

/// Set up the tracing subscriber.
///
/// Returns the non-blocking writer guard when file logging is active; the
/// caller keeps it alive for the life of the process.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cellmon_rs=debug"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    match cellmon_rs::config::log_dir() {
        Some(dir) if std::fs::create_dir_all(&dir).is_ok() => {
            let appender = tracing_appender::rolling::daily(dir, "cellmon.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        _ => {
            registry.init();
            None
        }
    }
}
