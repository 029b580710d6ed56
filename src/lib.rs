//! # CellMon-RS: Pump-Cell Telemetry Dashboard
//!
//! A desktop dashboard that polls a gateway over HTTP once per second and
//! renders the returned telemetry — pump speeds, temperatures, pressures,
//! flow rates, error flags — as gauges, trend lines, and status dots.
//! The architecture separates the HTTP polling backend from the UI
//! rendering frontend.
//!
//! ## Architecture
//!
//! - **Backend**: Polls `GET /api/cells/{id}` via reqwest in a separate thread
//! - **Frontend**: Renders the UI using eframe/egui with egui_plot for trends
//! - **Session**: One [`frontend::DashboardSession`] owns the trend rings,
//!   the selected cell, and the link health
//! - **Communication**: Crossbeam channels for thread-safe data transfer
//!
//! Data flow is strictly one-directional per tick: network response →
//! parsed record → derived display values → painted frame. A failed tick
//! marks the link degraded and waits for the next one; nothing is fatal.
//!
//! ## Configuration
//!
//! Gateway settings come from an optional `cellmon.toml` in the working
//! directory. Application state (last monitored cell, theme) is stored in
//! the platform data directory under `dev.hxyulin.cellmon-rs`:
//!
//! - **Linux**: `~/.local/share/dev.hxyulin.cellmon-rs/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.cellmon-rs/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.cellmon-rs\`
//!
//! ## Example
//!
//! ```ignore
//! use cellmon_rs::{
//!     backend::GatewayBackend,
//!     config::{AppConfig, AppState},
//!     frontend::CellMonApp,
//! };
//!
//! fn main() -> eframe::Result<()> {
//!     let config = AppConfig::load_or_default();
//!     let app_state = AppState::load_or_default();
//!
//!     let (backend, frontend) = GatewayBackend::new(config.clone(), app_state.last_cell);
//!     std::thread::spawn(move || backend.run());
//!
//!     let native_options = eframe::NativeOptions::default();
//!     eframe::run_native(
//!         "CellMon",
//!         native_options,
//!         Box::new(|cc| {
//!             Ok(Box::new(CellMonApp::new(cc, frontend, &config, app_state)))
//!         }),
//!     )
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod format;
pub mod frontend;
pub mod types;

// Re-export commonly used types
pub use backend::{BackendCommand, BackendMessage, FrontendReceiver, GatewayBackend};
pub use config::{AppConfig, AppState};
pub use error::{CellMonError, Result};
pub use frontend::{CellMonApp, DashboardSession};
pub use types::{CellId, SampleRing, TelemetryRecord};
