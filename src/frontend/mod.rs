//! Frontend module for the egui UI
//!
//! This module provides the main UI components using eframe/egui.
//! It receives data from the backend through crossbeam channels and
//! renders it in real-time.
//!
//! # Architecture
//!
//! One frame of [`CellMonApp::update`] is one render pass of the
//! dashboard: drain backend messages into the [`DashboardSession`], then
//! paint header, status dots, pump and process cards, trend charts, and
//! the status bar from it. Data flows one way — network response to
//! session to widgets — and nothing outside the session is stateful.
//!
//! # Submodules
//!
//! - [`state`] - The session object owning rings, selection, and link health
//! - [`widgets`] - Custom widgets (gauges, trends, status dots)
//! - `panels` - Dashboard section render functions
//! - `toolbar` - Header bar with the cell selector and clock
//! - `status_bar` - Bottom bar with link health and poll statistics

pub mod panels;
pub mod state;
pub mod status_bar;
pub mod toolbar;
pub mod widgets;

pub use state::DashboardSession;
pub use widgets::{Gauge, StatusDot, TrendChart, ValueDisplay};

use crate::backend::{BackendMessage, FrontendReceiver};
use crate::config::{AppConfig, AppState};

/// Main application state for the dashboard
pub struct CellMonApp {
    // === Communication ===
    frontend: FrontendReceiver,

    // === Session ===
    session: DashboardSession,
    app_state: AppState,
    endpoint: String,
}

impl CellMonApp {
    /// Create a new application instance
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        frontend: FrontendReceiver,
        config: &AppConfig,
        app_state: AppState,
    ) -> Self {
        if app_state.dark_mode {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
        } else {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        }

        let session = DashboardSession::new(app_state.last_cell);

        Self {
            frontend,
            session,
            app_state,
            endpoint: config.gateway.base_url.clone(),
        }
    }

    /// Drain pending backend messages into the session.
    ///
    /// Returns whether anything arrived (used to decide on a repaint).
    fn process_backend_messages(&mut self) -> bool {
        let mut had_messages = false;
        for msg in self.frontend.drain() {
            had_messages = true;
            match msg {
                BackendMessage::Snapshot {
                    cell,
                    record,
                    latency,
                } => {
                    self.session.apply_snapshot(cell, record, latency);
                }
                BackendMessage::PollFailed { cell, error } => {
                    self.session.apply_failure(cell, &error);
                }
                BackendMessage::Stats(stats) => self.session.apply_stats(stats),
                BackendMessage::Shutdown => tracing::info!("Backend shut down"),
            }
        }
        had_messages
    }
}

impl eframe::App for CellMonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_messages = self.process_backend_messages();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let result = toolbar::render_header(ui, &self.session);
            if let Some(cell) = result.selected_cell {
                // Reset the trends before the worker's immediate poll of
                // the new target lands.
                self.session.select(cell);
                self.frontend.select_cell(cell);
                self.app_state.last_cell = cell;
            }
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar::render_status_bar(
                ui,
                &status_bar::StatusBarContext {
                    session: &self.session,
                    endpoint: &self.endpoint,
                },
            );
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                panels::render_status_row(ui, &self.session);
                ui.separator();

                let record = self.session.last_record.clone().unwrap_or_default();
                ui.horizontal_top(|ui| {
                    panels::render_pump_panel(ui, "Pump 1", &record.pump1());
                    panels::render_pump_panel(ui, "Pump 2", &record.pump2());
                    panels::render_process_panel(ui, &record.process);
                });

                ui.separator();
                panels::render_trend_panel(ui, &self.session);

                panels::render_errors_box(ui, &self.session);
            });
        });

        // The clock ticks and polls land without any input events, so keep
        // repainting at a modest cadence even when the channel is quiet.
        if had_messages {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.frontend.shutdown();

        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }
}
