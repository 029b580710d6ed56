//! Status bar panel — bottom bar showing link health, poll stats, and
//! error info.
//!
//! Sits below the dashboard panels.

use egui::{Color32, RichText, Ui};

use crate::frontend::state::DashboardSession;
use crate::types::LinkStatus;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub session: &'a DashboardSession,
    pub endpoint: &'a str,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    let session = ctx.session;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Link status dot + endpoint ===
        let status_color = match session.link {
            LinkStatus::Connected => Color32::GREEN,
            LinkStatus::Waiting => Color32::GRAY,
            LinkStatus::Error => Color32::RED,
        };
        ui.colored_label(status_color, "●");
        ui.label(RichText::new(format!("{}: {}", session.link, ctx.endpoint)).small());

        ui.separator();

        let stats = &session.stats;

        // === Poll counters ===
        ui.label(RichText::new(format!("Polls: {}", stats.polls_ok)).small());

        ui.separator();

        let failure_color = if stats.polls_failed > 0 {
            Color32::LIGHT_RED
        } else {
            Color32::GRAY
        };
        ui.colored_label(
            failure_color,
            RichText::new(format!("Failures: {}", stats.polls_failed)).small(),
        );

        ui.separator();

        // === Last round-trip ===
        let latency = stats
            .last_latency
            .map(|d| format!("{:.0} ms", d.as_secs_f64() * 1000.0))
            .unwrap_or_else(|| "--".to_string());
        ui.label(RichText::new(format!("Latency: {latency}")).small());

        // === Error message (right-aligned) ===
        if let Some(error) = session.last_error.as_deref() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(Color32::RED, RichText::new(error).small());
            });
        }
    });
}
