//! Header bar — title, cell selector, wall clock, last-updated stamp.
//!
//! Sits above the dashboard panels. Selecting a different cell here is the
//! only way the monitored target changes.

use egui::{RichText, Ui};

use crate::frontend::state::DashboardSession;
use crate::types::CellId;

/// Result from rendering the header
#[derive(Default)]
pub struct HeaderResult {
    /// Set when the operator picked a different cell
    pub selected_cell: Option<CellId>,
}

/// Render the header bar
pub fn render_header(ui: &mut Ui, session: &DashboardSession) -> HeaderResult {
    let mut result = HeaderResult::default();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.heading("Pump Cell Dashboard");

        ui.separator();

        ui.label("Cell:");
        let mut selected = session.selected;
        egui::ComboBox::from_id_salt("cell_select")
            .selected_text(selected.label())
            .show_ui(ui, |ui| {
                for cell in CellId::all() {
                    ui.selectable_value(&mut selected, cell, cell.label());
                }
            });
        if selected != session.selected {
            result.selected_cell = Some(selected);
        }

        // === Right-aligned clock and freshness stamp ===
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let clock = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            ui.label(RichText::new(clock).small());

            ui.separator();

            let updated = session
                .last_updated
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--".to_string());
            ui.label(RichText::new(format!("Updated: {updated}")).small());
        });
    });

    result
}
