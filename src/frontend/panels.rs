//! Dashboard panels
//!
//! Render functions for each section of the dashboard: the status dot row,
//! the two pump cards, the process card, the trend charts, and the errors
//! box. Panels only read from the [`DashboardSession`]; all mutation
//! happens in the app's message handling.

use egui::{Color32, RichText, Ui};

use crate::format::{fmt_num, fmt_temp_x10};
use crate::frontend::state::DashboardSession;
use crate::frontend::widgets::{self, Gauge, StatusDot, TrendChart, ValueDisplay};
use crate::types::{ranges, ProcessRecord, PumpRecord, StatusLevel};

/// The six status dots across the top of the dashboard.
///
/// Until the first record arrives every dot except connectivity stays
/// neutral.
pub fn render_status_row(ui: &mut Ui, session: &DashboardSession) {
    let record = session.last_record.as_ref();

    let pump1 = record.map(|r| r.pump1().status()).unwrap_or_default();
    let pump2 = record.map(|r| r.pump2().status()).unwrap_or_default();
    let flow = record
        .map(|r| r.process.flow_status())
        .unwrap_or(StatusLevel::Neutral);
    let filters = record
        .map(|r| r.process.filter_status())
        .unwrap_or(StatusLevel::Neutral);
    let valves = record
        .map(|r| r.process.valve_status())
        .unwrap_or(StatusLevel::Neutral);

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 12.0;
        ui.add(StatusDot::new(session.connectivity(), "Gateway"));
        ui.add(StatusDot::new(pump1, "Pump 1"));
        ui.add(StatusDot::new(pump2, "Pump 2"));
        ui.add(StatusDot::new(flow, "Flow"));
        ui.add(StatusDot::new(filters, "Filters"));
        ui.add(StatusDot::new(valves, "Valves"));
    });
}

/// One pump card: speed gauge plus numeric readouts
pub fn render_pump_panel(ui: &mut Ui, title: &str, pump: &PumpRecord) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.strong(title);
            ui.add(Gauge::new(pump.speed, ranges::PUMP_SPEED, "Speed").with_unit("%"));
            ui.add(ValueDisplay::new("Speed", fmt_num(Some(pump.speed))));
            ui.add(ValueDisplay::new("Temp", fmt_temp_x10(pump.temp_c_x10)));
            ui.add(ValueDisplay::new("Pressure", fmt_num(pump.kpa)));
        });
    });
}

/// The process card: flow and pressure gauges plus readouts
pub fn render_process_panel(ui: &mut Ui, process: &ProcessRecord) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.strong("Process");
            ui.horizontal(|ui| {
                ui.add(Gauge::new(process.flow_rate, ranges::FLOW, "Flow"));
                ui.add(
                    Gauge::new(process.pressure_in, ranges::PRESSURE_IN, "kPa In")
                        .with_unit("kPa"),
                );
                ui.add(
                    Gauge::new(process.pressure_out, ranges::PRESSURE_OUT, "kPa Out")
                        .with_unit("kPa"),
                );
            });
            ui.horizontal(|ui| {
                ui.add(ValueDisplay::new("Flow", fmt_num(Some(process.flow_rate))));
                ui.add(ValueDisplay::new("kPa In", fmt_num(Some(process.pressure_in))));
                ui.add(ValueDisplay::new(
                    "kPa Out",
                    fmt_num(Some(process.pressure_out)),
                ));
            });
        });
    });
}

/// The two trend charts, fed from the session's rings
pub fn render_trend_panel(ui: &mut Ui, session: &DashboardSession) {
    ui.group(|ui| {
        ui.strong("Flow (last 60 polls)");
        TrendChart::new("trend_flow", session.trend_flow.snapshot(), ranges::FLOW).show(ui);
    });
    ui.group(|ui| {
        ui.strong("Outlet pressure (last 60 polls)");
        TrendChart::new(
            "trend_pressure",
            session.trend_pressure.snapshot(),
            ranges::PRESSURE_OUT,
        )
        .show(ui);
    });
}

/// Error display: a failed poll in red, domain errors from a successful
/// poll verbatim in amber
pub fn render_errors_box(ui: &mut Ui, session: &DashboardSession) {
    if let Some(error) = session.last_error.as_deref() {
        ui.colored_label(Color32::RED, RichText::new(error).small());
        return;
    }

    if let Some(record) = session.last_record.as_ref() {
        if record.has_errors() {
            let text = format!("Errors: [{}]", record.errors.join(", "));
            ui.colored_label(
                widgets::status_color(StatusLevel::Warn),
                RichText::new(text).small(),
            );
        }
    }
}
