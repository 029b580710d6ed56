//! Custom widgets for the CellMon UI
//!
//! This module provides the dashboard's rendering primitives.
//!
//! # Widgets
//!
//! - [`Gauge`] - Semicircular dial for one scalar against a fixed range
//! - [`TrendChart`] - Line chart of a ring snapshot against a fixed range
//! - [`StatusDot`] - Colored status dot with label
//! - [`ValueDisplay`] - Labeled numeric readout
//!
//! The geometry behind the gauge fill ([`gauge_fraction`]) and the trend
//! polyline ([`trend_points`]) lives in pure functions so it can be tested
//! without a rendering context.

use crate::types::{GaugeRange, StatusLevel};
use egui::{pos2, Align2, Color32, FontId, Response, Sense, Shape, Stroke, Ui, Vec2, Widget};
use egui_plot::{HLine, Line, Plot, PlotBounds, PlotPoints};

/// Accent color for gauge fills and trend lines
pub(crate) const ACCENT: Color32 = Color32::from_rgb(241, 196, 15);
/// Dial background and trend gridline color
pub(crate) const DIAL_BG: Color32 = Color32::from_rgb(26, 31, 39);
/// Gauge tick mark color
pub(crate) const TICK_COLOR: Color32 = Color32::from_rgb(43, 50, 64);
/// Dim annotation text color
pub(crate) const TEXT_DIM: Color32 = Color32::from_rgb(154, 167, 183);

/// Fixed footprint of one gauge
pub const GAUGE_SIZE: Vec2 = Vec2::new(160.0, 100.0);

/// Number of tick intervals across a gauge arc (marks = intervals + 1)
pub const GAUGE_TICKS: usize = 10;

/// Number of horizontal gridlines behind a trend chart
pub const TREND_GRIDLINES: usize = 4;

/// Default height of a trend chart
pub const TREND_HEIGHT: f32 = 110.0;

/// Segments used to approximate an arc with a polyline
const ARC_SEGMENTS: usize = 48;

/// Color of a status indicator in each of its states
pub fn status_color(level: StatusLevel) -> Color32 {
    match level {
        StatusLevel::Good => Color32::from_rgb(46, 204, 113),
        StatusLevel::Warn => ACCENT,
        StatusLevel::Neutral => Color32::GRAY,
    }
}

/// Fraction of a gauge's sweep covered by `value`, clamped to `[0, 1]`.
///
/// A degenerate range (`max == min`) treats the denominator as 1, so the
/// fraction is `value - min` clamped; there is no division by zero.
pub fn gauge_fraction(value: f64, range: GaugeRange) -> f64 {
    let span = range.span();
    let denominator = if span == 0.0 { 1.0 } else { span };
    ((value - range.min) / denominator).clamp(0.0, 1.0)
}

/// Polyline points for a trend chart, in normalized x ∈ `[0, 1]`.
///
/// Returns `None` for fewer than two samples: the chart then shows its grid
/// only, which is a defined no-op rather than an error. Sample values are
/// clamped to the range so spikes cannot escape the chart.
pub fn trend_points(values: &[f64], range: GaugeRange) -> Option<Vec<[f64; 2]>> {
    if values.len() < 2 {
        return None;
    }

    let count = values.len();
    let (lo, hi) = if range.min <= range.max {
        (range.min, range.max)
    } else {
        (range.max, range.min)
    };

    Some(
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let x = index as f64 / (count - 1) as f64;
                [x, value.clamp(lo, hi)]
            })
            .collect(),
    )
}

/// Points along an arc around `center`, for polyline stroking
fn arc_points(center: egui::Pos2, radius: f32, start_angle: f32, end_angle: f32) -> Vec<egui::Pos2> {
    (0..=ARC_SEGMENTS)
        .map(|i| {
            let t = i as f32 / ARC_SEGMENTS as f32;
            let angle = start_angle + t * (end_angle - start_angle);
            let (sin, cos) = angle.sin_cos();
            pos2(center.x + cos * radius, center.y + sin * radius)
        })
        .collect()
}

/// A semicircular dial for a single scalar value
pub struct Gauge {
    value: f64,
    range: GaugeRange,
    label: String,
    unit: Option<String>,
}

impl Gauge {
    /// Create a new gauge
    pub fn new(value: f64, range: GaugeRange, label: impl Into<String>) -> Self {
        Self {
            value,
            range,
            label: label.into(),
            unit: None,
        }
    }

    /// Add a unit annotation under the dial
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

impl Widget for Gauge {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(GAUGE_SIZE, Sense::hover());

        if ui.is_rect_visible(rect) {
            use std::f32::consts::PI;

            let painter = ui.painter();
            let center = pos2(rect.center().x, rect.top() + rect.height() * 0.95);
            let radius = rect.width().min(rect.height()) * 0.75;

            // Background sweep, left end to right end over the top.
            painter.add(Shape::line(
                arc_points(center, radius, PI, 2.0 * PI),
                Stroke::new(12.0, DIAL_BG),
            ));

            let fraction = gauge_fraction(self.value, self.range) as f32;
            if fraction > 0.0 {
                painter.add(Shape::line(
                    arc_points(center, radius, PI, PI + fraction * PI),
                    Stroke::new(12.0, ACCENT),
                ));
            }

            for i in 0..=GAUGE_TICKS {
                let angle = PI + (i as f32 / GAUGE_TICKS as f32) * PI;
                let (sin, cos) = angle.sin_cos();
                let inner = pos2(center.x + cos * (radius - 18.0), center.y + sin * (radius - 18.0));
                let outer = pos2(center.x + cos * (radius - 4.0), center.y + sin * (radius - 4.0));
                painter.line_segment([inner, outer], Stroke::new(2.0, TICK_COLOR));
            }

            painter.text(
                pos2(center.x, rect.top() + 4.0),
                Align2::CENTER_TOP,
                &self.label,
                FontId::proportional(11.0),
                TEXT_DIM,
            );
            painter.text(
                pos2(rect.left() + 4.0, rect.bottom() - 2.0),
                Align2::LEFT_BOTTOM,
                format!("{}", self.range.min),
                FontId::proportional(10.0),
                TEXT_DIM,
            );
            painter.text(
                pos2(rect.right() - 4.0, rect.bottom() - 2.0),
                Align2::RIGHT_BOTTOM,
                format!("{}", self.range.max),
                FontId::proportional(10.0),
                TEXT_DIM,
            );
            if let Some(unit) = &self.unit {
                painter.text(
                    pos2(center.x, rect.bottom() - 2.0),
                    Align2::CENTER_BOTTOM,
                    unit,
                    FontId::proportional(10.0),
                    TEXT_DIM,
                );
            }
        }

        response
    }
}

/// A fixed-range line chart over a trend ring snapshot
pub struct TrendChart {
    id: String,
    values: Vec<f64>,
    range: GaugeRange,
    height: f32,
}

impl TrendChart {
    /// Create a new trend chart. `id` must be unique within the frame.
    pub fn new(id: impl Into<String>, values: Vec<f64>, range: GaugeRange) -> Self {
        Self {
            id: id.into(),
            values,
            range,
            height: TREND_HEIGHT,
        }
    }

    /// Override the chart height
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Render the chart
    pub fn show(self, ui: &mut Ui) {
        let range = self.range;

        Plot::new(self.id)
            .height(self.height)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [0.0, range.min],
                    [1.0, range.max],
                ));
                plot_ui.set_auto_bounds(egui::Vec2b::new(false, false));

                let span = range.span();
                for i in 0..TREND_GRIDLINES {
                    let level = range.min + span * (i as f64 / TREND_GRIDLINES as f64);
                    plot_ui.hline(HLine::new("", level).color(DIAL_BG).width(1.0));
                }

                if let Some(points) = trend_points(&self.values, range) {
                    plot_ui.line(
                        Line::new("", PlotPoints::from(points))
                            .color(ACCENT)
                            .width(2.0),
                    );
                }
            });
    }
}

/// A widget that displays a colored status indicator
pub struct StatusDot {
    level: StatusLevel,
    label: String,
}

impl StatusDot {
    /// Create a new status dot with the given level and label
    pub fn new(level: StatusLevel, label: impl Into<String>) -> Self {
        Self {
            level,
            label: label.into(),
        }
    }
}

impl Widget for StatusDot {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            ui.colored_label(status_color(self.level), "●");
            ui.label(&self.label);
        })
        .response
    }
}

/// A widget for displaying a value with a label
pub struct ValueDisplay {
    label: String,
    value: String,
}

impl ValueDisplay {
    /// Create a new value display
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl Widget for ValueDisplay {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            ui.label(format!("{}:", self.label));
            ui.strong(self.value);
        })
        .response
    }
}
