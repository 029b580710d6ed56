//! Display formatting for telemetry values
//!
//! Pure, total functions mapping raw sensor values to the strings shown in
//! the numeric readouts. No side effects, no failure modes: an absent value
//! renders as the [`PLACEHOLDER`].

/// Shown wherever a sensor value is absent
pub const PLACEHOLDER: &str = "--";

/// Format a temperature given in tenths of a degree Celsius.
///
/// `235` renders as `"23.5 C"`.
pub fn fmt_temp_x10(value: Option<i64>) -> String {
    match value {
        Some(tenths) => format!("{:.1} C", tenths as f64 / 10.0),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a plain numeric readout.
///
/// Integral values print without a decimal point (`3158`, not `3158.0`).
pub fn fmt_num(value: Option<f64>) -> String {
    match value {
        Some(number) => format!("{number}"),
        None => PLACEHOLDER.to_string(),
    }
}
