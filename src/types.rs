//! Core data types for CellMon
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing monitored cells, polled telemetry,
//! and trend history.
//!
//! # Main Types
//!
//! - [`CellId`] - One of the fixed set of monitorable pump cells
//! - [`TelemetryRecord`] - One polled snapshot of a cell's pump and process sensors
//! - [`SampleRing`] - Fixed-capacity FIFO-overwrite sample store for trend history
//! - [`StatusLevel`] - Visual state of a status indicator (good/warn/neutral)
//! - [`PollStats`] - Running counters for poll successes, failures and latency
//!
//! # Wire Format
//!
//! [`TelemetryRecord`] mirrors the gateway's JSON body for
//! `GET /api/cells/{id}`. Every field is optional on the wire; absent
//! fields take documented defaults (a missing pump reads as stopped with
//! zero values, a missing process block reads as zero flow with control
//! valves open).
//!
//! # Trend History
//!
//! Trend charts read from a [`SampleRing`] of [`RING_CAPACITY`] slots.
//! The ring always holds exactly that many nullable slots and overwrites
//! the oldest sample first; snapshots reconstruct chronological order
//! regardless of where the write cursor currently points.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of samples retained per trend metric (one per successful poll)
pub const RING_CAPACITY: usize = 60;

/// Number of monitorable cells (`cell01` through `cell10`)
pub const CELL_COUNT: u8 = 10;

// ==================== Cell Identity ====================

/// Identifier of a monitored pump cell.
///
/// The gateway exposes a fixed enumeration `cell01`..`cell10` (lowercase,
/// two-digit zero-padded). The inner index is always in `1..=CELL_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u8);

impl CellId {
    /// Create a cell id from a 1-based index, if it is in range
    pub fn new(index: u8) -> Option<Self> {
        (1..=CELL_COUNT).contains(&index).then_some(Self(index))
    }

    /// The 1-based index of this cell
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Iterate over all cells in order (`cell01` first)
    pub fn all() -> impl Iterator<Item = CellId> {
        (1..=CELL_COUNT).map(CellId)
    }

    /// Uppercase display label for selector widgets (e.g. `CELL03`)
    pub fn label(&self) -> String {
        format!("CELL{:02}", self.0)
    }
}

impl Default for CellId {
    fn default() -> Self {
        Self(1)
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cell{:02}", self.0)
    }
}

impl std::str::FromStr for CellId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("cell")
            .ok_or_else(|| format!("invalid cell id: {s:?}"))?;
        let index: u8 = digits
            .parse()
            .map_err(|_| format!("invalid cell id: {s:?}"))?;
        CellId::new(index).ok_or_else(|| format!("cell index out of range: {s:?}"))
    }
}

impl Serialize for CellId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CellId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ==================== Telemetry Records ====================

/// Sensor readings for a single pump
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PumpRecord {
    /// Whether the pump is currently running
    #[serde(default)]
    pub run: bool,
    /// Commanded speed, 0-100 percent
    #[serde(default)]
    pub speed: f64,
    /// Casing temperature in tenths of a degree Celsius
    #[serde(default)]
    pub temp_c_x10: Option<i64>,
    /// Discharge pressure in kPa
    #[serde(default)]
    pub kpa: Option<f64>,
}

impl Default for PumpRecord {
    fn default() -> Self {
        // Substitute for a pump missing from the response: stopped, zeros.
        Self {
            run: false,
            speed: 0.0,
            temp_c_x10: Some(0),
            kpa: Some(0.0),
        }
    }
}

impl PumpRecord {
    /// Status indicator policy: good when running, otherwise neutral
    pub fn status(&self) -> StatusLevel {
        if self.run {
            StatusLevel::Good
        } else {
            StatusLevel::Neutral
        }
    }
}

/// The two pump slots of a cell, either of which may be absent
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PumpSet {
    #[serde(default)]
    pub pump1: Option<PumpRecord>,
    #[serde(default)]
    pub pump2: Option<PumpRecord>,
}

/// Aggregated process readings for a cell
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessRecord {
    /// Aggregate flow rate
    #[serde(default)]
    pub flow_rate: f64,
    /// Inlet pressure in kPa
    #[serde(default)]
    pub pressure_in: f64,
    /// Outlet pressure in kPa
    #[serde(default)]
    pub pressure_out: f64,
    /// Filter bank needs service
    #[serde(default)]
    pub dirty_filters: bool,
    /// Control valves are open/controllable. Open is the safe default.
    #[serde(default = "default_true")]
    pub control_valves: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ProcessRecord {
    fn default() -> Self {
        Self {
            flow_rate: 0.0,
            pressure_in: 0.0,
            pressure_out: 0.0,
            dirty_filters: false,
            control_valves: true,
        }
    }
}

impl ProcessRecord {
    /// Status indicator policy: good while anything is flowing
    pub fn flow_status(&self) -> StatusLevel {
        if self.flow_rate > 0.0 {
            StatusLevel::Good
        } else {
            StatusLevel::Neutral
        }
    }

    /// Status indicator policy: warn while the filter bank is dirty
    pub fn filter_status(&self) -> StatusLevel {
        if self.dirty_filters {
            StatusLevel::Warn
        } else {
            StatusLevel::Good
        }
    }

    /// Status indicator policy: warn while the control valves are shut
    pub fn valve_status(&self) -> StatusLevel {
        if self.control_valves {
            StatusLevel::Good
        } else {
            StatusLevel::Warn
        }
    }
}

/// One polled snapshot of a cell, as returned by the gateway
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TelemetryRecord {
    /// Echo of the queried cell id
    #[serde(default)]
    pub cell: Option<String>,
    /// Per-pump sensor readings
    #[serde(default)]
    pub pumps: PumpSet,
    /// Aggregated process readings
    #[serde(default)]
    pub process: ProcessRecord,
    /// Domain-level errors reported by the gateway poll cycle. The gateway
    /// may emit non-string entries (objects keyed by pump name); those are
    /// kept as their verbatim JSON text.
    #[serde(default, deserialize_with = "de_error_list")]
    pub errors: Vec<String>,
}

fn de_error_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|entry| match entry {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .collect())
}

impl TelemetryRecord {
    /// First pump, or the documented default when absent
    pub fn pump1(&self) -> PumpRecord {
        self.pumps.pump1.clone().unwrap_or_default()
    }

    /// Second pump, or the documented default when absent
    pub fn pump2(&self) -> PumpRecord {
        self.pumps.pump2.clone().unwrap_or_default()
    }

    /// Whether the gateway reported any domain-level errors for this poll
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Status indicator policy: warn when the poll carried any errors
    pub fn connectivity_status(&self) -> StatusLevel {
        if self.has_errors() {
            StatusLevel::Warn
        } else {
            StatusLevel::Good
        }
    }
}

// ==================== Status Indicators ====================

/// Visual state of a status indicator dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    /// Condition satisfied (green)
    Good,
    /// Condition needs attention (amber)
    Warn,
    /// No signal either way (dim)
    #[default]
    Neutral,
}

/// Health of the link to the gateway, shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    /// No poll has completed yet
    #[default]
    Waiting,
    /// Last poll succeeded
    Connected,
    /// Last poll failed
    Error,
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkStatus::Waiting => write!(f, "Waiting"),
            LinkStatus::Connected => write!(f, "Connected"),
            LinkStatus::Error => write!(f, "Error"),
        }
    }
}

// ==================== Gauge Ranges ====================

/// Inclusive value range of a gauge or trend chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeRange {
    pub min: f64,
    pub max: f64,
}

impl GaugeRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the range (may be zero for a degenerate range)
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Fixed display ranges for every gauge and trend on the dashboard.
///
/// These are policy, not configuration: the dashboard always shows the same
/// scale so operators can compare cells at a glance.
pub mod ranges {
    use super::GaugeRange;

    /// Pump speed in percent
    pub const PUMP_SPEED: GaugeRange = GaugeRange::new(0.0, 100.0);
    /// Aggregate cell flow rate
    pub const FLOW: GaugeRange = GaugeRange::new(0.0, 50.0);
    /// Inlet pressure in kPa
    pub const PRESSURE_IN: GaugeRange = GaugeRange::new(0.0, 4000.0);
    /// Outlet pressure in kPa
    pub const PRESSURE_OUT: GaugeRange = GaugeRange::new(0.0, 5000.0);
}

// ==================== Trend History ====================

/// Fixed-capacity circular store of the most recent samples for one metric.
///
/// The ring always holds exactly `capacity` nullable slots. `push` overwrites
/// the oldest slot and advances the write cursor modulo capacity, so once the
/// ring has wrapped it retains the last `capacity` samples in push order.
#[derive(Debug, Clone)]
pub struct SampleRing {
    slots: Vec<Option<f64>>,
    cursor: usize,
}

impl SampleRing {
    /// Create an empty ring. Capacity must be non-zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be non-zero");
        Self {
            slots: vec![None; capacity],
            cursor: 0,
        }
    }

    /// Record one sample, evicting the oldest if the ring is full
    pub fn push(&mut self, value: f64) {
        self.slots[self.cursor] = Some(value);
        self.cursor = (self.cursor + 1) % self.slots.len();
    }

    /// The samples in chronological order (oldest first), skipping
    /// unfilled slots
    pub fn snapshot(&self) -> Vec<f64> {
        self.slots[self.cursor..]
            .iter()
            .chain(self.slots[..self.cursor].iter())
            .filter_map(|slot| *slot)
            .collect()
    }

    /// Clear all slots and rewind the cursor.
    ///
    /// Invoked when the monitored cell changes so history from the previous
    /// cell is never mixed with the new one.
    pub fn reset(&mut self) {
        self.slots.fill(None);
        self.cursor = 0;
    }

    /// Number of slots (filled or not)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of filled slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True until the first push (and again after a reset)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SampleRing {
    fn default() -> Self {
        Self::new(RING_CAPACITY)
    }
}

// ==================== Poll Statistics ====================

/// Running statistics about the poll loop, shown in the status bar
#[derive(Debug, Clone, Default)]
pub struct PollStats {
    /// Number of successful polls
    pub polls_ok: u64,
    /// Number of failed polls
    pub polls_failed: u64,
    /// Round-trip time of the most recent successful poll
    pub last_latency: Option<Duration>,
}

impl PollStats {
    /// Record a successful poll and its round-trip time
    pub fn record_success(&mut self, latency: Duration) {
        self.polls_ok += 1;
        self.last_latency = Some(latency);
    }

    /// Record a failed poll
    pub fn record_failure(&mut self) {
        self.polls_failed += 1;
    }

    /// Success rate as a percentage (100 when nothing has been polled yet)
    pub fn success_rate(&self) -> f64 {
        let total = self.polls_ok + self.polls_failed;
        if total == 0 {
            100.0
        } else {
            (self.polls_ok as f64 / total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cell_id_display_and_parse() {
        let cell = CellId::new(3).unwrap();
        assert_eq!(cell.to_string(), "cell03");
        assert_eq!(cell.label(), "CELL03");
        assert_eq!("cell03".parse::<CellId>().unwrap(), cell);
        assert_eq!("cell10".parse::<CellId>().unwrap(), CellId::new(10).unwrap());
        assert!("cell00".parse::<CellId>().is_err());
        assert!("cell11".parse::<CellId>().is_err());
        assert!("pump01".parse::<CellId>().is_err());
    }

    #[test]
    fn test_cell_id_enumeration() {
        let all: Vec<CellId> = CellId::all().collect();
        assert_eq!(all.len(), CELL_COUNT as usize);
        assert_eq!(all[0], CellId::default());
        assert_eq!(all[9].to_string(), "cell10");
    }

    #[test]
    fn test_record_defaults_on_empty_body() {
        let record: TelemetryRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.pump1(), PumpRecord::default());
        assert!(!record.pump1().run);
        assert_eq!(record.pump1().temp_c_x10, Some(0));
        assert_eq!(record.process.flow_rate, 0.0);
        assert!(!record.process.dirty_filters);
        // Valves open/controllable is the documented safe default.
        assert!(record.process.control_valves);
        assert!(record.errors.is_empty());
    }

    #[test]
    fn test_record_partial_pump_fields() {
        // A present pump with missing sensor fields reads as "no value",
        // unlike a fully absent pump which reads as zeros.
        let record: TelemetryRecord =
            serde_json::from_str(r#"{"pumps":{"pump1":{"run":true,"speed":50}}}"#).unwrap();
        let pump = record.pump1();
        assert!(pump.run);
        assert_eq!(pump.speed, 50.0);
        assert_eq!(pump.temp_c_x10, None);
        assert_eq!(pump.kpa, None);
    }

    #[test]
    fn test_record_full_body() {
        let body = r#"{
            "cell": "cell01",
            "pumps": {
                "pump1": {"run": true, "speed": 50, "temp_c_x10": 160, "kpa": 3158},
                "pump2": {"run": false, "speed": 0, "temp_c_x10": 150, "kpa": 0}
            },
            "process": {
                "flow_rate": 20, "pressure_in": 3158, "pressure_out": 3631,
                "dirty_filters": false, "control_valves": true
            },
            "errors": []
        }"#;
        let record: TelemetryRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.cell.as_deref(), Some("cell01"));
        assert_eq!(record.pump1().temp_c_x10, Some(160));
        assert_eq!(record.process.pressure_out, 3631.0);
        assert_eq!(record.connectivity_status(), StatusLevel::Good);
    }

    #[test]
    fn test_error_list_accepts_non_string_entries() {
        // The gateway reports per-pump failures as objects keyed by pump name.
        let body = r#"{"errors": [{"pump2": "modbus connect failed"}, "plain text"]}"#;
        let record: TelemetryRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.errors.len(), 2);
        assert!(record.errors[0].contains("modbus connect failed"));
        assert_eq!(record.errors[1], "plain text");
        assert_eq!(record.connectivity_status(), StatusLevel::Warn);
    }

    #[test]
    fn test_status_policies() {
        let running = PumpRecord {
            run: true,
            ..Default::default()
        };
        assert_eq!(running.status(), StatusLevel::Good);
        assert_eq!(PumpRecord::default().status(), StatusLevel::Neutral);

        let mut process = ProcessRecord::default();
        assert_eq!(process.flow_status(), StatusLevel::Neutral);
        assert_eq!(process.filter_status(), StatusLevel::Good);
        assert_eq!(process.valve_status(), StatusLevel::Good);

        process.flow_rate = 12.0;
        process.dirty_filters = true;
        process.control_valves = false;
        assert_eq!(process.flow_status(), StatusLevel::Good);
        assert_eq!(process.filter_status(), StatusLevel::Warn);
        assert_eq!(process.valve_status(), StatusLevel::Warn);
    }

    #[test]
    fn test_ring_overwrites_oldest_first() {
        let mut ring = SampleRing::new(4);
        for v in 1..=6 {
            ring.push(v as f64);
        }
        assert_eq!(ring.snapshot(), vec![3.0, 4.0, 5.0, 6.0]);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_ring_partial_fill_is_chronological() {
        let mut ring = SampleRing::new(60);
        ring.push(10.0);
        ring.push(20.0);
        assert_eq!(ring.snapshot(), vec![10.0, 20.0]);
        assert_eq!(ring.capacity(), 60);
    }

    #[test]
    fn test_ring_reset() {
        let mut ring = SampleRing::new(8);
        for v in 0..20 {
            ring.push(v as f64);
        }
        ring.reset();
        assert!(ring.is_empty());
        assert!(ring.snapshot().is_empty());
        // Resets rewind the cursor, so pushes start over cleanly.
        ring.push(1.0);
        assert_eq!(ring.snapshot(), vec![1.0]);
    }

    #[test]
    fn test_poll_stats_success_rate() {
        let mut stats = PollStats::default();
        assert_eq!(stats.success_rate(), 100.0);
        stats.record_success(Duration::from_millis(12));
        stats.record_failure();
        assert_eq!(stats.polls_ok, 1);
        assert_eq!(stats.polls_failed, 1);
        assert_eq!(stats.success_rate(), 50.0);
        assert_eq!(stats.last_latency, Some(Duration::from_millis(12)));
    }

    proptest! {
        #[test]
        fn prop_ring_keeps_last_capacity_samples(
            values in proptest::collection::vec(-1.0e6f64..1.0e6, 0..200),
        ) {
            let mut ring = SampleRing::new(RING_CAPACITY);
            for &v in &values {
                ring.push(v);
            }
            let expected: Vec<f64> = if values.len() <= RING_CAPACITY {
                values.clone()
            } else {
                values[values.len() - RING_CAPACITY..].to_vec()
            };
            prop_assert_eq!(ring.snapshot(), expected);
        }

        #[test]
        fn prop_ring_reset_is_empty_until_next_push(
            values in proptest::collection::vec(-1.0e6f64..1.0e6, 1..100),
        ) {
            let mut ring = SampleRing::new(RING_CAPACITY);
            for &v in &values {
                ring.push(v);
            }
            ring.reset();
            prop_assert!(ring.snapshot().is_empty());
            prop_assert!(ring.is_empty());
        }
    }
}
