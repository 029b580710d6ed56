//! Dashboard session state
//!
//! [`DashboardSession`] is the single owner of everything the dashboard
//! shows: the selected cell, the trend rings, the last record, and the
//! link health. The app mutates it from backend messages and the panels
//! read from it; nothing here touches the UI directly, which keeps the
//! poll/render cycle testable without a window.

use crate::types::{CellId, LinkStatus, PollStats, SampleRing, StatusLevel, TelemetryRecord};
use chrono::{DateTime, Local};
use std::time::Duration;

/// Everything the dashboard renders for the current target
pub struct DashboardSession {
    /// Currently monitored cell
    pub selected: CellId,
    /// Trend history of the aggregate flow rate
    pub trend_flow: SampleRing,
    /// Trend history of the outlet pressure
    pub trend_pressure: SampleRing,
    /// Most recent successfully polled record
    pub last_record: Option<TelemetryRecord>,
    /// Wall-clock time of the most recent successful poll
    pub last_updated: Option<DateTime<Local>>,
    /// User-visible error from the most recent failed poll
    pub last_error: Option<String>,
    /// Link health for the status bar
    pub link: LinkStatus,
    /// Poll statistics published by the worker
    pub stats: PollStats,
}

impl DashboardSession {
    /// Create a fresh session monitoring `initial`
    pub fn new(initial: CellId) -> Self {
        Self {
            selected: initial,
            trend_flow: SampleRing::default(),
            trend_pressure: SampleRing::default(),
            last_record: None,
            last_updated: None,
            last_error: None,
            link: LinkStatus::default(),
            stats: PollStats::default(),
        }
    }

    /// Switch the monitored cell.
    ///
    /// Resets both trend rings so history from the previous cell is never
    /// mixed with the new one. The last record keeps rendering until the
    /// new cell's first poll lands. Returns false when `cell` is already
    /// selected.
    pub fn select(&mut self, cell: CellId) -> bool {
        if cell == self.selected {
            return false;
        }
        self.selected = cell;
        self.trend_flow.reset();
        self.trend_pressure.reset();
        true
    }

    /// Apply a successful poll.
    ///
    /// Snapshots for a cell other than the selected one are discarded: they
    /// were dispatched before the selection moved on and must not render
    /// over the newer target. Returns whether the snapshot was applied.
    pub fn apply_snapshot(
        &mut self,
        cell: CellId,
        record: TelemetryRecord,
        latency: Duration,
    ) -> bool {
        if cell != self.selected {
            tracing::debug!("Discarding stale snapshot for {} (now on {})", cell, self.selected);
            return false;
        }

        self.trend_flow.push(record.process.flow_rate);
        self.trend_pressure.push(record.process.pressure_out);
        self.last_record = Some(record);
        self.last_updated = Some(Local::now());
        self.last_error = None;
        self.link = LinkStatus::Connected;
        self.stats.last_latency = Some(latency);
        true
    }

    /// Apply a failed poll.
    ///
    /// The rings are left unmodified; no sample is recorded for a failed
    /// tick. Returns whether the failure was applied (stale-cell failures
    /// are discarded like stale snapshots).
    pub fn apply_failure(&mut self, cell: CellId, error: &str) -> bool {
        if cell != self.selected {
            return false;
        }
        self.link = LinkStatus::Error;
        self.last_error = Some(format!("Gateway error: {error}"));
        true
    }

    /// Adopt the worker's running statistics
    pub fn apply_stats(&mut self, stats: PollStats) {
        self.stats = stats;
    }

    /// Connectivity indicator policy: warn when the last poll failed or
    /// carried domain errors, neutral until the first poll completes
    pub fn connectivity(&self) -> StatusLevel {
        match self.link {
            LinkStatus::Waiting => StatusLevel::Neutral,
            LinkStatus::Error => StatusLevel::Warn,
            LinkStatus::Connected => self
                .last_record
                .as_ref()
                .map(TelemetryRecord::connectivity_status)
                .unwrap_or(StatusLevel::Neutral),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProcessRecord;

    fn record_with_flow(flow: f64, pressure_out: f64) -> TelemetryRecord {
        TelemetryRecord {
            process: ProcessRecord {
                flow_rate: flow,
                pressure_out,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_snapshot_feeds_both_rings() {
        let mut session = DashboardSession::new(CellId::default());
        session.apply_snapshot(
            CellId::default(),
            record_with_flow(20.0, 3600.0),
            Duration::from_millis(5),
        );
        session.apply_snapshot(
            CellId::default(),
            record_with_flow(22.0, 3700.0),
            Duration::from_millis(5),
        );

        assert_eq!(session.trend_flow.snapshot(), vec![20.0, 22.0]);
        assert_eq!(session.trend_pressure.snapshot(), vec![3600.0, 3700.0]);
        assert_eq!(session.link, LinkStatus::Connected);
        assert!(session.last_updated.is_some());
    }

    #[test]
    fn test_switching_cells_resets_trends() {
        let cell03 = CellId::new(3).unwrap();
        let cell07 = CellId::new(7).unwrap();

        let mut session = DashboardSession::new(cell03);
        for i in 0..5 {
            session.apply_snapshot(
                cell03,
                record_with_flow(10.0 + i as f64, 3000.0),
                Duration::from_millis(4),
            );
        }
        assert_eq!(session.trend_flow.len(), 5);

        assert!(session.select(cell07));
        assert!(session.trend_flow.is_empty());
        assert!(session.trend_pressure.is_empty());
        // The previous record keeps rendering until the first poll lands.
        assert!(session.last_record.is_some());

        session.apply_snapshot(cell07, record_with_flow(30.0, 4000.0), Duration::from_millis(4));
        assert_eq!(session.trend_flow.snapshot(), vec![30.0]);
    }

    #[test]
    fn test_stale_snapshot_is_discarded() {
        let cell03 = CellId::new(3).unwrap();
        let cell07 = CellId::new(7).unwrap();

        let mut session = DashboardSession::new(cell03);
        session.select(cell07);

        // A slow response for the old target arrives after the switch.
        let applied = session.apply_snapshot(
            cell03,
            record_with_flow(99.0, 9999.0),
            Duration::from_millis(900),
        );
        assert!(!applied);
        assert!(session.trend_flow.is_empty());
        assert!(session.last_record.is_none());
    }

    #[test]
    fn test_failure_leaves_rings_unmodified() {
        let mut session = DashboardSession::new(CellId::default());
        session.apply_snapshot(
            CellId::default(),
            record_with_flow(20.0, 3600.0),
            Duration::from_millis(5),
        );

        session.apply_failure(CellId::default(), "HTTP 502");
        assert_eq!(session.trend_flow.len(), 1);
        assert_eq!(session.link, LinkStatus::Error);
        assert_eq!(session.connectivity(), StatusLevel::Warn);
        assert_eq!(
            session.last_error.as_deref(),
            Some("Gateway error: HTTP 502")
        );
    }

    #[test]
    fn test_recovery_clears_error() {
        let mut session = DashboardSession::new(CellId::default());
        session.apply_failure(CellId::default(), "connection refused");
        session.apply_snapshot(
            CellId::default(),
            record_with_flow(5.0, 1000.0),
            Duration::from_millis(5),
        );

        assert!(session.last_error.is_none());
        assert_eq!(session.connectivity(), StatusLevel::Good);
    }

    #[test]
    fn test_connectivity_warns_on_domain_errors() {
        let mut session = DashboardSession::new(CellId::default());
        let mut record = record_with_flow(5.0, 1000.0);
        record.errors.push("{\"pump2\": \"modbus connect failed\"}".to_string());

        session.apply_snapshot(CellId::default(), record, Duration::from_millis(5));
        // The poll itself succeeded, but the errors list flips the dot.
        assert_eq!(session.link, LinkStatus::Connected);
        assert_eq!(session.connectivity(), StatusLevel::Warn);
    }

    #[test]
    fn test_connectivity_neutral_before_first_poll() {
        let session = DashboardSession::new(CellId::default());
        assert_eq!(session.connectivity(), StatusLevel::Neutral);
    }
}
