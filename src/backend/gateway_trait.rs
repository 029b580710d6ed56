//! CellGateway trait for a unified telemetry source interface
//!
//! This module provides a common trait for all gateway implementations,
//! enabling both the real HTTP gateway and a mock gateway for testing.

use crate::error::Result;
use crate::types::{CellId, TelemetryRecord};

/// A source of per-cell telemetry records.
///
/// The poll worker holds one boxed implementation and asks it for exactly
/// one record per tick. Implementations are free to keep internal state
/// (HTTP clients, simulation state), hence `&mut self`.
#[cfg_attr(test, mockall::automock)]
pub trait CellGateway: Send {
    /// Fetch the current telemetry record for one cell.
    ///
    /// A non-success status, a transport failure, or a deadline overrun all
    /// surface as errors; domain-level errors inside a successful body do
    /// not.
    fn fetch_cell(&mut self, cell: CellId) -> Result<TelemetryRecord>;

    /// Human-readable description of the endpoint, for logs and the
    /// status bar
    fn describe(&self) -> String;
}
