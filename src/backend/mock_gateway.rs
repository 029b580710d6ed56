//! Mock gateway for running and testing without a live plant
//!
//! This module provides a [`CellGateway`] implementation that synthesizes
//! telemetry with the same dynamics the real PLC simulators use: a running
//! pump's discharge pressure tracks its speed with a little jitter, a
//! stopped pump bleeds pressure off and cools down, and the process block
//! aggregates flow and pressures from the two pumps.
//!
//! # Fault Injection
//!
//! - [`MockGateway::set_failing`] makes every poll fail with a gateway
//!   error, exercising the failed-tick path
//! - [`MockGateway::set_pump2_offline`] drops pump 2 from responses and
//!   reports a domain-level error, exercising the errors box
//!
//! # Enabling
//!
//! Only available with the `mock-gateway` feature:
//!
//! ```bash
//! CELLMON_MOCK=1 cargo run --features mock-gateway
//! ```

use crate::backend::gateway_trait::CellGateway;
use crate::error::{CellMonError, Result};
use crate::types::{CellId, ProcessRecord, PumpRecord, PumpSet, TelemetryRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Simulated state of one pump
#[derive(Debug, Clone)]
struct MockPump {
    run: bool,
    speed: f64,
    temp_c_x10: i64,
    kpa: f64,
}

impl MockPump {
    fn running(speed: f64) -> Self {
        Self {
            run: true,
            speed,
            temp_c_x10: 160,
            kpa: 500.0 + speed * 55.0,
        }
    }

    fn stopped() -> Self {
        Self {
            run: false,
            speed: 0.0,
            temp_c_x10: 150,
            kpa: 0.0,
        }
    }

    /// Advance the simulation one tick
    fn step(&mut self, rng: &mut StdRng) {
        let speed = self.speed.clamp(0.0, 100.0);
        if self.run {
            self.kpa = 500.0 + speed * 55.0 + rng.gen_range(-30.0..=30.0);
            self.temp_c_x10 = (150.0 + speed * 0.2) as i64 + rng.gen_range(-2..=2);
        } else {
            self.kpa = (self.kpa - rng.gen_range(50.0..=120.0)).max(0.0);
            self.temp_c_x10 = (self.temp_c_x10 - rng.gen_range(1..=3)).max(120);
        }
    }

    fn record(&self) -> PumpRecord {
        PumpRecord {
            run: self.run,
            speed: self.speed,
            temp_c_x10: Some(self.temp_c_x10),
            kpa: Some(self.kpa.round()),
        }
    }
}

/// Simulated state of one cell
#[derive(Debug, Clone)]
struct MockCell {
    pump1: MockPump,
    pump2: MockPump,
}

impl MockCell {
    fn new(cell: CellId) -> Self {
        // Vary the running speed per cell so switching targets is visible.
        let speed = 40.0 + f64::from(cell.index()) * 4.0;
        Self {
            pump1: MockPump::running(speed.min(100.0)),
            pump2: MockPump::stopped(),
        }
    }
}

/// Gateway that synthesizes telemetry in-process
pub struct MockGateway {
    cells: HashMap<CellId, MockCell>,
    rng: StdRng,
    failing: bool,
    pump2_offline: bool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::with_seed(0x5eed)
    }

    /// Deterministic construction for tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            cells: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
            failing: false,
            pump2_offline: false,
        }
    }

    /// Make every subsequent poll fail with a gateway error
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Drop pump 2 from responses and report a domain-level error
    pub fn set_pump2_offline(&mut self, offline: bool) {
        self.pump2_offline = offline;
    }

    /// Aggregate the process block from the two pumps
    fn aggregate(pump1: &PumpRecord, pump2: &PumpRecord) -> ProcessRecord {
        let mut flow = 0.0;
        for pump in [pump1, pump2] {
            if pump.run {
                flow += pump.speed * 0.4;
            }
        }
        let pressure_in = pump1
            .kpa
            .unwrap_or(0.0)
            .max(pump2.kpa.unwrap_or(0.0))
            .round();
        let pressure_out = if pressure_in > 0.0 {
            (pressure_in * 1.15).round()
        } else {
            0.0
        };

        ProcessRecord {
            flow_rate: flow.clamp(0.0, 50.0).round(),
            pressure_in,
            pressure_out,
            dirty_filters: false,
            control_valves: true,
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl CellGateway for MockGateway {
    fn fetch_cell(&mut self, cell: CellId) -> Result<TelemetryRecord> {
        if self.failing {
            return Err(CellMonError::Gateway { status: 502 });
        }

        let state = self
            .cells
            .entry(cell)
            .or_insert_with(|| MockCell::new(cell));
        state.pump1.step(&mut self.rng);
        state.pump2.step(&mut self.rng);

        let pump1 = state.pump1.record();
        let mut errors = Vec::new();

        let pump2 = if self.pump2_offline {
            errors.push(format!("{{\"pump2\": \"modbus connect failed ({cell})\"}}"));
            None
        } else {
            Some(state.pump2.record())
        };

        let process = Self::aggregate(&pump1, &pump2.clone().unwrap_or_default());

        Ok(TelemetryRecord {
            cell: Some(cell.to_string()),
            pumps: PumpSet {
                pump1: Some(pump1),
                pump2,
            },
            process,
            errors,
        })
    }

    fn describe(&self) -> String {
        "mock gateway".to_string()
    }
}
