//! Integration tests for the poll loop
//!
//! These tests drive the complete backend workflow against the mock
//! gateway: startup, regular polling, immediate polls on cell switches,
//! failure reporting, and clean shutdown.
//!
//! Run with `cargo test --features mock-gateway`.

mod common;

use cellmon_rs::backend::{BackendMessage, GatewayBackend};
use cellmon_rs::config::AppConfig;
use cellmon_rs::frontend::DashboardSession;
use cellmon_rs::types::CellId;
use std::thread;

#[cfg(feature = "mock-gateway")]
use cellmon_rs::backend::MockGateway;

/// Config with a fast cadence so tests don't wait a full second per tick
fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.gateway.poll_interval_ms = 100;
    config
}

#[test]
#[cfg(feature = "mock-gateway")]
fn test_backend_emits_snapshots_and_stats() {
    let (backend, frontend) = GatewayBackend::new(fast_config(), CellId::default());
    let handle = thread::spawn(move || backend.run_with(Box::new(MockGateway::new())));

    let msg = common::recv_matching(&frontend, common::test_timeout(), |m| {
        matches!(m, BackendMessage::Snapshot { .. })
    })
    .expect("worker should publish a snapshot");

    match msg {
        BackendMessage::Snapshot { cell, record, .. } => {
            assert_eq!(cell, CellId::default());
            assert_eq!(record.cell.as_deref(), Some("cell01"));
            assert!(record.pump1().run);
        }
        other => panic!("expected Snapshot, got {:?}", other),
    }

    let stats = common::recv_matching(&frontend, common::test_timeout(), |m| {
        matches!(m, BackendMessage::Stats(_))
    })
    .expect("worker should publish stats");
    match stats {
        BackendMessage::Stats(stats) => assert!(stats.polls_ok >= 1),
        other => panic!("expected Stats, got {:?}", other),
    }

    frontend.shutdown();
    handle.join().expect("worker thread should exit cleanly");
}

#[test]
#[cfg(feature = "mock-gateway")]
fn test_cell_switch_polls_new_target_immediately() {
    let (backend, frontend) = GatewayBackend::new(fast_config(), CellId::default());
    let handle = thread::spawn(move || backend.run_with(Box::new(MockGateway::new())));

    // Wait for the first snapshot of the initial cell.
    common::recv_matching(&frontend, common::test_timeout(), |m| {
        matches!(m, BackendMessage::Snapshot { .. })
    })
    .expect("initial snapshot");

    let target = CellId::new(7).unwrap();
    frontend.select_cell(target);

    let msg = common::recv_matching(&frontend, common::test_timeout(), |m| {
        matches!(m, BackendMessage::Snapshot { cell, .. } if *cell == target)
    })
    .expect("snapshot for the newly selected cell");

    match msg {
        BackendMessage::Snapshot { record, .. } => {
            assert_eq!(record.cell.as_deref(), Some("cell07"));
        }
        other => panic!("expected Snapshot, got {:?}", other),
    }

    frontend.shutdown();
    handle.join().expect("worker thread should exit cleanly");
}

#[test]
#[cfg(feature = "mock-gateway")]
fn test_failing_gateway_reports_poll_failures() {
    let mut gateway = MockGateway::new();
    gateway.set_failing(true);

    let (backend, frontend) = GatewayBackend::new(fast_config(), CellId::default());
    let handle = thread::spawn(move || backend.run_with(Box::new(gateway)));

    let msg = common::recv_matching(&frontend, common::test_timeout(), |m| {
        matches!(m, BackendMessage::PollFailed { .. })
    })
    .expect("worker should report the failed poll");

    match msg {
        BackendMessage::PollFailed { cell, error } => {
            assert_eq!(cell, CellId::default());
            assert!(error.contains("502"), "unexpected error text: {error}");
        }
        other => panic!("expected PollFailed, got {:?}", other),
    }

    frontend.shutdown();
    handle.join().expect("worker thread should exit cleanly");
}

#[test]
#[cfg(feature = "mock-gateway")]
fn test_cell_switch_resets_trends_end_to_end() {
    let cell03 = CellId::new(3).unwrap();
    let cell07 = CellId::new(7).unwrap();

    let (backend, frontend) = GatewayBackend::new(fast_config(), cell03);
    let handle = thread::spawn(move || backend.run_with(Box::new(MockGateway::new())));

    let mut session = DashboardSession::new(cell03);

    // Let a couple of cell03 polls populate the trends.
    while session.trend_flow.len() < 2 {
        let msg = common::recv_matching(&frontend, common::test_timeout(), |m| {
            matches!(m, BackendMessage::Snapshot { .. })
        })
        .expect("cell03 snapshot");
        if let BackendMessage::Snapshot {
            cell,
            record,
            latency,
        } = msg
        {
            session.apply_snapshot(cell, record, latency);
        }
    }

    // Switch targets: the rings reset before the new cell's first poll.
    session.select(cell07);
    frontend.select_cell(cell07);
    assert!(session.trend_flow.is_empty());
    assert!(session.trend_pressure.is_empty());

    // Drain until a cell07 snapshot lands; any straggling cell03 snapshot
    // must be discarded, leaving only cell07 history in the rings.
    loop {
        let msg = common::recv_matching(&frontend, common::test_timeout(), |m| {
            matches!(m, BackendMessage::Snapshot { .. })
        })
        .expect("snapshot after switch");
        if let BackendMessage::Snapshot {
            cell,
            record,
            latency,
        } = msg
        {
            let applied = session.apply_snapshot(cell, record, latency);
            assert_eq!(applied, cell == cell07);
            if applied {
                break;
            }
        }
    }

    assert_eq!(session.trend_flow.len(), 1);
    assert_eq!(session.trend_pressure.len(), 1);

    frontend.shutdown();
    handle.join().expect("worker thread should exit cleanly");
}

#[test]
#[cfg(feature = "mock-gateway")]
fn test_shutdown_is_clean() {
    let (backend, frontend) = GatewayBackend::new(fast_config(), CellId::default());
    let handle = thread::spawn(move || backend.run_with(Box::new(MockGateway::new())));

    frontend.shutdown();

    handle.join().expect("worker thread should exit cleanly");

    // The worker announces its shutdown as the final message.
    let saw_shutdown = frontend
        .drain()
        .iter()
        .any(|m| matches!(m, BackendMessage::Shutdown));
    assert!(saw_shutdown);
}
