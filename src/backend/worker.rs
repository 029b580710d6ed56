//! Poll worker thread implementation
//!
//! This module contains the main worker loop that runs in a separate thread
//! and handles all gateway polling. It communicates with the UI thread
//! through crossbeam channels.
//!
//! # Responsibilities
//!
//! The worker thread handles:
//!
//! - **Command processing**: Responds to UI commands (cell selection,
//!   cadence changes, shutdown)
//! - **Polling**: Fetches the selected cell's telemetry once per interval,
//!   and immediately when the selection changes
//! - **Statistics tracking**: Counts successes, failures, and latency
//!
//! # Tick Discipline
//!
//! One poll per interval (default 1 s). The fetch itself is synchronous, so
//! at most one request is in flight; a tick that fails simply waits for the
//! next one — there is no retry or backoff beyond the regular cadence, which
//! is what gives the dashboard eventual self-recovery once the gateway is
//! reachable again.

use crate::backend::gateway_trait::CellGateway;
use crate::backend::{BackendCommand, BackendMessage};
use crate::config::MIN_POLL_INTERVAL_MS;
use crate::types::{CellId, PollStats};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Upper bound on one loop iteration's sleep, so commands stay responsive
const IDLE_SLEEP: Duration = Duration::from_millis(10);

/// The worker that runs the polling loop
pub struct PollWorker {
    /// Command receiver from the UI
    command_rx: Receiver<BackendCommand>,
    /// Message sender to the UI
    message_tx: Sender<BackendMessage>,
    /// Running flag
    running: Arc<AtomicBool>,
    /// Telemetry source (real HTTP gateway or mock)
    gateway: Box<dyn CellGateway>,
    /// Currently monitored cell
    selected: CellId,
    /// Poll cadence
    poll_interval: Duration,
    /// When the next regular tick is due
    next_poll: Instant,
    /// Poll immediately on the next iteration (set on selection changes)
    poll_now: bool,
    /// Running statistics
    stats: PollStats,
}

impl PollWorker {
    /// Create a new poll worker
    pub fn new(
        command_rx: Receiver<BackendCommand>,
        message_tx: Sender<BackendMessage>,
        running: Arc<AtomicBool>,
        gateway: Box<dyn CellGateway>,
        initial_cell: CellId,
        poll_interval: Duration,
    ) -> Self {
        Self {
            command_rx,
            message_tx,
            running,
            gateway,
            selected: initial_cell,
            poll_interval,
            next_poll: Instant::now(),
            poll_now: true,
            stats: PollStats::default(),
        }
    }

    /// Run the main worker loop
    pub fn run(&mut self) {
        tracing::info!(
            "Poll worker started ({}, {:?} cadence)",
            self.gateway.describe(),
            self.poll_interval
        );

        while self.running.load(Ordering::SeqCst) {
            self.process_commands();
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            if self.poll_now || Instant::now() >= self.next_poll {
                self.poll_once();
                self.poll_now = false;
                self.next_poll = Instant::now() + self.poll_interval;
            } else {
                let remaining = self.next_poll.saturating_duration_since(Instant::now());
                std::thread::sleep(remaining.min(IDLE_SLEEP));
            }
        }

        let _ = self.message_tx.send(BackendMessage::Shutdown);
        tracing::info!("Poll worker stopped");
    }

    /// Process pending commands from the UI
    fn process_commands(&mut self) {
        loop {
            match self.command_rx.try_recv() {
                Ok(cmd) => self.handle_command(cmd),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.running.store(false, Ordering::SeqCst);
                    break;
                }
            }
        }
    }

    /// Handle a single command
    fn handle_command(&mut self, cmd: BackendCommand) {
        match cmd {
            BackendCommand::SelectCell(cell) => {
                if cell != self.selected {
                    tracing::info!("Switching monitored cell {} -> {}", self.selected, cell);
                    self.selected = cell;
                    // The switch polls immediately, on top of the regular tick.
                    self.poll_now = true;
                }
            }
            BackendCommand::SetPollInterval(interval) => {
                self.poll_interval = interval.max(Duration::from_millis(MIN_POLL_INTERVAL_MS));
            }
            BackendCommand::PollNow => {
                self.poll_now = true;
            }
            BackendCommand::Shutdown => {
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    /// Perform one poll of the selected cell and publish the outcome
    fn poll_once(&mut self) {
        let cell = self.selected;
        let started = Instant::now();

        match self.gateway.fetch_cell(cell) {
            Ok(record) => {
                let latency = started.elapsed();
                self.stats.record_success(latency);
                tracing::debug!("Polled {} in {:?}", cell, latency);
                let _ = self.message_tx.send(BackendMessage::Snapshot {
                    cell,
                    record,
                    latency,
                });
            }
            Err(e) => {
                self.stats.record_failure();
                tracing::warn!("Poll of {} failed: {}", cell, e);
                let _ = self.message_tx.send(BackendMessage::PollFailed {
                    cell,
                    error: e.to_string(),
                });
            }
        }

        let _ = self.message_tx.send(BackendMessage::Stats(self.stats.clone()));
    }
}
