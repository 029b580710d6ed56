//! Backend module for gateway polling
//!
//! This module handles all gateway communication in a separate thread to
//! keep the UI responsive. It uses crossbeam channels for thread-safe
//! communication with the frontend.
//!
//! # Architecture
//!
//! The backend runs in a separate thread from the UI, communicating via
//! channels:
//!
//! - [`BackendCommand`] - Messages sent from UI to backend (cell selection,
//!   cadence, shutdown)
//! - [`BackendMessage`] - Messages sent from backend to UI (snapshots,
//!   failures, statistics)
//! - [`FrontendReceiver`] - UI-side handle for sending commands and
//!   receiving messages
//! - [`GatewayBackend`] - Main backend entry point that drives the worker
//!
//! # Components
//!
//! - [`HttpGateway`] - reqwest-based client for the real gateway
//! - [`MockGateway`] - Synthetic telemetry source (feature-gated)
//! - [`PollWorker`] - Main worker loop that processes commands and polls
//!
//! # Example
//!
//! ```ignore
//! use cellmon_rs::backend::{BackendMessage, GatewayBackend};
//! use cellmon_rs::config::AppConfig;
//! use cellmon_rs::types::CellId;
//!
//! let config = AppConfig::default();
//! let (backend, frontend) = GatewayBackend::new(config, CellId::default());
//!
//! std::thread::spawn(move || backend.run());
//!
//! frontend.select_cell(CellId::new(3).unwrap());
//!
//! for msg in frontend.drain() {
//!     match msg {
//!         BackendMessage::Snapshot { cell, record, .. } => { /* render */ }
//!         _ => {}
//!     }
//! }
//! ```

pub mod gateway;
pub mod gateway_trait;
#[cfg(feature = "mock-gateway")]
pub mod mock_gateway;
pub mod worker;

pub use gateway::HttpGateway;
pub use gateway_trait::CellGateway;
#[cfg(feature = "mock-gateway")]
pub use mock_gateway::MockGateway;
pub use worker::PollWorker;

use crate::config::AppConfig;
use crate::error::ResultExt;
use crate::types::{CellId, PollStats, TelemetryRecord};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// Message sent from the UI to the backend
#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Monitor a different cell; the worker polls it immediately
    SelectCell(CellId),
    /// Change the poll cadence
    SetPollInterval(Duration),
    /// Poll the selected cell now, outside the regular cadence
    PollNow,
    /// Shutdown the backend
    Shutdown,
}

/// Message sent from the backend to the UI
#[derive(Debug, Clone)]
pub enum BackendMessage {
    /// A poll completed successfully.
    ///
    /// `cell` is the cell the request was issued for, so the session can
    /// discard snapshots that arrive after the selection has moved on.
    Snapshot {
        cell: CellId,
        record: TelemetryRecord,
        latency: Duration,
    },
    /// A poll failed (network failure or non-success status)
    PollFailed { cell: CellId, error: String },
    /// Statistics update (sent after every poll)
    Stats(PollStats),
    /// Backend is shutting down
    Shutdown,
}

/// Frontend handle for backend communication
pub struct FrontendReceiver {
    /// Receiver for backend messages
    pub receiver: Receiver<BackendMessage>,
    /// Sender for commands to the backend
    pub command_sender: Sender<BackendCommand>,
}

impl FrontendReceiver {
    /// Try to receive a message without blocking
    pub fn try_recv(&self) -> Option<BackendMessage> {
        self.receiver.try_recv().ok()
    }

    /// Receive all pending messages
    pub fn drain(&self) -> Vec<BackendMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.receiver.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Send a command to the backend
    pub fn send_command(&self, cmd: BackendCommand) -> bool {
        self.command_sender.send(cmd).is_ok()
    }

    /// Monitor a different cell
    pub fn select_cell(&self, cell: CellId) {
        let _ = self.command_sender.send(BackendCommand::SelectCell(cell));
    }

    /// Change the poll cadence
    pub fn set_poll_interval(&self, interval: Duration) {
        let _ = self
            .command_sender
            .send(BackendCommand::SetPollInterval(interval));
    }

    /// Poll the selected cell now
    pub fn poll_now(&self) {
        let _ = self.command_sender.send(BackendCommand::PollNow);
    }

    /// Request shutdown
    pub fn shutdown(&self) {
        let _ = self.command_sender.send(BackendCommand::Shutdown);
    }
}

/// The gateway backend that runs in a separate thread
pub struct GatewayBackend {
    /// Configuration
    config: AppConfig,
    /// Cell to poll until the UI says otherwise
    initial_cell: CellId,
    /// Receiver for commands from the UI
    command_receiver: Receiver<BackendCommand>,
    /// Sender for messages to the UI
    message_sender: Sender<BackendMessage>,
    /// Running flag
    running: Arc<AtomicBool>,
}

impl GatewayBackend {
    /// Create a new backend with communication channels
    pub fn new(config: AppConfig, initial_cell: CellId) -> (Self, FrontendReceiver) {
        let (cmd_tx, cmd_rx) = bounded(64);
        // One snapshot plus one stats message per tick; 256 covers minutes
        // of UI stall before backpressure kicks in.
        let (msg_tx, msg_rx) = bounded(256);

        let backend = Self {
            config,
            initial_cell,
            command_receiver: cmd_rx,
            message_sender: msg_tx,
            running: Arc::new(AtomicBool::new(true)),
        };

        let frontend = FrontendReceiver {
            receiver: msg_rx,
            command_sender: cmd_tx,
        };

        (backend, frontend)
    }

    /// Run the backend loop against the real HTTP gateway
    pub fn run(self) {
        let gateway = match HttpGateway::new(self.config.gateway.clone())
            .context("Failed to build gateway client")
        {
            Ok(gateway) => gateway,
            Err(e) => {
                tracing::error!("{}", e);
                let _ = self.message_sender.send(BackendMessage::PollFailed {
                    cell: self.initial_cell,
                    error: e.to_string(),
                });
                let _ = self.message_sender.send(BackendMessage::Shutdown);
                return;
            }
        };
        self.run_with(Box::new(gateway));
    }

    /// Run the backend loop against an arbitrary telemetry source
    pub fn run_with(self, gateway: Box<dyn CellGateway>) {
        let poll_interval = self.config.gateway.poll_interval();
        let mut worker = PollWorker::new(
            self.command_receiver,
            self.message_sender,
            self.running,
            gateway,
            self.initial_cell,
            poll_interval,
        );
        worker.run();
    }

    /// Get a handle to stop the backend
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }
}
