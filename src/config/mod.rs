//! Configuration module for CellMon
//!
//! This module handles application configuration including:
//! - The optional `cellmon.toml` file (gateway endpoint, poll cadence)
//! - Persistent application state (last monitored cell, UI preferences)
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.hxyulin.cellmon-rs/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.cellmon-rs/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.cellmon-rs\`
//!
//! # Files
//!
//! - `cellmon.toml` (working directory, optional) - gateway settings
//! - `app_state.json` (app data dir) - last cell and UI preferences
//! - `logs/` (app data dir) - daily-rolling log files

use crate::error::{CellMonError, Result};
use crate::types::CellId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.hxyulin.cellmon-rs";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Gateway settings filename, looked up in the working directory
pub const CONFIG_FILE: &str = "cellmon.toml";

/// Default gateway endpoint
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default poll cadence in milliseconds (one poll per second)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Shortest poll cadence the worker will accept
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Default per-request deadline in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        CellMonError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            CellMonError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

/// Directory for rolling log files
pub fn log_dir() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join("logs"))
}

// ==================== Gateway Configuration ====================

/// Where to find the gateway and how often to ask it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the gateway, without a trailing path
    pub base_url: String,
    /// Poll cadence in milliseconds
    pub poll_interval_ms: u64,
    /// Per-request deadline in milliseconds
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl GatewayConfig {
    /// Poll cadence, clamped to the supported minimum
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    /// Per-request deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of the telemetry endpoint for one cell
    pub fn cell_url(&self, cell: CellId) -> String {
        format!("{}/api/cells/{}", self.base_url.trim_end_matches('/'), cell)
    }
}

// ==================== Application Configuration ====================

/// Top-level configuration, read from `cellmon.toml` when present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CellMonError::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| CellMonError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load `cellmon.toml` from the working directory, falling back to
    /// defaults when the file is absent or unreadable
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load {}, using defaults: {}", CONFIG_FILE, e);
            Self::default()
        })
    }
}

// ==================== App State ====================

/// Persistent application state
///
/// Stores the pieces of the session worth restoring on the next launch,
/// separate from the gateway configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    /// Version for future migration support
    pub version: u32,
    /// Cell that was being monitored when the app last exited
    pub last_cell: CellId,
    /// Whether to use the dark theme
    pub dark_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            last_cell: CellId::default(),
            dark_mode: true,
        }
    }
}

impl AppState {
    /// Load app state from an explicit path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CellMonError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CellMonError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            CellMonError::Config("Could not determine app state path".to_string())
        })?;
        Self::load_from(path)
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to an explicit path
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CellMonError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| CellMonError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(APP_STATE_FILE))
    }
}
