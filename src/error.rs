//! Error handling for the CellMon application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for CellMon operations
#[derive(Error, Debug)]
pub enum CellMonError {
    /// Errors from the HTTP transport (request could not be sent, connection
    /// reset, malformed body)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The gateway answered with a non-success status code
    #[error("gateway returned HTTP {status}")]
    Gateway { status: u16 },

    /// The request did not complete within the configured deadline
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Errors related to configuration loading/saving
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CellMonError>,
    },
}

impl CellMonError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CellMonError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for CellMon operations
pub type Result<T> = std::result::Result<T, CellMonError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
