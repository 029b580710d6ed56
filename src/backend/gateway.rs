//! HTTP gateway client
//!
//! Implements [`CellGateway`] against the real gateway REST API using
//! reqwest. The poll worker owns this client on its own thread, so requests
//! are driven to completion synchronously on a thread-local tokio runtime;
//! at most one request is ever in flight.
//!
//! # Failure Taxonomy
//!
//! - Transport problems (connect refused, reset, malformed body) surface as
//!   [`CellMonError::Network`]
//! - A non-success status code surfaces as [`CellMonError::Gateway`]
//! - A deadline overrun surfaces as [`CellMonError::Timeout`]
//!
//! All three collapse to the same user-visible treatment; the distinction
//! exists for logs.

use crate::backend::gateway_trait::CellGateway;
use crate::config::GatewayConfig;
use crate::error::{CellMonError, Result};
use crate::types::{CellId, TelemetryRecord};

/// Gateway client backed by reqwest
pub struct HttpGateway {
    config: GatewayConfig,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpGateway {
    /// Build a client for the configured gateway
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            config,
            client,
            runtime,
        })
    }

    async fn fetch_inner(&self, url: &str) -> Result<TelemetryRecord> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CellMonError::Gateway {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<TelemetryRecord>().await?)
    }
}

impl CellGateway for HttpGateway {
    fn fetch_cell(&mut self, cell: CellId) -> Result<TelemetryRecord> {
        let url = self.config.cell_url(cell);
        let deadline = self.config.timeout();

        self.runtime.block_on(async {
            tokio::time::timeout(deadline, self.fetch_inner(&url))
                .await
                .map_err(|_| CellMonError::Timeout(deadline))?
        })
    }

    fn describe(&self) -> String {
        self.config.base_url.clone()
    }
}
