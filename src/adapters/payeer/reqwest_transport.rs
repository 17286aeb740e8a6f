//! HTTP transport backed by `reqwest`.
//!
//! Keeps one connection pool per instance. Each API client owns its own
//! transport, so pooled connections are never shared across credential sets.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::gateway::TransportError;
use crate::ports::GatewayTransport;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `GatewayTransport` over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        Ok(Self { http_client })
    }

    /// Wrap an existing client.
    pub fn from_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl GatewayTransport for ReqwestTransport {
    async fn post(&self, url: &str, form: &[(String, String)]) -> Result<Vec<u8>, TransportError> {
        let response = self
            .http_client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The envelope decides the outcome, not the status code.
            tracing::debug!(status = status.as_u16(), "Gateway answered with non-success status");
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(body.to_vec())
    }
}
