//! Error taxonomy for gateway calls.
//!
//! Configuration and malformed-payload errors fail fast. Business errors
//! reported by the gateway travel as [`GatewayError::Api`] so callers can tell
//! a declined operation apart from a broken integration.

use thiserror::Error;

/// The response envelope did not come from the gateway API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Body is not a JSON object or lacks `auth_error` / `errors`.
    #[error("Malformed gateway payload: {0}")]
    MalformedPayload(String),
}

/// Failure of the underlying HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request could not be sent or the body could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// Transport could not be built (TLS backend, invalid options).
    #[error("Transport setup failed: {0}")]
    Setup(String),
}

/// Errors surfaced by the outbound API client.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or rejected credentials; raised before or instead of real calls.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response envelope was not recognisable.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Gateway answered with a non-empty `errors` list.
    #[error("Gateway reported errors: {}", .errors.join(", "))]
    Api { errors: Vec<String> },

    /// HTTP exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl GatewayError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an API error from the gateway's error list.
    pub fn api(errors: Vec<String>) -> Self {
        Self::Api { errors }
    }

    /// Gateway-reported errors, if this is an API error.
    pub fn api_errors(&self) -> Option<&[String]> {
        match self {
            GatewayError::Api { errors } => Some(errors),
            _ => None,
        }
    }

    /// True for business-level rejections reported by the gateway.
    pub fn is_api_error(&self) -> bool {
        matches!(self, GatewayError::Api { .. })
    }
}
