//! Transport port for outbound gateway calls.
//!
//! The transport is a black box: it posts form fields to a URL and hands back
//! the raw body. HTTP status codes carry no meaning for the gateway protocol,
//! so a transport only fails when no body could be obtained at all.

use async_trait::async_trait;

use crate::domain::gateway::TransportError;

/// Port for posting form-encoded requests to the gateway.
///
/// Implementations must be safe for concurrent use; the client shares one
/// transport between overlapping calls.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// POST `form` to `url` and return the response body.
    async fn post(&self, url: &str, form: &[(String, String)]) -> Result<Vec<u8>, TransportError>;
}
