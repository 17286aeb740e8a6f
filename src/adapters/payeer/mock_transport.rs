//! Mock gateway transport for testing.
//!
//! Provides a scripted implementation of `GatewayTransport` for unit and
//! integration tests. Supports:
//! - Queued raw or JSON responses
//! - Error injection
//! - Call tracking

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::gateway::TransportError;
use crate::ports::GatewayTransport;

/// Mock transport for testing.
///
/// Clones share state, so a test can keep one handle for assertions after
/// moving another into a client.
///
/// # Example
///
/// ```ignore
/// let transport = MockTransport::new();
/// transport.push_json(json!({"auth_error": "0", "errors": [], "balance": {}}));
///
/// let client = ApiClient::new(credentials, transport.clone());
/// client.balance().await?;
///
/// assert_eq!(transport.calls()[0].field("action"), Some("balance"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    /// Responses returned in order, one per call.
    responses: VecDeque<Result<Vec<u8>, TransportError>>,

    /// Track calls for assertions.
    calls: Vec<RecordedCall>,
}

/// A request seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub url: String,
    pub form: Vec<(String, String)>,
}

impl RecordedCall {
    /// Value of a form field.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a raw response body.
    pub fn push_raw(&self, body: impl Into<Vec<u8>>) {
        self.state().responses.push_back(Ok(body.into()));
    }

    /// Queue a JSON response body.
    pub fn push_json(&self, body: Value) {
        self.push_raw(body.to_string());
    }

    /// Queue a successful envelope carrying `data`.
    pub fn push_success(&self, data: Value) {
        let mut envelope = serde_json::json!({"auth_error": "0", "errors": []});
        if let (Some(target), Value::Object(extra)) = (envelope.as_object_mut(), data) {
            target.extend(extra);
        }
        self.push_json(envelope);
    }

    /// Queue an envelope reporting gateway errors.
    pub fn push_errors(&self, errors: &[&str]) {
        self.push_json(serde_json::json!({"auth_error": "0", "errors": errors}));
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.state().responses.push_back(Err(error));
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.state().calls.last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }
}

#[async_trait]
impl GatewayTransport for MockTransport {
    async fn post(&self, url: &str, form: &[(String, String)]) -> Result<Vec<u8>, TransportError> {
        let mut state = self.state();
        state.calls.push(RecordedCall {
            url: url.to_string(),
            form: form.to_vec(),
        });
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no response queued".to_string())))
    }
}
