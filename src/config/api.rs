//! Payeer account API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::payeer::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::domain::gateway::Credentials;

/// Credentials and endpoint of the account API.
///
/// Optional as a whole: the callback server runs without it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Account number, e.g. `P1000000`
    pub account: String,

    /// API user id from the account settings
    pub api_id: String,

    /// API user secret
    pub api_secret: SecretString,

    /// API endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Check the credentials against the gateway on startup
    #[serde(default = "default_connect_on_startup")]
    pub connect_on_startup: bool,
}

impl ApiConfig {
    pub fn credentials(&self) -> Result<Credentials, ValidationError> {
        Ok(Credentials::new(
            self.account.as_str(),
            self.api_id.as_str(),
            self.api_secret.expose_secret().as_str(),
        )?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.credentials()?;
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidUrl("api.base_url", self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_connect_on_startup() -> bool {
    true
}
