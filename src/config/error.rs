//! Configuration error types

use thiserror::Error;

use crate::domain::gateway::GatewayError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid database pool size")]
    InvalidPoolSize,

    #[error("Invalid URL for {0}: {1}")]
    InvalidUrl(&'static str, String),

    #[error("Invalid gateway credentials: {0}")]
    InvalidCredentials(#[from] GatewayError),
}
