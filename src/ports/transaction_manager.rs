//! Transaction scope port.
//!
//! Payment processing opens exactly one transaction per accepted notification
//! and always ends it, by commit or rollback, before returning.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the transactional backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("Failed to begin transaction: {0}")]
    Begin(String),

    #[error("Failed to commit transaction: {0}")]
    Commit(String),

    #[error("Failed to roll back transaction: {0}")]
    Rollback(String),
}

/// Opens transaction scopes.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// Handle type passed to observers while the scope is open.
    type Handle: TransactionHandle;

    async fn begin(&self) -> Result<Self::Handle, TransactionError>;
}

/// An open transaction. Consumed by whichever of commit or rollback ends it.
#[async_trait]
pub trait TransactionHandle: Send {
    async fn commit(self) -> Result<(), TransactionError>;

    async fn rollback(self) -> Result<(), TransactionError>;
}
