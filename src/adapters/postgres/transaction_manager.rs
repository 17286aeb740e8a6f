//! PostgreSQL implementation of TransactionManager.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::ports::{TransactionError, TransactionHandle, TransactionManager};

/// Opens one database transaction per processed notification.
#[derive(Debug, Clone)]
pub struct PostgresTransactionManager {
    pool: PgPool,
}

impl PostgresTransactionManager {
    /// Creates a new PostgresTransactionManager with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for PostgresTransactionManager {
    type Handle = PostgresTransaction;

    async fn begin(&self) -> Result<PostgresTransaction, TransactionError> {
        let inner = self
            .pool
            .begin()
            .await
            .map_err(|e| TransactionError::Begin(e.to_string()))?;
        Ok(PostgresTransaction { inner })
    }
}

/// Open PostgreSQL transaction handed to observers.
///
/// Dropping it without commit rolls back.
pub struct PostgresTransaction {
    inner: Transaction<'static, Postgres>,
}

impl PostgresTransaction {
    /// Connection to run statements inside this transaction.
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.inner
    }
}

#[async_trait]
impl TransactionHandle for PostgresTransaction {
    async fn commit(self) -> Result<(), TransactionError> {
        self.inner
            .commit()
            .await
            .map_err(|e| TransactionError::Commit(e.to_string()))
    }

    async fn rollback(self) -> Result<(), TransactionError> {
        self.inner
            .rollback()
            .await
            .map_err(|e| TransactionError::Rollback(e.to_string()))
    }
}
