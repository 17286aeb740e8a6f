//! In-memory transaction manager.
//!
//! Stages journal entries per transaction and publishes them on commit.
//! Counts every begin/commit/rollback so tests can assert that each scope was
//! closed exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::ports::{TransactionError, TransactionHandle, TransactionManager};

#[derive(Debug, Default)]
struct Counters {
    begun: AtomicUsize,
    committed: AtomicUsize,
    rolled_back: AtomicUsize,
}

/// Transaction manager keeping committed entries in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionManager {
    counters: Arc<Counters>,
    journal: Arc<Mutex<Vec<String>>>,
    fail_begin: bool,
    fail_commit: bool,
}

impl InMemoryTransactionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `begin` fails.
    pub fn failing_begin() -> Self {
        Self {
            fail_begin: true,
            ..Self::default()
        }
    }

    /// Every `commit` fails (the transaction still counts as closed).
    pub fn failing_commit() -> Self {
        Self {
            fail_commit: true,
            ..Self::default()
        }
    }

    pub fn begun(&self) -> usize {
        self.counters.begun.load(Ordering::SeqCst)
    }

    pub fn committed(&self) -> usize {
        self.counters.committed.load(Ordering::SeqCst)
    }

    pub fn rolled_back(&self) -> usize {
        self.counters.rolled_back.load(Ordering::SeqCst)
    }

    /// Transactions begun but not yet committed or rolled back.
    pub fn open(&self) -> usize {
        self.begun() - self.committed() - self.rolled_back()
    }

    /// Entries of committed transactions, in commit order.
    pub fn journal(&self) -> Vec<String> {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TransactionManager for InMemoryTransactionManager {
    type Handle = InMemoryTransaction;

    async fn begin(&self) -> Result<InMemoryTransaction, TransactionError> {
        if self.fail_begin {
            return Err(TransactionError::Begin("backend unavailable".to_string()));
        }
        self.counters.begun.fetch_add(1, Ordering::SeqCst);
        Ok(InMemoryTransaction {
            staged: Vec::new(),
            counters: Arc::clone(&self.counters),
            journal: Arc::clone(&self.journal),
            fail_commit: self.fail_commit,
        })
    }
}

/// Open in-memory transaction.
#[derive(Debug)]
pub struct InMemoryTransaction {
    staged: Vec<String>,
    counters: Arc<Counters>,
    journal: Arc<Mutex<Vec<String>>>,
    fail_commit: bool,
}

impl InMemoryTransaction {
    /// Record an entry that becomes visible only on commit.
    pub fn stage(&mut self, entry: impl Into<String>) {
        self.staged.push(entry.into());
    }

    pub fn staged(&self) -> &[String] {
        &self.staged
    }
}

#[async_trait]
impl TransactionHandle for InMemoryTransaction {
    async fn commit(self) -> Result<(), TransactionError> {
        self.counters.committed.fetch_add(1, Ordering::SeqCst);
        if self.fail_commit {
            return Err(TransactionError::Commit("write conflict".to_string()));
        }
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(self.staged);
        Ok(())
    }

    async fn rollback(self) -> Result<(), TransactionError> {
        self.counters.rolled_back.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
