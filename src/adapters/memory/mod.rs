//! In-memory adapters for tests and local runs.

mod in_memory_transaction;

pub use in_memory_transaction::{InMemoryTransaction, InMemoryTransactionManager};
