//! PostgreSQL adapters.
//!
//! - `PostgresTransactionManager` - Database transaction per processed notification
//! - `PostgresPaymentLedger` - Records accepted operations once, declining replays

mod payment_ledger;
mod transaction_manager;

pub use payment_ledger::PostgresPaymentLedger;
pub use transaction_manager::{PostgresTransaction, PostgresTransactionManager};
