//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the gateway protocol core and the outside world. Adapters implement these ports.
//!
//! ## Outbound
//!
//! - `GatewayTransport` - Posts signed form requests and returns raw bodies
//!
//! ## Inbound
//!
//! - `TransactionManager` / `TransactionHandle` - Scope around notification processing
//! - `PaymentObserver` - Business handlers deciding whether a payment is handled
//! - `PaymentResultProcessor` - Type-erased processor used by the webhook endpoint

mod gateway_transport;
mod payment_observer;
mod payment_result_processor;
mod transaction_manager;

pub use gateway_transport::GatewayTransport;
pub use payment_observer::{ObserverDecision, ObserverError, PaymentObserver};
pub use payment_result_processor::PaymentResultProcessor;
pub use transaction_manager::{TransactionError, TransactionHandle, TransactionManager};
