//! Application handlers.
//!
//! Command handlers that orchestrate gateway operations.

pub mod payment;

pub use payment::{PaymentProcessor, ProcessingOutcome, RejectReason};
