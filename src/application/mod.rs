//! Application layer - handlers coordinating the gateway core and its ports.

pub mod handlers;

pub use handlers::{PaymentProcessor, ProcessingOutcome, RejectReason};
