//! Payment handlers.
//!
//! Processing of result notifications delivered by the gateway.

mod process_payment_result;

pub use process_payment_result::{PaymentProcessor, ProcessingOutcome, RejectReason};
