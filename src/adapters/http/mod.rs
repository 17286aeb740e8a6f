//! HTTP adapters - endpoints exposed to the gateway.

pub mod payment;

pub use payment::{payment_router, PaymentAppState};
