//! HTTP adapter for the Payeer result notification.
//!
//! - `POST /payeer/result` - Gateway callback, answered with `{orderId}|success`
//!   or `{orderId}|error`

mod handlers;
mod routes;

pub use handlers::{handle_payment_result, PaymentApiError, PaymentAppState};
pub use routes::{payment_router, payment_routes};
