//! Axum router configuration for payment endpoints.

use axum::{routing::post, Router};

use super::handlers::{handle_payment_result, PaymentAppState};

/// Create the Payeer callback routes.
///
/// # Routes
/// - `POST /result` - Result notification (no auth, signature verified)
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new().route("/result", post(handle_payment_result))
}

/// Create the payment module router, mounted under `/payeer`.
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new().nest("/payeer", payment_routes())
}
