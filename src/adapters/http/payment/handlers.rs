//! HTTP handlers for payment endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};

use crate::domain::gateway::{acknowledgement, keys, InboundNotification};
use crate::ports::PaymentResultProcessor;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state of the payment endpoints.
#[derive(Clone)]
pub struct PaymentAppState {
    pub processor: Arc<dyn PaymentResultProcessor>,
}

impl PaymentAppState {
    pub fn new(processor: Arc<dyn PaymentResultProcessor>) -> Self {
        Self { processor }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /payeer/result - Process a result notification.
///
/// Signature or business failures still answer 200 with `{orderId}|error`;
/// only a notification without `m_orderid` is a client error.
pub async fn handle_payment_result(
    State(state): State<PaymentAppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<String, PaymentApiError> {
    let notification = InboundNotification::new(fields);

    let order_id = notification
        .order_id()
        .map(str::to_owned)
        .ok_or(PaymentApiError::MissingField(keys::ORDER_ID))?;

    let accepted = state.processor.process_result(&notification).await;

    Ok(acknowledgement(&order_id, accepted))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Errors answered before the notification reaches the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentApiError {
    MissingField(&'static str),
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        match self {
            PaymentApiError::MissingField(field) => {
                tracing::warn!(field, "Result notification rejected");
                (StatusCode::BAD_REQUEST, format!("Missing {}", field)).into_response()
            }
        }
    }
}
