//! PostgreSQL payment ledger.
//!
//! Records each accepted gateway operation once. A replayed notification finds
//! its operation id already stored and is declined, so only the first delivery
//! is handled.

use async_trait::async_trait;
use chrono::Utc;

use super::transaction_manager::PostgresTransaction;
use crate::domain::gateway::{keys, GatewayEvent};
use crate::ports::{ObserverDecision, ObserverError, PaymentObserver};

/// Observer inserting payments into `payeer_payments`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresPaymentLedger;

impl PostgresPaymentLedger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentObserver<PostgresTransaction> for PostgresPaymentLedger {
    async fn on_payment_request(
        &self,
        event: &GatewayEvent,
        tx: &mut PostgresTransaction,
    ) -> Result<ObserverDecision, ObserverError> {
        let notification = event.notification();

        let result = sqlx::query(
            r#"
            INSERT INTO payeer_payments (
                operation_id, order_id, amount, currency, payment_system, paid_at,
                received_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (operation_id) DO NOTHING
            "#,
        )
        .bind(event.operation_id())
        .bind(event.order_id())
        .bind(event.amount())
        .bind(event.currency())
        .bind(notification.field_or_empty(keys::OPERATION_PS))
        .bind(notification.field_or_empty(keys::OPERATION_PAY_DATE))
        .bind(Utc::now())
        .execute(tx.connection())
        .await
        .map_err(|e| ObserverError::new(format!("Failed to record payment: {}", e)))?;

        if result.rows_affected() == 0 {
            tracing::info!(operation_id = event.operation_id(), "Payment already recorded");
            return Ok(ObserverDecision::rejected("operation already recorded"));
        }

        Ok(ObserverDecision::Accepted)
    }
}
