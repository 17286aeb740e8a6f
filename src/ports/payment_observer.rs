//! Observer port for accepted payment notifications.
//!
//! Observers carry the business side of a payment: crediting an order,
//! deduplicating replays, sending receipts. They run inside the transaction
//! opened for the notification and receive its handle.
//!
//! # Phases
//!
//! 1. `on_payment_request` - pre-commit validation. At least one observer must
//!    answer [`ObserverDecision::Accepted`] or the transaction is rolled back.
//! 2. `on_payment_success` - post-validation side effects, still before commit.
//!
//! Any `Err` in either phase rolls the transaction back.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::gateway::GatewayEvent;

/// Answer of an observer to a payment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverDecision {
    /// The observer takes responsibility for the payment.
    Accepted,

    /// The observer does not handle this payment.
    Rejected(String),
}

impl ObserverDecision {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, ObserverDecision::Accepted)
    }
}

/// Failure raised by an observer; aborts the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Handler registered on the payment processor.
///
/// `H` is the transaction handle of the processor's transaction manager.
#[async_trait]
pub trait PaymentObserver<H: Send>: Send + Sync {
    /// Decide whether this payment is handled.
    async fn on_payment_request(
        &self,
        event: &GatewayEvent,
        tx: &mut H,
    ) -> Result<ObserverDecision, ObserverError>;

    /// Run side effects once the payment is handled, before commit.
    async fn on_payment_success(
        &self,
        _event: &GatewayEvent,
        _tx: &mut H,
    ) -> Result<(), ObserverError> {
        Ok(())
    }
}
