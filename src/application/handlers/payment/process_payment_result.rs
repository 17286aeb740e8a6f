//! PaymentProcessor - processes Payeer result notifications.
//!
//! A notification is accepted only when it carries an operation id and a
//! signature, reports `success`, and its signature verifies. Accepted
//! notifications run through the registered observers inside one transaction:
//!
//! 1. `on_payment_request` - at least one observer must accept the payment.
//! 2. `on_payment_success` - side effects of the handled payment.
//! 3. commit.
//!
//! Any failure after `begin` rolls the transaction back, panics included.
//! Replays are not deduplicated here; that is the job of an observer.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::Instrument;

use crate::domain::gateway::{GatewayEvent, InboundNotification, MerchantCredentials, WebhookVerifier};
use crate::ports::{
    ObserverDecision, PaymentObserver, PaymentResultProcessor, TransactionHandle,
    TransactionManager,
};

/// Why a notification was not committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// A required field (`m_operation_id` or `m_sign`) is absent.
    MissingField(&'static str),

    /// `m_status` is not `success`; carries the reported status.
    NotSuccessful(String),

    /// `m_sign` does not match the recomputed signature.
    InvalidSignature,

    /// No observer accepted the payment.
    NotHandled,

    /// An observer failed or panicked.
    ObserverFailed(String),

    /// The transaction could not be opened or committed.
    Transaction(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingField(field) => write!(f, "missing required field {}", field),
            RejectReason::NotSuccessful(status) => write!(f, "status is {:?}", status),
            RejectReason::InvalidSignature => write!(f, "signature mismatch"),
            RejectReason::NotHandled => write!(f, "no observer handled the payment"),
            RejectReason::ObserverFailed(msg) => write!(f, "observer failed: {}", msg),
            RejectReason::Transaction(msg) => write!(f, "transaction failed: {}", msg),
        }
    }
}

/// Outcome of one processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// Observers handled the payment and the transaction committed.
    Committed,

    /// Nothing was committed.
    Rejected(RejectReason),
}

impl ProcessingOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, ProcessingOutcome::Committed)
    }
}

/// Processor for result notifications of one merchant shop.
pub struct PaymentProcessor<M: TransactionManager> {
    verifier: WebhookVerifier,
    transactions: M,
    observers: Vec<Arc<dyn PaymentObserver<M::Handle>>>,
}

impl<M: TransactionManager> PaymentProcessor<M> {
    pub fn new(merchant: &MerchantCredentials, transactions: M) -> Self {
        Self {
            verifier: WebhookVerifier::new(merchant.secret_key().clone()),
            transactions,
            observers: Vec::new(),
        }
    }

    /// Register an observer. Observers run in registration order.
    pub fn with_observer(mut self, observer: Arc<dyn PaymentObserver<M::Handle>>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn transactions(&self) -> &M {
        &self.transactions
    }

    /// Validate, verify and dispatch a notification.
    pub async fn process(&self, notification: &InboundNotification) -> ProcessingOutcome {
        let span = tracing::info_span!(
            "payeer_result",
            operation_id = notification.operation_id().unwrap_or_default(),
            order_id = notification.order_id().unwrap_or_default(),
        );

        async {
            let outcome = self.run(notification).await;
            match &outcome {
                ProcessingOutcome::Committed => tracing::info!("Payment committed"),
                ProcessingOutcome::Rejected(
                    reason @ (RejectReason::ObserverFailed(_) | RejectReason::Transaction(_)),
                ) => tracing::error!(reason = %reason, "Payment processing failed"),
                ProcessingOutcome::Rejected(reason) => {
                    tracing::warn!(reason = %reason, "Payment notification rejected")
                }
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn run(&self, notification: &InboundNotification) -> ProcessingOutcome {
        if let Some(field) = notification.missing_required_field() {
            return ProcessingOutcome::Rejected(RejectReason::MissingField(field));
        }
        if !notification.is_successful() {
            let status = notification.status().unwrap_or_default().to_string();
            return ProcessingOutcome::Rejected(RejectReason::NotSuccessful(status));
        }
        if !self.verifier.verify(notification) {
            return ProcessingOutcome::Rejected(RejectReason::InvalidSignature);
        }

        let mut tx = match self.transactions.begin().await {
            Ok(tx) => tx,
            Err(e) => return ProcessingOutcome::Rejected(RejectReason::Transaction(e.to_string())),
        };

        let event = GatewayEvent::new(notification.clone());
        let dispatched = AssertUnwindSafe(self.dispatch(&event, &mut tx))
            .catch_unwind()
            .await;

        let reason = match dispatched {
            Ok(Ok(())) => {
                return match tx.commit().await {
                    Ok(()) => ProcessingOutcome::Committed,
                    Err(e) => ProcessingOutcome::Rejected(RejectReason::Transaction(e.to_string())),
                };
            }
            Ok(Err(reason)) => reason,
            Err(_) => RejectReason::ObserverFailed("observer panicked".to_string()),
        };

        if let Err(e) = tx.rollback().await {
            tracing::error!(error = %e, "Rollback failed");
        }
        ProcessingOutcome::Rejected(reason)
    }

    async fn dispatch(&self, event: &GatewayEvent, tx: &mut M::Handle) -> Result<(), RejectReason> {
        let mut handled = false;
        for observer in &self.observers {
            match observer.on_payment_request(event, tx).await {
                Ok(ObserverDecision::Accepted) => handled = true,
                Ok(ObserverDecision::Rejected(reason)) => {
                    tracing::debug!(reason = %reason, "Observer declined payment");
                }
                Err(e) => return Err(RejectReason::ObserverFailed(e.to_string())),
            }
        }

        if !handled {
            return Err(RejectReason::NotHandled);
        }

        for observer in &self.observers {
            observer
                .on_payment_success(event, tx)
                .await
                .map_err(|e| RejectReason::ObserverFailed(e.to_string()))?;
        }

        Ok(())
    }
}

#[async_trait]
impl<M: TransactionManager> PaymentResultProcessor for PaymentProcessor<M> {
    async fn process_result(&self, notification: &InboundNotification) -> bool {
        self.process(notification).await.is_committed()
    }
}
