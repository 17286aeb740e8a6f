//! Port between the result webhook endpoint and payment processing.

use async_trait::async_trait;

use crate::domain::gateway::InboundNotification;

/// Processes one result notification to a plain accept/reject outcome.
///
/// Never fails: every error is folded into `false` so the endpoint can always
/// answer the gateway with its plaintext acknowledgement.
#[async_trait]
pub trait PaymentResultProcessor: Send + Sync {
    async fn process_result(&self, notification: &InboundNotification) -> bool;
}
