//! Payeer result notification signature verification.
//!
//! Recomputes the signature over the gateway-ordered `m_*` fields and the
//! merchant secret, then compares it with `m_sign` in constant time. A mismatch
//! is a plain `false`: nothing about the failure is reported back to the sender.

use secrecy::{ExposeSecret, SecretString};

use super::notification::InboundNotification;
use super::signer::{sign, signatures_match};

/// Verifier for result notifications of one merchant shop.
#[derive(Clone)]
pub struct WebhookVerifier {
    /// Secret key from the shop settings.
    secret: SecretString,
}

impl WebhookVerifier {
    /// Creates a new verifier with the given shop secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Returns true iff `m_sign` matches the recomputed signature exactly.
    pub fn verify(&self, notification: &InboundNotification) -> bool {
        verify(notification, self.secret.expose_secret())
    }

    /// Signature the gateway should have sent for this notification.
    pub fn expected_signature(&self, notification: &InboundNotification) -> String {
        expected_signature(notification, self.secret.expose_secret())
    }
}

/// Signature over the notification's signed fields; absent fields sign as empty.
pub fn expected_signature(notification: &InboundNotification, secret: &str) -> String {
    sign(secret, &notification.signed_values())
}

/// Verifies `notification` against `secret`.
pub fn verify(notification: &InboundNotification, secret: &str) -> bool {
    let Some(provided) = notification.signature() else {
        return false;
    };
    signatures_match(&expected_signature(notification, secret), provided)
}
