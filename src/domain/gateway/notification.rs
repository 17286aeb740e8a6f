//! Inbound payment notifications.
//!
//! The gateway posts a form-encoded set of `m_*` fields to the merchant's
//! result URL. A notification is well-formed when it carries at least the
//! operation id and the signature; every other field is optional but still
//! part of the signature domain.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Wire keys of the result notification.
pub mod keys {
    pub const OPERATION_ID: &str = "m_operation_id";
    pub const OPERATION_PS: &str = "m_operation_ps";
    pub const OPERATION_DATE: &str = "m_operation_date";
    pub const OPERATION_PAY_DATE: &str = "m_operation_pay_date";
    pub const SHOP: &str = "m_shop";
    pub const ORDER_ID: &str = "m_orderid";
    pub const AMOUNT: &str = "m_amount";
    pub const CURRENCY: &str = "m_curr";
    pub const DESCRIPTION: &str = "m_desc";
    pub const STATUS: &str = "m_status";
    pub const SIGN: &str = "m_sign";
}

/// Status value of a completed payment.
pub const STATUS_SUCCESS: &str = "success";

/// Fields covered by the notification signature, in gateway order.
pub const SIGNED_FIELDS: [&str; 10] = [
    keys::OPERATION_ID,
    keys::OPERATION_PS,
    keys::OPERATION_DATE,
    keys::OPERATION_PAY_DATE,
    keys::SHOP,
    keys::ORDER_ID,
    keys::AMOUNT,
    keys::CURRENCY,
    keys::DESCRIPTION,
    keys::STATUS,
];

const REQUIRED_FIELDS: [&str; 2] = [keys::OPERATION_ID, keys::SIGN];

/// Raw notification as received from the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InboundNotification(HashMap<String, String>);

impl InboundNotification {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key`, or the empty string when absent.
    pub fn field_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    pub fn operation_id(&self) -> Option<&str> {
        self.get(keys::OPERATION_ID)
    }

    pub fn order_id(&self) -> Option<&str> {
        self.get(keys::ORDER_ID)
    }

    pub fn status(&self) -> Option<&str> {
        self.get(keys::STATUS)
    }

    pub fn signature(&self) -> Option<&str> {
        self.get(keys::SIGN)
    }

    /// First required key that is absent, if any.
    pub fn missing_required_field(&self) -> Option<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .find(|key| !self.0.contains_key(*key))
    }

    pub fn is_well_formed(&self) -> bool {
        self.missing_required_field().is_none()
    }

    /// Only notifications of completed payments are processed.
    pub fn is_successful(&self) -> bool {
        self.status() == Some(STATUS_SUCCESS)
    }

    /// Signed field values in gateway order, absent ones as empty strings.
    pub fn signed_values(&self) -> [&str; 10] {
        SIGNED_FIELDS.map(|key| self.field_or_empty(key))
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.0
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for InboundNotification {
    fn from(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InboundNotification {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Plaintext acknowledgement expected by the gateway's delivery logic.
pub fn acknowledgement(order_id: &str, accepted: bool) -> String {
    let outcome = if accepted { "success" } else { "error" };
    format!("{}|{}", order_id, outcome)
}

/// A notification travelling through the observers of one processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEvent {
    notification: InboundNotification,
}

impl GatewayEvent {
    pub fn new(notification: InboundNotification) -> Self {
        Self { notification }
    }

    pub fn notification(&self) -> &InboundNotification {
        &self.notification
    }

    pub fn operation_id(&self) -> &str {
        self.notification.field_or_empty(keys::OPERATION_ID)
    }

    pub fn order_id(&self) -> &str {
        self.notification.field_or_empty(keys::ORDER_ID)
    }

    pub fn amount(&self) -> &str {
        self.notification.field_or_empty(keys::AMOUNT)
    }

    pub fn currency(&self) -> &str {
        self.notification.field_or_empty(keys::CURRENCY)
    }
}
