//! Outbound API requests.
//!
//! Each gateway operation has a typed request that renders into an
//! [`OutboundRequest`]: the action name plus ordered string fields. The generic
//! field list only exists at this wire layer.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde_json::Value;

use super::credentials::{Credentials, ACCOUNT_KEY, API_ID_KEY, API_PASS_KEY};

/// Wire key carrying the operation name.
pub const ACTION_KEY: &str = "action";

const RESERVED_KEYS: [&str; 4] = [ACCOUNT_KEY, API_ID_KEY, API_PASS_KEY, ACTION_KEY];

/// Operation names understood by the API.
pub mod actions {
    pub const AUTH_CHECK: &str = "";
    pub const BALANCE: &str = "balance";
    pub const TRANSFER: &str = "transfer";
    pub const CHECK_USER: &str = "checkUser";
    pub const EXCHANGE_RATE: &str = "getExchangeRate";
    pub const INIT_OUTPUT: &str = "initOutput";
    pub const OUTPUT: &str = "output";
    pub const PAY_SYSTEMS: &str = "getPaySystems";
    pub const HISTORY_INFO: &str = "historyInfo";
    pub const SHOP_ORDER_INFO: &str = "shopOrderInfo";
    pub const HISTORY: &str = "history";
    pub const MERCHANT: &str = "merchant";
}

/// Action plus its fields, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    action: String,
    fields: Vec<(String, String)>,
}

impl OutboundRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
        }
    }

    /// Sets a field, replacing an earlier value for the same key in place.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((key, value)),
        }
        self
    }

    pub fn fields_from<I, K, V>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        fields
            .into_iter()
            .fold(self, |request, (k, v)| request.field(k, v))
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Form body: credentials, action, then the operation's fields.
    ///
    /// Fields that collide with credential or action keys are dropped so a
    /// caller-supplied extra can never override authentication.
    pub fn into_form(self, credentials: &Credentials) -> Vec<(String, String)> {
        let mut form: Vec<(String, String)> = credentials
            .form_fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        form.push((ACTION_KEY.to_string(), self.action));
        form.extend(
            self.fields
                .into_iter()
                .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str())),
        );
        form
    }
}

/// Internal transfer between Payeer accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Recipient account number or e-mail.
    pub to: String,
    pub sum: Decimal,
    pub cur_in: String,
    /// Defaults to `cur_in` when absent.
    pub cur_out: Option<String>,
    /// Additional wire fields such as `comment` or `protect`.
    pub extra: BTreeMap<String, String>,
}

impl TransferRequest {
    pub fn new(to: impl Into<String>, sum: Decimal, cur_in: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            sum,
            cur_in: cur_in.into(),
            cur_out: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_cur_out(mut self, cur_out: impl Into<String>) -> Self {
        self.cur_out = Some(cur_out.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn into_request(self) -> OutboundRequest {
        let cur_out = self.cur_out.unwrap_or_else(|| self.cur_in.clone());
        OutboundRequest::new(actions::TRANSFER)
            .field("sum", self.sum.to_string())
            .field("curIn", self.cur_in)
            .field("curOut", cur_out)
            .field("to", self.to)
            .fields_from(self.extra)
    }
}

/// Payout to an external payment system; shared by preview and execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRequest {
    /// Payment system id, as listed by `getPaySystems`.
    pub ps: String,
    pub sum_in: Decimal,
    /// Recipient account in the payment system.
    pub account_number: String,
    pub cur_in: String,
    /// Defaults to `cur_in` when absent.
    pub cur_out: Option<String>,
}

impl OutputRequest {
    pub fn new(
        ps: impl Into<String>,
        sum_in: Decimal,
        account_number: impl Into<String>,
        cur_in: impl Into<String>,
    ) -> Self {
        Self {
            ps: ps.into(),
            sum_in,
            account_number: account_number.into(),
            cur_in: cur_in.into(),
            cur_out: None,
        }
    }

    pub fn with_cur_out(mut self, cur_out: impl Into<String>) -> Self {
        self.cur_out = Some(cur_out.into());
        self
    }

    /// Renders under `action`, either `initOutput` or `output`.
    pub fn to_request(&self, action: &str) -> OutboundRequest {
        let cur_out = self.cur_out.clone().unwrap_or_else(|| self.cur_in.clone());
        OutboundRequest::new(action)
            .field("ps", self.ps.clone())
            .field("sumIn", self.sum_in.to_string())
            .field("curIn", self.cur_in.clone())
            .field("curOut", cur_out)
            .field("param_ACCOUNT_NUMBER", self.account_number.clone())
    }
}

/// Merchant invoice creation; `shop`, `ps` and `form` travel JSON-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantRequest {
    pub shop: Value,
    pub ps: Value,
    pub form: Value,
    pub extra: BTreeMap<String, String>,
}

impl MerchantRequest {
    pub fn new(shop: Value, ps: Value, form: Value) -> Self {
        Self {
            shop,
            ps,
            form,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn into_request(self) -> OutboundRequest {
        OutboundRequest::new(actions::MERCHANT)
            .field("shop", self.shop.to_string())
            .field("ps", self.ps.to_string())
            .field("form", self.form.to_string())
            .fields_from(self.extra)
    }
}
