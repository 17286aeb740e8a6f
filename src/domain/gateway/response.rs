//! Gateway response envelope.
//!
//! Every API answer is a JSON object carrying `auth_error` and `errors` next to
//! the action-specific data. A body without both keys did not come from the API
//! (a proxy error page, for instance) and is rejected as malformed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::ProtocolError;

const AUTH_ERROR_KEY: &str = "auth_error";
const ERRORS_KEY: &str = "errors";

/// Action-specific response data, kept as a generic map at the wire layer.
pub type ResponseData = Map<String, Value>;

/// Parsed gateway response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    auth_error: bool,
    errors: Vec<String>,
    data: ResponseData,
}

impl ApiResult {
    /// Decodes a raw response body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::MalformedPayload` if the body is not a JSON
    /// object or lacks `auth_error` or `errors`.
    pub fn parse(raw: &[u8]) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_slice(raw)
            .map_err(|e| ProtocolError::MalformedPayload(format!("invalid JSON: {}", e)))?;

        let mut data = match value {
            Value::Object(map) => map,
            other => {
                return Err(ProtocolError::MalformedPayload(format!(
                    "expected JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        if !data.contains_key(AUTH_ERROR_KEY) || !data.contains_key(ERRORS_KEY) {
            return Err(ProtocolError::MalformedPayload(
                "missing auth_error or errors".to_string(),
            ));
        }

        let auth_error = data
            .remove(AUTH_ERROR_KEY)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);
        let errors = data.remove(ERRORS_KEY).map(error_list).unwrap_or_default();

        Ok(Self {
            auth_error,
            errors,
            data,
        })
    }

    /// True iff the gateway reported at least one error, whatever the HTTP status.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether the gateway flagged the credentials as invalid.
    pub fn is_auth_error(&self) -> bool {
        self.auth_error
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn data(&self) -> &ResponseData {
        &self.data
    }

    pub fn into_data(self) -> ResponseData {
        self.data
    }

    /// Deserializes a single data entry.
    pub fn data_field<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ProtocolError> {
        self.data
            .get(key)
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| ProtocolError::MalformedPayload(format!("invalid `{}`: {}", key, e)))
    }
}

/// Balance of one currency as returned by the `balance` action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurrencyBalance {
    /// Total funds, including amounts on hold.
    #[serde(rename = "BUDGET", default)]
    pub total: String,

    /// Funds available for operations.
    #[serde(rename = "DOSTUPNO", default)]
    pub available: String,

    /// Funds available through the system (excludes pending payouts).
    #[serde(rename = "DOSTUPNO_SYST", default)]
    pub available_system: String,
}

/// The gateway encodes `auth_error` as `"0"`/`"1"`, a bool, or null.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false")),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn error_list(value: Value) -> Vec<String> {
    match value {
        Value::Null | Value::Bool(false) => Vec::new(),
        Value::Array(items) => items.into_iter().map(error_message).collect(),
        Value::Object(map) => map.into_iter().map(|(_, v)| error_message(v)).collect(),
        Value::String(s) if s.is_empty() => Vec::new(),
        other => vec![error_message(other)],
    }
}

fn error_message(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<ApiResult, ProtocolError> {
        ApiResult::parse(value.to_string().as_bytes())
    }

    // ══════════════════════════════════════════════════════════════
    // Envelope Validation
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn successful_envelope_exposes_remaining_data() {
        let result = parse(json!({
            "auth_error": null,
            "errors": [],
            "balance": {"USD": {"BUDGET": "10.00"}}
        }))
        .unwrap();

        assert!(!result.has_errors());
        assert!(!result.is_auth_error());
        assert_eq!(result.data().len(), 1);
        assert!(result.data().contains_key("balance"));
        assert!(!result.data().contains_key("errors"));
        assert!(!result.data().contains_key("auth_error"));
    }

    #[test]
    fn missing_auth_error_is_malformed() {
        let result = parse(json!({"errors": []}));
        assert!(matches!(result, Err(ProtocolError::MalformedPayload(_))));
    }

    #[test]
    fn missing_errors_is_malformed() {
        let result = parse(json!({"auth_error": "0", "balance": {}}));
        assert!(matches!(result, Err(ProtocolError::MalformedPayload(_))));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let result = ApiResult::parse(b"<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(ProtocolError::MalformedPayload(_))));
    }

    #[test]
    fn non_object_body_is_malformed() {
        let result = parse(json!(["auth_error", "errors"]));
        assert!(matches!(result, Err(ProtocolError::MalformedPayload(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Error Extraction
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn error_list_marks_logical_failure() {
        let result = parse(json!({"auth_error": "0", "errors": ["bad_params"]})).unwrap();

        assert!(result.has_errors());
        assert_eq!(result.errors(), &["bad_params".to_string()]);
    }

    #[test]
    fn error_object_values_are_collected() {
        let result = parse(json!({"auth_error": "0", "errors": {"sum": "too small"}})).unwrap();
        assert_eq!(result.errors(), &["too small".to_string()]);
    }

    #[test]
    fn false_errors_means_none() {
        let result = parse(json!({"auth_error": "0", "errors": false})).unwrap();
        assert!(!result.has_errors());
    }

    #[test]
    fn non_string_errors_are_stringified() {
        let result = parse(json!({"auth_error": "0", "errors": [42]})).unwrap();
        assert_eq!(result.errors(), &["42".to_string()]);
    }

    #[test]
    fn auth_error_flag_variants() {
        assert!(parse(json!({"auth_error": "1", "errors": []})).unwrap().is_auth_error());
        assert!(parse(json!({"auth_error": true, "errors": []})).unwrap().is_auth_error());
        assert!(parse(json!({"auth_error": 1, "errors": []})).unwrap().is_auth_error());
        assert!(!parse(json!({"auth_error": "0", "errors": []})).unwrap().is_auth_error());
        assert!(!parse(json!({"auth_error": false, "errors": []})).unwrap().is_auth_error());
    }

    // ══════════════════════════════════════════════════════════════
    // Data Access
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn data_field_deserializes_entry() {
        let result = parse(json!({"auth_error": "0", "errors": [], "historyId": 7}))
            .unwrap();

        let history_id: Option<u64> = result.data_field("historyId").unwrap();
        assert_eq!(history_id, Some(7));

        let missing: Option<u64> = result.data_field("nope").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn balance_entries_deserialize_into_currency_balances() {
        let result = parse(json!({
            "auth_error": "0",
            "errors": [],
            "balance": {
                "USD": {"BUDGET": "10.00", "DOSTUPNO": "9.50", "DOSTUPNO_SYST": "9.50"},
                "RUB": {"BUDGET": "0.00"}
            }
        }))
        .unwrap();

        let balances: Option<std::collections::BTreeMap<String, CurrencyBalance>> =
            result.data_field("balance").unwrap();
        let balances = balances.unwrap();

        assert_eq!(balances["USD"].total, "10.00");
        assert_eq!(balances["USD"].available, "9.50");
        assert_eq!(balances["RUB"].available, "");
    }

    #[test]
    fn data_field_with_wrong_shape_is_malformed() {
        let result = parse(json!({"auth_error": "0", "errors": [], "historyId": "x"})).unwrap();
        let field: Result<Option<u64>, _> = result.data_field("historyId");
        assert!(matches!(field, Err(ProtocolError::MalformedPayload(_))));
    }
}
