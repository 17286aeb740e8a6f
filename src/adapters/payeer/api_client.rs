//! Payeer API client.
//!
//! Signs every request with the account credentials, posts it through a
//! [`GatewayTransport`] and classifies the answer:
//!
//! - envelope missing `auth_error`/`errors` → `GatewayError::Protocol`
//! - non-empty `errors` → `GatewayError::Api`, partial data discarded
//! - otherwise the action-specific data
//!
//! No retries are made; a failed call returns immediately.
//!
//! # Configuration
//!
//! ```ignore
//! let credentials = Credentials::new("P1000000", "12345", "secret")?;
//! let client = ApiClient::new(credentials, ReqwestTransport::new(DEFAULT_TIMEOUT)?)
//!     .connect()
//!     .await?;
//! let balances = client.balance().await?;
//! ```

use std::collections::BTreeMap;

use crate::domain::gateway::{
    actions, ApiResult, Credentials, CurrencyBalance, GatewayError, MerchantRequest,
    OutboundRequest, OutputRequest, ResponseData, TransferRequest,
};
use crate::ports::GatewayTransport;

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://payeer.com/ajax/api/api.php";

/// Client for one Payeer API user.
pub struct ApiClient<T: GatewayTransport> {
    credentials: Credentials,
    transport: T,
    api_url: String,
}

impl<T: GatewayTransport> ApiClient<T> {
    /// Create a client; no request is made until the first call.
    pub fn new(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            transport,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Set a custom API URL (for testing).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Verify the credentials before handing the client out.
    ///
    /// # Errors
    ///
    /// `GatewayError::Config` if the gateway rejects the credentials;
    /// transport and protocol failures are returned unchanged.
    pub async fn connect(self) -> Result<Self, GatewayError> {
        if !self.is_auth().await? {
            tracing::error!(
                account = %self.credentials.account_id(),
                api_id = %self.credentials.api_id(),
                "Payeer rejected API credentials"
            );
            return Err(GatewayError::config("invalid Payeer credentials"));
        }
        Ok(self)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send a request and parse the envelope, without judging `errors`.
    pub async fn execute(&self, request: OutboundRequest) -> Result<ApiResult, GatewayError> {
        let action = request.action().to_string();
        let form = request.into_form(&self.credentials);

        let raw = self
            .transport
            .post(&self.api_url, &form)
            .await
            .map_err(|e| {
                tracing::warn!(action = %action, error = %e, "Payeer request failed");
                e
            })?;

        ApiResult::parse(&raw).map_err(|e| {
            tracing::warn!(action = %action, error = %e, "Unrecognised Payeer response");
            GatewayError::from(e)
        })
    }

    /// Send a request and return its data, or the gateway's errors.
    pub async fn call(&self, request: OutboundRequest) -> Result<ResponseData, GatewayError> {
        let action = request.action().to_string();
        let result = self.execute(request).await?;

        if result.has_errors() {
            tracing::info!(action = %action, errors = ?result.errors(), "Payeer reported errors");
            return Err(GatewayError::api(result.errors().to_vec()));
        }

        Ok(result.into_data())
    }

    /// Whether the gateway accepts these credentials.
    pub async fn is_auth(&self) -> Result<bool, GatewayError> {
        let result = self
            .execute(OutboundRequest::new(actions::AUTH_CHECK))
            .await?;
        Ok(!result.has_errors() && !result.is_auth_error())
    }

    /// Balances keyed by currency code.
    pub async fn balance(&self) -> Result<BTreeMap<String, CurrencyBalance>, GatewayError> {
        let result = self.execute(OutboundRequest::new(actions::BALANCE)).await?;
        if result.has_errors() {
            return Err(GatewayError::api(result.errors().to_vec()));
        }
        Ok(result.data_field("balance")?.unwrap_or_default())
    }

    /// Transfer funds to another Payeer account.
    pub async fn transfer(&self, request: TransferRequest) -> Result<ResponseData, GatewayError> {
        self.call(request.into_request()).await
    }

    /// Whether `user` is an existing Payeer account.
    ///
    /// A gateway error means "no such user" and yields `false`; transport and
    /// protocol failures still propagate.
    pub async fn check_user(&self, user: &str) -> Result<bool, GatewayError> {
        let request = OutboundRequest::new(actions::CHECK_USER).field("user", user);
        match self.call(request).await {
            Ok(_) => Ok(true),
            Err(GatewayError::Api { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Exchange rates for deposits (`output = false`) or withdrawals.
    pub async fn get_exchange_rate(&self, output: bool) -> Result<ResponseData, GatewayError> {
        let flag = if output { "Y" } else { "N" };
        self.call(OutboundRequest::new(actions::EXCHANGE_RATE).field("output", flag))
            .await
    }

    /// Preview a payout without executing it.
    pub async fn init_output(&self, request: &OutputRequest) -> Result<ResponseData, GatewayError> {
        self.call(request.to_request(actions::INIT_OUTPUT)).await
    }

    /// Execute a payout.
    pub async fn output(&self, request: &OutputRequest) -> Result<ResponseData, GatewayError> {
        self.call(request.to_request(actions::OUTPUT)).await
    }

    pub async fn get_pay_systems(&self) -> Result<ResponseData, GatewayError> {
        self.call(OutboundRequest::new(actions::PAY_SYSTEMS)).await
    }

    pub async fn history_info(&self, history_id: &str) -> Result<ResponseData, GatewayError> {
        self.call(OutboundRequest::new(actions::HISTORY_INFO).field("historyId", history_id))
            .await
    }

    pub async fn shop_order_info(
        &self,
        shop_id: &str,
        order_id: &str,
    ) -> Result<ResponseData, GatewayError> {
        let request = OutboundRequest::new(actions::SHOP_ORDER_INFO)
            .field("shopId", shop_id)
            .field("orderId", order_id);
        self.call(request).await
    }

    /// Operation history; filter keys are passed through unchanged.
    pub async fn history<I, K, V>(&self, filter: I) -> Result<ResponseData, GatewayError>
    where
        I: IntoIterator<Item = (K, V)> + Send,
        K: Into<String>,
        V: Into<String>,
    {
        self.call(OutboundRequest::new(actions::HISTORY).fields_from(filter))
            .await
    }

    /// Create a merchant invoice.
    pub async fn merchant(&self, request: MerchantRequest) -> Result<ResponseData, GatewayError> {
        self.call(request.into_request()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::payeer::MockTransport;
    use crate::domain::gateway::{ProtocolError, TransportError};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn client(transport: &MockTransport) -> ApiClient<MockTransport> {
        let credentials = Credentials::new("P1000000", "12345", "s3cret").unwrap();
        ApiClient::new(credentials, transport.clone()).with_api_url("https://gateway.test/api")
    }

    // ══════════════════════════════════════════════════════════════
    // Request Composition
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn every_request_carries_credentials() {
        let transport = MockTransport::new();
        transport.push_success(json!({"balance": {}}));

        client(&transport).balance().await.unwrap();

        let call = transport.last_call().unwrap();
        assert_eq!(call.url, "https://gateway.test/api");
        assert_eq!(call.field("account"), Some("P1000000"));
        assert_eq!(call.field("apiId"), Some("12345"));
        assert_eq!(call.field("apiPass"), Some("s3cret"));
        assert_eq!(call.field("action"), Some("balance"));
    }

    #[tokio::test]
    async fn transfer_sends_wire_fields() {
        let transport = MockTransport::new();
        transport.push_success(json!({"historyId": 123}));

        let data = client(&transport)
            .transfer(TransferRequest::new("P2000000", dec!(1.5), "USD").with_extra("comment", "rent"))
            .await
            .unwrap();

        let call = transport.last_call().unwrap();
        assert_eq!(call.field("action"), Some("transfer"));
        assert_eq!(call.field("sum"), Some("1.5"));
        assert_eq!(call.field("curIn"), Some("USD"));
        assert_eq!(call.field("curOut"), Some("USD"));
        assert_eq!(call.field("to"), Some("P2000000"));
        assert_eq!(call.field("comment"), Some("rent"));
        assert_eq!(data["historyId"], 123);
    }

    #[tokio::test]
    async fn exchange_rate_maps_flag_to_y_n() {
        let transport = MockTransport::new();
        transport.push_success(json!({"rate": {}}));
        transport.push_success(json!({"rate": {}}));

        let client = client(&transport);
        client.get_exchange_rate(true).await.unwrap();
        client.get_exchange_rate(false).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].field("action"), Some("getExchangeRate"));
        assert_eq!(calls[0].field("output"), Some("Y"));
        assert_eq!(calls[1].field("output"), Some("N"));
    }

    #[tokio::test]
    async fn init_output_and_output_share_fields() {
        let transport = MockTransport::new();
        transport.push_success(json!({"outputParams": {}}));
        transport.push_success(json!({"historyId": 9}));

        let client = client(&transport);
        let payout = OutputRequest::new("1136053", dec!(100), "P3000000", "USD").with_cur_out("RUB");
        client.init_output(&payout).await.unwrap();
        client.output(&payout).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].field("action"), Some("initOutput"));
        assert_eq!(calls[1].field("action"), Some("output"));
        for call in &calls {
            assert_eq!(call.field("ps"), Some("1136053"));
            assert_eq!(call.field("sumIn"), Some("100"));
            assert_eq!(call.field("curIn"), Some("USD"));
            assert_eq!(call.field("curOut"), Some("RUB"));
            assert_eq!(call.field("param_ACCOUNT_NUMBER"), Some("P3000000"));
        }
    }

    #[tokio::test]
    async fn pass_through_operations_send_their_fields() {
        let transport = MockTransport::new();
        for _ in 0..5 {
            transport.push_success(json!({}));
        }

        let client = client(&transport);
        client.get_pay_systems().await.unwrap();
        client.history_info("777").await.unwrap();
        client.shop_order_info("12345", "ORD-1").await.unwrap();
        client
            .history([("count", "10"), ("type", "incoming")])
            .await
            .unwrap();
        client
            .merchant(MerchantRequest::new(json!({"m_shop": "1"}), json!({}), json!({})))
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].field("action"), Some("getPaySystems"));
        assert_eq!(calls[1].field("historyId"), Some("777"));
        assert_eq!(calls[2].field("shopId"), Some("12345"));
        assert_eq!(calls[2].field("orderId"), Some("ORD-1"));
        assert_eq!(calls[3].field("count"), Some("10"));
        assert_eq!(calls[3].field("type"), Some("incoming"));
        assert_eq!(calls[4].field("shop"), Some(r#"{"m_shop":"1"}"#));
    }

    // ══════════════════════════════════════════════════════════════
    // Response Classification
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn balance_returns_typed_currencies() {
        let transport = MockTransport::new();
        transport.push_success(json!({
            "balance": {"USD": {"BUDGET": "10.00", "DOSTUPNO": "8.00", "DOSTUPNO_SYST": "8.00"}}
        }));

        let balances = client(&transport).balance().await.unwrap();

        assert_eq!(balances.len(), 1);
        assert_eq!(balances["USD"].available, "8.00");
    }

    #[tokio::test]
    async fn gateway_errors_surface_as_api_error() {
        let transport = MockTransport::new();
        transport.push_json(json!({"auth_error": "0", "errors": ["bad_params"], "historyId": 1}));

        let err = client(&transport).history_info("1").await.unwrap_err();

        assert_eq!(err.api_errors(), Some(&["bad_params".to_string()][..]));
    }

    #[tokio::test]
    async fn malformed_envelope_is_protocol_error() {
        let transport = MockTransport::new();
        transport.push_raw("<html>Bad Gateway</html>");

        let err = client(&transport).get_pay_systems().await.unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Protocol(ProtocolError::MalformedPayload(_))
        ));
    }

    #[tokio::test]
    async fn transport_failure_propagates_without_retry() {
        let transport = MockTransport::new();
        transport.push_error(TransportError::Network("reset".to_string()));

        let err = client(&transport).balance().await.unwrap_err();

        assert!(matches!(err, GatewayError::Transport(_)));
        assert_eq!(transport.call_count(), 1);
    }

    // ══════════════════════════════════════════════════════════════
    // checkUser
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn check_user_true_for_existing_user() {
        let transport = MockTransport::new();
        transport.push_success(json!({}));

        assert!(client(&transport).check_user("P2000000").await.unwrap());
        assert_eq!(transport.last_call().unwrap().field("user"), Some("P2000000"));
    }

    #[tokio::test]
    async fn check_user_false_on_gateway_error() {
        let transport = MockTransport::new();
        transport.push_errors(&["bad_params"]);

        assert!(!client(&transport).check_user("nobody").await.unwrap());
    }

    #[tokio::test]
    async fn check_user_propagates_protocol_error() {
        let transport = MockTransport::new();
        transport.push_json(json!({"status": "down"}));

        let result = client(&transport).check_user("P2000000").await;
        assert!(matches!(result, Err(GatewayError::Protocol(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Authentication
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn is_auth_sends_empty_action() {
        let transport = MockTransport::new();
        transport.push_success(json!({}));

        assert!(client(&transport).is_auth().await.unwrap());
        assert_eq!(transport.last_call().unwrap().field("action"), Some(""));
    }

    #[tokio::test]
    async fn is_auth_false_on_auth_error() {
        let transport = MockTransport::new();
        transport.push_json(json!({"auth_error": "1", "errors": ["invalid apiId"]}));

        assert!(!client(&transport).is_auth().await.unwrap());
    }

    #[tokio::test]
    async fn connect_fails_fast_with_config_error() {
        let transport = MockTransport::new();
        transport.push_json(json!({"auth_error": "1", "errors": []}));

        let result = client(&transport).connect().await;

        assert!(matches!(result, Err(GatewayError::Config(_))));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn connect_returns_client_for_valid_credentials() {
        let transport = MockTransport::new();
        transport.push_success(json!({}));
        transport.push_success(json!({"balance": {}}));

        let client = client(&transport).connect().await.unwrap();
        assert!(client.balance().await.unwrap().is_empty());
        assert_eq!(client.credentials().account_id(), "P1000000");
    }
}
