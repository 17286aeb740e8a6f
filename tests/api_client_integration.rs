//! Integration tests for the Payeer account API client.
//!
//! Exercises the public client surface against a scripted transport:
//! 1. Startup credential check
//! 2. Signed-in calls carry credentials and action on every request
//! 3. Gateway errors, transport failures and malformed bodies stay distinct

use rust_decimal::Decimal;
use serde_json::json;

use payeer_gateway::adapters::payeer::{ApiClient, MockTransport, DEFAULT_API_URL};
use payeer_gateway::domain::gateway::{
    Credentials, GatewayError, OutputRequest, ProtocolError, TransferRequest, TransportError,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn credentials() -> Credentials {
    Credentials::new("P1000000", "12345", "api-secret").unwrap()
}

fn client(transport: &MockTransport) -> ApiClient<MockTransport> {
    ApiClient::new(credentials(), transport.clone())
}

// =============================================================================
// Connect
// =============================================================================

#[tokio::test]
async fn connect_accepts_valid_credentials() {
    let transport = MockTransport::new();
    transport.push_success(json!({}));

    let client = client(&transport).connect().await.unwrap();

    let call = transport.last_call().unwrap();
    assert_eq!(call.url, DEFAULT_API_URL);
    assert_eq!(call.field("account"), Some("P1000000"));
    assert_eq!(call.field("apiId"), Some("12345"));
    assert_eq!(call.field("apiPass"), Some("api-secret"));
    assert_eq!(call.field("action"), Some(""));
    assert_eq!(client.credentials().account_id(), "P1000000");
}

#[tokio::test]
async fn connect_rejects_auth_error() {
    let transport = MockTransport::new();
    transport.push_json(json!({"auth_error": "1", "errors": ["Access denied"]}));

    let result = client(&transport).connect().await;

    assert!(matches!(result, Err(GatewayError::Config(_))));
}

#[tokio::test]
async fn connect_surfaces_network_failure() {
    let transport = MockTransport::new();
    transport.push_error(TransportError::Network("connection refused".to_string()));

    let result = client(&transport).connect().await;

    assert!(matches!(
        result,
        Err(GatewayError::Transport(TransportError::Network(_)))
    ));
}

// =============================================================================
// Operations
// =============================================================================

#[tokio::test]
async fn balance_then_transfer_share_one_client() {
    let transport = MockTransport::new();
    transport.push_success(json!({
        "balance": {"USD": {"BUDGET": "150.00", "DOSTUPNO": "120.00", "DOSTUPNO_SYST": "120.00"}}
    }));
    transport.push_success(json!({"historyId": 5551}));
    let client = client(&transport);

    let balances = client.balance().await.unwrap();
    assert_eq!(balances["USD"].available, "120.00");

    let transfer = TransferRequest::new("P2000000", Decimal::new(2550, 2), "USD")
        .with_extra("comment", "invoice 7");
    let data = client.transfer(transfer).await.unwrap();
    assert_eq!(data["historyId"], json!(5551));

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].field("action"), Some("balance"));
    assert_eq!(calls[1].field("action"), Some("transfer"));
    assert_eq!(calls[1].field("sum"), Some("25.50"));
    assert_eq!(calls[1].field("curOut"), Some("USD"));
    assert_eq!(calls[1].field("comment"), Some("invoice 7"));
    assert_eq!(calls[1].field("apiPass"), Some("api-secret"));
}

#[tokio::test]
async fn payout_preview_and_execution_use_distinct_actions() {
    let transport = MockTransport::new();
    transport.push_success(json!({"outputParams": {"sumIn": "10", "sumOut": "9.70"}}));
    transport.push_success(json!({"historyId": 77}));
    let client = client(&transport);
    let payout = OutputRequest::new("1136053", Decimal::new(10, 0), "4111111111111111", "USD")
        .with_cur_out("RUB");

    client.init_output(&payout).await.unwrap();
    client.output(&payout).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls[0].field("action"), Some("initOutput"));
    assert_eq!(calls[1].field("action"), Some("output"));
    assert_eq!(calls[1].field("curOut"), Some("RUB"));
    assert_eq!(calls[1].field("param_ACCOUNT_NUMBER"), Some("4111111111111111"));
}

#[tokio::test]
async fn check_user_maps_gateway_error_to_false() {
    let transport = MockTransport::new();
    transport.push_errors(&["User not found"]);
    transport.push_success(json!({}));
    let client = client(&transport);

    assert!(!client.check_user("P0000001").await.unwrap());
    assert!(client.check_user("P2000000").await.unwrap());
}

// =============================================================================
// Failure Modes
// =============================================================================

#[tokio::test]
async fn gateway_errors_are_returned_verbatim() {
    let transport = MockTransport::new();
    transport.push_errors(&["balanceError", "sumNotEnough"]);

    let result = client(&transport).get_pay_systems().await;

    match result {
        Err(err) => {
            assert!(err.is_api_error());
            assert_eq!(
                err.api_errors(),
                Some(&["balanceError".to_string(), "sumNotEnough".to_string()][..])
            );
        }
        Ok(data) => panic!("expected gateway errors, got {:?}", data),
    }
}

#[tokio::test]
async fn non_envelope_body_is_a_protocol_error() {
    let transport = MockTransport::new();
    transport.push_raw("<html>Service Unavailable</html>");

    let result = client(&transport).get_exchange_rate(false).await;

    assert!(matches!(
        result,
        Err(GatewayError::Protocol(ProtocolError::MalformedPayload(_)))
    ));
}
