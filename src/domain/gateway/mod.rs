//! Payeer gateway protocol.
//!
//! Pure request/response integrity logic shared by the outbound API client and
//! the inbound result notification path:
//!
//! - `signer` - SHA-256 signature over ordered fields and a shared secret
//! - `response` - response envelope parsing (`auth_error` / `errors` / data)
//! - `requests` - typed per-operation requests and their wire form
//! - `notification` - result notifications and their signed field order
//! - `webhook_verifier` - notification signature verification
//! - `checkout` - signed hosted checkout parameters
//! - `credentials` - validated account and merchant credentials

mod checkout;
mod credentials;
mod errors;
mod notification;
mod requests;
mod response;
mod signer;
mod webhook_verifier;

pub use checkout::{format_amount, CheckoutForm};
pub use credentials::{Credentials, Currency, MerchantCredentials};
pub use errors::{GatewayError, ProtocolError, TransportError};
pub use notification::{
    acknowledgement, keys, GatewayEvent, InboundNotification, SIGNED_FIELDS, STATUS_SUCCESS,
};
pub use requests::{
    actions, MerchantRequest, OutboundRequest, OutputRequest, TransferRequest, ACTION_KEY,
};
pub use response::{ApiResult, CurrencyBalance, ResponseData};
pub use signer::{sign, signatures_match, FIELD_DELIMITER};
pub use webhook_verifier::{expected_signature, verify, WebhookVerifier};
