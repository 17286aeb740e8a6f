//! Payeer gateway adapter.
//!
//! Implements the outbound side of the integration:
//! - `ApiClient` - signed account operations over a `GatewayTransport`
//! - `ReqwestTransport` - pooled HTTP transport
//! - `MockTransport` - scripted transport for tests
//! - checkout redirect URLs for the hosted payment page
//!
//! # Security
//!
//! - The API secret only leaves the process inside the `apiPass` form field
//! - Gateway errors never leak partial data to callers

mod api_client;
mod checkout;
mod mock_transport;
mod reqwest_transport;

pub use api_client::{ApiClient, DEFAULT_API_URL};
pub use checkout::{checkout_redirect_url, DEFAULT_CHECKOUT_URL};
pub use mock_transport::{MockTransport, RecordedCall};
pub use reqwest_transport::{ReqwestTransport, DEFAULT_TIMEOUT};
