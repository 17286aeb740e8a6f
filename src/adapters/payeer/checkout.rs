//! Checkout redirect URL.

use reqwest::Url;

use crate::domain::gateway::{CheckoutForm, GatewayError};

/// Default hosted checkout page.
pub const DEFAULT_CHECKOUT_URL: &str = "https://payeer.com/merchant/";

/// GET URL sending the buyer to the checkout page with the signed form.
pub fn checkout_redirect_url(checkout_url: &str, form: &CheckoutForm) -> Result<Url, GatewayError> {
    Url::parse_with_params(checkout_url, form.query_pairs())
        .map_err(|e| GatewayError::config(format!("invalid checkout url: {}", e)))
}
