//! Merchant shop configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::payeer::DEFAULT_CHECKOUT_URL;
use crate::domain::gateway::{Currency, MerchantCredentials};

/// Shop receiving payments through the hosted checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantConfig {
    /// Shop id (`m_shop`)
    pub shop_id: String,

    /// Shop secret key, signs checkout forms and result notifications
    pub secret_key: SecretString,

    /// Currency of the shop
    #[serde(default)]
    pub currency: Currency,

    /// Hosted checkout page
    #[serde(default = "default_checkout_url")]
    pub checkout_url: String,
}

impl MerchantConfig {
    pub fn credentials(&self) -> Result<MerchantCredentials, ValidationError> {
        Ok(MerchantCredentials::new(
            self.shop_id.as_str(),
            self.secret_key.expose_secret().as_str(),
            self.currency,
        )?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.credentials()?;
        if !self.checkout_url.starts_with("https://") && !self.checkout_url.starts_with("http://") {
            return Err(ValidationError::InvalidUrl(
                "merchant.checkout_url",
                self.checkout_url.clone(),
            ));
        }
        Ok(())
    }
}

fn default_checkout_url() -> String {
    DEFAULT_CHECKOUT_URL.to_string()
}
