//! Account and merchant credentials.
//!
//! Both are validated on construction and read-only afterwards. Secrets stay
//! wrapped in `SecretString`; the only place the API secret is exposed is the
//! outbound form built by [`Credentials::form_fields`].

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::errors::GatewayError;

/// Wire keys carrying the account credentials on every API request.
pub const ACCOUNT_KEY: &str = "account";
pub const API_ID_KEY: &str = "apiId";
pub const API_PASS_KEY: &str = "apiPass";

/// Credentials of an API user of a Payeer account.
#[derive(Clone)]
pub struct Credentials {
    account_id: String,
    api_id: String,
    api_secret: SecretString,
}

impl Credentials {
    /// Creates credentials, failing if any part is empty.
    pub fn new(
        account_id: impl Into<String>,
        api_id: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let account_id = account_id.into();
        let api_id = api_id.into();
        let api_secret = api_secret.into();

        if account_id.trim().is_empty() {
            return Err(GatewayError::config("account id is required"));
        }
        if api_id.trim().is_empty() {
            return Err(GatewayError::config("api id is required"));
        }
        if api_secret.is_empty() {
            return Err(GatewayError::config("api secret is required"));
        }

        Ok(Self {
            account_id,
            api_id,
            api_secret: SecretString::new(api_secret),
        })
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn api_id(&self) -> &str {
        &self.api_id
    }

    /// Authentication fields in wire order.
    pub fn form_fields(&self) -> [(&'static str, String); 3] {
        [
            (ACCOUNT_KEY, self.account_id.clone()),
            (API_ID_KEY, self.api_id.clone()),
            (API_PASS_KEY, self.api_secret.expose_secret().clone()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("api_id", &self.api_id)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Shop currencies supported by the hosted checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Rub,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Rub => "RUB",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "RUB" => Ok(Currency::Rub),
            other => Err(GatewayError::config(format!("unsupported currency: {}", other))),
        }
    }
}

/// Credentials of a merchant shop, used for checkout and notification signatures.
#[derive(Clone)]
pub struct MerchantCredentials {
    shop_id: String,
    secret_key: SecretString,
    currency: Currency,
}

impl MerchantCredentials {
    /// Creates merchant credentials, failing if the shop id or secret is empty.
    pub fn new(
        shop_id: impl Into<String>,
        secret_key: impl Into<String>,
        currency: Currency,
    ) -> Result<Self, GatewayError> {
        let shop_id = shop_id.into();
        let secret_key = secret_key.into();

        if shop_id.trim().is_empty() {
            return Err(GatewayError::config("merchant shop id is required"));
        }
        if secret_key.is_empty() {
            return Err(GatewayError::config("merchant secret key is required"));
        }

        Ok(Self {
            shop_id,
            secret_key: SecretString::new(secret_key),
            currency,
        })
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn secret_key(&self) -> &SecretString {
        &self.secret_key
    }
}

impl fmt::Debug for MerchantCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerchantCredentials")
            .field("shop_id", &self.shop_id)
            .field("secret_key", &"[REDACTED]")
            .field("currency", &self.currency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_every_part() {
        assert!(Credentials::new("", "id", "secret").is_err());
        assert!(Credentials::new("P1000000", " ", "secret").is_err());
        assert!(Credentials::new("P1000000", "id", "").is_err());
        assert!(Credentials::new("P1000000", "id", "secret").is_ok());
    }

    #[test]
    fn form_fields_are_in_wire_order() {
        let creds = Credentials::new("P1000000", "12345", "s3cret").unwrap();
        let fields = creds.form_fields();

        assert_eq!(fields[0], ("account", "P1000000".to_string()));
        assert_eq!(fields[1], ("apiId", "12345".to_string()));
        assert_eq!(fields[2], ("apiPass", "s3cret".to_string()));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = Credentials::new("P1000000", "12345", "s3cret").unwrap();
        let merchant = MerchantCredentials::new("shop", "m3rchant", Currency::Eur).unwrap();

        assert!(!format!("{:?}", creds).contains("s3cret"));
        assert!(!format!("{:?}", merchant).contains("m3rchant"));
    }

    #[test]
    fn merchant_credentials_require_shop_and_secret() {
        assert!(MerchantCredentials::new("", "secret", Currency::Usd).is_err());
        assert!(MerchantCredentials::new("shop", "", Currency::Usd).is_err());

        let merchant = MerchantCredentials::new("shop", "secret", Currency::Rub).unwrap();
        assert_eq!(merchant.shop_id(), "shop");
        assert_eq!(merchant.currency(), Currency::Rub);
        assert_eq!(merchant.secret_key().expose_secret(), "secret");
    }

    #[test]
    fn currency_parses_case_insensitively() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("EUR".parse::<Currency>().unwrap(), Currency::Eur);
        assert!("BTC".parse::<Currency>().is_err());
        assert_eq!(Currency::default().to_string(), "USD");
    }

    #[test]
    fn currency_deserializes_from_code() {
        let currency: Currency = serde_json::from_str("\"RUB\"").unwrap();
        assert_eq!(currency, Currency::Rub);
    }
}
