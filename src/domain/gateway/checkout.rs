//! Hosted checkout redirect.
//!
//! The buyer is sent to the gateway's checkout page with the shop id, order id,
//! a two-decimal amount, the shop currency and a base64 description, signed
//! with the merchant secret in exactly that order.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rust_decimal::{Decimal, RoundingStrategy};
use secrecy::ExposeSecret;

use super::credentials::{Currency, MerchantCredentials};
use super::notification::keys;
use super::signer::sign;

/// Signed parameters of a checkout redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    shop_id: String,
    order_id: String,
    amount: String,
    currency: Currency,
    description: String,
    signature: String,
}

impl CheckoutForm {
    pub fn new(
        merchant: &MerchantCredentials,
        order_id: impl Into<String>,
        amount: Decimal,
        description: &str,
    ) -> Self {
        let shop_id = merchant.shop_id().to_string();
        let order_id = order_id.into();
        let amount = format_amount(amount);
        let currency = merchant.currency();
        let description = STANDARD.encode(description.as_bytes());

        let signature = sign(
            merchant.secret_key().expose_secret(),
            &[
                shop_id.as_str(),
                order_id.as_str(),
                amount.as_str(),
                currency.as_str(),
                description.as_str(),
            ],
        );

        Self {
            shop_id,
            order_id,
            amount,
            currency,
            description,
            signature,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Query parameters for the checkout page.
    pub fn query_pairs(&self) -> [(&'static str, &str); 6] {
        [
            (keys::SHOP, self.shop_id.as_str()),
            (keys::ORDER_ID, self.order_id.as_str()),
            (keys::AMOUNT, self.amount.as_str()),
            (keys::CURRENCY, self.currency.as_str()),
            (keys::DESCRIPTION, self.description.as_str()),
            (keys::SIGN, self.signature.as_str()),
        ]
    }
}

/// Fixed two-decimal rendering, half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
