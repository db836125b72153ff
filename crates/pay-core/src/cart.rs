//! # Cart Types
//!
//! Cart snapshot and payment sheet item types.
//! Amounts are always in the smallest currency unit (cents for USD).

use serde::{Deserialize, Serialize};

/// Cart grand total for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotal {
    /// Amount in smallest currency unit
    pub value: i64,
}

impl CartTotal {
    pub fn new(value: i64) -> Self {
        Self { value }
    }
}

/// One raw row of the cart totals breakdown (subtotal, shipping, tax, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Display label
    pub label: String,

    /// Amount in smallest currency unit
    pub value: i64,
}

impl CartLineItem {
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A payment sheet entry in the shape the vendor expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentItem {
    /// Display label
    pub label: String,

    /// Amount in smallest currency unit
    pub amount: i64,

    /// Amount is not final yet (e.g. shipping before an address is known)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pending: bool,
}

impl PaymentItem {
    pub fn new(label: impl Into<String>, amount: i64) -> Self {
        Self {
            label: label.into(),
            amount,
            pending: false,
        }
    }

    /// Builder: mark the amount as pending
    pub fn pending(mut self) -> Self {
        self.pending = true;
        self
    }
}

/// Cart data supplied by the checkout UI on every render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Grand total
    pub total: CartTotal,

    /// ISO 4217 currency code
    pub currency_code: String,

    /// ISO 3166 alpha-2 store country code (may be empty)
    #[serde(default)]
    pub country_code: Option<String>,

    /// Whether the cart contains shippable items
    #[serde(default)]
    pub shipping_required: bool,

    /// Breakdown rows, in display order
    #[serde(default)]
    pub cart_total_items: Vec<CartLineItem>,
}

impl CartSnapshot {
    /// Create a snapshot with no breakdown rows
    pub fn new(total: i64, currency_code: impl Into<String>) -> Self {
        Self {
            total: CartTotal::new(total),
            currency_code: currency_code.into(),
            country_code: None,
            shipping_required: false,
            cart_total_items: Vec::new(),
        }
    }

    /// Builder: set country code
    pub fn with_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    /// Builder: require shipping
    pub fn with_shipping(mut self, required: bool) -> Self {
        self.shipping_required = required;
        self
    }

    /// Builder: append a breakdown row
    pub fn with_item(mut self, label: impl Into<String>, value: i64) -> Self {
        self.cart_total_items.push(CartLineItem::new(label, value));
        self
    }
}

/// A full platform address record (billing or shipping form)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAddress {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address_1: String,
    #[serde(default)]
    pub address_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub postcode: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_builder() {
        let cart = CartSnapshot::new(1500, "usd")
            .with_country("US")
            .with_shipping(true)
            .with_item("Subtotal", 1000)
            .with_item("Shipping", 500);

        assert_eq!(cart.total.value, 1500);
        assert_eq!(cart.country_code.as_deref(), Some("US"));
        assert!(cart.shipping_required);
        assert_eq!(cart.cart_total_items.len(), 2);
        assert_eq!(cart.cart_total_items[1].label, "Shipping");
    }

    #[test]
    fn test_snapshot_deserialize() {
        let cart: CartSnapshot = serde_json::from_str(
            r#"{
                "total": { "value": 1000 },
                "currencyCode": "usd",
                "countryCode": "PR",
                "shippingRequired": true,
                "cartTotalItems": [{ "label": "Shipping", "value": 500 }]
            }"#,
        )
        .unwrap();

        assert_eq!(cart.total, CartTotal::new(1000));
        assert_eq!(cart.country_code.as_deref(), Some("PR"));
        assert_eq!(cart.cart_total_items, vec![CartLineItem::new("Shipping", 500)]);
    }

    #[test]
    fn test_payment_item_pending_serialization() {
        let settled = serde_json::to_value(PaymentItem::new("Tax", 80)).unwrap();
        assert_eq!(settled, serde_json::json!({ "label": "Tax", "amount": 80 }));

        let pending = serde_json::to_value(PaymentItem::new("Shipping", 0).pending()).unwrap();
        assert_eq!(pending["pending"], serde_json::json!(true));
    }

    #[test]
    fn test_address_requires_postcode() {
        let missing = serde_json::from_str::<CartAddress>(r#"{ "country": "GB" }"#);
        assert!(missing.is_err());

        let address: CartAddress =
            serde_json::from_str(r#"{ "country": "GB", "postcode": "SW1A 1AA" }"#).unwrap();
        assert_eq!(address.postcode, "SW1A 1AA");
        assert!(address.city.is_empty());
    }
}
