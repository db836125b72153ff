//! # Payment Request Builder
//!
//! Shapes cart snapshots into the payment request configuration the
//! vendor SDK expects, and into the partial configuration used when cart
//! totals change on an existing handle.

use crate::cart::{CartLineItem, CartSnapshot, CartTotal, PaymentItem};
use serde::{Deserialize, Serialize};

/// Label used for the grand total when no custom label is configured
pub const DEFAULT_TOTAL_LABEL: &str = "Total";

/// Country used when none is supplied, or when the vendor has no entry for it
pub const DEFAULT_COUNTRY: &str = "US";

/// Full configuration used to create a payment request handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequestConfig {
    pub total: PaymentItem,
    pub currency: String,
    pub country: String,
    pub request_payer_name: bool,
    pub request_payer_email: bool,
    pub request_payer_phone: bool,
    pub request_shipping: bool,
    pub display_items: Vec<PaymentItem>,
}

/// Partial configuration applied to an existing handle.
///
/// Country and payer requirements are fixed for the handle's lifetime
/// and are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequestUpdate {
    pub total: PaymentItem,
    pub currency: String,
    pub display_items: Vec<PaymentItem>,
}

/// Settings-derived knobs for the builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Custom label for the grand total row
    pub total_label: Option<String>,
    /// Ask the payer for a phone number
    pub request_payer_phone: bool,
}

impl RequestOptions {
    /// Builder: set the total label
    pub fn with_total_label(mut self, label: impl Into<String>) -> Self {
        self.total_label = Some(label.into());
        self
    }

    /// Builder: request the payer's phone number
    pub fn with_payer_phone(mut self, required: bool) -> Self {
        self.request_payer_phone = required;
        self
    }

    /// Configured label, or the default when unset or blank
    pub fn total_label(&self) -> &str {
        match self.total_label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => DEFAULT_TOTAL_LABEL,
        }
    }
}

/// Convert the cart total into the single total row
pub fn total_payment_item(total: CartTotal, options: &RequestOptions) -> PaymentItem {
    PaymentItem::new(options.total_label(), total.value)
}

/// Map breakdown rows 1:1 into payment items, preserving display order
pub fn normalize_line_items(items: &[CartLineItem], pending: bool) -> Vec<PaymentItem> {
    items
        .iter()
        .map(|item| PaymentItem {
            label: item.label.clone(),
            amount: item.value,
            pending,
        })
        .collect()
}

/// Empty and absent codes fall back to the US; Puerto Rico is folded into
/// the US because the vendor's country list has no PR entry.
pub fn normalize_country(country_code: Option<&str>) -> String {
    match country_code {
        None | Some("") | Some("PR") => DEFAULT_COUNTRY.to_string(),
        Some(code) => code.to_string(),
    }
}

/// Vendor currency codes are lower-case
pub fn normalize_currency(currency_code: &str) -> String {
    currency_code.trim().to_lowercase()
}

/// Build the configuration for a new payment request handle
pub fn build_payment_request(cart: &CartSnapshot, options: &RequestOptions) -> PaymentRequestConfig {
    PaymentRequestConfig {
        total: total_payment_item(cart.total, options),
        currency: normalize_currency(&cart.currency_code),
        country: normalize_country(cart.country_code.as_deref()),
        request_payer_name: true,
        request_payer_email: true,
        request_payer_phone: options.request_payer_phone,
        request_shipping: cart.shipping_required,
        display_items: normalize_line_items(&cart.cart_total_items, false),
    }
}

/// Build the partial configuration for a cart totals change
pub fn build_payment_request_update(
    cart: &CartSnapshot,
    options: &RequestOptions,
) -> PaymentRequestUpdate {
    PaymentRequestUpdate {
        total: total_payment_item(cart.total, options),
        currency: normalize_currency(&cart.currency_code),
        display_items: normalize_line_items(&cart.cart_total_items, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_normalization() {
        assert_eq!(normalize_country(None), "US");
        assert_eq!(normalize_country(Some("")), "US");
        assert_eq!(normalize_country(Some("PR")), "US");
        assert_eq!(normalize_country(Some("GB")), "GB");
        assert_eq!(normalize_country(Some("CA")), "CA");
    }

    #[test]
    fn test_total_label_fallback() {
        assert_eq!(RequestOptions::default().total_label(), "Total");
        assert_eq!(
            RequestOptions::default().with_total_label("  ").total_label(),
            "Total"
        );
        assert_eq!(
            RequestOptions::default()
                .with_total_label("Acme Store (via WooCommerce)")
                .total_label(),
            "Acme Store (via WooCommerce)"
        );
    }

    #[test]
    fn test_line_items_keep_order_and_amounts() {
        let items = vec![
            CartLineItem::new("Subtotal", 2000),
            CartLineItem::new("Shipping", 500),
            CartLineItem::new("Discount", -300),
            CartLineItem::new("Shipping", 500),
        ];

        let normalized = normalize_line_items(&items, false);

        assert_eq!(normalized.len(), items.len());
        for (raw, item) in items.iter().zip(&normalized) {
            assert_eq!(raw.label, item.label);
            assert_eq!(raw.value, item.amount);
            assert!(!item.pending);
        }

        assert!(normalize_line_items(&items, true).iter().all(|i| i.pending));
        assert!(normalize_line_items(&[], false).is_empty());
    }

    #[test]
    fn test_build_payment_request() {
        let cart = CartSnapshot::new(1000, "usd")
            .with_country("PR")
            .with_shipping(true)
            .with_item("Shipping", 500);

        let config = build_payment_request(&cart, &RequestOptions::default());

        assert_eq!(config.total, PaymentItem::new("Total", 1000));
        assert_eq!(config.currency, "usd");
        assert_eq!(config.country, "US");
        assert!(config.request_payer_name);
        assert!(config.request_payer_email);
        assert!(!config.request_payer_phone);
        assert!(config.request_shipping);
        assert_eq!(config.display_items, vec![PaymentItem::new("Shipping", 500)]);
    }

    #[test]
    fn test_build_serializes_vendor_shape() {
        let cart = CartSnapshot::new(1000, "EUR").with_country("DE");
        let options = RequestOptions::default().with_payer_phone(true);

        let value = serde_json::to_value(build_payment_request(&cart, &options)).unwrap();

        assert_eq!(value["currency"], "eur");
        assert_eq!(value["country"], "DE");
        assert_eq!(value["requestPayerPhone"], true);
        assert_eq!(value["requestShipping"], false);
        assert_eq!(value["displayItems"], serde_json::json!([]));
    }

    #[test]
    fn test_update_omits_fixed_fields() {
        let cart = CartSnapshot::new(2500, "usd")
            .with_country("CA")
            .with_item("Subtotal", 2500);
        let options = RequestOptions::default().with_total_label("Order total");

        let update = build_payment_request_update(&cart, &options);
        assert_eq!(update.total, PaymentItem::new("Order total", 2500));
        assert_eq!(update.display_items.len(), 1);

        let value = serde_json::to_value(&update).unwrap();
        assert!(value.get("country").is_none());
        assert!(value.get("requestShipping").is_none());
    }
}
