//! # Shipping Normalization
//!
//! Converts between platform shipping data and the shapes the Stripe
//! payment sheet uses for shipping options and shipping addresses.

use pay_core::CartAddress;
use serde::{Deserialize, Serialize};

/// A platform shipping rate for the current package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRate {
    pub rate_id: String,
    pub name: String,
    /// Price in smallest currency unit
    pub price: i64,
    #[serde(default)]
    pub description: Option<String>,
}

/// A shipping option as shown in the payment sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: String,
    pub label: String,
    pub detail: String,
    pub amount: i64,
}

/// Map platform rates to sheet options, preserving order
pub fn normalize_shipping_options(rates: &[ShippingRate]) -> Vec<ShippingOption> {
    rates
        .iter()
        .map(|rate| ShippingOption {
            id: rate.rate_id.clone(),
            label: rate.name.clone(),
            detail: rate.description.clone().unwrap_or_default(),
            amount: rate.price,
        })
        .collect()
}

/// Shipping address as reported by the payment sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetAddress {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub address_line: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Map a sheet address onto the platform's address fields.
///
/// The recipient is split at the first whitespace into first and last
/// name; address lines past the first are joined into `address_2`.
pub fn normalize_shipping_address(address: &SheetAddress) -> CartAddress {
    let recipient = address.recipient.trim();
    let (first_name, last_name) = match recipient.split_once(char::is_whitespace) {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (recipient.to_string(), String::new()),
    };

    let mut lines = address.address_line.iter().map(|line| line.trim());
    let address_1 = lines.next().unwrap_or_default().to_string();
    let address_2 = lines.filter(|line| !line.is_empty()).collect::<Vec<_>>().join(", ");

    CartAddress {
        first_name,
        last_name,
        company: address.organization.clone(),
        address_1,
        address_2,
        city: address.city.clone(),
        state: address.region.clone(),
        postcode: address.postal_code.clone(),
        country: address.country.clone(),
        phone: address.phone.clone().filter(|p| !p.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pay_core::{address_changed, pluck_address};

    #[test]
    fn test_normalize_shipping_options() {
        let rates = vec![
            ShippingRate {
                rate_id: "flat_rate:1".into(),
                name: "Flat rate".into(),
                price: 500,
                description: None,
            },
            ShippingRate {
                rate_id: "express:2".into(),
                name: "Express".into(),
                price: 1500,
                description: Some("Next day".into()),
            },
        ];

        let options = normalize_shipping_options(&rates);

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id, "flat_rate:1");
        assert_eq!(options[0].detail, "");
        assert_eq!(options[1].label, "Express");
        assert_eq!(options[1].detail, "Next day");
        assert_eq!(options[1].amount, 1500);
    }

    #[test]
    fn test_normalize_shipping_address() {
        let sheet: SheetAddress = serde_json::from_str(
            r#"{
                "country": "GB",
                "addressLine": ["10 Downing St", "Flat 1", "Door B"],
                "region": "",
                "city": "London",
                "postalCode": "sw1a 1aa",
                "recipient": "Ada King Lovelace",
                "organization": "",
                "phone": ""
            }"#,
        )
        .unwrap();

        let address = normalize_shipping_address(&sheet);

        assert_eq!(address.first_name, "Ada");
        assert_eq!(address.last_name, "King Lovelace");
        assert_eq!(address.address_1, "10 Downing St");
        assert_eq!(address.address_2, "Flat 1, Door B");
        assert_eq!(address.postcode, "sw1a 1aa");
        assert_eq!(address.phone, None);
        assert_eq!(pluck_address(&address).postcode, "SW1A1AA");
    }

    #[test]
    fn test_sheet_address_change_detection() {
        let before = normalize_shipping_address(&SheetAddress {
            country: "US".into(),
            city: "Austin".into(),
            region: "TX".into(),
            postal_code: "78701".into(),
            recipient: "Grace".into(),
            ..SheetAddress::default()
        });
        let mut after = before.clone();
        after.address_1 = "1 Congress Ave".into();
        assert!(!address_changed(&before, &after));
        assert_eq!(before.first_name, "Grace");
        assert!(before.last_name.is_empty());

        after.state = "CA".into();
        assert!(address_changed(&before, &after));
    }
}
