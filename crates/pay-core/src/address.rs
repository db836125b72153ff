//! # Address Normalization
//!
//! Reduces a full address to the fields that affect shipping rates, so the
//! checkout can tell whether an edit warrants re-fetching shipping options.

use crate::cart::CartAddress;
use serde::{Deserialize, Serialize};

/// The shipping-relevant subset of an address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressKey {
    pub country: String,
    pub state: String,
    pub city: String,
    /// Spaces removed, upper-cased
    pub postcode: String,
}

/// Strip all whitespace and upper-case ("sw1a 1aa" -> "SW1A1AA")
pub fn normalize_postcode(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Extract the comparable key from a full address
pub fn pluck_address(address: &CartAddress) -> AddressKey {
    AddressKey {
        country: address.country.clone(),
        state: address.state.clone(),
        city: address.city.clone(),
        postcode: normalize_postcode(&address.postcode),
    }
}

/// Whether moving from `previous` to `current` can change shipping rates
pub fn address_changed(previous: &CartAddress, current: &CartAddress) -> bool {
    pluck_address(previous) != pluck_address(current)
}
