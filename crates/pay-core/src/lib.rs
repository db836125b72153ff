//! # pay-core
//!
//! Core types and traits for express-checkout payment requests.
//!
//! This crate provides:
//! - `CartSnapshot`, `PaymentItem` and `CartAddress` data records
//! - `build_payment_request` / `update_payment_request` for shaping cart
//!   totals into vendor payment request configurations
//! - `PaymentRequestProvider` and `PaymentRequestHandle` traits over the
//!   vendor SDK
//! - `can_do_payment_request` for the wallet capability probe
//! - `pluck_address` for shipping-relevant address change detection
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{build_payment_request, can_do_payment_request, CartSnapshot, RequestOptions};
//!
//! let cart = CartSnapshot::new(1000, "usd")
//!     .with_country("PR")
//!     .with_item("Shipping", 500);
//!
//! let config = build_payment_request(&cart, &RequestOptions::default());
//! let handle = provider.create(&config).await?;
//!
//! if can_do_payment_request(handle.as_ref()).await?.can_pay {
//!     // render the button
//! }
//! ```

pub mod address;
pub mod capability;
pub mod cart;
pub mod error;
pub mod handle;
pub mod request;

// Re-exports for convenience
pub use address::{address_changed, normalize_postcode, pluck_address, AddressKey};
pub use capability::{can_do_payment_request, classify_capability, CapabilityResult, RequestType};
pub use cart::{CartAddress, CartLineItem, CartSnapshot, CartTotal, PaymentItem};
pub use error::{PaymentError, PaymentResult};
pub use handle::{
    update_payment_request, BoxedPaymentRequest, CanMakePayment, PaymentRequestHandle,
    PaymentRequestProvider,
};
pub use request::{
    build_payment_request, build_payment_request_update, normalize_country, normalize_currency,
    normalize_line_items, total_payment_item, PaymentRequestConfig, PaymentRequestUpdate,
    RequestOptions, DEFAULT_COUNTRY, DEFAULT_TOTAL_LABEL,
};
