//! # pay-stripe
//!
//! Stripe payment request integration for express-checkout-rs.
//!
//! This crate provides:
//!
//! 1. **StripeSettings** - the platform settings blob
//!    - Publishable key (hard error when missing)
//!    - Total label, payer requirements
//!    - Payment button display preferences
//!
//! 2. **StripePaymentRequest** - one payment sheet session
//!    - Builds the request from cart totals
//!    - Probes Apple Pay / browser wallet support
//!    - Keeps totals in sync, shows and aborts the sheet
//!
//! 3. **Error messages** - Stripe error type/code to shopper-facing text
//!
//! 4. **Shipping** - shipping options and sheet address normalization
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_stripe::{StripePaymentRequest, StripeSettings};
//!
//! // Load once at the composition root
//! let settings = StripeSettings::from_json(raw_blob)?;
//! let session = StripePaymentRequest::new(settings, Box::new(sdk))?;
//!
//! let handle = session.create(&cart).await?;
//! if session.can_pay(handle.as_ref()).await?.can_pay {
//!     // render the payment button
//! }
//! ```
//!
//! ## Error Messages
//!
//! ```rust,ignore
//! use pay_stripe::error_message_for_type_and_code;
//!
//! let message = error_message_for_type_and_code("card_error", Some("card_declined"));
//! assert_eq!(message, Some("The card was declined."));
//! ```

pub mod config;
pub mod errors;
pub mod payment_request;
pub mod shipping;

// Re-exports
pub use config::{ButtonRenderMode, ButtonSettings, CheckoutSettings, StripeSettings};
pub use errors::{
    error_message_for, error_message_for_type_and_code, CardErrorCode, StripeError,
    StripeErrorType, GENERIC_ERROR_MESSAGE, INVALID_EMAIL_MESSAGE,
};
pub use payment_request::StripePaymentRequest;
pub use shipping::{
    normalize_shipping_address, normalize_shipping_options, SheetAddress, ShippingOption,
    ShippingRate,
};
