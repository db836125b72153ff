//! # Payment Request Handle
//!
//! Abstraction over the vendor SDK's payment request object.
//! Implementations: the browser SDK binding in `pay-wasm`, fakes in tests.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │               PaymentRequestProvider (trait)                │
//! │  └── create(config) ──────────────┐                         │
//! └───────────────────────────────────┼─────────────────────────┘
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                PaymentRequestHandle (trait)                 │
//! │  ├── update(partial)                                        │
//! │  ├── can_make_payment()                                     │
//! │  ├── show()                                                 │
//! │  └── abort()                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The checkout UI runs on a single-threaded event loop, so the traits
//! are `?Send`: browser handles wrap `JsValue`s that cannot cross threads.

use crate::cart::CartSnapshot;
use crate::error::PaymentResult;
use crate::request::{
    build_payment_request_update, PaymentRequestConfig, PaymentRequestUpdate, RequestOptions,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Truthy result of the vendor's capability probe.
///
/// A falsy probe (no wallet available) is modelled as `None` at the
/// handle boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanMakePayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apple_pay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_pay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<bool>,
}

impl CanMakePayment {
    /// Apple Pay result
    pub fn apple_pay() -> Self {
        Self {
            apple_pay: Some(true),
            ..Self::default()
        }
    }

    /// Whether the session would present Apple Pay
    pub fn is_apple_pay(&self) -> bool {
        self.apple_pay.unwrap_or(false)
    }
}

/// One in-progress vendor payment sheet session.
///
/// The vendor serializes its own internal state; callers do not lock.
#[async_trait(?Send)]
pub trait PaymentRequestHandle {
    /// Replace total, currency and display items on the sheet
    async fn update(&self, update: &PaymentRequestUpdate) -> PaymentResult<()>;

    /// Ask whether this browsing session can present a payment sheet.
    ///
    /// Resolves to `None` when it cannot. May never resolve; no timeout
    /// is applied at this layer.
    async fn can_make_payment(&self) -> PaymentResult<Option<CanMakePayment>>;

    /// Present the payment sheet
    async fn show(&self) -> PaymentResult<()>;

    /// Close the payment sheet if it is open
    async fn abort(&self) -> PaymentResult<()>;

    /// Whether the sheet is currently presented
    fn is_showing(&self) -> bool {
        false
    }
}

/// Type alias for a boxed payment request handle (dynamic dispatch)
pub type BoxedPaymentRequest = Box<dyn PaymentRequestHandle>;

/// Creates payment request handles (the vendor SDK instance)
#[async_trait(?Send)]
pub trait PaymentRequestProvider {
    /// Create a handle from a full configuration
    async fn create(&self, config: &PaymentRequestConfig) -> PaymentResult<BoxedPaymentRequest>;

    /// Get the provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Push new cart totals to an existing handle.
///
/// Must run whenever totals or currency change, otherwise the presented
/// sheet shows stale amounts.
pub async fn update_payment_request(
    handle: &dyn PaymentRequestHandle,
    cart: &CartSnapshot,
    options: &RequestOptions,
) -> PaymentResult<()> {
    let update = build_payment_request_update(cart, options);
    handle.update(&update).await
}
