//! # pay-wasm
//!
//! WebAssembly bindings for express-checkout-rs.
//!
//! This crate is the composition root for the browser checkout:
//! - Loading the platform settings blob (fails loudly when absent)
//! - Creating and updating Stripe payment requests from cart totals
//! - Probing Apple Pay / browser wallet support
//! - Shopper-facing messages for Stripe errors
//! - Address and shipping normalization
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { ExpressCheckout, errorMessageForTypeAndCode } from 'express-checkout-wasm';
//!
//! await init();
//!
//! const checkout = new ExpressCheckout(getSetting('stripe_data'), Stripe(key));
//! const paymentRequest = checkout.createPaymentRequest(cart);
//! const { canPay, requestType } = await checkout.canDoPaymentRequest(paymentRequest);
//!
//! console.log(errorMessageForTypeAndCode('card_error', 'card_declined'));
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

pub mod logging;
pub mod sdk;

use pay_core::{CartAddress, CartSnapshot, PaymentError};
use pay_stripe::{
    error_message_for_type_and_code, SheetAddress, ShippingRate, StripeError,
    StripePaymentRequest, StripeSettings,
};
use sdk::{to_js, JsPaymentRequest, JsStripe};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

fn js_error(err: PaymentError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_error(PaymentError::InvalidRequest(format!("Invalid {}: {}", what, e))))
}

/// Install console logging with an `EnvFilter` directive (default "info")
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(directive: Option<String>) {
    logging::init(directive.as_deref());
}

/// Checkout session bound to the page's settings and Stripe.js instance
#[wasm_bindgen]
pub struct ExpressCheckout {
    session: Rc<StripePaymentRequest>,
    stripe: JsStripe,
}

#[wasm_bindgen]
impl ExpressCheckout {
    /// Load settings and bind the Stripe.js instance.
    ///
    /// Throws when the settings blob or its publishable key is missing.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue, stripe: JsValue) -> Result<ExpressCheckout, JsValue> {
        let blob: serde_json::Value = if settings.is_undefined() || settings.is_null() {
            serde_json::Value::Null
        } else {
            from_js(settings, "settings")?
        };
        let settings = StripeSettings::from_value(blob).map_err(js_error)?;
        let stripe = JsStripe::new(stripe).map_err(js_error)?;
        let session =
            StripePaymentRequest::new(settings, Box::new(stripe.clone())).map_err(js_error)?;

        tracing::debug!("Express checkout ready");

        Ok(Self {
            session: Rc::new(session),
            stripe,
        })
    }

    /// Publishable key from the settings blob
    #[wasm_bindgen(getter, js_name = apiKey)]
    pub fn api_key(&self) -> Result<String, JsValue> {
        self.session
            .settings()
            .api_key()
            .map(String::from)
            .map_err(js_error)
    }

    /// Resolved button display mode (`{ mode: "default" | "branded" | "custom", ... }`)
    #[wasm_bindgen(js_name = buttonMode)]
    pub fn button_mode(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.settings().button.render_mode()).map_err(js_error)
    }

    /// Build the Stripe.js payment request options without creating one
    #[wasm_bindgen(js_name = paymentRequestOptions)]
    pub fn payment_request_options(&self, cart: JsValue) -> Result<JsValue, JsValue> {
        let cart: CartSnapshot = from_js(cart, "cart")?;
        let config = self.session.prepare(&cart).map_err(js_error)?;
        to_js(&config).map_err(js_error)
    }

    /// Create a Stripe.js `PaymentRequest` for the cart
    #[wasm_bindgen(js_name = createPaymentRequest)]
    pub fn create_payment_request(&self, cart: JsValue) -> Result<JsValue, JsValue> {
        let cart: CartSnapshot = from_js(cart, "cart")?;
        let config = self.session.prepare(&cart).map_err(js_error)?;
        self.stripe.payment_request(&config).map_err(js_error)
    }

    /// Push new cart totals to an existing `PaymentRequest`
    #[wasm_bindgen(js_name = updatePaymentRequest)]
    pub fn update_payment_request(&self, payment_request: JsValue, cart: JsValue) -> js_sys::Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move {
            let cart: CartSnapshot = from_js(cart, "cart")?;
            let handle = JsPaymentRequest::new(payment_request);
            session.update(&handle, &cart).await.map_err(js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Resolve to `{ canPay, requestType? }`; rejects if the wallet check itself fails
    #[wasm_bindgen(js_name = canDoPaymentRequest)]
    pub fn can_do_payment_request(&self, payment_request: JsValue) -> js_sys::Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move {
            let handle = JsPaymentRequest::new(payment_request);
            let result = session.can_pay(&handle).await.map_err(js_error)?;
            to_js(&result).map_err(js_error)
        })
    }

    /// Close the sheet if it is showing
    #[wasm_bindgen(js_name = abortPaymentRequest)]
    pub fn abort_payment_request(&self, payment_request: JsValue) -> js_sys::Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move {
            let handle = JsPaymentRequest::new(payment_request);
            session.abort(&handle).await.map_err(js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }
}

/// Shopper-facing message for a Stripe error type and optional code.
///
/// Returns `undefined` when the error is not classifiable here and an
/// empty string for errors rendered inline.
#[wasm_bindgen(js_name = errorMessageForTypeAndCode)]
pub fn error_message_for_type_and_code_js(error_type: &str, code: Option<String>) -> Option<String> {
    error_message_for_type_and_code(error_type, code.as_deref()).map(String::from)
}

/// Shopper-facing message for a Stripe.js error object
#[wasm_bindgen(js_name = errorMessage)]
pub fn error_message(error: JsValue) -> Result<Option<String>, JsValue> {
    let error: StripeError = from_js(error, "error")?;
    Ok(error.user_message().map(String::from))
}

/// `{ country, state, city, postcode }` with a normalized postcode
#[wasm_bindgen(js_name = pluckAddress)]
pub fn pluck_address(address: JsValue) -> Result<JsValue, JsValue> {
    let address: CartAddress = from_js(address, "address")?;
    to_js(&pay_core::pluck_address(&address)).map_err(js_error)
}

/// Whether an address edit can change shipping rates
#[wasm_bindgen(js_name = addressChanged)]
pub fn address_changed(previous: JsValue, current: JsValue) -> Result<bool, JsValue> {
    let previous: CartAddress = from_js(previous, "address")?;
    let current: CartAddress = from_js(current, "address")?;
    Ok(pay_core::address_changed(&previous, &current))
}

/// Platform shipping rates to payment sheet shipping options
#[wasm_bindgen(js_name = normalizeShippingOptions)]
pub fn normalize_shipping_options(rates: JsValue) -> Result<JsValue, JsValue> {
    let rates: Vec<ShippingRate> = from_js(rates, "shipping rates")?;
    to_js(&pay_stripe::normalize_shipping_options(&rates)).map_err(js_error)
}

/// Payment sheet shipping address to platform address fields
#[wasm_bindgen(js_name = normalizeShippingAddress)]
pub fn normalize_shipping_address(address: JsValue) -> Result<JsValue, JsValue> {
    let address: SheetAddress = from_js(address, "shipping address")?;
    to_js(&pay_stripe::normalize_shipping_address(&address)).map_err(js_error)
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
