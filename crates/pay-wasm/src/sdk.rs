//! # Stripe.js Bindings
//!
//! Adapts the Stripe.js instance and its payment request objects to the
//! `PaymentRequestProvider` / `PaymentRequestHandle` traits. Calls go
//! through `Reflect` so no Stripe.js typings are needed.

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect};
use pay_core::{
    BoxedPaymentRequest, CanMakePayment, PaymentError, PaymentRequestConfig, PaymentRequestHandle,
    PaymentRequestProvider, PaymentRequestUpdate, PaymentResult,
};
use serde::Serialize;
use std::cell::Cell;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Best-effort message from a thrown JS value
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Serialize to plain JS objects (no `Map`s, numbers instead of BigInts)
pub(crate) fn to_js<T: Serialize>(value: &T) -> PaymentResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| PaymentError::Serialization(e.to_string()))
}

fn call_method(target: &JsValue, name: &'static str, args: &Array) -> PaymentResult<JsValue> {
    let method = Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| PaymentError::handle(name, describe(&e)))?;
    let method: Function = method
        .dyn_into()
        .map_err(|_| PaymentError::handle(name, "not a function"))?;
    method
        .apply(target, args)
        .map_err(|e| PaymentError::handle(name, describe(&e)))
}

/// The `stripe` object returned by `Stripe(publishableKey)`
#[derive(Clone)]
pub struct JsStripe {
    inner: JsValue,
}

impl JsStripe {
    pub fn new(inner: JsValue) -> PaymentResult<Self> {
        if !inner.is_object() {
            return Err(PaymentError::Configuration(
                "Stripe.js instance is not loaded".to_string(),
            ));
        }
        Ok(Self { inner })
    }

    /// `stripe.paymentRequest(options)`, returning the raw JS object
    pub fn payment_request(&self, config: &PaymentRequestConfig) -> PaymentResult<JsValue> {
        debug!(
            "Creating payment request: total={}, currency={}, country={}",
            config.total.amount, config.currency, config.country
        );
        let options = to_js(config)?;
        call_method(&self.inner, "paymentRequest", &Array::of1(&options))
    }
}

#[async_trait(?Send)]
impl PaymentRequestProvider for JsStripe {
    async fn create(&self, config: &PaymentRequestConfig) -> PaymentResult<BoxedPaymentRequest> {
        let inner = self.payment_request(config)?;
        Ok(Box::new(JsPaymentRequest::new(inner)))
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

/// A Stripe.js `PaymentRequest` object
pub struct JsPaymentRequest {
    inner: JsValue,
    showing: Cell<bool>,
}

impl JsPaymentRequest {
    pub fn new(inner: JsValue) -> Self {
        Self {
            inner,
            showing: Cell::new(false),
        }
    }

    pub fn as_js(&self) -> &JsValue {
        &self.inner
    }
}

#[async_trait(?Send)]
impl PaymentRequestHandle for JsPaymentRequest {
    async fn update(&self, update: &PaymentRequestUpdate) -> PaymentResult<()> {
        let options = to_js(update)?;
        call_method(&self.inner, "update", &Array::of1(&options))?;
        Ok(())
    }

    async fn can_make_payment(&self) -> PaymentResult<Option<CanMakePayment>> {
        let promise: Promise = call_method(&self.inner, "canMakePayment", &Array::new())
            .map_err(|e| PaymentError::CapabilityProbe(e.to_string()))?
            .dyn_into()
            .map_err(|_| PaymentError::CapabilityProbe("canMakePayment did not return a promise".to_string()))?;

        let result = JsFuture::from(promise)
            .await
            .map_err(|e| PaymentError::CapabilityProbe(describe(&e)))?;

        if !result.is_truthy() {
            return Ok(None);
        }
        // Older wallets resolve a bare `true`
        if !result.is_object() {
            return Ok(Some(CanMakePayment::default()));
        }

        serde_wasm_bindgen::from_value(result)
            .map(Some)
            .map_err(|e| PaymentError::Serialization(e.to_string()))
    }

    async fn show(&self) -> PaymentResult<()> {
        call_method(&self.inner, "show", &Array::new())?;
        self.showing.set(true);
        Ok(())
    }

    async fn abort(&self) -> PaymentResult<()> {
        call_method(&self.inner, "abort", &Array::new())?;
        self.showing.set(false);
        Ok(())
    }

    fn is_showing(&self) -> bool {
        call_method(&self.inner, "isShowing", &Array::new())
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or_else(|| self.showing.get())
    }
}
