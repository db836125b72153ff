//! # Stripe Payment Request
//!
//! Drives a Stripe payment request through its lifetime: build the
//! configuration from the cart and settings, create the handle, probe
//! wallet support, keep totals in sync, and show or abort the sheet.

use crate::config::StripeSettings;
use pay_core::{
    build_payment_request, can_do_payment_request, update_payment_request, BoxedPaymentRequest,
    CapabilityResult, CartSnapshot, PaymentError, PaymentRequestConfig, PaymentRequestHandle,
    PaymentRequestProvider, PaymentResult, RequestOptions,
};
use tracing::{debug, info, instrument, warn};

/// Payment request session bound to one settings blob and one SDK instance
pub struct StripePaymentRequest {
    settings: StripeSettings,
    options: RequestOptions,
    provider: Box<dyn PaymentRequestProvider>,
}

impl StripePaymentRequest {
    /// Create from loaded settings. Fails when the publishable key is missing.
    pub fn new(
        settings: StripeSettings,
        provider: Box<dyn PaymentRequestProvider>,
    ) -> PaymentResult<Self> {
        settings.api_key()?;
        let options = settings.request_options();
        Ok(Self {
            settings,
            options,
            provider,
        })
    }

    pub fn settings(&self) -> &StripeSettings {
        &self.settings
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Build the creation config. The store country from settings fills
    /// in when the cart carries none.
    pub fn request_config(&self, cart: &CartSnapshot) -> PaymentRequestConfig {
        let checkout = &self.settings.checkout;
        let mut cart = cart.clone();

        if !cart.country_code.as_deref().is_some_and(|c| !c.is_empty()) {
            cart.country_code = checkout.country_code.clone();
        }
        if cart.currency_code.trim().is_empty() {
            if let Some(currency) = &checkout.currency_code {
                cart.currency_code = currency.clone();
            }
        }
        cart.shipping_required |= checkout.needs_shipping;

        build_payment_request(&cart, &self.options)
    }

    /// Validate the cart and build the creation config
    pub fn prepare(&self, cart: &CartSnapshot) -> PaymentResult<PaymentRequestConfig> {
        let config = self.request_config(cart);
        if config.currency.trim().is_empty() {
            return Err(PaymentError::InvalidRequest(
                "Cart has no currency".to_string(),
            ));
        }
        Ok(config)
    }

    /// Create the vendor handle for this cart
    #[instrument(skip(self, cart), fields(provider = self.provider.provider_name()))]
    pub async fn create(&self, cart: &CartSnapshot) -> PaymentResult<BoxedPaymentRequest> {
        let config = self.prepare(cart)?;

        debug!(
            "Creating payment request: total={}, currency={}, country={}, items={}",
            config.total.amount,
            config.currency,
            config.country,
            config.display_items.len()
        );

        let handle = self.provider.create(&config).await?;

        info!("Created payment request: currency={}", config.currency);
        Ok(handle)
    }

    /// Probe wallet support once. Rejections surface as errors.
    #[instrument(skip_all)]
    pub async fn can_pay(&self, handle: &dyn PaymentRequestHandle) -> PaymentResult<CapabilityResult> {
        match can_do_payment_request(handle).await {
            Ok(result) => {
                debug!(
                    "Capability probe: can_pay={}, request_type={:?}",
                    result.can_pay, result.request_type
                );
                Ok(result)
            }
            Err(err) => {
                warn!("Capability probe failed: {}", err);
                Err(err)
            }
        }
    }

    /// Push changed cart totals to an existing handle
    #[instrument(skip_all, fields(total = cart.total.value))]
    pub async fn update(
        &self,
        handle: &dyn PaymentRequestHandle,
        cart: &CartSnapshot,
    ) -> PaymentResult<()> {
        update_payment_request(handle, cart, &self.options).await?;
        debug!("Updated payment request totals");
        Ok(())
    }

    /// Present the payment sheet
    #[instrument(skip_all)]
    pub async fn show(&self, handle: &dyn PaymentRequestHandle) -> PaymentResult<()> {
        handle.show().await
    }

    /// Close the sheet if it is open
    #[instrument(skip_all)]
    pub async fn abort(&self, handle: &dyn PaymentRequestHandle) -> PaymentResult<()> {
        if !handle.is_showing() {
            debug!("Payment sheet not showing, nothing to abort");
            return Ok(());
        }
        handle.abort().await
    }
}
