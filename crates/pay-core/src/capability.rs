//! # Capability Probe
//!
//! Asks the vendor whether the current device and browser can complete a
//! payment, and classifies the answer for the button renderer.

use crate::error::{PaymentError, PaymentResult};
use crate::handle::{CanMakePayment, PaymentRequestHandle};
use serde::{Deserialize, Serialize};

/// Which payment sheet the browser will present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    ApplePay,
    PaymentRequestApi,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::ApplePay => "apple_pay",
            RequestType::PaymentRequestApi => "payment_request_api",
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified probe outcome. `request_type` is only present when payable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityResult {
    pub can_pay: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<RequestType>,
}

impl CapabilityResult {
    /// The session cannot present a payment sheet
    pub fn unavailable() -> Self {
        Self {
            can_pay: false,
            request_type: None,
        }
    }

    /// The session can pay through the given sheet
    pub fn available(request_type: RequestType) -> Self {
        Self {
            can_pay: true,
            request_type: Some(request_type),
        }
    }
}

/// Classify a resolved probe result
pub fn classify_capability(result: Option<&CanMakePayment>) -> CapabilityResult {
    match result {
        None => CapabilityResult::unavailable(),
        Some(result) if result.is_apple_pay() => CapabilityResult::available(RequestType::ApplePay),
        Some(_) => CapabilityResult::available(RequestType::PaymentRequestApi),
    }
}

/// Probe the handle once and classify the outcome.
///
/// A rejected probe is returned as `PaymentError::CapabilityProbe`; there
/// are no retries.
pub async fn can_do_payment_request(
    handle: &dyn PaymentRequestHandle,
) -> PaymentResult<CapabilityResult> {
    let result = handle.can_make_payment().await.map_err(|err| match err {
        PaymentError::CapabilityProbe(_) => err,
        other => PaymentError::CapabilityProbe(other.to_string()),
    })?;
    Ok(classify_capability(result.as_ref()))
}
