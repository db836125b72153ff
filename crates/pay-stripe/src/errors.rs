//! # Stripe Error Messages
//!
//! Maps Stripe errors (type plus optional card code) to the message shown
//! to the shopper. Classification never fails: the result is a message,
//! an empty string (errors rendered inline by the card fields), or `None`
//! when the error is not ours to describe.

use serde::{Deserialize, Serialize};

pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address, please correct and try again.";

pub const GENERIC_ERROR_MESSAGE: &str =
    "Unable to process this payment, please try again or use alternative method.";

/// Stripe error `type`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripeErrorType {
    #[serde(rename = "email_invalid")]
    InvalidEmail,
    #[serde(rename = "invalid_request_error")]
    InvalidRequest,
    #[serde(rename = "api_connection_error")]
    ApiConnection,
    ApiError,
    AuthenticationError,
    RateLimitError,
    CardError,
    ValidationError,
    #[serde(other)]
    Unknown,
}

impl Default for StripeErrorType {
    fn default() -> Self {
        StripeErrorType::Unknown
    }
}

impl StripeErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StripeErrorType::InvalidEmail => "email_invalid",
            StripeErrorType::InvalidRequest => "invalid_request_error",
            StripeErrorType::ApiConnection => "api_connection_error",
            StripeErrorType::ApiError => "api_error",
            StripeErrorType::AuthenticationError => "authentication_error",
            StripeErrorType::RateLimitError => "rate_limit_error",
            StripeErrorType::CardError => "card_error",
            StripeErrorType::ValidationError => "validation_error",
            StripeErrorType::Unknown => "unknown",
        }
    }

    /// Errors too internal to show verbatim
    pub fn is_non_friendly(&self) -> bool {
        matches!(
            self,
            StripeErrorType::InvalidRequest
                | StripeErrorType::ApiConnection
                | StripeErrorType::ApiError
                | StripeErrorType::AuthenticationError
                | StripeErrorType::RateLimitError
        )
    }
}

impl From<&str> for StripeErrorType {
    fn from(value: &str) -> Self {
        match value {
            "email_invalid" => StripeErrorType::InvalidEmail,
            "invalid_request_error" => StripeErrorType::InvalidRequest,
            "api_connection_error" => StripeErrorType::ApiConnection,
            "api_error" => StripeErrorType::ApiError,
            "authentication_error" => StripeErrorType::AuthenticationError,
            "rate_limit_error" => StripeErrorType::RateLimitError,
            "card_error" => StripeErrorType::CardError,
            "validation_error" => StripeErrorType::ValidationError,
            _ => StripeErrorType::Unknown,
        }
    }
}

/// Stripe card error `code`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardErrorCode {
    InvalidNumber,
    InvalidExpiryMonth,
    InvalidExpiryYear,
    InvalidCvc,
    IncorrectNumber,
    IncompleteNumber,
    IncompleteCvc,
    IncompleteExpiry,
    ExpiredCard,
    IncorrectCvc,
    IncorrectZip,
    InvalidExpiryYearPast,
    CardDeclined,
    Missing,
    ProcessingError,
    #[serde(other)]
    Unknown,
}

impl From<&str> for CardErrorCode {
    fn from(value: &str) -> Self {
        match value {
            "invalid_number" => CardErrorCode::InvalidNumber,
            "invalid_expiry_month" => CardErrorCode::InvalidExpiryMonth,
            "invalid_expiry_year" => CardErrorCode::InvalidExpiryYear,
            "invalid_cvc" => CardErrorCode::InvalidCvc,
            "incorrect_number" => CardErrorCode::IncorrectNumber,
            "incomplete_number" => CardErrorCode::IncompleteNumber,
            "incomplete_cvc" => CardErrorCode::IncompleteCvc,
            "incomplete_expiry" => CardErrorCode::IncompleteExpiry,
            "expired_card" => CardErrorCode::ExpiredCard,
            "incorrect_cvc" => CardErrorCode::IncorrectCvc,
            "incorrect_zip" => CardErrorCode::IncorrectZip,
            "invalid_expiry_year_past" => CardErrorCode::InvalidExpiryYearPast,
            "card_declined" => CardErrorCode::CardDeclined,
            "missing" => CardErrorCode::Missing,
            "processing_error" => CardErrorCode::ProcessingError,
            _ => CardErrorCode::Unknown,
        }
    }
}

impl CardErrorCode {
    /// Shopper-facing message, `None` for codes outside the table
    pub fn message(&self) -> Option<&'static str> {
        let message = match self {
            CardErrorCode::InvalidNumber => "The card number is not a valid credit card number.",
            CardErrorCode::InvalidExpiryMonth => "The card expiration month is invalid.",
            CardErrorCode::InvalidExpiryYear => "The card expiration year is invalid.",
            CardErrorCode::InvalidCvc => "The card security code is invalid.",
            CardErrorCode::IncorrectNumber => "The card number is incorrect.",
            CardErrorCode::IncompleteNumber => "The card number is incomplete.",
            CardErrorCode::IncompleteCvc => "The card security code is incomplete.",
            CardErrorCode::IncompleteExpiry => "The card expiration date is incomplete.",
            CardErrorCode::ExpiredCard => "The card has expired.",
            CardErrorCode::IncorrectCvc => "The card security code is incorrect.",
            CardErrorCode::IncorrectZip => "The card zip code failed validation.",
            CardErrorCode::InvalidExpiryYearPast => "The card expiration year is in the past",
            CardErrorCode::CardDeclined => "The card was declined.",
            CardErrorCode::Missing => "There is no card on a customer that is being charged.",
            CardErrorCode::ProcessingError => "An error occurred while processing the card.",
            CardErrorCode::Unknown => return None,
        };
        Some(message)
    }
}

/// A Stripe error as reported by the SDK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeError {
    /// Missing on some SDK errors; classifies to no message
    #[serde(rename = "type", default)]
    pub error_type: StripeErrorType,

    /// Only meaningful for card errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CardErrorCode>,

    /// Stripe's own message (never shown for non-friendly errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StripeError {
    pub fn new(error_type: impl Into<StripeErrorType>, code: Option<&str>) -> Self {
        Self {
            error_type: error_type.into(),
            code: code.map(CardErrorCode::from),
            message: None,
        }
    }

    /// Shopper-facing message for this error
    pub fn user_message(&self) -> Option<&'static str> {
        error_message_for(&self.error_type, self.code.as_ref())
    }
}

/// Message lookup in fixed priority order: invalid email, non-friendly
/// types, card codes, validation errors.
pub fn error_message_for(
    error_type: &StripeErrorType,
    code: Option<&CardErrorCode>,
) -> Option<&'static str> {
    if *error_type == StripeErrorType::InvalidEmail {
        Some(INVALID_EMAIL_MESSAGE)
    } else if error_type.is_non_friendly() {
        Some(GENERIC_ERROR_MESSAGE)
    } else if *error_type == StripeErrorType::CardError {
        code.and_then(CardErrorCode::message)
    } else if *error_type == StripeErrorType::ValidationError {
        // Rendered inline by the card fields
        Some("")
    } else {
        None
    }
}

/// String-keyed variant of [`error_message_for`] for raw SDK payloads
pub fn error_message_for_type_and_code(error_type: &str, code: Option<&str>) -> Option<&'static str> {
    let code = code.map(CardErrorCode::from);
    error_message_for(&StripeErrorType::from(error_type), code.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_email() {
        assert_eq!(
            error_message_for_type_and_code("email_invalid", None),
            Some(INVALID_EMAIL_MESSAGE)
        );
        // Codes are ignored outside card errors
        assert_eq!(
            error_message_for_type_and_code("email_invalid", Some("card_declined")),
            Some(INVALID_EMAIL_MESSAGE)
        );
    }

    #[test]
    fn test_non_friendly_errors() {
        for error_type in [
            "invalid_request_error",
            "api_connection_error",
            "api_error",
            "authentication_error",
            "rate_limit_error",
        ] {
            assert_eq!(
                error_message_for_type_and_code(error_type, Some("expired_card")),
                Some(GENERIC_ERROR_MESSAGE),
                "{error_type}"
            );
        }
    }

    #[test]
    fn test_card_error_codes() {
        assert_eq!(
            error_message_for_type_and_code("card_error", Some("card_declined")),
            Some("The card was declined.")
        );
        assert_eq!(
            error_message_for_type_and_code("card_error", Some("invalid_expiry_year_past")),
            Some("The card expiration year is in the past")
        );
        assert_eq!(
            error_message_for_type_and_code("card_error", Some("incorrect_zip")),
            Some("The card zip code failed validation.")
        );
        assert_eq!(error_message_for_type_and_code("card_error", Some("lost_card")), None);
        assert_eq!(error_message_for_type_and_code("card_error", None), None);
    }

    #[test]
    fn test_validation_and_unknown() {
        assert_eq!(error_message_for_type_and_code("validation_error", None), Some(""));
        assert_eq!(
            error_message_for_type_and_code("validation_error", Some("incomplete_cvc")),
            Some("")
        );
        assert_eq!(error_message_for_type_and_code("idempotency_error", None), None);
        assert_eq!(error_message_for_type_and_code("", None), None);
    }

    #[test]
    fn test_every_card_code_has_message() {
        let codes = [
            "invalid_number",
            "invalid_expiry_month",
            "invalid_expiry_year",
            "invalid_cvc",
            "incorrect_number",
            "incomplete_number",
            "incomplete_cvc",
            "incomplete_expiry",
            "expired_card",
            "incorrect_cvc",
            "incorrect_zip",
            "invalid_expiry_year_past",
            "card_declined",
            "missing",
            "processing_error",
        ];
        for code in codes {
            let message = CardErrorCode::from(code).message();
            assert!(message.is_some_and(|m| !m.is_empty()), "{code}");
        }
    }

    #[test]
    fn test_deserialize_sdk_error() {
        let error: StripeError = serde_json::from_str(
            r#"{ "type": "card_error", "code": "expired_card", "message": "Your card has expired." }"#,
        )
        .unwrap();
        assert_eq!(error.user_message(), Some("The card has expired."));

        let unknown: StripeError =
            serde_json::from_str(r#"{ "type": "brand_new_error", "code": "whatever" }"#).unwrap();
        assert_eq!(unknown.error_type, StripeErrorType::Unknown);
        assert_eq!(unknown.code, Some(CardErrorCode::Unknown));
        assert_eq!(unknown.user_message(), None);

        let untyped: StripeError =
            serde_json::from_str(r#"{ "message": "Something went wrong" }"#).unwrap();
        assert_eq!(untyped.error_type, StripeErrorType::Unknown);
        assert_eq!(untyped.user_message(), None);

        let api = StripeError::new("api_error", None);
        assert_eq!(api.user_message(), Some(GENERIC_ERROR_MESSAGE));
    }
}
