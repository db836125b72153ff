//! # Stripe Settings
//!
//! The settings blob the platform prints into the checkout page.
//! Loading is a single explicit step at the composition root: a missing
//! blob or a missing publishable key is a hard error, never defaulted.

use pay_core::{PaymentError, PaymentResult, RequestOptions};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::debug;

/// Default payment button height in pixels
pub const DEFAULT_BUTTON_HEIGHT: u32 = 48;

/// Default brand treatment for branded buttons
pub const DEFAULT_BRANDED_TYPE: &str = "long";

/// Platform-provided Stripe settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeSettings {
    /// Publishable key (pk_test_... or pk_live_...)
    #[serde(default, alias = "key")]
    pub public_key: Option<String>,

    /// Custom label for the grand total row
    #[serde(default)]
    pub stripe_total_label: Option<String>,

    /// Payment button display preferences
    #[serde(default)]
    pub button: ButtonSettings,

    /// Checkout page context
    #[serde(default)]
    pub checkout: CheckoutSettings,
}

/// Payment button display preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonSettings {
    /// Button type ("default", "buy", "donate", "book", ...)
    #[serde(rename = "type", default = "default_button_type")]
    pub button_type: String,

    /// Button theme ("dark", "light", "light-outline")
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Height in pixels; the platform emits it as a string
    #[serde(default, deserialize_with = "string_or_number")]
    pub height: Option<String>,

    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub is_branded: bool,

    #[serde(default)]
    pub branded_type: Option<String>,

    #[serde(default)]
    pub is_custom: bool,

    #[serde(default)]
    pub css_selector: Option<String>,
}

fn default_button_type() -> String {
    "default".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for ButtonSettings {
    fn default() -> Self {
        Self {
            button_type: default_button_type(),
            theme: default_theme(),
            height: None,
            locale: None,
            is_branded: false,
            branded_type: None,
            is_custom: false,
            css_selector: None,
        }
    }
}

/// How the payment button should be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ButtonRenderMode {
    /// Merchant-styled button matched by a CSS selector
    Custom { css_selector: Option<String> },
    /// Wallet-branded button
    Branded { branded_type: String },
    /// Vendor's generic payment request button
    Default {
        button_type: String,
        theme: String,
        height_px: u32,
    },
}

impl ButtonSettings {
    /// Height in pixels, falling back to the default for blank or invalid values
    pub fn height_px(&self) -> u32 {
        self.height
            .as_deref()
            .and_then(|h| h.trim().trim_end_matches("px").parse::<u32>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(DEFAULT_BUTTON_HEIGHT)
    }

    /// Resolve the display preferences. Custom wins over branded.
    pub fn render_mode(&self) -> ButtonRenderMode {
        if self.is_custom {
            return ButtonRenderMode::Custom {
                css_selector: self.css_selector.clone(),
            };
        }

        if self.is_branded {
            let branded_type = match self.branded_type.as_deref() {
                Some(t) if !t.is_empty() => t.to_string(),
                _ => DEFAULT_BRANDED_TYPE.to_string(),
            };
            return ButtonRenderMode::Branded { branded_type };
        }

        ButtonRenderMode::Default {
            button_type: self.button_type.clone(),
            theme: self.theme.clone(),
            height_px: self.height_px(),
        }
    }
}

/// Checkout page context
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutSettings {
    #[serde(default)]
    pub needs_payer_phone: bool,

    #[serde(default)]
    pub needs_shipping: bool,

    #[serde(default)]
    pub country_code: Option<String>,

    #[serde(default)]
    pub currency_code: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl StripeSettings {
    /// Parse the settings blob. `None` or a blank blob is a hard error.
    pub fn from_json(raw: Option<&str>) -> PaymentResult<Self> {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Err(PaymentError::MissingSettings),
        };
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Parse an already decoded blob. `null` is a hard error.
    pub fn from_value(value: serde_json::Value) -> PaymentResult<Self> {
        if value.is_null() {
            return Err(PaymentError::MissingSettings);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load from a `.json` or `.toml` file
    pub fn from_file(path: impl AsRef<Path>) -> PaymentResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PaymentError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let settings = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| {
                PaymentError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
            })?,
            _ => Self::from_json(Some(&content))?,
        };

        debug!("Loaded Stripe settings from {}", path.display());
        Ok(settings)
    }

    /// Load from environment variables.
    ///
    /// Reads inline JSON from `STRIPE_SETTINGS`, or a file path from
    /// `STRIPE_SETTINGS_FILE`.
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        if let Ok(raw) = env::var("STRIPE_SETTINGS") {
            return Self::from_json(Some(&raw));
        }

        match env::var("STRIPE_SETTINGS_FILE") {
            Ok(path) => Self::from_file(path),
            Err(_) => Err(PaymentError::MissingSettings),
        }
    }

    /// Create settings with an explicit key (for testing)
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            ..Self::default()
        }
    }

    /// Builder: set the total label
    pub fn with_total_label(mut self, label: impl Into<String>) -> Self {
        self.stripe_total_label = Some(label.into());
        self
    }

    /// The publishable key. Absent or blank is a hard error.
    pub fn api_key(&self) -> PaymentResult<&str> {
        match self.public_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(PaymentError::MissingApiKey),
        }
    }

    /// Check the key is present and looks like a publishable key
    pub fn validate(&self) -> PaymentResult<()> {
        let key = self.api_key()?;
        if !key.starts_with("pk_test_") && !key.starts_with("pk_live_") {
            return Err(PaymentError::Configuration(
                "Stripe key must start with pk_test_ or pk_live_".to_string(),
            ));
        }
        Ok(())
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.public_key
            .as_deref()
            .is_some_and(|key| key.starts_with("pk_test_"))
    }

    /// Builder options derived from these settings
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            total_label: self.stripe_total_label.clone(),
            request_payer_phone: self.checkout.needs_payer_phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_blob() {
        assert!(matches!(
            StripeSettings::from_json(None),
            Err(PaymentError::MissingSettings)
        ));
        assert!(matches!(
            StripeSettings::from_json(Some("   ")),
            Err(PaymentError::MissingSettings)
        ));
        assert!(matches!(
            StripeSettings::from_value(serde_json::Value::Null),
            Err(PaymentError::MissingSettings)
        ));
        assert!(matches!(
            StripeSettings::from_json(Some("{ not json")),
            Err(PaymentError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_api_key() {
        let settings = StripeSettings::from_json(Some(r#"{ "stripeTotalLabel": "Shop" }"#)).unwrap();
        assert!(matches!(settings.api_key(), Err(PaymentError::MissingApiKey)));

        let blank = StripeSettings::new("");
        assert!(matches!(blank.api_key(), Err(PaymentError::MissingApiKey)));
        assert!(blank.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_parse_full_blob() {
        let settings = StripeSettings::from_json(Some(
            r#"{
                "publicKey": "pk_test_abc123",
                "stripeTotalLabel": "Acme (via WooCommerce)",
                "button": {
                    "type": "buy",
                    "theme": "light",
                    "height": "56",
                    "is_branded": false,
                    "is_custom": false
                },
                "checkout": { "needs_payer_phone": true, "country_code": "US" }
            }"#,
        ))
        .unwrap();

        assert_eq!(settings.api_key().unwrap(), "pk_test_abc123");
        assert!(settings.validate().is_ok());
        assert!(settings.is_test_mode());
        assert_eq!(settings.button.height_px(), 56);

        let options = settings.request_options();
        assert!(options.request_payer_phone);
        assert_eq!(options.total_label(), "Acme (via WooCommerce)");
    }

    #[test]
    fn test_key_alias_and_format() {
        let settings = StripeSettings::from_json(Some(r#"{ "key": "sk_live_nope" }"#)).unwrap();
        assert_eq!(settings.api_key().unwrap(), "sk_live_nope");
        assert!(matches!(
            settings.validate(),
            Err(PaymentError::Configuration(_))
        ));
        assert!(!settings.is_test_mode());
    }

    #[test]
    fn test_total_label_default() {
        let options = StripeSettings::new("pk_test_x").request_options();
        assert_eq!(options.total_label(), "Total");
        let blank = StripeSettings::new("pk_test_x").with_total_label("").request_options();
        assert_eq!(blank.total_label(), "Total");
    }

    #[test]
    fn test_button_render_mode() {
        let default = ButtonSettings::default();
        assert_eq!(
            default.render_mode(),
            ButtonRenderMode::Default {
                button_type: "default".into(),
                theme: "dark".into(),
                height_px: DEFAULT_BUTTON_HEIGHT,
            }
        );

        let branded = ButtonSettings {
            is_branded: true,
            ..ButtonSettings::default()
        };
        assert_eq!(
            branded.render_mode(),
            ButtonRenderMode::Branded {
                branded_type: "long".into()
            }
        );

        let custom = ButtonSettings {
            is_custom: true,
            is_branded: true,
            css_selector: Some("#pay-button".into()),
            ..ButtonSettings::default()
        };
        assert_eq!(
            custom.render_mode(),
            ButtonRenderMode::Custom {
                css_selector: Some("#pay-button".into())
            }
        );

        let value = serde_json::to_value(ButtonSettings::default().render_mode()).unwrap();
        assert_eq!(value["mode"], "default");
        assert_eq!(value["heightPx"], 48);
    }

    #[test]
    fn test_button_height_parsing() {
        let numeric: ButtonSettings = serde_json::from_str(r#"{ "height": 40 }"#).unwrap();
        assert_eq!(numeric.height_px(), 40);

        let suffixed: ButtonSettings = serde_json::from_str(r#"{ "height": "44px" }"#).unwrap();
        assert_eq!(suffixed.height_px(), 44);

        let junk: ButtonSettings = serde_json::from_str(r#"{ "height": "tall" }"#).unwrap();
        assert_eq!(junk.height_px(), DEFAULT_BUTTON_HEIGHT);
    }

    #[test]
    fn test_from_toml_file() {
        let path = std::env::temp_dir()
            .join(format!("express-checkout-settings-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "publicKey = \"pk_live_123\"\nstripeTotalLabel = \"Shop\"\n\n[button]\ntype = \"donate\"\n",
        )
        .unwrap();

        let settings = StripeSettings::from_file(&path).unwrap();
        assert_eq!(settings.api_key().unwrap(), "pk_live_123");
        assert_eq!(settings.button.button_type, "donate");

        std::fs::remove_file(&path).ok();
    }
}
