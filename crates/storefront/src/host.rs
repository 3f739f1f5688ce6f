//! Host capability surface.
//!
//! The surrounding chat-platform runtime is optional. Two concerns live
//! here: the outbound order channel (the host's send-data primitive,
//! re-expressed as a single webhook POST) and the presentation profile the
//! rendering layer uses to configure the host chrome (viewport, main
//! button, popups). With no host configured, orders fall back to a
//! diagnostic channel and the same profile drives a plain browser session.

use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use apiary_core::LanguageTag;

use crate::catalog::CategoryKey;
use crate::config::HostChannelConfig;
use crate::i18n::{self, Msg};

/// Main action button background, host-themed gold.
pub const MAIN_BUTTON_COLOR: &str = "#FFD700";

/// Main action button text color.
pub const MAIN_BUTTON_TEXT_COLOR: &str = "#000000";

/// Why a dispatch attempt failed.
///
/// Dispatch is fire-and-forget; these errors are logged and captured, never
/// shown to the user.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid channel endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The host answered with a non-success status.
    #[error("host channel returned status {0}")]
    Status(u16),
}

/// The outbound order channel for a deployment.
#[derive(Clone)]
pub enum OrderChannel {
    /// Host present: POST the payload to its send-data endpoint.
    Webhook(WebhookChannel),
    /// No host: surface the payload through the log and still confirm.
    Diagnostic,
}

impl OrderChannel {
    /// Build the channel from optional configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidEndpoint`] when a configured endpoint
    /// does not parse.
    pub fn from_config(config: Option<&HostChannelConfig>) -> Result<Self, ChannelError> {
        match config {
            Some(config) => Ok(Self::Webhook(WebhookChannel::new(config)?)),
            None => Ok(Self::Diagnostic),
        }
    }

    /// One-way dispatch of a serialized order payload.
    ///
    /// No acknowledgement is read and nothing is retried; delivery semantics
    /// belong to the host.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] so the caller can log and capture the
    /// failure; it must never surface it to the user.
    pub async fn send(&self, payload_json: &str) -> Result<(), ChannelError> {
        match self {
            Self::Webhook(webhook) => webhook.send(payload_json).await,
            Self::Diagnostic => {
                tracing::info!(payload = %payload_json, "no host channel configured; order payload logged");
                Ok(())
            }
        }
    }

    /// Whether a real host channel is configured.
    #[must_use]
    pub const fn is_host_backed(&self) -> bool {
        matches!(self, Self::Webhook(_))
    }
}

/// HTTP client for the host's send-data endpoint.
#[derive(Clone)]
pub struct WebhookChannel {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<SecretString>,
}

impl WebhookChannel {
    fn new(config: &HostChannelConfig) -> Result<Self, ChannelError> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: Url::parse(&config.endpoint)?,
            token: config.token.clone(),
        })
    }

    async fn send(&self, payload_json: &str) -> Result<(), ChannelError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload_json.to_owned());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// Location capture parameters published to the rendering layer, which
/// passes them to the sensor API verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationParams {
    /// Hard bound on one acquisition attempt.
    pub timeout_ms: u64,
    /// Request the precise position from the sensor.
    pub high_accuracy: bool,
}

/// Main action button configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MainButton {
    /// Background color.
    pub color: &'static str,
    /// Label text color.
    pub text_color: &'static str,
    /// Localized label.
    pub label: &'static str,
}

/// Everything the rendering layer needs to set up the host chrome.
#[derive(Debug, Clone, Serialize)]
pub struct HostProfile {
    /// Resolved session language.
    pub language: &'static str,
    /// Ask the host to expand the viewport on open.
    pub expand_viewport: bool,
    /// Main action button configuration.
    pub main_button: MainButton,
    /// Localized currency word for client-side labels.
    pub currency_word: &'static str,
    /// Category tab keys, in tab order.
    pub categories: [&'static str; 4],
    /// Sensor parameters for location capture.
    pub location: LocationParams,
}

/// Build the profile for a resolved session.
#[must_use]
pub fn profile(lang: LanguageTag, location_timeout_ms: u64) -> HostProfile {
    HostProfile {
        language: lang.as_str(),
        expand_viewport: true,
        main_button: MainButton {
            color: MAIN_BUTTON_COLOR,
            text_color: MAIN_BUTTON_TEXT_COLOR,
            label: i18n::text(lang, Msg::CheckoutLabel),
        },
        currency_word: i18n::text(lang, Msg::CurrencyWord),
        categories: CategoryKey::KEYS,
        location: LocationParams {
            timeout_ms: location_timeout_ms,
            high_accuracy: true,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_selects_the_diagnostic_fallback() {
        let channel = OrderChannel::from_config(None).unwrap();
        assert!(!channel.is_host_backed());
    }

    #[tokio::test]
    async fn diagnostic_channel_always_accepts() {
        let channel = OrderChannel::from_config(None).unwrap();
        assert!(channel.send("{\"items\":[]}").await.is_ok());
    }

    #[test]
    fn invalid_endpoint_is_rejected_at_construction() {
        let config = HostChannelConfig {
            endpoint: "not a url".to_owned(),
            token: None,
        };
        assert!(matches!(
            OrderChannel::from_config(Some(&config)),
            Err(ChannelError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn profile_is_localized() {
        let uz = profile(LanguageTag::Uz, 10_000);
        assert_eq!(uz.language, "uz");
        assert_eq!(uz.main_button.label, "Checkout");
        assert_eq!(uz.currency_word, "so'm");
        assert_eq!(uz.main_button.color, "#FFD700");

        let ru = profile(LanguageTag::Ru, 10_000);
        assert_eq!(ru.main_button.label, "Оформить");
        assert_eq!(ru.currency_word, "сум");
        assert_eq!(ru.categories, ["all", "tog", "akatsiya", "other"]);
        assert!(ru.location.high_accuracy);
        assert_eq!(ru.location.timeout_ms, 10_000);
    }
}
