//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `APIARY_CATALOG_URL` - Upstream catalog endpoint (e.g. `https://api.example.com/api/products`)
//!
//! ## Optional
//! - `APIARY_HOST` - Bind address (default: 127.0.0.1)
//! - `APIARY_PORT` - Listen port (default: 8080)
//! - `APIARY_BASE_URL` - Public URL for the storefront (default: http://127.0.0.1:8080)
//! - `APIARY_STATIC_PREFIX` - URL prefix for static assets (default: /webapp)
//! - `APIARY_STATIC_DIR` - Directory served under the static prefix (default: webapp)
//! - `APIARY_DEFAULT_LANG` - Session language fallback, `uz` or `ru` (default: uz)
//! - `APIARY_PLACEHOLDER_IMAGES` - Comma-separated stock image URLs for the
//!   card fallback rotation (default: the built-in honey set)
//! - `APIARY_LOCATION_TIMEOUT_MS` - Bound on one geolocation attempt (default: 10000)
//! - `APIARY_HOST_CHANNEL_URL` - Host send-data endpoint; orders are logged
//!   instead when unset
//! - `APIARY_HOST_CHANNEL_TOKEN` - Bearer token for the host channel
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use apiary_core::LanguageTag;

/// Stock placeholder images for the card fallback rotation.
const DEFAULT_PLACEHOLDER_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1587049352846-4a222e784d38?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1555421689-491a97ff2040?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1587049548423-4213d2f0ffae?auto=format&fit=crop&w=400&q=80",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Upstream catalog endpoint
    pub catalog_url: String,
    /// URL prefix for static assets, also used in image projections
    pub static_prefix: String,
    /// Directory served under the static prefix
    pub static_dir: PathBuf,
    /// Session language fallback
    pub default_lang: LanguageTag,
    /// Stock placeholder images for the card fallback rotation
    pub placeholder_images: Vec<String>,
    /// Bound on one geolocation attempt, in milliseconds
    pub location_timeout_ms: u64,
    /// Host outbound channel; orders are logged instead when unset
    pub host_channel: Option<HostChannelConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Host send-data endpoint configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct HostChannelConfig {
    /// Endpoint receiving the JSON order payload
    pub endpoint: String,
    /// Optional bearer token
    pub token: Option<SecretString>,
}

impl std::fmt::Debug for HostChannelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostChannelConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("APIARY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("APIARY_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("APIARY_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("APIARY_PORT".to_owned(), e.to_string()))?;
        let base_url = get_env_or_default("APIARY_BASE_URL", "http://127.0.0.1:8080");
        let catalog_url = get_required_env("APIARY_CATALOG_URL")?;
        let static_prefix = get_env_or_default("APIARY_STATIC_PREFIX", "/webapp");
        let static_dir = PathBuf::from(get_env_or_default("APIARY_STATIC_DIR", "webapp"));
        let default_lang = parse_lang("APIARY_DEFAULT_LANG", &get_env_or_default("APIARY_DEFAULT_LANG", "uz"))?;
        let placeholder_images = get_optional_env("APIARY_PLACEHOLDER_IMAGES")
            .map_or_else(default_placeholders, |raw| parse_placeholders(&raw));
        let location_timeout_ms = get_env_or_default("APIARY_LOCATION_TIMEOUT_MS", "10000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("APIARY_LOCATION_TIMEOUT_MS".to_owned(), e.to_string())
            })?;
        let host_channel = get_optional_env("APIARY_HOST_CHANNEL_URL").map(|endpoint| {
            HostChannelConfig {
                endpoint,
                token: get_optional_env("APIARY_HOST_CHANNEL_TOKEN").map(SecretString::from),
            }
        });
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            catalog_url,
            static_prefix,
            static_dir,
            default_lang,
            placeholder_images,
            location_timeout_ms,
            host_channel,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// The built-in placeholder set.
fn default_placeholders() -> Vec<String> {
    DEFAULT_PLACEHOLDER_IMAGES
        .iter()
        .map(|&url| url.to_owned())
        .collect()
}

/// Parse a comma-separated placeholder list, dropping empty segments.
fn parse_placeholders(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parse a language tag env value.
fn parse_lang(key: &str, raw: &str) -> Result<LanguageTag, ConfigError> {
    LanguageTag::parse(raw).ok_or_else(|| {
        ConfigError::InvalidEnvVar(key.to_owned(), format!("unknown language tag: {raw}"))
    })
}
