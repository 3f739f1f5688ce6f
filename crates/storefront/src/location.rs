//! One-shot location capture.
//!
//! The geolocation sensor lives at the client boundary; the engine owns the
//! policy around it: a single bounded attempt per button press, soft failure
//! (never an error that blocks checkout) and the address auto-fill rule that
//! never overwrites user-entered text.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use apiary_core::{Coordinates, LanguageTag};

use crate::i18n::{self, Msg};

/// Why an acquisition attempt produced no coordinates.
///
/// Every case degrades to manual address entry; none is ever surfaced as a
/// hard error.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The user denied the permission prompt.
    #[error("permission denied")]
    Denied,
    /// The sensor reported no usable position.
    #[error("position unavailable: {0}")]
    Unavailable(String),
    /// The environment exposes no geolocation capability at all.
    #[error("unsupported environment")]
    Unsupported,
}

/// Run one acquisition attempt, bounded by the configured timeout.
///
/// Resolves to `None` on denial, sensor failure or timeout; the caller shows
/// the localized soft-failure text and checkout proceeds with manual entry.
pub async fn capture<F>(acquisition: F, timeout: Duration) -> Option<Coordinates>
where
    F: Future<Output = Result<Coordinates, LocationError>>,
{
    match tokio::time::timeout(timeout, acquisition).await {
        Ok(Ok(coords)) => Some(coords),
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "location capture failed");
            None
        }
        Err(_) => {
            tracing::debug!(?timeout, "location capture timed out");
            None
        }
    }
}

/// Auto-fill text for the address field, only when that field is empty.
///
/// User-entered text is never overwritten: any non-whitespace current value
/// suppresses the suggestion.
#[must_use]
pub fn suggest_address(
    coords: Coordinates,
    current_address: &str,
    lang: LanguageTag,
) -> Option<String> {
    if !current_address.trim().is_empty() {
        return None;
    }
    Some(format!(
        "{}: {:.5}, {:.5}",
        i18n::text(lang, Msg::LocationPrefix),
        coords.lat,
        coords.lon
    ))
}
