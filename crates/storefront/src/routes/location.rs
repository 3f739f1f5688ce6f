//! Location route handler.
//!
//! The browser owns the geolocation sensor; this handler receives the
//! outcome of one client-side acquisition attempt, runs it through the
//! engine's capture policy and stores the coordinates for the order. Failure
//! is always soft: the response carries the localized fallback text and
//! checkout continues with manual address entry.

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use apiary_core::Coordinates;

use crate::error::Result;
use crate::i18n::{self, Msg};
use crate::location::{self, LocationError};
use crate::routes::active_language;
use crate::session;
use crate::state::AppState;

/// Client-reported acquisition result.
#[derive(Debug, Deserialize)]
pub struct LocationReport {
    /// Acquired latitude, present together with `lon` on success.
    pub lat: Option<f64>,
    /// Acquired longitude, present together with `lat` on success.
    pub lon: Option<f64>,
    /// Sensor error description on failure.
    #[serde(default)]
    pub error: Option<String>,
    /// Current content of the address field, used for the auto-fill rule.
    #[serde(default)]
    pub address: String,
}

/// Capture response.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    /// Whether coordinates were captured and stored.
    pub captured: bool,
    /// Stored latitude.
    pub lat: Option<f64>,
    /// Stored longitude.
    pub lon: Option<f64>,
    /// Auto-fill text for the address field; only set when that field was
    /// empty, so user-entered text is never overwritten.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_suggestion: Option<String>,
    /// Localized soft-failure text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Record one capture attempt.
#[instrument(skip(state, session, report))]
pub async fn capture(
    State(state): State<AppState>,
    session: Session,
    Json(report): Json<LocationReport>,
) -> Result<Json<LocationResponse>> {
    let lang = active_language(&state, &session).await?;
    let LocationReport {
        lat,
        lon,
        error,
        address,
    } = report;

    let timeout = Duration::from_millis(state.config().location_timeout_ms);
    let acquisition = async move {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocationError::Unavailable(
                error.unwrap_or_else(|| "no position in report".to_owned()),
            )),
        }
    };

    match location::capture(acquisition, timeout).await {
        Some(coords) => {
            session::set_location(&session, coords).await?;
            Ok(Json(LocationResponse {
                captured: true,
                lat: Some(coords.lat),
                lon: Some(coords.lon),
                address_suggestion: location::suggest_address(coords, &address, lang),
                notice: None,
            }))
        }
        None => Ok(Json(LocationResponse {
            captured: false,
            lat: None,
            lon: None,
            address_suggestion: None,
            notice: Some(i18n::text(lang, Msg::LocationFailed).to_owned()),
        })),
    }
}
