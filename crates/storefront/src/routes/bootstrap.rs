//! Session bootstrap route handler.
//!
//! The first call of a mini-app open: resolves the session language from the
//! explicit query override, the host-provided user language hint and the
//! configured default, pins it for the session, and returns the host profile
//! the rendering layer uses to configure viewport, main button and sensors.

use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::host::{self, HostProfile};
use crate::i18n;
use crate::session;
use crate::state::AppState;

/// Header carrying the host's user-language hint, forwarded by the page.
pub const USER_LANGUAGE_HEADER: &str = "x-user-language";

/// Bootstrap query parameters.
#[derive(Debug, Deserialize)]
pub struct BootstrapQuery {
    /// Explicit language override, takes precedence over the host hint.
    pub lang: Option<String>,
}

/// Resolve the session and return the host profile.
#[instrument(skip(state, session, headers))]
pub async fn bootstrap(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(query): Query<BootstrapQuery>,
) -> Result<Json<HostProfile>> {
    let hint = headers
        .get(USER_LANGUAGE_HEADER)
        .and_then(|value| value.to_str().ok());
    let lang = i18n::resolve(query.lang.as_deref(), hint, state.config().default_lang);
    session::set_language(&session, lang).await?;
    tracing::debug!(lang = %lang, "session bootstrapped");

    Ok(Json(host::profile(lang, state.config().location_timeout_ms)))
}
