//! Order route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use apiary_core::ContactDetails;

use crate::error::{AppError, Result};
use crate::i18n::{self, Msg};
use crate::order;
use crate::routes::active_language;
use crate::session;
use crate::state::AppState;

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    /// Customer name.
    pub name: String,
    /// Customer phone.
    pub phone: String,
    /// Delivery address; may be empty when a captured location covers it.
    #[serde(default)]
    pub address: String,
}

/// Confirmation shown after a successful dispatch.
#[derive(Debug, Serialize)]
pub struct OrderConfirmation {
    /// Localized confirmation text.
    pub message: String,
    /// Whether a real host channel carried the payload (false means the
    /// diagnostic fallback was used).
    pub dispatched_via_host: bool,
}

/// Validate the session's cart and the form, then dispatch the order
/// fire-and-forget.
///
/// The cart and the captured location are left untouched either way: a
/// rejected submission is corrected and resubmitted, and a dispatched one is
/// discarded together with the whole session by the host.
#[instrument(skip(state, session, form), fields(name_len = form.name.len()))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<OrderForm>,
) -> Result<Json<OrderConfirmation>> {
    let lang = active_language(&state, &session).await?;
    let cart = session::cart(&session).await?;
    let location = session::location(&session).await?;

    let contact = ContactDetails {
        name: form.name,
        phone: form.phone,
        address: form.address,
    };

    let payload = order::submit(&cart, &contact, location, state.channel())
        .map_err(|source| AppError::Validation { source, lang })?;
    tracing::info!(
        items = payload.items.len(),
        with_location = payload.location().is_some(),
        "order dispatched"
    );

    Ok(Json(OrderConfirmation {
        message: i18n::text(lang, Msg::OrderAccepted).to_owned(),
        dispatched_via_host: state.channel().is_host_backed(),
    }))
}
