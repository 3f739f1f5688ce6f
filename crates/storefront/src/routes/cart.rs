//! Cart route handlers.
//!
//! Handlers load the session ledger, apply exactly one state transition and
//! store it back; the view is a pure projection of the result. Rows are only
//! built for entries that resolve in the catalog, but the badge count always
//! reflects the full ledger.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use apiary_core::{LanguageTag, Product, ProductId};

use crate::cart::CartLedger;
use crate::error::Result;
use crate::projection::Projector;
use crate::routes::active_language;
use crate::session;
use crate::state::AppState;

/// Add-one form data.
#[derive(Debug, Deserialize)]
pub struct IncrementForm {
    /// Product to add.
    pub product_id: String,
}

/// Stepper form data.
#[derive(Debug, Deserialize)]
pub struct AdjustForm {
    /// Product to change.
    pub product_id: String,
    /// Signed quantity change; `-1`/`+1` from the stepper controls.
    pub delta: i32,
}

/// Cart count badge fragment.
#[derive(Debug, Serialize)]
pub struct CartBadge {
    /// Sum of all quantities.
    pub item_count: u64,
}

/// One cart row for display.
#[derive(Debug, Serialize)]
pub struct CartRow {
    /// Catalog join key, echoed for the stepper controls.
    pub product_id: String,
    /// Localized product name.
    pub title: String,
    /// Current quantity.
    pub quantity: u32,
    /// Grouped unit price, no currency word.
    pub unit_price_label: String,
    /// Grouped line total, no currency word.
    pub line_total_label: String,
}

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    /// Rows for entries that resolve in the catalog, insertion order.
    pub rows: Vec<CartRow>,
    /// Sum of all quantities, including unresolvable entries.
    pub item_count: u64,
    /// Number of distinct products.
    pub distinct_count: usize,
    /// Grouped total plus the localized currency word.
    pub total_label: String,
}

fn build_view(cart: &CartLedger, catalog: &[Product], lang: LanguageTag, state: &AppState) -> CartView {
    let config = state.config();
    let projector = Projector::new(lang, &config.static_prefix, &config.placeholder_images);

    let rows = cart
        .entries()
        .filter_map(|entry| {
            catalog
                .iter()
                .find(|p| p.id == entry.product_id)
                .map(|product| CartRow {
                    product_id: entry.product_id.to_string(),
                    title: product.name.pick(lang).to_owned(),
                    quantity: entry.quantity,
                    unit_price_label: product.price.grouped(),
                    line_total_label: (product.price * entry.quantity).grouped(),
                })
        })
        .collect();

    CartView {
        rows,
        item_count: cart.item_count(),
        distinct_count: cart.len(),
        total_label: projector.price_label(cart.total(catalog)),
    }
}

async fn view_response(state: &AppState, session: &Session, cart: &CartLedger) -> Result<Json<CartView>> {
    let lang = active_language(state, session).await?;
    let snapshot = state.catalog().snapshot().await;
    let catalog: &[Product] = snapshot.as_deref().unwrap_or(&[]);
    Ok(Json(build_view(cart, catalog, lang, state)))
}

/// Display the cart.
#[instrument(skip(state, session))]
pub async fn view(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = session::cart(&session).await?;
    view_response(&state, &session, &cart).await
}

/// Add one unit of a product; returns the badge fragment.
#[instrument(skip(session))]
pub async fn increment(
    session: Session,
    Json(form): Json<IncrementForm>,
) -> Result<Json<CartBadge>> {
    let mut cart = session::cart(&session).await?;
    let id = ProductId::new(form.product_id);
    let quantity = cart.increment(&id);
    session::set_cart(&session, &cart).await?;
    tracing::debug!(product_id = %id, quantity, "cart increment");

    Ok(Json(CartBadge {
        item_count: cart.item_count(),
    }))
}

/// Apply a signed quantity change; returns the re-rendered cart view.
#[instrument(skip(state, session))]
pub async fn adjust(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AdjustForm>,
) -> Result<Json<CartView>> {
    let mut cart = session::cart(&session).await?;
    let id = ProductId::new(form.product_id);
    let remaining = cart.adjust(&id, form.delta);
    session::set_cart(&session, &cart).await?;
    tracing::debug!(product_id = %id, delta = form.delta, ?remaining, "cart adjust");

    view_response(&state, &session, &cart).await
}
