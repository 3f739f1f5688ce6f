//! Catalog route handlers.
//!
//! An unavailable catalog is surfaced as a visible, localized error state,
//! never as an empty list; the reload handler is the single explicit retry
//! path.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use apiary_core::ProductId;

use crate::catalog::{CategoryKey, filter};
use crate::error::{AppError, Result};
use crate::i18n::{self, Msg};
use crate::projection::{ProductCard, ProductInfo, Projector};
use crate::routes::active_language;
use crate::state::AppState;

/// Catalog listing query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Category tab key; missing means `all`.
    pub cat: Option<String>,
}

/// Catalog listing response.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Projected cards in catalog order.
    pub items: Vec<ProductCard>,
    /// Localized notice when the visible subset is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Reload response.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    /// Number of products now loaded.
    pub loaded: usize,
}

/// Projected product cards for one category tab.
#[instrument(skip(state, session))]
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<CatalogResponse>> {
    let lang = active_language(&state, &session).await?;
    let snapshot = state
        .catalog()
        .snapshot()
        .await
        .ok_or(AppError::CatalogUnavailable { lang })?;

    let key = CategoryKey::parse(query.cat.as_deref().unwrap_or("all"));
    let visible = filter(&snapshot, key);

    let config = state.config();
    let projector = Projector::new(lang, &config.static_prefix, &config.placeholder_images);
    let items: Vec<ProductCard> = visible
        .iter()
        .enumerate()
        .map(|(index, product)| projector.card(product, index))
        .collect();

    let notice = items
        .is_empty()
        .then(|| i18n::text(lang, Msg::NoProducts).to_owned());

    Ok(Json(CatalogResponse { items, notice }))
}

/// Info popup record for one product.
#[instrument(skip(state, session))]
pub async fn info(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<ProductInfo>> {
    let lang = active_language(&state, &session).await?;
    let snapshot = state
        .catalog()
        .snapshot()
        .await
        .ok_or(AppError::CatalogUnavailable { lang })?;

    let id = ProductId::new(id);
    let product = snapshot
        .iter()
        .find(|p| p.id == id)
        .ok_or(AppError::UnknownProduct { lang })?;

    let config = state.config();
    let projector = Projector::new(lang, &config.static_prefix, &config.placeholder_images);
    Ok(Json(projector.info(product)))
}

/// One new load attempt, driven by an explicit user action.
#[instrument(skip(state, session))]
pub async fn reload(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ReloadResponse>> {
    let lang = active_language(&state, &session).await?;
    match state.catalog().load().await {
        Ok(loaded) => Ok(Json(ReloadResponse { loaded })),
        Err(_) => Err(AppError::CatalogUnavailable { lang }),
    }
}
