//! HTTP route handlers for the storefront engine.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog loaded)
//!
//! # Session
//! GET  /api/bootstrap          - Resolve and pin the session language,
//!                                return the host profile
//!
//! # Catalog
//! GET  /api/catalog            - Projected product cards (?cat=all|tog|akatsiya|other)
//! GET  /api/catalog/{id}       - Product info popup record
//! POST /api/catalog/reload     - One new load attempt
//!
//! # Cart
//! GET  /api/cart               - Cart view (rows, counts, total)
//! POST /api/cart/increment     - Add one unit of a product
//! POST /api/cart/adjust        - Signed quantity change (stepper controls)
//!
//! # Checkout
//! POST /api/location           - Record a client-side capture result
//! POST /api/order              - Validate and dispatch the order
//! ```

pub mod bootstrap;
pub mod cart;
pub mod catalog;
pub mod location;
pub mod order;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_sessions::Session;

use apiary_core::LanguageTag;

use crate::error::AppError;
use crate::session;
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list))
        .route("/reload", post(catalog::reload))
        .route("/{id}", get(catalog::info))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::view))
        .route("/increment", post(cart::increment))
        .route("/adjust", post(cart::adjust))
}

/// Create all routes for the storefront engine.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/api/bootstrap", get(bootstrap::bootstrap))
        .nest("/api/catalog", catalog_routes())
        .nest("/api/cart", cart_routes())
        .route("/api/location", post(location::capture))
        .route("/api/order", post(order::submit))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Reports 503 while the catalog is unavailable. The app still serves its
/// error states in that condition; this only feeds deployment tooling.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().snapshot().await.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// The language pinned at bootstrap, falling back to the configured default
/// for sessions that never went through one.
pub(crate) async fn active_language(
    state: &AppState,
    session: &Session,
) -> Result<LanguageTag, AppError> {
    Ok(session::language(session)
        .await?
        .unwrap_or(state.config().default_lang))
}
