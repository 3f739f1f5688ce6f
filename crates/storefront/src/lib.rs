//! Apiary Storefront - mini-app session engine.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested end-to-end and reused by the binary.
//!
//! The engine owns the cart/order state machine and the localization-aware
//! catalog projection; the mini-app page that renders inside the chat host is
//! a thin consumer of the JSON records produced here and owns no business
//! logic.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod i18n;
pub mod location;
pub mod order;
pub mod projection;
pub mod routes;
pub mod session;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router, including the session layer and the
/// static asset service for the configured prefix.
#[must_use]
pub fn app(state: AppState) -> Router {
    let static_prefix = state.config().static_prefix.clone();
    let static_dir = state.config().static_dir.clone();
    let session_layer = session::create_session_layer(state.config());

    Router::new()
        .merge(routes::routes())
        .nest_service(&static_prefix, ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
