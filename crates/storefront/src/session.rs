//! Per-session state storage.
//!
//! One session owns exactly one cart ledger, one resolved language and at
//! most one captured location. The store is in-memory on purpose: cart state
//! does not persist across reloads, and the host discarding the session is
//! the only thing that clears it.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use apiary_core::{Coordinates, LanguageTag};

use crate::cart::CartLedger;
use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "apiary_session";

/// Session expiry time in seconds (1 day of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Session keys for per-session state.
pub mod keys {
    /// Key for the pinned session language.
    pub const LANGUAGE: &str = "language";

    /// Key for the cart ledger.
    pub const CART: &str = "cart";

    /// Key for the captured location.
    pub const LOCATION: &str = "location";
}

/// Create the session layer with the in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Secure cookies only when served over HTTPS
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// The language pinned at bootstrap, if the session has been through one.
///
/// # Errors
///
/// Propagates the session store error.
pub async fn language(session: &Session) -> Result<Option<LanguageTag>, tower_sessions::session::Error> {
    session.get::<LanguageTag>(keys::LANGUAGE).await
}

/// Pin the resolved language for this session.
///
/// # Errors
///
/// Propagates the session store error.
pub async fn set_language(
    session: &Session,
    lang: LanguageTag,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::LANGUAGE, lang).await
}

/// The session's cart ledger, created empty on first access.
///
/// # Errors
///
/// Propagates the session store error.
pub async fn cart(session: &Session) -> Result<CartLedger, tower_sessions::session::Error> {
    Ok(session
        .get::<CartLedger>(keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the mutated cart ledger back into the session.
///
/// # Errors
///
/// Propagates the session store error.
pub async fn set_cart(
    session: &Session,
    cart: &CartLedger,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// The captured location, if any.
///
/// # Errors
///
/// Propagates the session store error.
pub async fn location(
    session: &Session,
) -> Result<Option<Coordinates>, tower_sessions::session::Error> {
    session.get::<Coordinates>(keys::LOCATION).await
}

/// Store a captured location for attachment to the order.
///
/// # Errors
///
/// Propagates the session store error.
pub async fn set_location(
    session: &Session,
    coords: Coordinates,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::LOCATION, coords).await
}
