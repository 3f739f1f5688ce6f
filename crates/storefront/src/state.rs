//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{CatalogClient, CatalogError, CatalogStore};
use crate::config::StorefrontConfig;
use crate::host::{ChannelError, OrderChannel};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog client: {0}")]
    Catalog(#[from] CatalogError),
    #[error("host channel: {0}")]
    Channel(#[from] ChannelError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration, the catalog store
/// and the outbound order channel. Per-session state lives in the session
/// layer, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
    channel: OrderChannel,
}

impl AppState {
    /// Create a new application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog endpoint or the host channel
    /// endpoint does not parse.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = CatalogStore::new(CatalogClient::new(&config.catalog_url)?);
        let channel = OrderChannel::from_config(config.host_channel.as_ref())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                channel,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Get a reference to the outbound order channel.
    #[must_use]
    pub fn channel(&self) -> &OrderChannel {
        &self.inner.channel
    }
}
