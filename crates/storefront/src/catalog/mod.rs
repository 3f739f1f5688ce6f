//! Catalog store and projection inputs.
//!
//! The product list is fetched once at startup and is read-only afterwards;
//! a failed load leaves the store unavailable (surfaced as a visible error,
//! never an empty catalog) until an explicit reload attempt.

mod client;
pub mod filter;

pub use client::{CatalogClient, CatalogError, ProductRecord, convert_product};
pub use filter::{CategoryKey, filter};

use std::sync::Arc;

use tokio::sync::RwLock;

use apiary_core::{Product, ProductId};

enum CatalogState {
    Ready(Arc<[Product]>),
    Unavailable,
}

/// Session-wide holder of the fetched product list.
///
/// Cheap to share: readers take an `Arc` snapshot and never observe a
/// half-loaded list. The store itself performs no retries; every `load` call
/// is one attempt driven by startup or an explicit user action.
pub struct CatalogStore {
    client: CatalogClient,
    state: RwLock<CatalogState>,
}

impl CatalogStore {
    /// Create an empty (unavailable) store backed by the given client.
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            state: RwLock::new(CatalogState::Unavailable),
        }
    }

    /// Perform one load attempt, replacing the current state with the result.
    ///
    /// Returns the number of loaded products.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`CatalogError`]; the store is left unavailable.
    pub async fn load(&self) -> Result<usize, CatalogError> {
        match self.client.fetch().await {
            Ok(products) => {
                let count = products.len();
                *self.state.write().await = CatalogState::Ready(Arc::from(products));
                tracing::info!(count, "catalog loaded");
                Ok(count)
            }
            Err(e) => {
                *self.state.write().await = CatalogState::Unavailable;
                tracing::error!(error = %e, "catalog load failed");
                Err(e)
            }
        }
    }

    /// A read-only snapshot of the loaded list, or `None` while unavailable.
    pub async fn snapshot(&self) -> Option<Arc<[Product]>> {
        match &*self.state.read().await {
            CatalogState::Ready(products) => Some(Arc::clone(products)),
            CatalogState::Unavailable => None,
        }
    }

    /// Look up a single product by id.
    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        self.snapshot()
            .await?
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }
}
