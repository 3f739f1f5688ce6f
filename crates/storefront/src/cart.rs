//! The cart ledger: quantity-by-product state machine.
//!
//! One ledger per session, mutated only by [`CartLedger::increment`] and
//! [`CartLedger::adjust`] in the order the user actions arrive. Entries keep
//! insertion order: removing and re-adding a product moves it to the end.
//! Quantities are always >= 1; an entry that would reach zero is removed,
//! never stored.

use serde::{Deserialize, Serialize};

use apiary_core::{OrderItem, Price, Product, ProductId};

/// One ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Catalog join key.
    pub product_id: ProductId,
    /// Current quantity, >= 1.
    pub quantity: u32,
}

/// Insertion-ordered mapping from product id to quantity.
///
/// Serializable so it can live in the session store; exclusively owned by one
/// session, so no synchronization is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLedger {
    entries: Vec<CartEntry>,
}

impl CartLedger {
    /// Create an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one unit of a product, creating the entry at 1 if absent.
    ///
    /// There is no upper bound; this always succeeds. Returns the new
    /// quantity for the id.
    pub fn increment(&mut self, id: &ProductId) -> u32 {
        if let Some(entry) = self.entries.iter_mut().find(|e| &e.product_id == id) {
            entry.quantity = entry.quantity.saturating_add(1);
            return entry.quantity;
        }
        self.entries.push(CartEntry {
            product_id: id.clone(),
            quantity: 1,
        });
        1
    }

    /// Apply a signed quantity change; the single operation behind both
    /// stepper controls.
    ///
    /// A result of zero or less removes the entry entirely. Returns the
    /// remaining quantity, or `None` when the entry is gone (including the
    /// no-op case of a negative delta on an absent id).
    pub fn adjust(&mut self, id: &ProductId, delta: i32) -> Option<u32> {
        let current = self.quantity(id);
        let next = i64::from(current) + i64::from(delta);
        if next <= 0 {
            self.entries.retain(|e| &e.product_id != id);
            return None;
        }
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        match self.entries.iter_mut().find(|e| &e.product_id == id) {
            Some(entry) => entry.quantity = next,
            None => self.entries.push(CartEntry {
                product_id: id.clone(),
                quantity: next,
            }),
        }
        Some(next)
    }

    /// Current quantity for an id, 0 when absent.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.entries
            .iter()
            .find(|e| &e.product_id == id)
            .map_or(0, |e| e.quantity)
    }

    /// Total item count: the sum of all quantities, not the number of
    /// distinct products.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total price over entries that resolve in the catalog.
    ///
    /// Entries referencing unknown ids contribute 0; they are silently
    /// skipped rather than treated as errors, since entries originate from
    /// catalog-sourced ids.
    #[must_use]
    pub fn total(&self, catalog: &[Product]) -> Price {
        self.entries
            .iter()
            .map(|entry| {
                catalog
                    .iter()
                    .find(|p| p.id == entry.product_id)
                    .map_or(Price::ZERO, |p| p.price * entry.quantity)
            })
            .sum()
    }

    /// Snapshot for order submission, in insertion order of the
    /// currently-present keys.
    #[must_use]
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.entries
            .iter()
            .map(|e| OrderItem {
                id: e.product_id.clone(),
                qty: e.quantity,
            })
            .collect()
    }

    /// Iterate the live entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }
}
