//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::text::LocalizedText;

/// A product as held by the catalog store, read-only after load.
///
/// The identifier is immutable and is the sole join key to cart entries.
/// Wire-format concerns (field aliases, price precedence) live in the
/// storefront's catalog client, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: ProductId,
    /// Product name pair.
    pub name: LocalizedText,
    /// Short description pair, shown on the card.
    pub description_short: LocalizedText,
    /// Full description pair, shown in the info popup.
    pub description_full: LocalizedText,
    /// Unit price per kilogram.
    pub price: Price,
    /// Optional remote image reference carried from upstream.
    pub photo_url: Option<String>,
}
