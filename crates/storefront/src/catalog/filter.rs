//! Category filtering over the loaded catalog.
//!
//! The catalog carries no structured category field; classification is
//! name-substring matching on the lowercased primary-language name. This is
//! an inherited data-quality heuristic: a product whose name coincidentally
//! contains a token lands in that bucket. The behavior is preserved as-is
//! rather than silently replaced with a schema change.

use apiary_core::Product;

/// Diacritic variants of the mountain-honey token.
const MOUNTAIN_TOKENS: [&str; 3] = ["tog", "tog'", "tog\u{2018}"];

/// The acacia-honey token.
const ACACIA_TOKEN: &str = "akatsiya";

/// The closed set of category tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKey {
    /// No filtering.
    All,
    /// Mountain honey: name contains a `tog` variant.
    Mountain,
    /// Acacia honey: name contains `akatsiya`.
    Acacia,
    /// Everything matching neither token set.
    Other,
}

impl CategoryKey {
    /// The presentation keys, in tab order.
    pub const KEYS: [&'static str; 4] = ["all", "tog", "akatsiya", "other"];

    /// Parse a presentation key; anything unrecognized selects the default
    /// bucket.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        match key {
            "all" => Self::All,
            "tog" => Self::Mountain,
            "akatsiya" => Self::Acacia,
            _ => Self::Other,
        }
    }

    /// The presentation key for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Mountain => "tog",
            Self::Acacia => "akatsiya",
            Self::Other => "other",
        }
    }
}

fn is_mountain(name: &str) -> bool {
    MOUNTAIN_TOKENS.iter().any(|token| name.contains(token))
}

fn is_acacia(name: &str) -> bool {
    name.contains(ACACIA_TOKEN)
}

/// Project the visible subset for a category tab.
///
/// Catalog order is preserved; nothing is sorted. `All` is the identity in
/// both content and order.
#[must_use]
pub fn filter(catalog: &[Product], key: CategoryKey) -> Vec<&Product> {
    catalog
        .iter()
        .filter(|product| {
            let name = product.name.uz.to_lowercase();
            match key {
                CategoryKey::All => true,
                CategoryKey::Mountain => is_mountain(&name),
                CategoryKey::Acacia => is_acacia(&name),
                CategoryKey::Other => !is_mountain(&name) && !is_acacia(&name),
            }
        })
        .collect()
}
