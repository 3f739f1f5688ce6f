//! Localized, display-ready product projections.
//!
//! A [`Projector`] fixes one render pass: the active language, the static
//! prefix, the placeholder set and a single cache-busting timestamp. The
//! rendering layer consumes the produced records as-is and owns no business
//! logic.

use chrono::Utc;
use serde::Serialize;

use apiary_core::{LanguageTag, Price, Product};

use crate::i18n::{self, Msg};

/// Display record for one catalog card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    /// Catalog join key, echoed for cart actions.
    pub id: String,
    /// Localized product name.
    pub title: String,
    /// Localized short description; falls back to the alternate-language
    /// name when empty.
    pub description: String,
    /// Grouped price plus the localized currency word.
    pub price_label: String,
    /// Session-local image reference with a cache-busting parameter.
    ///
    /// Whether the image exists is unknown here; the rendering layer wires
    /// `image_fallback` to the load-failure path instead of pre-checking.
    pub image: String,
    /// Deterministic stock placeholder for this card position.
    pub image_fallback: Option<String>,
}

/// Display record for the product info popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductInfo {
    /// Localized product name.
    pub title: String,
    /// Full description, falling back to the short one, then to the
    /// localized "no information" text.
    pub message: String,
}

/// One render pass over catalog products.
#[derive(Debug)]
pub struct Projector<'a> {
    lang: LanguageTag,
    static_prefix: &'a str,
    placeholders: &'a [String],
    cache_buster: i64,
}

impl<'a> Projector<'a> {
    /// Start a render pass stamped with the current time.
    #[must_use]
    pub fn new(lang: LanguageTag, static_prefix: &'a str, placeholders: &'a [String]) -> Self {
        Self::stamped(
            lang,
            static_prefix,
            placeholders,
            Utc::now().timestamp_millis(),
        )
    }

    /// Start a render pass with an explicit cache-busting stamp.
    #[must_use]
    pub const fn stamped(
        lang: LanguageTag,
        static_prefix: &'a str,
        placeholders: &'a [String],
        cache_buster: i64,
    ) -> Self {
        Self {
            lang,
            static_prefix,
            placeholders,
            cache_buster,
        }
    }

    /// Grouped amount plus the localized currency word.
    #[must_use]
    pub fn price_label(&self, price: Price) -> String {
        format!(
            "{} {}",
            price.grouped(),
            i18n::text(self.lang, Msg::CurrencyWord)
        )
    }

    /// Project one card; `index` is the product's position within the
    /// current visible subset and keys the placeholder rotation, so the same
    /// product keeps the same placeholder for the whole pass.
    #[must_use]
    pub fn card(&self, product: &Product, index: usize) -> ProductCard {
        let description = {
            let short = product.description_short.pick(self.lang);
            if short.is_empty() {
                product.name.other(self.lang).to_owned()
            } else {
                short.to_owned()
            }
        };

        ProductCard {
            id: product.id.to_string(),
            title: product.name.pick(self.lang).to_owned(),
            description,
            price_label: self.price_label(product.price),
            image: format!(
                "{}/img/{}.jpg?t={}",
                self.static_prefix, product.id, self.cache_buster
            ),
            image_fallback: if self.placeholders.is_empty() {
                None
            } else {
                self.placeholders.get(index % self.placeholders.len()).cloned()
            },
        }
    }

    /// Project the info popup record.
    #[must_use]
    pub fn info(&self, product: &Product) -> ProductInfo {
        let full = product.description_full.pick(self.lang);
        let short = product.description_short.pick(self.lang);
        let message = if !full.is_empty() {
            full.to_owned()
        } else if !short.is_empty() {
            short.to_owned()
        } else {
            i18n::text(self.lang, Msg::NoInformation).to_owned()
        };

        ProductInfo {
            title: product.name.pick(self.lang).to_owned(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use apiary_core::{LocalizedText, ProductId};

    fn placeholders() -> Vec<String> {
        vec!["ph0".to_owned(), "ph1".to_owned(), "ph2".to_owned()]
    }

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: LocalizedText::new("Tog' asali", "Горный мёд"),
            description_short: LocalizedText::new("Sof tog' asali", "Чистый горный мёд"),
            description_full: LocalizedText::new("To'liq ma'lumot", ""),
            price: Price::som(50000),
            photo_url: None,
        }
    }

    #[test]
    fn card_localizes_title_description_and_price() {
        let ph = placeholders();
        let projector = Projector::stamped(LanguageTag::Ru, "/webapp", &ph, 42);
        let card = projector.card(&product("p1"), 0);

        assert_eq!(card.title, "Горный мёд");
        assert_eq!(card.description, "Чистый горный мёд");
        assert_eq!(card.price_label, "50 000 сум");
        assert_eq!(card.image, "/webapp/img/p1.jpg?t=42");
    }

    #[test]
    fn uz_price_label_uses_som() {
        let ph = placeholders();
        let projector = Projector::stamped(LanguageTag::Uz, "/webapp", &ph, 1);
        assert_eq!(projector.price_label(Price::som(130_000)), "130 000 so'm");
    }

    #[test]
    fn empty_short_description_falls_back_to_alternate_name() {
        let ph = placeholders();
        let mut p = product("p1");
        p.description_short = LocalizedText::default();

        let projector = Projector::stamped(LanguageTag::Uz, "/webapp", &ph, 1);
        assert_eq!(projector.card(&p, 0).description, "Горный мёд");

        let projector = Projector::stamped(LanguageTag::Ru, "/webapp", &ph, 1);
        assert_eq!(projector.card(&p, 0).description, "Tog' asali");
    }

    #[test]
    fn placeholder_rotation_is_position_modulo_set_size() {
        let ph = placeholders();
        let projector = Projector::stamped(LanguageTag::Uz, "/webapp", &ph, 1);
        for (index, expected) in [(0, "ph0"), (1, "ph1"), (2, "ph2"), (3, "ph0"), (5, "ph2")] {
            let card = projector.card(&product("p"), index);
            assert_eq!(card.image_fallback.as_deref(), Some(expected));
        }
    }

    #[test]
    fn cache_buster_is_stable_within_one_pass() {
        let ph = placeholders();
        let projector = Projector::new(LanguageTag::Uz, "/webapp", &ph);
        let a = projector.card(&product("a"), 0);
        let b = projector.card(&product("b"), 1);
        let t_a = a.image.rsplit("?t=").next().unwrap();
        let t_b = b.image.rsplit("?t=").next().unwrap();
        assert_eq!(t_a, t_b);
    }

    #[test]
    fn empty_placeholder_set_yields_no_fallback() {
        let ph: Vec<String> = Vec::new();
        let projector = Projector::stamped(LanguageTag::Uz, "/webapp", &ph, 1);
        assert_eq!(projector.card(&product("p"), 0).image_fallback, None);
    }

    #[test]
    fn info_falls_back_full_then_short_then_placeholder_text() {
        let ph = placeholders();
        let projector = Projector::stamped(LanguageTag::Uz, "/webapp", &ph, 1);

        let p = product("p1");
        assert_eq!(projector.info(&p).message, "To'liq ma'lumot");

        let mut p = product("p1");
        p.description_full = LocalizedText::default();
        assert_eq!(projector.info(&p).message, "Sof tog' asali");

        p.description_short = LocalizedText::default();
        assert_eq!(projector.info(&p).message, "Ma'lumot yo'q");
    }

    #[test]
    fn ru_info_with_empty_ru_full_text_falls_back_to_uz() {
        let ph = placeholders();
        let projector = Projector::stamped(LanguageTag::Ru, "/webapp", &ph, 1);
        // description_full.ru is empty, so the per-field rule picks uz.
        assert_eq!(projector.info(&product("p1")).message, "To'liq ma'lumot");
    }
}
