//! Language tags and bilingual text pairs.
//!
//! The storefront serves two languages: Uzbek (primary) and Russian
//! (secondary). Every localized field is carried as a [`LocalizedText`] pair
//! and resolved per session through [`LocalizedText::pick`]; business logic
//! never branches on the language, only text selection does.

use serde::{Deserialize, Serialize};

/// Active language for a session.
///
/// Uzbek is the primary tag: it is the fallback whenever the secondary text
/// of a pair is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    /// Uzbek (primary).
    Uz,
    /// Russian (secondary).
    Ru,
}

impl LanguageTag {
    /// Parse a tag from an external signal (query override, host hint).
    ///
    /// Accepts case-insensitive primary subtags: `"ru"`, `"RU"` and `"ru-RU"`
    /// all resolve to [`LanguageTag::Ru`]. Unknown tags yield `None` so the
    /// caller can fall through the resolution chain.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "uz" => Some(Self::Uz),
            "ru" => Some(Self::Ru),
            _ => None,
        }
    }

    /// The wire form of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uz => "uz",
            Self::Ru => "ru",
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bilingual text pair.
///
/// Upstream records may leave the Russian side empty; [`pick`](Self::pick)
/// applies the fallback rule uniformly for every localized field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Primary-language (Uzbek) text.
    pub uz: String,
    /// Secondary-language (Russian) text, possibly empty.
    pub ru: String,
}

impl LocalizedText {
    /// Create a pair from both sides.
    #[must_use]
    pub fn new(uz: impl Into<String>, ru: impl Into<String>) -> Self {
        Self {
            uz: uz.into(),
            ru: ru.into(),
        }
    }

    /// Resolve the pair for the active language.
    ///
    /// Returns the Russian text only when the active tag is Russian AND that
    /// text is non-empty; otherwise the Uzbek text.
    #[must_use]
    pub fn pick(&self, lang: LanguageTag) -> &str {
        match lang {
            LanguageTag::Ru if !self.ru.is_empty() => &self.ru,
            _ => &self.uz,
        }
    }

    /// The text of the non-active language, with no emptiness rule applied.
    ///
    /// Used by the card projection, which falls back to the alternate name
    /// when a short description is missing.
    #[must_use]
    pub fn other(&self, lang: LanguageTag) -> &str {
        match lang {
            LanguageTag::Uz => &self.ru,
            LanguageTag::Ru => &self.uz,
        }
    }

    /// Whether the resolved text for `lang` is empty.
    #[must_use]
    pub fn is_empty_for(&self, lang: LanguageTag) -> bool {
        self.pick(lang).is_empty()
    }
}
