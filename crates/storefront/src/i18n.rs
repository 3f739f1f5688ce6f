//! Session language resolution and user-facing text.
//!
//! One resolver and one parameterized text table serve both languages;
//! nothing else in the engine branches on the language. Resolution runs once
//! per session at bootstrap; every piece of user-facing text afterwards goes
//! through [`text`] with the pinned tag.

use apiary_core::LanguageTag;

/// Resolve the active language for a session.
///
/// Precedence: explicit query override, then the platform-provided user
/// language hint, then the configured default. Pure and deterministic;
/// unknown tags fall through to the next signal.
#[must_use]
pub fn resolve(
    explicit: Option<&str>,
    hint: Option<&str>,
    default: LanguageTag,
) -> LanguageTag {
    explicit
        .and_then(LanguageTag::parse)
        .or_else(|| hint.and_then(LanguageTag::parse))
        .unwrap_or(default)
}

/// Keys for every user-facing string the engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// Blocking alert: order submitted with an empty cart.
    CartEmpty,
    /// Blocking alert: name or phone missing on checkout.
    IncompleteContact,
    /// Inline error: the catalog could not be loaded.
    CatalogUnavailable,
    /// Inline notice: the catalog loaded but holds no products.
    NoProducts,
    /// Popup fallback when a product has no description at all.
    NoInformation,
    /// 404 body for an unknown product id.
    UnknownProduct,
    /// Confirmation shown after a successful order dispatch.
    OrderAccepted,
    /// Soft alert: geolocation could not be acquired.
    LocationFailed,
    /// Prefix for the auto-filled address line.
    LocationPrefix,
    /// Currency unit word appended to price labels.
    CurrencyWord,
    /// Label for the host's main action button.
    CheckoutLabel,
}

/// Look up a user-facing string for the active language.
///
/// The table is complete for both languages, so the per-field fallback rule
/// of [`apiary_core::LocalizedText::pick`] never has to apply here.
#[must_use]
pub const fn text(lang: LanguageTag, msg: Msg) -> &'static str {
    use LanguageTag::{Ru, Uz};
    match (msg, lang) {
        (Msg::CartEmpty, Uz) => "Savatcha bo'sh!",
        (Msg::CartEmpty, Ru) => "Корзина пустая!",
        (Msg::IncompleteContact, Uz) => {
            "Iltimos, barcha ma'lumotlarni to'ldiring (Ism, Telefon, Manzil)."
        }
        (Msg::IncompleteContact, Ru) => {
            "Пожалуйста, заполните все данные (Имя, Телефон, Адрес)."
        }
        (Msg::CatalogUnavailable, Uz) => "Katalogni yuklab bo'lmadi. Keyinroq urinib ko'ring.",
        (Msg::CatalogUnavailable, Ru) => "Не удалось загрузить каталог. Попробуйте позже.",
        (Msg::NoProducts, Uz) => "Hozircha mahsulotlar yo'q.",
        (Msg::NoProducts, Ru) => "Пока нет товаров.",
        (Msg::NoInformation, Uz) => "Ma'lumot yo'q",
        (Msg::NoInformation, Ru) => "Нет информации",
        (Msg::UnknownProduct, Uz) => "Mahsulot topilmadi.",
        (Msg::UnknownProduct, Ru) => "Товар не найден.",
        (Msg::OrderAccepted, Uz) => "✅ Buyurtmangiz qabul qilindi! Tez orada bog'lanamiz.",
        (Msg::OrderAccepted, Ru) => "✅ Заказ принят! Мы скоро свяжемся.",
        (Msg::LocationFailed, Uz) => {
            "Lokatsiyani aniqlab bo'lmadi. Iltimos, manzilni yozma kiriting."
        }
        (Msg::LocationFailed, Ru) => {
            "Не удалось определить геолокацию. Введите адрес вручную."
        }
        (Msg::LocationPrefix, Uz) => "Lokatsiya",
        (Msg::LocationPrefix, Ru) => "Локация",
        (Msg::CurrencyWord, Uz) => "so'm",
        (Msg::CurrencyWord, Ru) => "сум",
        (Msg::CheckoutLabel, Uz) => "Checkout",
        (Msg::CheckoutLabel, Ru) => "Оформить",
    }
}
