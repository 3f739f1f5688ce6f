//! Upstream catalog client.
//!
//! One `GET {catalog_url}` returning `{ "items": [...] }`. There is no retry,
//! no backoff and no caching: a failed fetch is terminal for the session
//! until an explicit reload. Wire records are kept separate from the domain
//! [`Product`] and converted explicitly.

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use apiary_core::{LocalizedText, Price, Product, ProductId};

/// Why a catalog load failed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("catalog endpoint returned status {0}")]
    Status(u16),

    /// The body was not the expected JSON shape.
    #[error("malformed catalog body: {0}")]
    Parse(String),
}

/// Raw product record as served upstream.
///
/// Ids may arrive as strings or numbers; the per-kilogram price is preferred
/// over the legacy single-jar price field; localized fields default to empty
/// strings when absent. Field aliases cover the older upstream shape that
/// carried `info_short`/`info_full` instead of per-language descriptions.
#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    id: RawId,
    #[serde(default)]
    name_uz: String,
    #[serde(default)]
    name_ru: String,
    #[serde(default, alias = "info_short")]
    desc_uz: String,
    #[serde(default)]
    desc_ru: String,
    #[serde(default, alias = "info_full")]
    info_uz: String,
    #[serde(default)]
    info_ru: String,
    #[serde(default)]
    price_per_kg: Option<f64>,
    #[serde(default, alias = "price_1")]
    price: Option<f64>,
    #[serde(default)]
    photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_id(self) -> ProductId {
        match self {
            Self::Text(s) => ProductId::new(s),
            Self::Number(n) => ProductId::new(n.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogBody {
    #[serde(default)]
    items: Vec<ProductRecord>,
}

/// Convert a wire record into the domain product.
///
/// Price precedence: `price_per_kg` over `price_1`; missing or negative
/// amounts collapse to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn convert_product(record: ProductRecord) -> Product {
    let amount = record
        .price_per_kg
        .or(record.price)
        .unwrap_or_default()
        .max(0.0) as u64;

    Product {
        id: record.id.into_id(),
        name: LocalizedText::new(record.name_uz, record.name_ru),
        description_short: LocalizedText::new(record.desc_uz, record.desc_ru),
        description_full: LocalizedText::new(record.info_uz, record.info_ru),
        price: Price::som(amount),
        photo_url: record.photo_url,
    }
}

/// Client for the upstream catalog endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] when the endpoint does not parse.
    pub fn new(catalog_url: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: Url::parse(catalog_url)?,
        })
    }

    /// Fetch and convert the full product list. One attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport failure, non-success status or a
    /// malformed body.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body: CatalogBody = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(body.items.into_iter().map(convert_product).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use apiary_core::LanguageTag;

    #[test]
    fn record_converts_with_price_precedence() {
        let record: ProductRecord = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name_uz": "Tog' asali",
            "name_ru": "Горный мёд",
            "desc_uz": "Sof asal",
            "price_per_kg": 55000,
            "price_1": 50000,
            "photo_url": "https://example.com/p1.jpg"
        }))
        .unwrap();

        let product = convert_product(record);
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price, Price::som(55000));
        assert_eq!(product.name.pick(LanguageTag::Ru), "Горный мёд");
        assert_eq!(product.photo_url.as_deref(), Some("https://example.com/p1.jpg"));
    }

    #[test]
    fn legacy_fields_are_accepted() {
        let record: ProductRecord = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name_uz": "Akatsiya asali",
            "info_short": "Oq akatsiya gullaridan",
            "info_full": "Akatsiya asali haqida to'liq ma'lumot",
            "price_1": 30000.0
        }))
        .unwrap();

        let product = convert_product(record);
        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.price, Price::som(30000));
        assert_eq!(
            product.description_short.pick(LanguageTag::Uz),
            "Oq akatsiya gullaridan"
        );
        assert_eq!(
            product.description_full.pick(LanguageTag::Uz),
            "Akatsiya asali haqida to'liq ma'lumot"
        );
    }

    #[test]
    fn missing_and_negative_prices_collapse_to_zero() {
        let record: ProductRecord =
            serde_json::from_value(serde_json::json!({ "id": "x" })).unwrap();
        assert_eq!(convert_product(record).price, Price::ZERO);

        let record: ProductRecord =
            serde_json::from_value(serde_json::json!({ "id": "y", "price_1": -5 })).unwrap();
        assert_eq!(convert_product(record).price, Price::ZERO);
    }

    #[test]
    fn body_tolerates_missing_items_key() {
        let body: CatalogBody = serde_json::from_str("{}").unwrap();
        assert!(body.items.is_empty());
    }

    #[test]
    fn invalid_endpoint_is_rejected_at_construction() {
        assert!(matches!(
            CatalogClient::new("not a url"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }
}
