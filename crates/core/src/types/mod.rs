//! Core domain types.
//!
//! - [`id`] - Type-safe product identifiers
//! - [`text`] - Language tags and bilingual text pairs
//! - [`price`] - Integer prices in whole soʻm
//! - [`product`] - Catalog product records
//! - [`order`] - Order payloads and validation errors
//! - [`geo`] - Geographic coordinates

pub mod geo;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod text;

pub use geo::Coordinates;
pub use id::ProductId;
pub use order::{ContactDetails, OrderItem, OrderPayload, ValidationError};
pub use price::Price;
pub use product::Product;
pub use text::{LanguageTag, LocalizedText};
