//! Order payloads and validation.
//!
//! The payload is the wire contract handed to the host's outbound channel:
//! a JSON object with an `items` array plus contact fields and an optional
//! coordinate pair. It is dispatched fire-and-forget and never persisted
//! here; delivery semantics belong to the host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geo::Coordinates;
use super::id::ProductId;

/// One order line: a product reference and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product identifier, as found in the catalog.
    pub id: ProductId,
    /// Ordered quantity, always >= 1.
    pub qty: u32,
}

/// Contact fields collected from the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    /// Customer name.
    pub name: String,
    /// Customer phone number, free-form.
    pub phone: String,
    /// Delivery address, free text; may have been auto-filled from a
    /// captured location.
    pub address: String,
}

/// The assembled order, ready for the outbound channel.
///
/// `lat` and `lon` are serialized as explicit nulls when no location was
/// captured; the host side relies on the fields being present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Ordered lines, snapshot of the cart in insertion order.
    pub items: Vec<OrderItem>,
    /// Customer name, trimmed.
    pub name: String,
    /// Customer phone, trimmed.
    pub phone: String,
    /// Delivery address, trimmed; may be empty.
    pub address: String,
    /// Captured latitude, present together with `lon` or not at all.
    pub lat: Option<f64>,
    /// Captured longitude, present together with `lat` or not at all.
    pub lon: Option<f64>,
}

impl OrderPayload {
    /// Assemble a payload from validated parts.
    ///
    /// Contact fields are trimmed here so the wire form is canonical; the
    /// coordinate pair stays all-or-nothing by construction.
    #[must_use]
    pub fn new(
        items: Vec<OrderItem>,
        contact: &ContactDetails,
        location: Option<Coordinates>,
    ) -> Self {
        Self {
            items,
            name: contact.name.trim().to_owned(),
            phone: contact.phone.trim().to_owned(),
            address: contact.address.trim().to_owned(),
            lat: location.map(|c| c.lat),
            lon: location.map(|c| c.lon),
        }
    }

    /// The captured location, if any.
    #[must_use]
    pub fn location(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

/// Why an order was rejected before dispatch.
///
/// Both cases are user-correctable: the cart and form state are left
/// untouched and a resubmission runs the same checks again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The cart holds no items.
    #[error("cart is empty")]
    EmptyCart,
    /// Name or phone is blank after trimming.
    #[error("name and phone are required")]
    IncompleteContact,
}
