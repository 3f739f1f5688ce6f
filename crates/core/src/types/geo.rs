//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// A captured latitude/longitude pair.
///
/// Coordinates travel together: an order carries either a full pair or
/// nothing (`Option<Coordinates>`), never a lone latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
