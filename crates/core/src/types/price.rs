//! Integer prices in whole soʻm.
//!
//! The catalog quotes unit prices per kilogram as non-negative integers in
//! the smallest currency unit in use (whole soʻm; tiyin are not quoted).
//! Arithmetic saturates rather than wrapping so a pathological catalog can
//! never panic the cart totals.

use serde::{Deserialize, Serialize};

/// A non-negative amount of whole soʻm.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero soʻm.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount of whole soʻm.
    #[must_use]
    pub const fn som(amount: u64) -> Self {
        Self(amount)
    }

    /// The amount in whole soʻm.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Space-grouped display form: `50000` becomes `"50 000"`.
    ///
    /// The grouping matches the `uz-UZ` convention used by the rendering
    /// layer; the localized currency word is appended by the projection, not
    /// here.
    #[must_use]
    pub fn grouped(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let lead = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i != 0 && i % 3 == lead {
                out.push(' ');
            }
            out.push(c);
        }
        out
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Mul<u32> for Price {
    type Output = Self;

    fn mul(self, qty: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(qty)))
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + p)
    }
}
