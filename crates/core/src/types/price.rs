//! Catalog price type backed by decimal arithmetic.
//!
//! Prices are stored the way the catalog records them (e.g. `12.5` for a
//! Rp 12.500 cake — thousands of rupiah) and only expanded at display time.
//! Serialized as strings on the wire, matching what Postgres NUMERIC columns
//! produce in JSON.

use core::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A catalog price in thousands of IDR.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the price is negative (rejected by validation).
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Price of `qty` units.
    #[must_use]
    pub fn times(self, qty: u32) -> Self {
        Self(self.0 * Decimal::from(qty))
    }

    /// Format as rupiah for display, e.g. `Rp 12.500`.
    ///
    /// The stored amount is in thousands, so `12.5` renders as `Rp 12.500`:
    /// multiply by 1000, round to whole rupiah, group digits with dots.
    #[must_use]
    pub fn display_idr(&self) -> String {
        let rupiah = (self.0 * Decimal::from(1000))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let digits = rupiah.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        let sign = if rupiah.is_sign_negative() && !rupiah.is_zero() {
            "-"
        } else {
            ""
        };
        format!("Rp {sign}{grouped}")
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_idr())
    }
}
