//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel over the order API as plain JSON numbers (`60000.0`) but are
//! held as exact decimals so that line totals and order totals never pick up
//! binary floating point drift. All amounts are in Indian rupees.

use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency symbol used when rendering prices.
pub const CURRENCY_SYMBOL: &str = "₹";

/// A price in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// Create a price from an amount in paise (hundredths of a rupee).
    #[must_use]
    pub fn from_paise(paise: i64) -> Self {
        Self(Decimal::new(paise, 2))
    }

    /// Price for `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_rupees(60000).to_string(), "₹60000.00");
        assert_eq!(Price::from_paise(1999).to_string(), "₹19.99");
        assert_eq!(Price::ZERO.to_string(), "₹0.00");
    }

    #[test]
    fn test_line_total_and_sum() {
        let total: Price = [Price::from_paise(1999).times(3), Price::from_rupees(1200) * 2]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_paise(245_997));
    }

    #[test]
    fn test_wire_format_is_json_number() {
        let json = serde_json::to_value(Price::from_rupees(2000)).unwrap();
        assert!(json.is_number());

        let from_int: Price = serde_json::from_str("1200").unwrap();
        assert_eq!(from_int, Price::from_rupees(1200));

        let from_float: Price = serde_json::from_str("15000.0").unwrap();
        assert_eq!(from_float, Price::from_rupees(15000));
    }
}
