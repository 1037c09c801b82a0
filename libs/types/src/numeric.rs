//! Fixed-point decimal price type
//!
//! Uses rust_decimal for deterministic arithmetic. The wallet total is an
//! exact weighted sum of these values, so floats only appear transiently
//! inside the market's random walk.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Precision kept for prices produced from float samples.
pub const PRICE_DP: u32 = 8;

/// Display precision for monetary values.
pub const DISPLAY_DP: u32 = 2;

/// Strictly positive coin price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Largest representable price.
    pub const MAX: Price = Price(Decimal::MAX);

    /// Create a new Price
    ///
    /// # Panics
    /// Panics if the value is not strictly positive
    pub fn new(value: Decimal) -> Self {
        assert!(value > Decimal::ZERO, "Price must be positive");
        Self(value)
    }

    /// Try to create a Price, returning None if not strictly positive
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Build a price from a float sample, rounded to `PRICE_DP`.
    ///
    /// Returns None for NaN, infinities, and values that round to zero or below.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_f64(value)
            .map(|d| d.round_dp_with_strategy(PRICE_DP, RoundingStrategy::MidpointAwayFromZero))
            .and_then(Self::try_new)
    }

    /// Parse from an exact decimal string (e.g. "3977.10").
    pub fn from_str_exact(s: &str) -> Option<Self> {
        Decimal::from_str_exact(s).ok().and_then(Self::try_new)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Return the larger of `self` and `floor`.
    pub fn floored_at(self, floor: Price) -> Self {
        if self < floor {
            floor
        } else {
            self
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = String;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or_else(|| format!("price must be positive, got {value}"))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Round a monetary value to display precision (HALF_UP), always showing
/// exactly `DISPLAY_DP` places.
pub fn round_display(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DP);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_price_creation() {
        let p = Price::new(Decimal::from(5));
        assert_eq!(p.as_decimal(), Decimal::from(5));
    }

    #[test]
    #[should_panic(expected = "Price must be positive")]
    fn test_zero_price_panics() {
        Price::new(Decimal::ZERO);
    }

    #[test]
    fn test_try_new_rejects_negative() {
        assert!(Price::try_new(Decimal::from(-1)).is_none());
        assert!(Price::try_new(Decimal::ZERO).is_none());
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Price::from_f64(f64::NAN).is_none());
        assert!(Price::from_f64(f64::INFINITY).is_none());
        assert!(Price::from_f64(-0.5).is_none());
        assert!(Price::from_f64(1e-12).is_none());
    }

    #[test]
    fn test_from_f64_rounds() {
        let p = Price::from_f64(0.123456789).unwrap();
        assert_eq!(p.as_decimal(), Decimal::from_str_exact("0.12345679").unwrap());
    }

    #[test]
    fn test_floor() {
        let floor = Price::from_str_exact("0.01").unwrap();
        let low = Price::from_str_exact("0.001").unwrap();
        let high = Price::from_str_exact("2").unwrap();
        assert_eq!(low.floored_at(floor), floor);
        assert_eq!(high.floored_at(floor), high);
    }

    #[test]
    fn test_from_f64_over_range_is_none() {
        assert!(Price::from_f64(1e30).is_none());
        assert!(Price::MAX.as_decimal() > Decimal::ZERO);
    }

    #[test]
    fn test_round_display() {
        assert_eq!(round_display(Decimal::from(100)).to_string(), "100.00");
        assert_eq!(round_display(Decimal::from_str_exact("2.345").unwrap()).to_string(), "2.35");
        assert_eq!(round_display(Decimal::ZERO).to_string(), "0.00");
    }

    #[test]
    fn test_price_serde_rejects_zero() {
        assert!(serde_json::from_str::<Price>("\"0\"").is_err());
        let p: Price = serde_json::from_str("\"86.43\"").unwrap();
        assert_eq!(p, Price::from_str_exact("86.43").unwrap());
    }

    proptest! {
        #[test]
        fn prop_from_f64_is_positive(v in 1e-6f64..1e9) {
            if let Some(p) = Price::from_f64(v) {
                prop_assert!(p.as_decimal() > Decimal::ZERO);
            }
        }
    }
}
