//! # Money Module
//!
//! The `Money` type used for cart cost and product prices.
//!
//! Values are integer minor units (cents). A cart's `cost` serializes as a
//! bare integer, so `{"cost": 1099}` is $10.99.
//!
//! ## Usage
//! ```rust
//! use tote_core::money::Money;
//!
//! let price = Money::from_cents(1099);
//! let total: Money = [price, Money::from_cents(500)].into_iter().sum();
//! assert_eq!(total.cents(), 1599);
//! ```
//!
//! Addition saturates at the `i64` bounds. Stored costs are trusted as-is,
//! so a sum over hostile rows clamps instead of overflowing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// A monetary value in the smallest currency unit.
///
/// Signed so that a cost adjustment below zero stays representable; the
/// cart store never trusts or corrects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<Money> for serde_json::Number {
    fn from(money: Money) -> Self {
        serde_json::Number::from(money.0)
    }
}

/// Display is for logs and the CLI, not localized UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_addition_saturates() {
        let max = Money::from_cents(i64::MAX);
        let one = Money::from_cents(1);

        assert_eq!(max + one, max);
        assert_eq!(one + one, Money::from_cents(2));

        let total: Money = [max, one, one].into_iter().sum();
        assert_eq!(total, max);

        let floor: Money = [Money::from_cents(i64::MIN), Money::from_cents(-1)]
            .into_iter()
            .sum();
        assert_eq!(floor.cents(), i64::MIN);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_value(Money::from_cents(1099)).unwrap();
        assert_eq!(json, serde_json::json!(1099));

        let back: Money = serde_json::from_value(json).unwrap();
        assert_eq!(back, Money::from_cents(1099));
    }
}
