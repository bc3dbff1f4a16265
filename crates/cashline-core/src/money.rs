//! # Money Module
//!
//! Provides the `Money` type and the single rounding primitive used by every
//! percentage and ratio in the engine.
//!
//! ## Integer Minor Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every amount crossing a public boundary is a whole number of minor     │
//! │  units (cents for USD). Fractions only exist for the instant between    │
//! │  a percentage calculation and the call to `Money::from_rounded`.        │
//! │                                                                         │
//! │    1000 × 20 / 100      = 200.0     → 200                               │
//! │    1000 / 120 × 100     = 833.33…   → 833                               │
//! │    833 × 20 / 100       = 166.6     → 167                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashline_core::money::Money;
//!
//! let price = Money::from_cents(1000);
//! assert_eq!(price.percent_of(20).cents(), 200);
//! assert_eq!(price.excluding_tax(20).cents(), 833);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul};
use tracing::warn;
use ts_rs::TS;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to the nearest integer, sending exact halves to the even neighbour.
///
/// ## Bankers Rounding Explained
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  Standard rounding always rounds 0.5 UP, causing systematic bias:   │
/// │    0.5 → 1, 1.5 → 2, 2.5 → 3, 3.5 → 4 (always up = +bias)          │
/// │                                                                     │
/// │  Bankers Rounding rounds 0.5 to nearest EVEN number:               │
/// │    0.5 → 0, 1.5 → 2, 2.5 → 2, 3.5 → 4 (alternates = no bias)      │
/// │                                                                     │
/// │  Negative halves mirror the positive ones: -2.5 → -2, -3.5 → -4    │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust
/// use cashline_core::money::round_half_even;
///
/// assert_eq!(round_half_even(2.5), 2);
/// assert_eq!(round_half_even(3.5), 4);
/// assert_eq!(round_half_even(-2.5), -2);
/// ```
#[inline]
pub fn round_half_even(x: f64) -> i64 {
    x.round_ties_even() as i64
}

// =============================================================================
// Money Type
// =============================================================================

/// A non-negative monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **u64 (unsigned)**: prices, discounts and taxes are never negative here;
///   refunds are handled elsewhere
/// - **Saturating subtraction**: totals clamp at zero instead of wrapping
/// - **Unchecked addition**: callers bound quantity × price upstream
///   (see [`crate::validation::validate_line_item`])
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(u64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Converts a fractional minor-unit amount to Money with banker's rounding.
    ///
    /// Negative and non-finite inputs have no representation and become zero.
    ///
    /// ## Example
    /// ```rust
    /// use cashline_core::money::Money;
    ///
    /// assert_eq!(Money::from_rounded(166.5).cents(), 166);
    /// assert_eq!(Money::from_rounded(167.5).cents(), 168);
    /// assert_eq!(Money::from_rounded(-3.0).cents(), 0);
    /// ```
    pub fn from_rounded(x: f64) -> Self {
        if !x.is_finite() {
            return Money::zero();
        }
        let rounded = round_half_even(x);
        Money(u64::try_from(rounded).unwrap_or(0))
    }

    /// Returns `percentage`% of this amount, rounded half-to-even.
    ///
    /// The percentage is not capped: 150% of 100 is 150.
    pub fn percent_of(&self, percentage: u64) -> Money {
        Money::from_rounded(self.0 as f64 * percentage as f64 / 100.0)
    }

    /// Backs the tax out of a tax-inclusive amount.
    ///
    /// Computes `price / (100 + percentage) × 100` in that order, then rounds.
    ///
    /// ## Example
    /// ```rust
    /// use cashline_core::money::Money;
    ///
    /// // 10.00 including 20% tax is 8.33 before tax
    /// assert_eq!(Money::from_cents(1000).excluding_tax(20).cents(), 833);
    /// ```
    pub fn excluding_tax(&self, percentage: u64) -> Money {
        Money::from_rounded(self.0 as f64 / (100.0 + percentage as f64) * 100.0)
    }

    /// Subtracts, clamping at zero.
    #[inline]
    pub const fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    /// Parses a decimal major-unit string (`"5.25"`) into minor units.
    ///
    /// Returns `None` when the string is not a number or the value is not a
    /// finite, non-negative amount.
    ///
    /// ## Example
    /// ```rust
    /// use cashline_core::money::Money;
    ///
    /// assert_eq!(Money::parse_major("5.25"), Some(Money::from_cents(525)));
    /// assert_eq!(Money::parse_major("five"), None);
    /// ```
    pub fn parse_major(amount: &str) -> Option<Money> {
        let value: f64 = amount.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Some(Money::from_rounded(value * 100.0))
    }

    /// Like [`Money::parse_major`] but yields zero on failure.
    ///
    /// Fixed discounts are configured as strings and a typo must not block
    /// checkout, so failures are logged and price as no discount.
    pub fn parse_major_lenient(amount: &str, currency: &str) -> Money {
        match Money::parse_major(amount) {
            Some(money) => money,
            None => {
                warn!(amount = %amount, currency = %currency, "Unparseable fixed amount, using zero");
                Money::zero()
            }
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as major.minor, without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<u64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
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
    fn test_round_half_even() {
        assert_eq!(round_half_even(2.5), 2);
        assert_eq!(round_half_even(3.5), 4);
        assert_eq!(round_half_even(0.5), 0);
        assert_eq!(round_half_even(1.5), 2);
        assert_eq!(round_half_even(2.4), 2);
        assert_eq!(round_half_even(2.6), 3);
    }

    #[test]
    fn test_round_half_even_negative_is_symmetric() {
        assert_eq!(round_half_even(-2.5), -2);
        assert_eq!(round_half_even(-3.5), -4);
        assert_eq!(round_half_even(-2.6), -3);
        assert_eq!(round_half_even(-0.4), 0);
    }

    #[test]
    fn test_from_rounded_clamps() {
        assert_eq!(Money::from_rounded(-1.0), Money::zero());
        assert_eq!(Money::from_rounded(f64::NAN), Money::zero());
        assert_eq!(Money::from_rounded(f64::INFINITY), Money::zero());
        assert_eq!(Money::from_rounded(42.5).cents(), 42);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(Money::from_cents(1000).percent_of(10).cents(), 100);
        assert_eq!(Money::from_cents(833).percent_of(20).cents(), 167);
        assert_eq!(Money::from_cents(100).percent_of(150).cents(), 150);
        assert_eq!(Money::from_cents(1000).percent_of(0).cents(), 0);
        // 125 × 10 / 100 = 12.5 → 12
        assert_eq!(Money::from_cents(125).percent_of(10).cents(), 12);
    }

    #[test]
    fn test_excluding_tax() {
        assert_eq!(Money::from_cents(1000).excluding_tax(20).cents(), 833);
        assert_eq!(Money::from_cents(1200).excluding_tax(20).cents(), 1000);
        assert_eq!(Money::from_cents(1000).excluding_tax(0).cents(), 1000);
    }

    #[test]
    fn test_parse_major() {
        assert_eq!(Money::parse_major("5"), Some(Money::from_cents(500)));
        assert_eq!(Money::parse_major("5.25"), Some(Money::from_cents(525)));
        assert_eq!(Money::parse_major("0.5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse_major("+3"), Some(Money::from_cents(300)));
        assert_eq!(Money::parse_major(""), None);
        assert_eq!(Money::parse_major("abc"), None);
        assert_eq!(Money::parse_major("-1.00"), None);
        assert_eq!(Money::parse_major("inf"), None);
    }

    #[test]
    fn test_parse_major_lenient_yields_zero() {
        assert_eq!(Money::parse_major_lenient("not money", "USD"), Money::zero());
        assert_eq!(Money::parse_major_lenient("2.50", "USD").cents(), 250);
    }

    #[test]
    fn test_saturating_sub() {
        let a = Money::from_cents(100);
        let b = Money::from_cents(250);
        assert_eq!(a.saturating_sub(b), Money::zero());
        assert_eq!(b.saturating_sub(a).cents(), 150);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "1099");
        let back: Money = serde_json::from_str("250").unwrap();
        assert_eq!(back.cents(), 250);
    }
}
