//! Lossless decimal numeric type backed by rust_decimal.
//!
//! Prices, areas, and multipliers all flow through this type so the
//! valuation pipeline never accumulates floating-point drift.

use rust_decimal::{Decimal as RustDecimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lossless decimal numeric type for monetary calculations.
///
/// Serializes to a JSON number (not string).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    /// Create a Decimal from a RustDecimal.
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Build a Decimal from a mantissa and scale, e.g. `(115, 2)` is 1.15.
    pub fn from_parts(mantissa: i64, scale: u32) -> Self {
        Decimal(RustDecimal::new(mantissa, scale))
    }

    /// Parse a Decimal from a string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// Format the Decimal as a canonical string (no exponent notation).
    pub fn to_canonical_string(&self) -> String {
        let normalized = self.0.normalize();
        format!("{}", normalized)
    }

    /// Get the underlying RustDecimal.
    pub fn inner(&self) -> RustDecimal {
        self.0
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    /// The multiplicative identity (1).
    pub fn one() -> Self {
        Decimal(RustDecimal::ONE)
    }

    /// Returns the value 100.
    pub fn hundred() -> Self {
        Decimal(RustDecimal::ONE_HUNDRED)
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Decimal(self.0.abs())
    }

    /// Round to `dp` decimal places, midpoint away from zero.
    pub fn round_dp(&self, dp: u32) -> Self {
        Decimal(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Round to the nearest multiple of 1000, midpoint away from zero.
    pub fn round_to_thousand(&self) -> Self {
        let thousand = RustDecimal::ONE_THOUSAND;
        let units = (self.0 / thousand)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Decimal((units * thousand).normalize())
    }

    /// Multiplication that returns None instead of panicking on overflow.
    pub fn checked_mul(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_mul(rhs.0).map(Decimal)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl From<Decimal> for RustDecimal {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 * rhs.0)
    }
}

impl std::ops::Div for Decimal {
    type Output = Decimal;

    fn div(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 / rhs.0)
    }
}

impl std::iter::Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Decimal {
        iter.fold(Decimal::zero(), |acc, d| acc + d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_round_to_thousand_down() {
        assert_eq!(d("23986125").round_to_thousand(), d("23986000"));
    }

    #[test]
    fn test_round_to_thousand_midpoint_goes_up() {
        assert_eq!(d("21587500").round_to_thousand(), d("21588000"));
        assert_eq!(d("21587512.5").round_to_thousand(), d("21588000"));
    }

    #[test]
    fn test_round_to_thousand_small_values() {
        assert_eq!(d("499.99").round_to_thousand(), Decimal::zero());
        assert_eq!(d("500").round_to_thousand(), d("1000"));
    }

    #[test]
    fn test_round_to_thousand_canonical_form() {
        assert_eq!(d("12345678.9").round_to_thousand().to_string(), "12346000");
    }

    #[test]
    fn test_round_dp_two_places() {
        assert_eq!(d("-4.7619").round_dp(2), d("-4.76"));
        assert_eq!(d("2.345").round_dp(2), d("2.35"));
    }

    #[test]
    fn test_checked_mul_overflow() {
        let huge = d("10000000000000000000000000");
        assert_eq!(huge.checked_mul(d("250000")), None);
        assert_eq!(d("50").checked_mul(d("250000")), Some(d("12500000")));
        // The maximum ends in 335, so rounding to the thousand stays in range.
        let top = Decimal::new(RustDecimal::MAX).round_to_thousand();
        assert!(top <= Decimal::new(RustDecimal::MAX));
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(Decimal::from_parts(115, 2), d("1.15"));
        assert_eq!(Decimal::from_parts(250_000, 0), d("250000"));
    }

    #[test]
    fn test_decimal_arithmetic() {
        let a = d("10.5");
        let b = d("2.5");
        assert_eq!((a + b).to_canonical_string(), "13");
        assert_eq!((a - b).to_canonical_string(), "8");
        assert_eq!((a * b).to_canonical_string(), "26.25");
        assert_eq!((a / b).to_canonical_string(), "4.2");
    }

    #[test]
    fn test_sum() {
        let total: Decimal = vec![d("0.05"), d("0.03"), d("0.02")].into_iter().sum();
        assert_eq!(total, d("0.10"));
    }

    #[test]
    fn test_decimal_json_serialization() {
        let json = serde_json::to_value(d("123.456")).unwrap();
        assert!(json.is_number());
        assert_eq!(json.to_string(), "123.456");
    }

    #[test]
    fn test_sign_helpers() {
        assert!(d("1").is_positive());
        assert!(d("-1").is_negative());
        assert!(!Decimal::zero().is_positive());
        assert!(!Decimal::zero().is_negative());
    }
}
