use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::{Serialize, Serializer};

use crate::{Error, Result};

/// Number of minor units in one currency unit.
pub const MINOR_UNITS: i64 = 100;

// A single amount is at most 10^15 cents. Sums over a whole portfolio are
// checked separately when it is built.
const MAX_AMOUNT: f64 = 1e13;

// Slack, in cents, for binary noise such as 199.99 * 100 = 19998.999999999996.
const NOISE: f64 = 1e-6;

/// An amount of money in minor units (cents).
///
/// All engine arithmetic happens on `Cents`. Conversion from and to decimal
/// values only happens at the boundaries: when a portfolio is built and when
/// a result is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(pub i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// Quantize a decimal amount to the nearest cent, half away from zero.
    pub fn from_decimal(value: f64) -> Result<Cents> {
        Ok(Cents(scaled(value)?.round() as i64))
    }

    /// Quantize to the next cent up. Sub-cent costs must never look cheaper
    /// than they are.
    pub fn from_decimal_up(value: f64) -> Result<Cents> {
        let scaled = scaled(value)?;
        Ok(Cents((scaled - noise(scaled)).ceil() as i64))
    }

    /// Quantize to the next cent down. Used for budgets.
    pub fn from_decimal_down(value: f64) -> Result<Cents> {
        let scaled = scaled(value)?;
        Ok(Cents((scaled + noise(scaled)).floor() as i64))
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / MINOR_UNITS as f64
    }
}

fn scaled(value: f64) -> Result<f64> {
    if !value.is_finite() || value.abs() > MAX_AMOUNT {
        return Err(Error::AmountOutOfRange(value));
    }
    Ok(value * MINOR_UNITS as f64)
}

fn noise(scaled: f64) -> f64 {
    NOISE.max(scaled.abs() * f64::EPSILON * 4.0)
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = MINOR_UNITS as u64;
        write!(f, "{}{}.{:02}", sign, abs / units, abs % units)
    }
}

impl Serialize for Cents {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) {
        self.0 += rhs.0;
    }
}

impl Sub for Cents {
    type Output = Cents;

    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0 - rhs.0)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_nearest_cent() {
        // 0.29 * 100 is 28.999999999999996 in binary floating point.
        assert_eq!(Cents(29), Cents::from_decimal(0.29).unwrap());
        assert_eq!(Cents(4500), Cents::from_decimal(300.0 * 0.15).unwrap());
        assert_eq!(Cents(4000), Cents::from_decimal(199.99 * 0.2).unwrap());
        assert_eq!(Cents(-125), Cents::from_decimal(-1.249).unwrap());
    }

    #[test]
    fn test_directed_rounding() {
        assert_eq!(Cents(10001), Cents::from_decimal_up(100.004).unwrap());
        assert_eq!(Cents(10000), Cents::from_decimal_down(100.009).unwrap());
        // binary noise around whole cents is not rounded away
        assert_eq!(Cents(19999), Cents::from_decimal_up(199.99).unwrap());
        assert_eq!(Cents(7), Cents::from_decimal_up(0.07).unwrap());
        assert_eq!(Cents(29), Cents::from_decimal_down(0.29).unwrap());
        assert_eq!(Cents(0), Cents::from_decimal_up(0.0).unwrap());
        assert!(Cents::from_decimal_up(f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_amounts() {
        assert!(Cents::from_decimal(f64::NAN).is_err());
        assert!(Cents::from_decimal(f64::INFINITY).is_err());
        assert!(Cents::from_decimal(1e20).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!("50.00", Cents(5000).to_string());
        assert_eq!("0.05", Cents(5).to_string());
        assert_eq!("-0.05", Cents(-5).to_string());
        assert_eq!("1234.56", Cents(123456).to_string());
    }

    #[test]
    fn test_sum() {
        let total: Cents = [Cents(1000), Cents(4000), Cents(-50)].into_iter().sum();
        assert_eq!(Cents(4950), total);
        assert_eq!(50.0, Cents(5000).as_decimal());
    }
}
