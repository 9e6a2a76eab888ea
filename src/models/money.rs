//! Money type for currency amounts
//!
//! Amounts are whole cents in an i64, so arithmetic is exact and the
//! JSON form is a plain integer. The integer form doubles as the stable
//! number representation backups are checksummed over.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A monetary amount in cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Amount from a cent count
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole currency units, truncated toward zero
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cent remainder in the range 0-99
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse an amount like "12.50", "$12.50", "-3.99" or "12"
    ///
    /// At most two fraction digits are accepted; "12.5" means fifty cents.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let trimmed = input.trim();
        let (sign, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, trimmed),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);

        let invalid = || MoneyParseError::InvalidFormat(input.trim().to_string());

        let cents = match unsigned.split_once('.') {
            Some((whole, fraction)) => {
                let units: i64 = whole.parse().map_err(|_| invalid())?;
                let sub_unit = match fraction.len() {
                    1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => fraction.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(invalid()),
                };
                units * 100 + sub_unit
            }
            None => {
                let units: i64 = unsigned.parse().map_err(|_| invalid())?;
                units * 100
            }
        };

        Ok(Self(sign * cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
