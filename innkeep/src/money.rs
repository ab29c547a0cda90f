//! Currency amounts.
//!
//! Amounts are held as whole minor units (cents) so rate × nights and
//! discount arithmetic never accumulate floating-point error.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A currency amount in minor units.
///
/// # Examples
///
/// ```
/// use innkeep::Money;
///
/// let rate: Money = "400".parse().unwrap();
/// assert_eq!(rate.times(5), Money::from_major(2000));
/// assert_eq!(rate.to_string(), "400.00");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from whole major units.
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(100))
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies the amount by a count (e.g. nights), saturating.
    #[must_use]
    pub const fn times(self, count: u32) -> Self {
        Self(self.0.saturating_mul(count as i64))
    }

    /// Clamps negative amounts to zero.
    #[must_use]
    pub const fn non_negative(self) -> Self {
        if self.0 < 0 {
            Self::ZERO
        } else {
            self
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Error type for unparseable amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAmountError {
    /// The text that failed to parse.
    pub value: String,
    /// The reason it failed.
    pub reason: String,
}

impl fmt::Display for InvalidAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid amount '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidAmountError {}

impl FromStr for Money {
    type Err = InvalidAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| InvalidAmountError {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("amount is empty"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected digits with an optional decimal point"));
        }
        if fraction.len() > 2 {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("bad fraction"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("bad fraction"))?,
        };

        let total = major
            .checked_mul(100)
            .and_then(|m| m.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Self(if negative { -total } else { total }))
    }
}

/// Serde adapter reading amounts as decimal text or whole major units, for
/// hand-written configuration files. Writes decimal text.
///
/// ```
/// use innkeep::Money;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(with = "innkeep::money::decimal")]
///     rate: Money,
/// }
///
/// let a: Row = serde_yaml::from_str("rate: 250").unwrap();
/// let b: Row = serde_yaml::from_str("rate: '250.50'").unwrap();
/// assert_eq!(a.rate, Money::from_major(250));
/// assert_eq!(b.rate, Money::from_minor(25_050));
/// ```
pub mod decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::Money;

    /// Writes the amount as `"250.00"`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(amount)
    }

    /// Reads `250`, `250.5` or `"250.50"`.
    ///
    /// # Errors
    ///
    /// Fails on text that is not a two-decimal amount.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Whole(i64),
            Text(String),
            Float(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Whole(major) => Ok(Money::from_major(major)),
            Raw::Text(text) => text.parse().map_err(de::Error::custom),
            Raw::Float(value) => format!("{value}").parse().map_err(de::Error::custom),
        }
    }
}
