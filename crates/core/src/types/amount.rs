//! Non-negative payment amounts using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing an [`Amount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// No amount was entered.
    #[error("amount is required")]
    Empty,
    /// The input is not a finite number.
    #[error("amount must be a number: {0}")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("amount cannot be negative")]
    Negative,
    /// A valid number that a decimal amount cannot hold: more than 28
    /// integer digits, or more than 28 decimal places.
    #[error("amount is out of range: {0}")]
    OutOfRange(String),
}

/// A payment amount.
///
/// Always finite and never negative. Stored as a plain JSON number so the
/// persisted `payments` layout stays a sequence of `{ name, amount, method,
/// description }` objects.
///
/// ## Examples
///
/// ```
/// use member_ledger_core::Amount;
///
/// let amount: Amount = "1234.5".parse().unwrap();
/// assert_eq!(amount.display(), "1,234.50");
///
/// assert!("-5".parse::<Amount>().is_err());
/// assert!("abc".parse::<Amount>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse an amount from raw form input.
    ///
    /// Accepts plain decimals (`12.50`) and scientific notation (`1e3`),
    /// surrounded by optional whitespace. Only digits, sign, decimal point
    /// and exponent marker are allowed; digit separators such as `1_000`
    /// are not numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is not a finite number, is
    /// negative, or does not fit a decimal amount.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }
        let not_a_number = || AmountError::NotANumber(trimmed.to_owned());
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        {
            return Err(not_a_number());
        }

        match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
            Ok(value) => Self::try_from(value),
            // Well-formed but beyond what `Decimal` can represent.
            Err(_) => match trimmed.parse::<f64>() {
                Ok(number) if number < 0.0 => Err(AmountError::Negative),
                Ok(number) if number.is_finite() => {
                    Err(AmountError::OutOfRange(trimmed.to_owned()))
                }
                _ => Err(not_a_number()),
            },
        }
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Add two amounts, saturating at the decimal maximum.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Format for display with two decimals and thousands separators
    /// (e.g., `1,234.50`).
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let fixed = format!("{rounded:.2}");
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let digits: Vec<char> = whole.chars().collect();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(*digit);
        }

        format!("{grouped}.{fraction}")
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value < Decimal::ZERO {
            return Err(AmountError::Negative);
        }
        Ok(Self(value.normalize()))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
