//! Type-safe price representation using decimal arithmetic.

use core::{fmt, iter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The text contained no digits.
    #[error("price text contains no number: {0:?}")]
    NoNumber(String),
    /// The digits did not form a decimal number.
    #[error("price is not a valid number: {0:?}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative unit price.
///
/// Serialized as a plain JSON number, matching the catalog API and the
/// persisted cart format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPrice", into = "RawPrice")]
pub struct Price(Decimal);

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct RawPrice(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl TryFrom<RawPrice> for Price {
    type Error = PriceError;

    fn try_from(raw: RawPrice) -> Result<Self, Self::Error> {
        Self::new(raw.0)
    }
}

impl From<Price> for RawPrice {
    fn from(price: Price) -> Self {
        Self(price.0)
    }
}

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from an amount in cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// Parse a price out of free-form display text such as `"Price: $1,299.50"`.
    ///
    /// Every character other than ASCII digits, `.` and `-` is stripped, then
    /// the longest leading decimal number is used and the rest ignored
    /// (`"$25 - sale"` → 25).
    ///
    /// # Errors
    ///
    /// Returns an error if the stripped text does not start with a number, the
    /// number does not fit a decimal, or it is negative.
    pub fn parse_loose(text: &str) -> Result<Self, PriceError> {
        let numeric: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
            .collect();

        let leading =
            leading_decimal(&numeric).ok_or_else(|| PriceError::NoNumber(text.to_owned()))?;
        let amount: Decimal = leading
            .parse()
            .map_err(|_| PriceError::Invalid(leading.clone()))?;
        Self::new(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }

    /// Format for display with two decimals (e.g., `"$19.99"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${}", format_amount(self.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

/// The longest prefix of `text` shaped like `-?digits(.digits)?`, with a
/// leading zero supplied when the integer part is missing (`".5"` → `"0.5"`).
fn leading_decimal(text: &str) -> Option<String> {
    let mut chars = text.chars().peekable();
    let negative = chars.next_if_eq(&'-').is_some();
    let integer: String = iter::from_fn(|| chars.next_if(char::is_ascii_digit)).collect();
    let fraction: String = if chars.next_if_eq(&'.').is_some() {
        iter::from_fn(|| chars.next_if(char::is_ascii_digit)).collect()
    } else {
        String::new()
    };

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut number = String::from(if negative { "-" } else { "" });
    number.push_str(if integer.is_empty() { "0" } else { &integer });
    if !fraction.is_empty() {
        number.push('.');
        number.push_str(&fraction);
    }
    Some(number)
}

/// Format a decimal amount with exactly two decimals (`36.5` → `"36.50"`).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
