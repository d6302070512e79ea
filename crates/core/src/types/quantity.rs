//! Cart line quantities.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Quantity of a cart line. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, or `None` if `value` is zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Convert a requested quantity, or `None` if it is zero or below.
    ///
    /// Requests above `u32::MAX` saturate.
    #[must_use]
    pub fn from_requested(requested: i64) -> Option<Self> {
        if requested <= 0 {
            return None;
        }
        Self::new(u32::try_from(requested).unwrap_or(u32::MAX))
    }

    /// The quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit, saturating at `u32::MAX`.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interpret the text of a quantity field as a requested quantity.
///
/// The leading integer of the trimmed text is used (`"3 units"` → 3).
/// Missing, non-numeric and zero input fall back to 1; negative input is
/// returned as-is so the caller can treat it as a removal. Integers too long
/// for `i64` saturate toward their sign.
///
/// ```rust
/// # use vitrina_core::requested_quantity;
/// assert_eq!(requested_quantity(Some("4")), 4);
/// assert_eq!(requested_quantity(Some("abc")), 1);
/// assert_eq!(requested_quantity(Some("0")), 1);
/// assert_eq!(requested_quantity(None), 1);
/// assert_eq!(requested_quantity(Some("-2")), -2);
/// ```
#[must_use]
pub fn requested_quantity(raw: Option<&str>) -> i64 {
    let Some(raw) = raw.map(str::trim) else {
        return 1;
    };

    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let leading: String = digits.chars().take_while(char::is_ascii_digit).collect();
    if leading.is_empty() {
        return 1;
    }
    match leading.parse::<i64>() {
        Ok(0) => 1,
        Ok(value) => sign * value,
        // Too many digits for i64
        Err(_) if sign < 0 => i64::MIN,
        Err(_) => i64::MAX,
    }
}
