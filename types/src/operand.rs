//! Validated multiplication operands.
//!
//! An [`Operand`] is a non-negative integer that fits the host `u64`, stored
//! together with its decimal digits (most significant first). Construction is
//! the only place input is validated: once you hold an `Operand`, its digit
//! sequence is non-empty, every element is `0..=9`, and there are no redundant
//! leading zeros (zero itself is the single digit `0`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected operand input. Step generation never starts from a value that
/// produced one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOperand {
    #[error("operand must contain at least one digit")]
    Empty,
    #[error("operand must not be negative")]
    Negative,
    #[error("unexpected character {found:?} at position {position}")]
    NonDigit { position: usize, found: char },
    #[error("digit value {value} at position {position} is not a decimal digit")]
    DigitOutOfRange { position: usize, value: u8 },
    #[error("operand {digits} does not fit in a 64-bit unsigned integer")]
    TooLarge { digits: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Operand {
    value: u64,
    digits: Vec<u8>,
}

impl Operand {
    #[must_use]
    pub fn new(value: u64) -> Self {
        let digits = value.to_string().bytes().map(|b| b - b'0').collect();
        Self { value, digits }
    }

    /// Parse the textual form of an operand.
    ///
    /// Only ASCII digits are accepted; signs, whitespace and separators are
    /// rejected rather than skipped. Leading zeros are normalized away.
    pub fn parse(raw: &str) -> Result<Self, InvalidOperand> {
        if raw.is_empty() {
            return Err(InvalidOperand::Empty);
        }
        if let Some(rest) = raw.strip_prefix('-')
            && !rest.is_empty()
            && rest.chars().all(|c| c.is_ascii_digit())
        {
            return Err(InvalidOperand::Negative);
        }
        if let Some((position, found)) = raw.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(InvalidOperand::NonDigit { position, found });
        }
        let value = raw
            .parse::<u64>()
            .map_err(|_err| InvalidOperand::TooLarge {
                digits: raw.to_owned(),
            })?;
        Ok(Self::new(value))
    }

    /// Build an operand from an explicit digit sequence, most significant first.
    pub fn from_digits(digits: &[u8]) -> Result<Self, InvalidOperand> {
        if digits.is_empty() {
            return Err(InvalidOperand::Empty);
        }
        let mut value: u64 = 0;
        for (position, &digit) in digits.iter().enumerate() {
            if digit > 9 {
                return Err(InvalidOperand::DigitOutOfRange {
                    position,
                    value: digit,
                });
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(digit)))
                .ok_or_else(|| InvalidOperand::TooLarge {
                    digits: digits.iter().map(|d| char::from(b'0' + d)).collect(),
                })?;
        }
        Ok(Self::new(value))
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Decimal digits, most significant first. Never empty.
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Digit at `index` into [`Self::digits`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the digit sequence; callers index with
    /// positions derived from this operand's own length.
    #[must_use]
    pub fn digit(&self, index: usize) -> u8 {
        self.digits[index]
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Operand {
    type Err = InvalidOperand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Operand {
    type Error = InvalidOperand;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Operand> for String {
    fn from(value: Operand) -> Self {
        value.to_string()
    }
}

impl From<u64> for Operand {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}
