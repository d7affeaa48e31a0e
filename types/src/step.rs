//! Atomic arithmetic step records.
//!
//! Each record carries its own inputs and outputs so a presenter can narrate
//! it without recomputing anything. Fields are private; the constructors are
//! the only way to build a record, which keeps `display_digit` and
//! `produced_carry` consistent with the stated sum or product.

use serde::Serialize;

/// Which multiplicand digit a multiplication step consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplicandSlot {
    /// Index into the multiplicand's digits (most significant first).
    Digit(usize),
    /// Trailing step that writes a row's leftover carry as its leading digit.
    CarryFlush,
}

impl MultiplicandSlot {
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Digit(index) => Some(index),
            Self::CarryFlush => None,
        }
    }
}

/// One elementary digit-by-digit multiplication, or a row's carry flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MultiplicationStep {
    multiplier_index: usize,
    multiplicand: MultiplicandSlot,
    product: u8,
    used_carry: u8,
    produced_carry: u8,
    display_digit: u8,
}

impl MultiplicationStep {
    /// `multiplicand_digit * multiplier_digit + carry`.
    ///
    /// # Panics
    ///
    /// Panics if a digit exceeds 9 or the carry exceeds 8, the largest carry a
    /// single-digit multiplication chain can produce.
    #[must_use]
    pub fn digit(
        multiplier_index: usize,
        multiplicand_index: usize,
        multiplicand_digit: u8,
        multiplier_digit: u8,
        carry: u8,
    ) -> Self {
        assert!(multiplicand_digit <= 9 && multiplier_digit <= 9, "digits are 0..=9");
        assert!(carry <= 8, "multiplication carries never exceed 8");
        let product = multiplicand_digit * multiplier_digit + carry;
        Self {
            multiplier_index,
            multiplicand: MultiplicandSlot::Digit(multiplicand_index),
            product,
            used_carry: carry,
            produced_carry: product / 10,
            display_digit: product % 10,
        }
    }

    /// Write a row's outstanding carry as its leading digit.
    ///
    /// # Panics
    ///
    /// Panics unless `carry` is in `1..=8`; a zero carry never needs a flush.
    #[must_use]
    pub fn flush(multiplier_index: usize, carry: u8) -> Self {
        assert!((1..=8).contains(&carry), "flushed carry must be 1..=8");
        Self {
            multiplier_index,
            multiplicand: MultiplicandSlot::CarryFlush,
            product: carry,
            used_carry: 0,
            produced_carry: 0,
            display_digit: carry,
        }
    }

    #[must_use]
    pub const fn multiplier_index(&self) -> usize {
        self.multiplier_index
    }

    #[must_use]
    pub const fn multiplicand(&self) -> MultiplicandSlot {
        self.multiplicand
    }

    #[must_use]
    pub const fn is_flush(&self) -> bool {
        matches!(self.multiplicand, MultiplicandSlot::CarryFlush)
    }

    #[must_use]
    pub const fn product(&self) -> u8 {
        self.product
    }

    #[must_use]
    pub const fn used_carry(&self) -> u8 {
        self.used_carry
    }

    #[must_use]
    pub const fn produced_carry(&self) -> u8 {
        self.produced_carry
    }

    #[must_use]
    pub const fn display_digit(&self) -> u8 {
        self.display_digit
    }
}

/// Summation of one result column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AdditionStep {
    column: usize,
    addends: Vec<u8>,
    used_carry: u32,
    sum: u32,
    display_digit: u8,
    produced_carry: u32,
}

impl AdditionStep {
    /// Sum `addends` plus the incoming `carry` for `column` (0 = ones).
    #[must_use]
    pub fn column(column: usize, addends: Vec<u8>, carry: u32) -> Self {
        let sum = addends.iter().map(|&d| u32::from(d)).sum::<u32>() + carry;
        Self {
            column,
            addends,
            used_carry: carry,
            sum,
            display_digit: (sum % 10) as u8,
            produced_carry: sum / 10,
        }
    }

    /// Final step writing the leftover carry past the widest row.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < carry < 10`: a column sum's carry is always
    /// absorbed by the following column before it could reach two digits here.
    #[must_use]
    pub fn flush(column: usize, carry: u32) -> Self {
        assert!((1..10).contains(&carry), "flushed column carry must be 1..=9");
        Self::column(column, Vec::new(), carry)
    }

    #[must_use]
    pub const fn column_index(&self) -> usize {
        self.column
    }

    /// Partial-product digits landing in this column, in row order.
    #[must_use]
    pub fn addends(&self) -> &[u8] {
        &self.addends
    }

    #[must_use]
    pub const fn used_carry(&self) -> u32 {
        self.used_carry
    }

    #[must_use]
    pub const fn sum(&self) -> u32 {
        self.sum
    }

    #[must_use]
    pub const fn display_digit(&self) -> u8 {
        self.display_digit
    }

    #[must_use]
    pub const fn produced_carry(&self) -> u32 {
        self.produced_carry
    }
}

/// `multiplicand * digit(multiplier, multiplier_index)`, followed by
/// `shift` zeros of place-value padding. Digits are most significant first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PartialProductRow {
    multiplier_index: usize,
    shift: usize,
    digits: Vec<u8>,
}

impl PartialProductRow {
    /// # Panics
    ///
    /// Panics if `digits` is not longer than `shift`; every row holds at
    /// least one product digit ahead of its padding.
    #[must_use]
    pub fn new(multiplier_index: usize, shift: usize, digits: Vec<u8>) -> Self {
        assert!(
            digits.len() > shift,
            "row must hold product digits ahead of its padding"
        );
        Self {
            multiplier_index,
            shift,
            digits,
        }
    }

    #[must_use]
    pub const fn multiplier_index(&self) -> usize {
        self.multiplier_index
    }

    #[must_use]
    pub const fn shift(&self) -> usize {
        self.shift
    }

    /// Product digits followed by `shift` padding zeros.
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}
