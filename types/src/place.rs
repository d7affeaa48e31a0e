//! Place-value mapping between the two coordinate systems of the worked
//! solution.
//!
//! Rows are indexed by multiplier digit; columns are result positions counted
//! from the ones place (column 0) leftward. The only join between them is the
//! row's place-value shift, and every conversion goes through this module.

use crate::step::MultiplicandSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceValue {
    multiplicand_len: usize,
    multiplier_len: usize,
}

impl PlaceValue {
    /// # Panics
    ///
    /// Panics if either length is zero; operands always hold a digit.
    #[must_use]
    pub fn new(multiplicand_len: usize, multiplier_len: usize) -> Self {
        assert!(
            multiplicand_len > 0 && multiplier_len > 0,
            "operands always have at least one digit"
        );
        Self {
            multiplicand_len,
            multiplier_len,
        }
    }

    #[must_use]
    pub const fn multiplicand_len(&self) -> usize {
        self.multiplicand_len
    }

    #[must_use]
    pub const fn multiplier_len(&self) -> usize {
        self.multiplier_len
    }

    /// Trailing zeros appended to the row of `multiplier_index`: its distance
    /// from the multiplier's ones digit.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier_index` is not a multiplier digit index.
    #[must_use]
    pub fn row_shift(&self, multiplier_index: usize) -> usize {
        assert!(
            multiplier_index < self.multiplier_len,
            "multiplier index {multiplier_index} out of range for {} digits",
            self.multiplier_len
        );
        self.multiplier_len - 1 - multiplier_index
    }

    /// Distance of the digit written by `slot` from the right end of the
    /// row's unpadded product.
    ///
    /// # Panics
    ///
    /// Panics if `slot` names a multiplicand index outside the operand.
    #[must_use]
    pub fn slot_offset(&self, slot: MultiplicandSlot) -> usize {
        match slot {
            MultiplicandSlot::Digit(index) => {
                assert!(
                    index < self.multiplicand_len,
                    "multiplicand index {index} out of range for {} digits",
                    self.multiplicand_len
                );
                self.multiplicand_len - 1 - index
            }
            MultiplicandSlot::CarryFlush => self.multiplicand_len,
        }
    }

    /// Result column of the digit a multiplication step writes.
    #[must_use]
    pub fn column(&self, multiplier_index: usize, slot: MultiplicandSlot) -> usize {
        self.row_shift(multiplier_index) + self.slot_offset(slot)
    }

    /// Result column the carry produced by a step is added into.
    #[must_use]
    pub fn carry_column(&self, multiplier_index: usize, slot: MultiplicandSlot) -> usize {
        self.column(multiplier_index, slot) + 1
    }
}

/// Digit of a right-aligned, most-significant-first sequence at `column`,
/// or `None` when the sequence is too short to reach it.
#[must_use]
pub fn digit_at_column(digits: &[u8], column: usize) -> Option<u8> {
    let index = digits.len().checked_sub(column.checked_add(1)?)?;
    Some(digits[index])
}
