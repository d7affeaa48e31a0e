//! Partial-product rows.

use longmul_types::{Operand, PartialProductRow, PlaceValue};

/// Multiply `multiplicand` (most significant first) by one digit and append
/// `shift` place-value zeros.
///
/// A leftover carry becomes one extra leading digit, so a row can be one
/// digit wider than the multiplicand. A zero multiplier digit yields a row of
/// zeros the width of the multiplicand.
///
/// # Panics
///
/// Panics if `multiplicand` is empty or any digit exceeds 9.
#[must_use]
pub fn generate_row(multiplicand: &[u8], multiplier_digit: u8, shift: usize) -> Vec<u8> {
    assert!(!multiplicand.is_empty(), "multiplicand must have digits");
    assert!(multiplier_digit <= 9, "multiplier digit must be 0..=9");

    let mut row = Vec::with_capacity(multiplicand.len() + 1 + shift);
    let mut carry = 0u8;
    for &digit in multiplicand.iter().rev() {
        assert!(digit <= 9, "multiplicand digit must be 0..=9");
        let product = digit * multiplier_digit + carry;
        row.push(product % 10);
        carry = product / 10;
    }
    if carry > 0 {
        row.push(carry);
    }
    row.reverse();
    row.resize(row.len() + shift, 0);
    row
}

/// One row per multiplier digit, ones digit first.
///
/// Rows for zero multiplier digits are kept so every multiplier digit owns a
/// row and the row count always equals the multiplier's digit count.
#[must_use]
pub fn partial_products(multiplicand: &Operand, multiplier: &Operand) -> Vec<PartialProductRow> {
    let place = PlaceValue::new(multiplicand.len(), multiplier.len());
    (0..multiplier.len())
        .rev()
        .map(|multiplier_index| {
            let shift = place.row_shift(multiplier_index);
            let digits = generate_row(
                multiplicand.digits(),
                multiplier.digit(multiplier_index),
                shift,
            );
            PartialProductRow::new(multiplier_index, shift, digits)
        })
        .collect()
}
