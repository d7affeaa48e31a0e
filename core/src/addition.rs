//! Column-wise summation of partial-product rows.

use longmul_types::{AdditionStep, PartialProductRow, digit_at_column};

/// Sum right-aligned rows one column at a time, ones column first.
///
/// Produces exactly one step per column in `0..W` where `W` is the widest
/// row, then one flush step at column `W` if a carry is left over. Rows too
/// short to reach a column contribute nothing to it.
#[must_use]
pub fn sum_columns(rows: &[PartialProductRow]) -> Vec<AdditionStep> {
    let width = rows.iter().map(PartialProductRow::len).max().unwrap_or(0);
    let mut steps = Vec::with_capacity(width + 1);
    let mut carry = 0u32;

    for column in 0..width {
        let addends: Vec<u8> = rows
            .iter()
            .filter_map(|row| digit_at_column(row.digits(), column))
            .collect();
        let step = AdditionStep::column(column, addends, carry);
        carry = step.produced_carry();
        steps.push(step);
    }

    if carry > 0 {
        steps.push(AdditionStep::flush(width, carry));
    }

    debug_assert!(
        steps.iter().enumerate().all(|(i, s)| s.column_index() == i),
        "addition columns must be contiguous from zero"
    );
    steps
}
