//! Digit-by-digit expansion of the multiplication phase.

use std::collections::BTreeMap;

use longmul_types::{MultiplicationStep, Operand};

/// Multiplication steps plus the state the carry chain leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub steps: Vec<MultiplicationStep>,
    /// Carries still pending once every row is written, keyed by the result
    /// column they target. The addition phase seeds its carry display from
    /// this instead of replaying the chain.
    pub pending_carries: BTreeMap<usize, u8>,
    /// Number of rows that needed a carry-flush step.
    pub overflowed_rows: usize,
}

/// Unroll the multiplication into one step per digit pair.
///
/// Ordering is part of the contract: multiplier digits from the ones digit
/// leftward, and within a row multiplicand digits from the ones digit
/// leftward, each row closed by a flush step when a carry remains.
#[must_use]
pub fn expand(multiplicand: &Operand, multiplier: &Operand) -> Expansion {
    let mut steps = Vec::with_capacity(multiplicand.len() * multiplier.len() + multiplier.len());
    let mut overflowed_rows = 0;

    for multiplier_index in (0..multiplier.len()).rev() {
        let multiplier_digit = multiplier.digit(multiplier_index);
        let mut carry = 0u8;

        for multiplicand_index in (0..multiplicand.len()).rev() {
            let step = MultiplicationStep::digit(
                multiplier_index,
                multiplicand_index,
                multiplicand.digit(multiplicand_index),
                multiplier_digit,
                carry,
            );
            carry = step.produced_carry();
            steps.push(step);
        }

        if carry > 0 {
            steps.push(MultiplicationStep::flush(multiplier_index, carry));
            overflowed_rows += 1;
        }
    }

    tracing::debug!(
        multiplicand = %multiplicand,
        multiplier = %multiplier,
        steps = steps.len(),
        overflowed_rows,
        "Expanded multiplication steps"
    );

    // Every row closes with a flush, so no carry outlives its chain.
    Expansion {
        steps,
        pending_carries: BTreeMap::new(),
        overflowed_rows,
    }
}
