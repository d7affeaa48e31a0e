//! Random operand pairs.

use longmul_types::Operand;

use crate::config::RandomConfig;

/// Draw one value in `min..=max` from a raw 64-bit sample.
///
/// The modulo bias is at most `(max - min + 1) / 2^64`, far below anything a
/// walkthrough could show.
#[must_use]
pub fn in_range(sample: u64, range: RandomConfig) -> u64 {
    debug_assert!(range.min <= range.max, "range is validated at load");
    match (range.max - range.min).checked_add(1) {
        Some(span) => range.min + sample % span,
        None => sample,
    }
}

/// Two operands drawn independently from `range`, using `sample` as the
/// entropy source.
pub fn operand_pair_with(
    range: RandomConfig,
    mut sample: impl FnMut() -> u64,
) -> (Operand, Operand) {
    let multiplicand = Operand::new(in_range(sample(), range));
    let multiplier = Operand::new(in_range(sample(), range));
    tracing::debug!(%multiplicand, %multiplier, "Drew random operands");
    (multiplicand, multiplier)
}

/// Two operands drawn from the thread-local generator.
#[must_use]
pub fn operand_pair(range: RandomConfig) -> (Operand, Operand) {
    operand_pair_with(range, rand::random::<u64>)
}
