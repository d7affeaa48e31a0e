//! The full step timeline for one operand pair.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use longmul_types::{
    AdditionStep, DividerKind, InvalidOperand, MultiplicationStep, Operand, PartialProductRow,
    PlaceValue, SequencerState, TimelineEntry,
};

use crate::addition::sum_columns;
use crate::expand::expand;
use crate::partial::partial_products;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("timeline index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered, immutable list of every step for `multiplicand * multiplier`:
/// multiplication steps, the product divider, addition steps, the sum divider.
///
/// # Invariants
///
/// - `entries.len() == multiplication_len + 1 + addition_len + 1`
/// - Addition columns run `0, 1, 2, ...` with no gaps
/// - The addition digits, most significant first and with redundant leading
///   zeros removed, spell `product`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTimeline {
    multiplicand: Operand,
    multiplier: Operand,
    product: u128,
    rows: Vec<PartialProductRow>,
    entries: Vec<TimelineEntry>,
    multiplication_len: usize,
    addition_len: usize,
    overflowed_rows: usize,
    #[serde(skip)]
    pending_carries: BTreeMap<usize, u8>,
}

impl StepTimeline {
    /// Generate the timeline from validated operands. Pure and deterministic.
    #[must_use]
    pub fn generate(multiplicand: &Operand, multiplier: &Operand) -> Self {
        let expansion = expand(multiplicand, multiplier);
        let rows = partial_products(multiplicand, multiplier);
        let additions = sum_columns(&rows);

        let multiplication_len = expansion.steps.len();
        let addition_len = additions.len();
        let mut entries = Vec::with_capacity(multiplication_len + addition_len + 2);
        entries.extend(expansion.steps.into_iter().map(TimelineEntry::Multiply));
        entries.push(TimelineEntry::Divider {
            divider: DividerKind::Product,
        });
        entries.extend(additions.into_iter().map(TimelineEntry::Add));
        entries.push(TimelineEntry::Divider {
            divider: DividerKind::Sum,
        });

        let timeline = Self {
            multiplicand: multiplicand.clone(),
            multiplier: multiplier.clone(),
            product: u128::from(multiplicand.value()) * u128::from(multiplier.value()),
            rows,
            entries,
            multiplication_len,
            addition_len,
            overflowed_rows: expansion.overflowed_rows,
            pending_carries: expansion.pending_carries,
        };

        assert_eq!(
            timeline.result_digits(),
            decimal_digits(timeline.product),
            "column sums must reproduce {multiplicand} x {multiplier}"
        );
        tracing::debug!(
            multiplicand = %multiplicand,
            multiplier = %multiplier,
            total = timeline.len(),
            multiplication = multiplication_len,
            addition = addition_len,
            "Generated step timeline"
        );
        timeline
    }

    /// Validate both textual operands, then generate. Nothing is generated
    /// unless both operands are valid.
    pub fn parse(multiplicand: &str, multiplier: &str) -> Result<Self, InvalidOperand> {
        let multiplicand = Operand::parse(multiplicand)?;
        let multiplier = Operand::parse(multiplier)?;
        Ok(Self::generate(&multiplicand, &multiplier))
    }

    #[must_use]
    pub fn multiplicand(&self) -> &Operand {
        &self.multiplicand
    }

    #[must_use]
    pub fn multiplier(&self) -> &Operand {
        &self.multiplier
    }

    #[must_use]
    pub fn place(&self) -> PlaceValue {
        PlaceValue::new(self.multiplicand.len(), self.multiplier.len())
    }

    /// Ground-truth product computed directly from the operands.
    #[must_use]
    pub const fn product(&self) -> u128 {
        self.product
    }

    /// Partial-product rows, ones-digit row first.
    #[must_use]
    pub fn rows(&self) -> &[PartialProductRow] {
        &self.rows
    }

    /// Row produced by the multiplier digit at `multiplier_index`.
    #[must_use]
    pub fn row(&self, multiplier_index: usize) -> Option<&PartialProductRow> {
        self.rows
            .iter()
            .find(|row| row.multiplier_index() == multiplier_index)
    }

    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Total number of entries; also the largest valid cursor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry applied when the cursor moves to `cursor` (1-based).
    pub fn entry_for_cursor(&self, cursor: usize) -> Result<&TimelineEntry, TimelineError> {
        cursor
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .ok_or(TimelineError::IndexOutOfRange {
                index: cursor,
                len: self.entries.len(),
            })
    }

    #[must_use]
    pub const fn multiplication_len(&self) -> usize {
        self.multiplication_len
    }

    #[must_use]
    pub const fn addition_len(&self) -> usize {
        self.addition_len
    }

    /// Rows whose leftover carry needed an extra leading digit.
    #[must_use]
    pub const fn overflowed_rows(&self) -> usize {
        self.overflowed_rows
    }

    /// Carries the multiplication chain leaves pending, by target column.
    #[must_use]
    pub fn pending_carries(&self) -> &BTreeMap<usize, u8> {
        &self.pending_carries
    }

    /// Widest partial-product row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(PartialProductRow::len).max().unwrap_or(0)
    }

    pub fn multiplication_steps(&self) -> impl Iterator<Item = &MultiplicationStep> {
        self.entries.iter().filter_map(TimelineEntry::as_multiplication)
    }

    pub fn addition_steps(&self) -> impl Iterator<Item = &AdditionStep> {
        self.entries.iter().filter_map(TimelineEntry::as_addition)
    }

    /// Result reconstructed from the addition steps' display digits, most
    /// significant first.
    ///
    /// Columns above the true leading digit only exist when an operand is
    /// zero (every row is zeros); those are dropped so the result reads `0`
    /// rather than `00`.
    #[must_use]
    pub fn result_digits(&self) -> Vec<u8> {
        let mut digits: Vec<u8> = self
            .addition_steps()
            .map(AdditionStep::display_digit)
            .collect();
        digits.reverse();
        let leading_zeros = digits
            .iter()
            .take(digits.len().saturating_sub(1))
            .take_while(|&&d| d == 0)
            .count();
        digits.drain(..leading_zeros);
        digits
    }

    /// Sequencer state for a settled cursor position.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` exceeds [`Self::len`].
    #[must_use]
    pub fn state_at(&self, cursor: usize) -> SequencerState {
        assert!(
            cursor <= self.len(),
            "cursor {cursor} beyond timeline of {} entries",
            self.len()
        );
        let product_divider = self.multiplication_len + 1;
        let last_addition = product_divider + self.addition_len;
        match cursor {
            0 => SequencerState::NotStarted,
            c if c < product_divider => SequencerState::Multiplying,
            c if c == product_divider => SequencerState::MultiplicationDone,
            c if c <= last_addition => SequencerState::Adding,
            _ => SequencerState::Finished,
        }
    }
}

fn decimal_digits(value: u128) -> Vec<u8> {
    value.to_string().bytes().map(|b| b - b'0').collect()
}
