//! View changes and the derived view state.
//!
//! Every timeline entry translates into an ordered list of [`ViewChange`]s,
//! each tagged with the [`StepPhase`] in which it takes effect. A
//! [`ViewState`] is nothing more than the fold of those changes, so a
//! presenter can either animate the deltas or read the folded state; it never
//! has to redo arithmetic.

use std::collections::BTreeMap;

use serde::Serialize;

use longmul_types::{
    AdditionStep, DividerKind, MultiplicandSlot, MultiplicationStep, SequencerState, StepPhase,
    TimelineEntry,
};

use crate::timeline::{StepTimeline, TimelineError};

// ── Change vocabulary ────────────────────────────────────────

/// What a presenter should emphasize while a step is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    /// The multiplicand/multiplier digit pair being multiplied.
    Pair {
        multiplier_index: usize,
        multiplicand_index: usize,
    },
    /// The result column being summed.
    Column(usize),
}

/// Which part of the layout a carry is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CarryLane {
    /// Under the partial-product row of this multiplier digit.
    Row(usize),
    /// Above the column sums.
    Sum,
}

/// A carry value parked on the column it will be added into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CarryMark {
    pub lane: CarryLane,
    pub column: usize,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum ViewChange {
    Highlight { target: Highlight },
    ClearHighlight,
    RevealRowDigit {
        multiplier_index: usize,
        column: usize,
        digit: u8,
    },
    SetCarry { mark: CarryMark },
    ClearCarry { mark: CarryMark },
    ClearCarries,
    DrawDivider { divider: DividerKind },
    RevealResultDigit { column: usize, digit: u8 },
    RevealResult { digits: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PhasedChange {
    pub phase: StepPhase,
    pub change: ViewChange,
}

/// Every change the entry at `cursor` (1-based) makes, in application order.
pub fn changes_for(
    timeline: &StepTimeline,
    cursor: usize,
) -> Result<Vec<PhasedChange>, TimelineError> {
    let entry = timeline.entry_for_cursor(cursor)?;
    let mut out = Vec::new();
    let mut push =
        |phase: StepPhase, change: ViewChange| out.push(PhasedChange { phase, change });

    match entry {
        TimelineEntry::Multiply(step) => {
            let previous = cursor
                .checked_sub(2)
                .and_then(|index| timeline.entries().get(index))
                .and_then(TimelineEntry::as_multiplication);
            multiplication_changes(timeline, step, previous, &mut push);
        }
        TimelineEntry::Divider {
            divider: DividerKind::Product,
        } => {
            push(StepPhase::Revealing, ViewChange::ClearCarries);
            push(
                StepPhase::Revealing,
                ViewChange::DrawDivider {
                    divider: DividerKind::Product,
                },
            );
            for (&column, &value) in timeline.pending_carries() {
                push(
                    StepPhase::Revealing,
                    ViewChange::SetCarry {
                        mark: CarryMark {
                            lane: CarryLane::Sum,
                            column,
                            value: u32::from(value),
                        },
                    },
                );
            }
        }
        TimelineEntry::Add(step) => {
            let is_last = step.column_index() + 1 == timeline.addition_len();
            addition_changes(step, is_last, &mut push);
        }
        TimelineEntry::Divider {
            divider: DividerKind::Sum,
        } => {
            push(
                StepPhase::Revealing,
                ViewChange::DrawDivider {
                    divider: DividerKind::Sum,
                },
            );
            push(
                StepPhase::Revealing,
                ViewChange::RevealResult {
                    digits: timeline.result_digits(),
                },
            );
        }
    }

    Ok(out)
}

fn multiplication_carry(timeline: &StepTimeline, step: &MultiplicationStep) -> Option<CarryMark> {
    (step.produced_carry() > 0).then(|| CarryMark {
        lane: CarryLane::Row(step.multiplier_index()),
        column: timeline
            .place()
            .carry_column(step.multiplier_index(), step.multiplicand()),
        value: u32::from(step.produced_carry()),
    })
}

fn multiplication_changes(
    timeline: &StepTimeline,
    step: &MultiplicationStep,
    previous: Option<&MultiplicationStep>,
    push: &mut impl FnMut(StepPhase, ViewChange),
) {
    let slot = step.multiplicand();
    if let MultiplicandSlot::Digit(multiplicand_index) = slot {
        push(
            StepPhase::Highlighting,
            ViewChange::Highlight {
                target: Highlight::Pair {
                    multiplier_index: step.multiplier_index(),
                    multiplicand_index,
                },
            },
        );
    }

    push(
        StepPhase::Revealing,
        ViewChange::RevealRowDigit {
            multiplier_index: step.multiplier_index(),
            column: timeline.place().column(step.multiplier_index(), slot),
            digit: step.display_digit(),
        },
    );
    // The previous step's carry is consumed by this one, either added into
    // the product or written out by a flush.
    if let Some(mark) = previous.and_then(|prev| multiplication_carry(timeline, prev)) {
        push(StepPhase::Revealing, ViewChange::ClearCarry { mark });
    }
    if let Some(mark) = multiplication_carry(timeline, step) {
        push(StepPhase::Revealing, ViewChange::SetCarry { mark });
    }
    if !step.is_flush() {
        push(StepPhase::Revealing, ViewChange::ClearHighlight);
    }
}

fn addition_changes(
    step: &AdditionStep,
    is_last: bool,
    push: &mut impl FnMut(StepPhase, ViewChange),
) {
    let column = step.column_index();
    push(
        StepPhase::Highlighting,
        ViewChange::Highlight {
            target: Highlight::Column(column),
        },
    );

    push(
        StepPhase::Revealing,
        ViewChange::RevealResultDigit {
            column,
            digit: step.display_digit(),
        },
    );
    if step.produced_carry() > 0 {
        push(
            StepPhase::Revealing,
            ViewChange::SetCarry {
                mark: CarryMark {
                    lane: CarryLane::Sum,
                    column: column + 1,
                    value: step.produced_carry(),
                },
            },
        );
    }

    if step.used_carry() > 0 {
        push(
            StepPhase::Cleared,
            ViewChange::ClearCarry {
                mark: CarryMark {
                    lane: CarryLane::Sum,
                    column,
                    value: step.used_carry(),
                },
            },
        );
    }
    push(StepPhase::Cleared, ViewChange::ClearHighlight);
    if is_last {
        push(StepPhase::Cleared, ViewChange::ClearCarries);
    }
}

// ── Folded state ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RevealedDigit {
    pub column: usize,
    pub digit: u8,
    /// Revealed by the entry currently being applied. Presenters animate
    /// fresh digits once and draw the rest statically.
    pub fresh: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub highlight: Option<Highlight>,
    /// Revealed partial-product digits keyed by multiplier index, in reveal
    /// order (ones column first).
    pub rows: BTreeMap<usize, Vec<RevealedDigit>>,
    pub carries: BTreeMap<(CarryLane, usize), u32>,
    pub dividers: Vec<DividerKind>,
    /// Revealed result digits in reveal order (ones column first).
    pub result: Vec<RevealedDigit>,
    /// Full result, most significant first, once the sum divider is drawn.
    pub final_result: Option<Vec<u8>>,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start applying a new entry: earlier reveals stop being fresh.
    pub fn begin_entry(&mut self) {
        for digit in self.rows.values_mut().flatten() {
            digit.fresh = false;
        }
        for digit in &mut self.result {
            digit.fresh = false;
        }
    }

    pub fn apply(&mut self, change: &ViewChange) {
        match change {
            ViewChange::Highlight { target } => self.highlight = Some(*target),
            ViewChange::ClearHighlight => self.highlight = None,
            ViewChange::RevealRowDigit {
                multiplier_index,
                column,
                digit,
            } => self
                .rows
                .entry(*multiplier_index)
                .or_default()
                .push(RevealedDigit {
                    column: *column,
                    digit: *digit,
                    fresh: true,
                }),
            ViewChange::SetCarry { mark } => {
                self.carries.insert((mark.lane, mark.column), mark.value);
            }
            ViewChange::ClearCarry { mark } => {
                self.carries.remove(&(mark.lane, mark.column));
            }
            ViewChange::ClearCarries => self.carries.clear(),
            ViewChange::DrawDivider { divider } => self.dividers.push(*divider),
            ViewChange::RevealResultDigit { column, digit } => self.result.push(RevealedDigit {
                column: *column,
                digit: *digit,
                fresh: true,
            }),
            ViewChange::RevealResult { digits } => self.final_result = Some(digits.clone()),
        }
    }

    /// Revealed digits of one partial-product row, most significant first.
    #[must_use]
    pub fn row_digits(&self, multiplier_index: usize) -> Vec<u8> {
        self.rows
            .get(&multiplier_index)
            .map(|digits| digits.iter().rev().map(|d| d.digit).collect())
            .unwrap_or_default()
    }

    /// Revealed result digits, most significant first.
    #[must_use]
    pub fn result_digits(&self) -> Vec<u8> {
        self.result.iter().rev().map(|d| d.digit).collect()
    }

    /// Carries currently drawn in `lane`, by column.
    pub fn carries_in(&self, lane: CarryLane) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.carries
            .iter()
            .filter(move |((l, _), _)| *l == lane)
            .map(|(&(_, column), &value)| (column, value))
    }
}

/// Sequencer state at a cursor position and sub-phase.
///
/// Once the last addition step has fully cleared, the sequence reports
/// `AdditionDone` until the sum divider is applied.
///
/// # Panics
///
/// Panics if `cursor` exceeds the timeline length.
#[must_use]
pub fn sequencer_state(timeline: &StepTimeline, cursor: usize, phase: StepPhase) -> SequencerState {
    let last_addition = timeline.multiplication_len() + 1 + timeline.addition_len();
    if cursor == last_addition && phase.is_settled() {
        return SequencerState::AdditionDone;
    }
    timeline.state_at(cursor)
}

/// Fold every change up to `cursor` at `phase`. Pure: depends only on the
/// timeline and the position.
pub fn view_at(
    timeline: &StepTimeline,
    cursor: usize,
    phase: StepPhase,
) -> Result<ViewState, TimelineError> {
    if cursor > timeline.len() {
        return Err(TimelineError::IndexOutOfRange {
            index: cursor,
            len: timeline.len(),
        });
    }
    let mut view = ViewState::new();
    for k in 1..=cursor {
        view.begin_entry();
        let limit = if k == cursor { phase } else { StepPhase::Cleared };
        for phased in changes_for(timeline, k)? {
            if phased.phase <= limit {
                view.apply(&phased.change);
            }
        }
    }
    Ok(view)
}
