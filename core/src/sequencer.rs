//! Cursor-driven step sequencer.
//!
//! The sequencer owns the current timeline, a cursor in `0..=len`, and the
//! sub-phase of the entry the cursor last applied. It is advanced by exactly
//! one external pacer:
//!
//! ```text
//! advance() ──> Highlighting ──complete_phase──> Revealing ──complete_phase──> Cleared
//!    ^                                                                            |
//!    └────────────────────────────── next advance() accepted ─────────────────────┘
//! ```
//!
//! Every reset bumps the [`Generation`]; a [`PhaseTicket`] issued before the
//! bump is rejected as stale, so a delayed callback from an earlier operand
//! pair can never touch the current view.

use std::fmt;

use longmul_types::{InvalidOperand, Operand, SequencerState, StepPhase};

use crate::timeline::{StepTimeline, TimelineError};
use crate::view::{PhasedChange, ViewChange, ViewState, changes_for, sequencer_state};

/// Monotonic counter identifying one timeline lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Permission to move the entry at `cursor` into `phase`.
///
/// Issued by [`Sequencer::advance`] and [`Sequencer::complete_phase`]; only
/// the most recent ticket of the current generation is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseTicket {
    generation: Generation,
    cursor: usize,
    phase: StepPhase,
}

impl PhaseTicket {
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Phase the entry enters when this ticket is redeemed.
    #[must_use]
    pub const fn phase(&self) -> StepPhase {
        self.phase
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved forward by one and the entry entered `Highlighting`.
    Applied {
        cursor: usize,
        changes: Vec<ViewChange>,
        next: PhaseTicket,
    },
    /// The current entry has not finished its staged reveal.
    Busy { pending: PhaseTicket },
    /// The cursor already sits on the last entry.
    AtEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseOutcome {
    Applied {
        phase: StepPhase,
        changes: Vec<ViewChange>,
        next: Option<PhaseTicket>,
    },
    /// Ticket from an earlier generation, or for a phase no longer pending.
    Stale,
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    multiplicand: Operand,
    multiplier: Operand,
    timeline: StepTimeline,
    cursor: usize,
    phase: StepPhase,
    generation: Generation,
    view: ViewState,
}

impl Sequencer {
    #[must_use]
    pub fn new(multiplicand: Operand, multiplier: Operand) -> Self {
        let timeline = StepTimeline::generate(&multiplicand, &multiplier);
        Self {
            multiplicand,
            multiplier,
            timeline,
            cursor: 0,
            phase: StepPhase::Cleared,
            generation: Generation(0),
            view: ViewState::new(),
        }
    }

    pub fn parse(multiplicand: &str, multiplier: &str) -> Result<Self, InvalidOperand> {
        let multiplicand = Operand::parse(multiplicand)?;
        let multiplier = Operand::parse(multiplier)?;
        Ok(Self::new(multiplicand, multiplier))
    }

    #[must_use]
    pub fn timeline(&self) -> &StepTimeline {
        &self.timeline
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn phase(&self) -> StepPhase {
        self.phase
    }

    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.timeline.len()
    }

    #[must_use]
    pub fn state(&self) -> SequencerState {
        sequencer_state(&self.timeline, self.cursor, self.phase)
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor == self.timeline.len() && self.phase.is_settled()
    }

    /// Ticket for the current entry's next sub-phase, if its reveal is
    /// still in progress.
    #[must_use]
    pub fn pending_ticket(&self) -> Option<PhaseTicket> {
        self.phase.next().map(|phase| PhaseTicket {
            generation: self.generation,
            cursor: self.cursor,
            phase,
        })
    }

    /// Every change the entry at `cursor` makes: the delta from `cursor - 1`
    /// to `cursor`.
    pub fn changes_at(&self, cursor: usize) -> Result<Vec<PhasedChange>, TimelineError> {
        changes_for(&self.timeline, cursor)
    }

    /// Move the cursor forward by one entry.
    ///
    /// Rejected while the current entry is mid-reveal; a no-op at the end.
    pub fn advance(&mut self) -> Advance {
        if let Some(pending) = self.pending_ticket() {
            tracing::debug!(cursor = self.cursor, phase = ?self.phase, "Advance rejected: reveal in progress");
            return Advance::Busy { pending };
        }
        if self.cursor >= self.timeline.len() {
            return Advance::AtEnd;
        }

        self.cursor += 1;
        self.phase = StepPhase::Highlighting;
        self.view.begin_entry();
        let changes = self.apply_phase(StepPhase::Highlighting);
        tracing::debug!(
            cursor = self.cursor,
            generation = %self.generation,
            state = %self.state(),
            "Advanced cursor"
        );

        Advance::Applied {
            cursor: self.cursor,
            changes,
            next: PhaseTicket {
                generation: self.generation,
                cursor: self.cursor,
                phase: StepPhase::Revealing,
            },
        }
    }

    /// Redeem a ticket, moving the current entry into its next sub-phase.
    pub fn complete_phase(&mut self, ticket: PhaseTicket) -> PhaseOutcome {
        if Some(ticket) != self.pending_ticket() {
            tracing::warn!(
                ticket_generation = %ticket.generation,
                generation = %self.generation,
                ticket_cursor = ticket.cursor,
                cursor = self.cursor,
                "Ignoring stale phase ticket"
            );
            return PhaseOutcome::Stale;
        }

        self.phase = ticket.phase;
        let changes = self.apply_phase(ticket.phase);
        PhaseOutcome::Applied {
            phase: ticket.phase,
            changes,
            next: self.pending_ticket(),
        }
    }

    /// Finish the current entry's staged reveal without waiting.
    pub fn settle(&mut self) -> Vec<ViewChange> {
        let mut changes = Vec::new();
        while let Some(ticket) = self.pending_ticket() {
            if let PhaseOutcome::Applied {
                changes: applied, ..
            } = self.complete_phase(ticket)
            {
                changes.extend(applied);
            }
        }
        changes
    }

    /// Cursor back to zero with a freshly generated timeline for the same
    /// operands. Outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.timeline = StepTimeline::generate(&self.multiplicand, &self.multiplier);
        self.cursor = 0;
        self.phase = StepPhase::Cleared;
        self.generation = self.generation.next();
        self.view = ViewState::new();
        tracing::info!(
            multiplicand = %self.multiplicand,
            multiplier = %self.multiplier,
            generation = %self.generation,
            "Sequencer reset"
        );
    }

    /// Replace both operands; implies [`Self::reset`].
    pub fn set_operands(&mut self, multiplicand: Operand, multiplier: Operand) {
        self.multiplicand = multiplicand;
        self.multiplier = multiplier;
        self.reset();
    }

    /// Validate and replace both operands. On error nothing changes.
    pub fn set_operands_text(
        &mut self,
        multiplicand: &str,
        multiplier: &str,
    ) -> Result<(), InvalidOperand> {
        let multiplicand = Operand::parse(multiplicand).inspect_err(|err| {
            tracing::warn!(%err, "Rejected multiplicand");
        })?;
        let multiplier = Operand::parse(multiplier).inspect_err(|err| {
            tracing::warn!(%err, "Rejected multiplier");
        })?;
        self.set_operands(multiplicand, multiplier);
        Ok(())
    }

    fn apply_phase(&mut self, phase: StepPhase) -> Vec<ViewChange> {
        let changes = changes_for(&self.timeline, self.cursor)
            .expect("cursor is kept within 1..=len while an entry is applied");
        changes
            .into_iter()
            .filter(|phased| phased.phase == phase)
            .map(|phased| {
                self.view.apply(&phased.change);
                phased.change
            })
            .collect()
    }
}
