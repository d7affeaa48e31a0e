//! Timed playback of a [`Sequencer`].
//!
//! [`Playback`] is the single pacer the sequencer expects. It owns the
//! play/pause flag and the speed factor, decides what happens next and after
//! how long ([`Playback::next_action`]), and either fires that action on
//! demand ([`Playback::fire`]) or counts frame time down to it
//! ([`Playback::tick`]).
//!
//! Within one step the reveal is staged:
//!
//! ```text
//! step start ── reveal_delay ──> reveal ── carry_clear_delay ──> clear ── rest of step_interval ──> next step
//! ```
//!
//! Dividers reveal and clear immediately. The last addition step waits an
//! extra `final_clear_delay` before it wipes every carry. All delays are
//! divided by the speed factor when they are scheduled.

use std::time::Duration;

use longmul_core::{Advance, PhaseOutcome, PhaseTicket, Sequencer, ViewChange};
use longmul_types::{
    InvalidOperand, Operand, PhaseTimer, SequencerState, StepPhase, TimelineEntry,
};

use crate::config::{ConfigError, LongmulConfig, RandomConfig, Timings};
use crate::random;
use crate::speed::SpeedFactor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor to the next entry.
    Advance,
    /// Move the current entry into the ticket's sub-phase.
    CompletePhase(PhaseTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub action: Action,
    /// Already divided by the speed factor.
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fired {
    Advanced {
        cursor: usize,
        changes: Vec<ViewChange>,
    },
    Phase {
        cursor: usize,
        phase: StepPhase,
        changes: Vec<ViewChange>,
    },
    /// The action no longer applied: a stale ticket, a busy entry, or the
    /// end of the timeline.
    Ignored,
}

#[derive(Debug, Clone)]
struct Countdown {
    action: Action,
    timer: PhaseTimer,
}

#[derive(Debug, Clone)]
pub struct Playback {
    sequencer: Sequencer,
    timings: Timings,
    speed: SpeedFactor,
    random: RandomConfig,
    playing: bool,
    countdown: Option<Countdown>,
}

impl Playback {
    /// Starts paused at cursor zero.
    #[must_use]
    pub fn new(sequencer: Sequencer, timings: Timings, speed: SpeedFactor) -> Self {
        Self {
            sequencer,
            timings,
            speed,
            random: RandomConfig::default(),
            playing: false,
            countdown: None,
        }
    }

    /// Build from a loaded config. Operands come from the caller so command
    /// line values can take precedence.
    pub fn from_config(
        config: &LongmulConfig,
        multiplicand: Operand,
        multiplier: Operand,
    ) -> Result<Self, ConfigError> {
        let playback_config = config.playback();
        let mut playback = Self::new(
            Sequencer::new(multiplicand, multiplier),
            playback_config.timings(),
            config.speed()?,
        )
        .with_random_range(config.random()?);
        if playback_config.autoplay {
            playback.play();
        }
        Ok(playback)
    }

    #[must_use]
    pub fn with_random_range(mut self, range: RandomConfig) -> Self {
        self.random = range;
        self
    }

    #[must_use]
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    #[must_use]
    pub const fn timings(&self) -> Timings {
        self.timings
    }

    #[must_use]
    pub const fn speed(&self) -> SpeedFactor {
        self.speed
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.sequencer.is_finished()
    }

    // ── Controls ────────────────────────────────────────────────

    pub fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            tracing::debug!(cursor = self.sequencer.cursor(), "Playback started");
        }
    }

    /// Stops scheduling new steps. A reveal already in flight still runs to
    /// its cleared phase.
    pub fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            if matches!(
                self.countdown,
                Some(Countdown {
                    action: Action::Advance,
                    ..
                })
            ) {
                self.countdown = None;
            }
            tracing::debug!(cursor = self.sequencer.cursor(), "Playback paused");
        }
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Takes effect for the next scheduled action.
    pub fn set_speed(&mut self, speed: SpeedFactor) {
        self.speed = speed;
        self.countdown = None;
        tracing::debug!(%speed, "Speed changed");
    }

    /// Rewind to cursor zero and pause. Any scheduled action is dropped and
    /// outstanding tickets go stale.
    pub fn reset(&mut self) {
        self.playing = false;
        self.countdown = None;
        self.sequencer.reset();
    }

    /// Validate and replace both operands; implies [`Self::reset`]. On error
    /// nothing changes.
    pub fn set_operands(&mut self, multiplicand: &str, multiplier: &str) -> Result<(), InvalidOperand> {
        self.sequencer.set_operands_text(multiplicand, multiplier)?;
        self.playing = false;
        self.countdown = None;
        Ok(())
    }

    /// Draw fresh operands from the configured range; implies
    /// [`Self::reset`].
    pub fn randomize(&mut self) -> (Operand, Operand) {
        let pair = random::operand_pair(self.random);
        self.load_pair(pair)
    }

    pub fn randomize_with(&mut self, sample: impl FnMut() -> u64) -> (Operand, Operand) {
        let pair = random::operand_pair_with(self.random, sample);
        self.load_pair(pair)
    }

    fn load_pair(&mut self, (multiplicand, multiplier): (Operand, Operand)) -> (Operand, Operand) {
        self.sequencer
            .set_operands(multiplicand.clone(), multiplier.clone());
        self.playing = false;
        self.countdown = None;
        (multiplicand, multiplier)
    }

    /// Manual single step: finish the current entry's reveal, then apply the
    /// next entry fully. Returns every change made, in order.
    pub fn step(&mut self) -> Vec<ViewChange> {
        self.countdown = None;
        let mut changes = self.sequencer.settle();
        if let Advance::Applied { changes: applied, .. } = self.sequencer.advance() {
            changes.extend(applied);
            changes.extend(self.sequencer.settle());
        }
        changes
    }

    // ── Scheduling ──────────────────────────────────────────────

    /// What should happen next and how long to wait for it, or `None` when
    /// nothing is due: paused between steps, or at the end.
    #[must_use]
    pub fn next_action(&self) -> Option<Scheduled> {
        if let Some(ticket) = self.sequencer.pending_ticket() {
            return Some(Scheduled {
                action: Action::CompletePhase(ticket),
                delay: self.speed.scale(self.phase_delay(ticket.cursor(), ticket.phase())),
            });
        }
        let cursor = self.sequencer.cursor();
        if !self.playing || cursor >= self.sequencer.total_steps() {
            return None;
        }
        let delay = if cursor == 0 {
            self.timings.step_interval
        } else {
            self.timings
                .step_interval
                .saturating_sub(self.staged_delay(cursor))
        };
        Some(Scheduled {
            action: Action::Advance,
            delay: self.speed.scale(delay),
        })
    }

    /// Carry out `action` immediately.
    pub fn fire(&mut self, action: Action) -> Fired {
        self.countdown = None;
        match action {
            Action::Advance => match self.sequencer.advance() {
                Advance::Applied {
                    cursor, changes, ..
                } => Fired::Advanced { cursor, changes },
                Advance::Busy { .. } | Advance::AtEnd => Fired::Ignored,
            },
            Action::CompletePhase(ticket) => match self.sequencer.complete_phase(ticket) {
                PhaseOutcome::Applied { phase, changes, .. } => Fired::Phase {
                    cursor: ticket.cursor(),
                    phase,
                    changes,
                },
                PhaseOutcome::Stale => Fired::Ignored,
            },
        }
    }

    /// Feed elapsed frame time; fires every action whose delay runs out
    /// within `delta`, carrying leftover time into the next one.
    pub fn tick(&mut self, delta: Duration) -> Vec<Fired> {
        let mut fired = Vec::new();
        let mut budget = delta;
        loop {
            let Some(scheduled) = self.next_action() else {
                self.countdown = None;
                break;
            };
            let countdown = match self.countdown.take() {
                Some(countdown) if countdown.action == scheduled.action => countdown,
                _ => Countdown {
                    action: scheduled.action,
                    timer: PhaseTimer::new(scheduled.delay),
                },
            };
            let Countdown { action, mut timer } = countdown;
            let overshoot = timer.advance(budget);
            if !timer.is_finished() {
                self.countdown = Some(Countdown { action, timer });
                break;
            }
            fired.push(self.fire(action));
            budget = overshoot;
        }
        fired
    }

    /// Time left before the pending action fires, if one is counting down.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.countdown.as_ref().map(|countdown| countdown.timer.remaining())
    }

    /// Base delay before the entry at `cursor` enters `phase`.
    fn phase_delay(&self, cursor: usize, phase: StepPhase) -> Duration {
        let timeline = self.sequencer.timeline();
        let Ok(entry) = timeline.entry_for_cursor(cursor) else {
            return Duration::ZERO;
        };
        match (phase, entry) {
            (StepPhase::Revealing, TimelineEntry::Multiply(_) | TimelineEntry::Add(_)) => {
                self.timings.reveal_delay
            }
            (StepPhase::Cleared, TimelineEntry::Add(_)) => {
                let last_addition = timeline.multiplication_len() + 1 + timeline.addition_len();
                if cursor == last_addition {
                    self.timings.carry_clear_delay + self.timings.final_clear_delay
                } else {
                    self.timings.carry_clear_delay
                }
            }
            _ => Duration::ZERO,
        }
    }

    /// Base time the entry at `cursor` spends between highlight and clear.
    fn staged_delay(&self, cursor: usize) -> Duration {
        StepPhase::ALL
            .into_iter()
            .map(|phase| self.phase_delay(cursor, phase))
            .sum()
    }
}
