//! Playback engine for the long multiplication walkthrough.
//!
//! Wraps a [`longmul_core::Sequencer`] with everything a front end needs to
//! run it: configuration loading, a speed-scaled timer that drives the
//! staged reveal, random operand selection, and a plain-text presenter.

mod config;
mod playback;
pub mod random;
mod speed;
pub mod text;

pub use config::{
    ConfigError, LongmulConfig, OperandsConfig, PlaybackConfig, RandomConfig, SPEED_ENV_VAR,
    Timings, config_path,
};
pub use playback::{Action, Fired, Playback, Scheduled};
pub use speed::{SpeedFactor, SpeedFactorError};

pub use longmul_core::{
    Advance, PhaseOutcome, PhaseTicket, Sequencer, StepTimeline, TimelineError, ViewChange,
    ViewState,
};
pub use longmul_types::{InvalidOperand, Operand, SequencerState, StepPhase};
