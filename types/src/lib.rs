//! Domain types for long multiplication playback.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies:
//! validated operands, the atomic step records, timeline entries, the place-value
//! mapping between rows and columns, and the timers used for staged reveals.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod operand;
mod place;
mod step;
mod timeline;
mod timer;

pub use operand::{InvalidOperand, Operand};
pub use place::{PlaceValue, digit_at_column};
pub use step::{AdditionStep, MultiplicandSlot, MultiplicationStep, PartialProductRow};
pub use timeline::{DividerKind, SequencerState, StepPhase, TimelineEntry};
pub use timer::PhaseTimer;
