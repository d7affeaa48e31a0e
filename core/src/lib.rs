//! Step generation and sequencing for the long multiplication walkthrough.
//!
//! Three pure stages derive everything from the operand pair:
//!
//! - [`partial`]: one partial-product row per multiplier digit
//! - [`expand`]: one [`MultiplicationStep`] per digit pair, plus carry flushes
//! - [`addition`]: one [`AdditionStep`] per result column, plus a final flush
//!
//! [`StepTimeline`] concatenates the steps with the two dividers, and
//! [`Sequencer`] walks the timeline one entry at a time under an external pacer.
//!
//! [`MultiplicationStep`]: longmul_types::MultiplicationStep
//! [`AdditionStep`]: longmul_types::AdditionStep

pub mod addition;
pub mod expand;
pub mod partial;
mod sequencer;
mod timeline;
mod view;

pub use addition::sum_columns;
pub use expand::{Expansion, expand};
pub use partial::{generate_row, partial_products};
pub use sequencer::{Advance, Generation, PhaseOutcome, PhaseTicket, Sequencer};
pub use timeline::{StepTimeline, TimelineError};
pub use view::{
    CarryLane, CarryMark, Highlight, PhasedChange, RevealedDigit, ViewChange, ViewState,
    changes_for, sequencer_state, view_at,
};
