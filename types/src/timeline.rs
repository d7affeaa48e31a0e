//! Timeline entry and sequencer state types.

use std::fmt;

use serde::Serialize;

use crate::step::{AdditionStep, MultiplicationStep};

/// Horizontal rule drawn between phases of the worked solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DividerKind {
    /// Closes the multiplication phase; partial products are complete.
    Product,
    /// Closes the addition phase; the result is complete.
    Sum,
}

/// One top-level entry of the step timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEntry {
    Multiply(MultiplicationStep),
    Divider { divider: DividerKind },
    Add(AdditionStep),
}

impl TimelineEntry {
    #[must_use]
    pub fn as_multiplication(&self) -> Option<&MultiplicationStep> {
        match self {
            Self::Multiply(step) => Some(step),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_addition(&self) -> Option<&AdditionStep> {
        match self {
            Self::Add(step) => Some(step),
            _ => None,
        }
    }
}

/// Where the cursor sits relative to the two arithmetic phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencerState {
    NotStarted,
    Multiplying,
    MultiplicationDone,
    Adding,
    AdditionDone,
    Finished,
}

impl SequencerState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Multiplying => "multiplying",
            Self::MultiplicationDone => "multiplication done",
            Self::Adding => "adding",
            Self::AdditionDone => "addition done",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for SequencerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staged reveal within a single top-level step.
///
/// Every applied entry walks `Highlighting -> Revealing -> Cleared`; the next
/// entry is accepted only once the current one reaches `Cleared`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPhase {
    Highlighting,
    Revealing,
    Cleared,
}

impl StepPhase {
    pub const ALL: [StepPhase; 3] = [Self::Highlighting, Self::Revealing, Self::Cleared];

    /// The following sub-phase, or `None` once cleared.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Highlighting => Some(Self::Revealing),
            Self::Revealing => Some(Self::Cleared),
            Self::Cleared => None,
        }
    }

    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Cleared)
    }
}
