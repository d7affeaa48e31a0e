//! Frame-driven timers for staged reveals.

use std::time::Duration;

/// Counts elapsed frame time against a fixed duration.
///
/// Time fed past the deadline is handed back by [`PhaseTimer::advance`] so a
/// frame that crosses several deadlines does not lose time.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    elapsed: Duration,
    duration: Duration,
}

impl PhaseTimer {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Feed `delta`; returns the portion that overshot the deadline.
    pub fn advance(&mut self, delta: Duration) -> Duration {
        let before = self.remaining();
        self.elapsed = self.elapsed.saturating_add(delta);
        delta.saturating_sub(before)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }
}
