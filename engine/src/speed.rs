//! Playback speed multiplier.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeedFactorError {
    #[error("speed must be a number, got {0:?}")]
    NotANumber(String),
    #[error("speed must be finite and greater than zero, got {0}")]
    OutOfRange(String),
}

/// Divides every base delay: `2.0` plays twice as fast.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpeedFactor(f64);

impl SpeedFactor {
    pub const NORMAL: Self = Self(1.0);

    pub fn new(value: f64) -> Result<Self, SpeedFactorError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(SpeedFactorError::OutOfRange(value.to_string()))
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// `base / speed`, rounded to the nearest nanosecond.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn scale(self, base: Duration) -> Duration {
        let nanos = (base.as_nanos() as f64 / self.0).round();
        if nanos >= u64::MAX as f64 {
            return Duration::from_nanos(u64::MAX);
        }
        Duration::from_nanos(nanos as u64)
    }
}

impl Default for SpeedFactor {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for SpeedFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

impl FromStr for SpeedFactor {
    type Err = SpeedFactorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .trim_end_matches(['x', 'X'])
            .parse::<f64>()
            .map_err(|_err| SpeedFactorError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}
