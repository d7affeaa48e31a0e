use serde::Deserialize;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use crate::speed::{SpeedFactor, SpeedFactorError};

// Default value functions for serde
const fn default_true() -> bool {
    true
}

const fn default_speed() -> f64 {
    1.0
}

const fn default_step_interval_ms() -> u64 {
    2000
}

const fn default_reveal_delay_ms() -> u64 {
    800
}

const fn default_carry_clear_delay_ms() -> u64 {
    500
}

const fn default_final_clear_delay_ms() -> u64 {
    100
}

fn default_multiplicand() -> String {
    "23".to_string()
}

fn default_multiplier() -> String {
    "45".to_string()
}

const fn default_random_min() -> u64 {
    10
}

const fn default_random_max() -> u64 {
    99
}

pub const SPEED_ENV_VAR: &str = "LONGMUL_SPEED";

#[derive(Debug, Default, Deserialize)]
pub struct LongmulConfig {
    pub playback: Option<PlaybackConfig>,
    pub operands: Option<OperandsConfig>,
    pub random: Option<RandomConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid speed in {origin}: {source}")]
    Speed {
        origin: String,
        source: SpeedFactorError,
    },
    #[error("random range is empty: min {min} > max {max}")]
    RandomRange { min: u64, max: u64 },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::Speed { .. } | ConfigError::RandomRange { .. } => None,
        }
    }
}

/// Playback pacing. Every duration is the 1x base value; the speed factor
/// divides them at scheduling time.
///
/// ```toml
/// [playback]
/// speed = 1.5
/// step_interval_ms = 2000
/// reveal_delay_ms = 800
/// carry_clear_delay_ms = 500
/// final_clear_delay_ms = 100
/// autoplay = true
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Time between two top-level steps.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
    /// Highlight to reveal, within one step.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
    /// Reveal to carry clear, within one addition step.
    #[serde(default = "default_carry_clear_delay_ms")]
    pub carry_clear_delay_ms: u64,
    /// Extra pause before the last addition step wipes every carry.
    #[serde(default = "default_final_clear_delay_ms")]
    pub final_clear_delay_ms: u64,
    #[serde(default = "default_true")]
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            step_interval_ms: default_step_interval_ms(),
            reveal_delay_ms: default_reveal_delay_ms(),
            carry_clear_delay_ms: default_carry_clear_delay_ms(),
            final_clear_delay_ms: default_final_clear_delay_ms(),
            autoplay: default_true(),
        }
    }
}

impl PlaybackConfig {
    #[must_use]
    pub fn timings(&self) -> Timings {
        Timings {
            step_interval: Duration::from_millis(self.step_interval_ms),
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            carry_clear_delay: Duration::from_millis(self.carry_clear_delay_ms),
            final_clear_delay: Duration::from_millis(self.final_clear_delay_ms),
        }
    }
}

/// Base (1x) durations of the staged reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub step_interval: Duration,
    pub reveal_delay: Duration,
    pub carry_clear_delay: Duration,
    pub final_clear_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        PlaybackConfig::default().timings()
    }
}

/// Operands shown when none are given on the command line.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OperandsConfig {
    #[serde(default = "default_multiplicand")]
    pub multiplicand: String,
    #[serde(default = "default_multiplier")]
    pub multiplier: String,
}

impl Default for OperandsConfig {
    fn default() -> Self {
        Self {
            multiplicand: default_multiplicand(),
            multiplier: default_multiplier(),
        }
    }
}

/// Inclusive bounds for random operands.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct RandomConfig {
    #[serde(default = "default_random_min")]
    pub min: u64,
    #[serde(default = "default_random_max")]
    pub max: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            min: default_random_min(),
            max: default_random_max(),
        }
    }
}

impl LongmulConfig {
    /// Load from the default location. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from an explicit path. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config");
                Ok(Some(config))
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn playback(&self) -> PlaybackConfig {
        self.playback.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn operands(&self) -> OperandsConfig {
        self.operands.clone().unwrap_or_default()
    }

    pub fn random(&self) -> Result<RandomConfig, ConfigError> {
        let random = self.random.unwrap_or_default();
        if random.min > random.max {
            return Err(ConfigError::RandomRange {
                min: random.min,
                max: random.max,
            });
        }
        Ok(random)
    }

    /// Speed factor from the environment, falling back to the config file.
    pub fn speed(&self) -> Result<SpeedFactor, ConfigError> {
        if let Ok(raw) = env::var(SPEED_ENV_VAR) {
            return speed_from_env(&raw);
        }
        SpeedFactor::new(self.playback().speed).map_err(|source| ConfigError::Speed {
            origin: "config".to_string(),
            source,
        })
    }
}

fn speed_from_env(raw: &str) -> Result<SpeedFactor, ConfigError> {
    let origin = SPEED_ENV_VAR.to_string();
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_err| ConfigError::Speed {
            origin: origin.clone(),
            source: SpeedFactorError::NotANumber(raw.to_string()),
        })?;
    SpeedFactor::new(value).map_err(|source| ConfigError::Speed { origin, source })
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".longmul").join("config.toml"))
}
