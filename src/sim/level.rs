//! Difficulty presets and run configuration
//!
//! A config is chosen before a run and snapshotted into the session for the
//! run's duration. Invalid values are a programming error caught at
//! configuration time, never mid-run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GATE_MARGIN, PLAYFIELD_HEIGHT};

/// Rejected configuration values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("gap {gap} plus margins does not fit the {height} playfield")]
    GapTooLarge { gap: f32, height: f32 },
    #[error("spawn cadence must be at least one tick")]
    ZeroCadence,
}

/// Immutable per-run tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Gate scroll speed, pixels per tick
    pub gate_speed: f32,
    /// Ticks between gate spawns
    pub spawn_cadence: u32,
    /// Vertical size of the opening
    pub gap: f32,
    /// Score that triggers the boss and suppresses further spawning
    pub win_threshold: u32,
}

impl LevelConfig {
    /// Reject values the spawn-range math cannot satisfy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gap + 2.0 * GATE_MARGIN >= PLAYFIELD_HEIGHT {
            return Err(ConfigError::GapTooLarge {
                gap: self.gap,
                height: PLAYFIELD_HEIGHT,
            });
        }
        if self.spawn_cadence == 0 {
            return Err(ConfigError::ZeroCadence);
        }
        Ok(())
    }
}

/// Named difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl LevelPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelPreset::Easy => "Easy",
            LevelPreset::Normal => "Normal",
            LevelPreset::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(LevelPreset::Easy),
            "normal" | "medium" => Some(LevelPreset::Normal),
            "hard" => Some(LevelPreset::Hard),
            _ => None,
        }
    }

    /// The tuning values for this tier
    pub fn config(&self) -> LevelConfig {
        match self {
            LevelPreset::Easy => LevelConfig {
                gate_speed: 2.0,
                spawn_cadence: 110,
                gap: 170.0,
                win_threshold: 10,
            },
            LevelPreset::Normal => LevelConfig {
                gate_speed: 3.0,
                spawn_cadence: 90,
                gap: 140.0,
                win_threshold: 10,
            },
            LevelPreset::Hard => LevelConfig {
                gate_speed: 4.0,
                spawn_cadence: 75,
                gap: 115.0,
                win_threshold: 15,
            },
        }
    }
}
