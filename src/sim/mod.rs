//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendering frame, no delta time
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies
//! - Side effects surface as `GameEvent`s, never as calls out of the sim

pub mod collision;
pub mod level;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{GateScan, Hitbox, scan_gates};
pub use level::{ConfigError, LevelConfig, LevelPreset};
pub use state::{
    Boss, FrameSnapshot, GameEvent, GamePhase, GameState, Gate, Particle, Player,
};
pub use tick::{TickInput, spawn_gate, tick};
