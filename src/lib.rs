//! Gap Runner - a gravity-and-impulse arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, gates, boss, particles)
//! - `driver`: Frame driver owning the session and the per-frame loop
//! - `highscores`: Best-effort persistence of the single high-score integer
//! - `commentary`: Fire-and-forget post-run commentary client

pub mod commentary;
pub mod driver;
pub mod highscores;
pub mod sim;

pub use driver::{DriverHandle, FrameDriver};
pub use highscores::HighScoreStore;
pub use sim::{GamePhase, GameState, LevelPreset, TickInput, tick};

/// Game configuration constants
///
/// All motion is expressed in pixels per tick; one tick per rendering frame.
pub mod consts {
    /// Nominal tick rate (ticks are frame-locked, this only paces the native loop)
    pub const TICK_HZ: u32 = 60;

    /// Playfield dimensions (y grows downward, ground at the bottom edge)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 480.0;

    /// Player sprite extent and fixed horizontal position
    pub const PLAYER_X: f32 = 120.0;
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    pub const PLAYER_START_Y: f32 = PLAYFIELD_HEIGHT * 0.5;
    /// Hitbox inset per side (forgives near-misses)
    pub const HITBOX_INSET: f32 = 5.0;

    /// Vertical physics (per tick)
    pub const GRAVITY: f32 = 0.4;
    pub const JUMP_IMPULSE: f32 = -7.0;

    /// Visual rotation: lagged nose-down/nose-up, never part of collision
    pub const ROT_VEL_SCALE: f32 = 0.06;
    pub const ROT_MAX: f32 = 1.2;
    pub const ROT_SMOOTHING: f32 = 0.15;

    /// Idle hover animation
    pub const IDLE_BOB_SPEED: f32 = 0.05;
    pub const IDLE_BOB_HEIGHT: f32 = 12.0;

    /// Gates
    pub const GATE_WIDTH: f32 = 70.0;
    /// Minimum clearance between a gap edge and the playfield edge
    pub const GATE_MARGIN: f32 = 50.0;
    /// Head gate is recycled once its trailing edge is left of this
    pub const GATE_DESPAWN_X: f32 = -100.0;

    /// Boss encounter
    pub const BOSS_SPEED_FACTOR: f32 = 0.5;
    pub const BOSS_AMPLITUDE: f32 = 120.0;
    pub const BOSS_FREQ: f32 = 0.045;
    pub const BOSS_RADIUS: f32 = 40.0;
    /// Effective player radius for the boss circle test
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const COLLISION_FORGIVENESS: f32 = 6.0;
    /// Boss is passed once its x crosses the player's column
    pub const BOSS_WIN_X: f32 = PLAYER_X;

    /// Particles (per tick)
    pub const BURST_SIZE: usize = 24;
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 5.0;
    pub const PARTICLE_GRAVITY: f32 = 0.12;
    pub const PARTICLE_FADE: f32 = 0.02;
    /// Per-tick chance of a fresh fireworks burst while in the victory state
    pub const FIREWORK_CHANCE: f64 = 0.06;

    /// Decor ground tile width (scroll offset wraps at this)
    pub const GROUND_TILE_WIDTH: f32 = 48.0;
}

/// Pack an HSV hue (saturation/value fixed at full) into 0xRRGGBB
#[inline]
pub fn hue_to_rgb(hue: f32) -> u32 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    ((r * 255.0) as u32) << 16 | ((g * 255.0) as u32) << 8 | (b * 255.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_primaries() {
        assert_eq!(hue_to_rgb(0.0), 0xff0000);
        assert_eq!(hue_to_rgb(120.0), 0x00ff00);
        assert_eq!(hue_to_rgb(240.0), 0x0000ff);
        assert_eq!(hue_to_rgb(360.0), hue_to_rgb(0.0));
    }
}
