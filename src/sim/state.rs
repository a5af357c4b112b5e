//! Game state and core simulation types
//!
//! The whole session lives in one `GameState` owned by the frame driver;
//! subsystems only ever see the slices the tick hands them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::LevelConfig;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Pre-run attract state, player hovers in place
    Idle,
    /// Full simulation active
    Running,
    /// Run ended in a crash
    EndedLoss,
    /// Run ended by clearing the boss
    EndedWin,
}

impl GamePhase {
    /// Both ways a run can end
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::EndedLoss | GamePhase::EndedWin)
    }
}

/// Discrete things that happened during a tick, for audio/presentation
/// subscribers. The simulation never performs side effects itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jump,
    GatePassed,
    Crash,
    BossSpawned,
    BossDefeated,
    Burst,
}

/// The controllable entity. Horizontal position is fixed at `PLAYER_X`.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Vertical position of the sprite center
    pub y: f32,
    /// Vertical velocity, pixels per tick
    pub vel: f32,
    /// Visual rotation in radians (cosmetic, lags velocity)
    pub rotation: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            y: PLAYER_START_Y,
            vel: 0.0,
            rotation: 0.0,
        }
    }

    /// Gravity + Euler integration for one tick
    pub fn integrate(&mut self) {
        self.vel += GRAVITY;
        self.y += self.vel;
    }

    /// Re-arm the upward impulse. Not additive: spamming jump caps the
    /// ascent rate at the impulse magnitude.
    pub fn jump(&mut self) {
        self.vel = JUMP_IMPULSE;
    }

    /// Ease rotation toward the velocity-derived target angle
    pub fn update_rotation(&mut self) {
        let target = (self.vel * ROT_VEL_SCALE).clamp(-ROT_MAX, ROT_MAX);
        self.rotation += (target - self.rotation) * ROT_SMOOTHING;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A paired top/bottom gated obstacle
#[derive(Debug, Clone, Copy)]
pub struct Gate {
    /// Leading (left) edge x
    pub x: f32,
    /// Vertical offset of the opening's top edge
    pub gap_top: f32,
    /// Set the first tick the player clears the trailing edge
    pub passed: bool,
}

impl Gate {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }

    /// Trailing (right) edge x
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + GATE_WIDTH
    }

    /// Fully off the trailing side of the screen, safe to recycle
    #[inline]
    pub fn off_screen(&self) -> bool {
        self.trailing_edge() < GATE_DESPAWN_X
    }
}

/// The scripted end-of-run adversary. One per run, never removed; a reset
/// deactivates it implicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boss {
    pub pos: Vec2,
    pub active: bool,
    /// One-shot: once true it never resets within a run
    pub passed: bool,
}

impl Boss {
    /// Appear off the right edge at mid-screen height
    pub fn spawn(&mut self) {
        self.pos = Vec2::new(PLAYFIELD_WIDTH + BOSS_RADIUS, PLAYFIELD_HEIGHT * 0.5);
        self.active = true;
    }

    /// Slow drift left with a sinusoidal bob centered on mid-screen
    pub fn advance(&mut self, gate_speed: f32, run_ticks: u64) {
        self.pos.x -= gate_speed * BOSS_SPEED_FACTOR;
        self.pos.y =
            PLAYFIELD_HEIGHT * 0.5 + BOSS_AMPLITUDE * (run_ticks as f32 * BOSS_FREQ).sin();
    }
}

/// A decorative particle
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in [0, 1]
    pub life: f32,
    /// Packed 0xRRGGBB
    pub color: u32,
}

/// Complete session state, owned by the frame driver
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Config snapshotted at run start, immutable for the run
    pub config: LevelConfig,
    pub player: Player,
    /// Sorted ascending by x; only the head is ever removed
    pub gates: Vec<Gate>,
    pub boss: Boss,
    pub particles: Vec<Particle>,
    /// Monotonically non-decreasing within a run
    pub score: u32,
    /// Display copy of the persisted high score
    pub high_score: u32,
    /// Total ticks since session creation (decor, idle bob)
    pub time_ticks: u64,
    /// Ticks since the current run started (spawn cadence, boss sinusoid)
    pub run_ticks: u64,
    /// Cosmetic ground scroll, wraps at `GROUND_TILE_WIDTH`
    pub ground_offset: f32,
}

impl GameState {
    /// Create a fresh session in the attract state
    pub fn new(seed: u64, config: LevelConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            config,
            player: Player::new(),
            gates: Vec::new(),
            boss: Boss::default(),
            particles: Vec::new(),
            score: 0,
            high_score: 0,
            time_ticks: 0,
            run_ticks: 0,
            ground_offset: 0.0,
        }
    }

    /// Reset run state and enter `Running`. The config is snapshotted here;
    /// preset changes between runs never reach gates already in flight.
    pub fn start_run(&mut self, config: LevelConfig) {
        self.config = config;
        self.player = Player::new();
        self.gates.clear();
        self.boss = Boss::default();
        self.particles.clear();
        self.score = 0;
        self.run_ticks = 0;
        self.phase = GamePhase::Running;
    }
}

/// Plain-data view of one tick's results for the rendering collaborator
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub player_y: f32,
    pub player_rotation: f32,
    pub gates: Vec<Gate>,
    pub boss: Boss,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub high_score: u32,
    pub ground_offset: f32,
}

impl GameState {
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            player_y: self.player.y,
            player_rotation: self.player.rotation,
            gates: self.gates.clone(),
            boss: self.boss,
            particles: self.particles.clone(),
            score: self.score,
            high_score: self.high_score,
            ground_offset: self.ground_offset,
        }
    }
}
