//! Per-frame simulation tick
//!
//! One synchronous update per rendering frame. Exactly one phase handler runs
//! per tick; decor scrolling is the only thing that moves in every phase.

use rand::Rng;

use super::collision::{self, Hitbox};
use super::particles::{self, LOSS_PALETTE, WIN_PALETTE};
use super::state::{GameEvent, GamePhase, GameState, Gate};
use crate::consts::*;

/// Commands applied to a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// The one contextual button: start, jump, or retry
    pub activate: bool,
    /// Leave a terminal phase for the attract state
    pub menu: bool,
}

/// Advance the session by one tick, returning the events it produced
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.time_ticks += 1;
    // Cosmetic ground scroll, carries no gameplay semantics
    state.ground_offset =
        (state.ground_offset + state.config.gate_speed) % GROUND_TILE_WIDTH;

    match state.phase {
        GamePhase::Idle => {
            hover(state);
            if input.activate {
                let config = state.config;
                state.start_run(config);
                state.player.jump();
                events.push(GameEvent::Jump);
            }
        }

        GamePhase::Running => {
            state.run_ticks += 1;

            if input.activate {
                state.player.jump();
                events.push(GameEvent::Jump);
            }
            state.player.integrate();
            state.player.update_rotation();

            advance_gates(state);
            if state.score < state.config.win_threshold
                && state.run_ticks.is_multiple_of(state.config.spawn_cadence as u64)
            {
                spawn_gate(state);
            }
            recycle_gates(state);

            if state.boss.active {
                state.boss.advance(state.config.gate_speed, state.run_ticks);
            } else if state.score >= state.config.win_threshold && !state.boss.passed {
                state.boss.spawn();
                events.push(GameEvent::BossSpawned);
            }

            let hitbox = Hitbox::of_player(&state.player);
            let scan = collision::scan_gates(&hitbox, &state.gates, state.config.gap);
            let crashed = collision::hits_bounds(&hitbox)
                || scan.crashed
                || collision::hits_boss(&state.player, &state.boss);

            for idx in scan.passed {
                state.gates[idx].passed = true;
                state.score += 1;
                events.push(GameEvent::GatePassed);
            }

            if crashed {
                state.phase = GamePhase::EndedLoss;
                let origin = glam::Vec2::new(PLAYER_X, state.player.y);
                particles::burst(&mut state.particles, &mut state.rng, origin, &LOSS_PALETTE);
                events.push(GameEvent::Crash);
                events.push(GameEvent::Burst);
            } else if state.boss.active
                && !state.boss.passed
                && state.boss.pos.x <= BOSS_WIN_X
            {
                state.boss.passed = true;
                state.score += 1;
                state.phase = GamePhase::EndedWin;
                let origin = state.boss.pos;
                particles::burst(&mut state.particles, &mut state.rng, origin, &WIN_PALETTE);
                events.push(GameEvent::BossDefeated);
                events.push(GameEvent::Burst);
            }
        }

        GamePhase::EndedLoss | GamePhase::EndedWin => {
            particles::integrate(&mut state.particles);

            if state.phase == GamePhase::EndedWin
                && state.rng.random_bool(FIREWORK_CHANCE)
            {
                particles::firework(&mut state.particles, &mut state.rng);
                events.push(GameEvent::Burst);
            }

            if input.activate {
                let config = state.config;
                state.start_run(config);
                state.player.jump();
                events.push(GameEvent::Jump);
            } else if input.menu {
                state.particles.clear();
                state.player = super::state::Player::new();
                state.phase = GamePhase::Idle;
            }
        }
    }

    events
}

/// Idle hover: sinusoidal bob around the start height, rotation easing flat
fn hover(state: &mut GameState) {
    state.player.y = PLAYER_START_Y
        + (state.time_ticks as f32 * IDLE_BOB_SPEED).sin() * IDLE_BOB_HEIGHT;
    state.player.vel = 0.0;
    state.player.rotation -= state.player.rotation * ROT_SMOOTHING;
}

fn advance_gates(state: &mut GameState) {
    for gate in &mut state.gates {
        gate.x -= state.config.gate_speed;
    }
}

/// Append a gate at the right screen edge. The gap-top range is computed so
/// the opening plus margins always fits the playfield.
pub fn spawn_gate(state: &mut GameState) {
    let lo = GATE_MARGIN;
    let hi = PLAYFIELD_HEIGHT - state.config.gap - GATE_MARGIN;
    let gap_top = state.rng.random_range(lo..hi);
    state.gates.push(Gate::new(PLAYFIELD_WIDTH, gap_top));
}

/// Drop head gates whose trailing edge has left the screen. The list is
/// sorted ascending by x, so only the head ever needs inspecting.
fn recycle_gates(state: &mut GameState) {
    while state.gates.first().is_some_and(|g| g.off_screen()) {
        state.gates.remove(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{LevelConfig, LevelPreset};
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345, LevelPreset::Normal.config());
        state.start_run(LevelPreset::Normal.config());
        state
    }

    /// Wide-gap config for long survival runs: the opening always covers the
    /// player's bobbing band around mid-height.
    fn survival_config() -> LevelConfig {
        LevelConfig {
            gate_speed: 3.0,
            spawn_cadence: 90,
            gap: 300.0,
            win_threshold: 1000,
        }
    }

    /// Simple survival policy: re-arm the impulse when sinking below start
    fn autopilot(state: &GameState) -> TickInput {
        TickInput {
            activate: state.player.y > PLAYER_START_Y && state.player.vel > 0.0,
            menu: false,
        }
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut state = running_state();
        let start_y = state.player.y;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        // vel = 10 * 0.4; displacement = 0.4 * (1 + 2 + ... + 10)
        assert!((state.player.vel - 4.0).abs() < 1e-4);
        assert!((state.player.y - start_y - 22.0).abs() < 1e-3);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_velocity_monotone_without_jump() {
        let mut state = running_state();
        let mut last = state.player.vel;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
            assert!(state.player.vel >= last);
            last = state.player.vel;
        }
    }

    #[test]
    fn test_jump_is_rearm_not_additive() {
        let mut state = running_state();
        state.player.vel = 3.0;
        tick(&mut state, &TickInput { activate: true, menu: false });
        // Impulse applied before integration, so one gravity step follows
        assert!((state.player.vel - (JUMP_IMPULSE + GRAVITY)).abs() < 1e-5);

        state.player.vel = -5.0;
        tick(&mut state, &TickInput { activate: true, menu: false });
        assert!((state.player.vel - (JUMP_IMPULSE + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_gate_scroll_and_recycle() {
        let mut state = GameState::new(9, survival_config());
        state.start_run(survival_config());
        state.gates.push(Gate::new(PLAYFIELD_WIDTH, 100.0));

        for t in 1..=234 {
            let input = autopilot(&state);
            tick(&mut state, &input);
            assert_eq!(state.phase, GamePhase::Running, "crashed at tick {t}");
            // Sort invariant holds every tick
            assert!(
                state.gates.windows(2).all(|w| w[0].x < w[1].x),
                "unsorted at tick {t}"
            );
            // Head never removed while still on screen
            assert!(state.gates.first().is_none_or(|g| !g.off_screen()));
        }
        assert!((state.gates[0].x - 98.0).abs() < 1e-3);

        // By tick 324 the seeded gate's trailing edge has left the screen
        for _ in 0..90 {
            let input = autopilot(&state);
            tick(&mut state, &input);
        }
        assert!(state.gates[0].x > -170.0);
    }

    #[test]
    fn test_pass_scores_once() {
        let mut state = GameState::new(9, survival_config());
        state.start_run(survival_config());
        // One gate just about to clear the player's column
        state.gates.push(Gate::new(30.0, 100.0));

        let mut pass_events = 0;
        for _ in 0..20 {
            let input = autopilot(&state);
            let events = tick(&mut state, &input);
            pass_events += events
                .iter()
                .filter(|e| **e == GameEvent::GatePassed)
                .count();
        }
        assert_eq!(pass_events, 1);
        assert_eq!(state.score, 1);
        assert!(state.gates[0].passed);
    }

    #[test]
    fn test_score_resets_on_entering_running() {
        let mut state = running_state();
        state.score = 5;
        state.phase = GamePhase::EndedLoss;
        tick(&mut state, &TickInput { activate: true, menu: false });
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_boss_spawns_once_at_threshold() {
        let mut state = running_state();
        state.score = state.config.win_threshold;
        state.player.y = 100.0;

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::BossSpawned));
        assert!(state.boss.active);
        // Off the right edge at mid-screen height (no motion on spawn tick)
        assert!(state.boss.pos.x >= PLAYFIELD_WIDTH);
        assert_eq!(state.boss.pos.y, PLAYFIELD_HEIGHT * 0.5);

        // No second spawn, and no further gate spawning
        let before = state.gates.len();
        for _ in 0..5 {
            let events = tick(&mut state, &TickInput::default());
            assert!(!events.contains(&GameEvent::BossSpawned));
        }
        assert_eq!(state.gates.len(), before);
    }

    #[test]
    fn test_boss_crossing_wins_with_bonus() {
        let mut state = running_state();
        state.score = state.config.win_threshold;
        state.player.y = 100.0;
        tick(&mut state, &TickInput::default());
        assert!(state.boss.active);

        // Park the boss just short of the win column, player well clear of it
        state.boss.pos.x = BOSS_WIN_X + 1.0;
        state.player.y = 100.0;
        state.player.vel = 0.0;
        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::EndedWin);
        assert!(state.boss.passed);
        assert_eq!(state.score, state.config.win_threshold + 1);
        assert!(events.contains(&GameEvent::BossDefeated));
        assert!(events.contains(&GameEvent::Burst));
    }

    #[test]
    fn test_boss_collision_loses() {
        let mut state = running_state();
        state.score = state.config.win_threshold;
        tick(&mut state, &TickInput::default());

        // Drop the boss onto the player
        state.boss.pos = glam::Vec2::new(PLAYER_X + 10.0, state.player.y);
        // Keep it there through the advance step
        state.boss.pos.x += state.config.gate_speed * BOSS_SPEED_FACTOR;
        state.player.y = PLAYFIELD_HEIGHT * 0.5
            + BOSS_AMPLITUDE * ((state.run_ticks + 1) as f32 * BOSS_FREQ).sin();
        state.player.vel = 0.0;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::EndedLoss);
        assert!(events.contains(&GameEvent::Crash));
        assert!(!state.boss.passed);
    }

    #[test]
    fn test_ground_crash_bursts() {
        let mut state = running_state();
        state.player.y = PLAYFIELD_HEIGHT - 10.0;
        state.player.vel = 8.0;
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::EndedLoss);
        assert!(events.contains(&GameEvent::Crash));
        assert_eq!(state.particles.len(), BURST_SIZE);
    }

    #[test]
    fn test_terminal_particles_fade() {
        let mut state = running_state();
        state.player.y = PLAYFIELD_HEIGHT;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::EndedLoss);

        let life_before = state.particles[0].life;
        tick(&mut state, &TickInput::default());
        assert!(state.particles[0].life < life_before);
    }

    #[test]
    fn test_victory_fireworks_keep_coming() {
        let mut state = running_state();
        state.phase = GamePhase::EndedWin;
        let mut saw_burst = false;
        for _ in 0..2000 {
            let events = tick(&mut state, &TickInput::default());
            if events.contains(&GameEvent::Burst) {
                saw_burst = true;
                break;
            }
        }
        assert!(saw_burst);
    }

    #[test]
    fn test_menu_returns_to_idle() {
        let mut state = running_state();
        state.player.y = PLAYFIELD_HEIGHT;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::EndedLoss);

        tick(&mut state, &TickInput { activate: false, menu: true });
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_idle_hovers_without_simulating() {
        let mut state = GameState::new(1, LevelPreset::Normal.config());
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for _ in 0..300 {
            tick(&mut state, &TickInput::default());
            min_y = min_y.min(state.player.y);
            max_y = max_y.max(state.player.y);
        }
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.gates.is_empty());
        // Bobs around the start height, never falls
        assert!(min_y > PLAYER_START_Y - IDLE_BOB_HEIGHT - 1.0);
        assert!(max_y < PLAYER_START_Y + IDLE_BOB_HEIGHT + 1.0);
    }

    #[test]
    fn test_decor_scrolls_in_every_phase() {
        let mut state = GameState::new(1, LevelPreset::Normal.config());
        let before = state.ground_offset;
        tick(&mut state, &TickInput::default());
        assert_ne!(state.ground_offset, before);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(777, LevelPreset::Normal.config());
        let mut b = GameState::new(777, LevelPreset::Normal.config());
        let start = TickInput { activate: true, menu: false };
        tick(&mut a, &start);
        tick(&mut b, &start);
        for t in 0..500 {
            let input = TickInput { activate: t % 25 == 0, menu: false };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player.y, b.player.y);
        assert_eq!(a.gates.len(), b.gates.len());
    }

    proptest! {
        #[test]
        fn prop_jump_rearms_from_any_velocity(vel in -50.0f32..50.0) {
            let mut state = running_state();
            state.player.vel = vel;
            tick(&mut state, &TickInput { activate: true, menu: false });
            prop_assert!((state.player.vel - (JUMP_IMPULSE + GRAVITY)).abs() < 1e-5);
        }

        #[test]
        fn prop_spawned_gap_fits_playfield(gap in 20.0f32..370.0, seed in 0u64..1000) {
            let config = LevelConfig { gap, ..LevelPreset::Normal.config() };
            prop_assert!(config.validate().is_ok());
            let mut state = GameState::new(seed, config);
            state.start_run(config);
            spawn_gate(&mut state);
            let gate = state.gates[0];
            prop_assert!(gate.gap_top >= GATE_MARGIN);
            prop_assert!(gate.gap_top + gap + GATE_MARGIN <= PLAYFIELD_HEIGHT);
        }
    }
}
