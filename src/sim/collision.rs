//! Collision detection for the runner
//!
//! Every check here is a pure function over positions; verdicts are returned,
//! never written back into state. The hitbox is inset from the rendered
//! sprite so near-misses are forgiven.

use glam::Vec2;

use super::state::{Boss, Gate, Player};
use crate::consts::*;

/// Axis-aligned hitbox
#[derive(Debug, Clone, Copy)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

impl Hitbox {
    /// The player's inset hitbox at its fixed column
    pub fn of_player(player: &Player) -> Self {
        let half = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) * 0.5 - Vec2::splat(HITBOX_INSET);
        let center = Vec2::new(PLAYER_X, player.y);
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Player touched the ground or left through the ceiling
pub fn hits_bounds(hitbox: &Hitbox) -> bool {
    hitbox.max.y >= PLAYFIELD_HEIGHT || hitbox.min.y <= 0.0
}

/// Player overlaps a gate's solid part (outside the gap interval)
pub fn hits_gate(hitbox: &Hitbox, gate: &Gate, gap: f32) -> bool {
    if hitbox.max.x < gate.x || hitbox.min.x > gate.trailing_edge() {
        return false;
    }
    hitbox.min.y < gate.gap_top || hitbox.max.y > gate.gap_top + gap
}

/// Circular overlap with the boss, minus the forgiveness margin
pub fn hits_boss(player: &Player, boss: &Boss) -> bool {
    if !boss.active {
        return false;
    }
    let center = Vec2::new(PLAYER_X, player.y);
    let reach = PLAYER_RADIUS + BOSS_RADIUS - COLLISION_FORGIVENESS;
    center.distance_squared(boss.pos) < reach * reach
}

/// Leading edge has cleared the gate's trailing edge. Disjoint from
/// `hits_gate` for the same gate: a cleared gate no longer overlaps.
pub fn cleared_gate(hitbox: &Hitbox, gate: &Gate) -> bool {
    hitbox.min.x > gate.trailing_edge()
}

/// One tick's verdict over every live gate
#[derive(Debug, Default)]
pub struct GateScan {
    pub crashed: bool,
    /// Indices of gates newly cleared this tick
    pub passed: Vec<usize>,
}

/// Evaluate all gates against the hitbox. A gate is either collided with or
/// newly passed, never both in the same evaluation.
pub fn scan_gates(hitbox: &Hitbox, gates: &[Gate], gap: f32) -> GateScan {
    let mut scan = GateScan::default();
    for (idx, gate) in gates.iter().enumerate() {
        if hits_gate(hitbox, gate, gap) {
            scan.crashed = true;
        } else if !gate.passed && cleared_gate(hitbox, gate) {
            scan.passed.push(idx);
        }
    }
    scan
}
