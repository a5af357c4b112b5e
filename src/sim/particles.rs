//! Burst particles for crash and victory feedback
//!
//! Decorative only: the particle field never feeds back into gameplay.
//! Integration runs only while the session sits in a terminal phase.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Particle;
use crate::consts::*;
use crate::hue_to_rgb;

/// Crash burst colors: embers and smoke
pub const LOSS_PALETTE: [u32; 4] = [0xff4040, 0xff6b35, 0xf7c59f, 0xb0b0b0];
/// Victory burst colors: gold and white sparks
pub const WIN_PALETTE: [u32; 4] = [0xffd700, 0xfff4b0, 0xffffff, 0xffa030];

/// Spawn a fixed-size batch of particles sharing an origin and palette
pub fn burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, origin: Vec2, palette: &[u32]) {
    for _ in 0..BURST_SIZE {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            color: palette[rng.random_range(0..palette.len())],
        });
    }
}

/// A fireworks burst at a random position with a random hue
pub fn firework(particles: &mut Vec<Particle>, rng: &mut Pcg32) {
    let origin = Vec2::new(
        rng.random_range(0.0..PLAYFIELD_WIDTH),
        rng.random_range(0.0..PLAYFIELD_HEIGHT * 0.6),
    );
    let palette = [hue_to_rgb(rng.random_range(0.0..360.0))];
    burst(particles, rng, origin, &palette);
}

/// Advance every particle one tick and drop the expired ones.
/// Particle gravity is independent of the entity's.
pub fn integrate(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life -= PARTICLE_FADE;
    }
    particles.retain(|p| p.life > 0.0);
}
