//! Ephemeral visual effects: capture beams and explosion particles.
//!
//! Nothing in here is authoritative for scoring; effects live and die
//! by per-tick countdowns and the game state never reads them back.

use crate::constants::{EXPLOSION_PARTICLE_COUNT, EXPLOSION_PARTICLE_LIFE, PARTICLE_GRAVITY};

/// Short-lived line effect from the ship towards an abduction or miss
/// point.
#[derive(Debug, Clone)]
pub struct Beam {
    pub x: f32,
    pub y: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub life: u32,
}

/// Counts every beam down one tick and drops the expired ones.
pub fn step_beams(beams: &mut Vec<Beam>) {
    for beam in beams.iter_mut() {
        beam.life = beam.life.saturating_sub(1);
    }
    beams.retain(|beam| beam.life > 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    Red,
    Orange,
}

impl ParticleColor {
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Red => (0xff, 0x44, 0x44),
            Self::Orange => (0xff, 0xaa, 0x00),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExplosionParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub life: u32,
    pub max_life: u32,
    pub color: ParticleColor,
}

impl ExplosionParticle {
    /// Remaining-life fraction, used as draw alpha.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.life as f32 / self.max_life as f32
    }
}

/// Spawns the crash burst: a ring of particles flung outward from the
/// ship with randomized speed and size.
pub fn explosion_burst(rng: &mut fastrand::Rng, x: f32, y: f32) -> Vec<ExplosionParticle> {
    (0..EXPLOSION_PARTICLE_COUNT)
        .map(|i| {
            let angle = core::f32::consts::TAU * i as f32 / EXPLOSION_PARTICLE_COUNT as f32;
            let speed = rng.f32() * 5.0 + 2.0;
            ExplosionParticle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                size: rng.f32() * 10.0 + 5.0,
                life: EXPLOSION_PARTICLE_LIFE,
                max_life: EXPLOSION_PARTICLE_LIFE,
                color: if rng.bool() {
                    ParticleColor::Red
                } else {
                    ParticleColor::Orange
                },
            }
        })
        .collect()
}

/// Integrates particle motion (with gravity) and drops dead particles.
pub fn step_particles(particles: &mut Vec<ExplosionParticle>) {
    for particle in particles.iter_mut() {
        particle.x += particle.vx;
        particle.y += particle.vy;
        particle.vy += PARTICLE_GRAVITY;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|particle| particle.life > 0);
}
