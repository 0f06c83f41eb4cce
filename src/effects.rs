//! Particle effects: cosmetic bursts with time-decayed motion
//!
//! Kill bursts and contact-damage sparks. Particles never feed back
//! into gameplay; the session updates and purges them after the
//! simulation passes so they can be dropped wholesale on restart.

use rand::Rng;

/// Velocity multiplier remaining after one second of damping.
const PARTICLE_DAMPING: f32 = 0.02;
const BURST_SPEED_MIN: f32 = 40.0;
const BURST_SPEED_MAX: f32 = 160.0;
const PARTICLE_LIFETIME: f32 = 0.5;

/// Rough render hue, picked per burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Blood,
    Spark,
    Pickup,
}

pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub kind: ParticleKind,
}

#[derive(Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        ParticleField {
            particles: Vec::new(),
        }
    }

    /// Emits `count` particles radially from a point.
    pub fn burst(&mut self, x: f32, y: f32, count: u32, kind: ParticleKind, rng: &mut impl Rng) {
        for _ in 0..count {
            let theta = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(BURST_SPEED_MIN..BURST_SPEED_MAX);
            self.particles.push(Particle {
                x,
                y,
                vx: theta.cos() * speed,
                vy: theta.sin() * speed,
                lifetime: PARTICLE_LIFETIME,
                max_lifetime: PARTICLE_LIFETIME,
                kind,
            });
        }
    }

    /// Integrates motion with exponential damping and purges expired
    /// particles by filter.
    pub fn update(&mut self, dt: f32) {
        let damping = PARTICLE_DAMPING.powf(dt);
        for p in self.particles.iter_mut() {
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.vx *= damping;
            p.vy *= damping;
            p.lifetime -= dt;
        }
        self.particles.retain(|p| p.lifetime > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
