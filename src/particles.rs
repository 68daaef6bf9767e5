//! Nectar sparkles: short-lived dots thrown off when the bee sips nectar.

use rand::Rng;

use crate::entities::Particle;
use crate::platform::{Frame, NECTAR_GOLD};

pub const PARTICLE_LIFETIME: u32 = 60;
const PARTICLE_SPEED: f32 = 0.4;
const PARTICLE_SIZE: f32 = 1.0;

impl Particle {
    pub fn new(x: f32, y: f32, dx: f32, dy: f32, lifetime: u32) -> Self {
        Particle { x, y, dx, dy, lifetime }
    }
}

/// Spawn one sparkle per unit of nectar at world position (`x`, `y`),
/// each drifting in a random direction.
pub fn spawn_nectar_particles(
    particles: &mut Vec<Particle>,
    x: f32,
    y: f32,
    count: u32,
    rng: &mut impl Rng,
) {
    for _ in 0..count {
        let dx = rng.gen_range(-PARTICLE_SPEED..=PARTICLE_SPEED);
        let dy = rng.gen_range(-PARTICLE_SPEED..=PARTICLE_SPEED);
        particles.push(Particle::new(x, y, dx, dy, PARTICLE_LIFETIME));
    }
}

/// Advance every particle one tick.  A particle takes part in exactly
/// `lifetime` updates and is dropped on the one after.
pub fn advance(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        if p.lifetime == 0 {
            return false;
        }
        p.x += p.dx;
        p.y += p.dy;
        p.lifetime -= 1;
        true
    });
}

pub fn render(particles: &[Particle], frame: &mut Frame, camera_x: f32) {
    for p in particles {
        frame.solid(p.x - camera_x, p.y, PARTICLE_SIZE, PARTICLE_SIZE, NECTAR_GOLD);
    }
}
