//! Cosmetic particles. They never collide and never wrap.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::{rotate_deg, unit_from_angle};

/// Particle color family, resolved by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Debris,
    Exhaust,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub size: f32,
    pub alive: bool,
}

impl Particle {
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.alive = false;
        }
    }

    /// Remaining life as 0..1, used for fading
    pub fn fade(&self) -> f32 {
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }
}

fn push(particles: &mut Vec<Particle>, particle: Particle) {
    if particles.len() < MAX_PARTICLES {
        particles.push(particle);
    }
}

/// Ring of debris radiating from `pos`
pub fn explosion<R: Rng + ?Sized>(particles: &mut Vec<Particle>, pos: Vec2, count: u32, speed: f32, rng: &mut R) {
    for i in 0..count {
        let angle = std::f32::consts::TAU * i as f32 / count as f32 + rng.random_range(-0.2..0.2);
        let vel = unit_from_angle(angle) * speed * rng.random_range(0.5..1.5);
        let lifetime = PARTICLE_LIFETIME * rng.random_range(0.8..1.2);
        push(
            particles,
            Particle {
                pos,
                vel,
                kind: ParticleKind::Debris,
                lifetime,
                max_lifetime: lifetime,
                size: 3.0,
                alive: true,
            },
        );
    }
}

/// Debris sized to the rock's score band
pub fn asteroid_explosion<R: Rng + ?Sized>(particles: &mut Vec<Particle>, pos: Vec2, radius: f32, rng: &mut R) {
    let (count, speed) = if radius >= ASTEROID_MAX_RADIUS {
        (15, PARTICLE_SPEED * 1.2)
    } else if radius >= ASTEROID_MIN_RADIUS * 2.0 {
        (10, PARTICLE_SPEED)
    } else {
        (8, PARTICLE_SPEED * 0.8)
    };
    explosion(particles, pos, count, speed, rng);
}

pub fn ufo_explosion<R: Rng + ?Sized>(particles: &mut Vec<Particle>, pos: Vec2, rng: &mut R) {
    explosion(particles, pos, 15, PARTICLE_SPEED * 1.2, rng);
}

pub fn player_death<R: Rng + ?Sized>(particles: &mut Vec<Particle>, pos: Vec2, rng: &mut R) {
    explosion(particles, pos, 20, PARTICLE_SPEED * 1.5, rng);
}

/// Exhaust puffs leaving `pos` opposite to `direction`
pub fn thrust<R: Rng + ?Sized>(particles: &mut Vec<Particle>, pos: Vec2, direction: Vec2, rng: &mut R) {
    for _ in 0..PARTICLE_COUNT_THRUST {
        let spread = rng.random_range(-0.3f32..0.3).to_degrees();
        let vel = -rotate_deg(direction, spread) * rng.random_range(50.0..100.0);
        let jitter = Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0));
        let lifetime = PARTICLE_LIFETIME * 0.5;
        push(
            particles,
            Particle {
                pos: pos + jitter,
                vel,
                kind: ParticleKind::Exhaust,
                lifetime,
                max_lifetime: lifetime,
                size: 2.0,
                alive: true,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_asteroid_explosion_counts_by_band() {
        let mut rng = Pcg32::seed_from_u64(1);
        for (radius, expected) in [(60.0, 15), (40.0, 10), (20.0, 8)] {
            let mut particles = Vec::new();
            asteroid_explosion(&mut particles, Vec2::ZERO, radius, &mut rng);
            assert_eq!(particles.len(), expected);
        }
    }

    #[test]
    fn test_particles_fade_and_die() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        player_death(&mut particles, Vec2::ZERO, &mut rng);
        let p = &mut particles[0];
        let start = p.fade();
        p.advance(0.1);
        assert!(p.fade() < start);
        p.advance(PARTICLE_LIFETIME * 2.0);
        assert!(!p.alive);
    }

    #[test]
    fn test_thrust_points_backwards() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        thrust(&mut particles, Vec2::ZERO, Vec2::Y, &mut rng);
        assert_eq!(particles.len(), PARTICLE_COUNT_THRUST as usize);
        assert!(particles.iter().all(|p| p.vel.y < 0.0 && p.kind == ParticleKind::Exhaust));
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        for _ in 0..100 {
            player_death(&mut particles, Vec2::ZERO, &mut rng);
        }
        assert_eq!(particles.len(), MAX_PARTICLES);
    }
}
