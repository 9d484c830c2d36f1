//! Asteroids: irregular drifting rocks that split when shot

use glam::Vec2;
use rand::Rng;

use super::circle::{Bounds, Circle};
use super::state::EntityIds;
use crate::consts::*;
use crate::{rotate_deg, unit_from_angle};

/// Score band of an asteroid, derived from its radius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn from_radius(radius: f32) -> Self {
        if radius >= ASTEROID_MAX_RADIUS {
            AsteroidSize::Large
        } else if radius >= ASTEROID_MIN_RADIUS * 2.0 {
            AsteroidSize::Medium
        } else {
            AsteroidSize::Small
        }
    }

    pub fn score(self) -> u64 {
        match self {
            AsteroidSize::Large => ASTEROID_SCORE_LARGE,
            AsteroidSize::Medium => ASTEROID_SCORE_MEDIUM,
            AsteroidSize::Small => ASTEROID_SCORE_SMALL,
        }
    }
}

/// A drifting rock
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub body: Circle,
    /// Outline offsets from the center, fixed at creation
    pub outline: Vec<Vec2>,
    /// Visual rotation (degrees); never affects collision
    pub rotation: f32,
    /// Degrees per second
    pub rotation_speed: f32,
    pub alive: bool,
}

impl Asteroid {
    pub fn new<R: Rng + ?Sized>(id: u32, pos: Vec2, radius: f32, vel: Vec2, rng: &mut R) -> Self {
        Self {
            id,
            body: Circle::new(pos, radius).with_velocity(vel),
            outline: generate_outline(radius, rng),
            rotation: rng.random_range(0.0..360.0),
            rotation_speed: rng.random_range(-60.0..60.0),
            alive: true,
        }
    }

    pub fn radius(&self) -> f32 {
        self.body.radius
    }

    pub fn size(&self) -> AsteroidSize {
        AsteroidSize::from_radius(self.body.radius)
    }

    pub fn score(&self) -> u64 {
        self.size().score()
    }

    /// Full-size rocks are the only ones that can drop power-ups
    pub fn is_full_size(&self) -> bool {
        self.body.radius >= ASTEROID_MAX_RADIUS
    }

    pub fn advance(&mut self, dt: f32, bounds: Bounds) {
        if dt <= 0.0 {
            return;
        }
        self.body.integrate(dt);
        self.rotation += self.rotation_speed * dt;
        self.body.wrap(bounds);
    }

    /// Kill this asteroid and return its children.
    ///
    /// Rocks above the minimum radius break into two smaller rocks flying
    /// apart along a randomly rotated copy of the parent's velocity. Minimum
    /// size rocks simply vanish.
    pub fn split<R: Rng + ?Sized>(&mut self, ids: &mut EntityIds, rng: &mut R) -> Vec<Asteroid> {
        self.alive = false;
        if self.body.radius <= ASTEROID_MIN_RADIUS {
            return Vec::new();
        }

        let angle = rng.random_range(20.0..50.0);
        let base = rotate_deg(self.body.vel, angle) * ASTEROID_SPLIT_SPEEDUP;
        let radius = self.body.radius - ASTEROID_MIN_RADIUS;
        log::debug!("Asteroid {} split into two of radius {}", self.id, radius);

        vec![
            Asteroid::new(ids.next(), self.body.pos, radius, base, rng),
            Asteroid::new(ids.next(), self.body.pos, radius, -base, rng),
        ]
    }
}

/// Irregular polygon: 8-12 vertices at 70-100% of the radius
fn generate_outline<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec<Vec2> {
    let count = rng.random_range(8..=12);
    (0..count)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            unit_from_angle(angle) * radius * rng.random_range(0.7..=1.0)
        })
        .collect()
}
