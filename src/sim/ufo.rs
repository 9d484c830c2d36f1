//! Flying saucers and the timer that releases them

use glam::Vec2;
use rand::Rng;

use super::circle::{Bounds, Circle};
use super::state::{EntityIds, Shot, ShotOwner};
use crate::consts::*;
use crate::unit_from_angle;

/// Saucer variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UfoSize {
    /// Fast, small, aims at the player
    Small,
    /// Slow, large, fires at random
    Large,
}

impl UfoSize {
    pub fn radius(self) -> f32 {
        match self {
            UfoSize::Small => UFO_SMALL_RADIUS,
            UfoSize::Large => UFO_LARGE_RADIUS,
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            UfoSize::Small => UFO_SMALL_SPEED,
            UfoSize::Large => UFO_LARGE_SPEED,
        }
    }

    pub fn score(self) -> u64 {
        match self {
            UfoSize::Small => UFO_SMALL_SCORE,
            UfoSize::Large => UFO_LARGE_SCORE,
        }
    }
}

/// A flying saucer
#[derive(Debug, Clone)]
pub struct Ufo {
    pub id: u32,
    pub size: UfoSize,
    pub body: Circle,
    pub shoot_timer: f32,
    pub direction_timer: f32,
    pub alive: bool,
}

impl Ufo {
    pub fn new<R: Rng + ?Sized>(id: u32, pos: Vec2, size: UfoSize, rng: &mut R) -> Self {
        let mut ufo = Self {
            id,
            size,
            body: Circle::new(pos, size.radius()),
            shoot_timer: UFO_SHOOT_COOLDOWN,
            direction_timer: UFO_FIRST_TURN_TIME,
            alive: true,
        };
        ufo.pick_direction(rng);
        ufo
    }

    pub fn score(&self) -> u64 {
        self.size.score()
    }

    fn pick_direction<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        self.body.vel = unit_from_angle(angle) * self.size.speed();
    }

    /// Move, wander and maybe fire. Returns the shot fired this tick, if any.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        bounds: Bounds,
        target: Option<Vec2>,
        ids: &mut EntityIds,
        rng: &mut R,
    ) -> Option<Shot> {
        if dt <= 0.0 {
            return None;
        }
        self.body.integrate(dt);
        self.body.wrap(bounds);

        self.direction_timer -= dt;
        if self.direction_timer <= 0.0 {
            self.pick_direction(rng);
            self.direction_timer = rng.random_range(1.5..3.0);
        }

        self.shoot_timer -= dt;
        if self.shoot_timer <= 0.0 {
            self.shoot_timer = UFO_SHOOT_COOLDOWN;
            return Some(self.shoot(target, ids, rng));
        }
        None
    }

    /// Small saucers aim at the target with some error; large ones fire anywhere
    pub fn shoot<R: Rng + ?Sized>(&self, target: Option<Vec2>, ids: &mut EntityIds, rng: &mut R) -> Shot {
        let angle = match (self.size, target) {
            (UfoSize::Small, Some(target)) => {
                let to_target = target - self.body.pos;
                to_target.y.atan2(to_target.x) + rng.random_range(-UFO_AIM_NOISE..UFO_AIM_NOISE)
            }
            _ => rng.random_range(0.0..std::f32::consts::TAU),
        };
        let vel = unit_from_angle(angle) * PLAYER_SHOT_SPEED * UFO_SHOT_SPEED_FACTOR;
        Shot::new(ids.next(), self.body.pos, vel, ShotOwner::Ufo(self.id))
    }
}

/// Chance that a spawned saucer is the small variant
pub fn small_ufo_chance(wave: u32) -> f64 {
    (0.1 + wave as f64 * 0.05).min(0.5)
}

/// Releases at most one tracked saucer at a time on a randomized timer
#[derive(Debug, Clone)]
pub struct UfoSpawner {
    pub spawn_timer: f32,
    /// ID of the saucer this spawner released most recently
    pub active: Option<u32>,
}

impl UfoSpawner {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            spawn_timer: Self::roll_interval(rng),
            active: None,
        }
    }

    fn roll_interval<R: Rng + ?Sized>(rng: &mut R) -> f32 {
        rng.random_range(UFO_SPAWN_MIN_TIME..UFO_SPAWN_MAX_TIME)
    }

    fn tracked_alive(&self, ufos: &[Ufo]) -> bool {
        self.active
            .is_some_and(|id| ufos.iter().any(|u| u.id == id && u.alive))
    }

    /// Count down while no tracked saucer is alive; spawn one on expiry
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        wave: u32,
        bounds: Bounds,
        ufos: &mut Vec<Ufo>,
        ids: &mut EntityIds,
        rng: &mut R,
    ) {
        if self.tracked_alive(ufos) {
            return;
        }
        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            let ufo = Self::spawn(wave, bounds, ids, rng);
            log::debug!("UFO {} ({:?}) spawned at wave {}", ufo.id, ufo.size, wave);
            self.active = Some(ufo.id);
            ufos.push(ufo);
            self.spawn_timer = Self::roll_interval(rng);
        }
    }

    /// Build a saucer on a random edge just outside the playfield
    pub fn spawn<R: Rng + ?Sized>(wave: u32, bounds: Bounds, ids: &mut EntityIds, rng: &mut R) -> Ufo {
        let size = if rng.random_bool(small_ufo_chance(wave)) {
            UfoSize::Small
        } else {
            UfoSize::Large
        };

        let margin = SPAWN_MARGIN;
        let pos = if rng.random_bool(0.5) {
            let x = if rng.random_bool(0.5) { -margin } else { bounds.width + margin };
            Vec2::new(x, rng.random_range(100.0..bounds.height - 100.0))
        } else {
            let y = if rng.random_bool(0.5) { -margin } else { bounds.height + margin };
            Vec2::new(rng.random_range(100.0..bounds.width - 100.0), y)
        };

        Ufo::new(ids.next(), pos, size, rng)
    }
}
