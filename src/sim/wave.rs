//! Wave generation
//!
//! Each wave adds a fixed number of rocks and ramps their speed
//! exponentially. Rocks enter from a random screen edge heading inward.

use glam::Vec2;
use rand::Rng;

use super::asteroid::Asteroid;
use super::circle::Bounds;
use super::state::{EntityIds, GameState};
use crate::consts::*;
use crate::rotate_deg;

/// Size and speed of a wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavePlan {
    pub wave: u32,
    pub asteroid_count: u32,
    pub speed_multiplier: f32,
}

impl WavePlan {
    /// Plan for wave `wave` (1-based)
    pub fn for_wave(wave: u32) -> Self {
        debug_assert!(wave >= 1, "waves are numbered from 1");
        let step = wave.saturating_sub(1);
        Self {
            wave,
            asteroid_count: WAVE_START_ASTEROIDS + step * WAVE_ASTEROID_INCREMENT,
            speed_multiplier: WAVE_SPEED_MULTIPLIER.powi(step as i32),
        }
    }
}

/// Screen edge a rock enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Inward direction for rocks entering from this edge
    fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
        }
    }

    /// Point `t` (0..1) along the edge, just outside the playfield
    fn point(self, t: f32, bounds: Bounds) -> Vec2 {
        let m = SPAWN_MARGIN;
        match self {
            Edge::Left => Vec2::new(-m, t * bounds.height),
            Edge::Right => Vec2::new(bounds.width + m, t * bounds.height),
            Edge::Top => Vec2::new(t * bounds.width, -m),
            Edge::Bottom => Vec2::new(t * bounds.width, bounds.height + m),
        }
    }
}

/// Build one full-size rock on a random edge
pub fn spawn_asteroid<R: Rng + ?Sized>(
    speed_multiplier: f32,
    bounds: Bounds,
    ids: &mut EntityIds,
    rng: &mut R,
) -> Asteroid {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let speed = rng.random_range(40..=100) as f32 * speed_multiplier;
    let deviation = rng.random_range(-30..=30) as f32;
    let vel = rotate_deg(edge.inward() * speed, deviation);
    let pos = edge.point(rng.random_range(0.0..=1.0), bounds);
    Asteroid::new(ids.next(), pos, ASTEROID_MAX_RADIUS, vel, rng)
}

/// Populate the field for `state.wave`
pub fn generate_wave(state: &mut GameState) {
    let plan = WavePlan::for_wave(state.wave);
    for _ in 0..plan.asteroid_count {
        let rock = spawn_asteroid(plan.speed_multiplier, state.bounds, &mut state.ids, &mut state.rng);
        state.asteroids.push(rock);
    }
    log::info!(
        "Wave {} started: {} asteroids at {:.2}x speed",
        plan.wave,
        plan.asteroid_count,
        plan.speed_multiplier
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wave_plan_counts() {
        for w in 1..10 {
            let plan = WavePlan::for_wave(w);
            assert_eq!(plan.asteroid_count, WAVE_START_ASTEROIDS + (w - 1) * WAVE_ASTEROID_INCREMENT);
        }
    }

    #[test]
    fn test_wave_plan_speed_ramp() {
        assert_eq!(WavePlan::for_wave(1).speed_multiplier, 1.0);
        let w5 = WavePlan::for_wave(5).speed_multiplier;
        assert!((w5 - WAVE_SPEED_MULTIPLIER.powi(4)).abs() < 1e-6);
    }

    #[test]
    fn test_spawned_rock_heads_inward() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut ids = EntityIds::default();
        let bounds = Bounds::SCREEN;
        for _ in 0..100 {
            let rock = spawn_asteroid(1.0, bounds, &mut ids, &mut rng);
            let speed = rock.body.vel.length();
            assert!((40.0 - 1e-3..=100.0 + 1e-3).contains(&speed));
            assert_eq!(rock.radius(), ASTEROID_MAX_RADIUS);

            // Velocity points toward the playfield center side of the edge
            let to_center = bounds.center() - rock.body.pos;
            let p = rock.body.pos;
            let inward = if p.x < 0.0 {
                Vec2::X
            } else if p.x > bounds.width {
                Vec2::NEG_X
            } else if p.y < 0.0 {
                Vec2::Y
            } else {
                Vec2::NEG_Y
            };
            let cos = rock.body.vel.normalize().dot(inward);
            assert!(cos >= 30f32.to_radians().cos() - 1e-4);
            assert!(to_center.dot(inward) > 0.0);
        }
    }

    #[test]
    fn test_generate_wave_spawns_plan_count() {
        let mut state = GameState::new(5, 0);
        state.wave = 3;
        generate_wave(&mut state);
        assert_eq!(state.asteroids.len() as u32, WavePlan::for_wave(3).asteroid_count);
    }
}
