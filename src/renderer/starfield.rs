//! Twinkling background stars. Purely cosmetic; owns its own RNG so it
//! never disturbs the simulation's random stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::Bounds;

pub const DEFAULT_STAR_COUNT: usize = 100;

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Base brightness, 0..1
    pub brightness: f32,
    twinkle_speed: f32,
    twinkle_offset: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
    time: f32,
}

impl Starfield {
    pub fn new(seed: u64, count: usize, bounds: Bounds) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..bounds.width),
                    rng.random_range(0.0..bounds.height),
                ),
                // Mostly small stars
                size: if rng.random_bool(0.25) { 2.0 } else { 1.0 },
                brightness: rng.random_range(60.0..=200.0) / 255.0,
                twinkle_speed: rng.random_range(1.0..3.0),
                twinkle_offset: rng.random_range(0.0..std::f32::consts::TAU),
            })
            .collect();
        Self { stars, time: 0.0 }
    }

    /// Runs in every phase, including pause
    pub fn update(&mut self, dt: f32) {
        self.time += dt.max(0.0);
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Current brightness of `star`, 0..1
    pub fn brightness(&self, star: &Star, twinkle: bool) -> f32 {
        if !twinkle {
            return star.brightness;
        }
        let wave = (self.time * star.twinkle_speed + star.twinkle_offset).sin();
        (star.brightness + wave * 40.0 / 255.0).clamp(40.0 / 255.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_inside_bounds() {
        let field = Starfield::new(3, DEFAULT_STAR_COUNT, Bounds::SCREEN);
        assert_eq!(field.stars.len(), DEFAULT_STAR_COUNT);
        for star in &field.stars {
            assert!(star.pos.x >= 0.0 && star.pos.x < Bounds::SCREEN.width);
            assert!(star.pos.y >= 0.0 && star.pos.y < Bounds::SCREEN.height);
        }
    }

    #[test]
    fn test_twinkle_stays_in_range() {
        let mut field = Starfield::new(3, 20, Bounds::SCREEN);
        for _ in 0..50 {
            field.update(0.1);
            for star in &field.stars {
                let b = field.brightness(star, true);
                assert!((40.0 / 255.0..=1.0).contains(&b));
                assert_eq!(field.brightness(star, false), star.brightness);
            }
        }
    }
}
