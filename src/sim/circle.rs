//! Circle geometry shared by every simulated body
//!
//! Collision is a plain circle-circle overlap test and movement happens on a
//! torus: anything that leaves one edge of the playfield reappears on the
//! opposite edge. The torus extends [`WRAP_MARGIN`] past every edge, so a
//! body slides fully out of view before it jumps across.

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, WRAP_MARGIN};

/// Playfield dimensions used for wrapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const SCREEN: Bounds = Bounds {
        width: SCREEN_WIDTH,
        height: SCREEN_HEIGHT,
    };

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::SCREEN
    }
}

/// Position, velocity and collision radius of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "circle radius must be positive, got {radius}");
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Integrate position over `dt` seconds
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Wrap position onto the playfield torus
    #[inline]
    pub fn wrap(&mut self, bounds: Bounds) {
        self.pos = wrap(self.pos, bounds);
    }

    #[inline]
    pub fn collides_with(&self, other: &Circle) -> bool {
        collides(self, other)
    }
}

/// True when two circles touch or overlap
#[inline]
pub fn collides(a: &Circle, b: &Circle) -> bool {
    a.pos.distance(b.pos) <= a.radius + b.radius
}

/// Wrap each axis independently into `[-WRAP_MARGIN, size + WRAP_MARGIN)`.
/// Positions already inside that range are returned unchanged.
#[inline]
pub fn wrap(pos: Vec2, bounds: Bounds) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, bounds.width), wrap_axis(pos.y, bounds.height))
}

#[inline]
fn wrap_axis(value: f32, size: f32) -> f32 {
    let lo = -WRAP_MARGIN;
    let hi = size + WRAP_MARGIN;
    if (lo..hi).contains(&value) {
        return value;
    }
    let wrapped = lo + (value - lo).rem_euclid(hi - lo);
    // Rounding can land exactly on `hi`; non-finite input has no sensible image
    if (lo..hi).contains(&wrapped) { wrapped } else { lo }
}
