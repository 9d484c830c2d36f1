//! Asteroid Blaster - a wave-based Asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state machine)
//! - `app`: Per-frame entry point tying the simulation to its collaborators
//! - `renderer`: CPU-side vertex generation from read-only game state
//! - `platform`: Keyboard state and frame timing
//! - `audio`: Fire-and-forget sound cues
//! - `persistence` / `highscores`: Best-effort high score storage
//! - `settings`: User preferences

pub mod app;
pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use highscores::HighScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Longest frame the simulation will integrate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_TURN_SPEED: f32 = 300.0; // degrees per second
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_SHOT_SPEED: f32 = 500.0;
    pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.3;
    pub const PLAYER_LIVES: u32 = 3;
    pub const PLAYER_INVINCIBILITY_TIME: f32 = 3.0;
    pub const PLAYER_BLINK_INTERVAL: f32 = 0.1;

    /// Shots
    pub const SHOT_RADIUS: f32 = 5.0;
    pub const SHOT_LIFETIME: f32 = 1.2;
    /// Spread shot angles relative to heading (degrees)
    pub const SPREAD_ANGLES: [f32; 3] = [-15.0, 0.0, 15.0];

    /// Asteroids
    pub const ASTEROID_MIN_RADIUS: f32 = 20.0;
    pub const ASTEROID_KINDS: u32 = 3;
    pub const ASTEROID_MAX_RADIUS: f32 = ASTEROID_MIN_RADIUS * ASTEROID_KINDS as f32;

    /// Rocks and saucers spawn this far outside an edge
    pub const SPAWN_MARGIN: f32 = ASTEROID_MAX_RADIUS;
    /// Bodies wrap once this far past an edge. Wider than any radius, so a
    /// body is fully out of view when it jumps and fresh spawns drift in.
    pub const WRAP_MARGIN: f32 = SPAWN_MARGIN + 20.0;
    pub const ASTEROID_SCORE_LARGE: u64 = 20;
    pub const ASTEROID_SCORE_MEDIUM: u64 = 50;
    pub const ASTEROID_SCORE_SMALL: u64 = 100;
    /// Children fly off faster than their parent
    pub const ASTEROID_SPLIT_SPEEDUP: f32 = 1.2;

    /// Waves
    pub const WAVE_START_ASTEROIDS: u32 = 4;
    pub const WAVE_ASTEROID_INCREMENT: u32 = 2;
    pub const WAVE_SPEED_MULTIPLIER: f32 = 1.1;
    pub const WAVE_PAUSE_TIME: f32 = 2.0;

    /// UFOs
    pub const UFO_LARGE_RADIUS: f32 = 25.0;
    pub const UFO_SMALL_RADIUS: f32 = 15.0;
    pub const UFO_LARGE_SPEED: f32 = 100.0;
    pub const UFO_SMALL_SPEED: f32 = 150.0;
    pub const UFO_LARGE_SCORE: u64 = 200;
    pub const UFO_SMALL_SCORE: u64 = 1000;
    pub const UFO_SHOOT_COOLDOWN: f32 = 1.5;
    pub const UFO_FIRST_TURN_TIME: f32 = 2.0;
    pub const UFO_SPAWN_MIN_TIME: f32 = 15.0;
    pub const UFO_SPAWN_MAX_TIME: f32 = 30.0;
    /// Small UFO aim error (radians, each side)
    pub const UFO_AIM_NOISE: f32 = 0.2;
    pub const UFO_SHOT_SPEED_FACTOR: f32 = 0.7;

    /// Power-ups
    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const POWERUP_DRIFT_SPEED: f32 = 20.0;
    pub const POWERUP_LIFETIME: f32 = 10.0;
    pub const POWERUP_DURATION: f32 = 10.0;
    pub const POWERUP_SHIELD_DURATION: f32 = 8.0;
    pub const POWERUP_DROP_CHANCE: f64 = 0.2;
    pub const POWERUP_RAPID_FIRE_MULTIPLIER: f32 = 2.0;

    /// Particles
    pub const PARTICLE_LIFETIME: f32 = 0.8;
    pub const PARTICLE_SPEED: f32 = 150.0;
    pub const PARTICLE_COUNT_THRUST: u32 = 2;
    pub const MAX_PARTICLES: usize = 512;

    /// Screen shake
    pub const SHAKE_UFO_KILL: f32 = 0.4;
    pub const SHAKE_PLAYER_DEATH: f32 = 0.5;
    pub const SHAKE_MAX_OFFSET: f32 = 10.0;
}

/// Rotate a vector by an angle in degrees (counter-clockwise in math space)
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Unit heading for a ship rotation in degrees. Rotation 0 points along +Y.
#[inline]
pub fn heading(rotation_deg: f32) -> Vec2 {
    rotate_deg(Vec2::Y, rotation_deg)
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(radians: f32) -> Vec2 {
    Vec2::new(radians.cos(), radians.sin())
}
