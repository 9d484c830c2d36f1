//! Platform abstraction layer
//!
//! Handles the host-facing side of a frame:
//! - Keyboard state (held keys plus discrete presses)
//! - Frame timing and FPS
//! - The attract-mode pilot that stands in for a human

pub mod attract;

use std::collections::HashSet;
use std::time::Instant;

use crate::sim::{ShipControls, TickInput};

pub use attract::AttractPilot;

/// Keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
    P,
    Q,
    M,
}

/// Keyboard state fed by host key events
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: HashSet<Key>,
    pressed: Vec<Key>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat while held is not a new press.
    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pressed.push(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Key went down since the last `end_frame`
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.is_held(*k))
    }

    fn any_pressed(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.was_pressed(*k))
    }

    /// Map the current key state to simulation input
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            ship: ShipControls {
                forward: self.any_held(&[Key::W, Key::Up]),
                back: self.any_held(&[Key::S, Key::Down]),
                rotate_left: self.any_held(&[Key::A, Key::Left]),
                rotate_right: self.any_held(&[Key::D, Key::Right]),
                fire: self.is_held(Key::Space),
            },
            pause: self.any_pressed(&[Key::Escape, Key::P]),
            start: self.was_pressed(Key::Space),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.was_pressed(Key::Q)
    }

    pub fn sound_toggle_requested(&self) -> bool {
        self.was_pressed(Key::M)
    }

    /// Clear one-shot presses after they have been consumed
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

/// Wall-clock frame timer with a rolling FPS estimate
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_times: [f64; 60],
    frame_index: usize,
    elapsed: f64,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_times: [0.0; 60],
            frame_index: 0,
            elapsed: 0.0,
            fps: 0,
        }
    }

    /// Seconds since the previous call
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.record(dt);
        dt
    }

    /// Track a frame of `dt` seconds for the FPS estimate
    pub fn record(&mut self, dt: f32) {
        self.elapsed += f64::from(dt);
        self.frame_times[self.frame_index] = self.elapsed;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Slot we are about to overwrite holds the oldest timestamp
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let span = self.elapsed - oldest;
            if span > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 / span).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
