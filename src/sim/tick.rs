//! Per-frame simulation tick
//!
//! Drives the session state machine: input transitions first, then the
//! active phase's subsystems in a fixed order.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::particles;
use super::player::ShipControls;
use super::state::{GamePhase, GameState, Hooks};
use crate::audio::{AudioSink, Cue};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held ship controls
    pub ship: ShipControls,
    /// Pause/resume pressed this frame
    pub pause: bool,
    /// Start/restart pressed this frame
    pub start: bool,
}

/// Advance the session by `dt` seconds.
///
/// `dt` is clamped to `0..=MAX_FRAME_DT`; non-finite values are treated as 0.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, hooks: &mut Hooks) {
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

    handle_transitions(state, input, hooks);

    match state.phase {
        GamePhase::WavePause => {
            update_particles(state, dt);
            state.wave_timer -= dt;
            if state.wave_timer <= 0.0 {
                state.start_wave();
            }
            state.prune();
        }
        GamePhase::Playing => update_playing(state, &input.ship, dt, hooks),
        GamePhase::GameOver => {
            update_particles(state, dt);
            state.prune();
        }
        GamePhase::Menu | GamePhase::Paused => {}
    }
}

fn handle_transitions(state: &mut GameState, input: &TickInput, hooks: &mut Hooks) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.stop_thrust_loop(hooks.audio);
                state.phase = GamePhase::Paused;
                log::debug!("Paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::debug!("Resumed");
            }
            _ => {}
        }
    }

    if input.start && matches!(state.phase, GamePhase::Menu | GamePhase::GameOver) {
        state.start_game(hooks.audio);
    }
}

fn update_particles(state: &mut GameState, dt: f32) {
    for particle in state.particles.iter_mut().filter(|p| p.alive) {
        particle.advance(dt);
    }
}

fn update_playing(state: &mut GameState, controls: &ShipControls, dt: f32, hooks: &mut Hooks) {
    let bounds = state.bounds;

    for shot in state.shots.iter_mut().filter(|s| s.alive) {
        shot.advance(dt);
    }
    for rock in state.asteroids.iter_mut().filter(|a| a.alive) {
        rock.advance(dt, bounds);
    }

    let target = state.player.as_ref().map(|p| p.body.pos);
    let mut fired = Vec::new();
    for ufo in state.ufos.iter_mut().filter(|u| u.alive) {
        fired.extend(ufo.advance(dt, bounds, target, &mut state.ids, &mut state.rng));
    }
    state.shots.extend(fired);

    for pickup in state.powerups.iter_mut().filter(|p| p.alive) {
        pickup.advance(dt, bounds);
    }
    update_particles(state, dt);

    if let Some(player) = &mut state.player {
        player.advance(controls, dt, bounds, &mut state.ids, &mut state.shots, hooks.audio);
    }
    update_thrust(state, hooks.audio);

    state
        .ufo_spawner
        .update(dt, state.wave, bounds, &mut state.ufos, &mut state.ids, &mut state.rng);

    collision::resolve_collisions(state, hooks);
    update_shake(state, dt);

    if state.phase == GamePhase::Playing && state.wave_cleared() {
        state.stop_thrust_loop(hooks.audio);
        state.phase = GamePhase::WavePause;
        state.wave_timer = WAVE_PAUSE_TIME;
        log::info!("Wave {} cleared, score {}", state.wave, state.score);
    }

    state.prune();
}

/// Keep the looping thrust cue and exhaust in step with the ship
fn update_thrust(state: &mut GameState, audio: &mut dyn AudioSink) {
    let Some(player) = &state.player else { return };

    if player.thrusting {
        if !state.thrust_loop {
            audio.start_loop(Cue::Thrust);
            state.thrust_loop = true;
        }
        let (rear, heading) = (player.rear(), player.heading());
        particles::thrust(&mut state.particles, rear, heading, &mut state.rng);
    } else if state.thrust_loop {
        audio.stop_loop(Cue::Thrust);
        state.thrust_loop = false;
    }
}

/// Decay the shake magnitude and roll this tick's render offset
fn update_shake(state: &mut GameState, dt: f32) {
    state.screen_shake = (state.screen_shake - dt).max(0.0);
    let intensity = (state.screen_shake * 20.0).min(SHAKE_MAX_OFFSET);
    state.shake_offset = if intensity > 0.0 {
        Vec2::new(
            state.rng.random_range(-intensity..intensity),
            state.rng.random_range(-intensity..intensity),
        )
    } else {
        Vec2::ZERO
    };
}
