//! Collision resolution and scoring
//!
//! Runs once per `Playing` tick over the live entity sets in a fixed order:
//!
//! 1. Player vs asteroids
//! 2. Player vs UFOs
//! 3. Player vs power-ups
//! 4. Asteroids vs shots
//! 5. UFOs vs shots
//!
//! Shots from either owner break rocks and saucers, but never the player.
//! A saucer is immune to its own shots. Each target takes at most one hit
//! per tick, and a shot is consumed by the first target credited with it.
//! Dead entities are flagged, skipped by later steps, and pruned after the
//! tick. Rocks and pickups spawned here join the field only after the scans
//! finish.

use super::circle::Circle;
use super::particles;
use super::powerup::{self, PowerUpEffect};
use super::state::{GameState, Hooks, ShotOwner};
use crate::audio::Cue;
use crate::consts::*;

/// Resolve every collision for this tick
pub fn resolve_collisions(state: &mut GameState, hooks: &mut Hooks) {
    player_vs_hazards(state, hooks);
    player_vs_powerups(state, hooks);
    shots_vs_asteroids(state, hooks);
    shots_vs_ufos(state, hooks);
}

/// Steps 1-2: a rock or saucer touching a vulnerable player kills it.
/// At most one death per tick.
fn player_vs_hazards(state: &mut GameState, hooks: &mut Hooks) {
    let Some(player) = &state.player else { return };
    if !player.is_vulnerable() {
        return;
    }
    let ship = player.body;

    if state.asteroids.iter().any(|a| a.alive && ship.collides_with(&a.body)) {
        log::debug!("Player hit by asteroid");
    } else if state.ufos.iter().any(|u| u.alive && ship.collides_with(&u.body)) {
        log::debug!("Player hit by UFO");
    } else {
        return;
    }
    player_death(state, hooks);
}

/// Step 3: pickups are consumed on touch regardless of vulnerability
fn player_vs_powerups(state: &mut GameState, hooks: &mut Hooks) {
    let Some(player) = &mut state.player else { return };
    for pickup in state.powerups.iter_mut().filter(|p| p.alive) {
        if !player.body.collides_with(&pickup.body) {
            continue;
        }
        pickup.alive = false;
        match pickup.apply(player) {
            PowerUpEffect::ExtraLife => {
                state.lives += 1;
                hooks.audio.play(Cue::ExtraLife);
            }
            PowerUpEffect::Timed => hooks.audio.play(Cue::PowerUp),
        }
        log::debug!("Collected {:?}", pickup.kind);
    }
}

/// Index of the first live shot touching `target`, skipping shots fired by
/// `immune`
fn first_shot(state: &GameState, target: &Circle, immune: Option<ShotOwner>) -> Option<usize> {
    state
        .shots
        .iter()
        .position(|s| s.alive && Some(s.owner) != immune && target.collides_with(&s.body))
}

/// Step 4: one credited shot per rock per tick
fn shots_vs_asteroids(state: &mut GameState, hooks: &mut Hooks) {
    let mut spawned_rocks = Vec::new();
    let mut spawned_pickups = Vec::new();

    for i in 0..state.asteroids.len() {
        if !state.asteroids[i].alive {
            continue;
        }
        let Some(shot) = first_shot(state, &state.asteroids[i].body, None) else {
            continue;
        };
        state.shots[shot].alive = false;

        let rock = &mut state.asteroids[i];
        let (pos, radius) = (rock.body.pos, rock.radius());
        state.score += rock.score();

        particles::asteroid_explosion(&mut state.particles, pos, radius, &mut state.rng);
        hooks.audio.play_explosion(radius);
        state.screen_shake = state.screen_shake.max(radius / 60.0);

        if rock.is_full_size() {
            spawned_pickups.extend(powerup::maybe_spawn(pos, &mut state.ids, &mut state.rng));
        }
        spawned_rocks.extend(rock.split(&mut state.ids, &mut state.rng));
    }

    state.asteroids.extend(spawned_rocks);
    state.powerups.extend(spawned_pickups);
}

/// Step 5: one credited shot per saucer per tick
fn shots_vs_ufos(state: &mut GameState, hooks: &mut Hooks) {
    let mut spawned_pickups = Vec::new();

    for i in 0..state.ufos.len() {
        if !state.ufos[i].alive {
            continue;
        }
        let own = ShotOwner::Ufo(state.ufos[i].id);
        let Some(shot) = first_shot(state, &state.ufos[i].body, Some(own)) else {
            continue;
        };
        state.shots[shot].alive = false;

        let ufo = &mut state.ufos[i];
        ufo.alive = false;
        let pos = ufo.body.pos;
        state.score += ufo.score();
        log::debug!("UFO {} destroyed", ufo.id);

        particles::ufo_explosion(&mut state.particles, pos, &mut state.rng);
        hooks.audio.play(Cue::ExplosionLarge);
        state.screen_shake = SHAKE_UFO_KILL;
        spawned_pickups.extend(powerup::maybe_spawn(pos, &mut state.ids, &mut state.rng));
    }

    state.powerups.extend(spawned_pickups);
}

/// Lose a life; respawn or end the game
pub fn player_death(state: &mut GameState, hooks: &mut Hooks) {
    if let Some(player) = &state.player {
        particles::player_death(&mut state.particles, player.body.pos, &mut state.rng);
    }
    hooks.audio.play(Cue::PlayerDeath);
    state.stop_thrust_loop(hooks.audio);
    state.screen_shake = SHAKE_PLAYER_DEATH;

    state.lives = state.lives.saturating_sub(1);
    log::info!("Player destroyed, {} lives left", state.lives);

    if state.lives == 0 {
        state.game_over(hooks.scores);
    } else {
        let center = state.bounds.center();
        if let Some(player) = &mut state.player {
            player.reset(center);
        }
    }
}
