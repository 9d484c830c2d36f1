//! Attract mode: a simple autopilot that plays when nobody is at the keys

use glam::Vec2;

use crate::sim::{GamePhase, GameState, ShipControls, TickInput};

/// Hazards closer than this (beyond their radius) make the ship back off
const DANGER_DISTANCE: f32 = 90.0;
/// Fire when the target is within this many degrees of the nose
const FIRE_CONE_DEG: f32 = 8.0;
/// Seconds to linger on the game over screen before restarting
const RESTART_DELAY: f32 = 3.0;

#[derive(Debug, Clone, Default)]
pub struct AttractPilot {
    idle: f32,
}

impl AttractPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this frame's input
    pub fn input(&mut self, state: &GameState, dt: f32) -> TickInput {
        match state.phase {
            GamePhase::Menu => TickInput {
                start: true,
                ..Default::default()
            },
            GamePhase::GameOver => {
                self.idle += dt;
                let start = self.idle >= RESTART_DELAY;
                if start {
                    self.idle = 0.0;
                }
                TickInput {
                    start,
                    ..Default::default()
                }
            }
            GamePhase::Playing => TickInput {
                ship: Self::fly(state),
                ..Default::default()
            },
            GamePhase::WavePause | GamePhase::Paused => TickInput::default(),
        }
    }

    fn fly(state: &GameState) -> ShipControls {
        let Some(player) = &state.player else {
            return ShipControls::default();
        };
        let pos = player.body.pos;

        // Nearest hostile by surface distance
        let hazards = state
            .asteroids
            .iter()
            .filter(|a| a.alive)
            .map(|a| a.body)
            .chain(state.ufos.iter().filter(|u| u.alive).map(|u| u.body));
        let nearest = hazards.min_by(|a, b| {
            let da = a.pos.distance(pos) - a.radius;
            let db = b.pos.distance(pos) - b.radius;
            da.total_cmp(&db)
        });

        let Some(hazard) = nearest else {
            return ShipControls::default();
        };
        let gap = hazard.pos.distance(pos) - hazard.radius - player.body.radius;
        let in_danger = gap < DANGER_DISTANCE;

        // Go for pickups only when nothing is close
        let pickup = state
            .powerups
            .iter()
            .filter(|p| p.alive)
            .min_by(|a, b| a.body.pos.distance(pos).total_cmp(&b.body.pos.distance(pos)));
        let target = match pickup {
            Some(p) if !in_danger => p.body.pos,
            _ => hazard.pos,
        };
        let chasing_pickup = target != hazard.pos;

        let mut controls = steer(player.heading(), target - pos);
        let aligned = angle_between(player.heading(), hazard.pos - pos) <= FIRE_CONE_DEG;
        controls.fire = aligned;
        controls.forward = chasing_pickup;
        controls.back = in_danger && !chasing_pickup;
        controls
    }
}

/// Rotate toward `to_target`, or hold when already on it
fn steer(heading: Vec2, to_target: Vec2) -> ShipControls {
    let mut controls = ShipControls::default();
    if angle_between(heading, to_target) > FIRE_CONE_DEG / 2.0 {
        // Positive rotation turns the nose counter-clockwise
        if heading.perp_dot(to_target) > 0.0 {
            controls.rotate_right = true;
        } else {
            controls.rotate_left = true;
        }
    }
    controls
}

fn angle_between(a: Vec2, b: Vec2) -> f32 {
    if b.length_squared() == 0.0 {
        return 0.0;
    }
    a.angle_to(b).abs().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::consts::*;
    use crate::sim::asteroid::Asteroid;
    use crate::sim::circle::Bounds;
    use crate::sim::player::Player;
    use crate::sim::state::EntityIds;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn lone_rock(at: Vec2) -> GameState {
        let mut state = GameState::new(1, 0);
        state.phase = GamePhase::Playing;
        let player = Player::new(Bounds::SCREEN.center());
        state.player = Some(player);
        let mut rng = Pcg32::seed_from_u64(2);
        state.asteroids.push(Asteroid::new(1, at, ASTEROID_MIN_RADIUS, Vec2::ZERO, &mut rng));
        state
    }

    #[test]
    fn test_starts_from_menu() {
        let state = GameState::new(1, 0);
        assert!(AttractPilot::new().input(&state, 0.016).start);
    }

    #[test]
    fn test_waits_before_restart() {
        let mut state = GameState::new(1, 0);
        state.phase = GamePhase::GameOver;
        let mut pilot = AttractPilot::new();
        assert!(!pilot.input(&state, 1.0).start);
        assert!(!pilot.input(&state, 1.0).start);
        assert!(pilot.input(&state, 1.5).start);
    }

    #[test]
    fn test_fires_at_rock_dead_ahead() {
        let center = Bounds::SCREEN.center();
        let state = lone_rock(center + Vec2::Y * 300.0);
        let controls = AttractPilot::new().input(&state, 0.016).ship;
        assert!(controls.fire);
        assert!(!controls.rotate_left && !controls.rotate_right);
        assert!(!controls.back);
    }

    #[test]
    fn test_turns_toward_rock() {
        let center = Bounds::SCREEN.center();
        let mut state = lone_rock(center + Vec2::X * 300.0);
        let mut pilot = AttractPilot::new();
        let mut ids = EntityIds::default();
        let mut shots = Vec::new();

        let start = angle_between(state.player.as_ref().unwrap().heading(), Vec2::X);
        for _ in 0..20 {
            let controls = pilot.input(&state, 0.016).ship;
            let player = state.player.as_mut().unwrap();
            player.advance(&controls, 0.016, Bounds::SCREEN, &mut ids, &mut shots, &mut SilentAudio);
        }
        let end = angle_between(state.player.as_ref().unwrap().heading(), Vec2::X);
        assert!(end < start, "start {start} end {end}");
    }

    #[test]
    fn test_backs_off_when_crowded() {
        let center = Bounds::SCREEN.center();
        let state = lone_rock(center + Vec2::Y * 60.0);
        let controls = AttractPilot::new().input(&state, 0.016).ship;
        assert!(controls.back);
        assert!(!controls.forward);
    }
}
