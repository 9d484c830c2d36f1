//! The player's ship

use glam::Vec2;

use super::circle::{Bounds, Circle};
use super::state::{EntityIds, Shot, ShotOwner};
use crate::audio::{AudioSink, Cue};
use crate::consts::*;
use crate::heading;

/// Held controls for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipControls {
    pub forward: bool,
    pub back: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
}

impl ShipControls {
    pub fn thrusting(&self) -> bool {
        self.forward || self.back
    }
}

/// A timed power-up flag
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timed {
    pub active: bool,
    pub remaining: f32,
}

impl Timed {
    pub fn arm(&mut self, duration: f32) {
        self.active = true;
        self.remaining = duration;
    }

    fn tick(&mut self, dt: f32) {
        if self.active {
            self.remaining -= dt;
            if self.remaining <= 0.0 {
                self.active = false;
            }
        }
    }
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Circle,
    /// Heading in degrees
    pub rotation: f32,
    pub shot_cooldown: f32,
    pub invincible: bool,
    pub invincibility_timer: f32,
    pub blink_timer: f32,
    /// Blink phase while invincible
    pub visible: bool,
    pub rapid_fire: Timed,
    pub spread_shot: Timed,
    pub shield: Timed,
    pub thrusting: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Circle::new(pos, PLAYER_RADIUS),
            rotation: 0.0,
            shot_cooldown: 0.0,
            invincible: false,
            invincibility_timer: 0.0,
            blink_timer: 0.0,
            visible: true,
            rapid_fire: Timed::default(),
            spread_shot: Timed::default(),
            shield: Timed::default(),
            thrusting: false,
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        !self.invincible && !self.shield.active
    }

    pub fn make_invincible(&mut self, duration: f32) {
        self.invincible = true;
        self.invincibility_timer = duration;
        self.blink_timer = PLAYER_BLINK_INTERVAL;
    }

    /// Respawn at `pos` with a fresh invincibility window
    pub fn reset(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.body.vel = Vec2::ZERO;
        self.rotation = 0.0;
        self.thrusting = false;
        self.make_invincible(PLAYER_INVINCIBILITY_TIME);
    }

    pub fn heading(&self) -> Vec2 {
        heading(self.rotation)
    }

    /// Point just behind the hull, where exhaust leaves the ship
    pub fn rear(&self) -> Vec2 {
        self.body.pos - self.heading() * self.body.radius
    }

    /// Seconds between shots with current power-ups
    pub fn cooldown(&self) -> f32 {
        if self.rapid_fire.active {
            PLAYER_SHOOT_COOLDOWN / POWERUP_RAPID_FIRE_MULTIPLIER
        } else {
            PLAYER_SHOOT_COOLDOWN
        }
    }

    /// Apply controls and run timers for one tick
    pub fn advance(
        &mut self,
        controls: &ShipControls,
        dt: f32,
        bounds: Bounds,
        ids: &mut EntityIds,
        shots: &mut Vec<Shot>,
        audio: &mut dyn AudioSink,
    ) {
        self.thrusting = controls.thrusting();

        let thrust = match (controls.forward, controls.back) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        self.body.vel = self.heading() * PLAYER_SPEED * thrust;
        self.body.integrate(dt);

        if controls.rotate_left {
            self.rotation -= PLAYER_TURN_SPEED * dt;
        }
        if controls.rotate_right {
            self.rotation += PLAYER_TURN_SPEED * dt;
        }

        if controls.fire && self.shot_cooldown <= 0.0 {
            self.shoot(ids, shots, audio);
            self.shot_cooldown = self.cooldown();
        }
        self.shot_cooldown -= dt;

        if self.invincible {
            self.invincibility_timer -= dt;
            self.blink_timer -= dt;
            if self.blink_timer <= 0.0 {
                self.visible = !self.visible;
                self.blink_timer = PLAYER_BLINK_INTERVAL;
            }
            if self.invincibility_timer <= 0.0 {
                self.invincible = false;
                self.visible = true;
            }
        }

        self.rapid_fire.tick(dt);
        self.spread_shot.tick(dt);
        self.shield.tick(dt);

        self.body.wrap(bounds);
    }

    /// Fire one shot, or a three-way fan with spread shot
    pub fn shoot(&mut self, ids: &mut EntityIds, shots: &mut Vec<Shot>, audio: &mut dyn AudioSink) {
        let offsets: &[f32] = if self.spread_shot.active { &SPREAD_ANGLES } else { &[0.0] };
        for offset in offsets {
            let vel = heading(self.rotation + offset) * PLAYER_SHOT_SPEED;
            shots.push(Shot::new(ids.next(), self.body.pos, vel, ShotOwner::Player));
        }
        audio.play(Cue::Shoot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;

    fn step(player: &mut Player, controls: ShipControls, dt: f32) -> Vec<Shot> {
        let mut shots = Vec::new();
        let mut ids = EntityIds::default();
        player.advance(&controls, dt, Bounds::SCREEN, &mut ids, &mut shots, &mut SilentAudio);
        shots
    }

    #[test]
    fn test_fresh_player_is_vulnerable() {
        assert!(Player::new(Vec2::new(100.0, 100.0)).is_vulnerable());
    }

    #[test]
    fn test_reset_grants_invincibility_until_it_elapses() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.reset(Bounds::SCREEN.center());
        assert!(!player.is_vulnerable());

        step(&mut player, ShipControls::default(), PLAYER_INVINCIBILITY_TIME / 2.0);
        assert!(!player.is_vulnerable());

        step(&mut player, ShipControls::default(), PLAYER_INVINCIBILITY_TIME / 2.0 + 0.01);
        assert!(player.is_vulnerable());
        assert!(player.visible);
    }

    #[test]
    fn test_shield_blocks_vulnerability() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.shield.arm(POWERUP_SHIELD_DURATION);
        assert!(!player.is_vulnerable());
        step(&mut player, ShipControls::default(), POWERUP_SHIELD_DURATION + 0.1);
        assert!(player.is_vulnerable());
    }

    #[test]
    fn test_forward_moves_along_heading() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        let controls = ShipControls {
            forward: true,
            ..Default::default()
        };
        step(&mut player, controls, 0.5);
        assert!((player.body.pos.y - (100.0 + PLAYER_SPEED * 0.5)).abs() < 1e-3);
        assert!(player.thrusting);
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        let controls = ShipControls {
            forward: true,
            rotate_left: true,
            ..Default::default()
        };
        step(&mut player, controls, 0.0);
        assert_eq!(player.body.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        let fire = ShipControls {
            fire: true,
            ..Default::default()
        };
        assert_eq!(step(&mut player, fire, 0.2).len(), 1);
        assert_eq!(step(&mut player, fire, 0.2).len(), 0);
        assert_eq!(step(&mut player, fire, 0.2).len(), 1);
    }

    #[test]
    fn test_spread_shot_fires_three() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.spread_shot.arm(POWERUP_DURATION);
        let fire = ShipControls {
            fire: true,
            ..Default::default()
        };
        let shots = step(&mut player, fire, 0.016);
        assert_eq!(shots.len(), 3);
        assert!(shots.iter().all(|s| s.owner == ShotOwner::Player));
    }

    #[test]
    fn test_rapid_fire_halves_cooldown() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.rapid_fire.arm(POWERUP_DURATION);
        assert!((player.cooldown() - PLAYER_SHOOT_COOLDOWN / 2.0).abs() < 1e-6);
    }
}
