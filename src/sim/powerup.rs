//! Collectible power-ups dropped by destroyed full-size rocks and saucers

use glam::Vec2;
use rand::Rng;

use super::circle::{Bounds, Circle};
use super::player::Player;
use super::state::EntityIds;
use crate::consts::*;
use crate::unit_from_angle;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    RapidFire,
    SpreadShot,
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::SpreadShot,
        PowerUpKind::ExtraLife,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Outcome of collecting a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpEffect {
    /// A timed flag was armed on the player
    Timed,
    /// The controller should grant a life
    ExtraLife,
}

/// A drifting pickup
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub body: Circle,
    pub lifetime: f32,
    pub pulse_timer: f32,
    /// Cosmetic size multiplier
    pub pulse_scale: f32,
    pub alive: bool,
}

impl PowerUp {
    pub fn new<R: Rng + ?Sized>(id: u32, pos: Vec2, kind: PowerUpKind, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        Self {
            id,
            kind,
            body: Circle::new(pos, POWERUP_RADIUS).with_velocity(unit_from_angle(angle) * POWERUP_DRIFT_SPEED),
            lifetime: POWERUP_LIFETIME,
            pulse_timer: 0.0,
            pulse_scale: 1.0,
            alive: true,
        }
    }

    pub fn advance(&mut self, dt: f32, bounds: Bounds) {
        if dt <= 0.0 {
            return;
        }
        self.body.integrate(dt);
        self.body.wrap(bounds);

        self.pulse_timer += dt * 3.0;
        self.pulse_scale = 1.0 + 0.15 * self.pulse_timer.sin();

        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.alive = false;
        }
    }

    /// Grant this power-up to the player. Extra lives are never stored on the
    /// player; they are reported back for the controller to count.
    pub fn apply(&self, player: &mut Player) -> PowerUpEffect {
        match self.kind {
            PowerUpKind::Shield => player.shield.arm(POWERUP_SHIELD_DURATION),
            PowerUpKind::RapidFire => player.rapid_fire.arm(POWERUP_DURATION),
            PowerUpKind::SpreadShot => player.spread_shot.arm(POWERUP_DURATION),
            PowerUpKind::ExtraLife => return PowerUpEffect::ExtraLife,
        }
        PowerUpEffect::Timed
    }
}

/// Roll the drop chance and build a random power-up at `pos` on success
pub fn maybe_spawn<R: Rng + ?Sized>(pos: Vec2, ids: &mut EntityIds, rng: &mut R) -> Option<PowerUp> {
    if rng.random_bool(POWERUP_DROP_CHANCE) {
        let kind = PowerUpKind::random(rng);
        log::debug!("Power-up {:?} dropped at {:?}", kind, pos);
        Some(PowerUp::new(ids.next(), pos, kind, rng))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pickup(kind: PowerUpKind) -> PowerUp {
        let mut rng = Pcg32::seed_from_u64(1);
        PowerUp::new(1, Vec2::new(200.0, 200.0), kind, &mut rng)
    }

    #[test]
    fn test_apply_timed_kinds() {
        let mut player = Player::new(Vec2::ZERO);
        assert_eq!(pickup(PowerUpKind::Shield).apply(&mut player), PowerUpEffect::Timed);
        assert_eq!(pickup(PowerUpKind::RapidFire).apply(&mut player), PowerUpEffect::Timed);
        assert_eq!(pickup(PowerUpKind::SpreadShot).apply(&mut player), PowerUpEffect::Timed);
        assert!(player.shield.active);
        assert!(player.rapid_fire.active);
        assert!(player.spread_shot.active);
        assert_eq!(player.shield.remaining, POWERUP_SHIELD_DURATION);
    }

    #[test]
    fn test_extra_life_leaves_player_untouched() {
        let mut player = Player::new(Vec2::ZERO);
        assert_eq!(pickup(PowerUpKind::ExtraLife).apply(&mut player), PowerUpEffect::ExtraLife);
        assert!(!player.shield.active && !player.rapid_fire.active && !player.spread_shot.active);
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut p = pickup(PowerUpKind::Shield);
        p.advance(POWERUP_LIFETIME - 0.5, Bounds::SCREEN);
        assert!(p.alive);
        p.advance(1.0, Bounds::SCREEN);
        assert!(!p.alive);
    }

    #[test]
    fn test_drift_speed_and_zero_dt() {
        let mut p = pickup(PowerUpKind::RapidFire);
        assert!((p.body.vel.length() - POWERUP_DRIFT_SPEED).abs() < 1e-3);
        p.advance(0.0, Bounds::SCREEN);
        assert_eq!(p.body.pos, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_drop_rate_is_roughly_the_configured_chance() {
        let mut rng = Pcg32::seed_from_u64(77);
        let mut ids = EntityIds::default();
        let drops = (0..2000)
            .filter(|_| maybe_spawn(Vec2::ZERO, &mut ids, &mut rng).is_some())
            .count();
        assert!((300..500).contains(&drops), "drops = {drops}");
    }
}
