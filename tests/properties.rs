//! Property tests over entity integration

use asteroid_blaster::audio::SilentAudio;
use asteroid_blaster::consts::*;
use asteroid_blaster::sim::state::EntityIds;
use asteroid_blaster::sim::wave::spawn_asteroid;
use asteroid_blaster::sim::{
    Asteroid, Bounds, Player, PowerUp, PowerUpKind, ShipControls, Shot, ShotOwner, Ufo, UfoSize, UfoSpawner,
    particles,
};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Anywhere a body can live, including the ring just outside the screen
fn on_field() -> impl Strategy<Value = Vec2> {
    (
        -WRAP_MARGIN..SCREEN_WIDTH + WRAP_MARGIN,
        -WRAP_MARGIN..SCREEN_HEIGHT + WRAP_MARGIN,
    )
        .prop_map(|(x, y)| Vec2::new(x, y))
}

fn controls() -> impl Strategy<Value = ShipControls> {
    any::<(bool, bool, bool, bool, bool)>().prop_map(|(forward, back, rotate_left, rotate_right, fire)| ShipControls {
        forward,
        back,
        rotate_left,
        rotate_right,
        fire,
    })
}

fn velocity() -> impl Strategy<Value = Vec2> {
    (-300.0f32..300.0, -300.0f32..300.0).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #[test]
    fn prop_zero_dt_keeps_every_entity_in_place(
        pos in on_field(),
        vel in velocity(),
        ship in controls(),
        seed in any::<u64>(),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = EntityIds::default();
        let bounds = Bounds::SCREEN;

        let mut rock = Asteroid::new(1, pos, ASTEROID_MAX_RADIUS, vel, &mut rng);
        rock.advance(0.0, bounds);
        prop_assert_eq!(rock.body.pos, pos);

        let mut shot = Shot::new(2, pos, vel, ShotOwner::Player);
        shot.advance(0.0);
        prop_assert_eq!(shot.body.pos, pos);

        let mut ufo = Ufo::new(3, pos, UfoSize::Small, &mut rng);
        ufo.advance(0.0, bounds, Some(Vec2::ZERO), &mut ids, &mut rng);
        prop_assert_eq!(ufo.body.pos, pos);

        let mut pickup = PowerUp::new(4, pos, PowerUpKind::Shield, &mut rng);
        pickup.advance(0.0, bounds);
        prop_assert_eq!(pickup.body.pos, pos);

        let mut player = Player::new(pos);
        let mut shots = Vec::new();
        player.advance(&ship, 0.0, bounds, &mut ids, &mut shots, &mut SilentAudio);
        prop_assert_eq!(player.body.pos, pos);

        let mut debris = Vec::new();
        particles::explosion(&mut debris, pos, 4, PARTICLE_SPEED, &mut rng);
        for p in &mut debris {
            p.advance(0.0);
            prop_assert_eq!(p.pos, pos);
        }
    }

    #[test]
    fn prop_zero_dt_keeps_edge_spawns_off_field(wave in 1u32..20, seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = EntityIds::default();
        let bounds = Bounds::SCREEN;
        let off_screen = |p: Vec2| p.x < 0.0 || p.x > bounds.width || p.y < 0.0 || p.y > bounds.height;

        let mut rock = spawn_asteroid(1.0, bounds, &mut ids, &mut rng);
        let start = rock.body.pos;
        prop_assert!(off_screen(start));
        rock.advance(0.0, bounds);
        prop_assert_eq!(rock.body.pos, start);

        let mut ufo = UfoSpawner::spawn(wave, bounds, &mut ids, &mut rng);
        let start = ufo.body.pos;
        prop_assert!(off_screen(start));
        ufo.advance(0.0, bounds, None, &mut ids, &mut rng);
        prop_assert_eq!(ufo.body.pos, start);
    }

    #[test]
    fn prop_split_children_mirror_each_other(radius_step in 2u32..=3, vel in velocity(), seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = EntityIds::default();
        let radius = ASTEROID_MIN_RADIUS * radius_step as f32;
        let mut rock = Asteroid::new(ids.next(), Vec2::new(300.0, 300.0), radius, vel, &mut rng);

        let children = rock.split(&mut ids, &mut rng);
        prop_assert!(!rock.alive);
        prop_assert_eq!(children.len(), 2);
        for child in &children {
            prop_assert_eq!(child.radius(), radius - ASTEROID_MIN_RADIUS);
        }
        prop_assert_eq!(children[0].body.vel, -children[1].body.vel);
    }
}
