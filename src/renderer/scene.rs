//! Frame assembly: turns a read-only view of the session into a vertex list
//! plus the text the HUD should show.

use glam::Vec2;

use super::shapes;
use super::starfield::Starfield;
use super::vertex::{Vertex, colors, faded};
use crate::heading;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, ParticleKind, PowerUpKind, ShotOwner, UfoSize};

const LINE_WIDTH: f32 = 2.0;
const CIRCLE_SEGMENTS: u32 = 16;

/// Toggles that only affect presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub screen_shake: bool,
    pub particles: bool,
    pub starfield: bool,
    pub twinkle: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,
            starfield: true,
            twinkle: true,
        }
    }
}

impl From<&Settings> for RenderOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            screen_shake: settings.effective_screen_shake(),
            particles: settings.particles,
            starfield: settings.starfield,
            twinkle: settings.effective_twinkle(),
        }
    }
}

/// Centered overlay text for the current phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Title { high_score: u64 },
    Wave(u32),
    Paused,
    GameOver { score: u64, high_score: u64, new_record: bool },
}

impl Banner {
    pub fn lines(&self) -> Vec<String> {
        match self {
            Banner::Title { high_score } => vec![
                "ASTEROIDS".to_string(),
                format!("HIGH SCORE: {}", high_score),
                "PRESS SPACE TO START".to_string(),
                "WASD - Move".to_string(),
                "SPACE - Shoot".to_string(),
                "ESC/P - Pause".to_string(),
            ],
            Banner::Wave(wave) => vec![format!("WAVE {}", wave)],
            Banner::Paused => vec!["PAUSED".to_string(), "PRESS ESC/P TO RESUME".to_string()],
            Banner::GameOver {
                score,
                high_score,
                new_record,
            } => vec![
                "GAME OVER".to_string(),
                format!("FINAL SCORE: {}", score),
                if *new_record {
                    "NEW HIGH SCORE!".to_string()
                } else {
                    format!("HIGH SCORE: {}", high_score)
                },
                "PRESS SPACE TO RESTART".to_string(),
            ],
        }
    }
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub wave: u32,
    pub banner: Option<Banner>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let banner = match state.phase {
            GamePhase::Menu => Some(Banner::Title {
                high_score: state.high_score.best(),
            }),
            // Announce the wave about to start
            GamePhase::WavePause => Some(Banner::Wave(state.wave + 1)),
            GamePhase::Paused => Some(Banner::Paused),
            GamePhase::GameOver => Some(Banner::GameOver {
                score: state.score,
                high_score: state.high_score.best(),
                new_record: state.new_record,
            }),
            GamePhase::Playing => None,
        };
        Self {
            score: state.score,
            high_score: state.high_score.best(),
            lives: state.lives,
            wave: state.wave,
            banner,
        }
    }

    /// Corner readouts
    pub fn status_lines(&self) -> [String; 3] {
        [
            format!("SCORE: {}", self.score),
            format!("HIGH: {}", self.high_score),
            format!("WAVE: {}", self.wave),
        ]
    }
}

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub vertices: Vec<Vertex>,
    pub hud: Hud,
}

/// Build the frame for the current session
pub fn build_frame(state: &GameState, stars: &Starfield, options: RenderOptions) -> Frame {
    let mut vertices = Vec::new();

    if options.starfield {
        for star in &stars.stars {
            let b = stars.brightness(star, options.twinkle);
            vertices.extend(shapes::circle(star.pos, star.size, [b, b, b, 1.0], 6));
        }
    }

    // Shake moves the playfield, never the HUD
    let offset = if options.screen_shake && state.phase == GamePhase::Playing {
        state.shake_offset
    } else {
        Vec2::ZERO
    };

    if options.particles {
        for p in state.particles.iter().filter(|p| p.alive) {
            let color = match p.kind {
                ParticleKind::Debris => colors::DEBRIS,
                ParticleKind::Exhaust => colors::EXHAUST,
            };
            let size = (p.size * p.fade()).max(1.0);
            vertices.extend(shapes::circle(p.pos + offset, size, faded(color, p.fade()), 6));
        }
    }

    for rock in state.asteroids.iter().filter(|a| a.alive) {
        let points: Vec<Vec2> = rock
            .outline
            .iter()
            .map(|v| rock.body.pos + offset + crate::rotate_deg(*v, rock.rotation))
            .collect();
        vertices.extend(shapes::outline(&points, LINE_WIDTH, colors::ASTEROID));
    }

    for ufo in state.ufos.iter().filter(|u| u.alive) {
        vertices.extend(saucer(ufo.body.pos + offset, ufo.body.radius, ufo.size));
    }

    for pickup in state.powerups.iter().filter(|p| p.alive) {
        let color = match pickup.kind {
            PowerUpKind::Shield => colors::POWERUP_SHIELD,
            PowerUpKind::RapidFire => colors::POWERUP_RAPID_FIRE,
            PowerUpKind::SpreadShot => colors::POWERUP_SPREAD_SHOT,
            PowerUpKind::ExtraLife => colors::POWERUP_EXTRA_LIFE,
        };
        let r = pickup.body.radius * pickup.pulse_scale;
        let center = pickup.body.pos + offset;
        vertices.extend(shapes::ring(center, r - LINE_WIDTH, r, color, CIRCLE_SEGMENTS));
    }

    for shot in state.shots.iter().filter(|s| s.alive) {
        let color = match shot.owner {
            ShotOwner::Player => colors::PLAYER_SHOT,
            ShotOwner::Ufo(_) => colors::UFO_SHOT,
        };
        vertices.extend(shapes::circle(shot.body.pos + offset, shot.body.radius, color, 8));
    }

    if let Some(player) = &state.player {
        let blinked_out = player.invincible && !player.visible;
        let on_field = matches!(state.phase, GamePhase::WavePause | GamePhase::Playing | GamePhase::Paused);
        if on_field && !blinked_out {
            let pos = player.body.pos + offset;
            let r = player.body.radius;
            if player.shield.active {
                vertices.extend(shapes::ring(pos, r + 8.0, r + 10.0, colors::SHIELD, CIRCLE_SEGMENTS * 2));
            }
            if player.thrusting {
                let flicker = 1.0 + 0.3 * (stars.time() * 40.0).sin();
                vertices.extend(flame(pos, player.rotation, r, flicker));
            }
            vertices.extend(shapes::outline(&ship_points(pos, player.rotation, r), LINE_WIDTH, colors::SHIP));
        }
    }

    Frame {
        vertices,
        hud: Hud::from_state(state),
    }
}

/// Nose plus two rear corners
pub fn ship_points(pos: Vec2, rotation: f32, radius: f32) -> [Vec2; 3] {
    let forward = heading(rotation);
    let right = heading(rotation + 90.0) * radius / 1.5;
    [
        pos + forward * radius,
        pos - forward * radius - right,
        pos - forward * radius + right,
    ]
}

fn flame(pos: Vec2, rotation: f32, radius: f32, flicker: f32) -> Vec<Vertex> {
    let forward = heading(rotation);
    let side = heading(rotation + 90.0);
    let base = pos - forward * radius;
    let length = radius * 1.5 * flicker;

    let outer_half = side * radius / 3.0;
    let inner_half = side * radius / 5.0;
    let mut vertices = shapes::triangle(
        base - outer_half,
        base - forward * length,
        base + outer_half,
        colors::FLAME_OUTER,
    );
    vertices.extend(shapes::triangle(
        base - inner_half,
        base - forward * length * 0.6,
        base + inner_half,
        colors::FLAME_INNER,
    ));
    vertices
}

fn saucer(center: Vec2, r: f32, size: UfoSize) -> Vec<Vertex> {
    let mut vertices = shapes::ellipse_outline(center, r, r * 0.4, LINE_WIDTH, colors::UFO, 8);
    let dome = [
        center + Vec2::new(-r * 0.5, 0.0),
        center + Vec2::new(-r * 0.3, -r * 0.5),
        center + Vec2::new(r * 0.3, -r * 0.5),
        center + Vec2::new(r * 0.5, 0.0),
    ];
    vertices.extend(shapes::polyline(&dome, LINE_WIDTH, colors::UFO));
    if size == UfoSize::Small {
        // Marker light so the dangerous one stands out
        vertices.extend(shapes::circle(center + Vec2::new(0.0, -r * 0.25), 2.0, colors::UFO_SHOT, 6));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::persistence::MemoryScoreStore;
    use crate::sim::Bounds;
    use crate::sim::state::Shot;

    fn no_stars() -> Starfield {
        Starfield::new(0, 0, Bounds::SCREEN)
    }

    #[test]
    fn test_menu_shows_title_and_no_ship() {
        let state = GameState::new(1, 4200);
        let frame = build_frame(&state, &no_stars(), RenderOptions::default());
        assert!(frame.vertices.is_empty());
        assert_eq!(frame.hud.banner, Some(Banner::Title { high_score: 4200 }));
        assert!(frame.hud.banner.unwrap().lines()[1].contains("4200"));
    }

    #[test]
    fn test_wave_pause_announces_next_wave() {
        let mut state = GameState::new(1, 0);
        state.start_game(&mut SilentAudio);
        let frame = build_frame(&state, &no_stars(), RenderOptions::default());
        assert_eq!(frame.hud.banner, Some(Banner::Wave(1)));
        // Ship outline is drawn
        assert_eq!(frame.vertices.len(), 3 * 6);
    }

    #[test]
    fn test_blinked_out_ship_is_hidden() {
        let mut state = GameState::new(1, 0);
        state.start_game(&mut SilentAudio);
        let player = state.player.as_mut().unwrap();
        player.make_invincible(1.0);
        player.visible = false;
        let frame = build_frame(&state, &no_stars(), RenderOptions::default());
        assert!(frame.vertices.is_empty());
    }

    #[test]
    fn test_shake_only_offsets_playfield_while_playing() {
        let mut state = GameState::new(1, 0);
        state.phase = GamePhase::Playing;
        state.shake_offset = Vec2::new(5.0, -3.0);
        state.shots.push(Shot::new(1, Vec2::new(100.0, 100.0), Vec2::ZERO, ShotOwner::Player));

        let shaken = build_frame(&state, &no_stars(), RenderOptions::default());
        let still = build_frame(
            &state,
            &no_stars(),
            RenderOptions {
                screen_shake: false,
                ..Default::default()
            },
        );
        assert_eq!(shaken.vertices[0].position, [105.0, 97.0]);
        assert_eq!(still.vertices[0].position, [100.0, 100.0]);

        state.phase = GamePhase::Paused;
        let paused = build_frame(&state, &no_stars(), RenderOptions::default());
        assert_eq!(paused.vertices[0].position, [100.0, 100.0]);
    }

    fn game_over_with(score: u64, stored: u64) -> GameState {
        let mut state = GameState::new(1, stored);
        state.score = score;
        state.game_over(&mut MemoryScoreStore::with_score(stored));
        state
    }

    #[test]
    fn test_game_over_banner_flags_new_record() {
        let hud = Hud::from_state(&game_over_with(50, 100));
        assert_eq!(
            hud.banner,
            Some(Banner::GameOver {
                score: 50,
                high_score: 100,
                new_record: false
            })
        );

        let banner = Hud::from_state(&game_over_with(150, 100)).banner.unwrap();
        assert!(banner.lines().contains(&"NEW HIGH SCORE!".to_string()));
    }

    #[test]
    fn test_tying_the_best_is_not_a_new_record() {
        let hud = Hud::from_state(&game_over_with(100, 100));
        assert_eq!(
            hud.banner,
            Some(Banner::GameOver {
                score: 100,
                high_score: 100,
                new_record: false
            })
        );
    }

    #[test]
    fn test_options_from_settings_respect_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let options = RenderOptions::from(&settings);
        assert!(!options.screen_shake);
        assert!(!options.twinkle);
        assert!(options.starfield);
    }

    #[test]
    fn test_ship_nose_leads() {
        let [nose, left, right] = ship_points(Vec2::ZERO, 0.0, 20.0);
        assert_eq!(nose, Vec2::new(0.0, 20.0));
        assert!(left.y < 0.0 && right.y < 0.0);
    }
}
