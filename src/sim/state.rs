//! Game session state and shared simulation types
//!
//! The session owns every live entity in typed collections. Entities are
//! killed by clearing their `alive` flag; dead entities are skipped by every
//! later pass in the same tick and pruned once the tick finishes.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::asteroid::Asteroid;
use super::circle::{Bounds, Circle};
use super::particles::Particle;
use super::player::Player;
use super::powerup::PowerUp;
use super::ufo::{Ufo, UfoSpawner};
use super::wave;
use crate::audio::{AudioSink, Cue};
use crate::consts::*;
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, no player exists
    Menu,
    /// Countdown before the next wave spawns
    WavePause,
    /// Active gameplay
    Playing,
    /// Simulation frozen
    Paused,
    /// Out of lives
    GameOver,
}

/// Collaborators the simulation may notify during a tick
pub struct Hooks<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub scores: &'a mut dyn ScoreStore,
}

/// Monotonic entity ID source
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Who fired a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOwner {
    Player,
    /// Saucer with this entity id
    Ufo(u32),
}

/// A projectile. Shots do not wrap; they expire by lifetime.
#[derive(Debug, Clone)]
pub struct Shot {
    pub id: u32,
    pub body: Circle,
    pub lifetime: f32,
    pub owner: ShotOwner,
    pub alive: bool,
}

impl Shot {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, owner: ShotOwner) -> Self {
        Self {
            id,
            body: Circle::new(pos, SHOT_RADIUS).with_velocity(vel),
            lifetime: SHOT_LIFETIME,
            owner,
            alive: true,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.body.integrate(dt);
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.alive = false;
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) ids: EntityIds,
    pub bounds: Bounds,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Number of the wave in progress (0 before the first wave)
    pub wave: u32,
    /// Seconds left in the wave pause
    pub wave_timer: f32,
    /// Decaying shake magnitude
    pub screen_shake: f32,
    /// Render offset derived from `screen_shake` this tick
    pub shake_offset: Vec2,
    pub high_score: HighScore,
    /// The last game over raised the stored high score
    pub new_record: bool,
    /// Whether the thrust loop cue is currently playing
    pub thrust_loop: bool,
    pub player: Option<Player>,
    pub asteroids: Vec<Asteroid>,
    pub shots: Vec<Shot>,
    pub ufos: Vec<Ufo>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub ufo_spawner: UfoSpawner,
}

impl GameState {
    /// Create a session sitting in the menu
    pub fn new(seed: u64, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ufo_spawner = UfoSpawner::new(&mut rng);
        Self {
            seed,
            rng,
            ids: EntityIds::default(),
            bounds: Bounds::SCREEN,
            phase: GamePhase::Menu,
            score: 0,
            lives: PLAYER_LIVES,
            wave: 0,
            wave_timer: 0.0,
            screen_shake: 0.0,
            shake_offset: Vec2::ZERO,
            high_score: HighScore::new(high_score),
            new_record: false,
            thrust_loop: false,
            player: None,
            asteroids: Vec::new(),
            shots: Vec::new(),
            ufos: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            ufo_spawner,
        }
    }

    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next()
    }

    /// Begin a fresh run: clear the field, spawn the player, arm the wave pause
    pub fn start_game(&mut self, audio: &mut dyn AudioSink) {
        self.asteroids.clear();
        self.shots.clear();
        self.ufos.clear();
        self.powerups.clear();
        self.particles.clear();

        self.score = 0;
        self.new_record = false;
        self.lives = PLAYER_LIVES;
        self.wave = 0;
        self.screen_shake = 0.0;
        self.shake_offset = Vec2::ZERO;
        self.ufo_spawner = UfoSpawner::new(&mut self.rng);
        self.player = Some(Player::new(self.bounds.center()));
        self.stop_thrust_loop(audio);

        self.phase = GamePhase::WavePause;
        self.wave_timer = WAVE_PAUSE_TIME;
        log::info!("New game started (seed {})", self.seed);
    }

    /// Advance the wave counter and spawn its asteroids
    pub fn start_wave(&mut self) {
        self.wave += 1;
        wave::generate_wave(self);
        self.phase = GamePhase::Playing;
    }

    /// Enter game over, recording the high score if beaten
    pub fn game_over(&mut self, scores: &mut dyn ScoreStore) {
        self.phase = GamePhase::GameOver;
        self.new_record = self.high_score.submit(self.score, scores);
        if self.new_record {
            log::info!("New high score: {}", self.score);
        }
        log::info!("Game over at wave {} with score {}", self.wave, self.score);
    }

    pub(crate) fn stop_thrust_loop(&mut self, audio: &mut dyn AudioSink) {
        if self.thrust_loop {
            audio.stop_loop(Cue::Thrust);
            self.thrust_loop = false;
        }
        if let Some(player) = &mut self.player {
            player.thrusting = false;
        }
    }

    pub fn live_asteroids(&self) -> usize {
        self.asteroids.iter().filter(|a| a.alive).count()
    }

    pub fn live_ufos(&self) -> usize {
        self.ufos.iter().filter(|u| u.alive).count()
    }

    pub fn live_shots(&self) -> usize {
        self.shots.iter().filter(|s| s.alive).count()
    }

    /// No hostile rocks or saucers remain
    pub fn wave_cleared(&self) -> bool {
        self.live_asteroids() == 0 && self.live_ufos() == 0
    }

    /// Drop every entity flagged dead
    pub fn prune(&mut self) {
        self.asteroids.retain(|a| a.alive);
        self.shots.retain(|s| s.alive);
        self.ufos.retain(|u| u.alive);
        self.powerups.retain(|p| p.alive);
        self.particles.retain(|p| p.alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::persistence::MemoryScoreStore;

    #[test]
    fn test_new_state_is_in_menu_without_player() {
        let state = GameState::new(7, 0);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.player.is_none());
        assert_eq!(state.wave, 0);
    }

    #[test]
    fn test_start_game_resets_session() {
        let mut state = GameState::new(7, 0);
        state.score = 500;
        state.lives = 1;
        state.wave = 4;
        state.start_game(&mut SilentAudio);

        assert_eq!(state.phase, GamePhase::WavePause);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, PLAYER_LIVES);
        assert_eq!(state.wave, 0);
        assert!((state.wave_timer - WAVE_PAUSE_TIME).abs() < 1e-6);
        assert!(state.player.is_some());
    }

    #[test]
    fn test_shot_expires_after_lifetime() {
        let mut shot = Shot::new(1, Vec2::ZERO, Vec2::new(100.0, 0.0), ShotOwner::Player);
        shot.advance(SHOT_LIFETIME / 2.0);
        assert!(shot.alive);
        shot.advance(SHOT_LIFETIME);
        assert!(!shot.alive);
    }

    #[test]
    fn test_shot_zero_dt_keeps_position() {
        let mut shot = Shot::new(1, Vec2::new(5.0, 5.0), Vec2::new(100.0, 0.0), ShotOwner::Ufo(2));
        shot.advance(0.0);
        assert_eq!(shot.body.pos, Vec2::new(5.0, 5.0));
        assert!(shot.alive);
    }

    #[test]
    fn test_game_over_saves_only_beaten_high_score() {
        let mut store = MemoryScoreStore::default();
        let mut state = GameState::new(1, 1000);
        state.score = 400;
        state.game_over(&mut store);
        assert!(store.writes.is_empty());
        assert_eq!(state.high_score.best(), 1000);

        let mut state = GameState::new(1, 1000);
        state.score = 1500;
        state.game_over(&mut store);
        assert_eq!(store.writes, vec![1500]);
        assert_eq!(state.phase, GamePhase::GameOver);
    }
}
