//! Per-frame entry point
//!
//! Owns the session and its collaborators. A host feeds key events into
//! [`App::keyboard_mut`], calls [`App::frame`] once per display frame, draws
//! the returned [`Frame`] and plays whatever [`App::drain_audio`] yields.

use crate::audio::{AudioEvent, AudioManager, AudioSink, SilentAudio};
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::platform::Keyboard;
use crate::renderer::{Frame, RenderOptions, Starfield, build_frame, starfield};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Hooks, TickInput, tick};

/// Result of one frame
#[derive(Debug, Clone)]
pub enum FrameOutcome {
    Continue(Frame),
    Quit,
}

pub struct App {
    state: GameState,
    settings: Settings,
    audio: Option<AudioManager>,
    silent: SilentAudio,
    scores: Box<dyn ScoreStore>,
    keyboard: Keyboard,
    stars: Starfield,
    last_phase: GamePhase,
}

impl App {
    pub fn new(seed: u64, settings: Settings, mut scores: Box<dyn ScoreStore>) -> Self {
        let high_score = HighScore::load(scores.as_mut());
        let audio = AudioManager::from_settings(&settings);
        let state = GameState::new(seed, high_score.best());
        Self {
            last_phase: state.phase,
            stars: Starfield::new(seed, starfield::DEFAULT_STAR_COUNT, state.bounds),
            state,
            settings,
            audio: Some(audio),
            silent: SilentAudio,
            scores,
            keyboard: Keyboard::new(),
        }
    }

    /// Run with no audio device at all
    pub fn without_audio(mut self) -> Self {
        log::warn!("Audio unavailable, running silent");
        self.audio = None;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    /// Audio instructions queued since the last call
    pub fn drain_audio(&mut self) -> Vec<AudioEvent> {
        match &mut self.audio {
            Some(audio) => audio.drain().collect(),
            None => Vec::new(),
        }
    }

    /// Advance one frame from keyboard input
    pub fn frame(&mut self, dt: f32) -> FrameOutcome {
        if self.keyboard.quit_requested() {
            log::info!("Quit requested");
            self.keyboard.end_frame();
            return FrameOutcome::Quit;
        }
        if self.keyboard.sound_toggle_requested() {
            if let Some(audio) = &mut self.audio {
                audio.toggle();
                // The manager dropped or never started its loops; let the
                // sim restart thrust on the next tick if it is still held
                self.state.thrust_loop = false;
            }
        }
        let input = self.keyboard.tick_input();
        FrameOutcome::Continue(self.step(&input, dt))
    }

    /// Advance one frame from explicit input
    pub fn step(&mut self, input: &TickInput, dt: f32) -> Frame {
        let audio: &mut dyn AudioSink = match self.audio.as_mut() {
            Some(audio) => audio,
            None => &mut self.silent,
        };
        let mut hooks = Hooks {
            audio,
            scores: self.scores.as_mut(),
        };
        tick(&mut self.state, input, dt, &mut hooks);

        if self.state.phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            self.last_phase = self.state.phase;
        }

        self.stars.update(dt);
        self.keyboard.end_frame();
        build_frame(&self.state, &self.stars, RenderOptions::from(&self.settings))
    }
}
