//! Sound cues and the audio manager
//!
//! The simulation only ever talks to [`AudioSink`]. Every cue is described
//! procedurally as a handful of oscillator voices, so a backend needs no
//! asset files: it can either drain [`AudioEvent`]s and synthesize them
//! itself or call [`synthesize`] for ready-made PCM.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Player fired
    Shoot,
    /// Small rock destroyed
    ExplosionSmall,
    /// Medium rock destroyed
    ExplosionMedium,
    /// Large rock or saucer destroyed
    ExplosionLarge,
    /// Ship lost
    PlayerDeath,
    /// Engine rumble, looped while thrusting
    Thrust,
    /// Timed power-up collected
    PowerUp,
    /// Extra life collected
    ExtraLife,
}

impl Cue {
    pub const ALL: [Cue; 8] = [
        Cue::Shoot,
        Cue::ExplosionSmall,
        Cue::ExplosionMedium,
        Cue::ExplosionLarge,
        Cue::PlayerDeath,
        Cue::Thrust,
        Cue::PowerUp,
        Cue::ExtraLife,
    ];

    /// Explosion cue matching a destroyed rock's size band
    pub fn explosion_for_radius(radius: f32) -> Self {
        if radius >= ASTEROID_MAX_RADIUS {
            Cue::ExplosionLarge
        } else if radius >= ASTEROID_MIN_RADIUS * 2.0 {
            Cue::ExplosionMedium
        } else {
            Cue::ExplosionSmall
        }
    }

    /// Whether this cue is meant to be looped
    pub fn is_loop(self) -> bool {
        self == Cue::Thrust
    }

    /// Oscillator voices that make up this cue
    pub fn voices(self) -> &'static [Voice] {
        match self {
            Cue::Shoot => SHOOT,
            Cue::ExplosionSmall => EXPLOSION_SMALL,
            Cue::ExplosionMedium => EXPLOSION_MEDIUM,
            Cue::ExplosionLarge => EXPLOSION_LARGE,
            Cue::PlayerDeath => PLAYER_DEATH,
            Cue::Thrust => THRUST,
            Cue::PowerUp => POWER_UP,
            Cue::ExtraLife => EXTRA_LIFE,
        }
    }
}

use Waveform::*;

const SHOOT: &[Voice] = &[Voice::sweep(Sine, 1200.0, 400.0, 0.3, 0.1, 30.0)];
const EXPLOSION_SMALL: &[Voice] = &[
    Voice::sweep(Noise, 0.0, 0.0, 0.2, 0.15, 20.0),
    Voice::sweep(Sine, 800.0, 200.0, 0.2, 0.15, 20.0),
];
const EXPLOSION_MEDIUM: &[Voice] = &[
    Voice::sweep(Noise, 0.0, 0.0, 0.2, 0.2, 15.0),
    Voice::sweep(Sine, 500.0, 120.0, 0.2, 0.2, 15.0),
];
const EXPLOSION_LARGE: &[Voice] = &[
    Voice::sweep(Noise, 0.0, 0.0, 0.2, 0.3, 10.0),
    Voice::sweep(Sawtooth, 300.0, 30.0, 0.2, 0.3, 10.0),
];
const PLAYER_DEATH: &[Voice] = &[
    Voice::sweep(Sine, 600.0, 80.0, 0.4, 0.5, 2.0),
    Voice::sweep(Noise, 0.0, 0.0, 0.12, 0.5, 2.0),
];
// Looped, so no decay
const THRUST: &[Voice] = &[
    Voice::sweep(Noise, 0.0, 0.0, 0.1, 0.2, 0.0),
    Voice::sweep(Triangle, 80.0, 80.0, 0.06, 0.2, 0.0),
];
const POWER_UP: &[Voice] = &[Voice::sweep(Sine, 400.0, 1000.0, 0.3, 0.3, 0.0)];
// C5 E5 G5
const EXTRA_LIFE: &[Voice] = &[
    Voice::note(Square, 523.0, 0.0, 0.13),
    Voice::note(Square, 659.0, 0.13, 0.13),
    Voice::note(Square, 784.0, 0.26, 0.14),
];

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
    /// White noise; frequency is ignored
    Noise,
}

/// One oscillator with a linear pitch sweep and exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub start_freq: f32,
    pub end_freq: f32,
    pub gain: f32,
    /// Offset from the start of the cue (seconds)
    pub delay: f32,
    pub duration: f32,
    /// Envelope decay rate (1/s); 0 holds the gain flat
    pub decay: f32,
}

impl Voice {
    const fn sweep(waveform: Waveform, start_freq: f32, end_freq: f32, gain: f32, duration: f32, decay: f32) -> Self {
        Self {
            waveform,
            start_freq,
            end_freq,
            gain,
            delay: 0.0,
            duration,
            decay,
        }
    }

    const fn note(waveform: Waveform, freq: f32, delay: f32, duration: f32) -> Self {
        Self {
            waveform,
            start_freq: freq,
            end_freq: freq,
            gain: 0.25,
            delay,
            duration,
            decay: 2.0,
        }
    }

    fn end(&self) -> f32 {
        self.delay + self.duration
    }

    fn sample(&self, t: f32, noise: f32) -> f32 {
        let local = t - self.delay;
        if local < 0.0 || local >= self.duration {
            return 0.0;
        }
        let progress = local / self.duration;
        let freq = self.start_freq + (self.end_freq - self.start_freq) * progress;
        let phase = (freq * local).fract();
        let wave = match self.waveform {
            Waveform::Sine => (std::f32::consts::TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Noise => noise,
        };
        wave * self.gain * (-local * self.decay).exp()
    }
}

/// Length of a cue in seconds
pub fn cue_duration(cue: Cue) -> f32 {
    cue.voices().iter().map(Voice::end).fold(0.0, f32::max)
}

/// Render a cue to mono PCM in `-1.0..=1.0`.
///
/// Noise is seeded per cue so the same cue always renders identically.
pub fn synthesize(cue: Cue, sample_rate: u32) -> Vec<f32> {
    let len = (cue_duration(cue) * sample_rate as f32).round() as usize;
    let mut rng = Pcg32::seed_from_u64(cue as u64);
    (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let noise = rng.random_range(-1.0..1.0);
            let mix: f32 = cue.voices().iter().map(|v| v.sample(t, noise)).sum();
            mix.clamp(-1.0, 1.0)
        })
        .collect()
}

/// Fire-and-forget sound output used by the simulation
pub trait AudioSink {
    /// Play a one-shot cue
    fn play(&mut self, cue: Cue);

    /// Play the explosion matching a destroyed rock's radius
    fn play_explosion(&mut self, radius: f32) {
        self.play(Cue::explosion_for_radius(radius));
    }

    /// Start a looping cue; starting an already running loop is a no-op
    fn start_loop(&mut self, cue: Cue);

    /// Stop a looping cue; stopping a loop that is not running is a no-op
    fn stop_loop(&mut self, cue: Cue);
}

/// Sink that discards everything, for tests and when audio is unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: Cue) {}
    fn start_loop(&mut self, _cue: Cue) {}
    fn stop_loop(&mut self, _cue: Cue) {}
}

/// Instruction for an audio backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioEvent {
    Play { cue: Cue, volume: f32 },
    StartLoop { cue: Cue, volume: f32 },
    StopLoop { cue: Cue },
}

/// Audio manager for the game
///
/// Applies volume and mute settings and queues [`AudioEvent`]s for the
/// backend to drain once per frame.
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    enabled: bool,
    loops: Vec<Cue>,
    pending: VecDeque<AudioEvent>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            enabled: true,
            loops: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio.enabled = settings.sound_enabled;
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip sound on or off. Disabling silences running loops.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if !self.enabled {
            for cue in std::mem::take(&mut self.loops) {
                self.pending.push_back(AudioEvent::StopLoop { cue });
            }
        }
        log::info!("Sound {}", if self.enabled { "enabled" } else { "disabled" });
        self.enabled
    }

    fn effective_volume(&self) -> f32 {
        if self.muted || !self.enabled {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Loops currently running
    pub fn active_loops(&self) -> &[Cue] {
        &self.loops
    }

    /// Take every event queued since the last drain
    pub fn drain(&mut self) -> impl Iterator<Item = AudioEvent> + '_ {
        self.pending.drain(..)
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: Cue) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        self.pending.push_back(AudioEvent::Play { cue, volume });
    }

    fn start_loop(&mut self, cue: Cue) {
        debug_assert!(cue.is_loop(), "{cue:?} is not a looping cue");
        let volume = self.effective_volume();
        if volume <= 0.0 || self.loops.contains(&cue) {
            return;
        }
        self.loops.push(cue);
        self.pending.push_back(AudioEvent::StartLoop { cue, volume });
    }

    fn stop_loop(&mut self, cue: Cue) {
        if let Some(i) = self.loops.iter().position(|&c| c == cue) {
            self.loops.swap_remove(i);
            self.pending.push_back(AudioEvent::StopLoop { cue });
        }
    }
}
