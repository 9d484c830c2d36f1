//! Game settings and preferences
//!
//! Stored as JSON next to the high score file. Unknown keys are ignored and
//! missing keys take their defaults, so older files keep loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::FileScoreStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Sound on at startup (toggled in game)
    pub sound_enabled: bool,

    // === Visual Effects ===
    /// Screen shake on explosions and deaths
    pub screen_shake: bool,
    /// Particle effects (explosions, exhaust)
    pub particles: bool,
    /// Background starfield
    pub starfield: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, static starfield)
    pub reduced_motion: bool,

    // === Storage ===
    /// Where the high score is kept
    pub high_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            sound_enabled: true,

            screen_shake: true,
            particles: true,
            starfield: true,

            reduced_motion: false,

            high_score_path: PathBuf::from(FileScoreStore::DEFAULT_FILE),
        }
    }
}

impl Settings {
    pub const DEFAULT_FILE: &'static str = "settings.json";

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective starfield twinkle (respects reduced_motion)
    pub fn effective_twinkle(&self) -> bool {
        self.starfield && !self.reduced_motion
    }

    /// Read settings, propagating I/O and parse failures
    pub fn try_load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let mut settings: Self = serde_json::from_str(&json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Load settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn try_save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Save settings (best effort)
    pub fn save(&self, path: &Path) {
        match self.try_save(path) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings to {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(&dir.path().join("settings.json")), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"muted": true, "master_volume": 3.0, "unknown": 1}"#).unwrap();

        let settings = Settings::load(&path);
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 1.0);
        assert!(settings.particles);
        assert_eq!(settings.high_score_path, PathBuf::from("highscore.json"));
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(Settings::try_load(&path).is_err());
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            reduced_motion: true,
            sfx_volume: 0.25,
            ..Default::default()
        };
        settings.save(&path);
        let loaded = Settings::load(&path);
        assert_eq!(loaded, settings);
        assert!(!loaded.effective_screen_shake());
        assert!(!loaded.effective_twinkle());
    }
}
