//! High score storage
//!
//! Features:
//! - Single-value JSON record (`{"high_score": N}`)
//! - File store with atomic replace (tmp → rename)
//! - In-memory store for tests and headless runs
//!
//! Stores never fail loudly: a missing file loads as 0, and any other
//! read or write failure is logged and ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// On-disk high score record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// Best-effort persistence for the single high score
pub trait ScoreStore {
    /// Stored high score, 0 when nothing usable is stored
    fn load(&mut self) -> u64;

    /// Replace the stored high score
    fn save(&mut self, score: u64);
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub const DEFAULT_FILE: &'static str = "highscore.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record, propagating I/O and parse failures
    pub fn try_load(&self) -> Result<HighScoreRecord> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write the record via a sibling temp file so a crash never leaves a
    /// truncated file behind
    pub fn try_save(&self, record: HighScoreRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(&record)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&mut self) -> u64 {
        match self.try_load() {
            Ok(record) => {
                log::info!("Loaded high score {} from {}", record.high_score, self.path.display());
                record.high_score
            }
            Err(e) if e.is_not_found() => {
                log::info!("No high score file at {}, starting fresh", self.path.display());
                0
            }
            Err(e) => {
                log::warn!("Ignoring high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        match self.try_save(HighScoreRecord { high_score: score }) {
            Ok(()) => log::info!("High score {} saved", score),
            Err(e) => log::warn!("Failed to save high score to {}: {}", self.path.display(), e),
        }
    }
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: Option<u64>,
    /// Every value passed to `save`, oldest first
    pub writes: Vec<u64>,
}

impl MemoryScoreStore {
    pub fn with_score(score: u64) -> Self {
        Self {
            value: Some(score),
            writes: Vec::new(),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u64) {
        self.value = Some(score);
        self.writes.push(score);
    }
}
