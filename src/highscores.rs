//! High score tracking
//!
//! A single best score, loaded once at startup and written back through a
//! [`ScoreStore`] only when a finished game beats it.

use crate::persistence::ScoreStore;

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Read the stored best score
    pub fn load(store: &mut dyn ScoreStore) -> Self {
        Self::new(store.load())
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Whether `score` would replace the current best
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished game's score, persisting it if it is a new best.
    /// Returns true when the best score changed.
    pub fn submit(&mut self, score: u64, store: &mut dyn ScoreStore) -> bool {
        if !self.beaten_by(score) {
            return false;
        }
        self.best = score;
        store.save(score);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryScoreStore;

    #[test]
    fn test_load_from_store() {
        let mut store = MemoryScoreStore::with_score(800);
        assert_eq!(HighScore::load(&mut store).best(), 800);
        assert_eq!(HighScore::load(&mut MemoryScoreStore::default()).best(), 0);
    }

    #[test]
    fn test_submit_only_saves_strict_improvement() {
        let mut store = MemoryScoreStore::default();
        let mut hs = HighScore::new(500);

        assert!(!hs.submit(500, &mut store));
        assert!(!hs.submit(100, &mut store));
        assert!(store.writes.is_empty());

        assert!(hs.submit(501, &mut store));
        assert_eq!(hs.best(), 501);
        assert_eq!(store.writes, vec![501]);
    }

    #[test]
    fn test_zero_score_never_saved() {
        let mut store = MemoryScoreStore::default();
        let mut hs = HighScore::default();
        assert!(!hs.submit(0, &mut store));
        assert!(store.writes.is_empty());
    }
}
