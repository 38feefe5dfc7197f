//! In-memory HighScoreRepository implementation for tests and local runs.

use std::sync::RwLock;

use super::error::{RepositoryError, Result};
use super::traits::HighScoreRepository;

#[derive(Default)]
pub struct InMemoryHighScoreRepository {
    high_score: RwLock<u32>,
}

impl InMemoryHighScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a previously reached high score.
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score: RwLock::new(high_score),
        }
    }
}

impl HighScoreRepository for InMemoryHighScoreRepository {
    fn load(&self) -> Result<u32> {
        let high_score = self
            .high_score
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(*high_score)
    }

    fn save(&self, high_score: u32) -> Result<()> {
        let mut stored = self
            .high_score
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = high_score;
        Ok(())
    }
}
