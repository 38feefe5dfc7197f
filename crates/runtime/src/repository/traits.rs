//! Repository contracts for saving and loading mutable runtime state.

use super::error::Result;

/// Storage for the best floor ever reached.
///
/// This is the only data that outlives a process: a single non-negative
/// integer.
pub trait HighScoreRepository: Send + Sync {
    /// The stored high score, or 0 when nothing was saved yet.
    fn load(&self) -> Result<u32>;

    fn save(&self, high_score: u32) -> Result<()>;
}
