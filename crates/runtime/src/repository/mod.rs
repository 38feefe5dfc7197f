//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that outlives a session. Here that is only the
//! high score; static game content is handled by oracles.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileHighScoreRepository, default_data_dir};
pub use memory::InMemoryHighScoreRepository;
pub use traits::HighScoreRepository;
