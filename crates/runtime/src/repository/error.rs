//! Error types raised by repository implementations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupted high score in {path}: {content:?}")]
    CorruptedData { path: PathBuf, content: String },

    #[error("no data directory could be determined for this platform")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
