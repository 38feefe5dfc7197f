//! File-based HighScoreRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::error::{RepositoryError, Result};
use super::traits::HighScoreRepository;

const FILE_NAME: &str = "high_score.txt";

/// Stores the high score as decimal text in a single file.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash never leaves a half-written score behind.
pub struct FileHighScoreRepository {
    path: PathBuf,
}

impl FileHighScoreRepository {
    /// Repository backed by `high_score.txt` inside `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            path: base_dir.join(FILE_NAME),
        })
    }

    /// Repository under the platform data directory.
    pub fn in_default_location() -> Result<Self> {
        let dirs = default_data_dir().ok_or(RepositoryError::NoDataDir)?;
        Self::new(dirs)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Platform data directory for this application, if one can be determined.
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "roguelike-battler").map(|dirs| dirs.data_dir().to_path_buf())
}

impl HighScoreRepository for FileHighScoreRepository {
    fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let content = fs::read_to_string(&self.path).map_err(RepositoryError::Io)?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        let high_score = trimmed
            .parse::<u32>()
            .map_err(|_| RepositoryError::CorruptedData {
                path: self.path.clone(),
                content: trimmed.to_string(),
            })?;

        tracing::debug!("Loaded high score {} from {}", high_score, self.path.display());
        Ok(high_score)
    }

    fn save(&self, high_score: u32) -> Result<()> {
        let temp_path = self.path.with_extension("txt.tmp");

        fs::write(&temp_path, high_score.to_string()).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved high score {} to {}", high_score, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileHighScoreRepository::new(dir.path()).unwrap();
        assert_eq!(repo.load().unwrap(), 0);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileHighScoreRepository::new(dir.path().join("nested")).unwrap();

        repo.save(12).unwrap();
        repo.save(17).unwrap();

        assert_eq!(repo.load().unwrap(), 17);
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "17");
        assert!(!repo.path().with_extension("txt.tmp").exists());
    }

    #[test]
    fn garbage_is_reported_as_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileHighScoreRepository::new(dir.path()).unwrap();
        fs::write(repo.path(), "floor eleven").unwrap();

        assert!(matches!(
            repo.load(),
            Err(RepositoryError::CorruptedData { .. })
        ));
    }
}
