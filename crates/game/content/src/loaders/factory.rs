//! Content factory for building oracle snapshots from a data directory.

use std::path::{Path, PathBuf};

use game_core::{CatalogSnapshot, ItemTemplate, TablesSnapshot};

use crate::builtin;
use crate::loaders::{ItemLoader, LoadResult, TablesLoader};

/// Loads content from a data directory, falling back to the builtin
/// content for files that are absent.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tables.toml
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance tables from `tables.toml`, or the canonical tables.
    pub fn load_tables(&self) -> LoadResult<TablesSnapshot> {
        let path = self.data_dir.join("tables.toml");
        if !path.exists() {
            return Ok(builtin::tables());
        }
        TablesLoader::load(&path)
    }

    /// Load the item catalog from `items.ron`, or the builtin items.
    pub fn load_items(&self) -> LoadResult<Vec<ItemTemplate>> {
        let path = self.data_dir.join("items.ron");
        if !path.exists() {
            return Ok(builtin::items());
        }
        ItemLoader::load(&path)
    }

    /// The builtin catalog with its items replaced by [`Self::load_items`].
    pub fn load_catalog(&self) -> LoadResult<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            items: self.load_items()?,
            ..builtin::catalog()
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
