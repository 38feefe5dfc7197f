//! Content loaders for reading game data from files.
//!
//! Items are read from RON and balance tables from TOML. Each loader also
//! accepts an in-memory string so callers can embed data.

pub mod factory;
pub mod item;
pub mod tables;

pub use factory::ContentFactory;
pub use item::{ItemCatalog, ItemLoader};
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
