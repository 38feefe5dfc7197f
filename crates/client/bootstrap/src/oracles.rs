//! Helpers for constructing the oracles consumed by the runtime.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use game_content::{ContentFactory, ItemLoader, TablesLoader};
use runtime::OracleManager;

use crate::config::ClientConfig;

pub trait OracleFactory: Send + Sync {
    fn build(&self) -> Result<OracleManager>;
}

/// Oracles backed by the content compiled into the binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinOracleFactory;

impl OracleFactory for BuiltinOracleFactory {
    fn build(&self) -> Result<OracleManager> {
        Ok(OracleManager::builtin())
    }
}

/// Oracle factory that loads game content from data files.
///
/// Content is resolved per file: an explicit path wins, then the file in the
/// content directory, then the builtin content.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tables.toml
/// └── items.ron
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContentOracleFactory {
    data_dir: Option<PathBuf>,
    tables_path: Option<PathBuf>,
    items_path: Option<PathBuf>,
}

impl ContentOracleFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
            ..Self::default()
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            data_dir: config.content_dir.clone(),
            tables_path: config.tables_path.clone(),
            items_path: config.items_path.clone(),
        }
    }

    pub fn tables_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tables_path = Some(path.into());
        self
    }

    pub fn items_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.items_path = Some(path.into());
        self
    }
}

impl OracleFactory for ContentOracleFactory {
    fn build(&self) -> Result<OracleManager> {
        let factory = self.data_dir.as_ref().map(ContentFactory::new);
        if let Some(dir) = &self.data_dir
            && !dir.is_dir()
        {
            anyhow::bail!("content data directory not found: {}", dir.display());
        }

        let tables = match (&self.tables_path, &factory) {
            (Some(path), _) => TablesLoader::load(path)
                .with_context(|| format!("failed to load tables from {}", path.display()))?,
            (None, Some(factory)) => factory.load_tables().with_context(|| {
                format!("failed to load tables.toml from {}", factory.data_dir().display())
            })?,
            (None, None) => game_content::tables(),
        };

        let mut catalog = match &factory {
            Some(factory) => factory.load_catalog().with_context(|| {
                format!("failed to load items.ron from {}", factory.data_dir().display())
            })?,
            None => game_content::catalog(),
        };
        if let Some(path) = &self.items_path {
            catalog.items = ItemLoader::load(path)
                .with_context(|| format!("failed to load items from {}", path.display()))?;
        }

        tracing::info!(
            target: "bootstrap",
            items = catalog.items.len(),
            upgrades = catalog.upgrades.len(),
            "Content loaded"
        );
        Ok(OracleManager::new(Arc::new(tables), Arc::new(catalog)))
    }
}
