//! Runtime wrappers around static game content oracles.
//!
//! [`OracleManager`] bundles the balance tables, the content catalog and the
//! random source so the runtime can build [`game_core::GameEnv`] views on
//! demand. The data is immutable at runtime; dynamic state lives in the
//! session or in repositories.

use std::fmt;
use std::sync::Arc;

use game_core::{CatalogSnapshot, GameEnv, PcgRng, RngOracle, TablesSnapshot};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) tables: Arc<TablesSnapshot>,
    pub(crate) catalog: Arc<CatalogSnapshot>,
    pub(crate) rng: Arc<dyn RngOracle>,
}

impl OracleManager {
    /// Creates a new oracle manager drawing from [`PcgRng`].
    pub fn new(tables: Arc<TablesSnapshot>, catalog: Arc<CatalogSnapshot>) -> Self {
        Self {
            tables,
            catalog,
            rng: Arc::new(PcgRng),
        }
    }

    /// Oracles backed by the builtin content.
    pub fn builtin() -> Self {
        Self::new(
            Arc::new(game_content::tables()),
            Arc::new(game_content::catalog()),
        )
    }

    /// Replaces the random source, e.g. with a scripted sequence in tests.
    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Arc::new(rng);
        self
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::with_all(
            self.tables.as_ref(),
            self.catalog.as_ref(),
            self.rng.as_ref(),
        )
    }

    pub fn tables(&self) -> &TablesSnapshot {
        &self.tables
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn rng(&self) -> &dyn RngOracle {
        self.rng.as_ref()
    }
}

impl fmt::Debug for OracleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleManager")
            .field("tables", &self.tables)
            .field("boss_pool", &self.catalog.boss_pool)
            .field("mini_boss_pool", &self.catalog.mini_boss_pool)
            .finish_non_exhaustive()
    }
}
