//! Traits describing read-only game data.
//!
//! Oracles expose balance tables, static content, and randomness. The
//! [`Env`] aggregate bundles them so the engine can reach everything it
//! needs without coupling to concrete implementations.
mod catalog;
mod error;
mod rng;
mod snapshot;
mod tables;

pub use catalog::{CatalogOracle, ItemTemplate, tackle};
pub use error::OracleError;
pub use rng::{Dice, PcgRng, RngOracle, RollKind, SequenceRng, compute_seed};
pub use snapshot::{CatalogSnapshot, TablesSnapshot};
pub use tables::{CombatParams, ProgressionParams, SpawnParams, TablesOracle};

/// Aggregates read-only oracles required by the engine.
pub struct Env<'a, T, C, R>
where
    T: TablesOracle + ?Sized,
    C: CatalogOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    tables: Option<&'a T>,
    catalog: Option<&'a C>,
    rng: Option<&'a R>,
}

impl<T, C, R> Clone for Env<'_, T, C, R>
where
    T: TablesOracle + ?Sized,
    C: CatalogOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C, R> Copy for Env<'_, T, C, R>
where
    T: TablesOracle + ?Sized,
    C: CatalogOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn TablesOracle + 'a, dyn CatalogOracle + 'a, dyn RngOracle + 'a>;

impl<'a, T, C, R> Env<'a, T, C, R>
where
    T: TablesOracle + ?Sized,
    C: CatalogOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(tables: Option<&'a T>, catalog: Option<&'a C>, rng: Option<&'a R>) -> Self {
        Self {
            tables,
            catalog,
            rng,
        }
    }

    pub fn with_all(tables: &'a T, catalog: &'a C, rng: &'a R) -> Self {
        Self::new(Some(tables), Some(catalog), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            tables: None,
            catalog: None,
            rng: None,
        }
    }

    /// Returns the TablesOracle, or an error if not available.
    pub fn tables(&self) -> Result<&'a T, OracleError> {
        self.tables.ok_or(OracleError::TablesNotAvailable)
    }

    /// Returns the CatalogOracle, or an error if not available.
    pub fn catalog(&self) -> Result<&'a C, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, T, C, R> Env<'a, T, C, R>
where
    T: TablesOracle + 'a,
    C: CatalogOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let tables: Option<&'a dyn TablesOracle> = self.tables.map(|tables| tables as _);
        let catalog: Option<&'a dyn CatalogOracle> = self.catalog.map(|catalog| catalog as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(tables, catalog, rng)
    }
}
