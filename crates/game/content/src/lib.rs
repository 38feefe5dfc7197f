//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML
//! data files:
//! - Held-item catalog (builtin, or RON)
//! - Stat upgrade pool, evolution table, tier pools and starters (builtin)
//! - Balance tables (builtin, or TOML)
//!
//! Content is consumed by runtime oracles and never appears in session state.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::{catalog, tables};

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, ItemCatalog, ItemLoader, LoadResult, TablesLoader};
