//! Asynchronous collaborator contracts consumed by the session worker.
//!
//! Runtime users plug in implementations so a session can run against the
//! public creature API, a local leaderboard service, or scripted fixtures.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use game_core::{CreatureData, Equipment, Move, MoveRef, SpeciesId};

/// Failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("{0} was not found")]
    NotFound(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("request was rejected as unauthorized (status {0})")]
    Unauthorized(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Looks up species data and move details.
#[async_trait]
pub trait CreatureProvider: Send + Sync {
    async fn creature(&self, species: SpeciesId) -> Result<CreatureData, ProviderError>;

    /// Details for one learnable move.
    ///
    /// Returns `Ok(None)` for moves a combatant should not know: those with
    /// neither power nor a recognized ailment.
    async fn move_detail(&self, reference: &MoveRef) -> Result<Option<Move>, ProviderError>;
}

/// Looks up held items by catalog key.
#[async_trait]
pub trait ItemProvider: Send + Sync {
    /// Returns `Ok(None)` when the key is unknown.
    async fn item(&self, key: &str) -> Result<Option<Equipment>, ProviderError>;
}

/// A finished run, as submitted to the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub player_name: String,
    /// Display name of the player's combatant when the run ended.
    pub species: String,
    pub species_id: SpeciesId,
    pub floor: u32,
}

/// One row of the shared leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub pokemon: String,
    #[serde(rename = "pokemonId")]
    pub pokemon_id: u32,
    pub floor: u32,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Destination for completed runs.
#[async_trait]
pub trait RunSink: Send + Sync {
    async fn submit(&self, record: &RunRecord) -> Result<(), ProviderError>;

    /// Best runs first, at most `limit` entries.
    async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ProviderError>;
}
