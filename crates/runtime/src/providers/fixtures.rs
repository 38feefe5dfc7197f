//! In-process collaborators for tests and offline play.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use game_core::{CreatureData, Equipment, Move, MoveRef, SpeciesId};

use crate::api::providers::{
    CreatureProvider, ItemProvider, LeaderboardEntry, ProviderError, RunRecord, RunSink,
};

fn poisoned() -> ProviderError {
    ProviderError::Transport("fixture lock poisoned".into())
}

/// Serves creatures and moves from memory.
///
/// Species can be taken offline to simulate lookup failures. Species that
/// were never registered are served from the fallback template, if set,
/// with the requested id.
#[derive(Default)]
pub struct StaticCreatureProvider {
    creatures: HashMap<SpeciesId, CreatureData>,
    moves: HashMap<String, Move>,
    fallback: Option<CreatureData>,
    offline: Mutex<HashSet<SpeciesId>>,
}

impl StaticCreatureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_creature(mut self, creature: CreatureData) -> Self {
        self.creatures.insert(creature.species, creature);
        self
    }

    /// Registers a move under its reference name.
    pub fn with_move(mut self, reference: impl Into<String>, detail: Move) -> Self {
        self.moves.insert(reference.into(), detail);
        self
    }

    pub fn with_fallback(mut self, template: CreatureData) -> Self {
        self.fallback = Some(template);
        self
    }

    /// Makes lookups of `species` fail (`false`) or succeed again (`true`).
    pub fn set_available(&self, species: SpeciesId, available: bool) {
        if let Ok(mut offline) = self.offline.lock() {
            if available {
                offline.remove(&species);
            } else {
                offline.insert(species);
            }
        }
    }
}

#[async_trait]
impl CreatureProvider for StaticCreatureProvider {
    async fn creature(&self, species: SpeciesId) -> Result<CreatureData, ProviderError> {
        if self.offline.lock().map_err(|_| poisoned())?.contains(&species) {
            return Err(ProviderError::Transport(format!(
                "species {} is offline",
                species.0
            )));
        }
        if let Some(creature) = self.creatures.get(&species) {
            return Ok(creature.clone());
        }
        self.fallback
            .as_ref()
            .map(|template| CreatureData {
                species,
                ..template.clone()
            })
            .ok_or_else(|| ProviderError::NotFound(format!("species {}", species.0)))
    }

    async fn move_detail(&self, reference: &MoveRef) -> Result<Option<Move>, ProviderError> {
        Ok(self.moves.get(&reference.name).cloned())
    }
}

/// Serves held items from memory, or fails every lookup when offline.
#[derive(Default)]
pub struct StaticItemProvider {
    items: HashMap<String, Equipment>,
    offline: bool,
}

impl StaticItemProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: impl Into<String>, item: Equipment) -> Self {
        self.items.insert(key.into(), item);
        self
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ItemProvider for StaticItemProvider {
    async fn item(&self, key: &str) -> Result<Option<Equipment>, ProviderError> {
        if self.offline {
            return Err(ProviderError::Transport(format!("item {key} is offline")));
        }
        Ok(self.items.get(key).cloned())
    }
}

/// Keeps submitted runs in memory and serves them as the leaderboard.
#[derive(Default)]
pub struct RecordingRunSink {
    records: Mutex<Vec<RunRecord>>,
    rejecting: bool,
}

impl RecordingRunSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that refuses every submission as unauthorized.
    pub fn rejecting() -> Self {
        Self {
            rejecting: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<RunRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RunSink for RecordingRunSink {
    async fn submit(&self, record: &RunRecord) -> Result<(), ProviderError> {
        if self.rejecting {
            return Err(ProviderError::Unauthorized(401));
        }
        self.records
            .lock()
            .map_err(|_| poisoned())?
            .push(record.clone());
        Ok(())
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ProviderError> {
        let mut records = self.records.lock().map_err(|_| poisoned())?.clone();
        records.sort_by(|a, b| b.floor.cmp(&a.floor));
        Ok(records
            .into_iter()
            .take(limit)
            .map(|record| LeaderboardEntry {
                name: record.player_name,
                pokemon: record.species,
                pokemon_id: record.species_id.0,
                floor: record.floor,
                date: None,
            })
            .collect())
    }
}

/// Accepts and forgets every run.
pub struct NullRunSink;

#[async_trait]
impl RunSink for NullRunSink {
    async fn submit(&self, _record: &RunRecord) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn top_scores(&self, _limit: usize) -> Result<Vec<LeaderboardEntry>, ProviderError> {
        Ok(Vec::new())
    }
}
