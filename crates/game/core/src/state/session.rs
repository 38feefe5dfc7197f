//! Battle session: the single mutable object a run revolves around.

use super::{Combatant, Side, SpeciesId, Upgrade};
use crate::progression::LootDraft;

/// What to fetch again after a failed creature lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnTarget {
    /// The starter and the first enemy of a run.
    Opening { starter: SpeciesId, enemy: SpeciesId },
    /// The enemy guarding `floor`.
    Floor { floor: u32, species: SpeciesId },
    /// The species for `floor` could not be drawn; retrying draws again.
    FloorDraw { floor: u32 },
}

/// Lifecycle of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionPhase {
    #[default]
    NotStarted,
    SelectingCombatant,
    InBattle,
    /// Enemy fainted; experience is awarded and loot is drafted.
    Victory,
    LootSelection,
    /// Upgrade applied and floor advanced; waiting for the next enemy.
    AwaitingSpawn,
    SpawnFailed { reason: String, target: SpawnTarget },
    RunEnded,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Complete state of one session.
///
/// The high score, seed and nonce survive across runs; everything else is
/// reset when a new run starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    pub phase: SessionPhase,
    pub player: Option<Combatant>,
    pub enemy: Option<Combatant>,
    pub floor: u32,
    /// Side allowed to act next while in battle.
    pub turn: Side,
    pub pending_upgrades: Vec<Upgrade>,
    pub loot_draft: Option<LootDraft>,
    pub log: Vec<String>,
    pub high_score: u32,
    /// Set when the last run beat the previous high score.
    pub new_record: bool,
    /// Fixed when the session is created.
    pub seed: u64,
    /// Advances on every step that draws randomness.
    pub nonce: u64,
}

impl BattleSession {
    pub fn new(seed: u64, high_score: u32) -> Self {
        Self {
            seed,
            high_score,
            ..Self::default()
        }
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase == SessionPhase::InBattle && self.turn == Side::Player
    }

    pub fn combatant(&self, side: Side) -> Option<&Combatant> {
        match side {
            Side::Player => self.player.as_ref(),
            Side::Enemy => self.enemy.as_ref(),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    /// Clears per-run state, keeping the high score, seed and nonce.
    pub fn reset_run(&mut self) {
        *self = Self {
            high_score: self.high_score,
            seed: self.seed,
            nonce: self.nonce,
            ..Self::default()
        };
    }
}
