//! Event payloads published by the session worker.

use serde::{Deserialize, Serialize};

use game_core::{Combatant, SessionPhase, Side, SpawnTarget, Tier, TurnOutcome, Upgrade};

use super::bus::Topic;
use crate::api::providers::RunRecord;

/// Pacing step of an animated turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStage {
    /// The enemy is choosing its move.
    Thinking,
    /// The attacker is lunging; the move resolves when this step ends.
    Lunging,
    /// The hit has landed; the result settles when this step ends.
    Impact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The session moved to a new phase.
    PhaseChanged { phase: SessionPhase },

    /// Lines appended to the session log.
    Narration { lines: Vec<String> },

    /// A combatant entered the field on `floor`.
    EnemySpawned {
        floor: u32,
        tier: Tier,
        enemy: Box<Combatant>,
    },

    /// A creature lookup failed; the session waits for retry or abort.
    SpawnFailed { reason: String, target: SpawnTarget },

    TurnPacing { side: Side, stage: TurnStage },

    TurnResolved(Box<TurnOutcome>),

    LootOffered { offers: Vec<Upgrade> },

    UpgradeApplied { upgrade: Upgrade, floor: u32 },

    RunEnded {
        floor: u32,
        high_score: u32,
        new_record: bool,
    },

    HighScoreSaved { high_score: u32 },

    HighScoreSaveFailed { high_score: u32, error: String },

    RunSubmitted { record: RunRecord },

    SubmissionFailed { record: RunRecord, error: String },
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::TurnPacing { .. } | GameEvent::TurnResolved(_) => Topic::Battle,
            GameEvent::HighScoreSaved { .. }
            | GameEvent::HighScoreSaveFailed { .. }
            | GameEvent::RunSubmitted { .. }
            | GameEvent::SubmissionFailed { .. } => Topic::Persistence,
            _ => Topic::Session,
        }
    }
}
