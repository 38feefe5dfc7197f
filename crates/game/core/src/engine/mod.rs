//! Battle session state machine.
//!
//! [`BattleEngine`] is the authoritative reducer for [`BattleSession`]. Every
//! operation checks the session phase first and returns
//! [`EngineError::InvalidPhase`] when called out of order, so the runtime can
//! forward player input without pre-validating it.
//!
//! ```text
//! NotStarted ─start─▶ SelectingCombatant ─begin_battle─▶ InBattle ◀──────────┐
//!                          │                              │    │              │
//!                      fail_spawn                   victory  defeat           │
//!                          ▼                              ▼    ▼              │
//!                     SpawnFailed ─abort─▶ NotStarted  Victory RunEnded       │
//!                                                         │    └acknowledge─▶ NotStarted
//!                                                    offer_loot               │
//!                                                         ▼                   │
//!                                  LootSelection ─select_upgrade─▶ AwaitingSpawn ─spawn_enemy
//! ```

mod errors;
mod transition;
mod turns;

pub use errors::EngineError;

use crate::combat::TurnReport;
use crate::env::{Dice, GameEnv};
use crate::progression::ExperienceGain;
use crate::state::{BattleSession, Side};

/// How a battle stands after a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleStatus {
    Ongoing,
    Victory,
    Defeat,
}

/// Complete outcome of one resolved turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    pub side: Side,
    pub move_name: String,
    pub report: TurnReport,
    pub status: BattleStatus,
    /// Present when the turn won the battle.
    pub experience: Option<ExperienceGain>,
}

/// Engine driving one [`BattleSession`] through its phases.
pub struct BattleEngine<'a> {
    session: &'a mut BattleSession,
}

impl<'a> BattleEngine<'a> {
    pub fn new(session: &'a mut BattleSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &BattleSession {
        self.session
    }

    fn invalid(&self, operation: &'static str) -> EngineError {
        EngineError::invalid_phase(operation, self.session.phase.as_str())
    }

    /// Dice for draws made by `side` at the current nonce.
    fn dice<'e>(&self, env: &GameEnv<'e>, side: Side) -> Result<Dice<'e>, EngineError> {
        Ok(Dice::new(
            env.rng()?,
            self.session.seed,
            self.session.nonce,
            side.actor_id(),
        ))
    }
}
