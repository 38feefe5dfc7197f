//! Deterministic battle rules shared by the runtime and offline tools.
//!
//! `game-core` defines the canonical rules (type chart, stat model, turn
//! resolution, progression) and the battle session state machine. It performs
//! no I/O and draws all randomness through [`env::RngOracle`]. All session
//! mutation flows through [`engine::BattleEngine`], and supporting crates
//! depend on the types re-exported here.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod stats;

#[cfg(test)]
mod testing;

pub use combat::{BattleEvent, TurnReport, effectiveness, resolve_turn};
pub use config::GameConfig;
pub use engine::{BattleEngine, BattleStatus, EngineError, TurnOutcome};
pub use env::{
    CatalogOracle, CatalogSnapshot, CombatParams, Dice, Env, GameEnv, ItemTemplate, OracleError,
    PcgRng, ProgressionParams, RngOracle, RollKind, SequenceRng, SpawnParams, TablesOracle,
    TablesSnapshot,
};
pub use error::{ErrorSeverity, GameError};
pub use progression::{ExperienceGain, LootDraft, ProgressionError};
pub use spawn::{BaseStatLine, CreatureData, MoveRef, Tier};
pub use state::{
    BattleSession, Combatant, ElementalType, Equipment, Evolution, Move, MoveAilment,
    SessionPhase, Side, SpawnTarget, SpeciesId, StatBoost, StatusCondition, Upgrade,
};
pub use stats::{BaseStats, StatKind, StatModifiers};
