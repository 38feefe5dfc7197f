//! Session state and the value types it is built from.
//!
//! The runtime clones or queries this state but mutates it exclusively
//! through [`crate::engine::BattleEngine`].
mod session;
pub mod types;

pub use session::{BattleSession, SessionPhase, SpawnTarget};
pub use types::{
    Combatant, ElementalType, Equipment, Evolution, Loadout, Move, MoveAilment, MoveSet, Side,
    SpeciesId, StatBoost, StatusCondition, TypeSet, Upgrade,
};
