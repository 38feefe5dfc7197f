//! Value types shared by the session, the resolver and the progression engine.

mod combatant;
mod element;
mod equipment;
mod moves;
mod status;
mod upgrade;

pub use combatant::{Combatant, Side, SpeciesId, TypeSet};
pub use element::ElementalType;
pub use equipment::{Equipment, Loadout};
pub use moves::{Move, MoveSet};
pub use status::{MoveAilment, StatusCondition};
pub use upgrade::{Evolution, StatBoost, Upgrade};
