//! Combatant factory: building, scaling and tiering enemies.

mod creature;
mod factory;
mod tier;

pub use creature::{BaseStatLine, CreatureData, MoveRef};
pub use factory::{build_combatant, move_candidates, scale_for_floor};
pub use tier::{Tier, any_species, apply_tier, enemy_species};
