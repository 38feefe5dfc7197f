//! Progression engine: experience, loot drafting and upgrade application.

mod error;
mod experience;
mod loot;
mod upgrade;

pub use error::ProgressionError;
pub use experience::{ExperienceGain, award_experience, level_up};
pub use loot::{LootDraft, draft_loot, evolution_offer, finalize_loot};
pub use upgrade::apply_upgrade;
