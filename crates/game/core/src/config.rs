/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Seed used when a session is created without an explicit one.
    pub default_seed: u64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of moves a combatant knows.
    pub const MAX_MOVES: usize = 4;
    /// Maximum number of held items per combatant.
    pub const MAX_EQUIPMENT: usize = 6;
    /// Maximum number of elemental types per combatant.
    pub const MAX_TYPES: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x5eed_cafe;

    pub fn new() -> Self {
        Self {
            default_seed: Self::DEFAULT_SEED,
        }
    }

    pub fn with_seed(default_seed: u64) -> Self {
        Self { default_seed }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
