/// Oracle providing balance tables.
///
/// Tables hold every tunable number the rules use: roll thresholds, damage
/// constants, growth rates, and spawn scaling. They do NOT define content
/// (species, items, upgrades); see [`super::CatalogOracle`] for that.
pub trait TablesOracle: Send + Sync {
    fn combat(&self) -> CombatParams;
    fn progression(&self) -> ProgressionParams;
    fn spawn(&self) -> SpawnParams;
}

/// Turn resolution parameters. Percentages are whole numbers out of 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatParams {
    /// Chance a frozen combatant thaws at the start of its turn.
    pub thaw_chance: u32,
    /// Chance a paralyzed combatant loses its turn.
    pub paralysis_skip_chance: u32,
    /// Chance a damaging move inflicts its ailment.
    pub status_chance: u32,
    /// Critical damage multiplier as a percentage (150 = 1.5x).
    pub crit_multiplier_percent: u32,
    /// Residual burn/poison damage as a percentage of max HP.
    pub residual_percent: u32,
    /// Divisor applied to `attack * power`.
    pub damage_divisor: u32,
    /// Base of the `base / (base + defense)` mitigation term.
    pub mitigation_base: u32,
    /// Damage never drops below this once a move connects.
    pub minimum_damage: u32,
}

impl CombatParams {
    pub const fn new() -> Self {
        Self {
            thaw_chance: 20,
            paralysis_skip_chance: 25,
            status_chance: 30,
            crit_multiplier_percent: 150,
            residual_percent: 10,
            damage_divisor: 50,
            mitigation_base: 100,
            minimum_damage: 1,
        }
    }
}

impl Default for CombatParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Experience, leveling and loot parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionParams {
    pub xp_per_enemy_level: u32,
    pub starting_max_xp: u32,
    /// Growth applied to max HP, attack and speed on level-up (110 = 1.1x).
    pub level_growth_percent: u32,
    /// Growth applied to the XP threshold on level-up (120 = 1.2x).
    pub xp_growth_percent: u32,
    /// Stat upgrades sampled per victory.
    pub stat_offers: u32,
    /// Equipment is offered on floors divisible by this value.
    pub equipment_drop_interval: u32,
}

impl ProgressionParams {
    pub const fn new() -> Self {
        Self {
            xp_per_enemy_level: 50,
            starting_max_xp: 100,
            level_growth_percent: 110,
            xp_growth_percent: 120,
            stat_offers: 2,
            equipment_drop_interval: 1,
        }
    }
}

impl Default for ProgressionParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Enemy generation and scaling parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnParams {
    pub species_min: u32,
    pub species_max: u32,
    /// Per-floor stat growth as a percentage (10 = +10% per floor).
    pub floor_scaling_percent: u32,
    pub boss_interval: u32,
    pub mini_boss_interval: u32,
    pub boss_multiplier_percent: u32,
    pub mini_boss_multiplier_percent: u32,
    /// Crit chance assigned to freshly built combatants.
    pub base_crit_chance: u32,
    /// Dodge assigned to freshly built combatants.
    pub base_dodge: u32,
}

impl SpawnParams {
    pub const fn new() -> Self {
        Self {
            species_min: 1,
            species_max: 151,
            floor_scaling_percent: 10,
            boss_interval: 10,
            mini_boss_interval: 5,
            boss_multiplier_percent: 150,
            mini_boss_multiplier_percent: 120,
            base_crit_chance: 5,
            base_dodge: 5,
        }
    }
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self::new()
    }
}
