//! Balance tables loader.

use std::path::Path;

use game_core::TablesSnapshot;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance tables from TOML files.
///
/// Every section and key is optional; omitted values keep their canonical
/// defaults.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<TablesSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TablesSnapshot> {
        let tables: TablesSnapshot = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables TOML: {}", e))?;

        if tables.combat.damage_divisor == 0 {
            anyhow::bail!("combat.damage_divisor must be positive");
        }
        if tables.spawn.species_min > tables.spawn.species_max {
            anyhow::bail!(
                "spawn.species_min ({}) exceeds spawn.species_max ({})",
                tables.spawn.species_min,
                tables.spawn.species_max
            );
        }

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(TablesLoader::parse("").unwrap(), TablesSnapshot::default());
    }

    #[test]
    fn overrides_individual_keys() {
        let tables = TablesLoader::parse(
            r#"
            [combat]
            thaw_chance = 50

            [spawn]
            boss_interval = 7
            "#,
        )
        .unwrap();
        assert_eq!(tables.combat.thaw_chance, 50);
        assert_eq!(tables.combat.paralysis_skip_chance, 25);
        assert_eq!(tables.spawn.boss_interval, 7);
        assert_eq!(tables.progression.xp_per_enemy_level, 50);
    }

    #[test]
    fn rejects_inverted_species_range() {
        let error = TablesLoader::parse("[spawn]\nspecies_min = 200\n").unwrap_err();
        assert!(error.to_string().contains("species_min"));
    }
}
