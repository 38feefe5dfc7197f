//! Item catalog loader.

use std::path::Path;

use game_core::ItemTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemTemplate>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<ItemTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an item catalog from RON text.
    ///
    /// Keys must be unique; the first empty or duplicate key is reported.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemTemplate>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        for (index, item) in catalog.items.iter().enumerate() {
            if item.key.is_empty() {
                anyhow::bail!("Item #{index} has an empty key");
            }
            if catalog.items[..index].iter().any(|other| other.key == item.key) {
                anyhow::bail!("Duplicate item key '{}'", item.key);
            }
        }

        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: &str = r#"(
        items: [
            (
                key: "muscle-band",
                name: "Muscle Band",
                description: "Boosts attack.",
                modifiers: (attack: 15),
            ),
            (
                key: "life-orb",
                name: "Life Orb",
                description: "Power at a price.",
                modifiers: (attack: 30, maxHp: -10),
            ),
        ],
    )"#;

    #[test]
    fn parses_partial_modifiers() {
        let items = ItemLoader::parse(ITEMS).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].modifiers.attack, 15);
        assert_eq!(items[0].modifiers.defense, 0);
        assert_eq!(items[1].modifiers.max_hp, -10);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let duplicated = ITEMS.replace("life-orb", "muscle-band");
        let error = ItemLoader::parse(&duplicated).unwrap_err();
        assert!(error.to_string().contains("muscle-band"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.ron");
        std::fs::write(&path, ITEMS).unwrap();
        assert_eq!(ItemLoader::load(&path).unwrap().len(), 2);
        assert!(ItemLoader::load(&dir.path().join("missing.ron")).is_err());
    }
}
