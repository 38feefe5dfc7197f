//! Creature and item lookups against a PokeAPI-compatible HTTP service.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use game_core::{
    BaseStatLine, CreatureData, ElementalType, Equipment, ItemTemplate, Move, MoveAilment,
    MoveRef, SpeciesId,
};

use crate::api::providers::{CreatureProvider, ItemProvider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// HTTP client for species, move and item data.
///
/// Item stat modifiers are not part of the public API; they come from the
/// local item catalog, and the service only contributes the sprite. Keys
/// missing from the catalog are reported as absent.
pub struct PokeApiClient {
    base_url: String,
    items: Vec<ItemTemplate>,
    http_client: reqwest::Client,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            items: game_content::builtin::items(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Replaces the item catalog used to resolve item keys.
    pub fn with_items(mut self, items: Vec<ItemTemplate>) -> Self {
        self.items = items;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `url` and decodes the JSON body. A 404 yields `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, ProviderError> {
        tracing::debug!(target: "runtime::pokeapi", url, "GET");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ProviderError::Malformed(format!("{url}: {e}")))
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CreatureProvider for PokeApiClient {
    async fn creature(&self, species: SpeciesId) -> Result<CreatureData, ProviderError> {
        let url = format!("{}/pokemon/{}", self.base_url, species.0);
        let wire: PokemonWire = self
            .get_json(&url)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("species {}", species.0)))?;
        Ok(wire.into_creature())
    }

    async fn move_detail(&self, reference: &MoveRef) -> Result<Option<Move>, ProviderError> {
        let url = reference
            .url
            .clone()
            .unwrap_or_else(|| format!("{}/move/{}", self.base_url, reference.name));
        let wire: Option<MoveWire> = self.get_json(&url).await?;
        Ok(wire.and_then(MoveWire::into_move))
    }
}

#[async_trait]
impl ItemProvider for PokeApiClient {
    async fn item(&self, key: &str) -> Result<Option<Equipment>, ProviderError> {
        let Some(template) = self.items.iter().find(|item| item.key == key) else {
            return Ok(None);
        };
        let url = format!("{}/item/{}", self.base_url, key);
        let wire: Option<ItemWire> = self.get_json(&url).await?;

        let mut equipment = template.to_equipment();
        if let Some(sprite) = wire.and_then(|item| item.sprites.default) {
            equipment = equipment.with_sprite(sprite);
        }
        Ok(Some(equipment))
    }
}

#[derive(Deserialize)]
struct NamedResource {
    name: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct PokemonWire {
    id: u32,
    name: String,
    types: Vec<TypeSlot>,
    stats: Vec<StatSlot>,
    #[serde(default)]
    moves: Vec<MoveSlot>,
}

#[derive(Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Deserialize)]
struct StatSlot {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Deserialize)]
struct MoveSlot {
    #[serde(rename = "move")]
    reference: NamedResource,
}

impl PokemonWire {
    fn base_stat(&self, name: &str) -> u32 {
        self.stats
            .iter()
            .find(|slot| slot.stat.name == name)
            .map_or(0, |slot| slot.base_stat)
    }

    fn into_creature(self) -> CreatureData {
        let base = BaseStatLine {
            hp: self.base_stat("hp").max(1),
            attack: self.base_stat("attack"),
            defense: self.base_stat("defense"),
            speed: self.base_stat("speed"),
        };
        CreatureData {
            species: SpeciesId(self.id),
            name: capitalize(&self.name),
            types: self
                .types
                .iter()
                .map(|slot| element(&slot.kind.name))
                .collect(),
            base,
            moves: self
                .moves
                .into_iter()
                .map(|slot| MoveRef {
                    name: slot.reference.name,
                    url: slot.reference.url,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct MoveWire {
    name: String,
    power: Option<u32>,
    accuracy: Option<u32>,
    #[serde(default)]
    pp: Option<u32>,
    #[serde(rename = "type")]
    kind: NamedResource,
    #[serde(default)]
    meta: Option<MoveMeta>,
}

#[derive(Deserialize)]
struct MoveMeta {
    ailment: Option<NamedResource>,
}

impl MoveWire {
    /// Keeps moves that deal damage or carry an ailment the rules know.
    fn into_move(self) -> Option<Move> {
        let power = self.power.unwrap_or(0);
        let ailment = self
            .meta
            .and_then(|meta| meta.ailment)
            .and_then(|ailment| ailment.name.parse::<MoveAilment>().ok())
            .filter(|ailment| ailment.as_status().is_some());
        if power == 0 && ailment.is_none() {
            return None;
        }

        let mut parsed = Move::new(
            title_case(&self.name),
            element(&self.kind.name),
            power,
            self.accuracy.unwrap_or(100),
        )
        .with_pp(self.pp.unwrap_or(0));
        if let Some(ailment) = ailment {
            parsed = parsed.with_ailment(ailment);
        }
        Some(parsed)
    }
}

#[derive(Deserialize)]
struct ItemWire {
    #[serde(default)]
    sprites: ItemSprites,
}

#[derive(Deserialize, Default)]
struct ItemSprites {
    default: Option<String>,
}

/// Unknown type names fall back to normal.
fn element(name: &str) -> ElementalType {
    ElementalType::parse(name).unwrap_or(ElementalType::Normal)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(name: &str) -> String {
    name.split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "types": [
            {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
            {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
        ],
        "stats": [
            {"base_stat": 45, "effort": 0, "stat": {"name": "hp"}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "attack"}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "defense"}},
            {"base_stat": 65, "effort": 1, "stat": {"name": "special-attack"}},
            {"base_stat": 45, "effort": 0, "stat": {"name": "speed"}}
        ],
        "moves": [
            {"move": {"name": "vine-whip", "url": "https://pokeapi.co/api/v2/move/22/"}},
            {"move": {"name": "growl", "url": "https://pokeapi.co/api/v2/move/45/"}}
        ]
    }"#;

    #[test]
    fn parses_species() {
        let wire: PokemonWire = serde_json::from_str(BULBASAUR).unwrap();
        let creature = wire.into_creature();

        assert_eq!(creature.species, SpeciesId(1));
        assert_eq!(creature.name, "Bulbasaur");
        assert_eq!(
            creature.types,
            vec![ElementalType::Grass, ElementalType::Poison]
        );
        assert_eq!(
            creature.base,
            BaseStatLine {
                hp: 45,
                attack: 49,
                defense: 49,
                speed: 45
            }
        );
        assert_eq!(creature.moves.len(), 2);
        assert_eq!(creature.moves[0].name, "vine-whip");
        assert!(creature.moves[0].url.is_some());
    }

    fn parse_move(json: &str) -> Option<Move> {
        serde_json::from_str::<MoveWire>(json).unwrap().into_move()
    }

    #[test]
    fn paralysis_ailment_maps_to_paralyze() {
        let parsed = parse_move(
            r#"{"name": "thunder-shock", "power": 40, "accuracy": 100, "pp": 30,
                "type": {"name": "electric"},
                "meta": {"ailment": {"name": "paralysis"}, "ailment_chance": 10}}"#,
        )
        .unwrap();

        assert_eq!(parsed.name, "Thunder Shock");
        assert_eq!(parsed.elemental_type, ElementalType::Electric);
        assert_eq!(parsed.power, 40);
        assert_eq!(parsed.pp, 30);
        assert_eq!(parsed.ailment, Some(MoveAilment::Paralyze));
    }

    #[test]
    fn status_move_without_known_ailment_is_filtered() {
        let growl = parse_move(
            r#"{"name": "growl", "power": null, "accuracy": 100, "pp": 40,
                "type": {"name": "normal"}, "meta": {"ailment": {"name": "none"}}}"#,
        );
        assert!(growl.is_none());

        let confuse_ray = parse_move(
            r#"{"name": "confuse-ray", "power": null, "accuracy": 100,
                "type": {"name": "ghost"}, "meta": {"ailment": {"name": "confusion"}}}"#,
        );
        assert!(confuse_ray.is_none());
    }

    #[test]
    fn pure_status_move_with_ailment_is_kept() {
        let toxic = parse_move(
            r#"{"name": "poison-powder", "power": null, "accuracy": null,
                "type": {"name": "poison"}, "meta": {"ailment": {"name": "poison"}}}"#,
        )
        .unwrap();

        assert_eq!(toxic.power, 0);
        assert_eq!(toxic.accuracy, 100);
        assert_eq!(toxic.ailment, Some(MoveAilment::Poison));
    }

    #[test]
    fn unknown_type_falls_back_to_normal() {
        let parsed = parse_move(
            r#"{"name": "mystery", "power": 50, "accuracy": 90,
                "type": {"name": "shadow"}, "meta": null}"#,
        )
        .unwrap();
        assert_eq!(parsed.elemental_type, ElementalType::Normal);
        assert_eq!(parsed.ailment, None);
    }

    #[test]
    fn item_sprite_is_optional() {
        let wire: ItemWire = serde_json::from_str(r#"{"name": "leftovers"}"#).unwrap();
        assert!(wire.sprites.default.is_none());
    }

    #[tokio::test]
    async fn unknown_item_key_is_absent_without_a_request() {
        // Port 9 (discard) is never contacted: the key is rejected locally.
        let client = PokeApiClient::new("http://127.0.0.1:9/api/v2/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9/api/v2");
        assert_eq!(client.item("not-an-item").await.unwrap(), None);
    }
}
