//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use runtime::RuntimeConfig;
use runtime::providers::{leaderboard, pokeapi};

/// Configuration required to bootstrap a client runtime.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub pokeapi_url: String,
    pub leaderboard_url: String,
    pub leaderboard_token: Option<String>,
    pub player_name: String,
    pub save_data_dir: Option<PathBuf>,
    pub seed: Option<u64>,
    /// Skip the turn pacing delays.
    pub instant_turns: bool,
    pub content_dir: Option<PathBuf>,
    pub tables_path: Option<PathBuf>,
    pub items_path: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            pokeapi_url: pokeapi::DEFAULT_BASE_URL.to_string(),
            leaderboard_url: leaderboard::DEFAULT_BASE_URL.to_string(),
            leaderboard_token: None,
            player_name: RuntimeConfig::default().player_name,
            save_data_dir: None,
            seed: None,
            instant_turns: false,
            content_dir: None,
            tables_path: None,
            items_path: None,
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `POKEAPI_URL` - Creature and item API base (default: public PokeAPI)
    /// - `LEADERBOARD_URL` - Leaderboard service base (default: localhost:5000)
    /// - `LEADERBOARD_TOKEN` - Bearer token for submissions (optional)
    /// - `PLAYER_NAME` - Name submitted with finished runs (default: Trainer)
    /// - `SAVE_DATA_DIR` - High-score directory (default: platform-specific)
    /// - `GAME_SEED` - Fixed session seed (default: random)
    /// - `INSTANT_TURNS` - Disable pacing delays (default: false)
    /// - `CONTENT_DATA_DIR` - Directory holding `tables.toml` / `items.ron`
    /// - `TABLES_PATH` - Balance tables TOML, overrides the content directory
    /// - `ITEMS_PATH` - Item catalog RON, overrides the content directory
    /// - `GAME_SESSION_ID` - Identifier for the session's log directory
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = read_string(&lookup, "POKEAPI_URL") {
            config.pokeapi_url = url;
        }
        if let Some(url) = read_string(&lookup, "LEADERBOARD_URL") {
            config.leaderboard_url = url;
        }
        config.leaderboard_token = read_string(&lookup, "LEADERBOARD_TOKEN");
        if let Some(name) = read_string(&lookup, "PLAYER_NAME") {
            config.player_name = name;
        }
        config.save_data_dir = read_string(&lookup, "SAVE_DATA_DIR").map(PathBuf::from);
        config.seed = read_env(&lookup, "GAME_SEED");

        // A bare `INSTANT_TURNS=` also counts as enabled.
        if let Some(enable) = read_env::<bool>(&lookup, "INSTANT_TURNS") {
            config.instant_turns = enable;
        } else if lookup("INSTANT_TURNS").is_some() {
            config.instant_turns = true;
        }

        config.content_dir = read_string(&lookup, "CONTENT_DATA_DIR").map(PathBuf::from);
        config.tables_path = read_string(&lookup, "TABLES_PATH").map(PathBuf::from);
        config.items_path = read_string(&lookup, "ITEMS_PATH").map(PathBuf::from);
        config.session_id = read_string(&lookup, "GAME_SESSION_ID");

        config
    }

    /// Runtime settings derived from this configuration.
    pub fn runtime_config(&self) -> RuntimeConfig {
        let base = if self.instant_turns {
            RuntimeConfig::instant()
        } else {
            RuntimeConfig::default()
        };
        RuntimeConfig {
            player_name: self.player_name.clone(),
            seed: self.seed,
            ..base
        }
    }
}

fn read_string(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    read_string(lookup, key)?.parse().ok()
}
