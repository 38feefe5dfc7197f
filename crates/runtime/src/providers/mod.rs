//! Collaborator implementations: HTTP clients and in-process fixtures.

pub mod fixtures;
pub mod leaderboard;
pub mod pokeapi;

pub use fixtures::{NullRunSink, RecordingRunSink, StaticCreatureProvider, StaticItemProvider};
pub use leaderboard::LeaderboardClient;
pub use pokeapi::PokeApiClient;
