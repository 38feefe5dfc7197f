//! Runtime orchestration for battle sessions.
//!
//! This crate wires the deterministic rules from `game-core` to the outside
//! world: creature and item lookups, the leaderboard, the high-score store,
//! and turn pacing. Consumers embed [`Runtime`] to drive a session, subscribe
//! to events, and issue player input through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
//! - [`providers`] implements the collaborator contracts over HTTP and in memory
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod providers;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{
    CreatureProvider, ItemProvider, LeaderboardEntry, ProviderError, ProviderKind, Result,
    RunRecord, RunSink, RuntimeError, RuntimeHandle,
};
pub use events::{EventBus, GameEvent, Topic, TurnStage};
pub use oracle::OracleManager;
pub use providers::{
    LeaderboardClient, NullRunSink, PokeApiClient, RecordingRunSink, StaticCreatureProvider,
    StaticItemProvider,
};
pub use repository::{
    FileHighScoreRepository, HighScoreRepository, InMemoryHighScoreRepository, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
