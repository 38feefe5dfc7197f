//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! playing a session or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{BattleSession, SessionPhase, SpeciesId, TurnOutcome};

use super::errors::{Result, RuntimeError};
use super::providers::LeaderboardEntry;
use crate::events::{EventBus, GameEvent, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Open a new run; the session then waits for a starter.
    pub async fn start(&self) -> Result<()> {
        self.request(|reply| Command::Start { reply }).await?
    }

    /// Pick the starter species and begin floor 1.
    ///
    /// Returns the resulting phase: `InBattle`, or `SpawnFailed` when a
    /// creature lookup failed.
    pub async fn choose_starter(&self, species: SpeciesId) -> Result<SessionPhase> {
        self.request(|reply| Command::ChooseStarter { species, reply })
            .await?
    }

    /// Use the player's move at `index`.
    ///
    /// The enemy's reply turn (if any) runs afterwards on the worker's own
    /// schedule and is reported through [`Topic::Battle`] events.
    pub async fn use_move(&self, index: usize) -> Result<TurnOutcome> {
        self.request(|reply| Command::UseMove { index, reply })
            .await?
    }

    /// Apply loot offer `index` and spawn the next floor's enemy.
    pub async fn select_upgrade(&self, index: usize) -> Result<SessionPhase> {
        self.request(|reply| Command::SelectUpgrade { index, reply })
            .await?
    }

    /// Repeat the creature lookup that left the session in `SpawnFailed`.
    pub async fn retry_spawn(&self) -> Result<SessionPhase> {
        self.request(|reply| Command::RetrySpawn { reply }).await?
    }

    /// Abandon a run whose spawn failed.
    pub async fn abort(&self) -> Result<()> {
        self.request(|reply| Command::Abort { reply }).await?
    }

    /// Leave the end-of-run screen. The high score is kept.
    pub async fn acknowledge(&self) -> Result<()> {
        self.request(|reply| Command::Acknowledge { reply }).await?
    }

    /// Query the current session (read-only snapshot)
    pub async fn snapshot(&self) -> Result<BattleSession> {
        self.request(|reply| Command::QuerySession { reply }).await
    }

    /// Best submitted runs, at most `limit`.
    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        self.request(|reply| Command::Leaderboard { limit, reply })
            .await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - Phase changes, narration, spawns, loot
    /// - `Topic::Battle` - Turn pacing and resolved turns
    /// - `Topic::Persistence` - High score and leaderboard results
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to every topic.
    pub fn subscribe_events(&self) -> Vec<(Topic, broadcast::Receiver<GameEvent>)> {
        self.event_bus.subscribe_all()
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
