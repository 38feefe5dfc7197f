//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a session.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use game_core::BattleSession;

use crate::api::{
    CreatureProvider, ItemProvider, ProviderKind, Result, RunSink, RuntimeError, RuntimeHandle,
};
use crate::events::{EventBus, GameEvent, Topic};
use crate::oracle::OracleManager;
use crate::providers::NullRunSink;
use crate::repository::{HighScoreRepository, InMemoryHighScoreRepository};
use crate::workers::{Collaborators, Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Pause before the enemy picks its move.
    pub think_delay: Duration,
    /// Attacker's lunge; the move resolves when it ends.
    pub lunge_delay: Duration,
    /// Pause after a hit lands before the result is acted on.
    pub impact_delay: Duration,
    /// Upper bound on move detail lookups per summoned combatant.
    pub max_move_lookups: usize,
    /// Name submitted with finished runs.
    pub player_name: String,
    /// Session seed; drawn at random when `None`.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            think_delay: Duration::from_millis(1000),
            lunge_delay: Duration::from_millis(300),
            impact_delay: Duration::from_millis(400),
            max_move_lookups: 12,
            player_name: "Trainer".to_string(),
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Default configuration with every pacing delay set to zero.
    pub fn instant() -> Self {
        Self {
            think_delay: Duration::ZERO,
            lunge_delay: Duration::ZERO,
            impact_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Main runtime that orchestrates a battle session
///
/// Design: Runtime owns the worker and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    creatures: Option<Arc<dyn CreatureProvider>>,
    items: Option<Arc<dyn ItemProvider>>,
    runs: Option<Arc<dyn RunSink>>,
    high_scores: Option<Arc<dyn HighScoreRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            creatures: None,
            items: None,
            runs: None,
            high_scores: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the required creature lookup
    pub fn creatures(mut self, provider: Arc<dyn CreatureProvider>) -> Self {
        self.creatures = Some(provider);
        self
    }

    /// Set the required item lookup
    pub fn items(mut self, provider: Arc<dyn ItemProvider>) -> Self {
        self.items = Some(provider);
        self
    }

    /// Set where finished runs are submitted (optional, defaults to discarding them)
    pub fn run_sink(mut self, sink: Arc<dyn RunSink>) -> Self {
        self.runs = Some(sink);
        self
    }

    /// Set the high-score store (optional, defaults to in-memory)
    pub fn high_scores(mut self, repository: Arc<dyn HighScoreRepository>) -> Self {
        self.high_scores = Some(repository);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let creatures = self.creatures.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Creature,
        })?;
        let items = self.items.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Item,
        })?;
        let runs = self.runs.unwrap_or_else(|| Arc::new(NullRunSink));
        let high_scores = self
            .high_scores
            .unwrap_or_else(|| Arc::new(InMemoryHighScoreRepository::new()));

        let high_score = high_scores.load().unwrap_or_else(|error| {
            warn!(
                target: "runtime",
                error = %error,
                "Failed to load high score; starting from 0"
            );
            0
        });
        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let session = BattleSession::new(seed, high_score);
        info!(target: "runtime", seed, high_score, "Session created");

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = SessionWorker::new(
            session,
            oracles,
            Collaborators {
                creatures,
                items,
                runs,
                high_scores,
            },
            self.config,
            command_rx,
            event_bus,
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
