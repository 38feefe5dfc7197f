//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the battle engine, collaborators
//! and repositories so clients can bubble them up with consistent context.
use std::fmt;

use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{EngineError, ErrorSeverity, GameError, OracleError};

pub use super::providers::ProviderError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("{kind} lookup failed: {source}")]
    Provider {
        kind: ProviderKind,
        #[source]
        source: ProviderError,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,
}

impl RuntimeError {
    pub(crate) fn provider(kind: ProviderKind) -> impl FnOnce(ProviderError) -> Self {
        move |source| Self::Provider { kind, source }
    }

    /// True when the error is a rejected player input rather than a failure.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Engine(error) => error.severity() == ErrorSeverity::Validation,
            _ => false,
        }
    }
}

/// Collaborator a runtime operation depends on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Creature,
    Item,
    RunSink,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Creature => "creature",
            ProviderKind::Item => "item",
            ProviderKind::RunSink => "run sink",
        };
        write!(f, "{}", label)
    }
}
