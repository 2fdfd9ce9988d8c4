//! Errors surfaced by session setup and persistence.
//!
//! Gameplay never fails: a blocked step or a missing key is reported through
//! narration and command results. These errors cover the boundary around it.
use game_core::{EntityId, EnvError, ErrorSeverity, GameError, Position};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("no player has been spawned")]
    MissingPlayer,

    #[error("cannot place {prototype} at {position}")]
    SpawnBlocked { prototype: String, position: Position },

    #[error("entity {0} has no {1} unit")]
    MissingUnit(EntityId, &'static str),

    #[error("{holder} refused {item}")]
    ItemRefused { holder: EntityId, item: String },

    #[error("snapshot encoding failed")]
    Snapshot(#[from] serde_json::Error),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(&'static str),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Env(error) => error.severity(),
            RuntimeError::MissingPlayer | RuntimeError::Snapshot(_) => ErrorSeverity::Internal,
            RuntimeError::SpawnBlocked { .. } => ErrorSeverity::Recoverable,
            RuntimeError::MissingUnit(..)
            | RuntimeError::ItemRefused { .. }
            | RuntimeError::InvalidSnapshot(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Env(error) => error.error_code(),
            RuntimeError::MissingPlayer => "RUNTIME_MISSING_PLAYER",
            RuntimeError::SpawnBlocked { .. } => "RUNTIME_SPAWN_BLOCKED",
            RuntimeError::MissingUnit(..) => "RUNTIME_MISSING_UNIT",
            RuntimeError::ItemRefused { .. } => "RUNTIME_ITEM_REFUSED",
            RuntimeError::Snapshot(_) => "RUNTIME_SNAPSHOT",
            RuntimeError::InvalidSnapshot(_) => "RUNTIME_INVALID_SNAPSHOT",
        }
    }
}
