//! Collaborator access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised at the boundary between the rules and their collaborators.
///
/// Inside a dispatch these are swallowed into "the action fizzles"; callers
/// outside a dispatch (session setup, content loading) see them directly.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnvError {
    /// No spatial index was provided to the environment.
    #[error("spatial index not available")]
    MapNotAvailable,

    /// No entity factory was provided to the environment.
    #[error("entity factory not available")]
    FactoryNotAvailable,

    /// The factory has no prototype registered under this name.
    #[error("prototype '{0}' not found")]
    UnknownPrototype(String),
}

impl GameError for EnvError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EnvError::MapNotAvailable | EnvError::FactoryNotAvailable => ErrorSeverity::Fatal,
            EnvError::UnknownPrototype(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EnvError::MapNotAvailable => "ENV_MAP_NOT_AVAILABLE",
            EnvError::FactoryNotAvailable => "ENV_FACTORY_NOT_AVAILABLE",
            EnvError::UnknownPrototype(_) => "ENV_UNKNOWN_PROTOTYPE",
        }
    }
}
