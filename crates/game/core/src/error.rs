//! Error classification shared by every crate in the workspace.
//!
//! Gameplay failures (vetoed attacks, missing listeners, out-of-range actions)
//! are never errors: they resolve to default values or an early exit from the
//! pipeline. Errors are reserved for the collaborator boundary, where a
//! missing map or an unknown prototype name has to reach the caller.

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retrying elsewhere may work (a spawn tile was blocked).
    Recoverable,
    /// The request names something that does not exist or does not fit.
    Validation,
    /// State the caller built itself is inconsistent.
    Internal,
    /// A collaborator the level cannot run without is missing.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Internal and fatal errors point at a bug in level setup.
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every `thiserror` enum in the workspace.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the variant, e.g. `ENV_UNKNOWN_PROTOTYPE`.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
