//! Unified error types surfaced by the runtime API.
//!
//! Wraps charge-registry failures and session misuse so clients can bubble
//! them up with consistent context.
use battle_core::{BattleError, ErrorSeverity, RegistryError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("roster has no enemies to fight")]
    NoEnemy,

    #[error("run is over after {battles} battles")]
    RunOver { battles: u32 },
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Registry(err) => err.severity(),
            Self::NoEnemy | Self::RunOver { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Registry(err) => err.error_code(),
            Self::NoEnemy => "RUNTIME_NO_ENEMY",
            Self::RunOver { .. } => "RUNTIME_RUN_OVER",
        }
    }
}
