//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors live here so every module classifies failures the
//! same way. None of them escape a running battle: invalid selections are
//! reprompted by the sequencer, and registry errors only come from the
//! administrative operations invoked between battles.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with a different choice.
    ///
    /// Examples: skill still on cooldown, menu index out of range
    Recoverable,

    /// Validation error - invalid request, should not retry without changes.
    ///
    /// Examples: unknown ability, selecting a locked ability
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all battle-core errors.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Rejected player choice. Always recovered by reprompting.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("skill index {index} is out of range (combatant has {len} skills)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("skill {name} is still on cooldown ({remaining} turns remaining)")]
    SkillOnCooldown { name: String, remaining: u32 },
}

impl BattleError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "SELECTION_INDEX_OUT_OF_RANGE",
            Self::SkillOnCooldown { .. } => "SELECTION_SKILL_ON_COOLDOWN",
        }
    }
}

/// Errors raised by charge-ability registry administration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown charge ability {0}")]
    UnknownAbility(String),

    #[error("charge ability {0} is locked")]
    AbilityLocked(String),

    #[error("charge ability {0} is already registered")]
    DuplicateAbility(String),

    #[error("cannot activate {requested} abilities (maximum {max})")]
    TooManyActive { requested: usize, max: usize },
}

impl BattleError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAbility(_) => "REGISTRY_UNKNOWN_ABILITY",
            Self::AbilityLocked(_) => "REGISTRY_ABILITY_LOCKED",
            Self::DuplicateAbility(_) => "REGISTRY_DUPLICATE_ABILITY",
            Self::TooManyActive { .. } => "REGISTRY_TOO_MANY_ACTIVE",
        }
    }
}
