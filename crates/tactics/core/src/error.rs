//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (e.g. `PerceptionError`, `SpatialError`) are
//! defined in their respective modules alongside the operations they guard;
//! this module provides the shared severity classification.

/// Severity level of an error, used for categorization and recovery
/// strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition that may succeed on a later tick.
    ///
    /// Examples: empty reachable set, no target currently known
    Recoverable,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: unregistered actor id, cell outside the grid
    Validation,

    /// Unexpected state inconsistency; indicates a bug worth investigating.
    Internal,

    /// Unrecoverable wiring failure; the scene cannot operate.
    ///
    /// Examples: missing required oracle, missing scoring configuration
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Classification implemented by every error type in this crate.
///
/// Hosts log by `severity()` and index by `error_code()`; neither is used
/// for control flow inside the core.
pub trait CoreError: std::error::Error {
    fn severity(&self) -> ErrorSeverity;

    /// Stable machine-readable code, unique per variant.
    fn error_code(&self) -> &'static str;
}
