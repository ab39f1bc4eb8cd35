//! Common error infrastructure for torus-core.
//!
//! Domain-specific errors (e.g., `LedgerError`, `CarryError`) are defined in
//! their respective modules alongside the operations they validate. This
//! module provides the shared severity classification and the trait that
//! ties them together.
//!
//! Every gameplay failure in this crate is a caller-visible `Result`; there
//! are no fatal error paths. Command handlers check the result, react (cancel
//! a placement, log a warning) and leave state unchanged.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: carry capacity exhausted, not enough resources banked
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: slot index out of range, stale pile handle
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: ledger entry desync, tracked actor missing its record
    /// These indicate bugs and should be investigated.
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

/// Common trait for all torus-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Authority gate failure: a mutating entry point was invoked on a
/// non-authoritative peer. Fails closed; the state is untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("mutation attempted from a non-authoritative peer")]
pub struct NotAuthoritative;

impl GameError for NotAuthoritative {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "not_authoritative"
    }
}
