//! Common error infrastructure for game-core.
//!
//! Errors in the data model are diagnostics, not control flow: a failed
//! requirement check removes a skill from consideration and the failing stat
//! is only reported to logs.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each check has its own error type with specific fields
//! - **Rich Context**: Errors carry the offending values for debugging
//! - **Severity Classification**: Errors are categorized for handling strategies

use crate::stats::AttributeKind;

/// Severity level of an error, used for categorization and handling strategies.
///
/// - **Recoverable**: The caller skips the offending option and continues
/// - **Validation**: Malformed input that should be rejected
/// - **Internal**: Unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the option is discarded and evaluation continues.
    ///
    /// Examples: skill cost not affordable, target out of range
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown level index, malformed snapshot
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

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// An attribute requirement that the actor does not meet.
///
/// Produced by [`crate::Attributes::meets`] and
/// [`crate::Attributes::can_afford`]; `kind` is the first failing component.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("attribute check failed: {kind} (have: {have} < need: {need})")]
pub struct RequirementError {
    pub kind: AttributeKind,
    pub have: f32,
    pub need: f32,
}

impl GameError for RequirementError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "REQUIREMENT_NOT_MET"
    }
}

/// Errors raised while looking things up in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("level {0} is not present in the snapshot")]
    UnknownLevel(i32),

    #[error("level {level} has invalid dimensions {width}x{height}")]
    InvalidDimensions { level: i32, width: u32, height: u32 },
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownLevel(_) => "UNKNOWN_LEVEL",
            Self::InvalidDimensions { .. } => "INVALID_DIMENSIONS",
        }
    }
}
