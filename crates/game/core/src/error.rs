//! Common error infrastructure for game-core.
//!
//! This module provides shared types and traits used across all error types in game-core.
//! Domain-specific errors (e.g., `GraphError`, `ConfigError`) are defined in their
//! respective modules alongside the data they validate.
//!
//! # Design Principles
//!
//! - **Steady state is not an error**: a stuck adversary, a missing player or a dead-end
//!   node is ordinary game behavior and never produces an error value
//! - **Clamp, don't fail**: out-of-range numbers are clamped where they are mutated
//! - **Severity Classification**: the errors that do exist are categorized for handling

use state_machine::StateMachineError;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The request was refused, the caller may try something else
/// - **Validation**: Authored data or configuration is malformed
/// - **Internal**: A programming error, such as a transition to an absent state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the request was rejected in the current situation.
    ///
    /// Examples: move target not adjacent, mover busy
    Recoverable,

    /// Validation error - authored input is invalid and must be fixed.
    ///
    /// Examples: edge to an unknown node, probability outside [0, 1]
    Validation,

    /// Internal error - indicates a bug in the caller.
    ///
    /// Examples: transition requested without a target state
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

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
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
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl GameError for StateMachineError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateMachineError::MissingState => "STATE_MISSING",
        }
    }
}
