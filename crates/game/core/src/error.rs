//! Common error infrastructure for tcg-core.
//!
//! This module provides shared types and traits used across all error types in
//! tcg-core. Domain-specific errors (`EngineError`, `ResponseError`,
//! `StartError`, ...) live next to the code that raises them.
//!
//! # Error tiers
//!
//! - **Illegal external input** (`Validation`): a response or deck is rejected
//!   and the match is left untouched.
//! - **Invariant violations** (`Internal` / `Fatal`): an action reached its
//!   handler with a broken precondition. The match moves to the absorbing
//!   `Error` phase.

use crate::state::Position;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: the caller may retry with a different input
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the match cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    ///
    /// Examples: a response arrived while no request was outstanding
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: dice that do not pay the cost, unknown card name in a deck
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: removing an object that was never created
    /// These indicate rule-content bugs and should be investigated.
    Internal,

    /// Fatal error - match state corrupted, cannot continue.
    ///
    /// Examples: stepping a match that already entered the error phase
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
///
/// Context is captured at the point of error creation and includes the parts
/// of the match that help correlate a failure with a history snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Round counter at the time of the error.
    pub round: u32,

    /// Player the failing action or response belonged to (if applicable).
    pub player: Option<usize>,

    /// Object position involved in the failure (if applicable).
    pub position: Option<Position>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context for the given round.
    #[must_use]
    pub const fn new(round: u32) -> Self {
        Self {
            round,
            player: None,
            position: None,
            message: None,
        }
    }

    /// Attaches a player index to this context (builder pattern).
    #[must_use]
    pub const fn with_player(mut self, player: usize) -> Self {
        self.player = Some(player);
        self
    }

    /// Attaches a position to this context (builder pattern).
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Shared classification for engine, response, start and match errors.
///
/// Implementors derive `Display` through `thiserror`. Severity follows the
/// two error tiers: rejected input is `Recoverable` or `Validation`, a broken
/// action precondition is `Internal`, and a halted match is `Fatal`.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Stable identifier of the variant, e.g. `RESPONSE_DICE_DO_NOT_PAY`.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
