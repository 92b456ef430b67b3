//! Error types for the engine: action pipeline, responses and match start.

use crate::action::{Action, ActionError};
use crate::catalog::CatalogError;
use crate::deck::DeckError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::Phase;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Invariant violations raised while draining the queue. Every one of them
/// moves the match to [`Phase::Error`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("{action} action failed in round {}: {error}", context.round)]
    Action {
        action: String,
        error: TransitionPhaseError<ActionError>,
        #[cfg_attr(feature = "serde", serde(skip_deserializing))]
        context: ErrorContext,
    },

    #[error("match has not been started")]
    NotStarted,

    #[error("match is in the error phase")]
    Halted,

    #[error("more than {limit} actions drained without reaching a request")]
    RunawayQueue { limit: usize },
}

impl EngineError {
    pub(crate) fn action(
        action: &Action,
        error: TransitionPhaseError<ActionError>,
        context: ErrorContext,
    ) -> Self {
        Self::Action {
            action: action.name().to_string(),
            error,
            context,
        }
    }
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Action { .. } => ErrorSeverity::Internal,
            Self::NotStarted => ErrorSeverity::Recoverable,
            Self::Halted | Self::RunawayQueue { .. } => ErrorSeverity::Fatal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Action { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Action { .. } => "ENGINE_ACTION_FAILED",
            Self::NotStarted => "ENGINE_NOT_STARTED",
            Self::Halted => "ENGINE_HALTED",
            Self::RunawayQueue { .. } => "ENGINE_RUNAWAY_QUEUE",
        }
    }
}

/// Illegal responses. State is untouched and the request stays outstanding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseError {
    #[error("match is {phase}, no response accepted")]
    NotAccepting { phase: Phase },

    #[error("no outstanding request matches the response")]
    UnknownRequest,

    #[error("response kind '{response}' does not answer request '{request}'")]
    KindMismatch { request: String, response: String },

    #[error("choice {index} out of range (only {len} options)")]
    ChoiceOutOfRange { index: usize, len: usize },

    #[error("index {index} chosen twice")]
    DuplicateChoice { index: usize },

    #[error("chosen dice do not pay the cost exactly")]
    DiceDoNotPay,

    #[error("this card needs a target")]
    TargetRequired,
}

impl GameError for ResponseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotAccepting { .. } | Self::UnknownRequest => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAccepting { .. } => "RESPONSE_NOT_ACCEPTING",
            Self::UnknownRequest => "RESPONSE_UNKNOWN_REQUEST",
            Self::KindMismatch { .. } => "RESPONSE_KIND_MISMATCH",
            Self::ChoiceOutOfRange { .. } => "RESPONSE_CHOICE_OUT_OF_RANGE",
            Self::DuplicateChoice { .. } => "RESPONSE_DUPLICATE_CHOICE",
            Self::DiceDoNotPay => "RESPONSE_DICE_DO_NOT_PAY",
            Self::TargetRequired => "RESPONSE_TARGET_REQUIRED",
        }
    }
}

/// Why a match refused to start.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartError {
    #[error("match already started (phase {phase})")]
    AlreadyStarted { phase: Phase },

    #[error("deck of player {player} is invalid: {error}")]
    Deck { player: usize, error: DeckError },

    #[error("deck of player {player} names unknown content: {error}")]
    Catalog { player: usize, error: CatalogError },
}

impl GameError for StartError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyStarted { .. } => "START_ALREADY_STARTED",
            Self::Deck { .. } => "START_INVALID_DECK",
            Self::Catalog { .. } => "START_UNKNOWN_CONTENT",
        }
    }
}
