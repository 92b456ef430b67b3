//! Unified error types surfaced by the runtime API.
//!
//! Wraps match failures, provider failures and record I/O so callers can
//! bubble them up with consistent context.
use thiserror::Error;

use tcg_core::{DeckError, MatchError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("no match stop within {limit} steps")]
    StepBudget { limit: usize },

    #[error("deck of player {player}: {error}")]
    Deck { player: usize, error: DeckError },

    #[error("replay diverged from the record at snapshot {index}")]
    ReplayDiverged { index: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("snapshot digest failed: {0}")]
    Digest(String),
}

impl From<serde_json::Error> for RuntimeError {
    fn from(error: serde_json::Error) -> Self {
        RuntimeError::Json(error.to_string())
    }
}
