//! Match façade: owns the state, the decks and the history log.

use crate::config::MatchConfig;
use crate::deck::Deck;
use crate::engine::{EngineError, GameEngine, ResponseError, StartError, StepStatus};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::history::History;
use crate::interaction::{Request, Response};
use crate::rng::MatchRng;
use crate::state::{GameState, Outcome, Phase};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Start(#[from] StartError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("decks must be set before the match starts")]
    DecksMissing,

    #[error("history index {index} out of range (length {len})")]
    HistoryIndex { index: usize, len: usize },
}

impl GameError for MatchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Start(error) => error.severity(),
            Self::Engine(error) => error.severity(),
            Self::Response(error) => error.severity(),
            Self::DecksMissing | Self::HistoryIndex { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Engine(error) => error.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Start(error) => error.error_code(),
            Self::Engine(error) => error.error_code(),
            Self::Response(error) => error.error_code(),
            Self::DecksMissing => "MATCH_DECKS_MISSING",
            Self::HistoryIndex { .. } => "MATCH_HISTORY_INDEX",
        }
    }
}

/// One match between two players.
///
/// ```text
/// let mut game = Match::new(MatchConfig::new(), Some(7));
/// game.set_decks([deck_a, deck_b]);
/// game.start()?;
/// game.step()?;
/// // answer game.requests() with game.respond(..), then step again
/// ```
#[derive(Clone, Debug)]
pub struct Match {
    state: GameState,
    decks: Option<[Deck; 2]>,
    history: History,
}

impl Match {
    /// Creates an idle match. Without a seed, entropy is drawn once here.
    pub fn new(config: MatchConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| MatchRng::from_entropy().1);
        Self {
            state: GameState::new(config, seed),
            decks: None,
            history: History::new(),
        }
    }

    pub fn set_decks(&mut self, decks: [Deck; 2]) {
        self.decks = Some(decks);
    }

    pub fn decks(&self) -> Option<&[Deck; 2]> {
        self.decks.as_ref()
    }

    pub fn start(&mut self) -> Result<(), MatchError> {
        let decks = self.decks.as_ref().ok_or(MatchError::DecksMissing)?;
        GameEngine::new(&mut self.state).start(decks)?;
        Ok(())
    }

    /// Drains until the next request or the end of the match. A snapshot is
    /// recorded only when the call drained or advanced something.
    pub fn step(&mut self) -> Result<StepStatus, MatchError> {
        let mut engine = GameEngine::new(&mut self.state);
        let status = engine.step()?;
        let progressed = engine.made_progress();
        if progressed && self.state.config.history_enabled {
            self.history.push(&self.state);
        }
        Ok(status)
    }

    pub fn respond(&mut self, response: &Response) -> Result<(), MatchError> {
        GameEngine::new(&mut self.state).respond(response)?;
        Ok(())
    }

    /// Restores snapshot `index` and discards every later one.
    pub fn reset_to(&mut self, index: usize) -> Result<(), MatchError> {
        let len = self.history.len();
        self.state = self
            .history
            .rewind(index)
            .ok_or(MatchError::HistoryIndex { index, len })?;
        tracing::debug!(target: "tcg::engine", index, dropped = len - index - 1, "history reset");
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn seed(&self) -> u64 {
        self.state.seed
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn requests(&self) -> &[Request] {
        &self.state.requests
    }

    pub fn need_respond(&self, player: usize) -> bool {
        self.state.requests_for(player).next().is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase.is_terminal()
    }
}
