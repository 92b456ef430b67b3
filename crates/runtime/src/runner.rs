//! Drives a match across the request/response boundary.

use tcg_core::{GameError, Match, Outcome, Phase, Response, StepStatus};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::providers::ResponseProvider;

/// Why [`MatchRunner::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Finished(Outcome),
    /// `player`'s provider had nothing to say. Requests stay outstanding,
    /// so the caller may answer them and run again.
    Stalled { player: usize },
}

/// Alternates two providers until the match stops.
pub struct MatchRunner {
    providers: [Box<dyn ResponseProvider>; 2],
    max_steps: usize,
    responses: Vec<Response>,
}

impl MatchRunner {
    pub fn new(
        first: impl ResponseProvider + 'static,
        second: impl ResponseProvider + 'static,
    ) -> Self {
        Self {
            providers: [Box::new(first), Box::new(second)],
            max_steps: RuntimeConfig::DEFAULT_MAX_STEPS,
            responses: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Swaps the provider of `player`, keeping the response log.
    pub fn set_provider(&mut self, player: usize, provider: impl ResponseProvider + 'static) {
        self.providers[player] = Box::new(provider);
    }

    /// Every response accepted so far, in answer order.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn into_responses(self) -> Vec<Response> {
        self.responses
    }

    /// Starts `game` if needed, then steps and answers until it ends or a
    /// provider runs dry.
    ///
    /// The engine is only stepped once every request is answered; players
    /// answer in seat order.
    pub fn run(&mut self, game: &mut Match) -> Result<RunStatus> {
        if game.phase() == Phase::Idle {
            game.start()?;
        }
        let mut steps = 0;
        loop {
            if let Some(outcome) = game.outcome() {
                return Ok(RunStatus::Finished(outcome));
            }
            if game.requests().is_empty() {
                if steps == self.max_steps {
                    return Err(RuntimeError::StepBudget {
                        limit: self.max_steps,
                    });
                }
                steps += 1;
                if let StepStatus::Ended(outcome) = game.step()? {
                    tracing::info!(
                        target: "tcg::runtime",
                        ?outcome,
                        round = game.state().round,
                        "match finished"
                    );
                    return Ok(RunStatus::Finished(outcome));
                }
            }
            for player in 0..2 {
                if !game.need_respond(player) {
                    continue;
                }
                let Some(response) = self.providers[player].respond(player, game.state())? else {
                    tracing::debug!(target: "tcg::runtime", player, "provider has nothing to say");
                    return Ok(RunStatus::Stalled { player });
                };
                if let Err(error) = game.respond(&response) {
                    tracing::warn!(
                        target: "tcg::runtime",
                        player,
                        code = error.error_code(),
                        severity = error.severity().as_str(),
                        "provider response rejected"
                    );
                    return Err(error.into());
                }
                self.responses.push(response);
            }
        }
    }
}
