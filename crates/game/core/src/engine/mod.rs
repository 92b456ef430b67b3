//! Queue draining and the match phase machine.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! mutation after [`GameEngine::start`] is an [`Action`] popped from the
//! queue and driven through pre_validate → apply → post_validate. When the
//! queue runs dry the engine either advances the phase or issues requests
//! and pauses until [`GameEngine::respond`] answers them.

mod dispatch;
mod errors;
mod requests;
mod respond;
mod setup;
mod transition;

pub use errors::{EngineError, ResponseError, StartError, TransitionPhase, TransitionPhaseError};
pub use requests::SWITCH_COST;

pub(crate) use setup::{build_card, build_character};

use crate::action::{
    Action, ActionOutcome, DeclareRoundEndAction, DiceSelection, DrawCardsAction, RemoveDiceAction,
    RollDiceAction,
};
use crate::config::MatchConfig;
use crate::error::ErrorContext;
use crate::event::Event;
use crate::interaction::{Request, RequestKind};
use crate::state::{GameState, Outcome, Phase, Stage};

/// Where a call to [`GameEngine::step`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepStatus {
    /// At least one request is outstanding.
    AwaitingResponse,
    Ended(Outcome),
}

/// Game engine that drains the action queue and advances phases.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    /// Actions drained plus phase advances made by this engine.
    progress: usize,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state, progress: 0 }
    }

    /// True once [`GameEngine::step`] has drained an action or advanced the
    /// phase machine.
    pub fn made_progress(&self) -> bool {
        self.progress > 0
    }

    /// Runs until a request is outstanding or the match is over.
    ///
    /// Returns immediately while requests are pending. An action failure
    /// moves the match to [`Phase::Error`] and is returned.
    pub fn step(&mut self) -> Result<StepStatus, EngineError> {
        let mut drained = 0usize;
        loop {
            match self.state.phase {
                Phase::Idle => return Err(EngineError::NotStarted),
                Phase::Error => return Err(EngineError::Halted),
                Phase::Ended => {
                    return Ok(StepStatus::Ended(self.state.outcome.unwrap_or(Outcome::Draw)));
                }
                _ => {}
            }
            if !self.state.requests.is_empty() {
                return Ok(StepStatus::AwaitingResponse);
            }
            match self.state.queue.pop_front() {
                Some(action) => {
                    self.state.response_insert_at = 0;
                    drained += 1;
                    if drained > MatchConfig::MAX_ACTIONS_PER_STEP {
                        return Err(self.halt(EngineError::RunawayQueue {
                            limit: MatchConfig::MAX_ACTIONS_PER_STEP,
                        }));
                    }
                    self.progress += 1;
                    self.execute(action)?;
                    self.check_outcome();
                }
                None => {
                    self.progress += 1;
                    self.advance();
                }
            }
        }
    }

    /// Applies one action and queues its follow-ups and triggered actions.
    fn execute(&mut self, action: Action) -> Result<(), EngineError> {
        tracing::trace!(
            target: "tcg::engine",
            action = action.name(),
            round = self.state.round,
            queued = self.state.queue.len(),
            "drain action"
        );
        let outcome = match transition::drive_transition(action.transition(), self.state) {
            Ok(outcome) => outcome,
            Err(error) => {
                let context = ErrorContext::new(self.state.round)
                    .with_player(self.state.current_player)
                    .with_message(action.name());
                return Err(self.halt(EngineError::action(&action, error, context)));
            }
        };
        self.state.action_count += 1;

        let ActionOutcome {
            events,
            follow_ups,
            requests,
        } = outcome;
        self.state.queue.extend(follow_ups);
        for event in &events {
            self.emit(event);
        }
        self.issue(requests);
        Ok(())
    }

    /// Dispatches `event` and appends whatever it triggers to the queue.
    fn emit(&mut self, event: &Event) {
        let triggered = dispatch::dispatch(self.state, event);
        self.state.queue.extend(triggered);
    }

    fn issue(&mut self, requests: impl IntoIterator<Item = Request>) {
        for request in requests {
            tracing::debug!(
                target: "tcg::engine",
                player = request.player,
                request = request.kind.as_ref(),
                "request issued"
            );
            self.state.requests.push(request);
        }
    }

    fn halt(&mut self, error: EngineError) -> EngineError {
        tracing::error!(
            target: "tcg::engine",
            round = self.state.round,
            phase = %self.state.phase,
            error = %error,
            "invariant violation, match halted"
        );
        self.state.phase = Phase::Error;
        self.state.queue.clear();
        self.state.requests.clear();
        error
    }

    /// Ends the match once a side has no alive character left.
    fn check_outcome(&mut self) {
        let defeated = [
            self.state.table(0).all_defeated(),
            self.state.table(1).all_defeated(),
        ];
        let outcome = match defeated {
            [true, true] => Outcome::Draw,
            [true, false] => Outcome::Winner(1),
            [false, true] => Outcome::Winner(0),
            [false, false] => return,
        };
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: Outcome) {
        tracing::debug!(target: "tcg::engine", round = self.state.round, ?outcome, "match ended");
        self.state.outcome = Some(outcome);
        self.state.queue.clear();
        self.state.requests.clear();
        self.state.enter_phase(Phase::Ended);
    }

    /// Moves the phase machine one stage forward. Only called with an empty
    /// queue and no outstanding request.
    fn advance(&mut self) {
        let state = &mut *self.state;
        match (state.phase, state.stage) {
            (Phase::Starting, Stage::Enter) => {
                state.stage = Stage::Requests;
                let first = state.first_player;
                self.issue(
                    [first, 1 - first].map(|player| Request::new(player, RequestKind::SwitchCard)),
                );
            }
            (Phase::Starting, Stage::Requests) => {
                state.stage = Stage::Followup;
                let first = state.first_player;
                let requests: Vec<Request> = [first, 1 - first]
                    .into_iter()
                    .filter_map(|player| requests::choose_character(state, player))
                    .collect();
                self.issue(requests);
            }
            (Phase::Starting, _) => state.enter_phase(Phase::Preparation),

            (Phase::Preparation, Stage::Enter) => {
                state.round += 1;
                state.current_player = state.first_player;
                for table in &mut state.tables {
                    table.has_round_ended = false;
                }
                state.stage = Stage::Finish;
                let round = state.round;
                self.emit(&Event::RoundPrepare { round });
            }
            (Phase::Preparation, _) => state.enter_phase(Phase::RollPhase),

            (Phase::RollPhase, Stage::Enter) => {
                state.stage = Stage::Requests;
                let count = state.config.initial_dice_number;
                let first = state.first_player;
                for player in [first, 1 - first] {
                    state
                        .queue
                        .push_back(Action::RollDice(RollDiceAction { player, count }));
                }
            }
            (Phase::RollPhase, Stage::Requests) => {
                state.stage = Stage::Finish;
                let remaining = state.config.initial_dice_reroll_times;
                if remaining > 0 {
                    let first = state.first_player;
                    self.issue([first, 1 - first].map(|player| {
                        Request::new(player, RequestKind::RerollDice { remaining })
                    }));
                }
            }
            (Phase::RollPhase, _) => state.enter_phase(Phase::ActionPhase),

            (Phase::ActionPhase, _) => {
                if state.tables.iter().all(|table| table.has_round_ended) {
                    state.enter_phase(Phase::EndPhase);
                    return;
                }
                state.stage = Stage::Requests;
                let player = state.current_player;
                let mut requests = requests::action_phase_requests(state, player);
                if requests.is_empty() {
                    // No usable active character: ask for one, or pass the round.
                    let active_down = state
                        .table(player)
                        .active_character()
                        .is_none_or(|character| !character.alive);
                    match requests::choose_character(state, player) {
                        Some(request) if active_down => requests.push(request),
                        _ => state
                            .queue
                            .push_back(Action::DeclareRoundEnd(DeclareRoundEndAction { player })),
                    }
                }
                self.issue(requests);
            }

            (Phase::EndPhase, Stage::Enter) => {
                state.stage = Stage::Followup;
                let round = state.round;
                self.emit(&Event::RoundEnd { round });
            }
            (Phase::EndPhase, Stage::Followup) => {
                state.stage = Stage::Finish;
                let count = state.config.card_draw_per_round;
                let first = state.first_player;
                for player in [first, 1 - first] {
                    state
                        .queue
                        .push_back(Action::DrawCards(DrawCardsAction::new(player, count)));
                }
                for player in [first, 1 - first] {
                    state.queue.push_back(Action::RemoveDice(RemoveDiceAction {
                        player,
                        dice: DiceSelection::All,
                    }));
                }
            }
            (Phase::EndPhase, _) => {
                if state.round >= state.config.max_round_number {
                    self.finish(Outcome::Draw);
                } else {
                    state.enter_phase(Phase::Preparation);
                }
            }

            (Phase::Idle | Phase::Ended | Phase::Error, _) => {}
        }
    }
}

#[cfg(test)]
mod tests;
