//! Turn bookkeeping for the action phase.

use crate::event::Event;
use crate::modifier::{self, CombatActionType, CombatActionValue, ModifiableValue};
use crate::state::{GameState, Position};

use super::{ActionError, ActionOutcome, ActionTransition, sweep_depleted};

/// Ends the player's round. The first player to declare goes first next
/// round; the turn passes unless the opponent has already declared.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclareRoundEndAction {
    pub player: usize,
}

impl ActionTransition for DeclareRoundEndAction {
    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let opponent = 1 - self.player;
        state.table_mut(self.player).has_round_ended = true;
        if !state.table(opponent).has_round_ended {
            state.first_player = self.player;
            state.current_player = opponent;
        }
        tracing::debug!(
            target: "tcg::action",
            player = self.player,
            round = state.round,
            "round end declared"
        );
        Ok(ActionOutcome::event(Event::DeclareRoundEnd {
            player: self.player,
        }))
    }
}

/// Marks the end of a skill or switch and decides whether the turn passes.
///
/// The decision is a `REAL` fold of [`ModifiableValue::CombatAction`], so
/// objects may turn a combat action into a quick one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatActionAction {
    pub player: usize,
    pub action_type: CombatActionType,
    /// Skill used, or the character switched away from.
    pub position: Position,
}

impl ActionTransition for CombatActionAction {
    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let value = ModifiableValue::CombatAction(CombatActionValue {
            action_type: self.action_type,
            position: self.position,
            do_combat_action: true,
        });
        let do_combat_action = match modifier::commit(state, value)? {
            ModifiableValue::CombatAction(value) => value.do_combat_action,
            _ => true,
        };
        let opponent = 1 - self.player;
        if do_combat_action && !state.table(opponent).has_round_ended {
            state.current_player = opponent;
        }
        let mut outcome = ActionOutcome::event(Event::CombatAction {
            player: self.player,
            action_type: self.action_type,
            position: self.position,
            do_combat_action,
        });
        outcome.events.extend(sweep_depleted(state));
        Ok(outcome)
    }
}
