//! Response validation and translation into queued actions.

use crate::action::{
    Action, ChooseCharacterAction, CombatActionAction, DeclareRoundEndAction, DrawCardsAction,
    ElementalTuningAction, PayCostAction, RerollDiceAction, RestoreCardsAction,
    SwitchCharacterAction, UseCardAction, UseSkillAction,
};
use crate::interaction::{Request, RequestKind, Response, ResponseKind};
use crate::modifier::CombatActionType;
use crate::state::{DieColor, GameState, Position};

use super::errors::ResponseError;
use super::requests::{base_cost, cost_source};
use super::GameEngine;

impl GameEngine<'_> {
    /// Answers one outstanding request.
    ///
    /// Illegal responses are rejected before anything changes. Accepted ones
    /// clear every request of the responding player and put the resulting
    /// actions at the front of the queue, after any response accepted
    /// earlier in the same pause.
    pub fn respond(&mut self, response: &Response) -> Result<(), ResponseError> {
        if self.state.phase.is_terminal() {
            return Err(ResponseError::NotAccepting {
                phase: self.state.phase,
            });
        }
        let request = self
            .state
            .requests
            .iter()
            .find(|request| **request == response.request)
            .ok_or(ResponseError::UnknownRequest)?;
        if !response.kind.answers(&request.kind) {
            return Err(ResponseError::KindMismatch {
                request: request.kind.as_ref().to_string(),
                response: response.kind.as_ref().to_string(),
            });
        }
        let actions = translate(self.state, request, &response.kind)?;

        let player = response.player();
        tracing::debug!(
            target: "tcg::engine",
            player,
            response = response.kind.as_ref(),
            actions = actions.len(),
            "response accepted"
        );
        self.state.requests.retain(|request| request.player != player);
        for action in actions {
            let at = self.state.response_insert_at.min(self.state.queue.len());
            self.state.queue.insert(at, action);
            self.state.response_insert_at = at + 1;
        }
        Ok(())
    }
}

fn check_choices(indices: &[usize], len: usize) -> Result<(), ResponseError> {
    for (pos, index) in indices.iter().enumerate() {
        if *index >= len {
            return Err(ResponseError::ChoiceOutOfRange { index: *index, len });
        }
        if indices[..pos].contains(index) {
            return Err(ResponseError::DuplicateChoice { index: *index });
        }
    }
    Ok(())
}

fn pick<T: Copy>(items: &[T], index: usize) -> Result<T, ResponseError> {
    items.get(index).copied().ok_or(ResponseError::ChoiceOutOfRange {
        index,
        len: items.len(),
    })
}

/// Builds a pay-cost action after checking `dice` against the request cost.
fn payment(
    game: &GameState,
    request: &Request,
    dice: &[usize],
    target: Option<Position>,
) -> Result<Action, ResponseError> {
    let pool = &game.table(request.player).dice;
    check_choices(dice, pool.len())?;
    let cost = request.kind.cost().ok_or(ResponseError::UnknownRequest)?;
    let chosen: Vec<DieColor> = dice.iter().map(|index| pool[*index]).collect();
    if !cost.check_payment(&chosen) {
        return Err(ResponseError::DiceDoNotPay);
    }
    let base = base_cost(game, &request.kind).ok_or(ResponseError::UnknownRequest)?;
    let source = cost_source(game, request.player, &request.kind).ok_or(ResponseError::UnknownRequest)?;
    Ok(Action::PayCost(PayCostAction {
        player: request.player,
        cost: base,
        source,
        target,
        dice: dice.to_vec(),
    }))
}

fn translate(
    game: &GameState,
    request: &Request,
    answer: &ResponseKind,
) -> Result<Vec<Action>, ResponseError> {
    let player = request.player;
    let table = game.table(player);
    let actions = match (&request.kind, answer) {
        (RequestKind::SwitchCard, ResponseKind::SwitchCard { cards }) => {
            check_choices(cards, table.hand.len())?;
            if cards.is_empty() {
                return Ok(Vec::new());
            }
            let returned: Vec<_> = cards.iter().map(|index| &table.hand[*index]).collect();
            vec![
                Action::RestoreCards(RestoreCardsAction {
                    player,
                    cards: returned.iter().map(|card| card.id).collect(),
                }),
                Action::DrawCards(DrawCardsAction {
                    player,
                    count: returned.len(),
                    blacklist: returned.iter().map(|card| card.name()).collect(),
                }),
            ]
        }
        (RequestKind::ChooseCharacter { candidates }, ResponseKind::ChooseCharacter { character }) => {
            vec![Action::ChooseCharacter(ChooseCharacterAction {
                player,
                character: pick(candidates, *character)?,
            })]
        }
        (RequestKind::RerollDice { remaining }, ResponseKind::RerollDice { dice }) => {
            check_choices(dice, table.dice.len())?;
            // Keeping every die ends the reroll phase for this player.
            let remaining = if dice.is_empty() {
                0
            } else {
                remaining.saturating_sub(1)
            };
            vec![Action::RerollDice(RerollDiceAction {
                player,
                dice: dice.clone(),
                remaining,
            })]
        }
        (RequestKind::SwitchCharacter { character, .. }, ResponseKind::SwitchCharacter { dice }) => {
            let from = table
                .active_character()
                .map(|active| active.position)
                .ok_or(ResponseError::UnknownRequest)?;
            let target = table.characters.get(*character).map(|c| c.position);
            vec![
                payment(game, request, dice, target)?,
                Action::SwitchCharacter(SwitchCharacterAction {
                    player,
                    character: *character,
                }),
                Action::CombatAction(CombatActionAction {
                    player,
                    action_type: CombatActionType::Switch,
                    position: from,
                }),
            ]
        }
        (RequestKind::ElementalTuning { dice, cards }, ResponseKind::ElementalTuning { die, card }) => {
            vec![Action::ElementalTuning(ElementalTuningAction {
                player,
                die: pick(dice, *die)?,
                card: pick(cards, *card)?,
            })]
        }
        (RequestKind::DeclareRoundEnd, ResponseKind::DeclareRoundEnd) => {
            vec![Action::DeclareRoundEnd(DeclareRoundEndAction { player })]
        }
        (RequestKind::UseSkill { position, .. }, ResponseKind::UseSkill { dice }) => vec![
            payment(game, request, dice, None)?,
            Action::UseSkill(UseSkillAction {
                position: *position,
            }),
        ],
        (RequestKind::UseCard { position, targets, .. }, ResponseKind::UseCard { dice, target }) => {
            let target = match (targets.is_empty(), target) {
                (true, _) => None,
                (false, None) => return Err(ResponseError::TargetRequired),
                (false, Some(index)) => Some(pick(targets, *index)?),
            };
            vec![
                payment(game, request, dice, None)?,
                Action::UseCard(UseCardAction {
                    position: *position,
                    target,
                }),
            ]
        }
        _ => {
            return Err(ResponseError::KindMismatch {
                request: request.kind.as_ref().to_string(),
                response: answer.as_ref().to_string(),
            });
        }
    };
    Ok(actions)
}
