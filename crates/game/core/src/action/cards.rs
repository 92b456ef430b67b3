//! Hand and deck actions.

use crate::catalog;
use crate::event::Event;
use crate::state::{Area, GameState, ObjectId, Position};

use super::{ActionError, ActionOutcome, ActionTransition};

/// Draws from the top of the deck, skipping `blacklist` names while any
/// other card is left. Cards drawn into a full hand are discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawCardsAction {
    pub player: usize,
    pub count: usize,
    pub blacklist: Vec<String>,
}

impl DrawCardsAction {
    pub fn new(player: usize, count: usize) -> Self {
        Self {
            player,
            count,
            blacklist: Vec::new(),
        }
    }
}

impl ActionTransition for DrawCardsAction {
    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let max_hand = state.config.max_hand_size;
        let table = state.table_mut(self.player);
        let mut drawn = 0;
        for _ in 0..self.count {
            if table.deck.is_empty() {
                break;
            }
            let index = table
                .deck
                .iter()
                .position(|card| !self.blacklist.contains(&card.name()))
                .unwrap_or(0);
            let mut card = table.deck.remove(index);
            card.position = card.position.with_area(Area::Hand);
            if table.hand.len() >= max_hand {
                tracing::debug!(
                    target: "tcg::action",
                    player = self.player,
                    card = %card.name(),
                    "hand full, card discarded"
                );
                table.discarded.push(card);
            } else {
                table.hand.push(card);
            }
            drawn += 1;
        }
        Ok(ActionOutcome::event(Event::DrawCard {
            player: self.player,
            count: drawn,
        }))
    }
}

/// Returns hand cards to random places in the deck.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestoreCardsAction {
    pub player: usize,
    pub cards: Vec<ObjectId>,
}

impl ActionTransition for RestoreCardsAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let table = state.table(self.player);
        for id in &self.cards {
            if table.hand_index(*id).is_none() {
                return Err(ActionError::CardNotInHand {
                    position: Position::zone(self.player, Area::Hand).with_id(*id),
                });
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        for id in &self.cards {
            let table = state.table_mut(self.player);
            let index = table.hand_index(*id).ok_or(ActionError::CardNotInHand {
                position: Position::zone(self.player, Area::Hand).with_id(*id),
            })?;
            let mut card = table.hand.remove(index);
            card.position = card.position.with_area(Area::Deck);
            let deck_len = table.deck.len();
            let slot = state.rng.below(deck_len + 1);
            state.table_mut(self.player).deck.insert(slot, card);
        }
        Ok(ActionOutcome::none())
    }
}

/// Plays the hand card at `position`.
///
/// Event cards go to the discard pile here. Cards that stay on the board
/// (equipment, supports, talents) are moved by a follow-up and keep their id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseCardAction {
    pub position: Position,
    pub target: Option<Position>,
}

impl ActionTransition for UseCardAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        match state.card(&self.position) {
            Some(_) if self.position.area == Area::Hand => Ok(()),
            _ => Err(ActionError::CardNotInHand {
                position: self.position,
            }),
        }
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let card = state
            .card(&self.position)
            .cloned()
            .ok_or(ActionError::CardNotInHand {
                position: self.position,
            })?;
        let follow_ups = catalog::card_actions(&card, self.target, state)?;
        if card.kind.is_event() {
            let table = state.table_mut(self.position.player);
            if let Some(index) = table.hand_index(card.id) {
                let mut used = table.hand.remove(index);
                used.position = used.position.with_area(Area::Invalid);
                table.discarded.push(used);
            }
        }
        tracing::debug!(
            target: "tcg::action",
            player = self.position.player,
            card = %card.name(),
            "card used"
        );
        Ok(ActionOutcome::event(Event::UseCard {
            player: self.position.player,
            position: self.position,
            card: card.kind,
        })
        .with_follow_ups(follow_ups))
    }
}

/// Discards a hand card to turn one die into the active character's element.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementalTuningAction {
    pub player: usize,
    pub die: usize,
    pub card: ObjectId,
}

impl ActionTransition for ElementalTuningAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let table = state.table(self.player);
        if self.die >= table.dice.len() {
            return Err(ActionError::DieIndexOutOfRange {
                player: self.player,
                index: self.die,
            });
        }
        if table.hand_index(self.card).is_none() {
            return Err(ActionError::CardNotInHand {
                position: Position::zone(self.player, Area::Hand).with_id(self.card),
            });
        }
        if table.active_character().is_none() {
            return Err(ActionError::NoActiveCharacter {
                player: self.player,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let table = state.table_mut(self.player);
        let color = table
            .active_character()
            .map(|character| character.element.die_color())
            .ok_or(ActionError::NoActiveCharacter {
                player: self.player,
            })?;
        let index = table
            .hand_index(self.card)
            .ok_or(ActionError::CardNotInHand {
                position: Position::zone(self.player, Area::Hand).with_id(self.card),
            })?;
        let mut card = table.hand.remove(index);
        card.position = card.position.with_area(Area::Invalid);
        table.discarded.push(card);
        table.dice[self.die] = color;
        table.sort_dice();
        Ok(ActionOutcome::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardKind;
    use crate::config::MatchConfig;
    use crate::state::{Card, Version};

    fn state_with_deck(names: &[CardKind]) -> GameState {
        let mut state = GameState::new(MatchConfig::new(), 3);
        for kind in names {
            let id = state.allocate_id();
            let card = Card {
                id,
                position: Position::zone(0, Area::Deck).with_id(id),
                kind: *kind,
                version: Version::new(4, 0),
            };
            state.table_mut(0).deck.push(card);
        }
        state
    }

    #[test]
    fn draw_skips_blacklisted_names_when_possible() {
        let mut state = state_with_deck(&[CardKind::Strategize, CardKind::Paimon, CardKind::Strategize]);
        let action = DrawCardsAction {
            player: 0,
            count: 2,
            blacklist: vec!["Strategize".to_string()],
        };
        action.apply(&mut state).expect("draw");
        let hand: Vec<String> = state.table(0).hand.iter().map(|card| card.name()).collect();
        assert_eq!(hand, ["Paimon", "Strategize"]);
        assert!(state.table(0).hand.iter().all(|card| card.position.area == Area::Hand));
    }

    #[test]
    fn overdraw_is_discarded() {
        let mut state = state_with_deck(&[CardKind::Strategize; 4]);
        state.config.max_hand_size = 2;
        let outcome = DrawCardsAction::new(0, 4).apply(&mut state).expect("draw");
        assert_eq!(state.table(0).hand.len(), 2);
        assert_eq!(state.table(0).discarded.len(), 2);
        assert_eq!(
            outcome.events,
            vec![Event::DrawCard {
                player: 0,
                count: 4
            }]
        );
    }

    #[test]
    fn restore_puts_cards_back_into_deck() {
        let mut state = state_with_deck(&[CardKind::Strategize, CardKind::Paimon]);
        DrawCardsAction::new(0, 2).apply(&mut state).expect("draw");
        let ids: Vec<ObjectId> = state.table(0).hand.iter().map(|card| card.id).collect();
        RestoreCardsAction { player: 0, cards: ids }
            .apply(&mut state)
            .expect("restore");
        assert!(state.table(0).hand.is_empty());
        assert_eq!(state.table(0).deck.len(), 2);
    }
}
