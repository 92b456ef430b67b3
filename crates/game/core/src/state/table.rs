use arrayvec::ArrayVec;

use super::{Card, Character, DieColor, Element, Object, ObjectId};
use crate::config::MatchConfig;

/// One player's side of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerTable {
    pub player: usize,
    /// Active character slot. Points at a defeated character only while its
    /// owner is being asked to choose a replacement.
    pub active: Option<usize>,
    pub has_round_ended: bool,
    pub characters: Vec<Character>,
    pub hand: Vec<Card>,
    /// Draw pile; the next card drawn is the first element.
    pub deck: Vec<Card>,
    pub discarded: Vec<Card>,
    /// Dice pool, kept sorted by [`PlayerTable::dice_color_order`].
    pub dice: Vec<DieColor>,
    pub team_statuses: Vec<Object>,
    pub summons: ArrayVec<Object, { MatchConfig::MAX_SUMMONS }>,
    pub supports: ArrayVec<Object, { MatchConfig::MAX_SUPPORTS }>,
}

impl PlayerTable {
    pub fn new(player: usize) -> Self {
        Self {
            player,
            active: None,
            has_round_ended: false,
            characters: Vec::new(),
            hand: Vec::new(),
            deck: Vec::new(),
            discarded: Vec::new(),
            dice: Vec::new(),
            team_statuses: Vec::new(),
            summons: ArrayVec::new(),
            supports: ArrayVec::new(),
        }
    }

    pub fn active_character(&self) -> Option<&Character> {
        self.active.and_then(|slot| self.characters.get(slot))
    }

    pub fn active_character_mut(&mut self) -> Option<&mut Character> {
        self.active.and_then(|slot| self.characters.get_mut(slot))
    }

    /// True when the active slot holds a defeated character.
    pub fn needs_new_active(&self) -> bool {
        self.active_character().is_some_and(Character::is_defeated)
    }

    pub fn alive_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.characters
            .iter()
            .enumerate()
            .filter(|(_, character)| character.alive)
            .map(|(slot, _)| slot)
    }

    pub fn all_defeated(&self) -> bool {
        !self.characters.is_empty() && self.characters.iter().all(Character::is_defeated)
    }

    /// Next alive slot after `from`, wrapping around. `None` when `from` is
    /// the only one left.
    pub fn next_alive(&self, from: usize) -> Option<usize> {
        let count = self.characters.len();
        (1..count)
            .map(|offset| (from + offset) % count)
            .find(|slot| self.characters[*slot].alive)
    }

    pub fn hand_index(&self, id: ObjectId) -> Option<usize> {
        self.hand.iter().position(|card| card.id == id)
    }

    /// Omni first, then the active character's element, then the other
    /// characters' elements, then the remaining elements in default order.
    pub fn dice_color_order(&self) -> Vec<DieColor> {
        let mut order = vec![DieColor::Omni];
        let mut push = |color: DieColor| {
            if !order.contains(&color) {
                order.push(color);
            }
        };
        if let Some(active) = self.active_character() {
            push(active.element.die_color());
        }
        for character in &self.characters {
            push(character.element.die_color());
        }
        for element in Element::ALL {
            push(element.die_color());
        }
        order
    }

    pub fn sort_dice(&mut self) {
        let order = self.dice_color_order();
        self.dice
            .sort_by_key(|die| order.iter().position(|color| color == die));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dice_sort_puts_omni_first() {
        let mut table = PlayerTable::new(0);
        table.dice = vec![
            DieColor::Anemo,
            DieColor::Cryo,
            DieColor::Omni,
            DieColor::Pyro,
            DieColor::Omni,
        ];
        table.sort_dice();
        assert_eq!(
            table.dice,
            vec![
                DieColor::Omni,
                DieColor::Omni,
                DieColor::Cryo,
                DieColor::Pyro,
                DieColor::Anemo,
            ]
        );
    }

    #[test]
    fn empty_table_is_not_defeated() {
        let table = PlayerTable::new(1);
        assert!(!table.all_defeated());
        assert_eq!(table.next_alive(0), None);
    }
}
