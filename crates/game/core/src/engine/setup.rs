//! Table construction at match start.

use crate::action::{Action, DrawCardsAction};
use crate::catalog::{CardKind, CharacterKind};
use crate::deck::{Deck, ResolvedDeck};
use crate::state::{
    Area, Card, Character, GameState, Phase, Position, Skill, Version,
};

use super::errors::StartError;
use super::GameEngine;

/// Builds a full-health character in `slot`, assigning ids to it and its
/// skills.
pub(crate) fn build_character(
    state: &mut GameState,
    player: usize,
    slot: usize,
    kind: CharacterKind,
    version: Version,
) -> Character {
    let id = state.allocate_id();
    let skills = kind
        .skills()
        .into_iter()
        .map(|skill| {
            let skill_id = state.allocate_id();
            Skill {
                id: skill_id,
                position: Position::new(player, Area::Skill, Some(slot), skill_id),
                kind: skill,
                usage: skill.initial_usage(),
            }
        })
        .collect();
    Character {
        id,
        position: Position::new(player, Area::Character, Some(slot), id),
        kind,
        version,
        element: kind.element(),
        hp: kind.max_hp(),
        max_hp: kind.max_hp(),
        charge: 0,
        max_charge: kind.max_charge(),
        aura: Vec::new(),
        alive: true,
        skills,
        weapon: None,
        artifact: None,
        talent: None,
        statuses: Vec::new(),
    }
}

pub(crate) fn build_card(
    state: &mut GameState,
    player: usize,
    kind: CardKind,
    version: Version,
) -> Card {
    let id = state.allocate_id();
    Card {
        id,
        position: Position::new(player, Area::Deck, None, id),
        kind,
        version,
    }
}

fn build_table(state: &mut GameState, player: usize, deck: &ResolvedDeck) {
    let characters: Vec<Character> = deck
        .characters
        .iter()
        .enumerate()
        .map(|(slot, (kind, version))| build_character(state, player, slot, *kind, *version))
        .collect();
    let mut cards: Vec<Card> = deck
        .cards
        .iter()
        .map(|(kind, version)| build_card(state, player, *kind, *version))
        .collect();
    state.rng.shuffle(&mut cards);
    let table = state.table_mut(player);
    table.characters = characters;
    table.deck = cards;
}

impl GameEngine<'_> {
    /// Validates both decks, builds the tables and queues the opening draws.
    ///
    /// On error the state is left exactly as it was.
    pub fn start(&mut self, decks: &[Deck; 2]) -> Result<(), StartError> {
        if self.state.phase != Phase::Idle {
            return Err(StartError::AlreadyStarted {
                phase: self.state.phase,
            });
        }
        let mut resolved = Vec::with_capacity(2);
        for (player, deck) in decks.iter().enumerate() {
            deck.validate(&self.state.config)
                .map_err(|error| StartError::Deck { player, error })?;
            let deck = deck
                .resolve()
                .map_err(|error| StartError::Catalog { player, error })?;
            resolved.push(deck);
        }

        for (player, deck) in resolved.iter().enumerate() {
            build_table(self.state, player, deck);
        }
        let first = if self.state.config.random_first_player {
            self.state.rng.below(2)
        } else {
            0
        };
        self.state.first_player = first;
        self.state.current_player = first;
        let hand = self.state.config.initial_hand_size;
        for player in [first, 1 - first] {
            self.state
                .queue
                .push_back(Action::DrawCards(DrawCardsAction::new(player, hand)));
        }
        self.state.enter_phase(Phase::Starting);
        tracing::debug!(
            target: "tcg::engine",
            seed = self.state.seed,
            first_player = first,
            objects = self.state.last_id,
            "match started"
        );
        Ok(())
    }
}
