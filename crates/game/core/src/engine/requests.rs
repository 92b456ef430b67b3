//! Choices offered to the player whose turn it is.

use crate::interaction::{Request, RequestKind};
use crate::modifier;
use crate::state::{Cost, CostLabels, DieColor, GameState, Position};

/// Printed cost of switching the active character.
pub const SWITCH_COST: Cost = Cost::new(CostLabels::SWITCH_CHARACTER).any(1);

/// Every legal action-phase choice for `player`, with `TEST`-mode costs.
///
/// Nothing here mutates state: costs are previews and the same state always
/// yields the same list.
pub(crate) fn action_phase_requests(game: &GameState, player: usize) -> Vec<Request> {
    let table = game.table(player);
    let Some(active) = table.active_character().filter(|character| character.alive) else {
        return Vec::new();
    };
    let mut requests = Vec::new();

    for character in table.characters.iter().filter(|c| c.alive && c.id != active.id) {
        let cost = modifier::preview_cost(game, SWITCH_COST, active.position, Some(character.position));
        if cost.is_payable(&table.dice, u32::MAX) {
            requests.push(Request::new(
                player,
                RequestKind::SwitchCharacter {
                    character: character.position.character.unwrap_or_default(),
                    cost,
                },
            ));
        }
    }

    let tunable: Vec<usize> = table
        .dice
        .iter()
        .enumerate()
        .filter(|(_, die)| **die != DieColor::Omni && **die != active.element.die_color())
        .map(|(index, _)| index)
        .collect();
    if !tunable.is_empty() && !table.hand.is_empty() {
        requests.push(Request::new(
            player,
            RequestKind::ElementalTuning {
                dice: tunable,
                cards: table.hand.iter().map(|card| card.id).collect(),
            },
        ));
    }

    requests.push(Request::new(player, RequestKind::DeclareRoundEnd));

    if !active.is_stunned() {
        for skill in active.skills.iter().filter(|skill| !skill.is_passive()) {
            let cost = modifier::preview_cost(game, skill.kind.cost(), skill.position, None);
            if cost.is_payable(&table.dice, active.charge) {
                requests.push(Request::new(
                    player,
                    RequestKind::UseSkill {
                        character: active.position.character.unwrap_or_default(),
                        skill: skill.kind,
                        position: skill.position,
                        cost,
                    },
                ));
            }
        }
    }

    for card in &table.hand {
        let Some(targets) = card.kind.targets(player, game) else {
            continue;
        };
        let cost = modifier::preview_cost(game, card.kind.cost(card.version), card.position, None);
        if cost.is_payable(&table.dice, active.charge) {
            requests.push(Request::new(
                player,
                RequestKind::UseCard {
                    card: card.kind,
                    position: card.position,
                    cost,
                    targets,
                },
            ));
        }
    }

    tracing::debug!(
        target: "tcg::engine",
        player,
        count = requests.len(),
        round = game.round,
        "action requests issued"
    );
    requests
}

/// Choose-character request listing every alive slot.
pub(crate) fn choose_character(game: &GameState, player: usize) -> Option<Request> {
    let candidates: Vec<usize> = game.table(player).alive_slots().collect();
    (!candidates.is_empty())
        .then(|| Request::new(player, RequestKind::ChooseCharacter { candidates }))
}

/// Base cost of whatever `request` pays for, before modifiers.
pub(crate) fn base_cost(game: &GameState, kind: &RequestKind) -> Option<Cost> {
    match kind {
        RequestKind::SwitchCharacter { .. } => Some(SWITCH_COST),
        RequestKind::UseSkill { skill, .. } => Some(skill.cost()),
        RequestKind::UseCard { position, .. } => {
            game.card(position).map(|card| card.kind.cost(card.version))
        }
        _ => None,
    }
}

/// Position paying for a request, as seen by cost modifiers.
pub(crate) fn cost_source(game: &GameState, player: usize, kind: &RequestKind) -> Option<Position> {
    match kind {
        RequestKind::SwitchCharacter { .. } => {
            game.table(player).active_character().map(|character| character.position)
        }
        RequestKind::UseSkill { position, .. } | RequestKind::UseCard { position, .. } => {
            Some(*position)
        }
        _ => None,
    }
}
