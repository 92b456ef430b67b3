//! Action cards.

use crate::action::{
    Action, ActionError, DrawCardsAction, MoveObjectAction, RemoveObjectAction, UseSkillAction,
};
use crate::config::MatchConfig;
use crate::state::{
    Area, Card, Character, Cost, CostLabels, Element, GameState, Position, PositionCheck, Version,
};

use super::equipment::artifact_name;
use super::{EquipmentKind, ObjectKind, SupportKind, TalentKind, V3_3, V4_0, WeaponType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardKind {
    Strategize,
    Paimon,
    MagicGuide,
    SmallElementalArtifact(Element),
    Talent(TalentKind),
}

impl CardKind {
    pub fn all() -> impl Iterator<Item = CardKind> {
        let artifacts = Element::ALL
            .into_iter()
            .map(CardKind::SmallElementalArtifact);
        let talents = TalentKind::ALL.into_iter().map(CardKind::Talent);
        [CardKind::Strategize, CardKind::Paimon, CardKind::MagicGuide]
            .into_iter()
            .chain(artifacts)
            .chain(talents)
    }

    pub fn name(self) -> &'static str {
        match self {
            CardKind::Strategize => "Strategize",
            CardKind::Paimon => "Paimon",
            CardKind::MagicGuide => "Magic Guide",
            CardKind::SmallElementalArtifact(element) => artifact_name(element),
            CardKind::Talent(talent) => talent.name(),
        }
    }

    pub fn versions(self) -> &'static [Version] {
        match self {
            CardKind::SmallElementalArtifact(_) => &[V3_3, V4_0],
            CardKind::Talent(talent) => talent.versions(),
            _ => &[V3_3],
        }
    }

    /// Printed cost of `version` of the card.
    pub fn cost(self, version: Version) -> Cost {
        match self {
            CardKind::Strategize => Cost::new(CostLabels::CARD | CostLabels::EVENT).any(1),
            CardKind::Paimon => Cost::new(CostLabels::CARD | CostLabels::SUPPORT).same(3),
            CardKind::MagicGuide => Cost::new(CostLabels::CARD | CostLabels::WEAPON).same(2),
            CardKind::SmallElementalArtifact(_) if version >= V4_0 => {
                Cost::new(CostLabels::CARD | CostLabels::ARTIFACT).any(2)
            }
            CardKind::SmallElementalArtifact(_) => {
                Cost::new(CostLabels::CARD | CostLabels::ARTIFACT).same(2)
            }
            CardKind::Talent(talent) => talent.cost(),
        }
    }

    /// Event cards are discarded when played.
    pub fn is_event(self) -> bool {
        matches!(self, CardKind::Strategize)
    }

    /// Board object the card turns into, if it stays on the board.
    pub fn object_kind(self) -> Option<ObjectKind> {
        match self {
            CardKind::Strategize => None,
            CardKind::Paimon => Some(ObjectKind::Support(SupportKind::Paimon)),
            CardKind::MagicGuide => Some(ObjectKind::Equipment(EquipmentKind::MagicGuide)),
            CardKind::SmallElementalArtifact(element) => Some(ObjectKind::Equipment(
                EquipmentKind::SmallElementalArtifact(element),
            )),
            CardKind::Talent(talent) => Some(ObjectKind::Equipment(EquipmentKind::Talent(talent))),
        }
    }

    /// Characters the card may be aimed at.
    ///
    /// `None` means the card cannot be played right now; an empty list means
    /// it is playable without a target.
    pub fn targets(self, player: usize, game: &GameState) -> Option<Vec<Position>> {
        let table = game.table(player);
        let alive = |filter: &dyn Fn(&Character) -> bool| -> Option<Vec<Position>> {
            let targets: Vec<Position> = table
                .characters
                .iter()
                .filter(|character| character.alive && filter(character))
                .map(|character| character.position)
                .collect();
            (!targets.is_empty()).then_some(targets)
        };
        match self {
            CardKind::Strategize => Some(Vec::new()),
            CardKind::Paimon => {
                (table.supports.len() < MatchConfig::MAX_SUPPORTS).then(Vec::new)
            }
            CardKind::MagicGuide => {
                alive(&|character| character.kind.weapon_type() == WeaponType::Catalyst)
            }
            CardKind::SmallElementalArtifact(_) => alive(&|_| true),
            CardKind::Talent(talent) => {
                let active = table.active_character()?;
                (active.kind == talent.character() && active.alive && !active.is_stunned())
                    .then(Vec::new)
            }
        }
    }
}

/// Effects of playing `card`, aimed at `target` when the card needs one.
pub fn card_actions(
    card: &Card,
    target: Option<Position>,
    game: &GameState,
) -> Result<Vec<Action>, ActionError> {
    let player = card.position.player;
    let equip_target = || -> Result<Position, ActionError> {
        let target = target.ok_or(ActionError::InvalidDestination {
            position: card.position,
        })?;
        let character = game
            .character(&target)
            .filter(|character| {
                character.alive && card.position.check(&target, game, PositionCheck::SAME_PLAYER)
            })
            .ok_or(ActionError::InvalidDestination { position: target })?;
        Ok(character.position)
    };

    let actions = match card.kind {
        CardKind::Strategize => vec![Action::DrawCards(DrawCardsAction::new(player, 2))],
        CardKind::Paimon => vec![Action::MoveObject(MoveObjectAction {
            from: card.position,
            to: Position::zone(player, Area::Support),
        })],
        CardKind::MagicGuide | CardKind::SmallElementalArtifact(_) => {
            let target = equip_target()?;
            let character = game
                .character(&target)
                .ok_or(ActionError::InvalidDestination { position: target })?;
            let replaced = if card.kind == CardKind::MagicGuide {
                character.weapon.as_ref()
            } else {
                character.artifact.as_ref()
            };
            equip(card, replaced.map(|object| object.position), target)
        }
        CardKind::Talent(talent) => {
            let character = game
                .table(player)
                .active_character()
                .filter(|character| character.kind == talent.character())
                .ok_or(ActionError::NoActiveCharacter { player })?;
            let skill = character
                .skill_of_kind(talent.skill())
                .ok_or(ActionError::InvalidSkill {
                    position: character.position,
                })?;
            let mut actions = equip(
                card,
                character.talent.as_ref().map(|object| object.position),
                character.position,
            );
            actions.push(Action::UseSkill(UseSkillAction {
                position: skill.position,
            }));
            actions
        }
    };
    Ok(actions)
}

fn equip(card: &Card, replaced: Option<Position>, character: Position) -> Vec<Action> {
    let mut actions = Vec::new();
    if let Some(position) = replaced {
        actions.push(Action::RemoveObject(RemoveObjectAction { position }));
    }
    actions.push(Action::MoveObject(MoveObjectAction {
        from: card.position,
        to: Position::character_zone(
            character.player,
            Area::Character,
            character.character.unwrap_or_default(),
        ),
    }));
    actions
}
