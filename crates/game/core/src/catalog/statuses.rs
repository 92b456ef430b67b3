//! Character and team statuses.

use crate::action::{Action, ChangeObjectUsageAction, MakeDamageAction, RemoveObjectAction};
use crate::combat::DamageValue;
use crate::event::Event;
use crate::hooks::{HookCommit, HookContext};
use crate::modifier::ModifiableValue;
use crate::state::{
    Area, DamageElement, Element, GameState, Object, PositionCheck, Usage, Version,
};

use super::{CharacterKind, V3_3, V3_4, V3_7};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Stuns the character; pyro and physical hits break it for +2.
    Frozen,
    /// Nahida's mark; reactions on a marked character ping every mark.
    SeedOfSkandha,
    CatalyzingField,
    DendroCore,
    /// Shield from the crystallize reaction.
    Crystallize,
    /// Mona's burst: doubles the next skill damage.
    IllusoryBubble,
    /// Bennett's burst field.
    InspirationField,
}

impl StatusKind {
    pub const ALL: [StatusKind; 7] = [
        StatusKind::Frozen,
        StatusKind::SeedOfSkandha,
        StatusKind::CatalyzingField,
        StatusKind::DendroCore,
        StatusKind::Crystallize,
        StatusKind::IllusoryBubble,
        StatusKind::InspirationField,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StatusKind::Frozen => "Frozen",
            StatusKind::SeedOfSkandha => "Seed of Skandha",
            StatusKind::CatalyzingField => "Catalyzing Field",
            StatusKind::DendroCore => "Dendro Core",
            StatusKind::Crystallize => "Crystallize",
            StatusKind::IllusoryBubble => "Illusory Bubble",
            StatusKind::InspirationField => "Inspiration Field",
        }
    }

    pub fn versions(self) -> &'static [Version] {
        match self {
            StatusKind::CatalyzingField => &[V3_4],
            StatusKind::SeedOfSkandha => &[V3_7],
            _ => &[V3_3],
        }
    }

    pub fn usage(self) -> Usage {
        match self {
            StatusKind::Frozen | StatusKind::DendroCore | StatusKind::IllusoryBubble => {
                Usage::full(1)
            }
            StatusKind::Crystallize => Usage::new(1, 2),
            StatusKind::SeedOfSkandha
            | StatusKind::CatalyzingField
            | StatusKind::InspirationField => Usage::full(2),
        }
    }

    /// Attached to a single character rather than the whole team.
    pub fn is_character_status(self) -> bool {
        matches!(self, StatusKind::Frozen | StatusKind::SeedOfSkandha)
    }
}

/// Damage from the status owner's side aimed at the opposing active character.
fn is_own_attack(object: &Object, damage: &DamageValue, game: &GameState) -> bool {
    object.position.check(&damage.source, game, PositionCheck::SAME_PLAYER)
        && object.position.check(&damage.target, game, PositionCheck::ACTIVE_ENEMY)
        && !damage.is_heal()
}

fn damage_of_skill(object: &Object, damage: &DamageValue, game: &GameState) -> bool {
    damage.source.area == Area::Skill && is_own_attack(object, damage, game)
}

pub(super) fn modify_value(
    kind: StatusKind,
    object: &Object,
    value: &mut ModifiableValue,
    ctx: &HookContext<'_>,
) -> Option<HookCommit> {
    if object.usage.current == 0 {
        return None;
    }
    let game = ctx.game;
    match (kind, value) {
        (StatusKind::Frozen, ModifiableValue::DamageIncrease(damage))
            if !damage.is_heal()
                && object.position.check(&damage.target, game, PositionCheck::SAME_CHARACTER)
                && matches!(damage.element, DamageElement::Pyro | DamageElement::Physical) =>
        {
            damage.damage += 2;
            Some(HookCommit::ConsumeUsage(1))
        }
        (StatusKind::CatalyzingField, ModifiableValue::DamageIncrease(damage))
            if matches!(damage.element, DamageElement::Dendro | DamageElement::Electro)
                && is_own_attack(object, damage, game) =>
        {
            damage.damage += 1;
            Some(HookCommit::ConsumeUsage(1))
        }
        (StatusKind::DendroCore, ModifiableValue::DamageIncrease(damage))
            if matches!(damage.element, DamageElement::Electro | DamageElement::Pyro)
                && is_own_attack(object, damage, game) =>
        {
            damage.damage += 2;
            Some(HookCommit::ConsumeUsage(1))
        }
        (StatusKind::InspirationField, ModifiableValue::DamageIncrease(damage))
            if damage_of_skill(object, damage, game) =>
        {
            let strong = game
                .character(&damage.source)
                .is_some_and(|character| character.hp >= 7);
            if strong || object.talent_activated {
                damage.damage += 2;
            }
            None
        }
        (StatusKind::IllusoryBubble, ModifiableValue::DamageMultiply(damage))
            if damage_of_skill(object, damage, game) =>
        {
            damage.damage *= 2;
            Some(HookCommit::ConsumeUsage(1))
        }
        (StatusKind::Crystallize, ModifiableValue::DamageDecrease(damage))
            if object.position.check(&damage.target, game, PositionCheck::OWN_ACTIVE)
                && !damage.is_heal()
                && !damage.is_piercing() =>
        {
            let absorbed = damage.reduce(object.usage.current);
            (absorbed > 0).then_some(HookCommit::ConsumeUsage(absorbed))
        }
        _ => None,
    }
}

pub(super) fn on_event(
    kind: StatusKind,
    object: &Object,
    event: &Event,
    game: &GameState,
) -> Vec<Action> {
    match (kind, event) {
        (StatusKind::Frozen, Event::RoundEnd { .. }) => {
            vec![Action::RemoveObject(RemoveObjectAction {
                position: object.position,
            })]
        }
        (StatusKind::InspirationField, Event::RoundEnd { .. }) => {
            vec![Action::ChangeObjectUsage(ChangeObjectUsageAction::delta(
                object.position,
                -1,
            ))]
        }
        (StatusKind::InspirationField, Event::SkillEnd { player, position, .. })
            if object.position.check(position, game, PositionCheck::SAME_PLAYER) =>
        {
            match game.character(position) {
                Some(character) if character.alive && character.hp <= 6 => {
                    vec![Action::MakeDamage(MakeDamageAction::single(
                        *player,
                        DamageValue::heal(object.position, character.position, 2),
                    ))]
                }
                _ => Vec::new(),
            }
        }
        (StatusKind::SeedOfSkandha, Event::ReceiveDamage { damage, .. })
            if damage.reaction.is_some()
                && !damage.is_heal()
                && object.position.check(&damage.target, game, PositionCheck::SAME_CHARACTER) =>
        {
            seed_burst(object, game)
        }
        _ => Vec::new(),
    }
}

/// Every seed on the marked side spends one usage and pierces its carrier.
fn seed_burst(object: &Object, game: &GameState) -> Vec<Action> {
    let player = object.position.player;
    let enemy = game.table(1 - player);
    let enemy_has_pyro = enemy
        .characters
        .iter()
        .any(|character| character.element == Element::Pyro);
    let enemy_has_talent = enemy
        .characters
        .iter()
        .any(|character| character.kind == CharacterKind::Nahida && character.talent.is_some());
    let element = if enemy_has_pyro && enemy_has_talent {
        DamageElement::Dendro
    } else {
        DamageElement::Piercing
    };

    let mut actions = Vec::new();
    for character in &game.table(player).characters {
        for seed in character
            .statuses
            .iter()
            .filter(|status| status.kind == object.kind && status.usage.current > 0)
        {
            actions.push(Action::ChangeObjectUsage(ChangeObjectUsageAction::delta(
                seed.position,
                -1,
            )));
            actions.push(Action::MakeDamage(MakeDamageAction::single(
                player,
                DamageValue::damage(seed.position, character.position, element, 1),
            )));
        }
    }
    actions
}
