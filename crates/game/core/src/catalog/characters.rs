//! Characters and their skills.

use core::str::FromStr;

use crate::action::{
    Action, ChangeObjectUsageAction, ChargeAction, CreateObjectAction, MakeDamageAction,
};
use crate::combat::DamageValue;
use crate::event::Event;
use crate::hooks::{HookCommit, HookContext};
use crate::modifier::{CombatActionType, ModifiableValue};
use crate::state::{
    Area, Cost, CostLabels, DamageElement, Element, GameState, Position, PositionCheck, Skill,
    SkillType, Usage, Version,
};

use super::{ObjectKind, StatusKind, SummonKind, V3_3, V3_7};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponType {
    Sword,
    Catalyst,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    /// Generic fighter: physical normal attack.
    Mob(Element),
    /// Generic caster: elemental normal attack.
    MobMage(Element),
    Bennett,
    Mona,
    Nahida,
}

impl CharacterKind {
    pub fn name(self) -> String {
        match self {
            CharacterKind::Mob(element) => format!("{}Mob", element.title()),
            CharacterKind::MobMage(element) => format!("{}MobMage", element.title()),
            CharacterKind::Bennett => "Bennett".to_string(),
            CharacterKind::Mona => "Mona".to_string(),
            CharacterKind::Nahida => "Nahida".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Bennett" => return Some(CharacterKind::Bennett),
            "Mona" => return Some(CharacterKind::Mona),
            "Nahida" => return Some(CharacterKind::Nahida),
            _ => {}
        }
        if let Some(element) = name.strip_suffix("MobMage") {
            return Element::from_str(element).ok().map(CharacterKind::MobMage);
        }
        let element = name.strip_suffix("Mob")?;
        Element::from_str(element).ok().map(CharacterKind::Mob)
    }

    pub fn versions(self) -> &'static [Version] {
        match self {
            CharacterKind::Nahida => &[V3_7],
            _ => &[V3_3],
        }
    }

    pub fn element(self) -> Element {
        match self {
            CharacterKind::Mob(element) | CharacterKind::MobMage(element) => element,
            CharacterKind::Bennett => Element::Pyro,
            CharacterKind::Mona => Element::Hydro,
            CharacterKind::Nahida => Element::Dendro,
        }
    }

    pub fn weapon_type(self) -> WeaponType {
        match self {
            CharacterKind::Mob(_) | CharacterKind::Bennett => WeaponType::Sword,
            CharacterKind::MobMage(_) | CharacterKind::Mona | CharacterKind::Nahida => {
                WeaponType::Catalyst
            }
        }
    }

    pub const fn max_hp(self) -> u32 {
        10
    }

    pub fn max_charge(self) -> u32 {
        match self {
            CharacterKind::Mona => 3,
            _ => 2,
        }
    }

    /// Skills in slot order.
    pub fn skills(self) -> Vec<SkillKind> {
        match self {
            CharacterKind::Mob(element) => vec![
                SkillKind::PhysicalNormalAttack(element),
                SkillKind::ElementalSkill(element),
                SkillKind::ElementalBurst(element),
            ],
            CharacterKind::MobMage(element) => vec![
                SkillKind::ElementalNormalAttack(element),
                SkillKind::ElementalSkill(element),
                SkillKind::ElementalBurst(element),
            ],
            CharacterKind::Bennett => vec![
                SkillKind::StrikeOfFortune,
                SkillKind::PassionOverload,
                SkillKind::FantasticVoyage,
            ],
            CharacterKind::Mona => vec![
                SkillKind::RippleOfFate,
                SkillKind::MirrorReflectionOfDoom,
                SkillKind::StellarisPhantasm,
                SkillKind::IllusoryTorrent,
            ],
            CharacterKind::Nahida => vec![
                SkillKind::Akara,
                SkillKind::AllSchemesToKnow,
                SkillKind::IllusoryHeart,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    PhysicalNormalAttack(Element),
    ElementalNormalAttack(Element),
    ElementalSkill(Element),
    ElementalBurst(Element),
    StrikeOfFortune,
    PassionOverload,
    FantasticVoyage,
    RippleOfFate,
    MirrorReflectionOfDoom,
    StellarisPhantasm,
    /// Mona's passive: one switch per round away from her is a quick action.
    IllusoryTorrent,
    Akara,
    AllSchemesToKnow,
    IllusoryHeart,
}

impl SkillKind {
    pub fn name(self) -> &'static str {
        match self {
            SkillKind::PhysicalNormalAttack(_) => "Physical Normal Attack",
            SkillKind::ElementalNormalAttack(_) => "Elemental Normal Attack",
            SkillKind::ElementalSkill(_) => "Elemental Skill",
            SkillKind::ElementalBurst(_) => "Elemental Burst",
            SkillKind::StrikeOfFortune => "Strike of Fortune",
            SkillKind::PassionOverload => "Passion Overload",
            SkillKind::FantasticVoyage => "Fantastic Voyage",
            SkillKind::RippleOfFate => "Ripple of Fate",
            SkillKind::MirrorReflectionOfDoom => "Mirror Reflection of Doom",
            SkillKind::StellarisPhantasm => "Stellaris Phantasm",
            SkillKind::IllusoryTorrent => "Illusory Torrent",
            SkillKind::Akara => "Akara",
            SkillKind::AllSchemesToKnow => "All Schemes to Know",
            SkillKind::IllusoryHeart => "Illusory Heart",
        }
    }

    pub fn skill_type(self) -> SkillType {
        match self {
            SkillKind::PhysicalNormalAttack(_)
            | SkillKind::ElementalNormalAttack(_)
            | SkillKind::StrikeOfFortune
            | SkillKind::RippleOfFate
            | SkillKind::Akara => SkillType::NormalAttack,
            SkillKind::ElementalSkill(_)
            | SkillKind::PassionOverload
            | SkillKind::MirrorReflectionOfDoom
            | SkillKind::AllSchemesToKnow => SkillType::ElementalSkill,
            SkillKind::ElementalBurst(_)
            | SkillKind::FantasticVoyage
            | SkillKind::StellarisPhantasm
            | SkillKind::IllusoryHeart => SkillType::ElementalBurst,
            SkillKind::IllusoryTorrent => SkillType::Passive,
        }
    }

    /// Element of the dice the skill costs.
    fn element(self) -> Element {
        match self {
            SkillKind::PhysicalNormalAttack(element)
            | SkillKind::ElementalNormalAttack(element)
            | SkillKind::ElementalSkill(element)
            | SkillKind::ElementalBurst(element) => element,
            SkillKind::StrikeOfFortune | SkillKind::PassionOverload | SkillKind::FantasticVoyage => {
                Element::Pyro
            }
            SkillKind::RippleOfFate
            | SkillKind::MirrorReflectionOfDoom
            | SkillKind::StellarisPhantasm
            | SkillKind::IllusoryTorrent => Element::Hydro,
            SkillKind::Akara | SkillKind::AllSchemesToKnow | SkillKind::IllusoryHeart => {
                Element::Dendro
            }
        }
    }

    pub fn cost(self) -> Cost {
        let element = self.element();
        match self {
            SkillKind::FantasticVoyage => Cost::new(CostLabels::ELEMENTAL_BURST)
                .elemental(element, 4)
                .with_charge(2),
            SkillKind::StellarisPhantasm => Cost::new(CostLabels::ELEMENTAL_BURST)
                .elemental(element, 3)
                .with_charge(3),
            _ => match self.skill_type() {
                SkillType::NormalAttack => Cost::new(CostLabels::NORMAL_ATTACK)
                    .elemental(element, 1)
                    .any(2),
                SkillType::ElementalSkill => {
                    Cost::new(CostLabels::ELEMENTAL_SKILL).elemental(element, 3)
                }
                SkillType::ElementalBurst => Cost::new(CostLabels::ELEMENTAL_BURST)
                    .elemental(element, 3)
                    .with_charge(2),
                SkillType::Passive => Cost::default(),
            },
        }
    }

    /// Damage element and amount dealt to the opposing active character.
    fn damage(self) -> (DamageElement, u32) {
        let element = DamageElement::from(self.element());
        match self {
            SkillKind::PhysicalNormalAttack(_) | SkillKind::StrikeOfFortune => {
                (DamageElement::Physical, 2)
            }
            SkillKind::ElementalNormalAttack(_)
            | SkillKind::RippleOfFate
            | SkillKind::Akara
            | SkillKind::MirrorReflectionOfDoom => (element, 1),
            SkillKind::FantasticVoyage | SkillKind::AllSchemesToKnow => (element, 2),
            SkillKind::ElementalSkill(_) | SkillKind::PassionOverload => (element, 3),
            SkillKind::StellarisPhantasm | SkillKind::IllusoryHeart => (element, 4),
            SkillKind::ElementalBurst(_) => (element, 5),
            SkillKind::IllusoryTorrent => (element, 0),
        }
    }

    pub fn initial_usage(self) -> Usage {
        match self {
            SkillKind::IllusoryTorrent => Usage::full(1),
            _ => Usage::NONE,
        }
    }
}

/// Actions a skill queues when used: charge change, damage, then extras.
pub fn skill_actions(skill: &Skill, game: &GameState) -> Vec<Action> {
    let player = skill.position.player;
    let Some(character) = game.character(&skill.position) else {
        return Vec::new();
    };
    let mut actions = Vec::new();

    let cost = skill.kind.cost();
    let delta = match skill.skill_type() {
        SkillType::ElementalBurst => -(cost.charge as i32),
        SkillType::Passive => return actions,
        _ => 1,
    };
    actions.push(Action::Charge(ChargeAction {
        player,
        character: skill.position.character.unwrap_or_default(),
        delta,
    }));

    let opponent = game.table(1 - player);
    let Some(target) = opponent.active_character() else {
        return actions;
    };
    let (element, amount) = skill.kind.damage();
    actions.push(Action::MakeDamage(MakeDamageAction::single(
        player,
        DamageValue::damage(skill.position, target.position, element, amount),
    )));

    let team_status = Position::zone(player, Area::TeamStatus);
    match skill.kind {
        SkillKind::FantasticVoyage => actions.push(Action::CreateObject(
            CreateObjectAction::new(team_status, ObjectKind::Status(StatusKind::InspirationField))
                .with_talent(character.talent.is_some()),
        )),
        SkillKind::StellarisPhantasm => actions.push(Action::CreateObject(CreateObjectAction::new(
            team_status,
            ObjectKind::Status(StatusKind::IllusoryBubble),
        ))),
        SkillKind::MirrorReflectionOfDoom => {
            actions.push(Action::CreateObject(CreateObjectAction::new(
                Position::zone(player, Area::Summon),
                ObjectKind::Summon(SummonKind::Reflection),
            )))
        }
        SkillKind::AllSchemesToKnow => {
            // A second seed on the same target spreads to the whole side.
            let seed = ObjectKind::Status(StatusKind::SeedOfSkandha);
            let already_seeded = target.statuses.iter().any(|status| status.kind == seed);
            let targets: Vec<Position> = if already_seeded {
                opponent
                    .characters
                    .iter()
                    .filter(|c| c.alive)
                    .map(|c| c.position)
                    .collect()
            } else {
                vec![target.position]
            };
            actions.extend(targets.into_iter().map(|position| {
                Action::CreateObject(CreateObjectAction::new(
                    position.with_area(Area::CharacterStatus),
                    seed,
                ))
            }));
        }
        _ => {}
    }
    actions
}

pub(super) fn passive_modify_value(
    skill: &Skill,
    value: &mut ModifiableValue,
    ctx: &HookContext<'_>,
) -> Option<HookCommit> {
    match (skill.kind, value) {
        (SkillKind::IllusoryTorrent, ModifiableValue::CombatAction(action))
            if action.action_type == CombatActionType::Switch
                && action.do_combat_action
                && skill.position.check(&action.position, ctx.game, PositionCheck::SAME_CHARACTER)
                && skill.usage.current > 0 =>
        {
            action.do_combat_action = false;
            Some(HookCommit::ConsumeUsage(1))
        }
        _ => None,
    }
}

pub(super) fn passive_on_event(skill: &Skill, event: &Event) -> Vec<Action> {
    match (skill.kind, event) {
        (SkillKind::IllusoryTorrent, Event::RoundPrepare { .. })
            if skill.usage.current < skill.usage.max =>
        {
            vec![Action::ChangeObjectUsage(ChangeObjectUsageAction::set(
                skill.position,
                skill.usage.max,
            ))]
        }
        _ => Vec::new(),
    }
}
