//! Weapons, artifacts and talents.

use crate::action::{Action, ChangeObjectUsageAction};
use crate::event::Event;
use crate::hooks::{HookCommit, HookContext};
use crate::modifier::ModifiableValue;
use crate::state::{
    Area, Cost, CostLabels, Element, GameState, Object, Position, PositionCheck, Usage, Version,
};

use super::{CardKind, CharacterKind, SkillKind, V3_3, V3_7, V4_0};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TalentKind {
    GrandExpectation,
    ProphecyOfSubmersion,
    TheSeedOfStoredKnowledge,
}

impl TalentKind {
    pub const ALL: [TalentKind; 3] = [
        TalentKind::GrandExpectation,
        TalentKind::ProphecyOfSubmersion,
        TalentKind::TheSeedOfStoredKnowledge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TalentKind::GrandExpectation => "Grand Expectation",
            TalentKind::ProphecyOfSubmersion => "Prophecy of Submersion",
            TalentKind::TheSeedOfStoredKnowledge => "The Seed of Stored Knowledge",
        }
    }

    pub fn versions(self) -> &'static [Version] {
        match self {
            TalentKind::TheSeedOfStoredKnowledge => &[V3_7],
            _ => &[V3_3],
        }
    }

    /// Character the talent can be equipped to.
    pub fn character(self) -> CharacterKind {
        match self {
            TalentKind::GrandExpectation => CharacterKind::Bennett,
            TalentKind::ProphecyOfSubmersion => CharacterKind::Mona,
            TalentKind::TheSeedOfStoredKnowledge => CharacterKind::Nahida,
        }
    }

    /// Skill used when the card is played.
    pub fn skill(self) -> SkillKind {
        match self {
            TalentKind::GrandExpectation => SkillKind::FantasticVoyage,
            TalentKind::ProphecyOfSubmersion => SkillKind::StellarisPhantasm,
            TalentKind::TheSeedOfStoredKnowledge => SkillKind::IllusoryHeart,
        }
    }

    /// Card cost: the skill's dice and charge, labelled as a talent card.
    pub fn cost(self) -> Cost {
        let mut cost = self.skill().cost();
        cost.label = CostLabels::CARD | CostLabels::TALENT;
        cost
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentKind {
    MagicGuide,
    /// One die off the first matching skill or talent each round.
    SmallElementalArtifact(Element),
    Talent(TalentKind),
}

impl EquipmentKind {
    pub fn all() -> impl Iterator<Item = EquipmentKind> {
        let artifacts = Element::ALL
            .into_iter()
            .map(EquipmentKind::SmallElementalArtifact);
        let talents = TalentKind::ALL.into_iter().map(EquipmentKind::Talent);
        core::iter::once(EquipmentKind::MagicGuide)
            .chain(artifacts)
            .chain(talents)
    }

    pub fn name(self) -> &'static str {
        match self {
            EquipmentKind::MagicGuide => "Magic Guide",
            EquipmentKind::SmallElementalArtifact(element) => artifact_name(element),
            EquipmentKind::Talent(talent) => talent.name(),
        }
    }

    pub fn versions(self) -> &'static [Version] {
        match self {
            EquipmentKind::MagicGuide => &[V3_3],
            EquipmentKind::SmallElementalArtifact(_) => &[V3_3, V4_0],
            EquipmentKind::Talent(talent) => talent.versions(),
        }
    }

    pub fn usage(self) -> Usage {
        match self {
            EquipmentKind::SmallElementalArtifact(_) => Usage::full(1),
            EquipmentKind::MagicGuide | EquipmentKind::Talent(_) => Usage::NONE,
        }
    }

    pub fn is_weapon(self) -> bool {
        matches!(self, EquipmentKind::MagicGuide)
    }

    pub fn is_artifact(self) -> bool {
        matches!(self, EquipmentKind::SmallElementalArtifact(_))
    }
}

pub(super) fn artifact_name(element: Element) -> &'static str {
    match element {
        Element::Cryo => "Broken Rime's Echo",
        Element::Dendro => "Laurel Coronet",
        Element::Geo => "Mask of Solitude Basalt",
        Element::Electro => "Thunder Summoner's Crown",
        Element::Anemo => "Viridescent Venerer's Diadem",
        Element::Hydro => "Wine-Stained Tricorne",
        Element::Pyro => "Witch's Scorching Hat",
    }
}

pub(super) fn modify_value(
    kind: EquipmentKind,
    object: &Object,
    value: &mut ModifiableValue,
    ctx: &HookContext<'_>,
) -> Option<HookCommit> {
    let game = ctx.game;
    match (kind, value) {
        (EquipmentKind::MagicGuide, ModifiableValue::DamageIncrease(damage))
            if object.position.check(
                &damage.source,
                game,
                PositionCheck::SAME_CHARACTER.target_area(Area::Skill),
            ) && damage.is_against_opponent()
                && !damage.is_heal() =>
        {
            damage.damage += 1;
            None
        }
        (EquipmentKind::Talent(TalentKind::ProphecyOfSubmersion), ModifiableValue::DamageIncrease(damage))
            if object.position.check(
                &damage.source,
                game,
                PositionCheck::SAME_PLAYER.source_is_active(true),
            ) && damage.is_against_opponent()
                && !damage.is_heal()
                && damage.reacted.contains(&Element::Hydro) =>
        {
            damage.damage += 2;
            None
        }
        (EquipmentKind::SmallElementalArtifact(element), ModifiableValue::Cost(value))
            if object.usage.current > 0
                && object.position.check(&value.position, game, PositionCheck::SAME_PLAYER)
                && value.cost.label.intersects(CostLabels::SKILLS | CostLabels::TALENT)
                && pays_for_wearer(object, value.position, game) =>
        {
            value
                .cost
                .decrease(Some(element.die_color()))
                .then_some(HookCommit::ConsumeUsage(1))
        }
        _ => None,
    }
}

/// True when the cost belongs to a skill of the wearer, or to a talent card
/// for the wearer's character.
fn pays_for_wearer(object: &Object, payer: Position, game: &GameState) -> bool {
    match payer.area {
        Area::Skill => object.position.check(&payer, game, PositionCheck::SAME_CHARACTER),
        Area::Hand => {
            let wearer = game.character(&object.position).map(|character| character.kind);
            match game.card(&payer).map(|card| card.kind) {
                Some(CardKind::Talent(talent)) => wearer == Some(talent.character()),
                _ => false,
            }
        }
        _ => false,
    }
}

pub(super) fn on_event(
    kind: EquipmentKind,
    object: &Object,
    event: &Event,
    _game: &GameState,
) -> Vec<Action> {
    match (kind, event) {
        (EquipmentKind::SmallElementalArtifact(_), Event::RoundPrepare { .. })
            if object.usage.current < object.usage.max =>
        {
            vec![Action::ChangeObjectUsage(ChangeObjectUsageAction::set(
                object.position,
                object.usage.max,
            ))]
        }
        _ => Vec::new(),
    }
}
