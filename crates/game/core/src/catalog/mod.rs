//! Hosted rule content.
//!
//! Every character, skill, status, summon, support, equipment and card is a
//! variant of a closed enum. Behavior is attached through [`RuleObject`]; the
//! engine never matches on a concrete variant.
//!
//! Content is resolved by display name plus an optional version tag. Without
//! a tag the latest version wins; with one, the newest version not above it.

mod cards;
mod characters;
mod equipment;
mod statuses;
mod summons;
mod supports;

pub use cards::{CardKind, card_actions};
pub use characters::{CharacterKind, SkillKind, WeaponType, skill_actions};
pub use equipment::{EquipmentKind, TalentKind};
pub use statuses::StatusKind;
pub use summons::SummonKind;
pub use supports::SupportKind;

use crate::action::Action;
use crate::event::Event;
use crate::hooks::{HookCommit, HookContext, RuleObject};
use crate::modifier::ModifiableValue;
use crate::state::{Area, Character, GameState, Object, Position, Skill, Usage, Version};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ContentCategory {
    Character,
    Card,
    Object,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    #[error("unknown {category} '{name}'")]
    UnknownName {
        category: ContentCategory,
        name: String,
    },

    #[error("'{name}' has no version at or below {requested}")]
    NoVersion { name: String, requested: Version },
}

/// Kind of a board object (status, summon, support or equipment).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    Status(StatusKind),
    Summon(SummonKind),
    Support(SupportKind),
    Equipment(EquipmentKind),
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Status(kind) => kind.name(),
            ObjectKind::Summon(kind) => kind.name(),
            ObjectKind::Support(kind) => kind.name(),
            ObjectKind::Equipment(kind) => kind.name(),
        }
    }

    pub fn versions(self) -> &'static [Version] {
        match self {
            ObjectKind::Status(kind) => kind.versions(),
            ObjectKind::Summon(_) | ObjectKind::Support(_) => &[V3_3],
            ObjectKind::Equipment(kind) => kind.versions(),
        }
    }

    pub fn latest_version(self) -> Version {
        self.versions().last().copied().unwrap_or(V3_3)
    }

    /// Usage a freshly created object starts with, and its cap.
    pub fn usage(self, _version: Version) -> Usage {
        match self {
            ObjectKind::Status(kind) => kind.usage(),
            ObjectKind::Summon(kind) => kind.usage(),
            ObjectKind::Support(kind) => kind.usage(),
            ObjectKind::Equipment(kind) => kind.usage(),
        }
    }

    pub fn removes_when_depleted(self) -> bool {
        match self {
            ObjectKind::Status(_) | ObjectKind::Support(_) => true,
            ObjectKind::Summon(kind) => kind.removes_when_depleted(),
            ObjectKind::Equipment(_) => false,
        }
    }

    /// Stunned characters cannot use skills.
    pub fn is_stun(self) -> bool {
        matches!(self, ObjectKind::Status(StatusKind::Frozen))
    }

    /// Zone the object is created in.
    pub fn area(self) -> Area {
        match self {
            ObjectKind::Status(kind) if kind.is_character_status() => Area::CharacterStatus,
            ObjectKind::Status(_) => Area::TeamStatus,
            ObjectKind::Summon(_) => Area::Summon,
            ObjectKind::Support(_) => Area::Support,
            ObjectKind::Equipment(_) => Area::Character,
        }
    }

    fn all() -> impl Iterator<Item = ObjectKind> {
        let statuses = StatusKind::ALL.into_iter().map(ObjectKind::Status);
        let summons = SummonKind::ALL.into_iter().map(ObjectKind::Summon);
        let supports = SupportKind::ALL.into_iter().map(ObjectKind::Support);
        let equipment = EquipmentKind::all().map(ObjectKind::Equipment);
        statuses.chain(summons).chain(supports).chain(equipment)
    }
}

pub(crate) const V3_3: Version = Version::new(3, 3);
pub(crate) const V3_4: Version = Version::new(3, 4);
pub(crate) const V3_7: Version = Version::new(3, 7);
pub(crate) const V4_0: Version = Version::new(4, 0);

/// Picks the version of `name` a request resolves to. `available` is sorted
/// ascending.
fn select_version(
    name: &str,
    available: &[Version],
    requested: Option<Version>,
) -> Result<Version, CatalogError> {
    let picked = match requested {
        None => available.last().copied(),
        Some(requested) => available.iter().rev().find(|v| **v <= requested).copied(),
    };
    picked.ok_or_else(|| CatalogError::NoVersion {
        name: name.to_string(),
        requested: requested.unwrap_or(V3_3),
    })
}

pub fn resolve_character(
    name: &str,
    version: Option<Version>,
) -> Result<(CharacterKind, Version), CatalogError> {
    let kind = CharacterKind::from_name(name).ok_or_else(|| CatalogError::UnknownName {
        category: ContentCategory::Character,
        name: name.to_string(),
    })?;
    Ok((kind, select_version(name, kind.versions(), version)?))
}

pub fn resolve_card(name: &str, version: Option<Version>) -> Result<(CardKind, Version), CatalogError> {
    let kind = CardKind::all()
        .find(|kind| kind.name() == name)
        .ok_or_else(|| CatalogError::UnknownName {
            category: ContentCategory::Card,
            name: name.to_string(),
        })?;
    Ok((kind, select_version(name, kind.versions(), version)?))
}

pub fn resolve_object(
    name: &str,
    version: Option<Version>,
) -> Result<(ObjectKind, Version), CatalogError> {
    let kind = ObjectKind::all()
        .find(|kind| kind.name() == name)
        .ok_or_else(|| CatalogError::UnknownName {
            category: ContentCategory::Object,
            name: name.to_string(),
        })?;
    Ok((kind, select_version(name, kind.versions(), version)?))
}

impl RuleObject for Object {
    fn position(&self) -> Position {
        self.position
    }

    fn name(&self) -> String {
        self.kind.name().to_string()
    }

    fn modify_value(&self, value: &mut ModifiableValue, ctx: &HookContext<'_>) -> Option<HookCommit> {
        match self.kind {
            ObjectKind::Status(kind) => statuses::modify_value(kind, self, value, ctx),
            ObjectKind::Summon(kind) => summons::modify_value(kind, self, value, ctx),
            ObjectKind::Support(_) => None,
            ObjectKind::Equipment(kind) => equipment::modify_value(kind, self, value, ctx),
        }
    }

    fn on_event(&self, event: &Event, game: &GameState) -> Vec<Action> {
        match self.kind {
            ObjectKind::Status(kind) => statuses::on_event(kind, self, event, game),
            ObjectKind::Summon(kind) => summons::on_event(kind, self, event, game),
            ObjectKind::Support(kind) => supports::on_event(kind, self, event, game),
            ObjectKind::Equipment(kind) => equipment::on_event(kind, self, event, game),
        }
    }
}

impl RuleObject for Skill {
    fn position(&self) -> Position {
        self.position
    }

    fn name(&self) -> String {
        self.kind.name().to_string()
    }

    fn modify_value(&self, value: &mut ModifiableValue, ctx: &HookContext<'_>) -> Option<HookCommit> {
        characters::passive_modify_value(self, value, ctx)
    }

    fn on_event(&self, event: &Event, _game: &GameState) -> Vec<Action> {
        characters::passive_on_event(self, event)
    }
}

impl RuleObject for Character {
    fn position(&self) -> Position {
        self.position
    }

    fn name(&self) -> String {
        self.kind.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_version_is_default() {
        let (kind, version) = resolve_card("Wine-Stained Tricorne", None).expect("known card");
        assert_eq!(kind, CardKind::SmallElementalArtifact(crate::state::Element::Hydro));
        assert_eq!(version, V4_0);
    }

    #[test]
    fn requested_version_falls_back_to_older_text() {
        let (_, version) =
            resolve_card("Wine-Stained Tricorne", Some(Version::new(3, 8))).expect("known card");
        assert_eq!(version, V3_3);
        assert_eq!(
            resolve_character("Nahida", Some(V3_3)),
            Err(CatalogError::NoVersion {
                name: "Nahida".to_string(),
                requested: V3_3
            })
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!(
            resolve_character("Dvalin", None),
            Err(CatalogError::UnknownName {
                category: ContentCategory::Character,
                ..
            })
        ));
        let (kind, _) = resolve_character("ElectroMobMage", None).expect("generic character");
        assert_eq!(kind, CharacterKind::MobMage(crate::state::Element::Electro));
        let (kind, version) = resolve_object("Catalyzing Field", None).expect("status");
        assert_eq!(kind, ObjectKind::Status(StatusKind::CatalyzingField));
        assert_eq!(version, V3_4);
    }
}
