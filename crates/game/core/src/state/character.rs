use super::{Element, Object, ObjectId, Position, Usage, Version};
use crate::catalog::{CharacterKind, SkillKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SkillType {
    NormalAttack,
    ElementalSkill,
    ElementalBurst,
    /// Never used directly; only contributes hooks.
    Passive,
}

/// Skill slot of a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: ObjectId,
    pub position: Position,
    pub kind: SkillKind,
    pub usage: Usage,
}

impl Skill {
    pub fn skill_type(&self) -> SkillType {
        self.kind.skill_type()
    }

    pub fn is_passive(&self) -> bool {
        self.skill_type() == SkillType::Passive
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Character slot with its equipment and statuses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: ObjectId,
    pub position: Position,
    pub kind: CharacterKind,
    pub version: Version,
    pub element: Element,
    pub hp: u32,
    pub max_hp: u32,
    pub charge: u32,
    pub max_charge: u32,
    /// Elements currently applied, in application order.
    pub aura: Vec<Element>,
    pub alive: bool,
    pub skills: Vec<Skill>,
    pub weapon: Option<Object>,
    pub artifact: Option<Object>,
    pub talent: Option<Object>,
    /// Character statuses in creation order.
    pub statuses: Vec<Object>,
}

impl Character {
    pub fn name(&self) -> String {
        self.kind.name()
    }

    pub fn is_defeated(&self) -> bool {
        !self.alive
    }

    /// A stunned character cannot use skills.
    pub fn is_stunned(&self) -> bool {
        self.statuses.iter().any(|status| status.kind.is_stun())
    }

    pub fn damage_taken(&self) -> u32 {
        self.max_hp - self.hp
    }

    /// Weapon, artifact and talent, in that order.
    pub fn equipment(&self) -> impl Iterator<Item = &Object> {
        self.weapon
            .iter()
            .chain(self.artifact.iter())
            .chain(self.talent.iter())
    }

    pub fn skill(&self, id: ObjectId) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    pub fn skill_of_kind(&self, kind: SkillKind) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.kind == kind)
    }

    /// Drops everything a defeated character loses.
    pub(crate) fn defeat(&mut self) {
        self.alive = false;
        self.hp = 0;
        self.charge = 0;
        self.aura.clear();
        self.statuses.clear();
        self.weapon = None;
        self.artifact = None;
        self.talent = None;
    }
}
