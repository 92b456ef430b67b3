//! Damage values and HP application.

use crate::state::{DamageElement, DamageType, Element, Position};

use super::Reaction;

/// One damage (or heal) instance.
///
/// Created by skills and content, rewritten by the damage modifier passes,
/// then applied to the target character and carried by the resulting events.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageValue {
    /// Object that produced the damage (skill, summon, status, or system).
    pub source: Position,
    /// Character receiving the damage.
    pub target: Position,
    pub damage: u32,
    pub element: DamageElement,
    pub damage_type: DamageType,
    /// Reaction triggered when the damage was applied.
    pub reaction: Option<Reaction>,
    /// Elements consumed by the reaction (incoming first).
    pub reacted: Vec<Element>,
}

impl DamageValue {
    pub fn damage(source: Position, target: Position, element: DamageElement, damage: u32) -> Self {
        Self {
            source,
            target,
            damage,
            element,
            damage_type: DamageType::Damage,
            reaction: None,
            reacted: Vec::new(),
        }
    }

    pub fn heal(source: Position, target: Position, amount: u32) -> Self {
        Self {
            source,
            target,
            damage: amount,
            element: DamageElement::Piercing,
            damage_type: DamageType::Heal,
            reaction: None,
            reacted: Vec::new(),
        }
    }

    pub fn is_heal(&self) -> bool {
        self.damage_type == DamageType::Heal
    }

    pub fn is_piercing(&self) -> bool {
        self.element == DamageElement::Piercing
    }

    /// True when the source and target sit on different sides.
    pub fn is_against_opponent(&self) -> bool {
        self.source.player != self.target.player
    }

    /// Lowers the damage by up to `amount`, returning how much was absorbed.
    pub fn reduce(&mut self, amount: u32) -> u32 {
        let absorbed = amount.min(self.damage);
        self.damage -= absorbed;
        absorbed
    }
}

/// Applies damage or healing to `hp`, clamped to `0..=max_hp`.
pub fn apply_hp_change(hp: u32, max_hp: u32, value: &DamageValue) -> u32 {
    match value.damage_type {
        DamageType::Damage => hp.saturating_sub(value.damage),
        DamageType::Heal => hp.saturating_add(value.damage).min(max_hp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Area;

    fn target() -> Position {
        Position::character_zone(1, Area::Character, 0)
    }

    #[test]
    fn damage_never_drops_hp_below_zero() {
        let value = DamageValue::damage(Position::system(0), target(), DamageElement::Pyro, 12);
        assert_eq!(apply_hp_change(10, 10, &value), 0);
    }

    #[test]
    fn heal_is_capped_at_max_hp() {
        let value = DamageValue::heal(Position::system(1), target(), 5);
        assert_eq!(apply_hp_change(7, 10, &value), 10);
    }

    #[test]
    fn reduce_reports_absorbed_amount() {
        let mut value = DamageValue::damage(Position::system(0), target(), DamageElement::Hydro, 2);
        assert_eq!(value.reduce(3), 2);
        assert_eq!(value.damage, 0);
        assert!(value.is_against_opponent());
    }
}
