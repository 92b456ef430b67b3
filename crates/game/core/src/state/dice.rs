//! Elements, dice and costs.

use bitflags::bitflags;

/// The seven elements, in default display order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Element {
    Cryo,
    Hydro,
    Pyro,
    Electro,
    Geo,
    Dendro,
    Anemo,
}

impl Element {
    pub const ALL: [Element; 7] = [
        Element::Cryo,
        Element::Hydro,
        Element::Pyro,
        Element::Electro,
        Element::Geo,
        Element::Dendro,
        Element::Anemo,
    ];

    pub const fn die_color(self) -> DieColor {
        match self {
            Element::Cryo => DieColor::Cryo,
            Element::Hydro => DieColor::Hydro,
            Element::Pyro => DieColor::Pyro,
            Element::Electro => DieColor::Electro,
            Element::Geo => DieColor::Geo,
            Element::Dendro => DieColor::Dendro,
            Element::Anemo => DieColor::Anemo,
        }
    }

    /// Title-cased name used in content names ("CryoMob", "PyroMobMage").
    pub const fn title(self) -> &'static str {
        match self {
            Element::Cryo => "Cryo",
            Element::Hydro => "Hydro",
            Element::Pyro => "Pyro",
            Element::Electro => "Electro",
            Element::Geo => "Geo",
            Element::Dendro => "Dendro",
            Element::Anemo => "Anemo",
        }
    }
}

/// Die face. Omni substitutes for any color.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DieColor {
    Omni,
    Cryo,
    Hydro,
    Pyro,
    Electro,
    Geo,
    Dendro,
    Anemo,
}

impl DieColor {
    pub const ALL: [DieColor; 8] = [
        DieColor::Omni,
        DieColor::Cryo,
        DieColor::Hydro,
        DieColor::Pyro,
        DieColor::Electro,
        DieColor::Geo,
        DieColor::Dendro,
        DieColor::Anemo,
    ];

    pub const fn element(self) -> Option<Element> {
        match self {
            DieColor::Omni => None,
            DieColor::Cryo => Some(Element::Cryo),
            DieColor::Hydro => Some(Element::Hydro),
            DieColor::Pyro => Some(Element::Pyro),
            DieColor::Electro => Some(Element::Electro),
            DieColor::Geo => Some(Element::Geo),
            DieColor::Dendro => Some(Element::Dendro),
            DieColor::Anemo => Some(Element::Anemo),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Element carried by a damage instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DamageElement {
    Cryo,
    Hydro,
    Pyro,
    Electro,
    Geo,
    Dendro,
    Anemo,
    Physical,
    /// Ignores shields and never reacts.
    Piercing,
}

impl DamageElement {
    pub const fn element(self) -> Option<Element> {
        match self {
            DamageElement::Cryo => Some(Element::Cryo),
            DamageElement::Hydro => Some(Element::Hydro),
            DamageElement::Pyro => Some(Element::Pyro),
            DamageElement::Electro => Some(Element::Electro),
            DamageElement::Geo => Some(Element::Geo),
            DamageElement::Dendro => Some(Element::Dendro),
            DamageElement::Anemo => Some(Element::Anemo),
            DamageElement::Physical | DamageElement::Piercing => None,
        }
    }
}

impl From<Element> for DamageElement {
    fn from(element: Element) -> Self {
        match element {
            Element::Cryo => DamageElement::Cryo,
            Element::Hydro => DamageElement::Hydro,
            Element::Pyro => DamageElement::Pyro,
            Element::Electro => DamageElement::Electro,
            Element::Geo => DamageElement::Geo,
            Element::Dendro => DamageElement::Dendro,
            Element::Anemo => DamageElement::Anemo,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    Damage,
    Heal,
}

bitflags! {
    /// What a cost pays for. Cost modifiers match on these labels.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CostLabels: u16 {
        const NORMAL_ATTACK    = 1 << 0;
        const ELEMENTAL_SKILL  = 1 << 1;
        const ELEMENTAL_BURST  = 1 << 2;
        const SWITCH_CHARACTER = 1 << 3;
        const CARD             = 1 << 4;
        const TALENT           = 1 << 5;
        const WEAPON           = 1 << 6;
        const ARTIFACT         = 1 << 7;
        const SUPPORT          = 1 << 8;
        const EVENT            = 1 << 9;
        const SKILLS = Self::NORMAL_ATTACK.bits()
            | Self::ELEMENTAL_SKILL.bits()
            | Self::ELEMENTAL_BURST.bits();
    }
}

/// Dice and charge requirement of a skill, card or switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost {
    pub label: CostLabels,
    pub elemental_color: Option<Element>,
    pub elemental_number: u32,
    pub same_number: u32,
    pub any_number: u32,
    pub charge: u32,
}

impl Cost {
    pub const fn new(label: CostLabels) -> Self {
        Self {
            label,
            elemental_color: None,
            elemental_number: 0,
            same_number: 0,
            any_number: 0,
            charge: 0,
        }
    }

    #[must_use]
    pub const fn elemental(mut self, element: Element, number: u32) -> Self {
        self.elemental_color = Some(element);
        self.elemental_number = number;
        self
    }

    #[must_use]
    pub const fn same(mut self, number: u32) -> Self {
        self.same_number = number;
        self
    }

    #[must_use]
    pub const fn any(mut self, number: u32) -> Self {
        self.any_number = number;
        self
    }

    #[must_use]
    pub const fn with_charge(mut self, charge: u32) -> Self {
        self.charge = charge;
        self
    }

    pub const fn total_dice(&self) -> u32 {
        self.elemental_number + self.same_number + self.any_number
    }

    /// Lowers the cost by one die.
    ///
    /// A colored reduction lowers the elemental part when the color matches,
    /// otherwise the any-color part. An uncolored (`None`) reduction lowers
    /// any, then same, then elemental. Returns whether anything changed.
    pub fn decrease(&mut self, color: Option<DieColor>) -> bool {
        match color.and_then(DieColor::element) {
            Some(element) => {
                if self.elemental_color == Some(element) && self.elemental_number > 0 {
                    self.elemental_number -= 1;
                    true
                } else if self.any_number > 0 {
                    self.any_number -= 1;
                    true
                } else {
                    false
                }
            }
            None => {
                if self.any_number > 0 {
                    self.any_number -= 1;
                } else if self.same_number > 0 {
                    self.same_number -= 1;
                } else if self.elemental_number > 0 {
                    self.elemental_number -= 1;
                } else {
                    return false;
                }
                true
            }
        }
    }

    /// True when `chosen` pays this cost exactly (no die left over).
    pub fn check_payment(&self, chosen: &[DieColor]) -> bool {
        if chosen.len() != self.total_dice() as usize {
            return false;
        }
        let mut counts = color_counts(chosen);
        if !take_elemental(self, &mut counts) {
            return false;
        }
        // Whatever survives the same-color part pays the any-color part,
        // and the totals already match.
        self.same_number == 0 || same_color_candidates(&counts, self.same_number).next().is_some()
    }

    /// True when some subset of `pool` pays this cost and `charge` covers the
    /// charge requirement.
    pub fn is_payable(&self, pool: &[DieColor], charge: u32) -> bool {
        charge >= self.charge && self.select_dice(pool).is_some()
    }

    /// Picks pool indices that pay this cost, preferring to keep omni dice
    /// and dice matching earlier pool positions.
    pub fn select_dice(&self, pool: &[DieColor]) -> Option<Vec<usize>> {
        let mut used = vec![false; pool.len()];
        let mut picked = Vec::with_capacity(self.total_dice() as usize);

        let take = |used: &mut Vec<bool>, picked: &mut Vec<usize>, color: DieColor, n: u32| {
            let mut remaining = n;
            for (idx, die) in pool.iter().enumerate().rev() {
                if remaining == 0 {
                    break;
                }
                if !used[idx] && *die == color {
                    used[idx] = true;
                    picked.push(idx);
                    remaining -= 1;
                }
            }
            n - remaining
        };

        if self.elemental_number > 0 {
            let color = self.elemental_color.map(Element::die_color)?;
            let exact = take(&mut used, &mut picked, color, self.elemental_number);
            let omni = take(
                &mut used,
                &mut picked,
                DieColor::Omni,
                self.elemental_number - exact,
            );
            if exact + omni < self.elemental_number {
                return None;
            }
        }

        if self.same_number > 0 {
            let remaining: Vec<DieColor> = pool
                .iter()
                .enumerate()
                .filter(|(idx, _)| !used[*idx])
                .map(|(_, die)| *die)
                .collect();
            let counts = color_counts(&remaining);
            // Prefer the color that needs the fewest omni dice.
            let color = same_color_candidates(&counts, self.same_number)
                .min_by_key(|color| {
                    let own = counts[color.index()];
                    (self.same_number.saturating_sub(own), *color == DieColor::Omni)
                })?;
            let exact = take(&mut used, &mut picked, color, self.same_number);
            take(
                &mut used,
                &mut picked,
                DieColor::Omni,
                self.same_number - exact,
            );
        }

        if self.any_number > 0 {
            let mut remaining = self.any_number;
            for (idx, die) in pool.iter().enumerate().rev() {
                if remaining == 0 {
                    break;
                }
                if !used[idx] && *die != DieColor::Omni {
                    used[idx] = true;
                    picked.push(idx);
                    remaining -= 1;
                }
            }
            let omni = take(&mut used, &mut picked, DieColor::Omni, remaining);
            if omni < remaining {
                return None;
            }
        }

        picked.sort_unstable();
        Some(picked)
    }
}

fn color_counts(dice: &[DieColor]) -> [u32; 8] {
    let mut counts = [0u32; 8];
    for die in dice {
        counts[die.index()] += 1;
    }
    counts
}

/// Consumes the elemental part from `counts`, exact color first.
fn take_elemental(cost: &Cost, counts: &mut [u32; 8]) -> bool {
    if cost.elemental_number == 0 {
        return true;
    }
    let Some(color) = cost.elemental_color.map(Element::die_color) else {
        return false;
    };
    let exact = counts[color.index()].min(cost.elemental_number);
    counts[color.index()] -= exact;
    let missing = cost.elemental_number - exact;
    if counts[DieColor::Omni.index()] < missing {
        return false;
    }
    counts[DieColor::Omni.index()] -= missing;
    true
}

/// Colors able to cover `number` same-colored dice, topping up with omni.
fn same_color_candidates(counts: &[u32; 8], number: u32) -> impl Iterator<Item = DieColor> + '_ {
    let omni = counts[DieColor::Omni.index()];
    DieColor::ALL.into_iter().filter(move |color| {
        if *color == DieColor::Omni {
            omni >= number
        } else {
            counts[color.index()] + omni >= number
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill_cost() -> Cost {
        Cost::new(CostLabels::NORMAL_ATTACK)
            .elemental(Element::Dendro, 1)
            .any(2)
    }

    #[test]
    fn matching_color_decreases_elemental_part() {
        let mut cost = skill_cost();
        assert!(cost.decrease(Some(DieColor::Dendro)));
        assert_eq!(cost.elemental_number, 0);
        assert_eq!(cost.any_number, 2);
    }

    #[test]
    fn mismatched_color_decreases_any_part() {
        let mut cost = skill_cost();
        assert!(cost.decrease(Some(DieColor::Hydro)));
        assert_eq!(cost.elemental_number, 1);
        assert_eq!(cost.any_number, 1);
    }

    #[test]
    fn decrease_fails_when_nothing_matches() {
        let mut cost = Cost::new(CostLabels::ELEMENTAL_SKILL).elemental(Element::Pyro, 3);
        assert!(!cost.decrease(Some(DieColor::Hydro)));
        assert_eq!(cost.elemental_number, 3);
    }

    #[test]
    fn exact_payment_rules() {
        let cost = skill_cost();
        assert!(cost.check_payment(&[DieColor::Dendro, DieColor::Pyro, DieColor::Geo]));
        assert!(cost.check_payment(&[DieColor::Omni, DieColor::Omni, DieColor::Omni]));
        assert!(!cost.check_payment(&[DieColor::Pyro, DieColor::Pyro, DieColor::Geo]));
        assert!(!cost.check_payment(&[DieColor::Dendro, DieColor::Pyro]));

        let same = Cost::new(CostLabels::CARD).same(2);
        assert!(same.check_payment(&[DieColor::Hydro, DieColor::Hydro]));
        assert!(same.check_payment(&[DieColor::Hydro, DieColor::Omni]));
        assert!(!same.check_payment(&[DieColor::Hydro, DieColor::Pyro]));
    }

    #[test]
    fn selection_keeps_omni_when_possible() {
        let cost = skill_cost();
        let pool = [
            DieColor::Omni,
            DieColor::Dendro,
            DieColor::Pyro,
            DieColor::Geo,
        ];
        let picked = cost.select_dice(&pool).expect("payable");
        assert_eq!(picked, vec![1, 2, 3]);
        let chosen: Vec<DieColor> = picked.iter().map(|idx| pool[*idx]).collect();
        assert!(cost.check_payment(&chosen));
    }

    #[test]
    fn charge_gates_payability() {
        let burst = Cost::new(CostLabels::ELEMENTAL_BURST)
            .elemental(Element::Pyro, 3)
            .with_charge(2);
        let pool = [DieColor::Omni; 4];
        assert!(!burst.is_payable(&pool, 1));
        assert!(burst.is_payable(&pool, 2));
    }
}
