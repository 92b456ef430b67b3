//! Elemental reactions.
//!
//! Reactions are an engine rule, not content: every character carries an
//! aura (applied elements), and incoming elemental damage either joins the
//! aura or reacts with the first applied element it can react with.

use crate::state::{DamageElement, Element};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Reaction {
    Melt,
    Vaporize,
    Overloaded,
    Superconduct,
    ElectroCharged,
    Frozen,
    /// Carries the element that was swirled.
    Swirl(Element),
    /// Carries the element that was crystallized.
    Crystallize(Element),
    Burning,
    Bloom,
    Quicken,
}

impl Reaction {
    /// Flat damage bonus added before the modifier passes.
    pub const fn damage_bonus(self) -> u32 {
        match self {
            Reaction::Melt | Reaction::Vaporize | Reaction::Overloaded => 2,
            Reaction::Swirl(_) => 0,
            _ => 1,
        }
    }

    /// Reaction between an incoming element and one already applied.
    pub fn between(incoming: Element, applied: Element) -> Option<Self> {
        use Element::*;

        let reaction = match (incoming, applied) {
            (Pyro, Cryo) | (Cryo, Pyro) => Reaction::Melt,
            (Pyro, Hydro) | (Hydro, Pyro) => Reaction::Vaporize,
            (Pyro, Electro) | (Electro, Pyro) => Reaction::Overloaded,
            (Pyro, Dendro) | (Dendro, Pyro) => Reaction::Burning,
            (Hydro, Cryo) | (Cryo, Hydro) => Reaction::Frozen,
            (Hydro, Electro) | (Electro, Hydro) => Reaction::ElectroCharged,
            (Hydro, Dendro) | (Dendro, Hydro) => Reaction::Bloom,
            (Cryo, Electro) | (Electro, Cryo) => Reaction::Superconduct,
            (Electro, Dendro) | (Dendro, Electro) => Reaction::Quicken,
            (Anemo, Cryo | Hydro | Pyro | Electro) => Reaction::Swirl(applied),
            (Geo, Cryo | Hydro | Pyro | Electro) => Reaction::Crystallize(applied),
            _ => return None,
        };
        Some(reaction)
    }
}

/// Result of applying one damage element to an aura.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub reaction: Option<Reaction>,
    /// Incoming element followed by the applied element it consumed.
    pub reacted: Vec<Element>,
    /// Aura after application.
    pub aura: Vec<Element>,
}

/// Applies `incoming` to `aura`.
///
/// Physical and piercing damage leave the aura untouched. Anemo and geo never
/// stay applied. Cryo and dendro may coexist.
pub fn resolve_reaction(aura: &[Element], incoming: DamageElement) -> ReactionOutcome {
    let mut outcome = ReactionOutcome {
        aura: aura.to_vec(),
        ..ReactionOutcome::default()
    };
    let Some(element) = incoming.element() else {
        return outcome;
    };

    let hit = aura
        .iter()
        .enumerate()
        .find_map(|(idx, applied)| Reaction::between(element, *applied).map(|r| (idx, r)));
    if let Some((idx, reaction)) = hit {
        let consumed = outcome.aura.remove(idx);
        outcome.reaction = Some(reaction);
        outcome.reacted = vec![element, consumed];
        return outcome;
    }

    if matches!(element, Element::Anemo | Element::Geo) || outcome.aura.contains(&element) {
        return outcome;
    }
    outcome.aura.push(element);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pyro_on_cryo_melts() {
        let outcome = resolve_reaction(&[Element::Cryo], DamageElement::Pyro);
        assert_eq!(outcome.reaction, Some(Reaction::Melt));
        assert_eq!(outcome.reacted, vec![Element::Pyro, Element::Cryo]);
        assert!(outcome.aura.is_empty());
    }

    #[test]
    fn cryo_and_dendro_coexist() {
        let outcome = resolve_reaction(&[Element::Dendro], DamageElement::Cryo);
        assert_eq!(outcome.reaction, None);
        assert_eq!(outcome.aura, vec![Element::Dendro, Element::Cryo]);

        // First reacting applied element wins.
        let outcome = resolve_reaction(&outcome.aura, DamageElement::Pyro);
        assert_eq!(outcome.reaction, Some(Reaction::Burning));
        assert_eq!(outcome.aura, vec![Element::Cryo]);
    }

    #[test]
    fn anemo_and_geo_never_apply() {
        assert!(resolve_reaction(&[], DamageElement::Anemo).aura.is_empty());
        assert!(resolve_reaction(&[], DamageElement::Geo).aura.is_empty());
        let outcome = resolve_reaction(&[Element::Dendro], DamageElement::Anemo);
        assert_eq!(outcome.reaction, None);
        assert_eq!(outcome.aura, vec![Element::Dendro]);
    }

    #[test]
    fn physical_and_piercing_never_react() {
        for element in [DamageElement::Physical, DamageElement::Piercing] {
            let outcome = resolve_reaction(&[Element::Hydro], element);
            assert_eq!(outcome.reaction, None);
            assert_eq!(outcome.aura, vec![Element::Hydro]);
        }
    }

    #[test]
    fn swirl_carries_the_swirled_element() {
        let outcome = resolve_reaction(&[Element::Electro], DamageElement::Anemo);
        assert_eq!(outcome.reaction, Some(Reaction::Swirl(Element::Electro)));
        assert_eq!(outcome.reaction.map(Reaction::damage_bonus), Some(0));
    }

    #[test]
    fn reapplying_same_element_keeps_single_entry() {
        let outcome = resolve_reaction(&[Element::Hydro], DamageElement::Hydro);
        assert_eq!(outcome.aura, vec![Element::Hydro]);
    }
}
