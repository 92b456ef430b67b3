//! Dice pool mutations.

use crate::event::Event;
use crate::interaction::{Request, RequestKind};
use crate::modifier;
use crate::state::{Cost, DieColor, GameState, Position};

use super::{ActionError, ActionOutcome, ActionTransition, sweep_depleted};

/// Rolls fresh dice into the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollDiceAction {
    pub player: usize,
    pub count: usize,
}

impl ActionTransition for RollDiceAction {
    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let colors = roll(state, self.count);
        let colors = add_dice(state, self.player, colors);
        Ok(ActionOutcome::event(Event::CreateDice {
            player: self.player,
            colors,
        }))
    }
}

/// Rerolls the dice at `dice`, then asks again while rerolls remain.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RerollDiceAction {
    pub player: usize,
    pub dice: Vec<usize>,
    /// Reroll chances left after this one.
    pub remaining: u32,
}

impl ActionTransition for RerollDiceAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        check_indices(state, self.player, &self.dice)
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let removed = remove_indices(state, self.player, &self.dice);
        let rolled = roll(state, removed.len());
        add_dice(state, self.player, rolled);
        let mut outcome = ActionOutcome::none();
        if self.remaining > 0 {
            outcome.requests.push(Request::new(
                self.player,
                RequestKind::RerollDice {
                    remaining: self.remaining,
                },
            ));
        }
        Ok(outcome)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateDiceAction {
    pub player: usize,
    pub colors: Vec<DieColor>,
}

impl ActionTransition for CreateDiceAction {
    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let colors = add_dice(state, self.player, self.colors.clone());
        Ok(ActionOutcome::event(Event::CreateDice {
            player: self.player,
            colors,
        }))
    }
}

/// Which dice a removal targets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiceSelection {
    All,
    Indices(Vec<usize>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveDiceAction {
    pub player: usize,
    pub dice: DiceSelection,
}

impl ActionTransition for RemoveDiceAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        match &self.dice {
            DiceSelection::All => Ok(()),
            DiceSelection::Indices(indices) => check_indices(state, self.player, indices),
        }
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let colors = match &self.dice {
            DiceSelection::All => std::mem::take(&mut state.table_mut(self.player).dice),
            DiceSelection::Indices(indices) => remove_indices(state, self.player, indices),
        };
        Ok(ActionOutcome::event(Event::RemoveDice {
            player: self.player,
            colors,
        }))
    }
}

/// Pays for a skill, card or switch with the chosen dice.
///
/// The cost is recomputed here in `REAL` mode, which is when cost modifiers
/// spend their usage. The chosen dice must pay it exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayCostAction {
    pub player: usize,
    /// Base cost before modifiers.
    pub cost: Cost,
    /// Skill, card, or the character being switched away from.
    pub source: Position,
    pub target: Option<Position>,
    pub dice: Vec<usize>,
}

impl ActionTransition for PayCostAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        check_indices(state, self.player, &self.dice)
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        // Payment is checked against the preview so a bad selection spends
        // no discount usage.
        let previewed = modifier::preview_cost(state, self.cost, self.source, self.target);
        let pool = &state.table(self.player).dice;
        let chosen: Vec<DieColor> = self.dice.iter().map(|idx| pool[*idx]).collect();
        if !previewed.check_payment(&chosen) {
            return Err(ActionError::PaymentMismatch);
        }
        let cost = modifier::commit_cost(state, self.cost, self.source, self.target)?;
        debug_assert_eq!(cost, previewed);
        let colors = remove_indices(state, self.player, &self.dice);
        let mut outcome = ActionOutcome::event(Event::RemoveDice {
            player: self.player,
            colors,
        });
        outcome.events.extend(sweep_depleted(state));
        Ok(outcome)
    }
}

fn roll(state: &mut GameState, count: usize) -> Vec<DieColor> {
    match state.config.fixed_dice_color {
        Some(color) => vec![color; count],
        None => (0..count)
            .map(|_| DieColor::ALL[state.rng.below(DieColor::ALL.len())])
            .collect(),
    }
}

/// Adds dice up to the pool limit and re-sorts. Returns what was added.
fn add_dice(state: &mut GameState, player: usize, mut colors: Vec<DieColor>) -> Vec<DieColor> {
    let limit = state.config.max_dice_number;
    let table = state.table_mut(player);
    colors.truncate(limit.saturating_sub(table.dice.len()));
    table.dice.extend(colors.iter().copied());
    table.sort_dice();
    colors
}

fn check_indices(state: &GameState, player: usize, indices: &[usize]) -> Result<(), ActionError> {
    let len = state.table(player).dice.len();
    for (pos, index) in indices.iter().enumerate() {
        if *index >= len {
            return Err(ActionError::DieIndexOutOfRange {
                player,
                index: *index,
            });
        }
        if indices[..pos].contains(index) {
            return Err(ActionError::DuplicateDieIndex { index: *index });
        }
    }
    Ok(())
}

/// Removes dice by index, preserving the order of the rest.
fn remove_indices(state: &mut GameState, player: usize, indices: &[usize]) -> Vec<DieColor> {
    let table = state.table_mut(player);
    let mut removed = Vec::with_capacity(indices.len());
    let mut kept = Vec::with_capacity(table.dice.len());
    for (idx, die) in table.dice.iter().enumerate() {
        if indices.contains(&idx) {
            removed.push(*die);
        } else {
            kept.push(*die);
        }
    }
    table.dice = kept;
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CreateObjectAction;
    use crate::catalog::{EquipmentKind, ObjectKind, SkillKind};
    use crate::config::MatchConfig;
    use crate::state::{Area, CostLabels, Element};
    use crate::test_support::versus;

    fn state_with_dice(dice: Vec<DieColor>) -> GameState {
        let mut state = GameState::new(MatchConfig::new(), 7);
        state.table_mut(0).dice = dice;
        state
    }

    #[test]
    fn roll_respects_pool_limit() {
        let mut state = state_with_dice(vec![DieColor::Omni; 15]);
        let outcome = RollDiceAction { player: 0, count: 8 }
            .apply(&mut state)
            .expect("roll");
        assert_eq!(state.table(0).dice.len(), 16);
        assert!(matches!(
            &outcome.events[..],
            [Event::CreateDice { player: 0, colors }] if colors.len() == 1
        ));
    }

    #[test]
    fn duplicate_indices_are_rejected() {
        let state = state_with_dice(vec![DieColor::Pyro, DieColor::Hydro]);
        let action = RemoveDiceAction {
            player: 0,
            dice: DiceSelection::Indices(vec![1, 1]),
        };
        assert_eq!(
            action.pre_validate(&state),
            Err(ActionError::DuplicateDieIndex { index: 1 })
        );
    }

    #[test]
    fn pay_cost_requires_exact_payment() {
        let mut state = state_with_dice(vec![DieColor::Omni, DieColor::Pyro, DieColor::Hydro]);
        let action = PayCostAction {
            player: 0,
            cost: Cost::new(CostLabels::CARD).same(2),
            source: Position::system(0),
            target: None,
            dice: vec![1, 2],
        };
        assert_eq!(action.apply(&mut state), Err(ActionError::PaymentMismatch));
        assert_eq!(state.table(0).dice.len(), 3);

        let action = PayCostAction {
            dice: vec![0, 1],
            ..action
        };
        action.apply(&mut state).expect("omni plus pyro pays two same");
        assert_eq!(state.table(0).dice, vec![DieColor::Hydro]);
    }

    #[test]
    fn rejected_payment_keeps_discounts_unspent() {
        let mut state = versus(&["Nahida"], &["PyroMob"]);
        CreateObjectAction::new(
            Position::character_zone(0, Area::Character, 0),
            ObjectKind::Equipment(EquipmentKind::SmallElementalArtifact(Element::Dendro)),
        )
        .apply(&mut state)
        .expect("artifact");
        let laurel = state.table(0).characters[0]
            .artifact
            .as_ref()
            .expect("equipped")
            .position;
        let skill = state.table(0).characters[0]
            .skill_of_kind(SkillKind::AllSchemesToKnow)
            .expect("skill")
            .position;
        state.table_mut(0).dice = vec![DieColor::Omni, DieColor::Dendro, DieColor::Pyro];

        let action = PayCostAction {
            player: 0,
            cost: SkillKind::AllSchemesToKnow.cost(),
            source: skill,
            target: None,
            dice: vec![1, 2],
        };
        assert_eq!(action.apply(&mut state), Err(ActionError::PaymentMismatch));
        assert_eq!(state.usage(&laurel).map(|usage| usage.current), Some(1));
        assert_eq!(state.table(0).dice.len(), 3);

        let action = PayCostAction {
            dice: vec![0, 1],
            ..action
        };
        action.apply(&mut state).expect("two dendro after the discount");
        assert_eq!(state.usage(&laurel).map(|usage| usage.current), Some(0));
        assert_eq!(state.table(0).dice, vec![DieColor::Pyro]);
    }

    #[test]
    fn reroll_asks_again_while_chances_remain() {
        let mut state = state_with_dice(vec![DieColor::Pyro, DieColor::Hydro]);
        let outcome = RerollDiceAction {
            player: 0,
            dice: vec![0],
            remaining: 1,
        }
        .apply(&mut state)
        .expect("reroll");
        assert_eq!(state.table(0).dice.len(), 2);
        assert_eq!(outcome.requests.len(), 1);
    }
}
