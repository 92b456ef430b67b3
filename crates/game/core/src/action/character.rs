//! Character actions: choose, switch, charge, skill use.

use crate::catalog;
use crate::event::Event;
use crate::modifier::CombatActionType;
use crate::state::{Area, GameState, Position, SkillType};

use super::{
    Action, ActionError, ActionOutcome, ActionTransition, CombatActionAction,
};

fn alive_slot(state: &GameState, player: usize, character: usize) -> Result<(), ActionError> {
    let found = state
        .table(player)
        .characters
        .get(character)
        .ok_or(ActionError::CharacterNotFound { player, character })?;
    if found.is_defeated() {
        return Err(ActionError::CharacterDefeated { player, character });
    }
    Ok(())
}

/// Sets the active character without counting as a switch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChooseCharacterAction {
    pub player: usize,
    pub character: usize,
}

impl ActionTransition for ChooseCharacterAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        alive_slot(state, self.player, self.character)
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let table = state.table_mut(self.player);
        table.active = Some(self.character);
        table.sort_dice();
        Ok(ActionOutcome::event(Event::ChooseCharacter {
            player: self.player,
            character: self.character,
        }))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchCharacterAction {
    pub player: usize,
    pub character: usize,
}

impl ActionTransition for SwitchCharacterAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        alive_slot(state, self.player, self.character)?;
        match state.table(self.player).active {
            None => Err(ActionError::NoActiveCharacter {
                player: self.player,
            }),
            Some(active) if active == self.character => Err(ActionError::AlreadyActive {
                player: self.player,
                character: self.character,
            }),
            Some(_) => Ok(()),
        }
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let table = state.table_mut(self.player);
        let from = table.active.ok_or(ActionError::NoActiveCharacter {
            player: self.player,
        })?;
        table.active = Some(self.character);
        table.sort_dice();
        Ok(ActionOutcome::event(Event::SwitchCharacter {
            player: self.player,
            from,
            to: self.character,
        }))
    }
}

/// Adds (or, for bursts, spends) energy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeAction {
    pub player: usize,
    pub character: usize,
    pub delta: i32,
}

impl ActionTransition for ChargeAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let character = state
            .table(self.player)
            .characters
            .get(self.character)
            .ok_or(ActionError::CharacterNotFound {
                player: self.player,
                character: self.character,
            })?;
        let spend = self.delta.unsigned_abs();
        if self.delta < 0 && character.charge < spend {
            return Err(ActionError::ChargeUnderflow {
                current: character.charge,
                requested: spend,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let character = state
            .table_mut(self.player)
            .characters
            .get_mut(self.character)
            .ok_or(ActionError::CharacterNotFound {
                player: self.player,
                character: self.character,
            })?;
        let before = character.charge;
        let next = i64::from(before) + i64::from(self.delta);
        character.charge = next.clamp(0, i64::from(character.max_charge)) as u32;
        Ok(ActionOutcome::event(Event::Charge {
            player: self.player,
            character: self.character,
            before,
            after: character.charge,
        }))
    }
}

/// Uses the skill at `position`.
///
/// Follow-ups are the skill's own actions, then skill-end, then the combat
/// action that may pass the turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseSkillAction {
    pub position: Position,
}

impl ActionTransition for UseSkillAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let skill = state
            .skill(&self.position)
            .ok_or(ActionError::ObjectNotFound {
                position: self.position,
            })?;
        if skill.is_passive() {
            return Err(ActionError::InvalidSkill {
                position: self.position,
            });
        }
        let slot = self.position.character.unwrap_or_default();
        alive_slot(state, self.position.player, slot)
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let skill = state
            .skill(&self.position)
            .ok_or(ActionError::ObjectNotFound {
                position: self.position,
            })?;
        let skill_type = skill.skill_type();
        let mut follow_ups = catalog::skill_actions(skill, state);
        follow_ups.push(Action::SkillEnd(SkillEndAction {
            position: self.position,
            skill_type,
        }));
        follow_ups.push(Action::CombatAction(CombatActionAction {
            player: self.position.player,
            action_type: CombatActionType::Skill,
            position: self.position,
        }));
        tracing::debug!(
            target: "tcg::action",
            player = self.position.player,
            skill = skill.name(),
            "skill used"
        );
        Ok(ActionOutcome::event(Event::UseSkill {
            player: self.position.player,
            position: self.position,
            skill_type,
        })
        .with_follow_ups(follow_ups))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEndAction {
    pub position: Position,
    pub skill_type: SkillType,
}

impl ActionTransition for SkillEndAction {
    fn pre_validate(&self, _state: &GameState) -> Result<(), ActionError> {
        if self.position.area != Area::Skill {
            return Err(ActionError::InvalidSkill {
                position: self.position,
            });
        }
        Ok(())
    }

    fn apply(&self, _state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        Ok(ActionOutcome::event(Event::SkillEnd {
            player: self.position.player,
            position: self.position,
            skill_type: self.skill_type,
        }))
    }
}
