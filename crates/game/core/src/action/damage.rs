//! Damage and healing.

use crate::catalog::{ObjectKind, StatusKind, SummonKind};
use crate::combat::{DamageValue, Reaction, apply_hp_change, resolve_reaction};
use crate::event::Event;
use crate::interaction::{Request, RequestKind};
use crate::modifier;
use crate::state::{Area, DamageElement, GameState, ObjectId, Position};

use super::{
    Action, ActionError, ActionOutcome, ActionTransition, CreateObjectAction,
    SwitchCharacterAction, sweep_depleted,
};

/// Deals every value in `damages`, in order, as one simultaneous hit.
///
/// Per value: reaction, then the increase, multiply and decrease passes,
/// then the HP change. Reaction side damage is appended to the same batch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MakeDamageAction {
    pub source_player: usize,
    pub damages: Vec<DamageValue>,
}

impl MakeDamageAction {
    pub fn single(source_player: usize, damage: DamageValue) -> Self {
        Self {
            source_player,
            damages: vec![damage],
        }
    }
}

impl ActionTransition for MakeDamageAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        for damage in &self.damages {
            target_exists(state, &damage.target)?;
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let mut work = self.damages.clone();
        let mut applied = Vec::with_capacity(work.len());
        let mut hit_events = Vec::new();
        let mut follow_ups = Vec::new();
        let mut requests = Vec::new();

        let mut next = 0;
        while next < work.len() {
            let mut value = work[next].clone();
            next += 1;
            target_exists(state, &value.target)?;
            let Some(target) = state.character(&value.target).filter(|c| c.alive) else {
                tracing::trace!(
                    target: "tcg::action",
                    target = ?value.target,
                    "damage to defeated character skipped"
                );
                continue;
            };
            let aura = target.aura.clone();

            let mut overloaded = false;
            if !value.is_heal() {
                let outcome = resolve_reaction(&aura, value.element);
                if let Some(character) = state.character_mut(&value.target) {
                    character.aura = outcome.aura;
                }
                if let Some(reaction) = outcome.reaction {
                    value.damage += reaction.damage_bonus();
                    value.reaction = Some(reaction);
                    value.reacted = outcome.reacted;
                    overloaded = reaction == Reaction::Overloaded;
                    work.extend(side_damage(state, &value, reaction));
                    follow_ups.extend(reaction_objects(&value, reaction));
                    tracing::debug!(
                        target: "tcg::action",
                        reaction = %reaction,
                        target = ?value.target,
                        "elemental reaction"
                    );
                }
                value = modifier::commit_damage(state, value)?;
            }

            let character = state
                .character_mut(&value.target)
                .ok_or(ActionError::CharacterNotFound {
                    player: value.target.player,
                    character: value.target.character.unwrap_or_default(),
                })?;
            let hp_before = character.hp;
            character.hp = apply_hp_change(character.hp, character.max_hp, &value);
            let hp_after = character.hp;
            let defeated = hp_after == 0 && !value.is_heal();
            if defeated {
                character.defeat();
            }
            hit_events.push(Event::ReceiveDamage {
                damage: value.clone(),
                hp_before,
                hp_after,
            });

            let player = value.target.player;
            let slot = value.target.character.unwrap_or_default();
            let table = state.table(player);
            let is_active = table.active == Some(slot);
            if defeated {
                hit_events.push(Event::CharacterDefeated {
                    player,
                    character: slot,
                });
                let candidates: Vec<usize> = table.alive_slots().collect();
                if is_active && !candidates.is_empty() {
                    requests.push(Request::new(player, RequestKind::ChooseCharacter { candidates }));
                }
            } else if overloaded
                && is_active
                && let Some(to) = table.next_alive(slot)
            {
                follow_ups.push(Action::SwitchCharacter(SwitchCharacterAction {
                    player,
                    character: to,
                }));
            }
            applied.push(value);
        }

        let mut events = sweep_depleted(state);
        events.extend(hit_events);
        events.push(Event::MakeDamage {
            source_player: self.source_player,
            damages: applied.clone(),
        });
        events.push(Event::AfterMakeDamage {
            source_player: self.source_player,
            damages: applied,
        });
        Ok(ActionOutcome {
            events,
            follow_ups,
            requests,
        })
    }
}

fn target_exists(state: &GameState, target: &Position) -> Result<(), ActionError> {
    let slot = target.character.unwrap_or_default();
    if target.area != Area::Character || state.character(target).is_none() {
        return Err(ActionError::CharacterNotFound {
            player: target.player,
            character: slot,
        });
    }
    Ok(())
}

/// Extra damage dealt to the other characters on the target's side.
fn side_damage(state: &GameState, value: &DamageValue, reaction: Reaction) -> Vec<DamageValue> {
    let element = match reaction {
        Reaction::Superconduct | Reaction::ElectroCharged => DamageElement::Piercing,
        Reaction::Swirl(element) => DamageElement::from(element),
        _ => return Vec::new(),
    };
    let source = Position::system(value.source.player);
    state
        .table(value.target.player)
        .characters
        .iter()
        .filter(|character| character.alive && character.position != value.target)
        .map(|character| DamageValue::damage(source, character.position, element, 1))
        .collect()
}

/// Statuses and summons a reaction leaves behind.
fn reaction_objects(value: &DamageValue, reaction: Reaction) -> Option<Action> {
    let attacker = value.source.player;
    let (position, kind) = match reaction {
        Reaction::Frozen => (
            value.target.with_area(Area::CharacterStatus).with_id(ObjectId::UNASSIGNED),
            ObjectKind::Status(StatusKind::Frozen),
        ),
        Reaction::Bloom => (
            Position::zone(attacker, Area::TeamStatus),
            ObjectKind::Status(StatusKind::DendroCore),
        ),
        Reaction::Quicken => (
            Position::zone(attacker, Area::TeamStatus),
            ObjectKind::Status(StatusKind::CatalyzingField),
        ),
        Reaction::Crystallize(_) => (
            Position::zone(attacker, Area::TeamStatus),
            ObjectKind::Status(StatusKind::Crystallize),
        ),
        Reaction::Burning => (
            Position::zone(attacker, Area::Summon),
            ObjectKind::Summon(SummonKind::BurningFlame),
        ),
        _ => return None,
    };
    Some(Action::CreateObject(CreateObjectAction::new(position, kind)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Element;
    use crate::test_support::versus;

    fn hit(state: &GameState, element: DamageElement, damage: u32) -> MakeDamageAction {
        let source = state.table(0).characters[0].skills[1].position;
        let target = state.table(1).characters[0].position;
        MakeDamageAction::single(0, DamageValue::damage(source, target, element, damage))
    }

    #[test]
    fn frozen_reaction_attaches_status_after_the_hit() {
        let mut state = versus(&["HydroMob", "PyroMob", "CryoMob"], &["CryoMob", "HydroMob", "PyroMob"]);
        state.table_mut(1).characters[0].aura = vec![Element::Cryo];
        let outcome = hit(&state, DamageElement::Hydro, 1)
            .apply(&mut state)
            .expect("damage");
        assert_eq!(state.table(1).characters[0].hp, 8);
        assert!(state.table(1).characters[0].aura.is_empty());
        assert!(matches!(
            outcome.follow_ups.as_slice(),
            [Action::CreateObject(create)] if create.kind == ObjectKind::Status(StatusKind::Frozen)
        ));
    }

    #[test]
    fn electro_charged_pierces_the_back_row() {
        let mut state = versus(&["ElectroMob", "PyroMob", "CryoMob"], &["CryoMob", "HydroMob", "PyroMob"]);
        state.table_mut(1).characters[0].aura = vec![Element::Hydro];
        hit(&state, DamageElement::Electro, 1)
            .apply(&mut state)
            .expect("damage");
        let hps: Vec<u32> = state.table(1).characters.iter().map(|c| c.hp).collect();
        assert_eq!(hps, [8, 9, 9]);
    }

    #[test]
    fn defeating_the_active_character_asks_for_a_replacement() {
        let mut state = versus(&["PyroMob", "PyroMob", "PyroMob"], &["CryoMob", "HydroMob", "PyroMob"]);
        let outcome = hit(&state, DamageElement::Physical, 15)
            .apply(&mut state)
            .expect("damage");
        let target = &state.table(1).characters[0];
        assert!(target.is_defeated());
        assert_eq!(target.hp, 0);
        assert_eq!(
            outcome.requests,
            vec![Request::new(
                1,
                RequestKind::ChooseCharacter {
                    candidates: vec![1, 2]
                }
            )]
        );
        assert!(outcome
            .events
            .iter()
            .any(|event| matches!(event, Event::CharacterDefeated { player: 1, character: 0 })));
    }

    #[test]
    fn overloaded_forces_a_switch() {
        let mut state = versus(&["ElectroMob", "PyroMob", "CryoMob"], &["CryoMob", "HydroMob", "PyroMob"]);
        state.table_mut(1).characters[0].aura = vec![Element::Pyro];
        let outcome = hit(&state, DamageElement::Electro, 1)
            .apply(&mut state)
            .expect("damage");
        assert_eq!(state.table(1).characters[0].hp, 7);
        assert_eq!(
            outcome.follow_ups,
            vec![Action::SwitchCharacter(SwitchCharacterAction {
                player: 1,
                character: 1
            })]
        );
    }

    #[test]
    fn heal_skips_reactions() {
        let mut state = versus(&["HydroMob", "PyroMob", "CryoMob"], &["CryoMob", "HydroMob", "PyroMob"]);
        state.table_mut(0).characters[0].hp = 4;
        state.table_mut(0).characters[0].aura = vec![Element::Pyro];
        let target = state.table(0).characters[0].position;
        MakeDamageAction::single(0, DamageValue::heal(Position::system(0), target, 3))
            .apply(&mut state)
            .expect("heal");
        assert_eq!(state.table(0).characters[0].hp, 7);
        assert_eq!(state.table(0).characters[0].aura, vec![Element::Pyro]);
    }
}
