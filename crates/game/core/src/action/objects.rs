//! Object lifecycle: create, remove, move, change usage.
//!
//! Removing or changing an object that existed once but is already gone is
//! a no-op; the same status may be targeted by two queued removals. Ids that
//! were never allocated are an invariant violation.

use crate::catalog::ObjectKind;
use crate::event::Event;
use crate::state::{Area, GameState, Object, Position, Version};

use super::{ActionError, ActionOutcome, ActionTransition};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateObjectAction {
    /// Destination zone. Character statuses and equipment carry a slot.
    pub position: Position,
    pub kind: ObjectKind,
    pub version: Version,
    pub talent_activated: bool,
}

impl CreateObjectAction {
    /// Creates the latest version of `kind` in the zone of `position`.
    pub fn new(position: Position, kind: ObjectKind) -> Self {
        Self {
            position,
            kind,
            version: kind.latest_version(),
            talent_activated: false,
        }
    }

    #[must_use]
    pub fn with_talent(mut self, talent_activated: bool) -> Self {
        self.talent_activated = talent_activated;
        self
    }
}

impl ActionTransition for CreateObjectAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let needs_slot = matches!(self.position.area, Area::CharacterStatus | Area::Character);
        if needs_slot && state.character(&self.position).is_none() {
            return Err(ActionError::InvalidDestination {
                position: self.position,
            });
        }
        if !matches!(
            self.position.area,
            Area::CharacterStatus | Area::Character | Area::TeamStatus | Area::Summon | Area::Support
        ) {
            return Err(ActionError::InvalidDestination {
                position: self.position,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let initial = self.kind.usage(self.version);

        if let Some(existing) = find_same_kind(state, &self.position, self.kind) {
            let position = existing.position;
            let name = existing.name();
            if let Some(object) = state.object_mut(&position) {
                let next = object.usage.current.saturating_add(initial.current);
                object.usage.set(next);
                object.talent_activated |= self.talent_activated;
            }
            return Ok(ActionOutcome::event(Event::CreateObject {
                position,
                name,
                renewed: true,
            }));
        }

        if let Some(character) = state.character(&self.position)
            && character.is_defeated()
        {
            tracing::debug!(
                target: "tcg::action",
                name = self.kind.name(),
                position = ?self.position,
                "skip attaching to defeated character"
            );
            return Ok(ActionOutcome::none());
        }
        if is_full(state, &self.position) {
            tracing::debug!(
                target: "tcg::action",
                name = self.kind.name(),
                area = %self.position.area,
                "zone full, creation skipped"
            );
            return Ok(ActionOutcome::none());
        }

        let id = state.allocate_id();
        let object = Object {
            id,
            position: self.position.with_id(id),
            kind: self.kind,
            version: self.version,
            usage: initial,
            talent_activated: self.talent_activated,
        };
        let position = object.position;
        let name = object.name();
        insert_object(state, object)?;
        Ok(ActionOutcome::event(Event::CreateObject {
            position,
            name,
            renewed: false,
        }))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveObjectAction {
    pub position: Position,
}

impl ActionTransition for RemoveObjectAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        check_known(state, &self.position)
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        match take_object(state, &self.position) {
            Some(object) => Ok(ActionOutcome::event(Event::RemoveObject {
                position: object.position,
                name: object.name(),
            })),
            None => {
                tracing::trace!(
                    target: "tcg::action",
                    position = ?self.position,
                    "object already gone"
                );
                Ok(ActionOutcome::none())
            }
        }
    }
}

/// Moves a hand card onto the board as an object with the same id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveObjectAction {
    pub from: Position,
    /// Destination zone. Equipment carries the character slot.
    pub to: Position,
}

impl ActionTransition for MoveObjectAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let card = state
            .card(&self.from)
            .filter(|_| self.from.area == Area::Hand)
            .ok_or(ActionError::CardNotInHand {
                position: self.from,
            })?;
        if card.kind.object_kind().is_none() {
            return Err(ActionError::InvalidDestination { position: self.to });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let table = state.table_mut(self.from.player);
        let index = table
            .hand_index(self.from.id)
            .ok_or(ActionError::CardNotInHand {
                position: self.from,
            })?;
        let card = table.hand.remove(index);
        let kind = card
            .kind
            .object_kind()
            .ok_or(ActionError::InvalidDestination { position: self.to })?;
        let object = Object {
            id: card.id,
            position: self.to.with_id(card.id),
            kind,
            version: card.version,
            usage: kind.usage(card.version),
            talent_activated: false,
        };
        let to = object.position;
        insert_object(state, object)?;
        Ok(ActionOutcome::event(Event::MoveObject {
            from: self.from,
            to,
        }))
    }

    fn post_validate(&self, state: &GameState) -> Result<(), ActionError> {
        if state.object(&self.to.with_id(self.from.id)).is_none() {
            return Err(ActionError::InvalidDestination { position: self.to });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsageChange {
    Delta(i32),
    Set(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeObjectUsageAction {
    pub position: Position,
    pub change: UsageChange,
}

impl ChangeObjectUsageAction {
    pub fn delta(position: Position, delta: i32) -> Self {
        Self {
            position,
            change: UsageChange::Delta(delta),
        }
    }

    pub fn set(position: Position, value: u32) -> Self {
        Self {
            position,
            change: UsageChange::Set(value),
        }
    }
}

impl ActionTransition for ChangeObjectUsageAction {
    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        check_known(state, &self.position)
    }

    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError> {
        let Some(usage) = state.usage_mut(&self.position) else {
            tracing::trace!(
                target: "tcg::action",
                position = ?self.position,
                "object already gone"
            );
            return Ok(ActionOutcome::none());
        };
        let before = usage.current;
        match self.change {
            UsageChange::Delta(delta) => usage.apply_delta(delta),
            UsageChange::Set(value) => usage.set(value),
        }
        let after = usage.current;
        let mut outcome = ActionOutcome::event(Event::ChangeObjectUsage {
            position: self.position,
            before,
            after,
        });
        outcome.events.extend(sweep_depleted(state));
        Ok(outcome)
    }
}

/// Removes every depleted object whose kind leaves the board when empty.
pub(crate) fn sweep_depleted(state: &mut GameState) -> Vec<Event> {
    let depleted: Vec<Position> = state
        .tables
        .iter()
        .flat_map(|table| {
            let character_objects = table
                .characters
                .iter()
                .flat_map(|character| character.equipment().chain(character.statuses.iter()));
            character_objects
                .chain(table.team_statuses.iter())
                .chain(table.summons.iter())
                .chain(table.supports.iter())
        })
        .filter(|object| object.should_remove())
        .map(|object| object.position)
        .collect();

    depleted
        .into_iter()
        .filter_map(|position| take_object(state, &position))
        .map(|object| Event::RemoveObject {
            position: object.position,
            name: object.name(),
        })
        .collect()
}

fn check_known(state: &GameState, position: &Position) -> Result<(), ActionError> {
    if state.was_allocated(position.id) {
        Ok(())
    } else {
        Err(ActionError::UnknownObject {
            position: *position,
        })
    }
}

fn find_same_kind<'a>(state: &'a GameState, zone: &Position, kind: ObjectKind) -> Option<&'a Object> {
    let table = state.tables.get(zone.player)?;
    let same = |object: &&Object| object.kind == kind;
    match zone.area {
        Area::CharacterStatus => state.character(zone)?.statuses.iter().find(same),
        Area::TeamStatus => table.team_statuses.iter().find(same),
        Area::Summon => table.summons.iter().find(same),
        Area::Support => table.supports.iter().find(same),
        _ => None,
    }
}

fn is_full(state: &GameState, zone: &Position) -> bool {
    let table = state.table(zone.player);
    match zone.area {
        Area::Summon => table.summons.is_full(),
        Area::Support => table.supports.is_full(),
        _ => false,
    }
}

fn insert_object(state: &mut GameState, object: Object) -> Result<(), ActionError> {
    let position = object.position;
    let invalid = ActionError::InvalidDestination { position };
    match position.area {
        Area::CharacterStatus => {
            let character = state.character_mut(&position).ok_or(invalid)?;
            character.statuses.push(object);
        }
        Area::Character => {
            let character = state.character_mut(&position).ok_or(invalid.clone())?;
            let slot = match object.kind {
                ObjectKind::Equipment(kind) if kind.is_weapon() => &mut character.weapon,
                ObjectKind::Equipment(kind) if kind.is_artifact() => &mut character.artifact,
                ObjectKind::Equipment(_) => &mut character.talent,
                _ => return Err(invalid),
            };
            if slot.is_some() {
                return Err(invalid);
            }
            *slot = Some(object);
        }
        Area::TeamStatus => state.table_mut(position.player).team_statuses.push(object),
        Area::Summon => state
            .table_mut(position.player)
            .summons
            .try_push(object)
            .map_err(|_| invalid)?,
        Area::Support => state
            .table_mut(position.player)
            .supports
            .try_push(object)
            .map_err(|_| invalid)?,
        _ => return Err(invalid),
    }
    Ok(())
}

/// Detaches the object at `position` from its container.
fn take_object(state: &mut GameState, position: &Position) -> Option<Object> {
    let id = position.id;
    match position.area {
        Area::Character => {
            let character = state.character_mut(position)?;
            [
                &mut character.weapon,
                &mut character.artifact,
                &mut character.talent,
            ]
            .into_iter()
            .find(|slot| matches!(slot, Some(object) if object.id == id))
            .and_then(Option::take)
        }
        Area::CharacterStatus => {
            let statuses = &mut state.character_mut(position)?.statuses;
            let index = statuses.iter().position(|object| object.id == id)?;
            Some(statuses.remove(index))
        }
        Area::TeamStatus => {
            let statuses = &mut state.table_mut(position.player).team_statuses;
            let index = statuses.iter().position(|object| object.id == id)?;
            Some(statuses.remove(index))
        }
        Area::Summon => {
            let summons = &mut state.table_mut(position.player).summons;
            let index = summons.iter().position(|object| object.id == id)?;
            Some(summons.remove(index))
        }
        Area::Support => {
            let supports = &mut state.table_mut(position.player).supports;
            let index = supports.iter().position(|object| object.id == id)?;
            Some(supports.remove(index))
        }
        _ => None,
    }
}
