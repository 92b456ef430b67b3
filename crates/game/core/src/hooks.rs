//! Capability interface every rule-bearing object implements.
//!
//! The engine never matches on concrete content. It walks objects in
//! visitation order and calls whichever hooks they provide:
//!
//! - [`RuleObject::modify_value`] for the value modifier pipeline
//! - [`RuleObject::on_event`] for event dispatch
//!
//! Both hooks receive shared references only. A modifier that wants to spend
//! its own usage returns a [`HookCommit`]; the pipeline applies commits after
//! the fold, and only in [`Mode::Real`]. A preview can therefore never mutate
//! a hook's state.

use crate::action::Action;
use crate::event::Event;
use crate::modifier::ModifiableValue;
use crate::state::{GameState, Position};

/// Pipeline mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum Mode {
    /// Preview: compute a value without consuming anything.
    Test,
    /// Commit: the value is being consumed right now.
    Real,
}

/// Read-only view handed to modifier hooks.
#[derive(Clone, Copy)]
pub struct HookContext<'a> {
    pub game: &'a GameState,
    pub mode: Mode,
}

/// Side effect a modifier asks for once its change is committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookCommit {
    /// Spend this many points of the hooking object's own usage.
    ConsumeUsage(u32),
}

/// Capability set of a rule-content object.
pub trait RuleObject {
    fn position(&self) -> Position;

    fn name(&self) -> String;

    /// Rewrites `value` if this object is relevant to it.
    ///
    /// Relevance must be re-decided on every call from the current state;
    /// nothing decided in a `Test` pass carries over to the `Real` pass.
    fn modify_value(
        &self,
        _value: &mut ModifiableValue,
        _ctx: &HookContext<'_>,
    ) -> Option<HookCommit> {
        None
    }

    /// Reacts to a completed mutation with follow-up actions.
    fn on_event(&self, _event: &Event, _game: &GameState) -> Vec<Action> {
        Vec::new()
    }
}

/// Every live rule object in visitation order.
///
/// Current player's table first, then the opponent's. Per table: characters
/// starting at the active slot and wrapping around; per character the
/// character itself, its passive skills (alive characters only), weapon,
/// artifact, talent and statuses in creation order; then team statuses,
/// summons and supports.
pub fn visit(game: &GameState) -> Vec<&dyn RuleObject> {
    let mut objects: Vec<&dyn RuleObject> = Vec::new();
    let current = game.current_player;
    for player in [current, 1 - current] {
        let table = game.table(player);
        let count = table.characters.len();
        let start = table.active.unwrap_or(0);
        for offset in 0..count {
            let character = &table.characters[(start + offset) % count];
            objects.push(character);
            if character.alive {
                objects.extend(
                    character
                        .skills
                        .iter()
                        .filter(|skill| skill.is_passive())
                        .map(|skill| skill as &dyn RuleObject),
                );
            }
            objects.extend(character.equipment().map(|object| object as &dyn RuleObject));
            objects.extend(character.statuses.iter().map(|object| object as &dyn RuleObject));
        }
        objects.extend(table.team_statuses.iter().map(|object| object as &dyn RuleObject));
        objects.extend(table.summons.iter().map(|object| object as &dyn RuleObject));
        objects.extend(table.supports.iter().map(|object| object as &dyn RuleObject));
    }
    objects
}
