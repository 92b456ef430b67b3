//! Action domain - the single mutation primitive.
//!
//! Every change to a [`GameState`] after `start` is an [`Action`] drained from
//! the queue. Each variant wraps a payload struct implementing
//! [`ActionTransition`]; the engine drives it through
//! pre_validate → apply → post_validate.
//!
//! # Module Structure
//!
//! - `cards`: draw, restore, use card, elemental tuning
//! - `character`: choose, switch, charge, skill use
//! - `damage`: damage and healing with reactions and modifier passes
//! - `dice`: roll, reroll, create, remove, pay cost
//! - `objects`: create, remove, move, change usage
//! - `turn`: round-end declaration and combat-action bookkeeping

mod cards;
mod character;
mod damage;
mod dice;
mod error;
mod objects;
mod turn;

pub use cards::{DrawCardsAction, ElementalTuningAction, RestoreCardsAction, UseCardAction};
pub use character::{
    ChargeAction, ChooseCharacterAction, SkillEndAction, SwitchCharacterAction, UseSkillAction,
};
pub use damage::MakeDamageAction;
pub use dice::{
    CreateDiceAction, DiceSelection, PayCostAction, RemoveDiceAction, RerollDiceAction,
    RollDiceAction,
};
pub use error::ActionError;
pub use objects::{
    ChangeObjectUsageAction, CreateObjectAction, MoveObjectAction, RemoveObjectAction,
    UsageChange,
};
pub use turn::{CombatActionAction, DeclareRoundEndAction};

pub(crate) use objects::sweep_depleted;

use crate::event::Event;
use crate::interaction::Request;
use crate::state::GameState;

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply(&self, state: &mut GameState) -> Result<ActionOutcome, ActionError>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState) -> Result<(), ActionError> {
        Ok(())
    }
}

/// What a handler hands back to the queue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Completed mutations, dispatched in order after `follow_ups` are queued.
    pub events: Vec<Event>,
    /// Actions that belong to this one (skill effects, equip moves, ...).
    pub follow_ups: Vec<Action>,
    /// Choices the engine must ask for before draining further.
    pub requests: Vec<Request>,
}

impl ActionOutcome {
    pub fn event(event: Event) -> Self {
        Self {
            events: vec![event],
            ..Self::default()
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    #[must_use]
    pub fn with_follow_ups(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.follow_ups.extend(actions);
        self
    }
}

/// Closed set of queued world mutations.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    DrawCards(DrawCardsAction),
    RestoreCards(RestoreCardsAction),
    RollDice(RollDiceAction),
    RerollDice(RerollDiceAction),
    CreateDice(CreateDiceAction),
    RemoveDice(RemoveDiceAction),
    PayCost(PayCostAction),
    ChooseCharacter(ChooseCharacterAction),
    SwitchCharacter(SwitchCharacterAction),
    DeclareRoundEnd(DeclareRoundEndAction),
    CombatAction(CombatActionAction),
    UseSkill(UseSkillAction),
    SkillEnd(SkillEndAction),
    UseCard(UseCardAction),
    Charge(ChargeAction),
    MakeDamage(MakeDamageAction),
    CreateObject(CreateObjectAction),
    RemoveObject(RemoveObjectAction),
    MoveObject(MoveObjectAction),
    ChangeObjectUsage(ChangeObjectUsageAction),
    ElementalTuning(ElementalTuningAction),
}

impl Action {
    /// Name of the variant, for logs and error reports.
    pub fn name(&self) -> &'static str {
        match self {
            Action::DrawCards(_) => "draw_cards",
            Action::RestoreCards(_) => "restore_cards",
            Action::RollDice(_) => "roll_dice",
            Action::RerollDice(_) => "reroll_dice",
            Action::CreateDice(_) => "create_dice",
            Action::RemoveDice(_) => "remove_dice",
            Action::PayCost(_) => "pay_cost",
            Action::ChooseCharacter(_) => "choose_character",
            Action::SwitchCharacter(_) => "switch_character",
            Action::DeclareRoundEnd(_) => "declare_round_end",
            Action::CombatAction(_) => "combat_action",
            Action::UseSkill(_) => "use_skill",
            Action::SkillEnd(_) => "skill_end",
            Action::UseCard(_) => "use_card",
            Action::Charge(_) => "charge",
            Action::MakeDamage(_) => "make_damage",
            Action::CreateObject(_) => "create_object",
            Action::RemoveObject(_) => "remove_object",
            Action::MoveObject(_) => "move_object",
            Action::ChangeObjectUsage(_) => "change_object_usage",
            Action::ElementalTuning(_) => "elemental_tuning",
        }
    }

    /// Borrows the payload as its transition.
    pub fn transition(&self) -> &dyn ActionTransition {
        match self {
            Action::DrawCards(action) => action,
            Action::RestoreCards(action) => action,
            Action::RollDice(action) => action,
            Action::RerollDice(action) => action,
            Action::CreateDice(action) => action,
            Action::RemoveDice(action) => action,
            Action::PayCost(action) => action,
            Action::ChooseCharacter(action) => action,
            Action::SwitchCharacter(action) => action,
            Action::DeclareRoundEnd(action) => action,
            Action::CombatAction(action) => action,
            Action::UseSkill(action) => action,
            Action::SkillEnd(action) => action,
            Action::UseCard(action) => action,
            Action::Charge(action) => action,
            Action::MakeDamage(action) => action,
            Action::CreateObject(action) => action,
            Action::RemoveObject(action) => action,
            Action::MoveObject(action) => action,
            Action::ChangeObjectUsage(action) => action,
            Action::ElementalTuning(action) => action,
        }
    }
}

macro_rules! impl_from_payload {
    ($($variant:ident => $payload:ty),* $(,)?) => {
        $(
            impl From<$payload> for Action {
                fn from(action: $payload) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_payload! {
    DrawCards => DrawCardsAction,
    RestoreCards => RestoreCardsAction,
    RollDice => RollDiceAction,
    RerollDice => RerollDiceAction,
    CreateDice => CreateDiceAction,
    RemoveDice => RemoveDiceAction,
    PayCost => PayCostAction,
    ChooseCharacter => ChooseCharacterAction,
    SwitchCharacter => SwitchCharacterAction,
    DeclareRoundEnd => DeclareRoundEndAction,
    CombatAction => CombatActionAction,
    UseSkill => UseSkillAction,
    SkillEnd => SkillEndAction,
    UseCard => UseCardAction,
    Charge => ChargeAction,
    MakeDamage => MakeDamageAction,
    CreateObject => CreateObjectAction,
    RemoveObject => RemoveObjectAction,
    MoveObject => MoveObjectAction,
    ChangeObjectUsage => ChangeObjectUsageAction,
    ElementalTuning => ElementalTuningAction,
}
