//! Notifications of completed mutations.
//!
//! Handlers produce events; the engine dispatches each one to every object in
//! visitation order and appends the returned actions to the queue.

use crate::catalog::CardKind;
use crate::combat::DamageValue;
use crate::modifier::CombatActionType;
use crate::state::{DieColor, Position, SkillType};

#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Event {
    RoundPrepare {
        round: u32,
    },
    RoundEnd {
        round: u32,
    },
    DrawCard {
        player: usize,
        count: usize,
    },
    CreateDice {
        player: usize,
        colors: Vec<DieColor>,
    },
    RemoveDice {
        player: usize,
        colors: Vec<DieColor>,
    },
    ChooseCharacter {
        player: usize,
        character: usize,
    },
    SwitchCharacter {
        player: usize,
        from: usize,
        to: usize,
    },
    DeclareRoundEnd {
        player: usize,
    },
    CombatAction {
        player: usize,
        action_type: CombatActionType,
        position: Position,
        do_combat_action: bool,
    },
    UseSkill {
        player: usize,
        position: Position,
        skill_type: SkillType,
    },
    SkillEnd {
        player: usize,
        position: Position,
        skill_type: SkillType,
    },
    UseCard {
        player: usize,
        position: Position,
        card: CardKind,
    },
    Charge {
        player: usize,
        character: usize,
        before: u32,
        after: u32,
    },
    /// One per damage instance, carrying the fully modified value.
    ReceiveDamage {
        damage: DamageValue,
        hp_before: u32,
        hp_after: u32,
    },
    MakeDamage {
        source_player: usize,
        damages: Vec<DamageValue>,
    },
    AfterMakeDamage {
        source_player: usize,
        damages: Vec<DamageValue>,
    },
    CharacterDefeated {
        player: usize,
        character: usize,
    },
    CreateObject {
        position: Position,
        name: String,
        renewed: bool,
    },
    RemoveObject {
        position: Position,
        name: String,
    },
    MoveObject {
        from: Position,
        to: Position,
    },
    ChangeObjectUsage {
        position: Position,
        before: u32,
        after: u32,
    },
}
