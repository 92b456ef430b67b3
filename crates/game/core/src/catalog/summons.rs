//! Summons.

use crate::action::{Action, ChangeObjectUsageAction, MakeDamageAction, RemoveObjectAction};
use crate::combat::DamageValue;
use crate::event::Event;
use crate::hooks::{HookCommit, HookContext};
use crate::modifier::ModifiableValue;
use crate::state::{DamageElement, GameState, Object, PositionCheck, Usage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SummonKind {
    /// Mona's summon: shields the active character, hits on round end.
    Reflection,
    /// Left behind by the burning reaction.
    BurningFlame,
}

impl SummonKind {
    pub const ALL: [SummonKind; 2] = [SummonKind::Reflection, SummonKind::BurningFlame];

    pub fn name(self) -> &'static str {
        match self {
            SummonKind::Reflection => "Reflection",
            SummonKind::BurningFlame => "Burning Flame",
        }
    }

    pub fn usage(self) -> Usage {
        match self {
            SummonKind::Reflection => Usage::full(1),
            SummonKind::BurningFlame => Usage::new(1, 2),
        }
    }

    /// Reflection keeps attacking at round end after its shield is spent.
    pub fn removes_when_depleted(self) -> bool {
        !matches!(self, SummonKind::Reflection)
    }

    fn round_end_damage(self) -> (DamageElement, u32) {
        match self {
            SummonKind::Reflection => (DamageElement::Hydro, 1),
            SummonKind::BurningFlame => (DamageElement::Pyro, 1),
        }
    }
}

pub(super) fn modify_value(
    kind: SummonKind,
    object: &Object,
    value: &mut ModifiableValue,
    ctx: &HookContext<'_>,
) -> Option<HookCommit> {
    match (kind, value) {
        (SummonKind::Reflection, ModifiableValue::DamageDecrease(damage))
            if object.usage.current > 0
                && object.position.check(&damage.target, ctx.game, PositionCheck::OWN_ACTIVE)
                && !damage.is_heal()
                && !damage.is_piercing()
                && damage.damage > 0 =>
        {
            damage.reduce(1);
            Some(HookCommit::ConsumeUsage(1))
        }
        _ => None,
    }
}

pub(super) fn on_event(
    kind: SummonKind,
    object: &Object,
    event: &Event,
    game: &GameState,
) -> Vec<Action> {
    let Event::RoundEnd { .. } = event else {
        return Vec::new();
    };
    let player = object.position.player;
    let mut actions = Vec::new();
    if let Some(target) = game.table(1 - player).active_character() {
        let (element, amount) = kind.round_end_damage();
        actions.push(Action::MakeDamage(MakeDamageAction::single(
            player,
            DamageValue::damage(object.position, target.position, element, amount),
        )));
    }
    actions.push(match kind {
        SummonKind::Reflection => Action::RemoveObject(RemoveObjectAction {
            position: object.position,
        }),
        SummonKind::BurningFlame => {
            Action::ChangeObjectUsage(ChangeObjectUsageAction::delta(object.position, -1))
        }
    });
    actions
}
