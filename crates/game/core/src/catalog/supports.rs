//! Supports.

use crate::action::{Action, ChangeObjectUsageAction, CreateDiceAction};
use crate::event::Event;
use crate::state::{DieColor, GameState, Object, Usage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SupportKind {
    /// Two omni dice at the start of each of the next two rounds.
    Paimon,
}

impl SupportKind {
    pub const ALL: [SupportKind; 1] = [SupportKind::Paimon];

    pub fn name(self) -> &'static str {
        match self {
            SupportKind::Paimon => "Paimon",
        }
    }

    pub fn usage(self) -> Usage {
        match self {
            SupportKind::Paimon => Usage::full(2),
        }
    }
}

pub(super) fn on_event(
    kind: SupportKind,
    object: &Object,
    event: &Event,
    _game: &GameState,
) -> Vec<Action> {
    match (kind, event) {
        (SupportKind::Paimon, Event::RoundPrepare { .. }) if object.usage.current > 0 => vec![
            Action::CreateDice(CreateDiceAction {
                player: object.position.player,
                colors: vec![DieColor::Omni, DieColor::Omni],
            }),
            Action::ChangeObjectUsage(ChangeObjectUsageAction::delta(object.position, -1)),
        ],
        _ => Vec::new(),
    }
}
