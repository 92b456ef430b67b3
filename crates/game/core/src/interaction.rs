//! Request/Response boundary.
//!
//! The engine asks players for choices with [`Request`]s and blocks until a
//! matching [`Response`] arrives. Every request carries its legal choices;
//! costs are `TEST`-mode previews and the dice in a response must pay them
//! exactly.

use crate::catalog::{CardKind, SkillKind};
use crate::state::{Cost, ObjectId, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    pub player: usize,
    pub kind: RequestKind,
}

impl Request {
    pub fn new(player: usize, kind: RequestKind) -> Self {
        Self { player, kind }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RequestKind {
    /// Mulligan: return any hand cards and redraw as many.
    SwitchCard,
    /// Pick a new active character from `candidates`.
    ChooseCharacter { candidates: Vec<usize> },
    /// Reroll any dice; `remaining` counts this chance.
    RerollDice { remaining: u32 },
    SwitchCharacter { character: usize, cost: Cost },
    /// Convert one of `dice` by discarding one of `cards`.
    ElementalTuning {
        dice: Vec<usize>,
        cards: Vec<ObjectId>,
    },
    DeclareRoundEnd,
    UseSkill {
        character: usize,
        skill: SkillKind,
        position: Position,
        cost: Cost,
    },
    UseCard {
        card: CardKind,
        position: Position,
        cost: Cost,
        /// Legal targets; empty for cards without one.
        targets: Vec<Position>,
    },
}

impl RequestKind {
    /// Cost to pay, for requests that have one.
    pub fn cost(&self) -> Option<&Cost> {
        match self {
            RequestKind::SwitchCharacter { cost, .. }
            | RequestKind::UseSkill { cost, .. }
            | RequestKind::UseCard { cost, .. } => Some(cost),
            _ => None,
        }
    }
}

/// A player's answer to one outstanding request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Response {
    pub request: Request,
    pub kind: ResponseKind,
}

impl Response {
    pub fn new(request: Request, kind: ResponseKind) -> Self {
        Self { request, kind }
    }

    pub fn player(&self) -> usize {
        self.request.player
    }
}

#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ResponseKind {
    /// Hand indices to return.
    SwitchCard { cards: Vec<usize> },
    /// Index into the request's candidates.
    ChooseCharacter { character: usize },
    /// Pool indices to reroll.
    RerollDice { dice: Vec<usize> },
    SwitchCharacter { dice: Vec<usize> },
    /// Index into the request's dice and cards.
    ElementalTuning { die: usize, card: usize },
    DeclareRoundEnd,
    UseSkill { dice: Vec<usize> },
    /// `target` indexes the request's targets.
    UseCard {
        dice: Vec<usize>,
        target: Option<usize>,
    },
}

impl ResponseKind {
    /// True when this answer has the shape `request` asks for.
    pub fn answers(&self, request: &RequestKind) -> bool {
        matches!(
            (self, request),
            (ResponseKind::SwitchCard { .. }, RequestKind::SwitchCard)
                | (
                    ResponseKind::ChooseCharacter { .. },
                    RequestKind::ChooseCharacter { .. }
                )
                | (ResponseKind::RerollDice { .. }, RequestKind::RerollDice { .. })
                | (
                    ResponseKind::SwitchCharacter { .. },
                    RequestKind::SwitchCharacter { .. }
                )
                | (
                    ResponseKind::ElementalTuning { .. },
                    RequestKind::ElementalTuning { .. }
                )
                | (ResponseKind::DeclareRoundEnd, RequestKind::DeclareRoundEnd)
                | (ResponseKind::UseSkill { .. }, RequestKind::UseSkill { .. })
                | (ResponseKind::UseCard { .. }, RequestKind::UseCard { .. })
        )
    }
}
