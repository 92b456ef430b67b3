//! Action handler errors.
//!
//! Every variant is an invariant violation: rule content is expected to
//! enqueue only actions whose preconditions hold.

use crate::catalog::CatalogError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("no object at {position:?}")]
    ObjectNotFound { position: Position },

    #[error("object at {position:?} was never created")]
    UnknownObject { position: Position },

    #[error("player {player} has no character in slot {character}")]
    CharacterNotFound { player: usize, character: usize },

    #[error("character {character} of player {player} is defeated")]
    CharacterDefeated { player: usize, character: usize },

    #[error("character {character} of player {player} is already active")]
    AlreadyActive { player: usize, character: usize },

    #[error("player {player} has no active character")]
    NoActiveCharacter { player: usize },

    #[error("die index {index} out of range for player {player}")]
    DieIndexOutOfRange { player: usize, index: usize },

    #[error("duplicate die index {index}")]
    DuplicateDieIndex { index: usize },

    #[error("card {position:?} is not in hand")]
    CardNotInHand { position: Position },

    #[error("usage of {position:?} is {current}, cannot spend {requested}")]
    UsageUnderflow {
        position: Position,
        current: u32,
        requested: u32,
    },

    #[error("charge {current} cannot pay {requested}")]
    ChargeUnderflow { current: u32, requested: u32 },

    #[error("chosen dice do not pay the committed cost")]
    PaymentMismatch,

    #[error("{position:?} cannot hold this object")]
    InvalidDestination { position: Position },

    #[error("{position:?} is not a usable skill")]
    InvalidSkill { position: Position },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ObjectNotFound { .. } => "ACTION_OBJECT_NOT_FOUND",
            Self::UnknownObject { .. } => "ACTION_UNKNOWN_OBJECT",
            Self::CharacterNotFound { .. } => "ACTION_CHARACTER_NOT_FOUND",
            Self::CharacterDefeated { .. } => "ACTION_CHARACTER_DEFEATED",
            Self::AlreadyActive { .. } => "ACTION_ALREADY_ACTIVE",
            Self::NoActiveCharacter { .. } => "ACTION_NO_ACTIVE_CHARACTER",
            Self::DieIndexOutOfRange { .. } => "ACTION_DIE_INDEX_OUT_OF_RANGE",
            Self::DuplicateDieIndex { .. } => "ACTION_DUPLICATE_DIE_INDEX",
            Self::CardNotInHand { .. } => "ACTION_CARD_NOT_IN_HAND",
            Self::UsageUnderflow { .. } => "ACTION_USAGE_UNDERFLOW",
            Self::ChargeUnderflow { .. } => "ACTION_CHARGE_UNDERFLOW",
            Self::PaymentMismatch => "ACTION_PAYMENT_MISMATCH",
            Self::InvalidDestination { .. } => "ACTION_INVALID_DESTINATION",
            Self::InvalidSkill { .. } => "ACTION_INVALID_SKILL",
            Self::Catalog(_) => "ACTION_CATALOG",
        }
    }
}
