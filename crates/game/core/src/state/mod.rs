//! Canonical match state.
//!
//! [`GameState`] is the root aggregate: both player tables, the phase
//! machine, the pending action queue, outstanding requests and the random
//! source. It is a plain value (no shared pointers), so a `clone()` is a
//! structurally independent snapshot.
mod character;
mod dice;
mod object;
mod position;
mod table;

pub use character::{Character, Skill, SkillType};
pub use dice::{Cost, CostLabels, DamageElement, DamageType, DieColor, Element};
pub use object::{Card, Object, Usage, Version, VersionParseError};
pub use position::{Area, ObjectId, Position, PositionCheck};
pub use table::PlayerTable;

use std::collections::VecDeque;

use crate::action::Action;
use crate::config::MatchConfig;
use crate::interaction::Request;
use crate::rng::MatchRng;

/// Match-level state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Idle,
    Starting,
    Preparation,
    RollPhase,
    ActionPhase,
    EndPhase,
    Ended,
    /// Absorbing state entered on an invariant violation.
    Error,
}

impl Phase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Ended | Phase::Error)
    }
}

/// Progress marker inside the current phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// Entry work of the phase has not been scheduled.
    Enter,
    /// Entry work is queued; the phase's first request round comes next.
    Requests,
    /// Second request round or follow-up work of the phase.
    Followup,
    /// Everything is done; the next quiescence leaves the phase.
    Finish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Winner(usize),
    Draw,
}

/// Root aggregate of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub config: MatchConfig,
    pub seed: u64,
    pub phase: Phase,
    pub stage: Stage,
    pub round: u32,
    /// Player whose turn it is during the action phase.
    pub current_player: usize,
    /// Player acting first in the current round (and, once someone declares
    /// round end, in the next one).
    pub first_player: usize,
    pub tables: [PlayerTable; 2],
    /// Pending actions, drained front to back.
    pub queue: VecDeque<Action>,
    /// Queue index where the next response-produced action is inserted.
    /// Reset to zero whenever draining resumes.
    pub response_insert_at: usize,
    pub requests: Vec<Request>,
    pub rng: MatchRng,
    /// Last id handed out. Ids start at 1.
    pub last_id: u32,
    pub outcome: Option<Outcome>,
    /// Actions applied since the match started.
    pub action_count: u64,
}

impl GameState {
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            phase: Phase::Idle,
            stage: Stage::Enter,
            round: 0,
            current_player: 0,
            first_player: 0,
            tables: [PlayerTable::new(0), PlayerTable::new(1)],
            queue: VecDeque::new(),
            response_insert_at: 0,
            requests: Vec::new(),
            rng: MatchRng::from_seed(seed),
            last_id: 0,
            outcome: None,
            action_count: 0,
        }
    }

    pub fn allocate_id(&mut self) -> ObjectId {
        self.last_id += 1;
        ObjectId(self.last_id)
    }

    /// True when `id` was handed out at some point, even if the object is gone.
    pub fn was_allocated(&self, id: ObjectId) -> bool {
        id.is_assigned() && id.0 <= self.last_id
    }

    pub fn table(&self, player: usize) -> &PlayerTable {
        &self.tables[player]
    }

    pub fn table_mut(&mut self, player: usize) -> &mut PlayerTable {
        &mut self.tables[player]
    }

    pub fn enter_phase(&mut self, phase: Phase) {
        tracing::debug!(
            target: "tcg::engine",
            from = %self.phase,
            to = %phase,
            round = self.round,
            "phase transition"
        );
        self.phase = phase;
        self.stage = Stage::Enter;
    }

    pub fn requests_for(&self, player: usize) -> impl Iterator<Item = &Request> {
        self.requests.iter().filter(move |request| request.player == player)
    }

    pub fn character(&self, position: &Position) -> Option<&Character> {
        self.tables
            .get(position.player)?
            .characters
            .get(position.character?)
    }

    pub fn character_mut(&mut self, position: &Position) -> Option<&mut Character> {
        self.tables
            .get_mut(position.player)?
            .characters
            .get_mut(position.character?)
    }

    pub fn card(&self, position: &Position) -> Option<&Card> {
        let table = self.tables.get(position.player)?;
        match position.area {
            Area::Hand => table.hand.iter().find(|card| card.id == position.id),
            Area::Deck => table.deck.iter().find(|card| card.id == position.id),
            _ => None,
        }
    }

    pub fn skill(&self, position: &Position) -> Option<&Skill> {
        if position.area != Area::Skill {
            return None;
        }
        self.character(position)?.skill(position.id)
    }

    /// Looks up a status, summon, support or equipment by position.
    pub fn object(&self, position: &Position) -> Option<&Object> {
        let table = self.tables.get(position.player)?;
        let by_id = |object: &&Object| object.id == position.id;
        match position.area {
            Area::Character => self.character(position)?.equipment().find(by_id),
            Area::CharacterStatus => self.character(position)?.statuses.iter().find(by_id),
            Area::TeamStatus => table.team_statuses.iter().find(by_id),
            Area::Summon => table.summons.iter().find(by_id),
            Area::Support => table.supports.iter().find(by_id),
            _ => None,
        }
    }

    pub fn object_mut(&mut self, position: &Position) -> Option<&mut Object> {
        let id = position.id;
        let by_id = |object: &&mut Object| object.id == id;
        match position.area {
            Area::Character => {
                let character = self.character_mut(position)?;
                character
                    .weapon
                    .iter_mut()
                    .chain(character.artifact.iter_mut())
                    .chain(character.talent.iter_mut())
                    .find(by_id)
            }
            Area::CharacterStatus => self
                .character_mut(position)?
                .statuses
                .iter_mut()
                .find(by_id),
            Area::TeamStatus => self
                .tables
                .get_mut(position.player)?
                .team_statuses
                .iter_mut()
                .find(by_id),
            Area::Summon => self
                .tables
                .get_mut(position.player)?
                .summons
                .iter_mut()
                .find(by_id),
            Area::Support => self
                .tables
                .get_mut(position.player)?
                .supports
                .iter_mut()
                .find(by_id),
            _ => None,
        }
    }

    /// Usage counter of the object or skill at `position`.
    pub fn usage(&self, position: &Position) -> Option<Usage> {
        match position.area {
            Area::Skill => self.skill(position).map(|skill| skill.usage),
            _ => self.object(position).map(|object| object.usage),
        }
    }

    pub fn usage_mut(&mut self, position: &Position) -> Option<&mut Usage> {
        match position.area {
            Area::Skill => {
                let id = position.id;
                self.character_mut(position)?
                    .skills
                    .iter_mut()
                    .find(|skill| skill.id == id)
                    .map(|skill| &mut skill.usage)
            }
            _ => self.object_mut(position).map(|object| &mut object.usage),
        }
    }

    /// True when something currently lives at `position`.
    pub fn contains(&self, position: &Position) -> bool {
        match position.area {
            Area::Hand | Area::Deck => self.card(position).is_some(),
            Area::Skill => self.skill(position).is_some(),
            Area::Character => {
                self.character(position).is_some_and(|c| c.id == position.id)
                    || self.object(position).is_some()
            }
            _ => self.object(position).is_some(),
        }
    }

    /// Canonical SHA-256 digest of the full state.
    ///
    /// Two matches fed the same seed and responses produce the same digest at
    /// every history index.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        // bincode serialization of plain data is deterministic
        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}
