//! Deterministic rules-resolution core of a two-player card battle.
//!
//! `tcg-core` owns the canonical match state, the action queue and its
//! handlers, event dispatch, the value modifier pipeline and the phase
//! machine, plus the hosted content catalog. All state mutation flows
//! through [`engine::GameEngine`]; [`Match`] wraps it with decks and a
//! history log.
pub mod action;
pub mod catalog;
pub mod combat;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod event;
pub mod history;
pub mod hooks;
pub mod interaction;
pub mod modifier;
pub mod rng;
pub mod session;
pub mod state;

pub use action::{Action, ActionError, ActionOutcome, ActionTransition};
pub use catalog::{CardKind, CatalogError, CharacterKind, ObjectKind, SkillKind};
pub use combat::{DamageValue, Reaction};
pub use config::MatchConfig;
pub use deck::{Deck, DeckEntry, DeckError};
pub use engine::{
    EngineError, GameEngine, ResponseError, StartError, StepStatus, TransitionPhase,
    TransitionPhaseError,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use event::Event;
pub use history::History;
pub use hooks::{HookCommit, HookContext, Mode, RuleObject};
pub use interaction::{Request, RequestKind, Response, ResponseKind};
pub use modifier::ModifiableValue;
pub use rng::MatchRng;
pub use session::{Match, MatchError};
pub use state::{
    Area, Card, Character, Cost, CostLabels, DamageElement, DieColor, Element, GameState, Object,
    ObjectId, Outcome, Phase, PlayerTable, Position, PositionCheck, Skill, Usage, Version,
};
