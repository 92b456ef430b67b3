//! Combat resolution helpers.
//!
//! Pure functions and value types used by the make-damage handler. Nothing in
//! here touches [`GameState`](crate::state::GameState); the handler owns
//! every mutation.
//!
//! # Core Pieces
//!
//! - [`DamageValue`]: one damage or heal instance as it flows through the
//!   modifier passes
//! - [`resolve_reaction`]: aura bookkeeping and reaction lookup
//! - [`apply_hp_change`]: HP update clamped to `0..=max_hp`

pub mod damage;
pub mod reaction;

pub use damage::{DamageValue, apply_hp_change};
pub use reaction::{Reaction, ReactionOutcome, resolve_reaction};
