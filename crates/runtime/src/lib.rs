//! Match orchestration on top of `tcg-core`.
//!
//! The core engine stops whenever it needs a player's choice. This crate
//! answers those requests through pluggable [`ResponseProvider`]s, runs a
//! match to completion with [`MatchRunner`], and records or replays the
//! response log with [`MatchRecord`].
//!
//! Modules are organized by responsibility:
//! - [`config`] loads runtime settings from the environment
//! - [`providers`] hosts the response sources (scripted, random, silent)
//! - [`runner`] alternates providers until the match stops
//! - [`replay`] persists and re-executes response logs
pub mod config;
pub mod error;
pub mod providers;
pub mod replay;
pub mod runner;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use providers::{NothingProvider, RandomProvider, ResponseProvider, ScriptedProvider};
pub use replay::MatchRecord;
pub use runner::{MatchRunner, RunStatus};
