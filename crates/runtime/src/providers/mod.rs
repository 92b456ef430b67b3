//! Sources of player choices.
//!
//! The runner asks a [`ResponseProvider`] whenever its player has an
//! outstanding request. Implementations cover scripted fixtures, seeded
//! random play and a silent provider that never answers.
mod random;
mod scripted;

pub use random::RandomProvider;
pub use scripted::ScriptedProvider;

use tcg_core::{GameState, Response};

use crate::error::Result;

/// Answers requests on behalf of one player.
pub trait ResponseProvider {
    /// Picks an answer to one of `player`'s outstanding requests.
    ///
    /// `Ok(None)` means the provider has nothing to say; the runner stops
    /// and hands control back to its caller.
    fn respond(&mut self, player: usize, state: &GameState) -> Result<Option<Response>>;
}

impl<P: ResponseProvider + ?Sized> ResponseProvider for Box<P> {
    fn respond(&mut self, player: usize, state: &GameState) -> Result<Option<Response>> {
        (**self).respond(player, state)
    }
}

/// Never answers. Useful for stopping a runner at the first request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NothingProvider;

impl ResponseProvider for NothingProvider {
    fn respond(&mut self, _player: usize, _state: &GameState) -> Result<Option<Response>> {
        Ok(None)
    }
}
