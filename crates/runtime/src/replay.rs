//! Response logs that reproduce a match.
//!
//! A [`MatchRecord`] holds everything a match depends on: seed, rules,
//! decks and the accepted responses in order. Replaying it re-runs the
//! engine and checks every snapshot digest against the recorded one.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tcg_core::{Deck, Match, MatchConfig, MatchError, Response, StepStatus};

use crate::error::{Result, RuntimeError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub seed: u64,
    pub config: MatchConfig,
    /// Decks in their text form.
    pub decks: [String; 2],
    pub responses: Vec<Response>,
    /// Hex SHA-256 of every history snapshot.
    pub digests: Vec<String>,
}

impl MatchRecord {
    /// Captures `game` together with the responses that produced it.
    pub fn capture(game: &Match, responses: &[Response]) -> Result<Self> {
        let [first, second] = game.decks().ok_or(MatchError::DecksMissing)?;
        Ok(Self {
            seed: game.seed(),
            config: game.state().config.clone(),
            decks: [first.to_string(), second.to_string()],
            responses: responses.to_vec(),
            digests: digests(game)?,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Re-runs the match and checks it against the recorded digests.
    ///
    /// Stops once the responses run out with requests still outstanding.
    pub fn replay(&self) -> Result<Match> {
        let mut decks = Vec::with_capacity(2);
        for (player, text) in self.decks.iter().enumerate() {
            let deck: Deck = text
                .parse()
                .map_err(|error| RuntimeError::Deck { player, error })?;
            decks.push(deck);
        }
        let [first, second]: [Deck; 2] = decks
            .try_into()
            .map_err(|_| RuntimeError::Json("record must hold two decks".to_string()))?;

        let mut game = Match::new(self.config.clone(), Some(self.seed));
        game.set_decks([first, second]);
        game.start()?;

        let mut responses = self.responses.iter();
        loop {
            if game.requests().is_empty() {
                if let StepStatus::Ended(_) = game.step()? {
                    break;
                }
                continue;
            }
            let Some(response) = responses.next() else {
                break;
            };
            game.respond(response)?;
        }

        let replayed = digests(&game)?;
        if let Some(index) = first_divergence(&self.digests, &replayed) {
            tracing::warn!(target: "tcg::runtime", index, "replay diverged");
            return Err(RuntimeError::ReplayDiverged { index });
        }
        tracing::debug!(target: "tcg::runtime", snapshots = replayed.len(), "replay matched");
        Ok(game)
    }
}

fn digests(game: &Match) -> Result<Vec<String>> {
    game.history()
        .iter()
        .map(|state| {
            state
                .digest()
                .map(hex::encode)
                .map_err(|error| RuntimeError::Digest(error.to_string()))
        })
        .collect()
}

fn first_divergence(recorded: &[String], replayed: &[String]) -> Option<usize> {
    recorded
        .iter()
        .zip(replayed)
        .position(|(a, b)| a != b)
        .or_else(|| (recorded.len() != replayed.len()).then(|| recorded.len().min(replayed.len())))
}
