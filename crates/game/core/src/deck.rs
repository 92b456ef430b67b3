//! Deck descriptions.
//!
//! Text format, one entry per line:
//!
//! ```text
//! default_version:4.0
//! character:Mona
//! character:Nahida@3.7
//! Wine-Stained Tricorne@3.3*2
//! Strategize*10
//! ```
//!
//! `@version` picks the newest version at or below the tag; `*N` repeats the
//! entry. Blank lines and `#` comments are ignored.

use core::fmt;
use core::str::FromStr;

use crate::catalog::{self, CardKind, CatalogError, CharacterKind};
use crate::config::MatchConfig;
use crate::state::Version;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckEntry {
    pub name: String,
    pub version: Option<Version>,
}

impl DeckEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    /// Applied to entries without an explicit version.
    pub default_version: Option<Version>,
    pub characters: Vec<DeckEntry>,
    pub cards: Vec<DeckEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeckError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("deck has {found} characters, expected {expected}")]
    CharacterCount { expected: usize, found: usize },

    #[error("deck has {found} cards, expected {expected}")]
    CardCount { expected: usize, found: usize },

    #[error("'{name}' appears {count} times, at most {max} allowed")]
    TooManyCopies {
        name: String,
        count: usize,
        max: usize,
    },
}

/// Deck with every entry resolved against the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedDeck {
    pub characters: Vec<(CharacterKind, Version)>,
    pub cards: Vec<(CardKind, Version)>,
}

impl Deck {
    fn version_of(&self, entry: &DeckEntry) -> Option<Version> {
        entry.version.or(self.default_version)
    }

    /// Checks the deck shape against `config`.
    pub fn validate(&self, config: &MatchConfig) -> Result<(), DeckError> {
        if !config.check_deck_restriction {
            return Ok(());
        }
        if self.characters.len() != config.character_number {
            return Err(DeckError::CharacterCount {
                expected: config.character_number,
                found: self.characters.len(),
            });
        }
        if self.cards.len() != config.card_number {
            return Err(DeckError::CardCount {
                expected: config.card_number,
                found: self.cards.len(),
            });
        }
        let mut names: Vec<&str> = self.cards.iter().map(|entry| entry.name.as_str()).collect();
        names.sort_unstable();
        for group in names.chunk_by(|a, b| a == b) {
            if group.len() > config.max_same_card_number {
                return Err(DeckError::TooManyCopies {
                    name: group[0].to_string(),
                    count: group.len(),
                    max: config.max_same_card_number,
                });
            }
        }
        Ok(())
    }

    /// Resolves every entry by name and version.
    pub fn resolve(&self) -> Result<ResolvedDeck, CatalogError> {
        let characters = self
            .characters
            .iter()
            .map(|entry| catalog::resolve_character(&entry.name, self.version_of(entry)))
            .collect::<Result<_, _>>()?;
        let cards = self
            .cards
            .iter()
            .map(|entry| catalog::resolve_card(&entry.name, self.version_of(entry)))
            .collect::<Result<_, _>>()?;
        Ok(ResolvedDeck { characters, cards })
    }
}

/// Splits `name[@version][*count]`.
fn parse_entry(text: &str, line: usize) -> Result<(DeckEntry, usize), DeckError> {
    let parse_error = |message: String| DeckError::Parse { line, message };
    let (body, count) = match text.rsplit_once('*') {
        Some((body, count)) => {
            let count = count
                .trim()
                .parse::<usize>()
                .map_err(|_| parse_error(format!("bad repeat count '{count}'")))?;
            (body, count)
        }
        None => (text, 1),
    };
    let (name, version) = match body.split_once('@') {
        Some((name, version)) => {
            let version = Version::from_str(version.trim())
                .map_err(|error| parse_error(format!("bad version '{}'", error.0)))?;
            (name, Some(version))
        }
        None => (body, None),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(parse_error("empty name".to_string()));
    }
    Ok((
        DeckEntry {
            name: name.to_string(),
            version,
        },
        count,
    ))
}

impl FromStr for Deck {
    type Err = DeckError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut deck = Deck::default();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = raw.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }
            if let Some(version) = content.strip_prefix("default_version:") {
                let version = Version::from_str(version.trim()).map_err(|error| {
                    DeckError::Parse {
                        line,
                        message: format!("bad version '{}'", error.0),
                    }
                })?;
                deck.default_version = Some(version);
                continue;
            }
            let character = content
                .strip_prefix("character:")
                .or_else(|| content.strip_prefix("charactor:"));
            let (entry, count) = parse_entry(character.unwrap_or(content), line)?;
            let target = if character.is_some() {
                &mut deck.characters
            } else {
                &mut deck.cards
            };
            target.extend(core::iter::repeat_n(entry, count));
        }
        Ok(deck)
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn entry(f: &mut fmt::Formatter<'_>, prefix: &str, entry: &DeckEntry) -> fmt::Result {
            write!(f, "{prefix}{}", entry.name)?;
            if let Some(version) = entry.version {
                write!(f, "@{version}")?;
            }
            writeln!(f)
        }

        if let Some(version) = self.default_version {
            writeln!(f, "default_version:{version}")?;
        }
        for character in &self.characters {
            entry(f, "character:", character)?;
        }
        for card in &self.cards {
            entry(f, "", card)?;
        }
        Ok(())
    }
}
