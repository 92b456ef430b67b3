//! Runtime configuration and its environment loader.
use std::env;
use std::path::PathBuf;

use tcg_core::MatchConfig;

/// Settings for running matches outside of tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Fixed match seed; fresh entropy when unset.
    pub seed: Option<u64>,
    /// Engine steps a runner may take before giving up.
    pub max_steps: usize,
    pub max_rounds: u32,
    /// Copies of one card a deck may hold.
    pub max_same_card: usize,
    pub history: bool,
    /// Where to write the match record, if anywhere.
    pub record_path: Option<PathBuf>,
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_STEPS: usize = 10_000;

    /// Construct configuration from process environment variables.
    ///
    /// - `TCG_SEED`
    /// - `TCG_MAX_STEPS`
    /// - `TCG_MAX_ROUNDS`
    /// - `TCG_MAX_SAME_CARD`
    /// - `TCG_HISTORY` (`true`/`false`, `1`/`0`, `on`/`off`)
    /// - `TCG_RECORD_PATH`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("TCG_SEED");

        if let Some(steps) = read_env::<usize>("TCG_MAX_STEPS") {
            config.max_steps = steps.max(1);
        }

        if let Some(rounds) = read_env::<u32>("TCG_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }

        if let Some(copies) = read_env::<usize>("TCG_MAX_SAME_CARD") {
            config.max_same_card = copies.max(1);
        }

        if let Some(history) = read_env_bool("TCG_HISTORY") {
            config.history = history;
        }

        config.record_path = read_env::<PathBuf>("TCG_RECORD_PATH");

        config
    }

    /// Match rules with this runtime's overrides applied.
    pub fn match_config(&self) -> MatchConfig {
        let mut config = MatchConfig::new().with_max_round_number(self.max_rounds);
        config.max_same_card_number = self.max_same_card;
        config.history_enabled = self.history;
        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_steps: Self::DEFAULT_MAX_STEPS,
            max_rounds: MatchConfig::DEFAULT_MAX_ROUND_NUMBER,
            max_same_card: MatchConfig::DEFAULT_MAX_SAME_CARD_NUMBER,
            history: true,
            record_path: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_spellings() {
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn match_config_carries_overrides() {
        let config = RuntimeConfig {
            max_rounds: 3,
            max_same_card: 4,
            history: false,
            ..RuntimeConfig::default()
        };
        let rules = config.match_config();
        assert_eq!(rules.max_round_number, 3);
        assert_eq!(rules.max_same_card_number, 4);
        assert!(!rules.history_enabled);
        assert!(rules.check_deck_restriction);
    }
}
