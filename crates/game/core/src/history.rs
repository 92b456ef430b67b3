//! Append-only log of state snapshots.

use crate::state::GameState;

/// Snapshots taken at every quiescence point.
///
/// Each entry is a deep copy; later play never reaches back into it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    snapshots: Vec<GameState>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: &GameState) {
        self.snapshots.push(state.clone());
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GameState> {
        self.snapshots.get(index)
    }

    pub fn latest(&self) -> Option<&GameState> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameState> {
        self.snapshots.iter()
    }

    /// Drops everything after `index` and returns a copy of that entry.
    pub fn rewind(&mut self, index: usize) -> Option<GameState> {
        let state = self.snapshots.get(index)?.clone();
        self.snapshots.truncate(index + 1);
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;

    #[test]
    fn rewind_truncates_later_entries() {
        let mut history = History::new();
        let mut state = GameState::new(MatchConfig::new(), 3);
        for round in 0..4 {
            state.round = round;
            history.push(&state);
        }
        let restored = history.rewind(1).expect("index in range");
        assert_eq!(restored.round, 1);
        assert_eq!(history.len(), 2);
        assert!(history.rewind(5).is_none());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn snapshots_are_independent_of_live_state() {
        let mut history = History::new();
        let mut state = GameState::new(MatchConfig::new(), 3);
        history.push(&state);
        state.round = 9;
        assert_eq!(history.latest().map(|s| s.round), Some(0));
    }
}
