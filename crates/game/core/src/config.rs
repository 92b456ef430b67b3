use crate::state::DieColor;

/// Match configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    /// Characters every deck must contain.
    pub character_number: usize,
    /// Action cards every deck must contain.
    pub card_number: usize,
    /// Copies of one card allowed in a deck.
    pub max_same_card_number: usize,
    /// Skip deck-shape checks when false (content names are still resolved).
    pub check_deck_restriction: bool,

    pub initial_hand_size: usize,
    /// Cards drawn by each player during the end phase.
    pub card_draw_per_round: usize,
    /// Cards beyond this are discarded on draw.
    pub max_hand_size: usize,

    pub initial_dice_number: usize,
    pub max_dice_number: usize,
    /// Reroll requests issued during the roll phase.
    pub initial_dice_reroll_times: u32,

    /// The match ends in a draw once this round finishes.
    pub max_round_number: u32,
    /// Pick the first player with the match random source instead of player 0.
    pub random_first_player: bool,
    /// Every rolled die takes this color. Used by scenario tests.
    pub fixed_dice_color: Option<DieColor>,
    /// Record a snapshot at every quiescence point.
    pub history_enabled: bool,
}

impl MatchConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_PLAYERS: usize = 2;
    pub const MAX_SUMMONS: usize = 4;
    pub const MAX_SUPPORTS: usize = 4;
    /// Upper bound on actions drained by a single step before the match is
    /// considered runaway.
    pub const MAX_ACTIONS_PER_STEP: usize = 4096;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CHARACTER_NUMBER: usize = 3;
    pub const DEFAULT_CARD_NUMBER: usize = 30;
    pub const DEFAULT_MAX_SAME_CARD_NUMBER: usize = 2;
    pub const DEFAULT_INITIAL_HAND_SIZE: usize = 5;
    pub const DEFAULT_CARD_DRAW_PER_ROUND: usize = 2;
    pub const DEFAULT_MAX_HAND_SIZE: usize = 10;
    pub const DEFAULT_INITIAL_DICE_NUMBER: usize = 8;
    pub const DEFAULT_MAX_DICE_NUMBER: usize = 16;
    pub const DEFAULT_REROLL_TIMES: u32 = 1;
    pub const DEFAULT_MAX_ROUND_NUMBER: u32 = 15;

    pub fn new() -> Self {
        Self {
            character_number: Self::DEFAULT_CHARACTER_NUMBER,
            card_number: Self::DEFAULT_CARD_NUMBER,
            max_same_card_number: Self::DEFAULT_MAX_SAME_CARD_NUMBER,
            check_deck_restriction: true,
            initial_hand_size: Self::DEFAULT_INITIAL_HAND_SIZE,
            card_draw_per_round: Self::DEFAULT_CARD_DRAW_PER_ROUND,
            max_hand_size: Self::DEFAULT_MAX_HAND_SIZE,
            initial_dice_number: Self::DEFAULT_INITIAL_DICE_NUMBER,
            max_dice_number: Self::DEFAULT_MAX_DICE_NUMBER,
            initial_dice_reroll_times: Self::DEFAULT_REROLL_TIMES,
            max_round_number: Self::DEFAULT_MAX_ROUND_NUMBER,
            random_first_player: false,
            fixed_dice_color: None,
            history_enabled: true,
        }
    }

    /// Configuration used by scenario tests: every die is omni and deck
    /// shape checks are relaxed.
    pub fn for_scenarios() -> Self {
        Self {
            check_deck_restriction: false,
            fixed_dice_color: Some(DieColor::Omni),
            ..Self::new()
        }
    }

    pub fn with_max_round_number(mut self, rounds: u32) -> Self {
        self.max_round_number = rounds.max(1);
        self
    }

    pub fn with_fixed_dice(mut self, color: DieColor) -> Self {
        self.fixed_dice_color = Some(color);
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new()
    }
}
