#![allow(dead_code)]

use tcg_core::{Deck, Match, MatchConfig};
use tcg_runtime::{MatchRunner, ScriptedProvider};

/// Omni dice, relaxed deck checks, twelve dice and no rerolls.
pub fn scenario_config() -> MatchConfig {
    let mut config = MatchConfig::for_scenarios();
    config.initial_dice_number = 12;
    config.initial_dice_reroll_times = 0;
    config
}

/// Three characters and thirty copies of one card.
pub fn deck(characters: &[&str], card: &str) -> Deck {
    let mut text = String::new();
    for character in characters {
        text.push_str(&format!("character:{character}\n"));
    }
    text.push_str(&format!("{card}*30\n"));
    text.parse().expect("deck text")
}

pub fn scripted(script: &str) -> ScriptedProvider {
    ScriptedProvider::new(script).expect("script")
}

pub fn new_match(config: MatchConfig, seed: u64, decks: [Deck; 2]) -> Match {
    let mut game = Match::new(config, Some(seed));
    game.set_decks(decks);
    game
}

pub fn runner(first: &str, second: &str) -> MatchRunner {
    MatchRunner::new(scripted(first), scripted(second)).with_max_steps(500)
}

/// Full rules with real dice, but decks may repeat a card more than twice.
pub fn random_play_config(max_rounds: u32) -> MatchConfig {
    let mut config = MatchConfig::new().with_max_round_number(max_rounds);
    config.max_same_card_number = 4;
    config
}

/// Thirty-card decks touching every card in the catalog.
pub fn random_play_decks() -> [Deck; 2] {
    let first: Deck = "
        default_version:4.0
        character:Mona
        character:Nahida
        character:Bennett
        Strategize*3
        Paimon*3
        Magic Guide*3
        Wine-Stained Tricorne*2
        Wine-Stained Tricorne@3.3*1
        Laurel Coronet*2
        Witch's Scorching Hat*2
        Broken Rime's Echo*2
        Prophecy of Submersion*4
        The Seed of Stored Knowledge*4
        Grand Expectation*4
    "
    .parse()
    .expect("first deck");
    let second: Deck = "
        character:CryoMob
        character:ElectroMobMage
        character:GeoMob
        Strategize*4
        Paimon*4
        Magic Guide*4
        Broken Rime's Echo*3
        Thunder Summoner's Crown*3
        Mask of Solitude Basalt@3.3*3
        Viridescent Venerer's Diadem*3
        Witch's Scorching Hat*3
        Laurel Coronet@3.3*3
    "
    .parse()
    .expect("second deck");
    [first, second]
}
