//! Seeded matches are reproducible byte for byte.

mod common;

use common::{new_match, random_play_config, random_play_decks};
use tcg_core::{Match, Phase, Response};
use tcg_runtime::{MatchRecord, MatchRunner, RandomProvider, RunStatus};

fn random_match(seed: u64) -> (Match, Vec<Response>, RunStatus) {
    let mut game = new_match(random_play_config(4), seed, random_play_decks());
    let mut runner = MatchRunner::new(RandomProvider::new(seed), RandomProvider::new(seed + 1));
    let status = runner.run(&mut game).expect("random play");
    (game, runner.into_responses(), status)
}

fn digests(game: &Match) -> Vec<[u8; 32]> {
    game.history()
        .iter()
        .map(|state| state.digest().expect("digest"))
        .collect()
}

#[test]
fn same_seed_same_snapshots() {
    let (first, first_responses, first_status) = random_match(42);
    let (second, second_responses, second_status) = random_match(42);
    assert_eq!(first_status, second_status);
    assert_eq!(first_responses, second_responses);
    assert_eq!(digests(&first), digests(&second));
    assert_eq!(first.state(), second.state());
}

#[test]
fn random_play_always_terminates() {
    for seed in 0..12 {
        let (game, _, status) = random_match(seed);
        assert!(matches!(status, RunStatus::Finished(_)), "seed {seed}: {status:?}");
        assert_eq!(game.phase(), Phase::Ended);
        assert!(game.state().round <= 4);
    }
}

#[test]
fn random_play_keeps_board_limits() {
    for seed in 100..106 {
        let (game, _, _) = random_match(seed);
        for snapshot in game.history().iter() {
            let config = &snapshot.config;
            for table in &snapshot.tables {
                assert!(table.hand.len() <= config.max_hand_size);
                assert!(table.dice.len() <= config.max_dice_number);
                for character in &table.characters {
                    assert!(character.hp <= character.max_hp);
                    assert!(character.charge <= character.max_charge);
                    assert_eq!(character.alive, character.hp > 0);
                    for object in character.equipment().chain(character.statuses.iter()) {
                        assert!(object.usage.current <= object.usage.max);
                    }
                }
                for object in table.team_statuses.iter().chain(&table.summons).chain(&table.supports) {
                    assert!(object.usage.current <= object.usage.max);
                }
            }
        }
    }
}

#[test]
fn record_replays_through_a_file() {
    let (game, responses, _) = random_match(7);
    let record = MatchRecord::capture(&game, &responses).expect("record");
    assert_eq!(record.digests.len(), game.history().len());

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("match.json");
    record.save(&path).expect("save");
    let loaded = MatchRecord::load(&path).expect("load");
    assert_eq!(loaded, record);

    let replayed = loaded.replay().expect("replay matches");
    assert_eq!(replayed.state(), game.state());
}

#[test]
fn tampered_record_is_detected() {
    let (game, responses, _) = random_match(8);
    let mut record = MatchRecord::capture(&game, &responses).expect("record");
    let last = record.digests.len() - 1;
    record.digests[last] = "00".repeat(32);
    assert!(matches!(
        record.replay(),
        Err(tcg_runtime::RuntimeError::ReplayDiverged { index }) if index == last
    ));
}
