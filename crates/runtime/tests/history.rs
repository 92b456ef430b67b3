//! Snapshot history and rewinding.

mod common;

use common::{deck, new_match, runner, scenario_config, scripted};
use tcg_core::{Match, RequestKind, StepStatus};
use tcg_runtime::RunStatus;

fn opened() -> (Match, tcg_runtime::MatchRunner) {
    let mut game = new_match(
        scenario_config(),
        3,
        [
            deck(&["PyroMob", "HydroMobMage", "GeoMob"], "Strategize"),
            deck(&["CryoMob", "ElectroMob", "DendroMob"], "Strategize"),
        ],
    );
    let mut runner = runner(
        "
        sw_card
        choose 0
        skill 0 omni omni omni
        ",
        "
        sw_card
        choose 0
        skill 0 omni omni omni
        ",
    );
    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 0 });
    (game, runner)
}

#[test]
fn snapshot_per_step_and_independent_copies() {
    let (game, _) = opened();
    let history = game.history();
    assert!(history.len() >= 4);
    let latest = history.latest().expect("snapshot");
    assert_eq!(latest, game.state());
    // Earlier snapshots kept the hp they had at the time.
    let first = history.get(0).expect("snapshot");
    assert_eq!(first.table(1).characters[0].hp, 10);
    assert_eq!(latest.table(1).characters[0].hp, 8);
}

#[test]
fn stepping_while_awaiting_records_nothing() {
    let (mut game, _) = opened();
    let len = game.history().len();
    for _ in 0..3 {
        assert_eq!(game.step().expect("step"), StepStatus::AwaitingResponse);
    }
    assert_eq!(game.history().len(), len);
    assert_eq!(game.history().latest(), Some(game.state()));
}

#[test]
fn reset_discards_later_snapshots_and_allows_a_new_branch() {
    let (mut game, mut runner) = opened();
    let len = game.history().len();
    let target = len - 2;
    let expected = game.history().get(target).expect("snapshot").clone();

    game.reset_to(target).expect("reset");
    assert_eq!(game.history().len(), target + 1);
    assert_eq!(game.state(), &expected);
    assert_eq!(
        game.state().digest().expect("digest"),
        expected.digest().expect("digest")
    );
    assert!(game.need_respond(1));

    // Player 1 ends the round instead of attacking.
    runner.set_provider(1, scripted("end"));
    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 0 });
    let state = game.state();
    assert_eq!(state.table(0).characters[0].hp, 10);
    assert!(state.table(1).has_round_ended);
    assert!(
        state
            .requests_for(0)
            .any(|request| matches!(request.kind, RequestKind::DeclareRoundEnd))
    );
}

#[test]
fn reset_out_of_range_is_rejected() {
    let (mut game, _) = opened();
    let len = game.history().len();
    let before = game.state().clone();
    assert!(game.reset_to(len).is_err());
    assert_eq!(game.state(), &before);
    assert_eq!(game.history().len(), len);
}
