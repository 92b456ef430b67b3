//! Scripted matches exercising reactions, statuses, summons and equipment.

mod common;

use common::{deck, new_match, runner, scenario_config, scripted};
use tcg_core::catalog::{StatusKind, SummonKind};
use tcg_core::{Element, Match, ObjectKind, RequestKind, SkillKind};
use tcg_runtime::RunStatus;

fn skill_cost(game: &Match, player: usize, wanted: SkillKind) -> u32 {
    game.requests()
        .iter()
        .filter(|request| request.player == player)
        .find_map(|request| match &request.kind {
            RequestKind::UseSkill { skill, cost, .. } if *skill == wanted => {
                Some(cost.total_dice())
            }
            _ => None,
        })
        .expect("skill offered")
}

#[test]
fn frozen_target_takes_extra_physical_damage() {
    let mut game = new_match(
        scenario_config(),
        21,
        [
            deck(&["CryoMob", "HydroMobMage", "GeoMob"], "Strategize"),
            deck(&["ElectroMob", "DendroMob", "AnemoMob"], "Strategize"),
        ],
    );
    let mut runner = runner(
        "
        sw_card
        choose 0
        skill 1 omni omni omni   # 3 cryo
        sw_char 1 omni
        skill 0 omni omni omni   # hydro on cryo freezes
        sw_char 2 omni
        skill 0 omni omni omni   # 2 physical, +2 while frozen
        ",
        "
        sw_card
        choose 0
        end
        ",
    );

    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 0 });
    let state = game.state();
    let target = &state.table(1).characters[0];
    assert_eq!(target.hp, 10 - 3 - 2 - 4);
    assert!(target.aura.is_empty());
    assert!(target.statuses.is_empty(), "frozen is spent by the physical hit");
    assert_eq!(state.table(0).active, Some(2));
    assert_eq!(state.table(0).dice.len(), 1);
    assert_eq!(state.current_player, 0, "the opponent already ended the round");
}

#[test]
fn artifact_discounts_one_skill_per_round() {
    let mut game = new_match(
        scenario_config(),
        5,
        [
            deck(&["DendroMobMage", "HydroMobMage", "PyroMob"], "Laurel Coronet"),
            deck(&["CryoMob", "GeoMob", "AnemoMob"], "Strategize"),
        ],
    );
    let skill = SkillKind::ElementalSkill(Element::Dendro);
    let mut runner = runner(
        "
        sw_card
        choose 0
        card 0 0 omni omni
        ",
        "
        sw_card
        choose 0
        ",
    );

    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 0 });
    assert!(game.state().table(0).characters[0].artifact.is_some());
    assert_eq!(skill_cost(&game, 0, skill), 2);

    runner.set_provider(0, scripted("skill 1 omni omni"));
    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 1 });
    let state = game.state();
    let artifact = state.table(0).characters[0].artifact.as_ref().expect("equipped");
    assert_eq!(artifact.usage.current, 0);
    assert_eq!(state.table(0).dice.len(), 12 - 2 - 2);
    assert_eq!(state.table(1).characters[0].hp, 7);

    runner.set_provider(1, scripted("end"));
    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 0 });
    assert_eq!(skill_cost(&game, 0, skill), 3);

    runner.set_provider(0, scripted("end"));
    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 1 });
    let state = game.state();
    assert_eq!(state.round, 2);
    assert_eq!(state.first_player, 1);
    let artifact = state.table(0).characters[0].artifact.as_ref().expect("equipped");
    assert_eq!(artifact.usage.current, 1, "usage refreshes on round prepare");
}

#[test]
fn artifact_cost_follows_the_deck_version() {
    for (card, same, any) in [("Laurel Coronet@3.3", 2, 0), ("Laurel Coronet@4.0", 0, 2)] {
        let mut game = new_match(
            scenario_config(),
            5,
            [
                deck(&["DendroMobMage", "HydroMobMage", "PyroMob"], card),
                deck(&["CryoMob", "GeoMob", "AnemoMob"], "Strategize"),
            ],
        );
        let mut runner = runner("sw_card\nchoose 0", "sw_card\nchoose 0");
        assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 0 });
        let cost = game
            .requests()
            .iter()
            .find_map(|request| match &request.kind {
                RequestKind::UseCard { cost, .. } => Some(*cost),
                _ => None,
            })
            .expect("card offered");
        assert_eq!((cost.same_number, cost.any_number), (same, any), "{card}");
    }
}

#[test]
fn mismatched_artifact_only_discounts_any_dice() {
    let mut game = new_match(
        scenario_config(),
        5,
        [
            deck(&["DendroMobMage", "HydroMobMage", "PyroMob"], "Wine-Stained Tricorne"),
            deck(&["CryoMob", "GeoMob", "AnemoMob"], "Strategize"),
        ],
    );
    let attack = SkillKind::ElementalNormalAttack(Element::Dendro);
    let skill = SkillKind::ElementalSkill(Element::Dendro);
    let mut runner = runner(
        "
        sw_card
        choose 0
        card 0 0 omni omni
        ",
        "
        sw_card
        choose 0
        ",
    );

    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 0 });
    assert_eq!(skill_cost(&game, 0, attack), 2, "one any die off the attack");
    assert_eq!(skill_cost(&game, 0, skill), 3, "no any dice to take off");
    let cost = game
        .requests()
        .iter()
        .find_map(|request| match &request.kind {
            RequestKind::UseSkill { skill: kind, cost, .. } if *kind == attack => Some(*cost),
            _ => None,
        })
        .expect("attack offered");
    assert_eq!((cost.elemental_number, cost.any_number), (1, 1));

    runner.set_provider(0, scripted("skill 0 omni omni"));
    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 1 });
    let state = game.state();
    let artifact = state.table(0).characters[0].artifact.as_ref().expect("equipped");
    assert_eq!(artifact.usage.current, 0);
    assert_eq!(state.table(0).dice.len(), 12 - 2 - 2);
}

#[test]
fn reflection_shields_then_strikes_at_round_end() {
    let mut game = new_match(
        scenario_config(),
        9,
        [
            deck(&["Mona", "HydroMobMage", "GeoMob"], "Strategize"),
            deck(&["PyroMob", "CryoMob", "GeoMob"], "Strategize"),
        ],
    );
    let mut runner = runner(
        "
        sw_card
        choose 0
        skill 1 omni omni omni   # Mirror Reflection of Doom
        end
        ",
        "
        sw_card
        choose 0
        skill 0 omni omni omni   # 2 physical into the shield
        end
        ",
    );

    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 0 });
    let mid_round = game
        .history()
        .iter()
        .find(|snapshot| !snapshot.table(0).summons.is_empty())
        .expect("reflection was summoned");
    assert_eq!(
        mid_round.table(0).summons[0].kind,
        ObjectKind::Summon(SummonKind::Reflection)
    );
    let state = game.state();
    assert_eq!(state.round, 2);
    assert_eq!(state.table(0).characters[0].hp, 9, "reflection absorbed one point");
    assert_eq!(state.table(1).characters[0].hp, 10 - 1 - 1);
    assert!(state.table(0).summons.is_empty(), "reflection leaves after striking");
}

#[test]
fn reaction_on_a_seeded_target_bursts_the_seed() {
    let mut game = new_match(
        scenario_config(),
        13,
        [
            deck(&["Nahida", "HydroMobMage", "GeoMob"], "Strategize"),
            deck(&["PyroMob", "CryoMob", "GeoMob"], "Strategize"),
        ],
    );
    let mut runner = runner(
        "
        sw_card
        choose 0
        skill 1 omni omni omni   # 2 dendro and a seed
        sw_char 1 omni
        skill 0 omni omni omni   # hydro on dendro blooms
        ",
        "
        sw_card
        choose 0
        end
        ",
    );

    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 0 });
    let state = game.state();
    let target = &state.table(1).characters[0];
    assert_eq!(target.hp, 10 - 2 - 2 - 1);
    let seed = target
        .statuses
        .iter()
        .find(|status| status.kind == ObjectKind::Status(StatusKind::SeedOfSkandha))
        .expect("seed stays while it has usage");
    assert_eq!(seed.usage.current, 1);
    assert!(
        state
            .table(0)
            .team_statuses
            .iter()
            .any(|status| status.kind == ObjectKind::Status(StatusKind::DendroCore))
    );
}

#[test]
fn defeated_active_forces_a_choice() {
    let mut config = scenario_config();
    config.initial_dice_number = 16;
    let mut game = new_match(
        config,
        17,
        [
            deck(&["PyroMob", "CryoMob", "GeoMob"], "Strategize"),
            deck(&["AnemoMob", "GeoMob", "DendroMob"], "Strategize"),
        ],
    );
    let mut runner = runner(
        "
        sw_card
        choose 0
        skill 1 omni omni omni
        skill 1 omni omni omni
        skill 1 omni omni omni
        skill 1 omni omni omni
        ",
        "
        sw_card
        choose 0
        end
        ",
    );

    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 1 });
    let state = game.state();
    assert!(!state.table(1).characters[0].alive);
    let choices: Vec<&RequestKind> = state.requests_for(1).map(|request| &request.kind).collect();
    assert_eq!(
        choices,
        vec![&RequestKind::ChooseCharacter {
            candidates: vec![1, 2]
        }]
    );

    runner.set_provider(1, scripted("choose 2"));
    assert_eq!(runner.run(&mut game).expect("run"), RunStatus::Stalled { player: 0 });
    assert_eq!(game.state().table(1).active, Some(2));
}
