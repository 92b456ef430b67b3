use super::*;
use crate::action::{ActionTransition, ChangeObjectUsageAction, CreateObjectAction};
use crate::catalog::{ObjectKind, StatusKind, SummonKind};
use crate::deck::Deck;
use crate::error::{ErrorSeverity, GameError};
use crate::interaction::{Response, ResponseKind};
use crate::state::{Area, DieColor, Position};

const DECK: &str = "
    character:Mona
    character:Nahida
    character:PyroMob
    Strategize*30
";

fn decks() -> [Deck; 2] {
    let deck: Deck = DECK.parse().expect("deck");
    [deck.clone(), deck]
}

fn config() -> MatchConfig {
    let mut config = MatchConfig::for_scenarios();
    config.initial_dice_reroll_times = 0;
    config
}

fn find(state: &GameState, player: usize, pred: impl Fn(&RequestKind) -> bool) -> Request {
    state
        .requests_for(player)
        .find(|request| pred(&request.kind))
        .cloned()
        .expect("request outstanding")
}

fn answer(state: &mut GameState, request: Request, kind: ResponseKind) {
    GameEngine::new(state)
        .respond(&Response::new(request, kind))
        .expect("legal response");
}

/// Starts a match and plays the opening until player 0 is asked to act.
fn opened() -> GameState {
    let mut state = GameState::new(config(), 11);
    let mut engine = GameEngine::new(&mut state);
    engine.start(&decks()).expect("start");
    assert_eq!(engine.step(), Ok(StepStatus::AwaitingResponse));
    for player in [0, 1] {
        let request = find(&state, player, |kind| matches!(kind, RequestKind::SwitchCard));
        answer(&mut state, request, ResponseKind::SwitchCard { cards: Vec::new() });
    }
    GameEngine::new(&mut state).step().expect("step");
    for player in [0, 1] {
        let request = find(&state, player, |kind| {
            matches!(kind, RequestKind::ChooseCharacter { .. })
        });
        answer(&mut state, request, ResponseKind::ChooseCharacter { character: 0 });
    }
    GameEngine::new(&mut state).step().expect("step");
    state
}

#[test]
fn opening_reaches_the_action_phase() {
    let state = opened();
    assert_eq!(state.phase, Phase::ActionPhase);
    assert_eq!(state.round, 1);
    for table in &state.tables {
        assert_eq!(table.hand.len(), 5);
        assert_eq!(table.dice, vec![DieColor::Omni; 8]);
        assert_eq!(table.active, Some(0));
    }
    assert!(state.requests.iter().all(|request| request.player == 0));
    assert!(state
        .requests
        .iter()
        .any(|request| matches!(request.kind, RequestKind::DeclareRoundEnd)));
    let skills = state
        .requests
        .iter()
        .filter(|request| matches!(request.kind, RequestKind::UseSkill { .. }))
        .count();
    // Mona's burst needs charge; the passive is never offered.
    assert_eq!(skills, 2);
}

#[test]
fn pending_requests_stop_the_engine_before_any_work() {
    let mut state = opened();
    let before = state.clone();
    let mut engine = GameEngine::new(&mut state);
    assert_eq!(engine.step(), Ok(StepStatus::AwaitingResponse));
    assert!(!engine.made_progress());
    assert_eq!(state, before);

    state.requests.clear();
    let mut engine = GameEngine::new(&mut state);
    assert_eq!(engine.step(), Ok(StepStatus::AwaitingResponse));
    assert!(engine.made_progress());
}

#[test]
fn bad_deck_leaves_state_untouched() {
    let mut state = GameState::new(MatchConfig::new(), 11);
    let before = state.clone();
    let result = GameEngine::new(&mut state).start(&decks());
    assert!(matches!(result, Err(StartError::Deck { player: 0, .. })));
    assert_eq!(state, before);
}

#[test]
fn illegal_responses_are_rejected_without_change() {
    let mut state = opened();
    let before = state.clone();
    let skill = find(&state, 0, |kind| matches!(kind, RequestKind::UseSkill { .. }));
    let mut engine = GameEngine::new(&mut state);

    let wrong_kind = Response::new(skill.clone(), ResponseKind::DeclareRoundEnd);
    assert!(matches!(
        engine.respond(&wrong_kind),
        Err(ResponseError::KindMismatch { .. })
    ));
    let short = Response::new(skill.clone(), ResponseKind::UseSkill { dice: vec![0] });
    assert_eq!(engine.respond(&short), Err(ResponseError::DiceDoNotPay));
    let twice = Response::new(skill.clone(), ResponseKind::UseSkill { dice: vec![0, 0, 1] });
    assert_eq!(
        engine.respond(&twice),
        Err(ResponseError::DuplicateChoice { index: 0 })
    );
    let mut forged = skill;
    forged.player = 1;
    let forged = Response::new(forged, ResponseKind::UseSkill { dice: vec![0, 1, 2] });
    assert_eq!(engine.respond(&forged), Err(ResponseError::UnknownRequest));
    assert_eq!(state, before);
}

#[test]
fn skill_passes_the_turn_and_damages_the_enemy() {
    let mut state = opened();
    let request = find(&state, 0, |kind| {
        matches!(kind, RequestKind::UseSkill { skill, .. } if skill.name() == "Ripple of Fate")
    });
    answer(&mut state, request, ResponseKind::UseSkill { dice: vec![0, 1, 2] });
    GameEngine::new(&mut state).step().expect("step");
    assert_eq!(state.table(1).characters[0].hp, 9);
    assert_eq!(state.table(1).characters[0].aura, vec![crate::state::Element::Hydro]);
    assert_eq!(state.table(0).characters[0].charge, 1);
    assert_eq!(state.table(0).dice.len(), 5);
    assert_eq!(state.current_player, 1);
    assert!(state.requests.iter().all(|request| request.player == 1));
}

#[test]
fn first_switch_away_from_mona_is_quick() {
    let mut state = opened();
    let switch = |state: &GameState, to: usize| {
        find(state, 0, |kind| {
            matches!(kind, RequestKind::SwitchCharacter { character, .. } if *character == to)
        })
    };
    let request = switch(&state, 1);
    answer(&mut state, request, ResponseKind::SwitchCharacter { dice: vec![0] });
    GameEngine::new(&mut state).step().expect("step");
    assert_eq!(state.table(0).active, Some(1));
    assert_eq!(state.current_player, 0, "switching away from Mona keeps the turn");

    // Switching away from Nahida is a normal combat action.
    let request = switch(&state, 0);
    answer(&mut state, request, ResponseKind::SwitchCharacter { dice: vec![0] });
    GameEngine::new(&mut state).step().expect("step");
    assert_eq!(state.table(0).active, Some(0));
    assert_eq!(state.current_player, 1);
}

#[test]
fn declared_rounds_end_in_the_next_preparation() {
    let mut state = opened();
    let request = find(&state, 0, |kind| matches!(kind, RequestKind::DeclareRoundEnd));
    answer(&mut state, request, ResponseKind::DeclareRoundEnd);
    GameEngine::new(&mut state).step().expect("step");
    let request = find(&state, 1, |kind| matches!(kind, RequestKind::DeclareRoundEnd));
    answer(&mut state, request, ResponseKind::DeclareRoundEnd);
    GameEngine::new(&mut state).step().expect("step");

    assert_eq!(state.round, 2);
    assert_eq!(state.phase, Phase::ActionPhase);
    assert_eq!(state.first_player, 0);
    for table in &state.tables {
        assert_eq!(table.hand.len(), 7);
        assert_eq!(table.dice.len(), 8);
        assert!(!table.has_round_ended);
    }
}

#[test]
fn round_limit_ends_in_a_draw() {
    let mut state = GameState::new(config().with_max_round_number(1), 11);
    let mut engine = GameEngine::new(&mut state);
    engine.start(&decks()).expect("start");
    engine.step().expect("step");
    for player in [0, 1] {
        let request = find(&state, player, |kind| matches!(kind, RequestKind::SwitchCard));
        answer(&mut state, request, ResponseKind::SwitchCard { cards: Vec::new() });
    }
    GameEngine::new(&mut state).step().expect("step");
    for player in [0, 1] {
        let request = find(&state, player, |kind| {
            matches!(kind, RequestKind::ChooseCharacter { .. })
        });
        answer(&mut state, request, ResponseKind::ChooseCharacter { character: 2 });
    }
    GameEngine::new(&mut state).step().expect("step");
    for player in [0, 1] {
        let request = find(&state, player, |kind| matches!(kind, RequestKind::DeclareRoundEnd));
        answer(&mut state, request, ResponseKind::DeclareRoundEnd);
        let status = GameEngine::new(&mut state).step().expect("step");
        if player == 1 {
            assert_eq!(status, StepStatus::Ended(Outcome::Draw));
        }
    }
    assert_eq!(state.phase, Phase::Ended);
}

#[test]
fn responses_queue_ahead_of_pending_work_in_answer_order() {
    let mut state = opened();
    state.requests.clear();
    let position = state.table(0).characters[0].position;
    state.queue.push_back(Action::CreateObject(CreateObjectAction::new(
        position.with_area(Area::CharacterStatus),
        ObjectKind::Status(StatusKind::Frozen),
    )));
    state.requests.push(Request::new(0, RequestKind::DeclareRoundEnd));
    state.requests.push(Request::new(1, RequestKind::DeclareRoundEnd));
    for player in [0, 1] {
        let request = Request::new(player, RequestKind::DeclareRoundEnd);
        answer(&mut state, request, ResponseKind::DeclareRoundEnd);
    }
    let names: Vec<&str> = state.queue.iter().map(Action::name).collect();
    assert_eq!(names, ["declare_round_end", "declare_round_end", "create_object"]);
    match (&state.queue[0], &state.queue[1]) {
        (Action::DeclareRoundEnd(first), Action::DeclareRoundEnd(second)) => {
            assert_eq!((first.player, second.player), (0, 1));
        }
        other => panic!("unexpected queue head {other:?}"),
    }
}

#[test]
fn triggered_actions_keep_each_object_together_behind_pending_work() {
    let mut state = opened();
    state.requests.clear();
    CreateObjectAction::new(
        Position::zone(0, Area::Summon),
        ObjectKind::Summon(SummonKind::Reflection),
    )
    .apply(&mut state)
    .expect("summon");
    let enemy = state.table(1).characters[0].position;
    CreateObjectAction::new(
        enemy.with_area(Area::CharacterStatus),
        ObjectKind::Status(StatusKind::Frozen),
    )
    .apply(&mut state)
    .expect("status");
    let reflection = state.table(0).summons[0].position;
    let frozen = state.table(1).characters[0].statuses[0].position;
    let own = state.table(0).characters[1].position;
    state.queue.push_back(Action::CreateObject(CreateObjectAction::new(
        own.with_area(Area::CharacterStatus),
        ObjectKind::Status(StatusKind::Frozen),
    )));

    GameEngine::new(&mut state).emit(&Event::RoundEnd { round: 1 });

    let names: Vec<&str> = state.queue.iter().map(Action::name).collect();
    assert_eq!(names, ["create_object", "make_damage", "remove_object", "remove_object"]);
    match (&state.queue[1], &state.queue[2], &state.queue[3]) {
        (Action::MakeDamage(strike), Action::RemoveObject(first), Action::RemoveObject(second)) => {
            assert_eq!(strike.damages[0].source, reflection);
            assert_eq!(first.position, reflection);
            assert_eq!(second.position, frozen);
        }
        other => panic!("unexpected order {other:?}"),
    }
}

#[test]
fn invariant_violation_halts_the_match() {
    let mut state = opened();
    state.requests.clear();
    let never_created = Position::new(0, Area::TeamStatus, None, crate::state::ObjectId(9_999));
    state
        .queue
        .push_back(Action::ChangeObjectUsage(ChangeObjectUsageAction::delta(never_created, -1)));
    let mut engine = GameEngine::new(&mut state);
    let error = engine.step().expect_err("fatal");
    assert!(matches!(error, EngineError::Action { ref action, .. } if action == "change_object_usage"));
    assert_eq!(error.severity(), ErrorSeverity::Internal);
    assert_eq!(error.context().map(|context| context.round), Some(1));
    assert_eq!(engine.step(), Err(EngineError::Halted));
    assert_eq!(state.phase, Phase::Error);
    let request = Request::new(0, RequestKind::DeclareRoundEnd);
    let response = Response::new(request, ResponseKind::DeclareRoundEnd);
    assert_eq!(
        GameEngine::new(&mut state).respond(&response),
        Err(ResponseError::NotAccepting { phase: Phase::Error })
    );
}
