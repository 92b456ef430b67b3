//! Value modifier pipeline.
//!
//! A [`ModifiableValue`] is folded through every rule object's
//! [`RuleObject::modify_value`] hook in visitation order. The fold runs in one
//! of two modes:
//!
//! - [`preview`] (`TEST`): read-only. Used to enumerate request costs.
//! - [`commit`] (`REAL`): used once, when the value is consumed. Commits
//!   returned by hooks are applied after the fold.
//!
//! Damage goes through three separate folds: increase, multiply, decrease.
//! All additive changes therefore land before any multiplier, and every
//! decrease sees the multiplied value.

use crate::action::ActionError;
use crate::combat::DamageValue;
use crate::hooks::{HookCommit, HookContext, Mode, RuleObject, visit};
use crate::state::{Cost, GameState, Position};

/// Cost of a skill, card or switch, with the object paying it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostValue {
    pub cost: Cost,
    /// Skill, card, or (for switches) the character being left.
    pub position: Position,
    /// Character a card or switch is aimed at, when there is one.
    pub target: Option<Position>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatActionType {
    Skill,
    Switch,
}

/// Whether a declared action passes the turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatActionValue {
    pub action_type: CombatActionType,
    pub position: Position,
    pub do_combat_action: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ModifiableValue {
    Cost(CostValue),
    DamageIncrease(DamageValue),
    DamageMultiply(DamageValue),
    DamageDecrease(DamageValue),
    CombatAction(CombatActionValue),
}

impl ModifiableValue {
    pub fn damage(&self) -> Option<&DamageValue> {
        match self {
            ModifiableValue::DamageIncrease(value)
            | ModifiableValue::DamageMultiply(value)
            | ModifiableValue::DamageDecrease(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_damage(self) -> Option<DamageValue> {
        match self {
            ModifiableValue::DamageIncrease(value)
            | ModifiableValue::DamageMultiply(value)
            | ModifiableValue::DamageDecrease(value) => Some(value),
            _ => None,
        }
    }
}

/// A hook's request, tagged with the object that made it.
type PendingCommit = (Position, HookCommit);

fn fold(game: &GameState, value: &mut ModifiableValue, mode: Mode) -> Vec<PendingCommit> {
    let ctx = HookContext { game, mode };
    let mut commits = Vec::new();
    for object in visit(game) {
        if let Some(commit) = object.modify_value(value, &ctx) {
            commits.push((object.position(), commit));
        }
    }
    commits
}

/// Folds `value` in `TEST` mode. Never mutates anything.
pub fn preview(game: &GameState, mut value: ModifiableValue) -> ModifiableValue {
    let _ = fold(game, &mut value, Mode::Test);
    value
}

/// Folds `value` in `REAL` mode and applies the hooks' commits.
///
/// Depleted objects are left in place; the calling handler sweeps them.
pub fn commit(
    game: &mut GameState,
    mut value: ModifiableValue,
) -> Result<ModifiableValue, ActionError> {
    let commits = fold(game, &mut value, Mode::Real);
    for (position, commit) in commits {
        match commit {
            HookCommit::ConsumeUsage(amount) => {
                let usage = game
                    .usage_mut(&position)
                    .ok_or(ActionError::ObjectNotFound { position })?;
                if usage.current < amount {
                    return Err(ActionError::UsageUnderflow {
                        position,
                        current: usage.current,
                        requested: amount,
                    });
                }
                usage.current -= amount;
                tracing::trace!(
                    target: "tcg::modifier",
                    position = ?position,
                    amount,
                    remaining = usage.current,
                    value = value.as_ref(),
                    "usage consumed"
                );
            }
        }
    }
    Ok(value)
}

/// Runs a damage value through the increase, multiply and decrease passes.
pub fn commit_damage(game: &mut GameState, damage: DamageValue) -> Result<DamageValue, ActionError> {
    let passes: [fn(DamageValue) -> ModifiableValue; 3] = [
        ModifiableValue::DamageIncrease,
        ModifiableValue::DamageMultiply,
        ModifiableValue::DamageDecrease,
    ];
    let mut current = damage;
    for wrap in passes {
        let folded = commit(game, wrap(current.clone()))?;
        if let Some(next) = folded.into_damage() {
            current = next;
        }
    }
    Ok(current)
}

/// `TEST`-mode cost of paying for the object at `position`.
pub fn preview_cost(game: &GameState, cost: Cost, position: Position, target: Option<Position>) -> Cost {
    match preview(game, ModifiableValue::Cost(CostValue { cost, position, target })) {
        ModifiableValue::Cost(value) => value.cost,
        _ => cost,
    }
}

/// `REAL`-mode cost of paying for the object at `position`.
pub fn commit_cost(
    game: &mut GameState,
    cost: Cost,
    position: Position,
    target: Option<Position>,
) -> Result<Cost, ActionError> {
    match commit(game, ModifiableValue::Cost(CostValue { cost, position, target }))? {
        ModifiableValue::Cost(value) => Ok(value.cost),
        _ => Ok(cost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionTransition, CreateObjectAction};
    use crate::catalog::{
        EquipmentKind, ObjectKind, SkillKind, StatusKind, SummonKind, resolve_card,
    };
    use crate::engine::build_card;
    use crate::state::{Area, DamageElement, Element};
    use crate::test_support::versus;

    fn create(game: &mut GameState, zone: Position, kind: ObjectKind) {
        CreateObjectAction::new(zone, kind)
            .apply(game)
            .expect("object created");
    }

    fn skill_position(game: &GameState, kind: SkillKind) -> Position {
        game.table(0).characters[0]
            .skill_of_kind(kind)
            .expect("skill")
            .position
    }

    fn enemy_active(game: &GameState) -> Position {
        game.table(1).characters[0].position
    }

    #[test]
    fn preview_never_spends_usage() {
        let mut game = versus(&["Mona", "Nahida"], &["PyroMob"]);
        let passive = skill_position(&game, SkillKind::IllusoryTorrent);
        let value = ModifiableValue::CombatAction(CombatActionValue {
            action_type: CombatActionType::Switch,
            position: game.table(0).characters[0].position,
            do_combat_action: true,
        });

        for _ in 0..3 {
            let previewed = preview(&game, value.clone());
            assert!(matches!(
                previewed,
                ModifiableValue::CombatAction(CombatActionValue { do_combat_action: false, .. })
            ));
        }
        assert_eq!(game.usage(&passive).map(|usage| usage.current), Some(1));

        commit(&mut game, value.clone()).expect("commit");
        assert_eq!(game.usage(&passive).map(|usage| usage.current), Some(0));
        let spent = preview(&game, value);
        assert!(matches!(
            spent,
            ModifiableValue::CombatAction(CombatActionValue { do_combat_action: true, .. })
        ));
    }

    #[test]
    fn additive_bonuses_land_before_multipliers() {
        let mut game = versus(&["Bennett"], &["PyroMob"]);
        let team = Position::zone(0, Area::TeamStatus);
        create(&mut game, team, ObjectKind::Status(StatusKind::IllusoryBubble));
        create(&mut game, team, ObjectKind::Status(StatusKind::InspirationField));
        let source = skill_position(&game, SkillKind::PassionOverload);
        let damage = DamageValue::damage(source, enemy_active(&game), DamageElement::Pyro, 3);

        let dealt = commit_damage(&mut game, damage).expect("damage");
        // (3 + 2) * 2, not 3 * 2 + 2.
        assert_eq!(dealt.damage, 10);
        assert!(game.table(0).team_statuses.iter().any(|status| {
            status.kind == ObjectKind::Status(StatusKind::IllusoryBubble) && status.usage.current == 0
        }));
    }

    #[test]
    fn decreases_stop_at_zero() {
        let mut game = versus(&["Bennett"], &["PyroMob"]);
        create(
            &mut game,
            Position::zone(1, Area::TeamStatus),
            ObjectKind::Status(StatusKind::Crystallize),
        );
        create(
            &mut game,
            Position::zone(1, Area::Summon),
            ObjectKind::Summon(SummonKind::Reflection),
        );
        let source = skill_position(&game, SkillKind::StrikeOfFortune);
        let damage = DamageValue::damage(source, enemy_active(&game), DamageElement::Physical, 1);

        let dealt = commit_damage(&mut game, damage).expect("damage");
        assert_eq!(dealt.damage, 0);
        let reflection = &game.table(1).summons[0];
        assert_eq!(reflection.usage.current, 1, "nothing left for the summon to absorb");
        assert_eq!(game.table(1).team_statuses[0].usage.current, 0);
    }

    #[test]
    fn cost_preview_matches_the_committed_cost() {
        let mut game = versus(&["Bennett"], &["PyroMob"]);
        let source = skill_position(&game, SkillKind::PassionOverload);
        let base = SkillKind::PassionOverload.cost();
        let previewed = preview_cost(&game, base, source, None);
        let committed = commit_cost(&mut game, base, source, None).expect("cost");
        assert_eq!(previewed, committed);
    }

    fn equip_artifact(game: &mut GameState, slot: usize, element: Element) -> Position {
        create(
            game,
            Position::character_zone(0, Area::Character, slot),
            ObjectKind::Equipment(EquipmentKind::SmallElementalArtifact(element)),
        );
        game.table(0).characters[slot]
            .artifact
            .as_ref()
            .expect("artifact equipped")
            .position
    }

    fn usage_left(game: &GameState, position: &Position) -> Option<u32> {
        game.usage(position).map(|usage| usage.current)
    }

    #[test]
    fn mismatched_artifact_only_trims_any_dice() {
        let mut game = versus(&["Nahida"], &["PyroMob"]);
        let tricorne = equip_artifact(&mut game, 0, Element::Hydro);

        let skill = skill_position(&game, SkillKind::AllSchemesToKnow);
        let base = SkillKind::AllSchemesToKnow.cost();
        assert_eq!(preview_cost(&game, base, skill, None), base);
        assert_eq!(commit_cost(&mut game, base, skill, None).expect("cost"), base);
        assert_eq!(usage_left(&game, &tricorne), Some(1), "nothing paid, nothing spent");

        let attack = skill_position(&game, SkillKind::Akara);
        let paid = commit_cost(&mut game, SkillKind::Akara.cost(), attack, None).expect("cost");
        assert_eq!((paid.elemental_number, paid.any_number), (1, 1));
        assert_eq!(usage_left(&game, &tricorne), Some(0));
    }

    #[test]
    fn only_the_matching_artifact_pays_for_a_talent() {
        let mut game = versus(&["Nahida", "Nahida"], &["PyroMob"]);
        let tricorne = equip_artifact(&mut game, 0, Element::Hydro);
        let laurel = equip_artifact(&mut game, 1, Element::Dendro);
        let (kind, version) = resolve_card("The Seed of Stored Knowledge", None).expect("known card");
        let mut card = build_card(&mut game, 0, kind, version);
        card.position = card.position.with_area(Area::Hand);
        let position = card.position;
        game.table_mut(0).hand.push(card);

        let base = kind.cost(version);
        let previewed = preview_cost(&game, base, position, None);
        assert_eq!(previewed.elemental_number, base.elemental_number - 1);
        assert_eq!(previewed.any_number, 0);
        assert_eq!(previewed.charge, base.charge);

        let committed = commit_cost(&mut game, base, position, None).expect("cost");
        assert_eq!(committed, previewed);
        assert_eq!(usage_left(&game, &tricorne), Some(1), "hydro has nothing to trim");
        assert_eq!(usage_left(&game, &laurel), Some(0));

        let again = commit_cost(&mut game, base, position, None).expect("cost");
        assert_eq!(again, base);
        assert_eq!(usage_left(&game, &tricorne), Some(1));
    }
}
