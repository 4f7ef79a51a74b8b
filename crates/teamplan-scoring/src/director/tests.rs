//! Tests for score directors.

use teamplan_core::{HardSoftScore, PlanningSolution, TeamPlan};
use teamplan_test::{random_plan, two_items_one_slot, ScenarioShape};

use super::*;
use crate::constraint::{team_constraints, ConstraintKind};
use crate::ConstraintWeightOverrides;

fn incremental(plan: TeamPlan) -> IncrementalScoreDirector<TeamPlan> {
    IncrementalScoreDirector::new(
        plan,
        team_constraints(&ConstraintKind::ALL, &ConstraintWeightOverrides::new()),
    )
}

fn simple(
    plan: TeamPlan,
) -> SimpleScoreDirector<TeamPlan, impl Fn(&TeamPlan) -> HardSoftScore + Send + Sync> {
    let constraints = team_constraints(&ConstraintKind::ALL, &ConstraintWeightOverrides::new());
    SimpleScoreDirector::new(plan, move |plan: &TeamPlan| constraints.evaluate_all(plan))
}

#[test]
fn test_simple_director_caches_until_change() {
    let mut director = simple(two_items_one_slot());
    let score = director.calculate_score();
    assert_eq!(score.hard(), -1);
    director.calculate_score();
    assert_eq!(director.score_calculation_count(), 1);

    director.change_entity(1, |plan| plan.set_work_day(1, None));
    assert_eq!(director.calculate_score().hard(), 0);
    assert_eq!(director.score_calculation_count(), 2);
    assert!(!director.is_incremental());
}

#[test]
fn test_incremental_director_tracks_changes() {
    let mut director = incremental(two_items_one_slot());
    assert!(director.is_incremental());
    assert_eq!(director.calculate_score().hard(), -1);

    director.change_entity(1, |plan| plan.set_team_member(1, None));
    assert_eq!(director.calculate_score(), director.full_score());
    assert_eq!(director.calculate_score().hard(), 0);
    assert_eq!(director.working_solution().score(), Some(director.full_score()));
}

#[test]
fn test_incremental_director_agrees_with_simple() {
    let plan = random_plan(7, ScenarioShape::new(30, 5, 4));
    let mut fast = incremental(plan.clone());
    let mut slow = simple(plan);

    for step in 0..60 {
        let item = (step * 7) % 30;
        let day = step % 5;
        let member = (step * 3) % 4;
        fast.change_entity(item, |plan| plan.assign(item, day, member));
        slow.change_entity(item, |plan| plan.assign(item, day, member));
        assert_eq!(fast.calculate_score(), slow.calculate_score(), "step {step}");
    }
}

#[test]
fn test_changes_before_first_calculation_are_picked_up() {
    let mut director = incremental(two_items_one_slot());
    director.change_entity(0, |plan| plan.set_work_day(0, None));
    assert_eq!(director.calculate_score(), director.full_score());
}

#[test]
fn test_reset_reinitializes() {
    let mut director = incremental(two_items_one_slot());
    director.calculate_score();
    // Raw mutation without notification, then reset
    director.working_solution_mut().set_work_day(0, None);
    director.reset();
    assert_eq!(director.calculate_score(), director.full_score());
}

#[test]
fn test_clone_carries_score() {
    let mut director = incremental(two_items_one_slot());
    let score = director.calculate_score();
    let snapshot = director.clone_working_solution();
    assert_eq!(snapshot.score(), Some(score));
    assert!(snapshot.shares_facts_with(director.working_solution()));

    let explanation = director.explain();
    assert_eq!(explanation.score, score);
    assert_eq!(director.constraints().constraint_count(), 7);
    assert_eq!(director.into_working_solution().score(), Some(score));
}

#[test]
fn test_weights_apply_in_director() {
    let overrides = ConstraintWeightOverrides::from_pairs([("capacity", HardSoftScore::of_hard(4))]);
    let mut director = IncrementalScoreDirector::new(
        two_items_one_slot(),
        team_constraints(&ConstraintKind::defaults(), &overrides),
    );
    assert_eq!(director.calculate_score(), HardSoftScore::of(-4, 0));
}
