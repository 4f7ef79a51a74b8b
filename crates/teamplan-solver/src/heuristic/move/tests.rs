use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use teamplan_core::{Assignment, HardSoftScore, TeamPlan};
use teamplan_scoring::ScoreDirector;
use teamplan_test::{random_plan, two_items_one_slot, ScenarioShape};

use super::*;
use crate::test_utils::{all_constraints_director, default_director};

#[test]
fn test_reassign_work_day_apply_and_undo() {
    let plan = random_plan(3, ScenarioShape::new(6, 4, 3));
    let mut director = default_director(plan);
    let before = director.calculate_score();
    let from = director.working_solution().work_day_of(2);
    let to = (from.unwrap() + 1) % 4;

    let mv = PlanMove::reassign_work_day(director.working_solution(), 2, to);
    assert!(mv.is_doable(director.working_solution()));

    mv.apply(&mut director);
    assert_eq!(director.working_solution().work_day_of(2), Some(to));
    assert_eq!(director.calculate_score(), director.full_score());

    mv.undo(&mut director);
    assert_eq!(director.working_solution().work_day_of(2), from);
    assert_eq!(director.calculate_score(), before);
}

#[test]
fn test_swap_exchanges_both_fields() {
    let mut plan = random_plan(5, ScenarioShape::new(4, 3, 3));
    plan.set_assignment(0, Assignment::new(0, 1));
    plan.set_assignment(1, Assignment::new(2, 0));
    let mut director = default_director(plan);
    director.calculate_score();

    let mv = PlanMove::swap(director.working_solution(), 0, 1);
    mv.apply(&mut director);
    assert_eq!(director.working_solution().assignment(0), Assignment::new(2, 0));
    assert_eq!(director.working_solution().assignment(1), Assignment::new(0, 1));

    mv.undo(&mut director);
    assert_eq!(director.working_solution().assignment(0), Assignment::new(0, 1));
    assert_eq!(director.working_solution().assignment(1), Assignment::new(2, 0));
}

#[test]
fn test_score_delta_leaves_plan_untouched() {
    let plan = random_plan(11, ScenarioShape::new(8, 3, 3));
    let mut director = all_constraints_director(plan);
    let before = director.calculate_score();
    let snapshot: Vec<Assignment> = director.working_solution().assignments().to_vec();

    let mv = PlanMove::reassign_team_member(director.working_solution(), 4, 0);
    let delta = mv.score_delta(&mut director);

    assert_eq!(director.working_solution().assignments(), snapshot.as_slice());
    assert_eq!(director.calculate_score(), before);

    mv.apply(&mut director);
    assert_eq!(director.calculate_score(), before + delta);
}

#[test]
fn test_capacity_delta_for_two_items_one_slot() {
    let mut director = default_director(two_items_one_slot());
    assert_eq!(director.calculate_score(), HardSoftScore::of(-1, 0));

    // Swapping identical assignments changes nothing and is not doable
    let swap = PlanMove::swap(director.working_solution(), 0, 1);
    assert!(!swap.is_doable(director.working_solution()));

    let noop = PlanMove::reassign_work_day(director.working_solution(), 0, 0);
    assert!(!noop.is_doable(director.working_solution()));
}

#[test]
fn test_stale_move_is_not_doable() {
    let plan = random_plan(2, ScenarioShape::new(3, 3, 2));
    let current = plan.work_day_of(0).unwrap();
    let mv = PlanMove::reassign_work_day(&plan, 0, (current + 1) % 3);

    let mut moved = plan.clone();
    moved.set_work_day(0, Some((current + 2) % 3));
    assert!(mv.is_doable(&plan));
    assert!(!mv.is_doable(&moved));
}

#[test]
fn test_swap_with_unassigned_side_is_not_doable() {
    let mut plan = random_plan(4, ScenarioShape::new(2, 2, 2));
    plan.set_team_member(1, None);
    let mv = PlanMove::swap(&plan, 0, 1);
    assert!(!mv.is_doable(&plan));
}

#[test]
fn test_tabu_attributes() {
    let mut plan: TeamPlan = random_plan(8, ScenarioShape::new(2, 3, 3));
    plan.set_assignment(0, Assignment::new(0, 1));
    plan.set_assignment(1, Assignment::new(2, 0));

    let change = PlanMove::reassign_work_day(&plan, 0, 2);
    assert_eq!(
        change.tabu_attributes().as_slice(),
        &[TabuAttribute::new(0, PlanField::WorkDay, 2)]
    );
    assert_eq!(
        change.reverted_attributes().as_slice(),
        &[TabuAttribute::new(0, PlanField::WorkDay, 0)]
    );

    let swap = PlanMove::swap(&plan, 0, 1);
    let written = swap.tabu_attributes();
    assert_eq!(written.len(), 4);
    assert!(written.contains(&TabuAttribute::new(0, PlanField::WorkDay, 2)));
    assert!(written.contains(&TabuAttribute::new(1, PlanField::TeamMember, 1)));
    let reverted = swap.reverted_attributes();
    assert!(reverted.contains(&TabuAttribute::new(0, PlanField::TeamMember, 1)));
    assert!(reverted.contains(&TabuAttribute::new(1, PlanField::WorkDay, 2)));
}

#[test]
fn test_unassigned_origin_has_no_reverted_attribute() {
    let mut plan = random_plan(9, ScenarioShape::new(1, 2, 2));
    plan.set_work_day(0, None);
    let mv = PlanMove::reassign_work_day(&plan, 0, 1);
    assert!(mv.reverted_attributes().is_empty());
}

#[test]
fn test_random_move_sequences_keep_incremental_score_exact() {
    for seed in 0..10 {
        let plan = random_plan(seed, ScenarioShape::new(10, 4, 4));
        let mut director = all_constraints_director(plan);
        director.calculate_score();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..100 {
            let plan = director.working_solution();
            let item = rng.random_range(0..plan.item_count());
            let mv = match rng.random_range(0..3) {
                0 => PlanMove::reassign_work_day(plan, item, rng.random_range(0..4)),
                1 => PlanMove::reassign_team_member(plan, item, rng.random_range(0..4)),
                _ => PlanMove::swap(plan, item, rng.random_range(0..plan.item_count())),
            };
            if !mv.is_doable(director.working_solution()) {
                continue;
            }
            if rng.random_bool(0.3) {
                mv.score_delta(&mut director);
            } else {
                mv.apply(&mut director);
            }
            assert_eq!(director.calculate_score(), director.full_score());
        }
    }
}

#[test]
fn test_kind_names() {
    let plan = two_items_one_slot();
    assert_eq!(PlanMove::reassign_work_day(&plan, 0, 0).kind_name(), "ReassignWorkDay");
    assert_eq!(PlanMove::reassign_team_member(&plan, 0, 0).kind_name(), "ReassignTeamMember");
    assert_eq!(PlanMove::swap(&plan, 0, 1).kind_name(), "SwapAssignment");
}
