use teamplan_core::{HardSoftScore, PlanningItem, TeamMember, TeamPlan, WorkDay};
use teamplan_test::{monday, workweek};

use super::*;
use crate::termination::StepCountTermination;
use crate::test_utils::create_scope;

fn unassigned_plan() -> TeamPlan {
    TeamPlan::new(
        workweek().into_iter().take(2).collect(),
        vec![
            TeamMember::new(0, "Alice", "designer", "X"),
            TeamMember::new(1, "Bob", "dev", "X"),
        ],
        vec![
            PlanningItem::new(0, "Login", "dev", "X"),
            PlanningItem::new(1, "Login", "dev", "X"),
        ],
    )
    .unwrap()
}

fn run(plan: TeamPlan, heuristic: ConstructionHeuristicType) -> (TeamPlan, HardSoftScore, u64) {
    let mut scope = create_scope(plan, 0);
    let mut phase = ConstructionHeuristicPhase::new(heuristic);
    phase
        .solve(&mut scope, &StepCountTermination::new(0))
        .unwrap();
    let score = scope.calculate_score();
    let placements = scope.stats().construction_placements;
    (scope.working_solution().clone(), score, placements)
}

#[test]
fn first_fit_uses_first_day_and_member() {
    let (plan, score, placements) = run(unassigned_plan(), ConstructionHeuristicType::FirstFit);
    assert!(plan.is_fully_assigned());
    assert_eq!(plan.assignment(0), Assignment::new(0, 0));
    assert_eq!(plan.assignment(1), Assignment::new(0, 0));
    assert_eq!(placements, 2);
    // Two profile mismatches and one shared slot.
    assert_eq!(score, HardSoftScore::of_hard(-3));
}

#[test]
fn cheapest_insertion_finds_feasible_slots() {
    let (plan, score, _) = run(
        unassigned_plan(),
        ConstructionHeuristicType::CheapestInsertion,
    );
    assert!(plan.is_fully_assigned());
    assert_eq!(score, HardSoftScore::ZERO);
    assert_eq!(plan.team_member_of(0), Some(1));
    assert_eq!(plan.team_member_of(1), Some(1));
    assert_ne!(plan.work_day_of(0), plan.work_day_of(1));
}

#[test]
fn existing_fields_are_kept() {
    let mut plan = unassigned_plan();
    plan.set_work_day(0, Some(1));
    plan.set_team_member(1, Some(0));

    let (plan, _, placements) = run(plan, ConstructionHeuristicType::CheapestInsertion);
    assert_eq!(placements, 2);
    assert_eq!(plan.work_day_of(0), Some(1));
    assert_eq!(plan.team_member_of(1), Some(0));
}

#[test]
fn fully_assigned_plan_is_untouched() {
    let mut plan = unassigned_plan();
    plan.assign(0, 1, 0);
    plan.assign(1, 1, 0);
    let (after, _, placements) = run(plan.clone(), ConstructionHeuristicType::CheapestInsertion);
    assert_eq!(placements, 0);
    assert_eq!(after.assignments(), plan.assignments());
}

#[test]
fn missing_members_is_a_configuration_error() {
    let plan = TeamPlan::new(
        vec![WorkDay::new(0, monday())],
        vec![],
        vec![PlanningItem::new(0, "Login", "dev", "X")],
    )
    .unwrap();
    let mut scope = create_scope(plan, 0);
    let err = ConstructionHeuristicPhase::new(ConstructionHeuristicType::FirstFit)
        .solve(&mut scope, &StepCountTermination::new(0))
        .unwrap_err();
    assert!(matches!(err, TeamPlanError::Configuration(_)));
}
