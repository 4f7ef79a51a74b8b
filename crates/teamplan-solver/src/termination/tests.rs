//! Tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use teamplan_config::TerminationConfig;
use teamplan_core::{HardSoftScore, TeamPlan, TeamPlanError};
use teamplan_test::{random_plan, two_items_one_slot, wildcard_plan, ScenarioShape};

use super::*;
use crate::test_utils::{create_scope, TestDirector};

type Scope = SolverScope<TeamPlan, TestDirector>;

fn terminated<T: Termination<TeamPlan, TestDirector>>(term: &T, scope: &Scope) -> bool {
    term.is_terminated(scope)
}

#[test]
fn test_step_count_termination() {
    let mut scope = create_scope(two_items_one_slot(), 0);
    let term = StepCountTermination::new(3);

    assert!(!terminated(&term, &scope));
    scope.increment_step_count();
    scope.increment_step_count();
    assert!(!terminated(&term, &scope));
    scope.increment_step_count();
    assert!(terminated(&term, &scope));
}

#[test]
fn test_time_termination() {
    let scope = create_scope(two_items_one_slot(), 0);
    assert!(terminated(&TimeTermination::millis(0), &scope));
    assert!(!terminated(&TimeTermination::seconds(3600), &scope));
}

#[test]
fn test_time_termination_before_start() {
    let scope: Scope = SolverScope::with_seed(
        crate::test_utils::default_director(two_items_one_slot()),
        0,
    );
    assert!(!terminated(&TimeTermination::millis(0), &scope));
}

#[test]
fn test_unimproved_step_count_termination() {
    let mut scope = create_scope(random_plan(1, ScenarioShape::new(4, 2, 2)), 0);
    scope.update_best_solution();
    let term = UnimprovedStepCountTermination::new(3);

    for _ in 0..2 {
        scope.increment_step_count();
        scope.update_best_solution();
        assert!(!terminated(&term, &scope));
    }
    scope.increment_step_count();
    assert!(terminated(&term, &scope));
}

#[test]
fn test_best_score_termination() {
    let mut scope = create_scope(two_items_one_slot(), 0);
    let term = BestScoreTermination::new(HardSoftScore::ZERO);
    assert!(!terminated(&term, &scope));

    scope.update_best_solution();
    assert!(!terminated(&term, &scope));

    let mut clean = create_scope(wildcard_plan(), 0);
    clean.update_best_solution();
    assert!(terminated(&term, &clean));
}

#[test]
fn test_external_termination() {
    let scope = create_scope(two_items_one_slot(), 0);
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(flag.clone());

    assert!(!terminated(&term, &scope));
    flag.store(true, Ordering::SeqCst);
    assert!(terminated(&term, &scope));
}

#[test]
fn test_or_termination() {
    let mut scope = create_scope(two_items_one_slot(), 0);
    let term = OrTermination::new((
        TimeTermination::seconds(3600),
        StepCountTermination::new(1),
    ));
    assert!(!terminated(&term, &scope));
    scope.increment_step_count();
    assert!(terminated(&term, &scope));
}

#[test]
fn test_unset_option_never_terminates() {
    let scope = create_scope(two_items_one_slot(), 0);
    let term: Option<TimeTermination> = None;
    assert!(!terminated(&term, &scope));
}

#[test]
fn test_builder_requires_stopping_limit() {
    let flag = Arc::new(AtomicBool::new(false));
    let missing = TerminationBuilder::build::<HardSoftScore>(None, flag.clone());
    assert!(matches!(missing, Err(TeamPlanError::Configuration(_))));

    let only_score = TerminationConfig {
        best_score_limit: Some("0hard/0soft".to_string()),
        ..Default::default()
    };
    let result = TerminationBuilder::build::<HardSoftScore>(Some(&only_score), flag);
    assert!(matches!(result, Err(TeamPlanError::Configuration(_))));
}

#[test]
fn test_builder_rejects_bad_best_score() {
    let config = TerminationConfig {
        step_count_limit: Some(10),
        best_score_limit: Some("zero".to_string()),
        ..Default::default()
    };
    let result =
        TerminationBuilder::build::<HardSoftScore>(Some(&config), Arc::new(AtomicBool::new(false)));
    assert!(matches!(result, Err(TeamPlanError::Configuration(_))));
}

#[test]
fn test_builder_combines_conditions() {
    let config = TerminationConfig {
        seconds_spent_limit: Some(3600),
        step_count_limit: Some(2),
        best_score_limit: Some("0hard/0soft".to_string()),
        ..Default::default()
    };
    let flag = Arc::new(AtomicBool::new(false));
    let term = TerminationBuilder::build::<HardSoftScore>(Some(&config), flag.clone()).unwrap();

    let mut scope = create_scope(two_items_one_slot(), 0);
    scope.update_best_solution();
    assert!(!terminated(&term, &scope));
    scope.increment_step_count();
    scope.increment_step_count();
    assert!(terminated(&term, &scope));

    let fresh = create_scope(two_items_one_slot(), 0);
    assert!(!terminated(&term, &fresh));
    flag.store(true, Ordering::SeqCst);
    assert!(terminated(&term, &fresh));
}

#[test]
fn test_builder_time_limit_sums_units() {
    let config = TerminationConfig {
        millis_spent_limit: Some(250),
        seconds_spent_limit: Some(1),
        ..Default::default()
    };
    let term = TerminationBuilder::build::<HardSoftScore>(
        Some(&config),
        Arc::new(AtomicBool::new(false)),
    )
    .unwrap();
    let time = (term.0).0.as_ref().unwrap();
    assert_eq!(time.limit(), Duration::from_millis(1250));
}
