use teamplan_core::{HardSoftScore, TeamPlan};
use teamplan_test::two_items_one_slot;

use super::*;
use crate::heuristic::{PlanField, PlanMove, TabuAttribute};

fn score(hard: i64, soft: i64) -> HardSoftScore {
    HardSoftScore::of(hard, soft)
}

fn any_move() -> PlanMove {
    PlanMove::ReassignWorkDay {
        item: 0,
        from: Some(0),
        to: 1,
    }
}

#[test]
fn hill_climbing_accepts_improving_and_equal() {
    let mut acceptor = HillClimbingAcceptor::new();
    let mv = any_move();
    let last = score(-2, 0);
    assert!(Acceptor::<TeamPlan, _>::is_accepted(&mut acceptor, &last, &score(-1, 0), &mv));
    assert!(Acceptor::<TeamPlan, _>::is_accepted(&mut acceptor, &last, &score(-2, 0), &mv));
}

#[test]
fn hill_climbing_rejects_worsening() {
    let mut acceptor = HillClimbingAcceptor::new();
    let mv = any_move();
    assert!(!Acceptor::<TeamPlan, _>::is_accepted(
        &mut acceptor,
        &score(-2, 0),
        &score(-2, -1),
        &mv
    ));
    assert!(!Acceptor::<TeamPlan, _>::is_accepted(
        &mut acceptor,
        &score(0, -5),
        &score(-1, 0),
        &mv
    ));
}

#[test]
fn annealing_always_accepts_improvements() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(0.0, 0.5, 1000.0).with_seed(3);
    let mv = any_move();
    assert!(Acceptor::<TeamPlan, _>::is_accepted(
        &mut acceptor,
        &score(-3, 0),
        &score(-1, 0),
        &mv
    ));
}

#[test]
fn annealing_at_zero_temperature_rejects_worsening() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(0.0, 0.5, 1000.0).with_seed(3);
    let mv = any_move();
    for _ in 0..100 {
        assert!(!Acceptor::<TeamPlan, _>::is_accepted(
            &mut acceptor,
            &score(0, 0),
            &score(0, -1),
            &mv
        ));
    }
}

#[test]
fn annealing_probability_follows_temperature() {
    let acceptor = SimulatedAnnealingAcceptor::new(2.0, 0.5, 1000.0);
    let p = acceptor.acceptance_probability(score(0, -2));
    assert!((p - (-1.0f64).exp()).abs() < 1e-12);
    assert_eq!(acceptor.acceptance_probability(score(0, 1)), 1.0);

    let hard = acceptor.acceptance_probability(score(-1, 0));
    assert!(hard < p);
}

#[test]
fn annealing_cools_each_step() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(8.0, 0.5, 1000.0);
    Acceptor::<TeamPlan, PlanMove>::phase_started(&mut acceptor, &score(0, 0));
    Acceptor::<TeamPlan, PlanMove>::step_ended(&mut acceptor, &score(0, 0), None);
    Acceptor::<TeamPlan, PlanMove>::step_ended(&mut acceptor, &score(0, 0), None);
    assert_eq!(acceptor.temperature(), 2.0);

    Acceptor::<TeamPlan, PlanMove>::phase_started(&mut acceptor, &score(0, 0));
    assert_eq!(acceptor.temperature(), 8.0);
}

#[test]
fn annealing_with_same_seed_decides_the_same() {
    let decide = |seed| {
        let mut acceptor = SimulatedAnnealingAcceptor::new(1.0, 1.0, 1000.0).with_seed(seed);
        let mv = any_move();
        (0..50)
            .map(|_| {
                Acceptor::<TeamPlan, _>::is_accepted(&mut acceptor, &score(0, 0), &score(0, -1), &mv)
            })
            .collect::<Vec<_>>()
    };
    let first = decide(11);
    assert_eq!(first, decide(11));
    assert!(first.iter().any(|accepted| *accepted));
    assert!(first.iter().any(|accepted| !*accepted));
}

#[test]
fn tabu_rejects_reverting_a_recent_step() {
    let plan = two_items_one_slot();
    let mut acceptor = TabuSearchAcceptor::<TeamPlan>::without_aspiration(3);
    Acceptor::<TeamPlan, PlanMove>::phase_started(&mut acceptor, &score(-1, 0));

    let step = PlanMove::reassign_team_member(&plan, 0, 1);
    acceptor.step_ended(&score(-1, 0), Some(&step));
    assert!(acceptor.is_tabu(&TabuAttribute::new(0, PlanField::TeamMember, 0)));

    let back = PlanMove::ReassignTeamMember {
        item: 0,
        from: Some(1),
        to: 0,
    };
    assert!(!acceptor.is_accepted(&score(-1, 0), &score(0, 0), &back));

    let other = PlanMove::ReassignWorkDay {
        item: 1,
        from: Some(0),
        to: 2,
    };
    assert!(acceptor.is_accepted(&score(-1, 0), &score(-3, 0), &other));
}

#[test]
fn tabu_aspiration_accepts_new_best() {
    let plan = two_items_one_slot();
    let mut acceptor = TabuSearchAcceptor::<TeamPlan>::new(3);
    Acceptor::<TeamPlan, PlanMove>::phase_started(&mut acceptor, &score(-1, 0));
    let step = PlanMove::reassign_team_member(&plan, 0, 1);
    acceptor.step_ended(&score(-1, 0), Some(&step));

    let back = PlanMove::ReassignTeamMember {
        item: 0,
        from: Some(1),
        to: 0,
    };
    assert!(acceptor.is_accepted(&score(-1, 0), &score(0, 0), &back));
    assert!(!acceptor.is_accepted(&score(-1, 0), &score(-1, 0), &back));
}

#[test]
fn tabu_entries_expire_after_tenure() {
    let plan = two_items_one_slot();
    let mut acceptor = TabuSearchAcceptor::<TeamPlan>::without_aspiration(2);
    Acceptor::<TeamPlan, PlanMove>::phase_started(&mut acceptor, &score(0, 0));

    let step = PlanMove::reassign_work_day(&plan, 0, 1);
    acceptor.step_ended(&score(0, 0), Some(&step));
    assert_eq!(acceptor.tabu_count(), 1);

    Acceptor::<TeamPlan, PlanMove>::step_ended(&mut acceptor, &score(0, 0), None);
    assert_eq!(acceptor.tabu_count(), 1);
    Acceptor::<TeamPlan, PlanMove>::step_ended(&mut acceptor, &score(0, 0), None);
    assert_eq!(acceptor.tabu_count(), 0);
}

#[test]
fn boxed_acceptor_delegates() {
    let mut acceptor: Box<dyn Acceptor<TeamPlan, PlanMove>> = Box::new(HillClimbingAcceptor);
    let mv = any_move();
    assert!(acceptor.is_accepted(&score(-1, 0), &score(0, 0), &mv));
    assert!(!acceptor.is_accepted(&score(0, 0), &score(-1, 0), &mv));
}
