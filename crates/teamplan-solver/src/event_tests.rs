//! Tests for the event system.

use super::*;
use teamplan_core::{HardSoftScore, TeamPlan};
use teamplan_test::two_items_one_slot;

#[test]
fn test_event_support_fires_in_order() {
    let mut support: SolverEventSupport<TeamPlan> = SolverEventSupport::new();
    let first = Arc::new(CountingEventListener::new());
    let second = Arc::new(CountingEventListener::new());
    support.add_listener(first.clone());
    support.add_listener(second.clone());

    let plan = two_items_one_slot();
    support.fire_solving_started(&plan);
    support.fire_phase_started("LocalSearch");
    support.fire_best_solution_changed(&plan, &HardSoftScore::of(-1, 0));
    support.fire_best_solution_changed(&plan, &HardSoftScore::ZERO);
    support.fire_phase_ended("LocalSearch", 10);
    support.fire_solving_ended(&plan, false);

    for listener in [&first, &second] {
        assert_eq!(listener.solving_started_count(), 1);
        assert_eq!(listener.phase_started_count(), 1);
        assert_eq!(listener.best_solution_count(), 2);
        assert_eq!(listener.phase_ended_count(), 1);
        assert_eq!(listener.solving_ended_count(), 1);
    }
}

#[test]
fn test_clone_shares_listeners() {
    let mut support: SolverEventSupport<TeamPlan> = SolverEventSupport::new();
    let listener = Arc::new(CountingEventListener::new());
    support.add_listener(listener.clone());

    let copy = support.clone();
    copy.fire_best_solution_changed(&two_items_one_slot(), &HardSoftScore::ZERO);
    assert_eq!(listener.best_solution_count(), 1);
    assert_eq!(copy.listener_count(), 1);
}

#[test]
fn test_channel_listener_sends_best_solutions() {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let listener = ChannelEventListener::new(sender);
    let plan = two_items_one_slot();

    listener.on_best_solution_changed(&plan, &HardSoftScore::of(-1, 0));
    let (received, score) = receiver.try_recv().unwrap();
    assert_eq!(score, HardSoftScore::of(-1, 0));
    assert_eq!(received.assignments(), plan.assignments());
}

#[test]
fn test_channel_listener_ignores_closed_receiver() {
    let (sender, receiver) = mpsc::unbounded_channel::<(TeamPlan, HardSoftScore)>();
    drop(receiver);
    let listener = ChannelEventListener::new(sender);
    listener.on_best_solution_changed(&two_items_one_slot(), &HardSoftScore::ZERO);
}

#[test]
fn test_logging_listener_does_not_panic_without_subscriber() {
    let listener = LoggingEventListener::with_prefix("[run 0] ");
    let plan = two_items_one_slot();
    SolverEventListener::<TeamPlan>::on_solving_started(&listener, &plan);
    SolverEventListener::<TeamPlan>::on_best_solution_changed(&listener, &plan, &HardSoftScore::ZERO);
    SolverEventListener::<TeamPlan>::on_solving_ended(&listener, &plan, true);
}
