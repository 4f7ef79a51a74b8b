use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use teamplan_config::SelectionOrder;
use teamplan_test::{random_plan, single_slot_plan, two_items_one_slot, ScenarioShape};

use super::*;

#[test]
fn test_random_sample_is_bounded_and_doable() {
    let plan = random_plan(1, ScenarioShape::new(10, 5, 4));
    let mut selector = MoveSelector::new(SelectionOrder::Random, 32);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let moves: Vec<PlanMove> = selector.iter_moves(&plan, &mut rng).collect();
    assert!(!moves.is_empty());
    assert!(moves.len() <= 32);
    assert!(moves.iter().all(|mv| mv.is_doable(&plan)));
}

#[test]
fn test_random_sample_is_reproducible() {
    let plan = random_plan(2, ScenarioShape::new(8, 4, 4));
    let mut first = MoveSelector::new(SelectionOrder::Random, 16);
    let mut second = MoveSelector::new(SelectionOrder::Random, 16);

    let a: Vec<PlanMove> = first
        .iter_moves(&plan, &mut ChaCha8Rng::seed_from_u64(9))
        .collect();
    let b: Vec<PlanMove> = second
        .iter_moves(&plan, &mut ChaCha8Rng::seed_from_u64(9))
        .collect();
    assert_eq!(a, b);
}

#[test]
fn test_swap_only_weights() {
    let plan = random_plan(3, ScenarioShape::new(6, 3, 3));
    let mut selector = MoveSelector::new(SelectionOrder::Random, 20).with_weights(0, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for mv in selector.iter_moves(&plan, &mut rng) {
        assert!(matches!(mv, PlanMove::SwapAssignment { .. }));
    }
}

#[test]
fn test_original_order_covers_move_space() {
    let plan = random_plan(4, ScenarioShape::new(3, 2, 2));
    let size = MoveSelector::move_space_size(&plan);
    assert_eq!(size, 3 * (2 + 2) + 3);

    let mut selector = MoveSelector::new(SelectionOrder::Original, size);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let moves: Vec<PlanMove> = selector.iter_moves(&plan, &mut rng).collect();

    let distinct: HashSet<String> = moves.iter().map(|mv| mv.to_string()).collect();
    assert_eq!(distinct.len(), moves.len());
    // Each item has one reassignment per field that is a no-op
    let swaps = moves
        .iter()
        .filter(|mv| matches!(mv, PlanMove::SwapAssignment { .. }))
        .count();
    assert_eq!(moves.len() - swaps, 3 * 2);
}

#[test]
fn test_original_order_resumes_between_steps() {
    let plan = random_plan(5, ScenarioShape::new(2, 3, 1));
    let mut selector = MoveSelector::new(SelectionOrder::Original, 2);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let first: Vec<PlanMove> = selector.iter_moves(&plan, &mut rng).collect();
    let second: Vec<PlanMove> = selector.iter_moves(&plan, &mut rng).collect();
    assert!(first.iter().all(|mv| !second.contains(mv)));
}

#[test]
fn test_exhausted_move_space() {
    assert!(MoveSelector::is_exhausted(&single_slot_plan("dev", "X", "dev", "X")));
    assert!(MoveSelector::is_exhausted(&two_items_one_slot()));
    assert!(!MoveSelector::is_exhausted(&random_plan(
        6,
        ScenarioShape::new(2, 2, 1)
    )));

    let plan = two_items_one_slot();
    let mut selector = MoveSelector::new(SelectionOrder::Random, 10);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert_eq!(selector.iter_moves(&plan, &mut rng).count(), 0);
}
