//! End-to-end solving through the facade.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use teamplan::prelude::*;
use teamplan::{AcceptorConfig, SimulatedAnnealingConfig, TabuSearchConfig, TeamPlanError};
use teamplan_test::{date, random_plan, two_items_one_slot, ScenarioShape};
use tokio::sync::mpsc;

fn small_team() -> TeamPlan {
    PlanBuilder::new(date(2024, 3, 4), date(2024, 3, 15))
        .team_days_off([date(2024, 3, 11)])
        .member("Alice", "dev", "Shop", [date(2024, 3, 5)])
        .member("Bob", "qa", "*", [])
        .member("Carol", "*", "Portal", [])
        .epic(
            Epic::new("Search", "Shop")
                .with_workload("dev", 4)
                .with_workload("qa", 2),
        )
        .epic(Epic::new("Login", "Portal").with_workload("dev", 3))
        .build()
        .unwrap()
}

#[test]
fn zero_items_score_zero_without_steps() {
    let plan = PlanBuilder::new(date(2024, 3, 4), date(2024, 3, 8))
        .member("Alice", "dev", "Shop", [])
        .build()
        .unwrap();
    let outcome = teamplan::solve(plan, SolverConfig::new().with_step_limit(10)).unwrap();

    assert_eq!(outcome.score, HardSoftScore::ZERO);
    assert_eq!(outcome.stats.step_count, 0);
    assert!(outcome.warning.is_none());
}

#[test]
fn missing_termination_fails_fast() {
    let err = teamplan::solve(small_team(), SolverConfig::new()).unwrap_err();
    assert!(matches!(err, TeamPlanError::Configuration(_)));
}

#[test]
fn solves_a_built_plan_cleanly() {
    let config = SolverConfig::new()
        .with_step_limit(300)
        .with_random_seed(3);
    let outcome = teamplan::solve(small_team(), config).unwrap();

    assert!(outcome.is_solved_cleanly(), "score {}", outcome.score);
    assert!(outcome.solution.is_fully_assigned());
    assert_eq!(outcome.solution.score(), Some(outcome.score));
}

#[test]
fn every_acceptor_keeps_the_best_monotonic() {
    let acceptors = [
        AcceptorConfig::HillClimbing(Default::default()),
        AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig {
            starting_temperature: Some(5.0),
            ..Default::default()
        }),
        AcceptorConfig::TabuSearch(TabuSearchConfig {
            tabu_size: Some(5),
            ..Default::default()
        }),
    ];
    for acceptor in acceptors {
        let plan = random_plan(11, ScenarioShape::new(16, 5, 4));
        let config = SolverConfig::new()
            .with_step_limit(150)
            .with_random_seed(1)
            .with_acceptor(acceptor);
        let outcome = teamplan::solve(plan, config).unwrap();

        assert_eq!(outcome.improvements[0].step, 0);
        for pair in outcome.improvements.windows(2) {
            assert!(pair[1].score > pair[0].score);
        }
        let last = outcome.improvements.last().unwrap();
        assert_eq!(last.score, outcome.score);
    }
}

#[test]
fn unsolvable_plan_reports_stagnation() {
    let outcome =
        teamplan::solve(two_items_one_slot(), SolverConfig::new().with_step_limit(20)).unwrap();

    assert_eq!(outcome.score, HardSoftScore::of_hard(-1));
    assert!(!outcome.is_solved_cleanly());
    let warning = outcome.warning.unwrap();
    assert_eq!(warning.best_score, outcome.score);
}

#[test]
fn channel_receives_every_new_best() {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let plan = random_plan(5, ScenarioShape::new(12, 4, 3));
    let config = SolverConfig::new()
        .with_step_limit(100)
        .with_random_seed(9);
    let outcome = teamplan::solve_with_channel(plan, config, None, sender).unwrap();

    let mut received = Vec::new();
    while let Ok((solution, score)) = receiver.try_recv() {
        assert_eq!(solution.score(), Some(score));
        received.push(score);
    }
    assert_eq!(received.len(), outcome.improvements.len());
    assert_eq!(received.last(), Some(&outcome.score));
}

#[test]
fn raised_terminate_flag_stops_before_searching() {
    let (sender, _receiver) = mpsc::unbounded_channel();
    let flag = Arc::new(AtomicBool::new(true));
    let config = SolverConfig::new().with_step_limit(1_000);
    let outcome =
        teamplan::solve_with_channel(small_team(), config, Some(flag), sender).unwrap();

    assert_eq!(outcome.stats.step_count, 0);
    assert!(outcome.terminated_early);
    assert!(outcome.solution.is_fully_assigned());
}

#[test]
fn parallel_searches_return_the_best() {
    let plan = random_plan(21, ScenarioShape::new(12, 4, 3));
    let config = SolverConfig::new()
        .with_step_limit(60)
        .with_random_seed(100)
        .with_parallel_solver_count(3);
    let merged = teamplan::solve(plan.clone(), config.clone()).unwrap();

    let singles: Vec<_> = (0..3u64)
        .map(|i| {
            let single = config
                .clone()
                .with_parallel_solver_count(1)
                .with_random_seed(100 + i);
            teamplan::solve(plan.clone(), single).unwrap().score
        })
        .collect();
    assert_eq!(Some(&merged.score), singles.iter().max());
}

#[test]
fn report_lists_the_solved_plan() {
    let config = SolverConfig::new()
        .with_step_limit(200)
        .with_random_seed(4);
    let outcome = teamplan::solve(small_team(), config).unwrap();
    let report = PlanningReport::new(&outcome.solution);

    assert_eq!(report.rows().len(), outcome.solution.item_count());
    let products: Vec<&str> = report.rows().iter().map(|r| r.product.as_str()).collect();
    let mut sorted = products.clone();
    sorted.sort();
    assert_eq!(products, sorted);

    let sections = report.by_product();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].name, "Portal");
}

#[test]
fn config_files_load_in_both_formats() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("solver.toml");
    std::fs::write(
        &toml_path,
        "random_seed = 5\n\n[termination]\nstep_count_limit = 40\n",
    )
    .unwrap();
    let yaml_path = dir.path().join("solver.yaml");
    std::fs::write(
        &yaml_path,
        "termination:\n  unimproved_step_count_limit: 25\nlocal_search:\n  acceptor:\n    type: hill_climbing\n",
    )
    .unwrap();

    let from_toml = teamplan::load_config(&toml_path).unwrap();
    assert_eq!(from_toml.random_seed, Some(5));
    assert!(teamplan::solve(two_items_one_slot(), from_toml).is_ok());

    let from_yaml = teamplan::load_config(&yaml_path).unwrap();
    assert!(matches!(
        from_yaml.local_search.acceptor,
        AcceptorConfig::HillClimbing(_)
    ));

    let missing = teamplan::load_config(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(missing, TeamPlanError::Configuration(_)));
}
