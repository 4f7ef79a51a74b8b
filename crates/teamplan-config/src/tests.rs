//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "full_assert"
        random_seed = 42
        parallel_solver_count = 4

        [termination]
        seconds_spent_limit = 30
        step_count_limit = 1000

        [construction_heuristic]
        construction_heuristic_type = "first_fit"

        [local_search.acceptor]
        type = "simulated_annealing"
        starting_temperature = 5.0
        decay_rate = 0.99
        hard_tolerance = 2

        [local_search.move_selector]
        selection_order = "original"
        sample_size = 16
        swap_weight = 3
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.parallel_solver_count, 4);
    assert_eq!(
        config.construction_heuristic.construction_heuristic_type,
        ConstructionHeuristicType::FirstFit
    );
    let termination = config.termination.as_ref().unwrap();
    assert_eq!(termination.seconds_spent_limit, Some(30));
    assert_eq!(termination.step_count_limit, Some(1000));

    match &config.local_search.acceptor {
        AcceptorConfig::SimulatedAnnealing(sa) => {
            assert_eq!(sa.starting_temperature(), 5.0);
            assert_eq!(sa.decay_rate(), 0.99);
            assert_eq!(
                sa.hard_level_weight(),
                SimulatedAnnealingConfig::DEFAULT_HARD_LEVEL_WEIGHT
            );
        }
        other => panic!("expected simulated annealing, got {:?}", other),
    }
    assert_eq!(config.local_search.acceptor.hard_tolerance(), Some(2));

    let selector = &config.local_search.move_selector;
    assert_eq!(selector.selection_order, SelectionOrder::Original);
    assert_eq!(selector.sample_size(), 16);
    assert_eq!(selector.change_weight(), 2);
    assert_eq!(selector.swap_weight(), 3);
    config.validate().unwrap();
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: reproducible
        random_seed: 7
        termination:
          unimproved_step_count_limit: 300
        local_search:
          acceptor:
            type: tabu_search
            tabu_size: 5
            aspiration: false
        constraints:
          deadline: true
          weights:
            deadline: 3
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(7));
    match &config.local_search.acceptor {
        AcceptorConfig::TabuSearch(tabu) => {
            assert_eq!(tabu.tabu_size(), 5);
            assert!(!tabu.aspiration());
        }
        other => panic!("expected tabu search, got {:?}", other),
    }
    assert!(config.constraints.deadline);
    assert_eq!(config.constraints.weight("deadline"), 3);
    assert_eq!(config.constraints.weight("capacity"), 1);
    config.validate().unwrap();
}

#[test]
fn test_defaults() {
    let config = SolverConfig::default();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.parallel_solver_count, 1);
    assert!(config.termination.is_none());
    assert_eq!(
        config.construction_heuristic.construction_heuristic_type,
        ConstructionHeuristicType::CheapestInsertion
    );
    assert!(matches!(
        config.local_search.acceptor,
        AcceptorConfig::SimulatedAnnealing(_)
    ));
    assert_eq!(
        config.constraints.enabled_keys(),
        vec!["capacity", "profile", "product", "days_off"]
    );
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config.parallel_solver_count, 1);
    assert!(config.constraints.capacity);
    assert!(!config.constraints.focus);
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_step_limit(500)
        .with_acceptor(AcceptorConfig::HillClimbing(HillClimbingConfig::default()))
        .with_construction_heuristic(ConstructionHeuristicType::FirstFit)
        .with_constraint("focus", true)
        .with_constraint("days_off", false);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.termination.as_ref().unwrap().step_count_limit, Some(500));
    assert!(matches!(
        config.local_search.acceptor,
        AcceptorConfig::HillClimbing(_)
    ));
    assert_eq!(
        config.constraints.enabled_keys(),
        vec!["capacity", "profile", "product", "focus"]
    );
}

#[test]
fn test_time_limit_sums_units() {
    let termination = TerminationConfig {
        minutes_spent_limit: Some(1),
        seconds_spent_limit: Some(2),
        millis_spent_limit: Some(300),
        ..Default::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(62_300)));
    assert!(TerminationConfig::default().time_limit().is_none());
}

#[test]
fn test_huge_time_limit_is_rejected() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(u64::MAX / 10),
        ..Default::default()
    };
    assert_eq!(
        termination.time_limit(),
        Some(Duration::from_millis(u64::MAX))
    );
    assert!(matches!(
        termination.checked_time_limit(),
        Err(ConfigError::Invalid(_))
    ));

    let summed = TerminationConfig {
        millis_spent_limit: Some(u64::MAX - 500),
        seconds_spent_limit: Some(1),
        ..Default::default()
    };
    assert!(summed.checked_time_limit().is_err());

    let config = SolverConfig::new().with_termination_seconds(u64::MAX / 10);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_missing_termination_is_invalid() {
    let err = SolverConfig::default().validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_best_score_limit_alone_is_invalid() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        best_score_limit = "0hard/0soft"
    "#,
    )
    .unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_best_score_limit_parses() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        step_count_limit = 10
        best_score_limit = "0hard/-5soft"
    "#,
    )
    .unwrap();
    let best = config.termination.as_ref().unwrap().best_score().unwrap();
    assert_eq!(best, Some(HardSoftScore::of(0, -5)));

    let bad = SolverConfig::new()
        .with_step_limit(10)
        .termination
        .map(|t| TerminationConfig {
            best_score_limit: Some("lots".to_string()),
            ..t
        });
    let config = SolverConfig {
        termination: bad,
        ..SolverConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_numeric_settings() {
    let base = SolverConfig::new().with_step_limit(10);

    let zero_parallel = base.clone().with_parallel_solver_count(0);
    assert!(zero_parallel.validate().is_err());

    let bad_decay = base
        .clone()
        .with_acceptor(AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig {
            decay_rate: Some(1.5),
            ..Default::default()
        }));
    assert!(bad_decay.validate().is_err());

    let empty_tabu = base
        .clone()
        .with_acceptor(AcceptorConfig::TabuSearch(TabuSearchConfig {
            tabu_size: Some(0),
            ..Default::default()
        }));
    assert!(empty_tabu.validate().is_err());

    let mut no_moves = base.clone();
    no_moves.local_search.move_selector.change_weight = Some(0);
    no_moves.local_search.move_selector.swap_weight = Some(0);
    assert!(no_moves.validate().is_err());

    base.validate().unwrap();
}

#[test]
fn test_unknown_weight_key_is_invalid() {
    let mut config = SolverConfig::new().with_step_limit(10);
    config.constraints.weights.insert("overtime".to_string(), 2);
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("overtime"));
}

#[test]
fn test_seed_for() {
    let seeded = SolverConfig::new().with_random_seed(10);
    assert_eq!(seeded.seed_for(0), Some(10));
    assert_eq!(seeded.seed_for(3), Some(13));

    let reproducible = SolverConfig::new();
    assert_eq!(reproducible.seed_for(2), Some(2));

    let free = SolverConfig::new().with_environment_mode(EnvironmentMode::NonReproducible);
    assert_eq!(free.seed_for(0), None);
}

#[test]
fn test_environment_mode_assertions() {
    assert!(!EnvironmentMode::Reproducible.is_asserted());
    assert!(EnvironmentMode::FastAssert.is_asserted());
    assert!(!EnvironmentMode::FastAssert.is_fully_asserted());
    assert!(EnvironmentMode::FullAssert.is_fully_asserted());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = SolverConfig::load("/nonexistent/teamplan/solver.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_forager_limit() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        step_count_limit = 10

        [local_search.forager]
        accepted_count_limit = 4
    "#,
    )
    .unwrap();
    assert_eq!(config.local_search.forager.accepted_count_limit, Some(4));
    assert!(config.validate().is_ok());

    let mut zero = config.clone();
    zero.local_search.forager.accepted_count_limit = Some(0);
    assert!(zero.validate().is_err());
}
