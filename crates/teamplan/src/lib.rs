//! TeamPlan - workforce scheduling by local search.
//!
//! Assigns planning items to (work day, team member) pairs while honoring
//! capacity, profile, product and days-off rules.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use teamplan::prelude::*;
//!
//! let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let friday = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
//! let plan = PlanBuilder::new(monday, friday)
//!     .member("Alice", "dev", "Shop", [])
//!     .epic(Epic::new("Search", "Shop").with_workload("dev", 3))
//!     .build()
//!     .unwrap();
//!
//! let config = SolverConfig::new().with_step_limit(50).with_random_seed(7);
//! let outcome = teamplan::solve(plan, config).unwrap();
//! assert_eq!(outcome.score, HardSoftScore::ZERO);
//! assert!(outcome.is_solved_cleanly());
//! ```

use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::mpsc;

// Domain and score types
pub use teamplan_core::{
    Assignment, Epic, EpicWorkload, HardSoftScore, PlanBuilder, PlanningItem, PlanningSolution,
    Score, TeamMember, TeamPlan, TeamPlanError, WorkDay, WILDCARD,
};
pub use teamplan_core::Result;

// Configuration
pub use teamplan_config::{
    AcceptorConfig, ConfigError, ConstraintsConfig, ConstructionHeuristicType, EnvironmentMode,
    HillClimbingConfig, SimulatedAnnealingConfig, SolverConfig, TabuSearchConfig,
    TerminationConfig,
};

// Scoring
pub use teamplan_scoring::{ConstraintAnalysis, ConstraintMatch, IndictmentMap, ScoreExplanation};

// Solving
pub use teamplan_solver::{
    merge_outcomes, SolveOutcome, Solver, SolverEventListener, SolverState, SolverStats,
    StagnationWarning,
};

#[cfg(feature = "console")]
pub mod console;
pub mod report;

/// Solves `plan` with `config` and returns the best plan found.
///
/// # Errors
///
/// Returns [`TeamPlanError::Configuration`] for an unusable configuration or
/// problem, and [`TeamPlanError::InvariantViolation`] if the search breaks
/// an internal invariant.
pub fn solve(plan: TeamPlan, config: SolverConfig) -> Result<SolveOutcome<TeamPlan>> {
    teamplan_solver::run_solver(plan, config)
}

/// Solves `plan`, sending every new best plan and its score through `sender`.
///
/// Meant to run on a blocking thread while the receiver is drained
/// elsewhere. Setting `terminate` stops the search at the next step.
pub fn solve_with_channel(
    plan: TeamPlan,
    config: SolverConfig,
    terminate: Option<Arc<AtomicBool>>,
    sender: mpsc::UnboundedSender<(TeamPlan, HardSoftScore)>,
) -> Result<SolveOutcome<TeamPlan>> {
    teamplan_solver::run_solver_with_channel(plan, config, terminate, sender)
}

/// Loads a solver configuration, picking YAML for `.yaml`/`.yml` files and
/// TOML otherwise.
pub fn load_config(path: impl AsRef<Path>) -> Result<SolverConfig> {
    let path = path.as_ref();
    let loaded = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => SolverConfig::from_yaml_file(path),
        _ => SolverConfig::from_toml_file(path),
    };
    loaded.map_err(|e| {
        TeamPlanError::configuration(format!("{}: {}", path.display(), e))
    })
}

/// Breaks the score of `plan` down per constraint under `constraints`.
pub fn explain(plan: &TeamPlan, constraints: &ConstraintsConfig) -> ScoreExplanation<HardSoftScore> {
    teamplan_solver::ConstraintBuilder::build(constraints).explain(plan)
}

pub mod prelude {
    pub use super::report::PlanningReport;
    pub use super::{
        AcceptorConfig, ConstructionHeuristicType, EnvironmentMode, Epic, HardSoftScore,
        PlanBuilder, PlanningItem, PlanningSolution, Score, SolveOutcome, SolverConfig,
        TeamMember, TeamPlan, WorkDay,
    };
}
