//! Solver implementation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use teamplan_config::SolverConfig;
use teamplan_core::{HardSoftScore, PlanningSolution, Result, Score, TeamPlan, TeamPlanError};
use teamplan_scoring::IncrementalScoreDirector;
use tracing::{debug, info, warn};

use crate::builder::{ConstraintBuilder, LocalSearchBuilder};
use crate::event::{SolverEventListener, SolverEventSupport};
use crate::phase::{ConstructionHeuristicPhase, Phase};
use crate::scope::{ScoreImprovement, SolverScope};
use crate::stats::SolverStats;
use crate::termination::TerminationBuilder;

/// Lifecycle of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverState {
    /// Building the seed solution.
    Initializing,
    /// Running local search steps.
    Searching,
    /// Done; the tracked best is final.
    Terminated,
}

impl SolverState {
    pub fn can_transition_to(self, next: SolverState) -> bool {
        matches!(
            (self, next),
            (SolverState::Initializing, SolverState::Searching)
                | (SolverState::Initializing, SolverState::Terminated)
                | (SolverState::Searching, SolverState::Terminated)
        )
    }

    /// Moves to `next`.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation for a transition the lifecycle does
    /// not allow, such as leaving `Terminated`.
    pub fn transition(self, next: SolverState) -> Result<SolverState> {
        if self.can_transition_to(next) {
            debug!(event = "state", from = ?self, to = ?next);
            Ok(next)
        } else {
            Err(TeamPlanError::invariant(format!(
                "illegal solver state transition {self:?} -> {next:?}"
            )))
        }
    }
}

/// The best solution still breaks hard constraints when the search ended.
///
/// Not an error: the solution is the best effort within the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "Sc: fmt::Display"))]
pub struct StagnationWarning<Sc> {
    #[serde(serialize_with = "serialize_display")]
    pub best_score: Sc,
    pub steps: u64,
}

fn serialize_display<T: fmt::Display, Ser: serde::Serializer>(
    value: &T,
    serializer: Ser,
) -> std::result::Result<Ser::Ok, Ser::Error> {
    serializer.collect_str(value)
}

impl<Sc: fmt::Display> fmt::Display for StagnationWarning<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "best solution still breaks hard constraints ({}) after {} steps",
            self.best_score, self.steps
        )
    }
}

/// Result of a solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome<S: PlanningSolution> {
    /// The best solution found, with its score set.
    pub solution: S,
    pub score: S::Score,
    pub stats: SolverStats,
    /// Every new best score, starting with the seed solution.
    pub improvements: Vec<ScoreImprovement<S::Score>>,
    pub warning: Option<StagnationWarning<S::Score>>,
    pub terminated_early: bool,
    /// Seed of the search that produced `solution`.
    pub seed: Option<u64>,
}

impl<S: PlanningSolution> SolveOutcome<S> {
    /// True when the best solution breaks no hard constraint.
    pub fn is_solved_cleanly(&self) -> bool {
        self.warning.is_none()
    }
}

/// Solves team plans as configured.
///
/// Runs a construction heuristic, then local search until a termination
/// condition fires. With `parallel_solver_count > 1` independent searches
/// with different seeds run on the rayon pool and the best result wins.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use teamplan_config::SolverConfig;
/// use teamplan_core::{HardSoftScore, PlanningItem, TeamMember, TeamPlan, WorkDay};
/// use teamplan_solver::Solver;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let plan = TeamPlan::new(
///     vec![WorkDay::new(0, monday), WorkDay::new(1, monday.succ_opt().unwrap())],
///     vec![TeamMember::new(0, "Alice", "dev", "Portal")],
///     vec![PlanningItem::new(0, "Login", "dev", "Portal"), PlanningItem::new(1, "Login", "dev", "Portal")],
/// ).unwrap();
///
/// let config = SolverConfig::new().with_step_limit(20).with_random_seed(7);
/// let outcome = Solver::new(config).solve(plan).unwrap();
/// assert_eq!(outcome.score, HardSoftScore::ZERO);
/// assert!(outcome.is_solved_cleanly());
/// ```
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    terminate_early_flag: Arc<AtomicBool>,
    external_flag: Option<Arc<AtomicBool>>,
    solving: Arc<AtomicBool>,
    events: SolverEventSupport<TeamPlan>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
            external_flag: None,
            solving: Arc::new(AtomicBool::new(false)),
            events: SolverEventSupport::new(),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn SolverEventListener<TeamPlan>>) -> Self {
        self.events.add_listener(listener);
        self
    }

    /// Also stops when `flag` is set, e.g. by another thread.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.external_flag = Some(flag);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Requests early termination of the solving process.
    ///
    /// This method is thread-safe and can be called from another thread.
    /// Returns false when no solve is running.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Solves `plan`, returning the best solution found.
    ///
    /// # Errors
    ///
    /// Returns [`TeamPlanError::Configuration`] before any step when the
    /// configuration is invalid or no stopping limit is set, or when the
    /// plan has items but no work days or no team members. Returns
    /// [`TeamPlanError::InvariantViolation`] when an asserted environment
    /// mode detects a broken invariant.
    pub fn solve(&self, plan: TeamPlan) -> Result<SolveOutcome<TeamPlan>> {
        self.config
            .validate()
            .map_err(|e| TeamPlanError::configuration(e.to_string()))?;
        check_problem(&plan)?;

        self.terminate_early_flag.store(false, Ordering::SeqCst);
        self.solving.store(true, Ordering::SeqCst);
        let result = match self.config.parallel_solver_count {
            0 | 1 => self.run_search(plan, 0),
            count => crate::parallel::solve_parallel(self, plan, count),
        };
        self.solving.store(false, Ordering::SeqCst);
        result
    }

    /// Runs one independent search with the seed for `index`.
    pub(crate) fn run_search(
        &self,
        plan: TeamPlan,
        index: usize,
    ) -> Result<SolveOutcome<TeamPlan>> {
        let seed = self.config.seed_for(index);
        let mut state = SolverState::Initializing;
        let termination = TerminationBuilder::build::<HardSoftScore>(
            self.config.termination.as_ref(),
            self.external_flag.clone().unwrap_or_default(),
        )?;

        info!(
            event = "solve_start",
            search = index,
            seed = ?seed,
            item_count = plan.item_count(),
            work_day_count = plan.work_day_count(),
            team_member_count = plan.team_member_count(),
        );

        let has_items = plan.item_count() > 0;
        let director = IncrementalScoreDirector::new(plan, ConstraintBuilder::build(&self.config.constraints));
        let scope = match seed {
            Some(seed) => SolverScope::with_seed(director, seed),
            None => SolverScope::new(director),
        };
        let mut scope = scope.with_events(self.events.clone());
        scope.set_terminate_early_flag(self.terminate_early_flag.clone());
        scope.start_solving();
        scope.events().fire_solving_started(scope.working_solution());

        if has_items {
            ConstructionHeuristicPhase::new(
                self.config.construction_heuristic.construction_heuristic_type,
            )
            .solve(&mut scope, &termination)?;
            if let Some(item) = scope.working_solution().first_unassigned() {
                return Err(TeamPlanError::invariant(format!(
                    "item {item} is unassigned after construction"
                )));
            }
            scope.update_best_solution();

            state = state.transition(SolverState::Searching)?;
            LocalSearchBuilder::build(&self.config, seed).solve(&mut scope, &termination)?;
        } else {
            scope.update_best_solution();
        }
        state.transition(SolverState::Terminated)?;

        let terminated_early = scope.is_terminate_early()
            || self
                .external_flag
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::SeqCst));
        let events = scope.events().clone();
        let (tracker, stats, _director) = scope.finish();
        let (best, improvements) = tracker.into_parts();
        let (solution, score) = best.ok_or_else(|| {
            TeamPlanError::invariant("search ended without a tracked best solution")
        })?;
        events.fire_solving_ended(&solution, terminated_early);

        let warning = (!score.is_feasible()).then_some(StagnationWarning {
            best_score: score,
            steps: stats.step_count,
        });
        if let Some(warning) = &warning {
            warn!(event = "stagnation", search = index, score = %warning.best_score, steps = warning.steps);
        }

        info!(
            event = "solve_end",
            search = index,
            score = %score,
            steps = stats.step_count,
            moves_evaluated = stats.moves_evaluated,
            moves_accepted = stats.moves_accepted,
            moves_per_second = stats.moves_per_second() as u64,
            improvements = improvements.len(),
            terminated_early = terminated_early,
        );

        Ok(SolveOutcome {
            solution,
            score,
            stats,
            improvements,
            warning,
            terminated_early,
            seed,
        })
    }
}

/// Rejects plans no search can assign.
fn check_problem(plan: &TeamPlan) -> Result<()> {
    if plan.item_count() == 0 {
        return Ok(());
    }
    if plan.work_day_count() == 0 {
        return Err(TeamPlanError::configuration(
            "the plan has planning items but no work days",
        ));
    }
    if plan.team_member_count() == 0 {
        return Err(TeamPlanError::configuration(
            "the plan has planning items but no team members",
        ));
    }
    Ok(())
}
