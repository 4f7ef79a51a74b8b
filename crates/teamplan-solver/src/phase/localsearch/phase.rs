//! Local search phase implementation.

use std::fmt::Debug;

use teamplan_config::EnvironmentMode;
use teamplan_core::{HardSoftScore, Result, TeamPlan, TeamPlanError};
use teamplan_scoring::ScoreDirector;
use tracing::{debug, trace};

use super::{AcceptedCountForager, Acceptor, LocalSearchForager};
use crate::heuristic::{MoveSelector, PlanMove};
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::Termination;

/// Local search phase that improves a fully assigned plan.
///
/// Each step:
/// 1. Draws a sample of doable moves into the step's move list
/// 2. Scores each move incrementally, undoing it afterwards
/// 3. Filters by hard tolerance and the acceptor
/// 4. Applies the best accepted move, if any
/// 5. Offers the plan to the best solution tracker
///
/// A step where nothing was accepted still counts as a step, so
/// step and stagnation limits keep progressing.
pub struct LocalSearchPhase<A> {
    move_selector: MoveSelector,
    acceptor: A,
    forager: AcceptedCountForager<HardSoftScore>,
    hard_tolerance: Option<i64>,
    environment_mode: EnvironmentMode,
    arena: Vec<PlanMove>,
}

impl<A> LocalSearchPhase<A>
where
    A: Acceptor<TeamPlan, PlanMove>,
{
    pub fn new(move_selector: MoveSelector, acceptor: A) -> Self {
        Self {
            move_selector,
            acceptor,
            forager: AcceptedCountForager::unbounded(),
            hard_tolerance: None,
            environment_mode: EnvironmentMode::default(),
            arena: Vec::new(),
        }
    }

    /// Rejects moves whose hard score falls more than `tolerance` below
    /// the best hard score seen so far.
    pub fn with_hard_tolerance(mut self, tolerance: Option<i64>) -> Self {
        self.hard_tolerance = tolerance;
        self
    }

    pub fn with_forager(mut self, forager: AcceptedCountForager<HardSoftScore>) -> Self {
        self.forager = forager;
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn acceptor(&self) -> &A {
        &self.acceptor
    }
}

impl<A: Debug> Debug for LocalSearchPhase<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("move_selector", &self.move_selector)
            .field("acceptor", &self.acceptor)
            .field("forager", &self.forager)
            .field("hard_tolerance", &self.hard_tolerance)
            .field("environment_mode", &self.environment_mode)
            .finish()
    }
}

fn within_hard_tolerance(
    tolerance: Option<i64>,
    best: Option<HardSoftScore>,
    move_score: &HardSoftScore,
) -> bool {
    match (tolerance, best) {
        (Some(tolerance), Some(best)) => move_score.hard() >= best.hard() - tolerance,
        _ => true,
    }
}

/// Checks the step invariants the environment mode asks for.
pub(crate) fn assert_step<D: ScoreDirector<TeamPlan>>(
    mode: EnvironmentMode,
    scope: &mut SolverScope<TeamPlan, D>,
    expected: HardSoftScore,
) -> Result<()> {
    if !mode.is_asserted() {
        return Ok(());
    }
    if let Some(item) = scope.working_solution().first_unassigned() {
        return Err(TeamPlanError::invariant(format!(
            "item {item} has an unassigned decision field after step {}",
            scope.total_step_count()
        )));
    }
    if mode.is_fully_asserted() {
        let incremental = scope.calculate_score();
        let full = scope.score_director().full_score();
        if incremental != full || incremental != expected {
            return Err(TeamPlanError::invariant(format!(
                "score corruption after step {}: step score {expected}, incremental {incremental}, full {full}",
                scope.total_step_count()
            )));
        }
    }
    Ok(())
}

impl<D, A> Phase<TeamPlan, D> for LocalSearchPhase<A>
where
    D: ScoreDirector<TeamPlan>,
    A: Acceptor<TeamPlan, PlanMove>,
{
    fn solve<T: Termination<TeamPlan, D>>(
        &mut self,
        solver_scope: &mut SolverScope<TeamPlan, D>,
        termination: &T,
    ) -> Result<()> {
        let phase_type = <Self as Phase<TeamPlan, D>>::phase_type_name(self);
        let mut last_step_score = solver_scope.calculate_score();
        let start_step = solver_scope.total_step_count();

        self.acceptor.phase_started(&last_step_score);
        solver_scope.events().fire_phase_started(phase_type);
        debug!(
            event = "phase_start",
            phase = phase_type,
            score = %last_step_score,
            move_space = MoveSelector::move_space_size(solver_scope.working_solution()),
        );

        while !termination.is_terminated(solver_scope) {
            if MoveSelector::is_exhausted(solver_scope.working_solution()) {
                debug!(event = "move_space_exhausted", phase = phase_type);
                break;
            }

            self.acceptor.step_started();
            self.forager.step_started();

            self.arena.clear();
            {
                let (plan, rng) = solver_scope.working_solution_and_rng();
                self.arena.extend(self.move_selector.iter_moves(plan, rng));
            }

            let best = solver_scope.best_score().copied();
            for (index, candidate) in self.arena.iter().enumerate() {
                let delta = candidate.score_delta(solver_scope.score_director_mut());
                let move_score = last_step_score + delta;
                let accepted = within_hard_tolerance(self.hard_tolerance, best, &move_score)
                    && self
                        .acceptor
                        .is_accepted(&last_step_score, &move_score, candidate);
                solver_scope.stats_mut().record_move(accepted);
                trace!(
                    event = "move_evaluated",
                    step = solver_scope.total_step_count(),
                    kind = candidate.kind_name(),
                    candidate = %candidate,
                    score = %move_score,
                    accepted = accepted,
                );
                if accepted {
                    self.forager.add_move_index(index, move_score);
                    if self.forager.is_quit_early() {
                        break;
                    }
                }
            }

            let step_move = match self.forager.pick_move_index() {
                Some((index, score)) => {
                    let picked = self.arena[index];
                    picked.apply(solver_scope.score_director_mut());
                    solver_scope.stats_mut().record_applied_move();
                    last_step_score = score;
                    Some(picked)
                }
                None => None,
            };

            self.acceptor
                .step_ended(&last_step_score, step_move.as_ref());
            let step = solver_scope.increment_step_count();
            if step_move.is_some() {
                solver_scope.update_best_solution();
            }
            assert_step(self.environment_mode, solver_scope, last_step_score)?;

            trace!(
                event = "step",
                step = step,
                applied = step_move.as_ref().map(PlanMove::kind_name),
                score = %last_step_score,
            );
        }

        self.acceptor.phase_ended();
        let steps = solver_scope.total_step_count() - start_step;
        solver_scope.events().fire_phase_ended(phase_type, steps);
        debug!(
            event = "phase_end",
            phase = phase_type,
            steps = steps,
            best_score = %solver_scope
                .best_score()
                .map(ToString::to_string)
                .unwrap_or_default(),
        );
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
