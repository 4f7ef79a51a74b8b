//! Independent parallel searches.
//!
//! Each search owns its live plan, score director, tracker and rng; only
//! the problem facts are shared. Results are merged by comparing the
//! tracked bests.

use rayon::prelude::*;
use teamplan_core::{Result, TeamPlan, TeamPlanError};
use tracing::debug;

use crate::solver::{SolveOutcome, Solver};

/// Runs `count` searches on the rayon pool and keeps the best outcome.
pub(crate) fn solve_parallel(
    solver: &Solver,
    plan: TeamPlan,
    count: usize,
) -> Result<SolveOutcome<TeamPlan>> {
    debug!(event = "parallel_start", searches = count);
    let outcomes: Vec<Result<SolveOutcome<TeamPlan>>> = (0..count)
        .into_par_iter()
        .map(|index| solver.run_search(plan.clone(), index))
        .collect();
    merge_outcomes(outcomes)
}

/// Picks the outcome with the best score; ties go to the lowest index.
///
/// The first error, in index order, is returned instead.
pub fn merge_outcomes(
    outcomes: impl IntoIterator<Item = Result<SolveOutcome<TeamPlan>>>,
) -> Result<SolveOutcome<TeamPlan>> {
    let mut best: Option<SolveOutcome<TeamPlan>> = None;
    let mut terminated_early = false;
    for outcome in outcomes {
        let outcome = outcome?;
        terminated_early |= outcome.terminated_early;
        if best.as_ref().map_or(true, |b| outcome.score > b.score) {
            best = Some(outcome);
        }
    }
    let mut best =
        best.ok_or_else(|| TeamPlanError::configuration("no search outcome to merge"))?;
    best.terminated_early = terminated_early;
    debug!(event = "parallel_merged", score = %best.score, seed = ?best.seed);
    Ok(best)
}
