//! Scopes for solver execution.
//!
//! - [`SolverScope`]: the live solution, best solution tracker, rng and statistics
//! - [`BestSolutionTracker`]: the best snapshot seen so far

mod solver;
mod tracker;

pub use solver::SolverScope;
pub use tracker::{BestSolutionTracker, ScoreImprovement};
