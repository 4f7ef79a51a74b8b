//! Termination conditions for the search loop.
//!
//! Terminations are predicates over the [`SolverScope`]: they hold their
//! limits but no mutable state, and any of them may be polled at every
//! step boundary.

mod best_score;
mod builder;
mod composite;
mod external;
mod step_count;
mod time;
mod unimproved;

use std::fmt::Debug;

use teamplan_core::PlanningSolution;
use teamplan_scoring::ScoreDirector;

use crate::scope::SolverScope;

pub use best_score::BestScoreTermination;
pub use builder::{ConfiguredTermination, TerminationBuilder};
pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedStepCountTermination;

/// Decides when to stop solving.
pub trait Termination<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    /// Returns true if solving should stop.
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool;
}

/// An unconfigured condition never fires.
impl<S, D, T> Termination<S, D> for Option<T>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    T: Termination<S, D>,
{
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        self.as_ref()
            .is_some_and(|termination| termination.is_terminated(solver_scope))
    }
}

#[cfg(test)]
mod tests;
