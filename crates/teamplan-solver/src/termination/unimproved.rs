//! Termination based on lack of improvement.

use teamplan_core::PlanningSolution;
use teamplan_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates after a number of steps without a new best score.
///
/// Reads the step of the last improvement from the best solution tracker,
/// so the termination itself stays stateless.
///
/// # Example
///
/// ```
/// use teamplan_solver::termination::UnimprovedStepCountTermination;
///
/// // Stop after 100 steps without improvement
/// let term = UnimprovedStepCountTermination::new(100);
/// ```
#[derive(Debug, Clone)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D>
    for UnimprovedStepCountTermination
{
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.unimproved_step_count() >= self.limit
    }
}
