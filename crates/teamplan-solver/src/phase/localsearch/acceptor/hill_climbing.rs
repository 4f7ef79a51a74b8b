//! Hill climbing acceptor.

use teamplan_core::PlanningSolution;

use super::Acceptor;

/// Accepts moves that do not worsen the last step score.
///
/// Equal scores are accepted so the search can cross plateaus.
///
/// # Example
///
/// ```
/// use teamplan_solver::phase::localsearch::HillClimbingAcceptor;
///
/// let acceptor = HillClimbingAcceptor::new();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl<S: PlanningSolution, M> Acceptor<S, M> for HillClimbingAcceptor {
    fn is_accepted(&mut self, last_step_score: &S::Score, move_score: &S::Score, _: &M) -> bool {
        move_score >= last_step_score
    }
}
