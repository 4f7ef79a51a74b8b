//! External termination via a shared flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use teamplan_core::PlanningSolution;
use teamplan_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates when an external flag is set.
///
/// Cancellation is cooperative: the flag is only read at step boundaries.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use teamplan_solver::termination::ExternalTermination;
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let term = ExternalTermination::new(flag.clone());
///
/// flag.store(true, Ordering::SeqCst);
/// assert!(term.is_set());
/// ```
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for ExternalTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        self.is_set() || solver_scope.is_terminate_early()
    }
}
