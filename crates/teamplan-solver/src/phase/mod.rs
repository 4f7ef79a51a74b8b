//! Solver phases
//!
//! Phases run in sequence over one [`SolverScope`]:
//! - [`ConstructionHeuristicPhase`]: fills every unassigned decision field
//! - [`LocalSearchPhase`]: improves the assigned plan until terminated

pub mod construction;
pub mod localsearch;

use std::fmt::Debug;

use teamplan_core::{PlanningSolution, Result};
use teamplan_scoring::ScoreDirector;

use crate::scope::SolverScope;
use crate::termination::Termination;

pub use construction::ConstructionHeuristicPhase;
pub use localsearch::LocalSearchPhase;

/// A phase of the solving process.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `D` - The score director type
pub trait Phase<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    /// Executes this phase, polling `termination` at step boundaries.
    ///
    /// Fails only on an invariant violation or an unsolvable setup.
    fn solve<T: Termination<S, D>>(
        &mut self,
        solver_scope: &mut SolverScope<S, D>,
        termination: &T,
    ) -> Result<()>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}
