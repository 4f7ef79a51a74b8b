//! Acceptors for local search move acceptance.
//!
//! Acceptors decide whether a candidate move may become the next step,
//! given the score of the last step and the score the move would reach.

mod hill_climbing;
mod simulated_annealing;
mod tabu_search;

use std::fmt::Debug;

use teamplan_core::PlanningSolution;

pub use hill_climbing::HillClimbingAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;
pub use tabu_search::TabuSearchAcceptor;

/// Accepts or rejects candidate moves.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `M` - The move type
pub trait Acceptor<S: PlanningSolution, M>: Send + Debug {
    /// Returns true if `candidate`, reaching `move_score`, may be taken
    /// from a step that scored `last_step_score`.
    fn is_accepted(&mut self, last_step_score: &S::Score, move_score: &S::Score, candidate: &M)
        -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &S::Score) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}

    /// Called when a step starts.
    fn step_started(&mut self) {}

    /// Called when a step ends, with the applied move if there was one.
    fn step_ended(&mut self, _step_score: &S::Score, _step_move: Option<&M>) {}
}

impl<S, M, A> Acceptor<S, M> for Box<A>
where
    S: PlanningSolution,
    A: Acceptor<S, M> + ?Sized,
{
    fn is_accepted(&mut self, last_step_score: &S::Score, move_score: &S::Score, candidate: &M)
        -> bool {
        (**self).is_accepted(last_step_score, move_score, candidate)
    }

    fn phase_started(&mut self, initial_score: &S::Score) {
        (**self).phase_started(initial_score)
    }

    fn phase_ended(&mut self) {
        (**self).phase_ended()
    }

    fn step_started(&mut self) {
        (**self).step_started()
    }

    fn step_ended(&mut self, step_score: &S::Score, step_move: Option<&M>) {
        (**self).step_ended(step_score, step_move)
    }
}

#[cfg(test)]
mod tests;
