//! Core domain traits

use crate::score::Score;

/// A planning solution: problem facts, decision state and the current score.
///
/// Implementations must be cheap to clone: the solver snapshots the working
/// solution every time it finds a new best.
///
/// # Example
///
/// ```
/// use teamplan_core::{HardSoftScore, PlanningSolution};
///
/// #[derive(Clone)]
/// struct Slots {
///     slots: Vec<Option<usize>>,
///     score: Option<HardSoftScore>,
/// }
///
/// impl PlanningSolution for Slots {
///     type Score = HardSoftScore;
///
///     fn score(&self) -> Option<Self::Score> {
///         self.score
///     }
///
///     fn set_score(&mut self, score: Option<Self::Score>) {
///         self.score = score;
///     }
///
///     fn is_initialized(&self) -> bool {
///         self.slots.iter().all(Option::is_some)
///     }
/// }
/// ```
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    /// The score type used to evaluate this solution.
    type Score: Score;

    /// Returns the current score of this solution, if calculated.
    fn score(&self) -> Option<Self::Score>;

    /// Sets the score of this solution.
    fn set_score(&mut self, score: Option<Self::Score>);

    /// Returns true if every decision field has a value.
    fn is_initialized(&self) -> bool {
        true
    }
}
