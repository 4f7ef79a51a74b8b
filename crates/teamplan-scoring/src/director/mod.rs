//! Score director implementations.
//!
//! The score director owns the working solution and keeps its score
//! current while the solver changes decision fields.
//!
//! - [`SimpleScoreDirector`] - full recalculation on every request (baseline)
//! - [`IncrementalScoreDirector`] - retract/insert deltas over a [`ConstraintSet`](crate::ConstraintSet)

mod incremental;
mod simple;
mod traits;

#[cfg(test)]
mod tests;

pub use incremental::IncrementalScoreDirector;
pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;
