//! Score types for ranking candidate rosters.
//!
//! A roster is scored by the penalties it collects. Scores are immutable,
//! totally ordered and support arithmetic so that incremental deltas can be
//! added onto a cached total.

mod hard_soft;
mod traits;


pub use hard_soft::HardSoftScore;
pub use traits::{ParseableScore, Score, ScoreParseError};
