//! Moves and move selection.

pub mod r#move;
pub mod selector;

pub use r#move::{PlanField, PlanMove, TabuAttribute, TabuAttributes, TabuMove};
pub use selector::MoveSelector;
