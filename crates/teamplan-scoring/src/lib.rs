//! Incremental constraint scoring for TeamPlan.
//!
//! This crate provides:
//! - The `IncrementalConstraint` protocol and the ordered `ConstraintSet`
//! - The team-planning constraints (capacity, profile, product, days off,
//!   deadline, focus, priority)
//! - Score directors: full recalculation and incremental
//! - Score explanation and per-item indictments

pub mod api;
pub mod constraint;
pub mod director;

pub use api::analysis::{
    ConstraintAnalysis, ConstraintMatch, Indictment, IndictmentMap, ScoreExplanation,
};
pub use api::constraint_set::{ConstraintResult, ConstraintSet, IncrementalConstraint};
pub use api::weight_overrides::ConstraintWeightOverrides;
pub use constraint::{
    team_constraints, CapacityConstraint, ConstraintKind, FocusConstraint, ItemConstraint,
};
pub use director::{IncrementalScoreDirector, ScoreDirector, SimpleScoreDirector};
