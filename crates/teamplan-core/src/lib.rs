//! TeamPlan Core - score, domain model and error types for workforce scheduling
//!
//! This crate provides the building blocks shared by every TeamPlan crate:
//! - Score types for ranking candidate rosters
//! - The domain model: work days, team members, planning items and the plan
//! - A builder that expands a calendar horizon and epic workloads into a plan
//! - Constraint identification types
//! - The error taxonomy

pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

pub use constraint::{ConstraintRef, ImpactType};
pub use domain::{
    Assignment, Epic, EpicWorkload, PlanBuilder, PlanningItem, PlanningSolution, TeamMember,
    TeamPlan, WorkDay, WILDCARD,
};
pub use error::{Result, TeamPlanError};
pub use score::{HardSoftScore, ParseableScore, Score, ScoreParseError};
