//! Shared test fixtures for TeamPlan crates.
//!
//! This crate provides plans and pure helper functions for testing.
//! It does NOT depend on `teamplan-scoring` to avoid circular dependencies.
//!
//! - [`plans`] - small hand-built plans with known scores
//! - [`random`] - seeded random scenarios for property-style tests
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! teamplan-test = { workspace = true }
//! ```

pub mod plans;
pub mod random;

pub use plans::{
    date, day_off_plan, monday, single_slot_plan, two_items_one_slot, wildcard_plan, workweek,
};
pub use random::{random_plan, randomize_assignments, ScenarioShape};
