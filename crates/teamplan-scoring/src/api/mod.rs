//! Constraint protocol, constraint sets, weights and analysis types.

pub mod analysis;
pub mod constraint_set;
pub mod weight_overrides;
