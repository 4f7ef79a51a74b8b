//! Error types for TeamPlan

use thiserror::Error;

/// Main error type for TeamPlan operations.
///
/// Constraint violations left in a solution are not errors: they are carried
/// by the [`HardSoftScore`](crate::HardSoftScore) of that solution.
#[derive(Debug, Error)]
pub enum TeamPlanError {
    /// The problem or solver configuration cannot be solved as given.
    ///
    /// Raised before any search step runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An internal consistency check failed during solving.
    ///
    /// Fatal; the solve is aborted and nothing is retried.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl TeamPlanError {
    /// Shorthand for a [`TeamPlanError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        TeamPlanError::Configuration(message.into())
    }

    /// Shorthand for a [`TeamPlanError::InvariantViolation`].
    pub fn invariant(message: impl Into<String>) -> Self {
        TeamPlanError::InvariantViolation(message.into())
    }
}

/// Result type alias for TeamPlan operations
pub type Result<T> = std::result::Result<T, TeamPlanError>;
