//! Core Score trait definition

use std::fmt::{Debug, Display};
use std::ops::{Add, Neg, Sub};

/// Core trait for all score types in TeamPlan.
///
/// Scores are compared level by level, highest priority first. Penalties are
/// stored as negative numbers, so a higher score is always a better roster
/// and zero means no violation at all.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Returns true if no hard constraint is broken.
    fn is_feasible(&self) -> bool;

    /// Returns the zero score (identity element for addition).
    fn zero() -> Self;

    /// Collapses the levels into one number, weighting the hard level by
    /// `hard_level_weight`.
    ///
    /// Used by acceptors that need a magnitude for a score difference.
    fn to_scalar(&self, hard_level_weight: f64) -> f64;

    /// Returns true if this score is strictly better than the other score.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }
}

/// Marker trait for scores that can be parsed from a string.
pub trait ParseableScore: Score {
    /// Parses a score from its string representation, e.g. `"0hard/-100soft"`.
    fn parse(s: &str) -> Result<Self, ScoreParseError>;

    /// Returns the string representation of this score.
    fn to_string_repr(&self) -> String;
}

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl std::fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score parse error: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}
