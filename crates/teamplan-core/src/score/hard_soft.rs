//! HardSoftScore - Two-level score with hard and soft constraints

use std::cmp::Ordering;
use std::fmt;

use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use super::traits::{ParseableScore, Score, ScoreParseError};

/// A score with separate hard and soft constraint levels.
///
/// Each broken rule subtracts its weight from its level, so both levels are
/// non-positive for penalty-only constraint sets and `0hard/0soft` is a
/// perfect roster. Hard scores are compared first; soft scores only break
/// ties.
///
/// # Examples
///
/// ```
/// use teamplan_core::HardSoftScore;
///
/// let double_booked = HardSoftScore::of(-1, 0);
/// let fragmented = HardSoftScore::of(0, -200);
///
/// // Any hard violation outweighs every soft one
/// assert!(fragmented > double_booked);
///
/// let focused = HardSoftScore::of(0, -50);
/// assert!(focused > fragmented);
/// assert_eq!(double_booked.hard_penalty(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    /// The zero score.
    pub const ZERO: HardSoftScore = HardSoftScore { hard: 0, soft: 0 };

    /// One hard constraint unit.
    pub const ONE_HARD: HardSoftScore = HardSoftScore { hard: 1, soft: 0 };

    /// One soft constraint unit.
    pub const ONE_SOFT: HardSoftScore = HardSoftScore { hard: 0, soft: 1 };

    /// Creates a new HardSoftScore.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore { hard, soft }
    }

    /// Creates a score with only a hard component.
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftScore { hard, soft: 0 }
    }

    /// Creates a score with only a soft component.
    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftScore { hard: 0, soft }
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Returns the number of hard penalty units, i.e. the negated hard level.
    #[inline]
    pub const fn hard_penalty(&self) -> i64 {
        -self.hard
    }

    /// Returns the number of soft penalty units, i.e. the negated soft level.
    #[inline]
    pub const fn soft_penalty(&self) -> i64 {
        -self.soft
    }

    /// Scales both levels by an integer factor.
    #[inline]
    pub const fn times(&self, factor: i64) -> Self {
        HardSoftScore::of(self.hard * factor, self.soft * factor)
    }
}

impl Score for HardSoftScore {
    #[inline]
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    #[inline]
    fn zero() -> Self {
        HardSoftScore::ZERO
    }

    #[inline]
    fn to_scalar(&self, level_weight: f64) -> f64 {
        self.hard as f64 * level_weight + self.soft as f64
    }
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for HardSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HardSoftScore {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        HardSoftScore::of(self.hard + other.hard, self.soft + other.soft)
    }
}

impl AddAssign for HardSoftScore {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.hard += other.hard;
        self.soft += other.soft;
    }
}

impl Sub for HardSoftScore {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        HardSoftScore::of(self.hard - other.hard, self.soft - other.soft)
    }
}

impl Neg for HardSoftScore {
    type Output = Self;

    fn neg(self) -> Self {
        HardSoftScore::of(-self.hard, -self.soft)
    }
}

impl Sum for HardSoftScore {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(HardSoftScore::ZERO, Add::add)
    }
}

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

impl ParseableScore for HardSoftScore {
    /// Parses `"<hard>hard/<soft>soft"`, e.g. `"-2hard/-15soft"`.
    fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let text = s.trim();
        let (hard, soft) = text.split_once('/').ok_or_else(|| ScoreParseError {
            message: format!("'{text}' is not of the form '<hard>hard/<soft>soft'"),
        })?;
        Ok(HardSoftScore::of(
            parse_level(hard, "hard")?,
            parse_level(soft, "soft")?,
        ))
    }

    fn to_string_repr(&self) -> String {
        self.to_string()
    }
}

fn parse_level(part: &str, suffix: &str) -> Result<i64, ScoreParseError> {
    let part = part.trim();
    let number = part.strip_suffix(suffix).ok_or_else(|| ScoreParseError {
        message: format!("'{part}' must end with '{suffix}'"),
    })?;
    number.parse().map_err(|e| ScoreParseError {
        message: format!("invalid {suffix} level '{number}': {e}"),
    })
}
