//! Best solution tracking.

use std::time::Duration;

use serde::Serialize;
use teamplan_core::PlanningSolution;

/// One entry of the best score history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "Sc: std::fmt::Display"))]
pub struct ScoreImprovement<Sc> {
    /// Search step that produced the score; 0 for the seed solution.
    pub step: u64,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    #[serde(serialize_with = "serialize_display")]
    pub score: Sc,
}

fn serialize_millis<Ser: serde::Serializer>(d: &Duration, s: Ser) -> Result<Ser::Ok, Ser::Error> {
    s.serialize_u128(d.as_millis())
}

fn serialize_display<Sc: std::fmt::Display, Ser: serde::Serializer>(
    score: &Sc,
    s: Ser,
) -> Result<Ser::Ok, Ser::Error> {
    s.collect_str(score)
}

/// Holds the best solution snapshot seen so far.
///
/// The first offered solution is always recorded. After that a snapshot is
/// replaced only by a strictly better score, so the recorded scores never
/// get worse.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use teamplan_core::{HardSoftScore, PlanningItem, TeamMember, TeamPlan, WorkDay};
/// use teamplan_solver::scope::BestSolutionTracker;
/// use chrono::NaiveDate;
///
/// let plan = TeamPlan::new(
///     vec![WorkDay::new(0, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())],
///     vec![TeamMember::new(0, "Alice", "dev", "X")],
///     vec![PlanningItem::new(0, "Login", "dev", "X")],
/// ).unwrap();
///
/// let mut tracker = BestSolutionTracker::new();
/// assert!(tracker.offer(0, Duration::ZERO, HardSoftScore::of(-2, 0), || plan.clone()));
/// assert!(!tracker.offer(1, Duration::ZERO, HardSoftScore::of(-2, 0), || plan.clone()));
/// assert!(tracker.offer(2, Duration::ZERO, HardSoftScore::of(0, -4), || plan.clone()));
/// assert_eq!(tracker.best_score(), Some(&HardSoftScore::of(0, -4)));
/// assert_eq!(tracker.last_improvement_step(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BestSolutionTracker<S: PlanningSolution> {
    best: Option<(S, S::Score)>,
    last_improvement_step: u64,
    history: Vec<ScoreImprovement<S::Score>>,
}

impl<S: PlanningSolution> Default for BestSolutionTracker<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> BestSolutionTracker<S> {
    pub fn new() -> Self {
        Self {
            best: None,
            last_improvement_step: 0,
            history: Vec::new(),
        }
    }

    /// Offers a candidate score. `snapshot` is only called when the score
    /// is recorded. Returns true if the best solution changed.
    pub fn offer<F>(&mut self, step: u64, elapsed: Duration, score: S::Score, snapshot: F) -> bool
    where
        F: FnOnce() -> S,
    {
        if let Some((_, best)) = &self.best {
            if score <= *best {
                return false;
            }
        }
        let mut solution = snapshot();
        solution.set_score(Some(score));
        self.best = Some((solution, score));
        self.last_improvement_step = step;
        self.history.push(ScoreImprovement {
            step,
            elapsed,
            score,
        });
        true
    }

    /// The best solution and its score, once something was offered.
    pub fn current(&self) -> Option<(&S, &S::Score)> {
        self.best.as_ref().map(|(solution, score)| (solution, score))
    }

    pub fn best_solution(&self) -> Option<&S> {
        self.best.as_ref().map(|(solution, _)| solution)
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.best.as_ref().map(|(_, score)| score)
    }

    pub fn is_seeded(&self) -> bool {
        self.best.is_some()
    }

    /// Step of the last improvement, 0 if only the seed was recorded.
    pub fn last_improvement_step(&self) -> u64 {
        self.last_improvement_step
    }

    /// Every recorded score, oldest first.
    pub fn history(&self) -> &[ScoreImprovement<S::Score>] {
        &self.history
    }

    pub fn into_parts(self) -> (Option<(S, S::Score)>, Vec<ScoreImprovement<S::Score>>) {
        (self.best, self.history)
    }
}
