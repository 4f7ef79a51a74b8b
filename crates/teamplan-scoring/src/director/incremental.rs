//! Incremental score director.

use teamplan_core::score::Score;
use teamplan_core::PlanningSolution;

use crate::api::analysis::ScoreExplanation;
use crate::api::constraint_set::ConstraintSet;
use crate::director::ScoreDirector;

/// A score director that keeps the score current through constraint deltas.
///
/// The first [`calculate_score`](ScoreDirector::calculate_score) initializes
/// every constraint. After that, each entity change costs one retract and one
/// insert per constraint and the score is read from the cache.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use teamplan_core::{HardSoftScore, PlanningItem, TeamMember, TeamPlan, WorkDay};
/// use teamplan_scoring::{
///     team_constraints, ConstraintKind, ConstraintWeightOverrides, IncrementalScoreDirector,
///     ScoreDirector,
/// };
///
/// let day = WorkDay::new(0, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// let plan = TeamPlan::new(
///     vec![day],
///     vec![TeamMember::new(0, "Alice", "dev", "Portal")],
///     vec![
///         PlanningItem::new(0, "Login", "dev", "Portal"),
///         PlanningItem::new(1, "Login", "dev", "Portal"),
///     ],
/// )
/// .unwrap();
///
/// let constraints = team_constraints(&ConstraintKind::defaults(), &ConstraintWeightOverrides::new());
/// let mut director = IncrementalScoreDirector::new(plan, constraints);
/// assert_eq!(director.calculate_score(), HardSoftScore::ZERO);
///
/// director.change_entity(0, |plan| plan.assign(0, 0, 0));
/// director.change_entity(1, |plan| plan.assign(1, 0, 0));
/// assert_eq!(director.calculate_score(), HardSoftScore::of(-1, 0));
/// assert_eq!(director.calculate_score(), director.full_score());
/// ```
pub struct IncrementalScoreDirector<S: PlanningSolution> {
    working_solution: S,
    constraints: ConstraintSet<S, S::Score>,
    cached_score: S::Score,
    initialized: bool,
    score_calculations: u64,
}

impl<S: PlanningSolution> IncrementalScoreDirector<S> {
    pub fn new(solution: S, constraints: ConstraintSet<S, S::Score>) -> Self {
        Self {
            working_solution: solution,
            constraints,
            cached_score: S::Score::zero(),
            initialized: false,
            score_calculations: 0,
        }
    }

    pub fn constraints(&self) -> &ConstraintSet<S, S::Score> {
        &self.constraints
    }

    /// Explains the working solution's score per constraint.
    pub fn explain(&self) -> ScoreExplanation<S::Score> {
        self.constraints.explain(&self.working_solution)
    }

    /// Consumes the director, returning the working solution with its score.
    pub fn into_working_solution(mut self) -> S {
        let score = self.calculate_score();
        self.working_solution.set_score(Some(score));
        self.working_solution
    }
}

impl<S: PlanningSolution> ScoreDirector<S> for IncrementalScoreDirector<S> {
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        &mut self.working_solution
    }

    fn calculate_score(&mut self) -> S::Score {
        if !self.initialized {
            self.cached_score = self.constraints.initialize_all(&self.working_solution);
            self.initialized = true;
        }
        self.score_calculations += 1;
        self.working_solution.set_score(Some(self.cached_score));
        self.cached_score
    }

    fn full_score(&self) -> S::Score {
        self.constraints.evaluate_all(&self.working_solution)
    }

    fn clone_working_solution(&self) -> S {
        let mut solution = self.working_solution.clone();
        if self.initialized {
            solution.set_score(Some(self.cached_score));
        }
        solution
    }

    #[inline]
    fn before_entity_changed(&mut self, entity_index: usize) {
        if !self.initialized {
            // Full calculation happens on the next calculate_score
            return;
        }
        let delta = self
            .constraints
            .on_retract_all(&self.working_solution, entity_index);
        self.cached_score = self.cached_score + delta;
    }

    #[inline]
    fn after_entity_changed(&mut self, entity_index: usize) {
        if !self.initialized {
            return;
        }
        let delta = self
            .constraints
            .on_insert_all(&self.working_solution, entity_index);
        self.cached_score = self.cached_score + delta;
    }

    fn score_calculation_count(&self) -> u64 {
        self.score_calculations
    }

    fn is_incremental(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        self.constraints.reset_all();
        self.cached_score = S::Score::zero();
        self.initialized = false;
    }
}
