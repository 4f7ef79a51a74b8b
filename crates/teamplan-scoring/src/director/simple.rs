//! Simple score director with full recalculation.

use teamplan_core::PlanningSolution;

use super::traits::ScoreDirector;

/// A score director that recalculates the full score whenever something changed.
///
/// Inefficient but trivially correct; used as the reference in tests and
/// for tiny problems.
pub struct SimpleScoreDirector<S: PlanningSolution, C> {
    working_solution: S,
    score_calculator: C,
    score_dirty: bool,
    cached_score: Option<S::Score>,
    score_calculations: u64,
}

impl<S, C> SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    pub fn new(solution: S, score_calculator: C) -> Self {
        SimpleScoreDirector {
            working_solution: solution,
            score_calculator,
            score_dirty: true,
            cached_score: None,
            score_calculations: 0,
        }
    }

    fn mark_dirty(&mut self) {
        self.score_dirty = true;
    }
}

impl<S, C> ScoreDirector<S> for SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.mark_dirty();
        &mut self.working_solution
    }

    fn calculate_score(&mut self) -> S::Score {
        if !self.score_dirty {
            if let Some(score) = self.cached_score {
                return score;
            }
        }

        let score = (self.score_calculator)(&self.working_solution);
        self.score_calculations += 1;
        self.working_solution.set_score(Some(score));
        self.cached_score = Some(score);
        self.score_dirty = false;
        score
    }

    fn full_score(&self) -> S::Score {
        (self.score_calculator)(&self.working_solution)
    }

    fn clone_working_solution(&self) -> S {
        let mut solution = self.working_solution.clone();
        if !self.score_dirty {
            solution.set_score(self.cached_score);
        }
        solution
    }

    fn before_entity_changed(&mut self, _entity_index: usize) {
        self.mark_dirty();
    }

    fn after_entity_changed(&mut self, _entity_index: usize) {
        // Already marked dirty in before_entity_changed
    }

    fn score_calculation_count(&self) -> u64 {
        self.score_calculations
    }

    fn reset(&mut self) {
        self.mark_dirty();
        self.cached_score = None;
    }
}
