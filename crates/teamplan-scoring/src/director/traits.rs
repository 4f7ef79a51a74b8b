// Score director trait definition.

use teamplan_core::PlanningSolution;

// The score director manages solution state and score calculation.
//
// It is responsible for:
// - Maintaining the working solution
// - Calculating scores (incrementally when possible)
// - Receiving change notifications for incremental updates
pub trait ScoreDirector<S: PlanningSolution>: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    // Returns a mutable reference to the working solution.
    //
    // Changes made through this reference must be bracketed by
    // `before_entity_changed`/`after_entity_changed`, or followed by `reset`.
    fn working_solution_mut(&mut self) -> &mut S;

    // Calculates and returns the current score.
    fn calculate_score(&mut self) -> S::Score;

    // Recomputes the score from scratch without touching cached state.
    fn full_score(&self) -> S::Score;

    // Clones the working solution, with its score set.
    fn clone_working_solution(&self) -> S;

    // Called before an entity's decision fields change.
    fn before_entity_changed(&mut self, entity_index: usize);

    // Called after an entity's decision fields changed.
    fn after_entity_changed(&mut self, entity_index: usize);

    // Applies `change` to the working solution, notifying the director
    // before and after.
    fn change_entity<F>(&mut self, entity_index: usize, change: F)
    where
        F: FnOnce(&mut S),
        Self: Sized,
    {
        self.before_entity_changed(entity_index);
        change(self.working_solution_mut());
        self.after_entity_changed(entity_index);
    }

    // Number of score calculations performed so far.
    fn score_calculation_count(&self) -> u64;

    // Returns true if this score director supports incremental scoring.
    fn is_incremental(&self) -> bool {
        false
    }

    // Drops cached state; the next `calculate_score` starts from scratch.
    fn reset(&mut self) {}
}
