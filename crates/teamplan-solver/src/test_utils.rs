//! Helpers for unit tests.

use teamplan_core::TeamPlan;
use teamplan_scoring::{team_constraints, ConstraintKind, ConstraintWeightOverrides, IncrementalScoreDirector};

use crate::scope::SolverScope;

pub type TestDirector = IncrementalScoreDirector<TeamPlan>;

/// Director with the four default hard constraints.
pub fn default_director(plan: TeamPlan) -> TestDirector {
    IncrementalScoreDirector::new(
        plan,
        team_constraints(&ConstraintKind::defaults(), &ConstraintWeightOverrides::new()),
    )
}

/// Director with every constraint enabled.
pub fn all_constraints_director(plan: TeamPlan) -> TestDirector {
    IncrementalScoreDirector::new(
        plan,
        team_constraints(&ConstraintKind::ALL, &ConstraintWeightOverrides::new()),
    )
}

/// Seeded scope over the default constraints.
pub fn create_scope(plan: TeamPlan, seed: u64) -> SolverScope<TeamPlan, TestDirector> {
    let mut scope = SolverScope::with_seed(default_director(plan), seed);
    scope.start_solving();
    scope
}
