// Ordered constraint sets with incremental scoring.

use teamplan_core::score::Score;
use teamplan_core::ConstraintRef;

use super::analysis::{ConstraintAnalysis, ConstraintMatch, ScoreExplanation};

// A single constraint with incremental scoring capability.
//
// # Incremental Protocol
//
// 1. Call `initialize` once to populate internal state
// 2. Before changing an entity's decision fields: call `on_retract`
// 3. After changing them: call `on_insert`
// 4. Score delta = retract delta + insert delta
//
// `evaluate` never touches the incremental state and is the reference the
// incremental path must agree with.
pub trait IncrementalConstraint<S, Sc: Score>: Send + Sync {
    // Full evaluation of this constraint.
    fn evaluate(&self, solution: &S) -> Sc;

    // Returns the number of matches for this constraint.
    fn match_count(&self, solution: &S) -> usize;

    // Initializes internal state by inserting all entities.
    //
    // Returns the total score from initialization.
    fn initialize(&mut self, solution: &S) -> Sc;

    // Called after an entity's decision fields changed.
    //
    // Returns the score delta from this insertion.
    fn on_insert(&mut self, solution: &S, entity_index: usize) -> Sc;

    // Called before an entity's decision fields change.
    //
    // Returns the score delta from this retraction (the negation of what the
    // entity contributed).
    fn on_retract(&mut self, solution: &S, entity_index: usize) -> Sc;

    // Resets internal state for a new solving session.
    fn reset(&mut self);

    // Returns the constraint name.
    fn name(&self) -> &str;

    // Returns true if this is a hard constraint.
    fn is_hard(&self) -> bool {
        false
    }

    // Returns the constraint reference (package + name).
    fn constraint_ref(&self) -> ConstraintRef {
        ConstraintRef::new("", self.name())
    }

    // Returns the matches with the entities involved in each.
    fn get_matches(&self, _solution: &S) -> Vec<ConstraintMatch<Sc>> {
        Vec::new()
    }

    // Returns the constraint weight (score per match unit).
    fn weight(&self) -> Sc {
        Sc::zero()
    }
}

// Result of evaluating a single constraint.
#[derive(Debug, Clone)]
pub struct ConstraintResult<Sc> {
    pub name: String,
    pub score: Sc,
    pub match_count: usize,
    pub is_hard: bool,
}

/// An ordered list of constraints evaluated together.
///
/// The order is the order in which constraints were added; it is kept in
/// every per-constraint report.
pub struct ConstraintSet<S, Sc: Score> {
    constraints: Vec<Box<dyn IncrementalConstraint<S, Sc>>>,
}

impl<S, Sc: Score> Default for ConstraintSet<S, Sc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, Sc: Score> std::fmt::Debug for ConstraintSet<S, Sc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("constraints", &self.names())
            .finish()
    }
}

impl<S, Sc: Score> ConstraintSet<S, Sc> {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Appends a constraint.
    pub fn with<C>(mut self, constraint: C) -> Self
    where
        C: IncrementalConstraint<S, Sc> + 'static,
    {
        self.constraints.push(Box::new(constraint));
        self
    }

    pub fn push(&mut self, constraint: Box<dyn IncrementalConstraint<S, Sc>>) {
        self.constraints.push(constraint);
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.constraints.iter().map(|c| c.name()).collect()
    }

    /// Full recomputation of the total score.
    pub fn evaluate_all(&self, solution: &S) -> Sc {
        self.constraints
            .iter()
            .fold(Sc::zero(), |acc, c| acc + c.evaluate(solution))
    }

    pub fn evaluate_each(&self, solution: &S) -> Vec<ConstraintResult<Sc>> {
        self.constraints
            .iter()
            .map(|c| ConstraintResult {
                name: c.name().to_string(),
                score: c.evaluate(solution),
                match_count: c.match_count(solution),
                is_hard: c.is_hard(),
            })
            .collect()
    }

    pub fn evaluate_detailed(&self, solution: &S) -> Vec<ConstraintAnalysis<Sc>> {
        self.constraints
            .iter()
            .map(|c| {
                ConstraintAnalysis::new(
                    c.constraint_ref(),
                    c.weight(),
                    c.evaluate(solution),
                    c.get_matches(solution),
                    c.is_hard(),
                )
            })
            .collect()
    }

    /// Builds a full score explanation.
    pub fn explain(&self, solution: &S) -> ScoreExplanation<Sc> {
        ScoreExplanation::new(
            self.evaluate_all(solution),
            self.evaluate_detailed(solution),
        )
    }

    pub fn initialize_all(&mut self, solution: &S) -> Sc {
        self.constraints
            .iter_mut()
            .fold(Sc::zero(), |acc, c| acc + c.initialize(solution))
    }

    pub fn on_insert_all(&mut self, solution: &S, entity_index: usize) -> Sc {
        self.constraints
            .iter_mut()
            .fold(Sc::zero(), |acc, c| acc + c.on_insert(solution, entity_index))
    }

    pub fn on_retract_all(&mut self, solution: &S, entity_index: usize) -> Sc {
        self.constraints
            .iter_mut()
            .fold(Sc::zero(), |acc, c| acc + c.on_retract(solution, entity_index))
    }

    pub fn reset_all(&mut self) {
        for constraint in &mut self.constraints {
            constraint.reset();
        }
    }
}
