//! Foragers for local search move selection
//!
//! A forager collects the accepted candidates of a step and picks the one
//! to apply. Candidates are referred to by their index in the step's move
//! list, so moves are never cloned during evaluation.

use std::fmt::Debug;

use teamplan_core::Score;

/// Collects accepted moves and picks one.
pub trait LocalSearchForager<Sc: Score>: Send + Debug {
    /// Called at the start of each step to reset state.
    fn step_started(&mut self);

    /// Records the accepted move at `index`, reaching `score`.
    fn add_move_index(&mut self, index: usize, score: Sc);

    /// Returns true once enough moves were collected for this step.
    fn is_quit_early(&self) -> bool;

    /// Picks the best collected move. Returns None if nothing was accepted.
    fn pick_move_index(&mut self) -> Option<(usize, Sc)>;
}

/// Keeps the best of up to `accepted_count_limit` accepted moves.
///
/// On equal scores the move accepted first wins.
#[derive(Debug, Clone)]
pub struct AcceptedCountForager<Sc: Score> {
    accepted_count_limit: usize,
    accepted_count: usize,
    best: Option<(usize, Sc)>,
}

impl<Sc: Score> AcceptedCountForager<Sc> {
    pub fn new(accepted_count_limit: usize) -> Self {
        Self {
            accepted_count_limit,
            accepted_count: 0,
            best: None,
        }
    }

    /// A forager that looks at every accepted move of the step.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted_count
    }
}

impl<Sc: Score> Default for AcceptedCountForager<Sc> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<Sc: Score> LocalSearchForager<Sc> for AcceptedCountForager<Sc> {
    fn step_started(&mut self) {
        self.accepted_count = 0;
        self.best = None;
    }

    fn add_move_index(&mut self, index: usize, score: Sc) {
        self.accepted_count += 1;
        if self.best.map_or(true, |(_, best)| score > best) {
            self.best = Some((index, score));
        }
    }

    fn is_quit_early(&self) -> bool {
        self.accepted_count >= self.accepted_count_limit
    }

    fn pick_move_index(&mut self) -> Option<(usize, Sc)> {
        self.best.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamplan_core::HardSoftScore;

    #[test]
    fn picks_the_best_score() {
        let mut forager = AcceptedCountForager::unbounded();
        forager.step_started();
        forager.add_move_index(0, HardSoftScore::of(-2, 0));
        forager.add_move_index(1, HardSoftScore::of(-1, -5));
        forager.add_move_index(2, HardSoftScore::of(-2, 0));
        assert_eq!(forager.pick_move_index(), Some((1, HardSoftScore::of(-1, -5))));
        assert_eq!(forager.pick_move_index(), None);
    }

    #[test]
    fn first_accepted_wins_ties() {
        let mut forager = AcceptedCountForager::unbounded();
        forager.add_move_index(4, HardSoftScore::ZERO);
        forager.add_move_index(7, HardSoftScore::ZERO);
        assert_eq!(forager.pick_move_index(), Some((4, HardSoftScore::ZERO)));
    }

    #[test]
    fn quits_early_at_limit() {
        let mut forager = AcceptedCountForager::new(2);
        forager.add_move_index(0, HardSoftScore::ZERO);
        assert!(!forager.is_quit_early());
        forager.add_move_index(1, HardSoftScore::ZERO);
        assert!(forager.is_quit_early());

        forager.step_started();
        assert!(!forager.is_quit_early());
        assert_eq!(forager.accepted_count(), 0);
    }
}
