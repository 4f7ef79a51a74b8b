//! Tabu search acceptor.

use std::collections::VecDeque;
use std::fmt::Debug;

use teamplan_core::{PlanningSolution, Score};

use super::Acceptor;
use crate::heuristic::{TabuAttribute, TabuMove};

/// Forbids moves that put back a value an item field held recently.
///
/// After each step the values the applied move overwrote become tabu for
/// `tabu_size` steps. A candidate that writes a tabu value is rejected,
/// unless aspiration is enabled and the candidate beats the best score
/// seen in the phase. Non-tabu candidates are accepted even when they
/// worsen the score; the forager still picks the best of them.
///
/// # Example
///
/// ```
/// use teamplan_core::TeamPlan;
/// use teamplan_solver::phase::localsearch::TabuSearchAcceptor;
///
/// let acceptor = TabuSearchAcceptor::<TeamPlan>::new(7);
/// assert_eq!(acceptor.tabu_count(), 0);
/// ```
pub struct TabuSearchAcceptor<S: PlanningSolution> {
    tabu_size: usize,
    aspiration_enabled: bool,
    tabu_list: VecDeque<(TabuAttribute, u64)>,
    step: u64,
    best_score: Option<S::Score>,
}

impl<S: PlanningSolution> Debug for TabuSearchAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabuSearchAcceptor")
            .field("tabu_size", &self.tabu_size)
            .field("tabu_list_len", &self.tabu_list.len())
            .field("aspiration_enabled", &self.aspiration_enabled)
            .finish()
    }
}

impl<S: PlanningSolution> Clone for TabuSearchAcceptor<S> {
    fn clone(&self) -> Self {
        Self {
            tabu_size: self.tabu_size,
            aspiration_enabled: self.aspiration_enabled,
            tabu_list: self.tabu_list.clone(),
            step: self.step,
            best_score: self.best_score,
        }
    }
}

impl<S: PlanningSolution> TabuSearchAcceptor<S> {
    pub fn new(tabu_size: usize) -> Self {
        Self {
            tabu_size,
            aspiration_enabled: true,
            tabu_list: VecDeque::new(),
            step: 0,
            best_score: None,
        }
    }

    /// Without aspiration a tabu move is never accepted, even a new best.
    pub fn without_aspiration(tabu_size: usize) -> Self {
        Self {
            aspiration_enabled: false,
            ..Self::new(tabu_size)
        }
    }

    pub fn tabu_count(&self) -> usize {
        self.tabu_list.len()
    }

    pub fn is_tabu(&self, attribute: &TabuAttribute) -> bool {
        self.tabu_list.iter().any(|(tabu, _)| tabu == attribute)
    }

    fn expire(&mut self) {
        let step = self.step;
        let tenure = self.tabu_size as u64;
        while let Some((_, added)) = self.tabu_list.front() {
            if step - added >= tenure {
                self.tabu_list.pop_front();
            } else {
                break;
            }
        }
    }
}

impl<S: PlanningSolution> Default for TabuSearchAcceptor<S> {
    fn default() -> Self {
        Self::new(7)
    }
}

impl<S, M> Acceptor<S, M> for TabuSearchAcceptor<S>
where
    S: PlanningSolution,
    M: TabuMove,
{
    fn is_accepted(&mut self, _last_step_score: &S::Score, move_score: &S::Score, candidate: &M)
        -> bool {
        if self.aspiration_enabled
            && self
                .best_score
                .is_some_and(|best| move_score.is_better_than(&best))
        {
            return true;
        }
        !candidate
            .tabu_attributes()
            .iter()
            .any(|attribute| self.is_tabu(attribute))
    }

    fn phase_started(&mut self, initial_score: &S::Score) {
        self.tabu_list.clear();
        self.step = 0;
        self.best_score = Some(*initial_score);
    }

    fn phase_ended(&mut self) {
        self.tabu_list.clear();
    }

    fn step_ended(&mut self, step_score: &S::Score, step_move: Option<&M>) {
        self.step += 1;
        if let Some(applied) = step_move {
            for attribute in applied.reverted_attributes() {
                self.tabu_list.push_back((attribute, self.step));
            }
        }
        self.expire();
        if self.best_score.map_or(true, |best| step_score.is_better_than(&best)) {
            self.best_score = Some(*step_score);
        }
    }
}
