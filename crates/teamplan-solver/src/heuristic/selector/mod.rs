//! Move selection.
//!
//! A [`MoveSelector`] yields a bounded sample of candidate moves for one
//! step. Random order draws moves independently; original order walks the
//! whole move space deterministically, resuming where the previous step
//! stopped.

use rand::Rng;
use teamplan_config::{MoveSelectorConfig, SelectionOrder};
use teamplan_core::TeamPlan;

use crate::heuristic::r#move::PlanMove;

#[cfg(test)]
mod tests;

/// Produces candidate moves for a local search step.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    selection_order: SelectionOrder,
    sample_size: usize,
    change_weight: u32,
    swap_weight: u32,
    cursor: usize,
}

impl MoveSelector {
    pub fn new(selection_order: SelectionOrder, sample_size: usize) -> Self {
        Self {
            selection_order,
            sample_size: sample_size.max(1),
            change_weight: 2,
            swap_weight: 1,
            cursor: 0,
        }
    }

    pub fn from_config(config: &MoveSelectorConfig) -> Self {
        Self::new(config.selection_order, config.sample_size())
            .with_weights(config.change_weight(), config.swap_weight())
    }

    /// Relative weights of reassign and swap moves in random order.
    pub fn with_weights(mut self, change_weight: u32, swap_weight: u32) -> Self {
        self.change_weight = change_weight;
        self.swap_weight = swap_weight;
        self
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// True when no move can ever change the plan.
    ///
    /// With a single work day and a single team member every item already
    /// holds the only possible assignment.
    pub fn is_exhausted(plan: &TeamPlan) -> bool {
        plan.item_count() == 0 || (plan.work_day_count() <= 1 && plan.team_member_count() <= 1)
    }

    /// Size of the move space in original order.
    pub fn move_space_size(plan: &TeamPlan) -> usize {
        let items = plan.item_count();
        items * (plan.work_day_count() + plan.team_member_count()) + items * items.saturating_sub(1) / 2
    }

    /// Lazily yields up to `sample_size` doable moves for the current step.
    pub fn iter_moves<'a, R: Rng>(
        &'a mut self,
        plan: &'a TeamPlan,
        rng: &'a mut R,
    ) -> impl Iterator<Item = PlanMove> + 'a {
        let draws = match self.selection_order {
            SelectionOrder::Random => self.sample_size,
            SelectionOrder::Original => self.sample_size.min(Self::move_space_size(plan)),
        };
        (0..draws)
            .filter_map(move |_| match self.selection_order {
                SelectionOrder::Random => self.random_move(plan, rng),
                SelectionOrder::Original => self.next_original_move(plan),
            })
            .filter(move |mv| mv.is_doable(plan))
    }

    fn random_move<R: Rng>(&self, plan: &TeamPlan, rng: &mut R) -> Option<PlanMove> {
        let items = plan.item_count();
        let days = plan.work_day_count();
        let members = plan.team_member_count();
        if items == 0 || days == 0 || members == 0 {
            return None;
        }

        let total = self.change_weight + self.swap_weight;
        let swap = items > 1 && total > 0 && rng.random_range(0..total) >= self.change_weight;
        let item = rng.random_range(0..items);
        if swap {
            let other = rng.random_range(0..items - 1);
            let other = if other >= item { other + 1 } else { other };
            return Some(PlanMove::swap(plan, item, other));
        }

        let by_day = match (days > 1, members > 1) {
            (true, true) => rng.random_bool(0.5),
            (by_day, _) => by_day,
        };
        Some(if by_day {
            PlanMove::reassign_work_day(plan, item, rng.random_range(0..days))
        } else {
            PlanMove::reassign_team_member(plan, item, rng.random_range(0..members))
        })
    }

    fn next_original_move(&mut self, plan: &TeamPlan) -> Option<PlanMove> {
        let size = Self::move_space_size(plan);
        if size == 0 {
            return None;
        }
        let index = self.cursor % size;
        self.cursor = (index + 1) % size;
        Some(decode_move(plan, index))
    }
}

/// Maps an index of the original-order move space to a move.
///
/// Per-item reassignments come first (work days, then team members),
/// followed by swaps of every unordered item pair.
fn decode_move(plan: &TeamPlan, index: usize) -> PlanMove {
    let days = plan.work_day_count();
    let members = plan.team_member_count();
    let per_item = days + members;
    let change_space = plan.item_count() * per_item;

    if index < change_space {
        let item = index / per_item;
        let value = index % per_item;
        return if value < days {
            PlanMove::reassign_work_day(plan, item, value)
        } else {
            PlanMove::reassign_team_member(plan, item, value - days)
        };
    }

    let mut pair = index - change_space;
    let items = plan.item_count();
    let mut left = 0;
    while pair >= items - left - 1 {
        pair -= items - left - 1;
        left += 1;
    }
    PlanMove::swap(plan, left, left + 1 + pair)
}
