//! HARD: a team member handles at most one item per work day.

use std::collections::{HashMap, HashSet};

use teamplan_core::{ConstraintRef, HardSoftScore, TeamPlan};

use super::{describe, ConstraintKind, CONSTRAINT_PACKAGE};
use crate::api::analysis::ConstraintMatch;
use crate::api::constraint_set::IncrementalConstraint;

type Slot = (usize, usize);

/// Penalizes every unordered pair of items sharing a work day and a member.
///
/// A slot holding `n` items costs `n * (n - 1) / 2` weight units, so each
/// pair is counted exactly once.
pub struct CapacityConstraint {
    constraint_ref: ConstraintRef,
    weight: HardSoftScore,
    /// (work day, member) -> items in that slot.
    slots: HashMap<Slot, HashSet<usize>>,
    /// Reverse index: item -> slot it was inserted into.
    item_slot: HashMap<usize, Slot>,
}

impl CapacityConstraint {
    pub fn new(weight: HardSoftScore) -> Self {
        Self {
            constraint_ref: ConstraintRef::new(CONSTRAINT_PACKAGE, ConstraintKind::Capacity.name()),
            weight,
            slots: HashMap::new(),
            item_slot: HashMap::new(),
        }
    }

    fn slot_of(solution: &TeamPlan, item: usize) -> Option<Slot> {
        let assignment = solution.assignment(item);
        Some((assignment.work_day?, assignment.team_member?))
    }

    fn group(solution: &TeamPlan) -> HashMap<Slot, Vec<usize>> {
        let mut groups: HashMap<Slot, Vec<usize>> = HashMap::new();
        for item in 0..solution.item_count() {
            if let Some(slot) = Self::slot_of(solution, item) {
                groups.entry(slot).or_default().push(item);
            }
        }
        groups
    }

    fn pair_count(solution: &TeamPlan) -> usize {
        Self::group(solution)
            .values()
            .map(|items| items.len() * items.len().saturating_sub(1) / 2)
            .sum()
    }
}

impl IncrementalConstraint<TeamPlan, HardSoftScore> for CapacityConstraint {
    fn evaluate(&self, solution: &TeamPlan) -> HardSoftScore {
        -self.weight.times(Self::pair_count(solution) as i64)
    }

    fn match_count(&self, solution: &TeamPlan) -> usize {
        Self::pair_count(solution)
    }

    fn initialize(&mut self, solution: &TeamPlan) -> HardSoftScore {
        self.reset();
        let mut score = HardSoftScore::ZERO;
        for item in 0..solution.item_count() {
            score += self.on_insert(solution, item);
        }
        score
    }

    fn on_insert(&mut self, solution: &TeamPlan, entity_index: usize) -> HardSoftScore {
        if entity_index >= solution.item_count() || self.item_slot.contains_key(&entity_index) {
            return HardSoftScore::ZERO;
        }
        let Some(slot) = Self::slot_of(solution, entity_index) else {
            return HardSoftScore::ZERO;
        };
        let occupants = self.slots.entry(slot).or_default();
        let others = occupants.len() as i64;
        occupants.insert(entity_index);
        self.item_slot.insert(entity_index, slot);
        -self.weight.times(others)
    }

    fn on_retract(&mut self, _solution: &TeamPlan, entity_index: usize) -> HardSoftScore {
        let Some(slot) = self.item_slot.remove(&entity_index) else {
            return HardSoftScore::ZERO;
        };
        let Some(occupants) = self.slots.get_mut(&slot) else {
            return HardSoftScore::ZERO;
        };
        occupants.remove(&entity_index);
        let others = occupants.len() as i64;
        if occupants.is_empty() {
            self.slots.remove(&slot);
        }
        self.weight.times(others)
    }

    fn reset(&mut self) {
        self.slots.clear();
        self.item_slot.clear();
    }

    fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn constraint_ref(&self) -> ConstraintRef {
        self.constraint_ref.clone()
    }

    fn get_matches(&self, solution: &TeamPlan) -> Vec<ConstraintMatch<HardSoftScore>> {
        let mut groups: Vec<Vec<usize>> = Self::group(solution)
            .into_values()
            .filter(|items| items.len() > 1)
            .collect();
        groups.sort();

        let mut matches = Vec::new();
        for items in groups {
            for (position, &left) in items.iter().enumerate() {
                for &right in &items[position + 1..] {
                    matches.push(ConstraintMatch::new(
                        self.constraint_ref.clone(),
                        -self.weight,
                        vec![left, right],
                        format!(
                            "{} and {} share a slot",
                            describe(solution, left),
                            describe(solution, right)
                        ),
                    ));
                }
            }
        }
        matches
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }
}
