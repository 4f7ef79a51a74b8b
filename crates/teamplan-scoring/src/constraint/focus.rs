//! SOFT: a team member's items should belong to as few epics as possible.

use std::collections::HashMap;

use teamplan_core::{ConstraintRef, HardSoftScore, TeamPlan};

use super::{describe, scheduled, ConstraintKind, CONSTRAINT_PACKAGE};
use crate::api::analysis::ConstraintMatch;
use crate::api::constraint_set::IncrementalConstraint;

#[derive(Debug, Default)]
struct MemberLoad {
    total: usize,
    per_epic: HashMap<String, usize>,
}

impl MemberLoad {
    /// Items of this member that are not on `epic`.
    fn outside(&self, epic: &str) -> usize {
        self.total - self.per_epic.get(epic).copied().unwrap_or(0)
    }
}

/// Penalizes every pair of a member's items that belong to different epics.
///
/// Pairs are counted per member, regardless of the day.
pub struct FocusConstraint {
    constraint_ref: ConstraintRef,
    weight: HardSoftScore,
    loads: HashMap<usize, MemberLoad>,
    /// Reverse index: item -> member it was inserted under.
    item_member: HashMap<usize, usize>,
}

impl FocusConstraint {
    pub fn new(weight: HardSoftScore) -> Self {
        Self {
            constraint_ref: ConstraintRef::new(CONSTRAINT_PACKAGE, ConstraintKind::Focus.name()),
            weight,
            loads: HashMap::new(),
            item_member: HashMap::new(),
        }
    }

    fn member_of(solution: &TeamPlan, item: usize) -> Option<usize> {
        scheduled(solution, item).map(|(_, member)| member.id)
    }

    fn cross_epic_pairs(solution: &TeamPlan) -> Vec<(usize, usize)> {
        let mut by_member: HashMap<usize, Vec<usize>> = HashMap::new();
        for item in 0..solution.item_count() {
            if let Some(member) = Self::member_of(solution, item) {
                by_member.entry(member).or_default().push(item);
            }
        }

        let mut pairs = Vec::new();
        for items in by_member.values() {
            for (position, &left) in items.iter().enumerate() {
                for &right in &items[position + 1..] {
                    if solution.item(left).epic != solution.item(right).epic {
                        pairs.push((left, right));
                    }
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }
}

impl IncrementalConstraint<TeamPlan, HardSoftScore> for FocusConstraint {
    fn evaluate(&self, solution: &TeamPlan) -> HardSoftScore {
        -self.weight.times(Self::cross_epic_pairs(solution).len() as i64)
    }

    fn match_count(&self, solution: &TeamPlan) -> usize {
        Self::cross_epic_pairs(solution).len()
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
        if entity_index >= solution.item_count() || self.item_member.contains_key(&entity_index) {
            return HardSoftScore::ZERO;
        }
        let Some(member) = Self::member_of(solution, entity_index) else {
            return HardSoftScore::ZERO;
        };
        let epic = &solution.item(entity_index).epic;
        let load = self.loads.entry(member).or_default();
        let others = load.outside(epic) as i64;
        load.total += 1;
        *load.per_epic.entry(epic.clone()).or_insert(0) += 1;
        self.item_member.insert(entity_index, member);
        -self.weight.times(others)
    }

    fn on_retract(&mut self, solution: &TeamPlan, entity_index: usize) -> HardSoftScore {
        let Some(member) = self.item_member.remove(&entity_index) else {
            return HardSoftScore::ZERO;
        };
        let Some(load) = self.loads.get_mut(&member) else {
            return HardSoftScore::ZERO;
        };
        let epic = &solution.item(entity_index).epic;
        load.total -= 1;
        if let Some(count) = load.per_epic.get_mut(epic.as_str()) {
            *count -= 1;
            if *count == 0 {
                load.per_epic.remove(epic.as_str());
            }
        }
        let others = load.outside(epic) as i64;
        if load.total == 0 {
            self.loads.remove(&member);
        }
        self.weight.times(others)
    }

    fn reset(&mut self) {
        self.loads.clear();
        self.item_member.clear();
    }

    fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    fn constraint_ref(&self) -> ConstraintRef {
        self.constraint_ref.clone()
    }

    fn get_matches(&self, solution: &TeamPlan) -> Vec<ConstraintMatch<HardSoftScore>> {
        Self::cross_epic_pairs(solution)
            .into_iter()
            .map(|(left, right)| {
                ConstraintMatch::new(
                    self.constraint_ref.clone(),
                    -self.weight,
                    vec![left, right],
                    format!(
                        "{} and {} split focus",
                        describe(solution, left),
                        describe(solution, right)
                    ),
                )
            })
            .collect()
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }
}
