//! Constraints that judge each planning item on its own.

use std::collections::HashMap;

use teamplan_core::{ConstraintRef, HardSoftScore, TeamPlan};

use super::{describe, scheduled, ConstraintKind, CONSTRAINT_PACKAGE};
use crate::api::analysis::ConstraintMatch;
use crate::api::constraint_set::IncrementalConstraint;

/// Penalizes items one at a time.
///
/// `impact` returns how many weight units an item costs in its current
/// assignment; zero means the item does not match.
pub struct ItemConstraint {
    constraint_ref: ConstraintRef,
    weight: HardSoftScore,
    is_hard: bool,
    impact: fn(&TeamPlan, usize) -> i64,
    /// Matched items and the impact they were inserted with.
    matched: HashMap<usize, i64>,
}

impl ItemConstraint {
    pub fn new(
        name: &str,
        weight: HardSoftScore,
        is_hard: bool,
        impact: fn(&TeamPlan, usize) -> i64,
    ) -> Self {
        Self {
            constraint_ref: ConstraintRef::new(CONSTRAINT_PACKAGE, name),
            weight,
            is_hard,
            impact,
            matched: HashMap::new(),
        }
    }

    fn of_kind(
        kind: ConstraintKind,
        weight: HardSoftScore,
        impact: fn(&TeamPlan, usize) -> i64,
    ) -> Self {
        Self::new(kind.name(), weight, kind.is_hard(), impact)
    }

    /// Member profile differs from the item's and is not the wildcard.
    pub fn profile(weight: HardSoftScore) -> Self {
        Self::of_kind(ConstraintKind::Profile, weight, profile_mismatch)
    }

    /// Member product differs from the item's and is not the wildcard.
    pub fn product(weight: HardSoftScore) -> Self {
        Self::of_kind(ConstraintKind::Product, weight, product_mismatch)
    }

    /// Item lands on one of the member's days off.
    pub fn days_off(weight: HardSoftScore) -> Self {
        Self::of_kind(ConstraintKind::DaysOff, weight, on_day_off)
    }

    /// Item lands after its deadline.
    pub fn deadline(weight: HardSoftScore) -> Self {
        Self::of_kind(ConstraintKind::Deadline, weight, after_deadline)
    }

    /// Each scheduled item costs its priority weight.
    pub fn priority(weight: HardSoftScore) -> Self {
        Self::of_kind(ConstraintKind::Priority, weight, priority_weight)
    }

    fn impact_of(&self, solution: &TeamPlan, item: usize) -> i64 {
        (self.impact)(solution, item)
    }
}

fn profile_mismatch(plan: &TeamPlan, item: usize) -> i64 {
    scheduled(plan, item)
        .map(|(_, member)| i64::from(!member.accepts_profile(&plan.item(item).profile)))
        .unwrap_or(0)
}

fn product_mismatch(plan: &TeamPlan, item: usize) -> i64 {
    scheduled(plan, item)
        .map(|(_, member)| i64::from(!member.accepts_product(&plan.item(item).product)))
        .unwrap_or(0)
}

fn on_day_off(plan: &TeamPlan, item: usize) -> i64 {
    scheduled(plan, item)
        .map(|(day, member)| i64::from(member.is_off(day.date)))
        .unwrap_or(0)
}

fn after_deadline(plan: &TeamPlan, item: usize) -> i64 {
    scheduled(plan, item)
        .map(|(day, _)| i64::from(plan.item(item).misses_deadline(day.date)))
        .unwrap_or(0)
}

fn priority_weight(plan: &TeamPlan, item: usize) -> i64 {
    scheduled(plan, item)
        .map(|_| plan.item(item).priority_weight())
        .unwrap_or(0)
}

impl IncrementalConstraint<TeamPlan, HardSoftScore> for ItemConstraint {
    fn evaluate(&self, solution: &TeamPlan) -> HardSoftScore {
        let units: i64 = (0..solution.item_count())
            .map(|item| self.impact_of(solution, item))
            .sum();
        -self.weight.times(units)
    }

    fn match_count(&self, solution: &TeamPlan) -> usize {
        (0..solution.item_count())
            .filter(|&item| self.impact_of(solution, item) != 0)
            .count()
    }

    fn initialize(&mut self, solution: &TeamPlan) -> HardSoftScore {
        self.matched.clear();
        let mut score = HardSoftScore::ZERO;
        for item in 0..solution.item_count() {
            score += self.on_insert(solution, item);
        }
        score
    }

    fn on_insert(&mut self, solution: &TeamPlan, entity_index: usize) -> HardSoftScore {
        if entity_index >= solution.item_count() {
            return HardSoftScore::ZERO;
        }
        let units = self.impact_of(solution, entity_index);
        if units == 0 {
            return HardSoftScore::ZERO;
        }
        match self.matched.insert(entity_index, units) {
            // Inserted twice without a retract: replace the old contribution.
            Some(previous) => -self.weight.times(units - previous),
            None => -self.weight.times(units),
        }
    }

    fn on_retract(&mut self, _solution: &TeamPlan, entity_index: usize) -> HardSoftScore {
        match self.matched.remove(&entity_index) {
            Some(units) => self.weight.times(units),
            None => HardSoftScore::ZERO,
        }
    }

    fn reset(&mut self) {
        self.matched.clear();
    }

    fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    fn is_hard(&self) -> bool {
        self.is_hard
    }

    fn constraint_ref(&self) -> ConstraintRef {
        self.constraint_ref.clone()
    }

    fn get_matches(&self, solution: &TeamPlan) -> Vec<ConstraintMatch<HardSoftScore>> {
        (0..solution.item_count())
            .filter_map(|item| {
                let units = self.impact_of(solution, item);
                (units != 0).then(|| {
                    ConstraintMatch::new(
                        self.constraint_ref.clone(),
                        -self.weight.times(units),
                        vec![item],
                        describe(solution, item),
                    )
                })
            })
            .collect()
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }
}
