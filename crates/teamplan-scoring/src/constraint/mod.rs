//! Team-planning constraints.
//!
//! HARD constraints:
//! 1. Capacity - a member works on at most one item per day
//! 2. Profile - the member's profile matches the item's (or is `*`)
//! 3. Product - the member's product matches the item's (or is `*`)
//! 4. Days off - nobody works on a personal day off
//! 5. Deadline (optional) - items land on or before their epic's deadline
//!
//! SOFT constraints (optional):
//! 6. Focus - a member's items belong to as few epics as possible
//! 7. Priority - every scheduled item costs its epic's priority weight
//!
//! Every constraint only considers items with both decision fields set.

mod capacity;
mod focus;
mod item;


use teamplan_core::{HardSoftScore, TeamMember, TeamPlan, WorkDay};

use crate::api::constraint_set::{ConstraintSet, IncrementalConstraint};
use crate::api::weight_overrides::ConstraintWeightOverrides;

pub use capacity::CapacityConstraint;
pub use focus::FocusConstraint;
pub use item::ItemConstraint;

/// Package used in every team-planning [`ConstraintRef`](teamplan_core::ConstraintRef).
pub const CONSTRAINT_PACKAGE: &str = "teamplan";

/// The constraints available for team planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    Capacity,
    Profile,
    Product,
    DaysOff,
    Deadline,
    Focus,
    Priority,
}

impl ConstraintKind {
    /// Every kind, in evaluation order.
    pub const ALL: [ConstraintKind; 7] = [
        ConstraintKind::Capacity,
        ConstraintKind::Product,
        ConstraintKind::Profile,
        ConstraintKind::DaysOff,
        ConstraintKind::Deadline,
        ConstraintKind::Focus,
        ConstraintKind::Priority,
    ];

    /// Configuration key, e.g. `"days_off"`.
    pub fn key(self) -> &'static str {
        match self {
            ConstraintKind::Capacity => "capacity",
            ConstraintKind::Profile => "profile",
            ConstraintKind::Product => "product",
            ConstraintKind::DaysOff => "days_off",
            ConstraintKind::Deadline => "deadline",
            ConstraintKind::Focus => "focus",
            ConstraintKind::Priority => "priority",
        }
    }

    /// Display name used in score explanations.
    pub fn name(self) -> &'static str {
        match self {
            ConstraintKind::Capacity => "Team member issue: Capacity",
            ConstraintKind::Profile => "Team member issue: Profile",
            ConstraintKind::Product => "Team member issue: Product",
            ConstraintKind::DaysOff => "Team member issue: Day Off",
            ConstraintKind::Deadline => "Dead line fail",
            ConstraintKind::Focus => "Team member issue: Focus",
            ConstraintKind::Priority => "Epic priority",
        }
    }

    pub fn from_key(key: &str) -> Option<ConstraintKind> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn is_hard(self) -> bool {
        !matches!(self, ConstraintKind::Focus | ConstraintKind::Priority)
    }

    /// Whether the constraint is active when nothing is configured.
    pub fn enabled_by_default(self) -> bool {
        matches!(
            self,
            ConstraintKind::Capacity
                | ConstraintKind::Profile
                | ConstraintKind::Product
                | ConstraintKind::DaysOff
        )
    }

    /// Score per match unit before overrides.
    pub fn default_weight(self) -> HardSoftScore {
        if self.is_hard() {
            HardSoftScore::ONE_HARD
        } else {
            HardSoftScore::ONE_SOFT
        }
    }

    /// The kinds active when nothing is configured.
    pub fn defaults() -> Vec<ConstraintKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.enabled_by_default())
            .collect()
    }

    /// Builds the constraint evaluator for this kind.
    pub fn evaluator(
        self,
        weight: HardSoftScore,
    ) -> Box<dyn IncrementalConstraint<TeamPlan, HardSoftScore>> {
        match self {
            ConstraintKind::Capacity => Box::new(CapacityConstraint::new(weight)),
            ConstraintKind::Focus => Box::new(FocusConstraint::new(weight)),
            ConstraintKind::Profile => Box::new(ItemConstraint::profile(weight)),
            ConstraintKind::Product => Box::new(ItemConstraint::product(weight)),
            ConstraintKind::DaysOff => Box::new(ItemConstraint::days_off(weight)),
            ConstraintKind::Deadline => Box::new(ItemConstraint::deadline(weight)),
            ConstraintKind::Priority => Box::new(ItemConstraint::priority(weight)),
        }
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Creates the ordered constraint set for the given kinds.
///
/// Kinds are evaluated in [`ConstraintKind::ALL`] order whatever order they
/// are passed in; duplicates are ignored. Weights are looked up in
/// `overrides` by key first, then by display name.
///
/// # Example
///
/// ```
/// use teamplan_core::HardSoftScore;
/// use teamplan_scoring::{team_constraints, ConstraintKind, ConstraintWeightOverrides};
///
/// let mut overrides = ConstraintWeightOverrides::new();
/// overrides.put("focus", HardSoftScore::of_soft(5));
///
/// let constraints = team_constraints(
///     &[ConstraintKind::Focus, ConstraintKind::Capacity],
///     &overrides,
/// );
/// assert_eq!(
///     constraints.names(),
///     vec!["Team member issue: Capacity", "Team member issue: Focus"]
/// );
/// ```
pub fn team_constraints(
    kinds: &[ConstraintKind],
    overrides: &ConstraintWeightOverrides<HardSoftScore>,
) -> ConstraintSet<TeamPlan, HardSoftScore> {
    let mut set = ConstraintSet::new();
    for kind in ConstraintKind::ALL {
        if !kinds.contains(&kind) {
            continue;
        }
        set.push(kind.evaluator(overrides.resolve(kind)));
    }
    set
}

/// Resolves both decision fields of an item, if set.
#[inline]
pub(crate) fn scheduled(plan: &TeamPlan, item: usize) -> Option<(&WorkDay, &TeamMember)> {
    let assignment = plan.assignment(item);
    Some((
        plan.work_day(assignment.work_day?),
        plan.team_member(assignment.team_member?),
    ))
}

pub(crate) fn describe(plan: &TeamPlan, item: usize) -> String {
    let planning_item = plan.item(item);
    match scheduled(plan, item) {
        Some((day, member)) => format!(
            "{} ({}/{}) on {} by {}",
            planning_item.epic, planning_item.product, planning_item.profile, day.date, member.name
        ),
        None => format!("{} (unassigned)", planning_item.epic),
    }
}
