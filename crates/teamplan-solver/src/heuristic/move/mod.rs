//! Moves over the decision fields of a [`TeamPlan`].
//!
//! A move records the values it overwrites when it is created, so it can be
//! undone without cloning the plan. Every move goes through the score
//! director, which keeps the incremental score in step with the plan.

use std::fmt;

use smallvec::{smallvec, SmallVec};
use teamplan_core::{Assignment, HardSoftScore, TeamPlan};
use teamplan_scoring::ScoreDirector;

#[cfg(test)]
mod tests;

/// A decision field of a planning item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanField {
    WorkDay,
    TeamMember,
}

/// "Item `item` has `value` in `field`", the unit tabu search remembers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabuAttribute {
    pub item: usize,
    pub field: PlanField,
    pub value: usize,
}

impl TabuAttribute {
    pub fn new(item: usize, field: PlanField, value: usize) -> Self {
        Self { item, field, value }
    }
}

pub type TabuAttributes = SmallVec<[TabuAttribute; 4]>;

/// Moves that can describe what they assign and what they leave behind.
pub trait TabuMove {
    /// Field values this move writes.
    fn tabu_attributes(&self) -> TabuAttributes;

    /// Field values this move overwrites.
    fn reverted_attributes(&self) -> TabuAttributes;
}

/// A local change to the plan.
///
/// # Example
///
/// ```
/// use teamplan_core::{HardSoftScore, PlanningItem, TeamMember, TeamPlan, WorkDay};
/// use teamplan_scoring::{team_constraints, ConstraintKind, ConstraintWeightOverrides,
///     IncrementalScoreDirector, ScoreDirector};
/// use teamplan_solver::PlanMove;
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let mut plan = TeamPlan::new(
///     vec![WorkDay::new(0, monday), WorkDay::new(1, monday.succ_opt().unwrap())],
///     vec![TeamMember::new(0, "Alice", "dev", "X")],
///     vec![PlanningItem::new(0, "Login", "dev", "X"), PlanningItem::new(1, "Login", "dev", "X")],
/// ).unwrap();
/// plan.assign(0, 0, 0);
/// plan.assign(1, 0, 0);
///
/// let constraints = team_constraints(&ConstraintKind::defaults(), &ConstraintWeightOverrides::new());
/// let mut director = IncrementalScoreDirector::new(plan, constraints);
/// assert_eq!(director.calculate_score(), HardSoftScore::of(-1, 0));
///
/// let mv = PlanMove::reassign_work_day(director.working_solution(), 1, 1);
/// assert_eq!(mv.score_delta(&mut director), HardSoftScore::of(1, 0));
///
/// mv.apply(&mut director);
/// assert_eq!(director.calculate_score(), HardSoftScore::ZERO);
/// mv.undo(&mut director);
/// assert_eq!(director.calculate_score(), HardSoftScore::of(-1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMove {
    ReassignWorkDay {
        item: usize,
        from: Option<usize>,
        to: usize,
    },
    ReassignTeamMember {
        item: usize,
        from: Option<usize>,
        to: usize,
    },
    /// Exchanges both decision fields of two items.
    SwapAssignment {
        left: usize,
        right: usize,
        left_before: Assignment,
        right_before: Assignment,
    },
}

impl PlanMove {
    /// Moves `item` to work day `to`, remembering its current day.
    pub fn reassign_work_day(plan: &TeamPlan, item: usize, to: usize) -> Self {
        PlanMove::ReassignWorkDay {
            item,
            from: plan.work_day_of(item),
            to,
        }
    }

    /// Gives `item` to team member `to`, remembering its current member.
    pub fn reassign_team_member(plan: &TeamPlan, item: usize, to: usize) -> Self {
        PlanMove::ReassignTeamMember {
            item,
            from: plan.team_member_of(item),
            to,
        }
    }

    pub fn swap(plan: &TeamPlan, left: usize, right: usize) -> Self {
        PlanMove::SwapAssignment {
            left,
            right,
            left_before: plan.assignment(left),
            right_before: plan.assignment(right),
        }
    }

    /// A move is doable when it changes something and never unsets a field.
    pub fn is_doable(&self, plan: &TeamPlan) -> bool {
        match *self {
            PlanMove::ReassignWorkDay { item, from, to } => {
                from != Some(to) && plan.work_day_of(item) == from
            }
            PlanMove::ReassignTeamMember { item, from, to } => {
                from != Some(to) && plan.team_member_of(item) == from
            }
            PlanMove::SwapAssignment {
                left,
                right,
                left_before,
                right_before,
            } => {
                left != right
                    && left_before.is_complete()
                    && right_before.is_complete()
                    && left_before != right_before
                    && plan.assignment(left) == left_before
                    && plan.assignment(right) == right_before
            }
        }
    }

    /// Item indices whose decision fields this move writes.
    pub fn items(&self) -> SmallVec<[usize; 2]> {
        match *self {
            PlanMove::ReassignWorkDay { item, .. } | PlanMove::ReassignTeamMember { item, .. } => {
                smallvec![item]
            }
            PlanMove::SwapAssignment { left, right, .. } => smallvec![left, right],
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            PlanMove::ReassignWorkDay { .. } => "ReassignWorkDay",
            PlanMove::ReassignTeamMember { .. } => "ReassignTeamMember",
            PlanMove::SwapAssignment { .. } => "SwapAssignment",
        }
    }

    /// Applies the move through the director.
    pub fn apply<D: ScoreDirector<TeamPlan>>(&self, director: &mut D) {
        match *self {
            PlanMove::ReassignWorkDay { item, to, .. } => {
                director.change_entity(item, |plan| plan.set_work_day(item, Some(to)));
            }
            PlanMove::ReassignTeamMember { item, to, .. } => {
                director.change_entity(item, |plan| plan.set_team_member(item, Some(to)));
            }
            PlanMove::SwapAssignment {
                left,
                right,
                left_before,
                right_before,
            } => {
                director.change_entity(left, |plan| plan.set_assignment(left, right_before));
                director.change_entity(right, |plan| plan.set_assignment(right, left_before));
            }
        }
    }

    /// Restores the values the move overwrote.
    pub fn undo<D: ScoreDirector<TeamPlan>>(&self, director: &mut D) {
        match *self {
            PlanMove::ReassignWorkDay { item, from, .. } => {
                director.change_entity(item, |plan| plan.set_work_day(item, from));
            }
            PlanMove::ReassignTeamMember { item, from, .. } => {
                director.change_entity(item, |plan| plan.set_team_member(item, from));
            }
            PlanMove::SwapAssignment {
                left,
                right,
                left_before,
                right_before,
            } => {
                director.change_entity(right, |plan| plan.set_assignment(right, right_before));
                director.change_entity(left, |plan| plan.set_assignment(left, left_before));
            }
        }
    }

    /// Score change the move would cause. The plan is left as it was.
    pub fn score_delta<D: ScoreDirector<TeamPlan>>(&self, director: &mut D) -> HardSoftScore {
        let before = director.calculate_score();
        self.apply(director);
        let after = director.calculate_score();
        self.undo(director);
        director.calculate_score();
        after - before
    }
}

impl TabuMove for PlanMove {
    fn tabu_attributes(&self) -> TabuAttributes {
        match *self {
            PlanMove::ReassignWorkDay { item, to, .. } => {
                smallvec![TabuAttribute::new(item, PlanField::WorkDay, to)]
            }
            PlanMove::ReassignTeamMember { item, to, .. } => {
                smallvec![TabuAttribute::new(item, PlanField::TeamMember, to)]
            }
            PlanMove::SwapAssignment {
                left,
                right,
                left_before,
                right_before,
            } => assignment_attributes(left, right_before)
                .into_iter()
                .chain(assignment_attributes(right, left_before))
                .collect(),
        }
    }

    fn reverted_attributes(&self) -> TabuAttributes {
        match *self {
            PlanMove::ReassignWorkDay { item, from, .. } => from
                .map(|day| TabuAttribute::new(item, PlanField::WorkDay, day))
                .into_iter()
                .collect(),
            PlanMove::ReassignTeamMember { item, from, .. } => from
                .map(|member| TabuAttribute::new(item, PlanField::TeamMember, member))
                .into_iter()
                .collect(),
            PlanMove::SwapAssignment {
                left,
                right,
                left_before,
                right_before,
            } => assignment_attributes(left, left_before)
                .into_iter()
                .chain(assignment_attributes(right, right_before))
                .collect(),
        }
    }
}

fn assignment_attributes(item: usize, assignment: Assignment) -> TabuAttributes {
    let mut attributes = TabuAttributes::new();
    if let Some(day) = assignment.work_day {
        attributes.push(TabuAttribute::new(item, PlanField::WorkDay, day));
    }
    if let Some(member) = assignment.team_member {
        attributes.push(TabuAttribute::new(item, PlanField::TeamMember, member));
    }
    attributes
}

impl fmt::Display for PlanMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanMove::ReassignWorkDay { item, from, to } => {
                write!(f, "item {} work day {:?} -> {}", item, from, to)
            }
            PlanMove::ReassignTeamMember { item, from, to } => {
                write!(f, "item {} team member {:?} -> {}", item, from, to)
            }
            PlanMove::SwapAssignment { left, right, .. } => {
                write!(f, "swap items {} <-> {}", left, right)
            }
        }
    }
}
