//! The team plan: shared problem facts plus per-item decision state.

use std::sync::Arc;

use crate::error::{Result, TeamPlanError};
use crate::score::HardSoftScore;

use super::{PlanningItem, PlanningSolution, TeamMember, WorkDay};

/// Decision state of one planning item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// Index into the plan's work days.
    pub work_day: Option<usize>,
    /// Index into the plan's team members.
    pub team_member: Option<usize>,
}

impl Assignment {
    pub const UNASSIGNED: Assignment = Assignment {
        work_day: None,
        team_member: None,
    };

    pub fn new(work_day: usize, team_member: usize) -> Self {
        Self {
            work_day: Some(work_day),
            team_member: Some(team_member),
        }
    }

    /// Both decision fields have a value.
    pub fn is_complete(&self) -> bool {
        self.work_day.is_some() && self.team_member.is_some()
    }
}

/// A roster under construction.
///
/// Work days, team members and item requirements are shared behind `Arc`s,
/// so cloning a plan copies only the assignment vector and the score.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use teamplan_core::{PlanningItem, TeamMember, TeamPlan, WorkDay};
///
/// let day = WorkDay::new(0, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// let member = TeamMember::new(0, "Alice", "dev", "Portal");
/// let item = PlanningItem::new(0, "Login", "dev", "Portal");
///
/// let mut plan = TeamPlan::new(vec![day], vec![member], vec![item]).unwrap();
/// assert!(!plan.is_fully_assigned());
///
/// plan.assign(0, 0, 0);
/// assert!(plan.is_fully_assigned());
///
/// let snapshot = plan.clone();
/// assert!(snapshot.shares_facts_with(&plan));
/// ```
#[derive(Debug, Clone)]
pub struct TeamPlan {
    work_days: Arc<[WorkDay]>,
    team_members: Arc<[TeamMember]>,
    items: Arc<[PlanningItem]>,
    assignments: Vec<Assignment>,
    score: Option<HardSoftScore>,
}

impl TeamPlan {
    /// Creates a plan with every item unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`TeamPlanError::Configuration`] if any id does not match its
    /// position in its collection.
    pub fn new(
        work_days: Vec<WorkDay>,
        team_members: Vec<TeamMember>,
        items: Vec<PlanningItem>,
    ) -> Result<Self> {
        check_ids("work day", work_days.iter().map(|d| d.id))?;
        check_ids("team member", team_members.iter().map(|m| m.id))?;
        check_ids("planning item", items.iter().map(|i| i.id))?;

        let assignments = vec![Assignment::UNASSIGNED; items.len()];
        Ok(Self {
            work_days: work_days.into(),
            team_members: team_members.into(),
            items: items.into(),
            assignments,
            score: None,
        })
    }

    /// Replaces the whole decision state.
    ///
    /// # Errors
    ///
    /// Returns [`TeamPlanError::Configuration`] if the length differs from the
    /// item count or an assignment points outside the fact collections.
    pub fn with_assignments(mut self, assignments: Vec<Assignment>) -> Result<Self> {
        if assignments.len() != self.items.len() {
            return Err(TeamPlanError::configuration(format!(
                "expected {} assignments, got {}",
                self.items.len(),
                assignments.len()
            )));
        }
        for (index, assignment) in assignments.iter().enumerate() {
            if assignment.work_day.is_some_and(|d| d >= self.work_days.len()) {
                return Err(TeamPlanError::configuration(format!(
                    "item {} references unknown work day {:?}",
                    index, assignment.work_day
                )));
            }
            if assignment
                .team_member
                .is_some_and(|m| m >= self.team_members.len())
            {
                return Err(TeamPlanError::configuration(format!(
                    "item {} references unknown team member {:?}",
                    index, assignment.team_member
                )));
            }
        }
        self.assignments = assignments;
        self.score = None;
        Ok(self)
    }

    pub fn work_days(&self) -> &[WorkDay] {
        &self.work_days
    }

    pub fn team_members(&self) -> &[TeamMember] {
        &self.team_members
    }

    pub fn items(&self) -> &[PlanningItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn work_day_count(&self) -> usize {
        self.work_days.len()
    }

    pub fn team_member_count(&self) -> usize {
        self.team_members.len()
    }

    pub fn item(&self, index: usize) -> &PlanningItem {
        &self.items[index]
    }

    pub fn work_day(&self, index: usize) -> &WorkDay {
        &self.work_days[index]
    }

    pub fn team_member(&self, index: usize) -> &TeamMember {
        &self.team_members[index]
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn assignment(&self, item: usize) -> Assignment {
        self.assignments[item]
    }

    pub fn work_day_of(&self, item: usize) -> Option<usize> {
        self.assignments[item].work_day
    }

    pub fn team_member_of(&self, item: usize) -> Option<usize> {
        self.assignments[item].team_member
    }

    pub fn set_work_day(&mut self, item: usize, work_day: Option<usize>) {
        self.assignments[item].work_day = work_day;
    }

    pub fn set_team_member(&mut self, item: usize, team_member: Option<usize>) {
        self.assignments[item].team_member = team_member;
    }

    pub fn set_assignment(&mut self, item: usize, assignment: Assignment) {
        self.assignments[item] = assignment;
    }

    /// Sets both decision fields of an item.
    pub fn assign(&mut self, item: usize, work_day: usize, team_member: usize) {
        self.assignments[item] = Assignment::new(work_day, team_member);
    }

    /// Number of items with at least one decision field unset.
    pub fn unassigned_count(&self) -> usize {
        self.assignments.iter().filter(|a| !a.is_complete()).count()
    }

    pub fn is_fully_assigned(&self) -> bool {
        self.assignments.iter().all(Assignment::is_complete)
    }

    /// Returns the first item whose decision fields are incomplete.
    pub fn first_unassigned(&self) -> Option<usize> {
        self.assignments.iter().position(|a| !a.is_complete())
    }

    /// True when both plans point at the same fact collections.
    pub fn shares_facts_with(&self, other: &TeamPlan) -> bool {
        Arc::ptr_eq(&self.work_days, &other.work_days)
            && Arc::ptr_eq(&self.team_members, &other.team_members)
            && Arc::ptr_eq(&self.items, &other.items)
    }

    /// Iterates the fully assigned items, resolving their references.
    pub fn scheduled_items(&self) -> impl Iterator<Item = ScheduledItem<'_>> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(move |(index, assignment)| {
                let work_day = &self.work_days[assignment.work_day?];
                let team_member = &self.team_members[assignment.team_member?];
                Some(ScheduledItem {
                    index,
                    item: &self.items[index],
                    work_day,
                    team_member,
                })
            })
    }
}

impl PlanningSolution for TeamPlan {
    type Score = HardSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.is_fully_assigned()
    }
}

/// Read-only view of an item together with its resolved assignment.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledItem<'a> {
    pub index: usize,
    pub item: &'a PlanningItem,
    pub work_day: &'a WorkDay,
    pub team_member: &'a TeamMember,
}

impl ScheduledItem<'_> {
    pub fn date(&self) -> chrono::NaiveDate {
        self.work_day.date
    }

    pub fn member_name(&self) -> &str {
        &self.team_member.name
    }

    pub fn product(&self) -> &str {
        &self.item.product
    }

    pub fn epic(&self) -> &str {
        &self.item.epic
    }

    pub fn profile(&self) -> &str {
        &self.item.profile
    }
}

fn check_ids(kind: &str, ids: impl Iterator<Item = usize>) -> Result<()> {
    for (position, id) in ids.enumerate() {
        if position != id {
            return Err(TeamPlanError::configuration(format!(
                "{} at position {} has id {}; ids must be sequential from 0",
                kind, position, id
            )));
        }
    }
    Ok(())
}
