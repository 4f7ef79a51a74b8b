//! Builds a [`TeamPlan`] from a calendar horizon, a team and a list of epics.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{Result, TeamPlanError};

use super::{PlanningItem, TeamMember, TeamPlan, WorkDay};

/// Workload of one profile on an epic, in days.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpicWorkload {
    pub profile: String,
    pub days: usize,
}

impl EpicWorkload {
    pub fn new(profile: impl Into<String>, days: usize) -> Self {
        Self {
            profile: profile.into(),
            days,
        }
    }
}

/// A unit of product work split into per-profile workloads.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epic {
    pub name: String,
    pub product: String,
    pub priority: Option<i64>,
    pub deadline: Option<NaiveDate>,
    pub workloads: Vec<EpicWorkload>,
}

impl Epic {
    pub fn new(name: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product: product.into(),
            priority: None,
            deadline: None,
            workloads: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Adds `days` of work for `profile`.
    pub fn with_workload(mut self, profile: impl Into<String>, days: usize) -> Self {
        self.workloads.push(EpicWorkload::new(profile, days));
        self
    }
}

/// Expands a planning horizon and epic workloads into an unassigned plan.
///
/// Work days cover `begin..=end`, skipping Saturdays, Sundays and team-wide
/// days off. Each epic yields one planning item per workload day, in epic
/// order then workload order. All ids are sequential from zero.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use teamplan_core::{Epic, PlanBuilder};
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let next_monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
///
/// let plan = PlanBuilder::new(monday, next_monday)
///     .member("Alice", "dev", "Portal", [])
///     .epic(Epic::new("Login", "Portal").with_workload("dev", 3))
///     .build()
///     .unwrap();
///
/// assert_eq!(plan.work_day_count(), 6);
/// assert_eq!(plan.item_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PlanBuilder {
    begin: NaiveDate,
    end: NaiveDate,
    team_days_off: BTreeSet<NaiveDate>,
    members: Vec<TeamMember>,
    epics: Vec<Epic>,
}

impl PlanBuilder {
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Self {
        Self {
            begin,
            end,
            team_days_off: BTreeSet::new(),
            members: Vec::new(),
            epics: Vec::new(),
        }
    }

    /// Adds days on which nobody in the team works (public holidays).
    pub fn team_days_off(mut self, days: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.team_days_off.extend(days);
        self
    }

    /// Adds a team member; ids follow insertion order.
    pub fn member(
        mut self,
        name: impl Into<String>,
        profile: impl Into<String>,
        product: impl Into<String>,
        days_off: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        let id = self.members.len();
        self.members
            .push(TeamMember::new(id, name, profile, product).with_days_off(days_off));
        self
    }

    pub fn epic(mut self, epic: Epic) -> Self {
        self.epics.push(epic);
        self
    }

    pub fn epics(mut self, epics: impl IntoIterator<Item = Epic>) -> Self {
        self.epics.extend(epics);
        self
    }

    /// Lists the working days of the horizon.
    pub fn work_days(&self) -> Vec<WorkDay> {
        self.begin
            .iter_days()
            .take_while(|date| *date <= self.end)
            .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
            .filter(|date| !self.team_days_off.contains(date))
            .enumerate()
            .map(|(id, date)| WorkDay::new(id, date))
            .collect()
    }

    /// Lists one planning item per workload day.
    pub fn planning_items(&self) -> Vec<PlanningItem> {
        let mut items = Vec::new();
        for epic in &self.epics {
            for workload in &epic.workloads {
                for _ in 0..workload.days {
                    let mut item =
                        PlanningItem::new(items.len(), &epic.name, &workload.profile, &epic.product);
                    item.priority = epic.priority;
                    item.deadline = epic.deadline;
                    items.push(item);
                }
            }
        }
        items
    }

    /// Builds the unassigned plan.
    ///
    /// # Errors
    ///
    /// Returns [`TeamPlanError::Configuration`] if the horizon ends before it
    /// begins.
    pub fn build(self) -> Result<TeamPlan> {
        if self.end < self.begin {
            return Err(TeamPlanError::configuration(format!(
                "planning horizon ends ({}) before it begins ({})",
                self.end, self.begin
            )));
        }
        let work_days = self.work_days();
        let items = self.planning_items();
        TeamPlan::new(work_days, self.members, items)
    }
}
