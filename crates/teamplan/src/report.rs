//! Read-only planning report.
//!
//! Flattens a solved plan into rows and consolidates them into date spans,
//! per product and epic, and per team member and workload. Rendering the
//! report (CSV, charts) is left to the caller.

use chrono::NaiveDate;
use serde::Serialize;
use teamplan_core::TeamPlan;

/// One scheduled item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub product: String,
    pub epic: String,
    pub profile: String,
    pub member: String,
}

/// First and last date of a group of items, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn single(date: NaiveDate) -> Self {
        Self {
            begin: date,
            end: date,
        }
    }

    /// Widens the span to cover `date`.
    pub fn include(&mut self, date: NaiveDate) {
        self.begin = self.begin.min(date);
        self.end = self.end.max(date);
    }

    /// Calendar days covered, weekends included.
    pub fn calendar_days(&self) -> i64 {
        (self.end - self.begin).num_days() + 1
    }
}

/// A labelled span inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanEntry {
    pub label: String,
    pub span: DateSpan,
}

/// A group of spans, e.g. all epics of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub entries: Vec<SpanEntry>,
}

/// Rows of a plan, sorted by product then epic.
///
/// Items that are not fully assigned are left out.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use teamplan::report::PlanningReport;
/// use teamplan::{PlanningItem, TeamMember, TeamPlan, WorkDay};
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let mut plan = TeamPlan::new(
///     vec![WorkDay::new(0, day)],
///     vec![TeamMember::new(0, "Alice", "dev", "Portal")],
///     vec![PlanningItem::new(0, "Login", "dev", "Portal")],
/// ).unwrap();
/// plan.assign(0, 0, 0);
///
/// let report = PlanningReport::new(&plan);
/// assert_eq!(report.rows()[0].member, "Alice");
/// assert_eq!(report.by_member()[0].entries[0].label, "Login (dev)");
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanningReport {
    rows: Vec<ReportRow>,
}

impl PlanningReport {
    pub fn new(plan: &TeamPlan) -> Self {
        let mut rows: Vec<ReportRow> = plan
            .scheduled_items()
            .map(|scheduled| ReportRow {
                date: scheduled.date(),
                product: scheduled.product().to_string(),
                epic: scheduled.epic().to_string(),
                profile: scheduled.profile().to_string(),
                member: scheduled.member_name().to_string(),
            })
            .collect();
        // Stable: items of one epic keep their plan order.
        rows.sort_by(|a, b| (&a.product, &a.epic).cmp(&(&b.product, &b.epic)));
        Self { rows }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One section per product with one span per epic.
    pub fn by_product(&self) -> Vec<Section> {
        consolidate(&self.rows, |row| row.product.clone(), |row| row.epic.clone())
    }

    /// One section per team member with one span per workload, labelled
    /// `"epic (profile)"`.
    ///
    /// Members and workloads appear in the order they are first met in
    /// [`rows`](Self::rows).
    pub fn by_member(&self) -> Vec<Section> {
        consolidate(
            &self.rows,
            |row| row.member.clone(),
            |row| format!("{} ({})", row.epic, row.profile),
        )
    }
}

fn consolidate(
    rows: &[ReportRow],
    section_of: impl Fn(&ReportRow) -> String,
    label_of: impl Fn(&ReportRow) -> String,
) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    for row in rows {
        let name = section_of(row);
        let section = match sections.iter().position(|s| s.name == name) {
            Some(index) => &mut sections[index],
            None => {
                sections.push(Section {
                    name,
                    entries: Vec::new(),
                });
                let last = sections.len() - 1;
                &mut sections[last]
            }
        };

        let label = label_of(row);
        match section.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => entry.span.include(row.date),
            None => section.entries.push(SpanEntry {
                label,
                span: DateSpan::single(row.date),
            }),
        }
    }
    sections
}
