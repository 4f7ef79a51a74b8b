use chrono::NaiveDate;

/// A calendar day on which the team works.
///
/// The id is the day's position in the plan's work-day list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkDay {
    pub id: usize,
    pub date: NaiveDate,
}

impl WorkDay {
    pub fn new(id: usize, date: NaiveDate) -> Self {
        Self { id, date }
    }
}

impl std::fmt::Display for WorkDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WorkDay({})", self.date)
    }
}
