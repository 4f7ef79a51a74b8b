use chrono::NaiveDate;

/// Priority used when an epic does not declare one.
pub const DEFAULT_PRIORITY: i64 = 10;

/// One day of workload on an epic, requiring a given profile and product.
///
/// These are the fixed requirements of the item. Its work day and team
/// member are decision state and live in [`TeamPlan`](super::TeamPlan).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanningItem {
    pub id: usize,
    pub epic: String,
    pub profile: String,
    pub product: String,
    pub priority: Option<i64>,
    pub deadline: Option<NaiveDate>,
}

impl PlanningItem {
    pub fn new(
        id: usize,
        epic: impl Into<String>,
        profile: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            id,
            epic: epic.into(),
            profile: profile.into(),
            product: product.into(),
            priority: None,
            deadline: None,
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

    /// Returns the priority weight, falling back to [`DEFAULT_PRIORITY`].
    pub fn priority_weight(&self) -> i64 {
        self.priority.unwrap_or(DEFAULT_PRIORITY)
    }

    /// True if doing this item on `date` misses its deadline.
    pub fn misses_deadline(&self, date: NaiveDate) -> bool {
        self.deadline.is_some_and(|deadline| date > deadline)
    }
}

impl std::fmt::Display for PlanningItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PlanningItem(epic={}, product={}, profile={})",
            self.epic, self.product, self.profile
        )
    }
}
