//! Team members and their eligibility rules.

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Profile or product value meaning "anything goes".
pub const WILDCARD: &str = "*";

/// A person who can be assigned planning items.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use teamplan_core::TeamMember;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let alice = TeamMember::new(0, "Alice", "*", "Portal").with_day_off(day);
///
/// assert!(alice.accepts_profile("qa"));
/// assert!(!alice.accepts_product("Billing"));
/// assert!(alice.is_off(day));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamMember {
    pub id: usize,
    pub name: String,
    /// Skill profile, or [`WILDCARD`].
    pub profile: String,
    /// Product affiliation, or [`WILDCARD`].
    pub product: String,
    pub days_off: BTreeSet<NaiveDate>,
}

impl TeamMember {
    pub fn new(
        id: usize,
        name: impl Into<String>,
        profile: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            profile: profile.into(),
            product: product.into(),
            days_off: BTreeSet::new(),
        }
    }

    /// Adds a personal day off.
    pub fn with_day_off(mut self, date: NaiveDate) -> Self {
        self.days_off.insert(date);
        self
    }

    /// Replaces the personal days off.
    pub fn with_days_off(mut self, days: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.days_off = days.into_iter().collect();
        self
    }

    /// True when this member may work on items requiring `profile`.
    pub fn accepts_profile(&self, profile: &str) -> bool {
        self.profile == WILDCARD || self.profile == profile
    }

    /// True when this member may work on items of `product`.
    pub fn accepts_product(&self, product: &str) -> bool {
        self.product == WILDCARD || self.product == product
    }

    pub fn is_off(&self, date: NaiveDate) -> bool {
        self.days_off.contains(&date)
    }
}

impl std::fmt::Display for TeamMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TeamMember(name={}, profile={}, product={}, days_off={})",
            self.name,
            self.profile,
            self.product,
            self.days_off.len()
        )
    }
}
