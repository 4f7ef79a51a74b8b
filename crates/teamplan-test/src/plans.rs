//! Small hand-built plans.

use chrono::{Duration, NaiveDate};
use teamplan_core::{PlanningItem, TeamMember, TeamPlan, WorkDay};

/// Builds a date, panicking on invalid input.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// 2024-03-04, a Monday.
pub fn monday() -> NaiveDate {
    date(2024, 3, 4)
}

/// Monday to Friday of the week of [`monday`].
pub fn workweek() -> Vec<WorkDay> {
    (0..5)
        .map(|offset| WorkDay::new(offset, monday() + Duration::days(offset as i64)))
        .collect()
}

/// One day, one member, one item, all assigned.
pub fn single_slot_plan(
    item_profile: &str,
    item_product: &str,
    member_profile: &str,
    member_product: &str,
) -> TeamPlan {
    let mut plan = TeamPlan::new(
        vec![WorkDay::new(0, monday())],
        vec![TeamMember::new(0, "Alice", member_profile, member_product)],
        vec![PlanningItem::new(0, "Login", item_profile, item_product)],
    )
    .expect("valid plan");
    plan.assign(0, 0, 0);
    plan
}

/// Two `dev`/`X` items on the same day with the same matching member.
pub fn two_items_one_slot() -> TeamPlan {
    let mut plan = TeamPlan::new(
        vec![WorkDay::new(0, monday())],
        vec![TeamMember::new(0, "Alice", "dev", "X")],
        vec![
            PlanningItem::new(0, "Login", "dev", "X"),
            PlanningItem::new(1, "Login", "dev", "X"),
        ],
    )
    .expect("valid plan");
    plan.assign(0, 0, 0);
    plan.assign(1, 0, 0);
    plan
}

/// A member with `*` profile and product working an arbitrary item.
pub fn wildcard_plan() -> TeamPlan {
    single_slot_plan("designer", "Billing", "*", "*")
}

/// A matching item placed on the member's day off.
pub fn day_off_plan() -> TeamPlan {
    let mut plan = TeamPlan::new(
        vec![WorkDay::new(0, monday())],
        vec![TeamMember::new(0, "Alice", "dev", "X").with_day_off(monday())],
        vec![PlanningItem::new(0, "Login", "dev", "X")],
    )
    .expect("valid plan");
    plan.assign(0, 0, 0);
    plan
}
