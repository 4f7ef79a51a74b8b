//! Seeded random scenarios.

use chrono::Duration;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use teamplan_core::{Assignment, PlanningItem, TeamMember, TeamPlan, WorkDay, WILDCARD};

use crate::plans::monday;

const PROFILES: [&str; 3] = ["dev", "qa", "ops"];
const PRODUCTS: [&str; 2] = ["Portal", "Billing"];
const EPICS: [&str; 4] = ["Login", "Export", "Search", "Audit"];

/// Size of a random scenario.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioShape {
    pub items: usize,
    pub work_days: usize,
    pub team_members: usize,
}

impl ScenarioShape {
    pub fn new(items: usize, work_days: usize, team_members: usize) -> Self {
        Self {
            items,
            work_days,
            team_members,
        }
    }
}

/// Builds a random, fully assigned plan.
///
/// Members get random profiles, products (sometimes wildcards) and days
/// off; items get random epics, priorities and deadlines. The same seed
/// always yields the same plan.
pub fn random_plan(seed: u64, shape: ScenarioShape) -> TeamPlan {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let work_days: Vec<WorkDay> = (0..shape.work_days)
        .map(|id| WorkDay::new(id, monday() + Duration::days(id as i64)))
        .collect();

    let team_members: Vec<TeamMember> = (0..shape.team_members)
        .map(|id| {
            let profile = pick_or_wildcard(&mut rng, &PROFILES);
            let product = pick_or_wildcard(&mut rng, &PRODUCTS);
            let mut member = TeamMember::new(id, format!("member-{id}"), profile, product);
            for day in &work_days {
                if rng.random_bool(0.2) {
                    member.days_off.insert(day.date);
                }
            }
            member
        })
        .collect();

    let items: Vec<PlanningItem> = (0..shape.items)
        .map(|id| {
            let mut item = PlanningItem::new(
                id,
                EPICS[rng.random_range(0..EPICS.len())],
                PROFILES[rng.random_range(0..PROFILES.len())],
                PRODUCTS[rng.random_range(0..PRODUCTS.len())],
            );
            if rng.random_bool(0.5) {
                item.priority = Some(rng.random_range(1..=20));
            }
            if !work_days.is_empty() && rng.random_bool(0.5) {
                item.deadline = Some(work_days[rng.random_range(0..work_days.len())].date);
            }
            item
        })
        .collect();

    let plan = TeamPlan::new(work_days, team_members, items).expect("sequential ids");
    randomize_assignments(plan, &mut rng)
}

/// Gives every item a random work day and team member.
pub fn randomize_assignments<R: Rng>(plan: TeamPlan, rng: &mut R) -> TeamPlan {
    let days = plan.work_day_count();
    let members = plan.team_member_count();
    if days == 0 || members == 0 {
        return plan;
    }
    let assignments = (0..plan.item_count())
        .map(|_| Assignment::new(rng.random_range(0..days), rng.random_range(0..members)))
        .collect();
    plan.with_assignments(assignments).expect("in-range assignments")
}

fn pick_or_wildcard<R: Rng>(rng: &mut R, values: &[&str]) -> String {
    if rng.random_bool(0.25) {
        WILDCARD.to_string()
    } else {
        values[rng.random_range(0..values.len())].to_string()
    }
}
