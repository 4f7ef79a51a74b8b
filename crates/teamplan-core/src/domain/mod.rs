//! Domain model for team planning.
//!
//! Work days and team members are immutable problem facts. Planning items
//! carry the requirements of one day of epic workload; where each item lands
//! (which work day, which team member) is the decision state held by
//! [`TeamPlan`].

mod builder;
mod plan;
mod planning_item;
mod team_member;
mod traits;
mod work_day;


pub use builder::{Epic, EpicWorkload, PlanBuilder};
pub use plan::{Assignment, ScheduledItem, TeamPlan};
pub use planning_item::{PlanningItem, DEFAULT_PRIORITY};
pub use team_member::{TeamMember, WILDCARD};
pub use traits::PlanningSolution;
pub use work_day::WorkDay;
