//! Construction heuristic phase
//!
//! Gives every planning item a work day and a team member before local
//! search starts. Fields that already hold a value are kept, so a plan
//! seeded with placeholder assignments is completed rather than replaced.

use teamplan_config::ConstructionHeuristicType;
use teamplan_core::{Assignment, HardSoftScore, Result, TeamPlan, TeamPlanError};
use teamplan_scoring::ScoreDirector;
use tracing::{debug, trace};

use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::Termination;

#[cfg(test)]
mod tests;

/// Fills the unassigned fields of each item in order.
///
/// The phase is not interruptible: local search needs a fully assigned
/// plan, so termination is not polled here.
///
/// # Example
///
/// ```
/// use teamplan_config::ConstructionHeuristicType;
/// use teamplan_solver::ConstructionHeuristicPhase;
///
/// let phase = ConstructionHeuristicPhase::new(ConstructionHeuristicType::FirstFit);
/// assert_eq!(phase.heuristic(), ConstructionHeuristicType::FirstFit);
/// ```
#[derive(Debug, Clone)]
pub struct ConstructionHeuristicPhase {
    heuristic: ConstructionHeuristicType,
}

impl ConstructionHeuristicPhase {
    pub fn new(heuristic: ConstructionHeuristicType) -> Self {
        Self { heuristic }
    }

    pub fn heuristic(&self) -> ConstructionHeuristicType {
        self.heuristic
    }

    /// Tries every (day, member) pair still open for `item` and keeps the
    /// first one with the highest score. The item is left as it was.
    fn cheapest<D: ScoreDirector<TeamPlan>>(
        scope: &mut SolverScope<TeamPlan, D>,
        item: usize,
        current: Assignment,
    ) -> Assignment {
        let plan = scope.working_solution();
        let days = match current.work_day {
            Some(day) => day..day + 1,
            None => 0..plan.work_day_count(),
        };
        let members = match current.team_member {
            Some(member) => member..member + 1,
            None => 0..plan.team_member_count(),
        };

        let mut best: Option<(Assignment, HardSoftScore)> = None;
        let director = scope.score_director_mut();
        for day in days {
            for member in members.clone() {
                let candidate = Assignment::new(day, member);
                director.change_entity(item, |plan| plan.set_assignment(item, candidate));
                let score = director.calculate_score();
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((candidate, score));
                }
            }
        }
        director.change_entity(item, |plan| plan.set_assignment(item, current));

        best.map_or_else(|| first_fit(current), |(assignment, _)| assignment)
    }
}

fn first_fit(current: Assignment) -> Assignment {
    Assignment::new(
        current.work_day.unwrap_or(0),
        current.team_member.unwrap_or(0),
    )
}

impl<D: ScoreDirector<TeamPlan>> Phase<TeamPlan, D> for ConstructionHeuristicPhase {
    fn solve<T: Termination<TeamPlan, D>>(
        &mut self,
        solver_scope: &mut SolverScope<TeamPlan, D>,
        _termination: &T,
    ) -> Result<()> {
        let phase_type = <Self as Phase<TeamPlan, D>>::phase_type_name(self);
        let plan = solver_scope.working_solution();
        if plan.is_fully_assigned() {
            debug!(event = "phase_skipped", phase = phase_type, reason = "fully_assigned");
            return Ok(());
        }
        if plan.work_day_count() == 0 || plan.team_member_count() == 0 {
            return Err(TeamPlanError::configuration(
                "cannot assign planning items without work days and team members",
            ));
        }

        solver_scope.events().fire_phase_started(phase_type);
        debug!(
            event = "phase_start",
            phase = phase_type,
            heuristic = ?self.heuristic,
            unassigned = plan.unassigned_count(),
        );

        let mut placements = 0u64;
        for item in 0..solver_scope.working_solution().item_count() {
            let current = solver_scope.working_solution().assignment(item);
            if current.is_complete() {
                continue;
            }
            let chosen = match self.heuristic {
                ConstructionHeuristicType::FirstFit => first_fit(current),
                ConstructionHeuristicType::CheapestInsertion => {
                    Self::cheapest(solver_scope, item, current)
                }
            };
            solver_scope
                .score_director_mut()
                .change_entity(item, |plan| plan.set_assignment(item, chosen));
            solver_scope.stats_mut().record_placement();
            placements += 1;
            trace!(
                event = "placement",
                item = item,
                work_day = ?chosen.work_day,
                team_member = ?chosen.team_member,
            );
        }

        let score = solver_scope.calculate_score();
        solver_scope.events().fire_phase_ended(phase_type, placements);
        debug!(
            event = "phase_end",
            phase = phase_type,
            placements = placements,
            score = %score,
        );
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "ConstructionHeuristic"
    }
}
