//! One-call solving.
//!
//! Logging levels:
//! - **INFO**: solve start/end and problem scale
//! - **DEBUG**: phase transitions and new best scores
//! - **TRACE**: steps and move evaluation
//! - **WARN**: a best solution that still breaks hard constraints

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use teamplan_config::SolverConfig;
use teamplan_core::{HardSoftScore, Result, TeamPlan};
use tokio::sync::mpsc;

use crate::event::ChannelEventListener;
use crate::solver::{SolveOutcome, Solver};

/// Solves `plan` with `config`.
pub fn run_solver(plan: TeamPlan, config: SolverConfig) -> Result<SolveOutcome<TeamPlan>> {
    Solver::new(config).solve(plan)
}

/// Solves `plan`, streaming every new best solution through `sender`.
///
/// With parallel searches the channel receives the bests of every search
/// as they occur. Setting `terminate` stops all searches at their next
/// step boundary.
pub fn run_solver_with_channel(
    plan: TeamPlan,
    config: SolverConfig,
    terminate: Option<Arc<AtomicBool>>,
    sender: mpsc::UnboundedSender<(TeamPlan, HardSoftScore)>,
) -> Result<SolveOutcome<TeamPlan>> {
    let mut solver =
        Solver::new(config).with_listener(Arc::new(ChannelEventListener::new(sender)));
    if let Some(flag) = terminate {
        solver = solver.with_terminate_flag(flag);
    }
    solver.solve(plan)
}
