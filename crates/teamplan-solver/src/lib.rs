//! TeamPlan Solver Engine
//!
//! This crate provides the search engine for team plans:
//! - Moves and move selection
//! - Phases (construction heuristic, local search)
//! - Acceptors (hill climbing, simulated annealing, tabu search)
//! - Termination conditions
//! - Best solution tracking and statistics
//! - Event system for monitoring
//! - Configuration wiring (builder module)
//! - The solver, with parallel independent searches

pub mod basic;
pub mod builder;
pub mod event;
pub mod heuristic;
pub mod parallel;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod termination;

#[cfg(test)]
mod test_utils;

pub use basic::{run_solver, run_solver_with_channel};
pub use builder::{AcceptorBuilder, ConfiguredAcceptor, ConstraintBuilder, LocalSearchBuilder};
pub use event::{
    ChannelEventListener, CountingEventListener, LoggingEventListener, SolverEventListener,
    SolverEventSupport,
};
pub use heuristic::{MoveSelector, PlanField, PlanMove, TabuAttribute, TabuAttributes, TabuMove};
pub use parallel::merge_outcomes;
pub use phase::localsearch::{
    AcceptedCountForager, Acceptor, HillClimbingAcceptor, LocalSearchForager, LocalSearchPhase,
    SimulatedAnnealingAcceptor, TabuSearchAcceptor,
};
pub use phase::{ConstructionHeuristicPhase, Phase};
pub use scope::{BestSolutionTracker, ScoreImprovement, SolverScope};
pub use solver::{SolveOutcome, Solver, SolverState, StagnationWarning};
pub use stats::SolverStats;
pub use termination::{
    BestScoreTermination, ConfiguredTermination, ExternalTermination, OrTermination,
    StepCountTermination, Termination, TerminationBuilder, TimeTermination,
    UnimprovedStepCountTermination,
};
