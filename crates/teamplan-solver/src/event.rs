//! Event system for solver monitoring.
//!
//! Listeners receive solver lifecycle events and every new best solution.
//! All listener methods are called synchronously on the solving thread.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use teamplan_core::{HardSoftScore, TeamPlan};
//! use teamplan_solver::event::{SolverEventListener, SolverEventSupport};
//!
//! #[derive(Debug)]
//! struct PrintListener;
//!
//! impl SolverEventListener<TeamPlan> for PrintListener {
//!     fn on_best_solution_changed(&self, _plan: &TeamPlan, score: &HardSoftScore) {
//!         println!("New best: {score}");
//!     }
//! }
//!
//! let mut support = SolverEventSupport::<TeamPlan>::new();
//! support.add_listener(Arc::new(PrintListener));
//! assert_eq!(support.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use teamplan_core::PlanningSolution;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Listener for solver events.
pub trait SolverEventListener<S: PlanningSolution>: Send + Sync + Debug {
    /// Called when a new best solution is found, including the seed.
    fn on_best_solution_changed(&self, solution: &S, score: &S::Score);

    fn on_solving_started(&self, _solution: &S) {}

    fn on_solving_ended(&self, _solution: &S, _is_terminated_early: bool) {}

    fn on_phase_started(&self, _phase_type: &str) {}

    fn on_phase_ended(&self, _phase_type: &str, _step_count: u64) {}
}

/// Broadcasts events to registered listeners in registration order.
pub struct SolverEventSupport<S: PlanningSolution> {
    listeners: Vec<Arc<dyn SolverEventListener<S>>>,
}

impl<S: PlanningSolution> SolverEventSupport<S> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Arc<dyn SolverEventListener<S>>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn fire_best_solution_changed(&self, solution: &S, score: &S::Score) {
        for listener in &self.listeners {
            listener.on_best_solution_changed(solution, score);
        }
    }

    pub fn fire_solving_started(&self, solution: &S) {
        for listener in &self.listeners {
            listener.on_solving_started(solution);
        }
    }

    pub fn fire_solving_ended(&self, solution: &S, is_terminated_early: bool) {
        for listener in &self.listeners {
            listener.on_solving_ended(solution, is_terminated_early);
        }
    }

    pub fn fire_phase_started(&self, phase_type: &str) {
        for listener in &self.listeners {
            listener.on_phase_started(phase_type);
        }
    }

    pub fn fire_phase_ended(&self, phase_type: &str, step_count: u64) {
        for listener in &self.listeners {
            listener.on_phase_ended(phase_type, step_count);
        }
    }
}

impl<S: PlanningSolution> Default for SolverEventSupport<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Clone for SolverEventSupport<S> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<S: PlanningSolution> Debug for SolverEventSupport<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Logs events through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    prefix: String,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl<S: PlanningSolution> SolverEventListener<S> for LoggingEventListener {
    fn on_best_solution_changed(&self, _solution: &S, score: &S::Score) {
        debug!(event = "best_solution_changed", prefix = %self.prefix, score = %score);
    }

    fn on_solving_started(&self, _solution: &S) {
        info!(event = "solving_started", prefix = %self.prefix);
    }

    fn on_solving_ended(&self, _solution: &S, is_terminated_early: bool) {
        info!(
            event = "solving_ended",
            prefix = %self.prefix,
            terminated_early = is_terminated_early,
        );
    }

    fn on_phase_started(&self, phase_type: &str) {
        debug!(event = "phase_started", prefix = %self.prefix, phase = phase_type);
    }

    fn on_phase_ended(&self, phase_type: &str, step_count: u64) {
        debug!(
            event = "phase_ended",
            prefix = %self.prefix,
            phase = phase_type,
            steps = step_count,
        );
    }
}

/// Streams every new best solution through a tokio channel.
///
/// A closed receiver is ignored; solving carries on.
#[derive(Debug)]
pub struct ChannelEventListener<S: PlanningSolution> {
    sender: mpsc::UnboundedSender<(S, S::Score)>,
}

impl<S: PlanningSolution> ChannelEventListener<S> {
    pub fn new(sender: mpsc::UnboundedSender<(S, S::Score)>) -> Self {
        Self { sender }
    }
}

impl<S> SolverEventListener<S> for ChannelEventListener<S>
where
    S: PlanningSolution + Debug,
{
    fn on_best_solution_changed(&self, solution: &S, score: &S::Score) {
        let _ = self.sender.send((solution.clone(), *score));
    }
}

/// Counts events; handy in tests and for statistics.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    best_solution_count: AtomicUsize,
    solving_started_count: AtomicUsize,
    solving_ended_count: AtomicUsize,
    phase_started_count: AtomicUsize,
    phase_ended_count: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_solution_count(&self) -> usize {
        self.best_solution_count.load(Ordering::SeqCst)
    }

    pub fn solving_started_count(&self) -> usize {
        self.solving_started_count.load(Ordering::SeqCst)
    }

    pub fn solving_ended_count(&self) -> usize {
        self.solving_ended_count.load(Ordering::SeqCst)
    }

    pub fn phase_started_count(&self) -> usize {
        self.phase_started_count.load(Ordering::SeqCst)
    }

    pub fn phase_ended_count(&self) -> usize {
        self.phase_ended_count.load(Ordering::SeqCst)
    }
}

impl<S: PlanningSolution> SolverEventListener<S> for CountingEventListener {
    fn on_best_solution_changed(&self, _solution: &S, _score: &S::Score) {
        self.best_solution_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_started(&self, _solution: &S) {
        self.solving_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_ended(&self, _solution: &S, _is_terminated_early: bool) {
        self.solving_ended_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_phase_started(&self, _phase_type: &str) {
        self.phase_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_phase_ended(&self, _phase_type: &str, _step_count: u64) {
        self.phase_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
