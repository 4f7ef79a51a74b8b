//! Solver statistics.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Counters for one solve run.
///
/// # Example
///
/// ```
/// use teamplan_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.start();
/// stats.record_step();
/// stats.record_move(true);
/// stats.record_move(false);
///
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.moves_evaluated, 2);
/// assert_eq!(stats.moves_accepted, 1);
/// assert_eq!(stats.acceptance_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolverStats {
    #[serde(skip)]
    start_time: Option<Instant>,
    #[serde(skip)]
    end_time: Option<Instant>,
    /// Local search steps, whether or not a move was applied.
    pub step_count: u64,
    /// Items placed by the construction heuristic.
    pub construction_placements: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    /// Steps that applied a move.
    pub moves_applied: u64,
    pub score_calculations: u64,
    pub best_score_improvements: u64,
}

impl SolverStats {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.end_time = None;
    }

    pub fn stop(&mut self) {
        if self.start_time.is_some() {
            self.end_time = Some(Instant::now());
        }
    }

    /// Time spent solving; frozen once [`stop`](Self::stop) is called.
    pub fn elapsed(&self) -> Duration {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end - start,
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    pub fn record_applied_move(&mut self) {
        self.moves_applied += 1;
    }

    pub fn record_placement(&mut self) {
        self.construction_placements += 1;
    }

    pub fn record_improvement(&mut self) {
        self.best_score_improvements += 1;
    }

    pub fn moves_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.moves_evaluated as f64 / secs
        } else {
            0.0
        }
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}
