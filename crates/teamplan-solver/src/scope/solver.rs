//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use teamplan_core::PlanningSolution;
use teamplan_scoring::ScoreDirector;
use tracing::debug;

use super::BestSolutionTracker;
use crate::event::SolverEventSupport;
use crate::stats::SolverStats;

/// State shared by every phase of one solve run.
///
/// Owns the score director (and through it the live solution), the best
/// solution tracker, the random number generator and the statistics.
pub struct SolverScope<S: PlanningSolution, D: ScoreDirector<S>> {
    score_director: D,
    tracker: BestSolutionTracker<S>,
    rng: ChaCha8Rng,
    start_time: Option<Instant>,
    total_step_count: u64,
    stats: SolverStats,
    events: SolverEventSupport<S>,
    terminate_early_flag: Option<Arc<AtomicBool>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> SolverScope<S, D> {
    /// Creates a scope seeded from the operating system.
    pub fn new(score_director: D) -> Self {
        Self::with_rng(score_director, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(score_director: D, seed: u64) -> Self {
        Self::with_rng(score_director, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(score_director: D, rng: ChaCha8Rng) -> Self {
        Self {
            score_director,
            tracker: BestSolutionTracker::new(),
            rng,
            start_time: None,
            total_step_count: 0,
            stats: SolverStats::default(),
            events: SolverEventSupport::new(),
            terminate_early_flag: None,
        }
    }

    pub fn with_events(mut self, events: SolverEventSupport<S>) -> Self {
        self.events = events;
        self
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
        self.stats.start();
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    pub fn working_solution(&self) -> &S {
        self.score_director.working_solution()
    }

    /// Borrows the live solution and the rng together, for move selection.
    pub fn working_solution_and_rng(&mut self) -> (&S, &mut ChaCha8Rng) {
        (self.score_director.working_solution(), &mut self.rng)
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.score_director.calculate_score()
    }

    pub fn tracker(&self) -> &BestSolutionTracker<S> {
        &self.tracker
    }

    pub fn best_solution(&self) -> Option<&S> {
        self.tracker.best_solution()
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.tracker.best_score()
    }

    /// Offers the live solution to the tracker.
    ///
    /// The first call records the seed solution; later calls replace it
    /// only with a strictly better score. Returns true on a new best.
    pub fn update_best_solution(&mut self) -> bool {
        let score = self.calculate_score();
        let step = self.total_step_count;
        let elapsed = self.elapsed().unwrap_or_default();
        let director = &self.score_director;
        let improved = self
            .tracker
            .offer(step, elapsed, score, || director.clone_working_solution());
        if improved {
            self.stats.record_improvement();
            debug!(event = "new_best", step = step, score = %score);
            if let Some((best, best_score)) = self.tracker.current() {
                self.events.fire_best_solution_changed(best, best_score);
            }
        }
        improved
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.stats.record_step();
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Steps taken since the best score last improved.
    pub fn unimproved_step_count(&self) -> u64 {
        self.total_step_count
            .saturating_sub(self.tracker.last_improvement_step())
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SolverStats {
        &mut self.stats
    }

    pub fn events(&self) -> &SolverEventSupport<S> {
        &self.events
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Ends the run, returning the tracker, the statistics and the director.
    pub fn finish(mut self) -> (BestSolutionTracker<S>, SolverStats, D) {
        self.stats.score_calculations = self.score_director.score_calculation_count();
        self.stats.stop();
        (self.tracker, self.stats, self.score_director)
    }
}
