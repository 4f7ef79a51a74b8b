//! Simulated annealing acceptor.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use teamplan_core::{PlanningSolution, Score};

use super::Acceptor;

/// Accepts worsening moves with a probability that shrinks as the
/// temperature cools.
///
/// A score difference is collapsed to one number, one hard unit counting
/// as `hard_level_weight` soft units. A worsening move of `delta` is
/// accepted with probability `exp(delta / temperature)`; the temperature
/// is multiplied by `decay_rate` after every step.
///
/// # Example
///
/// ```
/// use teamplan_solver::phase::localsearch::SimulatedAnnealingAcceptor;
///
/// let acceptor = SimulatedAnnealingAcceptor::new(2.0, 0.999, 1000.0).with_seed(7);
/// assert_eq!(acceptor.temperature(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    decay_rate: f64,
    hard_level_weight: f64,
    rng: ChaCha8Rng,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(starting_temperature: f64, decay_rate: f64, hard_level_weight: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
            hard_level_weight,
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Makes acceptance decisions reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn temperature(&self) -> f64 {
        self.current_temperature
    }

    /// Probability of accepting a move that changes the score by `delta`.
    pub fn acceptance_probability<Sc: Score>(&self, delta: Sc) -> f64 {
        let delta = delta.to_scalar(self.hard_level_weight);
        if delta >= 0.0 {
            1.0
        } else if self.current_temperature <= 0.0 {
            0.0
        } else {
            (delta / self.current_temperature).exp()
        }
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(2.0, 0.999, 1_000.0)
    }
}

impl<S: PlanningSolution, M> Acceptor<S, M> for SimulatedAnnealingAcceptor {
    fn is_accepted(&mut self, last_step_score: &S::Score, move_score: &S::Score, _: &M) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        let probability = self.acceptance_probability(*move_score - *last_step_score);
        probability > 0.0 && self.rng.random::<f64>() < probability
    }

    fn phase_started(&mut self, _initial_score: &S::Score) {
        self.current_temperature = self.starting_temperature;
    }

    fn step_ended(&mut self, _step_score: &S::Score, _step_move: Option<&M>) {
        self.current_temperature *= self.decay_rate;
    }
}
