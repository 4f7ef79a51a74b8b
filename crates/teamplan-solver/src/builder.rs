//! Builder module for constructing solver components from configuration
//!
//! This module provides the wiring between configuration types and
//! the actual solver implementation.

use teamplan_config::{AcceptorConfig, ConstraintsConfig, SolverConfig};
use teamplan_core::{HardSoftScore, TeamPlan};
use teamplan_scoring::{team_constraints, ConstraintKind, ConstraintSet, ConstraintWeightOverrides};

use crate::heuristic::{MoveSelector, PlanMove};
use crate::phase::localsearch::{
    AcceptedCountForager, Acceptor, HillClimbingAcceptor, LocalSearchPhase,
    SimulatedAnnealingAcceptor, TabuSearchAcceptor,
};

/// Acceptor chosen by configuration.
pub type ConfiguredAcceptor = Box<dyn Acceptor<TeamPlan, PlanMove>>;

/// Builder for constructing acceptors from configuration.
pub struct AcceptorBuilder;

impl AcceptorBuilder {
    /// Builds an acceptor from configuration.
    ///
    /// `seed` drives the acceptor's own randomness, if it has any.
    pub fn build(config: &AcceptorConfig, seed: Option<u64>) -> ConfiguredAcceptor {
        match config {
            AcceptorConfig::HillClimbing(_) => Box::new(HillClimbingAcceptor::new()),

            AcceptorConfig::SimulatedAnnealing(sa_config) => {
                let acceptor = SimulatedAnnealingAcceptor::new(
                    sa_config.starting_temperature(),
                    sa_config.decay_rate(),
                    sa_config.hard_level_weight(),
                );
                match seed {
                    Some(seed) => Box::new(acceptor.with_seed(acceptor_seed(seed))),
                    None => Box::new(acceptor),
                }
            }

            AcceptorConfig::TabuSearch(tabu_config) => {
                if tabu_config.aspiration() {
                    Box::new(TabuSearchAcceptor::<TeamPlan>::new(tabu_config.tabu_size()))
                } else {
                    Box::new(TabuSearchAcceptor::<TeamPlan>::without_aspiration(
                        tabu_config.tabu_size(),
                    ))
                }
            }
        }
    }
}

/// Seed for an acceptor's own rng, kept apart from the move sampler that
/// is seeded with `seed` itself.
pub(crate) fn acceptor_seed(seed: u64) -> u64 {
    seed.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Builder for the local search phase.
pub struct LocalSearchBuilder;

impl LocalSearchBuilder {
    pub fn build(config: &SolverConfig, seed: Option<u64>) -> LocalSearchPhase<ConfiguredAcceptor> {
        let local_search = &config.local_search;
        LocalSearchPhase::new(
            MoveSelector::from_config(&local_search.move_selector),
            AcceptorBuilder::build(&local_search.acceptor, seed),
        )
        .with_hard_tolerance(local_search.acceptor.hard_tolerance())
        .with_forager(
            local_search
                .forager
                .accepted_count_limit
                .map_or_else(AcceptedCountForager::unbounded, AcceptedCountForager::new),
        )
        .with_environment_mode(config.environment_mode)
    }
}

/// Builder for the constraint set.
pub struct ConstraintBuilder;

impl ConstraintBuilder {
    /// Enabled constraint kinds, in evaluation order.
    pub fn kinds(config: &ConstraintsConfig) -> Vec<ConstraintKind> {
        config
            .enabled_keys()
            .into_iter()
            .filter_map(ConstraintKind::from_key)
            .collect()
    }

    /// Builds the enabled constraints, scaling each default weight by its
    /// configured multiplier.
    pub fn build(config: &ConstraintsConfig) -> ConstraintSet<TeamPlan, HardSoftScore> {
        let kinds = Self::kinds(config);
        let overrides = ConstraintWeightOverrides::scaled(&kinds, |kind| config.weight(kind.key()));
        team_constraints(&kinds, &overrides)
    }
}
