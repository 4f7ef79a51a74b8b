//! Builds the termination from configuration.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use teamplan_config::TerminationConfig;
use teamplan_core::{ParseableScore, Result, TeamPlanError};

use super::{
    BestScoreTermination, ExternalTermination, OrTermination, StepCountTermination,
    TimeTermination, UnimprovedStepCountTermination,
};

/// Every configurable condition, OR-ed together.
pub type ConfiguredTermination<Sc> = OrTermination<(
    Option<TimeTermination>,
    Option<StepCountTermination>,
    Option<UnimprovedStepCountTermination>,
    Option<BestScoreTermination<Sc>>,
    ExternalTermination,
)>;

pub struct TerminationBuilder;

impl TerminationBuilder {
    /// Builds the termination for a run.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when neither a time limit, a step
    /// limit nor an unimproved step limit is configured, or when the best
    /// score limit cannot be parsed.
    pub fn build<Sc: ParseableScore>(
        config: Option<&TerminationConfig>,
        flag: Arc<AtomicBool>,
    ) -> Result<ConfiguredTermination<Sc>> {
        let config = config.filter(|c| c.has_stopping_limit()).ok_or_else(|| {
            TeamPlanError::configuration(
                "no termination configured: set a time limit, step_count_limit or \
                 unimproved_step_count_limit",
            )
        })?;

        let best_score = config
            .best_score_limit
            .as_deref()
            .map(|limit| {
                Sc::parse(limit)
                    .map(BestScoreTermination::new)
                    .map_err(|e| TeamPlanError::configuration(e.to_string()))
            })
            .transpose()?;

        Ok(OrTermination::new((
            config.time_limit().map(TimeTermination::new),
            config.step_count_limit.map(StepCountTermination::new),
            config
                .unimproved_step_count_limit
                .map(UnimprovedStepCountTermination::new),
            best_score,
            ExternalTermination::new(flag),
        )))
    }
}
