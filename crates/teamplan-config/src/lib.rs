//! Configuration system for TeamPlan.
//!
//! Load solver configuration from TOML or YAML to control termination,
//! construction, local search and the active constraints without code
//! changes.
//!
//! # Examples
//!
//! ```
//! use teamplan_config::{AcceptorConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 42
//!
//!     [termination]
//!     seconds_spent_limit = 5
//!     unimproved_step_count_limit = 500
//!
//!     [local_search.acceptor]
//!     type = "tabu_search"
//!     tabu_size = 9
//!
//!     [constraints]
//!     focus = true
//!     weights = { capacity = 10 }
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(5)));
//! assert!(matches!(config.local_search.acceptor, AcceptorConfig::TabuSearch(_)));
//! assert!(config.constraints.enabled_keys().contains(&"focus"));
//! config.validate().unwrap();
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use teamplan_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use teamplan_core::{HardSoftScore, ParseableScore};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Constraint keys understood by `[constraints]`.
pub const CONSTRAINT_KEYS: [&str; 7] = [
    "capacity", "profile", "product", "days_off", "deadline", "focus", "priority",
];

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of independent searches run in parallel, each with its own seed.
    #[serde(default = "default_parallel_solver_count")]
    pub parallel_solver_count: usize,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    #[serde(default)]
    pub construction_heuristic: ConstructionHeuristicConfig,

    #[serde(default)]
    pub local_search: LocalSearchConfig,

    #[serde(default)]
    pub constraints: ConstraintsConfig,
}

fn default_parallel_solver_count() -> usize {
    1
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            parallel_solver_count: default_parallel_solver_count(),
            termination: None,
            construction_heuristic: ConstructionHeuristicConfig::default(),
            local_search: LocalSearchConfig::default(),
            constraints: ConstraintsConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the step count limit.
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            step_count_limit: Some(steps),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the limit of consecutive steps without a new best.
    pub fn with_unimproved_step_limit(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            unimproved_step_count_limit: Some(steps),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn with_acceptor(mut self, acceptor: AcceptorConfig) -> Self {
        self.local_search.acceptor = acceptor;
        self
    }

    pub fn with_construction_heuristic(mut self, kind: ConstructionHeuristicType) -> Self {
        self.construction_heuristic.construction_heuristic_type = kind;
        self
    }

    pub fn with_parallel_solver_count(mut self, count: usize) -> Self {
        self.parallel_solver_count = count;
        self
    }

    /// Enables or disables a constraint by key.
    pub fn with_constraint(mut self, key: &str, enabled: bool) -> Self {
        self.constraints.set_enabled(key, enabled);
        self
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Seed for search `index`: the configured seed, offset by the index.
    ///
    /// Non-reproducible mode without a configured seed returns `None`.
    pub fn seed_for(&self, index: usize) -> Option<u64> {
        match (self.random_seed, self.environment_mode) {
            (Some(seed), _) => Some(seed.wrapping_add(index as u64)),
            (None, EnvironmentMode::NonReproducible) => None,
            (None, _) => Some(index as u64),
        }
    }

    /// Checks the configuration for values the solver cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no stopping limit is set, a
    /// best score limit cannot be parsed, or a numeric setting is out of
    /// range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let termination = self
            .termination
            .as_ref()
            .filter(|t| t.has_stopping_limit())
            .ok_or_else(|| {
                ConfigError::Invalid(
                    "at least one of a time limit, step_count_limit or \
                     unimproved_step_count_limit must be configured"
                        .to_string(),
                )
            })?;
        termination.best_score()?;
        termination.checked_time_limit()?;

        if self.parallel_solver_count == 0 {
            return Err(ConfigError::Invalid(
                "parallel_solver_count must be at least 1".to_string(),
            ));
        }
        self.local_search.validate()?;
        self.constraints.validate()
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Seeds from the OS unless a seed is configured.
    NonReproducible,

    /// Deterministic behavior; seed 0 unless configured.
    #[default]
    Reproducible,

    /// Reproducible, and checks that every item stays assigned after each step.
    FastAssert,

    /// Fast assert, plus incremental scores are checked against full recalculation.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_asserted(self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }

    pub fn is_fully_asserted(self) -> bool {
        self == EnvironmentMode::FullAssert
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the other time limits.
    pub millis_spent_limit: Option<u64>,

    /// Target best score to achieve (as string, e.g., "0hard/0soft").
    pub best_score_limit: Option<String>,

    /// Maximum number of steps.
    pub step_count_limit: Option<u64>,

    /// Maximum consecutive steps without a new best score.
    pub unimproved_step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    ///
    /// Saturates at `u64::MAX` milliseconds; [`Self::checked_time_limit`]
    /// reports the overflow instead.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .millis_spent_limit
            .unwrap_or(0)
            .saturating_add(self.seconds_spent_limit.unwrap_or(0).saturating_mul(1_000))
            .saturating_add(self.minutes_spent_limit.unwrap_or(0).saturating_mul(60_000));
        (millis > 0).then(|| Duration::from_millis(millis))
    }

    /// Returns the time limit, failing when the summed limits overflow
    /// `u64` milliseconds.
    pub fn checked_time_limit(&self) -> Result<Option<Duration>, ConfigError> {
        let overflow = || {
            ConfigError::Invalid(
                "time limit does not fit in u64 milliseconds".to_string(),
            )
        };
        let seconds = self
            .seconds_spent_limit
            .unwrap_or(0)
            .checked_mul(1_000)
            .ok_or_else(overflow)?;
        let minutes = self
            .minutes_spent_limit
            .unwrap_or(0)
            .checked_mul(60_000)
            .ok_or_else(overflow)?;
        let millis = self
            .millis_spent_limit
            .unwrap_or(0)
            .checked_add(seconds)
            .and_then(|m| m.checked_add(minutes))
            .ok_or_else(overflow)?;
        Ok((millis > 0).then(|| Duration::from_millis(millis)))
    }

    /// True if a time, step or unimproved-step limit is set.
    ///
    /// A best score limit alone is not enough: it may never be reached.
    pub fn has_stopping_limit(&self) -> bool {
        self.time_limit().is_some()
            || self.step_count_limit.is_some()
            || self.unimproved_step_count_limit.is_some()
    }

    /// Parses the best score limit, if any.
    pub fn best_score(&self) -> Result<Option<HardSoftScore>, ConfigError> {
        self.best_score_limit
            .as_deref()
            .map(|s| {
                HardSoftScore::parse(s).map_err(|e| ConfigError::Invalid(e.to_string()))
            })
            .transpose()
    }
}

/// Construction heuristic configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstructionHeuristicConfig {
    #[serde(default)]
    pub construction_heuristic_type: ConstructionHeuristicType,
}

/// Construction heuristic types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionHeuristicType {
    /// Fill unassigned fields with the first work day and first team member.
    FirstFit,

    /// Place each item in the (work day, team member) slot with the best score.
    #[default]
    CheapestInsertion,
}

/// Local search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    #[serde(default)]
    pub acceptor: AcceptorConfig,

    #[serde(default)]
    pub move_selector: MoveSelectorConfig,

    #[serde(default)]
    pub forager: ForagerConfig,
}

impl LocalSearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.forager.accepted_count_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "forager.accepted_count_limit must be at least 1".to_string(),
            ));
        }
        if self.move_selector.sample_size == Some(0) {
            return Err(ConfigError::Invalid(
                "move_selector.sample_size must be at least 1".to_string(),
            ));
        }
        if self.move_selector.change_weight() + self.move_selector.swap_weight() == 0 {
            return Err(ConfigError::Invalid(
                "move_selector weights must not all be zero".to_string(),
            ));
        }
        match &self.acceptor {
            AcceptorConfig::SimulatedAnnealing(sa) => {
                let decay = sa.decay_rate();
                if !(decay > 0.0 && decay <= 1.0) {
                    return Err(ConfigError::Invalid(format!(
                        "simulated_annealing.decay_rate must be in (0, 1], got {decay}"
                    )));
                }
                if sa.starting_temperature() < 0.0 {
                    return Err(ConfigError::Invalid(
                        "simulated_annealing.starting_temperature must not be negative"
                            .to_string(),
                    ));
                }
            }
            AcceptorConfig::TabuSearch(tabu) if tabu.tabu_size() == 0 => {
                return Err(ConfigError::Invalid(
                    "tabu_search.tabu_size must be at least 1".to_string(),
                ));
            }
            _ => {}
        }
        if self.acceptor.hard_tolerance().is_some_and(|t| t < 0) {
            return Err(ConfigError::Invalid(
                "hard_tolerance must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Forager configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ForagerConfig {
    /// Stop evaluating a step's sample after this many accepted moves.
    pub accepted_count_limit: Option<usize>,
}

/// Acceptor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Accept moves that do not worsen the last step score.
    HillClimbing(HillClimbingConfig),

    /// Accept worsening moves with a probability that cools down over time.
    SimulatedAnnealing(SimulatedAnnealingConfig),

    /// Forbid undoing recent changes.
    TabuSearch(TabuSearchConfig),
}

impl Default for AcceptorConfig {
    fn default() -> Self {
        AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig::default())
    }
}

impl AcceptorConfig {
    /// How far below the best hard score a candidate may fall.
    pub fn hard_tolerance(&self) -> Option<i64> {
        match self {
            AcceptorConfig::HillClimbing(c) => c.hard_tolerance,
            AcceptorConfig::SimulatedAnnealing(c) => c.hard_tolerance,
            AcceptorConfig::TabuSearch(c) => c.hard_tolerance,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HillClimbingConfig {
    pub hard_tolerance: Option<i64>,
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// Starting temperature, in scalarized score units.
    pub starting_temperature: Option<f64>,

    /// Multiplicative temperature decay per step.
    pub decay_rate: Option<f64>,

    /// Soft units one hard unit is worth when scalarizing a score difference.
    pub hard_level_weight: Option<f64>,

    pub hard_tolerance: Option<i64>,
}

impl SimulatedAnnealingConfig {
    pub const DEFAULT_STARTING_TEMPERATURE: f64 = 2.0;
    pub const DEFAULT_DECAY_RATE: f64 = 0.999;
    pub const DEFAULT_HARD_LEVEL_WEIGHT: f64 = 1_000.0;

    pub fn starting_temperature(&self) -> f64 {
        self.starting_temperature
            .unwrap_or(Self::DEFAULT_STARTING_TEMPERATURE)
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate.unwrap_or(Self::DEFAULT_DECAY_RATE)
    }

    pub fn hard_level_weight(&self) -> f64 {
        self.hard_level_weight
            .unwrap_or(Self::DEFAULT_HARD_LEVEL_WEIGHT)
    }
}

/// Tabu search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TabuSearchConfig {
    /// Number of steps a reverted value stays forbidden.
    pub tabu_size: Option<usize>,

    /// Accept tabu moves that reach a new best score.
    pub aspiration: Option<bool>,

    pub hard_tolerance: Option<i64>,
}

impl TabuSearchConfig {
    pub const DEFAULT_TABU_SIZE: usize = 7;

    pub fn tabu_size(&self) -> usize {
        self.tabu_size.unwrap_or(Self::DEFAULT_TABU_SIZE)
    }

    pub fn aspiration(&self) -> bool {
        self.aspiration.unwrap_or(true)
    }
}

/// Order in which candidate moves are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// Sample moves at random.
    #[default]
    Random,

    /// Walk the move space in a fixed order, resuming where the last step stopped.
    Original,
}

/// Move selector configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MoveSelectorConfig {
    #[serde(default)]
    pub selection_order: SelectionOrder,

    /// Candidate moves evaluated per step.
    pub sample_size: Option<usize>,

    /// Relative weight of reassign moves (work day or team member).
    pub change_weight: Option<u32>,

    /// Relative weight of swap moves.
    pub swap_weight: Option<u32>,
}

impl MoveSelectorConfig {
    pub const DEFAULT_SAMPLE_SIZE: usize = 64;

    pub fn sample_size(&self) -> usize {
        self.sample_size.unwrap_or(Self::DEFAULT_SAMPLE_SIZE)
    }

    pub fn change_weight(&self) -> u32 {
        self.change_weight.unwrap_or(2)
    }

    pub fn swap_weight(&self) -> u32 {
        self.swap_weight.unwrap_or(1)
    }
}

/// Active constraints and their weight multipliers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConstraintsConfig {
    pub capacity: bool,
    pub profile: bool,
    pub product: bool,
    pub days_off: bool,
    pub deadline: bool,
    pub focus: bool,
    pub priority: bool,

    /// Weight multipliers keyed by constraint key.
    pub weights: BTreeMap<String, i64>,
}

impl Default for ConstraintsConfig {
    fn default() -> Self {
        Self {
            capacity: true,
            profile: true,
            product: true,
            days_off: true,
            deadline: false,
            focus: false,
            priority: false,
            weights: BTreeMap::new(),
        }
    }
}

impl ConstraintsConfig {
    /// Keys of the enabled constraints, in [`CONSTRAINT_KEYS`] order.
    pub fn enabled_keys(&self) -> Vec<&'static str> {
        CONSTRAINT_KEYS
            .into_iter()
            .filter(|key| self.is_enabled(key))
            .collect()
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        match key {
            "capacity" => self.capacity,
            "profile" => self.profile,
            "product" => self.product,
            "days_off" => self.days_off,
            "deadline" => self.deadline,
            "focus" => self.focus,
            "priority" => self.priority,
            _ => false,
        }
    }

    /// Enables or disables a constraint; unknown keys are ignored.
    pub fn set_enabled(&mut self, key: &str, enabled: bool) {
        let flag = match key {
            "capacity" => &mut self.capacity,
            "profile" => &mut self.profile,
            "product" => &mut self.product,
            "days_off" => &mut self.days_off,
            "deadline" => &mut self.deadline,
            "focus" => &mut self.focus,
            "priority" => &mut self.priority,
            _ => return,
        };
        *flag = enabled;
    }

    /// Multiplier for a constraint, 1 when not configured.
    pub fn weight(&self, key: &str) -> i64 {
        self.weights.get(key).copied().unwrap_or(1)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, weight) in &self.weights {
            if !CONSTRAINT_KEYS.contains(&key.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "unknown constraint '{}' in [constraints.weights]",
                    key
                )));
            }
            if *weight < 0 {
                return Err(ConfigError::Invalid(format!(
                    "weight of '{}' must not be negative",
                    key
                )));
            }
        }
        Ok(())
    }
}
