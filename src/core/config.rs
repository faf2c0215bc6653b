//! Episode configuration.
//!
//! Drivers tune the benchmark via `EpisodeConfig` rather than by editing
//! the rules. Defaults match the reference benchmark setup: a 30-action
//! execution budget, observation moves three times as expensive as
//! execution steps, failure reasons disclosed, no failure penalty.

use serde::{Deserialize, Serialize};

/// Cost of one execution-phase step (and of an explicit Observation
/// INSPECT). Observation moves are scaled by
/// [`EpisodeConfig::obs_inspect_weight`] instead.
pub const BASE_STEP_COST: f64 = 1.0;

/// Per-episode configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeConfig {
    /// Execution-phase action budget. Every submitted execution action,
    /// valid or not, consumes one unit.
    pub actions_remaining: u32,

    /// Cost of an Observation MOVE (movement plus the bundled
    /// auto-inspect of the destination). An explicit INSPECT costs
    /// [`BASE_STEP_COST`], which is lower under the defaults.
    pub obs_inspect_weight: f64,

    /// Disclose the concrete failure reason to the acting agent. When
    /// false the agent sees a generic "no effect"; the failure is still
    /// recorded either way.
    pub failure_show: bool,

    /// Score penalty per recorded failed action (applied by the scorer,
    /// not charged to running cost).
    pub failure_consequence: f64,

    /// Hard failure threshold: the episode terminates with
    /// `Outcome::Failure` once this many actions have failed. `None`
    /// disables the condition.
    pub failure_limit: Option<u32>,

    /// Clear room knowledge on COMMIT.
    pub commit_reset: bool,

    /// Also drop held keys on COMMIT. Off by default: keys obtained while
    /// observing persist into Execution.
    pub commit_clear_inventory: bool,

    /// Base reward for a successful episode.
    pub success_base: f64,

    /// Bonus per unused execution step at success.
    pub efficiency_bonus: f64,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            actions_remaining: 30,
            obs_inspect_weight: 3.0,
            failure_show: true,
            failure_consequence: 0.0,
            failure_limit: None,
            commit_reset: false,
            commit_clear_inventory: false,
            success_base: 100.0,
            efficiency_bonus: 1.0,
        }
    }
}

impl EpisodeConfig {
    /// Create a configuration with the default benchmark values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution action budget.
    #[must_use]
    pub fn with_actions_remaining(mut self, budget: u32) -> Self {
        self.actions_remaining = budget;
        self
    }

    /// Set the Observation MOVE cost weight.
    #[must_use]
    pub fn with_obs_inspect_weight(mut self, weight: f64) -> Self {
        self.obs_inspect_weight = weight;
        self
    }

    /// Control failure-reason disclosure.
    #[must_use]
    pub fn with_failure_show(mut self, show: bool) -> Self {
        self.failure_show = show;
        self
    }

    /// Set the per-failure score penalty.
    #[must_use]
    pub fn with_failure_consequence(mut self, penalty: f64) -> Self {
        self.failure_consequence = penalty;
        self
    }

    /// Set a hard failure threshold.
    #[must_use]
    pub fn with_failure_limit(mut self, limit: u32) -> Self {
        self.failure_limit = Some(limit);
        self
    }

    /// Clear room knowledge on COMMIT.
    #[must_use]
    pub fn with_commit_reset(mut self, reset: bool) -> Self {
        self.commit_reset = reset;
        self
    }

    /// Drop held keys on COMMIT as well.
    #[must_use]
    pub fn with_commit_clear_inventory(mut self, clear: bool) -> Self {
        self.commit_clear_inventory = clear;
        self
    }

    /// Set the success base reward.
    #[must_use]
    pub fn with_success_base(mut self, base: f64) -> Self {
        self.success_base = base;
        self
    }

    /// Set the per-unused-step efficiency bonus.
    #[must_use]
    pub fn with_efficiency_bonus(mut self, bonus: f64) -> Self {
        self.efficiency_bonus = bonus;
        self
    }
}
