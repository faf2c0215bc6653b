//! Episode phases and terminal outcomes.
//!
//! Every episode runs Observation first, then Execution. COMMIT is the only
//! transition between the two, and there is no reverse transition.

use serde::{Deserialize, Serialize};

/// The two live phases of an episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Exploratory phase: movement auto-reveals rooms, locks are inert,
    /// keys cannot be taken or spent.
    Observation,
    /// Goal-directed phase with a bounded action budget and the full
    /// action set, played from knowledge retained at COMMIT.
    Execution,
}

impl Phase {
    /// True once COMMIT has been applied.
    #[must_use]
    pub fn is_committed(self) -> bool {
        matches!(self, Phase::Execution)
    }
}

/// How a finished episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The agent reached the (unlocked) exit room within budget.
    Success,
    /// A configured hard failure condition fired (see
    /// `EpisodeConfig::failure_limit`).
    Failure,
    /// The execution budget ran out before the exit was reached.
    Exhausted,
}
