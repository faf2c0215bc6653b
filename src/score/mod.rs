//! Episode scoring.
//!
//! The reward is affine in its components, so any two episodes that
//! differ only by one extra failed action differ by exactly
//! `failure_consequence` in score (with everything else equal):
//!
//! ```text
//! score = success_base                      (Success only)
//!       + efficiency_bonus × steps_left     (Success only)
//!       − observation_cost − execution_cost
//!       − failure_consequence × failed_action_count
//! ```
//!
//! `score` is well-defined mid-episode too (cost and penalty terms only),
//! which supports partial-credit setups that score after every action.

use serde::{Deserialize, Serialize};

use crate::core::Outcome;
use crate::episode::Episode;

/// The score, term by term.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Base reward; nonzero only at Success.
    pub base: f64,
    /// Unused-budget bonus; nonzero only at Success.
    pub efficiency_bonus: f64,
    /// Accumulated Observation-phase cost.
    pub observation_cost: f64,
    /// Accumulated Execution-phase cost.
    pub execution_cost: f64,
    /// Penalty for recorded failed actions.
    pub failure_penalty: f64,
}

impl ScoreBreakdown {
    /// Sum the terms into the final score.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.base + self.efficiency_bonus
            - self.observation_cost
            - self.execution_cost
            - self.failure_penalty
    }
}

/// Compute the term-by-term score of an episode.
#[must_use]
pub fn breakdown(episode: &Episode) -> ScoreBreakdown {
    let config = episode.config();
    let succeeded = episode.outcome() == Some(Outcome::Success);

    ScoreBreakdown {
        base: if succeeded { config.success_base } else { 0.0 },
        efficiency_bonus: if succeeded {
            config.efficiency_bonus * f64::from(episode.steps_remaining())
        } else {
            0.0
        },
        observation_cost: episode.observation_cost(),
        execution_cost: episode.execution_cost(),
        failure_penalty: config.failure_consequence * episode.failed_actions().len() as f64,
    }
}

/// Final (or running) score of an episode.
#[must_use]
pub fn score(episode: &Episode) -> f64 {
    breakdown(episode).total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, EpisodeConfig};
    use crate::episode::Episode;
    use crate::system::{RoomId, RoomSystem};

    fn linear_3() -> RoomSystem {
        RoomSystem::builder()
            .room(RoomId::new(0))
            .room(RoomId::new(1))
            .room(RoomId::new(2))
            .edge(RoomId::new(0), RoomId::new(1))
            .edge(RoomId::new(1), RoomId::new(2))
            .start(RoomId::new(0))
            .exit(RoomId::new(2))
            .build()
            .unwrap()
    }

    fn run_to_success(config: EpisodeConfig) -> Episode {
        let mut episode = Episode::new(linear_3(), config);
        episode.apply(Action::Commit).unwrap();
        episode.apply(Action::Move(RoomId::new(1))).unwrap();
        episode.apply(Action::Move(RoomId::new(2))).unwrap();
        assert!(episode.is_terminal());
        episode
    }

    #[test]
    fn test_success_terms() {
        let episode = run_to_success(EpisodeConfig::default());
        let terms = breakdown(&episode);

        assert_eq!(terms.base, 100.0);
        assert_eq!(terms.efficiency_bonus, 28.0);
        assert_eq!(terms.observation_cost, 0.0);
        assert_eq!(terms.execution_cost, 2.0);
        assert_eq!(terms.failure_penalty, 0.0);
        assert_eq!(terms.total(), 126.0);
        assert_eq!(score(&episode), 126.0);
    }

    #[test]
    fn test_no_success_terms_when_exhausted() {
        let config = EpisodeConfig::new().with_actions_remaining(1);
        let mut episode = Episode::new(linear_3(), config);
        episode.apply(Action::Commit).unwrap();
        episode.apply(Action::Inspect).unwrap();

        let terms = breakdown(&episode);
        assert_eq!(terms.base, 0.0);
        assert_eq!(terms.efficiency_bonus, 0.0);
        assert_eq!(score(&episode), -1.0);
    }

    #[test]
    fn test_failure_monotonicity() {
        let config = EpisodeConfig::new().with_failure_consequence(2.0);

        let clean = run_to_success(config.clone());

        // Same run plus one failed observation action.
        let mut flawed = Episode::new(linear_3(), config);
        flawed.apply(Action::GetKey).unwrap();
        flawed.apply(Action::Commit).unwrap();
        flawed.apply(Action::Move(RoomId::new(1))).unwrap();
        flawed.apply(Action::Move(RoomId::new(2))).unwrap();

        assert_eq!(score(&flawed), score(&clean) - 2.0);
    }

    #[test]
    fn test_partial_score_mid_episode() {
        let mut episode = Episode::new(linear_3(), EpisodeConfig::default());
        episode.apply(Action::Move(RoomId::new(1))).unwrap();
        assert!(!episode.is_terminal());
        assert_eq!(score(&episode), -3.0);
    }
}
