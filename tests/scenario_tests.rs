//! End-to-end episode scenarios.
//!
//! Each test drives a full episode through the public surface only:
//! build or decode a system, play it action by action, then score it.

use rooms_bench::{
    breakdown, new_episode, score, Action, EngineError, EpisodeConfig, FailureNotice,
    FailureReason, Outcome, Phase, RoomId, RoomSystem,
};

fn linear(rooms: u8) -> RoomSystem {
    let mut builder = RoomSystem::builder();
    for id in 0..rooms {
        builder = builder.room(RoomId::new(id));
    }
    for id in 1..rooms {
        builder = builder.edge(RoomId::new(id - 1), RoomId::new(id));
    }
    builder
        .start(RoomId::new(0))
        .exit(RoomId::new(rooms - 1))
        .build()
        .unwrap()
}

fn locked_exit_3() -> RoomSystem {
    RoomSystem::builder()
        .room(RoomId::new(0))
        .room(RoomId::new(1))
        .room(RoomId::new(2))
        .edge(RoomId::new(0), RoomId::new(1))
        .edge(RoomId::new(1), RoomId::new(2))
        .lock(RoomId::new(2))
        .key(RoomId::new(1))
        .start(RoomId::new(0))
        .exit(RoomId::new(2))
        .build()
        .unwrap()
}

/// Observe the whole corridor, commit, walk it. Two weighted observation
/// moves plus two execution steps against the default config.
#[test]
fn test_observe_then_walk_linear_corridor() {
    let mut episode = new_episode(linear(3), EpisodeConfig::default());

    // Observation: walk to the far end, learning each room on the way.
    episode.apply(Action::Move(RoomId::new(1))).unwrap();
    let delta = episode.apply(Action::Move(RoomId::new(2))).unwrap();
    let (_, snapshot) = delta.revealed.unwrap();
    assert!(snapshot.is_exit);
    assert!(!episode.is_terminal(), "observation never terminates");

    // Commit returns the agent to the start.
    let delta = episode.apply(Action::Commit).unwrap();
    assert_eq!(delta.phase, Phase::Execution);
    assert_eq!(delta.current_room, RoomId::new(0));

    episode.apply(Action::Move(RoomId::new(1))).unwrap();
    let delta = episode.apply(Action::Move(RoomId::new(2))).unwrap();
    assert_eq!(delta.outcome, Some(Outcome::Success));

    let terms = breakdown(&episode);
    assert_eq!(terms.base, 100.0);
    assert_eq!(terms.efficiency_bonus, 28.0);
    assert_eq!(terms.observation_cost, 6.0);
    assert_eq!(terms.execution_cost, 2.0);
    assert_eq!(score(&episode), 120.0);
}

/// USEKEY is observation-illegal; the same plan works after COMMIT.
#[test]
fn test_key_workflow_across_phases() {
    let mut episode = new_episode(locked_exit_3(), EpisodeConfig::default());

    episode.apply(Action::Move(RoomId::new(1))).unwrap();
    let delta = episode.apply(Action::UseKey(RoomId::new(2))).unwrap();
    assert_eq!(
        delta.failure,
        Some(FailureNotice::Reason(FailureReason::PhaseMismatch))
    );
    assert_eq!(episode.failed_actions().len(), 1);
    // The rejected action cost nothing.
    assert_eq!(episode.observation_cost(), 3.0);

    episode.apply(Action::Commit).unwrap();
    episode.apply(Action::Move(RoomId::new(1))).unwrap();
    episode.apply(Action::GetKey).unwrap();
    let delta = episode.apply(Action::UseKey(RoomId::new(2))).unwrap();
    assert!(!delta.failed());
    assert_eq!(delta.keys_held, 0);

    let delta = episode.apply(Action::Move(RoomId::new(2))).unwrap();
    assert_eq!(delta.outcome, Some(Outcome::Success));
    assert_eq!(episode.steps_used_execution(), 4);
}

/// A budget too small for the corridor ends in Exhausted; the score is
/// the pure execution cost, negated.
#[test]
fn test_budget_exhaustion_scores_negative() {
    let config = EpisodeConfig::new().with_actions_remaining(2);
    let mut episode = new_episode(linear(4), config);

    episode.apply(Action::Commit).unwrap();
    episode.apply(Action::Move(RoomId::new(1))).unwrap();
    let delta = episode.apply(Action::Move(RoomId::new(2))).unwrap();
    assert_eq!(delta.outcome, Some(Outcome::Exhausted));
    assert_eq!(delta.steps_remaining, 0);

    assert_eq!(score(&episode), -2.0);

    // The episode is frozen afterwards.
    let result = episode.apply(Action::Move(RoomId::new(3)));
    assert!(matches!(
        result,
        Err(EngineError::EpisodeClosed {
            outcome: Outcome::Exhausted
        })
    ));
}

/// commit_reset wipes knowledge at COMMIT but keeps the agent's keys.
#[test]
fn test_commit_reset_wipes_knowledge_only() {
    let config = EpisodeConfig::new().with_commit_reset(true);
    let mut episode = new_episode(locked_exit_3(), config);

    episode.apply(Action::Move(RoomId::new(1))).unwrap();
    episode.apply(Action::Move(RoomId::new(2))).unwrap();
    assert_eq!(episode.known_count(), 2);

    episode.apply(Action::Commit).unwrap();
    assert_eq!(episode.known_count(), 0);

    // Blind but replayable: the ground truth did not move.
    episode.apply(Action::Move(RoomId::new(1))).unwrap();
    episode.apply(Action::GetKey).unwrap();
    episode.apply(Action::UseKey(RoomId::new(2))).unwrap();
    let delta = episode.apply(Action::Move(RoomId::new(2))).unwrap();
    assert_eq!(delta.outcome, Some(Outcome::Success));
}

/// failure_consequence prices every recorded failure, shown or hidden.
#[test]
fn test_hidden_failures_still_cost() {
    let config = EpisodeConfig::new()
        .with_failure_show(false)
        .with_failure_consequence(5.0);
    let mut episode = new_episode(linear(3), config);

    let delta = episode.apply(Action::GetKey).unwrap();
    assert_eq!(delta.failure, Some(FailureNotice::NoEffect));

    episode.apply(Action::Commit).unwrap();
    episode.apply(Action::Move(RoomId::new(1))).unwrap();
    episode.apply(Action::Move(RoomId::new(2))).unwrap();

    let terms = breakdown(&episode);
    assert_eq!(terms.failure_penalty, 5.0);
    assert_eq!(score(&episode), 100.0 + 28.0 - 2.0 - 5.0);
}

/// A failure_limit converts repeated mistakes into a terminal Failure.
#[test]
fn test_failure_limit_terminates() {
    let config = EpisodeConfig::new().with_failure_limit(3);
    let mut episode = new_episode(linear(3), config);

    episode.apply(Action::GetKey).unwrap();
    episode.apply(Action::GetKey).unwrap();
    let delta = episode.apply(Action::GetKey).unwrap();
    assert_eq!(delta.outcome, Some(Outcome::Failure));

    // No success terms, no execution cost; only the penalty-free zeros.
    assert_eq!(score(&episode), 0.0);
}

/// Committing without observing anything is legal; the agent just plays
/// blind.
#[test]
fn test_blind_commit() {
    let mut episode = new_episode(linear(3), EpisodeConfig::default());

    episode.apply(Action::Commit).unwrap();
    assert_eq!(episode.known_count(), 0);
    assert_eq!(episode.observation_cost(), 0.0);

    episode.apply(Action::Move(RoomId::new(1))).unwrap();
    let delta = episode.apply(Action::Move(RoomId::new(2))).unwrap();
    assert_eq!(delta.outcome, Some(Outcome::Success));
    assert_eq!(score(&episode), 126.0);
}
