//! Per-action observation deltas.
//!
//! Each applied action returns an `ObservationDelta`: what the acting
//! agent is allowed to learn from that one step. Ground truth never leaves
//! the engine; only knowledge snapshots do.

use serde::{Deserialize, Serialize};

use crate::core::{FailureReason, Outcome, Phase};
use crate::system::RoomId;

use super::knowledge::KnowledgeSnapshot;

/// What the agent is told about a rejected action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureNotice {
    /// The concrete reason (`failure_show = true`).
    Reason(FailureReason),
    /// Generic "nothing happened" (`failure_show = false`). The reason is
    /// still recorded engine-side either way.
    NoEffect,
}

/// The observable result of one applied action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationDelta {
    /// Phase after the action.
    pub phase: Phase,
    /// Where the agent now stands.
    pub current_room: RoomId,
    /// Knowledge gained by this action (MOVE auto-inspect while
    /// observing, or an explicit INSPECT).
    pub revealed: Option<(RoomId, KnowledgeSnapshot)>,
    /// Keys currently held.
    pub keys_held: usize,
    /// Execution steps left in the budget.
    pub steps_remaining: u32,
    /// Set when the action was rejected.
    pub failure: Option<FailureNotice>,
    /// Set when this action terminated the episode.
    pub outcome: Option<Outcome>,
}

impl ObservationDelta {
    /// Whether the action was rejected.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }
}
