//! Action representation and the failed-action ledger.
//!
//! The action set is fixed (five kinds); MOVE and USEKEY carry a target
//! room. Whether an action is legal depends on the current phase, which the
//! episode state machine resolves — the types here just name the intent.
//!
//! Invalid actions are never surfaced as errors. They become `FailedAction`
//! entries, retained for scoring and transparency regardless of whether the
//! acting agent is told the reason (`EpisodeConfig::failure_show`).

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::system::RoomId;

/// A complete agent action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move to an adjacent room.
    Move(RoomId),
    /// Reveal the current room's neighbors, lock state, key presence and
    /// exit flag.
    Inspect,
    /// Take the key in the current room (Execution only).
    GetKey,
    /// Spend one held key to unlock an adjacent locked room
    /// (Execution only).
    UseKey(RoomId),
    /// End Observation and start Execution. One-way.
    Commit,
}

impl Action {
    /// Target room, for the two targeted action kinds.
    #[must_use]
    pub fn target(self) -> Option<RoomId> {
        match self {
            Action::Move(room) | Action::UseKey(room) => Some(room),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Move(room) => write!(f, "move({room})"),
            Action::Inspect => write!(f, "inspect"),
            Action::GetKey => write!(f, "getkey"),
            Action::UseKey(room) => write!(f, "usekey({room})"),
            Action::Commit => write!(f, "commit"),
        }
    }
}

/// Why an action was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// MOVE/USEKEY target is not adjacent to the current room.
    NotAdjacent,
    /// MOVE target is locked (Execution only; locks are inert while
    /// observing).
    LockedDestination,
    /// GETKEY/USEKEY submitted during Observation.
    PhaseMismatch,
    /// GETKEY with no key in the current room.
    NoKeyHere,
    /// USEKEY with an empty inventory.
    NoKeyHeld,
    /// USEKEY on a room that is not locked.
    NotLocked,
    /// COMMIT after the phase already flipped.
    AlreadyCommitted,
}

impl FailureReason {
    /// Short human-readable description (driver/transport facing).
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            FailureReason::NotAdjacent => "target room is not adjacent",
            FailureReason::LockedDestination => "target room is locked",
            FailureReason::PhaseMismatch => "action not allowed in the observation phase",
            FailureReason::NoKeyHere => "no key in this room",
            FailureReason::NoKeyHeld => "no key held",
            FailureReason::NotLocked => "target room is not locked",
            FailureReason::AlreadyCommitted => "already committed",
        }
    }
}

/// A recorded invalid action.
///
/// Every rejection lands here, in submission order, even when the agent is
/// only shown a generic "no effect" response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedAction {
    /// The rejected action.
    pub action: Action,
    /// Why it was rejected.
    pub reason: FailureReason,
    /// Phase it was submitted in.
    pub phase: Phase,
    /// Execution steps already used when it was submitted (0 while
    /// observing).
    pub step: u32,
}
