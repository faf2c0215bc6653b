//! Agent-side room knowledge.
//!
//! Fog of war is modeled as *absence*: a room the agent has not inspected
//! simply has no entry in the episode's knowledge map. The ground-truth
//! `RoomSystem` carries no visibility flags at all, so it can stay
//! read-only and shared.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::system::RoomId;

/// What the agent knows about one room, as of the moment it was inspected.
///
/// Snapshots reflect the episode's key/lock ledger, not just the static
/// system: after GETKEY a fresh inspection shows no key, and after USEKEY
/// it shows the room unlocked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSnapshot {
    /// Adjacent room ids, sorted.
    pub neighbors: SmallVec<[RoomId; 4]>,
    /// The room was locked when inspected.
    pub locked: bool,
    /// A key was present when inspected.
    pub has_key: bool,
    /// The room is the exit.
    pub is_exit: bool,
}
