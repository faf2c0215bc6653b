//! Room identity and attributes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Upper bound on rooms per system, fixed by the 100-bit encoding.
pub const MAX_ROOMS: usize = 8;

/// Identifier of a room within its system (0..8).
///
/// Keys are identified by the room they were found in, so `RoomId` doubles
/// as a key id.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoomId(pub u8);

impl RoomId {
    /// Create a new room ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Raw ID as a usize index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Room({})", self.0)
    }
}

/// Ground-truth attributes of one room.
///
/// At most one key per room; a taken key never respawns (the episode
/// tracks remaining keys in its own ledger, this struct never mutates
/// after the system is built).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// This room's identity.
    pub id: RoomId,
    /// Adjacent room ids, sorted. With at most 8 rooms a neighbor list
    /// never exceeds 7 entries.
    pub neighbors: SmallVec<[RoomId; 4]>,
    /// Entering this room requires spending a key (execution phase only).
    pub locked: bool,
    /// A key lies in this room.
    pub has_key: bool,
    /// This room is the exit.
    pub is_exit: bool,
}

impl Room {
    /// Create an unlocked, keyless, non-exit room with no neighbors.
    #[must_use]
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            neighbors: SmallVec::new(),
            locked: false,
            has_key: false,
            is_exit: false,
        }
    }

    /// Whether `other` is adjacent to this room.
    #[must_use]
    pub fn is_adjacent(&self, other: RoomId) -> bool {
        self.neighbors.contains(&other)
    }
}
