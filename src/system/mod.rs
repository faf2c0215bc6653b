//! Static room-system model.
//!
//! A `RoomSystem` is the immutable ground truth of one puzzle: rooms,
//! undirected connections, locks, keys, start and exit. It is built once
//! (by the generator or the decoder), validated, and never mutated — all
//! per-episode change (keys taken, rooms unlocked, knowledge gained) lives
//! in the episode state, so the authoritative system can be shared freely
//! between concurrent episodes.
//!
//! Locks sit on rooms. `is_locked(from, to)` reports the lock on the
//! destination, which makes the same undirected edge locked in one
//! direction and free in the other: leaving a locked room costs nothing,
//! entering one is gated.

pub mod room;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use room::{Room, RoomId, MAX_ROOMS};

use crate::core::EngineError;

/// Immutable room-system ground truth.
///
/// Read-only accessors only; consumers observe it through an episode's
/// knowledge map, never raw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSystem {
    rooms: FxHashMap<RoomId, Room>,
    start: RoomId,
    exit: RoomId,
}

impl RoomSystem {
    /// Start building a system.
    #[must_use]
    pub fn builder() -> RoomSystemBuilder {
        RoomSystemBuilder::new()
    }

    /// The room the agent starts in (and returns to at COMMIT).
    #[must_use]
    pub fn start_room_id(&self) -> RoomId {
        self.start
    }

    /// The unique exit room.
    #[must_use]
    pub fn exit_room_id(&self) -> RoomId {
        self.exit
    }

    /// Number of rooms in the system.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the system contains a room with this id.
    #[must_use]
    pub fn contains(&self, id: RoomId) -> bool {
        self.rooms.contains_key(&id)
    }

    /// All room ids, ascending.
    #[must_use]
    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<_> = self.rooms.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Full ground truth for one room. Engine-internal and test use only;
    /// the acting agent sees knowledge snapshots instead.
    #[must_use]
    pub fn room_info(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Neighbor ids of a room (empty for unknown ids).
    #[must_use]
    pub fn neighbors(&self, id: RoomId) -> &[RoomId] {
        self.rooms.get(&id).map_or(&[], |room| &room.neighbors)
    }

    /// Lock state of traversing `from → to`: the destination's lock.
    /// Adjacency is not required for the query.
    #[must_use]
    pub fn is_locked(&self, _from: RoomId, to: RoomId) -> bool {
        self.rooms.get(&to).is_some_and(|room| room.locked)
    }

    /// Undirected edge set as ascending `(low, high)` pairs.
    #[must_use]
    pub fn edges(&self) -> Vec<(RoomId, RoomId)> {
        let mut edges = Vec::new();
        for (&id, room) in &self.rooms {
            for &neighbor in &room.neighbors {
                if id < neighbor {
                    edges.push((id, neighbor));
                }
            }
        }
        edges.sort_unstable();
        edges
    }

    /// Number of locked rooms (equals the number of keys by construction).
    #[must_use]
    pub fn lock_count(&self) -> usize {
        self.rooms.values().filter(|room| room.locked).count()
    }
}

/// Validating builder for `RoomSystem`.
///
/// `build` enforces the structural invariants the rest of the engine
/// relies on; see the error messages for the full list.
#[derive(Clone, Debug, Default)]
pub struct RoomSystemBuilder {
    rooms: FxHashMap<RoomId, Room>,
    start: Option<RoomId>,
}

impl RoomSystemBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room with the given id.
    #[must_use]
    pub fn room(mut self, id: RoomId) -> Self {
        self.rooms.entry(id).or_insert_with(|| Room::new(id));
        self
    }

    /// Add an undirected edge. Both endpoints must already exist.
    #[must_use]
    pub fn edge(mut self, a: RoomId, b: RoomId) -> Self {
        if let Some(room) = self.rooms.get_mut(&a) {
            if !room.neighbors.contains(&b) {
                room.neighbors.push(b);
            }
        }
        if let Some(room) = self.rooms.get_mut(&b) {
            if !room.neighbors.contains(&a) {
                room.neighbors.push(a);
            }
        }
        self
    }

    /// Lock a room.
    #[must_use]
    pub fn lock(mut self, id: RoomId) -> Self {
        if let Some(room) = self.rooms.get_mut(&id) {
            room.locked = true;
        }
        self
    }

    /// Place a key in a room.
    #[must_use]
    pub fn key(mut self, id: RoomId) -> Self {
        if let Some(room) = self.rooms.get_mut(&id) {
            room.has_key = true;
        }
        self
    }

    /// Mark the exit room.
    #[must_use]
    pub fn exit(mut self, id: RoomId) -> Self {
        if let Some(room) = self.rooms.get_mut(&id) {
            room.is_exit = true;
        }
        self
    }

    /// Set the start room.
    #[must_use]
    pub fn start(mut self, id: RoomId) -> Self {
        self.start = Some(id);
        self
    }

    /// Validate and build.
    pub fn build(mut self) -> Result<RoomSystem, EngineError> {
        let invalid = |msg: String| EngineError::InvalidSystem(msg);

        if self.rooms.len() < 2 {
            return Err(invalid(format!(
                "need at least 2 rooms, got {}",
                self.rooms.len()
            )));
        }
        for &id in self.rooms.keys() {
            if id.index() >= MAX_ROOMS {
                return Err(invalid(format!("room id {id} out of range 0..{MAX_ROOMS}")));
            }
        }

        let start = self
            .start
            .ok_or_else(|| invalid("no start room set".into()))?;
        let start_room = self
            .rooms
            .get(&start)
            .ok_or_else(|| invalid(format!("start {start} is not a room")))?;
        if start_room.locked {
            return Err(invalid(format!("start {start} must not be locked")));
        }

        let exits: Vec<RoomId> = self
            .rooms
            .values()
            .filter(|room| room.is_exit)
            .map(|room| room.id)
            .collect();
        let exit = match exits.as_slice() {
            [only] => *only,
            _ => {
                return Err(invalid(format!(
                    "expected exactly one exit room, found {}",
                    exits.len()
                )))
            }
        };
        if exit == start {
            return Err(invalid("start and exit must be distinct rooms".into()));
        }

        for room in self.rooms.values() {
            for &neighbor in &room.neighbors {
                if neighbor == room.id {
                    return Err(invalid(format!("{} connects to itself", room.id)));
                }
                let other = self
                    .rooms
                    .get(&neighbor)
                    .ok_or_else(|| invalid(format!("edge to missing room {neighbor}")))?;
                if !other.neighbors.contains(&room.id) {
                    return Err(invalid(format!(
                        "asymmetric connection {} -> {neighbor}",
                        room.id
                    )));
                }
            }
        }

        let locks = self.rooms.values().filter(|room| room.locked).count();
        let keys = self.rooms.values().filter(|room| room.has_key).count();
        if locks != keys {
            return Err(invalid(format!(
                "lock/key mismatch: {locks} lock(s), {keys} key(s)"
            )));
        }

        // Lock-blind connectivity: every room reachable from start.
        let mut seen = vec![start];
        let mut queue = vec![start];
        while let Some(id) = queue.pop() {
            for &neighbor in &self.rooms[&id].neighbors {
                if !seen.contains(&neighbor) {
                    seen.push(neighbor);
                    queue.push(neighbor);
                }
            }
        }
        if seen.len() != self.rooms.len() {
            return Err(invalid(format!(
                "graph is disconnected: {} of {} rooms reachable from {start}",
                seen.len(),
                self.rooms.len()
            )));
        }

        // Canonical neighbor order, so structurally equal systems compare equal.
        for room in self.rooms.values_mut() {
            room.neighbors.sort_unstable();
        }

        Ok(RoomSystem {
            rooms: self.rooms,
            start,
            exit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_build_linear() {
        let system = linear_3();

        assert_eq!(system.room_count(), 3);
        assert_eq!(system.start_room_id(), RoomId::new(0));
        assert_eq!(system.exit_room_id(), RoomId::new(2));
        assert_eq!(system.neighbors(RoomId::new(1)), &[RoomId::new(0), RoomId::new(2)]);
        assert_eq!(
            system.edges(),
            vec![
                (RoomId::new(0), RoomId::new(1)),
                (RoomId::new(1), RoomId::new(2)),
            ]
        );
    }

    #[test]
    fn test_is_locked_is_directional() {
        let system = RoomSystem::builder()
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
            .unwrap();

        // Entering room 2 is locked; leaving it is not.
        assert!(system.is_locked(RoomId::new(1), RoomId::new(2)));
        assert!(!system.is_locked(RoomId::new(2), RoomId::new(1)));
        assert_eq!(system.lock_count(), 1);
    }

    #[test]
    fn test_reject_too_few_rooms() {
        let result = RoomSystem::builder()
            .room(RoomId::new(0))
            .start(RoomId::new(0))
            .exit(RoomId::new(0))
            .build();
        assert!(matches!(result, Err(EngineError::InvalidSystem(_))));
    }

    #[test]
    fn test_reject_no_exit() {
        let result = RoomSystem::builder()
            .room(RoomId::new(0))
            .room(RoomId::new(1))
            .edge(RoomId::new(0), RoomId::new(1))
            .start(RoomId::new(0))
            .build();
        assert!(matches!(result, Err(EngineError::InvalidSystem(_))));
    }

    #[test]
    fn test_reject_locked_start() {
        let result = RoomSystem::builder()
            .room(RoomId::new(0))
            .room(RoomId::new(1))
            .edge(RoomId::new(0), RoomId::new(1))
            .lock(RoomId::new(0))
            .key(RoomId::new(1))
            .start(RoomId::new(0))
            .exit(RoomId::new(1))
            .build();
        assert!(matches!(result, Err(EngineError::InvalidSystem(_))));
    }

    #[test]
    fn test_reject_lock_key_mismatch() {
        let result = RoomSystem::builder()
            .room(RoomId::new(0))
            .room(RoomId::new(1))
            .edge(RoomId::new(0), RoomId::new(1))
            .lock(RoomId::new(1))
            .start(RoomId::new(0))
            .exit(RoomId::new(1))
            .build();
        assert!(matches!(result, Err(EngineError::InvalidSystem(_))));
    }

    #[test]
    fn test_reject_disconnected() {
        let result = RoomSystem::builder()
            .room(RoomId::new(0))
            .room(RoomId::new(1))
            .room(RoomId::new(2))
            .edge(RoomId::new(0), RoomId::new(1))
            .start(RoomId::new(0))
            .exit(RoomId::new(1))
            .build();
        assert!(matches!(result, Err(EngineError::InvalidSystem(_))));
    }

    #[test]
    fn test_reject_start_is_exit() {
        let result = RoomSystem::builder()
            .room(RoomId::new(0))
            .room(RoomId::new(1))
            .edge(RoomId::new(0), RoomId::new(1))
            .start(RoomId::new(0))
            .exit(RoomId::new(0))
            .build();
        assert!(matches!(result, Err(EngineError::InvalidSystem(_))));
    }

    #[test]
    fn test_structural_equality() {
        // Same system built with edges in a different order.
        let a = linear_3();
        let b = RoomSystem::builder()
            .room(RoomId::new(2))
            .room(RoomId::new(1))
            .room(RoomId::new(0))
            .edge(RoomId::new(2), RoomId::new(1))
            .edge(RoomId::new(1), RoomId::new(0))
            .start(RoomId::new(0))
            .exit(RoomId::new(2))
            .build()
            .unwrap();

        assert_eq!(a, b);
    }
}
