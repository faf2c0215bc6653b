//! State-space solvability checks.
//!
//! Keys are fungible: any key opens any single locked room, and the player
//! chooses which lock to spend a key on, so solvability must search over
//! all spending orders. The search state is
//! `(current room, opened-locks bitmask, collected-keys bitmask)` with
//! `keys held = collected − opened` derived. With at most 8 rooms the
//! state space is tiny (8 × 2^8 × 2^8) and BFS is instant.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use super::graph::Adjacency;

/// Room-set bitmask, one bit per room slot.
pub type RoomMask = u8;

fn mask_bit(room: usize) -> RoomMask {
    1 << room
}

fn collect(room: usize, collected: RoomMask, keys: RoomMask) -> RoomMask {
    collected | (keys & mask_bit(room))
}

/// Whether any action sequence reaches the exit from the start.
#[must_use]
pub fn is_solvable(
    adj: &Adjacency,
    start: usize,
    exit: usize,
    locked: RoomMask,
    keys: RoomMask,
) -> bool {
    is_solvable_from(adj, start, exit, locked, keys, 0, 0)
}

/// Solvability with a pre-existing world state.
///
/// `init_opened` / `init_collected` let the softlock detector simulate
/// "what happens after the player already spent a key on one specific
/// door". The key in the start room is always collected implicitly.
#[must_use]
pub fn is_solvable_from(
    adj: &Adjacency,
    start: usize,
    exit: usize,
    locked: RoomMask,
    keys: RoomMask,
    init_opened: RoomMask,
    init_collected: RoomMask,
) -> bool {
    let initial = (start, init_opened, collect(start, init_collected, keys));
    let mut visited: FxHashSet<(usize, RoomMask, RoomMask)> = FxHashSet::default();
    visited.insert(initial);
    let mut queue = VecDeque::from([initial]);

    while let Some((room, opened, collected)) = queue.pop_front() {
        if room == exit {
            return true;
        }

        let held = collected.count_ones() - opened.count_ones();

        for &neighbor in &adj[room] {
            let sealed = locked & mask_bit(neighbor) != 0 && opened & mask_bit(neighbor) == 0;
            let state = if sealed {
                if held == 0 {
                    continue;
                }
                let opened = opened | mask_bit(neighbor);
                (neighbor, opened, collect(neighbor, collected, keys))
            } else {
                (neighbor, opened, collect(neighbor, collected, keys))
            };
            if visited.insert(state) {
                queue.push_back(state);
            }
        }
    }

    false
}

/// Whether at least one reachable locked door, if opened first
/// ("wastefully"), leaves the player unable to reach the exit.
///
/// 1. BFS from start ignoring locked rooms → free area.
/// 2. Keys in the free area are what the player holds before the first
///    door choice.
/// 3. For each locked room adjacent to the free area, seed the solver with
///    that door already opened and the free-area keys collected; if the
///    seeded search fails, that first spend is a softlock.
#[must_use]
pub fn can_be_softlocked(
    adj: &Adjacency,
    start: usize,
    exit: usize,
    locked: RoomMask,
    keys: RoomMask,
) -> bool {
    let num_rooms = adj.len();

    let mut free_area: RoomMask = mask_bit(start);
    let mut queue = VecDeque::from([start]);
    while let Some(room) = queue.pop_front() {
        for &neighbor in &adj[room] {
            if free_area & mask_bit(neighbor) != 0 || locked & mask_bit(neighbor) != 0 {
                continue;
            }
            free_area |= mask_bit(neighbor);
            queue.push_back(neighbor);
        }
    }

    let collected_in_free = free_area & keys;
    if collected_in_free == 0 {
        return false; // no keys to waste
    }

    let mut frontier_locks: RoomMask = 0;
    for room in 0..num_rooms {
        if free_area & mask_bit(room) == 0 {
            continue;
        }
        for &neighbor in &adj[room] {
            if locked & mask_bit(neighbor) != 0 && free_area & mask_bit(neighbor) == 0 {
                frontier_locks |= mask_bit(neighbor);
            }
        }
    }
    if frontier_locks == 0 {
        return false;
    }

    (0..num_rooms)
        .filter(|&door| frontier_locks & mask_bit(door) != 0)
        .any(|door| {
            !is_solvable_from(
                adj,
                start,
                exit,
                locked,
                keys,
                mask_bit(door),
                collected_in_free,
            )
        })
}
