//! Connected-graph construction for room systems.
//!
//! Three modes, all guaranteed to produce a single connected component:
//!
//! - `RandomTree`: each new node attaches to a uniformly random existing
//!   node. Connected and cycle-free.
//! - `BinaryTree`: nodes attach in BFS order, at most two children per
//!   node. Connected and cycle-free.
//! - `General`: random spanning tree plus 1..N-1 extra edges, so at least
//!   one cycle exists (given at least 3 nodes).

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::EngineRng;

/// Graph structure mode for generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphMode {
    /// Connected tree, random shape.
    #[default]
    RandomTree,
    /// Tree where every node has at most two children.
    BinaryTree,
    /// Tree plus extra edges (cycles).
    General,
}

impl GraphMode {
    /// Human-readable label used in system descriptions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GraphMode::RandomTree => "Random Tree",
            GraphMode::BinaryTree => "Binary Tree",
            GraphMode::General => "General",
        }
    }
}

/// Adjacency lists indexed by room slot.
pub type Adjacency = Vec<Vec<usize>>;

/// Build a connected graph over `num_rooms` nodes.
///
/// Respects the `no_loops` flag: `General` falls back to `RandomTree` when
/// loops are forbidden, and also when fewer than 3 nodes make a cycle
/// impossible.
#[must_use]
pub fn build_graph(
    rng: &mut EngineRng,
    num_rooms: usize,
    mode: GraphMode,
    no_loops: bool,
) -> Adjacency {
    let mode = match mode {
        GraphMode::General if no_loops || num_rooms < 3 => GraphMode::RandomTree,
        other => other,
    };

    match mode {
        GraphMode::RandomTree => random_tree(rng, num_rooms),
        GraphMode::BinaryTree => binary_tree(num_rooms),
        GraphMode::General => general(rng, num_rooms),
    }
}

fn random_tree(rng: &mut EngineRng, num_rooms: usize) -> Adjacency {
    let mut adj: Adjacency = vec![Vec::new(); num_rooms];
    for node in 1..num_rooms {
        let parent = rng.gen_range_usize(0..node);
        adj[parent].push(node);
        adj[node].push(parent);
    }
    adj
}

fn binary_tree(num_rooms: usize) -> Adjacency {
    let mut adj: Adjacency = vec![Vec::new(); num_rooms];
    let mut slots: VecDeque<(usize, usize)> = VecDeque::from([(0, 2)]);

    for node in 1..num_rooms {
        let Some(&(parent, remaining)) = slots.front() else {
            break;
        };
        adj[parent].push(node);
        adj[node].push(parent);
        if remaining == 1 {
            slots.pop_front();
        } else if let Some(front) = slots.front_mut() {
            front.1 = remaining - 1;
        }
        slots.push_back((node, 2));
    }

    adj
}

fn general(rng: &mut EngineRng, num_rooms: usize) -> Adjacency {
    let mut adj = random_tree(rng, num_rooms);

    let mut candidates: Vec<(usize, usize)> = Vec::new();
    for a in 0..num_rooms {
        for b in (a + 1)..num_rooms {
            if !adj[a].contains(&b) {
                candidates.push((a, b));
            }
        }
    }

    if !candidates.is_empty() {
        let max_extra = candidates.len().min((num_rooms - 1).max(1));
        let num_extra = rng.gen_range_usize(1..max_extra + 1);
        for index in rng.sample_distinct(candidates.len(), num_extra) {
            let (a, b) = candidates[index];
            adj[a].push(b);
            adj[b].push(a);
        }
    }

    adj
}

/// DFS cycle detection for an undirected graph.
#[must_use]
pub fn has_cycle(adj: &Adjacency) -> bool {
    if adj.is_empty() {
        return false;
    }
    let mut visited = vec![false; adj.len()];
    // (node, parent) stack; a visited non-parent neighbor closes a cycle.
    let mut stack = vec![(0usize, usize::MAX)];
    visited[0] = true;
    while let Some((node, parent)) = stack.pop() {
        for &neighbor in &adj[node] {
            if !visited[neighbor] {
                visited[neighbor] = true;
                stack.push((neighbor, node));
            } else if neighbor != parent {
                return true;
            }
        }
    }
    false
}

/// Plain BFS hop distance, ignoring locks. `None` if unreachable.
#[must_use]
pub fn bfs_distance(adj: &Adjacency, from: usize, to: usize) -> Option<usize> {
    let mut visited = vec![false; adj.len()];
    let mut queue = VecDeque::from([(from, 0usize)]);
    visited[from] = true;
    while let Some((node, dist)) = queue.pop_front() {
        if node == to {
            return Some(dist);
        }
        for &neighbor in &adj[node] {
            if !visited[neighbor] {
                visited[neighbor] = true;
                queue.push_back((neighbor, dist + 1));
            }
        }
    }
    None
}
