//! Room-system generation by difficulty.
//!
//! Generation is bounded-retry rejection sampling: build a candidate
//! (room count, connected graph, start/exit, locks, keys), check
//! solvability with the state-space solver, and retry on failure. The
//! retry budget is finite; exceeding it surfaces
//! [`EngineError::UnsatisfiableDifficulty`]. All randomness flows from the
//! caller's seed, so the same seed always yields the same system and
//! encoding.
//!
//! Medium and harder tiers additionally require the system to admit a
//! softlock — a wasteful first key spend that strands the player — so
//! those puzzles punish greedy play while remaining winnable.

pub mod graph;
pub mod solver;

use serde::{Deserialize, Serialize};

use crate::codec::encode;
use crate::core::{EngineError, EngineRng};
use crate::system::{RoomId, RoomSystem};

pub use graph::GraphMode;

/// Difficulty tags for generation and the standard-systems catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// 2-3 rooms, no locks.
    Tutorial,
    /// 4-5 rooms, at most one lock.
    Easy,
    /// 5-6 rooms, 1-2 locks, softlock required.
    Medium,
    /// 6-7 rooms, 2-3 locks, softlock required.
    Hard,
    /// 7-8 rooms, 3-4 locks, softlock required.
    VeryHard,
    /// One of the concrete tiers, chosen uniformly at generation time.
    Random,
}

impl Difficulty {
    /// The five concrete tiers, easiest first.
    pub const CONCRETE: [Difficulty; 5] = [
        Difficulty::Tutorial,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
    ];

    fn tier(self) -> Tier {
        match self {
            Difficulty::Tutorial => Tier {
                rooms: (2, 3),
                locks: (0, 0),
                softlock: false,
            },
            Difficulty::Easy => Tier {
                rooms: (4, 5),
                locks: (0, 1),
                softlock: false,
            },
            Difficulty::Medium => Tier {
                rooms: (5, 6),
                locks: (1, 2),
                softlock: true,
            },
            Difficulty::Hard => Tier {
                rooms: (6, 7),
                locks: (2, 3),
                softlock: true,
            },
            Difficulty::VeryHard => Tier {
                rooms: (7, 8),
                locks: (3, 4),
                softlock: true,
            },
            Difficulty::Random => unreachable!("Random resolves before tier lookup"),
        }
    }

    fn resolve(self, rng: &mut EngineRng) -> Difficulty {
        match self {
            Difficulty::Random => {
                // CONCRETE is never empty.
                *rng.choose(&Self::CONCRETE).unwrap_or(&Difficulty::Tutorial)
            }
            concrete => concrete,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Tutorial => "tutorial",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::VeryHard => "very_hard",
            Difficulty::Random => "random",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tutorial" => Ok(Difficulty::Tutorial),
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "very_hard" => Ok(Difficulty::VeryHard),
            "random" => Ok(Difficulty::Random),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

struct Tier {
    rooms: (usize, usize),
    locks: (usize, usize),
    softlock: bool,
}

/// Default retry budget per generation call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5000;

/// Tunable generation parameters.
#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    difficulty: Difficulty,
    graph_mode: GraphMode,
    no_loops: bool,
    require_softlock: Option<bool>,
    max_attempts: u32,
}

impl GeneratorOptions {
    /// Options for a difficulty with defaults: random-tree graphs, loops
    /// allowed, tier-default softlock requirement, standard retry budget.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            graph_mode: GraphMode::default(),
            no_loops: false,
            require_softlock: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the graph construction mode.
    #[must_use]
    pub fn graph_mode(mut self, mode: GraphMode) -> Self {
        self.graph_mode = mode;
        self
    }

    /// Forbid cycles (forces `General` back to `RandomTree`).
    #[must_use]
    pub fn no_loops(mut self, no_loops: bool) -> Self {
        self.no_loops = no_loops;
        self
    }

    /// Override the tier's softlock requirement. Only meaningful for
    /// systems with at least one lock; ignored otherwise.
    #[must_use]
    pub fn require_softlock(mut self, require: bool) -> Self {
        self.require_softlock = Some(require);
        self
    }

    /// Set the retry budget.
    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Generate a system. Deterministic in `seed`.
    pub fn generate(&self, seed: u64) -> Result<Generated, EngineError> {
        let mut rng = EngineRng::new(seed);
        let difficulty = self.difficulty.resolve(&mut rng);
        let tier = difficulty.tier();
        let require_softlock = self.require_softlock.unwrap_or(tier.softlock);

        for _ in 0..self.max_attempts {
            let num_rooms = rng.gen_range_usize(tier.rooms.0..tier.rooms.1 + 1);
            let adj = graph::build_graph(&mut rng, num_rooms, self.graph_mode, self.no_loops);

            let start = rng.gen_range_usize(0..num_rooms);
            let exit_choices: Vec<usize> = (0..num_rooms).filter(|&n| n != start).collect();
            let Some(&exit) = rng.choose(&exit_choices) else {
                continue;
            };

            // The start room cannot be locked (the player begins there).
            let lock_candidates: Vec<usize> = (0..num_rooms).filter(|&n| n != start).collect();
            let num_locks = rng
                .gen_range_usize(tier.locks.0..tier.locks.1 + 1)
                .min(lock_candidates.len());

            let mut locked: solver::RoomMask = 0;
            for index in rng.sample_distinct(lock_candidates.len(), num_locks) {
                locked |= 1 << lock_candidates[index];
            }

            // Exactly one key per lock, at most one key per room.
            let mut keys: solver::RoomMask = 0;
            for room in rng.sample_distinct(num_rooms, num_locks) {
                keys |= 1 << room;
            }

            if !solver::is_solvable(&adj, start, exit, locked, keys) {
                continue;
            }
            if require_softlock
                && num_locks > 0
                && !solver::can_be_softlocked(&adj, start, exit, locked, keys)
            {
                continue;
            }

            let Ok(system) = assemble(&adj, start, exit, locked, keys) else {
                continue;
            };
            let encoding = encode(&system);

            let distance = graph::bfs_distance(&adj, start, exit).unwrap_or(0);
            let has_cycles = graph::has_cycle(&adj);
            let softlock_possible = require_softlock && num_locks > 0;

            let mut description = format!(
                "{} with {num_rooms} rooms, {num_locks} lock(s)/key(s)",
                self.graph_mode.label()
            );
            if has_cycles {
                description.push_str(", cycles present");
            }
            if softlock_possible {
                description.push_str(", softlock possible");
            }

            return Ok(Generated {
                system,
                encoding,
                difficulty,
                optimal_steps: (distance + num_locks * 2) as u32,
                has_cycles,
                softlock_possible,
                description,
            });
        }

        Err(EngineError::UnsatisfiableDifficulty {
            difficulty,
            attempts: self.max_attempts,
        })
    }
}

fn assemble(
    adj: &graph::Adjacency,
    start: usize,
    exit: usize,
    locked: solver::RoomMask,
    keys: solver::RoomMask,
) -> Result<RoomSystem, EngineError> {
    let mut builder = RoomSystem::builder();
    for room in 0..adj.len() {
        let id = RoomId::new(room as u8);
        builder = builder.room(id);
        if locked & (1 << room) != 0 {
            builder = builder.lock(id);
        }
        if keys & (1 << room) != 0 {
            builder = builder.key(id);
        }
    }
    builder = builder.exit(RoomId::new(exit as u8));
    for (a, neighbors) in adj.iter().enumerate() {
        for &b in neighbors {
            if a < b {
                builder = builder.edge(RoomId::new(a as u8), RoomId::new(b as u8));
            }
        }
    }
    builder.start(RoomId::new(start as u8)).build()
}

/// A generated system with its encoding and metadata.
#[derive(Clone, Debug)]
pub struct Generated {
    /// The system itself.
    pub system: RoomSystem,
    /// Its compact encoding.
    pub encoding: String,
    /// Resolved difficulty (`Random` never appears here).
    pub difficulty: Difficulty,
    /// BFS distance start→exit plus two steps per lock.
    pub optimal_steps: u32,
    /// The graph contains at least one cycle.
    pub has_cycles: bool,
    /// A wasteful key spend can strand the player.
    pub softlock_possible: bool,
    /// Human-readable summary.
    pub description: String,
}

/// Generate a system for a difficulty. Deterministic in `seed`.
///
/// Convenience wrapper over [`GeneratorOptions`] returning the
/// `(system, encoding)` pair.
pub fn generate(
    difficulty: Difficulty,
    no_loops: bool,
    seed: u64,
) -> Result<(RoomSystem, String), EngineError> {
    let generated = GeneratorOptions::new(difficulty)
        .no_loops(no_loops)
        .generate(seed)?;
    Ok((generated.system, generated.encoding))
}
