//! # rooms-bench
//!
//! A turn-based room-escape puzzle engine built for agent benchmarking.
//!
//! ## Design Principles
//!
//! 1. **Partial Observability As State**: The ground-truth `RoomSystem` is
//!    immutable and shared; what an agent knows lives entirely in its
//!    episode's knowledge map. There are no visibility flags on rooms.
//!
//! 2. **Phase-Conditioned Rules**: The same five actions exist in both
//!    phases, but their legality and cost depend on the phase. Observation
//!    explores freely off-budget; Execution burns budget on every
//!    submitted action, valid or not.
//!
//! 3. **Failures Are Data, Not Errors**: In-game rule violations never
//!    return `Err`. They are recorded, optionally hidden from the agent,
//!    and priced by the scorer.
//!
//! ## Architecture
//!
//! - **Deterministic Generation**: Bounded-retry rejection sampling from a
//!   seeded `ChaCha8` stream. Same seed, same system, same encoding.
//!
//! - **Compact Encodings**: Every system round-trips through a 25-hex-char
//!   encoding (100 bits: start, per-room attributes, adjacency matrix).
//!
//! - **Persistent Collections**: Episode ledgers use `im` maps/sets for
//!   O(1) clone, so search-style drivers can fork an episode per candidate
//!   action.
//!
//! ## Modules
//!
//! - `core`: Actions, phases, configuration, errors, RNG
//! - `system`: Ground-truth room systems and their builder
//! - `codec`: 100-bit encode/decode
//! - `gen`: Difficulty-driven generation, graph builders, solvability
//! - `episode`: The playable state machine
//! - `score`: Reward computation
//! - `catalog`: The embedded 200-case standard benchmark set

pub mod catalog;
pub mod codec;
pub mod core;
pub mod episode;
pub mod gen;
pub mod score;
pub mod system;

// Re-export commonly used types
pub use crate::core::{
    Action, EngineError, EngineRng, EpisodeConfig, FailedAction, FailureReason, Outcome, Phase,
    BASE_STEP_COST,
};

pub use crate::system::{Room, RoomId, RoomSystem, RoomSystemBuilder, MAX_ROOMS};

pub use crate::codec::{decode, encode, ENCODING_LEN};

pub use crate::gen::{
    generate, Difficulty, Generated, GeneratorOptions, GraphMode, DEFAULT_MAX_ATTEMPTS,
};

pub use crate::episode::{new_episode, Episode, FailureNotice, KnowledgeSnapshot, ObservationDelta};

pub use crate::score::{breakdown, score, ScoreBreakdown};

pub use crate::catalog::{load_standard_systems, standard_cases, CatalogCase};
