//! Episode state machine: phases, knowledge, action application.
//!
//! One episode = one `RoomSystem` + one `EpisodeConfig` + one mutable
//! [`Episode`]. The engine is single-episode and synchronous; concurrent
//! episodes are independent `Episode` values with no shared mutable
//! state, so "one episode, one owner" is the whole concurrency story.

pub mod knowledge;
pub mod observation;
pub mod state;

pub use knowledge::KnowledgeSnapshot;
pub use observation::{FailureNotice, ObservationDelta};
pub use state::Episode;

use crate::core::EpisodeConfig;
use crate::system::RoomSystem;

/// Start a new episode against a system.
///
/// Convenience alias for [`Episode::new`], matching the driver-facing
/// call surface.
#[must_use]
pub fn new_episode(system: RoomSystem, config: EpisodeConfig) -> Episode {
    Episode::new(system, config)
}
