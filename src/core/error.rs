//! Engine error taxonomy.
//!
//! Structural and configuration errors surface immediately through
//! `EngineError`. In-game rule violations are deliberately *not* errors:
//! they are recorded as `FailedAction` entries and consumed by scoring.

use thiserror::Error;

use super::phase::Outcome;
use crate::gen::Difficulty;

/// Errors surfaced by the engine's call surface.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A room-system encoding could not be decoded. Fatal to that decode
    /// call.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// Generation found no feasible system within the retry budget.
    #[error("no feasible {difficulty} system found within {attempts} attempts")]
    UnsatisfiableDifficulty {
        /// The requested difficulty.
        difficulty: Difficulty,
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// An action was submitted after the episode terminated. The state is
    /// unchanged.
    #[error("episode is closed ({outcome:?})")]
    EpisodeClosed {
        /// The outcome the episode terminated with.
        outcome: Outcome,
    },

    /// A room system failed structural validation while being built.
    /// Decoding maps this to `MalformedEncoding`; generation retries.
    #[error("invalid room system: {0}")]
    InvalidSystem(String),

    /// The embedded standard-systems catalog failed to parse. Indicates a
    /// packaging defect, not a caller error.
    #[error("standard-systems catalog is corrupt: {0}")]
    CorruptCatalog(String),
}
