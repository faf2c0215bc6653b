//! Core engine types: actions, phases, RNG, configuration, errors.
//!
//! This module contains the fundamental building blocks shared by every
//! other part of the engine. Drivers configure behavior via
//! `EpisodeConfig` rather than modifying the core.

pub mod action;
pub mod config;
pub mod error;
pub mod phase;
pub mod rng;

pub use action::{Action, FailedAction, FailureReason};
pub use config::{EpisodeConfig, BASE_STEP_COST};
pub use error::EngineError;
pub use phase::{Outcome, Phase};
pub use rng::EngineRng;
