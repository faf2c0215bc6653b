//! Embedded standard-systems catalog.
//!
//! Two hundred pre-generated room systems shipped inside the binary, for
//! benchmark runs that must use the same puzzles everywhere: 20 tutorial,
//! 60 easy, 80 medium, 20 hard, 20 very hard. Each case carries its
//! encoding plus metadata (difficulty, optimal step count, description).
//!
//! The JSON is parsed once per process and cached; a parse failure is a
//! packaging defect and surfaces as [`EngineError::CorruptCatalog`] on
//! every access.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::codec::decode;
use crate::core::EngineError;
use crate::gen::Difficulty;
use crate::system::RoomSystem;

static CATALOG_JSON: &str = include_str!("../../data/standard_systems.json");

static CATALOG: OnceLock<Result<Vec<CatalogCase>, String>> = OnceLock::new();

/// One catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCase {
    /// Stable case id, e.g. `medium_17`.
    pub id: String,
    /// Compact system encoding.
    pub encoding: String,
    /// Difficulty tier the case was generated at.
    pub difficulty: Difficulty,
    /// Minimal execution steps to reach the exit.
    pub optimal_steps: u32,
    /// Human-readable summary.
    pub description: String,
}

#[derive(Deserialize)]
struct CatalogFile {
    cases: Vec<CatalogCase>,
}

/// All 200 standard cases, in catalog order.
pub fn standard_cases() -> Result<&'static [CatalogCase], EngineError> {
    let parsed = CATALOG.get_or_init(|| {
        serde_json::from_str::<CatalogFile>(CATALOG_JSON)
            .map(|file| file.cases)
            .map_err(|err| err.to_string())
    });
    match parsed {
        Ok(cases) => Ok(cases.as_slice()),
        Err(message) => Err(EngineError::CorruptCatalog(message.clone())),
    }
}

/// Decode up to `count` standard systems, optionally filtered by
/// difficulty.
///
/// `Difficulty::Random` (or `None`) means no filter. Asking for more
/// systems than the filter matches returns what there is.
pub fn load_standard_systems(
    count: usize,
    difficulty: Option<Difficulty>,
) -> Result<Vec<RoomSystem>, EngineError> {
    let filter = match difficulty {
        Some(Difficulty::Random) | None => None,
        Some(concrete) => Some(concrete),
    };

    standard_cases()?
        .iter()
        .filter(|case| filter.map_or(true, |wanted| case.difficulty == wanted))
        .take(count)
        .map(|case| decode(&case.encoding))
        .collect()
}
