//! Deterministic random number generation for system construction.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence, so the same
//!   seed always yields the same generated room system (and encoding)
//! - **Seeded per call**: the generator owns no global RNG; each
//!   generation call builds its own `EngineRng`, which keeps concurrent
//!   generation safe without locks
//!
//! ## Usage
//!
//! ```
//! use rooms_bench::core::EngineRng;
//!
//! let mut a = EngineRng::new(42);
//! let mut b = EngineRng::new(42);
//! assert_eq!(a.gen_range_usize(0..100), b.gen_range_usize(0..100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used by the room-system generator.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
#[derive(Clone, Debug)]
pub struct EngineRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl EngineRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Sample `amount` distinct indices from `0..length`.
    ///
    /// Used for lock and key placement, where the same room must not be
    /// picked twice. Returns fewer than `amount` only if `amount > length`
    /// is clamped by the caller; this method panics on that misuse, so
    /// callers clamp first.
    #[must_use]
    pub fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.inner, length, amount).into_vec()
    }
}
