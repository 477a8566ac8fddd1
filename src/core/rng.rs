//! Injectable randomness for card transformations.
//!
//! Mystery and Random cards are the only non-deterministic part of the
//! engine. Every draw goes through the `RandomChoice` trait so callers
//! decide where randomness comes from:
//!
//! - `CardRng`: seeded ChaCha8 stream, reproducible from its saved state
//! - `SequenceChoice`: a scripted list of indices for tests
//!
//! ```
//! use power_cards::core::{CardRng, RandomChoice};
//!
//! let mut a = CardRng::new(42);
//! let mut b = CardRng::new(42);
//! assert_eq!(a.choose_index(10), b.choose_index(10));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Source of uniform choices.
pub trait RandomChoice {
    /// Pick an index uniformly from `0..len`.
    ///
    /// Returns `None` when `len == 0`.
    fn choose_index(&mut self, len: usize) -> Option<usize>;
}

/// Seeded RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct CardRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl CardRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen::<u64>();
        Self::new(seed)
    }

    /// Derive an independent stream for a named context.
    ///
    /// The same context always yields the same stream from the same seed,
    /// e.g. `rng.for_context("mystery:player-7:race-3")`.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> CardRngState {
        CardRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &CardRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomChoice for CardRng {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.gen_range(0..len))
        }
    }
}

/// Serializable RNG state, O(1) regardless of how much was drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Scripted choices, replayed in order and wrapped into range.
///
/// Once the script is exhausted it keeps returning index 0.
#[derive(Clone, Debug, Default)]
pub struct SequenceChoice {
    script: Vec<usize>,
    cursor: usize,
}

impl SequenceChoice {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: 0,
        }
    }

    /// How many choices have been made.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomChoice for SequenceChoice {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let raw = self.script.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        Some(raw % len)
    }
}
