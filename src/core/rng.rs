//! Seeded randomness for feature placement and mod effects.
//!
//! A match owns one root `GameRng`. Every new match forks a branch from it,
//! and every active mod derives its own stream from that branch by name, so
//! bomb rolls and alien rolls never interleave:
//!
//! ```
//! use connect_mods::core::GameRng;
//!
//! let mut root = GameRng::new(42);
//! let branch = root.fork();
//!
//! let mut bombs = branch.for_context("bombs");
//! let mut again = GameRng::new(42).fork().for_context("bombs");
//! assert_eq!(bombs.gen_range_usize(0..1000), again.gen_range_usize(0..1000));
//! ```
//!
//! Stream seeds are derived with `FxHasher`, which is stable across
//! toolchains, so a saved seed replays the same game anywhere.

use std::hash::Hasher;
use std::ops::{Range, RangeInclusive};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// Golden-ratio increment separating successive forks.
const FORK_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream that remembers how it was seeded.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Branch off a new stream; the n-th fork of a seed is always the same.
    ///
    /// Forking does not advance this stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STEP)))
    }

    /// Named stream derived from this stream's seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        Self::new(hasher.finish())
    }

    pub fn gen_range_usize(&mut self, range: Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    pub fn gen_range_inclusive(&mut self, range: RangeInclusive<usize>) -> usize {
        self.inner.gen_range(range)
    }

    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Up to `amount` distinct elements of `pool`, each subset equally likely.
    ///
    /// A pool smaller than `amount` is returned whole, in random order.
    pub fn sample<T: Clone>(&mut self, pool: &[T], amount: usize) -> Vec<T> {
        let mut pool = pool.to_vec();
        let (picked, _) = pool.partial_shuffle(&mut self.inner, amount);
        picked.to_vec()
    }

    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            forks: self.forks,
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng.forks = state.forks;
        rng
    }
}

/// Saved position of a `GameRng`.
///
/// Restoring seeks the ChaCha8 word counter directly instead of replaying
/// draws.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
    pub forks: u64,
}
