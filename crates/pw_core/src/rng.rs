//! Seeded tie RNG.
//!
//! The seed of a `TiePolicy::Random` is the only source of randomness in the
//! engine. Every pick drawn from this stream is logged as a `TieCrumb`, so a
//! resolution can be audited and replayed from its seed.

use smol_str::SmolStr;

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// A single logged decision for a tie, including context and the RNG word index.
///
/// `word_index` is **1-based**: the first 64-bit word consumed by a `TieRng`
/// has index 1. Under rejection sampling it names the **accepted** word that
/// decided the pick.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TieCrumb {
    /// Stable, human-readable context (e.g. "ranked_pairs/group:3").
    pub ctx: SmolStr,
    /// Chosen index in the contender set (0-based).
    pub pick: usize,
    /// Number of contenders the pick was taken from.
    pub of: usize,
    /// 1-based index of the deciding RNG word.
    pub word_index: u128,
}

/// ChaCha20 stream with a consumed-word counter.
///
/// The `u64` seed is mapped explicitly: `seed.to_le_bytes()` fills the first
/// 8 bytes of the 32-byte ChaCha seed, the remaining 24 bytes are zero.
#[derive(Debug, Clone)]
pub struct TieRng {
    rng: ChaCha20Rng,
    words_consumed: u128,
}

impl TieRng {
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self {
            rng: ChaCha20Rng::from_seed(seed32),
            words_consumed: 0,
        }
    }

    /// Total number of 64-bit words consumed so far.
    #[inline]
    pub fn words_consumed(&self) -> u128 {
        self.words_consumed
    }

    // Only place the counter advances.
    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.words_consumed = self.words_consumed.saturating_add(1);
        self.rng.next_u64()
    }

    /// Unbiased integer in `[0, n)`; `None` if `n == 0`.
    #[inline]
    pub fn gen_range(&mut self, n: u64) -> Option<u64> {
        self.gen_range_with_index(n).map(|(v, _)| v)
    }

    /// Same as `gen_range`, also returning the 1-based index of the deciding word.
    ///
    /// `threshold = 2^64 mod n`; accepting only `x >= threshold` makes `x % n` uniform.
    #[inline]
    pub fn gen_range_with_index(&mut self, n: u64) -> Option<(u64, u128)> {
        if n == 0 {
            return None;
        }
        let threshold = n.wrapping_neg() % n;
        let mut word = self.next_u64();
        while word < threshold {
            word = self.next_u64();
        }
        Some((word % n, self.words_consumed))
    }

    /// Pick an index in `[0, n)` and the crumb describing it; `None` if `n == 0`.
    #[inline]
    pub fn pick_index_with_crumb(&mut self, ctx: &str, n: usize) -> Option<(usize, TieCrumb)> {
        let (v, word_index) = self.gen_range_with_index(n as u64)?;
        let pick = v as usize;
        Some((
            pick,
            TieCrumb {
                ctx: SmolStr::new(ctx),
                pick,
                of: n,
                word_index,
            },
        ))
    }
}
