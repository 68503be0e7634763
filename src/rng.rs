//! Deterministic pseudo-random number generation.
//!
//! `FixedRng` advances a 256-bit state with the xoshiro256** step
//! (rotate/xor/multiply) and hands out 64-bit words. A stream is an
//! explicit handle owned by its caller — there is no thread-local default
//! instance — so two streams seeded identically replay identical
//! sequences regardless of scheduling, and `&mut self` makes concurrent
//! draws on one stream a compile error rather than a data race.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::scalar::Fixed;

/// Seeded 256-bit-state generator producing deterministic sequences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedRng {
    state: [u64; 4],
}

impl FixedRng {
    /// Seed from the operating system's entropy source (via `rand`'s
    /// OS-reseeded CSPRNG), resampling the astronomically unlikely
    /// all-zero draw.
    pub fn from_entropy() -> FixedRng {
        let mut source = rand::rng();
        loop {
            let state = [
                source.next_u64(),
                source.next_u64(),
                source.next_u64(),
                source.next_u64(),
            ];
            if state.iter().any(|&word| word != 0) {
                return FixedRng { state };
            }
        }
    }

    /// Resume or mirror a stream from an explicit 256-bit state.
    ///
    /// Panics on an all-zero state, which is the generator's single
    /// degenerate fixed point.
    pub fn from_state(state: [u64; 4]) -> FixedRng {
        assert!(
            state.iter().any(|&word| word != 0),
            "all-zero PRNG state is degenerate"
        );
        FixedRng { state }
    }

    /// Expand a 64-bit seed into a full state through SplitMix64.
    pub fn from_seed(seed: u64) -> FixedRng {
        let mut x = seed;
        let mut next = move || {
            x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = x;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        };
        loop {
            let state = [next(), next(), next(), next()];
            if state.iter().any(|&word| word != 0) {
                return FixedRng { state };
            }
        }
    }

    /// Snapshot of the current state, e.g. for lockstep checkpoints.
    pub fn state(&self) -> [u64; 4] {
        self.state
    }

    /// Next 64-bit word (xoshiro256** scrambler over the xor-shift state).
    pub fn next_u64(&mut self) -> u64 {
        let result = self.state[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform value in [0, 1): the draw's low 16 bits map directly onto
    /// the fixed-point fractional grid.
    pub fn next_fixed(&mut self) -> Fixed {
        Fixed::from_raw((self.next_u64() & 0xFFFF) as i64)
    }

    /// Uniform value in [min, max), without modulo bias.
    ///
    /// Multiplies the range width by a raw draw into a 128-bit product and
    /// takes the high word; draws whose low word falls under the bias
    /// threshold are rejected and redrawn. Panics when `min >= max`.
    pub fn gen_range(&mut self, min: Fixed, max: Fixed) -> Fixed {
        assert!(min < max, "empty random range {}..{}", min, max);
        let width = (max.raw() as u64).wrapping_sub(min.raw() as u64);
        let threshold = width.wrapping_neg() % width;
        loop {
            let product = (width as u128) * (self.next_u64() as u128);
            if (product as u64) >= threshold {
                let offset = (product >> 64) as u64;
                return Fixed::from_raw(min.raw().wrapping_add(offset as i64));
            }
        }
    }
}
