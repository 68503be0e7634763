//! Deterministic content hashing.
//!
//! A seeded FNV-1a byte-wise mix in 32- and 64-bit variants. The seed is
//! an explicit parameter on every call — there is no process-wide hash
//! state — so a hash is a pure function of (seed, bytes) and can serve as
//! a cross-machine fingerprint of any fixed-size value's raw bytes. The
//! mix is order-sensitive and is not a cryptographic primitive.

use std::hash::{BuildHasher, Hasher};

const FNV64_OFFSET: u64 = 0xCBF2_9CE4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01B3;
const FNV32_OFFSET: u32 = 0x811C_9DC5;
const FNV32_PRIME: u32 = 16_777_619;

/// 64-bit fingerprint of `bytes` under `seed`.
pub fn hash64(bytes: &[u8], seed: u64) -> u64 {
    let mut state = FNV64_OFFSET ^ seed;
    for &byte in bytes {
        state ^= byte as u64;
        state = state.wrapping_mul(FNV64_PRIME);
    }
    state
}

/// 32-bit fingerprint of `bytes` under `seed`.
pub fn hash32(bytes: &[u8], seed: u32) -> u32 {
    let mut state = FNV32_OFFSET ^ seed;
    for &byte in bytes {
        state ^= byte as u32;
        state = state.wrapping_mul(FNV32_PRIME);
    }
    state
}

/// [`Hasher`] over the seeded 64-bit mix, for dictionary hashing of
/// fixed-point values and composites built from them.
#[derive(Clone, Debug)]
pub struct SeededHasher {
    state: u64,
}

impl SeededHasher {
    pub fn new(seed: u64) -> SeededHasher {
        SeededHasher {
            state: FNV64_OFFSET ^ seed,
        }
    }
}

impl Hasher for SeededHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(FNV64_PRIME);
        }
    }
}

/// [`BuildHasher`] carrying the caller's seed, for use as the hash state
/// of `HashMap`/`HashSet` keyed by deterministic values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeededBuildHasher {
    pub seed: u64,
}

impl SeededBuildHasher {
    pub fn new(seed: u64) -> SeededBuildHasher {
        SeededBuildHasher { seed }
    }
}

impl BuildHasher for SeededBuildHasher {
    type Hasher = SeededHasher;

    fn build_hasher(&self) -> SeededHasher {
        SeededHasher::new(self.seed)
    }
}
