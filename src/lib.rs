//! Deterministic fixed-point numeric core.
//!
//! This crate provides the arithmetic foundation for lockstep simulation:
//! a Q48.16 fixed-point scalar, table-driven transcendental functions, a
//! high-precision divisor for hot constants, bit-exact float conversion,
//! and a deterministic PRNG and content hash. Every operation produces
//! bit-identical results across platforms and architectures, which is
//! critical for multiplayer lockstep networking where all clients must
//! simulate identically.

pub mod convert;
pub mod hash;
pub mod lut;
pub mod precise;
pub mod rng;
pub mod scalar;
pub mod text;
pub mod vec2;

mod consts;

pub use hash::{hash32, hash64, SeededBuildHasher, SeededHasher};
pub use precise::PreciseDivisor;
pub use rng::FixedRng;
pub use scalar::Fixed;
pub use text::ParseFixedError;
pub use vec2::FixedVec2;

// ============================================================================
// Range-Check Macro
// ============================================================================

/// Debug-assert that multiplication operands are inside the usable range
/// when the `range_checks` feature is enabled.
///
/// The fast path is branch-free by design: products of raw values outside
/// the 32-bit usable sub-range can overflow the 64-bit result without any
/// diagnostic. Enabling `range_checks` turns each multiply into a
/// debug-asserted one. When the feature is disabled, this macro expands to
/// an empty block and even its arguments are not evaluated.
#[cfg(feature = "range_checks")]
macro_rules! usable_check {
    ($a:expr, $b:expr) => {
        debug_assert!(
            $a.is_usable() && $b.is_usable(),
            "multiplication operand outside usable range: {} * {}",
            $a,
            $b
        );
    };
}

#[cfg(not(feature = "range_checks"))]
macro_rules! usable_check {
    ($a:expr, $b:expr) => {};
}

pub(crate) use usable_check;
