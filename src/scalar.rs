//! Q48.16 fixed-point scalar type and its arithmetic contract.
//!
//! `Fixed` stores a single signed 64-bit raw value; the logical value is
//! `raw / 2^16`. All operators work directly on raw integers so identical
//! inputs produce identical bits on every platform. The fast-path
//! operators are deliberately unchecked — values must stay inside the
//! documented usable range for multiplication chains; checked and
//! saturating variants exist for call sites that need them.

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::usable_check;

/// Deterministic Q48.16 fixed-point number.
///
/// 48 bits of integer part, 16 bits of fraction: a range of roughly
/// ±1.4e14 with a resolution of ~0.000015. Stored as a raw `i64`; the
/// in-memory layout is exactly 8 bytes with no padding, so values can be
/// embedded in snapshot buffers and hashed byte-for-byte.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Fixed(i64);

impl Fixed {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = 16;
    /// 2^16, the scale factor between logical and raw values.
    pub const SCALE: i64 = 1 << Self::FRAC_BITS;

    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(Self::SCALE);
    pub const NEG_ONE: Fixed = Fixed(-Self::SCALE);
    pub const HALF: Fixed = Fixed(Self::SCALE / 2);
    pub const MAX: Fixed = Fixed(i64::MAX);
    pub const MIN: Fixed = Fixed(i64::MIN);

    /// Largest value whose raw representation fits in 32 bits.
    ///
    /// Squaring (or chaining multiplications of) values inside
    /// [`USABLE_MIN`](Self::USABLE_MIN), [`USABLE_MAX`](Self::USABLE_MAX)
    /// cannot overflow the 64-bit result. Values outside the sub-range are
    /// still valid for storage and comparison, but products involving them
    /// are not guaranteed to fit.
    pub const USABLE_MAX: Fixed = Fixed(i32::MAX as i64);
    /// Smallest value whose raw representation fits in 32 bits.
    pub const USABLE_MIN: Fixed = Fixed(i32::MIN as i64);

    pub const PI: Fixed = Fixed(consts::q64_to_q16(consts::PI_Q64));
    pub const TWO_PI: Fixed = Fixed(consts::q64_to_q16(consts::TWO_PI_Q64));
    pub const HALF_PI: Fixed = Fixed(consts::q64_to_q16(consts::HALF_PI_Q64));
    pub const E: Fixed = Fixed(consts::q64_to_q16(consts::E_Q64));
    pub const LN_2: Fixed = Fixed(consts::q64_to_q16(consts::LN2_Q64));
    pub const SQRT_2: Fixed = Fixed(consts::q64_to_q16(consts::SQRT2_Q64));
    /// Degrees per radian (180/pi).
    pub const DEG_PER_RAD: Fixed = Fixed(consts::q64_to_q16(consts::DEG_PER_RAD_Q64));
    /// Radians per degree (pi/180).
    pub const RAD_PER_DEG: Fixed = Fixed(consts::q64_to_q16(consts::RAD_PER_DEG_Q64));

    // ========================================================================
    // Construction & Raw Access
    // ========================================================================

    /// Construct directly from a raw Q48.16 value.
    #[inline]
    pub const fn from_raw(raw: i64) -> Fixed {
        Fixed(raw)
    }

    /// The raw Q48.16 representation.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Construct from an integer, saturating at the representable range.
    #[inline]
    pub const fn from_int(value: i64) -> Fixed {
        if value > i64::MAX >> Self::FRAC_BITS {
            Self::MAX
        } else if value < i64::MIN >> Self::FRAC_BITS {
            Self::MIN
        } else {
            Fixed(value << Self::FRAC_BITS)
        }
    }

    /// Integer part, rounding toward negative infinity.
    #[inline]
    pub const fn to_int(self) -> i64 {
        self.0 >> Self::FRAC_BITS
    }

    /// Little-endian raw bytes; the documented 8-byte wire/snapshot layout.
    #[inline]
    pub const fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Reconstruct from the layout produced by [`to_le_bytes`](Self::to_le_bytes).
    #[inline]
    pub const fn from_le_bytes(bytes: [u8; 8]) -> Fixed {
        Fixed(i64::from_le_bytes(bytes))
    }

    // ========================================================================
    // Rounding to the Integer Grid
    // ========================================================================

    /// Largest integer-valued `Fixed` not greater than `self`.
    #[inline]
    pub const fn floor(self) -> Fixed {
        Fixed(self.0 & !(Self::SCALE - 1))
    }

    /// Smallest integer-valued `Fixed` not less than `self`.
    #[inline]
    pub const fn ceil(self) -> Fixed {
        Fixed(self.0.wrapping_add(Self::SCALE - 1) & !(Self::SCALE - 1))
    }

    /// Nearest integer-valued `Fixed`, ties rounding up.
    #[inline]
    pub const fn round(self) -> Fixed {
        Fixed(self.0.wrapping_add(Self::SCALE / 2) & !(Self::SCALE - 1))
    }

    /// Integer-valued `Fixed` truncated toward zero.
    #[inline]
    pub const fn trunc(self) -> Fixed {
        if self.0 >= 0 {
            self.floor()
        } else {
            Fixed((self.0.wrapping_neg() & !(Self::SCALE - 1)).wrapping_neg())
        }
    }

    /// Fractional remainder `self - self.floor()`, always in [0, 1).
    #[inline]
    pub const fn frac(self) -> Fixed {
        Fixed(self.0 & (Self::SCALE - 1))
    }

    // ========================================================================
    // Sign & Ordering Helpers
    // ========================================================================

    /// Absolute value via a branch-free sign mask.
    ///
    /// `>>` on `i64` is an arithmetic (sign-propagating) shift in Rust, so
    /// the mask is all-ones exactly when the value is negative.
    #[inline]
    pub const fn abs(self) -> Fixed {
        let mask = self.0 >> 63;
        Fixed((self.0 ^ mask).wrapping_sub(mask))
    }

    /// -1, 0 or +1 with the sign of `self`, branch-free.
    #[inline]
    pub const fn signum(self) -> Fixed {
        let positive = (self.0.wrapping_neg() as u64 >> 63) as i64;
        Fixed(((self.0 >> 63) | positive) << Self::FRAC_BITS)
    }

    #[inline]
    pub const fn min(self, other: Fixed) -> Fixed {
        if self.0 < other.0 {
            self
        } else {
            other
        }
    }

    #[inline]
    pub const fn max(self, other: Fixed) -> Fixed {
        if self.0 > other.0 {
            self
        } else {
            other
        }
    }

    #[inline]
    pub const fn clamp(self, low: Fixed, high: Fixed) -> Fixed {
        self.max(low).min(high)
    }

    /// Whether the raw value fits in 32 bits, i.e. products with another
    /// usable value cannot overflow.
    #[inline]
    pub const fn is_usable(self) -> bool {
        self.0 >= Self::USABLE_MIN.0 && self.0 <= Self::USABLE_MAX.0
    }

    // ========================================================================
    // Arithmetic Variants
    // ========================================================================

    /// Multiply without the rounding bias: the 128-bit product is shifted
    /// down with plain truncation. Exists for call sites that must match
    /// the historical truncating convention instead of round-half-up.
    #[inline]
    pub const fn mul_truncate(self, rhs: Fixed) -> Fixed {
        Fixed((((self.0 as i128) * (rhs.0 as i128)) >> Self::FRAC_BITS) as i64)
    }

    #[inline]
    pub const fn checked_add(self, rhs: Fixed) -> Option<Fixed> {
        match self.0.checked_add(rhs.0) {
            Some(raw) => Some(Fixed(raw)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_sub(self, rhs: Fixed) -> Option<Fixed> {
        match self.0.checked_sub(rhs.0) {
            Some(raw) => Some(Fixed(raw)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_mul(self, rhs: Fixed) -> Option<Fixed> {
        let wide = ((self.0 as i128) * (rhs.0 as i128) + (1 << (Self::FRAC_BITS - 1)))
            >> Self::FRAC_BITS;
        if wide > i64::MAX as i128 || wide < i64::MIN as i128 {
            None
        } else {
            Some(Fixed(wide as i64))
        }
    }

    #[inline]
    pub const fn checked_div(self, rhs: Fixed) -> Option<Fixed> {
        if rhs.0 == 0 {
            return None;
        }
        let wide = ((self.0 as i128) << Self::FRAC_BITS) / (rhs.0 as i128);
        if wide > i64::MAX as i128 || wide < i64::MIN as i128 {
            None
        } else {
            Some(Fixed(wide as i64))
        }
    }

    #[inline]
    pub const fn saturating_add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub const fn saturating_sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_sub(rhs.0))
    }

    #[inline]
    pub const fn saturating_mul(self, rhs: Fixed) -> Fixed {
        let wide = ((self.0 as i128) * (rhs.0 as i128) + (1 << (Self::FRAC_BITS - 1)))
            >> Self::FRAC_BITS;
        if wide > i64::MAX as i128 {
            Self::MAX
        } else if wide < i64::MIN as i128 {
            Self::MIN
        } else {
            Fixed(wide as i64)
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

impl std::ops::Add for Fixed {
    type Output = Fixed;
    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl std::ops::Sub for Fixed {
    type Output = Fixed;
    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl std::ops::Neg for Fixed {
    type Output = Fixed;
    #[inline]
    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl std::ops::Mul for Fixed {
    type Output = Fixed;

    /// 128-bit product, plus a bias of half the scale, then an arithmetic
    /// shift right by 16: round-half-up on the product, not on the inputs.
    /// This exact rule must hold for cross-machine reproducibility.
    #[inline]
    fn mul(self, rhs: Fixed) -> Fixed {
        usable_check!(self, rhs);
        let wide =
            (self.0 as i128) * (rhs.0 as i128) + (1 << (Self::FRAC_BITS - 1));
        Fixed((wide >> Self::FRAC_BITS) as i64)
    }
}

impl std::ops::Div for Fixed {
    type Output = Fixed;

    /// Dividend widened and shifted left 16 bits, then truncating integer
    /// division. Dividing by zero panics.
    #[inline]
    fn div(self, rhs: Fixed) -> Fixed {
        let wide = ((self.0 as i128) << Self::FRAC_BITS) / (rhs.0 as i128);
        Fixed(wide as i64)
    }
}

impl std::ops::Rem for Fixed {
    type Output = Fixed;

    /// Remainder on raw values; both operands share the 2^16 scale, so no
    /// shift is needed. The remainder carries the dividend's sign.
    #[inline]
    fn rem(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 % rhs.0)
    }
}

impl std::ops::AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Fixed) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed) {
        *self = *self - rhs;
    }
}

impl std::ops::MulAssign for Fixed {
    #[inline]
    fn mul_assign(&mut self, rhs: Fixed) {
        *self = *self * rhs;
    }
}

impl std::ops::DivAssign for Fixed {
    #[inline]
    fn div_assign(&mut self, rhs: Fixed) {
        *self = *self / rhs;
    }
}

impl From<i32> for Fixed {
    #[inline]
    fn from(value: i32) -> Fixed {
        Fixed((value as i64) << Fixed::FRAC_BITS)
    }
}
