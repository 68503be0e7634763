//! High-precision divisor encoding for hot constants.
//!
//! `PreciseDivisor` keeps 16 more fractional bits than [`Fixed`] (a Q32
//! fraction against the same integer magnitude) and participates only as
//! the right-hand side of division and modulo. Dividing many values by a
//! shared constant — angle conversions, the 2*pi reduction, decimal
//! fractions — through this encoding accumulates far less rounding error
//! than dividing by the Q16 rendering of the same constant.
//!
//! There is no public constructor from arbitrary runtime values: the type
//! exists for the fixed catalog of constants below.

use crate::consts;
use crate::scalar::Fixed;

/// A divisor-only fixed-point value with 32 fractional bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PreciseDivisor(i64);

impl PreciseDivisor {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = 32;

    pub const PI: PreciseDivisor = PreciseDivisor(consts::q64_to_q32(consts::PI_Q64));
    pub const TWO_PI: PreciseDivisor = PreciseDivisor(consts::q64_to_q32(consts::TWO_PI_Q64));
    pub const HALF_PI: PreciseDivisor = PreciseDivisor(consts::q64_to_q32(consts::HALF_PI_Q64));
    pub const E: PreciseDivisor = PreciseDivisor(consts::q64_to_q32(consts::E_Q64));
    pub const LN_2: PreciseDivisor = PreciseDivisor(consts::q64_to_q32(consts::LN2_Q64));
    pub const LOG2_E: PreciseDivisor = PreciseDivisor(consts::q64_to_q32(consts::LOG2_E_Q64));
    pub const LOG2_10: PreciseDivisor = PreciseDivisor(consts::q64_to_q32(consts::LOG2_10_Q64));
    pub const SQRT_2: PreciseDivisor = PreciseDivisor(consts::q64_to_q32(consts::SQRT2_Q64));
    /// Degrees per radian (180/pi).
    pub const DEG_PER_RAD: PreciseDivisor =
        PreciseDivisor(consts::q64_to_q32(consts::DEG_PER_RAD_Q64));
    /// Radians per degree (pi/180).
    pub const RAD_PER_DEG: PreciseDivisor =
        PreciseDivisor(consts::q64_to_q32(consts::RAD_PER_DEG_Q64));

    pub const TEN: PreciseDivisor = PreciseDivisor(10 << Self::FRAC_BITS);
    pub const HUNDRED: PreciseDivisor = PreciseDivisor(100 << Self::FRAC_BITS);
    pub const THOUSAND: PreciseDivisor = PreciseDivisor(1000 << Self::FRAC_BITS);
    pub const TENTH: PreciseDivisor = PreciseDivisor(consts::q64_to_q32((1 << 64) / 10));
    pub const HUNDREDTH: PreciseDivisor = PreciseDivisor(consts::q64_to_q32((1 << 64) / 100));
    pub const THOUSANDTH: PreciseDivisor = PreciseDivisor(consts::q64_to_q32((1 << 64) / 1000));

    /// The raw Q16.32 representation.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl std::ops::Div<PreciseDivisor> for Fixed {
    type Output = Fixed;

    /// Sign-extend the dividend into 128 bits and shift it up by the
    /// divisor's 32 fractional bits before the truncating divide; the
    /// quotient lands directly back on the Q16 grid.
    #[inline]
    fn div(self, rhs: PreciseDivisor) -> Fixed {
        let wide = ((self.raw() as i128) << PreciseDivisor::FRAC_BITS) / (rhs.0 as i128);
        Fixed::from_raw(wide as i64)
    }
}

impl std::ops::Rem<PreciseDivisor> for Fixed {
    type Output = Fixed;

    /// Shift the dividend up 16 bits to meet the divisor's scale, take the
    /// remainder in Q32, then narrow back down with an arithmetic shift.
    #[inline]
    fn rem(self, rhs: PreciseDivisor) -> Fixed {
        let wide = ((self.raw() as i128) << Fixed::FRAC_BITS) % (rhs.0 as i128);
        Fixed::from_raw((wide >> Fixed::FRAC_BITS) as i64)
    }
}
