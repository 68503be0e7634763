//! Table-driven transcendental functions.
//!
//! Square root and log2 extend their tables to the full input range by
//! splitting the magnitude into an even power-of-two exponent and a
//! mantissa normalized into the table window; trig reduces angles through
//! the high-precision 2*pi and pi encodings; everything resolves in O(1)
//! with no iterative refinement. Domain errors panic at the call site
//! except asin/acos, which return a sentinel by contract.

use crate::precise::PreciseDivisor;
use crate::scalar::Fixed;

mod tables;

/// Saturation threshold for [`Fixed::exp`]: ln of the largest
/// representable value, 47 * ln 2.
const EXP_ARG_MAX: Fixed = Fixed::from_raw(crate::consts::q64_to_q16(47 * crate::consts::LN2_Q64));
/// Below this the exact result is under half a raw unit: e^-12 rounds
/// to zero on the Q16 grid.
const EXP_ARG_MIN: Fixed = Fixed::from_raw(-12 << 16);

// Rounded Q16 renderings of 1/6 and 1/24 for the exp polynomial.
const SIXTH: Fixed = Fixed::from_raw((Fixed::SCALE + 3) / 6);
const TWENTY_FOURTH: Fixed = Fixed::from_raw((Fixed::SCALE + 12) / 24);

impl Fixed {
    // ========================================================================
    // Square Root
    // ========================================================================

    /// Square root. Panics on negative input; use
    /// [`sqrt_unchecked`](Self::sqrt_unchecked) where non-negativity is
    /// already guaranteed.
    pub fn sqrt(self) -> Fixed {
        if self.raw() < 0 {
            panic!("sqrt of negative value {}", self);
        }
        self.sqrt_unchecked()
    }

    /// Square root without the domain check.
    ///
    /// Callers must guarantee a non-negative input — the natural use is a
    /// magnitude computed from a sum of squares. The input is widened by
    /// 16 bits, split into an even exponent and a mantissa in
    /// [2^30, 2^32), resolved through the root table with linear
    /// interpolation, and scaled back by half the exponent.
    pub fn sqrt_unchecked(self) -> Fixed {
        debug_assert!(self.raw() >= 0, "sqrt_unchecked on negative value");
        if self.raw() <= 0 {
            return Fixed::ZERO;
        }
        let wide = (self.raw() as u128) << Fixed::FRAC_BITS;
        let bit = 127 - wide.leading_zeros() as i32;
        let shift = if (bit - 30) % 2 == 0 { bit - 30 } else { bit - 31 };
        let mantissa = if shift >= 0 {
            (wide >> shift) as u64
        } else {
            (wide << -shift) as u64
        };
        let table = &*tables::SQRT;
        let index = (mantissa >> 22) as usize;
        let t = mantissa & ((1 << 22) - 1);
        let a = table[index] as u64;
        let b = table[index + 1] as u64;
        let root = a + (((b - a) * t) >> 22);
        let half_exp = shift / 2;
        Fixed::from_raw(if half_exp >= 0 {
            (root << half_exp) as i64
        } else {
            (root >> -half_exp) as i64
        })
    }

    // ========================================================================
    // Logarithms & Exponential
    // ========================================================================

    /// Base-2 logarithm. Panics on non-positive input.
    ///
    /// Floor-log2 comes from a bit scan; the remaining mantissa is
    /// normalized into a 256-step window over [1, 2) and refined with a
    /// quadratic (difference-of-differences) correction between adjacent
    /// table entries.
    pub fn log2(self) -> Fixed {
        if self.raw() <= 0 {
            panic!("log2 of non-positive value {}", self);
        }
        let raw = self.raw() as u64;
        let bit = 63 - raw.leading_zeros() as i32;
        let int_part = (bit - Fixed::FRAC_BITS as i32) as i64;
        let mantissa = if bit >= 30 {
            raw >> (bit - 30)
        } else {
            raw << (30 - bit)
        };
        let offset = mantissa - (1 << 30);
        let j = (offset >> 22) as usize;
        let t = (offset & ((1 << 22) - 1)) as i128;

        let table = &*tables::LOG2;
        let t0 = table[j] as i128;
        let d1 = table[j + 1] as i128 - t0;
        let d2 = table[j + 2] as i128 - 2 * (table[j + 1] as i128) + t0;
        let val = t0 + ((d1 * t) >> 22) + ((d2 * t * (t - (1 << 22))) >> 45);
        let frac = ((val + (1 << 15)) >> 16) as i64;
        Fixed::from_raw((int_part << Fixed::FRAC_BITS) + frac)
    }

    /// Natural logarithm: log2 divided by the high-precision log2(e).
    pub fn ln(self) -> Fixed {
        self.log2() / PreciseDivisor::LOG2_E
    }

    /// Base-10 logarithm: log2 divided by the high-precision log2(10).
    pub fn log10(self) -> Fixed {
        self.log2() / PreciseDivisor::LOG2_10
    }

    /// e^self with bilateral saturation: arguments at or above ln(MAX)
    /// return [`Fixed::MAX`], arguments below -12 return zero.
    ///
    /// The integer part indexes the e^n scale table; the fractional
    /// remainder in [0, 1) goes through a fourth-order polynomial; one
    /// multiply combines them.
    pub fn exp(self) -> Fixed {
        if self >= EXP_ARG_MAX {
            return Fixed::MAX;
        }
        if self < EXP_ARG_MIN {
            return Fixed::ZERO;
        }
        let n = self.raw() >> Fixed::FRAC_BITS;
        let f = Fixed::from_raw(self.raw() - (n << Fixed::FRAC_BITS));
        // 1 + f(1 + f(1/2 + f(1/6 + f/24)))
        let poly = Fixed::ONE
            + f * (Fixed::ONE + f * (Fixed::HALF + f * (SIXTH + f * TWENTY_FOURTH)));
        let scale = Fixed::from_raw(tables::EXP_INT[(n + 12) as usize]);
        scale.saturating_mul(poly)
    }

    // ========================================================================
    // Trigonometry
    // ========================================================================

    /// Sine and cosine from a single table lookup.
    ///
    /// The angle (radians) is reduced into [0, 2*pi) through the
    /// high-precision 2*pi with sign folding; each table entry packs the
    /// cosine in its high 32 bits and the signed sine in its low 32 bits,
    /// so no second index computation is needed.
    pub fn sin_cos(self) -> (Fixed, Fixed) {
        let two_pi = PreciseDivisor::TWO_PI.raw() as i128;
        let mut rem = ((self.raw() as i128) << Fixed::FRAC_BITS) % two_pi;
        if rem < 0 {
            rem += two_pi;
        }
        let size = tables::SINCOS_SIZE as i128;
        let index = ((rem * size + two_pi / 2) / two_pi) as usize % tables::SINCOS_SIZE;
        let entry = tables::SINCOS[index];
        let cos = (entry >> 32) as u32 as i32;
        let sin = entry as u32 as i32;
        (Fixed::from_raw(sin as i64), Fixed::from_raw(cos as i64))
    }

    pub fn sin(self) -> Fixed {
        self.sin_cos().0
    }

    pub fn cos(self) -> Fixed {
        self.sin_cos().1
    }

    /// Tangent from its own table over [0, pi/2), folded by oddness and
    /// pi-periodicity. The asymptote saturates to [`Fixed::MAX`].
    pub fn tan(self) -> Fixed {
        let pi = PreciseDivisor::PI.raw() as i128;
        let half_pi = pi / 2;
        let mut rem = ((self.raw() as i128) << Fixed::FRAC_BITS) % pi;
        if rem < 0 {
            rem += pi;
        }
        let negate = rem > half_pi;
        if negate {
            rem = pi - rem;
        }
        let size = tables::TAN_SIZE as i128;
        let j = ((rem * size + half_pi / 2) / half_pi) as usize;
        let value = if j >= tables::TAN_SIZE {
            i64::MAX
        } else {
            tables::TAN[j]
        };
        Fixed::from_raw(if negate { value.wrapping_neg() } else { value })
    }

    /// Arcsine over the closed domain [-1, 1], by direct table lookup.
    ///
    /// Out-of-domain input returns [`Fixed::MIN`] as a sentinel rather
    /// than panicking; callers rely on that.
    pub fn asin(self) -> Fixed {
        let raw = self.raw();
        if !(-65536..=65536).contains(&raw) {
            return Fixed::MIN;
        }
        Fixed::from_raw(tables::INVERSE.asin[(raw + 65536) as usize] as i64)
    }

    /// Arccosine over [-1, 1]; same sentinel contract as
    /// [`asin`](Self::asin).
    pub fn acos(self) -> Fixed {
        let raw = self.raw();
        if !(-65536..=65536).contains(&raw) {
            return Fixed::MIN;
        }
        Fixed::from_raw(tables::INVERSE.acos[(raw + 65536) as usize] as i64)
    }

    /// Arctangent through three precision bands: a direct table on
    /// [0, 1], a mid band on (1, 64], a coarse band on (64, 16384], and
    /// pi/2 beyond that; negatives fold by oddness.
    pub fn atan(self) -> Fixed {
        let negative = self.raw() < 0;
        let x = self.abs().raw();
        let inv = &*tables::INVERSE;
        let value = if x < 0 {
            // abs() wrapped on Fixed::MIN; the magnitude is far past the
            // last band either way.
            Fixed::HALF_PI.raw()
        } else if x <= 1 << 16 {
            inv.atan_lo[((x + 8) >> 4) as usize] as i64
        } else if x <= 64 << 16 {
            inv.atan_mid[((x - (1 << 16) + 128) >> 8) as usize] as i64
        } else if x <= 16384 << 16 {
            inv.atan_hi[(((x + 32768) >> 16) - 64) as usize] as i64
        } else {
            Fixed::HALF_PI.raw()
        };
        Fixed::from_raw(if negative { -value } else { value })
    }

    /// Four-quadrant arctangent of `self / x`, with `atan2(0, 0) == 0`.
    pub fn atan2(self, x: Fixed) -> Fixed {
        if x == Fixed::ZERO {
            return if self > Fixed::ZERO {
                Fixed::HALF_PI
            } else if self < Fixed::ZERO {
                -Fixed::HALF_PI
            } else {
                Fixed::ZERO
            };
        }
        // Quotient clamped past the last atan band so extreme ratios
        // cannot wrap the 64-bit raw value.
        let limit = 16385i128 << Fixed::FRAC_BITS;
        let quotient = (((self.raw() as i128) << Fixed::FRAC_BITS) / (x.raw() as i128))
            .clamp(-limit, limit);
        let base = Fixed::from_raw(quotient as i64).atan();
        if x > Fixed::ZERO {
            base
        } else if self >= Fixed::ZERO {
            base + Fixed::PI
        } else {
            base - Fixed::PI
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fx(v: f64) -> Fixed {
        Fixed::from_f64(v)
    }

    #[test]
    fn sqrt_of_perfect_squares() {
        for n in [0i64, 1, 4, 9, 16, 144, 1024, 65536, 1 << 23] {
            assert_eq!(
                Fixed::from_int(n * n).sqrt(),
                Fixed::from_int(n),
                "sqrt({})",
                n * n
            );
        }
        assert_eq!(Fixed::from_raw(1 << 14).sqrt(), Fixed::from_raw(1 << 15)); // sqrt(1/4) = 1/2
    }

    #[test]
    fn sqrt_squares_back_within_table_resolution() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..20_000 {
            let x = Fixed::from_raw(rng.i64(0..=i32::MAX as i64));
            let root = x.sqrt();
            let squared = root * root;
            let tolerance = (x.raw() >> 10).max(2);
            assert!(
                (squared - x).abs().raw() <= tolerance,
                "sqrt({}) = {} squares to {}",
                x,
                root,
                squared
            );
        }
    }

    #[test]
    fn sqrt_is_monotonic_across_exponent_steps() {
        // Crossing a power of four changes the exponent path; the result
        // must not step backwards there.
        for base in [1i64 << 14, 1 << 16, 1 << 18, 1 << 30, 1 << 46] {
            for raw in (base - 64)..(base + 64) {
                let a = Fixed::from_raw(raw).sqrt_unchecked();
                let b = Fixed::from_raw(raw + 1).sqrt_unchecked();
                assert!(b >= a, "sqrt not monotonic at raw {}", raw);
            }
        }
    }

    #[test]
    #[should_panic(expected = "sqrt of negative")]
    fn sqrt_rejects_negative() {
        let _ = Fixed::from_int(-1).sqrt();
    }

    #[test]
    fn log2_exact_on_powers_of_two() {
        for k in -16i64..=46 {
            let x = Fixed::from_raw(1i64 << (k + 16));
            assert_eq!(x.log2(), Fixed::from_int(k), "log2(2^{})", k);
        }
    }

    #[test]
    fn log_family_reference_points() {
        assert!((Fixed::E.ln() - Fixed::ONE).abs().raw() <= 4);
        assert!((Fixed::from_int(10).log10() - Fixed::ONE).abs().raw() <= 4);
        assert!((Fixed::from_int(1000).log10() - Fixed::from_int(3)).abs().raw() <= 4);
        let x = fx(2.5);
        assert!((x.log2().to_f64() - 2.5f64.log2()).abs() < 1e-4);
        assert!((x.ln().to_f64() - 2.5f64.ln()).abs() < 1e-4);
    }

    #[test]
    #[should_panic(expected = "log2 of non-positive")]
    fn log2_rejects_zero() {
        let _ = Fixed::ZERO.log2();
    }

    #[test]
    fn exp_integer_grid_and_saturation() {
        assert_eq!(Fixed::ZERO.exp(), Fixed::ONE);
        assert_eq!(Fixed::ONE.exp(), Fixed::E);
        assert_eq!(Fixed::from_int(40).exp(), Fixed::MAX);
        assert_eq!(Fixed::from_int(-13).exp(), Fixed::ZERO);
        assert_eq!(Fixed::MIN.exp(), Fixed::ZERO);
        assert_eq!(Fixed::MAX.exp(), Fixed::MAX);
        for n in -5i64..=5 {
            let got = Fixed::from_int(n).exp().to_f64();
            let want = (n as f64).exp();
            assert!((got - want).abs() <= want * 1e-4 + 2e-5, "exp({})", n);
        }
    }

    #[test]
    fn exp_fractional_polynomial_accuracy() {
        // The fourth-order polynomial is a documented simplification: the
        // worst error sits near f -> 1 at about 1 percent.
        for raw in (-500_000i64..=500_000).step_by(7919) {
            let x = Fixed::from_raw(raw);
            let got = x.exp().to_f64();
            let want = x.to_f64().exp();
            assert!(
                (got - want).abs() <= want * 0.011 + 2e-5,
                "exp({}) = {} want {}",
                x,
                got,
                want
            );
        }
    }

    #[test]
    fn ln_inverts_exp_coarsely() {
        for raw in [65536i64, 180_000, 400_000, 900_000] {
            let x = Fixed::from_raw(raw);
            let back = x.exp().ln();
            assert!(
                (back - x).abs().raw() <= 700,
                "ln(exp({})) = {}",
                x,
                back
            );
        }
    }

    #[test]
    fn sin_cos_key_angles() {
        assert_eq!(Fixed::ZERO.sin(), Fixed::ZERO);
        assert_eq!(Fixed::ZERO.cos(), Fixed::ONE);
        assert_eq!(Fixed::HALF_PI.sin(), Fixed::ONE);
        assert_eq!(Fixed::HALF_PI.cos(), Fixed::ZERO);
        assert_eq!(Fixed::PI.sin(), Fixed::ZERO);
        assert_eq!(Fixed::PI.cos(), Fixed::NEG_ONE);
        assert_eq!((-Fixed::HALF_PI).sin(), Fixed::NEG_ONE);
        // 2 pi wraps back to zero.
        assert_eq!(Fixed::TWO_PI.sin(), Fixed::ZERO);
    }

    #[test]
    fn sin_cos_match_float_reference() {
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..5_000 {
            let x = Fixed::from_raw(rng.i64(-40_000_000..=40_000_000));
            let (s, c) = x.sin_cos();
            let xf = x.to_f64();
            assert!((s.to_f64() - xf.sin()).abs() < 3e-4, "sin({})", xf);
            assert!((c.to_f64() - xf.cos()).abs() < 3e-4, "cos({})", xf);
        }
    }

    #[test]
    fn tan_folding_and_asymptote() {
        assert_eq!(Fixed::ZERO.tan(), Fixed::ZERO);
        assert!((fx(0.7853981).tan() - Fixed::ONE).abs().raw() <= 48);
        assert_eq!(Fixed::HALF_PI.tan().raw(), i64::MAX.wrapping_neg());
        assert!((-fx(0.5)).tan() == -(fx(0.5).tan()));
        // Periodic: tan(x + pi) == tan(x) up to reduction rounding.
        let x = fx(0.3);
        assert!((x.tan() - (x + Fixed::PI).tan()).abs().raw() <= 64);
    }

    #[test]
    fn asin_acos_domain_and_sentinel() {
        assert_eq!(Fixed::ZERO.asin(), Fixed::ZERO);
        assert_eq!(Fixed::ONE.asin(), Fixed::HALF_PI);
        assert_eq!(Fixed::NEG_ONE.asin(), -Fixed::HALF_PI);
        assert_eq!(Fixed::ONE.acos(), Fixed::ZERO);
        assert!((Fixed::NEG_ONE.acos() - Fixed::PI).abs().raw() <= 2);
        assert!((Fixed::ZERO.acos() - Fixed::HALF_PI).abs().raw() <= 2);
        // Out of domain: sentinel, not a panic.
        assert_eq!(fx(1.001).asin(), Fixed::MIN);
        assert_eq!(fx(-1.001).asin(), Fixed::MIN);
        assert_eq!(Fixed::from_int(7).acos(), Fixed::MIN);
    }

    #[test]
    fn asin_matches_float_reference() {
        for raw in (-65536i64..=65536).step_by(97) {
            let x = Fixed::from_raw(raw);
            let got = x.asin().to_f64();
            let want = x.to_f64().asin();
            // Resolution degrades near the endpoints where asin is steep.
            let tolerance = if raw.abs() > 65000 { 0.02 } else { 1e-3 };
            assert!((got - want).abs() < tolerance, "asin({})", x);
        }
    }

    #[test]
    fn atan_bands_against_reference() {
        for v in [0.0, 0.01, 0.25, 0.5, 0.99, 1.0, 1.5, 3.0, 10.0, 63.9, 64.5, 100.0, 5000.0] {
            let x = fx(v);
            let got = x.atan().to_f64();
            let want = v.atan();
            assert!((got - want).abs() < 2e-3, "atan({}) = {} want {}", v, got, want);
            assert!(((-x).atan().to_f64() + want).abs() < 2e-3);
        }
        // Beyond the last band the result pins to pi/2.
        assert_eq!(Fixed::from_int(20000).atan(), Fixed::HALF_PI);
        assert_eq!(Fixed::MIN.atan(), -Fixed::HALF_PI);
    }

    #[test]
    fn atan2_quadrants() {
        let quarter = Fixed::HALF_PI;
        assert_eq!(Fixed::ZERO.atan2(Fixed::ZERO), Fixed::ZERO);
        assert_eq!(Fixed::ONE.atan2(Fixed::ZERO), quarter);
        assert_eq!(Fixed::NEG_ONE.atan2(Fixed::ZERO), -quarter);
        assert_eq!(Fixed::ZERO.atan2(Fixed::ONE), Fixed::ZERO);
        assert_eq!(Fixed::ZERO.atan2(Fixed::NEG_ONE), Fixed::PI);
        let diag = Fixed::ONE.atan2(Fixed::ONE);
        assert!((diag.to_f64() - std::f64::consts::FRAC_PI_4).abs() < 1e-3);
        let back_left = Fixed::NEG_ONE.atan2(Fixed::NEG_ONE);
        assert!((back_left.to_f64() + 3.0 * std::f64::consts::FRAC_PI_4).abs() < 1e-3);
    }
}
