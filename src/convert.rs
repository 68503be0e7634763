//! Bit-exact IEEE float conversion.
//!
//! The safe paths ([`Fixed::from_f32`], [`Fixed::from_f64`]) decompose the
//! float's bit pattern — sign, biased exponent, mantissa with the implicit
//! leading bit restored — and shift the mantissa directly onto the Q16
//! grid. One shift, one truncation: no double rounding, and identical raw
//! output for identical input bits on every platform.
//!
//! The lossy paths ([`Fixed::from_f32_lossy`], [`Fixed::from_f64_lossy`])
//! multiply through the native float unit and round. They are faster and
//! can differ from the safe path by one raw unit for the same input, and
//! may differ across platforms; they exist for presentation-only values
//! that never feed the simulation. Both paths are kept deliberately.

use crate::scalar::Fixed;

/// Shift a float mantissa onto the Q16 grid, saturating on overflow and
/// truncating (toward zero, applied to the magnitude) on underflow.
fn shift_mantissa(mantissa: u64, shift: i32, negative: bool) -> Fixed {
    let magnitude = if shift >= 0 {
        if mantissa != 0 && shift > mantissa.leading_zeros() as i32 - 1 {
            return if negative { Fixed::MIN } else { Fixed::MAX };
        }
        mantissa << shift
    } else if shift > -64 {
        mantissa >> -shift
    } else {
        0
    };
    if negative {
        Fixed::from_raw(-(magnitude as i64))
    } else {
        Fixed::from_raw(magnitude as i64)
    }
}

impl Fixed {
    /// Deterministic conversion from `f64` by bit decomposition.
    ///
    /// NaN maps to zero; infinities saturate to [`Fixed::MAX`] /
    /// [`Fixed::MIN`], as do finite values outside the representable
    /// range. Fractional bits below 2^-16 are truncated.
    pub fn from_f64(value: f64) -> Fixed {
        let bits = value.to_bits();
        let negative = (bits >> 63) != 0;
        let biased = ((bits >> 52) & 0x7FF) as i32;
        let fraction = bits & ((1u64 << 52) - 1);

        if biased == 0x7FF {
            // Infinity or NaN.
            return if fraction != 0 {
                Fixed::ZERO
            } else if negative {
                Fixed::MIN
            } else {
                Fixed::MAX
            };
        }

        let (mantissa, exponent) = if biased == 0 {
            (fraction, -1022)
        } else {
            (fraction | (1 << 52), biased - 1023)
        };
        // raw = mantissa * 2^(exponent - 52 + 16)
        shift_mantissa(mantissa, exponent - 36, negative)
    }

    /// Deterministic conversion from `f32` by bit decomposition.
    pub fn from_f32(value: f32) -> Fixed {
        let bits = value.to_bits();
        let negative = (bits >> 31) != 0;
        let biased = ((bits >> 23) & 0xFF) as i32;
        let fraction = (bits & ((1u32 << 23) - 1)) as u64;

        if biased == 0xFF {
            return if fraction != 0 {
                Fixed::ZERO
            } else if negative {
                Fixed::MIN
            } else {
                Fixed::MAX
            };
        }

        let (mantissa, exponent) = if biased == 0 {
            (fraction, -126)
        } else {
            (fraction | (1 << 23), biased - 127)
        };
        // raw = mantissa * 2^(exponent - 23 + 16)
        shift_mantissa(mantissa, exponent - 7, negative)
    }

    /// Fast conversion through the native float unit.
    ///
    /// Rounds to the nearest raw value, so it can disagree with
    /// [`from_f64`](Self::from_f64) by one unit, and its result is not
    /// guaranteed to be identical across platforms. Presentation only;
    /// never feed the result into lockstep state.
    pub fn from_f64_lossy(value: f64) -> Fixed {
        Fixed::from_raw((value * Fixed::SCALE as f64).round() as i64)
    }

    /// `f32` variant of [`from_f64_lossy`](Self::from_f64_lossy).
    pub fn from_f32_lossy(value: f32) -> Fixed {
        Fixed::from_raw((value as f64 * Fixed::SCALE as f64).round() as i64)
    }

    /// Exact presentation value; every raw value below 2^53 round-trips.
    pub fn to_f64(self) -> f64 {
        self.raw() as f64 / Fixed::SCALE as f64
    }

    /// Presentation value, through the exact `f64` path.
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }
}
