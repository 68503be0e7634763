//! Lookup-table data for the transcendental engine.
//!
//! Every table is built once, on first use, by an integer-only generator:
//! Newton square roots, bit-by-bit log2, Q64 Taylor series for sine and
//! cosine, and monotone inversion walks for the arc functions. No float
//! ever touches table content, so the tables are bit-identical on every
//! platform without shipping binary assets.

use std::sync::LazyLock;
use std::time::Instant;

use crate::consts::{isqrt_u128, log2_frac_q64, mul_q64, HALF_PI_Q64};
use crate::scalar::Fixed;

/// Entries in the combined sine/cosine table over [0, 2*pi).
pub(crate) const SINCOS_SIZE: usize = 16384;
/// Entries in the tangent table over [0, pi/2).
pub(crate) const TAN_SIZE: usize = 8192;

/// sin and cos of `x` (Q64, `x` in [0, ~pi/2]) by Taylor series.
///
/// Terms are generated with the split Q64 multiply, so intermediates stay
/// inside u128. Truncation near pi/2 can push cosine a few ulp below
/// zero; it is clamped since the callers index non-negative quadrants.
fn sin_cos_q64(x: u128) -> (u128, u128) {
    let x2 = mul_q64(x, x);

    let mut sin = x as i128;
    let mut term = x;
    let mut k = 1u128;
    while k <= 16 {
        term = mul_q64(term, x2) / ((2 * k) * (2 * k + 1));
        if term == 0 {
            break;
        }
        if k % 2 == 1 {
            sin -= term as i128;
        } else {
            sin += term as i128;
        }
        k += 1;
    }

    let mut cos = 1i128 << 64;
    let mut term = 1u128 << 64;
    let mut k = 1u128;
    while k <= 16 {
        term = mul_q64(term, x2) / ((2 * k - 1) * (2 * k));
        if term == 0 {
            break;
        }
        if k % 2 == 1 {
            cos -= term as i128;
        } else {
            cos += term as i128;
        }
        k += 1;
    }

    (sin.max(0) as u128, cos.max(0) as u128)
}

#[inline]
fn q64_to_q16_round(v: u128) -> i64 {
    ((v + (1 << 47)) >> 48) as i64
}

/// Square-root mantissa table: entry `i` is the integer root of
/// `i << 22`, so indices 256..=1024 cover mantissas in [2^30, 2^32].
pub(crate) static SQRT: LazyLock<Box<[u32]>> = LazyLock::new(|| {
    let start = Instant::now();
    let table: Box<[u32]> = (0u128..=1024)
        .map(|i| isqrt_u128(i << 22) as u32)
        .collect();
    tracing::debug!(entries = table.len(), elapsed = ?start.elapsed(), "built sqrt table");
    table
});

/// log2 mantissa table in Q32: entry `j` is log2(1 + j/256). Two entries
/// past the window feed the quadratic interpolation.
pub(crate) static LOG2: LazyLock<Box<[u64]>> = LazyLock::new(|| {
    let start = Instant::now();
    let table: Box<[u64]> = (0u128..258)
        .map(|j| {
            let x = (1u128 << 64) + (j << 56);
            if x >= 2u128 << 64 {
                (1u64 << 32) + (log2_frac_q64(x >> 1) >> 32) as u64
            } else {
                (log2_frac_q64(x) >> 32) as u64
            }
        })
        .collect();
    tracing::debug!(entries = table.len(), elapsed = ?start.elapsed(), "built log2 table");
    table
});

/// Integer-part scale factors for exp: e^n in Q16 for n in [-12, 32],
/// indexed by n + 12. Derived from a Q32 power chain off the Q64 value
/// of e, so each entry is within one raw unit of exact.
pub(crate) static EXP_INT: LazyLock<[i64; 45]> = LazyLock::new(|| {
    let e_q32 = (crate::consts::E_Q64 >> 32) as u128;
    let mut table = [0i64; 45];
    let mut powers = [0u128; 33];
    let mut p = 1u128 << 32;
    for n in 0..=32usize {
        powers[n] = p;
        table[n + 12] = ((p + (1 << 15)) >> 16) as i64;
        p = (p * e_q32) >> 32;
    }
    for n in 1..=12usize {
        let inverse = (1u128 << 64) / powers[n];
        table[12 - n] = ((inverse + (1 << 15)) >> 16) as i64;
    }
    table
});

/// Combined sine/cosine table over [0, 2*pi): each entry packs the cosine
/// in the high 32 bits and the signed sine in the low 32 bits, so one
/// index computation serves both functions.
pub(crate) static SINCOS: LazyLock<Box<[u64]>> = LazyLock::new(|| {
    let start = Instant::now();
    let quarter = SINCOS_SIZE / 4;
    let mut entries = Vec::with_capacity(SINCOS_SIZE);
    for i in 0..SINCOS_SIZE {
        let (q, j) = (i / quarter, i % quarter);
        let phi = HALF_PI_Q64 * j as u128 / quarter as u128;
        let (s, c) = sin_cos_q64(phi);
        let s16 = q64_to_q16_round(s);
        let c16 = q64_to_q16_round(c);
        let (sin_v, cos_v) = match q {
            0 => (s16, c16),
            1 => (c16, -s16),
            2 => (-s16, -c16),
            _ => (-c16, s16),
        };
        entries.push((((cos_v as i32 as u32) as u64) << 32) | (sin_v as i32 as u32) as u64);
    }
    tracing::debug!(entries = SINCOS_SIZE, elapsed = ?start.elapsed(), "built sin/cos table");
    entries.into_boxed_slice()
});

/// Tangent table over [0, pi/2); the asymptote itself is handled by the
/// lookup, which saturates past the last entry.
pub(crate) static TAN: LazyLock<Box<[i64]>> = LazyLock::new(|| {
    let start = Instant::now();
    let table: Box<[i64]> = (0..TAN_SIZE)
        .map(|j| {
            let phi = HALF_PI_Q64 * j as u128 / TAN_SIZE as u128;
            let (s, c) = sin_cos_q64(phi);
            (((s << 16) + c / 2) / c) as i64
        })
        .collect();
    tracing::debug!(entries = TAN_SIZE, elapsed = ?start.elapsed(), "built tan table");
    table
});

/// Direct tables for the arc functions.
pub(crate) struct InverseTables {
    /// asin over raw [-1, 1], indexed by `raw + 2^16`.
    pub asin: Box<[i32]>,
    /// acos over the same index domain.
    pub acos: Box<[i32]>,
    /// atan on [0, 1], indexed by `raw >> 4`.
    pub atan_lo: Box<[i32]>,
    /// atan on (1, 64], indexed by `(raw - 2^16) >> 8`.
    pub atan_mid: Box<[i32]>,
    /// atan on (64, 16384], indexed by `(raw >> 16) - 64`.
    pub atan_hi: Box<[i32]>,
}

/// One monotone walk over theta in [0, pi/2] fills every arc table: sine
/// crossings invert into asin, tangent crossings into the three atan
/// bands, and acos falls out of asin by complement.
pub(crate) static INVERSE: LazyLock<InverseTables> = LazyLock::new(|| {
    let start = Instant::now();
    let half_pi = Fixed::HALF_PI.raw();

    let mut asin_pos = vec![0i32; 65537];
    let mut atan_lo = vec![0i32; 4097];
    let mut atan_mid = vec![0i32; 16129];
    let mut atan_hi = vec![0i32; 16321];
    let (mut sv, mut lo, mut mid, mut hi) = (0usize, 0usize, 0usize, 0usize);

    for theta in 0..=half_pi {
        let (s, c) = sin_cos_q64((theta as u128) << 48);
        let s16 = q64_to_q16_round(s);
        while sv <= 65536 && (sv as i64) <= s16 {
            asin_pos[sv] = theta as i32;
            sv += 1;
        }
        if c > 0 {
            let t16 = (((s << 16) + c / 2) / c) as i64;
            while lo <= 4096 && ((lo as i64) << 4) <= t16 {
                atan_lo[lo] = theta as i32;
                lo += 1;
            }
            while mid <= 16128 && (1 << 16) + ((mid as i64) << 8) <= t16 {
                atan_mid[mid] = theta as i32;
                mid += 1;
            }
            while hi <= 16320 && ((64 + hi as i64) << 16) <= t16 {
                atan_hi[hi] = theta as i32;
                hi += 1;
            }
        }
    }
    // The walk covers every target before theta reaches pi/2; anything
    // left (possible only at the very top of a band) pins to pi/2.
    while sv <= 65536 {
        asin_pos[sv] = half_pi as i32;
        sv += 1;
    }
    while lo <= 4096 {
        atan_lo[lo] = half_pi as i32;
        lo += 1;
    }
    while mid <= 16128 {
        atan_mid[mid] = half_pi as i32;
        mid += 1;
    }
    while hi <= 16320 {
        atan_hi[hi] = half_pi as i32;
        hi += 1;
    }
    // The endpoint is exact by definition, not by sine-crossing: the
    // rounded sine reaches 1.0 a few hundred raw units early.
    asin_pos[65536] = half_pi as i32;

    let mut asin = vec![0i32; 131073];
    let mut acos = vec![0i32; 131073];
    for (i, slot) in asin.iter_mut().enumerate() {
        let v = i as i64 - 65536;
        let a = if v >= 0 {
            asin_pos[v as usize]
        } else {
            -asin_pos[(-v) as usize]
        };
        *slot = a;
        acos[i] = half_pi as i32 - a;
    }

    tracing::debug!(elapsed = ?start.elapsed(), "built arc-function tables");
    InverseTables {
        asin: asin.into_boxed_slice(),
        acos: acos.into_boxed_slice(),
        atan_lo: atan_lo.into_boxed_slice(),
        atan_mid: atan_mid.into_boxed_slice(),
        atan_hi: atan_hi.into_boxed_slice(),
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taylor_matches_float_reference() {
        for i in 0..=64u128 {
            let x = HALF_PI_Q64 * i / 64;
            let (s, c) = sin_cos_q64(x);
            let xf = x as f64 / 18446744073709551616.0;
            assert!((s as f64 / 18446744073709551616.0 - xf.sin()).abs() < 1e-9);
            assert!((c as f64 / 18446744073709551616.0 - xf.cos()).abs() < 1e-9);
        }
    }

    #[test]
    fn sqrt_table_is_monotonic() {
        let table = &*SQRT;
        for i in 257..=1024 {
            assert!(table[i] >= table[i - 1]);
        }
        assert_eq!(table[256], 1 << 15);
        assert_eq!(table[1024], 1 << 16);
    }

    #[test]
    fn log2_table_is_monotonic_and_anchored() {
        let table = &*LOG2;
        assert_eq!(table[0], 0);
        assert_eq!(table[256], 1 << 32);
        for j in 1..258 {
            assert!(table[j] > table[j - 1]);
        }
    }

    #[test]
    fn exp_table_anchors() {
        let table = &*EXP_INT;
        assert_eq!(table[12], Fixed::ONE.raw()); // e^0
        assert_eq!(table[13], Fixed::E.raw()); // e^1
        assert!((table[11] as f64 / 65536.0 - (-1.0f64).exp()).abs() < 1e-4);
        assert!((table[44] as f64 / 65536.0 - 32.0f64.exp()).abs() / 32.0f64.exp() < 1e-6);
    }

    #[test]
    fn sincos_packing_quadrants() {
        let table = &*SINCOS;
        let unpack = |e: u64| ((e >> 32) as u32 as i32, e as u32 as i32);
        assert_eq!(unpack(table[0]), (65536, 0));
        assert_eq!(unpack(table[4096]), (0, 65536));
        assert_eq!(unpack(table[8192]), (-65536, 0));
        assert_eq!(unpack(table[12288]), (0, -65536));
    }

    #[test]
    fn arc_tables_are_monotonic() {
        let inv = &*INVERSE;
        for i in 1..inv.asin.len() {
            assert!(inv.asin[i] >= inv.asin[i - 1]);
            assert!(inv.acos[i] <= inv.acos[i - 1]);
        }
        for w in inv.atan_lo.windows(2) {
            assert!(w[1] >= w[0]);
        }
        assert_eq!(inv.asin[65536], 0); // asin(0)
        assert_eq!(inv.asin[131072], Fixed::HALF_PI.raw() as i32);
        assert_eq!(inv.asin[0], -(Fixed::HALF_PI.raw() as i32));
    }
}
