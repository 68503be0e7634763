//! Decimal text formatting and parsing.
//!
//! Output grammar is `-?[0-9]+(\.[0-9]{1,5})?` with trailing fractional
//! zeros trimmed; parsing accepts exactly that grammar (whitespace
//! trimmed) and rejects everything else. The five-digit fraction comes
//! from a precomputed rounding table indexed by the 16-bit fractional raw
//! value, and the parser applies the inverse rounding, so
//! `parse(format(x)) == x` holds for every raw value.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use thiserror::Error;

use crate::scalar::Fixed;

/// Reasons a decimal string fails to parse as a [`Fixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFixedError {
    /// No integer digits: empty input, whitespace, a lone sign, or a
    /// fraction with no numerator.
    #[error("empty input")]
    Empty,
    /// A character outside `[0-9]` (or a second separator) was found.
    #[error("invalid character {0:?}")]
    InvalidDigit(char),
    /// A decimal separator with nothing after it.
    #[error("missing digits after the decimal separator")]
    EmptyFraction,
    /// More fraction digits than the five the format defines.
    #[error("fraction has {0} digits, at most 5 are representable")]
    FractionTooLong(usize),
    /// Integer part outside the 48-bit integer range.
    #[error("integer part exceeds the representable range")]
    IntegerOverflow,
}

/// Five-decimal-digit rendering of each 16-bit fractional raw value,
/// rounded half up. Indexed by `raw & 0xFFFF`; entries never reach
/// 100000, so the fraction can never carry into the integer part.
static FRAC10: LazyLock<Box<[u32]>> = LazyLock::new(|| {
    (0u64..65536)
        .map(|frac| ((frac * 100_000 + 32_768) >> 16) as u32)
        .collect()
});

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = (self.raw() as i128).unsigned_abs();
        let int_part = magnitude >> Fixed::FRAC_BITS;
        let digits = FRAC10[(magnitude & 0xFFFF) as usize];
        let sign = if self.raw() < 0 { "-" } else { "" };
        if digits == 0 {
            write!(f, "{}{}", sign, int_part)
        } else {
            let mut rendered = format!("{:05}", digits);
            while rendered.ends_with('0') {
                rendered.pop();
            }
            write!(f, "{}{}.{}", sign, int_part, rendered)
        }
    }
}

impl FromStr for Fixed {
    type Err = ParseFixedError;

    fn from_str(input: &str) -> Result<Fixed, ParseFixedError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseFixedError::Empty);
        }
        let negative = trimmed.starts_with('-');
        let body = trimmed.strip_prefix('-').unwrap_or(trimmed);

        let (int_str, frac_str) = match body.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (body, None),
        };
        if int_str.is_empty() {
            return Err(ParseFixedError::Empty);
        }
        let mut int_part: u64 = 0;
        for c in int_str.chars() {
            let digit = c.to_digit(10).ok_or(ParseFixedError::InvalidDigit(c))?;
            int_part = int_part
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as u64))
                .ok_or(ParseFixedError::IntegerOverflow)?;
        }
        if int_part > (i64::MAX >> Fixed::FRAC_BITS) as u64 {
            return Err(ParseFixedError::IntegerOverflow);
        }

        let mut frac_scaled: u64 = 0;
        if let Some(frac) = frac_str {
            if frac.is_empty() {
                return Err(ParseFixedError::EmptyFraction);
            }
            if frac.len() > 5 {
                return Err(ParseFixedError::FractionTooLong(frac.len()));
            }
            for c in frac.chars() {
                let digit = c.to_digit(10).ok_or(ParseFixedError::InvalidDigit(c))?;
                frac_scaled = frac_scaled * 10 + digit as u64;
            }
            for _ in frac.len()..5 {
                frac_scaled *= 10;
            }
        }
        // Inverse of the FRAC10 rounding: nearest raw unit, ties up.
        let frac_raw = (frac_scaled * 65536 + 50_000) / 100_000;

        let raw = ((int_part as i64) << Fixed::FRAC_BITS) + frac_raw as i64;
        Ok(Fixed::from_raw(if negative { -raw } else { raw }))
    }
}
