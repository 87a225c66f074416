use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::{ReconError, Result};

/// Smallest radix a share value may be written in.
pub const MIN_BASE: u32 = 2;

/// Largest radix a share value may be written in; digits run `0-9` then `a-z`.
pub const MAX_BASE: u32 = 36;

/// Decodes `digits`, written most-significant digit first in radix `base`, into an exact
/// non-negative integer.
///
/// Letters are case-insensitive. No sign, prefix, separator or surrounding whitespace is accepted:
/// any such character is reported as an `InvalidDigit` at its (zero-based, in chars) position.
pub fn decode(digits: &str, base: u32) -> Result<BigInt> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(ReconError::UnsupportedBase { base });
    }

    if digits.is_empty() {
        return Err(ReconError::EmptyDigits);
    }

    let radix = BigInt::from(base);
    let mut acc = BigInt::zero();

    for (position, c) in digits.chars().enumerate() {
        // `to_digit` already rejects anything >= base, and anything outside [0-9a-zA-Z]
        let d = c.to_digit(base).ok_or(ReconError::InvalidDigit {
            digit: c,
            position,
            base,
        })?;

        acc = acc * &radix + d;
    }

    Ok(acc)
}
