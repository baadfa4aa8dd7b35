//! Number-theoretic helpers built on [`Integer`] arithmetic.

use super::super::error::ArithmeticError;
use super::Integer;

/// Greatest common divisor by Euclid's algorithm.  The result is never
/// negative, except for `gcd(MIN, 0)` whose true value does not fit.
pub fn gcd<const NBITS: usize, const NBYTES: usize>(
    a: Integer<NBITS, NBYTES>,
    b: Integer<NBITS, NBYTES>,
) -> Integer<NBITS, NBYTES> {
    let mut a = a;
    let mut b = b;
    while !b.is_zero() {
        let r = a % b;
        a = b;
        b = r;
    }
    a.wrapping_abs()
}

/// Raises `base` to the power `exponent` by repeated squaring,
/// wrapping modulo `2^NBITS`.
///
/// A negative exponent gives zero (the integer part of the reciprocal)
/// unless `base` is 1 or -1.
pub fn ipow<const NBITS: usize, const NBYTES: usize>(
    base: Integer<NBITS, NBYTES>,
    exponent: Integer<NBITS, NBYTES>,
) -> Integer<NBITS, NBYTES> {
    if exponent.is_negative() {
        return if base == 1 {
            Integer::<NBITS, NBYTES>::ONE
        } else if base == -1 {
            if exponent.is_odd() {
                base
            } else {
                Integer::<NBITS, NBYTES>::ONE
            }
        } else {
            Integer::<NBITS, NBYTES>::ZERO
        };
    }
    let mut result = Integer::<NBITS, NBYTES>::ONE;
    let mut square = base;
    let mut remaining = exponent;
    while !remaining.is_zero() {
        if remaining.is_odd() {
            result *= square;
        }
        remaining >>= 1;
        if !remaining.is_zero() {
            square *= square;
        }
    }
    result
}

/// Computes `base^exponent mod modulus` by repeated squaring.  The
/// result lies in `0..|modulus|`.
///
/// Intermediate products are held in `NBITS` bits, so the result is
/// exact only when `|modulus|` is below `2^((NBITS-1)/2)`.
pub fn pow_mod<const NBITS: usize, const NBYTES: usize>(
    base: Integer<NBITS, NBYTES>,
    exponent: Integer<NBITS, NBYTES>,
    modulus: Integer<NBITS, NBYTES>,
) -> Result<Integer<NBITS, NBYTES>, ArithmeticError> {
    if modulus.is_zero() {
        return Err(ArithmeticError::DivideByZero);
    }
    if exponent.is_negative() {
        return Err(ArithmeticError::NegativeExponent);
    }
    let modulus = modulus.wrapping_abs();
    let reduce = |v: Integer<NBITS, NBYTES>| -> Result<Integer<NBITS, NBYTES>, ArithmeticError> {
        let r = v.remainder(&modulus)?;
        Ok(if r.is_negative() { r + modulus } else { r })
    };
    let mut result = reduce(Integer::<NBITS, NBYTES>::ONE)?;
    let mut square = reduce(base)?;
    let mut remaining = exponent;
    while !remaining.is_zero() {
        if remaining.is_odd() {
            result = reduce(result * square)?;
        }
        remaining >>= 1;
        if !remaining.is_zero() {
            square = reduce(square * square)?;
        }
    }
    Ok(result)
}

/// The largest value of the type, `2^(NBITS-1) - 1`.
pub fn max_int<const NBITS: usize, const NBYTES: usize>() -> Integer<NBITS, NBYTES> {
    Integer::<NBITS, NBYTES>::MAX
}

/// The smallest value of the type, `-2^(NBITS-1)`.
pub fn min_int<const NBITS: usize, const NBYTES: usize>() -> Integer<NBITS, NBYTES> {
    Integer::<NBITS, NBYTES>::MIN
}
