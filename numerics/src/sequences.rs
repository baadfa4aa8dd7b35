//! Approximations of the golden ratio through the Fibonacci sequence.
//!
//! The ratio of consecutive Fibonacci numbers converges to
//! φ = 1.6180339887…, so running the sequence in a number type and
//! dividing is a quick way to compare how the different types round.

use std::ops::{Add, Div};

use tracing::{event, Level};

use crate::error::ArithmeticError;
use crate::integer::{ipow, Integer};

/// Two consecutive Fibonacci numbers, starting from `(1, 1)` and
/// advancing `terms` times.  Arithmetic happens in `T`, so the
/// result wraps, saturates or rounds the way `T` does.
pub fn fibonacci_pair<T>(terms: u32) -> (T, T)
where
    T: Copy + Add<Output = T> + From<u8>,
{
    let mut pair = (T::from(1), T::from(1));
    for _ in 0..terms {
        pair = (pair.1, pair.0 + pair.1);
    }
    pair
}

/// The ratio of the two numbers returned by [`fibonacci_pair`].
pub fn phi_through_fibonacci<T>(terms: u32) -> T
where
    T: Copy + Add<Output = T> + Div<Output = T> + From<u8>,
{
    let (smaller, larger) = fibonacci_pair::<T>(terms);
    larger / smaller
}

/// The ratio of [`fibonacci_pair`] as a decimal fraction with
/// `digits` digits after the point, truncated.  The Fibonacci numbers
/// and the scaled quotient are computed in `Integer<NBITS, NBYTES>`,
/// so the width must hold `F(terms + 2) * 10^digits`.
///
/// ```
/// use numerics::sequences::golden_ratio_digits;
/// let phi = golden_ratio_digits::<256, 32>(60, 20).unwrap();
/// assert_eq!(phi, "1.61803398874989484820");
/// ```
pub fn golden_ratio_digits<const NBITS: usize, const NBYTES: usize>(
    terms: u32,
    digits: u32,
) -> Result<String, ArithmeticError> {
    let (smaller, larger) = fibonacci_pair::<Integer<NBITS, NBYTES>>(terms);
    let scale = ipow(
        Integer::<NBITS, NBYTES>::from(10_u8),
        Integer::<NBITS, NBYTES>::from(digits),
    );
    let scaled = (larger * scale).divide(&smaller)?;
    if scaled.is_negative() || smaller.is_negative() {
        event!(
            Level::WARN,
            "{terms} Fibonacci terms with {digits} decimal places overflow {NBITS} bits"
        );
    }

    let text = scaled.to_string();
    let (sign, magnitude) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let digits = digits as usize;
    let padded = format!("{magnitude:0>width$}", width = digits + 1);
    let (whole, fraction) = padded.split_at(padded.len() - digits);
    if fraction.is_empty() {
        Ok(format!("{sign}{whole}"))
    } else {
        Ok(format!("{sign}{whole}.{fraction}"))
    }
}
