//! Restoring binary long division.
//!
//! The quotient and remainder are computed together from the
//! magnitudes of the operands and then given their signs: the
//! quotient is negative when exactly one operand is, and the remainder
//! takes the sign of the dividend (truncating division, as for the
//! native integer types).
//!
//! Negating the most negative value needs one more bit than the
//! integer has.  Rather than widening, the magnitudes are held in the
//! same storage but treated as unsigned, which covers `0..=2^(NBITS-1)`
//! and so every magnitude that can arise.

use std::cmp::Ordering;

#[cfg(feature = "lenient-divide-by-zero")]
use tracing::{event, Level};

use super::super::error::ArithmeticError;
use super::super::storage::BitBlock;
use super::Integer;

/// The quotient and remainder of a division.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivisionResult<const NBITS: usize, const NBYTES: usize> {
    pub quotient: Integer<NBITS, NBYTES>,
    pub remainder: Integer<NBITS, NBYTES>,
}

impl<const NBITS: usize, const NBYTES: usize> Integer<NBITS, NBYTES> {
    /// Divides `self` by `divisor`, truncating towards zero.
    ///
    /// `MIN / -1` wraps around to `MIN`.
    pub fn div_rem(
        &self,
        divisor: &Self,
    ) -> Result<DivisionResult<NBITS, NBYTES>, ArithmeticError> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivideByZero);
        }
        let negative_dividend = self.is_negative();
        let negative_divisor = divisor.is_negative();
        let dividend_magnitude = self.magnitude();
        let divisor_magnitude = divisor.magnitude();

        if dividend_magnitude.cmp_unsigned(&divisor_magnitude) == Ordering::Less {
            return Ok(DivisionResult {
                quotient: Self::ZERO,
                remainder: *self,
            });
        }

        // The dividend is at least as large as the (non-zero) divisor.
        let (Some(dividend_msb), Some(divisor_msb)) =
            (dividend_magnitude.find_msb(), divisor_magnitude.find_msb())
        else {
            return Err(ArithmeticError::DivideByZero);
        };
        let shift = dividend_msb - divisor_msb;

        let mut accumulator = dividend_magnitude;
        let mut subtractand = divisor_magnitude;
        subtractand.shl_assign(shift);
        let mut quotient = BitBlock::<NBITS, NBYTES>::ZERO;
        for position in (0..=shift).rev() {
            if subtractand.cmp_unsigned(&accumulator) != Ordering::Greater {
                accumulator.sub_assign(&subtractand);
                quotient.put_bit(position, true);
            }
            subtractand.shr_assign(1, false);
        }

        let mut quotient = Self::from_block(quotient);
        let mut remainder = Self::from_block(accumulator);
        if negative_dividend != negative_divisor {
            quotient = quotient.wrapping_neg();
        }
        if negative_dividend {
            remainder = remainder.wrapping_neg();
        }
        Ok(DivisionResult {
            quotient,
            remainder,
        })
    }

    pub fn divide(&self, divisor: &Self) -> Result<Self, ArithmeticError> {
        self.div_rem(divisor).map(|r| r.quotient)
    }

    pub fn remainder(&self, divisor: &Self) -> Result<Self, ArithmeticError> {
        self.div_rem(divisor).map(|r| r.remainder)
    }

    /// Returns `None` when `divisor` is zero.
    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        self.divide(divisor).ok()
    }

    /// Returns `None` when `divisor` is zero.
    pub fn checked_rem(&self, divisor: &Self) -> Option<Self> {
        self.remainder(divisor).ok()
    }

    /// Division for the `/` and `%` operators, which have no way to
    /// report a failure.
    pub(super) fn div_rem_or_fault(&self, divisor: &Self) -> DivisionResult<NBITS, NBYTES> {
        match self.div_rem(divisor) {
            Ok(result) => result,
            Err(e) => self.divide_by_zero_fault(e),
        }
    }

    #[cfg(not(feature = "lenient-divide-by-zero"))]
    fn divide_by_zero_fault(&self, e: ArithmeticError) -> DivisionResult<NBITS, NBYTES> {
        panic!("{e}");
    }

    #[cfg(feature = "lenient-divide-by-zero")]
    fn divide_by_zero_fault(&self, e: ArithmeticError) -> DivisionResult<NBITS, NBYTES> {
        event!(
            Level::ERROR,
            "{e} (dividend {self}); using a zero quotient and the dividend as remainder"
        );
        DivisionResult {
            quotient: Self::ZERO,
            remainder: *self,
        }
    }
}
