//! Decimal digit arithmetic, used to convert integers of any width to
//! and from base 10 without a native accumulator wide enough to hold
//! the value.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use super::Integer;

/// A signed decimal number held as base-10 digits, least significant
/// digit first.
///
/// There are never any superfluous high-order zero digits; zero is the
/// single digit `0` and is never negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    negative: bool,
    digits: Vec<u8>,
}

impl Decimal {
    pub fn zero() -> Decimal {
        Decimal {
            negative: false,
            digits: vec![0],
        }
    }

    pub fn one() -> Decimal {
        Decimal {
            negative: false,
            digits: vec![1],
        }
    }

    /// Builds a decimal from digits given most significant first.
    /// Returns `None` if any element is not a digit in the range 0-9.
    pub fn from_digits(negative: bool, msd_first: &[u8]) -> Option<Decimal> {
        if msd_first.iter().any(|d| *d > 9) {
            return None;
        }
        let mut result = Decimal {
            negative,
            digits: msd_first.iter().rev().copied().collect(),
        };
        result.unpad();
        Some(result)
    }

    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|d| *d == 0)
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Removes high-order zero digits, keeping a single `0` for zero.
    pub fn unpad(&mut self) {
        while self.digits.len() > 1 && self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.digits.push(0);
        }
        if self.is_zero() {
            self.negative = false;
        }
    }

    /// True if the magnitude of `self` is less than that of `other`.
    pub fn less(&self, other: &Decimal) -> bool {
        cmp_magnitudes(&self.digits, &other.digits) == Ordering::Less
    }

    pub fn add(&mut self, rhs: &Decimal) {
        if self.negative == rhs.negative {
            self.digits = add_magnitudes(&self.digits, &rhs.digits);
        } else if self.less(rhs) {
            self.digits = sub_magnitudes(&rhs.digits, &self.digits);
            self.negative = rhs.negative;
        } else {
            self.digits = sub_magnitudes(&self.digits, &rhs.digits);
        }
        self.unpad();
    }

    pub fn sub(&mut self, rhs: &Decimal) {
        let mut negated = rhs.clone();
        negated.negative = !negated.negative;
        self.add(&negated);
    }

    pub fn mul(&mut self, rhs: &Decimal) {
        let mut product = vec![0u8; self.digits.len() + rhs.digits.len()];
        for (i, a) in self.digits.iter().enumerate() {
            let mut carry: u32 = 0;
            for (j, b) in rhs.digits.iter().enumerate() {
                let total = u32::from(product[i + j]) + u32::from(*a) * u32::from(*b) + carry;
                product[i + j] = (total % 10) as u8;
                carry = total / 10;
            }
            let mut k = i + rhs.digits.len();
            while carry != 0 {
                let total = u32::from(product[k]) + carry;
                product[k] = (total % 10) as u8;
                carry = total / 10;
                k += 1;
            }
        }
        self.negative = self.negative != rhs.negative;
        self.digits = product;
        self.unpad();
    }

    /// Doubles the value in place.
    fn double(&mut self) {
        self.digits = add_magnitudes(&self.digits, &self.digits);
    }

    /// The digits of the magnitude, most significant first.
    pub(crate) fn magnitude_digits(&self) -> String {
        self.digits
            .iter()
            .rev()
            .map(|d| char::from(b'0' + d))
            .collect()
    }

    /// Converts to an integer by repeated multiply-and-add in the
    /// integer's own arithmetic.  Values which do not fit wrap modulo
    /// `2^NBITS`.
    pub fn to_integer<const NBITS: usize, const NBYTES: usize>(&self) -> Integer<NBITS, NBYTES> {
        let ten = Integer::<NBITS, NBYTES>::from(10u8);
        let mut value = Integer::<NBITS, NBYTES>::ZERO;
        let mut scale = Integer::<NBITS, NBYTES>::ONE;
        for (position, digit) in self.digits.iter().enumerate() {
            if *digit != 0 {
                // Multiplication takes one step per bit of its right
                // operand.
                value += scale * Integer::<NBITS, NBYTES>::from(*digit);
            }
            if position + 1 < self.digits.len() {
                scale *= ten;
            }
        }
        if self.negative {
            value.wrapping_neg()
        } else {
            value
        }
    }
}

fn cmp_magnitudes(a: &[u8], b: &[u8]) -> Ordering {
    // Both are unpadded, so a longer number is a larger one.
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

fn add_magnitudes(a: &[u8], b: &[u8]) -> Vec<u8> {
    let len = a.len().max(b.len());
    let mut result = Vec::with_capacity(len + 1);
    let mut carry = 0u8;
    for i in 0..len {
        let total = a.get(i).copied().unwrap_or(0) + b.get(i).copied().unwrap_or(0) + carry;
        result.push(total % 10);
        carry = total / 10;
    }
    if carry != 0 {
        result.push(carry);
    }
    result
}

/// Computes `larger - smaller`, where `larger` has the greater (or
/// equal) magnitude.  The result may need unpadding.
fn sub_magnitudes(larger: &[u8], smaller: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(larger.len());
    let mut borrow = 0i8;
    for (i, digit) in larger.iter().enumerate() {
        let mut d = *digit as i8 - smaller.get(i).copied().unwrap_or(0) as i8 - borrow;
        if d < 0 {
            d += 10;
            borrow = 1;
        } else {
            borrow = 0;
        }
        result.push(d as u8);
    }
    debug_assert_eq!(borrow, 0);
    result
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "", &self.magnitude_digits())
    }
}

impl<const NBITS: usize, const NBYTES: usize> From<&Integer<NBITS, NBYTES>> for Decimal {
    /// Sums the decimal value of each set bit of the magnitude,
    /// doubling a decimal multiplier from one bit to the next.
    fn from(n: &Integer<NBITS, NBYTES>) -> Decimal {
        let magnitude = n.magnitude();
        let mut partial = Decimal::zero();
        let mut multiplier = Decimal::one();
        if let Some(msb) = magnitude.find_msb() {
            for i in 0..=msb {
                if magnitude.bit(i) {
                    partial.add(&multiplier);
                }
                multiplier.double();
            }
        }
        partial.negative = n.is_negative();
        partial.unpad();
        partial
    }
}
