//! Fixed-size bit storage shared by the integer and floating-point
//! types.
//!
//! Values are held least-significant byte first.  The bits above
//! `NBITS` in the final byte are always zero once a mutating
//! operation has finished; [`BitBlock::normalize`] is the one place
//! where that is enforced.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};

use super::error::BitIndexOutOfBounds;

/// The number of bytes needed to hold `nbits` bits.
pub const fn storage_bytes(nbits: usize) -> usize {
    nbits.div_ceil(8)
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct BitBlock<const NBITS: usize, const NBYTES: usize> {
    bytes: [u8; NBYTES],
}

impl<const NBITS: usize, const NBYTES: usize> BitBlock<NBITS, NBYTES> {
    /// Mask of the bits of the most significant byte which belong to
    /// the value.
    const MS_BYTE_MASK: u8 = if NBITS % 8 == 0 {
        0xFF
    } else {
        (1u8 << (NBITS % 8)) - 1
    };

    pub(crate) const ZERO: Self = BitBlock {
        bytes: [0; NBYTES],
    };

    pub(crate) const fn one() -> Self {
        let mut bytes = [0; NBYTES];
        bytes[0] = 1;
        BitBlock { bytes }
    }

    /// `0111...1`
    pub(crate) const fn max_signed() -> Self {
        let mut bytes = [0xFF; NBYTES];
        bytes[NBYTES - 1] &= Self::MS_BYTE_MASK;
        bytes[(NBITS - 1) / 8] &= !(1u8 << ((NBITS - 1) % 8));
        BitBlock { bytes }
    }

    /// `1000...0`
    pub(crate) const fn min_signed() -> Self {
        let mut bytes = [0; NBYTES];
        bytes[(NBITS - 1) / 8] = 1u8 << ((NBITS - 1) % 8);
        BitBlock { bytes }
    }

    pub(crate) fn normalize(&mut self) {
        if let Some(last) = self.bytes.last_mut() {
            *last &= Self::MS_BYTE_MASK;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.bytes = [0; NBYTES];
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }

    pub(crate) fn check_bit_index(index: usize) -> Result<(), BitIndexOutOfBounds> {
        if index < NBITS {
            Ok(())
        } else {
            Err(BitIndexOutOfBounds {
                index,
                limit: NBITS,
            })
        }
    }

    pub(crate) fn check_byte_index(index: usize) -> Result<(), BitIndexOutOfBounds> {
        if index < NBYTES {
            Ok(())
        } else {
            Err(BitIndexOutOfBounds {
                index,
                limit: NBYTES,
            })
        }
    }

    /// Reads bit `index`, which the caller has already range-checked.
    pub(crate) fn bit(&self, index: usize) -> bool {
        debug_assert!(index < NBITS);
        self.bytes[index / 8] & (1 << (index % 8)) != 0
    }

    pub(crate) fn put_bit(&mut self, index: usize, value: bool) {
        debug_assert!(index < NBITS);
        let mask = 1u8 << (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    pub(crate) fn byte(&self, index: usize) -> u8 {
        self.bytes[index]
    }

    pub(crate) fn set_byte(&mut self, index: usize, value: u8) {
        self.bytes[index] = value;
        self.normalize();
    }

    /// Sets every bit of the value to one (`true`) or zero.
    pub(crate) fn fill(&mut self, ones: bool) {
        self.bytes = [if ones { 0xFF } else { 0 }; NBYTES];
        self.normalize();
    }

    /// One's complement.
    pub(crate) fn flip(&mut self) {
        for b in self.bytes.iter_mut() {
            *b = !*b;
        }
        self.normalize();
    }

    /// Applies a byte-wise operation (such as bitwise AND) to
    /// corresponding bytes of `self` and `rhs`.
    pub(crate) fn combine<F>(&mut self, rhs: &Self, op: F)
    where
        F: Fn(u8, u8) -> u8,
    {
        for (lhs, r) in self.bytes.iter_mut().zip(rhs.bytes.iter()) {
            *lhs = op(*lhs, *r);
        }
        self.normalize();
    }

    /// Builds a value from the low bits of `value`; storage beyond
    /// 128 bits is filled with copies of `upper`.
    pub(crate) fn from_u128(value: u128, upper: u8) -> Self {
        let mut result = Self::ZERO;
        for (i, b) in result.bytes.iter_mut().enumerate() {
            *b = if i < 16 { (value >> (i * 8)) as u8 } else { upper };
        }
        result.normalize();
        result
    }

    /// The low 128 bits of the storage, without sign extension.
    pub(crate) fn low_u128(&self) -> u128 {
        self.bytes
            .iter()
            .take(16)
            .enumerate()
            .fold(0u128, |acc, (i, b)| acc | (u128::from(*b) << (i * 8)))
    }

    pub(crate) fn low_u64(&self) -> u64 {
        self.low_u128() as u64
    }

    /// Addition modulo 2^NBITS, returning the carry out of the most
    /// significant storage byte.
    pub(crate) fn add_assign(&mut self, rhs: &Self) -> bool {
        let mut accumulator: u16 = 0;
        for (lhs, r) in self.bytes.iter_mut().zip(rhs.bytes.iter()) {
            accumulator += u16::from(*lhs) + u16::from(*r);
            *lhs = (accumulator & 0xFF) as u8;
            accumulator >>= 8;
        }
        let carry = if NBITS % 8 == 0 {
            accumulator != 0
        } else {
            self.bytes
                .last()
                .is_some_and(|last| last & !Self::MS_BYTE_MASK != 0)
        };
        self.normalize();
        carry
    }

    pub(crate) fn increment(&mut self) {
        let mut one = Self::ZERO;
        one.put_bit(0, true);
        self.add_assign(&one);
    }

    /// Two's complement negation modulo 2^NBITS.
    pub(crate) fn negate(&mut self) {
        self.flip();
        self.increment();
    }

    pub(crate) fn sub_assign(&mut self, rhs: &Self) {
        let mut negated = *rhs;
        negated.negate();
        self.add_assign(&negated);
    }

    /// Shifts towards the most significant end, discarding bits which
    /// pass position `NBITS - 1`.
    pub(crate) fn shl_assign(&mut self, shift: usize) {
        if shift >= NBITS {
            self.clear();
            return;
        }
        let byte_shift = shift / 8;
        let bit_shift = shift % 8;
        for i in (0..NBYTES).rev() {
            let hi = if i >= byte_shift {
                self.bytes[i - byte_shift]
            } else {
                0
            };
            let lo = if i > byte_shift {
                self.bytes[i - byte_shift - 1]
            } else {
                0
            };
            self.bytes[i] = if bit_shift == 0 {
                hi
            } else {
                (hi << bit_shift) | (lo >> (8 - bit_shift))
            };
        }
        self.normalize();
    }

    /// Shifts towards the least significant end.  Vacated positions
    /// at the top are filled with ones when `ones_fill` is set (this
    /// is the arithmetic shift of a negative value) and zeroes
    /// otherwise.
    pub(crate) fn shr_assign(&mut self, shift: usize, ones_fill: bool) {
        if shift >= NBITS {
            self.fill(ones_fill);
            return;
        }
        let fill: u8 = if ones_fill { 0xFF } else { 0 };
        if ones_fill {
            if let Some(last) = self.bytes.last_mut() {
                *last |= !Self::MS_BYTE_MASK;
            }
        }
        let byte_shift = shift / 8;
        let bit_shift = shift % 8;
        for i in 0..NBYTES {
            let get = |j: usize| if j < NBYTES { self.bytes[j] } else { fill };
            let lo = get(i + byte_shift);
            let value = if bit_shift == 0 {
                lo
            } else {
                (lo >> bit_shift) | (get(i + byte_shift + 1) << (8 - bit_shift))
            };
            self.bytes[i] = value;
        }
        self.normalize();
    }

    /// Position of the most significant set bit.
    pub(crate) fn find_msb(&self) -> Option<usize> {
        self.bytes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, b)| **b != 0)
            .map(|(i, b)| i * 8 + 7 - b.leading_zeros() as usize)
    }

    /// Compares the two values as unsigned NBITS-bit quantities.
    pub(crate) fn cmp_unsigned(&self, other: &Self) -> Ordering {
        self.bytes.iter().rev().cmp(other.bytes.iter().rev())
    }

    /// Reads `width` (at most 64) bits starting at position `lsb`.
    pub(crate) fn field(&self, lsb: usize, width: usize) -> u64 {
        debug_assert!(width <= 64 && lsb + width <= NBITS);
        (0..width).fold(0u64, |acc, i| {
            if self.bit(lsb + i) {
                acc | (1u64 << i)
            } else {
                acc
            }
        })
    }

    /// Writes the low `width` (at most 64) bits of `value` starting at
    /// position `lsb`.
    pub(crate) fn put_field(&mut self, lsb: usize, width: usize, value: u64) {
        debug_assert!(width <= 64 && lsb + width <= NBITS);
        for i in 0..width {
            self.put_bit(lsb + i, (value >> i) & 1 != 0);
        }
    }

    /// Exactly NBITS characters, most significant bit first.
    pub(crate) fn to_binary(&self) -> String {
        (0..NBITS)
            .rev()
            .map(|i| if self.bit(i) { '1' } else { '0' })
            .collect()
    }
}

impl<const NBITS: usize, const NBYTES: usize> Debug for BitBlock<NBITS, NBYTES> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BitBlock<{NBITS}>(b{})", self.to_binary())
    }
}
