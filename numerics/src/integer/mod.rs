//! Fixed-width two's complement integers of any width.
//!
//! An [`Integer`] of `NBITS` bits always holds a value in the range
//! `-2^(NBITS-1) ..= 2^(NBITS-1) - 1`.  Addition, subtraction and
//! multiplication wrap modulo `2^NBITS`, in the same way as the
//! `wrapping_*` methods of the native integer types.
//!
//! The storage byte count is a second const parameter because it
//! cannot be computed from `NBITS` in a type on stable Rust.  Use the
//! [`int_type!`](crate::int_type) macro or one of the aliases such as
//! [`Int128`] instead of spelling it out.

use std::cmp::Ordering;
use std::fmt::{self, Binary, Debug, Display, Formatter};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::BitIndexOutOfBounds;
use super::storage::{storage_bytes, BitBlock};

mod arith;
mod convert;
mod decimal;
mod division;
mod functions;
mod parse;

pub use decimal::Decimal;
pub use division::DivisionResult;
pub use functions::{gcd, ipow, max_int, min_int, pow_mod};

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests1024;
#[cfg(test)]
mod tests32;
#[cfg(test)]
mod tests8;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integer<const NBITS: usize, const NBYTES: usize> {
    bits: BitBlock<NBITS, NBYTES>,
}

pub type Int8 = Integer<8, 1>;
pub type Int16 = Integer<16, 2>;
pub type Int32 = Integer<32, 4>;
pub type Int64 = Integer<64, 8>;
pub type Int128 = Integer<128, 16>;
pub type Int256 = Integer<256, 32>;
pub type Int512 = Integer<512, 64>;
pub type Int1024 = Integer<1024, 128>;

impl<const NBITS: usize, const NBYTES: usize> Integer<NBITS, NBYTES> {
    const LAYOUT_OK: () = assert!(
        NBITS > 0 && NBYTES == storage_bytes(NBITS),
        "Integer<NBITS, NBYTES> requires NBITS > 0 and NBYTES == storage_bytes(NBITS)"
    );

    pub const BITS: usize = NBITS;

    pub const ZERO: Self = Self::from_block(BitBlock::ZERO);
    pub const ONE: Self = Self::from_block(BitBlock::one());
    /// The largest value, `0111...1`.
    pub const MAX: Self = Self::from_block(BitBlock::max_signed());
    /// The smallest (most negative) value, `1000...0`.
    pub const MIN: Self = Self::from_block(BitBlock::min_signed());

    const fn from_block(bits: BitBlock<NBITS, NBYTES>) -> Self {
        let () = Self::LAYOUT_OK;
        Integer { bits }
    }

    const SIGN_BIT: usize = NBITS - 1;

    pub fn is_negative(&self) -> bool {
        self.bits.bit(Self::SIGN_BIT)
    }

    /// The sign bit: `true` for negative values.
    pub fn sign(&self) -> bool {
        self.is_negative()
    }

    pub fn is_zero(&self) -> bool {
        self.bits.is_zero()
    }

    pub fn is_odd(&self) -> bool {
        self.bits.bit(0)
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Sets the value to zero.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn set(&mut self, index: usize) -> Result<(), BitIndexOutOfBounds> {
        self.set_to(index, true)
    }

    pub fn reset(&mut self, index: usize) -> Result<(), BitIndexOutOfBounds> {
        self.set_to(index, false)
    }

    pub fn set_to(&mut self, index: usize, value: bool) -> Result<(), BitIndexOutOfBounds> {
        BitBlock::<NBITS, NBYTES>::check_bit_index(index)?;
        self.bits.put_bit(index, value);
        Ok(())
    }

    pub fn at(&self, index: usize) -> Result<bool, BitIndexOutOfBounds> {
        BitBlock::<NBITS, NBYTES>::check_bit_index(index)?;
        Ok(self.bits.bit(index))
    }

    pub fn test(&self, index: usize) -> Result<bool, BitIndexOutOfBounds> {
        self.at(index)
    }

    /// Inverts every bit (one's complement) in place.
    pub fn flip(&mut self) {
        self.bits.flip();
    }

    /// Replaces the value with the low `NBITS` bits of `raw`.  Bits of
    /// a wider integer above bit 63 become zero.
    pub fn set_raw_bits(&mut self, raw: u64) {
        self.bits = BitBlock::from_u128(u128::from(raw), 0);
    }

    pub fn byte(&self, index: usize) -> Result<u8, BitIndexOutOfBounds> {
        BitBlock::<NBITS, NBYTES>::check_byte_index(index)?;
        Ok(self.bits.byte(index))
    }

    /// Raw access to storage block `index`; blocks are bytes.
    pub fn block(&self, index: usize) -> Result<u8, BitIndexOutOfBounds> {
        self.byte(index)
    }

    pub fn set_byte(&mut self, index: usize, value: u8) -> Result<(), BitIndexOutOfBounds> {
        BitBlock::<NBITS, NBYTES>::check_byte_index(index)?;
        self.bits.set_byte(index, value);
        Ok(())
    }

    /// Copies the bit pattern of an integer of another width,
    /// truncating or zero-filling as needed.
    pub fn bitcopy<const M: usize, const MBYTES: usize>(other: &Integer<M, MBYTES>) -> Self {
        let mut result = Self::ZERO;
        for i in 0..NBITS.min(M) {
            result.bits.put_bit(i, other.bits.bit(i));
        }
        result
    }

    /// Converts from an integer of another width, preserving the value
    /// when it fits and truncating otherwise.
    pub fn sign_extend_from<const M: usize, const MBYTES: usize>(
        other: &Integer<M, MBYTES>,
    ) -> Self {
        let mut result = Self::bitcopy(other);
        if other.is_negative() {
            for i in M..NBITS {
                result.bits.put_bit(i, true);
            }
        }
        result
    }

    /// Two's complement negation; `MIN` maps to itself.
    pub fn wrapping_neg(&self) -> Self {
        let mut result = *self;
        result.bits.negate();
        result
    }

    pub fn twos_complement(&self) -> Self {
        self.wrapping_neg()
    }

    /// Absolute value; `MIN` maps to itself.
    pub fn wrapping_abs(&self) -> Self {
        if self.is_negative() {
            self.wrapping_neg()
        } else {
            *self
        }
    }

    /// Position of the most significant set bit, or -1 for zero.
    pub fn find_msb(&self) -> i32 {
        match self.bits.find_msb() {
            Some(pos) => pos as i32,
            None => -1,
        }
    }

    /// `floor(log2(|self|))`, taking zero and one to 0.
    pub fn scale(&self) -> i64 {
        // The magnitude of MIN read as unsigned is 2^(NBITS-1), so
        // this is right for MIN too.
        match self.wrapping_abs().bits.find_msb() {
            Some(pos) => pos as i64,
            None => 0,
        }
    }

    /// Exactly `NBITS` characters of '0' and '1', most significant bit
    /// first.
    pub fn to_binary(&self) -> String {
        self.bits.to_binary()
    }

    /// The magnitude as an unsigned bit pattern.
    pub(crate) fn magnitude(&self) -> BitBlock<NBITS, NBYTES> {
        self.wrapping_abs().bits
    }

    fn cmp_i64(&self, other: i64) -> Ordering {
        if NBITS >= 64 {
            self.cmp(&Self::from(other))
        } else {
            self.to_i64().cmp(&other)
        }
    }
}

impl<const NBITS: usize, const NBYTES: usize> Default for Integer<NBITS, NBYTES> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const NBITS: usize, const NBYTES: usize> Ord for Integer<NBITS, NBYTES> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // With equal signs, comparing the two's complement patterns
            // as unsigned numbers gives the signed order.
            _ => self.bits.cmp_unsigned(&other.bits),
        }
    }
}

impl<const NBITS: usize, const NBYTES: usize> PartialOrd for Integer<NBITS, NBYTES> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const NBITS: usize, const NBYTES: usize> PartialEq<i64> for Integer<NBITS, NBYTES> {
    fn eq(&self, other: &i64) -> bool {
        self.cmp_i64(*other) == Ordering::Equal
    }
}

impl<const NBITS: usize, const NBYTES: usize> PartialOrd<i64> for Integer<NBITS, NBYTES> {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.cmp_i64(*other))
    }
}

impl<const NBITS: usize, const NBYTES: usize> PartialEq<Integer<NBITS, NBYTES>> for i64 {
    fn eq(&self, other: &Integer<NBITS, NBYTES>) -> bool {
        other == self
    }
}

impl<const NBITS: usize, const NBYTES: usize> PartialOrd<Integer<NBITS, NBYTES>> for i64 {
    fn partial_cmp(&self, other: &Integer<NBITS, NBYTES>) -> Option<Ordering> {
        Some(other.cmp_i64(*self).reverse())
    }
}

impl<const NBITS: usize, const NBYTES: usize> Display for Integer<NBITS, NBYTES> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let decimal = Decimal::from(self);
        f.pad_integral(!self.is_negative(), "", &decimal.magnitude_digits())
    }
}

impl<const NBITS: usize, const NBYTES: usize> Debug for Integer<NBITS, NBYTES> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Integer<{NBITS}>({self})")
    }
}

impl<const NBITS: usize, const NBYTES: usize> Binary for Integer<NBITS, NBYTES> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0b", &self.to_binary())
    }
}

impl<const NBITS: usize, const NBYTES: usize> Serialize for Integer<NBITS, NBYTES> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, const NBITS: usize, const NBYTES: usize> Deserialize<'de> for Integer<NBITS, NBYTES> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
