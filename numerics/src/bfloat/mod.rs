//! Binary floating-point numbers with a configurable exponent width.
//!
//! A `BFloat<NBITS, ES, NBYTES>` has, from the most significant end,
//! one sign bit, `ES` exponent bits and `FBITS = NBITS - 1 - ES`
//! fraction bits.  The exponent bias is `2^(ES-1) - 1`.  Normal
//! values have an implicit leading one; an all-zero exponent field
//! holds zero and the subnormals.
//!
//! Unlike IEEE 754, an all-ones exponent field is an ordinary
//! exponent.  Only two encodings in it are reserved:
//!
//! | encoding (sign, exponent, fraction)  | meaning          |
//! |--------------------------------------|------------------|
//! | `s 11...1 11...11`                   | NaN: quiet when `s` is 0, signalling when 1 |
//! | `s 11...1 11...10`                   | infinity with sign `s` |
//!
//! so the largest finite magnitude is `0 11...1 11...101`.

use std::cmp::Ordering;
use std::fmt::{self, Binary, Debug, Formatter};

use serde::Serialize;

use super::error::BitIndexOutOfBounds;
use super::storage::{storage_bytes, BitBlock};

mod arith;
mod convert;


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NaNKind {
    Quiet,
    Signalling,
}

/// The kind of number an encoding represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FloatClass {
    Zero { negative: bool },
    Subnormal,
    Normal,
    Infinity { negative: bool },
    NaN(NaNKind),
}

#[derive(Clone, Copy)]
pub struct BFloat<const NBITS: usize, const ES: usize, const NBYTES: usize> {
    bits: BitBlock<NBITS, NBYTES>,
}

/// Eight bits with a 4-bit exponent.
pub type BFloat8 = BFloat<8, 4, 1>;
/// The "brain float" layout: the exponent range of binary32 in 16 bits.
pub type BFloat16 = BFloat<16, 8, 2>;
/// The layout of IEEE binary16.
pub type Half = BFloat<16, 5, 2>;
/// The layout of IEEE binary32.
pub type BFloat32 = BFloat<32, 8, 4>;
/// The layout of IEEE binary64.
pub type BFloat64 = BFloat<64, 11, 8>;

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> BFloat<NBITS, ES, NBYTES> {
    const LAYOUT_OK: () = assert!(
        ES >= 1 && ES <= 30 && NBITS > ES + 1 && NBITS <= 128 && NBYTES == storage_bytes(NBITS),
        "BFloat<NBITS, ES, NBYTES> requires 1 <= ES <= 30, ES + 1 < NBITS <= 128 and NBYTES == storage_bytes(NBITS)"
    );

    /// Number of fraction bits.
    pub const FBITS: usize = NBITS - 1 - ES;
    pub const EXP_BIAS: i64 = (1 << (ES - 1)) - 1;
    /// The largest unbiased exponent of a finite value.
    pub const MAX_EXP: i64 = (1 << ES) - 1 - Self::EXP_BIAS;
    /// The unbiased exponent of the smallest normal value.
    pub const MIN_EXP_NORMAL: i64 = 1 - Self::EXP_BIAS;
    /// The exponent of the smallest subnormal value.
    pub const MIN_EXP_SUBNORMAL: i64 = 1 - Self::EXP_BIAS - Self::FBITS as i64;

    const SIGN_BIT: usize = NBITS - 1;

    /// The magnitude of the infinity encoding.
    const INFINITY_PATTERN: u128 = (u128::MAX >> (129 - NBITS)) ^ 1;

    const fn from_block(bits: BitBlock<NBITS, NBYTES>) -> Self {
        let () = Self::LAYOUT_OK;
        BFloat { bits }
    }

    pub const ZERO: Self = Self::from_block(BitBlock::ZERO);

    fn from_pattern(negative: bool, magnitude: u128) -> Self {
        let mut result = Self::from_block(BitBlock::from_u128(magnitude, 0));
        result.bits.put_bit(Self::SIGN_BIT, negative);
        result
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    /// The largest finite value.
    pub fn maxpos() -> Self {
        Self::from_pattern(false, Self::INFINITY_PATTERN - 1)
    }

    /// The smallest positive value (the smallest subnormal).
    pub fn minpos() -> Self {
        Self::from_pattern(false, 1)
    }

    /// The negative value closest to zero.
    pub fn minneg() -> Self {
        Self::from_pattern(true, 1)
    }

    /// The most negative finite value.
    pub fn maxneg() -> Self {
        Self::from_pattern(true, Self::INFINITY_PATTERN - 1)
    }

    pub fn infinity(negative: bool) -> Self {
        Self::from_pattern(negative, Self::INFINITY_PATTERN)
    }

    pub fn nan(kind: NaNKind) -> Self {
        Self::from_pattern(kind == NaNKind::Signalling, Self::INFINITY_PATTERN | 1)
    }

    /// Sets the value to zero, keeping or setting the sign.
    pub fn set_zero(&mut self, negative: bool) {
        *self = Self::from_pattern(negative, 0);
    }

    pub fn set_inf(&mut self, negative: bool) {
        *self = Self::infinity(negative);
    }

    pub fn set_nan(&mut self, kind: NaNKind) {
        *self = Self::nan(kind);
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Replaces the encoding with the low `NBITS` bits of `raw`.
    pub fn set_raw_bits(&mut self, raw: u64) {
        self.bits = BitBlock::from_u128(u128::from(raw), 0);
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

    /// Inverts every bit of the encoding.
    pub fn flip(&mut self) {
        self.bits.flip();
    }

    pub fn block(&self, index: usize) -> Result<u8, BitIndexOutOfBounds> {
        BitBlock::<NBITS, NBYTES>::check_byte_index(index)?;
        Ok(self.bits.byte(index))
    }

    /// Four bits of the encoding, starting at bit `4 * index`.
    pub fn nibble(&self, index: usize) -> Result<u8, BitIndexOutOfBounds> {
        let lsb = index.saturating_mul(4);
        BitBlock::<NBITS, NBYTES>::check_bit_index(lsb)?;
        Ok(self.bits.field(lsb, 4usize.min(NBITS - lsb)) as u8)
    }

    /// The encoding as an unsigned number.
    pub fn raw_bits(&self) -> u128 {
        self.bits.low_u128()
    }

    /// `true` when the sign bit is set (including -0 and the
    /// signalling NaN).
    pub fn sign(&self) -> bool {
        self.bits.bit(Self::SIGN_BIT)
    }

    pub fn exponent_bits(&self) -> u64 {
        self.bits.field(Self::FBITS, ES)
    }

    /// Bit `index` of the fraction field, counting from its least
    /// significant end.
    pub fn fraction_bit(&self, index: usize) -> Result<bool, BitIndexOutOfBounds> {
        if index < Self::FBITS {
            Ok(self.bits.bit(index))
        } else {
            Err(BitIndexOutOfBounds {
                index,
                limit: Self::FBITS,
            })
        }
    }

    fn fraction_pattern(&self) -> u128 {
        self.raw_bits() & ((1u128 << Self::FBITS) - 1)
    }

    /// The magnitude bits: everything but the sign.
    fn magnitude_pattern(&self) -> u128 {
        self.raw_bits() & !(1u128 << Self::SIGN_BIT)
    }

    pub fn classify(&self) -> FloatClass {
        let magnitude = self.magnitude_pattern();
        if magnitude == Self::INFINITY_PATTERN | 1 {
            FloatClass::NaN(if self.sign() {
                NaNKind::Signalling
            } else {
                NaNKind::Quiet
            })
        } else if magnitude == Self::INFINITY_PATTERN {
            FloatClass::Infinity {
                negative: self.sign(),
            }
        } else if magnitude == 0 {
            FloatClass::Zero {
                negative: self.sign(),
            }
        } else if self.exponent_bits() == 0 {
            FloatClass::Subnormal
        } else {
            FloatClass::Normal
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.classify(), FloatClass::Zero { .. })
    }

    pub fn is_nan(&self) -> bool {
        matches!(self.classify(), FloatClass::NaN(_))
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self.classify(), FloatClass::Infinity { .. })
    }

    pub fn is_finite(&self) -> bool {
        !self.is_nan() && !self.is_infinite()
    }

    pub fn is_negative(&self) -> bool {
        self.sign()
    }

    /// `floor(log2(|self|))` for finite non-zero values.
    pub fn scale(&self) -> Option<i64> {
        match self.classify() {
            FloatClass::Normal => Some(self.exponent_bits() as i64 - Self::EXP_BIAS),
            FloatClass::Subnormal => {
                let fraction = self.fraction_pattern();
                let msb = 127 - i64::from(fraction.leading_zeros());
                Some(Self::MIN_EXP_SUBNORMAL + msb)
            }
            _ => None,
        }
    }

    /// The magnitude of `self`.  NaNs keep their encoding.
    pub fn abs(&self) -> Self {
        if self.is_nan() {
            *self
        } else {
            Self::from_pattern(false, self.magnitude_pattern())
        }
    }

    /// Steps to the next encoding, wrapping from all ones to all
    /// zeroes.
    pub fn increment_encoding(&mut self) {
        self.bits.increment();
    }

    /// Steps to the previous encoding, wrapping from all zeroes to all
    /// ones.
    pub fn decrement_encoding(&mut self) {
        let mut one = BitBlock::<NBITS, NBYTES>::ZERO;
        one.put_bit(0, true);
        self.bits.sub_assign(&one);
    }

    /// The encoding as `b` followed by `NBITS` binary digits, most
    /// significant first.  With `nibble_marker`, an apostrophe
    /// separates each group of four bits.
    pub fn to_binary(&self, nibble_marker: bool) -> String {
        let mut result = String::with_capacity(2 * NBITS);
        result.push('b');
        for index in (0..NBITS).rev() {
            result.push(if self.bits.bit(index) { '1' } else { '0' });
            if nibble_marker && index > 0 && index % 4 == 0 {
                result.push('\'');
            }
        }
        result
    }

    /// A short description of the value: its class, sign and scale.
    pub fn describe(&self) -> String {
        let sign = if self.sign() { '-' } else { '+' };
        match self.classify() {
            FloatClass::Zero { .. } => format!("{sign}zero"),
            FloatClass::Infinity { .. } => format!("{sign}infinity"),
            FloatClass::NaN(NaNKind::Quiet) => "quiet NaN".to_string(),
            FloatClass::NaN(NaNKind::Signalling) => "signalling NaN".to_string(),
            FloatClass::Subnormal | FloatClass::Normal => match self.scale() {
                Some(scale) => format!("({sign},{scale},{})", self.fraction_string()),
                None => format!("{sign}?"),
            },
        }
    }

    fn fraction_string(&self) -> String {
        (0..Self::FBITS)
            .rev()
            .map(|i| if self.bits.bit(i) { '1' } else { '0' })
            .collect()
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> Default
    for BFloat<NBITS, ES, NBYTES>
{
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> Debug
    for BFloat<NBITS, ES, NBYTES>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BFloat<{NBITS},{ES}>({} {})",
            self.to_binary(true),
            self.describe()
        )
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> Binary
    for BFloat<NBITS, ES, NBYTES>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0b", &self.bits.to_binary())
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> PartialEq<i64>
    for BFloat<NBITS, ES, NBYTES>
{
    fn eq(&self, other: &i64) -> bool {
        self.to_f64() == *other as f64
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> PartialOrd<i64>
    for BFloat<NBITS, ES, NBYTES>
{
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.to_f64().partial_cmp(&(*other as f64))
    }
}
