//! Conversions between [`Integer`] and the native numeric types.

use tracing::{event, Level};

use super::super::error::ConversionFailed;
use super::super::storage::BitBlock;
use super::Integer;

// This macro implements conversions from native types to Integer.
// These always succeed; values too wide for NBITS are truncated
// (wrapped) in the same way as an `as` cast between native types.
macro_rules! from_native_type_to_self {
    ($($from:ty)*) => {
        $(
            impl<const NBITS: usize, const NBYTES: usize> From<$from> for Integer<NBITS, NBYTES> {
                #[allow(unused_comparisons)]
                fn from(n: $from) -> Self {
                    if n == 0 {
                        return Self::ZERO;
                    }
                    let upper: u8 = if n < 0 { 0xFF } else { 0 };
                    // Sign-extends signed types and zero-extends
                    // unsigned ones.
                    Self::from_block(BitBlock::from_u128(n as i128 as u128, upper))
                }
            }
        )*
    }
}

from_native_type_to_self!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl<const NBITS: usize, const NBYTES: usize> From<i128> for Integer<NBITS, NBYTES> {
    fn from(n: i128) -> Self {
        if n == 0 {
            return Self::ZERO;
        }
        let upper: u8 = if n < 0 { 0xFF } else { 0 };
        Self::from_block(BitBlock::from_u128(n as u128, upper))
    }
}

impl<const NBITS: usize, const NBYTES: usize> From<u128> for Integer<NBITS, NBYTES> {
    fn from(n: u128) -> Self {
        if n == 0 {
            return Self::ZERO;
        }
        Self::from_block(BitBlock::from_u128(n, 0))
    }
}

// Truncating conversions to native types, with the semantics of an
// `as` cast from a native integer of width NBITS.
macro_rules! to_native_type {
    ($($name:ident $to:ty)*) => {
        $(
            pub fn $name(&self) -> $to {
                self.to_i128() as $to
            }
        )*
    }
}

impl<const NBITS: usize, const NBYTES: usize> Integer<NBITS, NBYTES> {
    /// The low 128 bits of the value, sign-extended if the integer is
    /// narrower than that.
    pub fn to_i128(&self) -> i128 {
        let raw = self.bits.low_u128();
        if NBITS < 128 && self.is_negative() {
            (raw | (u128::MAX << NBITS)) as i128
        } else {
            raw as i128
        }
    }

    to_native_type!(
        to_i8 i8
        to_i16 i16
        to_i32 i32
        to_i64 i64
        to_isize isize
        to_u8 u8
        to_u16 u16
        to_u32 u32
        to_u64 u64
        to_u128 u128
        to_usize usize
    );

    /// The nearest `f64` to the value.  Integers wider than 64 bits
    /// are rounded once, from their 64 most significant bits plus a
    /// sticky bit.
    pub fn to_f64(&self) -> f64 {
        let magnitude = self.magnitude();
        let value = match magnitude.find_msb() {
            None => return 0.0,
            Some(msb) if msb < 64 => magnitude.low_u64() as f64,
            Some(msb) => {
                let discard = msb - 63;
                let mut top = magnitude;
                top.shr_assign(discard, false);
                let mut restored = top;
                restored.shl_assign(discard);
                let sticky = u64::from(restored != magnitude);
                let significand = (top.low_u64() | sticky) as f64;
                significand * 2.0f64.powi(discard as i32)
            }
        };
        if self.is_negative() {
            -value
        } else {
            value
        }
    }

    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }
}

// This macro implements conversions from Integer to native types
// which may not always be possible (e.g. i8 from Integer<16>).
macro_rules! try_from_self_to_native_type {
    ($($to:ty)*) => {
        $(
            impl<const NBITS: usize, const NBYTES: usize> TryFrom<Integer<NBITS, NBYTES>> for $to {
                type Error = ConversionFailed;
                fn try_from(n: Integer<NBITS, NBYTES>) -> Result<$to, ConversionFailed> {
                    let candidate = n.to_i128() as $to;
                    if Integer::<NBITS, NBYTES>::from(candidate) == n {
                        // Guards against sign changes which survive the
                        // round trip, such as u8 255 in an Integer<8>.
                        #[allow(unused_comparisons)]
                        let same_sign = (candidate < 0) == n.is_negative();
                        if same_sign {
                            return Ok(candidate);
                        }
                    }
                    if n.is_negative() {
                        Err(ConversionFailed::TooSmall)
                    } else {
                        Err(ConversionFailed::TooLarge)
                    }
                }
            }
        )*
    }
}

try_from_self_to_native_type!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl<const NBITS: usize, const NBYTES: usize> From<f64> for Integer<NBITS, NBYTES> {
    /// Truncates towards zero.  NaN converts to zero; infinities and
    /// out-of-range values saturate to `MAX` or `MIN`.
    fn from(x: f64) -> Self {
        if x.is_nan() {
            event!(Level::DEBUG, "converting NaN to an integer, using zero");
            return Self::ZERO;
        }
        let saturated = if x.is_sign_negative() {
            Self::MIN
        } else {
            Self::MAX
        };
        if x.is_infinite() {
            event!(
                Level::DEBUG,
                "converting {x} to an integer, using the saturated value"
            );
            return saturated;
        }
        let t = x.trunc();
        if t == 0.0 {
            return Self::ZERO;
        }
        // t is a non-zero integer, so it is a normal double.
        let raw = t.to_bits();
        let exponent = ((raw >> 52) & 0x7FF) as i64 - 1075;
        let mut mantissa = (raw & ((1u64 << 52) - 1)) | (1u64 << 52);
        if exponent < 0 {
            mantissa >>= -exponent;
        }
        let msb = 52 + exponent;
        if msb >= NBITS as i64 - 1 {
            return saturated;
        }
        let mut result = Self::from(mantissa);
        if exponent > 0 {
            result.bits.shl_assign(exponent as usize);
        }
        if t < 0.0 {
            result.wrapping_neg()
        } else {
            result
        }
    }
}

impl<const NBITS: usize, const NBYTES: usize> From<f32> for Integer<NBITS, NBYTES> {
    fn from(x: f32) -> Self {
        Self::from(f64::from(x))
    }
}
