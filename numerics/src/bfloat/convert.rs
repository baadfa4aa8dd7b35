//! Conversion between [`BFloat`] and native numbers.
//!
//! Every conversion into a `BFloat` goes through `BFloat::encode`,
//! which rounds to nearest (ties to even), saturates values too large
//! for the format to the largest finite value of the same sign, and
//! flushes values smaller than the smallest subnormal to a signed
//! zero.

use std::fmt::{self, Display, Formatter};
use std::num::ParseFloatError;
use std::str::FromStr;

use tracing::{event, Level};

use super::{BFloat, FloatClass, NaNKind};

/// Shifts `significand` right by `shift` places, rounding to nearest
/// with ties to even.  The guard bit is the last bit shifted out, the
/// round bit the one below it and the sticky bit the OR of all the
/// rest, together with `inexact`, which stands for non-zero bits
/// already discarded below `significand`.
fn round_to_nearest_even(significand: u128, shift: u32, inexact: bool) -> u128 {
    if shift == 0 {
        return significand;
    }
    if shift > 128 {
        return 0;
    }
    let kept = significand.checked_shr(shift).unwrap_or(0);
    let guard = (significand >> (shift - 1)) & 1 != 0;
    let round = shift >= 2 && (significand >> (shift - 2)) & 1 != 0;
    let sticky = inexact || (shift >= 3 && significand & ((1u128 << (shift - 2)) - 1) != 0);
    if guard && (kept & 1 != 0 || round || sticky) {
        kept + 1
    } else {
        kept
    }
}

/// Splits a finite `f64` into sign, significand and the exponent of
/// the significand's least significant bit.  The value is exactly
/// `significand * 2^exponent`.
pub(super) fn unpack_f64(x: f64) -> (bool, u128, i64) {
    let raw = x.to_bits();
    let negative = raw >> 63 != 0;
    let biased = ((raw >> 52) & 0x7FF) as i64;
    let fraction = raw & ((1u64 << 52) - 1);
    if biased == 0 {
        (negative, u128::from(fraction), -1074)
    } else {
        (negative, u128::from(fraction | (1u64 << 52)), biased - 1075)
    }
}

/// The `f64` nearest to `significand * 2^exponent`, rounding once.
fn nearest_f64(negative: bool, significand: u128, exponent: i64) -> f64 {
    let magnitude = if significand == 0 {
        0.0
    } else {
        let msb = 127 - i64::from(significand.leading_zeros());
        let scale = exponent + msb;
        if scale > 1023 {
            f64::INFINITY
        } else {
            // The same construction as `BFloat::encode`, for the
            // binary64 layout.
            let subnormal = scale < -1022;
            let ulp_exponent = if subnormal { -1074 } else { scale - 52 };
            let shift = ulp_exponent - exponent;
            let retained = if shift >= 0 {
                round_to_nearest_even(significand, shift.min(129) as u32, false)
            } else {
                significand << shift.unsigned_abs()
            };
            let pattern = if subnormal {
                retained
            } else {
                (((scale + 1022) as u128) << 52) + retained
            };
            // A carry out of the largest exponent lands exactly on the
            // infinity pattern.
            f64::from_bits(pattern as u64)
        }
    };
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> BFloat<NBITS, ES, NBYTES> {
    /// Encodes `significand * 2^exponent` with the given sign.
    fn encode(negative: bool, significand: u128, exponent: i64) -> Self {
        Self::encode_inexact(negative, significand, exponent, false)
    }

    /// Encodes a value a little larger in magnitude than
    /// `significand * 2^exponent` when `inexact` is set.  The rounding
    /// is only right if `significand` has at least one bit below the
    /// last bit the format retains, which is always the case when bit
    /// 127 is set.
    pub(super) fn encode_inexact(
        negative: bool,
        significand: u128,
        exponent: i64,
        inexact: bool,
    ) -> Self {
        if significand == 0 {
            return Self::from_pattern(negative, 0);
        }
        let msb = 127 - i64::from(significand.leading_zeros());
        let scale = exponent + msb;
        if scale > Self::MAX_EXP {
            event!(
                Level::DEBUG,
                "2^{scale} is beyond the range of BFloat<{NBITS},{ES}>; saturating"
            );
            return Self::saturated(negative);
        }
        if scale < Self::MIN_EXP_SUBNORMAL {
            event!(
                Level::TRACE,
                "2^{scale} is below the range of BFloat<{NBITS},{ES}>; using zero"
            );
            return Self::from_pattern(negative, 0);
        }
        let fbits = Self::FBITS as i64;
        let subnormal = scale < Self::MIN_EXP_NORMAL;
        // The exponent of the least significant retained bit.
        let ulp_exponent = if subnormal {
            Self::MIN_EXP_SUBNORMAL
        } else {
            scale - fbits
        };
        let shift = ulp_exponent - exponent;
        let retained = if shift >= 0 {
            round_to_nearest_even(significand, shift as u32, inexact)
        } else {
            // Exact: the target has more fraction bits than the source.
            significand << shift.unsigned_abs()
        };
        // For normal numbers `retained` includes the hidden bit, which
        // is added to the exponent field here.  A carry out of the
        // fraction from rounding moves into the exponent the same way,
        // as does a subnormal rounding up to the smallest normal.
        let pattern = if subnormal {
            retained
        } else {
            let biased = (scale + Self::EXP_BIAS) as u128;
            ((biased - 1) << Self::FBITS) + retained
        };
        if pattern >= Self::INFINITY_PATTERN {
            event!(
                Level::DEBUG,
                "rounding reached the reserved encodings of BFloat<{NBITS},{ES}>; saturating"
            );
            return Self::saturated(negative);
        }
        Self::from_pattern(negative, pattern)
    }

    fn saturated(negative: bool) -> Self {
        if negative {
            Self::maxneg()
        } else {
            Self::maxpos()
        }
    }

    pub fn from_f64(x: f64) -> Self {
        if x.is_nan() {
            // The most significant fraction bit distinguishes quiet
            // NaNs from signalling ones.
            let kind = if x.to_bits() & (1u64 << 51) != 0 {
                NaNKind::Quiet
            } else {
                NaNKind::Signalling
            };
            return Self::nan(kind);
        }
        let (negative, significand, exponent) = unpack_f64(x);
        if x.is_infinite() {
            return Self::infinity(negative);
        }
        if significand != 0 && exponent == -1074 && significand < 1u128 << 52 {
            event!(
                Level::TRACE,
                "converting subnormal double {x:e} to BFloat<{NBITS},{ES}>"
            );
        }
        Self::encode(negative, significand, exponent)
    }

    pub fn from_f32(x: f32) -> Self {
        if x.is_nan() {
            let kind = if x.to_bits() & (1u32 << 22) != 0 {
                NaNKind::Quiet
            } else {
                NaNKind::Signalling
            };
            return Self::nan(kind);
        }
        // Every other binary32 value is exactly representable in
        // binary64.
        Self::from_f64(f64::from(x))
    }

    /// Splits a finite value into its significand, including the
    /// hidden bit of a normal number, and the exponent of the
    /// significand's least significant bit.  Zero, infinity and NaN
    /// give a zero significand.
    pub(super) fn unpack(&self) -> (u128, i64) {
        let fraction = self.fraction_pattern();
        match self.classify() {
            FloatClass::Normal => {
                let scale = self.exponent_bits() as i64 - Self::EXP_BIAS;
                (fraction | (1u128 << Self::FBITS), scale - Self::FBITS as i64)
            }
            FloatClass::Subnormal => (fraction, Self::MIN_EXP_SUBNORMAL),
            _ => (0, 0),
        }
    }

    /// The nearest `f64` to the value.  Values beyond the range of
    /// binary64 become infinities or zeroes.
    pub fn to_f64(&self) -> f64 {
        match self.classify() {
            FloatClass::Zero { negative } => {
                if negative {
                    -0.0
                } else {
                    0.0
                }
            }
            FloatClass::Infinity { negative } => {
                if negative {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }
            FloatClass::NaN(NaNKind::Quiet) => f64::NAN,
            // Quiet bit clear, payload non-zero.
            FloatClass::NaN(NaNKind::Signalling) => f64::from_bits(0x7FF4_0000_0000_0000),
            FloatClass::Subnormal | FloatClass::Normal => {
                let (significand, exponent) = self.unpack();
                nearest_f64(self.sign(), significand, exponent)
            }
        }
    }

    pub fn to_f32(&self) -> f32 {
        match self.classify() {
            FloatClass::NaN(NaNKind::Signalling) => f32::from_bits(0x7FA0_0000),
            _ => self.to_f64() as f32,
        }
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> From<f64>
    for BFloat<NBITS, ES, NBYTES>
{
    fn from(x: f64) -> Self {
        Self::from_f64(x)
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> From<f32>
    for BFloat<NBITS, ES, NBYTES>
{
    fn from(x: f32) -> Self {
        Self::from_f32(x)
    }
}

// Conversions from native integers round once, directly from the
// integer value.
macro_rules! from_native_integer {
    ($($from:ty)*) => {
        $(
            impl<const NBITS: usize, const ES: usize, const NBYTES: usize> From<$from>
                for BFloat<NBITS, ES, NBYTES>
            {
                #[allow(unused_comparisons)]
                fn from(n: $from) -> Self {
                    let negative = n < 0;
                    Self::encode(negative, (n as i128).unsigned_abs(), 0)
                }
            }
        )*
    }
}

from_native_integer!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 usize);

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> From<u128>
    for BFloat<NBITS, ES, NBYTES>
{
    fn from(n: u128) -> Self {
        Self::encode(false, n, 0)
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> Display
    for BFloat<NBITS, ES, NBYTES>
{
    /// Formats the value as the `f64` it converts to, honouring width,
    /// precision and the other formatting flags.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_f64(), f)
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> FromStr
    for BFloat<NBITS, ES, NBYTES>
{
    type Err = ParseFloatError;

    /// Accepts anything `f64` accepts, for example `1.5e-3`, `inf` or
    /// `NaN`.
    fn from_str(s: &str) -> Result<Self, ParseFloatError> {
        s.trim().parse::<f64>().map(Self::from_f64)
    }
}
