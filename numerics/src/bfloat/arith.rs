//! Arithmetic and comparison for [`BFloat`].
//!
//! Both operands are unpacked into a sign, an integer significand and
//! a power of two, combined exactly in a 512-bit [`Integer`] and
//! rounded once on the way back into the format.  So `+ - * /` are
//! correctly rounded for every layout, and a finite result too large
//! for the format saturates just as a conversion does.  Operators with
//! an `f64` right-hand side use the exact value of the `f64`.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::super::integer::Integer;
use super::convert::unpack_f64;
use super::{BFloat, FloatClass, NaNKind};

type Wide = Integer<512, 64>;

/// Exponent gap beyond which the smaller addend only matters as a
/// sticky bit.  Significands have at most 128 bits, so aligned
/// addends stay below 2^389.
const ALIGNMENT_LIMIT: i64 = 261;

/// Bits of quotient produced before the remainder is folded into a
/// sticky bit.  Dividing a significand shifted up this far by one of
/// at most 128 bits leaves at least 133 quotient bits.
const QUOTIENT_SHIFT: i32 = 260;

#[derive(Clone, Copy, Debug)]
enum Operand {
    NaN,
    Infinity {
        negative: bool,
    },
    /// `significand * 2^exponent`; zero has a zero significand.
    Finite {
        negative: bool,
        significand: u128,
        exponent: i64,
    },
}

impl Operand {
    fn from_f64(x: f64) -> Operand {
        if x.is_nan() {
            return Operand::NaN;
        }
        let (negative, significand, exponent) = unpack_f64(x);
        if x.is_infinite() {
            Operand::Infinity { negative }
        } else {
            Operand::Finite {
                negative,
                significand,
                exponent,
            }
        }
    }

    fn negated(self) -> Operand {
        match self {
            Operand::NaN => Operand::NaN,
            Operand::Infinity { negative } => Operand::Infinity {
                negative: !negative,
            },
            Operand::Finite {
                negative,
                significand,
                exponent,
            } => Operand::Finite {
                negative: !negative,
                significand,
                exponent,
            },
        }
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> BFloat<NBITS, ES, NBYTES> {
    fn operand(&self) -> Operand {
        match self.classify() {
            FloatClass::NaN(_) => Operand::NaN,
            FloatClass::Infinity { negative } => Operand::Infinity { negative },
            FloatClass::Zero { negative } => Operand::Finite {
                negative,
                significand: 0,
                exponent: 0,
            },
            FloatClass::Subnormal | FloatClass::Normal => {
                let (significand, exponent) = self.unpack();
                Operand::Finite {
                    negative: self.sign(),
                    significand,
                    exponent,
                }
            }
        }
    }

    /// Rounds the non-negative `significand * 2^exponent` into the
    /// format.  Bits below the top 128 are folded into a sticky bit.
    fn from_wide(negative: bool, significand: Wide, exponent: i64) -> Self {
        let msb = significand.find_msb();
        if msb < 0 {
            return Self::from_pattern(negative, 0);
        }
        if msb <= 127 {
            return Self::encode_inexact(negative, significand.to_u128(), exponent, false);
        }
        let discard = msb - 127;
        let kept = significand >> discard;
        let inexact = (kept << discard) != significand;
        Self::encode_inexact(
            negative,
            kept.to_u128(),
            exponent + i64::from(discard),
            inexact,
        )
    }

    fn sum(a: Operand, b: Operand) -> Self {
        match (a, b) {
            (Operand::NaN, _) | (_, Operand::NaN) => Self::nan(NaNKind::Quiet),
            (Operand::Infinity { negative: x }, Operand::Infinity { negative: y }) => {
                if x == y {
                    Self::infinity(x)
                } else {
                    Self::nan(NaNKind::Quiet)
                }
            }
            (Operand::Infinity { negative }, Operand::Finite { .. })
            | (Operand::Finite { .. }, Operand::Infinity { negative }) => Self::infinity(negative),
            (
                Operand::Finite {
                    negative: na,
                    significand: sa,
                    exponent: ea,
                },
                Operand::Finite {
                    negative: nb,
                    significand: sb,
                    exponent: eb,
                },
            ) => {
                if sa == 0 && sb == 0 {
                    // -0 + -0 is the only sum that gives -0.
                    return Self::from_pattern(na && nb, 0);
                }
                if sa == 0 {
                    return Self::encode_inexact(nb, sb, eb, false);
                }
                if sb == 0 {
                    return Self::encode_inexact(na, sa, ea, false);
                }
                // `high` has the larger exponent.
                let ((nh, sh, eh), (nl, mut sl, mut el)) = if ea >= eb {
                    ((na, sa, ea), (nb, sb, eb))
                } else {
                    ((nb, sb, eb), (na, sa, ea))
                };
                if eh - el > ALIGNMENT_LIMIT {
                    // Far below the rounding position of any result;
                    // only its presence and sign matter.
                    sl = 1;
                    el = eh - ALIGNMENT_LIMIT;
                }
                let high = Wide::from(sh) << ((eh - el) as i32);
                let low = Wide::from(sl);
                if nh == nl {
                    Self::from_wide(nh, high + low, el)
                } else {
                    match high.cmp(&low) {
                        Ordering::Greater => Self::from_wide(nh, high - low, el),
                        Ordering::Less => Self::from_wide(nl, low - high, el),
                        Ordering::Equal => Self::ZERO,
                    }
                }
            }
        }
    }

    fn product(a: Operand, b: Operand) -> Self {
        match (a, b) {
            (Operand::NaN, _) | (_, Operand::NaN) => Self::nan(NaNKind::Quiet),
            (Operand::Infinity { negative: x }, Operand::Infinity { negative: y }) => {
                Self::infinity(x != y)
            }
            (
                Operand::Infinity { negative: x },
                Operand::Finite {
                    negative: y,
                    significand,
                    ..
                },
            )
            | (
                Operand::Finite {
                    negative: y,
                    significand,
                    ..
                },
                Operand::Infinity { negative: x },
            ) => {
                if significand == 0 {
                    Self::nan(NaNKind::Quiet)
                } else {
                    Self::infinity(x != y)
                }
            }
            (
                Operand::Finite {
                    negative: na,
                    significand: sa,
                    exponent: ea,
                },
                Operand::Finite {
                    negative: nb,
                    significand: sb,
                    exponent: eb,
                },
            ) => Self::from_wide(na != nb, Wide::from(sa) * Wide::from(sb), ea + eb),
        }
    }

    fn quotient(a: Operand, b: Operand) -> Self {
        match (a, b) {
            (Operand::NaN, _) | (_, Operand::NaN) => Self::nan(NaNKind::Quiet),
            (Operand::Infinity { .. }, Operand::Infinity { .. }) => Self::nan(NaNKind::Quiet),
            (Operand::Infinity { negative: x }, Operand::Finite { negative: y, .. }) => {
                Self::infinity(x != y)
            }
            (Operand::Finite { negative: x, .. }, Operand::Infinity { negative: y }) => {
                Self::from_pattern(x != y, 0)
            }
            (
                Operand::Finite {
                    negative: na,
                    significand: sa,
                    exponent: ea,
                },
                Operand::Finite {
                    negative: nb,
                    significand: sb,
                    exponent: eb,
                },
            ) => {
                let negative = na != nb;
                match (sa == 0, sb == 0) {
                    (true, true) => Self::nan(NaNKind::Quiet),
                    (false, true) => Self::infinity(negative),
                    (true, false) => Self::from_pattern(negative, 0),
                    (false, false) => {
                        let dividend = Wide::from(sa) << QUOTIENT_SHIFT;
                        match dividend.div_rem(&Wide::from(sb)) {
                            Ok(division) => {
                                // The quotient gains a low bit which is
                                // set when the division was inexact.
                                let mut q = division.quotient << 1;
                                if !division.remainder.is_zero() {
                                    q.increment();
                                }
                                Self::from_wide(
                                    negative,
                                    q,
                                    ea - eb - i64::from(QUOTIENT_SHIFT) - 1,
                                )
                            }
                            Err(_) => Self::nan(NaNKind::Quiet),
                        }
                    }
                }
            }
        }
    }
}

macro_rules! exact_arith {
    ($Trait:ident, $method:ident, $AssignTrait:ident, $assign_method:ident, |$a:ident, $b:ident| $combine:expr) => {
        impl<const NBITS: usize, const ES: usize, const NBYTES: usize> $AssignTrait
            for BFloat<NBITS, ES, NBYTES>
        {
            fn $assign_method(&mut self, rhs: Self) {
                let ($a, $b) = (self.operand(), rhs.operand());
                *self = $combine;
            }
        }

        impl<const NBITS: usize, const ES: usize, const NBYTES: usize> $AssignTrait<f64>
            for BFloat<NBITS, ES, NBYTES>
        {
            fn $assign_method(&mut self, rhs: f64) {
                let ($a, $b) = (self.operand(), Operand::from_f64(rhs));
                *self = $combine;
            }
        }

        impl<const NBITS: usize, const ES: usize, const NBYTES: usize> $Trait
            for BFloat<NBITS, ES, NBYTES>
        {
            type Output = Self;
            fn $method(mut self, rhs: Self) -> Self {
                self.$assign_method(rhs);
                self
            }
        }

        impl<const NBITS: usize, const ES: usize, const NBYTES: usize> $Trait<f64>
            for BFloat<NBITS, ES, NBYTES>
        {
            type Output = Self;
            fn $method(mut self, rhs: f64) -> Self {
                self.$assign_method(rhs);
                self
            }
        }
    };
}

exact_arith!(Add, add, AddAssign, add_assign, |a, b| Self::sum(a, b));
exact_arith!(Sub, sub, SubAssign, sub_assign, |a, b| Self::sum(a, b.negated()));
exact_arith!(Mul, mul, MulAssign, mul_assign, |a, b| Self::product(a, b));
exact_arith!(Div, div, DivAssign, div_assign, |a, b| Self::quotient(a, b));

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> Neg for BFloat<NBITS, ES, NBYTES> {
    type Output = Self;

    /// Flips the sign bit.  This turns a quiet NaN into a signalling
    /// one and vice versa.
    fn neg(mut self) -> Self {
        self.bits.put_bit(Self::SIGN_BIT, !self.sign());
        self
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> PartialEq
    for BFloat<NBITS, ES, NBYTES>
{
    /// NaN is unequal to everything, and the two zeroes are equal.
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl<const NBITS: usize, const ES: usize, const NBYTES: usize> PartialOrd
    for BFloat<NBITS, ES, NBYTES>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        if self.is_zero() && other.is_zero() {
            return Some(Ordering::Equal);
        }
        // Apart from the zeroes, the magnitude encodings are ordered
        // like the magnitudes themselves.
        let ordering = match (self.sign(), other.sign()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.magnitude_pattern().cmp(&other.magnitude_pattern()),
            (true, true) => other.magnitude_pattern().cmp(&self.magnitude_pattern()),
        };
        Some(ordering)
    }
}
