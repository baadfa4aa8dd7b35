//! Operator implementations for [`Integer`].
//!
//! Addition, subtraction and multiplication wrap modulo `2^NBITS`.
//! Division and remainder truncate towards zero; see the `division`
//! module for what happens when the divisor is zero.

use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use super::Integer;

impl<const NBITS: usize, const NBYTES: usize> AddAssign for Integer<NBITS, NBYTES> {
    fn add_assign(&mut self, rhs: Self) {
        self.bits.add_assign(&rhs.bits);
    }
}

impl<const NBITS: usize, const NBYTES: usize> SubAssign for Integer<NBITS, NBYTES> {
    fn sub_assign(&mut self, rhs: Self) {
        *self += rhs.twos_complement();
    }
}

impl<const NBITS: usize, const NBYTES: usize> MulAssign for Integer<NBITS, NBYTES> {
    /// Shift-and-add.  Reading both operands as unsigned gives the
    /// right two's complement product modulo 2^NBITS.
    fn mul_assign(&mut self, rhs: Self) {
        let mut product = Self::ZERO;
        let mut multiplicand = *self;
        let mut multiplier = rhs.bits;
        while !multiplier.is_zero() {
            if multiplier.bit(0) {
                product += multiplicand;
            }
            multiplicand.bits.shl_assign(1);
            multiplier.shr_assign(1, false);
        }
        *self = product;
    }
}

impl<const NBITS: usize, const NBYTES: usize> DivAssign for Integer<NBITS, NBYTES> {
    /// # Panics
    ///
    /// Panics if `rhs` is zero, unless the `lenient-divide-by-zero`
    /// feature is enabled.
    fn div_assign(&mut self, rhs: Self) {
        *self = self.div_rem_or_fault(&rhs).quotient;
    }
}

impl<const NBITS: usize, const NBYTES: usize> RemAssign for Integer<NBITS, NBYTES> {
    /// # Panics
    ///
    /// Panics if `rhs` is zero, unless the `lenient-divide-by-zero`
    /// feature is enabled.
    fn rem_assign(&mut self, rhs: Self) {
        *self = self.div_rem_or_fault(&rhs).remainder;
    }
}

// Given the compound assignment operator for Integer, this macro
// generates the binary operator and the variants taking a native
// i64 on either side.
macro_rules! binary_op_via_assign {
    ($Trait:ident, $method:ident, $AssignTrait:ident, $assign_method:ident) => {
        impl<const NBITS: usize, const NBYTES: usize> $Trait for Integer<NBITS, NBYTES> {
            type Output = Self;
            fn $method(mut self, rhs: Self) -> Self {
                self.$assign_method(rhs);
                self
            }
        }

        impl<const NBITS: usize, const NBYTES: usize> $AssignTrait<i64> for Integer<NBITS, NBYTES> {
            fn $assign_method(&mut self, rhs: i64) {
                self.$assign_method(Self::from(rhs));
            }
        }

        impl<const NBITS: usize, const NBYTES: usize> $Trait<i64> for Integer<NBITS, NBYTES> {
            type Output = Self;
            fn $method(mut self, rhs: i64) -> Self {
                self.$assign_method(Self::from(rhs));
                self
            }
        }

        impl<const NBITS: usize, const NBYTES: usize> $Trait<Integer<NBITS, NBYTES>> for i64 {
            type Output = Integer<NBITS, NBYTES>;
            fn $method(self, rhs: Integer<NBITS, NBYTES>) -> Integer<NBITS, NBYTES> {
                let mut result = Integer::<NBITS, NBYTES>::from(self);
                result.$assign_method(rhs);
                result
            }
        }
    };
}

binary_op_via_assign!(Add, add, AddAssign, add_assign);
binary_op_via_assign!(Sub, sub, SubAssign, sub_assign);
binary_op_via_assign!(Mul, mul, MulAssign, mul_assign);
binary_op_via_assign!(Div, div, DivAssign, div_assign);
binary_op_via_assign!(Rem, rem, RemAssign, rem_assign);

impl<const NBITS: usize, const NBYTES: usize> Neg for Integer<NBITS, NBYTES> {
    type Output = Self;
    fn neg(self) -> Self {
        self.wrapping_neg()
    }
}

impl<const NBITS: usize, const NBYTES: usize> Not for Integer<NBITS, NBYTES> {
    type Output = Self;
    fn not(mut self) -> Self {
        self.flip();
        self
    }
}

impl<const NBITS: usize, const NBYTES: usize> Integer<NBITS, NBYTES> {
    pub fn increment(&mut self) {
        self.bits.increment();
    }

    pub fn decrement(&mut self) {
        *self -= Self::ONE;
    }

    fn shift_left(&mut self, amount: usize) {
        self.bits.shl_assign(amount);
    }

    fn shift_right(&mut self, amount: usize) {
        let negative = self.is_negative();
        self.bits.shr_assign(amount, negative);
    }
}

impl<const NBITS: usize, const NBYTES: usize> ShlAssign<i32> for Integer<NBITS, NBYTES> {
    /// A negative shift amount shifts right instead.
    fn shl_assign(&mut self, amount: i32) {
        let distance = amount.unsigned_abs() as usize;
        if amount < 0 {
            self.shift_right(distance);
        } else {
            self.shift_left(distance);
        }
    }
}

impl<const NBITS: usize, const NBYTES: usize> ShrAssign<i32> for Integer<NBITS, NBYTES> {
    /// Arithmetic (sign-extending) shift.  A negative shift amount
    /// shifts left instead.
    fn shr_assign(&mut self, amount: i32) {
        let distance = amount.unsigned_abs() as usize;
        if amount < 0 {
            self.shift_left(distance);
        } else {
            self.shift_right(distance);
        }
    }
}

impl<const NBITS: usize, const NBYTES: usize> Shl<i32> for Integer<NBITS, NBYTES> {
    type Output = Self;
    fn shl(mut self, amount: i32) -> Self {
        self <<= amount;
        self
    }
}

impl<const NBITS: usize, const NBYTES: usize> Shr<i32> for Integer<NBITS, NBYTES> {
    type Output = Self;
    fn shr(mut self, amount: i32) -> Self {
        self >>= amount;
        self
    }
}

macro_rules! bitwise_op {
    ($Trait:ident, $method:ident, $AssignTrait:ident, $assign_method:ident, $op:tt) => {
        impl<const NBITS: usize, const NBYTES: usize> $AssignTrait for Integer<NBITS, NBYTES> {
            fn $assign_method(&mut self, rhs: Self) {
                self.bits.combine(&rhs.bits, |a, b| a $op b);
            }
        }

        impl<const NBITS: usize, const NBYTES: usize> $Trait for Integer<NBITS, NBYTES> {
            type Output = Self;
            fn $method(mut self, rhs: Self) -> Self {
                self.$assign_method(rhs);
                self
            }
        }
    };
}

bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);
