//! The `numerics` crate provides fixed-width number types for
//! numerical experiments where the exact bit width, rounding and
//! overflow behaviour matter:
//!
//! - [`Integer`], a two's complement integer of any width, with
//!   wrapping arithmetic, truncating division and decimal conversion
//!   that does not depend on any native accumulator;
//! - [`BFloat`], a binary floating-point format with a configurable
//!   exponent field width, subnormals, infinities and NaNs;
//! - helper arithmetic ([`gcd`], [`ipow`], [`pow_mod`]) and the
//!   golden-ratio experiments in [`sequences`].

mod bfloat;
mod integer;
mod storage;

pub mod error;
pub mod prelude;
pub mod sequences;

pub use crate::bfloat::*;
pub use crate::integer::*;
pub use crate::storage::storage_bytes;

/// Names the [`Integer`] type of the given width, filling in the
/// storage size.
///
/// ```
/// use numerics::int_type;
/// type Int40 = int_type!(40);
/// let x = Int40::from(1_i64 << 38);
/// assert_eq!(x.find_msb(), 38);
/// ```
#[macro_export]
macro_rules! int_type {
    ($nbits:expr) => {
        $crate::Integer<{ $nbits }, { $crate::storage_bytes($nbits) }>
    };
}

/// Names the [`BFloat`] type with the given total width and exponent
/// field width, filling in the storage size.
///
/// ```
/// use numerics::bfloat_type;
/// type Half = bfloat_type!(16, 5);
/// assert_eq!(Half::from(1.5_f64).to_f64(), 1.5);
/// ```
#[macro_export]
macro_rules! bfloat_type {
    ($nbits:expr, $es:expr) => {
        $crate::BFloat<{ $nbits }, { $es }, { $crate::storage_bytes($nbits) }>
    };
}

#[test]
fn test_type_macros() {
    type Int40 = int_type!(40);
    assert_eq!(Int40::MAX, (1_i64 << 39) - 1);
    type Wide = int_type!(1024);
    assert_eq!(Wide::ZERO, Int1024::ZERO);

    type Bf = bfloat_type!(32, 8);
    assert_eq!(Bf::from(0.25_f32).to_f32(), 0.25);
}
