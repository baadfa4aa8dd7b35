//! The prelude exports the number types, their aliases and the error
//! types, which is usually everything a caller needs.
pub use super::bfloat::*;
pub use super::error::*;
pub use super::integer::*;
pub use super::sequences::{fibonacci_pair, golden_ratio_digits, phi_through_fibonacci};
pub use super::{bfloat_type, int_type};
