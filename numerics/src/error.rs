//! Basic error reporting.

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

/// Represents a failure to convert one of the fixed-width types
/// defined in this crate to a native type which cannot hold the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionFailed {
    TooLarge,
    TooSmall,
}

impl Error for ConversionFailed {}

impl Display for ConversionFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ConversionFailed::TooLarge => f.write_str("value is too large"),
            ConversionFailed::TooSmall => f.write_str("value is too small"),
        }
    }
}

/// Failures of arithmetic operations whose preconditions were not
/// met by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticError {
    DivideByZero,
    NegativeExponent,
}

impl Error for ArithmeticError {}

impl Display for ArithmeticError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ArithmeticError::DivideByZero => f.write_str("attempt to divide by zero"),
            ArithmeticError::NegativeExponent => f.write_str("exponent must not be negative"),
        }
    }
}

/// A bit (or byte) index was outside the storage of a fixed-width
/// value.  `limit` is the number of valid indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitIndexOutOfBounds {
    pub index: usize,
    pub limit: usize,
}

impl Error for BitIndexOutOfBounds {}

impl Display for BitIndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "index {} is out of bounds (there are only {} valid positions)",
            self.index, self.limit
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseFailureReason {
    Empty,
    UnrecognisedFormat,
}

/// Text could not be parsed as a number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseFailure {
    pub text: String,
    pub reason: ParseFailureReason,
}

impl Error for ParseFailure {}

impl Display for ParseFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self.reason {
            ParseFailureReason::Empty => f.write_str("cannot parse a number from empty input"),
            ParseFailureReason::UnrecognisedFormat => {
                write!(f, "'{}' is not a recognised number format", self.text)
            }
        }
    }
}
