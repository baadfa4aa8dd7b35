//! Reading integers from text.
//!
//! The accepted forms are decimal (`1234`), hexadecimal (`0x4D2`) and
//! octal (`02322`), each optionally preceded by `-`.  Apostrophes may
//! be used to group digits (`0xFFFF'0000`, `1'000'000`).  Digits
//! beyond the width of the integer are discarded, so the result is
//! always the value modulo `2^NBITS`.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{event, Level};

use super::super::error::{ParseFailure, ParseFailureReason};
use super::{Decimal, Integer};

// A leading 0 followed by a non-zero octal digit selects octal, so
// "017" is fifteen while "0" and "09" are decimal.
const NUMBER_PATTERN: &str = concat!(
    r"^(?P<sign>-)?(?:",
    r"0[xX](?P<hex>[0-9a-fA-F']+)",
    r"|0(?P<oct>[1-7][0-7']*)",
    r"|(?P<dec>[0-9][0-9']*)",
    r")$"
);

fn number_syntax() -> &'static Regex {
    static SYNTAX: OnceLock<Regex> = OnceLock::new();
    SYNTAX.get_or_init(|| match Regex::new(NUMBER_PATTERN) {
        Ok(r) => r,
        Err(e) => {
            panic!("'{NUMBER_PATTERN}' is not a valid regular expression: {e}");
        }
    })
}

fn digit_values(digits: &str, radix: u32) -> impl Iterator<Item = u8> + '_ {
    digits
        .chars()
        .filter_map(move |ch| ch.to_digit(radix))
        .map(|d| d as u8)
}

impl<const NBITS: usize, const NBYTES: usize> Integer<NBITS, NBYTES> {
    /// Accumulates digits of a power-of-two radix by shifting each
    /// one in at the bottom.
    fn from_binary_radix_digits(digits: &str, bits_per_digit: usize) -> Self {
        let radix = 1u32 << bits_per_digit;
        let width = bits_per_digit.min(NBITS);
        let mut value = Self::ZERO;
        for d in digit_values(digits, radix) {
            value.bits.shl_assign(bits_per_digit);
            value.bits.put_field(0, width, u64::from(d));
        }
        value
    }

    fn from_decimal_digits(digits: &str) -> Self {
        let msd_first: Vec<u8> = digit_values(digits, 10).collect();
        match Decimal::from_digits(false, &msd_first) {
            Some(decimal) => decimal.to_integer(),
            None => Self::ZERO,
        }
    }

    /// Parses `text` into `self`.  On failure the value is set to zero
    /// and the failure is also logged.
    pub fn assign(&mut self, text: &str) -> Result<(), ParseFailure> {
        match text.parse::<Self>() {
            Ok(value) => {
                *self = value;
                Ok(())
            }
            Err(e) => {
                event!(Level::WARN, "{e}; using zero instead");
                self.clear();
                Err(e)
            }
        }
    }
}

impl<const NBITS: usize, const NBYTES: usize> FromStr for Integer<NBITS, NBYTES> {
    type Err = ParseFailure;

    fn from_str(s: &str) -> Result<Self, ParseFailure> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseFailure {
                text: s.to_string(),
                reason: ParseFailureReason::Empty,
            });
        }
        let unrecognised = || ParseFailure {
            text: s.to_string(),
            reason: ParseFailureReason::UnrecognisedFormat,
        };
        let captures = number_syntax().captures(text).ok_or_else(unrecognised)?;
        let magnitude = if let Some(hex) = captures.name("hex") {
            Self::from_binary_radix_digits(hex.as_str(), 4)
        } else if let Some(oct) = captures.name("oct") {
            Self::from_binary_radix_digits(oct.as_str(), 3)
        } else if let Some(dec) = captures.name("dec") {
            Self::from_decimal_digits(dec.as_str())
        } else {
            return Err(unrecognised());
        };
        if captures.name("sign").is_some() {
            Ok(magnitude.wrapping_neg())
        } else {
            Ok(magnitude)
        }
    }
}
