use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use tracing::{event, Level};

use numerics::prelude::*;

use super::Fail;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
    Gcd,
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Operator, String> {
        match s {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" | "x" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "%" => Ok(Operator::Remainder),
            "^" | "**" => Ok(Operator::Power),
            "gcd" => Ok(Operator::Gcd),
            other => Err(format!(
                "unknown operator '{other}' (expected one of + - * / % ^ gcd)"
            )),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Remainder => "%",
            Operator::Power => "^",
            Operator::Gcd => "gcd",
        })
    }
}

fn evaluate<const NBITS: usize, const NBYTES: usize>(
    lhs: &str,
    op: Operator,
    rhs: &str,
) -> Result<Integer<NBITS, NBYTES>, Fail> {
    let a: Integer<NBITS, NBYTES> = lhs.parse().map_err(Fail::Parse)?;
    let b: Integer<NBITS, NBYTES> = rhs.parse().map_err(Fail::Parse)?;
    let result = match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => a.divide(&b).map_err(Fail::Arithmetic)?,
        Operator::Remainder => a.remainder(&b).map_err(Fail::Arithmetic)?,
        Operator::Power => {
            if b.is_negative() {
                event!(
                    Level::WARN,
                    "negative exponent {b}: the result is zero unless |{a}| is 1"
                );
            }
            ipow(a, b)
        }
        Operator::Gcd => gcd(a, b),
    };
    event!(Level::DEBUG, "{a} {op} {b} = {result}");
    Ok(result)
}

fn show<const NBITS: usize, const NBYTES: usize>(
    lhs: &str,
    op: Operator,
    rhs: &str,
    binary: bool,
) -> Result<(), Fail> {
    let result = evaluate::<NBITS, NBYTES>(lhs, op, rhs)?;
    println!("{result}");
    if binary {
        println!("{result:#b}");
    }
    Ok(())
}

pub(crate) fn run(
    bits: usize,
    lhs: &str,
    op: Operator,
    rhs: &str,
    binary: bool,
) -> Result<(), Fail> {
    match bits {
        8 => show::<8, 1>(lhs, op, rhs, binary),
        16 => show::<16, 2>(lhs, op, rhs, binary),
        32 => show::<32, 4>(lhs, op, rhs, binary),
        64 => show::<64, 8>(lhs, op, rhs, binary),
        128 => show::<128, 16>(lhs, op, rhs, binary),
        256 => show::<256, 32>(lhs, op, rhs, binary),
        512 => show::<512, 64>(lhs, op, rhs, binary),
        1024 => show::<1024, 128>(lhs, op, rhs, binary),
        other => Err(Fail::InvalidArgument(format!(
            "{other} is not a supported integer width (use 8, 16, 32, 64, 128, 256, 512 or 1024)"
        ))),
    }
}
