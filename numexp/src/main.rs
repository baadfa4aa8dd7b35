use std::error::Error;
use std::fmt::{self, Display, Formatter};

use clap::ArgAction::{Set, SetTrue};
use clap::{Parser, Subcommand};
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use numerics::error::{ArithmeticError, ParseFailure};

mod calc;
mod fields;
mod golden;

/// Experiments with fixed-width integers and custom floating-point
/// formats
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate `LHS OP RHS` in a two's complement integer of the
    /// given width.  OP is one of + - * / % ^ gcd.
    Calc {
        /// Width of the integers (8, 16, 32, 64, 128, 256, 512 or 1024).
        #[clap(action = Set, long, default_value_t = 64)]
        bits: usize,

        /// Also print the result in binary.
        #[clap(action = SetTrue, long)]
        binary: bool,

        #[clap(action = Set, allow_negative_numbers = true)]
        lhs: String,

        #[clap(action = Set)]
        op: calc::Operator,

        #[clap(action = Set, allow_negative_numbers = true)]
        rhs: String,
    },

    /// Show how a value is encoded in a bfloat format.
    Bfloat {
        /// Total number of bits in the encoding.
        #[clap(action = Set, long, default_value_t = 16)]
        nbits: usize,

        /// Number of exponent bits.
        #[clap(action = Set, long, default_value_t = 8)]
        es: usize,

        /// The value to encode, for example 3.14, -1e-5, inf or nan.
        #[clap(action = Set, allow_negative_numbers = true)]
        value: String,
    },

    /// Approximate the golden ratio with ratios of Fibonacci numbers.
    Golden {
        /// First number of Fibonacci terms.
        #[clap(action = Set, long, default_value_t = 40)]
        from: u32,

        /// Last number of Fibonacci terms (exclusive).
        #[clap(action = Set, long, default_value_t = 50)]
        to: u32,

        /// Decimal places to print.
        #[clap(action = Set, long, default_value_t = 27)]
        digits: u32,
    },
}

#[derive(Debug)]
pub(crate) enum Fail {
    /// We were not able to correctly initialise logging.
    InitialisationFailure(String),
    /// The command line made sense to the parser, but not to us.
    InvalidArgument(String),
    Parse(ParseFailure),
    Arithmetic(ArithmeticError),
    Output(std::io::Error),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::InitialisationFailure(msg) | Fail::InvalidArgument(msg) => {
                f.write_str(msg.as_str())
            }
            Fail::Parse(e) => e.fmt(f),
            Fail::Arithmetic(e) => e.fmt(f),
            Fail::Output(e) => write!(f, "failed to write output: {e}"),
        }
    }
}

impl Error for Fail {}

fn run_command() -> Result<(), Fail> {
    let cli = Cli::parse();

    // Set RUST_LOG (for example RUST_LOG=numerics=debug) to select
    // which trace messages get printed.
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let result = match cli.command {
        Command::Calc {
            bits,
            binary,
            lhs,
            op,
            rhs,
        } => {
            let span = span!(Level::ERROR, "calc", bits);
            let _enter = span.enter();
            calc::run(bits, &lhs, op, &rhs, binary)
        }
        Command::Bfloat { nbits, es, value } => {
            let span = span!(Level::ERROR, "bfloat", nbits, es);
            let _enter = span.enter();
            fields::run(nbits, es, &value)
        }
        Command::Golden { from, to, digits } => {
            let span = span!(Level::ERROR, "golden", from, to);
            let _enter = span.enter();
            golden::run(from, to, digits)
        }
    };
    if let Err(e) = &result {
        event!(Level::DEBUG, "command failed: {:?}", e);
    }
    result
}

fn main() {
    match run_command() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
