use std::io::{IsTerminal, Write};

use termcolor::{self, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{event, Level};

use numerics::prelude::*;

use super::Fail;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Sign,
    Exponent,
    Fraction,
}

fn get_colour_choice() -> termcolor::ColorChoice {
    if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Writes bfloat encodings to stdout with each field in its own
/// colour.
struct FieldWriter {
    stream: StandardStream,
}

impl FieldWriter {
    fn new() -> FieldWriter {
        FieldWriter {
            stream: StandardStream::stdout(get_colour_choice()),
        }
    }

    fn set_field_colour(&mut self, field: Field) {
        let mut new_colour = ColorSpec::new();
        match field {
            Field::Sign => {
                new_colour.set_fg(Some(termcolor::Color::Red)).set_bold(true);
            }
            Field::Exponent => {
                new_colour.set_fg(Some(termcolor::Color::Green));
            }
            Field::Fraction => {
                new_colour.set_fg(Some(termcolor::Color::Blue));
            }
        }
        if let Err(e) = self.stream.set_color(&new_colour) {
            event!(
                Level::ERROR,
                "Failed to select colour {:?}: {}",
                new_colour,
                e
            );
        }
    }

    fn reset_colour(&mut self) {
        if let Err(e) = self.stream.reset() {
            event!(Level::ERROR, "Failed to reset terminal: {}", e);
        }
    }

    /// Writes the sign, exponent and fraction fields of `x` separated
    /// by spaces, most significant bit first.
    fn write_fields<const NBITS: usize, const ES: usize, const NBYTES: usize>(
        &mut self,
        x: &BFloat<NBITS, ES, NBYTES>,
    ) -> Result<(), std::io::Error> {
        let binary = x.to_binary(false);
        let digits = binary.trim_start_matches('b');
        let (sign, rest) = digits.split_at(1);
        let (exponent, fraction) = rest.split_at(ES);
        for (field, text) in [
            (Field::Sign, sign),
            (Field::Exponent, exponent),
            (Field::Fraction, fraction),
        ] {
            if field != Field::Sign {
                write!(self.stream, " ")?;
            }
            self.set_field_colour(field);
            write!(self.stream, "{text}")?;
            self.reset_colour();
        }
        writeln!(self.stream)?;
        self.stream.flush()
    }
}

fn show<const NBITS: usize, const ES: usize, const NBYTES: usize>(
    value: &str,
) -> Result<(), Fail> {
    let x: BFloat<NBITS, ES, NBYTES> = value.parse().map_err(|e| {
        Fail::InvalidArgument(format!("'{value}' is not a floating-point number: {e}"))
    })?;
    event!(
        Level::DEBUG,
        "bfloat<{NBITS},{ES}>: bias {}, largest exponent {}, smallest exponent {}",
        BFloat::<NBITS, ES, NBYTES>::EXP_BIAS,
        BFloat::<NBITS, ES, NBYTES>::MAX_EXP,
        BFloat::<NBITS, ES, NBYTES>::MIN_EXP_SUBNORMAL,
    );

    let mut writer = FieldWriter::new();
    writer.write_fields(&x).map_err(Fail::Output)?;
    println!("class:   {:?}", x.classify());
    println!("fields:  {}", x.describe());
    println!("value:   {x}");
    if let Ok(native) = value.trim().parse::<f64>() {
        let error = x.to_f64() - native;
        if error != 0.0 && error.is_finite() {
            println!("error:   {error:e}");
        }
    }
    Ok(())
}

/// The (nbits, es) pairs the `bfloat` command knows about.
const SUPPORTED: &str = "8/2, 8/3, 8/4, 16/5, 16/8, 32/8, 64/11 and 128/15";

pub(crate) fn run(nbits: usize, es: usize, value: &str) -> Result<(), Fail> {
    match (nbits, es) {
        (8, 2) => show::<8, 2, 1>(value),
        (8, 3) => show::<8, 3, 1>(value),
        (8, 4) => show::<8, 4, 1>(value),
        (16, 5) => show::<16, 5, 2>(value),
        (16, 8) => show::<16, 8, 2>(value),
        (32, 8) => show::<32, 8, 4>(value),
        (64, 11) => show::<64, 11, 8>(value),
        (128, 15) => show::<128, 15, 16>(value),
        _ => Err(Fail::InvalidArgument(format!(
            "bfloat<{nbits},{es}> is not supported (supported nbits/es pairs are {SUPPORTED})"
        ))),
    }
}
