use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Result;

/// Lower bound of any interval, in minutes.
pub const MIN_MINUTES: u32 = 1;

/// Upper bound of any interval, in minutes (one day).
pub const MAX_MINUTES: u32 = 1440;

const MALFORMED_MESSAGE: &str = "Invalid input. Please enter valid integer: ";

enum Answer {
    Default,
    Value(u32),
    Malformed,
    OutOfRange,
}

fn parse_answer(line: &str, min: u32, max: u32) -> Answer {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if line.is_empty() {
        return Answer::Default;
    }

    // Leading blanks are skipped, anything after the digits is malformed.
    match line.trim_start().parse::<i64>() {
        Ok(value) if value >= i64::from(min) && value <= i64::from(max) => {
            Answer::Value(value as u32)
        }
        Ok(_) => Answer::OutOfRange,
        Err(_) => Answer::Malformed,
    }
}

/// Reads lines from `input` until one holds an integer in `[min, max]`.
///
/// An empty line (or end of input) accepts `default`; a line holding only
/// whitespace is malformed. Every rejected line writes exactly one error
/// message to `output` and reads again.
pub fn prompt_bounded_int<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: u32,
    min: u32,
    max: u32,
) -> Result<u32> {
    let mut line = String::new();
    loop {
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!(default, "input closed, using default");
            return Ok(default);
        }

        match parse_answer(&line, min, max) {
            Answer::Default => return Ok(default),
            Answer::Value(value) => return Ok(value),
            Answer::Malformed => {
                debug!(input = line.trim(), "rejected malformed interval");
                write!(output, "{}", MALFORMED_MESSAGE)?;
            }
            Answer::OutOfRange => {
                debug!(input = line.trim(), "rejected out of range interval");
                write!(
                    output,
                    "Invalid input. Please enter integer value in range {} - {}: ",
                    min, max
                )?;
            }
        }
    }
}
