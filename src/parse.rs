//! Validators for flag arguments.
//!
//! Numbers follow C `strtol(arg, &end, 0)`: leading whitespace and a sign
//! are allowed, `0x` selects hex, a leading `0` selects octal, and parsing
//! stops at the first character that is not a digit of the chosen base.

use std::fmt;

use crate::config::TaskComm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    /// No digits were found at the start of the argument.
    NoDigits,
    /// The value does not fit the target domain.
    OutOfRange,
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberError::NoDigits => write!(f, "no digits were found"),
            NumberError::OutOfRange => write!(f, "value out of range"),
        }
    }
}

impl std::error::Error for NumberError {}

/// A parsed number and whatever followed its digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed<'a, T> {
    pub value: T,
    pub rest: &'a str,
}

fn radix_and_digits(s: &str) -> (u32, &str) {
    let bytes = s.as_bytes();
    if bytes.len() > 2
        && bytes[0] == b'0'
        && (bytes[1] == b'x' || bytes[1] == b'X')
        && bytes[2].is_ascii_hexdigit()
    {
        (16, &s[2..])
    } else if bytes.first() == Some(&b'0') {
        (8, s)
    } else {
        (10, s)
    }
}

/// Parse an unsigned integer with automatic base detection.
///
/// A leading `-` is accepted only for zero; any other negative value is
/// out of range for the unsigned domains this tool uses.
pub fn parse_integer(arg: &str) -> Result<Parsed<'_, u64>, NumberError> {
    // C isspace() also covers vertical tab, which trim_start does not.
    let s = arg.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = radix_and_digits(s);

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(digits.len(), |(i, _)| i);
    if end == 0 {
        return Err(NumberError::NoDigits);
    }

    let mut value: u64 = 0;
    for c in digits[..end].chars() {
        let digit = u64::from(c.to_digit(radix).ok_or(NumberError::NoDigits)?);
        value = value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(digit))
            .ok_or(NumberError::OutOfRange)?;
    }
    if negative && value != 0 {
        return Err(NumberError::OutOfRange);
    }

    Ok(Parsed {
        value,
        rest: &digits[end..],
    })
}

/// Parse a size given in KiB, returning bytes.
pub fn parse_size_kib(arg: &str) -> Result<Parsed<'_, u64>, NumberError> {
    let Parsed { value, rest } = parse_integer(arg)?;
    let bytes = value.checked_mul(1024).ok_or(NumberError::OutOfRange)?;
    Ok(Parsed { value: bytes, rest })
}

/// Parse a process id. The value must fit in `pid_t`.
pub fn parse_pid(arg: &str) -> Result<Parsed<'_, u32>, NumberError> {
    let Parsed { value, rest } = parse_integer(arg)?;
    let max = libc::pid_t::MAX as u64;
    if value > max {
        return Err(NumberError::OutOfRange);
    }
    Ok(Parsed {
        value: value as u32,
        rest,
    })
}

/// Bounded copy of a task name. Never fails; long names are truncated.
pub fn parse_comm(arg: &str) -> TaskComm {
    TaskComm::new(arg)
}
