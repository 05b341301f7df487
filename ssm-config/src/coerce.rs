//! String to scalar conversions applied to fetched parameter values.
//!
//! Integers accept an optional sign followed by a base-prefixed literal:
//! `0x`/`0X` (hex), `0o`/`0O` (octal), `0b`/`0B` (binary), a bare leading `0`
//! (octal) or plain decimal. An underscore may separate digits or follow a
//! base prefix. Unsigned targets reject any sign.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid syntax in {0:?}")]
    InvalidSyntax(String),
    #[error("value {0:?} out of range")]
    OutOfRange(String),
}

pub fn parse_signed<T>(input: &str) -> Result<T, ParseError>
where
    T: TryFrom<i128>,
{
    let (negative, literal) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let magnitude = parse_magnitude(input, literal)?;
    let value = if negative {
        if magnitude == i128::MIN.unsigned_abs() {
            i128::MIN
        } else {
            -i128::try_from(magnitude).map_err(|_| out_of_range(input))?
        }
    } else {
        i128::try_from(magnitude).map_err(|_| out_of_range(input))?
    };

    T::try_from(value).map_err(|_| out_of_range(input))
}

pub fn parse_unsigned<T>(input: &str) -> Result<T, ParseError>
where
    T: TryFrom<u128>,
{
    if input.starts_with(['+', '-']) {
        return Err(invalid_syntax(input));
    }
    let value = parse_magnitude(input, input)?;
    T::try_from(value).map_err(|_| out_of_range(input))
}

pub fn parse_bool(input: &str) -> Result<bool, ParseError> {
    match input {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(invalid_syntax(input)),
    }
}

fn split_radix(literal: &str) -> (u32, &str, bool) {
    let prefixes = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    for (prefix, radix) in prefixes {
        if let Some(digits) = literal.strip_prefix(prefix) {
            return (radix, digits, true);
        }
    }
    if literal.len() > 1 && literal.starts_with('0') {
        return (8, &literal[1..], true);
    }
    (10, literal, false)
}

/// `input` is the full fetched text, kept for error reporting.
fn parse_magnitude(input: &str, literal: &str) -> Result<u128, ParseError> {
    let (radix, digits, prefixed) = split_radix(literal);

    if digits.is_empty()
        || digits.ends_with('_')
        || digits.contains("__")
        || (!prefixed && digits.starts_with('_'))
    {
        return Err(invalid_syntax(input));
    }

    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid_syntax(input));
    }

    // Only overflow is left once every character is a valid digit.
    u128::from_str_radix(&digits, radix).map_err(|_| out_of_range(input))
}

fn invalid_syntax(input: &str) -> ParseError {
    ParseError::InvalidSyntax(input.to_string())
}

fn out_of_range(input: &str) -> ParseError {
    ParseError::OutOfRange(input.to_string())
}
