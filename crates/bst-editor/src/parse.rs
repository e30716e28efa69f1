//! Text input → keys.
//!
//! The host hands over whatever the user typed. Lists accept commas and/or
//! whitespace as separators (`"5, 3 8,1"`); every token must be a whole
//! decimal integer.

use crate::error::CommandError;
use bst_core::Key;
use std::str::FromStr;
use winnow::ascii::digit1;
use winnow::combinator::opt;
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Largest magnitude a host `f64` can carry without losing integer precision.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parse a list of keys for `build`.
pub fn parse_values(input: &str) -> Result<Vec<Key>, CommandError> {
    let mut rest = input;
    let mut keys = Vec::new();

    loop {
        skip_separators(&mut rest);
        let Some(token) = next_token(&mut rest) else {
            break;
        };
        keys.push(parse_key(token)?);
    }

    if keys.is_empty() {
        return Err(CommandError::EmptyInput);
    }
    Ok(keys)
}

/// Parse a single key for `insert` / `delete` / `find`.
pub fn parse_number(input: &str) -> Result<Key, CommandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CommandError::EmptyInput);
    }
    parse_key(trimmed)
}

/// Accept a number coming from JavaScript only if it is a whole, exactly
/// representable integer.
pub fn key_from_f64(n: f64) -> Result<Key, CommandError> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Ok(n as Key)
    } else {
        Err(CommandError::InvalidNumber(n.to_string()))
    }
}

/// Optional sign, then decimal digits. Leading zeros are fine (`"007"`, `"-0"`).
fn parse_key(token: &str) -> Result<Key, CommandError> {
    let invalid = || CommandError::InvalidNumber(token.to_string());
    let number = (
        opt(one_of::<_, _, ContextError>(['+', '-'])),
        digit1::<_, ContextError>,
    )
        .take()
        .parse(token)
        .map_err(|_| invalid())?;
    Key::from_str(number).map_err(|_| invalid())
}

fn skip_separators(input: &mut &str) {
    let _ = take_while::<_, _, ContextError>(0.., is_separator).parse_next(input);
}

fn next_token<'a>(input: &mut &'a str) -> Option<&'a str> {
    take_while::<_, _, ContextError>(1.., |c: char| !is_separator(c))
        .parse_next(input)
        .ok()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}
