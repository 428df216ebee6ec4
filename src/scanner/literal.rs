//! Numeric literals: decimal `i64` and `f64`.

use std::sync::Arc;

use crate::error::Problem;
use crate::parser::{Outcome, Parser};
use crate::state::State;

/// Parses a run of ASCII digits as an `i64`.
///
/// No sign and no radix prefixes; grammars add those around it. Digits that
/// do not fit in an `i64` fail committed with `InvalidNumber`, reported at the
/// start of the number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Int;

impl Parser<i64> for Int {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, i64> {
        let next = state.advance_while(|c| c.is_ascii_digit());
        let digits = next.chomped_since(state.cursor());
        if digits.is_empty() {
            return Outcome::fail_at(&state, Problem::ExpectingInt);
        }
        match digits.parse::<i64>() {
            Ok(value) => Outcome::success(value, next, true),
            Err(_) => {
                Outcome::failure(state.dead_end(Problem::InvalidNumber(Arc::from(digits))), true)
            }
        }
    }
}

/// Parses `digits [. digits] [(e|E) [+|-] digits]` as an `f64`.
///
/// The fraction and the exponent are only taken when well formed, so `1.`
/// reads as `1` followed by `.`, and `2e` reads as `2` followed by `e`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

impl Parser<f64> for Float {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, f64> {
        let is_digit = |c: char| c.is_ascii_digit();
        let mut next = state.advance_while(is_digit);
        if next.offset() == state.offset() {
            return Outcome::fail_at(&state, Problem::ExpectingFloat);
        }

        let rest = next.rest();
        if let Some(fraction) = rest.strip_prefix('.') {
            if fraction.starts_with(is_digit) {
                next = next.advance_str(".").advance_while(is_digit);
            }
        }

        let rest = next.rest();
        if let Some(exponent) = rest.strip_prefix(['e', 'E']) {
            let unsigned = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            if unsigned.starts_with(is_digit) {
                let marker = &rest[..rest.len() - unsigned.len()];
                next = next.advance_str(marker).advance_while(is_digit);
            }
        }

        let text = next.chomped_since(state.cursor());
        match text.parse::<f64>() {
            Ok(value) => Outcome::success(value, next, true),
            Err(_) => {
                Outcome::failure(state.dead_end(Problem::InvalidNumber(Arc::from(text))), true)
            }
        }
    }
}
