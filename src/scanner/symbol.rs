//! # Literal Text Matching
//!
//! Parsers that match a fixed piece of text at the cursor.
//!
//! * [`Token`]: the text itself, with `symbol` and `token` as two names for
//!   the same matcher that report different problems
//! * [`Keyword`]: the text, not followed by an identifier character
//! * [`End`]: no text at all, only the end of input
//!
//! A mismatch never consumes input, so every failure here is uncommitted.

use std::sync::Arc;

use crate::error::Problem;
use crate::parser::{Outcome, Parser};
use crate::state::State;

/// Default identifier-inner class used by [`Keyword`] boundary checks.
pub fn is_identifier_inner(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Matches a literal string exactly.
///
/// `symbol` and `token` are both this parser; they only differ in the problem
/// reported on failure. A mismatch never consumes input.
#[derive(Debug, Clone)]
pub struct Token {
    literal: Arc<str>,
    problem: Problem,
}

impl Token {
    pub fn new(literal: impl Into<Arc<str>>, problem: Problem) -> Self {
        Self {
            literal: literal.into(),
            problem,
        }
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl Parser<()> for Token {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        if state.rest().starts_with(&*self.literal) {
            let next = state.advance_str(&self.literal);
            Outcome::success((), next, !self.literal.is_empty())
        } else {
            Outcome::fail_at(&state, self.problem.clone())
        }
    }
}

/// Matches a literal that must not run into a longer identifier.
///
/// `keyword("let")` accepts `let x` and `let` but not `letter`; on the inputs
/// where both succeed it behaves exactly like `symbol("let")`.
#[derive(Clone)]
pub struct Keyword<F = fn(char) -> bool> {
    literal: Arc<str>,
    is_inner: F,
}

impl Keyword {
    pub fn new(literal: impl Into<Arc<str>>) -> Self {
        Self {
            literal: literal.into(),
            is_inner: is_identifier_inner,
        }
    }
}

impl<F> Keyword<F> {
    /// Uses `is_inner` to decide what counts as a continuing identifier.
    pub fn with_inner<G>(self, is_inner: G) -> Keyword<G>
    where
        G: Fn(char) -> bool,
    {
        Keyword {
            literal: self.literal,
            is_inner,
        }
    }
}

impl<F> Parser<()> for Keyword<F>
where
    F: Fn(char) -> bool,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        let rest = state.rest();
        let matched = rest
            .strip_prefix(&*self.literal)
            .is_some_and(|after| !after.chars().next().is_some_and(&self.is_inner));
        if matched {
            let next = state.advance_str(&self.literal);
            Outcome::success((), next, !self.literal.is_empty())
        } else {
            Outcome::fail_at(&state, Problem::ExpectingKeyword(Arc::clone(&self.literal)))
        }
    }
}

/// Succeeds only at the end of input.
#[derive(Debug, Clone, Copy, Default)]
pub struct End;

impl Parser<()> for End {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        if state.at_end() {
            Outcome::success((), state, false)
        } else {
            Outcome::fail_at(&state, Problem::ExpectingEnd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn offset_of(outcome: Outcome<'_, ()>) -> Result<usize, usize> {
        match outcome {
            Outcome::Success { state, .. } => Ok(state.offset()),
            Outcome::Failure { dead_end, .. } => Err(dead_end.offset),
        }
    }

    #[test]
    fn test_symbol() {
        assert_eq!(offset_of(symbol("->").parse(State::new("->x"))), Ok(2));
        assert_eq!(offset_of(symbol("->").parse(State::new("-x"))), Err(0));
        assert_eq!(offset_of(symbol("->").parse(State::new(""))), Err(0));

        let outcome = symbol("->").parse(State::new("-x"));
        assert!(!outcome.committed());
        assert_eq!(
            outcome.dead_end().map(|d| d.problem.clone()),
            Some(Problem::ExpectingSymbol("->".into()))
        );
    }

    #[test]
    fn test_token_problem() {
        let outcome = token("then").parse(State::new("than"));
        assert_eq!(
            outcome.dead_end().map(|d| d.problem.clone()),
            Some(Problem::ExpectingToken("then".into()))
        );
    }

    #[test]
    fn test_keyword_boundary() {
        assert_eq!(offset_of(keyword("let").parse(State::new("let x"))), Ok(3));
        assert_eq!(offset_of(keyword("let").parse(State::new("let"))), Ok(3));
        assert_eq!(offset_of(keyword("let").parse(State::new("let("))), Ok(3));
        assert_eq!(offset_of(keyword("let").parse(State::new("letter"))), Err(0));
        assert_eq!(offset_of(keyword("let").parse(State::new("let_"))), Err(0));

        let outcome = keyword("let").parse(State::new("letter"));
        assert!(!outcome.committed());
        assert_eq!(
            outcome.dead_end().map(|d| d.problem.clone()),
            Some(Problem::ExpectingKeyword("let".into()))
        );
    }

    #[test]
    fn test_keyword_custom_inner() {
        let parser = keyword("if").with_inner(|c: char| c.is_ascii_lowercase());
        assert_eq!(offset_of(parser.parse(State::new("if1"))), Ok(2));
        assert_eq!(offset_of(parser.parse(State::new("ifa"))), Err(0));
    }

    #[test]
    fn test_end() {
        assert_eq!(offset_of(end().parse(State::new(""))), Ok(0));
        let outcome = end().parse(State::new("x"));
        assert_eq!(
            outcome.dead_end().map(|d| d.problem.clone()),
            Some(Problem::ExpectingEnd)
        );
    }
}
