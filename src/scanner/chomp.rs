//! Chomping primitives: consume characters without producing a value, and
//! recover the consumed text afterwards.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::Problem;
use crate::parser::{Outcome, Parser};
use crate::state::State;

/// Consumes one character satisfying the predicate.
#[derive(Clone)]
pub struct ChompIf<F> {
    predicate: F,
    problem: Problem,
}

impl<F> ChompIf<F> {
    pub fn new(predicate: F, problem: Problem) -> Self {
        Self { predicate, problem }
    }
}

impl<F> Parser<()> for ChompIf<F>
where
    F: Fn(char) -> bool,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        match state.peek() {
            Some(c) if (self.predicate)(c) => {
                let mut next = state;
                next.bump(c);
                Outcome::success((), next, true)
            }
            _ => Outcome::fail_at(&state, self.problem.clone()),
        }
    }
}

/// Consumes characters while the predicate holds. Never fails.
#[derive(Clone)]
pub struct ChompWhile<F> {
    predicate: F,
}

impl<F> ChompWhile<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> Parser<()> for ChompWhile<F>
where
    F: Fn(char) -> bool,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        let next = state.advance_while(&self.predicate);
        let committed = next.offset() > state.offset();
        Outcome::success((), next, committed)
    }
}

/// Consumes characters up to, not including, the first occurrence of
/// `marker`.
///
/// When the marker never occurs, fails at the end of input with
/// `ExpectingMarker`. That failure is committed unless the parser started at
/// the end of input, since everything up to the end was scanned.
#[derive(Debug, Clone)]
pub struct ChompUntil {
    marker: Arc<str>,
}

impl ChompUntil {
    pub fn new(marker: impl Into<Arc<str>>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Parser<()> for ChompUntil {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        let rest = state.rest();
        match rest.find(&*self.marker) {
            Some(index) => {
                let next = state.advance_str(&rest[..index]);
                Outcome::success((), next, index > 0)
            }
            None => {
                let end = state.advance_str(rest);
                let problem = Problem::ExpectingMarker(Arc::clone(&self.marker));
                Outcome::failure(end.dead_end(problem), !rest.is_empty())
            }
        }
    }
}

/// Like [`ChompUntil`], but reaching the end of input is also fine.
#[derive(Debug, Clone)]
pub struct ChompUntilEndOr {
    marker: Arc<str>,
}

impl ChompUntilEndOr {
    pub fn new(marker: impl Into<Arc<str>>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Parser<()> for ChompUntilEndOr {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        let rest = state.rest();
        let index = rest.find(&*self.marker).unwrap_or(rest.len());
        let next = state.advance_str(&rest[..index]);
        Outcome::success((), next, index > 0)
    }
}

/// Runs a parser for its effect and returns the source text it consumed.
#[derive(Clone)]
pub struct GetChompedString<P, A> {
    parser: P,
    _phantom: PhantomData<fn() -> A>,
}

impl<P, A> GetChompedString<P, A> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<P, A> Parser<String> for GetChompedString<P, A>
where
    P: Parser<A>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, String> {
        let start = state.cursor();
        match self.parser.parse(state) {
            Outcome::Success {
                state, committed, ..
            } => {
                let chomped = state.chomped_since(start).to_string();
                Outcome::success(chomped, state, committed)
            }
            Outcome::Failure {
                dead_end,
                committed,
            } => Outcome::failure(dead_end, committed),
        }
    }
}

/// Runs a parser and hands the consumed text, borrowed from the source, to
/// `f` together with the parser's value.
///
/// Same outcome as mapping over [`GetChompedString`], without building the
/// intermediate `String`.
#[derive(Clone)]
pub struct MapChompedString<P, F, A> {
    parser: P,
    f: F,
    _phantom: PhantomData<fn() -> A>,
}

impl<P, F, A> MapChompedString<P, F, A> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<P, F, A, B> Parser<B> for MapChompedString<P, F, A>
where
    P: Parser<A>,
    F: Fn(&str, A) -> B,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, B> {
        let start = state.cursor();
        match self.parser.parse(state) {
            Outcome::Success {
                value,
                state,
                committed,
            } => {
                let value = (self.f)(state.chomped_since(start), value);
                Outcome::success(value, state, committed)
            }
            Outcome::Failure {
                dead_end,
                committed,
            } => Outcome::failure(dead_end, committed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::state::Position;

    #[test]
    fn test_chomp_if() {
        let parser = chomp_if(|c| c.is_ascii_digit());
        let outcome = parser.parse(State::new("7a"));
        assert_eq!(outcome.state().map(State::offset), Some(1));
        assert!(outcome.committed());

        let outcome = parser.parse(State::new("a7"));
        assert_eq!(
            outcome.dead_end().map(|d| d.problem.clone()),
            Some(Problem::UnexpectedChar)
        );
        assert!(!outcome.committed());

        // 入力終端
        assert!(!parser.parse(State::new("")).is_success());
    }

    #[test]
    fn test_chomp_if_newline_moves_row() {
        let outcome = chomp_if(|c| c == '\n').parse(State::new("\nx"));
        assert_eq!(outcome.state().map(State::position), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_chomp_while() {
        let parser = chomp_while(|c| c == 'a');
        let outcome = parser.parse(State::new("aaab"));
        assert_eq!(outcome.state().map(State::offset), Some(3));
        assert!(outcome.committed());

        let outcome = parser.parse(State::new("b"));
        assert!(outcome.is_success());
        assert_eq!(outcome.state().map(State::offset), Some(0));
        assert!(!outcome.committed());
    }

    #[test]
    fn test_chomp_until_stops_before_marker() {
        let parser = get_chomped_string(chomp_until("*/"));
        let outcome = parser.parse(State::new("abc\n*/rest"));
        assert_eq!(outcome.value().map(String::as_str), Some("abc\n"));
        assert_eq!(outcome.state().map(State::position), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_chomp_until_missing_marker() {
        let outcome = chomp_until("*/").parse(State::new("abc"));
        let dead_end = outcome.dead_end().cloned().unwrap();
        assert_eq!(dead_end.problem, Problem::ExpectingMarker("*/".into()));
        assert_eq!(dead_end.offset, 3);
        assert!(outcome.committed());

        // 何も消費していなければ uncommitted
        let outcome = chomp_until("*/").parse(State::new(""));
        assert!(!outcome.is_success());
        assert!(!outcome.committed());
    }

    #[test]
    fn test_chomp_until_end_or() {
        let parser = get_chomped_string(chomp_until_end_or("\n"));
        assert_eq!(
            parser.parse(State::new("abc")).value().map(String::as_str),
            Some("abc")
        );
        assert_eq!(
            parser.parse(State::new("ab\nc")).value().map(String::as_str),
            Some("ab")
        );
    }

    #[test]
    fn test_get_chomped_string_keeps_failure() {
        let parser = get_chomped_string(symbol("a").skip(symbol("b")));
        let outcome = parser.parse(State::new("ac"));
        assert_eq!(outcome.dead_end().map(|d| d.offset), Some(1));
        assert!(outcome.committed());
    }

    #[test]
    fn test_map_chomped_string() {
        let parser = map_chomped_string(int(), |text: &str, n: i64| (text.len(), n));
        assert_eq!(
            parser.parse(State::new("0042;")).value().copied(),
            Some((4, 42))
        );
    }
}
