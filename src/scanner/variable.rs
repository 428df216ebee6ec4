//! # Identifier Scanning
//!
//! [`Variable`] reads a start character and then inner characters in one
//! pass, then checks the result against a reserved-word set.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Problem;
use crate::parser::{Outcome, Parser};
use crate::state::State;

/// Describes a class of identifiers: which character may start one, which
/// characters may continue it, and which spellings are reserved.
#[derive(Debug, Clone)]
pub struct TokenSpec<S, I> {
    pub start: S,
    pub inner: I,
    pub reserved: HashSet<String>,
}

impl<S, I> TokenSpec<S, I>
where
    S: Fn(char) -> bool,
    I: Fn(char) -> bool,
{
    pub fn new(start: S, inner: I) -> Self {
        Self {
            start,
            inner,
            reserved: HashSet::new(),
        }
    }

    pub fn reserved<W, T>(mut self, words: W) -> Self
    where
        W: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.reserved.extend(words.into_iter().map(Into::into));
        self
    }
}

/// Reads one identifier described by a [`TokenSpec`].
///
/// The identifier is found in one pass: the start character, then inner
/// characters until one fails the predicate. The value is exactly the
/// consumed text. A reserved spelling fails committed, positioned after the
/// word, because the characters were already consumed.
#[derive(Debug, Clone)]
pub struct Variable<S, I> {
    spec: TokenSpec<S, I>,
}

impl<S, I> Variable<S, I> {
    pub fn new(spec: TokenSpec<S, I>) -> Self {
        Self { spec }
    }
}

impl<S, I> Parser<String> for Variable<S, I>
where
    S: Fn(char) -> bool,
    I: Fn(char) -> bool,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, String> {
        let rest = state.rest();
        let mut chars = rest.chars();
        let mut next = match chars.next() {
            Some(first) if (self.spec.start)(first) => {
                let mut next = state.clone();
                next.bump(first);
                next
            }
            _ => return Outcome::fail_at(&state, Problem::ExpectingVariable),
        };
        for c in chars {
            if !(self.spec.inner)(c) {
                break;
            }
            next.bump(c);
        }

        let name = next.chomped_since(state.cursor());
        if self.spec.reserved.contains(name) {
            tracing::trace!(target: "parser::variable", name, "reserved word");
            return Outcome::failure(next.dead_end(Problem::ReservedWord(Arc::from(name))), true);
        }
        Outcome::success(name.to_string(), next, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    fn lower_spec() -> TokenSpec<impl Fn(char) -> bool, impl Fn(char) -> bool> {
        TokenSpec::new(
            |c: char| c.is_ascii_lowercase(),
            |c: char| c.is_ascii_alphanumeric() || c == '_',
        )
    }

    #[test]
    fn test_variable() {
        let parser = variable(lower_spec());
        let outcome = parser.parse(State::new("foo_1 bar"));
        assert_eq!(outcome.value().cloned(), Some("foo_1".to_string()));
        assert_eq!(outcome.state().map(State::offset), Some(5));
        assert!(outcome.committed());
    }

    #[test]
    fn test_variable_bad_start() {
        let outcome = variable(lower_spec()).parse(State::new("Foo"));
        assert_eq!(
            outcome.dead_end().map(|d| d.problem.clone()),
            Some(Problem::ExpectingVariable)
        );
        assert!(!outcome.committed());
    }

    #[test]
    fn test_variable_reserved() {
        let parser = variable(lower_spec().reserved(["let", "in"]));
        let outcome = parser.parse(State::new("in x"));
        let dead_end = outcome.dead_end().cloned().unwrap();
        assert_eq!(dead_end.problem, Problem::ReservedWord("in".into()));
        assert_eq!(dead_end.offset, 2);
        assert!(outcome.committed());

        // 予約語を含むだけなら通る
        let outcome = parser.parse(State::new("inner"));
        assert_eq!(outcome.value().cloned(), Some("inner".to_string()));
    }

    #[test]
    fn test_variable_unicode() {
        let spec = TokenSpec::new(char::is_alphabetic, char::is_alphanumeric);
        let outcome = variable(spec).parse(State::new("δx9+"));
        assert_eq!(outcome.value().cloned(), Some("δx9".to_string()));
        assert_eq!(outcome.state().map(State::col), Some(4));
    }
}
