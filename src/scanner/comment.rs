//! # Comment Handling
//!
//! Line comments run to a newline or the end of input. Block comments end at
//! their closing marker, optionally counting nested openers.

use std::sync::Arc;

use crate::error::Problem;
use crate::parser::{Outcome, Parser};
use crate::scanner::chomp::{ChompUntil, ChompUntilEndOr};
use crate::scanner::symbol::Token;
use crate::state::State;

/// Whether a block comment may contain further block comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nestable {
    NotNestable,
    Nestable,
}

/// `start` followed by everything up to the end of the line. The newline
/// itself is left for the caller.
#[derive(Debug, Clone)]
pub struct LineComment {
    start: Token,
    rest: ChompUntilEndOr,
}

impl LineComment {
    pub fn new(start: impl Into<Arc<str>>) -> Self {
        let start: Arc<str> = start.into();
        Self {
            start: Token::new(Arc::clone(&start), Problem::ExpectingSymbol(start)),
            rest: ChompUntilEndOr::new("\n"),
        }
    }
}

impl Parser<()> for LineComment {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        self.start
            .parse(state)
            .then(|_, state| self.rest.parse(state))
    }
}

/// A block comment from `open` to `close`, both included.
///
/// Unterminated comments fail committed at the end of input, expecting
/// `close`.
#[derive(Debug, Clone)]
pub struct MultiComment {
    open: Token,
    close: Token,
    body: ChompUntil,
    nestable: Nestable,
}

impl MultiComment {
    pub fn new(open: impl Into<Arc<str>>, close: impl Into<Arc<str>>, nestable: Nestable) -> Self {
        let open: Arc<str> = open.into();
        let close: Arc<str> = close.into();
        Self {
            open: Token::new(Arc::clone(&open), Problem::ExpectingSymbol(open)),
            close: Token::new(Arc::clone(&close), Problem::ExpectingSymbol(Arc::clone(&close))),
            body: ChompUntil::new(close),
            nestable,
        }
    }

    fn parse_nested<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        let (open, close) = (self.open.literal(), self.close.literal());
        let mut depth = 1usize;
        let mut next = state;
        loop {
            let rest = next.rest();
            if rest.starts_with(close) {
                next = next.advance_str(close);
                depth -= 1;
                if depth == 0 {
                    return Outcome::success((), next, true);
                }
            } else if rest.starts_with(open) {
                next = next.advance_str(open);
                depth += 1;
            } else if let Some(c) = rest.chars().next() {
                next.bump(c);
            } else {
                tracing::trace!(target: "parser::comment", depth, "unterminated block comment");
                let problem = Problem::ExpectingSymbol(Arc::from(close));
                return Outcome::failure(next.dead_end(problem), true);
            }
        }
    }
}

impl Parser<()> for MultiComment {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        self.open.parse(state).then(|_, state| match self.nestable {
            Nestable::NotNestable => self
                .body
                .parse(state)
                .then(|_, state| self.close.parse(state)),
            Nestable::Nestable => self.parse_nested(state),
        })
    }
}
