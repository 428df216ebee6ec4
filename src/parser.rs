//! # Core Parser Definitions
//!
//! This module defines the fundamental parser interface that every combinator
//! in the crate implements, the [`Outcome`] it produces, and the [`run`]
//! entry points.

use std::sync::Arc;

use crate::config::RunConfig;
use crate::error::{DeadEnd, ParseError, Problem};
use crate::state::State;

/// Parser trait defines the core parsing interface.
///
/// A parser is a pure function from a [`State`] to an [`Outcome`]. Parsers own
/// no mutable state, so the same value can be stored once and reused for any
/// number of inputs.
///
/// # Type Parameters
///
/// * `O` - The output value type
pub trait Parser<O> {
    /// Attempts to parse starting at `state`.
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O>;

    /// Erases the concrete type so the parser can be stored in a collection
    /// or shared between grammar nodes.
    fn boxed(self) -> BoxedParser<O>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Arc::new(self)
    }
}

/// Type-erased, shareable parser.
pub type BoxedParser<O> = Arc<dyn Parser<O> + Send + Sync>;

impl<O, P: Parser<O> + ?Sized> Parser<O> for Arc<P> {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        (**self).parse(state)
    }
}

impl<O, P: Parser<O> + ?Sized> Parser<O> for Box<P> {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        (**self).parse(state)
    }
}

impl<O, P: Parser<O> + ?Sized> Parser<O> for &P {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        (**self).parse(state)
    }
}

/// Result of one parser application.
///
/// `committed` records whether input was consumed (or commitment was forced
/// with `commit`). On failure it decides whether an enclosing `one_of` may try
/// its next alternative; on success it is carried into the enclosing
/// sequence so that a later uncommitted failure still reports commitment.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'a, T> {
    Success {
        value: T,
        state: State<'a>,
        committed: bool,
    },
    Failure {
        dead_end: DeadEnd,
        committed: bool,
    },
}

impl<'a, T> Outcome<'a, T> {
    pub fn success(value: T, state: State<'a>, committed: bool) -> Self {
        Outcome::Success {
            value,
            state,
            committed,
        }
    }

    pub fn failure(dead_end: DeadEnd, committed: bool) -> Self {
        Outcome::Failure {
            dead_end,
            committed,
        }
    }

    /// Uncommitted failure with `problem` at `state`.
    pub fn fail_at(state: &State<'a>, problem: Problem) -> Self {
        Outcome::failure(state.dead_end(problem), false)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn committed(&self) -> bool {
        match self {
            Outcome::Success { committed, .. } | Outcome::Failure { committed, .. } => *committed,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn state(&self) -> Option<&State<'a>> {
        match self {
            Outcome::Success { state, .. } => Some(state),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn dead_end(&self) -> Option<&DeadEnd> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { dead_end, .. } => Some(dead_end),
        }
    }

    /// Transforms the value of a success; failures pass through.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<'a, U> {
        match self {
            Outcome::Success {
                value,
                state,
                committed,
            } => Outcome::Success {
                value: f(value),
                state,
                committed,
            },
            Outcome::Failure {
                dead_end,
                committed,
            } => Outcome::Failure {
                dead_end,
                committed,
            },
        }
    }

    /// Continues a sequence from the state left by a success.
    ///
    /// Commitment is sticky: once the first half committed, the combined
    /// outcome is committed whatever `next` reports.
    pub fn then<U>(self, next: impl FnOnce(T, State<'a>) -> Outcome<'a, U>) -> Outcome<'a, U> {
        match self {
            Outcome::Success {
                value,
                state,
                committed,
            } => next(value, state).or_committed(committed),
            Outcome::Failure {
                dead_end,
                committed,
            } => Outcome::Failure {
                dead_end,
                committed,
            },
        }
    }

    pub(crate) fn or_committed(mut self, earlier: bool) -> Self {
        match &mut self {
            Outcome::Success { committed, .. } | Outcome::Failure { committed, .. } => {
                *committed |= earlier
            }
        }
        self
    }

    /// Drops the state, keeping the value or the dead end.
    pub fn into_result(self) -> Result<T, DeadEnd> {
        match self {
            Outcome::Success { value, .. } => Ok(value),
            Outcome::Failure { dead_end, .. } => Err(dead_end),
        }
    }
}

/// Runs `parser` against `src` with the default [`RunConfig`].
pub fn run<O, P>(parser: &P, src: &str) -> Result<O, ParseError>
where
    P: Parser<O> + ?Sized,
{
    run_with(parser, src, &RunConfig::default())
}

/// Runs `parser` against `src`.
///
/// The parser does not have to consume the whole input unless
/// `config.require_end` is set.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(len = src.len(), source = ?config.source_name)
)]
pub fn run_with<O, P>(parser: &P, src: &str, config: &RunConfig) -> Result<O, ParseError>
where
    P: Parser<O> + ?Sized,
{
    let state = State::new(src).with_indent(config.initial_indent);
    let dead_end = match parser.parse(state) {
        Outcome::Success { value, state, .. } => {
            if !config.require_end || state.at_end() {
                tracing::debug!(offset = state.offset(), "parse succeeded");
                return Ok(value);
            }
            state.dead_end(Problem::ExpectingEnd)
        }
        Outcome::Failure {
            dead_end,
            committed,
        } => {
            tracing::debug!(
                problem = dead_end.problem.as_ref(),
                offset = dead_end.offset,
                row = dead_end.row,
                col = dead_end.col,
                committed,
                "parse failed"
            );
            dead_end
        }
    };
    Err(ParseError::from_dead_end(
        dead_end,
        config.capture_context,
        config.source_name.clone(),
    ))
}
