//! # Observational Equivalence
//!
//! Two parsers are interchangeable when, for every input, they agree on
//! success or failure, on the value, on the final offset/row/col and on the
//! committed flag. The problem attached to a failure is reported but not
//! compared: `keyword("let")` and `symbol("let")` are equivalent on the
//! inputs where both apply, yet describe their failures differently.
//!
//! [`check_equivalent`] is what the test suite uses to check rewrites such as
//! map fusion, shared-prefix flattening of `one_of`, or the fused `variable`
//! scan against its two-pass decomposition.

use std::fmt::Debug;

use serde::Serialize;
use thiserror::Error;

use crate::error::Problem;
use crate::parser::{Outcome, Parser};
use crate::state::State;

/// Everything about an outcome that equivalence looks at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation<T> {
    Success {
        value: T,
        offset: usize,
        row: usize,
        col: usize,
        committed: bool,
    },
    Failure {
        #[serde(serialize_with = "serialize_problem")]
        problem: Problem,
        offset: usize,
        row: usize,
        col: usize,
        committed: bool,
    },
}

fn serialize_problem<S: serde::Serializer>(
    problem: &Problem,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&problem.to_string())
}

impl<T> Observation<T> {
    pub fn from_outcome(outcome: Outcome<'_, T>) -> Self {
        match outcome {
            Outcome::Success {
                value,
                state,
                committed,
            } => Observation::Success {
                value,
                offset: state.offset(),
                row: state.row(),
                col: state.col(),
                committed,
            },
            Outcome::Failure {
                dead_end,
                committed,
            } => Observation::Failure {
                problem: dead_end.problem,
                offset: dead_end.offset,
                row: dead_end.row,
                col: dead_end.col,
                committed,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Observation::Success { .. })
    }

    pub fn committed(&self) -> bool {
        match self {
            Observation::Success { committed, .. } | Observation::Failure { committed, .. } => {
                *committed
            }
        }
    }
}

impl<T: PartialEq> Observation<T> {
    /// Equality up to the failure problem.
    pub fn agrees_with(&self, other: &Self) -> bool {
        match (self, other) {
            (Observation::Success { .. }, Observation::Success { .. }) => self == other,
            (
                Observation::Failure {
                    offset,
                    row,
                    col,
                    committed,
                    ..
                },
                Observation::Failure {
                    offset: other_offset,
                    row: other_row,
                    col: other_col,
                    committed: other_committed,
                    ..
                },
            ) => {
                (offset, row, col, committed)
                    == (other_offset, other_row, other_col, other_committed)
            }
            _ => false,
        }
    }
}

/// Runs `parser` on `src` from a fresh state.
pub fn observe<O, P>(parser: &P, src: &str) -> Observation<O>
where
    P: Parser<O> + ?Sized,
{
    Observation::from_outcome(parser.parse(State::new(src)))
}

/// First input on which two parsers disagree.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("parsers diverge on {input:?}: {left:?} vs {right:?}")]
pub struct Divergence<T: Debug> {
    pub input: String,
    pub left: Observation<T>,
    pub right: Observation<T>,
}

/// Checks that `left` and `right` are observationally equivalent on every
/// input, stopping at the first divergence.
pub fn check_equivalent<O, P, Q, I, S>(left: &P, right: &Q, inputs: I) -> Result<(), Divergence<O>>
where
    O: PartialEq + Debug,
    P: Parser<O> + ?Sized,
    Q: Parser<O> + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut checked = 0usize;
    for input in inputs {
        let input = input.as_ref();
        let left = observe(left, input);
        let right = observe(right, input);
        if !left.agrees_with(&right) {
            tracing::debug!(target: "parser::laws", input, checked, "parsers diverge");
            return Err(Divergence {
                input: input.to_string(),
                left,
                right,
            });
        }
        checked += 1;
    }
    tracing::trace!(target: "parser::laws", checked, "parsers agree");
    Ok(())
}
