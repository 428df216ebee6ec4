//! # Parse Errors
//!
//! Problems are plain values attached to failures; they never unwind. A
//! failing parser produces a [`DeadEnd`] (problem, position and the context
//! stack at that point) and [`run`](crate::run) turns the final dead end into
//! a [`ParseError`].

use std::sync::Arc;

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

use crate::state::{Context, ContextFrame, Position};

/// Why a parser failed.
#[derive(Error, Debug, Clone, PartialEq, Eq, AsRefStr, IntoStaticStr)]
pub enum Problem {
    #[error("expecting symbol `{0}`")]
    ExpectingSymbol(Arc<str>),
    #[error("expecting keyword `{0}`")]
    ExpectingKeyword(Arc<str>),
    #[error("expecting `{0}`")]
    ExpectingToken(Arc<str>),
    #[error("expecting a variable")]
    ExpectingVariable,
    #[error("`{0}` is a reserved word")]
    ReservedWord(Arc<str>),
    #[error("unexpected character")]
    UnexpectedChar,
    #[error("expecting `{0}` before the end of input")]
    ExpectingMarker(Arc<str>),
    #[error("expecting end of input")]
    ExpectingEnd,
    #[error("expecting an integer")]
    ExpectingInt,
    #[error("expecting a float")]
    ExpectingFloat,
    #[error("invalid number `{0}`")]
    InvalidNumber(Arc<str>),
    /// `one_of` with no alternatives
    #[error("no alternative matched")]
    NoAlternative,
    #[error("recursive parser referenced after its definition was dropped")]
    UnboundRecursion,
    /// Author-supplied problem from `problem`/`fail`
    #[error("{0}")]
    Custom(Arc<str>),
}

impl Problem {
    pub fn custom(message: impl Into<Arc<str>>) -> Self {
        Problem::Custom(message.into())
    }
}

/// A failure point inside a parse.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadEnd {
    pub problem: Problem,
    pub offset: usize,
    pub row: usize,
    pub col: usize,
    pub context: Context,
}

impl DeadEnd {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Error returned by [`run`](crate::run).
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "{}{problem} at row {row}, col {col} (offset {offset}){}",
    source_prefix(.source_name),
    context_suffix(.context)
)]
pub struct ParseError {
    pub problem: Problem,
    pub offset: usize,
    pub row: usize,
    pub col: usize,
    /// Context stack at the failure, outermost first
    pub context: Vec<ContextFrame>,
    pub source_name: Option<String>,
}

impl ParseError {
    pub fn from_dead_end(
        dead_end: DeadEnd,
        capture_context: bool,
        source_name: Option<String>,
    ) -> Self {
        let context = if capture_context {
            dead_end.context.frames()
        } else {
            Vec::new()
        };
        Self {
            problem: dead_end.problem,
            offset: dead_end.offset,
            row: dead_end.row,
            col: dead_end.col,
            context,
            source_name,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

fn source_prefix(source_name: &Option<String>) -> String {
    match source_name {
        Some(name) => format!("{}: ", name),
        None => String::new(),
    }
}

fn context_suffix(context: &[ContextFrame]) -> String {
    if context.is_empty() {
        return String::new();
    }
    let trail = context
        .iter()
        .map(|frame| format!("{} ({})", frame.label, frame.position))
        .collect::<Vec<_>>()
        .join(" -> ");
    format!(", while parsing {}", trail)
}

/// Error loading a [`RunConfig`](crate::config::RunConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
