//! # Parse State
//!
//! [`State`] is the value threaded through every parser call. It borrows the
//! source text and carries the cursor (as a byte index for slicing and as a
//! scalar-value offset for reporting), the row/column pair, the current
//! indentation reference and the context stack.
//!
//! States are cheap to clone: everything but the context stack is a scalar,
//! and the context stack is a persistent list whose frames are shared.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DeadEnd, Problem};

/// A 1-based row/column pair, counted in Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// One entry of a context stack snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFrame {
    /// Label given to `in_context`
    pub label: String,
    /// Where the labelled parser started
    pub position: Position,
}

#[derive(Debug)]
struct Frame {
    label: Arc<str>,
    position: Position,
    parent: Option<Rc<Frame>>,
}

/// Persistent stack of diagnostic labels.
///
/// Pushing allocates one frame and shares the rest of the stack, so a state
/// can be cloned for every alternative of a choice without copying labels.
#[derive(Clone, Default)]
pub struct Context {
    top: Option<Rc<Frame>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, label: Arc<str>, position: Position) -> Self {
        Self {
            top: Some(Rc::new(Frame {
                label,
                position,
                parent: self.top.clone(),
            })),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    pub fn depth(&self) -> usize {
        self.iter().count()
    }

    /// Innermost label, if any.
    pub fn current(&self) -> Option<&str> {
        self.top.as_deref().map(|frame| &*frame.label)
    }

    fn iter(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.top.as_deref(), |frame| frame.parent.as_deref())
    }

    /// Materializes the stack, outermost label first.
    pub fn frames(&self) -> Vec<ContextFrame> {
        let mut frames: Vec<ContextFrame> = self
            .iter()
            .map(|frame| ContextFrame {
                label: frame.label.to_string(),
                position: frame.position,
            })
            .collect();
        frames.reverse();
        frames
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.label == b.label && a.position == b.position => {}
                _ => return false,
            }
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.frames()).finish()
    }
}

/// Parse state over a borrowed source text.
#[derive(Debug, Clone, PartialEq)]
pub struct State<'a> {
    src: &'a str,
    // byte index into `src`, always on a char boundary
    cursor: usize,
    offset: usize,
    row: usize,
    col: usize,
    indent: usize,
    context: Context,
}

impl<'a> State<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            cursor: 0,
            offset: 0,
            row: 1,
            col: 1,
            indent: 1,
            context: Context::new(),
        }
    }

    pub fn source(&self) -> &'a str {
        self.src
    }

    /// Offset in Unicode scalar values from the start of the source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Unconsumed remainder of the source.
    pub fn rest(&self) -> &'a str {
        &self.src[self.cursor..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn at_end(&self) -> bool {
        self.cursor == self.src.len()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// Source text between an earlier cursor and this state.
    pub(crate) fn chomped_since(&self, start: usize) -> &'a str {
        &self.src[start..self.cursor]
    }

    /// Moves past one character. `c` must be the next character of `rest()`.
    pub(crate) fn bump(&mut self, c: char) {
        self.cursor += c.len_utf8();
        self.offset += 1;
        if c == '\n' {
            self.row += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }

    /// Moves past `text`, which must be a prefix of `rest()`.
    pub(crate) fn advance_str(&self, text: &str) -> Self {
        let mut next = self.clone();
        text.chars().for_each(|c| next.bump(c));
        next
    }

    /// Moves past the longest prefix whose characters all satisfy `predicate`.
    pub(crate) fn advance_while(&self, mut predicate: impl FnMut(char) -> bool) -> Self {
        let mut next = self.clone();
        for c in self.rest().chars() {
            if !predicate(c) {
                break;
            }
            next.bump(c);
        }
        next
    }

    pub(crate) fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub(crate) fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub(crate) fn push_context(self, label: Arc<str>) -> Self {
        let context = self.context.push(label, self.position());
        self.with_context(context)
    }

    /// Records `problem` at this state's position.
    pub fn dead_end(&self, problem: Problem) -> DeadEnd {
        DeadEnd {
            problem,
            offset: self.offset,
            row: self.row,
            col: self.col,
            context: self.context.clone(),
        }
    }
}
