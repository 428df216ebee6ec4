//! # Lexical Scanning
//!
//! Primitives that look at characters directly: chomping, literal matching,
//! identifiers, numbers, whitespace and comments. Each of them advances the
//! [`State`](crate::state::State) one character at a time so that offset, row
//! and column stay exact, and each reports `committed` exactly when it moved
//! the cursor.

pub mod chomp;
pub mod comment;
pub mod literal;
pub mod symbol;
pub mod variable;
pub mod whitespace;

pub use chomp::{
    ChompIf, ChompUntil, ChompUntilEndOr, ChompWhile, GetChompedString, MapChompedString,
};
pub use comment::{LineComment, MultiComment, Nestable};
pub use literal::{Float, Int};
pub use symbol::{End, Keyword, Token, is_identifier_inner};
pub use variable::{TokenSpec, Variable};
pub use whitespace::Spaces;
