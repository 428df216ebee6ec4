//! # chompy: Parser Combinators over Explicit Parse State
//!
//! chompy builds recursive-descent parsers for text out of small, pure
//! combinators. Every parser is a function from a [`State`] to an
//! [`Outcome`]; nothing is mutated behind the caller's back, so a grammar is
//! built once and reused for any number of inputs.
//!
//! ## Building Blocks
//!
//! ### 1. Parse State
//! - Source, cursor, offset, row/column, indentation and context labels
//!   ([`state`])
//! - Failure descriptions and the final error ([`error`])
//!
//! ### 2. Combinators
//! - The [`Parser`] trait and entry points [`run`]/[`run_with`] ([`parser`])
//! - Sequencing, ordered choice, loops, deferred construction and position
//!   queries ([`combinators`])
//! - Delimited lists and "collect until" repetition ([`sequence`])
//!
//! ### 3. Lexical Scanning
//! - Chomping, literals, keywords, identifiers, numbers, whitespace and
//!   comments ([`scanner`])
//!
//! ### 4. Commitment
//! A failure is *committed* once input was consumed. [`one_of`](prelude::one_of)
//! only tries its next alternative after an uncommitted failure, and
//! [`backtrackable`](prelude::backtrackable) turns a committed failure back
//! into an uncommitted one.
//!
//! ### 5. Equivalence
//! Rewrites between a naive and a cheaper form of the same grammar are checked
//! with [`laws::check_equivalent`].
//!
//! ## Example
//!
//! ```
//! use chompy::prelude::*;
//!
//! let list = sequence(SequenceSpec {
//!     start: "[".into(),
//!     separator: ",".into(),
//!     end: "]".into(),
//!     spaces: spaces(),
//!     item: int(),
//!     trailing: Trailing::Forbidden,
//! });
//! assert_eq!(run(&list, "[1, 2, 3]"), Ok(vec![1, 2, 3]));
//! ```

pub mod combinators;
pub mod config;
pub mod error;
pub mod laws;
pub mod parser;
pub mod prelude;
pub mod scanner;
pub mod sequence;
pub mod state;

// Re-exports
pub use config::RunConfig;
pub use error::{ConfigError, DeadEnd, ParseError, Problem};
pub use laws::{Divergence, Observation, check_equivalent, observe};
pub use parser::{BoxedParser, Outcome, Parser, run, run_with};
pub use state::{Context, ContextFrame, Position, State};
