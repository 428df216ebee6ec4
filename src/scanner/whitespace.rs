//! Whitespace skipping.

use crate::parser::{Outcome, Parser};
use crate::state::State;

/// Zero or more spaces, newlines and carriage returns. Tabs are not
/// whitespace here; grammars that allow them use `chomp_while`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spaces;

impl Parser<()> for Spaces {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        let next = state.advance_while(|c| matches!(c, ' ' | '\n' | '\r'));
        let committed = next.offset() > state.offset();
        Outcome::success((), next, committed)
    }
}
