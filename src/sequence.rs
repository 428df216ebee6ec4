//! # Repetition Helpers
//!
//! Two ready-made uses of the accumulate-and-step iteration behind
//! [`loop_`](crate::prelude::loop_):
//!
//! * [`Until`] collects items until a terminator matches.
//! * [`Sequence`] parses a delimited, separated list such as `[ 1, 2, 3 ]`.
//!
//! Both iterate in place and build their step parsers once, when the
//! combinator is constructed.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::combinators::{OneOf, Optional, ParserExt, Succeed};
use crate::error::Problem;
use crate::parser::{BoxedParser, Outcome, Parser};
use crate::scanner::symbol::Token;
use crate::state::State;

/// Runs `step` until it yields `None`, collecting every `Some` item.
///
/// Follows the loop rule: committed on success iff any step committed, and a
/// failing step's outcome is passed through unmodified.
fn collect<'a, T>(
    mut items: Vec<T>,
    mut state: State<'a>,
    mut step: impl FnMut(State<'a>) -> Outcome<'a, Option<T>>,
) -> Outcome<'a, Vec<T>> {
    let mut committed = false;
    loop {
        match step(state) {
            Outcome::Success {
                value: Some(item),
                state: next,
                committed: step_committed,
            } => {
                items.push(item);
                state = next;
                committed |= step_committed;
            }
            Outcome::Success {
                value: None,
                state,
                committed: step_committed,
            } => {
                tracing::trace!(
                    target: "parser::sequence",
                    items = items.len(),
                    offset = state.offset(),
                    "sequence finished"
                );
                return Outcome::success(items, state, committed || step_committed);
            }
            Outcome::Failure {
                dead_end,
                committed,
            } => return Outcome::failure(dead_end, committed),
        }
    }
}

/// Until: Collects `item` values until `end` matches
///
/// Each round tries `end` first and finishes when it succeeds; after an
/// uncommitted failure of `end` it parses one `item`. Observably the same as
/// `loop_(vec![], |acc| one_of([end -> Done(acc), item -> Loop(acc + item)]))`.
#[derive(Clone)]
pub struct Until<E, P, B> {
    end: E,
    item: P,
    _phantom: PhantomData<fn() -> B>,
}

impl<E, P, B> Until<E, P, B> {
    pub fn new(end: E, item: P) -> Self {
        Self {
            end,
            item,
            _phantom: PhantomData,
        }
    }
}

impl<E, P, B, T> Parser<Vec<T>> for Until<E, P, B>
where
    E: Parser<B>,
    P: Parser<T>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, Vec<T>> {
        collect(Vec::new(), state, |state| match self.end.parse(state.clone()) {
            Outcome::Success {
                state, committed, ..
            } => Outcome::success(None, state, committed),
            Outcome::Failure {
                committed: false, ..
            } => self.item.parse(state).map(Some),
            Outcome::Failure {
                dead_end,
                committed,
            } => Outcome::failure(dead_end, committed),
        })
    }
}

/// How a [`Sequence`] treats a separator after the last item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trailing {
    /// `[1,2]` only
    #[default]
    Forbidden,
    /// `[1,2]` and `[1,2,]`
    Optional,
    /// `[1,2,]` only
    Mandatory,
}

/// Description of a delimited list, turned into a parser by
/// [`Sequence::new`].
pub struct SequenceSpec<S, P> {
    pub start: Arc<str>,
    pub separator: Arc<str>,
    pub end: Arc<str>,
    /// Skipped around delimiters, separators and items
    pub spaces: S,
    pub item: P,
    pub trailing: Trailing,
}

/// Sequence: A delimited, separated list of items
///
/// `start`, `separator` and `end` are matched with `symbol`. An empty list is
/// `start spaces end`. Commitment is sticky across the whole list, so once
/// `start` matched, any later failure is committed.
#[derive(Clone)]
pub struct Sequence<T> {
    open: BoxedParser<()>,
    item: BoxedParser<T>,
    close: BoxedParser<()>,
    // after the first item, before the loop
    lead: BoxedParser<()>,
    step: BoxedParser<Option<T>>,
    // after the loop
    tail: BoxedParser<()>,
}

fn symbol_parser(literal: &Arc<str>) -> Token {
    Token::new(Arc::clone(literal), Problem::ExpectingSymbol(Arc::clone(literal)))
}

impl<T: 'static> Sequence<T> {
    pub fn new<S, P>(spec: SequenceSpec<S, P>) -> Self
    where
        S: Parser<()> + Send + Sync + 'static,
        P: Parser<T> + Send + Sync + 'static,
    {
        let spaces = spec.spaces.boxed();
        let item = spec.item.boxed();
        let separator = symbol_parser(&spec.separator);
        let end = symbol_parser(&spec.end);
        let done = || Succeed::new(()).boxed();

        let open = symbol_parser(&spec.start)
            .ignore_then(Arc::clone(&spaces))
            .boxed();
        let finish = || end.clone().map(|_| None::<T>).boxed();
        let next_item = || Arc::clone(&item).map(Some).boxed();

        let (lead, step, tail) = match spec.trailing {
            Trailing::Forbidden => {
                let step = Arc::clone(&spaces).ignore_then(OneOf::new(vec![
                    separator
                        .clone()
                        .ignore_then(Arc::clone(&spaces))
                        .ignore_then(next_item())
                        .boxed(),
                    finish(),
                ]));
                (done(), step.boxed(), done())
            }
            Trailing::Optional => {
                let step = Arc::clone(&spaces).ignore_then(OneOf::new(vec![
                    separator
                        .clone()
                        .ignore_then(Arc::clone(&spaces))
                        .ignore_then(OneOf::new(vec![next_item(), finish()]))
                        .boxed(),
                    finish(),
                ]));
                (done(), step.boxed(), done())
            }
            Trailing::Mandatory => {
                let separated = Arc::clone(&spaces)
                    .ignore_then(separator.clone())
                    .ignore_then(Arc::clone(&spaces))
                    .boxed();
                let step = Optional::new(Arc::clone(&item).skip(Arc::clone(&separated)));
                (separated, step.boxed(), end.clone().boxed())
            }
        };

        Self {
            open,
            item,
            close: end.boxed(),
            lead,
            step,
            tail,
        }
    }
}

impl<T> Parser<Vec<T>> for Sequence<T> {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, Vec<T>> {
        self.open
            .parse(state)
            .then(|_, state| match self.item.parse(state.clone()) {
                Outcome::Success {
                    value,
                    state,
                    committed,
                } => self
                    .lead
                    .parse(state)
                    .then(|_, state| collect(vec![value], state, |state| self.step.parse(state)))
                    .then(|items, state| self.tail.parse(state).map(|_| items))
                    .or_committed(committed),
                Outcome::Failure {
                    committed: false, ..
                } => self.close.parse(state).map(|_| Vec::new()),
                Outcome::Failure {
                    dead_end,
                    committed,
                } => Outcome::failure(dead_end, committed),
            })
    }
}
