//! # Parser Combinators
//!
//! This module implements the structural combinators that compose smaller
//! parsers into larger ones. Lexical primitives live in [`crate::scanner`].
//!
//! ## Combinator Types
//!
//! * **Basic Combinators**: `Succeed`, `Fail`, `Commit`
//! * **Sequential Combinators**: `Keep`, `Skip`, `SkipLeft`, `Tuple2`, `Tuple3`, `AndThen`
//! * **Alternative Combinators**: `OneOf`, `Or`, `Backtrackable`, `Optional`
//! * **Repetition Combinators**: `Loop`, `Many`
//! * **Transformation Combinators**: `Map`
//! * **Deferred Construction**: `Lazy`, `Recursive`
//! * **Position and Context**: `GetOffset`, `GetPosition`, `WithIndent`, `InContext`, ...
//!
//! ## Commitment
//!
//! Every outcome carries a `committed` flag. Sequencing combinators OR the
//! flags of their parts; `OneOf` only moves to its next alternative after an
//! uncommitted failure; `Backtrackable` clears the flag on failure.

use std::marker::PhantomData;
use std::sync::{Arc, OnceLock, Weak};

use crate::error::Problem;
use crate::parser::{BoxedParser, Outcome, Parser};
use crate::state::{Position, State};

/// Succeed: Always succeeds with a copy of `value`, consuming nothing
#[derive(Debug, Clone)]
pub struct Succeed<V> {
    value: V,
}

impl<V> Succeed<V> {
    pub fn new(value: V) -> Self {
        Self { value }
    }
}

impl<V: Clone> Parser<V> for Succeed<V> {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, V> {
        Outcome::success(self.value.clone(), state, false)
    }
}

/// Fail: Always fails uncommitted with `problem`
#[derive(Debug, Clone)]
pub struct Fail<O> {
    problem: Problem,
    _phantom: PhantomData<fn() -> O>,
}

impl<O> Fail<O> {
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            _phantom: PhantomData,
        }
    }
}

impl<O> Parser<O> for Fail<O> {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        Outcome::fail_at(&state, self.problem.clone())
    }
}

/// Commit: Succeeds without consuming but reports commitment, so an
/// enclosing `OneOf` will not try later alternatives if the rest fails.
#[derive(Debug, Clone)]
pub struct Commit<V> {
    value: V,
}

impl<V> Commit<V> {
    pub fn new(value: V) -> Self {
        Self { value }
    }
}

impl<V: Clone> Parser<V> for Commit<V> {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, V> {
        Outcome::success(self.value.clone(), state, true)
    }
}

/// Map: Transforms the output of a parser using a function
///
/// A single wrapper around the inner parser: no intermediate parser is built
/// per application.
#[derive(Clone)]
pub struct Map<P, F, A> {
    /// The parser whose output will be transformed
    parser: P,
    /// The transformation function
    f: F,
    _phantom: PhantomData<fn() -> A>,
}

impl<P, F, A> Map<P, F, A> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<P, F, A, B> Parser<B> for Map<P, F, A>
where
    P: Parser<A>,
    F: Fn(A) -> B,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, B> {
        self.parser.parse(state).map(&self.f)
    }
}

/// Keep: Runs a parser producing a function, then `arg`, and applies the
/// function to `arg`'s value
#[derive(Clone)]
pub struct Keep<PF, P, F, A> {
    func: PF,
    arg: P,
    _phantom: PhantomData<fn() -> (F, A)>,
}

impl<PF, P, F, A> Keep<PF, P, F, A> {
    pub fn new(func: PF, arg: P) -> Self {
        Self {
            func,
            arg,
            _phantom: PhantomData,
        }
    }
}

impl<PF, P, F, A, B> Parser<B> for Keep<PF, P, F, A>
where
    PF: Parser<F>,
    P: Parser<A>,
    F: FnOnce(A) -> B,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, B> {
        self.func
            .parse(state)
            .then(|f, state| self.arg.parse(state).map(f))
    }
}

/// Skip: Runs both parsers in order and keeps the first value
#[derive(Clone)]
pub struct Skip<P, Q, B> {
    parser: P,
    ignored: Q,
    _phantom: PhantomData<fn() -> B>,
}

impl<P, Q, B> Skip<P, Q, B> {
    pub fn new(parser: P, ignored: Q) -> Self {
        Self {
            parser,
            ignored,
            _phantom: PhantomData,
        }
    }
}

impl<P, Q, A, B> Parser<A> for Skip<P, Q, B>
where
    P: Parser<A>,
    Q: Parser<B>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, A> {
        self.parser
            .parse(state)
            .then(|value, state| self.ignored.parse(state).map(|_| value))
    }
}

/// SkipLeft: Runs both parsers in order and keeps the second value
#[derive(Clone)]
pub struct SkipLeft<P, Q, A> {
    ignored: P,
    parser: Q,
    _phantom: PhantomData<fn() -> A>,
}

impl<P, Q, A> SkipLeft<P, Q, A> {
    pub fn new(ignored: P, parser: Q) -> Self {
        Self {
            ignored,
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<P, Q, A, B> Parser<B> for SkipLeft<P, Q, A>
where
    P: Parser<A>,
    Q: Parser<B>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, B> {
        self.ignored
            .parse(state)
            .then(|_, state| self.parser.parse(state))
    }
}

#[derive(Clone)]
pub struct Tuple2<P1, P2, O1, O2> {
    parser1: P1,
    parser2: P2,
    _phantom: PhantomData<fn() -> (O1, O2)>,
}

impl<P1, P2, O1, O2> Tuple2<P1, P2, O1, O2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self {
            parser1,
            parser2,
            _phantom: PhantomData,
        }
    }
}

impl<P1, P2, O1, O2> Parser<(O1, O2)> for Tuple2<P1, P2, O1, O2>
where
    P1: Parser<O1>,
    P2: Parser<O2>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, (O1, O2)> {
        self.parser1
            .parse(state)
            .then(|result1, state| self.parser2.parse(state).map(|result2| (result1, result2)))
    }
}

#[derive(Clone)]
pub struct Tuple3<P1, P2, P3, O1, O2, O3> {
    parser1: P1,
    parser2: P2,
    parser3: P3,
    _phantom: PhantomData<fn() -> (O1, O2, O3)>,
}

impl<P1, P2, P3, O1, O2, O3> Tuple3<P1, P2, P3, O1, O2, O3> {
    pub fn new(parser1: P1, parser2: P2, parser3: P3) -> Self {
        Self {
            parser1,
            parser2,
            parser3,
            _phantom: PhantomData,
        }
    }
}

impl<P1, P2, P3, O1, O2, O3> Parser<(O1, O2, O3)> for Tuple3<P1, P2, P3, O1, O2, O3>
where
    P1: Parser<O1>,
    P2: Parser<O2>,
    P3: Parser<O3>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, (O1, O2, O3)> {
        self.parser1.parse(state).then(|result1, state| {
            self.parser2.parse(state).then(|result2, state| {
                self.parser3
                    .parse(state)
                    .map(|result3| (result1, result2, result3))
            })
        })
    }
}

/// AndThen: Builds the continuation from the parsed value and runs it
///
/// `f` runs once per successful parse of the first parser and may allocate a
/// fresh parser every time. Prefer `OneOf` over prebuilt alternatives, or a
/// `Map` into a sum type, whenever the continuation can be built up front.
#[derive(Clone)]
pub struct AndThen<P, F, A> {
    parser: P,
    f: F,
    _phantom: PhantomData<fn() -> A>,
}

impl<P, F, A> AndThen<P, F, A> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<P, F, A, Q, B> Parser<B> for AndThen<P, F, A>
where
    P: Parser<A>,
    F: Fn(A) -> Q,
    Q: Parser<B>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, B> {
        self.parser
            .parse(state)
            .then(|value, state| (self.f)(value).parse(state))
    }
}

/// OneOf: Tries alternatives in order against the same starting state
///
/// The first success wins. An uncommitted failure moves on to the next
/// alternative; a committed failure stops the search. When every alternative
/// fails uncommitted, the last failure's problem is reported at the starting
/// state, still uncommitted.
#[derive(Clone)]
pub struct OneOf<O> {
    alternatives: Vec<BoxedParser<O>>,
}

impl<O> OneOf<O> {
    pub fn new(alternatives: Vec<BoxedParser<O>>) -> Self {
        Self { alternatives }
    }
}

impl<O> Parser<O> for OneOf<O> {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        let mut last = None;
        for alternative in &self.alternatives {
            match alternative.parse(state.clone()) {
                Outcome::Failure {
                    dead_end,
                    committed: false,
                } => last = Some(dead_end),
                outcome => return outcome,
            }
        }
        tracing::trace!(
            target: "parser::one_of",
            offset = state.offset(),
            alternatives = self.alternatives.len(),
            "no alternative matched"
        );
        let problem = last.map_or(Problem::NoAlternative, |dead_end| dead_end.problem);
        Outcome::failure(state.dead_end(problem), false)
    }
}

/// Or: Two-way `OneOf` without type erasure
#[derive(Clone)]
pub struct Or<P, Q> {
    first: P,
    second: Q,
}

impl<P, Q> Or<P, Q> {
    pub fn new(first: P, second: Q) -> Self {
        Self { first, second }
    }
}

impl<P, Q, O> Parser<O> for Or<P, Q>
where
    P: Parser<O>,
    Q: Parser<O>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        match self.first.parse(state.clone()) {
            Outcome::Failure {
                committed: false, ..
            } => match self.second.parse(state.clone()) {
                Outcome::Failure {
                    dead_end,
                    committed: false,
                } => Outcome::failure(state.dead_end(dead_end.problem), false),
                outcome => outcome,
            },
            outcome => outcome,
        }
    }
}

/// Backtrackable: Reports every failure of the inner parser as uncommitted
///
/// Successes pass through unchanged. Since a failure carries no state, the
/// enclosing parser resumes from its own pre-call state.
#[derive(Clone)]
pub struct Backtrackable<P> {
    parser: P,
}

impl<P> Backtrackable<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P, O> Parser<O> for Backtrackable<P>
where
    P: Parser<O>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        match self.parser.parse(state) {
            Outcome::Failure { dead_end, .. } => Outcome::failure(dead_end, false),
            success => success,
        }
    }
}

/// Optional: `Some` on success, `None` after an uncommitted failure
///
/// A committed failure is not suppressed.
#[derive(Clone)]
pub struct Optional<P> {
    parser: P,
}

impl<P> Optional<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P, O> Parser<Option<O>> for Optional<P>
where
    P: Parser<O>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, Option<O>> {
        match self.parser.parse(state.clone()) {
            Outcome::Failure {
                committed: false, ..
            } => Outcome::success(None, state, false),
            outcome => outcome.map(Some),
        }
    }
}

/// One iteration result of [`Loop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<A, R> {
    /// Continue with a new accumulator
    Loop(A),
    /// Stop with a result
    Done(R),
}

/// Loop: Runs `step(acc)` repeatedly until it yields `Step::Done`
///
/// Iterates in place, so the stack does not grow with the number of
/// iterations. The step function must either consume input or finish on
/// every path; a step that neither consumes nor finishes loops forever.
#[derive(Clone)]
pub struct Loop<A, F> {
    init: A,
    step: F,
}

impl<A, F> Loop<A, F> {
    pub fn new(init: A, step: F) -> Self {
        Self { init, step }
    }
}

impl<A, F, P, R> Parser<R> for Loop<A, F>
where
    A: Clone,
    F: Fn(A) -> P,
    P: Parser<Step<A, R>>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, R> {
        let mut acc = self.init.clone();
        let mut state = state;
        let mut committed = false;
        let mut iterations = 0usize;
        loop {
            match (self.step)(acc).parse(state) {
                Outcome::Success {
                    value: Step::Loop(next),
                    state: next_state,
                    committed: step_committed,
                } => {
                    acc = next;
                    state = next_state;
                    committed |= step_committed;
                    iterations += 1;
                }
                Outcome::Success {
                    value: Step::Done(result),
                    state,
                    committed: step_committed,
                } => {
                    tracing::trace!(
                        target: "parser::loop",
                        iterations,
                        offset = state.offset(),
                        "loop finished"
                    );
                    return Outcome::success(result, state, committed || step_committed);
                }
                Outcome::Failure {
                    dead_end,
                    committed,
                } => return Outcome::failure(dead_end, committed),
            }
        }
    }
}

/// Many: Applies a parser zero or more times
///
/// Stops at the first uncommitted failure of the item parser. A committed
/// failure fails the whole repetition.
#[derive(Clone)]
pub struct Many<P, O> {
    /// The parser to apply repeatedly
    parser: P,
    _phantom: PhantomData<fn() -> O>,
}

impl<P, O> Many<P, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<P, O> Parser<Vec<O>> for Many<P, O>
where
    P: Parser<O>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, Vec<O>> {
        let mut results = Vec::new();
        let mut current = state;
        let mut committed = false;

        loop {
            match self.parser.parse(current.clone()) {
                Outcome::Success {
                    value,
                    state,
                    committed: item_committed,
                } => {
                    results.push(value);
                    committed |= item_committed;
                    // 消費なしの成功で無限ループしないよう停止
                    if state.cursor() == current.cursor() {
                        tracing::trace!(
                            target: "parser::many",
                            offset = state.offset(),
                            items = results.len(),
                            "item consumed nothing, stopping"
                        );
                        current = state;
                        break;
                    }
                    current = state;
                }
                Outcome::Failure {
                    committed: false, ..
                } => break,
                Outcome::Failure { dead_end, .. } => return Outcome::failure(dead_end, true),
            }
        }

        Outcome::success(results, current, committed)
    }
}

/// Lazy: Builds the inner parser on first use and keeps it
///
/// Breaks construction-time cycles for self-referential grammars: the thunk
/// is not called while the grammar is being built, and is called at most once
/// per `Lazy` node afterwards.
pub struct Lazy<F, P> {
    thunk: F,
    parser: OnceLock<P>,
}

impl<F, P> Lazy<F, P> {
    pub fn new(thunk: F) -> Self {
        Self {
            thunk,
            parser: OnceLock::new(),
        }
    }
}

impl<F, P, O> Parser<O> for Lazy<F, P>
where
    F: Fn() -> P,
    P: Parser<O>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        self.parser.get_or_init(&self.thunk).parse(state)
    }
}

/// Recursive: A parser that can refer to itself
///
/// Built once by [`recursive`](crate::prelude::recursive). The handles given to
/// the definition hold weak references, so the grammar does not leak through
/// an `Arc` cycle.
pub struct Recursive<O> {
    cell: Arc<OnceLock<BoxedParser<O>>>,
}

impl<O> Clone for Recursive<O> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

/// Handle to a [`Recursive`] parser from inside its own definition.
pub struct RecursiveRef<O> {
    cell: Weak<OnceLock<BoxedParser<O>>>,
}

impl<O> Clone for RecursiveRef<O> {
    fn clone(&self) -> Self {
        Self {
            cell: Weak::clone(&self.cell),
        }
    }
}

impl<O: 'static> Recursive<O> {
    pub fn define<F, P>(build: F) -> Self
    where
        F: FnOnce(RecursiveRef<O>) -> P,
        P: Parser<O> + Send + Sync + 'static,
    {
        let cell = Arc::new(OnceLock::new());
        let parser = build(RecursiveRef {
            cell: Arc::downgrade(&cell),
        });
        // freshly created, so the cell is still empty
        let _ = cell.set(parser.boxed());
        Self { cell }
    }
}

impl<O> Parser<O> for Recursive<O> {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        match self.cell.get() {
            Some(parser) => parser.parse(state),
            None => Outcome::fail_at(&state, Problem::UnboundRecursion),
        }
    }
}

impl<O> Parser<O> for RecursiveRef<O> {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        let parser = self
            .cell
            .upgrade()
            .and_then(|cell| cell.get().map(Arc::clone));
        match parser {
            Some(parser) => parser.parse(state),
            None => Outcome::fail_at(&state, Problem::UnboundRecursion),
        }
    }
}

macro_rules! zero_width_query {
    ($(#[$doc:meta])* $name:ident -> $out:ty, |$state:ident| $read:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Parser<$out> for $name {
            fn parse<'a>(&self, $state: State<'a>) -> Outcome<'a, $out> {
                let value = $read;
                Outcome::success(value, $state, false)
            }
        }
    };
}

zero_width_query!(
    /// Current offset in Unicode scalar values
    GetOffset -> usize, |state| state.offset()
);
zero_width_query!(GetRow -> usize, |state| state.row());
zero_width_query!(GetCol -> usize, |state| state.col());
zero_width_query!(GetPosition -> Position, |state| state.position());
zero_width_query!(GetIndent -> usize, |state| state.indent());
zero_width_query!(
    /// The whole source text, not only the unconsumed part
    ///
    /// Copies the source into a fresh `String` on every call. A hand-written
    /// `Parser` can borrow it through [`State::source`] instead.
    GetSource -> String, |state| state.source().to_string()
);

/// WithIndent: Runs the inner parser with a different indentation reference
#[derive(Clone)]
pub struct WithIndent<P> {
    indent: usize,
    parser: P,
}

impl<P> WithIndent<P> {
    pub fn new(indent: usize, parser: P) -> Self {
        Self { indent, parser }
    }
}

impl<P, O> Parser<O> for WithIndent<P>
where
    P: Parser<O>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        let outer = state.indent();
        match self.parser.parse(state.with_indent(self.indent)) {
            Outcome::Success {
                value,
                state,
                committed,
            } => Outcome::success(value, state.with_indent(outer), committed),
            failure => failure,
        }
    }
}

/// InContext: Pushes a label on the context stack while the inner parser runs
///
/// The label only shows up in error reports; it never changes what parses.
#[derive(Clone)]
pub struct InContext<P> {
    label: Arc<str>,
    parser: P,
}

impl<P> InContext<P> {
    pub fn new(label: impl Into<Arc<str>>, parser: P) -> Self {
        Self {
            label: label.into(),
            parser,
        }
    }
}

impl<P, O> Parser<O> for InContext<P>
where
    P: Parser<O>,
{
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, O> {
        let outer = state.context().clone();
        match self.parser.parse(state.push_context(Arc::clone(&self.label))) {
            Outcome::Success {
                value,
                state,
                committed,
            } => Outcome::success(value, state.with_context(outer), committed),
            failure => failure,
        }
    }
}

/// Method syntax for the structural combinators.
pub trait ParserExt<O>: Parser<O> + Sized {
    fn map<F, B>(self, f: F) -> Map<Self, F, O>
    where
        F: Fn(O) -> B,
    {
        Map::new(self, f)
    }

    /// Applies the function produced by `self` to the value of `arg`.
    fn keep<P, A, B>(self, arg: P) -> Keep<Self, P, O, A>
    where
        P: Parser<A>,
        O: FnOnce(A) -> B,
    {
        Keep::new(self, arg)
    }

    /// Runs `other` after `self` and keeps `self`'s value.
    fn skip<Q, B>(self, other: Q) -> Skip<Self, Q, B>
    where
        Q: Parser<B>,
    {
        Skip::new(self, other)
    }

    /// Runs `other` after `self` and keeps `other`'s value.
    fn ignore_then<Q, B>(self, other: Q) -> SkipLeft<Self, Q, O>
    where
        Q: Parser<B>,
    {
        SkipLeft::new(self, other)
    }

    fn and_then<F, Q, B>(self, f: F) -> AndThen<Self, F, O>
    where
        F: Fn(O) -> Q,
        Q: Parser<B>,
    {
        AndThen::new(self, f)
    }

    fn or<Q>(self, other: Q) -> Or<Self, Q>
    where
        Q: Parser<O>,
    {
        Or::new(self, other)
    }

    fn backtrackable(self) -> Backtrackable<Self> {
        Backtrackable::new(self)
    }

    fn in_context(self, label: impl Into<Arc<str>>) -> InContext<Self> {
        InContext::new(label, self)
    }
}

impl<O, P: Parser<O>> ParserExt<O> for P {}
