use std::sync::Arc;

pub use crate::combinators::{ParserExt, RecursiveRef, Step};
pub use crate::error::{DeadEnd, ParseError, Problem};
pub use crate::parser::{BoxedParser, Outcome, Parser, run, run_with};
pub use crate::scanner::comment::Nestable;
pub use crate::scanner::variable::TokenSpec;
pub use crate::sequence::{SequenceSpec, Trailing};
pub use crate::state::{Position, State};

use crate::combinators::{
    AndThen, Backtrackable, Commit, Fail, GetCol, GetIndent, GetOffset, GetPosition, GetRow,
    GetSource, InContext, Keep, Lazy, Loop, Many, Map, OneOf, Optional, Or, Recursive, Skip,
    SkipLeft, Succeed, Tuple2, Tuple3, WithIndent,
};
use crate::scanner::chomp::{
    ChompIf, ChompUntil, ChompUntilEndOr, ChompWhile, GetChompedString, MapChompedString,
};
use crate::scanner::comment::{LineComment, MultiComment};
use crate::scanner::literal::{Float, Int};
use crate::scanner::symbol::{End, Keyword, Token};
use crate::scanner::variable::Variable;
use crate::scanner::whitespace::Spaces;
use crate::sequence::{Sequence, Until};

pub fn succeed<V: Clone>(value: V) -> Succeed<V> {
    Succeed::new(value)
}

pub fn fail<O>(problem: Problem) -> Fail<O> {
    Fail::new(problem)
}

/// Fails with an author-supplied message.
pub fn problem<O>(message: impl Into<Arc<str>>) -> Fail<O> {
    Fail::new(Problem::custom(message))
}

pub fn commit<V: Clone>(value: V) -> Commit<V> {
    Commit::new(value)
}

pub fn map<P, F, A, B>(parser: P, f: F) -> Map<P, F, A>
where
    P: Parser<A>,
    F: Fn(A) -> B,
{
    Map::new(parser, f)
}

pub fn keep<PF, P, F, A, B>(func: PF, arg: P) -> Keep<PF, P, F, A>
where
    PF: Parser<F>,
    P: Parser<A>,
    F: FnOnce(A) -> B,
{
    Keep::new(func, arg)
}

pub fn skip<P, Q, A, B>(parser: P, ignored: Q) -> Skip<P, Q, B>
where
    P: Parser<A>,
    Q: Parser<B>,
{
    Skip::new(parser, ignored)
}

pub fn skip_left<P, Q, A, B>(ignored: P, parser: Q) -> SkipLeft<P, Q, A>
where
    P: Parser<A>,
    Q: Parser<B>,
{
    SkipLeft::new(ignored, parser)
}

pub fn tuple2<P1, P2, O1, O2>(parser1: P1, parser2: P2) -> Tuple2<P1, P2, O1, O2>
where
    P1: Parser<O1>,
    P2: Parser<O2>,
{
    Tuple2::new(parser1, parser2)
}

pub fn tuple3<P1, P2, P3, O1, O2, O3>(
    parser1: P1,
    parser2: P2,
    parser3: P3,
) -> Tuple3<P1, P2, P3, O1, O2, O3>
where
    P1: Parser<O1>,
    P2: Parser<O2>,
    P3: Parser<O3>,
{
    Tuple3::new(parser1, parser2, parser3)
}

/// Continues with a parser built from the parsed value. See [`AndThen`] for
/// when this is worth its cost.
pub fn and_then<P, F, A, Q, B>(parser: P, f: F) -> AndThen<P, F, A>
where
    P: Parser<A>,
    F: Fn(A) -> Q,
    Q: Parser<B>,
{
    AndThen::new(parser, f)
}

pub fn one_of<O>(alternatives: Vec<BoxedParser<O>>) -> OneOf<O> {
    OneOf::new(alternatives)
}

pub fn or<P, Q, O>(first: P, second: Q) -> Or<P, Q>
where
    P: Parser<O>,
    Q: Parser<O>,
{
    Or::new(first, second)
}

pub fn backtrackable<P, O>(parser: P) -> Backtrackable<P>
where
    P: Parser<O>,
{
    Backtrackable::new(parser)
}

pub fn optional<P, O>(parser: P) -> Optional<P>
where
    P: Parser<O>,
{
    Optional::new(parser)
}

pub fn many<P, O>(parser: P) -> Many<P, O>
where
    P: Parser<O>,
{
    Many::new(parser)
}

/// Repeats `step` from `init` until it produces [`Step::Done`].
pub fn loop_<A, F, P, R>(init: A, step: F) -> Loop<A, F>
where
    A: Clone,
    F: Fn(A) -> P,
    P: Parser<Step<A, R>>,
{
    Loop::new(init, step)
}

pub fn until<E, P, B, T>(end: E, item: P) -> Until<E, P, B>
where
    E: Parser<B>,
    P: Parser<T>,
{
    Until::new(end, item)
}

pub fn sequence<S, P, T>(spec: SequenceSpec<S, P>) -> Sequence<T>
where
    S: Parser<()> + Send + Sync + 'static,
    P: Parser<T> + Send + Sync + 'static,
    T: 'static,
{
    Sequence::new(spec)
}

pub fn lazy<F, P, O>(thunk: F) -> Lazy<F, P>
where
    F: Fn() -> P,
    P: Parser<O>,
{
    Lazy::new(thunk)
}

/// Builds a parser that refers to itself through the handle passed to
/// `build`.
pub fn recursive<O, F, P>(build: F) -> Recursive<O>
where
    O: 'static,
    F: FnOnce(RecursiveRef<O>) -> P,
    P: Parser<O> + Send + Sync + 'static,
{
    Recursive::define(build)
}

pub fn get_offset() -> GetOffset {
    GetOffset
}

pub fn get_row() -> GetRow {
    GetRow
}

pub fn get_col() -> GetCol {
    GetCol
}

pub fn get_position() -> GetPosition {
    GetPosition
}

pub fn get_indent() -> GetIndent {
    GetIndent
}

pub fn get_source() -> GetSource {
    GetSource
}

pub fn with_indent<P, O>(indent: usize, parser: P) -> WithIndent<P>
where
    P: Parser<O>,
{
    WithIndent::new(indent, parser)
}

pub fn in_context<P, O>(label: impl Into<Arc<str>>, parser: P) -> InContext<P>
where
    P: Parser<O>,
{
    InContext::new(label, parser)
}

pub fn chomp_if<F>(predicate: F) -> ChompIf<F>
where
    F: Fn(char) -> bool,
{
    ChompIf::new(predicate, Problem::UnexpectedChar)
}

pub fn chomp_while<F>(predicate: F) -> ChompWhile<F>
where
    F: Fn(char) -> bool,
{
    ChompWhile::new(predicate)
}

pub fn chomp_until(marker: impl Into<Arc<str>>) -> ChompUntil {
    ChompUntil::new(marker)
}

pub fn chomp_until_end_or(marker: impl Into<Arc<str>>) -> ChompUntilEndOr {
    ChompUntilEndOr::new(marker)
}

pub fn get_chomped_string<P, A>(parser: P) -> GetChompedString<P, A>
where
    P: Parser<A>,
{
    GetChompedString::new(parser)
}

pub fn map_chomped_string<P, F, A, B>(parser: P, f: F) -> MapChompedString<P, F, A>
where
    P: Parser<A>,
    F: Fn(&str, A) -> B,
{
    MapChompedString::new(parser, f)
}

pub fn symbol(literal: impl Into<Arc<str>>) -> Token {
    let literal = literal.into();
    Token::new(Arc::clone(&literal), Problem::ExpectingSymbol(literal))
}

pub fn token(literal: impl Into<Arc<str>>) -> Token {
    let literal = literal.into();
    Token::new(Arc::clone(&literal), Problem::ExpectingToken(literal))
}

pub fn keyword(literal: impl Into<Arc<str>>) -> Keyword {
    Keyword::new(literal)
}

pub fn end() -> End {
    End
}

pub fn variable<S, I>(spec: TokenSpec<S, I>) -> Variable<S, I>
where
    S: Fn(char) -> bool,
    I: Fn(char) -> bool,
{
    Variable::new(spec)
}

pub fn int() -> Int {
    Int
}

pub fn float() -> Float {
    Float
}

pub fn spaces() -> Spaces {
    Spaces
}

pub fn line_comment(start: impl Into<Arc<str>>) -> LineComment {
    LineComment::new(start)
}

pub fn multi_comment(
    open: impl Into<Arc<str>>,
    close: impl Into<Arc<str>>,
    nestable: Nestable,
) -> MultiComment {
    MultiComment::new(open, close, nestable)
}
