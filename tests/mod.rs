mod grammar_tests;

use chompy::combinators::Recursive;
use chompy::prelude::*;
use lazy_static::lazy_static;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    // テストの前に一度だけ実行したい処理
    // tracing_subscriberの初期化
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
}

fn operator(table: &[(&str, Op)]) -> BoxedParser<Op> {
    let alternatives = table
        .iter()
        .map(|&(literal, op)| symbol(literal).skip(spaces()).map(move |_| op).boxed())
        .collect();
    one_of(alternatives).boxed()
}

fn fold((first, rest): (i64, Vec<(Op, i64)>)) -> i64 {
    rest.into_iter().fold(first, |acc, (op, n)| match op {
        Op::Add => acc + n,
        Op::Sub => acc - n,
        Op::Mul => acc * n,
    })
}

/// expr := term (("+" | "-") term)*
/// term := factor ("*" factor)*
/// factor := int | "(" expr ")"
///
/// Every token swallows the spaces after it.
pub fn arithmetic() -> Recursive<i64> {
    recursive(|expr: RecursiveRef<i64>| {
        let parenthesized = symbol("(")
            .ignore_then(spaces())
            .ignore_then(expr)
            .skip(symbol(")"))
            .in_context("parenthesized");
        let factor = one_of(vec![int().boxed(), parenthesized.boxed()])
            .skip(spaces())
            .boxed();
        let term = tuple2(
            factor.clone(),
            many(tuple2(operator(&[("*", Op::Mul)]), factor)),
        )
        .map(fold)
        .boxed();
        tuple2(
            term.clone(),
            many(tuple2(operator(&[("+", Op::Add), ("-", Op::Sub)]), term)),
        )
        .map(fold)
    })
}

lazy_static! {
    pub static ref ARITHMETIC: Recursive<i64> = arithmetic();
}
