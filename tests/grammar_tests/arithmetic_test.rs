use chompy::prelude::*;
use chompy::{ContextFrame, RunConfig};
use pretty_assertions::assert_eq;

use crate::ARITHMETIC;

#[test]
fn test_precedence() {
    assert_eq!(run(&*ARITHMETIC, "1 + 2 * 3"), Ok(7));
    assert_eq!(run(&*ARITHMETIC, "(1 + 2) * 3"), Ok(9));
    assert_eq!(run(&*ARITHMETIC, "2 * ( 3 - 4 )"), Ok(-2));
    assert_eq!(run(&*ARITHMETIC, "10 - 2 - 3"), Ok(5));
}

#[test]
fn test_deep_nesting() {
    let depth = 40;
    let src = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(run(&*ARITHMETIC, &src), Ok(7));
}

#[test]
fn test_unclosed_paren_reports_context() {
    let error = run(&*ARITHMETIC, "(1 + 2").unwrap_err();
    assert_eq!(error.problem, Problem::ExpectingSymbol(")".into()));
    assert_eq!(error.offset, 6);
    assert_eq!(
        error.context,
        vec![ContextFrame {
            label: "parenthesized".to_string(),
            position: Position::new(1, 1),
        }]
    );
}

#[test]
fn test_dangling_operator_is_committed() {
    // "+" を読んだ後の失敗は committed
    let outcome = ARITHMETIC.parse(State::new("1 + "));
    assert!(outcome.committed());
    assert_eq!(outcome.dead_end().map(|d| d.offset), Some(4));
}

#[test]
fn test_require_end() {
    let config = RunConfig {
        require_end: true,
        ..RunConfig::default().with_source_name("calc.txt")
    };
    let error = run_with(&*ARITHMETIC, "1 + 2 )", &config).unwrap_err();
    assert_eq!(error.problem, Problem::ExpectingEnd);
    assert_eq!(error.offset, 6);
    assert_eq!(
        error.to_string(),
        "calc.txt: expecting end of input at row 1, col 7 (offset 6)"
    );
}
