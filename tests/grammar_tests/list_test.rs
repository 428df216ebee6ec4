use chompy::prelude::*;
use chompy::sequence::Sequence;
use lazy_static::lazy_static;
use pretty_assertions::assert_eq;

lazy_static! {
    static ref NUMBERS: Sequence<i64> = sequence(SequenceSpec {
        start: "[".into(),
        separator: ",".into(),
        end: "]".into(),
        spaces: spaces(),
        item: int(),
        trailing: Trailing::Optional,
    });
}

/// `[[1, 2], [], [3]]`
fn nested() -> Sequence<Vec<i64>> {
    sequence(SequenceSpec {
        start: "[".into(),
        separator: ",".into(),
        end: "]".into(),
        spaces: spaces(),
        item: &*NUMBERS,
        trailing: Trailing::Forbidden,
    })
}

#[test]
fn test_shared_static_grammar() {
    assert_eq!(run(&*NUMBERS, "[1, 2, 3,]"), Ok(vec![1, 2, 3]));
    assert_eq!(run(&*NUMBERS, "[\n  10,\n  20\n]"), Ok(vec![10, 20]));
}

#[test]
fn test_nested_sequences() {
    assert_eq!(
        run(&nested(), "[[1, 2], [], [3]]"),
        Ok(vec![vec![1, 2], vec![], vec![3]])
    );
}

#[test]
fn test_error_inside_nested_item() {
    let error = run(&nested(), "[[1, 2], [x]]").unwrap_err();
    assert_eq!(error.problem, Problem::ExpectingSymbol("]".into()));
    assert_eq!(error.offset, 10);
}

#[test]
fn test_long_list_does_not_grow_the_stack() {
    let count = 100_000;
    let src = format!("[{}]", vec!["7"; count].join(","));
    let parsed = run(&*NUMBERS, &src).unwrap();
    assert_eq!(parsed.len(), count);

    let summed = symbol("[").ignore_then(loop_(0i64, |total| {
        one_of(vec![
            symbol("]").map(move |_| Step::<i64, i64>::Done(total)).boxed(),
            int()
                .skip(optional(symbol(",")))
                .map(move |n| Step::Loop(total + n))
                .boxed(),
        ])
    }));
    assert_eq!(run(&summed, &src), Ok(7 * count as i64));
}
