use chompy::prelude::*;
use pretty_assertions::assert_eq;

fn lower_name() -> TokenSpec<impl Fn(char) -> bool, impl Fn(char) -> bool> {
    TokenSpec::new(
        |c: char| c.is_ascii_lowercase(),
        |c: char| c.is_ascii_alphanumeric(),
    )
}

/// Whitespace, `--` line comments and nestable `{- -}` block comments.
fn trivia() -> BoxedParser<()> {
    many(one_of(vec![
        line_comment("--").boxed(),
        multi_comment("{-", "-}", Nestable::Nestable).boxed(),
        chomp_if(char::is_whitespace).boxed(),
    ]))
    .map(|_| ())
    .boxed()
}

fn pair() -> BoxedParser<(String, String)> {
    tuple2(
        variable(lower_name()).skip(trivia()),
        variable(lower_name()).skip(trivia()),
    )
    .boxed()
}

#[test]
fn test_comments_between_names() {
    let src = "first -- trailing note\n  {- block {- nested -} still -}\tsecond {- end -}";
    assert_eq!(
        run(&pair(), src),
        Ok(("first".to_string(), "second".to_string()))
    );
}

#[test]
fn test_unterminated_block_comment() {
    let error = run(&pair(), "first {- {- -} second").unwrap_err();
    assert_eq!(error.problem, Problem::ExpectingSymbol("-}".into()));
    assert_eq!(error.offset, 21);
}

#[test]
fn test_comment_text_can_be_recovered() {
    let doc = get_chomped_string(line_comment("--"))
        .map(|text| text.trim_start_matches("--").trim().to_string());
    assert_eq!(run(&doc, "-- hello world \nrest"), Ok("hello world".to_string()));
}
