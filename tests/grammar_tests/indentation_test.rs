use chompy::prelude::*;
use chompy::RunConfig;
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: String,
    children: Vec<String>,
}

/// Succeeds only when the cursor sits exactly on the indentation column.
struct AtIndent;

impl Parser<()> for AtIndent {
    fn parse<'a>(&self, state: State<'a>) -> Outcome<'a, ()> {
        if state.col() == state.indent() {
            Outcome::success((), state, false)
        } else {
            Outcome::fail_at(&state, Problem::custom("unexpected indentation"))
        }
    }
}

fn word() -> BoxedParser<String> {
    get_chomped_string(chomp_if(char::is_alphabetic).skip(chomp_while(char::is_alphabetic)))
        .skip(spaces())
        .boxed()
}

/// Top-level names at the current indentation, each followed by children
/// indented by two more columns.
fn outline() -> BoxedParser<Vec<Entry>> {
    let children = with_indent(3, many(AtIndent.ignore_then(word())));
    many(
        tuple2(AtIndent.ignore_then(word()), children)
            .map(|(name, children)| Entry { name, children }),
    )
    .boxed()
}

#[test]
fn test_two_level_outline() {
    let src = "fruit\n  apple\n  pear\nveg\n  leek\n";
    assert_eq!(
        run(&outline(), src),
        Ok(vec![
            Entry {
                name: "fruit".to_string(),
                children: vec!["apple".to_string(), "pear".to_string()],
            },
            Entry {
                name: "veg".to_string(),
                children: vec!["leek".to_string()],
            },
        ])
    );
}

#[test]
fn test_misaligned_line_stops_the_block() {
    let config = RunConfig {
        require_end: true,
        ..RunConfig::default()
    };
    let error = run_with(&outline(), "fruit\n apple", &config).unwrap_err();
    assert_eq!(error.problem, Problem::ExpectingEnd);
    assert_eq!(error.position(), Position::new(2, 2));
}

#[test]
fn test_indent_is_restored_after_block() {
    let parser = tuple3(
        with_indent(3, get_indent()),
        get_indent(),
        with_indent(5, with_indent(9, get_indent()).ignore_then(get_indent())),
    );
    assert_eq!(run(&parser, ""), Ok((3, 1, 5)));
}

#[test]
fn test_initial_indent_from_config() {
    let config = RunConfig::from_json(r#"{"initial_indent": 3}"#).unwrap();
    let block = many(AtIndent.ignore_then(word()));
    assert_eq!(run_with(&block, "a", &config), Ok(vec![]));
    assert_eq!(
        run_with(&spaces().ignore_then(block), "  a\n  b", &config),
        Ok(vec!["a".to_string(), "b".to_string()])
    );
}
