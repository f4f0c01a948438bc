//! Integration tests for the ahm syntax frontend

use std::fs;
use std::path::Path;

use ahm::ast::Node;
use ahm::lexer::{Lexer, ReadSource, TokenKind};
use ahm::parser::{self, Parser, ParserOptions};
use ahm::range_map::NodePath;

/// Parse every node of a fixture file, reading it through the streaming source.
fn parse_fixture(path: &Path) -> Result<Vec<Node>, String> {
    let file = fs::File::open(path).map_err(|e| e.to_string())?;
    let options = ParserOptions::new().with_source_name(path.display().to_string());
    let (nodes, err) = Parser::with_options(ReadSource::from_read(file), options).parse_all();
    match err {
        None => Ok(nodes),
        Some(err) => Err(err.to_string()),
    }
}

fn fixtures(dir: &str) -> Vec<std::path::PathBuf> {
    let mut paths: Vec<_> = fs::read_dir(Path::new("tests/fixtures").join(dir))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|e| e == "ahm"))
        .collect();
    paths.sort();
    paths
}

/// Test that all valid fixtures parse successfully
#[test]
fn test_valid_fixtures() {
    let paths = fixtures("valid");
    assert!(!paths.is_empty());
    for path in paths {
        let result = parse_fixture(&path);
        assert!(
            result.is_ok(),
            "Expected {} to parse successfully, got error: {:?}",
            path.display(),
            result.unwrap_err()
        );
    }
}

/// Test that invalid fixtures produce errors naming the file
#[test]
fn test_invalid_fixtures() {
    let paths = fixtures("invalid");
    assert!(!paths.is_empty());
    for path in paths {
        let result = parse_fixture(&path);
        let err = result.expect_err(&format!("Expected {} to fail", path.display()));
        assert!(
            err.contains(&format!("{:?}", path.display().to_string())),
            "error should carry the source name: {err}"
        );
    }
}

#[test]
fn test_document_fixture_tree() {
    let nodes = parse_fixture(Path::new("tests/fixtures/valid/document.ahm")).unwrap();
    let want = vec![
        Node::proc(
            "doc",
            "A small document",
            vec![
                Node::text("Some text\nthat spans lines."),
                Node::proc("section", "First", vec![Node::text("Nested text.")]),
                Node::proc("section", "Second", vec![]),
            ],
        ),
        Node::text("Closing words."),
    ];
    assert_eq!(nodes, want);
}

#[test]
fn test_tab_fixture_tree() {
    let nodes = parse_fixture(Path::new("tests/fixtures/valid/tabs.ahm")).unwrap();
    let want = vec![Node::proc(
        "list",
        "",
        vec![
            Node::proc("item", "one", vec![]),
            Node::proc("item", "two", vec![Node::text("detail")]),
        ],
    )];
    assert_eq!(nodes, want);
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn test_scenario_single_line_proc() {
    assert_eq!(parser::parse("@proc arg").unwrap(), vec![Node::proc("proc", "arg", vec![])]);
}

#[test]
fn test_scenario_proc_with_text_child() {
    assert_eq!(
        parser::parse("@proc\n  Child text").unwrap(),
        vec![Node::proc("proc", "", vec![Node::text("Child text")])]
    );
}

#[test]
fn test_scenario_proc_with_proc_child() {
    assert_eq!(
        parser::parse("@parent\n  @child").unwrap(),
        vec![Node::proc("parent", "", vec![Node::proc("child", "", vec![])])]
    );
}

#[test]
fn test_scenario_second_top_level_parse() {
    let mut parser = Parser::for_str("@parent\n  child\naunt");
    assert_eq!(
        parser.parse().unwrap(),
        Some(Node::proc("parent", "", vec![Node::text("child")]))
    );
    assert_eq!(parser.parse().unwrap(), Some(Node::text("aunt")));
    assert_eq!(parser.parse().unwrap(), None);
    assert_eq!(parser.parse().unwrap(), None);
}

#[test]
fn test_scenario_dedent_to_sibling() {
    let nodes = parser::parse("@gp\n  @parent\n    @child\n  @sibling").unwrap();
    assert_eq!(
        nodes,
        vec![Node::proc(
            "gp",
            "",
            vec![
                Node::proc("parent", "", vec![Node::proc("child", "", vec![])]),
                Node::proc("sibling", "", vec![]),
            ],
        )]
    );
}

// =============================================================================
// Layers composed by hand
// =============================================================================

#[test]
fn test_lexer_over_reader_balances_indentation() {
    let source = "@a\n  @b\n    c\n  d\ne";
    let tokens: Vec<_> = Lexer::new(ReadSource::from_read(source.as_bytes()))
        .collect::<Result<_, _>>()
        .unwrap();
    let indents = tokens.iter().filter(|t| t.is(TokenKind::Indent)).count();
    let dedents = tokens.iter().filter(|t| t.is(TokenKind::Dedent)).count();
    assert_eq!(indents, 2);
    assert_eq!(indents, dedents);
}

#[test]
fn test_ranges_for_nested_document() {
    let options = ParserOptions::new().with_range_tracking(true);
    let mut parser = Parser::with_options(ahm::lexer::StrSource::new("@a\n  @b\n    c\nd"), options);
    let (nodes, err) = parser.parse_all();
    assert!(err.is_none());
    assert_eq!(nodes.len(), 2);

    let ranges = parser.ranges().unwrap();
    let leaf = NodePath::top(0).child(0).child(0);
    let span = ranges.get(&leaf).unwrap();
    assert_eq!((span.start.line, span.start.column), (3, 5));
    assert_eq!((span.end.line, span.end.column), (3, 6));
    assert!(ranges.has_range_for(&NodePath::top(1)));
    assert_eq!(ranges.len(), 4);
}

#[test]
fn test_invalid_utf8_is_reported() {
    let bytes: &[u8] = &[b'@', b'p', b'\n', b' ', 0xff];
    let (_, err) = Parser::new(ReadSource::from_read(bytes)).parse_all();
    let err = err.unwrap();
    assert!(matches!(err.kind(), ahm::ErrorKind::Io(_)));
}
