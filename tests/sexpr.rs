mod common;

use common::{sexpr, span, Expr};
use textcombi::{error::ErrorKind, input::SourceLocation, Parser};

#[test]
fn nested_ranges_match_source() {
    let parsed = sexpr().parse("(+ (+ 1 2) 3)").unwrap();
    assert_eq!(
        parsed,
        Expr::SExp(
            vec![
                Expr::Id(String::from("+"), span(1, 2)),
                Expr::SExp(
                    vec![
                        Expr::Id(String::from("+"), span(4, 5)),
                        Expr::Int(1, span(6, 7)),
                        Expr::Int(2, span(8, 9)),
                    ],
                    span(3, 10)
                ),
                Expr::Int(3, span(11, 12)),
            ],
            span(0, 13)
        )
    );
}

#[test]
fn signed_atoms_and_symbols() {
    let parsed = sexpr().parse("(- +1 -20 x_1)").unwrap();
    let Expr::SExp(items, _) = parsed else {
        panic!("expected a list");
    };
    assert_eq!(items[0], Expr::Id(String::from("-"), span(1, 2)));
    assert_eq!(items[1], Expr::Int(1, span(3, 5)));
    assert_eq!(items[2], Expr::Int(-20, span(6, 9)));
    assert_eq!(items[3], Expr::Id(String::from("x_1"), span(10, 13)));
}

#[test]
fn invalid_atom_is_reported_where_it_starts() {
    let err = sexpr().parse("(+ X +1 -20)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Committed);
    assert_eq!(err.location(), SourceLocation::new(1, 4, 3));
    assert_eq!(err.expected(), Some("an expression"));
    assert_eq!(err.found(), Some('X'));
    assert_eq!(
        err.preview().to_string(),
        "1:4: expected an expression, found 'X'\n(+ X +1 -20)\n   ^~~~~~~~~"
    );
}

#[test]
fn surrounding_whitespace_and_lines() {
    let parsed = sexpr().parse("( a\n  (b))").unwrap();
    let Expr::SExp(items, range) = parsed else {
        panic!("expected a list");
    };
    assert_eq!(range.len(), 10);
    assert_eq!(items[1].range().start, SourceLocation::new(2, 3, 6));
    assert_eq!(items[1].range().end, SourceLocation::new(2, 6, 9));
}

#[test]
fn unclosed_list_fails_at_end() {
    let err = sexpr().parse("(a b").unwrap_err();
    assert_eq!(err.found(), None);
    assert_eq!(err.location().index, 4);
}

#[test]
fn empty_list_needs_an_expression() {
    let err = sexpr().parse("()").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Committed);
    assert_eq!(err.expected(), Some("an expression"));
    assert_eq!(err.location().index, 1);
}
