//! An s-expression grammar shared by the integration tests.
#![allow(dead_code)]

use textcombi::{
    alts,
    core::{recursive, Recursive, RecursiveHandle},
    input::{SourceLocation, SourceRange},
    text::{character, regex, signedinteger},
    Parser,
};

#[derive(Debug, PartialEq)]
pub enum Expr {
    Int(i64, SourceRange),
    Id(String, SourceRange),
    SExp(Vec<Expr>, SourceRange),
}

impl Expr {
    pub fn range(&self) -> SourceRange {
        match self {
            Expr::Int(_, r) | Expr::Id(_, r) | Expr::SExp(_, r) => *r,
        }
    }
}

pub fn sexpr() -> Recursive<Expr> {
    recursive(|exp: RecursiveHandle<Expr>| {
        let ws = regex("[ \n\r]+").unwrap();
        let int = signedinteger()
            .map_some(|s| s.parse().ok(), "an integer")
            .map_range(Expr::Int);
        let id = regex("[a-z_+\\-*/][0-9a-z_+\\-*/]*")
            .unwrap()
            .map_range(Expr::Id);
        let list = exp
            .nonbacktracking()
            .separated_by(ws.clone())
            .amid(ws.optional())
            .between(character('('), character(')'))
            .map_range(Expr::SExp);
        alts!(int, id, list).tagged("an expression")
    })
}

/// A range on the first line, by character index.
pub fn span(start: usize, end: usize) -> SourceRange {
    SourceRange::new(
        SourceLocation::new(1, start + 1, start),
        SourceLocation::new(1, end + 1, end),
    )
}
