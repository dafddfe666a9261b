//! Common lexemes built from the [basic](super::basic) parsers.
//! - Number lexers produce the source text, convert it with [`Parser::map_some`] and
//!   [`str::parse`].

use super::basic::{character, inrange, noneof, oneof, Character, InRange, NoneOf, OneOf};
use crate::{
    core::{lexeme, or, seq},
    derived::{optional, skippedmany},
    Parser,
};

pub fn space() -> Character {
    character(' ')
}

pub fn tab() -> Character {
    character('\t')
}

/// A space or a tab.
pub fn whitespace() -> OneOf {
    oneof(" \t")
}

pub fn whitespaces() -> lexeme<skippedmany<OneOf>> {
    skippedmany(whitespace()).lexeme()
}

/// A line feed or a carriage return.
pub fn newline() -> OneOf {
    oneof("\n\r")
}

pub fn newlines() -> lexeme<skippedmany<OneOf>> {
    skippedmany(newline()).lexeme()
}

pub fn upperletter() -> InRange {
    inrange('A'..='Z')
}

pub fn lowerletter() -> InRange {
    inrange('a'..='z')
}

/// An ASCII letter of either case.
pub fn letter() -> or<InRange, InRange> {
    or(upperletter(), lowerletter())
}

pub fn digit() -> InRange {
    inrange('0'..='9')
}

/// One or more digits.
pub fn unsignedinteger() -> lexeme<skippedmany<InRange>> {
    skippedmany(digit()).lexeme()
}

/// An optional sign, then one or more digits.
/// ```
/// # use textcombi::{Parser, text::signedinteger};
/// let int = signedinteger().map_some(|s| s.parse::<i64>().ok(), "an integer");
/// assert_eq!(int.parse("+12345"), Ok(12345));
/// assert_eq!(int.parse("-12345"), Ok(-12345));
/// ```
pub fn signedinteger() -> lexeme<seq<optional<OneOf>, skippedmany<InRange>>> {
    seq(oneof("+-").optional(), skippedmany(digit())).lexeme()
}

/// Digits, a point, then digits.
pub fn unsigneddecimal() -> lexeme<seq<skippedmany<InRange>, seq<Character, skippedmany<InRange>>>>
{
    seq(
        skippedmany(digit()),
        seq(character('.'), skippedmany(digit())),
    )
    .lexeme()
}

#[allow(clippy::type_complexity)]
pub fn signeddecimal(
) -> lexeme<seq<optional<OneOf>, lexeme<seq<skippedmany<InRange>, seq<Character, skippedmany<InRange>>>>>>
{
    seq(oneof("+-").optional(), unsigneddecimal()).lexeme()
}

/// One or more characters, up to (and not including) any character of `set` or the end of input.
pub fn stringuntil(set: &str) -> lexeme<skippedmany<NoneOf>> {
    skippedmany(noneof(set)).lexeme()
}
