//! Single character and literal parsers.
//! - Every failure here is recoverable and zero-width, located at the character that did not
//!   match (or the end of input).

use crate::{
    error::Failure,
    input::ParserInput,
    Parse, ParseResult, Parser,
};
use std::{
    borrow::Cow,
    fmt::{Error, Formatter},
    ops::RangeInclusive,
};

/// Consume the next character if it satisfies `pred`.
#[inline]
pub(crate) fn next_if<'src>(
    input: ParserInput<'src>,
    pred: impl FnOnce(char) -> bool,
) -> Option<Parse<'src, char>> {
    match input.advance() {
        Some((c, rest)) if pred(c) => Some(Parse::new(c, input, rest)),
        _ => None,
    }
}

/// Describe a set of characters as `{'a', 'b'}`.
fn describe_set(set: &[char]) -> String {
    let items = set
        .iter()
        .map(|c| format!("{c:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{items}}}")
}

#[derive(Clone, Debug)]
pub struct Character {
    c: char,
    expected: Cow<'static, str>,
}

/// Matches exactly `c`.
pub fn character(c: char) -> Character {
    Character {
        c,
        expected: Cow::Owned(format!("{c:?}")),
    }
}

impl Parser for Character {
    type Target = char;

    #[inline]
    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        next_if(input, |c| c == self.c)
            .ok_or_else(|| Failure::recoverable(self.expected.clone(), input))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{:?}", self.c)
    }
}

#[derive(Clone, Debug)]
pub struct OneOf {
    set: Vec<char>,
    expected: Cow<'static, str>,
}

/// Matches any character in `set`.
/// ```
/// # use textcombi::{Parser, text::oneof};
/// let sign = oneof("+-");
/// assert_eq!(sign.parse("-"), Ok('-'));
/// assert_eq!(
///     sign.parse("*").unwrap_err().expected(),
///     Some("a character within {'+', '-'}")
/// );
/// ```
pub fn oneof(set: &str) -> OneOf {
    let set = set.chars().collect::<Vec<_>>();
    let expected = Cow::Owned(format!("a character within {}", describe_set(&set)));
    OneOf { set, expected }
}

impl Parser for OneOf {
    type Target = char;

    #[inline]
    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        next_if(input, |c| self.set.contains(&c))
            .ok_or_else(|| Failure::recoverable(self.expected.clone(), input))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "[{}]", self.set.iter().collect::<String>())
    }
}

#[derive(Clone, Debug)]
pub struct InRange {
    range: RangeInclusive<char>,
    expected: Cow<'static, str>,
}

/// Matches any character in the inclusive range.
pub fn inrange(range: RangeInclusive<char>) -> InRange {
    let expected = Cow::Owned(format!(
        "a character within range {:?}..={:?}",
        range.start(),
        range.end()
    ));
    InRange { range, expected }
}

impl Parser for InRange {
    type Target = char;

    #[inline]
    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        next_if(input, |c| self.range.contains(&c))
            .ok_or_else(|| Failure::recoverable(self.expected.clone(), input))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "[{}-{}]", self.range.start(), self.range.end())
    }
}

#[derive(Clone, Debug)]
pub struct NoneOf {
    set: Vec<char>,
    expected: Cow<'static, str>,
}

/// Matches any character not in `set`, failing at the end of input.
pub fn noneof(set: &str) -> NoneOf {
    let set = set.chars().collect::<Vec<_>>();
    let expected = Cow::Owned(format!("any character except {}", describe_set(&set)));
    NoneOf { set, expected }
}

/// Matches any character other than `c`, failing at the end of input.
pub fn except(c: char) -> NoneOf {
    NoneOf {
        set: vec![c],
        expected: Cow::Owned(format!("any character except {c:?}")),
    }
}

impl Parser for NoneOf {
    type Target = char;

    #[inline]
    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        next_if(input, |c| !self.set.contains(&c))
            .ok_or_else(|| Failure::recoverable(self.expected.clone(), input))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "[^{}]", self.set.iter().collect::<String>())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnyChar;

/// Matches any single character, failing only at the end of input.
pub fn anychar() -> AnyChar {
    AnyChar
}

impl Parser for AnyChar {
    type Target = char;

    #[inline]
    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        next_if(input, |_| true).ok_or_else(|| Failure::recoverable("any character", input))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, ".")
    }
}

#[derive(Clone, Debug)]
pub struct Token {
    text: Cow<'static, str>,
    expected: Cow<'static, str>,
}

/// Matches the literal text exactly.
/// ```
/// # use textcombi::{Parser, error::ErrorKind, text::token};
/// let hello = token("Hello");
/// assert_eq!(hello.parse("Hello"), Ok(String::from("Hello")));
///
/// let err = hello.parse("HelloX").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::TrailingInput);
/// assert_eq!(err.location().column, 6);
/// ```
pub fn token(text: impl Into<Cow<'static, str>>) -> Token {
    let text = text.into();
    let expected = Cow::Owned(format!("token \"{text}\""));
    Token { text, expected }
}

impl Parser for Token {
    type Target = String;

    #[inline]
    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        if input.rest().starts_with(&*self.text) {
            Ok(Parse::new(
                self.text.clone().into_owned(),
                input,
                input.consume(self.text.len()),
            ))
        } else {
            Err(Failure::recoverable(self.expected.clone(), input))
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{:?}", self.text)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct End;

/// Succeeds without consuming input only at the end of input.
pub fn end() -> End {
    End
}

impl Parser for End {
    type Target = ();

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        if input.is_empty() {
            Ok(Parse::empty((), input))
        } else {
            Err(Failure::recoverable("end of input", input))
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<end>")
    }
}
