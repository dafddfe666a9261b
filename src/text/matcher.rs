//! Matching characters using a function.
use crate::{error::Failure, input::ParserInput, Parse, ParseResult, Parser};
use std::{
    borrow::Cow,
    fmt::{Error, Formatter},
};

use super::basic::next_if;

/// A single character predicate.
/// - With `PEEK` the parser only looks ahead, producing whether the next character matches
///   (`false` at the end of input) without consuming anything.
/// - Without `PEEK` it consumes and produces a matching character, failing otherwise.
#[derive(Clone)]
pub struct Matcher<const PEEK: bool, F> {
    match_fn: F,
    repr_str: Cow<'static, str>,
}

/// ```
/// # use textcombi::{Parser, text::matcher::matcher};
/// let ident_start = matcher::<false, _>(|c| c.is_alphabetic() || c == '_', "an identifier");
/// assert_eq!(ident_start.parse("_"), Ok('_'));
/// assert_eq!(ident_start.parse("1").unwrap_err().expected(), Some("an identifier"));
///
/// let at_digit = matcher::<true, _>(|c| c.is_ascii_digit(), "a digit");
/// assert_eq!(at_digit.followed_by(textcombi::text::anychar()).parse("7"), Ok((true, '7')));
/// ```
pub fn matcher<const PEEK: bool, F>(
    match_fn: F,
    repr_str: impl Into<Cow<'static, str>>,
) -> Matcher<PEEK, F>
where
    F: Fn(char) -> bool,
{
    Matcher {
        match_fn,
        repr_str: repr_str.into(),
    }
}

impl<F> Parser for Matcher<true, F>
where
    F: Fn(char) -> bool,
{
    type Target = bool;

    #[inline(always)]
    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let matched = input.peek().is_some_and(&self.match_fn);
        Ok(Parse::empty(matched, input))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "&{}", self.repr_str)
    }
}

impl<F> Parser for Matcher<false, F>
where
    F: Fn(char) -> bool,
{
    type Target = char;

    #[inline(always)]
    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        next_if(input, &self.match_fn)
            .ok_or_else(|| Failure::recoverable(self.repr_str.clone(), input))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.repr_str)
    }
}
