//! A text parser combinator library with source location tracking and explicit backtracking.
//!
//! Parsers are built from small [lexer primitives](text) composed by [combinators](core). Every
//! successful [Parse] carries the [SourceRange] it consumed, and every failure is either
//! recoverable (alternatives may be tried) or committed (see [Parser::nonbacktracking]).
//! ```
//! # use textcombi::{Parser, text::{character, derived::digit}};
//! let pair = digit().followed_by(character(',').skipped_to(digit()));
//! assert_eq!(pair.parse("1,2").unwrap(), ('1', '2'));
//!
//! let err = pair.parse("1;2").unwrap_err();
//! assert_eq!(err.to_string(), "1:2: expected ',', found ';'");
//! ```
#![allow(internal_features)]
#![cfg_attr(feature = "nightly", feature(rustc_attrs))]
#![warn(clippy::style)]
#![warn(clippy::perf)]
#![warn(clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use std::{
    borrow::Cow,
    fmt::{Display, Error, Formatter},
};

pub mod assoc;
pub mod core;
pub mod derived;
pub mod error;
pub mod input;
pub mod macros;
pub mod text;

use crate::{
    assoc::{
        infixleft, infixleftrange, infixright, infixrightrange, suffixed, suffixedrange,
    },
    core::{
        apply, applyrange, flatmap, flatmaprange, lexeme, maprange, mapsome, mapsuc,
        nonbacktracking, or, satisfying, seq, skipleft, skipped, skipright, tagged, BoxedParser,
    },
    derived::{
        amid, between, many, manyornone, occurring, optional, sepby, sepby0, skippedmany,
        skippedmanyornone, withdefault,
    },
    error::{ErrorKind, Failure, ParseError, ParseFailure, RenderConfig},
    input::{ParserInput, SourceRange},
};

/// The result of a successful parse.
/// - `range.start` is the location the parser was given
/// - `range.end` is the location of `rest`
#[derive(Clone, Debug, PartialEq)]
pub struct Parse<'src, T> {
    pub target: T,
    pub range: SourceRange,
    pub rest: ParserInput<'src>,
}

impl<'src, T> Parse<'src, T> {
    /// A parse of everything between `input` and `rest`.
    pub fn new(target: T, input: ParserInput<'src>, rest: ParserInput<'src>) -> Self {
        Self {
            target,
            range: SourceRange::new(input.location(), rest.location()),
            rest,
        }
    }

    /// A zero-width parse at `input`.
    pub fn empty(target: T, input: ParserInput<'src>) -> Self {
        Self {
            target,
            range: SourceRange::empty(input.location()),
            rest: input,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parse<'src, U> {
        Parse {
            target: f(self.target),
            range: self.range,
            rest: self.rest,
        }
    }
}

pub type ParseResult<'src, T> = Result<Parse<'src, T>, Failure<'src>>;

/// The core trait for defining parsers over text.
/// Provides an interface to run a parser on a [ParserInput], get a representation of it, and
/// combine it with others.
#[cfg_attr(
    feature = "nightly",
    rustc_on_unimplemented(
        message = "`{Self}` is not a `Parser` so cannot be combined & used as one",
        label = "Not a `Parser`",
    )
)]
pub trait Parser {
    type Target;

    /// Runs the parser from `input`, producing the target and the input left to parse.
    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target>;

    /// Produces a representation of the parser for debugging.
    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error>;

    /// Parse the whole of `text`, any input left over is an error.
    fn parse(&self, text: &str) -> Result<Self::Target, ParseError> {
        self.parse_with(text, &RenderConfig::default())
    }

    fn parse_with(&self, text: &str, config: &RenderConfig) -> Result<Self::Target, ParseError> {
        log::trace!("parsing {} bytes with `{}`", text.len(), Repr(self));
        let err = match self.run(ParserInput::new(text)) {
            Ok(Parse { target, rest, .. }) if rest.is_empty() => return Ok(target),
            Ok(Parse { rest, .. }) => ParseError::from_failure(
                ParseFailure::trailing(rest),
                ErrorKind::TrailingInput,
                config,
            ),
            Err(Failure::Recoverable(f)) => {
                ParseError::from_failure(f, ErrorKind::Mismatch, config)
            }
            Err(Failure::Committed(f)) => {
                ParseError::from_failure(f, ErrorKind::Committed, config)
            }
        };
        log::debug!("parse failed ({:?}): {}", err.kind(), err);
        Err(err)
    }

    fn map<T, F>(self, f: F) -> mapsuc<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Target) -> T,
    {
        mapsuc(self, f)
    }

    /// Map the target, with access to the range it was parsed from.
    fn map_range<T, F>(self, f: F) -> maprange<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Target, SourceRange) -> T,
    {
        maprange(self, f)
    }

    /// Map the target, failing recoverably with `expected` when `f` returns `None`.
    fn map_some<T, F>(self, f: F, expected: impl Into<Cow<'static, str>>) -> mapsome<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Target) -> Option<T>,
    {
        mapsome(self, f, expected.into())
    }

    fn satisfying<F>(self, predicate: F) -> satisfying<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Target) -> bool,
    {
        satisfying(self, predicate)
    }

    fn flat_map<P, F>(self, f: F) -> flatmap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Target) -> P,
        P: Parser,
    {
        flatmap(self, f)
    }

    /// As [Parser::flat_map], with the range of `self`'s parse also given to `f`.
    fn flat_map_range<P, F>(self, f: F) -> flatmaprange<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Target, SourceRange) -> P,
        P: Parser,
    {
        flatmaprange(self, f)
    }

    /// Run `function` and then `self`, applying the parsed function to the target.
    fn apply<PF, T>(self, function: PF) -> apply<PF, Self>
    where
        Self: Sized,
        PF: Parser,
        PF::Target: FnOnce(Self::Target) -> T,
    {
        apply(function, self)
    }

    fn apply_ranged<PF, T>(self, function: PF) -> applyrange<PF, Self>
    where
        Self: Sized,
        PF: Parser,
        PF::Target: FnOnce(Self::Target, SourceRange) -> T,
    {
        applyrange(function, self)
    }

    /// Sequence `self` then `next`, keeping both targets.
    fn followed_by<P: Parser>(self, next: P) -> seq<Self, P>
    where
        Self: Sized,
    {
        seq(self, next)
    }

    /// Sequence `self` then `next`, keeping only the target of `next`.
    fn skipped_to<P: Parser>(self, next: P) -> skipleft<Self, P>
    where
        Self: Sized,
    {
        skipleft(self, next)
    }

    /// Sequence `self` then `end`, keeping only the target of `self`.
    fn ended_by<P: Parser>(self, end: P) -> skipright<Self, P>
    where
        Self: Sized,
    {
        skipright(self, end)
    }

    /// Try `self`, and on a recoverable failure try `other` from the same input.
    fn or<P>(self, other: P) -> or<Self, P>
    where
        Self: Sized,
        P: Parser<Target = Self::Target>,
    {
        or(self, other)
    }

    /// Commit to this parser, any failure is no longer recoverable.
    fn nonbacktracking(self) -> nonbacktracking<Self>
    where
        Self: Sized,
    {
        nonbacktracking(self)
    }

    /// Describe failures of this parser as `description`, unless already described by an inner
    /// tag.
    fn tagged(self, description: impl Into<Cow<'static, str>>) -> tagged<Self>
    where
        Self: Sized,
    {
        tagged(self, description.into())
    }

    /// Produce the source text consumed instead of the target.
    fn lexeme(self) -> lexeme<Self>
    where
        Self: Sized,
    {
        lexeme(self)
    }

    fn skipped(self) -> skipped<Self>
    where
        Self: Sized,
    {
        skipped(self)
    }

    fn many_or_none(self) -> manyornone<Self>
    where
        Self: Sized,
    {
        manyornone(self)
    }

    fn skipped_many_or_none(self) -> skippedmanyornone<Self>
    where
        Self: Sized,
    {
        skippedmanyornone(self)
    }

    fn many(self) -> many<Self>
    where
        Self: Sized,
    {
        many(self)
    }

    fn skipped_many(self) -> skippedmany<Self>
    where
        Self: Sized,
    {
        skippedmany(self)
    }

    fn occurring(self, times: usize) -> occurring<Self>
    where
        Self: Sized,
    {
        occurring(self, times)
    }

    fn separated_by<S: Parser>(self, separator: S) -> sepby<Self, S>
    where
        Self: Sized,
    {
        sepby(self, separator)
    }

    fn separated_by_or_none<S: Parser>(self, separator: S) -> sepby0<Self, S>
    where
        Self: Sized,
    {
        sepby0(self, separator)
    }

    fn between<L: Parser, R: Parser>(self, left: L, right: R) -> between<L, Self, R>
    where
        Self: Sized,
    {
        between(left, self, right)
    }

    fn amid<S: Parser>(self, surrounding: S) -> amid<Self, S>
    where
        Self: Sized,
    {
        amid(self, surrounding)
    }

    fn optional(self) -> optional<Self>
    where
        Self: Sized,
    {
        optional(self)
    }

    fn with_default(self, value: Self::Target) -> withdefault<Self, Self::Target>
    where
        Self: Sized,
        Self::Target: Clone,
    {
        withdefault(self, value)
    }

    /// Parse `self (op self)*`, combining left associatively.
    fn infixed_left<O, F>(self, operator: O) -> infixleft<Self, O>
    where
        Self: Sized,
        O: Parser<Target = F>,
        F: FnOnce(Self::Target, Self::Target) -> Self::Target,
    {
        infixleft(self, operator)
    }

    fn infixed_left_ranged<O, F>(self, operator: O) -> infixleftrange<Self, O>
    where
        Self: Sized,
        O: Parser<Target = F>,
        F: FnOnce(Self::Target, Self::Target, SourceRange) -> Self::Target,
    {
        infixleftrange(self, operator)
    }

    /// Parse `(self op)* self`, combining right associatively.
    fn infixed_right<O, F>(self, operator: O) -> infixright<Self, O>
    where
        Self: Sized,
        O: Parser<Target = F>,
        F: FnOnce(Self::Target, Self::Target) -> Self::Target,
    {
        infixright(self, operator)
    }

    fn infixed_right_ranged<O, F>(self, operator: O) -> infixrightrange<Self, O>
    where
        Self: Sized,
        O: Parser<Target = F>,
        F: FnOnce(Self::Target, Self::Target, SourceRange) -> Self::Target,
    {
        infixrightrange(self, operator)
    }

    /// Parse `self suffix*`, applying each suffix in order.
    fn suffixed<S, F>(self, suffix: S) -> suffixed<Self, S>
    where
        Self: Sized,
        S: Parser<Target = F>,
        F: FnOnce(Self::Target) -> Self::Target,
    {
        suffixed(self, suffix)
    }

    fn suffixed_ranged<S, F>(self, suffix: S) -> suffixedrange<Self, S>
    where
        Self: Sized,
        S: Parser<Target = F>,
        F: FnOnce(Self::Target, SourceRange) -> Self::Target,
    {
        suffixedrange(self, suffix)
    }

    /// Erase the type of the parser, for storing in collections or returning from grammar
    /// functions.
    fn boxed(self) -> BoxedParser<Self::Target>
    where
        Self: Sized + Send + Sync + 'static,
    {
        BoxedParser::new(self)
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Target = P::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        (**self).run(input)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        (**self).repr(f)
    }
}

/// A simple wrapper to allow the [Parser::repr] function to implement [Display]
pub struct Repr<T>(pub T);

impl<P: Parser + ?Sized> Display for Repr<&P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.repr(f)
    }
}
