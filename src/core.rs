//! The core combinators for [Parser] upon which the rest of the library is constructed.
//! - Each has a type, a construction function (or public fields) and a [Parser] implementation.

use super::*;
use derive_where::derive_where;
use std::{
    fmt::Debug,
    marker::PhantomData,
    sync::{Arc, Weak},
};

/// Succeeds without consuming input, producing a clone of the value.
/// ```
/// # use textcombi::{Parser, input::ParserInput, core::succeed};
/// let input = ParserInput::new("abc");
/// let parse = succeed(3).run(input).unwrap();
/// assert_eq!(parse.target, 3);
/// assert!(parse.range.is_empty());
/// assert_eq!(parse.rest, input);
/// ```
pub fn succeed<T: Clone>(value: T) -> Succeed<T> {
    Succeed(value)
}

#[derive(Clone, Debug)]
pub struct Succeed<T>(T);

impl<T: Clone> Parser for Succeed<T> {
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        Ok(Parse::empty(self.0.clone(), input))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "succeed")
    }
}

/// Fails recoverably without consuming input.
pub fn fail<T>(expected: impl Into<Cow<'static, str>>) -> Fail<T> {
    Fail {
        expected: expected.into(),
        _target: PhantomData,
    }
}

#[derive_where(Clone, Debug)]
pub struct Fail<T> {
    expected: Cow<'static, str>,
    _target: PhantomData<fn() -> T>,
}

impl<T> Parser for Fail<T> {
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        Err(Failure::recoverable(self.expected.clone(), input))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "fail")
    }
}

/// Always fails with the failure built at the cursor, which may be committed or undescribed.
/// ```
/// # use textcombi::{Parser, core::failwith, error::{ErrorKind, Failure, ParseFailure}};
/// let reserved = failwith::<(), _>(|at| Failure::Committed(ParseFailure::new("not a keyword", at)));
/// assert_eq!(reserved.parse("x").unwrap_err().kind(), ErrorKind::Committed);
/// ```
pub fn failwith<T, F>(f: F) -> FailWith<T, F>
where
    F: for<'src> Fn(ParserInput<'src>) -> Failure<'src>,
{
    FailWith {
        failure: f,
        _target: PhantomData,
    }
}

#[derive_where(Clone; F: Clone)]
#[derive_where(Debug; F: Debug)]
pub struct FailWith<T, F> {
    failure: F,
    _target: PhantomData<fn() -> T>,
}

impl<T, F> Parser for FailWith<T, F>
where
    F: for<'src> Fn(ParserInput<'src>) -> Failure<'src>,
{
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        Err((self.failure)(input))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "fail")
    }
}

/// Applies a provided function to successful results.
#[allow(non_camel_case_types)]
#[derive_where(Clone; P: Clone, F: Clone)]
#[derive_where(Debug; P: Debug, F: Debug)]
pub struct mapsuc<P, F>(pub P, pub F);

impl<T, P, F> Parser for mapsuc<P, F>
where
    P: Parser,
    F: Fn(P::Target) -> T,
{
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        Ok(self.0.run(input)?.map(&self.1))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}

/// Applies a provided function to successful results and the range they were parsed from.
/// ```
/// # use textcombi::{Parser, input::SourceRange, text::token};
/// let p = token("let").map_range(|_, range: SourceRange| range.len());
/// assert_eq!(p.parse("let"), Ok(3));
/// ```
#[allow(non_camel_case_types)]
#[derive_where(Clone; P: Clone, F: Clone)]
#[derive_where(Debug; P: Debug, F: Debug)]
pub struct maprange<P, F>(pub P, pub F);

impl<T, P, F> Parser for maprange<P, F>
where
    P: Parser,
    F: Fn(P::Target, SourceRange) -> T,
{
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let Parse {
            target,
            range,
            rest,
        } = self.0.run(input)?;
        Ok(Parse {
            target: (self.1)(target, range),
            range,
            rest,
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}

/// Applies a partial function to successful results, `None` is a recoverable failure with the
/// description at the start of the parse.
#[allow(non_camel_case_types)]
#[derive_where(Clone; P: Clone, F: Clone)]
#[derive_where(Debug; P: Debug, F: Debug)]
pub struct mapsome<P, F>(pub P, pub F, pub Cow<'static, str>);

impl<T, P, F> Parser for mapsome<P, F>
where
    P: Parser,
    F: Fn(P::Target) -> Option<T>,
{
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let Parse {
            target,
            range,
            rest,
        } = self.0.run(input)?;
        match (self.1)(target) {
            Some(target) => Ok(Parse {
                target,
                range,
                rest,
            }),
            None => Err(Failure::recoverable(self.2.clone(), input)),
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}

/// Fails recoverably (with no description) at the start of the parse when the target does not
/// satisfy the predicate.
#[allow(non_camel_case_types)]
#[derive_where(Clone; P: Clone, F: Clone)]
#[derive_where(Debug; P: Debug, F: Debug)]
pub struct satisfying<P, F>(pub P, pub F);

impl<P, F> Parser for satisfying<P, F>
where
    P: Parser,
    F: Fn(&P::Target) -> bool,
{
    type Target = P::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let parse = self.0.run(input)?;
        if (self.1)(&parse.target) {
            Ok(parse)
        } else {
            Err(Failure::Recoverable(ParseFailure::unexpected(input)))
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}

/// Uses the target of the first parser to choose the parser for the remaining input.
/// - The range covers both parses.
#[allow(non_camel_case_types)]
#[derive_where(Clone; P: Clone, F: Clone)]
#[derive_where(Debug; P: Debug, F: Debug)]
pub struct flatmap<P, F>(pub P, pub F);

impl<P, F, Q> Parser for flatmap<P, F>
where
    P: Parser,
    F: Fn(P::Target) -> Q,
    Q: Parser,
{
    type Target = Q::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let first = self.0.run(input)?;
        let second = (self.1)(first.target).run(first.rest)?;
        Ok(Parse::new(second.target, input, second.rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} >>= ...", Repr(&self.0))
    }
}

/// Parses a function, then its argument, and applies one to the other.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct apply<PF, P>(pub PF, pub P);

impl<PF, P, T> Parser for apply<PF, P>
where
    PF: Parser,
    P: Parser,
    PF::Target: FnOnce(P::Target) -> T,
{
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let function = self.0.run(input)?;
        let argument = self.1.run(function.rest)?;
        Ok(Parse::new(
            (function.target)(argument.target),
            input,
            argument.rest,
        ))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {}", Repr(&self.0), Repr(&self.1))
    }
}

/// As [flatmap], but the choosing function also gets the range of the first parse.
#[allow(non_camel_case_types)]
#[derive_where(Clone; P: Clone, F: Clone)]
#[derive_where(Debug; P: Debug, F: Debug)]
pub struct flatmaprange<P, F>(pub P, pub F);

impl<P, F, Q> Parser for flatmaprange<P, F>
where
    P: Parser,
    F: Fn(P::Target, SourceRange) -> Q,
    Q: Parser,
{
    type Target = Q::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let first = self.0.run(input)?;
        let second = (self.1)(first.target, first.range).run(first.rest)?;
        Ok(Parse::new(second.target, input, second.rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} >>= ...", Repr(&self.0))
    }
}

/// As [apply], with the function also given the range covering the function and its argument.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct applyrange<PF, P>(pub PF, pub P);

impl<PF, P, T> Parser for applyrange<PF, P>
where
    PF: Parser,
    P: Parser,
    PF::Target: FnOnce(P::Target, SourceRange) -> T,
{
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let function = self.0.run(input)?;
        let argument = self.1.run(function.rest)?;
        let range = SourceRange::new(input.location(), argument.rest.location());
        Ok(Parse::new(
            (function.target)(argument.target, range),
            input,
            argument.rest,
        ))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {}", Repr(&self.0), Repr(&self.1))
    }
}

/// Applies the first parser, then the second on the remaining input, producing both targets.
/// ```
/// # use textcombi::{Parser, core::seq, text::character};
/// assert_eq!(seq(character('a'), character('b')).parse("ab"), Ok(('a', 'b')));
/// ```
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct seq<P1, P2>(pub P1, pub P2);

impl<P1: Parser, P2: Parser> Parser for seq<P1, P2> {
    type Target = (P1::Target, P2::Target);

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let first = self.0.run(input)?;
        let second = self.1.run(first.rest)?;
        Ok(Parse::new(
            (first.target, second.target),
            input,
            second.rest,
        ))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {}", Repr(&self.0), Repr(&self.1))
    }
}

/// As [seq], keeping only the right target.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct skipleft<P1, P2>(pub P1, pub P2);

impl<P1: Parser, P2: Parser> Parser for skipleft<P1, P2> {
    type Target = P2::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let first = self.0.run(input)?;
        let second = self.1.run(first.rest)?;
        Ok(Parse::new(second.target, input, second.rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {}", Repr(&self.0), Repr(&self.1))
    }
}

/// As [seq], keeping only the left target.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct skipright<P1, P2>(pub P1, pub P2);

impl<P1: Parser, P2: Parser> Parser for skipright<P1, P2> {
    type Target = P1::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let first = self.0.run(input)?;
        let second = self.1.run(first.rest)?;
        Ok(Parse::new(first.target, input, second.rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {}", Repr(&self.0), Repr(&self.1))
    }
}

/// Applies the first parser, if it fails recoverably the second is applied to the same input.
/// - A committed failure of the first is returned without trying the second.
/// ```
/// # use textcombi::{Parser, text::token};
/// let keyword = token("let").or(token("letrec"));
/// assert_eq!(keyword.parse("let"), Ok(String::from("let")));
///
/// let committed = token("let").ended_by(token("!").nonbacktracking()).or(token("letrec"));
/// assert!(committed.parse("letrec").is_err());
/// ```
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct or<P1, P2>(pub P1, pub P2);

impl<P1, P2> Parser for or<P1, P2>
where
    P1: Parser,
    P2: Parser<Target = P1::Target>,
{
    type Target = P1::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        match self.0.run(input) {
            Err(Failure::Recoverable(_)) => self.1.run(input),
            res => res,
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "({} | {})", Repr(&self.0), Repr(&self.1))
    }
}

/// Commits to the parser: any failure becomes irrecoverable, so enclosing alternatives will not
/// be attempted.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct nonbacktracking<P>(pub P);

impl<P: Parser> Parser for nonbacktracking<P> {
    type Target = P::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        self.0.run(input).map_err(|e| {
            if !e.is_committed() {
                log::trace!("committing failure at {}", e.failure().location());
            }
            e.commit()
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}!", Repr(&self.0))
    }
}

/// Describes any untagged failure of the parser.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct tagged<P>(pub P, pub Cow<'static, str>);

impl<P: Parser> Parser for tagged<P> {
    type Target = P::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        self.0.run(input).map_err(|e| {
            e.map(|mut failure| {
                failure.tag(self.1.clone());
                failure
            })
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.1)
    }
}

/// Produces the source text consumed by the parser.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct lexeme<P>(pub P);

impl<P: Parser> Parser for lexeme<P> {
    type Target = String;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let Parse { range, rest, .. } = self.0.run(input)?;
        Ok(Parse {
            target: input.slice_to(&rest).to_owned(),
            range,
            rest,
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}

/// Discards the target of the parser.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct skipped<P>(pub P);

impl<P: Parser> Parser for skipped<P> {
    type Target = ();

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        Ok(self.0.run(input)?.map(|_| ()))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}

/// Allows a parser to be defined in terms of itself.
/// - The handle is a weak reference to the parser being constructed, so dropping the last
///   [Recursive] frees the whole grammar.
/// ```
/// # use textcombi::{Parser, core::{recursive, RecursiveHandle}, text::character};
/// // nested parentheses, counting the depth
/// let nested = recursive(|nested: RecursiveHandle<u32>| {
///     nested
///         .between(character('('), character(')'))
///         .map(|depth| depth + 1)
///         .or(textcombi::core::succeed(0))
/// });
/// assert_eq!(nested.parse("((()))"), Ok(3));
/// ```
pub fn recursive<T, P, F>(f: F) -> Recursive<T>
where
    F: FnOnce(RecursiveHandle<T>) -> P,
    P: Parser<Target = T> + Send + Sync + 'static,
{
    Recursive {
        p: Arc::new_cyclic(move |w: &Weak<RecurBox<T>>| -> RecurBox<T> {
            Box::new(f(RecursiveHandle { p: w.clone() }))
        }),
    }
}

type RecurBox<T> = Box<dyn Parser<Target = T> + Send + Sync>;

#[derive_where(Clone)]
pub struct RecursiveHandle<T> {
    p: Weak<RecurBox<T>>,
}

impl<T> Parser for RecursiveHandle<T> {
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        // INV: the handle is owned by the recursive parser it refers to, it can only outlive it
        //      if cloned out of the construction closure.
        match self.p.upgrade() {
            Some(p) => p.run(input),
            None => Err(Failure::Committed(ParseFailure::new(
                "a recursive parser that is still alive",
                input,
            ))),
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "...")
    }
}

// No Debug implementation for recursive
#[derive_where(Clone)]
pub struct Recursive<T> {
    p: Arc<RecurBox<T>>,
}

impl<T> Parser for Recursive<T> {
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        self.p.run(input)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", Repr(&**self.p))
    }
}

/// Builds the parser each time it is run, so grammar functions can refer to each other.
/// - At least one function in the cycle must return a named type (e.g. a [BoxedParser]), as
///   `impl Parser` return types cannot contain each other.
/// ```
/// # use textcombi::{Parser, core::{lazy, BoxedParser}, text::character};
/// fn list() -> impl Parser<Target = usize> {
///     lazy(item).separated_by(character(',')).map(|items: Vec<usize>| items.iter().sum())
/// }
/// fn item() -> BoxedParser<usize> {
///     character('x')
///         .map(|_| 1)
///         .or(lazy(list).between(character('['), character(']')))
///         .boxed()
/// }
/// assert_eq!(list().parse("x,[x,x],x"), Ok(4));
/// ```
pub fn lazy<P: Parser, F: Fn() -> P>(f: F) -> Lazy<F> {
    Lazy(f)
}

#[derive(Clone)]
pub struct Lazy<F>(F);

impl<P, F> Parser for Lazy<F>
where
    P: Parser,
    F: Fn() -> P,
{
    type Target = P::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        (self.0)().run(input)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "...")
    }
}

/// A type erased, shared parser.
#[derive_where(Clone)]
pub struct BoxedParser<T>(Arc<dyn Parser<Target = T> + Send + Sync>);

impl<T> BoxedParser<T> {
    pub fn new<P>(p: P) -> Self
    where
        P: Parser<Target = T> + Send + Sync + 'static,
    {
        Self(Arc::new(p))
    }
}

impl<T> Parser for BoxedParser<T> {
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        self.0.run(input)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}
