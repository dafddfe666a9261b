//! [Parser]s derived from the [core](crate::core) combinators: repetition, separated lists,
//! delimiters, optional parts and string concatenation.
//!
//! Repetition stops cleanly at the first recoverable failure, leaving the input at the end of
//! the last success. Committed failures always propagate.

use super::*;
use derive_where::derive_where;
use std::fmt::Debug;

/// Runs `p` until it fails recoverably, passing each target to `each`.
/// - Returns the input after the last success.
#[inline]
fn repeat<'src, P: Parser>(
    p: &P,
    input: ParserInput<'src>,
    mut each: impl FnMut(P::Target),
) -> Result<ParserInput<'src>, Failure<'src>> {
    let mut rest = input;
    loop {
        match p.run(rest) {
            Ok(Parse {
                target, rest: next, ..
            }) => {
                debug_assert!(
                    next != rest,
                    "repeated parser `{}` succeeded without consuming input at {}",
                    Repr(p),
                    rest.location()
                );
                each(target);
                if next == rest {
                    return Ok(rest);
                }
                rest = next;
            }
            Err(Failure::Recoverable(_)) => return Ok(rest),
            Err(e) => return Err(e),
        }
    }
}

/// Applies the parser zero or more times, collecting the targets.
/// - The parser must consume input whenever it succeeds.
/// ```
/// # use textcombi::{Parser, text::character};
/// let p = character('a').many_or_none();
/// assert_eq!(p.parse(""), Ok(vec![]));
/// assert_eq!(p.parse("aaa"), Ok(vec!['a', 'a', 'a']));
/// ```
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct manyornone<P>(pub P);

impl<P: Parser> Parser for manyornone<P> {
    type Target = Vec<P::Target>;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let mut targets = Vec::new();
        let rest = repeat(&self.0, input, |t| targets.push(t))?;
        Ok(Parse::new(targets, input, rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}*", Repr(&self.0))
    }
}

/// As [manyornone], discarding the targets.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct skippedmanyornone<P>(pub P);

impl<P: Parser> Parser for skippedmanyornone<P> {
    type Target = ();

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let rest = repeat(&self.0, input, drop)?;
        Ok(Parse::new((), input, rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}*", Repr(&self.0))
    }
}

/// Applies the parser one or more times, collecting the targets.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct many<P>(pub P);

impl<P: Parser> Parser for many<P> {
    type Target = Vec<P::Target>;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let first = self.0.run(input)?;
        let mut targets = vec![first.target];
        let rest = repeat(&self.0, first.rest, |t| targets.push(t))?;
        Ok(Parse::new(targets, input, rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}+", Repr(&self.0))
    }
}

/// As [many], discarding the targets.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct skippedmany<P>(pub P);

impl<P: Parser> Parser for skippedmany<P> {
    type Target = ();

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let first = self.0.run(input)?;
        let rest = repeat(&self.0, first.rest, drop)?;
        Ok(Parse::new((), input, rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}+", Repr(&self.0))
    }
}

/// Applies the parser exactly `n` times, any failure is returned.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct occurring<P>(pub P, pub usize);

impl<P: Parser> Parser for occurring<P> {
    type Target = Vec<P::Target>;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let mut targets = Vec::with_capacity(self.1);
        let mut rest = input;
        for _ in 0..self.1 {
            let parse = self.0.run(rest)?;
            targets.push(parse.target);
            rest = parse.rest;
        }
        Ok(Parse::new(targets, input, rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}{{{}}}", Repr(&self.0), self.1)
    }
}

/// Allows a [Parser] to be repeatedly parsed based on a separator in the pattern:
/// ```text
/// P S P S P ... S P
/// ```
/// - A trailing separator is not consumed.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct sepby<P, S>(pub P, pub S);

impl<P: Parser, S: Parser> Parser for sepby<P, S> {
    type Target = Vec<P::Target>;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let first = self.0.run(input)?;
        let mut targets = vec![first.target];
        let rest = repeat(&skipleft(&self.1, &self.0), first.rest, |t| targets.push(t))?;
        Ok(Parse::new(targets, input, rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} ({} {})*", Repr(&self.0), Repr(&self.1), Repr(&self.0))
    }
}

/// As [sepby], producing no targets when the first item does not match.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct sepby0<P, S>(pub P, pub S);

impl<P: Parser, S: Parser> Parser for sepby0<P, S> {
    type Target = Vec<P::Target>;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        match sepby(&self.0, &self.1).run(input) {
            Err(Failure::Recoverable(_)) => Ok(Parse::empty(Vec::new(), input)),
            res => res,
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "[{} ({} {})*]", Repr(&self.0), Repr(&self.1), Repr(&self.0))
    }
}

/// Parses `left`, the parser, then `right`, keeping the middle target.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct between<L, P, R>(pub L, pub P, pub R);

impl<L: Parser, P: Parser, R: Parser> Parser for between<L, P, R> {
    type Target = P::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let left = self.0.run(input)?;
        let middle = self.1.run(left.rest)?;
        let right = self.2.run(middle.rest)?;
        Ok(Parse::new(middle.target, input, right.rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {} {}", Repr(&self.0), Repr(&self.1), Repr(&self.2))
    }
}

/// Parses the parser between two occurrences of the surrounding parser.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct amid<P, S>(pub P, pub S);

impl<P: Parser, S: Parser> Parser for amid<P, S> {
    type Target = P::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        between(&self.1, &self.0, &self.1).run(input)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {} {}", Repr(&self.1), Repr(&self.0), Repr(&self.1))
    }
}

/// Produces `None` without consuming input if the parser fails recoverably.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct optional<P>(pub P);

impl<P: Parser> Parser for optional<P> {
    type Target = Option<P::Target>;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        match self.0.run(input) {
            Ok(parse) => Ok(parse.map(Some)),
            Err(Failure::Recoverable(_)) => Ok(Parse::empty(None, input)),
            Err(e) => Err(e),
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}?", Repr(&self.0))
    }
}

/// Produces the default value without consuming input if the parser fails recoverably.
#[allow(non_camel_case_types)]
#[derive_where(Clone; P: Clone, T: Clone)]
#[derive_where(Debug; P: Debug, T: Debug)]
pub struct withdefault<P, T>(pub P, pub T);

impl<P, T> Parser for withdefault<P, T>
where
    P: Parser<Target = T>,
    T: Clone,
{
    type Target = T;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        match self.0.run(input) {
            Err(Failure::Recoverable(_)) => Ok(Parse::empty(self.1.clone(), input)),
            res => res,
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}?", Repr(&self.0))
    }
}

/// Concatenates the strings produced by two parsers in sequence.
/// ```
/// # use textcombi::{Parser, derived::{concat, maybeempty}, text::{token, oneof}};
/// let sign = maybeempty(oneof("+-").map(String::from));
/// let p = concat(sign, token("1"));
/// assert_eq!(p.parse("-1"), Ok(String::from("-1")));
/// assert_eq!(p.parse("1"), Ok(String::from("1")));
/// ```
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct concat<P1, P2>(pub P1, pub P2);

impl<P1, P2> Parser for concat<P1, P2>
where
    P1: Parser<Target = String>,
    P2: Parser<Target = String>,
{
    type Target = String;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let first = self.0.run(input)?;
        let second = self.1.run(first.rest)?;
        let mut target = first.target;
        target.push_str(&second.target);
        Ok(Parse::new(target, input, second.rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {}", Repr(&self.0), Repr(&self.1))
    }
}

/// Concatenates the strings of one or more repetitions.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct manyconcat<P>(pub P);

impl<P: Parser<Target = String>> Parser for manyconcat<P> {
    type Target = String;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let first = self.0.run(input)?;
        let mut target = first.target;
        let rest = repeat(&self.0, first.rest, |s| target.push_str(&s))?;
        Ok(Parse::new(target, input, rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}+", Repr(&self.0))
    }
}

/// Concatenates the strings of zero or more repetitions.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct manyconcat0<P>(pub P);

impl<P: Parser<Target = String>> Parser for manyconcat0<P> {
    type Target = String;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        let mut target = String::new();
        let rest = repeat(&self.0, input, |s| target.push_str(&s))?;
        Ok(Parse::new(target, input, rest))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}*", Repr(&self.0))
    }
}

/// Produces the empty string if the parser fails recoverably.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct maybeempty<P>(pub P);

impl<P: Parser<Target = String>> Parser for maybeempty<P> {
    type Target = String;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        withdefault(&self.0, String::new()).run(input)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}?", Repr(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::succeed,
        input::SourceLocation,
        text::{character, digit, token},
    };

    #[test]
    fn zero_matches_is_empty_success() {
        let input = ParserInput::new("bbb");
        let parse = manyornone(character('a')).run(input).unwrap();
        assert!(parse.target.is_empty());
        assert!(parse.range.is_empty());
        assert_eq!(parse.range.start, input.location());
        assert_eq!(parse.rest, input);
    }

    #[test]
    fn many_needs_one() {
        let err = many(character('a')).run(ParserInput::new("b")).unwrap_err();
        assert_eq!(err.failure().expected(), Some("'a'"));

        let parse = many(character('a')).run(ParserInput::new("aab")).unwrap();
        assert_eq!(parse.target, vec!['a', 'a']);
        assert_eq!(parse.rest.rest(), "b");
    }

    #[test]
    fn repetition_propagates_commitment() {
        let item = seq(character('a'), character('b').nonbacktracking());
        let err = manyornone(&item).run(ParserInput::new("abac")).unwrap_err();
        assert!(err.is_committed());
        assert_eq!(err.failure().location(), SourceLocation::new(1, 4, 3));
    }

    #[test]
    fn skipped_repetition() {
        let parse = skippedmany(character(' ')).run(ParserInput::new("   x")).unwrap();
        assert_eq!(parse.range.len(), 3);
        let parse = skippedmanyornone(character(' '))
            .run(ParserInput::new("x"))
            .unwrap();
        assert!(parse.range.is_empty());
    }

    #[test]
    fn exact_occurrences() {
        assert_eq!(occurring(digit(), 3).parse("123"), Ok(vec!['1', '2', '3']));
        assert!(occurring(digit(), 3).parse("12").is_err());
        let parse = occurring(digit(), 0).run(ParserInput::new("1")).unwrap();
        assert!(parse.target.is_empty());
        assert!(parse.range.is_empty());
    }

    #[test]
    fn separated_lists_leave_trailing_separator() {
        let list = sepby(digit(), character(','));
        let parse = list.run(ParserInput::new("1,2,3,")).unwrap();
        assert_eq!(parse.target, vec!['1', '2', '3']);
        assert_eq!(parse.rest.rest(), ",");

        assert!(list.run(ParserInput::new("")).is_err());
        assert_eq!(sepby0(digit(), character(',')).parse(""), Ok(vec![]));
    }

    #[test]
    fn delimiters() {
        let p = digit().between(character('['), character(']'));
        assert_eq!(p.parse("[1]"), Ok('1'));
        let q = digit().amid(character('|'));
        assert_eq!(q.parse("|2|"), Ok('2'));
        assert!(q.parse("|2").is_err());
    }

    #[test]
    fn withdefault_falls_back_and_debugs() {
        let p = withdefault(character('a'), 'z');
        assert_eq!(p.parse(""), Ok('z'));
        assert_eq!(p.parse("a"), Ok('a'));
        assert!(format!("{p:?}").starts_with("withdefault("));
    }

    #[test]
    fn optional_parts() {
        let p = seq(character('-').optional(), digit());
        assert_eq!(p.parse("-1"), Ok((Some('-'), '1')));
        assert_eq!(p.parse("1"), Ok((None, '1')));

        let q = seq(character('+').with_default('+'), digit());
        assert_eq!(q.parse("1"), Ok(('+', '1')));

        let committed = character('-').nonbacktracking().optional();
        assert!(committed.parse("1").is_err());
    }

    #[test]
    fn concatenation() {
        let digits = manyconcat(digit().map(String::from));
        assert_eq!(digits.parse("0123"), Ok(String::from("0123")));
        assert!(digits.parse("").is_err());

        let maybe = manyconcat0(token("ab"));
        assert_eq!(maybe.parse(""), Ok(String::new()));
        assert_eq!(maybe.parse("abab"), Ok(String::from("abab")));

        let p = concat(maybeempty(token("x")), token("y"));
        assert_eq!(p.parse("y"), Ok(String::from("y")));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn zero_width_repetition_is_caught() {
        let _ = manyornone(succeed(())).run(ParserInput::new("abc"));
    }
}
