//! Operator combinators that build expression trees without left recursion.
//!
//! Each combinator parses a base expression, then repeatedly parses operators (and operands),
//! applying the parsed operator functions. A recoverable failure of an operator, or of the
//! operand following one, ends the expression before that operator. All loops are iterative, so
//! long operator chains do not grow the stack.
//!
//! The `*range` forms also give each operator the [SourceRange] of the node being built, from
//! the start of its leftmost operand to the end of its rightmost.

use super::*;

/// Runs `p`, converting a recoverable failure into `None`.
#[inline]
fn attempt<'src, P: Parser>(
    p: &P,
    input: ParserInput<'src>,
) -> Result<Option<Parse<'src, P::Target>>, Failure<'src>> {
    match p.run(input) {
        Ok(parse) => Ok(Some(parse)),
        Err(Failure::Recoverable(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Parses `(op base)` after `rest`, if both are present.
#[inline]
#[allow(clippy::type_complexity)]
fn operation<'src, B: Parser, O: Parser>(
    base: &B,
    op: &O,
    rest: ParserInput<'src>,
) -> Result<Option<(O::Target, Parse<'src, B::Target>)>, Failure<'src>> {
    let Some(op) = attempt(op, rest)? else {
        return Ok(None);
    };
    Ok(attempt(base, op.rest)?.map(|operand| (op.target, operand)))
}

fn fold_left<'src, B, O>(
    base: &B,
    op: &O,
    input: ParserInput<'src>,
    combine: impl Fn(O::Target, B::Target, B::Target, SourceRange) -> B::Target,
) -> ParseResult<'src, B::Target>
where
    B: Parser,
    O: Parser,
{
    let first = base.run(input)?;
    let mut target = first.target;
    let mut rest = first.rest;
    while let Some((f, operand)) = operation(base, op, rest)? {
        rest = operand.rest;
        target = combine(
            f,
            target,
            operand.target,
            SourceRange::new(input.location(), rest.location()),
        );
    }
    Ok(Parse::new(target, input, rest))
}

fn fold_right<'src, B, O>(
    base: &B,
    op: &O,
    input: ParserInput<'src>,
    combine: impl Fn(O::Target, B::Target, B::Target, SourceRange) -> B::Target,
) -> ParseResult<'src, B::Target>
where
    B: Parser,
    O: Parser,
{
    let first = base.run(input)?;
    let mut last = first.target;
    let mut last_start = input.location();
    let mut rest = first.rest;

    // (operand, start of operand, operator to its right)
    let mut pending = Vec::new();
    while let Some((f, operand)) = operation(base, op, rest)? {
        let previous = std::mem::replace(&mut last, operand.target);
        pending.push((previous, last_start, f));
        last_start = operand.range.start;
        rest = operand.rest;
    }

    let end = rest.location();
    let target = pending
        .into_iter()
        .rev()
        .fold(last, |right, (left, start, f)| {
            combine(f, left, right, SourceRange::new(start, end))
        });
    Ok(Parse::new(target, input, rest))
}

fn fold_suffixes<'src, B, S>(
    base: &B,
    suffix: &S,
    input: ParserInput<'src>,
    combine: impl Fn(S::Target, B::Target, SourceRange) -> B::Target,
) -> ParseResult<'src, B::Target>
where
    B: Parser,
    S: Parser,
{
    let first = base.run(input)?;
    let mut target = first.target;
    let mut rest = first.rest;
    while let Some(parse) = attempt(suffix, rest)? {
        rest = parse.rest;
        target = combine(
            parse.target,
            target,
            SourceRange::new(input.location(), rest.location()),
        );
    }
    Ok(Parse::new(target, input, rest))
}

/// Parses `base (op base)*`, combining left associatively.
/// ```
/// # use textcombi::{Parser, assoc::infixleft, text::{character, digit}};
/// let number = digit().map(|d| d.to_digit(10).unwrap() as i32);
/// let minus = character('-').map(|_| |a: i32, b: i32| a - b);
/// assert_eq!(infixleft(number, minus).parse("8-4-2"), Ok(2));
/// ```
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct infixleft<B, O>(pub B, pub O);

impl<B, O> Parser for infixleft<B, O>
where
    B: Parser,
    O: Parser,
    O::Target: FnOnce(B::Target, B::Target) -> B::Target,
{
    type Target = B::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        fold_left(&self.0, &self.1, input, |f, a, b, _| f(a, b))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} ({} {})*", Repr(&self.0), Repr(&self.1), Repr(&self.0))
    }
}

/// As [infixleft], the operator also receives the range of the node it builds.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct infixleftrange<B, O>(pub B, pub O);

impl<B, O> Parser for infixleftrange<B, O>
where
    B: Parser,
    O: Parser,
    O::Target: FnOnce(B::Target, B::Target, SourceRange) -> B::Target,
{
    type Target = B::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        fold_left(&self.0, &self.1, input, |f, a, b, range| f(a, b, range))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} ({} {})*", Repr(&self.0), Repr(&self.1), Repr(&self.0))
    }
}

/// Parses `(base op)* base`, combining right associatively.
/// ```
/// # use textcombi::{Parser, assoc::infixright, text::{character, digit}};
/// let number = digit().map(|d| d.to_digit(10).unwrap() as i32);
/// let minus = character('-').map(|_| |a: i32, b: i32| a - b);
/// assert_eq!(infixright(number, minus).parse("8-4-2"), Ok(6));
/// ```
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct infixright<B, O>(pub B, pub O);

impl<B, O> Parser for infixright<B, O>
where
    B: Parser,
    O: Parser,
    O::Target: FnOnce(B::Target, B::Target) -> B::Target,
{
    type Target = B::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        fold_right(&self.0, &self.1, input, |f, a, b, _| f(a, b))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "({} {})* {}", Repr(&self.0), Repr(&self.1), Repr(&self.0))
    }
}

/// As [infixright], the operator also receives the range of the node it builds.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct infixrightrange<B, O>(pub B, pub O);

impl<B, O> Parser for infixrightrange<B, O>
where
    B: Parser,
    O: Parser,
    O::Target: FnOnce(B::Target, B::Target, SourceRange) -> B::Target,
{
    type Target = B::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        fold_right(&self.0, &self.1, input, |f, a, b, range| f(a, b, range))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "({} {})* {}", Repr(&self.0), Repr(&self.1), Repr(&self.0))
    }
}

/// Parses `base suffix*`, applying each parsed suffix function in order.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct suffixed<B, S>(pub B, pub S);

impl<B, S> Parser for suffixed<B, S>
where
    B: Parser,
    S: Parser,
    S::Target: FnOnce(B::Target) -> B::Target,
{
    type Target = B::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        fold_suffixes(&self.0, &self.1, input, |f, a, _| f(a))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {}*", Repr(&self.0), Repr(&self.1))
    }
}

/// As [suffixed], the suffix also receives the range of the node it builds.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub struct suffixedrange<B, S>(pub B, pub S);

impl<B, S> Parser for suffixedrange<B, S>
where
    B: Parser,
    S: Parser,
    S::Target: FnOnce(B::Target, SourceRange) -> B::Target,
{
    type Target = B::Target;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        fold_suffixes(&self.0, &self.1, input, |f, a, range| f(a, range))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {}*", Repr(&self.0), Repr(&self.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::SourceLocation,
        text::{character, digit, lowerletter},
    };

    #[derive(Debug, PartialEq)]
    enum Expr {
        Var(char, SourceRange),
        Pow(Box<Expr>, Box<Expr>, SourceRange),
        Call(Box<Expr>, SourceRange),
    }

    fn var() -> impl Parser<Target = Expr> {
        lowerletter().map_range(Expr::Var)
    }

    fn range(start: usize, end: usize) -> SourceRange {
        SourceRange::new(
            SourceLocation::new(1, start + 1, start),
            SourceLocation::new(1, end + 1, end),
        )
    }

    fn number() -> impl Parser<Target = i64> {
        digit().map_some(|d| d.to_digit(10).map(i64::from), "a digit")
    }

    #[test]
    fn left_and_right_associate_differently() {
        let minus = || character('-').map(|_| |a: i64, b: i64| a - b);
        assert_eq!(infixleft(number(), minus()).parse("9-4-3-1"), Ok(1));
        assert_eq!(infixright(number(), minus()).parse("9-4-3-1"), Ok(7));
    }

    #[test]
    fn dangling_operator_is_left_unconsumed() {
        let plus = character('+').map(|_| |a: i64, b: i64| a + b);
        let p = infixleft(number(), &plus);
        let parse = p.run(ParserInput::new("1+2+")).unwrap();
        assert_eq!(parse.target, 3);
        assert_eq!(parse.rest.rest(), "+");

        let q = infixright(number(), &plus);
        let parse = q.run(ParserInput::new("1+2+x")).unwrap();
        assert_eq!(parse.target, 3);
        assert_eq!(parse.rest.rest(), "+x");
    }

    #[test]
    fn committed_operand_failure_propagates() {
        let plus = character('+').map(|_| |a: i64, b: i64| a + b);
        let p = infixleft(number().nonbacktracking(), plus);
        assert!(p.run(ParserInput::new("1+x")).unwrap_err().is_committed());
    }

    #[test]
    fn right_ranges_span_operands() {
        let pow = character('^').map(|_| {
            |a: Expr, b: Expr, r: SourceRange| Expr::Pow(Box::new(a), Box::new(b), r)
        });
        let parsed = infixrightrange(var(), pow).parse("a^b^c").unwrap();
        assert_eq!(
            parsed,
            Expr::Pow(
                Box::new(Expr::Var('a', range(0, 1))),
                Box::new(Expr::Pow(
                    Box::new(Expr::Var('b', range(2, 3))),
                    Box::new(Expr::Var('c', range(4, 5))),
                    range(2, 5)
                )),
                range(0, 5)
            )
        );
    }

    #[test]
    fn left_ranges_grow() {
        let pow = character('^').map(|_| {
            |a: Expr, b: Expr, r: SourceRange| Expr::Pow(Box::new(a), Box::new(b), r)
        });
        match infixleftrange(var(), pow).parse("a^b^c").unwrap() {
            Expr::Pow(inner, _, outer) => {
                assert_eq!(outer, range(0, 5));
                assert!(matches!(*inner, Expr::Pow(_, _, r) if r == range(0, 3)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn suffixes_apply_in_order() {
        let call = character('!').map(|_| |e: Expr, r: SourceRange| Expr::Call(Box::new(e), r));
        let parsed = suffixedrange(var(), call).parse("f!!").unwrap();
        assert_eq!(
            parsed,
            Expr::Call(
                Box::new(Expr::Call(Box::new(Expr::Var('f', range(0, 1))), range(0, 2))),
                range(0, 3)
            )
        );

        let double = character('*').map(|_| |n: i64| n * 2);
        assert_eq!(suffixed(number(), double).parse("3***"), Ok(24));
    }

    #[test]
    fn long_right_chains_are_iterative() {
        let text = format!("1{}", "+1".repeat(100_000));
        let plus = character('+').map(|_| |a: i64, b: i64| a + b);
        assert_eq!(infixright(number(), plus).parse(&text), Ok(100_001));
    }
}
