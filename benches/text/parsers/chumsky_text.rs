use chumsky::prelude::*;

use super::super::{IntList, Nested, Parse, Sum};

pub struct ChumskyParser;

fn number() -> impl Parser<char, u64, Error = Simple<char>> {
    text::int(10).from_str().unwrapped()
}

impl Parse<IntList> for ChumskyParser {
    fn parse(input: &str) -> IntList {
        let parser = number()
            .separated_by(just(' '))
            .then_ignore(end())
            .map(|ints| IntList { ints });
        parser.parse(input).unwrap()
    }
}

impl Parse<Nested> for ChumskyParser {
    fn parse(input: &str) -> Nested {
        let parser = recursive(|nested| {
            nested
                .delimited_by(just('('), just(')'))
                .map(|depth: usize| depth + 1)
                .or(just('x').to(0))
        })
        .then_ignore(end());
        Nested {
            depth: parser.parse(input).unwrap(),
        }
    }
}

impl Parse<Sum> for ChumskyParser {
    fn parse(input: &str) -> Sum {
        let parser = number()
            .map(|n| (1, n))
            .then(just('+').ignore_then(number().map(|n| (1, n))).repeated())
            .foldl(|(lc, ls), (rc, rs)| (lc + rc, ls + rs))
            .then_ignore(end());
        let (terms, total) = parser.parse(input).unwrap();
        Sum { terms, total }
    }
}
