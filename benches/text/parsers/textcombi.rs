use textcombi::{
    core::{recursive, RecursiveHandle},
    text::{character, unsignedinteger},
    Parser,
};

use super::super::{IntList, Nested, Parse, Sum};

pub struct TextCombiParser;

fn number() -> impl Parser<Target = u64> {
    unsignedinteger().map_some(|n| n.parse().ok(), "a number")
}

impl Parse<IntList> for TextCombiParser {
    fn parse(input: &str) -> IntList {
        let parser = number()
            .separated_by_or_none(character(' '))
            .map(|ints| IntList { ints });
        parser.parse(input).unwrap()
    }
}

impl Parse<Nested> for TextCombiParser {
    fn parse(input: &str) -> Nested {
        let parser = recursive(|nested: RecursiveHandle<usize>| {
            nested
                .between(character('('), character(')'))
                .map(|depth| depth + 1)
                .or(character('x').map(|_| 0))
        });
        Nested {
            depth: parser.parse(input).unwrap(),
        }
    }
}

impl Parse<Sum> for TextCombiParser {
    fn parse(input: &str) -> Sum {
        let term = number().map(|n| (1, n));
        let plus = character('+').map(|_| |(lc, ls): (u64, u64), (rc, rs): (u64, u64)| (lc + rc, ls + rs));
        let (terms, total) = term.infixed_left(plus).parse(input).unwrap();
        Sum { terms, total }
    }
}
