use super::super::{IntList, Nested, Parse, Sum};

pub struct HandRolled;

impl Parse<IntList> for HandRolled {
    fn parse(input: &str) -> IntList {
        if input.is_empty() {
            return IntList { ints: Vec::new() };
        }
        let ints = input
            .split(' ')
            .map(|n| {
                assert!(!n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
                n.parse().unwrap()
            })
            .collect();
        IntList { ints }
    }
}

impl Parse<Nested> for HandRolled {
    fn parse(input: &str) -> Nested {
        let bytes = input.as_bytes();
        let depth = bytes.iter().take_while(|b| **b == b'(').count();
        assert_eq!(bytes.get(depth), Some(&b'x'));
        let closing = &bytes[depth + 1..];
        assert!(closing.len() == depth && closing.iter().all(|b| *b == b')'));
        Nested { depth }
    }
}

impl Parse<Sum> for HandRolled {
    fn parse(input: &str) -> Sum {
        let mut terms = 0;
        let mut total = 0;
        for n in input.split('+') {
            assert!(!n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
            terms += 1;
            total += n.parse::<u64>().unwrap();
        }
        Sum { terms, total }
    }
}
