//! Benchmarks for the textcombi parsers, compared with others.
//! - each case is in [`cases`], and defines a parse that will pass.
//! - every parser must produce the expected case before it is timed.
//!
//! | Method | Reason for inclusion |
//! | TextCombi | is this library |
//! | Hand-Rolled | How small formats are often parsed without a library |
//! | Chumsky | A popular parser combinator library supporting recovery |
//!
use std::fmt::Debug;

mod cases;
use cases::{IntList, Nested, Sum};
mod parsers;
use parsers::{chumsky_text::ChumskyParser, handrolled::HandRolled, textcombi::TextCombiParser};

trait Parseable: Eq + PartialEq + Debug {
    type Param;
    fn generate_case(param: Self::Param) -> Self;
    fn generate_text(&self) -> String;
}

trait Parse<O> {
    fn parse(input: &str) -> O;
}

macro_rules! impl_cases {
    ($($case:ident as $name:ident for [ $($arg:tt)* ] ),* ) => {
        $(
            #[divan::bench(
                name = stringify!($name),
                types = [TextCombiParser, HandRolled, ChumskyParser],
                args = [ $($arg)* ]
            )]
            fn $name<P: Parse<$case>>(bencher: divan::Bencher, param: <$case as Parseable>::Param) {
                let o = $case::generate_case(param);
                let text = o.generate_text();
                assert_eq!(P::parse(&text), o);
                bencher.bench_local(|| {
                    P::parse(&text)
                })
            }
        )*
    }
}

impl_cases! {
    IntList as int_list for [0, 100, 100000],
    Nested as nested for [1, 16, 256],
    Sum as sum for [1, 100, 10000]
}

fn main() {
    divan::main();
}
