//! Helper macros for nesting combinators

/// Sequence several parsers, producing right nested pairs of targets.
/// ```
/// # use textcombi::{Parser, seqs, text::{character, digit}};
/// let p = seqs!(digit(), character('-'), digit());
/// assert_eq!(p.parse("1-2"), Ok(('1', ('-', '2'))));
/// ```
#[macro_export]
macro_rules! seqs {
    ($p:expr $(,)?) => {
        $p
    };
    ($p:expr , $($ts:tt)+) => {
        $crate::core::seq($p, $crate::seqs!($($ts)+))
    };
}

pub use seqs;

/// Try each parser in turn, moving to the next only on a recoverable failure.
/// ```
/// # use textcombi::{Parser, alts, text::token};
/// let keyword = alts!(token("if"), token("then"), token("else"));
/// assert_eq!(keyword.parse("then"), Ok(String::from("then")));
/// ```
#[macro_export]
macro_rules! alts {
    ($p:expr $(,)?) => {
        $p
    };
    ($p:expr , $($ts:tt)+) => {
        $crate::core::or($p, $crate::alts!($($ts)+))
    };
}

pub use alts;
