//! Lexer primitives over text, the leaves of every grammar.
//!
//! All parsers here work on single characters (Unicode scalar values) or literal/pattern
//! lexemes, and fail recoverably without consuming input. They are combined into grammars with
//! the [core](crate::core), [derived](crate::derived) and [assoc](crate::assoc) combinators.
//! ```
//! # use textcombi::{Parser, text::{character, regex, whitespaces}};
//! let ident = regex("[a-z]+").unwrap();
//! let assignment = ident
//!     .clone()
//!     .ended_by(character('=').amid(whitespaces().optional()))
//!     .followed_by(ident);
//! assert_eq!(
//!     assignment.parse("x = y"),
//!     Ok((String::from("x"), String::from("y")))
//! );
//! ```

pub mod basic;
pub mod derived;
pub mod matcher;
pub mod pattern;

pub use basic::*;
pub use derived::*;
pub use matcher::{matcher, Matcher};
pub use pattern::{regex, Pattern};
