//! Regular expression lexemes.

use crate::{error::Failure, input::ParserInput, Parse, ParseResult, Parser};
use regex::{Regex, RegexBuilder};
use std::{
    borrow::Cow,
    fmt::{Error, Formatter},
};

/// Matches a regular expression anchored at the cursor.
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Regex,
    pattern: String,
    expected: Cow<'static, str>,
}

/// Compile a pattern lexer.
/// - The match must start at the cursor, the pattern is never searched for further on.
/// - `.` also matches newlines.
/// ```
/// # use textcombi::{Parser, text::regex};
/// let ident = regex("[a-z_][a-z0-9_]*").unwrap();
/// assert_eq!(ident.parse("snake_case1"), Ok(String::from("snake_case1")));
/// assert_eq!(
///     ident.parse("1abc").unwrap_err().expected(),
///     Some("pattern \"[a-z_][a-z0-9_]*\"")
/// );
/// assert!(regex("(").is_err());
/// ```
pub fn regex(pattern: &str) -> Result<Pattern, regex::Error> {
    let regex = RegexBuilder::new(&format!("^(?:{pattern})"))
        .dot_matches_new_line(true)
        .build()?;
    Ok(Pattern {
        regex,
        pattern: pattern.to_owned(),
        expected: Cow::Owned(format!("pattern \"{pattern}\"")),
    })
}

impl Pattern {
    /// The pattern as written, without the anchoring.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl Parser for Pattern {
    type Target = String;

    fn run<'src>(&self, input: ParserInput<'src>) -> ParseResult<'src, Self::Target> {
        match self.regex.find(input.rest()) {
            Some(m) => Ok(Parse::new(
                m.as_str().to_owned(),
                input,
                input.consume(m.end()),
            )),
            None => Err(Failure::recoverable(self.expected.clone(), input)),
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "/{}/", self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SourceLocation;

    #[test]
    fn anchored_at_cursor() {
        let digits = regex("[0-9]+").unwrap();
        assert!(digits.run(ParserInput::new("ab12")).is_err());

        let input = ParserInput::new("ab12cd").drop_first(2);
        let parse = digits.run(input).unwrap();
        assert_eq!(parse.target, "12");
        assert_eq!(parse.range.start, input.location());
        assert_eq!(parse.rest.rest(), "cd");
    }

    #[test]
    fn alternation_stays_anchored() {
        // without grouping, `^a|b` would find the `b` anywhere
        let p = regex("a|b").unwrap();
        assert!(p.run(ParserInput::new("xb")).is_err());
    }

    #[test]
    fn dot_matches_newlines() {
        let comment = regex("/\\*.*?\\*/").unwrap();
        let parse = comment.run(ParserInput::new("/* a\nb */x")).unwrap();
        assert_eq!(parse.target, "/* a\nb */");
        assert_eq!(parse.rest.location(), SourceLocation::new(2, 5, 9));
    }

    #[test]
    fn lexeme_is_counted_in_characters() {
        let word = regex("\\w+").unwrap();
        let parse = word.run(ParserInput::new("héllo wörld")).unwrap();
        assert_eq!(parse.target, "héllo");
        assert_eq!(parse.range.len(), 5);
    }
}
