//! Failures produced while parsing, and the error reported to the caller.
//!
//! While parsing, a failure is classified as either [recoverable](Failure::Recoverable) (an
//! enclosing alternation may try another branch) or [committed](Failure::Committed) (the
//! branch is known to apply, so the failure is a real syntax error). Once committed, no
//! combinator can turn a failure back into a recoverable one.

use crate::input::{ParserInput, SourceLocation};
use miette::{Diagnostic, LabeledSpan, SourceCode};
use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
};

/// A description of what was expected, and where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseFailure<'src> {
    expected: Option<Cow<'static, str>>,
    at: ParserInput<'src>,
    tagged: bool,
}

impl<'src> ParseFailure<'src> {
    pub fn new(expected: impl Into<Cow<'static, str>>, at: ParserInput<'src>) -> Self {
        Self {
            expected: Some(expected.into()),
            at,
            tagged: false,
        }
    }

    /// A failure with no description of what was expected.
    pub fn unexpected(at: ParserInput<'src>) -> Self {
        Self {
            expected: None,
            at,
            tagged: false,
        }
    }

    /// Input remains where the end of input was expected.
    pub fn trailing(at: ParserInput<'src>) -> Self {
        Self::new("end of input", at)
    }

    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    pub fn at(&self) -> ParserInput<'src> {
        self.at
    }

    pub fn location(&self) -> SourceLocation {
        self.at.location()
    }

    pub fn is_tagged(&self) -> bool {
        self.tagged
    }

    /// Replace the description, unless a more specific tag has already been applied.
    pub fn tag(&mut self, description: impl Into<Cow<'static, str>>) {
        if !self.tagged {
            self.expected = Some(description.into());
            self.tagged = true;
        }
    }
}

/// The classification of a failed parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure<'src> {
    /// The parser did not apply here, alternatives may be tried from the same input.
    Recoverable(ParseFailure<'src>),
    /// The parser applied but the input is malformed, no alternative may be tried.
    Committed(ParseFailure<'src>),
}

impl<'src> Failure<'src> {
    pub fn recoverable(expected: impl Into<Cow<'static, str>>, at: ParserInput<'src>) -> Self {
        Self::Recoverable(ParseFailure::new(expected, at))
    }

    pub fn failure(&self) -> &ParseFailure<'src> {
        match self {
            Failure::Recoverable(f) | Failure::Committed(f) => f,
        }
    }

    pub fn into_failure(self) -> ParseFailure<'src> {
        match self {
            Failure::Recoverable(f) | Failure::Committed(f) => f,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Failure::Committed(_))
    }

    /// Mark as irrecoverable.
    pub fn commit(self) -> Self {
        Failure::Committed(self.into_failure())
    }

    /// Transform the failure, keeping its classification.
    pub fn map(self, f: impl FnOnce(ParseFailure<'src>) -> ParseFailure<'src>) -> Self {
        match self {
            Failure::Recoverable(e) => Failure::Recoverable(f(e)),
            Failure::Committed(e) => Failure::Committed(f(e)),
        }
    }
}

/// Rendering options for [`ParseError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Maximum number of characters of the offending line kept in the preview.
    pub preview_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { preview_width: 80 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No alternative matched the input.
    Mismatch,
    /// A committed (non-backtracking) parser failed.
    Committed,
    /// Parsing succeeded, but did not consume all input.
    TrailingInput,
}

impl ErrorKind {
    fn code(self) -> &'static str {
        match self {
            ErrorKind::Mismatch => "textcombi::mismatch",
            ErrorKind::Committed => "textcombi::committed",
            ErrorKind::TrailingInput => "textcombi::trailing_input",
        }
    }
}

/// The error reported from [`Parser::parse`](crate::Parser::parse).
///
/// Owns a bounded preview of the offending line so it can outlive the source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{location}: {}", self.message())]
pub struct ParseError {
    kind: ErrorKind,
    expected: Option<String>,
    found: Option<char>,
    location: SourceLocation,
    line: String,
    // byte offset of the failure within `line`
    marker_start: usize,
    // characters marked from `marker_start`
    marker_len: usize,
}

impl ParseError {
    pub(crate) fn from_failure(
        failure: ParseFailure<'_>,
        kind: ErrorKind,
        config: &RenderConfig,
    ) -> Self {
        let at = failure.at;
        let (line, marker_start) = preview_window(at.line(), at.line_offset(), config.preview_width);
        let marker_len = line[marker_start..].chars().count().max(1);
        Self {
            kind,
            expected: failure.expected.map(Cow::into_owned),
            found: at.peek(),
            location: at.location(),
            line,
            marker_start,
            marker_len,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    /// The character at the failure, `None` at the end of input.
    pub fn found(&self) -> Option<char> {
        self.found
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// The (possibly truncated) line containing the failure.
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn message(&self) -> String {
        let found = match self.found {
            Some(c) => format!("{c:?}"),
            None => String::from("end of input"),
        };
        match &self.expected {
            Some(e) => format!("expected {e}, found {found}"),
            None => format!("unexpected {found}"),
        }
    }

    /// A multi-line rendering with the offending line and a marker under the failure.
    pub fn preview(&self) -> Preview<'_> {
        Preview(self)
    }
}

/// See [`ParseError::preview`].
pub struct Preview<'e>(&'e ParseError);

impl Display for Preview<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let err = self.0;
        let indent = err.line[..err.marker_start].chars().count();
        writeln!(f, "{err}")?;
        writeln!(f, "{}", err.line)?;
        write!(
            f,
            "{}^{}",
            " ".repeat(indent),
            "~".repeat(err.marker_len - 1)
        )
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let len = self.line[self.marker_start..]
            .chars()
            .take(self.marker_len)
            .map(char::len_utf8)
            .sum::<usize>();
        let label = match &self.expected {
            Some(e) => format!("expected {e}"),
            None => String::from("unexpected input"),
        };
        Some(Box::new(std::iter::once(LabeledSpan::new(
            Some(label),
            self.marker_start,
            len,
        ))))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.line)
    }
}

/// Cut `line` down to at most `width` characters around the byte `offset`.
/// Returns the window and the offset within it.
fn preview_window(line: &str, offset: usize, width: usize) -> (String, usize) {
    let width = width.max(1);
    if line.chars().count() <= width {
        return (line.to_owned(), offset);
    }

    // keep a little context before the failure, the rest after it
    let before = line[..offset].chars().count();
    let skip = before.saturating_sub(width / 4);
    let window = line.chars().skip(skip).take(width).collect::<String>();
    let skipped_bytes = line.chars().take(skip).map(char::len_utf8).sum::<usize>();
    let start = (offset - skipped_bytes).min(window.len());
    (window, start)
}
