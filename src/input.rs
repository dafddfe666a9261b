//! Locations in the source text, and the cursor threaded through every parser.

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
};

/// A position in the source text.
/// - `line` and `column` start from 1
/// - `index` counts characters (not bytes) from the start of the source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub index: usize,
}

impl SourceLocation {
    pub const fn new(line: usize, column: usize, index: usize) -> Self {
        Self {
            line,
            column,
            index,
        }
    }

    /// The location immediately after `c`.
    #[inline]
    pub fn advanced_past(self, c: char) -> Self {
        if c == '\n' {
            Self {
                line: self.line + 1,
                column: 1,
                index: self.index + 1,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
                index: self.index + 1,
            }
        }
    }

    /// The location after every character of `lexeme`.
    pub fn advanced_by_scanning(self, lexeme: &str) -> Self {
        lexeme.chars().fold(self, Self::advanced_past)
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

// INV: Along a single source the index determines line and column, the remaining
//      comparisons only keep `Ord` consistent with `Eq`.
impl Ord for SourceLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index
            .cmp(&other.index)
            .then(self.line.cmp(&other.line))
            .then(self.column.cmp(&other.column))
    }
}

impl PartialOrd for SourceLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[start, end)` of [`SourceLocation`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        debug_assert!(start <= end, "range {start}..{end} is reversed");
        Self { start, end }
    }

    /// A zero-width range at `at`.
    pub fn empty(at: SourceLocation) -> Self {
        Self { start: at, end: at }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end.index - self.start.index
    }

    pub fn is_empty(&self) -> bool {
        self.start.index == self.end.index
    }

    /// From the start of `self` to the end of `other`.
    pub fn to(self, other: SourceRange) -> Self {
        Self::new(self.start, other.end)
    }

    pub fn contains(&self, loc: SourceLocation) -> bool {
        self.start <= loc && loc < self.end
    }
}

impl Display for SourceRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// An immutable cursor into the source text.
///
/// Copying is cheap (a reference, an offset and a location), so backtracking is
/// simply running another parser with an earlier cursor.
/// ```
/// # use textcombi::input::{ParserInput, SourceLocation};
/// let input = ParserInput::new("a\nb");
/// let (c, rest) = input.advance().unwrap();
/// assert_eq!(c, 'a');
/// assert_eq!(rest.drop_first(1).location(), SourceLocation::new(2, 1, 2));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ParserInput<'src> {
    source: &'src str,
    // INV: always on a char boundary of `source`
    offset: usize,
    location: SourceLocation,
}

impl<'src> ParserInput<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            location: SourceLocation::default(),
        }
    }

    #[inline]
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// The text not yet consumed.
    #[inline]
    pub fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }

    /// The entire source this cursor is reading.
    pub fn source(&self) -> &'src str {
        self.source
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offset == self.source.len()
    }

    /// The next character, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume a single character.
    #[inline]
    pub fn advance(self) -> Option<(char, Self)> {
        let c = self.peek()?;
        Some((
            c,
            Self {
                source: self.source,
                offset: self.offset + c.len_utf8(),
                location: self.location.advanced_past(c),
            },
        ))
    }

    /// Drop the first `n` characters.
    /// - `n` must not exceed the number of remaining characters, only pass lengths
    ///   already validated against this input.
    pub fn drop_first(self, n: usize) -> Self {
        let mut input = self;
        for _ in 0..n {
            match input.advance() {
                Some((_, next)) => input = next,
                None => {
                    debug_assert!(false, "dropped {n} characters past the end of input");
                    break;
                }
            }
        }
        input
    }

    /// Consume a lexeme of `len` bytes that was matched against [`ParserInput::rest`].
    pub(crate) fn consume(self, len: usize) -> Self {
        let lexeme = &self.rest()[..len];
        Self {
            source: self.source,
            offset: self.offset + len,
            location: self.location.advanced_by_scanning(lexeme),
        }
    }

    /// The text consumed between this cursor and a `later` one on the same source.
    pub fn slice_to(&self, later: &ParserInput<'src>) -> &'src str {
        debug_assert!(std::ptr::eq(self.source, later.source));
        &self.source[self.offset..later.offset]
    }

    /// The whole line of source the cursor is on (without its newline).
    pub fn line(&self) -> &'src str {
        let start = self.source[..self.offset]
            .rfind('\n')
            .map_or(0, |nl| nl + 1);
        let end = self.source[self.offset..]
            .find('\n')
            .map_or(self.source.len(), |nl| self.offset + nl);
        &self.source[start..end]
    }

    /// The byte offset of the cursor within [`ParserInput::line`].
    pub(crate) fn line_offset(&self) -> usize {
        self.source[..self.offset]
            .rfind('\n')
            .map_or(self.offset, |nl| self.offset - nl - 1)
    }

    /// Characters left on the current line, from the cursor.
    pub fn rest_of_line_len(&self) -> usize {
        self.rest().chars().take_while(|c| *c != '\n').count()
    }
}

impl PartialEq for ParserInput<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.source, other.source) && self.offset == other.offset
    }
}

impl Eq for ParserInput<'_> {}

/// Renders the cursor's line with a marker under the remainder of the line.
/// ```text
/// 1:4:
/// (+ X +1 -20)
///    ^~~~~~~~~
/// ```
impl Display for ParserInput<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let marker_len = self.rest_of_line_len().max(1);
        writeln!(f, "{}:", self.location)?;
        writeln!(f, "{}", self.line())?;
        write!(
            f,
            "{}^{}",
            " ".repeat(self.location.column - 1),
            "~".repeat(marker_len - 1)
        )
    }
}
