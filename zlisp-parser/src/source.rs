// zlisp-parser - Source buffer and positions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Source text with indexed character access and line lookup.
//!
//! The lexer reads one character at a time through [`SourceCode::char_at`],
//! which returns `'\0'` past either end of the buffer so that end-of-input
//! checks never need a bounds test of their own.

use std::fmt;

/// Character returned for any out-of-range read.
pub const EOF_CHAR: char = '\0';

/// A position in the source: character index, 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(index: usize, line: usize, column: usize) -> Self {
        SourceLocation {
            index,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[start, end)` of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        SourceSpan { start, end }
    }

    /// Number of characters covered by the span.
    pub fn len(&self) -> usize {
        self.end.index.saturating_sub(self.start.index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub fn to(&self, other: SourceSpan) -> SourceSpan {
        SourceSpan {
            start: self.start,
            end: other.end,
        }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

/// Raw source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCode {
    text: String,
    chars: Vec<char>,
}

impl SourceCode {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().collect();
        SourceCode { text, chars }
    }

    /// The full source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `index`, or [`EOF_CHAR`] when out of range.
    pub fn char_at(&self, index: usize) -> char {
        self.chars.get(index).copied().unwrap_or(EOF_CHAR)
    }

    /// Character at a signed offset from `index`, or [`EOF_CHAR`] when out of range.
    pub fn char_at_offset(&self, index: usize, offset: isize) -> char {
        index
            .checked_add_signed(offset)
            .map_or(EOF_CHAR, |i| self.char_at(i))
    }

    /// All lines of the source, without their terminators.
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }

    /// Lines `start..=end` (1-based). Out-of-range lines are skipped; an empty
    /// source yields a single empty line so diagnostics always have a line to show.
    pub fn get_lines(&self, start: usize, end: usize) -> Vec<String> {
        let start = start.max(1);
        let end = end.max(start);
        let lines: Vec<String> = self
            .text
            .lines()
            .skip(start - 1)
            .take(end - start + 1)
            .map(str::to_string)
            .collect();
        if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        }
    }
}

impl From<&str> for SourceCode {
    fn from(text: &str) -> Self {
        SourceCode::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_at_out_of_range() {
        let src = SourceCode::new("ab");
        assert_eq!(src.char_at(0), 'a');
        assert_eq!(src.char_at(1), 'b');
        assert_eq!(src.char_at(2), EOF_CHAR);
        assert_eq!(src.char_at(100), EOF_CHAR);
        assert_eq!(src.char_at_offset(0, -1), EOF_CHAR);
        assert_eq!(src.char_at_offset(1, -1), 'a');
    }

    #[test]
    fn test_get_lines() {
        let src = SourceCode::new("one\ntwo\nthree");
        assert_eq!(src.get_lines(2, 2), vec!["two".to_string()]);
        assert_eq!(src.get_lines(1, 3).len(), 3);
        assert_eq!(src.get_lines(3, 9), vec!["three".to_string()]);
    }

    #[test]
    fn test_get_lines_empty_source() {
        let src = SourceCode::new("");
        assert_eq!(src.get_lines(1, 1), vec![String::new()]);
    }

    #[test]
    fn test_span_len() {
        let span = SourceSpan::new(SourceLocation::new(3, 1, 3), SourceLocation::new(7, 1, 7));
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
    }
}
