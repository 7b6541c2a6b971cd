// zlisp-parser - Diagnostics for lexing and parsing
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Collected source errors.
//!
//! The lexer and parser never stop at the first malformed token. Each error is
//! recorded in a [`DiagnosticSink`] together with the source lines it covers,
//! and the pass carries on. Only a [`Severity::Fatal`] entry ends lexing early.

use std::fmt;

use crate::source::{SourceCode, SourceSpan};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
            Severity::Fatal => write!(f, "Fatal"),
        }
    }
}

/// A single recorded source error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub span: SourceSpan,
    /// Source lines covered by `span`, captured when the entry was added.
    pub lines: Vec<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}: {}",
            self.severity, self.span.start.line, self.span.start.column, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

/// Accumulates diagnostics across the lexer and parser.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    entries: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        DiagnosticSink::default()
    }

    /// Record a diagnostic for `span` in `source`.
    pub fn add(
        &mut self,
        message: impl Into<String>,
        source: &SourceCode,
        severity: Severity,
        span: SourceSpan,
    ) {
        let message = message.into();
        log::debug!("{} at {}: {}", severity, span, message);
        let lines = source.get_lines(span.start.line, span.end.line);
        self.entries.push(Diagnostic {
            message,
            severity,
            span,
            lines,
        });
    }

    /// True if anything at all was recorded.
    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// True if a fatal diagnostic was recorded.
    pub fn has_fatal(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Fatal)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a DiagnosticSink {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for DiagnosticSink {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceLocation;

    fn span(line: usize, start: usize, end: usize) -> SourceSpan {
        SourceSpan::new(
            SourceLocation::new(start, line, start),
            SourceLocation::new(end, line, end),
        )
    }

    #[test]
    fn test_add_captures_lines() {
        let src = SourceCode::new("(+ 1 2)\n(foo ]");
        let mut sink = DiagnosticSink::new();
        sink.add("Unexpected ']'", &src, Severity::Error, span(2, 5, 6));

        assert_eq!(sink.len(), 1);
        let entry = sink.iter().next().unwrap();
        assert_eq!(entry.lines, vec!["(foo ]".to_string()]);
        assert_eq!(entry.to_string(), "Error at 2:5: Unexpected ']'");
    }

    #[test]
    fn test_fatal_tracking() {
        let src = SourceCode::new("\"abc");
        let mut sink = DiagnosticSink::new();
        assert!(!sink.has_errors());

        sink.add("bad", &src, Severity::Warning, span(1, 0, 1));
        assert!(sink.has_errors());
        assert!(!sink.has_fatal());

        sink.add("worse", &src, Severity::Fatal, span(1, 0, 4));
        assert!(sink.has_fatal());

        sink.clear();
        assert!(sink.is_empty());
    }
}
