// zlisp - A small Lisp interpreter
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Caret-style rendering of parse diagnostics.
//!
//! ```text
//! (def x ])
//!        ^
//! Error (1:7): Unexpected ']'
//! ```

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use zlisp_parser::{Diagnostic, Severity};

/// Colour for stderr, off when `NO_COLOR` is set.
pub fn color_choice() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn severity_color(severity: Severity) -> ColorSpec {
    let mut spec = ColorSpec::new();
    match severity {
        Severity::Fatal => spec.set_fg(Some(Color::Red)).set_intense(false).set_bold(true),
        Severity::Error => spec.set_fg(Some(Color::Red)).set_intense(true),
        Severity::Warning => spec.set_fg(Some(Color::Yellow)),
    };
    spec
}

fn carets(out: &mut dyn WriteColor, indent: usize, width: usize) -> io::Result<()> {
    writeln!(out, "{}{}", " ".repeat(indent), "^".repeat(width.max(1)))
}

/// Write one diagnostic: the offending line(s), a caret underline, and the
/// severity line.
pub fn render(out: &mut dyn WriteColor, diagnostic: &Diagnostic) -> io::Result<()> {
    out.set_color(&severity_color(diagnostic.severity))?;
    let span = diagnostic.span;
    match diagnostic.lines.as_slice() {
        [] => {}
        [line] => {
            writeln!(out, "{}", line)?;
            let width = span.len().min(line.chars().count().saturating_sub(span.start.column));
            carets(out, span.start.column, width)?;
        }
        [first, middle @ .., last] => {
            writeln!(out, "{}", first)?;
            let width = first.chars().count().saturating_sub(span.start.column);
            carets(out, span.start.column, width)?;
            for line in middle {
                writeln!(out, "{}", line)?;
                carets(out, 0, line.chars().count())?;
            }
            writeln!(out, "{}", last)?;
            carets(out, 0, span.end.column)?;
        }
    }
    writeln!(
        out,
        "{} ({}:{}): {}",
        diagnostic.severity, span.start.line, span.start.column, diagnostic.message
    )?;
    out.reset()
}

/// Render every diagnostic to stderr.
pub fn report_all<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) {
    let mut stderr = StandardStream::stderr(color_choice());
    for diagnostic in diagnostics {
        if let Err(e) = render(&mut stderr, diagnostic) {
            log::warn!("could not write diagnostic: {}", e);
            return;
        }
    }
}
