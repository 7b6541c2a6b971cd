// zlisp-parser - Parser for zLisp
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for zLisp source code.
//!
//! Converts the non-trivia tokens of a buffer into [`Value`] forms. Errors are
//! recorded in a [`DiagnosticSink`] and reported upward as [`SyntaxError`]. The
//! nearest enclosing `( )`, `[ ]` or `{ }` then skips to its own closer and
//! keeps the elements read before the error, so its parent carries on. A failed
//! top-level form is skipped and the loop moves to the next one, so one pass
//! reports every malformed form in a file.

use std::fmt;
use std::rc::Rc;

use crate::diagnostics::{DiagnosticSink, Severity};
use crate::lexer::lex;
use crate::source::{SourceCode, SourceLocation, SourceSpan};
use crate::token::{Token, TokenKind};
use crate::value::{Constant, Map, Value, keyword_key};

/// A form failed to parse. Its diagnostic has already been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxError;

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error")
    }
}

impl std::error::Error for SyntaxError {}

type ParseResult<T> = Result<T, SyntaxError>;

/// The top-level forms of one source buffer.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub children: Vec<Value>,
    pub span: SourceSpan,
    pub source: Rc<SourceCode>,
}

/// Lex and parse `text`.
///
/// The document is `None` only when lexing hit a fatal error. A document may
/// still come with diagnostics; the forms that failed are left out of it.
pub fn parse(text: &str) -> (Option<SourceDocument>, DiagnosticSink) {
    parse_source(Rc::new(SourceCode::new(text)))
}

/// Parse an already wrapped buffer.
pub fn parse_source(source: Rc<SourceCode>) -> (Option<SourceDocument>, DiagnosticSink) {
    let mut sink = DiagnosticSink::new();
    let tokens = lex(&source, &mut sink);
    if sink.has_fatal() {
        return (None, sink);
    }

    let children = Parser::new(&source, tokens, &mut sink).parse_all();
    let span = match (children.first(), children.last()) {
        (Some(first), Some(last)) => match (first.span(), last.span()) {
            (Some(a), Some(b)) => a.to(b),
            _ => SourceSpan::default(),
        },
        _ => SourceSpan::default(),
    };
    let document = SourceDocument {
        children,
        span,
        source,
    };
    (Some(document), sink)
}

/// The parser converts tokens into [`Value`] forms.
pub struct Parser<'a> {
    source: &'a SourceCode,
    sink: &'a mut DiagnosticSink,
    /// Non-trivia tokens, always ending with end-of-file.
    tokens: Vec<Token>,
    pos: usize,
    last_end: SourceLocation,
}

impl<'a> Parser<'a> {
    /// Create a parser over lexed tokens. Trivia is dropped here.
    pub fn new(source: &'a SourceCode, tokens: Vec<Token>, sink: &'a mut DiagnosticSink) -> Self {
        let mut tokens: Vec<Token> = tokens.into_iter().filter(|t| !t.is_trivia()).collect();
        if !tokens.last().is_some_and(|t| t.is(TokenKind::EndOfFile)) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or_default();
            tokens.push(Token::new(
                TokenKind::EndOfFile,
                "",
                SourceSpan::new(end, end),
            ));
        }
        Parser {
            source,
            sink,
            tokens,
            pos: 0,
            last_end: SourceLocation::new(0, 1, 0),
        }
    }

    /// Parse every top-level form, skipping the ones that fail.
    pub fn parse_all(&mut self) -> Vec<Value> {
        let mut forms = Vec::new();
        while !self.at(TokenKind::EndOfFile) {
            let start = self.pos;
            match self.parse_form() {
                Ok(form) => forms.push(form),
                Err(SyntaxError) => {
                    if self.pos == start {
                        self.advance();
                    }
                    log::debug!("top level resynchronised at {}", self.current().span);
                }
            }
        }
        forms
    }

    // ========================================================================
    // Token access
    // ========================================================================

    fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is(TokenKind::EndOfFile) {
            self.pos += 1;
            self.last_end = token.span.end;
        }
        token
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: SourceLocation) -> SourceSpan {
        SourceSpan::new(start, self.last_end)
    }

    fn error(&mut self, message: String, span: SourceSpan) -> SyntaxError {
        self.sink.add(message, self.source, Severity::Error, span);
        SyntaxError
    }

    fn unexpected(&mut self, expected: &str) -> SyntaxError {
        let token = self.current().clone();
        let message = if token.is(TokenKind::EndOfFile) {
            format!("Unexpected end of file. Expected '{}'", expected)
        } else {
            format!("Unexpected '{}'. Expected '{}'", token, expected)
        };
        self.error(message, token.span)
    }

    // ========================================================================
    // Forms
    // ========================================================================

    fn parse_form(&mut self) -> ParseResult<Value> {
        let kind = self.current().kind;
        match kind {
            TokenKind::LeftParenthesis => {
                let (items, span) = self.parse_seq(TokenKind::RightParenthesis)?;
                Ok(Value::list(items).with_span(span))
            }
            TokenKind::LeftBrace => {
                let (items, span) = self.parse_seq(TokenKind::RightBrace)?;
                Ok(Value::vector(items).with_span(span))
            }
            TokenKind::LeftBracket => self.parse_map(),

            // A closer never starts a form. Left in place so the enclosing
            // sequence can resynchronise on it.
            TokenKind::RightParenthesis | TokenKind::RightBrace | TokenKind::RightBracket => {
                let token = self.current().clone();
                Err(self.error(format!("Unexpected '{}'", token), token.span))
            }

            TokenKind::Ampersand => {
                let token = self.advance();
                Ok(Value::symbol("&").with_span(token.span))
            }

            TokenKind::Quote => self.parse_prefixed("quote"),
            TokenKind::Quasiquote => self.parse_prefixed("quasiquote"),
            TokenKind::Unquote => self.parse_prefixed("unquote"),
            TokenKind::SpliceUnquote => self.parse_prefixed("splice-unquote"),
            TokenKind::Deref => self.parse_prefixed("deref"),
            TokenKind::Meta => self.parse_meta(),

            // Already reported by the lexer.
            TokenKind::Error => {
                self.advance();
                Err(SyntaxError)
            }

            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> ParseResult<Value> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::StringLiteral => {
                self.advance();
                Ok(Value::string(token.text.as_str()).with_span(token.span))
            }
            TokenKind::IntegerLiteral => {
                self.advance();
                match token.text.parse::<i64>() {
                    Ok(n) => Ok(Value::int(n).with_span(token.span)),
                    Err(_) => Err(self.error(
                        format!("Integer literal out of range '{}'", token.text),
                        token.span,
                    )),
                }
            }
            TokenKind::Keyword => {
                self.advance();
                let value = match Constant::from_name(&token.text) {
                    Some(c) => Value::Constant(c, None),
                    None => Value::symbol(&token.text),
                };
                Ok(value.with_span(token.span))
            }
            TokenKind::Colon => {
                self.advance();
                let name = self.current().clone();
                if !name.is(TokenKind::Identifier) && !name.is(TokenKind::Keyword) {
                    return Err(self.unexpected("identifier"));
                }
                self.advance();
                Ok(Value::String(keyword_key(&name.text), None).with_span(token.span.to(name.span)))
            }
            TokenKind::Identifier
            | TokenKind::GreaterThanOrEqual
            | TokenKind::GreaterThan
            | TokenKind::LessThan
            | TokenKind::LessThanOrEqual
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Mul
            | TokenKind::Not
            | TokenKind::Div
            | TokenKind::NotEqual
            | TokenKind::Equal => {
                self.advance();
                Ok(Value::symbol(&token.text).with_span(token.span))
            }
            TokenKind::LineComment | TokenKind::InLineComment => {
                self.advance();
                Ok(Value::comment(&token.text).with_span(token.span))
            }
            TokenKind::EndOfFile => Err(self.unexpected("form")),
            _ => {
                let err = self.unexpected("atom");
                self.advance();
                Err(err)
            }
        }
    }

    /// `'x` and friends become `(name x)`.
    fn parse_prefixed(&mut self, name: &str) -> ParseResult<Value> {
        let prefix = self.advance();
        let form = self.parse_form()?;
        let span = self.span_from(prefix.span.start);
        Ok(Value::list(vec![Value::symbol(name).with_span(prefix.span), form]).with_span(span))
    }

    /// `^meta value` becomes `(with-meta value meta)`.
    fn parse_meta(&mut self) -> ParseResult<Value> {
        let caret = self.advance();
        let meta = self.parse_form()?;
        let value = self.parse_form()?;
        let span = self.span_from(caret.span.start);
        Ok(Value::list(vec![
            Value::symbol("with-meta").with_span(caret.span),
            value,
            meta,
        ])
        .with_span(span))
    }

    /// Map literal. A dangling form or a pair with a non-string key is
    /// reported and left out; the rest of the map is kept.
    fn parse_map(&mut self) -> ParseResult<Value> {
        let (items, span) = self.parse_seq(TokenKind::RightBracket)?;
        if items.len() % 2 != 0 {
            self.error(
                "Map literal must contain an even number of forms".to_string(),
                span,
            );
        }

        let mut map = Map::new();
        let mut pairs = items.into_iter();
        while let (Some(key), Some(value)) = (pairs.next(), pairs.next()) {
            match key {
                Value::String(k, _) => {
                    map.insert(k, value);
                }
                other => {
                    let key_span = other.span().unwrap_or(span);
                    self.error(
                        format!(
                            "Map keys must be strings or keywords, found {}",
                            other.type_name()
                        ),
                        key_span,
                    );
                }
            }
        }
        Ok(Value::hash_map(map).with_span(span))
    }

    /// Parse forms between the current opener and `close`.
    ///
    /// On a failed element the rest of the sequence, closer included, is
    /// skipped and the elements read so far are kept. The failure is passed up
    /// only when no closer is left before end of file.
    fn parse_seq(&mut self, close: TokenKind) -> ParseResult<(Vec<Value>, SourceSpan)> {
        let open = self.advance();
        let mut items = Vec::new();

        loop {
            if self.at(close) {
                self.advance();
                return Ok((items, self.span_from(open.span.start)));
            }
            if self.at(TokenKind::EndOfFile) {
                return Err(self.unexpected(close.spelling()));
            }
            match self.parse_form() {
                Ok(form) => items.push(form),
                Err(SyntaxError) => {
                    if self.synchronize(open.kind, close) {
                        return Ok((items, self.span_from(open.span.start)));
                    }
                    return Err(SyntaxError);
                }
            }
        }
    }

    /// Skip to the closer matching an already consumed `open`, and consume it.
    /// False if end of file came first.
    fn synchronize(&mut self, open: TokenKind, close: TokenKind) -> bool {
        let mut depth = 0usize;
        while !self.at(TokenKind::EndOfFile) {
            let token = self.advance();
            if token.is(open) {
                depth += 1;
            } else if token.is(close) {
                if depth == 0 {
                    log::debug!("resynchronised on '{}' at {}", close, self.last_end);
                    return true;
                }
                depth -= 1;
            }
        }
        log::debug!("no '{}' before end of file", close);
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
