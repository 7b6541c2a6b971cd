// zlisp-parser - Lexer for zLisp
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for zLisp source code.
//!
//! Converts a [`SourceCode`] buffer into a pull-based stream of tokens,
//! trivia included. Malformed input produces [`TokenKind::Error`] tokens and
//! a diagnostic, and scanning carries on so one pass reports every bad token.
//! An unterminated string is the only fatal condition: it records a
//! [`Severity::Fatal`] diagnostic and the stream ends with end-of-file.

use crate::diagnostics::{DiagnosticSink, Severity};
use crate::source::{SourceCode, SourceLocation, SourceSpan};
use crate::token::{Token, TokenKind};

/// Identifiers that lex as [`TokenKind::Keyword`].
pub const KEYWORDS: [&str; 6] = ["if", "nil", "true", "false", "and", "or"];

/// Characters that terminate a word and start a punctuation token.
const PUNCTUATION: &str = "<>{}()[]!*+-=/.;:'`@~^&";

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    source: &'a SourceCode,
    sink: &'a mut DiagnosticSink,
    index: usize,
    line: usize,
    column: usize,
    token_start: SourceLocation,
    builder: String,
    /// Set after a fatal diagnostic; the next token is end-of-file.
    halted: bool,
    /// Set once end-of-file has been yielded.
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over `source`, recording errors into `sink`.
    pub fn new(source: &'a SourceCode, sink: &'a mut DiagnosticSink) -> Self {
        Lexer {
            source,
            sink,
            index: 0,
            line: 1,
            column: 0,
            token_start: SourceLocation::new(0, 1, 0),
            builder: String::new(),
            halted: false,
            finished: false,
        }
    }

    /// Collect every token, ending with end-of-file.
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    /// Scan one token starting at the current position.
    fn lex_token(&mut self) -> Token {
        let c = self.ch();
        if self.is_eof() {
            self.create_token(TokenKind::EndOfFile)
        } else if self.is_newline() {
            self.scan_newline()
        } else if self.is_whitespace() {
            self.scan_whitespace()
        } else if self.is_digit() {
            self.scan_integer()
        } else if c == ';' {
            self.scan_comment()
        } else if c.is_alphabetic() || c == '_' {
            self.scan_identifier()
        } else if c == '"' {
            self.scan_string()
        } else if c == '.' && self.peek().is_ascii_digit() {
            self.scan_float()
        } else if self.is_punctuation() {
            self.scan_punctuation()
        } else {
            self.scan_word()
        }
    }

    // ========================================================================
    // Character access
    // ========================================================================

    fn ch(&self) -> char {
        self.source.char_at(self.index)
    }

    fn peek(&self) -> char {
        self.source.char_at_offset(self.index, 1)
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.index, self.line, self.column)
    }

    fn advance(&mut self) {
        if self.ch() == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.index += 1;
    }

    fn consume(&mut self) {
        self.builder.push(self.ch());
        self.advance();
    }

    fn create_token(&mut self, kind: TokenKind) -> Token {
        let end = self.location();
        let span = SourceSpan::new(self.token_start, end);
        self.token_start = end;
        Token::new(kind, std::mem::take(&mut self.builder), span)
    }

    fn add_error(&mut self, message: String, severity: Severity) {
        let span = SourceSpan::new(self.token_start, self.location());
        self.sink.add(message, self.source, severity, span);
    }

    /// A literal NUL in the text is not the end.
    fn is_eof(&self) -> bool {
        self.index >= self.source.len()
    }

    fn is_newline(&self) -> bool {
        self.ch() == '\n'
    }

    fn is_whitespace(&self) -> bool {
        self.ch().is_whitespace() && !self.is_newline()
    }

    fn is_digit(&self) -> bool {
        let c = self.ch();
        c.is_ascii_digit() || (c == '-' && self.peek().is_ascii_digit())
    }

    /// Identifier body characters. `!` is accepted after the first character
    /// so names like `reset!` stay one token.
    fn is_identifier(&self) -> bool {
        let c = self.ch();
        c.is_alphanumeric() || matches!(c, '_' | '-' | '?' | '!')
    }

    fn is_punctuation(&self) -> bool {
        PUNCTUATION.contains(self.ch())
    }

    /// True where a token may legally end.
    fn at_boundary(&self) -> bool {
        self.is_whitespace() || self.is_newline() || self.is_punctuation() || self.is_eof()
    }

    // ========================================================================
    // Scanners
    // ========================================================================

    fn scan_newline(&mut self) -> Token {
        self.consume();
        self.create_token(TokenKind::NewLine)
    }

    fn scan_whitespace(&mut self) -> Token {
        while self.is_whitespace() {
            self.consume();
        }
        self.create_token(TokenKind::WhiteSpace)
    }

    fn scan_comment(&mut self) -> Token {
        self.consume(); // ;
        let kind = if self.ch() == ';' {
            TokenKind::LineComment
        } else {
            TokenKind::InLineComment
        };
        while !self.is_newline() && !self.is_eof() {
            self.consume();
        }
        self.create_token(kind)
    }

    fn scan_identifier(&mut self) -> Token {
        while self.is_identifier() {
            self.consume();
        }
        if !self.at_boundary() {
            return self.scan_word();
        }
        if KEYWORDS.contains(&self.builder.as_str()) {
            self.create_token(TokenKind::Keyword)
        } else {
            self.create_token(TokenKind::Identifier)
        }
    }

    fn scan_integer(&mut self) -> Token {
        self.consume(); // first digit or leading '-'
        while self.ch().is_ascii_digit() {
            self.consume();
        }
        if matches!(self.ch(), 'f' | '.' | 'e') {
            return self.scan_float();
        }
        if !self.at_boundary() {
            return self.scan_word();
        }
        self.create_token(TokenKind::IntegerLiteral)
    }

    /// Floats are not part of the language. Swallow the whole literal so the
    /// rest of the line still lexes, and report it once.
    fn scan_float(&mut self) -> Token {
        loop {
            let c = self.ch();
            let exponent_sign = matches!(c, '+' | '-') && self.builder.ends_with('e');
            if c.is_alphanumeric() || c == '.' || exponent_sign {
                self.consume();
            } else {
                break;
            }
        }
        let message = format!(
            "floating point literals are not supported: '{}'",
            self.builder
        );
        self.add_error(message, Severity::Error);
        self.create_token(TokenKind::Error)
    }

    fn scan_string(&mut self) -> Token {
        self.advance(); // opening quote is not part of the text

        while self.ch() != '"' {
            if self.is_eof() {
                self.add_error(
                    "Unexpected end of file in string literal".to_string(),
                    Severity::Fatal,
                );
                self.halted = true;
                return self.create_token(TokenKind::Error);
            }
            if self.ch() == '\\' && self.peek() == '"' {
                self.advance();
            }
            self.consume();
        }

        self.advance(); // closing quote
        self.create_token(TokenKind::StringLiteral)
    }

    fn scan_punctuation(&mut self) -> Token {
        let kind = match self.ch() {
            '\'' => TokenKind::Quote,
            '`' => TokenKind::Quasiquote,
            '^' => TokenKind::Meta,
            '@' => TokenKind::Deref,
            '(' => TokenKind::LeftParenthesis,
            ')' => TokenKind::RightParenthesis,
            '{' => TokenKind::LeftBracket,
            '}' => TokenKind::RightBracket,
            '[' => TokenKind::LeftBrace,
            ']' => TokenKind::RightBrace,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '=' => TokenKind::Equal,
            '!' => TokenKind::Not,
            '*' => TokenKind::Mul,
            '&' => TokenKind::Ampersand,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            '~' => return self.scan_pair('@', TokenKind::SpliceUnquote, TokenKind::Unquote),
            '>' => {
                return self.scan_pair('=', TokenKind::GreaterThanOrEqual, TokenKind::GreaterThan);
            }
            '<' => return self.scan_pair('=', TokenKind::LessThanOrEqual, TokenKind::LessThan),
            '/' => return self.scan_pair('=', TokenKind::NotEqual, TokenKind::Div),
            _ => return self.scan_word(),
        };
        self.consume();
        self.create_token(kind)
    }

    /// Two-character operators win over their one-character prefix.
    fn scan_pair(&mut self, second: char, long: TokenKind, short: TokenKind) -> Token {
        self.consume();
        if self.ch() == second {
            self.consume();
            self.create_token(long)
        } else {
            self.create_token(short)
        }
    }

    /// Error path: consume up to the next boundary and report the word.
    fn scan_word(&mut self) -> Token {
        if self.builder.is_empty() && !self.is_eof() {
            self.consume();
        }
        while !self.at_boundary() {
            self.consume();
        }
        let message = format!("Unexpected Token '{}'", self.builder);
        self.add_error(message, Severity::Error);
        self.create_token(TokenKind::Error)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        if self.halted || self.is_eof() {
            self.finished = true;
            return Some(self.create_token(TokenKind::EndOfFile));
        }
        Some(self.lex_token())
    }
}

/// Lex an entire buffer, trivia included.
pub fn lex(source: &SourceCode, sink: &mut DiagnosticSink) -> Vec<Token> {
    Lexer::new(source, sink).tokenize()
}

// ============================================================================
// Tests
// ============================================================================
