// zlisp-parser - Tokens
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Token kinds, categories and the token type produced by the lexer.

use std::fmt;

use crate::source::SourceSpan;

/// The kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfFile,
    Error,

    // Whitespace
    WhiteSpace,
    NewLine,

    // Comments
    LineComment,   // ;;
    InLineComment, // ;

    // Constants
    IntegerLiteral,
    StringLiteral,
    FloatLiteral,

    // Identifiers
    Identifier,
    Keyword,

    // Groupings
    LeftBracket,      // {
    RightBracket,     // }
    LeftBrace,        // [
    RightBrace,       // ]
    LeftParenthesis,  // (
    RightParenthesis, // )

    // Operators
    GreaterThanOrEqual, // >=
    GreaterThan,        // >
    LessThan,           // <
    LessThanOrEqual,    // <=
    Plus,               // +
    Minus,              // -
    Mul,                // *
    Not,                // !
    Div,                // /
    NotEqual,           // /=
    Equal,              // =

    // Reader prefixes
    Deref,         // @
    Meta,          // ^
    Unquote,       // ~
    SpliceUnquote, // ~@
    Quasiquote,    // `
    Quote,         // '
    Ampersand,     // &

    // Punctuation
    Dot,
    Semicolon,
    Colon,
}

impl TokenKind {
    /// Broad classification of this kind.
    pub fn category(self) -> TokenCategory {
        match self {
            TokenKind::Colon | TokenKind::Semicolon | TokenKind::Dot => TokenCategory::Punctuation,

            TokenKind::GreaterThanOrEqual
            | TokenKind::LessThanOrEqual
            | TokenKind::NotEqual
            | TokenKind::Deref
            | TokenKind::Meta
            | TokenKind::Unquote
            | TokenKind::SpliceUnquote
            | TokenKind::Quasiquote
            | TokenKind::Quote
            | TokenKind::Ampersand
            | TokenKind::Equal
            | TokenKind::Not
            | TokenKind::LessThan
            | TokenKind::GreaterThan
            | TokenKind::Minus
            | TokenKind::Mul
            | TokenKind::Plus
            | TokenKind::Div => TokenCategory::Operator,

            TokenKind::InLineComment | TokenKind::LineComment => TokenCategory::Comment,

            TokenKind::NewLine | TokenKind::WhiteSpace => TokenCategory::WhiteSpace,

            TokenKind::LeftBrace
            | TokenKind::LeftBracket
            | TokenKind::LeftParenthesis
            | TokenKind::RightBrace
            | TokenKind::RightBracket
            | TokenKind::RightParenthesis => TokenCategory::Grouping,

            TokenKind::Identifier | TokenKind::Keyword => TokenCategory::Identifier,

            TokenKind::StringLiteral | TokenKind::IntegerLiteral | TokenKind::FloatLiteral => {
                TokenCategory::Constant
            }

            TokenKind::EndOfFile => TokenCategory::Eof,
            TokenKind::Error => TokenCategory::Invalid,
        }
    }

    /// Source spelling for fixed-text kinds, used in diagnostics.
    pub fn spelling(self) -> &'static str {
        match self {
            TokenKind::LeftBracket => "{",
            TokenKind::RightBracket => "}",
            TokenKind::LeftBrace => "[",
            TokenKind::RightBrace => "]",
            TokenKind::LeftParenthesis => "(",
            TokenKind::RightParenthesis => ")",
            TokenKind::GreaterThanOrEqual => ">=",
            TokenKind::GreaterThan => ">",
            TokenKind::LessThan => "<",
            TokenKind::LessThanOrEqual => "<=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Mul => "*",
            TokenKind::Not => "!",
            TokenKind::Div => "/",
            TokenKind::NotEqual => "/=",
            TokenKind::Equal => "=",
            TokenKind::Deref => "@",
            TokenKind::Meta => "^",
            TokenKind::Unquote => "~",
            TokenKind::SpliceUnquote => "~@",
            TokenKind::Quasiquote => "`",
            TokenKind::Quote => "'",
            TokenKind::Ampersand => "&",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::EndOfFile => "end of file",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::IntegerLiteral => "integer",
            TokenKind::StringLiteral => "string",
            TokenKind::FloatLiteral => "float",
            TokenKind::WhiteSpace | TokenKind::NewLine => "whitespace",
            TokenKind::LineComment | TokenKind::InLineComment => "comment",
            TokenKind::Error => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

/// Coarse grouping of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Punctuation,
    Operator,
    Comment,
    WhiteSpace,
    Grouping,
    Identifier,
    Constant,
    Eof,
    Invalid,
}

/// A token with its literal text and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text. String literals exclude their surrounding quotes.
    pub text: String,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: SourceSpan) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }

    /// Whitespace and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.category(),
            TokenCategory::WhiteSpace | TokenCategory::Comment
        )
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.text)
        }
    }
}
