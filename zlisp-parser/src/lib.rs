// zlisp-parser - Lexer and parser for the zLisp programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # zlisp-parser
//!
//! Source buffers, diagnostics, lexer and recovering parser for zLisp.
//! Produces [`Value`] forms from source code strings.

pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod symbol;
pub mod token;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};
pub use im::{OrdMap, Vector};
pub use lexer::{Lexer, lex};
pub use parser::{Parser, SourceDocument, SyntaxError, parse, parse_source};
pub use source::{SourceCode, SourceLocation, SourceSpan};
pub use symbol::Symbol;
pub use token::{Token, TokenCategory, TokenKind};
pub use value::{
    Atom, Closure, Constant, Function, Info, KEYWORD_PREFIX, Map, NativeFn, Value, keyword_key,
};
