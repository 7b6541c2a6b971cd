// zlisp-core - Error types for the zLisp evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for zLisp evaluation.

use std::fmt;

use zlisp_parser::{Diagnostic, Symbol, Value};

/// Result type for zLisp evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone)]
pub enum Error {
    /// Symbol not bound in any enclosing scope
    UnboundSymbol(Symbol),
    /// Wrong number of arguments to a function
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Type error - wrong type for an operation
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    /// Attempted to call something that isn't callable
    NotCallable(String),
    /// Division by zero
    DivisionByZero,
    /// Integer arithmetic overflowed 64 bits
    Overflow(&'static str),
    /// Index out of bounds
    IndexOutOfBounds { index: i64, length: usize },
    /// Invalid special form syntax
    InvalidSyntax { form: &'static str, message: String },
    /// Source text that failed to parse
    Read(Vec<Diagnostic>),
    /// Host I/O failure
    Io(String),
    /// User-thrown value (via throw)
    Thrown(Value),
    /// Non-tail evaluation nested deeper than the configured limit
    StackOverflow(usize),
    /// Internal error - invariant violation
    Internal(String),
}

/// Expected argument count.
#[derive(Debug, Clone)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnboundSymbol(sym) => write!(f, "'{}' not found", sym),
            Error::ArityError {
                expected,
                got,
                name,
            } => {
                if let Some(name) = name {
                    write!(
                        f,
                        "Wrong number of arguments to '{}': expected {}, got {}",
                        name, expected, got
                    )
                } else {
                    write!(
                        f,
                        "Wrong number of arguments: expected {}, got {}",
                        expected, got
                    )
                }
            }
            Error::TypeError {
                expected,
                got,
                context,
            } => {
                if let Some(ctx) = context {
                    write!(f, "{}: expected {}, got {}", ctx, expected, got)
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, got)
                }
            }
            Error::NotCallable(val) => write!(f, "Cannot call value: {}", val),
            Error::DivisionByZero => write!(f, "Division by zero"),
            Error::Overflow(op) => write!(f, "Integer overflow in '{}'", op),
            Error::IndexOutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for collection of length {}",
                    index, length
                )
            }
            Error::InvalidSyntax { form, message } => {
                write!(f, "Invalid '{}' syntax: {}", form, message)
            }
            Error::Read(diagnostics) => match diagnostics.as_slice() {
                [] => write!(f, "Read error"),
                [only] => write!(f, "{}", only),
                [first, rest @ ..] => {
                    write!(f, "{} (and {} more)", first, rest.len())
                }
            },
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::Thrown(val) => write!(f, "{}", val.pr_str(false)),
            Error::StackOverflow(max) => write!(
                f,
                "Stack overflow: maximum recursion depth ({}) exceeded",
                max
            ),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl Error {
    /// Create an arity error for exact arity.
    pub fn arity(expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: None,
        }
    }

    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity with function name.
    pub fn arity_at_least(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error.
    pub fn type_error(expected: &'static str, got: &'static str) -> Self {
        Error::TypeError {
            expected,
            got,
            context: None,
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }
}
