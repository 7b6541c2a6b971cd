// zlisp-core - Exception built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use zlisp_parser::Value;

use crate::error::{Error, Result};

use super::check_arity;

/// (throw value) - abort evaluation with value as the error
pub(crate) fn builtin_throw(args: &[Value]) -> Result<Value> {
    check_arity("throw", args, 1)?;
    Err(Error::Thrown(args[0].clone()))
}
