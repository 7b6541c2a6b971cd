// zlisp-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: =, <, <=, >, >=

use std::cmp::Ordering;

use zlisp_parser::Value;

use crate::error::Result;

use super::{check_arity, require_int};

/// (= a b) - structural equality; a list never equals a vector
pub(crate) fn builtin_eq(args: &[Value]) -> Result<Value> {
    check_arity("=", args, 2)?;
    Ok(Value::bool(args[0] == args[1]))
}

fn compare(name: &'static str, args: &[Value]) -> Result<Ordering> {
    check_arity(name, args, 2)?;
    let a = require_int(name, &args[0])?;
    let b = require_int(name, &args[1])?;
    Ok(a.cmp(&b))
}

pub(crate) fn builtin_lt(args: &[Value]) -> Result<Value> {
    Ok(Value::bool(compare("<", args)?.is_lt()))
}

pub(crate) fn builtin_le(args: &[Value]) -> Result<Value> {
    Ok(Value::bool(compare("<=", args)?.is_le()))
}

pub(crate) fn builtin_gt(args: &[Value]) -> Result<Value> {
    Ok(Value::bool(compare(">", args)?.is_gt()))
}

pub(crate) fn builtin_ge(args: &[Value]) -> Result<Value> {
    Ok(Value::bool(compare(">=", args)?.is_ge()))
}
