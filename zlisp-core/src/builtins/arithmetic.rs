// zlisp-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /
//!
//! ## Integer Overflow Behaviour
//!
//! Integers are 64-bit and there is no numeric tower. Every operation is
//! checked and reports overflow as an error instead of wrapping. Division
//! truncates toward zero.

use zlisp_parser::Value;

use crate::error::{Error, Result};

use super::{check_arity, require_int};

fn operands(name: &'static str, args: &[Value]) -> Result<(i64, i64)> {
    check_arity(name, args, 2)?;
    Ok((require_int(name, &args[0])?, require_int(name, &args[1])?))
}

pub(crate) fn builtin_add(args: &[Value]) -> Result<Value> {
    let (a, b) = operands("+", args)?;
    a.checked_add(b)
        .map(Value::int)
        .ok_or(Error::Overflow("+"))
}

pub(crate) fn builtin_sub(args: &[Value]) -> Result<Value> {
    let (a, b) = operands("-", args)?;
    a.checked_sub(b)
        .map(Value::int)
        .ok_or(Error::Overflow("-"))
}

pub(crate) fn builtin_mul(args: &[Value]) -> Result<Value> {
    let (a, b) = operands("*", args)?;
    a.checked_mul(b)
        .map(Value::int)
        .ok_or(Error::Overflow("*"))
}

pub(crate) fn builtin_div(args: &[Value]) -> Result<Value> {
    let (a, b) = operands("/", args)?;
    if b == 0 {
        return Err(Error::DivisionByZero);
    }
    // i64::MIN / -1 is the only other failure
    a.checked_div(b)
        .map(Value::int)
        .ok_or(Error::Overflow("/"))
}
