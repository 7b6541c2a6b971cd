// zlisp-core - Type predicate built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates: nil?, true?, symbol?, keyword?, list?, etc.

use zlisp_parser::{Constant, Function, Value};

use crate::error::Result;

use super::check_arity;

// ============================================================================
// Type Predicates
// ============================================================================

pub(crate) fn builtin_nil_p(args: &[Value]) -> Result<Value> {
    check_arity("nil?", args, 1)?;
    Ok(Value::bool(args[0].is_nil()))
}

pub(crate) fn builtin_true_p(args: &[Value]) -> Result<Value> {
    check_arity("true?", args, 1)?;
    Ok(Value::bool(matches!(
        args[0],
        Value::Constant(Constant::True, _)
    )))
}

pub(crate) fn builtin_false_p(args: &[Value]) -> Result<Value> {
    check_arity("false?", args, 1)?;
    Ok(Value::bool(matches!(
        args[0],
        Value::Constant(Constant::False, _)
    )))
}

pub(crate) fn builtin_symbol_p(args: &[Value]) -> Result<Value> {
    check_arity("symbol?", args, 1)?;
    Ok(Value::bool(matches!(args[0], Value::Symbol(..))))
}

/// Strings that are not keywords.
pub(crate) fn builtin_string_p(args: &[Value]) -> Result<Value> {
    check_arity("string?", args, 1)?;
    Ok(Value::bool(
        matches!(args[0], Value::String(..)) && !args[0].is_keyword(),
    ))
}

pub(crate) fn builtin_keyword_p(args: &[Value]) -> Result<Value> {
    check_arity("keyword?", args, 1)?;
    Ok(Value::bool(args[0].is_keyword()))
}

pub(crate) fn builtin_number_p(args: &[Value]) -> Result<Value> {
    check_arity("number?", args, 1)?;
    Ok(Value::bool(matches!(args[0], Value::Integer(..))))
}

/// Functions that are not macros.
pub(crate) fn builtin_fn_p(args: &[Value]) -> Result<Value> {
    check_arity("fn?", args, 1)?;
    Ok(Value::bool(matches!(
        &args[0],
        Value::Function(f, _) if !f.is_macro()
    )))
}

pub(crate) fn builtin_macro_p(args: &[Value]) -> Result<Value> {
    check_arity("macro?", args, 1)?;
    Ok(Value::bool(matches!(
        &args[0],
        Value::Function(Function::Closure(c), _) if c.is_macro()
    )))
}

// ============================================================================
// Collection Predicates
// ============================================================================

pub(crate) fn builtin_list_p(args: &[Value]) -> Result<Value> {
    check_arity("list?", args, 1)?;
    Ok(Value::bool(matches!(args[0], Value::List(..))))
}

pub(crate) fn builtin_vector_p(args: &[Value]) -> Result<Value> {
    check_arity("vector?", args, 1)?;
    Ok(Value::bool(matches!(args[0], Value::Vector(..))))
}

pub(crate) fn builtin_map_p(args: &[Value]) -> Result<Value> {
    check_arity("map?", args, 1)?;
    Ok(Value::bool(matches!(args[0], Value::HashMap(..))))
}

/// Lists and vectors.
pub(crate) fn builtin_sequential_p(args: &[Value]) -> Result<Value> {
    check_arity("sequential?", args, 1)?;
    Ok(Value::bool(args[0].as_seq().is_some()))
}

pub(crate) fn builtin_atom_p(args: &[Value]) -> Result<Value> {
    check_arity("atom?", args, 1)?;
    Ok(Value::bool(matches!(args[0], Value::Atom(..))))
}
